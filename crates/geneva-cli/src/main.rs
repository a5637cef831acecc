//! Geneva drive command line entry point

mod cli;

use std::path::Path;

use anyhow::{Context, Result, bail};
use clap::Parser;
use geneva_cad::{BuildOptions, MeshKernel};
use geneva_core::{ExportOptions, GenevaConfig, PartReport, build_assembly, geneva_drive, show};

use cli::{Cli, Command};

fn main() -> Result<()> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "geneva_cli=info,geneva_core=info,geneva_cad=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Show {
            config,
            out,
            segments,
        } => {
            let config = load_config(config.as_deref())?;
            let build = build_options(&config, segments);
            let assembly = geneva_drive(&config.params)?;
            let kernel = MeshKernel::with_segments(build.circle_segments);
            let options = ExportOptions {
                output_dir: out,
                ..Default::default()
            };
            let reports = show(&assembly, &kernel, &build, &options)?;
            print_reports(&reports);
        }
        Command::Dims { config } => {
            let config = load_config(config.as_deref())?;
            let dims = config.params.dimensions();
            let text = ron::ser::to_string_pretty(&dims, ron::ser::PrettyConfig::default())
                .context("Failed to format dimensions")?;
            println!("{text}");
        }
        Command::Report { config, segments } => {
            let config = load_config(config.as_deref())?;
            let build = build_options(&config, segments);
            let assembly = geneva_drive(&config.params)?;
            let kernel = MeshKernel::with_segments(build.circle_segments);
            let built = build_assembly(&assembly, &kernel, &build)?;
            let reports: Vec<PartReport> = built.iter().map(|p| p.report()).collect();
            print_reports(&reports);
        }
        Command::InitConfig { file, force } => {
            if file.exists() && !force {
                bail!("{} already exists, pass --force to overwrite", file.display());
            }
            GenevaConfig::default()
                .save(&file)
                .with_context(|| format!("Failed to write {}", file.display()))?;
            tracing::info!("Wrote default configuration to {}", file.display());
        }
    }
    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<GenevaConfig> {
    match path {
        Some(path) => GenevaConfig::load(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display())),
        None => Ok(GenevaConfig::default()),
    }
}

fn build_options(config: &GenevaConfig, segments: Option<u32>) -> BuildOptions {
    let mut options = config.build;
    if let Some(segments) = segments {
        options.circle_segments = segments;
    }
    options
}

fn print_reports(reports: &[PartReport]) {
    println!(
        "{:<40} {:<8} {:>12} {:>10}  bounds",
        "part", "material", "volume mm3", "triangles"
    );
    for report in reports {
        println!(
            "{:<40} {:<8} {:>12.1} {:>10}  [{:.2}, {:.2}, {:.2}] .. [{:.2}, {:.2}, {:.2}]",
            report.path,
            report.material,
            report.volume,
            report.triangles,
            report.min[0],
            report.min[1],
            report.min[2],
            report.max[0],
            report.max[1],
            report.max[2],
        );
    }
}
