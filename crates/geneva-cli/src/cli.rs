use std::path::PathBuf;

use clap::{Parser, Subcommand};

const OUTPUT_DIR: &str = "out";

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build the Geneva drive and write STL files plus a manifest
    Show {
        /// RON configuration file; defaults are used when omitted
        #[arg(long)]
        config: Option<PathBuf>,

        /// Directory the meshes are written to
        #[arg(long, default_value = OUTPUT_DIR)]
        out: PathBuf,

        /// Segments per full circle, overrides the configuration
        #[arg(long)]
        segments: Option<u32>,
    },

    /// Print the dimensions derived from the parameters
    Dims {
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Build every part and print its bounds and volume
    Report {
        #[arg(long)]
        config: Option<PathBuf>,

        #[arg(long)]
        segments: Option<u32>,
    },

    /// Write the default configuration to a file
    InitConfig {
        file: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}
