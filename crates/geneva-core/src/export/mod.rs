//! Exporting built assemblies (the `show` entry point)

mod manifest;
mod options;

use std::collections::HashMap;

use geneva_cad::{BuildOptions, CadKernel, TessellatedMesh};

use crate::assembly::Assembly;
use crate::build::{BuildError, PartReport, build_assembly};
use crate::stl::save_stl;

pub use manifest::{Manifest, ManifestEntry};
pub use options::ExportOptions;

/// Build an assembly and write it out for viewing
///
/// Writes one STL per placed part, optionally the merged assembly mesh and
/// a RON manifest, and returns the per-part reports. Fails before building
/// if two outputs would share a file name.
pub fn show(
    assembly: &Assembly,
    kernel: &dyn CadKernel,
    build_options: &BuildOptions,
    options: &ExportOptions,
) -> Result<Vec<PartReport>, ExportError> {
    check_file_names(assembly, options)?;
    let built = build_assembly(assembly, kernel, build_options)?;

    std::fs::create_dir_all(&options.output_dir).map_err(|e| ExportError::Io(e.to_string()))?;

    let mut manifest = Manifest::new(&assembly.name);
    let mut merged = TessellatedMesh::new();
    for part in &built {
        let filename = sanitize_filename(&part.path) + ".stl";
        save_stl(&part.world_mesh, options.output_dir.join(&filename))
            .map_err(|e| ExportError::MeshExport(e.to_string()))?;
        merged.merge(&part.world_mesh);
        manifest.components.push(ManifestEntry::new(part, filename));
    }

    let stem = sanitize_filename(&assembly.name);
    if options.merged {
        let filename = format!("{stem}.stl");
        save_stl(&merged, options.output_dir.join(&filename))
            .map_err(|e| ExportError::MeshExport(e.to_string()))?;
        manifest.merged = Some(filename);
    }
    if options.manifest {
        manifest.save(options.output_dir.join(format!("{stem}.ron")))?;
    }

    tracing::info!(
        "Exported {} parts of '{}' to {}",
        built.len(),
        assembly.name,
        options.output_dir.display()
    );
    Ok(built.iter().map(|p| p.report()).collect())
}

/// Reject assemblies whose outputs would overwrite one another
fn check_file_names(assembly: &Assembly, options: &ExportOptions) -> Result<(), ExportError> {
    let mut owners: HashMap<String, String> = HashMap::new();
    if options.merged {
        owners.insert(
            format!("{}.stl", sanitize_filename(&assembly.name)),
            assembly.name.clone(),
        );
    }
    for placed in assembly.flatten() {
        let file = sanitize_filename(&placed.path) + ".stl";
        if let Some(first) = owners.insert(file.clone(), placed.path.clone()) {
            return Err(ExportError::FileCollision {
                file,
                first,
                second: placed.path,
            });
        }
    }
    Ok(())
}

/// Replace characters that are unsafe in file names
pub fn sanitize_filename(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Export-related errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum ExportError {
    #[error("Build failed: {0}")]
    Build(#[from] BuildError),
    #[error("IO error: {0}")]
    Io(String),
    #[error("Mesh export failed: {0}")]
    MeshExport(String),
    #[error("Serialization error: {0}")]
    Serialize(String),
    #[error("Deserialization error: {0}")]
    Deserialize(String),
    #[error("'{first}' and '{second}' would both be written to {file}")]
    FileCollision {
        file: String,
        first: String,
        second: String,
    },
}
