//! Export options for `show`

use std::path::PathBuf;

/// Export options for writing a built assembly to disk
#[derive(Debug, Clone)]
pub struct ExportOptions {
    /// Output directory (created if missing)
    pub output_dir: PathBuf,
    /// Also write every part merged into one `<assembly>.stl`
    pub merged: bool,
    /// Write the `<assembly>.ron` manifest
    pub manifest: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("out"),
            merged: true,
            manifest: true,
        }
    }
}
