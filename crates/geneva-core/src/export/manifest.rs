//! Manifest describing exported parts

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::ExportError;
use crate::build::{BuiltPart, PartReport};
use crate::material::MaterialDef;

/// One exported part
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManifestEntry {
    /// Component path within the assembly
    pub path: String,
    pub part: String,
    pub material: MaterialDef,
    /// World transform, column-major
    pub transform: [f32; 16],
    /// STL file name relative to the manifest
    pub file: String,
    pub report: PartReport,
}

impl ManifestEntry {
    pub fn new(built: &BuiltPart, file: impl Into<String>) -> Self {
        Self {
            path: built.path.clone(),
            part: built.name.clone(),
            material: built.paint.material(),
            transform: built.world_transform.to_cols_array(),
            file: file.into(),
            report: built.report(),
        }
    }
}

/// Index of everything `show` wrote
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    pub version: u32,
    pub name: String,
    /// Length unit of all coordinates
    pub units: String,
    /// Combined mesh file, if written
    pub merged: Option<String>,
    pub components: Vec<ManifestEntry>,
}

impl Manifest {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            version: 1,
            name: name.into(),
            units: "mm".to_string(),
            merged: None,
            components: Vec::new(),
        }
    }

    /// Save manifest to a file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ExportError> {
        let content = ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|e| ExportError::Serialize(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| ExportError::Io(e.to_string()))?;
        Ok(())
    }

    /// Load manifest from a file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ExportError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| ExportError::Io(e.to_string()))?;
        ron::from_str(&content).map_err(|e| ExportError::Deserialize(e.to_string()))
    }
}
