//! Parametric Geneva drive
//!
//! Parameters and derived dimensions, the five parts of the drive, the
//! assemblies that place them, and export of the built geometry.

pub mod assembly;
pub mod build;
pub mod config;
pub mod export;
pub mod material;
pub mod params;
pub mod part;
pub mod parts;
pub mod stl;

pub use assembly::{
    Assembly, AssemblyError, Component, ComponentKind, PlacedPart, TransformBuilder, geneva_drive,
    plate_with_bearings,
};
pub use build::{BuildError, BuiltPart, PartReport, build_assembly};
pub use config::{ConfigError, GenevaConfig};
pub use export::{ExportError, ExportOptions, Manifest, ManifestEntry, show};
pub use material::{MaterialDef, Paint};
pub use params::{BearingSpec, CrossDimensions, Dimensions, DiskDimensions, GenevaParams, ParamsError};
pub use part::Part;
pub use stl::{StlError, load_stl, save_stl};
