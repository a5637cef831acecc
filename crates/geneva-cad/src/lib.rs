//! CAD Kernel Abstraction and Sketch System
//!
//! This crate provides:
//! - Abstract CAD kernel traits for geometry operations
//! - A polygon-mesh kernel built on `csgrs`
//! - 2D sketches with circles, polygons and pencil paths
//! - Feature operations (extrude, revolve) with boolean modes
//! - Parametric history for rebuilding a body

pub mod feature;
pub mod history;
pub mod kernel;
pub mod sketch;

// Re-exports for convenience
pub use feature::{BooleanOp, BuildOptions, Feature, FeatureError, FeatureResult};
pub use history::FeatureHistory;
pub use kernel::{
    Axis3D, BooleanType, CadError, CadKernel, CadResult, MeshKernel, NullKernel, Solid,
    TessellatedMesh, Wire2D, default_kernel,
};
pub use sketch::{Pencil, Sketch, SketchEntity, SketchError, SketchPlane, SketchResult};
