//! Building assemblies into placed meshes

use geneva_cad::{BuildOptions, CadError, CadKernel, FeatureError, SketchError, TessellatedMesh};
use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

use crate::assembly::{Assembly, AssemblyError};
use crate::material::Paint;
use crate::params::ParamsError;

/// Errors raised while turning parameters into geometry
#[derive(Debug, Clone, thiserror::Error)]
pub enum BuildError {
    #[error("Invalid parameters: {0}")]
    Params(#[from] ParamsError),
    #[error("Sketch error: {0}")]
    Sketch(#[from] SketchError),
    #[error("Assembly error: {0}")]
    Assembly(#[from] AssemblyError),
    #[error("Part '{part}' failed to rebuild: {source}")]
    Feature { part: String, source: FeatureError },
    #[error("Part '{part}' failed to tessellate: {source}")]
    Cad { part: String, source: CadError },
    #[error("Kernel '{0}' is not available")]
    KernelUnavailable(String),
}

/// A part mesh placed in world space
#[derive(Debug, Clone)]
pub struct BuiltPart {
    /// Component path within the assembly
    pub path: String,
    /// Name of the part itself
    pub name: String,
    pub paint: Paint,
    pub world_transform: Mat4,
    /// Mesh in the part's own frame
    pub mesh: TessellatedMesh,
    /// Mesh moved into world space
    pub world_mesh: TessellatedMesh,
}

impl BuiltPart {
    /// Summarize the built geometry
    pub fn report(&self) -> PartReport {
        let (min, max) = self.world_mesh.bounds().unwrap_or((Vec3::ZERO, Vec3::ZERO));
        PartReport {
            path: self.path.clone(),
            material: self.paint.name().to_string(),
            min: min.to_array(),
            max: max.to_array(),
            volume: self.mesh.volume(),
            triangles: self.mesh.triangle_count(),
        }
    }
}

/// Geometry summary of a built part
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartReport {
    pub path: String,
    pub material: String,
    /// World-space bounding box min
    pub min: [f32; 3],
    /// World-space bounding box max
    pub max: [f32; 3],
    /// Enclosed volume in cubic millimetres
    pub volume: f32,
    pub triangles: usize,
}

/// Build every part of an assembly and place it in world space
pub fn build_assembly(
    assembly: &Assembly,
    kernel: &dyn CadKernel,
    options: &BuildOptions,
) -> Result<Vec<BuiltPart>, BuildError> {
    if !kernel.is_available() {
        return Err(BuildError::KernelUnavailable(kernel.name().to_string()));
    }

    let placed = assembly.flatten();
    tracing::info!(
        "Building {} parts of '{}' with the {} kernel",
        placed.len(),
        assembly.name,
        kernel.name()
    );

    let mut built = Vec::with_capacity(placed.len());
    for placement in placed {
        let mesh = placement.part.build(kernel, options)?;
        let world_mesh = mesh.transformed(&placement.world_transform);
        let open_edges = mesh.open_edge_count();
        if open_edges > 0 {
            tracing::warn!(path = %placement.path, open_edges, "part mesh is not closed");
        }
        tracing::debug!(
            path = %placement.path,
            triangles = mesh.triangle_count(),
            "placed part"
        );
        built.push(BuiltPart {
            path: placement.path,
            name: placement.part.name.clone(),
            paint: placement.part.paint,
            world_transform: placement.world_transform,
            mesh,
            world_mesh,
        });
    }
    Ok(built)
}
