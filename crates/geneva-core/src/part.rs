//! Part definition
//!
//! A part is a named, painted body described by an ordered feature history.

use std::f32::consts::TAU;

use geneva_cad::{
    Axis3D, BooleanOp, BuildOptions, CadKernel, Feature, FeatureHistory, Sketch, TessellatedMesh,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::build::BuildError;
use crate::material::Paint;

/// A parametric part
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Part {
    pub id: Uuid,
    pub name: String,
    pub paint: Paint,
    pub history: FeatureHistory,
}

impl Part {
    /// Create a new empty part
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            paint: Paint::default(),
            history: FeatureHistory::new(),
        }
    }

    /// Set the part finish
    pub fn paint(&mut self, paint: Paint) {
        self.paint = paint;
    }

    /// Number of features in the history
    pub fn feature_count(&self) -> usize {
        self.history.len()
    }

    /// Extrude every profile of `sketch` between two offsets along its normal
    pub fn extrude(
        &mut self,
        name: impl Into<String>,
        sketch: Sketch,
        start: f32,
        end: f32,
        boolean_op: BooleanOp,
    ) -> Uuid {
        let sketch_id = self.history.add_sketch(sketch);
        self.history.add_feature(Feature::extrude_with_boolean(
            name, sketch_id, start, end, boolean_op,
        ))
    }

    /// Revolve the profiles of `sketch` a full turn around `axis`
    pub fn lathe(&mut self, name: impl Into<String>, sketch: Sketch, axis: Axis3D) -> Uuid {
        let sketch_id = self.history.add_sketch(sketch);
        self.history
            .add_feature(Feature::revolve(name, sketch_id, axis, TAU))
    }

    /// Rebuild the part and tessellate it in its local frame
    pub fn build(
        &self,
        kernel: &dyn CadKernel,
        options: &BuildOptions,
    ) -> Result<TessellatedMesh, BuildError> {
        let solid = self
            .history
            .rebuild(kernel, options)
            .map_err(|source| BuildError::Feature {
                part: self.name.clone(),
                source,
            })?;
        let mesh = kernel.tessellate(&solid);
        kernel.discard(&solid);
        let mesh = mesh.map_err(|source| BuildError::Cad {
            part: self.name.clone(),
            source,
        })?;

        tracing::debug!(
            part = %self.name,
            features = self.history.len(),
            triangles = mesh.triangle_count(),
            "built part"
        );
        Ok(mesh)
    }
}
