//! Feature Operations
//!
//! Parametric features that turn sketches into 3D solids. A feature only
//! produces its tool solid; combining it with the body is the job of
//! [`crate::history::FeatureHistory`].

use std::collections::HashMap;

use glam::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::kernel::{Axis3D, BooleanType, CadKernel, Solid};
use crate::sketch::Sketch;

/// Feature-related errors
#[derive(Debug, Clone, Error)]
pub enum FeatureError {
    #[error("Sketch error: {0}")]
    SketchError(#[from] crate::sketch::SketchError),

    #[error("CAD kernel error: {0}")]
    CadError(#[from] crate::kernel::CadError),

    #[error("Invalid feature: {0}")]
    InvalidFeature(String),

    #[error("Feature not found: {0}")]
    FeatureNotFound(Uuid),

    #[error("Rebuild failed: {0}")]
    RebuildFailed(String),
}

/// Result type for feature operations
pub type FeatureResult<T> = Result<T, FeatureError>;

/// Boolean operation type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BooleanOp {
    /// Create new body
    #[default]
    New,
    /// Add to existing body
    Join,
    /// Remove from existing body
    Cut,
    /// Keep only intersection
    Intersect,
}

impl From<BooleanOp> for Option<BooleanType> {
    fn from(op: BooleanOp) -> Self {
        match op {
            BooleanOp::New => None,
            BooleanOp::Join => Some(BooleanType::Union),
            BooleanOp::Cut => Some(BooleanType::Subtract),
            BooleanOp::Intersect => Some(BooleanType::Intersect),
        }
    }
}

/// Tessellation settings used while rebuilding features
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildOptions {
    /// Segments used to facet a full circle
    pub circle_segments: u32,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            circle_segments: crate::kernel::DEFAULT_SEGMENTS,
        }
    }
}

/// A parametric feature that modifies geometry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Feature {
    /// Extrude every profile of a sketch along its normal
    Extrude {
        /// Unique identifier
        id: Uuid,
        /// Name of the feature
        name: String,
        /// Reference to the sketch
        sketch_id: Uuid,
        /// Offset along the plane normal where the solid begins
        start: f32,
        /// Offset along the plane normal where the solid ends
        end: f32,
        /// Boolean operation with existing body
        boolean_op: BooleanOp,
        /// Whether the feature is suppressed
        #[serde(default)]
        suppressed: bool,
    },

    /// Revolve a sketch profile around an axis
    Revolve {
        /// Unique identifier
        id: Uuid,
        /// Name of the feature
        name: String,
        /// Reference to the sketch
        sketch_id: Uuid,
        /// Axis origin
        axis_origin: Vec3,
        /// Axis direction
        axis_direction: Vec3,
        /// Rotation angle in radians
        angle: f32,
        /// Boolean operation with existing body
        boolean_op: BooleanOp,
        /// Whether the feature is suppressed
        #[serde(default)]
        suppressed: bool,
    },
}

impl Feature {
    /// Get the unique ID of this feature
    pub fn id(&self) -> Uuid {
        match self {
            Feature::Extrude { id, .. } => *id,
            Feature::Revolve { id, .. } => *id,
        }
    }

    /// Get the name of this feature
    pub fn name(&self) -> &str {
        match self {
            Feature::Extrude { name, .. } => name,
            Feature::Revolve { name, .. } => name,
        }
    }

    /// Get the type name of this feature
    pub fn type_name(&self) -> &'static str {
        match self {
            Feature::Extrude { .. } => "Extrude",
            Feature::Revolve { .. } => "Revolve",
        }
    }

    /// The sketch this feature consumes
    pub fn sketch_id(&self) -> Uuid {
        match self {
            Feature::Extrude { sketch_id, .. } => *sketch_id,
            Feature::Revolve { sketch_id, .. } => *sketch_id,
        }
    }

    /// How the feature combines with the body
    pub fn boolean_op(&self) -> BooleanOp {
        match self {
            Feature::Extrude { boolean_op, .. } => *boolean_op,
            Feature::Revolve { boolean_op, .. } => *boolean_op,
        }
    }

    /// Check if the feature is suppressed
    pub fn is_suppressed(&self) -> bool {
        match self {
            Feature::Extrude { suppressed, .. } => *suppressed,
            Feature::Revolve { suppressed, .. } => *suppressed,
        }
    }

    /// Set the suppressed state
    pub fn set_suppressed(&mut self, value: bool) {
        match self {
            Feature::Extrude { suppressed, .. } => *suppressed = value,
            Feature::Revolve { suppressed, .. } => *suppressed = value,
        }
    }

    /// Create a new extrude feature between two offsets along the normal
    pub fn extrude(name: impl Into<String>, sketch_id: Uuid, start: f32, end: f32) -> Self {
        Self::extrude_with_boolean(name, sketch_id, start, end, BooleanOp::New)
    }

    /// Create a new extrude feature with boolean operation
    pub fn extrude_with_boolean(
        name: impl Into<String>,
        sketch_id: Uuid,
        start: f32,
        end: f32,
        boolean_op: BooleanOp,
    ) -> Self {
        Feature::Extrude {
            id: Uuid::new_v4(),
            name: name.into(),
            sketch_id,
            start,
            end,
            boolean_op,
            suppressed: false,
        }
    }

    /// Create a new revolve feature
    pub fn revolve(name: impl Into<String>, sketch_id: Uuid, axis: Axis3D, angle: f32) -> Self {
        Feature::Revolve {
            id: Uuid::new_v4(),
            name: name.into(),
            sketch_id,
            axis_origin: axis.origin,
            axis_direction: axis.direction,
            angle,
            boolean_op: BooleanOp::New,
            suppressed: false,
        }
    }

    /// Execute this feature to produce its tool solid
    ///
    /// Every profile in the sketch contributes; multiple profiles are unioned.
    pub fn execute(
        &self,
        kernel: &dyn CadKernel,
        sketches: &HashMap<Uuid, Sketch>,
        options: &BuildOptions,
    ) -> FeatureResult<Solid> {
        if self.is_suppressed() {
            return Err(FeatureError::InvalidFeature("Feature is suppressed".into()));
        }

        let sketch_id = self.sketch_id();
        let sketch = sketches
            .get(&sketch_id)
            .ok_or(FeatureError::InvalidFeature(format!(
                "Sketch {} not found",
                sketch_id
            )))?;

        let profiles = sketch.extract_profiles(options.circle_segments)?;
        if profiles.is_empty() {
            return Err(FeatureError::InvalidFeature(
                "No closed profiles found".into(),
            ));
        }

        let mut solids = Vec::with_capacity(profiles.len());
        for profile in &profiles {
            let solid = match self {
                Feature::Extrude { start, end, .. } => {
                    kernel.extrude(profile, &sketch.plane, *start, *end)
                }
                Feature::Revolve {
                    axis_origin,
                    axis_direction,
                    angle,
                    ..
                } => {
                    let axis = Axis3D::new(*axis_origin, *axis_direction);
                    kernel.revolve(profile, &sketch.plane, &axis, *angle)
                }
            };
            match solid {
                Ok(solid) => solids.push(solid),
                Err(e) => {
                    for solid in &solids {
                        kernel.discard(solid);
                    }
                    return Err(e.into());
                }
            }
        }

        tracing::trace!(
            feature = self.name(),
            profiles = profiles.len(),
            "executed feature"
        );
        union_all(kernel, solids)
    }
}

/// Union a set of solids, releasing the inputs
fn union_all(kernel: &dyn CadKernel, solids: Vec<Solid>) -> FeatureResult<Solid> {
    let mut iter = solids.into_iter();
    let mut acc = iter
        .next()
        .ok_or(FeatureError::InvalidFeature("Nothing to combine".into()))?;
    for next in iter {
        let joined = kernel.boolean(&acc, &next, BooleanType::Union);
        kernel.discard(&acc);
        kernel.discard(&next);
        acc = joined?;
    }
    Ok(acc)
}
