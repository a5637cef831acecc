//! Parametric History
//!
//! Manages the ordered list of features that define a single body,
//! supporting rollback, suppression and full rebuilds.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

use crate::feature::{BooleanOp, BuildOptions, Feature, FeatureError, FeatureResult};
use crate::kernel::{BooleanType, CadKernel, Solid};
use crate::sketch::Sketch;

/// Manages the parametric feature history of one body
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeatureHistory {
    /// Ordered list of features
    features: Vec<Feature>,
    /// Current rollback position (None = at end)
    rollback_position: Option<usize>,
    /// All sketches referenced by features
    sketches: HashMap<Uuid, Sketch>,
}

impl FeatureHistory {
    /// Create a new empty history
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of features
    pub fn len(&self) -> usize {
        self.features.len()
    }

    /// Check if history is empty
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Get a feature by ID
    pub fn get_by_id(&self, id: Uuid) -> Option<&Feature> {
        self.features.iter().find(|f| f.id() == id)
    }

    /// Get the index of a feature by ID
    pub fn index_of(&self, id: Uuid) -> Option<usize> {
        self.features.iter().position(|f| f.id() == id)
    }

    /// Add a feature to the history
    pub fn add_feature(&mut self, feature: Feature) -> Uuid {
        // If we're rolled back, remove features after the rollback point
        if let Some(pos) = self.rollback_position.take() {
            self.features.truncate(pos);
        }

        let id = feature.id();
        self.features.push(feature);
        id
    }

    /// Suppress or unsuppress a feature
    pub fn set_suppressed(&mut self, id: Uuid, suppressed: bool) -> Result<(), FeatureError> {
        self.features
            .iter_mut()
            .find(|f| f.id() == id)
            .ok_or(FeatureError::FeatureNotFound(id))?
            .set_suppressed(suppressed);
        Ok(())
    }

    // ============== Sketch Management ==============

    /// Add a sketch
    pub fn add_sketch(&mut self, sketch: Sketch) -> Uuid {
        let id = sketch.id;
        self.sketches.insert(id, sketch);
        id
    }

    // ============== Rollback ==============

    /// Roll back to a specific feature (features after it are hidden)
    pub fn rollback_to(&mut self, id: Uuid) -> Result<(), FeatureError> {
        let index = self.index_of(id).ok_or(FeatureError::FeatureNotFound(id))?;

        self.rollback_position = Some(index + 1);
        Ok(())
    }

    /// Roll back to the end (show all features)
    pub fn rollback_to_end(&mut self) {
        self.rollback_position = None;
    }

    /// Get the current rollback position
    pub fn rollback_position(&self) -> Option<usize> {
        self.rollback_position
    }

    /// Get the effective number of features (accounting for rollback)
    pub fn effective_len(&self) -> usize {
        self.rollback_position
            .map_or(self.features.len(), |pos| pos.min(self.features.len()))
    }

    /// Iterate over effective features (accounting for rollback)
    pub fn effective_features(&self) -> impl Iterator<Item = &Feature> {
        self.features[..self.effective_len()].iter()
    }

    // ============== Rebuild ==============

    /// Rebuild the body from its features
    ///
    /// New and Join features are unioned into the body; Cut and Intersect
    /// require one to exist. Every intermediate solid is released from the
    /// kernel, so only the returned solid stays alive.
    pub fn rebuild(&self, kernel: &dyn CadKernel, options: &BuildOptions) -> FeatureResult<Solid> {
        let mut body: Option<Solid> = None;

        for feature in self.effective_features() {
            if feature.is_suppressed() {
                tracing::debug!("Skipping suppressed feature {}", feature.name());
                continue;
            }

            let tool = match feature.execute(kernel, &self.sketches, options) {
                Ok(tool) => tool,
                Err(e) => {
                    if let Some(body) = &body {
                        kernel.discard(body);
                    }
                    return Err(e);
                }
            };

            let op = match (feature.boolean_op(), body.is_some()) {
                (BooleanOp::New | BooleanOp::Join, _) => BooleanType::Union,
                (BooleanOp::Cut, true) => BooleanType::Subtract,
                (BooleanOp::Intersect, true) => BooleanType::Intersect,
                (op, false) => {
                    kernel.discard(&tool);
                    return Err(FeatureError::RebuildFailed(format!(
                        "Feature {} needs an existing body for {:?}",
                        feature.name(),
                        op
                    )));
                }
            };

            body = Some(match body.take() {
                None => tool,
                Some(current) => {
                    let result = kernel.boolean(&current, &tool, op);
                    kernel.discard(&current);
                    kernel.discard(&tool);
                    result.map_err(|e| {
                        tracing::warn!("Feature {} failed: {}", feature.name(), e);
                        FeatureError::from(e)
                    })?
                }
            });
        }

        body.ok_or_else(|| FeatureError::RebuildFailed("History produced no body".into()))
    }
}
