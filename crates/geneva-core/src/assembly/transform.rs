//! Transform helper for placing components

use glam::{Mat4, Quat, Vec3};

/// Accumulates rigid motions into a single placement matrix
///
/// Each call applies its motion after the ones before it, in the parent
/// frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformBuilder {
    matrix: Mat4,
}

impl Default for TransformBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TransformBuilder {
    pub fn new() -> Self {
        Self {
            matrix: Mat4::IDENTITY,
        }
    }

    pub fn translate(mut self, offset: Vec3) -> Self {
        self.matrix = Mat4::from_translation(offset) * self.matrix;
        self
    }

    pub fn translate_x(self, distance: f32) -> Self {
        self.translate(Vec3::X * distance)
    }

    pub fn translate_z(self, distance: f32) -> Self {
        self.translate(Vec3::Z * distance)
    }

    /// Rotate about the parent Z axis (radians)
    pub fn rotate_z(mut self, angle: f32) -> Self {
        self.matrix = Mat4::from_quat(Quat::from_rotation_z(angle)) * self.matrix;
        self
    }

    pub fn build(self) -> Mat4 {
        self.matrix
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_translations_accumulate() {
        let tf = TransformBuilder::new()
            .translate_x(-25.0)
            .translate_z(4.0)
            .translate_x(1.0)
            .build();
        assert_eq!(tf.transform_point3(Vec3::ZERO), Vec3::new(-24.0, 0.0, 4.0));
    }

    #[test]
    fn test_rotation_applies_after_translation() {
        let tf = TransformBuilder::new()
            .translate_x(10.0)
            .rotate_z(FRAC_PI_2)
            .build();
        let p = tf.transform_point3(Vec3::ZERO);
        assert_relative_eq!(p.x, 0.0, epsilon = 1e-5);
        assert_relative_eq!(p.y, 10.0, epsilon = 1e-5);
    }
}
