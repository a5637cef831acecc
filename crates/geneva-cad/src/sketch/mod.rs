//! 2D Sketch System
//!
//! Sketches hold closed 2D entities on a plane in world space. Curved
//! entities are kept exact and only faceted when profiles are extracted
//! for a feature.

mod pencil;

pub use pencil::Pencil;

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::kernel::{Axis3D, Wire2D};

/// Sketch-related errors
#[derive(Debug, Clone, Error)]
pub enum SketchError {
    #[error("Entity not found: {0}")]
    EntityNotFound(Uuid),

    #[error("Degenerate geometry: {0}")]
    DegenerateGeometry(String),

    #[error("Open path: {0}")]
    OpenPath(String),
}

/// Result type for sketch operations
pub type SketchResult<T> = Result<T, SketchError>;

/// A plane in world space that a sketch lives on
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SketchPlane {
    /// Origin of the plane
    pub origin: Vec3,
    /// Direction of the sketch X axis
    pub x_axis: Vec3,
    /// Direction of the sketch Y axis
    pub y_axis: Vec3,
    /// Plane normal (`x_axis × y_axis`)
    pub normal: Vec3,
}

impl Default for SketchPlane {
    fn default() -> Self {
        Self::xy()
    }
}

impl SketchPlane {
    /// Create a plane from an origin and two in-plane axes
    pub fn new(origin: Vec3, x_axis: Vec3, y_axis: Vec3) -> Self {
        let x_axis = x_axis.normalize();
        let y_axis = y_axis.normalize();
        Self {
            origin,
            x_axis,
            y_axis,
            normal: x_axis.cross(y_axis).normalize(),
        }
    }

    /// XY plane, normal +Z
    pub fn xy() -> Self {
        Self::new(Vec3::ZERO, Vec3::X, Vec3::Y)
    }

    /// YZ plane, normal +X
    pub fn yz() -> Self {
        Self::new(Vec3::ZERO, Vec3::Y, Vec3::Z)
    }

    /// XZ plane, normal -Y
    pub fn xz() -> Self {
        Self::new(Vec3::ZERO, Vec3::X, Vec3::Z)
    }

    /// Parallel plane moved along the normal
    pub fn offset(&self, distance: f32) -> Self {
        Self {
            origin: self.origin + self.normal * distance,
            ..*self
        }
    }

    /// Map a point in sketch coordinates to world space
    pub fn to_world(&self, point: Vec2) -> Vec3 {
        self.origin + self.x_axis * point.x + self.y_axis * point.y
    }
}

/// A closed entity in a sketch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum SketchEntity {
    /// Full circle
    Circle {
        id: Uuid,
        center: Vec2,
        radius: f32,
    },
    /// Closed straight-edged loop
    Polygon { id: Uuid, points: Vec<Vec2> },
    /// Rectangle with filleted corners
    RoundedRectangle {
        id: Uuid,
        center: Vec2,
        /// Extent along the sketch X axis
        length: f32,
        /// Extent along the sketch Y axis
        width: f32,
        radius: f32,
    },
    /// Closed path traced with a [`Pencil`]
    Path { id: Uuid, points: Vec<Vec2> },
}

impl SketchEntity {
    /// Get the entity ID
    pub fn id(&self) -> Uuid {
        match self {
            SketchEntity::Circle { id, .. }
            | SketchEntity::Polygon { id, .. }
            | SketchEntity::RoundedRectangle { id, .. }
            | SketchEntity::Path { id, .. } => *id,
        }
    }

    /// Facet the entity into a closed wire
    pub fn to_wire(&self, segments: u32) -> Wire2D {
        match self {
            SketchEntity::Circle { center, radius, .. } => {
                Wire2D::circle(*center, *radius, segments)
            }
            SketchEntity::Polygon { points, .. } | SketchEntity::Path { points, .. } => {
                Wire2D::new(points.clone(), true)
            }
            SketchEntity::RoundedRectangle {
                center,
                length,
                width,
                radius,
                ..
            } => Wire2D::rounded_rectangle(*center, *length, *width, *radius, segments),
        }
    }
}

/// A 2D sketch on a plane
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sketch {
    /// Unique identifier
    pub id: Uuid,
    /// Name of the sketch
    pub name: String,
    /// The plane the sketch is drawn on
    pub plane: SketchPlane,
    /// Entities in insertion order
    entities: Vec<SketchEntity>,
}

impl Sketch {
    /// Create a new empty sketch
    pub fn new(name: impl Into<String>, plane: SketchPlane) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            plane,
            entities: Vec::new(),
        }
    }

    /// Number of entities
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Get an entity by ID
    pub fn get_entity(&self, id: Uuid) -> Option<&SketchEntity> {
        self.entities.iter().find(|e| e.id() == id)
    }

    /// Remove an entity
    pub fn remove_entity(&mut self, id: Uuid) -> SketchResult<SketchEntity> {
        let index = self
            .entities
            .iter()
            .position(|e| e.id() == id)
            .ok_or(SketchError::EntityNotFound(id))?;
        Ok(self.entities.remove(index))
    }

    fn push(&mut self, entity: SketchEntity) -> Uuid {
        let id = entity.id();
        self.entities.push(entity);
        id
    }

    /// Add a circle
    pub fn add_circle(&mut self, center: Vec2, radius: f32) -> SketchResult<Uuid> {
        if !(radius > 0.0 && radius.is_finite()) {
            return Err(SketchError::DegenerateGeometry(format!(
                "Circle radius must be positive, got {radius}"
            )));
        }
        Ok(self.push(SketchEntity::Circle {
            id: Uuid::new_v4(),
            center,
            radius,
        }))
    }

    /// Add a closed polygon through the given points
    pub fn add_polygon(&mut self, points: Vec<Vec2>) -> SketchResult<Uuid> {
        check_loop(&points)?;
        Ok(self.push(SketchEntity::Polygon {
            id: Uuid::new_v4(),
            points,
        }))
    }

    /// Add a polygon from line segments joined end to start
    ///
    /// Each line must start where the previous one ended, and the last line
    /// must end at the start of the first.
    pub fn add_polygon_from_lines(&mut self, lines: &[(Vec2, Vec2)]) -> SketchResult<Uuid> {
        const JOIN_TOLERANCE: f32 = 1e-4;

        for (i, (_, end)) in lines.iter().enumerate() {
            let (next_start, _) = lines[(i + 1) % lines.len()];
            if end.distance(next_start) > JOIN_TOLERANCE {
                return Err(SketchError::OpenPath(format!(
                    "Line {i} ends at {end} but the next line starts at {next_start}"
                )));
            }
        }
        self.add_polygon(lines.iter().map(|(start, _)| *start).collect())
    }

    /// Add a rectangle with rounded corners centered at `center`
    pub fn add_rounded_rectangle(
        &mut self,
        center: Vec2,
        length: f32,
        width: f32,
        radius: f32,
    ) -> SketchResult<Uuid> {
        if length <= 0.0 || width <= 0.0 {
            return Err(SketchError::DegenerateGeometry(format!(
                "Rectangle {length} x {width} has no area"
            )));
        }
        if radius < 0.0 || radius * 2.0 > length.min(width) {
            return Err(SketchError::DegenerateGeometry(format!(
                "Corner radius {radius} does not fit a {length} x {width} rectangle"
            )));
        }
        Ok(self.push(SketchEntity::RoundedRectangle {
            id: Uuid::new_v4(),
            center,
            length,
            width,
            radius,
        }))
    }

    /// Close a pencil path and add it as a profile
    pub fn add_path(&mut self, pencil: Pencil) -> SketchResult<Uuid> {
        let points = pencil.close()?;
        Ok(self.push(SketchEntity::Path {
            id: Uuid::new_v4(),
            points,
        }))
    }

    /// World-space axis through two sketch points
    pub fn axis(&self, from: Vec2, to: Vec2) -> SketchResult<Axis3D> {
        if from.distance_squared(to) < 1e-12 {
            return Err(SketchError::DegenerateGeometry(
                "Axis endpoints coincide".into(),
            ));
        }
        let origin = self.plane.to_world(from);
        Ok(Axis3D::new(origin, self.plane.to_world(to) - origin))
    }

    /// Facet every entity into a closed profile
    pub fn extract_profiles(&self, segments: u32) -> SketchResult<Vec<Wire2D>> {
        let segments = segments.max(3);
        self.entities
            .iter()
            .map(|entity| {
                let wire = entity.to_wire(segments);
                if wire.signed_area().abs() < 1e-9 {
                    Err(SketchError::DegenerateGeometry(format!(
                        "Entity {} encloses no area",
                        entity.id()
                    )))
                } else {
                    Ok(wire)
                }
            })
            .collect()
    }
}

/// Check that a point loop has at least three distinct points
pub(crate) fn check_loop(points: &[Vec2]) -> SketchResult<()> {
    let mut distinct: Vec<Vec2> = Vec::with_capacity(points.len());
    for p in points {
        if !distinct.iter().any(|q| q.distance_squared(*p) < 1e-12) {
            distinct.push(*p);
        }
    }
    if distinct.len() < 3 {
        return Err(SketchError::DegenerateGeometry(format!(
            "A closed loop needs at least 3 distinct points, got {}",
            distinct.len()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_plane_normals() {
        assert_eq!(SketchPlane::xy().normal, Vec3::Z);
        assert_eq!(SketchPlane::yz().normal, Vec3::X);
        assert_eq!(SketchPlane::xz().normal, Vec3::NEG_Y);
    }

    #[test]
    fn test_offset_plane_to_world() {
        let plane = SketchPlane::xy().offset(2.5);
        assert_eq!(plane.to_world(Vec2::new(1.0, -2.0)), Vec3::new(1.0, -2.0, 2.5));

        let side = SketchPlane::yz();
        assert_eq!(side.to_world(Vec2::new(3.0, 4.0)), Vec3::new(0.0, 3.0, 4.0));
    }

    #[test]
    fn test_add_and_remove_entities() {
        let mut sketch = Sketch::new("test", SketchPlane::xy());
        let circle = sketch.add_circle(Vec2::ZERO, 2.0).unwrap();
        sketch
            .add_polygon(vec![Vec2::ZERO, Vec2::X, Vec2::Y])
            .unwrap();
        assert_eq!(sketch.entity_count(), 2);
        assert!(sketch.get_entity(circle).is_some());

        sketch.remove_entity(circle).unwrap();
        assert_eq!(sketch.entity_count(), 1);
        assert!(matches!(
            sketch.remove_entity(circle),
            Err(SketchError::EntityNotFound(_))
        ));
    }

    #[test]
    fn test_degenerate_entities_rejected() {
        let mut sketch = Sketch::new("test", SketchPlane::xy());
        assert!(sketch.add_circle(Vec2::ZERO, 0.0).is_err());
        assert!(sketch.add_polygon(vec![Vec2::ZERO, Vec2::X, Vec2::X]).is_err());
        assert!(sketch.add_rounded_rectangle(Vec2::ZERO, 10.0, 4.0, 3.0).is_err());
        assert_eq!(sketch.entity_count(), 0);
    }

    #[test]
    fn test_polygon_from_lines() {
        let mut sketch = Sketch::new("test", SketchPlane::xy());
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(2.0, 0.0);
        let c = Vec2::new(2.0, 1.0);
        let d = Vec2::new(0.0, 1.0);
        sketch
            .add_polygon_from_lines(&[(a, b), (b, c), (c, d), (d, a)])
            .unwrap();

        let profiles = sketch.extract_profiles(16).unwrap();
        assert_relative_eq!(profiles[0].signed_area(), 2.0);

        let gap = sketch.add_polygon_from_lines(&[(a, b), (c, d), (d, a)]);
        assert!(matches!(gap, Err(SketchError::OpenPath(_))));
    }

    #[test]
    fn test_extract_profiles_keeps_order() {
        let mut sketch = Sketch::new("test", SketchPlane::xy());
        sketch
            .add_rounded_rectangle(Vec2::ZERO, 100.0, 50.0, 5.0)
            .unwrap();
        sketch.add_circle(Vec2::new(25.0, 0.0), 3.0).unwrap();

        let profiles = sketch.extract_profiles(32).unwrap();
        assert_eq!(profiles.len(), 2);
        assert!(profiles[0].signed_area() > 4900.0);
        assert_eq!(profiles[1].points.len(), 32);
    }

    #[test]
    fn test_axis_follows_plane() {
        let sketch = Sketch::new("test", SketchPlane::yz());
        let axis = sketch.axis(Vec2::ZERO, Vec2::Y).unwrap();
        assert_eq!(axis.origin, Vec3::ZERO);
        assert_relative_eq!(axis.direction.z, 1.0);
        assert!(sketch.axis(Vec2::ONE, Vec2::ONE).is_err());
    }
}
