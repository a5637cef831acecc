//! CAD Kernel trait definitions
//!
//! These traits define the interface that all CAD kernels must implement.

use std::collections::HashMap;

use glam::{Mat4, Vec2, Vec3};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::sketch::SketchPlane;

/// Error type for CAD kernel operations
#[derive(Debug, Clone, Error)]
pub enum CadError {
    #[error("Invalid profile: {0}")]
    InvalidProfile(String),

    #[error("Boolean operation failed: {0}")]
    BooleanFailed(String),

    #[error("Tessellation failed: {0}")]
    TessellationFailed(String),

    #[error("Kernel not available: {0}")]
    KernelNotAvailable(String),

    #[error("Solid not found: {0}")]
    SolidNotFound(Uuid),

    #[error("Operation failed: {0}")]
    OperationFailed(String),
}

/// Result type for CAD operations
pub type CadResult<T> = Result<T, CadError>;

/// A tessellated mesh output from the CAD kernel
#[derive(Debug, Clone, Default)]
pub struct TessellatedMesh {
    /// Vertex positions (3 floats per vertex)
    pub vertices: Vec<[f32; 3]>,
    /// Vertex normals (3 floats per vertex)
    pub normals: Vec<[f32; 3]>,
    /// Triangle indices (3 indices per triangle)
    pub indices: Vec<u32>,
}

impl TessellatedMesh {
    /// Create an empty tessellated mesh
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if the mesh is empty
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Get the number of triangles
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Iterate over triangles as position triples
    pub fn triangles(&self) -> impl Iterator<Item = [Vec3; 3]> + '_ {
        self.indices.chunks_exact(3).map(|tri| {
            [
                Vec3::from(self.vertices[tri[0] as usize]),
                Vec3::from(self.vertices[tri[1] as usize]),
                Vec3::from(self.vertices[tri[2] as usize]),
            ]
        })
    }

    /// Axis-aligned bounds, `None` for an empty mesh
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        let first = Vec3::from(*self.vertices.first()?);
        Some(self.vertices.iter().fold((first, first), |(min, max), v| {
            let v = Vec3::from(*v);
            (min.min(v), max.max(v))
        }))
    }

    /// Enclosed volume (divergence theorem, exact for closed meshes)
    pub fn volume(&self) -> f32 {
        let sum: f64 = self
            .triangles()
            .map(|[a, b, c]| {
                let (a, b, c) = (a.as_dvec3(), b.as_dvec3(), c.as_dvec3());
                a.dot(b.cross(c))
            })
            .sum();
        (sum / 6.0) as f32
    }

    /// Number of directed edges without a matching reverse edge
    ///
    /// Zero for a closed, consistently wound surface. Positions are compared
    /// on a 1e-4 grid.
    pub fn open_edge_count(&self) -> usize {
        let key = |i: u32| self.vertices[i as usize].map(|c| (c * 1e4).round() as i64);
        let mut balance: HashMap<([i64; 3], [i64; 3]), i64> = HashMap::new();
        for tri in self.indices.chunks_exact(3) {
            for k in 0..3 {
                let (a, b) = (key(tri[k]), key(tri[(k + 1) % 3]));
                if a < b {
                    *balance.entry((a, b)).or_default() += 1;
                } else if b < a {
                    *balance.entry((b, a)).or_default() -= 1;
                }
            }
        }
        balance.values().map(|c| c.unsigned_abs() as usize).sum()
    }

    /// Copy of this mesh with `transform` applied to positions and normals
    pub fn transformed(&self, transform: &Mat4) -> Self {
        let normal_matrix = transform.inverse().transpose();
        Self {
            vertices: self
                .vertices
                .iter()
                .map(|v| transform.transform_point3(Vec3::from(*v)).to_array())
                .collect(),
            normals: self
                .normals
                .iter()
                .map(|n| {
                    normal_matrix
                        .transform_vector3(Vec3::from(*n))
                        .normalize_or_zero()
                        .to_array()
                })
                .collect(),
            indices: self.indices.clone(),
        }
    }

    /// Append another mesh, offsetting its indices
    pub fn merge(&mut self, other: &TessellatedMesh) {
        let offset = self.vertices.len() as u32;
        self.vertices.extend_from_slice(&other.vertices);
        self.normals.extend_from_slice(&other.normals);
        self.indices.extend(other.indices.iter().map(|i| i + offset));
    }
}

/// A 2D wire (closed loop of edges) for extrusion profiles
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Wire2D {
    /// Unique identifier
    pub id: Uuid,
    /// Points defining the wire (in order)
    pub points: Vec<Vec2>,
    /// Whether the wire is closed
    pub closed: bool,
}

impl Wire2D {
    /// Create a new wire from points
    pub fn new(points: Vec<Vec2>, closed: bool) -> Self {
        Self {
            id: Uuid::new_v4(),
            points,
            closed,
        }
    }

    /// Create a rectangle wire
    pub fn rectangle(center: Vec2, width: f32, height: f32) -> Self {
        let hw = width / 2.0;
        let hh = height / 2.0;
        Self::new(
            vec![
                center + Vec2::new(-hw, -hh),
                center + Vec2::new(hw, -hh),
                center + Vec2::new(hw, hh),
                center + Vec2::new(-hw, hh),
            ],
            true,
        )
    }

    /// Create a circle wire (approximated with segments)
    pub fn circle(center: Vec2, radius: f32, segments: u32) -> Self {
        let points: Vec<Vec2> = (0..segments)
            .map(|i| {
                let angle = (i as f32 / segments as f32) * std::f32::consts::TAU;
                center + Vec2::new(angle.cos() * radius, angle.sin() * radius)
            })
            .collect();
        Self::new(points, true)
    }

    /// Create a rectangle with filleted corners
    ///
    /// `length` runs along X, `width` along Y. Each corner arc uses a quarter
    /// of `segments`; a zero radius degenerates to a plain rectangle.
    pub fn rounded_rectangle(
        center: Vec2,
        length: f32,
        width: f32,
        radius: f32,
        segments: u32,
    ) -> Self {
        if radius <= 0.0 {
            return Self::rectangle(center, length, width);
        }

        let hl = length / 2.0 - radius;
        let hw = width / 2.0 - radius;
        let corner_segments = (segments / 4).max(1);
        let corners = [
            (Vec2::new(hl, -hw), -std::f32::consts::FRAC_PI_2),
            (Vec2::new(hl, hw), 0.0),
            (Vec2::new(-hl, hw), std::f32::consts::FRAC_PI_2),
            (Vec2::new(-hl, -hw), std::f32::consts::PI),
        ];

        let mut points = Vec::with_capacity(corners.len() * (corner_segments as usize + 1));
        for (corner, start_angle) in corners {
            for i in 0..=corner_segments {
                let angle =
                    start_angle + (i as f32 / corner_segments as f32) * std::f32::consts::FRAC_PI_2;
                points.push(center + corner + Vec2::new(angle.cos(), angle.sin()) * radius);
            }
        }
        points.dedup_by(|a, b| a.distance_squared(*b) < 1e-12);
        Self::new(points, true)
    }

    /// Signed area (positive for counter-clockwise loops)
    pub fn signed_area(&self) -> f32 {
        let n = self.points.len();
        (0..n)
            .map(|i| self.points[i].perp_dot(self.points[(i + 1) % n]))
            .sum::<f32>()
            * 0.5
    }

    /// Reverse the loop in place if it winds clockwise
    pub fn ensure_ccw(&mut self) {
        if self.signed_area() < 0.0 {
            self.points.reverse();
        }
    }
}

/// A 3D solid body
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Solid {
    /// Unique identifier
    pub id: Uuid,
    /// Internal marker for kernel data (actual data stored in kernel)
    #[serde(skip)]
    has_kernel_data: bool,
}

impl Solid {
    /// Create a new solid with the given ID
    pub fn new(id: Uuid) -> Self {
        Self {
            id,
            has_kernel_data: false,
        }
    }

    /// Mark that this solid has kernel data
    pub fn with_kernel_data(mut self) -> Self {
        self.has_kernel_data = true;
        self
    }

    /// Check if this solid has kernel data
    pub fn has_kernel_data(&self) -> bool {
        self.has_kernel_data
    }
}

/// Axis definition for revolve operations
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Axis3D {
    /// Origin point of the axis
    pub origin: Vec3,
    /// Direction of the axis (normalized)
    pub direction: Vec3,
}

impl Axis3D {
    /// Create an axis from origin and direction
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
        }
    }

    /// Z axis at origin
    pub fn z() -> Self {
        Self::new(Vec3::ZERO, Vec3::Z)
    }
}

/// Boolean operation type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BooleanType {
    /// Union (add)
    Union,
    /// Subtraction (cut)
    Subtract,
    /// Intersection (common)
    Intersect,
}

/// The main CAD kernel trait
///
/// Implementations of this trait provide the actual geometry operations.
/// Solids are handles; the geometry itself lives inside the kernel.
pub trait CadKernel: Send + Sync {
    /// Get the name of this kernel
    fn name(&self) -> &str;

    /// Check if the kernel is available
    fn is_available(&self) -> bool;

    /// Extrude a closed 2D profile along the plane normal
    ///
    /// # Arguments
    /// * `profile` - The 2D wire profile, in plane coordinates
    /// * `plane` - The sketch plane the profile lives on
    /// * `start` - Offset along the normal where the solid begins
    /// * `end` - Offset along the normal where the solid ends
    fn extrude(
        &self,
        profile: &Wire2D,
        plane: &SketchPlane,
        start: f32,
        end: f32,
    ) -> CadResult<Solid>;

    /// Revolve a 2D profile around an axis
    ///
    /// # Arguments
    /// * `profile` - The 2D wire profile to revolve
    /// * `plane` - The sketch plane the profile lives on
    /// * `axis` - The rotation axis (world space)
    /// * `angle` - The rotation angle in radians
    fn revolve(
        &self,
        profile: &Wire2D,
        plane: &SketchPlane,
        axis: &Axis3D,
        angle: f32,
    ) -> CadResult<Solid>;

    /// Perform a boolean operation on two solids
    ///
    /// # Arguments
    /// * `a` - The first solid
    /// * `b` - The second solid
    /// * `op` - The boolean operation type
    fn boolean(&self, a: &Solid, b: &Solid, op: BooleanType) -> CadResult<Solid>;

    /// Tessellate a solid into triangles
    fn tessellate(&self, solid: &Solid) -> CadResult<TessellatedMesh>;

    /// Drop the kernel data behind a solid handle
    fn discard(&self, solid: &Solid);
}

/// A null kernel that always returns errors (used when no kernel is available)
#[derive(Debug, Default)]
pub struct NullKernel;

impl CadKernel for NullKernel {
    fn name(&self) -> &str {
        "null"
    }

    fn is_available(&self) -> bool {
        false
    }

    fn extrude(
        &self,
        _profile: &Wire2D,
        _plane: &SketchPlane,
        _start: f32,
        _end: f32,
    ) -> CadResult<Solid> {
        Err(CadError::KernelNotAvailable(
            "No CAD kernel available".into(),
        ))
    }

    fn revolve(
        &self,
        _profile: &Wire2D,
        _plane: &SketchPlane,
        _axis: &Axis3D,
        _angle: f32,
    ) -> CadResult<Solid> {
        Err(CadError::KernelNotAvailable(
            "No CAD kernel available".into(),
        ))
    }

    fn boolean(&self, _a: &Solid, _b: &Solid, _op: BooleanType) -> CadResult<Solid> {
        Err(CadError::KernelNotAvailable(
            "No CAD kernel available".into(),
        ))
    }

    fn tessellate(&self, _solid: &Solid) -> CadResult<TessellatedMesh> {
        Err(CadError::KernelNotAvailable(
            "No CAD kernel available".into(),
        ))
    }

    fn discard(&self, _solid: &Solid) {}
}

/// Get the default CAD kernel
pub fn default_kernel() -> Box<dyn CadKernel> {
    Box::new(super::MeshKernel::new())
}
