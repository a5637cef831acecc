//! Mesh CAD Kernel Backend
//!
//! Solids are `csgrs` polygon meshes. Profiles become 2D `csgrs` shapes that
//! are extruded or revolved and then placed on their sketch plane, and
//! booleans run through the `csgrs` BSP. Curved faces are faceted at
//! construction time, so results are exact only for the polygonal
//! approximation.

use std::collections::HashMap;
use std::f64::consts::TAU;

use csgrs::CSG;
use csgrs::polygon::Polygon;
use csgrs::vertex::Vertex;
use glam::{DVec3, Vec2};
use nalgebra::{Matrix4, Point3, Vector3, Vector4};
use parking_lot::Mutex;
use uuid::Uuid;

use super::weld::{self, WELD_EPSILON};
use super::{Axis3D, BooleanType, CadError, CadKernel, CadResult, Solid, TessellatedMesh, Wire2D};
use crate::sketch::SketchPlane;

/// Angular segments used for a full revolution
pub const DEFAULT_SEGMENTS: u32 = 64;

/// Radii below this are treated as lying on the revolve axis
const AXIS_EPSILON: f64 = 1e-6;

type Mesh = CSG<()>;

/// Polygon-mesh CAD kernel
pub struct MeshKernel {
    /// Storage for solid data (keyed by UUID)
    solids: Mutex<HashMap<Uuid, Mesh>>,
    /// Angular resolution for revolve operations
    segments: u32,
}

impl MeshKernel {
    /// Create a new mesh kernel
    pub fn new() -> Self {
        Self::with_segments(DEFAULT_SEGMENTS)
    }

    /// Create a kernel with a custom angular resolution for revolves
    pub fn with_segments(segments: u32) -> Self {
        Self {
            solids: Mutex::new(HashMap::new()),
            segments: segments.max(3),
        }
    }

    /// Number of solids currently held by the kernel
    pub fn solid_count(&self) -> usize {
        self.solids.lock().len()
    }

    /// Store a solid and return a Solid reference
    fn store_solid(&self, mesh: Mesh) -> CadResult<Solid> {
        let mesh = orient_outward(clean(&mesh));
        if mesh.polygons.is_empty() {
            return Err(CadError::OperationFailed("Result has no faces".into()));
        }
        let id = Uuid::new_v4();
        self.solids.lock().insert(id, mesh);
        Ok(Solid::new(id).with_kernel_data())
    }

    /// Get a copy of a stored solid
    fn mesh(&self, solid: &Solid) -> CadResult<Mesh> {
        self.solids
            .lock()
            .get(&solid.id)
            .cloned()
            .ok_or(CadError::SolidNotFound(solid.id))
    }
}

impl Default for MeshKernel {
    fn default() -> Self {
        Self::new()
    }
}

fn to_point(p: DVec3) -> Point3<f64> {
    Point3::new(p.x, p.y, p.z)
}

fn to_dvec3(p: &Point3<f64>) -> DVec3 {
    DVec3::new(p.x, p.y, p.z)
}

fn direction4(v: DVec3) -> Vector4<f64> {
    Vector4::new(v.x, v.y, v.z, 0.0)
}

fn position4(p: DVec3) -> Vector4<f64> {
    Vector4::new(p.x, p.y, p.z, 1.0)
}

/// Drop corners where the loop doubles back on itself
fn remove_spikes(points: &mut Vec<Vec2>) {
    loop {
        points.dedup_by(|a, b| a.distance_squared(*b) < 1e-12);
        let n = points.len();
        if n > 1 && points[0].distance_squared(points[n - 1]) < 1e-12 {
            points.pop();
        }
        let n = points.len();
        if n < 3 {
            return;
        }
        let spike = (0..n).find(|&i| {
            let (prev, here, next) = (points[(i + n - 1) % n], points[i], points[(i + 1) % n]);
            let (a, b) = (here - prev, next - here);
            a.perp_dot(b).abs() <= 1e-6 * a.length() * b.length() && a.dot(b) < 0.0
        });
        match spike {
            Some(i) => {
                points.remove(i);
            }
            None => return,
        }
    }
}

/// Validate a profile and return its points counter-clockwise
fn prepare_profile(profile: &Wire2D) -> CadResult<Vec<Vec2>> {
    if !profile.closed {
        return Err(CadError::InvalidProfile("Profile must be closed".into()));
    }

    let mut wire = profile.clone();
    remove_spikes(&mut wire.points);
    if wire.points.len() < 3 {
        return Err(CadError::InvalidProfile(
            "Profile must have at least 3 points".into(),
        ));
    }
    if wire.signed_area().abs() < 1e-9 {
        return Err(CadError::InvalidProfile("Profile encloses no area".into()));
    }

    wire.ensure_ccw();
    Ok(wire.points)
}

/// 2D `csgrs` shape for a profile
fn profile_shape(points: impl Iterator<Item = [f64; 2]>) -> Mesh {
    let ring: Vec<[f64; 2]> = points.collect();
    Mesh::polygon(&ring, None)
}

/// Rebuild every face with flat normals, dropping faces with no area
fn clean(mesh: &Mesh) -> Mesh {
    let polygons: Vec<Polygon<()>> = mesh
        .polygons
        .iter()
        .filter_map(|polygon| {
            let mut points: Vec<DVec3> = polygon.vertices.iter().map(|v| to_dvec3(&v.pos)).collect();
            points.dedup_by(|a, b| a.distance_squared(*b) < 1e-18);
            while points.len() > 1 && points[0].distance_squared(points[points.len() - 1]) < 1e-18 {
                points.pop();
            }
            if points.len() < 3 {
                return None;
            }
            let normal = weld::loop_normal(points.iter().copied());
            if normal.length() < 1e-12 {
                return None;
            }
            let normal = normal.normalize();
            let normal = Vector3::new(normal.x, normal.y, normal.z);
            let vertices = points.iter().map(|p| Vertex::new(to_point(*p), normal)).collect();
            Some(Polygon::new(vertices, None))
        })
        .collect();
    Mesh::from_polygons(&polygons)
}

/// Six times the signed volume enclosed by a mesh
fn signed_volume6(mesh: &Mesh) -> f64 {
    mesh.polygons
        .iter()
        .map(|polygon| {
            let points: Vec<DVec3> = polygon.vertices.iter().map(|v| to_dvec3(&v.pos)).collect();
            (1..points.len().saturating_sub(1))
                .map(|i| points[0].dot(points[i].cross(points[i + 1])))
                .sum::<f64>()
        })
        .sum()
}

/// Flip a mesh whose faces point inward
fn orient_outward(mesh: Mesh) -> Mesh {
    if signed_volume6(&mesh) < 0.0 {
        mesh.inverse()
    } else {
        mesh
    }
}

impl CadKernel for MeshKernel {
    fn name(&self) -> &str {
        "mesh"
    }

    fn is_available(&self) -> bool {
        true
    }

    fn extrude(
        &self,
        profile: &Wire2D,
        plane: &SketchPlane,
        start: f32,
        end: f32,
    ) -> CadResult<Solid> {
        let points = prepare_profile(profile)?;
        let (low, high) = if start <= end { (start, end) } else { (end, start) };
        if (high - low) <= f32::EPSILON {
            return Err(CadError::InvalidProfile(format!(
                "Extrusion from {start} to {end} has no height"
            )));
        }

        // Sketch X, Y and the plane normal become the shape's X, Y and Z
        let normal = plane.normal.as_dvec3();
        let placement = Matrix4::from_columns(&[
            direction4(plane.x_axis.as_dvec3()),
            direction4(plane.y_axis.as_dvec3()),
            direction4(normal),
            position4(plane.origin.as_dvec3() + normal * low as f64),
        ]);

        let shape = profile_shape(points.iter().map(|p| [p.x as f64, p.y as f64]));
        let solid = shape.extrude((high - low) as f64).transform(&placement);

        tracing::trace!(polygons = solid.polygons.len(), "extruded profile");
        self.store_solid(solid)
    }

    fn revolve(
        &self,
        profile: &Wire2D,
        plane: &SketchPlane,
        axis: &Axis3D,
        angle: f32,
    ) -> CadResult<Solid> {
        if angle <= 0.0 {
            return Err(CadError::InvalidProfile(format!(
                "Revolve angle must be positive, got {angle}"
            )));
        }
        let points = prepare_profile(profile)?;
        let angle = (angle as f64).min(TAU);

        let origin = axis.origin.as_dvec3();
        let direction = axis.direction.as_dvec3().normalize();

        // Express the profile as (radius, height) about the axis
        let world: Vec<DVec3> = points.iter().map(|p| plane.to_world(*p).as_dvec3()).collect();
        let radial_of = |p: DVec3| {
            let v = p - origin;
            v - direction * v.dot(direction)
        };
        let radial_dir = world
            .iter()
            .map(|p| radial_of(*p))
            .find(|r| r.length() > AXIS_EPSILON)
            .map(|r| r.normalize())
            .ok_or_else(|| CadError::InvalidProfile("Profile lies on the revolve axis".into()))?;
        let tangent_dir = direction.cross(radial_dir);

        let mut rz = Vec::with_capacity(world.len());
        for p in &world {
            let radial = radial_of(*p);
            let r = radial.dot(radial_dir);
            if r < -AXIS_EPSILON || (radial - radial_dir * r).length() > 1e-4 {
                return Err(CadError::InvalidProfile(
                    "Profile must lie on one side of the revolve axis".into(),
                ));
            }
            rz.push([r.max(0.0), (*p - origin).dot(direction)]);
        }

        // Heights are lifted clear of every radius so the axis `csgrs`
        // revolves about can be read back from the result
        let max_radius = rz.iter().map(|p| p[0]).fold(0.0, f64::max);
        let min_height = rz.iter().map(|p| p[1]).fold(f64::INFINITY, f64::min);
        let lift = max_radius + 1.0 - min_height;

        let steps = ((self.segments as f64 * angle / TAU).ceil() as usize).max(1);
        let revolved = profile_shape(rz.iter().map(|p| [p[0], p[1] + lift]))
            .rotate_extrude(angle.to_degrees(), steps)
            .map_err(|e| CadError::OperationFailed(format!("Revolve failed: {e:?}")))?;

        let vertices = || revolved.polygons.iter().flat_map(|p| p.vertices.iter());
        let axis_index = [1usize, 2]
            .into_iter()
            .find(|&i| vertices().all(|v| v.pos[i] > max_radius + 0.5))
            .filter(|_| vertices().next().is_some())
            .ok_or_else(|| CadError::OperationFailed("Revolve produced no faces".into()))?;

        // Shape X is the radius at angle zero, the remaining shape axis is
        // the direction of sweep
        let mut columns = [Vector4::zeros(); 4];
        columns[0] = direction4(radial_dir);
        columns[3 - axis_index] = direction4(tangent_dir);
        columns[axis_index] = direction4(direction);
        columns[3] = position4(origin - direction * lift);
        let solid = revolved.transform(&Matrix4::from_columns(&columns));

        tracing::trace!(polygons = solid.polygons.len(), steps, "revolved profile");
        self.store_solid(solid)
    }

    fn boolean(&self, a: &Solid, b: &Solid, op: BooleanType) -> CadResult<Solid> {
        let ma = self.mesh(a)?;
        let mb = self.mesh(b)?;
        let (count_a, count_b) = (ma.polygons.len(), mb.polygons.len());

        let result = match op {
            BooleanType::Union => ma.union(&mb),
            BooleanType::Subtract => ma.difference(&mb),
            BooleanType::Intersect => ma.intersection(&mb),
        };

        tracing::debug!(
            ?op,
            count_a,
            count_b,
            result = result.polygons.len(),
            "boolean operation"
        );

        if result.polygons.is_empty() {
            if matches!(op, BooleanType::Intersect) {
                let id = Uuid::new_v4();
                self.solids.lock().insert(id, result);
                return Ok(Solid::new(id).with_kernel_data());
            }
            return Err(CadError::BooleanFailed(format!(
                "{op:?} produced an empty solid"
            )));
        }
        self.store_solid(result)
            .map_err(|e| CadError::BooleanFailed(e.to_string()))
    }

    fn tessellate(&self, solid: &Solid) -> CadResult<TessellatedMesh> {
        let loops: Vec<Vec<DVec3>> = {
            let solids = self.solids.lock();
            let mesh = solids
                .get(&solid.id)
                .ok_or_else(|| CadError::TessellationFailed("Solid not found".into()))?;
            mesh.polygons
                .iter()
                .map(|p| p.vertices.iter().map(|v| to_dvec3(&v.pos)).collect())
                .collect()
        };

        let mut welded = weld::weld(&loops, WELD_EPSILON);
        let inserted = weld::split_t_junctions(&mut welded, WELD_EPSILON);
        tracing::trace!(inserted, polygons = welded.loops.len(), "welded faces");

        let mut mesh = TessellatedMesh::new();
        for indices in &welded.loops {
            let points: Vec<DVec3> = indices.iter().map(|i| welded.vertices[*i as usize]).collect();
            let normal = weld::loop_normal(points.iter().copied());
            if normal.length() < 1e-12 {
                continue;
            }
            let normal = normal.normalize().as_vec3().to_array();

            let base = mesh.vertices.len() as u32;
            let n = points.len() as u32;
            mesh.vertices.extend(points.iter().map(|p| p.as_vec3().to_array()));
            if points.len() == 3 || !has_straight_corner(&points) {
                for i in 1..n - 1 {
                    mesh.indices.extend_from_slice(&[base, base + i, base + i + 1]);
                }
            } else {
                // Fan from the centroid so corners on a straight run
                // never produce slivers
                let centroid = points.iter().copied().sum::<DVec3>() / points.len() as f64;
                mesh.vertices.push(centroid.as_vec3().to_array());
                for i in 0..n {
                    mesh.indices.extend_from_slice(&[base + n, base + i, base + (i + 1) % n]);
                }
            }
            mesh.normals.resize(mesh.vertices.len(), normal);
        }
        Ok(mesh)
    }

    fn discard(&self, solid: &Solid) {
        self.solids.lock().remove(&solid.id);
    }
}

/// Whether any corner of a loop lies on the line through its neighbours
fn has_straight_corner(points: &[DVec3]) -> bool {
    let n = points.len();
    (0..n).any(|i| {
        let a = points[i] - points[(i + n - 1) % n];
        let b = points[(i + 1) % n] - points[i];
        a.cross(b).length() <= 1e-9 * a.length() * b.length()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use glam::Vec3;
    use std::f32::consts::{PI, TAU};

    fn polygon_circle_area(radius: f32, segments: u32) -> f32 {
        0.5 * segments as f32 * radius * radius * (TAU / segments as f32).sin()
    }

    #[test]
    fn test_extrude_square_volume_and_bounds() {
        let kernel = MeshKernel::new();
        let wire = Wire2D::rectangle(Vec2::ZERO, 2.0, 4.0);
        let solid = kernel.extrude(&wire, &SketchPlane::xy(), 1.0, 4.0).unwrap();
        let mesh = kernel.tessellate(&solid).unwrap();

        assert_relative_eq!(mesh.volume(), 24.0, epsilon = 1e-4);
        let (min, max) = mesh.bounds().unwrap();
        assert_relative_eq!(min.z, 1.0);
        assert_relative_eq!(max.z, 4.0);
        assert_relative_eq!(max.y, 2.0);
    }

    #[test]
    fn test_extrude_clockwise_profile_is_reoriented() {
        let kernel = MeshKernel::new();
        let mut wire = Wire2D::rectangle(Vec2::ZERO, 1.0, 1.0);
        wire.points.reverse();
        let solid = kernel.extrude(&wire, &SketchPlane::xy(), 0.0, 2.0).unwrap();
        let mesh = kernel.tessellate(&solid).unwrap();
        assert_relative_eq!(mesh.volume(), 2.0, epsilon = 1e-5);
    }

    #[test]
    fn test_extrude_concave_profile() {
        let kernel = MeshKernel::new();
        let wire = Wire2D::new(
            vec![
                Vec2::new(0.0, 0.0),
                Vec2::new(4.0, 0.0),
                Vec2::new(4.0, 4.0),
                Vec2::new(2.0, 1.0),
                Vec2::new(0.0, 4.0),
            ],
            true,
        );
        let solid = kernel.extrude(&wire, &SketchPlane::xy(), 0.0, 1.0).unwrap();
        let mesh = kernel.tessellate(&solid).unwrap();
        assert_relative_eq!(mesh.volume(), 10.0, epsilon = 1e-4);
    }

    #[test]
    fn test_extrude_on_offset_side_plane() {
        let kernel = MeshKernel::new();
        let plane = SketchPlane::yz().offset(3.0);
        let wire = Wire2D::rectangle(Vec2::new(0.0, 5.0), 2.0, 2.0);
        let solid = kernel.extrude(&wire, &plane, 0.0, 1.0).unwrap();
        let (min, max) = kernel.tessellate(&solid).unwrap().bounds().unwrap();
        assert_relative_eq!(min.x, 3.0);
        assert_relative_eq!(max.x, 4.0);
        assert_relative_eq!(min.z, 4.0);
        assert_relative_eq!(max.z, 6.0);
    }

    #[test]
    fn test_extrude_rejects_degenerate_input() {
        let kernel = MeshKernel::new();
        let line = Wire2D::new(vec![Vec2::ZERO, Vec2::X, Vec2::new(2.0, 0.0)], true);
        assert!(matches!(
            kernel.extrude(&line, &SketchPlane::xy(), 0.0, 1.0),
            Err(CadError::InvalidProfile(_))
        ));

        let square = Wire2D::rectangle(Vec2::ZERO, 1.0, 1.0);
        assert!(kernel.extrude(&square, &SketchPlane::xy(), 1.0, 1.0).is_err());

        let open = Wire2D::new(square.points.clone(), false);
        assert!(kernel.extrude(&open, &SketchPlane::xy(), 0.0, 1.0).is_err());
    }

    #[test]
    fn test_revolve_rectangle_into_tube() {
        let kernel = MeshKernel::new();
        // Radius 2..3, height 0..4 on the YZ plane, revolved about Z
        let wire = Wire2D::new(
            vec![
                Vec2::new(2.0, 0.0),
                Vec2::new(3.0, 0.0),
                Vec2::new(3.0, 4.0),
                Vec2::new(2.0, 4.0),
            ],
            true,
        );
        let solid = kernel
            .revolve(&wire, &SketchPlane::yz(), &Axis3D::z(), TAU)
            .unwrap();
        let mesh = kernel.tessellate(&solid).unwrap();

        let expected = 4.0 * (polygon_circle_area(3.0, 64) - polygon_circle_area(2.0, 64));
        assert_relative_eq!(mesh.volume(), expected, max_relative = 1e-4);

        let (min, max) = mesh.bounds().unwrap();
        assert_relative_eq!(max.z, 4.0, epsilon = 1e-5);
        assert_relative_eq!(max.x, 3.0, epsilon = 1e-4);
        assert_relative_eq!(min.y, -3.0, epsilon = 1e-4);
    }

    #[test]
    fn test_revolve_profile_touching_axis() {
        let kernel = MeshKernel::new();
        let wire = Wire2D::rectangle(Vec2::new(1.0, 1.0), 2.0, 2.0);
        let solid = kernel
            .revolve(&wire, &SketchPlane::yz(), &Axis3D::z(), TAU)
            .unwrap();
        let mesh = kernel.tessellate(&solid).unwrap();
        let expected = 2.0 * polygon_circle_area(2.0, 64);
        assert_relative_eq!(mesh.volume(), expected, max_relative = 1e-4);
    }

    #[test]
    fn test_half_revolve_is_closed() {
        let kernel = MeshKernel::new();
        let wire = Wire2D::rectangle(Vec2::new(1.0, 1.0), 2.0, 2.0);
        let solid = kernel
            .revolve(&wire, &SketchPlane::yz(), &Axis3D::z(), PI)
            .unwrap();
        let mesh = kernel.tessellate(&solid).unwrap();
        let expected = polygon_circle_area(2.0, 64);
        assert_relative_eq!(mesh.volume(), expected, max_relative = 1e-4);
    }

    #[test]
    fn test_revolve_rejects_profile_crossing_axis() {
        let kernel = MeshKernel::new();
        let wire = Wire2D::rectangle(Vec2::ZERO, 2.0, 2.0);
        let result = kernel.revolve(&wire, &SketchPlane::yz(), &Axis3D::z(), TAU);
        assert!(matches!(result, Err(CadError::InvalidProfile(_))));
    }

    #[test]
    fn test_boolean_cut_cylinder_bore() {
        let kernel = MeshKernel::new();
        let plane = SketchPlane::xy();
        let outer = kernel
            .extrude(&Wire2D::circle(Vec2::ZERO, 9.5, 64), &plane, 0.0, 6.0)
            .unwrap();
        let bore = kernel
            .extrude(&Wire2D::circle(Vec2::ZERO, 3.0, 64), &plane, 0.0, 6.0)
            .unwrap();
        let ring = kernel.boolean(&outer, &bore, BooleanType::Subtract).unwrap();
        let mesh = kernel.tessellate(&ring).unwrap();

        let expected = 6.0 * (polygon_circle_area(9.5, 64) - polygon_circle_area(3.0, 64));
        assert_relative_eq!(mesh.volume(), expected, max_relative = 1e-3);
    }

    #[test]
    fn test_boolean_union_stacked_cylinders() {
        let kernel = MeshKernel::new();
        let plane = SketchPlane::xy();
        let base = kernel
            .extrude(&Wire2D::rectangle(Vec2::ZERO, 10.0, 10.0), &plane, 0.0, 2.0)
            .unwrap();
        let pin = kernel
            .extrude(&Wire2D::circle(Vec2::ZERO, 1.0, 32), &plane, 2.0, 5.0)
            .unwrap();
        let joined = kernel.boolean(&base, &pin, BooleanType::Union).unwrap();
        let mesh = kernel.tessellate(&joined).unwrap();

        let expected = 200.0 + 3.0 * polygon_circle_area(1.0, 32);
        assert_relative_eq!(mesh.volume(), expected, max_relative = 1e-4);
        assert_relative_eq!(mesh.bounds().unwrap().1.z, 5.0);
    }

    #[test]
    fn test_boolean_unknown_solid() {
        let kernel = MeshKernel::new();
        let ghost = Solid::new(Uuid::new_v4());
        let result = kernel.boolean(&ghost, &ghost, BooleanType::Union);
        assert!(matches!(result, Err(CadError::SolidNotFound(_))));
    }

    #[test]
    fn test_discard_releases_solid() {
        let kernel = MeshKernel::new();
        let solid = kernel
            .extrude(&Wire2D::rectangle(Vec2::ZERO, 1.0, 1.0), &SketchPlane::xy(), 0.0, 1.0)
            .unwrap();
        assert_eq!(kernel.solid_count(), 1);
        kernel.discard(&solid);
        assert_eq!(kernel.solid_count(), 0);
        assert!(kernel.tessellate(&solid).is_err());
    }

    #[test]
    fn test_tessellation_normals_match_vertices() {
        let kernel = MeshKernel::new();
        let solid = kernel
            .extrude(&Wire2D::circle(Vec2::ZERO, 1.0, 16), &SketchPlane::xy(), 0.0, 1.0)
            .unwrap();
        let mesh = kernel.tessellate(&solid).unwrap();
        assert_eq!(mesh.vertices.len(), mesh.normals.len());
        assert_eq!(mesh.indices.len() % 3, 0);
        // 16 side quads (2 triangles each) and two 16-gon caps (14 each)
        assert_eq!(mesh.triangle_count(), 16 * 2 + 14 * 2);
        let up = mesh
            .triangles()
            .filter(|[a, b, c]| (*b - *a).cross(*c - *a).normalize_or_zero().z > 0.99)
            .count();
        assert_eq!(up, 14);
        for tri in mesh.indices.chunks_exact(3) {
            let normals: Vec<Vec3> = tri.iter().map(|i| Vec3::from(mesh.normals[*i as usize])).collect();
            assert!(normals.windows(2).all(|w| w[0] == w[1]));
        }
    }

    #[test]
    fn test_bored_cylinder_is_closed() {
        let kernel = MeshKernel::new();
        let plane = SketchPlane::xy();
        let outer = kernel
            .extrude(&Wire2D::circle(Vec2::ZERO, 9.5, 32), &plane, 0.0, 6.0)
            .unwrap();
        // An offset bore splits the caps unevenly around its rim
        let bore = kernel
            .extrude(&Wire2D::circle(Vec2::new(2.0, 1.0), 3.0, 24), &plane, -1.0, 4.0)
            .unwrap();
        let cut = kernel.boolean(&outer, &bore, BooleanType::Subtract).unwrap();
        let mesh = kernel.tessellate(&cut).unwrap();
        assert_eq!(mesh.open_edge_count(), 0);
        assert!(mesh.volume() > 0.0);
    }

    #[test]
    fn test_union_with_pin_is_closed() {
        let kernel = MeshKernel::with_segments(32);
        let plane = SketchPlane::xy();
        let base = kernel
            .extrude(&Wire2D::rectangle(Vec2::ZERO, 10.0, 10.0), &plane, 0.0, 2.0)
            .unwrap();
        let pin = kernel
            .extrude(&Wire2D::circle(Vec2::new(1.0, 2.0), 1.0, 32), &plane, 2.0, 5.0)
            .unwrap();
        let joined = kernel.boolean(&base, &pin, BooleanType::Union).unwrap();
        assert_eq!(kernel.tessellate(&joined).unwrap().open_edge_count(), 0);
    }

    #[test]
    fn test_revolve_profile_doubling_back_on_axis() {
        let kernel = MeshKernel::new();
        // Drawn from the origin up the axis, around, and back down past
        // the start point
        let wire = Wire2D::new(
            vec![
                Vec2::new(0.0, 0.0),
                Vec2::new(0.0, 1.0),
                Vec2::new(2.0, 1.0),
                Vec2::new(2.0, 3.0),
                Vec2::new(0.0, 3.0),
            ],
            true,
        );
        let solid = kernel
            .revolve(&wire, &SketchPlane::yz(), &Axis3D::z(), TAU)
            .unwrap();
        let mesh = kernel.tessellate(&solid).unwrap();
        let expected = 2.0 * polygon_circle_area(2.0, 64);
        assert_relative_eq!(mesh.volume(), expected, max_relative = 1e-4);
        assert_eq!(mesh.open_edge_count(), 0);
        let (min, max) = mesh.bounds().unwrap();
        assert_relative_eq!(min.z, 1.0, epsilon = 1e-5);
        assert_relative_eq!(max.z, 3.0, epsilon = 1e-5);
    }
}
