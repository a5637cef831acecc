//! Vertex welding and T-junction repair for polygon soups
//!
//! Boolean results split faces on one side of a shared edge but not the
//! other. Welding merges coincident corners into shared vertices, and every
//! vertex that lies inside a polygon edge is inserted into that edge, so the
//! triangulated surface is closed.

use std::collections::HashMap;

use glam::DVec3;

/// Distance below which two vertices are merged
pub const WELD_EPSILON: f64 = 1e-4;

/// Polygon loops indexing a shared vertex table
#[derive(Debug, Clone, Default)]
pub struct WeldedLoops {
    pub vertices: Vec<DVec3>,
    pub loops: Vec<Vec<u32>>,
}

fn cell_of(p: DVec3, cell_size: f64) -> (i64, i64, i64) {
    (
        (p.x / cell_size).floor() as i64,
        (p.y / cell_size).floor() as i64,
        (p.z / cell_size).floor() as i64,
    )
}

/// Merge coincident corners of `polygons` into shared vertices
///
/// Consecutive repeats inside a loop are removed afterwards; loops left with
/// fewer than three corners are dropped.
pub fn weld(polygons: &[Vec<DVec3>], epsilon: f64) -> WeldedLoops {
    let cell_size = epsilon * 2.0;
    let mut grid: HashMap<(i64, i64, i64), Vec<u32>> = HashMap::new();
    let mut welded = WeldedLoops::default();

    for polygon in polygons {
        let mut indices: Vec<u32> = Vec::with_capacity(polygon.len());
        for &p in polygon {
            let cell = cell_of(p, cell_size);
            let mut found = None;
            'search: for dx in -1..=1 {
                for dy in -1..=1 {
                    for dz in -1..=1 {
                        let Some(candidates) = grid.get(&(cell.0 + dx, cell.1 + dy, cell.2 + dz))
                        else {
                            continue;
                        };
                        for &idx in candidates {
                            if welded.vertices[idx as usize].distance(p) < epsilon {
                                found = Some(idx);
                                break 'search;
                            }
                        }
                    }
                }
            }
            let idx = found.unwrap_or_else(|| {
                let idx = welded.vertices.len() as u32;
                welded.vertices.push(p);
                grid.entry(cell).or_default().push(idx);
                idx
            });
            indices.push(idx);
        }

        indices.dedup();
        while indices.len() > 1 && indices.first() == indices.last() {
            indices.pop();
        }
        if indices.len() >= 3 {
            welded.loops.push(indices);
        }
    }

    welded
}

/// Insert every vertex lying strictly inside a loop edge into that edge
///
/// Returns the number of vertices inserted.
pub fn split_t_junctions(welded: &mut WeldedLoops, epsilon: f64) -> usize {
    // Vertices sorted by X so each edge only scans its own X range
    let mut by_x: Vec<u32> = (0..welded.vertices.len() as u32).collect();
    by_x.sort_by(|a, b| {
        welded.vertices[*a as usize]
            .x
            .total_cmp(&welded.vertices[*b as usize].x)
    });
    let xs: Vec<f64> = by_x.iter().map(|i| welded.vertices[*i as usize].x).collect();

    let vertices = &welded.vertices;
    let mut inserted = 0;
    for indices in &mut welded.loops {
        let n = indices.len();
        let mut repaired = Vec::with_capacity(n);
        for i in 0..n {
            let (ia, ib) = (indices[i], indices[(i + 1) % n]);
            let (a, b) = (vertices[ia as usize], vertices[ib as usize]);
            repaired.push(ia);

            let edge = b - a;
            let length_sq = edge.length_squared();
            if length_sq <= epsilon * epsilon {
                continue;
            }
            let lo = xs.partition_point(|x| *x < a.x.min(b.x) - epsilon);
            let hi = xs.partition_point(|x| *x <= a.x.max(b.x) + epsilon);

            let mut on_edge: Vec<(f64, u32)> = by_x[lo..hi]
                .iter()
                .filter(|idx| **idx != ia && **idx != ib)
                .filter_map(|idx| {
                    let p = vertices[*idx as usize];
                    let t = (p - a).dot(edge) / length_sq;
                    if t <= 0.0 || t >= 1.0 {
                        return None;
                    }
                    if (a + edge * t).distance(p) < epsilon {
                        Some((t, *idx))
                    } else {
                        None
                    }
                })
                .collect();
            on_edge.sort_by(|x, y| x.0.total_cmp(&y.0));
            inserted += on_edge.len();
            repaired.extend(on_edge.into_iter().map(|(_, idx)| idx));
        }
        *indices = repaired;
    }

    inserted
}

/// Normal of a loop scaled by twice its area (Newell's method)
pub fn loop_normal(points: impl Iterator<Item = DVec3> + Clone) -> DVec3 {
    let next = points.clone().cycle().skip(1);
    points
        .zip(next)
        .fold(DVec3::ZERO, |acc, (p, q)| {
            acc + DVec3::new(
                (p.y - q.y) * (p.z + q.z),
                (p.z - q.z) * (p.x + q.x),
                (p.x - q.x) * (p.y + q.y),
            )
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(z: f64) -> Vec<DVec3> {
        vec![
            DVec3::new(0.0, 0.0, z),
            DVec3::new(1.0, 0.0, z),
            DVec3::new(1.0, 1.0, z),
            DVec3::new(0.0, 1.0, z),
        ]
    }

    #[test]
    fn test_weld_merges_near_corners() {
        let mut shifted = square(0.0);
        shifted[0] += DVec3::splat(1e-6);
        let welded = weld(&[square(0.0), shifted], WELD_EPSILON);
        assert_eq!(welded.vertices.len(), 4);
        assert_eq!(welded.loops[0], welded.loops[1]);
    }

    #[test]
    fn test_weld_drops_collapsed_loops() {
        let sliver = vec![DVec3::ZERO, DVec3::X, DVec3::new(1.0 + 1e-6, 0.0, 0.0)];
        let welded = weld(&[sliver], WELD_EPSILON);
        assert!(welded.loops.is_empty());
    }

    #[test]
    fn test_split_inserts_midpoint_into_long_edge() {
        // A half-width face meets the bottom edge of a full-width one
        let full = vec![
            DVec3::new(0.0, 0.0, 0.0),
            DVec3::new(2.0, 0.0, 0.0),
            DVec3::new(2.0, 0.0, 1.0),
            DVec3::new(0.0, 0.0, 1.0),
        ];
        let left = vec![
            DVec3::new(0.0, 0.0, 0.0),
            DVec3::new(0.0, -1.0, 0.0),
            DVec3::new(1.0, -1.0, 0.0),
            DVec3::new(1.0, 0.0, 0.0),
        ];
        let mut welded = weld(&[full, left], WELD_EPSILON);
        assert_eq!(split_t_junctions(&mut welded, WELD_EPSILON), 1);
        assert_eq!(welded.loops[0].len(), 5);
        assert_eq!(welded.vertices[welded.loops[0][1] as usize], DVec3::X);
    }

    #[test]
    fn test_loop_normal_of_ccw_square() {
        let normal = loop_normal(square(2.0).into_iter());
        assert!((normal - DVec3::Z * 2.0).length() < 1e-12);
    }
}
