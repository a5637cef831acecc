//! STL file reading and writing

use std::io::BufReader;
use std::path::Path;

use geneva_cad::TessellatedMesh;
use glam::Vec3;

/// Save a mesh as a binary STL file
pub fn save_stl(mesh: &TessellatedMesh, path: impl AsRef<Path>) -> Result<(), StlError> {
    let path = path.as_ref();

    let triangles: Vec<stl_io::Triangle> = mesh
        .triangles()
        .map(|[v0, v1, v2]| stl_io::Triangle {
            normal: stl_io::Normal::new(face_normal(v0, v1, v2).to_array()),
            vertices: [
                stl_io::Vertex::new(v0.to_array()),
                stl_io::Vertex::new(v1.to_array()),
                stl_io::Vertex::new(v2.to_array()),
            ],
        })
        .collect();

    let mut file = std::fs::File::create(path).map_err(|e| StlError::Io(e.to_string()))?;
    stl_io::write_stl(&mut file, triangles.iter()).map_err(|e| StlError::Write(e.to_string()))?;

    tracing::debug!("Wrote {} triangles to {}", triangles.len(), path.display());
    Ok(())
}

/// Load an STL file (binary or ASCII) as a flat-shaded mesh
pub fn load_stl(path: impl AsRef<Path>) -> Result<TessellatedMesh, StlError> {
    let path = path.as_ref();
    let file = std::fs::File::open(path).map_err(|e| StlError::Io(e.to_string()))?;
    let mut reader = BufReader::new(file);

    let indexed = stl_io::read_stl(&mut reader).map_err(|e| StlError::Parse(e.to_string()))?;

    let mut mesh = TessellatedMesh::new();
    for face in &indexed.faces {
        let normal = face.normal;
        for &vertex_idx in &face.vertices {
            let v = indexed.vertices[vertex_idx];
            mesh.indices.push(mesh.vertices.len() as u32);
            mesh.vertices.push([v[0], v[1], v[2]]);
            mesh.normals.push([normal[0], normal[1], normal[2]]);
        }
    }
    Ok(mesh)
}

/// Unit normal of a triangle, +Z for degenerate ones
fn face_normal(v0: Vec3, v1: Vec3, v2: Vec3) -> Vec3 {
    let n = (v1 - v0).cross(v2 - v0);
    if n.length_squared() > 0.0 {
        n.normalize()
    } else {
        Vec3::Z
    }
}

/// STL-related errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum StlError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Write error: {0}")]
    Write(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use geneva_cad::{CadKernel, MeshKernel, SketchPlane, Wire2D};
    use glam::Vec2;

    #[test]
    fn test_save_and_load_box() {
        let kernel = MeshKernel::new();
        let solid = kernel
            .extrude(&Wire2D::rectangle(Vec2::ZERO, 2.0, 3.0), &SketchPlane::xy(), 0.0, 4.0)
            .unwrap();
        let mesh = kernel.tessellate(&solid).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("box.stl");
        save_stl(&mesh, &path).unwrap();

        let loaded = load_stl(&path).unwrap();
        assert_eq!(loaded.triangle_count(), mesh.triangle_count());
        assert_relative_eq!(loaded.volume(), 24.0, epsilon = 1e-3);
        assert_eq!(loaded.bounds(), mesh.bounds());
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_stl(dir.path().join("missing.stl"));
        assert!(matches!(result, Err(StlError::Io(_))));
    }

    #[test]
    fn test_load_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("garbage.stl");
        std::fs::write(&path, b"definitely not a mesh").unwrap();
        assert!(load_stl(&path).is_err());
    }
}
