//! OBJ model import, reduced to feature edges.

use crate::edges::EdgeMesh;
use crate::error::MeshError;
use glam::Vec3;

/// Parse an in-memory OBJ file and extract the feature edges of every object.
///
/// Materials are ignored. Each object is processed on its own, so seams
/// between separate objects stay visible.
pub fn load_obj_edges(bytes: &[u8], threshold_deg: f32) -> Result<EdgeMesh, MeshError> {
    let load_opts = tobj::LoadOptions {
        triangulate: true,
        single_index: true,
        ..Default::default()
    };
    let mut reader = bytes;
    let (models, _materials) = tobj::load_obj_buf(&mut reader, &load_opts, |_| {
        Ok((Vec::new(), Default::default()))
    })?;

    let mut out = EdgeMesh::new();
    for model in &models {
        let positions: Vec<Vec3> = model
            .mesh
            .positions
            .chunks_exact(3)
            .map(|p| Vec3::new(p[0], p[1], p[2]))
            .collect();
        if model.mesh.indices.len() < 3 {
            log::warn!("skipping OBJ object '{}' without faces", model.name);
            continue;
        }
        out.extend(EdgeMesh::from_triangles(
            &positions,
            &model.mesh.indices,
            threshold_deg,
        )?);
    }
    if out.is_empty() {
        return Err(MeshError::Empty);
    }
    log::info!(
        "loaded OBJ: {} object(s), {} feature edges",
        models.len(),
        out.len()
    );
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CUBE_OBJ: &str = "\
v -1 -1 -1
v 1 -1 -1
v 1 1 -1
v -1 1 -1
v -1 -1 1
v 1 -1 1
v 1 1 1
v -1 1 1
f 1 4 3 2
f 5 6 7 8
f 1 2 6 5
f 2 3 7 6
f 3 4 8 7
f 4 1 5 8
";

    #[test]
    fn cube_keeps_its_twelve_edges() {
        let mesh = load_obj_edges(CUBE_OBJ.as_bytes(), 11.27).unwrap();
        assert_eq!(mesh.len(), 12);
    }

    #[test]
    fn file_without_faces_is_rejected() {
        let err = load_obj_edges(b"v 0 0 0\nv 1 0 0\n", 11.27).unwrap_err();
        assert!(matches!(err, MeshError::Empty));
    }
}
