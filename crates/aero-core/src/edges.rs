//! Wireframe line geometry.
//!
//! [`EdgeMesh`] is a bag of model-space segments. Imported meshes keep only
//! their feature edges (boundaries and creases sharper than a threshold);
//! the nacelles and afterburners are generated directly.

use crate::error::MeshError;
use fnv::FnvHashMap;
use glam::Vec3;
use smallvec::SmallVec;
use std::f32::consts::TAU;

// Weld tolerance for shared vertices, as a reciprocal.
const WELD_SCALE: f32 = 1e4;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct EdgeMesh {
    pub segments: Vec<[Vec3; 2]>,
}

struct EdgeFaces {
    a: Vec3,
    b: Vec3,
    normals: SmallVec<[Vec3; 2]>,
}

#[inline]
fn weld_key(p: Vec3) -> [i64; 3] {
    [
        (p.x * WELD_SCALE).round() as i64,
        (p.y * WELD_SCALE).round() as i64,
        (p.z * WELD_SCALE).round() as i64,
    ]
}

impl EdgeMesh {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn push(&mut self, a: Vec3, b: Vec3) {
        self.segments.push([a, b]);
    }

    pub fn extend(&mut self, other: EdgeMesh) {
        self.segments.extend(other.segments);
    }

    /// Keep edges that border a single triangle, or whose two faces meet at
    /// more than `threshold_deg`.
    pub fn from_triangles(
        positions: &[Vec3],
        indices: &[u32],
        threshold_deg: f32,
    ) -> Result<Self, MeshError> {
        if indices.len() < 3 {
            return Err(MeshError::Empty);
        }
        let cos_threshold = threshold_deg.to_radians().cos();

        let mut welded: FnvHashMap<[i64; 3], u32> = FnvHashMap::default();
        let mut weld = |p: Vec3| -> u32 {
            let next = welded.len() as u32;
            *welded.entry(weld_key(p)).or_insert(next)
        };

        let mut lookup: FnvHashMap<(u32, u32), usize> = FnvHashMap::default();
        let mut edges: Vec<EdgeFaces> = Vec::new();

        for tri in indices.chunks_exact(3) {
            let mut corners = [Vec3::ZERO; 3];
            let mut ids = [0u32; 3];
            for (k, &i) in tri.iter().enumerate() {
                let p = *positions
                    .get(i as usize)
                    .ok_or(MeshError::IndexOutOfRange {
                        index: i,
                        vertex_count: positions.len(),
                    })?;
                corners[k] = p;
                ids[k] = weld(p);
            }
            if ids[0] == ids[1] || ids[1] == ids[2] || ids[0] == ids[2] {
                continue;
            }
            let normal = (corners[1] - corners[0])
                .cross(corners[2] - corners[0])
                .normalize_or_zero();
            for k in 0..3 {
                let (i0, i1) = (ids[k], ids[(k + 1) % 3]);
                let key = (i0.min(i1), i0.max(i1));
                let slot = *lookup.entry(key).or_insert_with(|| {
                    edges.push(EdgeFaces {
                        a: corners[k],
                        b: corners[(k + 1) % 3],
                        normals: SmallVec::new(),
                    });
                    edges.len() - 1
                });
                edges[slot].normals.push(normal);
            }
        }

        let segments = edges
            .into_iter()
            .filter(|e| match e.normals.as_slice() {
                [_] => true,
                [n0, n1] => n0.dot(*n1) <= cos_threshold,
                _ => true,
            })
            .map(|e| [e.a, e.b])
            .collect();
        Ok(Self { segments })
    }

    /// Open tube along Y, centred on the origin: both rims plus one seam per
    /// radial segment.
    pub fn tapered_tube(radius_top: f32, radius_bottom: f32, length: f32, segments: u32) -> Self {
        let n = segments.max(3);
        let half = length * 0.5;
        let ring = |r: f32, y: f32, i: u32| {
            let theta = i as f32 / n as f32 * TAU;
            Vec3::new(r * theta.sin(), y, r * theta.cos())
        };
        let mut mesh = Self::new();
        for i in 0..n {
            let top = ring(radius_top, half, i);
            let bottom = ring(radius_bottom, -half, i);
            mesh.push(top, ring(radius_top, half, i + 1));
            mesh.push(bottom, ring(radius_bottom, -half, i + 1));
            mesh.push(top, bottom);
        }
        mesh
    }

    /// Capped cone along Y with the apex at `+length / 2`, drawn as a full
    /// triangle wireframe.
    pub fn cone(radius: f32, length: f32, segments: u32) -> Self {
        let n = segments.max(3);
        let half = length * 0.5;
        let apex = Vec3::new(0.0, half, 0.0);
        let center = Vec3::new(0.0, -half, 0.0);
        let base = |i: u32| {
            let theta = i as f32 / n as f32 * TAU;
            Vec3::new(radius * theta.sin(), -half, radius * theta.cos())
        };
        let mut mesh = Self::new();
        for i in 0..n {
            let p = base(i);
            mesh.push(p, base(i + 1));
            mesh.push(apex, p);
            mesh.push(center, p);
        }
        mesh
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_quad_drops_its_diagonal() {
        let positions = [
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(1.0, 1.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
        ];
        let indices = [0, 1, 2, 0, 2, 3];
        let mesh = EdgeMesh::from_triangles(&positions, &indices, 11.27).unwrap();
        assert_eq!(mesh.len(), 4);
    }

    #[test]
    fn out_of_range_index_is_an_error() {
        let positions = [Vec3::ZERO, Vec3::X];
        let err = EdgeMesh::from_triangles(&positions, &[0, 1, 5], 1.0).unwrap_err();
        assert!(matches!(err, MeshError::IndexOutOfRange { index: 5, .. }));
    }

    #[test]
    fn generated_shapes_have_expected_segment_counts() {
        assert_eq!(EdgeMesh::tapered_tube(0.28, 0.224, 3.19, 10).len(), 30);
        assert_eq!(EdgeMesh::cone(0.15, 1.5, 6).len(), 18);
    }
}
