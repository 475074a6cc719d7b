use crate::edges::EdgeMesh;
use glam::{Mat4, Vec3};

/// GPU vertex for the line-list pipeline.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LineVertex {
    pub position: [f32; 3],
    pub color: [f32; 4],
}

#[inline]
pub fn rgba(rgb: [f32; 3], alpha: f32) -> [f32; 4] {
    [rgb[0], rgb[1], rgb[2], alpha.clamp(0.0, 1.0)]
}

/// Per-frame vertex accumulator; reuse across frames to avoid reallocating.
#[derive(Clone, Debug, Default)]
pub struct LineBatch {
    pub vertices: Vec<LineVertex>,
}

impl LineBatch {
    pub fn with_capacity(segments: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(segments * 2),
        }
    }

    pub fn clear(&mut self) {
        self.vertices.clear();
    }

    pub fn segment_count(&self) -> usize {
        self.vertices.len() / 2
    }

    pub fn push_segment(&mut self, a: Vec3, b: Vec3, color: [f32; 4]) {
        self.vertices.push(LineVertex {
            position: a.to_array(),
            color,
        });
        self.vertices.push(LineVertex {
            position: b.to_array(),
            color,
        });
    }

    pub fn push_mesh(&mut self, mesh: &EdgeMesh, transform: Mat4, color: [f32; 4]) {
        self.vertices.reserve(mesh.len() * 2);
        for [a, b] in &mesh.segments {
            self.push_segment(
                transform.transform_point3(*a),
                transform.transform_point3(*b),
                color,
            );
        }
    }
}
