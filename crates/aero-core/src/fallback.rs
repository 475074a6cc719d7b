//! Static aircraft silhouette shown while the model is unavailable.

use crate::lines::LineBatch;
use glam::Vec2;

// Outline in a -50..50 x -60..60 view box, y pointing down.
const FUSELAGE: [[f32; 2]; 8] = [
    [0.0, -55.0],
    [2.0, -30.0],
    [3.0, -10.0],
    [3.0, 25.0],
    [0.0, 35.0],
    [-3.0, 25.0],
    [-3.0, -10.0],
    [-2.0, -30.0],
];
const RIGHT_WING: [[f32; 2]; 3] = [[3.0, 0.0], [40.0, 30.0], [5.0, 25.0]];
const LEFT_WING: [[f32; 2]; 3] = [[-3.0, 0.0], [-40.0, 30.0], [-5.0, 25.0]];

const VIEW_HALF_W: f32 = 50.0;
const VIEW_HALF_H: f32 = 60.0;
const FILL: f32 = 0.9; // fraction of the viewport the view box may cover
const NDC_DEPTH: f32 = 0.5;

/// Map a view-box point to NDC, fitting the box inside a viewport of `aspect`.
fn to_ndc(p: [f32; 2], aspect: f32) -> Vec2 {
    let aspect = aspect.max(1e-3);
    let box_aspect = VIEW_HALF_W / VIEW_HALF_H;
    let fit = (aspect / box_aspect).min(1.0);
    let s = FILL * fit / VIEW_HALF_H;
    Vec2::new(p[0] * s / aspect, -p[1] * s)
}

/// Append the closed silhouette outlines in NDC. Draw with an identity view-projection.
pub fn push_silhouette(batch: &mut LineBatch, aspect: f32, color: [f32; 4]) {
    for outline in [&FUSELAGE[..], &RIGHT_WING[..], &LEFT_WING[..]] {
        for (i, &p) in outline.iter().enumerate() {
            let q = outline[(i + 1) % outline.len()];
            let a = to_ndc(p, aspect);
            let b = to_ndc(q, aspect);
            batch.push_segment(a.extend(NDC_DEPTH), b.extend(NDC_DEPTH), color);
        }
    }
}

/// Segment count of the silhouette.
pub fn silhouette_segments() -> usize {
    FUSELAGE.len() + RIGHT_WING.len() + LEFT_WING.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn silhouette_fits_in_clip_space_for_any_aspect() {
        for aspect in [0.3_f32, 0.75, 1.0, 16.0 / 9.0, 4.0] {
            let mut batch = LineBatch::default();
            push_silhouette(&mut batch, aspect, [1.0; 4]);
            assert_eq!(batch.segment_count(), silhouette_segments());
            for v in &batch.vertices {
                let p = Vec3::from(v.position);
                assert!(p.x.abs() <= 1.0 && p.y.abs() <= 1.0, "{p:?} at aspect {aspect}");
            }
        }
    }
}
