use crate::camera::PerspectiveCamera;
use crate::coords::ViewportSize;
use crate::paint::Color;

use super::Scene;

/// A body projected to the screen, in logical pixels (top-left origin, +Y down).
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ScreenDisc {
    pub center: [f32; 2],
    pub radius: f32,
    /// NDC depth in `[0, 1]`; larger is farther.
    pub depth: f32,
    pub color: Color,
}

/// Projects every visible body of `scene` through `camera`.
///
/// Bodies behind the camera, outside the depth range, or smaller than a
/// hundredth of a pixel are dropped. The result is sorted far to near so it
/// can be painted in order without a depth buffer.
pub fn project_bodies(
    scene: &Scene,
    camera: &PerspectiveCamera,
    viewport: ViewportSize,
) -> Vec<ScreenDisc> {
    let w = viewport.width() as f32;
    let h = viewport.height() as f32;
    let focal = camera.focal_scale();

    let mut discs: Vec<ScreenDisc> = scene
        .bodies()
        .iter()
        .filter_map(|body| {
            let clip = camera.to_clip(body.position);
            if clip.w <= f32::EPSILON {
                return None;
            }

            let ndc = clip.truncate() / clip.w;
            if !(0.0..=1.0).contains(&ndc.z) {
                return None;
            }

            let radius = body.radius * focal / clip.w * h * 0.5;
            if radius < 0.01 {
                return None;
            }

            Some(ScreenDisc {
                center: [(ndc.x * 0.5 + 0.5) * w, (0.5 - ndc.y * 0.5) * h],
                radius,
                depth: ndc.z,
                color: body.color,
            })
        })
        .collect();

    discs.sort_by(|a, b| b.depth.total_cmp(&a.depth));
    discs
}
