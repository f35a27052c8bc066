//! Player view-point in world space.

use glam::{Vec2, vec2};

/// Camera state: position, view direction and the camera plane.
///
/// * `dir` is unit length; `plane` is perpendicular to it and its magnitude
///   (0.66) encodes the horizontal field of view.
/// * The two vectors are only ever **co-rotated** — never mutated
///   independently — so perpendicularity and FoV survive any input stream.
///
/// `Copy` on purpose: the render loop snapshots the camera before fanning
/// out strip tasks, so the next tick's movement never races a render.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    pub pos: Vec2,
    pub dir: Vec2,
    pub plane: Vec2,
}

impl Camera {
    pub fn new(pos: Vec2, dir: Vec2, plane: Vec2) -> Self {
        Self { pos, dir, plane }
    }

    /// Start-of-game view: centre of the spawn cell, looking down -X,
    /// 66 % half-width camera plane.
    pub fn spawn() -> Self {
        Self::new(vec2(3.5, 3.5), vec2(-1.0, 0.0), vec2(0.0, 0.66))
    }

    /// Rotate the view by `theta` radians (positive = turn left).
    ///
    /// Applies the same 2×2 rotation to `dir` and `plane` so the angle
    /// between them stays at 90°.
    pub fn rotate(&mut self, theta: f32) {
        let rot = Vec2::from_angle(theta);
        self.dir = rot.rotate(self.dir);
        self.plane = rot.rotate(self.plane);
    }

    /// Direction of the ray through screen column `col` of `w`:
    /// `dir + plane * (2*col/w - 1)`.
    #[inline]
    pub fn ray_dir(&self, col: usize, w: usize) -> Vec2 {
        let lens = 2.0 * col as f32 / w as f32 - 1.0;
        self.dir + self.plane * lens
    }
}

/*====================================================================*/
/*                               Tests                                 */
/*====================================================================*/
#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::ROT_SPEED;

    const EPS: f32 = 1e-4;

    #[test]
    fn rotation_preserves_magnitudes_and_angle() {
        let mut cam = Camera::spawn();
        let dir_len = cam.dir.length();
        let plane_len = cam.plane.length();

        for i in 0..200 {
            let theta = if i % 3 == 0 { -ROT_SPEED } else { ROT_SPEED };
            cam.rotate(theta);
            assert!((cam.dir.length() - dir_len).abs() < EPS, "dir drifted");
            assert!(
                (cam.plane.length() - plane_len).abs() < EPS,
                "plane drifted"
            );
            assert!(cam.dir.dot(cam.plane).abs() < EPS, "angle drifted");
        }
    }

    #[test]
    fn full_turn_returns_to_start() {
        let mut cam = Camera::spawn();
        let steps = 64;
        let theta = std::f32::consts::TAU / steps as f32;
        for _ in 0..steps {
            cam.rotate(theta);
        }
        assert!((cam.dir - vec2(-1.0, 0.0)).length() < 1e-3);
        assert!((cam.plane - vec2(0.0, 0.66)).length() < 1e-3);
    }

    #[test]
    fn ray_dir_spans_the_camera_plane() {
        let cam = Camera::spawn();
        let left = cam.ray_dir(0, 640);
        let centre = cam.ray_dir(320, 640);
        let right = cam.ray_dir(639, 640);
        assert!((left - (cam.dir - cam.plane)).length() < EPS);
        assert!((centre - cam.dir).length() < 0.01);
        // col 639 is one step short of +plane
        assert!((right - (cam.dir + cam.plane)).length() < 0.01);
    }
}
