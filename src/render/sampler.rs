//! Texture and shading computation for one screen column.
//!
//! A [`ColumnSample`] is built once per column from the ray hit and then
//! asked for pixels row by row. Three cases per row: inside the wall band,
//! above it (ceiling), below it (floor). Shading is plain distance fog,
//! fully dark at 8 world units, with y-facing wall faces drawn at 60 %
//! brightness to fake directional light.

use glam::Vec2;

use crate::render::raycast::RayHit;
use crate::render::{HALF_H, Rgba, SCREEN_H, pack_rgb};
use crate::world::texture::{TEX_MAX, TEX_SIZE, Texture, ThemeTextures};

/// Map cell value that selects the `wall_b` texture.
const WALL_B_CELL: u8 = 2;

/// Everything needed to colour any row of one screen column.
#[derive(Clone, Copy, Debug)]
pub struct ColumnSample {
    draw_start: i32,
    draw_end: i32,
    tex_step: f32,
    tex_base: f32,
    base_shade: f32,
    tex_u: usize,
    use_wall_b: bool,
    cam: Vec2,
    hit: Vec2,
    perp: f32,
}

impl ColumnSample {
    pub fn new(cam_pos: Vec2, ray: &RayHit) -> Self {
        // Projected wall band. The epsilon keeps a zero-distance hit from
        // dividing to infinity; the float draw_start (not the truncated
        // one) anchors the texture walk so tall bands stay seam-free.
        let line_h = SCREEN_H as f32 / (ray.perp + 0.0001);
        let draw_start_f = HALF_H as f32 - line_h * 0.5;
        let tex_step = (1.0 / line_h) * TEX_SIZE as f32;

        // Horizontal texel: fractional hit position along the wall cell,
        // mirrored when the opposite-axis cell hashes even so long walls
        // don't tile with a visible mirror seam.
        let raw_u_x = ((ray.hit.x - ray.hit.x.floor()) * TEX_SIZE as f32) as i32;
        let raw_u_y = ((ray.hit.y - ray.hit.y.floor()) * TEX_SIZE as f32) as i32;
        let u_x = if cell_hash(ray.hit.y as i32) & 1 == 0 {
            TEX_MAX - raw_u_x
        } else {
            raw_u_x
        };
        let u_y = if cell_hash(ray.hit.x as i32) & 1 == 0 {
            TEX_MAX - raw_u_y
        } else {
            raw_u_y
        };
        let tex_u = if ray.side { u_x } else { u_y }.min(TEX_MAX) as usize;

        let face_light = if ray.side { 0.6 } else { 1.0 };

        Self {
            draw_start: draw_start_f as i32,
            draw_end: (HALF_H as f32 + line_h * 0.5) as i32,
            tex_step,
            tex_base: -draw_start_f * tex_step,
            base_shade: face_light * (1.0 - (ray.dist.min(20.0) * 0.125).min(1.0)),
            tex_u,
            use_wall_b: ray.cell == WALL_B_CELL,
            cam: cam_pos,
            hit: ray.hit,
            perp: ray.perp,
        }
    }

    /// Wall band extent as (first, last) screen row, possibly off-screen.
    #[inline]
    pub fn band(&self) -> (i32, i32) {
        (self.draw_start, self.draw_end)
    }

    /// Shaded pixel for screen row `y`; `floor_dist` is the floor-distance
    /// table entry for that row.
    pub fn pixel(&self, theme: &ThemeTextures, y: usize, floor_dist: f32) -> Rgba {
        let row = y as i32;
        if row >= self.draw_start && row <= self.draw_end {
            self.wall_pixel(theme, y)
        } else if row < self.draw_start {
            self.plane_pixel(&theme.ceiling, floor_dist)
        } else {
            self.plane_pixel(&theme.floor, floor_dist)
        }
    }

    fn wall_pixel(&self, theme: &ThemeTextures, y: usize) -> Rgba {
        let tex = if self.use_wall_b {
            &theme.wall_b
        } else {
            &theme.wall_a
        };
        let v = ((y as f32 * self.tex_step + self.tex_base) as i32).clamp(0, TEX_MAX) as usize;
        shade_texel(tex.texel(self.tex_u, v), self.base_shade)
    }

    /// Perspective-correct floor/ceiling texel: interpolate between the
    /// camera and the column's wall hit by `floor_dist / perp`, wrap into
    /// the texture.
    fn plane_pixel(&self, tex: &Texture, floor_dist: f32) -> Rgba {
        let t = floor_dist / (self.perp + 0.001);
        let fx = self.cam.x + t * (self.hit.x - self.cam.x);
        let fy = self.cam.y + t * (self.hit.y - self.cam.y);
        let u = ((fx * TEX_SIZE as f32) as i32 & TEX_MAX) as usize;
        let v = ((fy * TEX_SIZE as f32) as i32 & TEX_MAX) as usize;
        let shade = 1.0 - (floor_dist * 0.125).min(1.0);
        shade_texel(tex.texel(u, v), shade)
    }
}

#[inline]
fn shade_texel(rgb: [u8; 3], shade: f32) -> Rgba {
    let ch = |c: u8| (c as f32 * shade).round().clamp(0.0, 255.0) as u8;
    pack_rgb(ch(rgb[0]), ch(rgb[1]), ch(rgb[2]))
}

/// 32-bit integer mix (lowbias32); only the parity of the result is used,
/// to decide whether a wall cell's texture is mirrored.
#[inline]
fn cell_hash(v: i32) -> u32 {
    let mut x = v as u32;
    x ^= x >> 16;
    x = x.wrapping_mul(0x7feb_352d);
    x ^= x >> 15;
    x = x.wrapping_mul(0x846c_a68b);
    x ^= x >> 16;
    x
}

/*====================================================================*/
/*                               Tests                                 */
/*====================================================================*/
#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::raycast::{MAX_VIEW_DIST, cast};
    use crate::world::{Camera, MapGrid};
    use glam::vec2;

    fn spawn_hit() -> (Camera, RayHit) {
        let cam = Camera::spawn();
        let hit = cast(&MapGrid::house(), &cam, cam.dir, MAX_VIEW_DIST);
        (cam, hit)
    }

    #[test]
    fn wall_band_is_symmetric_about_the_horizon() {
        let (cam, hit) = spawn_hit();
        let col = ColumnSample::new(cam.pos, &hit);
        let (start, end) = col.band();
        let above = HALF_H as i32 - start;
        let below = end - HALF_H as i32;
        // Truncation may shave one row off the lower half.
        assert!((above - below).abs() <= 1, "band {start}..{end} lopsided");
        // dist 2.5 → half-height 480/2.5/2 = 96.
        assert!((above - 96).abs() <= 1);
    }

    #[test]
    fn facing_wall_shade_matches_fog_curve() {
        let (cam, hit) = spawn_hit();
        let col = ColumnSample::new(cam.pos, &hit);
        // dist 2.5, vertical face: shade = 1 * (1 - 2.5 * 0.125) = 0.6875
        assert!((col.base_shade - 0.6875).abs() < 1e-3);
    }

    #[test]
    fn walls_past_eight_units_fog_to_black() {
        let cam = Camera::spawn();
        let ray = RayHit {
            dist: 9.0,
            perp: 9.0,
            side: false,
            hit: vec2(3.5 - 9.0, 3.5),
            cell: 1,
            dir: cam.dir,
        };
        let col = ColumnSample::new(cam.pos, &ray);
        let px = col.pixel(&ThemeTextures::fallback(), HALF_H, 1.0);
        assert_eq!(px, 0, "fog should clamp to black");
    }

    #[test]
    fn mirror_parity_is_deterministic_and_flips_the_coordinate() {
        let cam = Camera::spawn();
        let ray = RayHit {
            dist: 2.5,
            perp: 2.5,
            side: true, // y-face: u from hit.x, parity from hit.y
            hit: vec2(5.25, 7.0),
            cell: 1,
            dir: cam.dir,
        };
        let a = ColumnSample::new(cam.pos, &ray);
        let b = ColumnSample::new(cam.pos, &ray);
        assert_eq!(a.tex_u, b.tex_u);

        let raw = (0.25 * TEX_SIZE as f32) as i32;
        let expect = if cell_hash(7) & 1 == 0 {
            TEX_MAX - raw
        } else {
            raw
        };
        assert_eq!(a.tex_u, expect as usize);
    }

    #[test]
    fn floor_row_next_to_camera_is_nearly_unshaded() {
        let (cam, hit) = spawn_hit();
        let col = ColumnSample::new(cam.pos, &hit);
        let theme = ThemeTextures::fallback();
        // Bottom row: floor_dist ≈ 1 → shade ≈ 0.875 over gray 100 ≈ 88.
        let px = col.pixel(&theme, SCREEN_H - 1, 1.0);
        let r = (px >> 16) & 0xFF;
        assert!((86..=90).contains(&r), "got red channel {r}");
    }

    #[test]
    fn rows_partition_into_ceiling_wall_floor() {
        let (cam, hit) = spawn_hit();
        let col = ColumnSample::new(cam.pos, &hit);
        let (start, end) = col.band();
        assert!(start > 0 && (end as usize) < SCREEN_H - 1);
        let theme = ThemeTextures::fallback();
        // All three regions must produce a pixel without panicking.
        col.pixel(&theme, 0, 400.0);
        col.pixel(&theme, HALF_H, 400.0);
        col.pixel(&theme, SCREEN_H - 1, 1.0);
    }
}
