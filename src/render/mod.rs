//! Frame production: ray casting, shading, strips, compositing.
//!
//! One tick renders a full 640×480 frame from an immutable snapshot of the
//! world (grid + floor table + theme + camera). Strips are pure functions
//! of that snapshot, so they run in parallel with no locking.

pub mod raycast;
pub mod sampler;
pub mod strip;

/// Output resolution, fixed.
pub const SCREEN_W: usize = 640;
pub const SCREEN_H: usize = 480;
/// Horizon row.
pub const HALF_H: usize = SCREEN_H / 2;

/// Pixel format of the frame buffer (0x00RRGGBB), matching what minifb
/// consumes directly.
pub type Rgba = u32;

#[inline]
pub fn pack_rgb(r: u8, g: u8, b: u8) -> Rgba {
    (b as u32) | ((g as u32) << 8) | ((r as u32) << 16)
}

/// One finished 640×480 frame, row-major. Produced fresh each tick; the
/// previous frame is only ever replaced wholesale, never patched.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    pixels: Vec<Rgba>,
}

impl Frame {
    /// Dark-gray idle frame shown before the first render.
    pub fn idle() -> Self {
        Self {
            pixels: vec![pack_rgb(0x20, 0x20, 0x20); SCREEN_W * SCREEN_H],
        }
    }

    pub(crate) fn from_pixels(pixels: Vec<Rgba>) -> Self {
        debug_assert_eq!(pixels.len(), SCREEN_W * SCREEN_H);
        Self { pixels }
    }

    /// Packed pixels for the display layer (`&[u32]`, row-major).
    #[inline]
    pub fn pixels(&self) -> &[Rgba] {
        &self.pixels
    }

    /// 3-bytes-per-pixel RGB copy for consumers that want raw bytes.
    pub fn as_rgb_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.pixels.len() * 3);
        for px in &self.pixels {
            out.push((px >> 16) as u8);
            out.push((px >> 8) as u8);
            out.push(*px as u8);
        }
        out
    }
}

/*====================================================================*/
/*                               Tests                                 */
/*====================================================================*/
