//! CPU-side texture storage.
//!
//! The renderer only ever samples square RGB grids; decoding file formats
//! and resampling is the asset loader's job (`crate::assets`).

use once_cell::sync::Lazy;

/// Side length every theme texture is normalised to.
pub const TEX_SIZE: usize = 512;
/// Highest valid texel coordinate, `TEX_SIZE - 1`.
pub const TEX_MAX: i32 = TEX_SIZE as i32 - 1;

/// Channel values of the neutral-gray fallback texture.
const FALLBACK_GRAY: [u8; 3] = [100, 100, 100];

/// Things that can go wrong when constructing a texture.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TextureError {
    #[error("texture is {len} pixels, expected {size}x{size}")]
    BadDimensions { len: usize, size: usize },
}

/// A square grid of RGB triples, row-major.
#[derive(Clone, Debug, PartialEq)]
pub struct Texture {
    size: usize,
    pixels: Vec<[u8; 3]>,
}

static FALLBACK: Lazy<Texture> = Lazy::new(|| Texture {
    size: TEX_SIZE,
    pixels: vec![FALLBACK_GRAY; TEX_SIZE * TEX_SIZE],
});

impl Texture {
    /// Wrap a row-major pixel grid; `pixels.len()` must be `size * size`.
    pub fn new(size: usize, pixels: Vec<[u8; 3]>) -> Result<Self, TextureError> {
        if pixels.len() != size * size {
            return Err(TextureError::BadDimensions {
                len: pixels.len(),
                size,
            });
        }
        Ok(Self { size, pixels })
    }

    /// The uniform neutral-gray substitute used when a texture file is
    /// missing or unreadable.
    pub fn neutral_gray() -> Self {
        FALLBACK.clone()
    }

    pub fn is_fallback(&self) -> bool {
        *self == *FALLBACK
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Texel at `(u, v)`. Callers keep coordinates in range; debug builds
    /// assert it.
    #[inline]
    pub fn texel(&self, u: usize, v: usize) -> [u8; 3] {
        debug_assert!(u < self.size && v < self.size);
        self.pixels[v * self.size + u]
    }
}

/// The four texture resources one theme provides.
#[derive(Clone, Debug)]
pub struct ThemeTextures {
    pub wall_a: Texture,
    pub wall_b: Texture,
    pub floor: Texture,
    pub ceiling: Texture,
}

impl ThemeTextures {
    /// All four slots gray — a theme that always renders, never fails.
    pub fn fallback() -> Self {
        let gray = Texture::neutral_gray();
        Self {
            wall_a: gray.clone(),
            wall_b: gray.clone(),
            floor: gray.clone(),
            ceiling: gray,
        }
    }
}

/// A named, swappable texture set. Switching themes replaces the whole set
/// at once; geometry is untouched.
#[derive(Clone, Debug)]
pub struct Theme {
    pub name: String,
    pub tex: ThemeTextures,
}

/*====================================================================*/
/*                               Tests                                 */
/*====================================================================*/
