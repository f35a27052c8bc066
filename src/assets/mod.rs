//! Theme loading: PPM files → normalised 512×512 textures.
//!
//! A missing or unreadable texture file is never fatal — it logs a warning
//! and substitutes the neutral-gray fallback, so a tick can always render.

pub mod ppm;

use std::path::Path;

use log::{info, warn};

use crate::world::texture::{TEX_SIZE, Texture, Theme, ThemeTextures};
use ppm::Image;

/// Brightness factor applied to every texel at load time.
const TEXTURE_INTENSITY: f32 = 1.2;

/// File names for the four resources of one theme.
pub struct ThemeSpec {
    pub name: &'static str,
    wall_a: &'static str,
    wall_b: &'static str,
    floor: &'static str,
    ceiling: &'static str,
}

/// Built-in themes, in cycling order.
pub static THEME_MANIFEST: &[ThemeSpec] = &[
    ThemeSpec {
        name: "classic",
        wall_a: "texture20.ppm",
        wall_b: "texture20.ppm",
        floor: "texture28.ppm",
        ceiling: "texture38.ppm",
    },
    ThemeSpec {
        name: "dungeon",
        wall_a: "texture41.ppm",
        wall_b: "texture41.ppm",
        floor: "texture40.ppm",
        ceiling: "texture39.ppm",
    },
];

/// Load every built-in theme from `dir`. Infallible by design: each
/// resource falls back to gray on its own.
pub fn load_themes(dir: &Path) -> Vec<Theme> {
    THEME_MANIFEST
        .iter()
        .map(|spec| load_theme(dir, spec))
        .collect()
}

pub fn load_theme(dir: &Path, spec: &ThemeSpec) -> Theme {
    info!("loading theme `{}` from {}", spec.name, dir.display());
    Theme {
        name: spec.name.to_string(),
        tex: ThemeTextures {
            wall_a: load_resource(dir, spec.wall_a),
            wall_b: load_resource(dir, spec.wall_b),
            floor: load_resource(dir, spec.floor),
            ceiling: load_resource(dir, spec.ceiling),
        },
    }
}

fn load_resource(dir: &Path, file: &str) -> Texture {
    let path = dir.join(file);
    match ppm::load(&path) {
        Ok(img) => normalise(img),
        Err(e) => {
            warn!("texture `{}` unusable ({e}), using gray fallback", path.display());
            Texture::neutral_gray()
        }
    }
}

/// Nearest-neighbour resample to `TEX_SIZE`² and apply the intensity
/// factor, clamped per channel.
fn normalise(img: Image) -> Texture {
    let mut pixels = Vec::with_capacity(TEX_SIZE * TEX_SIZE);
    for v in 0..TEX_SIZE {
        let sy = v * img.h / TEX_SIZE;
        for u in 0..TEX_SIZE {
            let sx = u * img.w / TEX_SIZE;
            let src = img.pixels[sy * img.w + sx];
            pixels.push(src.map(brighten));
        }
    }
    Texture::new(TEX_SIZE, pixels).expect("normalise produced TEX_SIZE² pixels")
}

#[inline]
fn brighten(c: u8) -> u8 {
    (c as f32 * TEXTURE_INTENSITY).clamp(0.0, 255.0) as u8
}

/*====================================================================*/
/*                               Tests                                 */
/*====================================================================*/
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_gray_fallback() {
        let dir = tempfile::tempdir().unwrap();
        let tex = load_resource(dir.path(), "nope.ppm");
        assert!(tex.is_fallback());
    }

    #[test]
    fn theme_survives_an_empty_directory() {
        let dir = tempfile::tempdir().unwrap();
        let theme = load_theme(dir.path(), &THEME_MANIFEST[0]);
        assert_eq!(theme.name, "classic");
        assert!(theme.tex.wall_a.is_fallback());
        assert!(theme.tex.ceiling.is_fallback());
    }

    #[test]
    fn resample_scales_up_with_intensity() {
        // 2×2 source: quadrant colours must survive the upscale.
        let img = Image {
            w: 2,
            h: 2,
            pixels: vec![[100, 0, 0], [0, 100, 0], [0, 0, 100], [50, 50, 50]],
        };
        let tex = normalise(img);
        assert_eq!(tex.size(), TEX_SIZE);
        // 100 * 1.2 = 120
        assert_eq!(tex.texel(0, 0), [120, 0, 0]);
        assert_eq!(tex.texel(TEX_SIZE - 1, 0), [0, 120, 0]);
        assert_eq!(tex.texel(0, TEX_SIZE - 1), [0, 0, 120]);
        assert_eq!(tex.texel(TEX_SIZE - 1, TEX_SIZE - 1), [60, 60, 60]);
    }

    #[test]
    fn intensity_clamps_at_white() {
        assert_eq!(brighten(255), 255);
        assert_eq!(brighten(0), 0);
    }

    #[test]
    fn loads_a_real_theme_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let mut data = b"P6\n1 1\n255\n".to_vec();
        data.extend_from_slice(&[10, 20, 30]);
        for spec in THEME_MANIFEST {
            for file in [spec.wall_a, spec.wall_b, spec.floor, spec.ceiling] {
                std::fs::write(dir.path().join(file), &data).unwrap();
            }
        }

        let themes = load_themes(dir.path());
        assert_eq!(themes.len(), 2);
        assert!(!themes[0].tex.wall_a.is_fallback());
        assert_eq!(themes[0].tex.floor.texel(100, 100), [12, 24, 36]);
    }
}
