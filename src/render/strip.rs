//! Parallel strip rendering and frame compositing.
//!
//! The frame is split into N contiguous horizontal bands. Every strip is a
//! pure function of an immutable [`Scene`] snapshot: it recomputes all 640
//! column rays locally and writes only its own buffer, so the fan-out
//! needs no locks — just the rayon join at `collect`. Band order in the
//! output is by index, never by completion order.

use glam::Vec2;
use rayon::prelude::*;

use crate::render::raycast::{MAX_VIEW_DIST, cast_column};
use crate::render::sampler::ColumnSample;
use crate::render::{Frame, Rgba, SCREEN_H, SCREEN_W};
use crate::world::{Camera, FloorDistanceTable, MapGrid, ThemeTextures};

/// Read-only snapshot a tick hands to every strip task.
#[derive(Clone, Copy)]
pub struct Scene<'a> {
    pub grid: &'a MapGrid,
    pub table: &'a FloorDistanceTable,
    pub theme: &'a ThemeTextures,
    pub camera: Camera,
}

/// One band's result: the pixels plus the camera position they were
/// computed from, echoed back for consistency checking.
#[derive(Clone, Debug)]
pub struct StripOutput {
    pub pos: Vec2,
    pub pixels: Vec<Rgba>,
}

/// A frame that cannot be assembled is dropped whole; no partial frame is
/// ever displayed.
#[derive(Debug, thiserror::Error)]
pub enum CompositeError {
    #[error("expected {want} strips, got {got}")]
    MissingStrips { got: usize, want: usize },

    #[error("strip {band} returned {got} pixels, expected {want}")]
    ShortStrip {
        band: usize,
        got: usize,
        want: usize,
    },
}

/// Render band `band` of `bands` (rows `band * H/bands ..` exclusive end).
pub fn render_strip(scene: &Scene, band: usize, bands: usize) -> StripOutput {
    let band_h = SCREEN_H / bands;
    let y_start = band * band_h;

    // Per-column ray and shading state, shared by every row of the band.
    let columns: Vec<ColumnSample> = (0..SCREEN_W)
        .map(|x| {
            let ray = cast_column(scene.grid, &scene.camera, x, SCREEN_W, MAX_VIEW_DIST);
            ColumnSample::new(scene.camera.pos, &ray)
        })
        .collect();

    let mut pixels = Vec::with_capacity(SCREEN_W * band_h);
    for y in y_start..y_start + band_h {
        let floor_dist = scene.table.at(y);
        for column in &columns {
            pixels.push(column.pixel(scene.theme, y, floor_dist));
        }
    }

    StripOutput {
        pos: scene.camera.pos,
        pixels,
    }
}

/// Fan out one strip task per band and join. Output is ordered by band
/// index regardless of which task finished first.
pub fn render_strips(scene: &Scene, bands: usize) -> Vec<StripOutput> {
    (0..bands)
        .into_par_iter()
        .map(|band| render_strip(scene, band, bands))
        .collect()
}

/// Concatenate strip buffers, ascending band order, into one frame.
pub fn composite(strips: &[StripOutput], bands: usize) -> Result<Frame, CompositeError> {
    if strips.len() != bands {
        return Err(CompositeError::MissingStrips {
            got: strips.len(),
            want: bands,
        });
    }

    let band_len = SCREEN_W * (SCREEN_H / bands);
    let mut pixels = Vec::with_capacity(SCREEN_W * SCREEN_H);
    for (band, strip) in strips.iter().enumerate() {
        if strip.pixels.len() != band_len {
            return Err(CompositeError::ShortStrip {
                band,
                got: strip.pixels.len(),
                want: band_len,
            });
        }
        pixels.extend_from_slice(&strip.pixels);
    }
    Ok(Frame::from_pixels(pixels))
}

/*====================================================================*/
/*                               Tests                                 */
/*====================================================================*/
