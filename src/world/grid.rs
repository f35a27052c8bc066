//! Static world data: the cell grid and the floor-distance table.
//!
//! Both are built once at startup and never mutated afterwards; every
//! strip task reads them concurrently without locking.

use crate::render::{HALF_H, SCREEN_H};

/// Map width/height in cells. The default layout keeps a solid perimeter so
/// a ray bounded to [`crate::render::raycast::MAX_VIEW_DIST`] can never
/// leave the grid without crossing a wall first.
pub const MAP_W: usize = 15;
pub const MAP_H: usize = 15;

/// Fixed rectangular cell grid.
///
/// `0` = passable, anything else = wall; the value `2` selects the second
/// wall texture (`wall_b`), every other non-zero value the first.
#[derive(Clone, Debug)]
pub struct MapGrid {
    cells: [u8; MAP_W * MAP_H],
}

impl MapGrid {
    pub fn from_cells(cells: [u8; MAP_W * MAP_H]) -> Self {
        Self { cells }
    }

    /// The built-in "house" layout: perimeter walls, a few interior rooms,
    /// accent pillars in the second wall texture.
    pub fn house() -> Self {
        #[rustfmt::skip]
        const HOUSE: [u8; MAP_W * MAP_H] = [
            1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,
            1,0,0,0,0,0,0,0,0,0,0,0,0,0,1,
            1,0,0,0,0,0,0,0,0,0,0,0,0,0,1,
            1,0,0,0,0,0,0,0,0,0,0,2,0,0,1,
            1,0,0,0,0,0,0,0,0,0,0,0,0,0,1,
            1,0,0,0,0,1,1,0,1,1,0,0,0,0,1,
            1,0,0,0,0,1,0,0,0,1,0,0,0,0,1,
            1,0,0,0,0,0,0,0,0,0,0,0,0,0,1,
            1,0,0,0,0,1,0,0,0,1,0,0,0,0,1,
            1,0,0,0,0,1,1,0,1,1,0,0,0,0,1,
            1,0,0,0,0,0,0,0,0,0,0,0,0,0,1,
            1,0,0,2,0,0,0,0,0,0,0,2,0,0,1,
            1,0,0,0,0,0,0,0,0,0,0,0,0,0,1,
            1,0,0,0,0,0,0,0,0,0,0,0,0,0,1,
            1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,
        ];
        Self { cells: HOUSE }
    }

    /// Cell value at `(col, row)`, clamped to the grid edge.
    ///
    /// The ray march is bounded, but floating-point noise can ask for a
    /// coordinate one past the perimeter; clamping returns the perimeter
    /// wall, which is what the march would have hit anyway.
    #[inline]
    pub fn cell(&self, col: i32, row: i32) -> u8 {
        let c = col.clamp(0, MAP_W as i32 - 1) as usize;
        let r = row.clamp(0, MAP_H as i32 - 1) as usize;
        self.cells[r * MAP_W + c]
    }

    #[inline]
    pub fn is_wall(&self, col: i32, row: i32) -> bool {
        self.cell(col, row) > 0
    }
}

/// Per-row world distance from the camera to the floor plane, mirrored
/// about the horizon so floor and ceiling share one falloff curve.
///
/// Index by *screen row*; rows above the horizon are redirected to the
/// mirrored row `SCREEN_H - 1 - y` internally.
#[derive(Clone, Debug)]
pub struct FloorDistanceTable {
    dist: Vec<f32>, // indexed by distance-from-horizon, 0..HALF_H
}

impl FloorDistanceTable {
    pub fn new() -> Self {
        // Perspective projection of the floor plane: a point `p` rows below
        // the horizon lies at world distance HALF_H / p. The half-pixel
        // offset keeps the horizon row itself finite (the shade curve
        // clamps it to black long before the value matters).
        let dist = (0..HALF_H)
            .map(|p| HALF_H as f32 / (p as f32 + 0.5))
            .collect();
        Self { dist }
    }

    /// Floor (or ceiling) distance for screen row `y`.
    #[inline]
    pub fn at(&self, y: usize) -> f32 {
        let mirrored = if y < HALF_H { SCREEN_H - 1 - y } else { y };
        self.dist[mirrored - HALF_H]
    }
}

impl Default for FloorDistanceTable {
    fn default() -> Self {
        Self::new()
    }
}

/*====================================================================*/
/*                               Tests                                 */
/*====================================================================*/
