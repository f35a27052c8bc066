//! Axis-separated collision clamp.
//!
//! A rejected axis is silently dropped rather than failing the whole move,
//! which is what produces wall-sliding: a diagonal push against a wall
//! keeps the component along the open axis.

use glam::{Vec2, vec2};

use crate::world::MapGrid;

/// Look-ahead distance in front of the attempted movement, in world units.
/// Keeps the camera a fixed margin away from wall faces.
pub const WALL_PROBE: f32 = 0.2;

/// Resolve an attempted move from `old` to `target` against the grid.
///
/// The x axis is checked first against the *old* row; the y axis is then
/// checked against the **resolved** x column. This order is a deliberate
/// tie-break — swapping it changes which way the camera slides along a
/// corner, so it must stay exactly as is.
pub fn validate_move(grid: &MapGrid, old: Vec2, target: Vec2) -> Vec2 {
    let valid_x = if grid.is_wall(
        (target.x + probe_offset(target.x, old.x)).floor() as i32,
        old.y.floor() as i32,
    ) {
        old.x
    } else {
        target.x
    };

    let valid_y = if grid.is_wall(
        valid_x.floor() as i32,
        (target.y + probe_offset(target.y, old.y)).floor() as i32,
    ) {
        old.y
    } else {
        target.y
    };

    vec2(valid_x, valid_y)
}

/// Probe in the direction of travel; a zero-displacement axis probes
/// backwards (matches the original `try > old` comparison).
#[inline]
fn probe_offset(target: f32, old: f32) -> f32 {
    if target > old { WALL_PROBE } else { -WALL_PROBE }
}

/*====================================================================*/
/*                               Tests                                 */
/*====================================================================*/
