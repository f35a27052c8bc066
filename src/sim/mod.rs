//! Per-tick simulation: input intent and the movement validator.

mod movement;

pub use movement::{WALL_PROBE, validate_move};

/// Forward/backward displacement per tick, in world units.
pub const MOVE_SPEED: f32 = 0.3;
/// Turn angle per tick, in radians.
pub const ROT_SPEED: f32 = 0.15;

/// One frame's requested movement, already translated from raw key codes
/// by the input boundary. Consumed once, then discarded.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputIntent {
    pub forward: bool,
    pub backward: bool,
    pub turn_left: bool,
    pub turn_right: bool,
}

impl InputIntent {
    /// True when the tick requests nothing; the engine skips all validator
    /// and render work for a no-op intent.
    #[inline]
    pub fn is_noop(&self) -> bool {
        *self == Self::default()
    }
}
