//! gridcast — a 640×480 textured grid raycaster.
//!
//! The crate is split along the data flow of one tick:
//!
//! * [`world`]  – static map grid, floor-distance table, camera state,
//!   texture storage.
//! * [`assets`] – texture decoding and theme loading (gray fallback on
//!   missing files).
//! * [`sim`]    – per-tick input intent and the axis-separated movement
//!   validator.
//! * [`render`] – ray casting, texture/shading sampling, parallel strip
//!   rendering and frame compositing.
//! * [`engine`] – the tick loop state machine tying it all together.
//!
//! The binary (`src/main.rs`) owns the window and raw key events; nothing
//! in the library touches the display.

pub mod assets;
pub mod engine;
pub mod render;
pub mod sim;
pub mod world;

pub use engine::{Engine, LoopState, TickOutcome};
pub use world::camera::Camera;
pub use world::grid::MapGrid;
