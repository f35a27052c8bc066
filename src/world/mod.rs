pub mod camera;
pub mod grid;
pub mod texture;

pub use camera::Camera;
pub use grid::{FloorDistanceTable, MapGrid};
pub use texture::{Texture, Theme, ThemeTextures};
