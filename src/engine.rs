//! The tick loop: input → movement validation → parallel render →
//! composite → present.
//!
//! At most one tick is ever in flight; the camera snapshot handed to the
//! strip tasks is taken *after* the validator runs and nothing mutates
//! state until the join barrier has passed, so the strips see a frozen
//! world. A dropped frame keeps the previous one on screen.

use std::time::{Duration, Instant};

use log::{debug, info, warn};

use crate::render::strip::{self, Scene, StripOutput};
use crate::render::{Frame, SCREEN_H};
use crate::sim::{InputIntent, MOVE_SPEED, ROT_SPEED, validate_move};
use crate::world::{Camera, FloorDistanceTable, MapGrid, Theme};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopState {
    /// Idle frame shown, waiting for the first input.
    Splash,
    /// Steady tick loop.
    Running,
    /// Terminal; ticks are ignored.
    Stopped,
}

/// What one call to [`Engine::tick`] did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// Nothing requested (or not running) — no work done.
    Idle,
    /// A fresh frame was composited and is ready to display.
    Rendered,
    /// Rendering failed; the previous frame is still current.
    Dropped,
}

/// Per-tick latencies for diagnostics.
#[derive(Clone, Copy, Debug, Default)]
pub struct TickStats {
    pub validate: Duration,
    pub render: Duration,
}

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("strip count {0} does not evenly divide {SCREEN_H} rows")]
    BadStripCount(usize),

    #[error("at least one theme is required")]
    NoThemes,
}

/// Owns all world state and drives one tick at a time.
#[derive(Clone, Debug)]
pub struct Engine {
    grid: MapGrid,
    table: FloorDistanceTable,
    themes: Vec<Theme>,
    active_theme: usize,
    camera: Camera,
    bands: usize,
    frame: Frame,
    state: LoopState,
    stats: TickStats,
    frame_id: u64,
}

impl Engine {
    pub fn new(grid: MapGrid, themes: Vec<Theme>, bands: usize) -> Result<Self, EngineError> {
        if bands == 0 || SCREEN_H % bands != 0 {
            return Err(EngineError::BadStripCount(bands));
        }
        if themes.is_empty() {
            return Err(EngineError::NoThemes);
        }
        Ok(Self {
            grid,
            table: FloorDistanceTable::new(),
            themes,
            active_theme: 0,
            camera: Camera::spawn(),
            bands,
            frame: Frame::idle(),
            state: LoopState::Splash,
            stats: TickStats::default(),
            frame_id: 0,
        })
    }

    /*──────────────────────── accessors ───────────────────────────*/

    pub fn state(&self) -> LoopState {
        self.state
    }

    /// The most recently composited (or retained) frame.
    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    pub fn camera(&self) -> Camera {
        self.camera
    }

    pub fn stats(&self) -> TickStats {
        self.stats
    }

    pub fn theme_name(&self) -> &str {
        &self.themes[self.active_theme].name
    }

    pub fn frame_id(&self) -> u64 {
        self.frame_id
    }

    /*──────────────────────── state transitions ───────────────────*/

    /// First input event: leave the splash screen and render the initial
    /// view so a frame exists before any movement.
    pub fn start(&mut self) {
        if self.state != LoopState::Splash {
            return;
        }
        self.state = LoopState::Running;
        info!("starting run, theme `{}`", self.theme_name());
        self.render_current();
    }

    pub fn stop(&mut self) {
        self.state = LoopState::Stopped;
    }

    /// Select a starting theme by name before the run begins.
    pub fn select_theme(&mut self, name: &str) -> bool {
        match self.themes.iter().position(|t| t.name == name) {
            Some(idx) => {
                self.active_theme = idx;
                true
            }
            None => false,
        }
    }

    /// Cycle to the next theme and re-render immediately with the
    /// unchanged camera — a theme switch never touches geometry.
    pub fn switch_theme(&mut self) {
        self.active_theme = (self.active_theme + 1) % self.themes.len();
        info!("switched to theme `{}`", self.theme_name());
        if self.state == LoopState::Running {
            self.render_current();
        }
    }

    /*──────────────────────── the tick ────────────────────────────*/

    /// Run one tick: apply `intent`, validate the move, render all strips
    /// and composite. A no-op intent skips everything.
    pub fn tick(&mut self, intent: InputIntent) -> TickOutcome {
        if self.state != LoopState::Running || intent.is_noop() {
            return TickOutcome::Idle;
        }

        let t0 = Instant::now();
        if intent.turn_left {
            self.camera.rotate(ROT_SPEED);
        }
        if intent.turn_right {
            self.camera.rotate(-ROT_SPEED);
        }

        let mut target = self.camera.pos;
        if intent.forward {
            target += self.camera.dir * MOVE_SPEED;
        }
        if intent.backward {
            target -= self.camera.dir * MOVE_SPEED;
        }
        self.camera.pos = validate_move(&self.grid, self.camera.pos, target);
        self.stats.validate = t0.elapsed();

        let t1 = Instant::now();
        let ok = self.render_current();
        self.stats.render = t1.elapsed();
        debug!(
            "tick {}: validate {:?}, render {:?}",
            self.frame_id, self.stats.validate, self.stats.render
        );

        if ok {
            TickOutcome::Rendered
        } else {
            TickOutcome::Dropped
        }
    }

    fn render_current(&mut self) -> bool {
        let scene = Scene {
            grid: &self.grid,
            table: &self.table,
            theme: &self.themes[self.active_theme].tex,
            camera: self.camera, // snapshot; strips never see later mutation
        };
        let strips = strip::render_strips(&scene, self.bands);
        self.apply_strips(&strips)
    }

    /// Install a composited frame, or keep the previous one when any strip
    /// came back short. Never panics into the caller.
    fn apply_strips(&mut self, strips: &[StripOutput]) -> bool {
        match strip::composite(strips, self.bands) {
            Ok(frame) => {
                self.frame = frame;
                self.frame_id += 1;
                true
            }
            Err(e) => {
                warn!("frame dropped: {e}");
                false
            }
        }
    }
}

/*====================================================================*/
/*                               Tests                                 */
/*====================================================================*/
