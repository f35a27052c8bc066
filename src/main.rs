//! Windowed front end: owns the minifb window and raw key events, feeds
//! one `InputIntent` per frame to the engine.
//!
//! ```bash
//! cargo run --release -- --textures ./textures --strips 4
//! ```

use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Parser;
use log::{LevelFilter, info, warn};
use minifb::{Key, KeyRepeat, Window, WindowOptions};
use simplelog::{ColorChoice, ConfigBuilder, TermLogger, TerminalMode};

use gridcast::assets::load_themes;
use gridcast::engine::{Engine, LoopState, TickOutcome};
use gridcast::render::{SCREEN_H, SCREEN_W};
use gridcast::sim::InputIntent;
use gridcast::world::MapGrid;

#[derive(Parser)]
#[command(version, about = "Textured grid raycaster")]
struct Args {
    /// Directory holding the theme PPM files.
    #[arg(long, default_value = "textures")]
    textures: PathBuf,

    /// Number of horizontal render strips (must evenly divide 480).
    #[arg(long, default_value_t = 4)]
    strips: usize,

    /// Starting theme name.
    #[arg(long, default_value = "classic")]
    theme: String,

    /// Log at debug level (per-tick latencies).
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let level = if args.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    TermLogger::init(
        level,
        ConfigBuilder::new()
            .set_time_level(LevelFilter::Off)
            .build(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )?;

    let themes = load_themes(&args.textures);
    let mut engine = Engine::new(MapGrid::house(), themes, args.strips)?;
    if !engine.select_theme(&args.theme) {
        warn!("unknown theme `{}`, using `{}`", args.theme, engine.theme_name());
    }

    let mut win = Window::new("gridcast", SCREEN_W, SCREEN_H, WindowOptions::default())?;
    win.set_target_fps(60);

    // ────────────────── latency reporting state ─────────────────────────
    let mut acc_time = Duration::ZERO;
    let mut acc_frames = 0usize;
    let mut last_print = Instant::now();

    while win.is_open() && !win.is_key_down(Key::Escape) {
        let t0 = Instant::now();

        match engine.state() {
            LoopState::Splash => {
                // Any key leaves the splash screen.
                if !win.get_keys().is_empty() {
                    engine.start();
                }
            }
            LoopState::Running => {
                if win.is_key_pressed(Key::T, KeyRepeat::No) {
                    engine.switch_theme();
                }

                let intent = InputIntent {
                    forward: win.is_key_down(Key::Up) || win.is_key_down(Key::W),
                    backward: win.is_key_down(Key::Down) || win.is_key_down(Key::S),
                    turn_left: win.is_key_down(Key::Left) || win.is_key_down(Key::A),
                    turn_right: win.is_key_down(Key::Right) || win.is_key_down(Key::D),
                };

                if engine.tick(intent) != TickOutcome::Idle {
                    acc_time += t0.elapsed();
                    acc_frames += 1;
                }
            }
            LoopState::Stopped => break,
        }

        let frame = engine.frame();
        win.update_with_buffer(frame.pixels(), SCREEN_W, SCREEN_H)?;

        if last_print.elapsed() >= Duration::from_secs(3) && acc_frames > 0 {
            let avg_ms = acc_time.as_secs_f64() * 1000.0 / acc_frames as f64;
            let stats = engine.stats();
            info!(
                "avg tick: {avg_ms:.2} ms over {acc_frames} frames (last validate {:?}, render {:?})",
                stats.validate, stats.render
            );
            acc_time = Duration::ZERO;
            acc_frames = 0;
            last_print = Instant::now();
        }
    }

    engine.stop();
    Ok(())
}
