//! Game engine: minifb-based renderer, input, and game loop.
//!
//! Uses an 800×600 pixel framebuffer with 32-bit ARGB pixels. The simulation
//! advances in fixed 60 Hz steps; rendering happens once per frame.

pub mod font;
pub mod paint;
pub mod sound_engine;

use std::time::Instant;

use anyhow::Result;
use minifb::{CursorStyle, Key, KeyRepeat, MouseButton, MouseMode, Window, WindowOptions};

use dispatcher_common::AppConfig;

use crate::game::drag_drop::DragDropState;
use crate::game::leaderboard::Leaderboard;
use crate::game::level::LevelId;
use crate::game::{GameState, Phase};
use sound_engine::SoundEngine;

pub const SCREEN_WIDTH: usize = 800;
pub const SCREEN_HEIGHT: usize = 600;
const FPS: usize = 60;
const WINDOW_TITLE: &str = "Double Coin Dispatcher";

/// Simulation step in milliseconds
pub const STEP_MS: f32 = 1000.0 / 60.0;
/// Steps run at most per frame; the rest of a long stall is dropped
pub const MAX_STEPS_PER_FRAME: u32 = 5;
const VOLUME_STEP: f32 = 0.1;

/// Fixed-timestep accumulator
#[derive(Debug, Default)]
pub struct FixedStep {
    accumulator: f32,
}

impl FixedStep {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `frame_ms` of wall time and return how many steps to run
    pub fn advance(&mut self, frame_ms: f32) -> u32 {
        self.accumulator += frame_ms.max(0.0);
        let mut steps = 0;
        while self.accumulator >= STEP_MS && steps < MAX_STEPS_PER_FRAME {
            self.accumulator -= STEP_MS;
            steps += 1;
        }
        if steps == MAX_STEPS_PER_FRAME && self.accumulator >= STEP_MS {
            tracing::trace!("Dropping {:.1} ms of backlog", self.accumulator);
            self.accumulator %= STEP_MS;
        }
        steps
    }
}

/// Scale the 800x600 framebuffer to any target size using per-axis nearest-
/// neighbor sampling.
fn scale_to_size(src: &[u32], dst: &mut [u32], dst_w: usize, dst_h: usize) {
    for dy in 0..dst_h {
        let sy = (dy * SCREEN_HEIGHT) / dst_h;
        let dst_row = dy * dst_w;
        let src_row = sy * SCREEN_WIDTH;
        for dx in 0..dst_w {
            let sx = (dx * SCREEN_WIDTH) / dst_w;
            dst[dst_row + dx] = src[src_row + sx];
        }
    }
}

/// Map a window-space mouse position to canvas units
fn to_canvas(mouse: (f32, f32), out_w: usize, out_h: usize) -> (f32, f32) {
    let mx = mouse.0 * SCREEN_WIDTH as f32 / out_w.max(1) as f32;
    let my = mouse.1 * SCREEN_HEIGHT as f32 / out_h.max(1) as f32;
    (
        mx.clamp(0.0, SCREEN_WIDTH as f32 - 1.0),
        my.clamp(0.0, SCREEN_HEIGHT as f32 - 1.0),
    )
}

/// Closed hand while dragging, open hand over a truck that can be grabbed
fn cursor_for(game: &GameState, mx: f32, my: f32) -> CursorStyle {
    if game.drag.is_dragging() {
        CursorStyle::ClosedHand
    } else if game.phase == Phase::Playing && DragDropState::truck_at(&game.trucks, mx, my).is_some() {
        CursorStyle::OpenHand
    } else {
        CursorStyle::Arrow
    }
}

/// Run the game engine
pub fn run(config: &AppConfig, leaderboard: Leaderboard) -> Result<()> {
    let level = LevelId::new(config.start_level).unwrap_or_default();
    let mut game = GameState::new(level, leaderboard, config.language);
    let mut sound = SoundEngine::new(config.volume, !config.muted);
    game.muted = sound.as_ref().map_or(true, |s| !s.is_enabled());

    let mut fullscreen = config.fullscreen;
    let scale = config.window_scale.max(1) as usize;
    let mut frame_count: u64 = 0;

    tracing::info!("Engine initialized, entering game loop");
    tracing::info!("Controls: Enter=Start | P/Esc=Pause | 1-3=Level | L=Leaderboard | M=Sound | F11=Fullscreen");

    // Outer loop: window (re)creation on fullscreen toggle
    loop {
        let (win_w, win_h) = if fullscreen {
            (1920usize, 1080usize)
        } else {
            (SCREEN_WIDTH * scale, SCREEN_HEIGHT * scale)
        };

        let options = WindowOptions {
            resize: !fullscreen,
            borderless: fullscreen,
            scale_mode: minifb::ScaleMode::AspectRatioStretch,
            ..Default::default()
        };

        let mut window = Window::new(WINDOW_TITLE, win_w, win_h, options)
            .map_err(|e| anyhow::anyhow!("Window creation failed: {}", e))?;
        window.set_target_fps(FPS);

        // Internal framebuffer at native resolution
        let mut framebuffer = vec![0u32; SCREEN_WIDTH * SCREEN_HEIGHT];

        // Output buffer, sized to match window
        let mut out_w = win_w;
        let mut out_h = win_h;
        let mut scaled_buf = vec![0u32; out_w * out_h];
        let mut toggle_fs = false;
        let mut quit = false;

        let mut clock = FixedStep::new();
        let mut last_frame = Instant::now();

        // Inner loop: game frames
        while window.is_open() {
            // Track window size changes (for resizable windowed mode)
            let (actual_w, actual_h) = window.get_size();
            if actual_w > 0 && actual_h > 0 && (actual_w != out_w || actual_h != out_h) {
                out_w = actual_w;
                out_h = actual_h;
                scaled_buf.resize(out_w * out_h, 0);
            }

            // Mouse → logical 800×600
            let mouse = window.get_mouse_pos(MouseMode::Clamp).unwrap_or((0.0, 0.0));
            let (mx, my) = to_canvas(mouse, out_w, out_h);
            let mouse_down = window.get_mouse_down(MouseButton::Left);

            for key in window.get_keys_pressed(KeyRepeat::No) {
                match key {
                    Key::F11 => toggle_fs = true,
                    Key::M => {
                        if let Some(snd) = sound.as_mut() {
                            game.muted = !snd.toggle();
                        }
                    }
                    Key::Minus | Key::NumPadMinus | Key::Equal | Key::NumPadPlus => {
                        if let Some(snd) = sound.as_mut() {
                            let delta = if matches!(key, Key::Minus | Key::NumPadMinus) {
                                -VOLUME_STEP
                            } else {
                                VOLUME_STEP
                            };
                            snd.set_volume(snd.volume() + delta);
                        }
                    }
                    Key::Q if matches!(game.phase, Phase::Menu | Phase::GameOver) => quit = true,
                    _ => game.on_key_down(key),
                }
            }
            if toggle_fs || quit {
                break;
            }

            game.on_mouse_state(mx, my, mouse_down);
            window.set_cursor_style(cursor_for(&game, mx, my));

            // Fixed-step simulation
            let now = Instant::now();
            let frame_ms = now.duration_since(last_frame).as_secs_f32() * 1000.0;
            last_frame = now;
            for _ in 0..clock.advance(frame_ms) {
                game.update(STEP_MS);
            }

            // Sound cues raised this frame
            let cues = game.drain_sfx();
            if let Some(snd) = sound.as_mut() {
                for sfx in cues {
                    snd.play(sfx);
                }
                if frame_count % FPS as u64 == 0 {
                    snd.gc();
                }
            }

            // Render
            game.draw_world(&mut framebuffer);
            game.draw_ui(&mut framebuffer);

            // Update window title
            frame_count += 1;
            if frame_count % 30 == 0 {
                window.set_title(&format!("{} – {}", WINDOW_TITLE, game.status_line()));
            }

            // Scale to output size and present
            scale_to_size(&framebuffer, &mut scaled_buf, out_w, out_h);
            window
                .update_with_buffer(&scaled_buf, out_w, out_h)
                .map_err(|e| anyhow::anyhow!("Display error: {}", e))?;
        }

        if toggle_fs {
            fullscreen = !fullscreen;
            tracing::info!(
                "Fullscreen → {}",
                if fullscreen { "ON (1920×1080)" } else { "OFF" }
            );
            continue;
        }

        if quit {
            tracing::info!("Quit from {:?}", game.phase);
        }
        break; // Window was closed
    }

    if let Some(snd) = sound.as_mut() {
        snd.stop_all();
    }
    tracing::info!("Engine shutdown");
    Ok(())
}
