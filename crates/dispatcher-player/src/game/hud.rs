//! HUD and overlays: score strip, menu, pause, game over, leaderboard panel

use crate::engine::font;
use crate::engine::paint::{self, Rect};
use crate::engine::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::game::i18n::t;
use crate::game::render::ACCENT_COLOR;
use crate::game::{GameState, Phase};

const TEXT_COLOR: u32 = 0xFFFFFFFF;
const DIM_COLOR: u32 = 0xFFBDC3C7;
const WARN_COLOR: u32 = 0xFFE74C3C;
const PANEL_COLOR: u32 = 0xFF1A252F;
const OVERLAY_OPACITY: f32 = 0.7;
/// Clock turns red below this many seconds
const LOW_TIME_S: u32 = 10;

const CENTER_X: f32 = SCREEN_WIDTH as f32 / 2.0;
const CENTER_Y: f32 = SCREEN_HEIGHT as f32 / 2.0;

impl GameState {
    /// Draw the HUD and whatever overlay the current phase needs
    pub fn draw_ui(&self, fb: &mut [u32]) {
        self.draw_hud(fb);

        match self.phase {
            Phase::Menu => self.draw_menu(fb),
            Phase::Paused => self.draw_pause(fb),
            Phase::GameOver => self.draw_game_over(fb),
            Phase::Playing => {}
        }

        if self.show_leaderboard && self.phase != Phase::Playing {
            self.draw_leaderboard(fb);
        }
    }

    /// The (label, value) pairs shown in the top strip
    pub fn hud_fields(&self) -> [(&'static str, String); 4] {
        let lang = self.language;
        [
            (t(lang, "hud_score"), self.score.to_string()),
            (t(lang, "hud_time"), self.time_left.to_string()),
            (t(lang, "hud_level"), self.level.to_string()),
            (t(lang, "hud_best"), self.leaderboard.best().unwrap_or(0).to_string()),
        ]
    }

    fn draw_hud(&self, fb: &mut [u32]) {
        let slot = SCREEN_WIDTH as i32 / 4;
        for (i, (label, value)) in self.hud_fields().iter().enumerate() {
            let x = 10 + i as i32 * slot;
            let color = if i == 1 && self.phase == Phase::Playing && self.time_left <= LOW_TIME_S {
                WARN_COLOR
            } else {
                TEXT_COLOR
            };
            font::draw_text_shadow(fb, x, 10, &format!("{} {}", label, value), color, 2);
        }

        if self.muted {
            let text = t(self.language, "sound_off");
            let x = SCREEN_WIDTH as i32 - 10 - font::text_width(text, 1);
            font::draw_text(fb, x, SCREEN_HEIGHT as i32 - 16, text, DIM_COLOR, 1);
        }
    }

    fn draw_menu(&self, fb: &mut [u32]) {
        paint::shade(fb, OVERLAY_OPACITY);
        let lang = self.language;
        font::draw_text_centered(fb, CENTER_X, CENTER_Y, t(lang, "menu_title"), ACCENT_COLOR, 5);
        font::draw_text_centered(fb, CENTER_X, CENTER_Y + 50.0, t(lang, "menu_hint"), TEXT_COLOR, 2);
        let level = format!("{} {}", t(lang, "hud_level"), self.level);
        font::draw_text_centered(fb, CENTER_X, CENTER_Y + 85.0, &level, DIM_COLOR, 2);
        font::draw_text_centered(fb, CENTER_X, CENTER_Y + 120.0, t(lang, "menu_keys"), DIM_COLOR, 1);
    }

    fn draw_pause(&self, fb: &mut [u32]) {
        paint::shade(fb, OVERLAY_OPACITY);
        font::draw_text_centered(fb, CENTER_X, CENTER_Y, t(self.language, "paused"), ACCENT_COLOR, 5);
        font::draw_text_centered(fb, CENTER_X, CENTER_Y + 50.0, t(self.language, "pause_hint"), TEXT_COLOR, 2);
    }

    fn draw_game_over(&self, fb: &mut [u32]) {
        paint::shade(fb, OVERLAY_OPACITY);
        let lang = self.language;
        font::draw_text_centered(fb, CENTER_X, CENTER_Y - 100.0, t(lang, "game_over"), ACCENT_COLOR, 5);

        let score = format!("{}: {}", t(lang, "final_score"), self.score);
        font::draw_text_centered(fb, CENTER_X, CENTER_Y - 30.0, &score, TEXT_COLOR, 3);
        let combo = format!("{}: {}", t(lang, "best_combo"), self.max_combo);
        font::draw_text_centered(fb, CENTER_X, CENTER_Y + 10.0, &combo, TEXT_COLOR, 2);

        if let Some(rank) = self.last_rank {
            let text = format!("{}: #{}", t(lang, "new_rank"), rank);
            font::draw_text_centered(fb, CENTER_X, CENTER_Y + 40.0, &text, ACCENT_COLOR, 2);
        }
        font::draw_text_centered(fb, CENTER_X, CENTER_Y + 100.0, t(lang, "again_hint"), DIM_COLOR, 2);
    }

    fn draw_leaderboard(&self, fb: &mut [u32]) {
        let panel = Rect::new(CENTER_X - 260.0, CENTER_Y - 190.0, 520.0, 380.0);
        paint::fill_rect(fb, panel, PANEL_COLOR, 240);
        paint::stroke_rect(fb, panel, 3.0, ACCENT_COLOR);

        let lang = self.language;
        font::draw_text_centered(fb, CENTER_X, panel.y + 30.0, t(lang, "leaderboard_title"), ACCENT_COLOR, 3);

        let lines = self.leaderboard.lines(lang);
        if self.leaderboard.entries().is_empty() {
            for line in &lines {
                font::draw_text_centered(fb, CENTER_X, CENTER_Y, line, TEXT_COLOR, 2);
            }
        } else {
            let x = panel.x as i32 + 20;
            for (i, line) in lines.iter().enumerate() {
                let y = panel.y as i32 + 65 + i as i32 * 26;
                let color = if self.last_rank == Some(i + 1) { ACCENT_COLOR } else { TEXT_COLOR };
                font::draw_text(fb, x, y, line, color, 2);
            }
        }

        let hint_y = panel.y + panel.height - 20.0;
        font::draw_text_centered(fb, CENTER_X, hint_y, t(lang, "leaderboard_hint"), DIM_COLOR, 1);
    }
}
