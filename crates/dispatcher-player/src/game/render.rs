//! World rendering: warehouse floor, docks, trucks and sparks
//!
//! Draw order: floor, lanes, docks, trucks (spawn order), particles, combo
//! banner. Overlays and the HUD are drawn afterwards by [`crate::game::hud`].

use crate::engine::font;
use crate::engine::paint::{self, Rect};
use crate::engine::SCREEN_WIDTH;
use crate::game::level::Dock;
use crate::game::truck::Truck;
use crate::game::GameState;

pub const FLOOR_COLOR: u32 = 0xFF34495E;
pub const LANE_COLOR: u32 = 0xFF2C3E50;
pub const ACCENT_COLOR: u32 = 0xFFF39C12;
const WHEEL_COLOR: u32 = 0xFF1A1A1A;

/// Lane bands (top, height)
const LANES: [(f32, f32); 2] = [(80.0, 80.0), (440.0, 80.0)];
/// Dashed divider lines through the middle of each lane
const DIVIDERS: [f32; 2] = [120.0, 480.0];

const DOCK_FILL_ALPHA: u32 = 0x40;
const DOCK_LABEL_SPACING: f32 = 25.0;

const CAB_WIDTH: f32 = 15.0;
const WHEEL_RADIUS: f32 = 6.0;
const WHEEL_INSET: f32 = 12.0;

impl GameState {
    /// Draw the playfield (everything below the HUD)
    pub fn draw_world(&self, fb: &mut [u32]) {
        draw_background(fb);
        for dock in &self.docks {
            draw_dock(fb, dock);
        }
        for truck in &self.trucks {
            draw_truck(fb, truck);
        }
        self.particles.draw(fb);

        if self.combo > 1 {
            let banner = format!("{} x{}!", crate::game::i18n::t(self.language, "combo"), self.combo);
            font::draw_text_centered(fb, SCREEN_WIDTH as f32 / 2.0, 50.0, &banner, ACCENT_COLOR, 3);
        }
    }
}

pub fn draw_background(fb: &mut [u32]) {
    paint::clear(fb, FLOOR_COLOR);
    for &(y, h) in &LANES {
        paint::fill_rect(fb, Rect::new(0.0, y, SCREEN_WIDTH as f32, h), LANE_COLOR, 255);
    }
    for &y in &DIVIDERS {
        paint::dashed_hline(fb, y, 3.0, 20, 10, ACCENT_COLOR);
    }
}

pub fn draw_dock(fb: &mut [u32], dock: &Dock) {
    paint::fill_rect(fb, dock.rect, dock.color, DOCK_FILL_ALPHA);
    paint::stroke_rect(fb, dock.rect, 3.0, dock.color);

    let (cx, cy) = dock.rect.center();
    for (i, line) in dock.label.split('\n').enumerate() {
        let y = cy - 10.0 + i as f32 * DOCK_LABEL_SPACING;
        font::draw_text_centered(fb, cx, y, line, dock.color, 2);
    }
}

pub fn draw_truck(fb: &mut [u32], truck: &Truck) {
    let r = truck.rect;

    if !truck.dragging {
        paint::fill_rect(fb, r.offset(2.0, 2.0), 0xFF000000, paint::alpha_of(0.2));
    }
    paint::fill_rect(fb, r, truck.kind.color(), 255);

    let (outline, thickness) = if truck.dragging {
        (ACCENT_COLOR, 3.0)
    } else {
        (LANE_COLOR, 2.0)
    };
    paint::stroke_rect(fb, r, thickness, outline);

    // cab faces the direction of travel
    let cab_x = if truck.is_inbound() { r.x } else { r.x + r.width - CAB_WIDTH };
    paint::fill_rect(fb, Rect::new(cab_x, r.y, CAB_WIDTH, r.height), LANE_COLOR, 255);

    let wheel_y = r.y + r.height;
    paint::fill_circle(fb, r.x + WHEEL_INSET, wheel_y, WHEEL_RADIUS, WHEEL_COLOR, 255);
    paint::fill_circle(fb, r.x + r.width - WHEEL_INSET, wheel_y, WHEEL_RADIUS, WHEEL_COLOR, 255);

    let (cx, cy) = r.center();
    font::draw_text_centered(fb, cx, cy, truck.kind.truck_label(), 0xFFFFFFFF, 1);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::SCREEN_HEIGHT;
    use crate::game::level::{docks_for, LevelId, TruckKind};

    fn frame() -> Vec<u32> {
        vec![0xFF000000; SCREEN_WIDTH * SCREEN_HEIGHT]
    }

    fn px(fb: &[u32], x: usize, y: usize) -> u32 {
        fb[y * SCREEN_WIDTH + x]
    }

    #[test]
    fn floor_and_lanes() {
        let mut fb = frame();
        draw_background(&mut fb);
        assert_eq!(px(&fb, 400, 300), FLOOR_COLOR);
        assert_eq!(px(&fb, 400, 90), LANE_COLOR);
        assert_eq!(px(&fb, 400, 510), LANE_COLOR);
        // dash at x=0..20, gap at 20..30
        assert_eq!(px(&fb, 5, 120), ACCENT_COLOR);
        assert_eq!(px(&fb, 25, 120), LANE_COLOR);
    }

    #[test]
    fn dock_is_tinted_and_outlined() {
        let mut fb = frame();
        draw_background(&mut fb);
        let dock = &docks_for(LevelId::FIRST)[0];
        draw_dock(&mut fb, dock);
        let (x, y) = (dock.rect.x as usize, dock.rect.y as usize);
        assert_eq!(px(&fb, x, y + 50), 0xFF000000 | dock.color, "border");
        let inside = px(&fb, x + 10, y + 10);
        assert_ne!(inside, FLOOR_COLOR);
        assert_ne!(inside, 0xFF000000 | dock.color, "fill is translucent");
    }

    #[test]
    fn dragged_truck_gets_accent_outline_and_no_shadow() {
        let mut fb = frame();
        draw_background(&mut fb);
        let mut truck = Truck::new(1, TruckKind::OUTBOUND, 300.0, 300.0, 0.0);
        truck.dragging = true;
        draw_truck(&mut fb, &truck);
        assert_eq!(px(&fb, 330, 300), ACCENT_COLOR);
        // outbound cab on the right side
        assert_eq!(px(&fb, 350, 310), LANE_COLOR);
    }

    #[test]
    fn parked_truck_casts_shadow() {
        let mut fb = frame();
        draw_background(&mut fb);
        let truck = Truck::new(1, TruckKind::INBOUND, 300.0, 300.0, 0.0);
        draw_truck(&mut fb, &truck);
        // just past the 2px outline on the right
        let shadow = px(&fb, 361, 320);
        assert_ne!(shadow, FLOOR_COLOR);
        assert_eq!(shadow, paint::blend(FLOOR_COLOR, 0xFF000000, paint::alpha_of(0.2)));
        // inbound cab on the left side
        assert_eq!(px(&fb, 305, 310), LANE_COLOR);
    }

    #[test]
    fn world_draws_without_panicking_off_screen() {
        let mut g = GameState::with_rng(
            LevelId::LAST,
            crate::game::leaderboard::Leaderboard::in_memory(),
            crate::game::i18n::Language::En,
            rand::SeedableRng::seed_from_u64(1),
        );
        g.start();
        g.trucks.push(Truck::new(1, TruckKind::INBOUND, -80.0, 100.0, 1.0));
        g.trucks.push(Truck::new(2, TruckKind::OUTBOUND, 790.0, 590.0, 1.0));
        g.combo = 3;
        let mut fb = frame();
        g.draw_world(&mut fb);
        assert_eq!(px(&fb, 400, 300), FLOOR_COLOR);
    }
}
