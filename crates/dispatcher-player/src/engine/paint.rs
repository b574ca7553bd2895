//! Shape primitives on the 800×600 ARGB framebuffer.
//!
//! Coordinates are `f32` canvas units and are rounded to whole pixels when
//! drawn. Everything is clipped to the screen.

use super::{SCREEN_HEIGHT, SCREEN_WIDTH};

/// Axis-aligned rectangle in canvas coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Containment test with inclusive edges on all four sides
    pub fn contains(&self, px: f32, py: f32) -> bool {
        px >= self.x && px <= self.x + self.width && py >= self.y && py <= self.y + self.height
    }

    pub fn center(&self) -> (f32, f32) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn offset(&self, dx: f32, dy: f32) -> Rect {
        Rect::new(self.x + dx, self.y + dy, self.width, self.height)
    }
}

/// Blend `color` over `dst` with `alpha` in 0..=255
#[inline]
pub fn blend(dst: u32, color: u32, alpha: u32) -> u32 {
    if alpha >= 255 {
        return 0xFF000000 | (color & 0x00FFFFFF);
    }
    let r = (color >> 16) & 0xFF;
    let g = (color >> 8) & 0xFF;
    let b = color & 0xFF;
    let dr = (dst >> 16) & 0xFF;
    let dg = (dst >> 8) & 0xFF;
    let db = dst & 0xFF;
    let inv_a = 255 - alpha;
    let out_r = (r * alpha + dr * inv_a) / 255;
    let out_g = (g * alpha + dg * inv_a) / 255;
    let out_b = (b * alpha + db * inv_a) / 255;
    0xFF000000 | (out_r << 16) | (out_g << 8) | out_b
}

/// Convert an opacity in 0.0..=1.0 to an alpha byte
pub fn alpha_of(opacity: f32) -> u32 {
    (opacity.clamp(0.0, 1.0) * 255.0).round() as u32
}

#[inline]
fn put(fb: &mut [u32], x: i32, y: i32, color: u32, alpha: u32) {
    if x < 0 || y < 0 || x >= SCREEN_WIDTH as i32 || y >= SCREEN_HEIGHT as i32 {
        return;
    }
    let idx = y as usize * SCREEN_WIDTH + x as usize;
    if let Some(px) = fb.get_mut(idx) {
        *px = blend(*px, color, alpha);
    }
}

/// Fill the whole framebuffer
pub fn clear(fb: &mut [u32], color: u32) {
    fb.fill(0xFF000000 | color);
}

/// Fill a rectangle given in integer pixels
pub fn fill_px(fb: &mut [u32], x: i32, y: i32, w: i32, h: i32, color: u32, alpha: u32) {
    if alpha == 0 || w <= 0 || h <= 0 {
        return;
    }
    let x0 = x.max(0);
    let y0 = y.max(0);
    let x1 = (x + w).min(SCREEN_WIDTH as i32);
    let y1 = (y + h).min(SCREEN_HEIGHT as i32);
    for py in y0..y1 {
        let row = py as usize * SCREEN_WIDTH;
        for px in x0..x1 {
            let idx = row + px as usize;
            fb[idx] = blend(fb[idx], color, alpha);
        }
    }
}

pub fn fill_rect(fb: &mut [u32], rect: Rect, color: u32, alpha: u32) {
    let x = rect.x.round() as i32;
    let y = rect.y.round() as i32;
    let w = (rect.x + rect.width).round() as i32 - x;
    let h = (rect.y + rect.height).round() as i32 - y;
    fill_px(fb, x, y, w, h, color, alpha);
}

/// Stroke a rectangle outline, the stroke centered on the edge like a
/// canvas `strokeRect`
pub fn stroke_rect(fb: &mut [u32], rect: Rect, thickness: f32, color: u32) {
    let half = thickness / 2.0;
    let outer = Rect::new(rect.x - half, rect.y - half, rect.width + thickness, rect.height + thickness);
    // top, bottom, left, right
    fill_rect(fb, Rect::new(outer.x, outer.y, outer.width, thickness), color, 255);
    fill_rect(fb, Rect::new(outer.x, outer.y + outer.height - thickness, outer.width, thickness), color, 255);
    fill_rect(fb, Rect::new(outer.x, outer.y, thickness, outer.height), color, 255);
    fill_rect(fb, Rect::new(outer.x + outer.width - thickness, outer.y, thickness, outer.height), color, 255);
}

pub fn fill_circle(fb: &mut [u32], cx: f32, cy: f32, radius: f32, color: u32, alpha: u32) {
    if alpha == 0 || radius <= 0.0 {
        return;
    }
    let r2 = radius * radius;
    let x0 = (cx - radius).floor() as i32;
    let x1 = (cx + radius).ceil() as i32;
    let y0 = (cy - radius).floor() as i32;
    let y1 = (cy + radius).ceil() as i32;
    for py in y0..=y1 {
        for px in x0..=x1 {
            let dx = px as f32 + 0.5 - cx;
            let dy = py as f32 + 0.5 - cy;
            if dx * dx + dy * dy <= r2 {
                put(fb, px, py, color, alpha);
            }
        }
    }
}

/// Horizontal dashed line across the full width, centered on `y`
pub fn dashed_hline(fb: &mut [u32], y: f32, thickness: f32, dash: i32, gap: i32, color: u32) {
    let top = (y - thickness / 2.0).round() as i32;
    let h = thickness.round().max(1.0) as i32;
    let period = (dash + gap).max(1);
    let mut x = 0;
    while x < SCREEN_WIDTH as i32 {
        fill_px(fb, x, top, dash, h, color, 255);
        x += period;
    }
}

/// Darken the whole frame with a translucent black layer
pub fn shade(fb: &mut [u32], opacity: f32) {
    let alpha = alpha_of(opacity);
    for px in fb.iter_mut() {
        *px = blend(*px, 0xFF000000, alpha);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame() -> Vec<u32> {
        vec![0xFF000000; SCREEN_WIDTH * SCREEN_HEIGHT]
    }

    fn at(fb: &[u32], x: usize, y: usize) -> u32 {
        fb[y * SCREEN_WIDTH + x]
    }

    #[test]
    fn rect_contains_is_inclusive() {
        let r = Rect::new(100.0, 200.0, 50.0, 20.0);
        assert!(r.contains(100.0, 200.0));
        assert!(r.contains(150.0, 220.0));
        assert!(!r.contains(150.1, 210.0));
        assert!(!r.contains(99.9, 210.0));
        assert_eq!(r.center(), (125.0, 210.0));
    }

    #[test]
    fn blend_extremes() {
        assert_eq!(blend(0xFF000000, 0xFFFFFFFF, 255), 0xFFFFFFFF);
        assert_eq!(blend(0xFF102030, 0xFFFFFFFF, 0), 0xFF102030);
        assert_eq!(blend(0xFF000000, 0xFFFF0000, 128) & 0x00FF0000, 128 << 16);
    }

    #[test]
    fn fill_rect_clips_to_screen() {
        let mut fb = frame();
        fill_rect(&mut fb, Rect::new(-20.0, -20.0, 30.0, 30.0), 0xFFFFFFFF, 255);
        assert_eq!(at(&fb, 0, 0), 0xFFFFFFFF);
        assert_eq!(at(&fb, 9, 9), 0xFFFFFFFF);
        assert_eq!(at(&fb, 10, 10), 0xFF000000);
    }

    #[test]
    fn circle_covers_center_not_corner() {
        let mut fb = frame();
        fill_circle(&mut fb, 50.0, 50.0, 6.0, 0xFF00FF00, 255);
        assert_eq!(at(&fb, 50, 50), 0xFF00FF00);
        assert_eq!(at(&fb, 44, 44), 0xFF000000);
    }

    #[test]
    fn dashes_leave_gaps() {
        let mut fb = frame();
        dashed_hline(&mut fb, 120.0, 3.0, 20, 10, 0xFFF39C12);
        assert_eq!(at(&fb, 5, 120), 0xFFF39C12);
        assert_eq!(at(&fb, 25, 120), 0xFF000000);
        assert_eq!(at(&fb, 35, 120), 0xFFF39C12);
    }
}
