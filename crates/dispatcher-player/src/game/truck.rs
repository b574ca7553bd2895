//! Trucks: spawning, lane movement and lifetime.
//!
//! Speeds are given in pixels per 16 ms so that a truck covers the same
//! ground at any tick length.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::engine::paint::Rect;
use crate::game::level::{LevelConfig, TruckKind};

pub const TRUCK_WIDTH: f32 = 60.0;
pub const TRUCK_HEIGHT: f32 = 30.0;
/// Trucks older than this are removed as timed out
pub const TRUCK_TIMEOUT_MS: f32 = 10_000.0;
/// Speed bonus is earned for drops faster than this
pub const SPEED_BONUS_WINDOW_MS: f32 = 5_000.0;
/// Returning trucks back out at this speed (px per 16 ms)
const RETURN_SPEED: f32 = 2.0;
const FRAME_MS: f32 = 16.0;

/// Why a truck left the floor without being docked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Departure {
    /// Drove past the far edge of the screen
    Missed,
    /// Exceeded [`TRUCK_TIMEOUT_MS`]
    TimedOut,
    /// Backed out of the screen after a drop on empty floor (no penalty)
    Returned,
}

impl Departure {
    pub fn is_penalized(self) -> bool {
        matches!(self, Departure::Missed | Departure::TimedOut)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Truck {
    pub id: u32,
    pub kind: TruckKind,
    pub rect: Rect,
    /// Lane speed in px per 16 ms
    pub speed: f32,
    pub age_ms: f32,
    pub dragging: bool,
    /// Released away from any dock: backing out toward its spawn side
    pub returning: bool,
}

impl Truck {
    /// Spawn a random truck of one of the level's kinds at the edge it enters from
    pub fn spawn<R: Rng + ?Sized>(id: u32, config: &LevelConfig, canvas_width: f32, rng: &mut R) -> Self {
        let kind = config
            .truck_kinds
            .choose(rng)
            .copied()
            .unwrap_or(TruckKind::INBOUND);
        let x = if kind.is_inbound() { -80.0 } else { canvas_width + 20.0 };
        let y = 100.0 + rng.gen::<f32>() * 50.0;
        let speed = 0.5 + rng.gen::<f32>() * 0.5;
        Self::new(id, kind, x, y, speed)
    }

    pub fn new(id: u32, kind: TruckKind, x: f32, y: f32, speed: f32) -> Self {
        Self {
            id,
            kind,
            rect: Rect::new(x, y, TRUCK_WIDTH, TRUCK_HEIGHT),
            speed,
            age_ms: 0.0,
            dragging: false,
            returning: false,
        }
    }

    pub fn is_inbound(&self) -> bool {
        self.kind.is_inbound()
    }

    pub fn center(&self) -> (f32, f32) {
        self.rect.center()
    }

    pub fn contains(&self, x: f32, y: f32) -> bool {
        self.rect.contains(x, y)
    }

    /// Bonus points for a correct drop, shrinking with the truck's age
    pub fn speed_bonus(&self) -> u32 {
        ((SPEED_BONUS_WINDOW_MS - self.age_ms) / 100.0).floor().max(0.0) as u32
    }

    /// Advance by `dt` ms. Returns why the truck should leave the floor, if it should.
    pub fn tick(&mut self, dt: f32, canvas_width: f32) -> Option<Departure> {
        self.age_ms += dt;

        if !self.dragging && !self.returning {
            let step = self.speed * dt / FRAME_MS;
            if self.is_inbound() {
                self.rect.x += step;
                if self.rect.x > canvas_width + 50.0 {
                    return Some(Departure::Missed);
                }
            } else {
                self.rect.x -= step;
                if self.rect.x < -100.0 {
                    return Some(Departure::Missed);
                }
            }
        }

        if self.returning && !self.dragging {
            let step = RETURN_SPEED * dt / FRAME_MS;
            self.rect.x += if self.is_inbound() { -step } else { step };
            if self.rect.x < -100.0 || self.rect.x > canvas_width + 100.0 {
                return Some(Departure::Returned);
            }
        }

        if self.age_ms > TRUCK_TIMEOUT_MS {
            return Some(Departure::TimedOut);
        }
        None
    }
}
