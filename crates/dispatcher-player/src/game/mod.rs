//! Game logic: round state machine, scoring, spawning and input
//!
//! A round lasts two minutes. Trucks roll in along the top lane; the player
//! drags each one onto a dock of the matching kind. Correct drops score and
//! build a combo, wrong drops, misses and timeouts cost points and break it.

pub mod drag_drop;
pub mod hud;
pub mod i18n;
pub mod leaderboard;
pub mod level;
pub mod particles;
pub mod render;
pub mod truck;

use minifb::Key;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::audio::synth::Sfx;
use crate::engine::SCREEN_WIDTH;
use crate::game::drag_drop::{DragDropState, DropResult};
use crate::game::i18n::Language;
use crate::game::leaderboard::Leaderboard;
use crate::game::level::{docks_for, Dock, LevelId};
use crate::game::particles::Particles;
use crate::game::truck::Truck;

/// Length of a round
pub const ROUND_SECONDS: u32 = 120;
/// Points for a correct drop before combo and speed bonus
const BASE_POINTS: u32 = 100;
/// Extra points per combo step already built
const COMBO_STEP_POINTS: u32 = 10;
const WRONG_DOCK_PENALTY: u32 = 50;
const MISSED_TRUCK_PENALTY: u32 = 25;
/// Spawn interval shrinks by this much after every spawn
const SPAWN_ACCELERATION_MS: f32 = 50.0;

const SUCCESS_COLOR: u32 = 0xFF27AE60;
const FAILURE_COLOR: u32 = 0xFFE74C3C;
const SUCCESS_PARTICLES: usize = 10;
const FAILURE_PARTICLES: usize = 5;

/// Which phase the round is in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Menu,
    Playing,
    Paused,
    GameOver,
}

/// Central game state
pub struct GameState {
    pub phase: Phase,
    pub level: LevelId,
    pub score: u32,
    pub time_left: u32,
    pub combo: u32,
    pub max_combo: u32,
    pub trucks: Vec<Truck>,
    pub docks: Vec<Dock>,
    pub particles: Particles,
    pub drag: DragDropState,
    pub leaderboard: Leaderboard,
    /// Leaderboard panel visible (outside play)
    pub show_leaderboard: bool,
    /// Rank reached by the last finished round, if it made the table
    pub last_rank: Option<usize>,
    /// UI language
    pub language: Language,
    /// Shown in the HUD when sound is off
    pub muted: bool,
    canvas_width: f32,
    elapsed_ms: f32,
    spawn_timer_ms: f32,
    spawn_interval_ms: f32,
    next_truck_id: u32,
    rng: StdRng,
    /// Sound cues raised since the last drain
    sfx_queue: Vec<Sfx>,
}

impl GameState {
    pub fn new(level: LevelId, leaderboard: Leaderboard, language: Language) -> Self {
        Self::with_rng(level, leaderboard, language, StdRng::from_entropy())
    }

    pub fn with_rng(level: LevelId, leaderboard: Leaderboard, language: Language, rng: StdRng) -> Self {
        let canvas_width = SCREEN_WIDTH as f32;
        let state = Self {
            phase: Phase::Menu,
            level,
            score: 0,
            time_left: ROUND_SECONDS,
            combo: 0,
            max_combo: 0,
            trucks: Vec::new(),
            docks: docks_for(level),
            particles: Particles::new(),
            drag: DragDropState::new(),
            leaderboard,
            show_leaderboard: false,
            last_rank: None,
            language,
            muted: false,
            canvas_width,
            elapsed_ms: 0.0,
            spawn_timer_ms: 0.0,
            spawn_interval_ms: level.config().spawn_interval_ms,
            next_truck_id: 1,
            rng,
            sfx_queue: Vec::new(),
        };
        tracing::info!("GameState initialized: level {}, {} docks", level, state.docks.len());
        state
    }

    // -----------------------------------------------------------------------
    // Round lifecycle
    // -----------------------------------------------------------------------

    /// Begin a round. Only from the menu or the game-over screen.
    pub fn start(&mut self) -> bool {
        if !matches!(self.phase, Phase::Menu | Phase::GameOver) {
            return false;
        }
        self.phase = Phase::Playing;
        self.score = 0;
        self.time_left = ROUND_SECONDS;
        self.combo = 0;
        self.max_combo = 0;
        self.trucks.clear();
        self.particles.clear();
        self.drag.reset();
        self.elapsed_ms = 0.0;
        self.spawn_timer_ms = 0.0;
        self.spawn_interval_ms = self.level.config().spawn_interval_ms;
        self.show_leaderboard = false;
        self.last_rank = None;
        self.cue(Sfx::GameStart);
        tracing::info!("Round started on level {}", self.level);
        true
    }

    /// Playing ↔ Paused. Pausing releases a held truck back to its lane.
    pub fn toggle_pause(&mut self) {
        match self.phase {
            Phase::Playing => {
                self.drag.cancel(&mut self.trucks);
                self.phase = Phase::Paused;
                tracing::info!("Paused at {}s left", self.time_left);
            }
            Phase::Paused => {
                self.phase = Phase::Playing;
                tracing::info!("Resumed");
            }
            _ => {}
        }
    }

    /// Finish the round and record the score
    pub fn end(&mut self) {
        if !matches!(self.phase, Phase::Playing | Phase::Paused) {
            return;
        }
        self.drag.cancel(&mut self.trucks);
        self.phase = Phase::GameOver;
        self.time_left = 0;
        self.last_rank = self.leaderboard.record(self.score, self.max_combo);
        self.cue(Sfx::GameOver);
        tracing::info!("Round over: score {}, best combo {}", self.score, self.max_combo);
    }

    /// Switch level (1-3). Ignored while a round is in progress.
    pub fn select_level(&mut self, n: u8) -> bool {
        let Some(level) = LevelId::new(n) else {
            return false;
        };
        if matches!(self.phase, Phase::Playing | Phase::Paused) {
            tracing::debug!("Level change to {} ignored during a round", n);
            return false;
        }
        self.level = level;
        self.docks = docks_for(level);
        self.trucks.clear();
        self.particles.clear();
        self.drag.reset();
        self.spawn_interval_ms = level.config().spawn_interval_ms;
        tracing::info!("Level {} selected", level);
        true
    }

    pub fn toggle_leaderboard(&mut self) {
        if self.phase == Phase::Playing {
            return;
        }
        self.show_leaderboard = !self.show_leaderboard;
    }

    // -----------------------------------------------------------------------
    // Simulation
    // -----------------------------------------------------------------------

    /// Advance the simulation by `dt` milliseconds
    pub fn update(&mut self, dt: f32) {
        if self.phase != Phase::Playing {
            return;
        }

        self.elapsed_ms += dt;
        let elapsed_s = (self.elapsed_ms / 1000.0).floor() as u32;
        self.time_left = ROUND_SECONDS.saturating_sub(elapsed_s);
        if self.time_left == 0 {
            self.end();
            return;
        }

        self.spawn_timer_ms += dt;
        if self.spawn_timer_ms >= self.spawn_interval_ms {
            self.spawn_truck();
            self.spawn_timer_ms = 0.0;
            let min = self.level.config().min_spawn_interval_ms;
            self.spawn_interval_ms = (self.spawn_interval_ms - SPAWN_ACCELERATION_MS).max(min);
        }

        self.update_trucks(dt);
        self.particles.update();
    }

    fn spawn_truck(&mut self) {
        let config = self.level.config();
        let truck = Truck::spawn(self.next_truck_id, &config, self.canvas_width, &mut self.rng);
        self.next_truck_id += 1;
        tracing::debug!("Spawned truck {} ({})", truck.id, truck.kind.name());
        self.trucks.push(truck);
        self.cue(Sfx::TruckSpawn);
    }

    fn update_trucks(&mut self, dt: f32) {
        let width = self.canvas_width;
        let mut departed = Vec::new();
        self.trucks.retain_mut(|t| match t.tick(dt, width) {
            Some(departure) => {
                departed.push((t.id, departure));
                false
            }
            None => true,
        });

        for (id, departure) in departed {
            self.drag.forget(id);
            tracing::debug!("Truck {} left the floor: {:?}", id, departure);
            if departure.is_penalized() {
                self.score = self.score.saturating_sub(MISSED_TRUCK_PENALTY);
                self.combo = 0;
            }
        }
    }

    /// Score a truck released over a dock and remove it from the floor
    pub fn process_dropoff(&mut self, truck_id: u32, dock_index: usize) {
        let Some(idx) = self.trucks.iter().position(|t| t.id == truck_id) else {
            return;
        };
        let Some(dock) = self.docks.get(dock_index) else {
            return;
        };
        let dock_kind = dock.kind;
        let truck = self.trucks.remove(idx);
        self.drag.forget(truck_id);
        let (cx, cy) = truck.center();

        if truck.kind == dock_kind {
            let bonus = truck.speed_bonus();
            self.score += BASE_POINTS + self.combo * COMBO_STEP_POINTS;
            self.combo += 1;
            self.max_combo = self.max_combo.max(self.combo);
            self.score += bonus;
            self.particles.burst(cx, cy, SUCCESS_COLOR, SUCCESS_PARTICLES, &mut self.rng);
            self.cue(Sfx::Success);
            if self.combo > 1 {
                self.cue(Sfx::Combo(self.combo));
            }
            tracing::debug!(
                "Correct drop: truck {} → {} (combo {}, bonus {})",
                truck_id, dock_kind.name(), self.combo, bonus
            );
        } else {
            self.score = self.score.saturating_sub(WRONG_DOCK_PENALTY);
            self.combo = 0;
            self.particles.burst(cx, cy, FAILURE_COLOR, FAILURE_PARTICLES, &mut self.rng);
            self.cue(Sfx::Error);
            tracing::debug!(
                "Wrong drop: {} truck on {} dock",
                truck.kind.name(), dock_kind.name()
            );
        }
    }

    // -----------------------------------------------------------------------
    // Input
    // -----------------------------------------------------------------------

    /// Feed the pointer position (canvas units) and left-button level
    pub fn on_mouse_state(&mut self, mx: f32, my: f32, mouse_down: bool) {
        if self.phase != Phase::Playing {
            self.drag.sync_button(mouse_down);
            return;
        }
        let result = self.drag.process_mouse(&mut self.trucks, &self.docks, mx, my, mouse_down);
        if let DropResult::Docked { truck_id, dock_index } = result {
            self.process_dropoff(truck_id, dock_index);
        }
    }

    pub fn on_key_down(&mut self, key: Key) {
        match key {
            Key::Enter | Key::NumPadEnter | Key::Space => {
                self.start();
            }
            Key::P | Key::Escape => self.toggle_pause(),
            Key::L => self.toggle_leaderboard(),
            Key::G if self.phase != Phase::Playing => {
                self.language = self.language.next();
                tracing::info!("Language → {}", self.language.code());
            }
            Key::Key1 | Key::NumPad1 => {
                self.select_level(1);
            }
            Key::Key2 | Key::NumPad2 => {
                self.select_level(2);
            }
            Key::Key3 | Key::NumPad3 => {
                self.select_level(3);
            }
            _ => {}
        }
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// Take the sound cues raised since the last call
    pub fn drain_sfx(&mut self) -> Vec<Sfx> {
        std::mem::take(&mut self.sfx_queue)
    }

    fn cue(&mut self, sfx: Sfx) {
        self.sfx_queue.push(sfx);
    }

    /// Short status line for the window title
    pub fn status_line(&self) -> String {
        format!(
            "{:?} | level {} | score {} | {}s | combo {}",
            self.phase, self.level, self.score, self.time_left, self.combo
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::level::{Cargo, Direction, TruckKind};

    fn game(level: u8) -> GameState {
        GameState::with_rng(
            LevelId::new(level).unwrap(),
            Leaderboard::in_memory(),
            Language::En,
            StdRng::seed_from_u64(42),
        )
    }

    /// Place a parked truck (speed 0) in the middle of the floor
    fn park(g: &mut GameState, id: u32, kind: TruckKind) {
        g.trucks.push(Truck::new(id, kind, 400.0, 300.0, 0.0));
    }

    #[test]
    fn start_resets_round() {
        let mut g = game(1);
        g.score = 999;
        g.combo = 4;
        assert!(g.start());
        assert_eq!(g.phase, Phase::Playing);
        assert_eq!((g.score, g.combo, g.max_combo, g.time_left), (0, 0, 0, ROUND_SECONDS));
        assert!(g.trucks.is_empty());
        assert_eq!(g.drain_sfx(), vec![Sfx::GameStart]);
        assert!(!g.start(), "no restart mid-round");
    }

    #[test]
    fn correct_drops_build_combo_and_score() {
        let mut g = game(1);
        g.start();
        g.drain_sfx();

        park(&mut g, 1, TruckKind::INBOUND);
        g.process_dropoff(1, 0);
        // 100 base + 0 combo + 50 speed bonus (age 0)
        assert_eq!(g.score, 150);
        assert_eq!(g.combo, 1);
        assert_eq!(g.drain_sfx(), vec![Sfx::Success]);

        park(&mut g, 2, TruckKind::INBOUND);
        g.trucks[0].age_ms = 3000.0;
        g.process_dropoff(2, 0);
        // 100 base + 10 combo + 20 speed bonus
        assert_eq!(g.score, 280);
        assert_eq!(g.combo, 2);
        assert_eq!(g.max_combo, 2);
        assert_eq!(g.drain_sfx(), vec![Sfx::Success, Sfx::Combo(2)]);
        assert_eq!(g.particles.iter().count(), 20);
        assert!(g.trucks.is_empty());
    }

    #[test]
    fn wrong_dock_costs_points_and_combo() {
        let mut g = game(1);
        g.start();
        g.drain_sfx();
        g.score = 30;
        g.combo = 3;
        g.max_combo = 3;

        park(&mut g, 1, TruckKind::OUTBOUND);
        g.process_dropoff(1, 0); // dock 0 is inbound
        assert_eq!(g.score, 0, "score floors at zero");
        assert_eq!(g.combo, 0);
        assert_eq!(g.max_combo, 3);
        assert_eq!(g.particles.iter().count(), 5);
        assert_eq!(g.drain_sfx(), vec![Sfx::Error]);
    }

    #[test]
    fn level_three_requires_matching_cargo() {
        let mut g = game(3);
        g.start();
        let rims_in = TruckKind::new(Direction::Inbound, Cargo::Rims);
        park(&mut g, 1, rims_in);
        g.process_dropoff(1, 0); // inbound tires dock
        assert_eq!(g.combo, 0);
        park(&mut g, 2, rims_in);
        g.process_dropoff(2, 1); // inbound rims dock
        assert_eq!(g.combo, 1);
    }

    #[test]
    fn drag_to_dock_through_pointer() {
        let mut g = game(1);
        g.start();
        park(&mut g, 7, TruckKind::INBOUND);
        g.on_mouse_state(410.0, 310.0, true);
        g.on_mouse_state(50.0, 300.0, true);
        g.on_mouse_state(50.0, 300.0, false);
        assert!(g.trucks.is_empty());
        assert_eq!(g.combo, 1);
    }

    #[test]
    fn pointer_ignored_outside_play() {
        let mut g = game(1);
        park(&mut g, 1, TruckKind::INBOUND);
        g.on_mouse_state(410.0, 310.0, true);
        assert!(!g.drag.is_dragging());
    }

    #[test]
    fn timed_out_truck_costs_points() {
        let mut g = game(1);
        g.start();
        g.score = 100;
        g.combo = 2;
        park(&mut g, 1, TruckKind::INBOUND);
        g.trucks[0].age_ms = 9_990.0;
        g.update(20.0);
        assert!(g.trucks.iter().all(|t| t.id != 1));
        assert_eq!(g.score, 75);
        assert_eq!(g.combo, 0);
    }

    #[test]
    fn missed_truck_costs_points() {
        let mut g = game(1);
        g.start();
        g.score = 100;
        g.combo = 3;
        g.trucks.push(Truck::new(1, TruckKind::INBOUND, 849.5, 120.0, 1.0));
        g.trucks.push(Truck::new(2, TruckKind::OUTBOUND, -99.5, 120.0, 1.0));
        g.update(20.0);
        assert!(g.trucks.is_empty());
        assert_eq!(g.score, 50);
        assert_eq!(g.combo, 0);
    }

    #[test]
    fn held_truck_that_times_out_is_released() {
        let mut g = game(1);
        g.start();
        park(&mut g, 1, TruckKind::INBOUND);
        g.on_mouse_state(410.0, 310.0, true);
        assert_eq!(g.drag.dragging_id(), Some(1));
        g.trucks[0].age_ms = 10_000.0;
        g.update(16.0);
        assert!(!g.drag.is_dragging());
        g.on_mouse_state(50.0, 300.0, false);
        assert_eq!(g.combo, 0, "a removed truck cannot be docked");
    }

    #[test]
    fn spawn_pacing_accelerates_to_floor() {
        let mut g = game(1);
        g.start();
        g.drain_sfx();
        g.update(2999.0);
        assert!(g.trucks.is_empty());
        g.update(1.0);
        assert_eq!(g.trucks.len(), 1);
        assert_eq!(g.spawn_interval_ms, 2950.0);
        assert!(g.drain_sfx().contains(&Sfx::TruckSpawn));

        for _ in 0..100 {
            g.spawn_timer_ms = g.spawn_interval_ms;
            g.update(0.0);
        }
        assert_eq!(g.spawn_interval_ms, 1500.0);
    }

    #[test]
    fn clock_runs_out_and_records_score() {
        let mut g = game(2);
        g.start();
        g.update(59_999.0);
        assert_eq!(g.time_left, 61);
        g.score = 4321;
        g.max_combo = 6;
        g.update(60_001.0);
        assert_eq!(g.phase, Phase::GameOver);
        assert_eq!(g.time_left, 0);
        assert_eq!(g.last_rank, Some(1));
        assert_eq!(g.leaderboard.entries()[0].score, 4321);
        assert_eq!(g.leaderboard.entries()[0].max_combo, 6);
        assert_eq!(g.drain_sfx().last(), Some(&Sfx::GameOver));

        // frozen after the round
        g.update(1000.0);
        assert_eq!(g.phase, Phase::GameOver);
    }

    #[test]
    fn pause_freezes_clock_and_releases_drag() {
        let mut g = game(1);
        g.start();
        park(&mut g, 1, TruckKind::INBOUND);
        g.on_mouse_state(410.0, 310.0, true);
        g.toggle_pause();
        assert_eq!(g.phase, Phase::Paused);
        assert!(!g.drag.is_dragging());
        assert!(g.trucks[0].returning);

        g.update(10_000.0);
        assert_eq!(g.time_left, ROUND_SECONDS);
        g.toggle_pause();
        assert_eq!(g.phase, Phase::Playing);
    }

    #[test]
    fn level_select_only_between_rounds() {
        let mut g = game(1);
        assert!(g.select_level(3));
        assert_eq!(g.docks.len(), 6);
        assert!(!g.select_level(4));
        g.start();
        assert!(!g.select_level(2));
        assert_eq!(g.level, LevelId::LAST);
        assert_eq!(g.spawn_interval_ms, 2000.0);
    }

    #[test]
    fn keys_drive_the_state_machine() {
        let mut g = game(1);
        g.on_key_down(Key::Key2);
        assert_eq!(g.level.get(), 2);
        g.on_key_down(Key::L);
        assert!(g.show_leaderboard);
        g.on_key_down(Key::Enter);
        assert_eq!(g.phase, Phase::Playing);
        assert!(!g.show_leaderboard);
        g.on_key_down(Key::P);
        assert_eq!(g.phase, Phase::Paused);
        g.on_key_down(Key::Escape);
        assert_eq!(g.phase, Phase::Playing);
    }
}
