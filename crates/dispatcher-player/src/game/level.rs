//! Level table: dock counts, spawn pacing and truck kinds per level.
//!
//! Levels 1 and 2 only distinguish inbound from outbound traffic. Level 3
//! splits both directions by cargo (tires, rims, tools), giving six docks
//! and six truck kinds.

use crate::engine::paint::Rect;
use crate::engine::SCREEN_WIDTH;

/// Direction a truck travels and the side its docks sit on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Enters from the left, docks on the left
    Inbound,
    /// Enters from the right, docks on the right
    Outbound,
}

/// What a truck carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cargo {
    General,
    Tires,
    Rims,
    Tools,
}

impl Cargo {
    const SORTED: [Cargo; 3] = [Cargo::Tires, Cargo::Rims, Cargo::Tools];

    fn label(self) -> &'static str {
        match self {
            Cargo::General => "",
            Cargo::Tires => "TIRES",
            Cargo::Rims => "RIMS",
            Cargo::Tools => "TOOLS",
        }
    }
}

/// A truck kind and, equally, the kind of dock that accepts it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TruckKind {
    pub direction: Direction,
    pub cargo: Cargo,
}

impl TruckKind {
    pub const INBOUND: TruckKind = TruckKind { direction: Direction::Inbound, cargo: Cargo::General };
    pub const OUTBOUND: TruckKind = TruckKind { direction: Direction::Outbound, cargo: Cargo::General };

    pub const fn new(direction: Direction, cargo: Cargo) -> Self {
        Self { direction, cargo }
    }

    pub fn is_inbound(&self) -> bool {
        self.direction == Direction::Inbound
    }

    /// Shared by trucks and docks of this kind
    pub fn color(&self) -> u32 {
        match (self.direction, self.cargo) {
            (Direction::Inbound, Cargo::General) => 0xFF27AE60,
            (Direction::Outbound, Cargo::General) => 0xFF3498DB,
            (Direction::Inbound, Cargo::Tires) => 0xFF27AE60,
            (Direction::Inbound, Cargo::Rims) => 0xFF16A085,
            (Direction::Inbound, Cargo::Tools) => 0xFF2980B9,
            (Direction::Outbound, Cargo::Tires) => 0xFFE74C3C,
            (Direction::Outbound, Cargo::Rims) => 0xFFE67E22,
            (Direction::Outbound, Cargo::Tools) => 0xFFF39C12,
        }
    }

    /// Text painted on the truck body
    pub fn truck_label(&self) -> &'static str {
        match (self.direction, self.cargo) {
            (Direction::Inbound, Cargo::General) => "IN",
            (Direction::Outbound, Cargo::General) => "OUT",
            (_, cargo) => cargo.label(),
        }
    }

    /// Identifier used in logs ("inbound", "outbound_tires", ...)
    pub fn name(&self) -> String {
        let dir = match self.direction {
            Direction::Inbound => "inbound",
            Direction::Outbound => "outbound",
        };
        match self.cargo {
            Cargo::General => dir.to_string(),
            cargo => format!("{}_{}", dir, cargo.label().to_ascii_lowercase()),
        }
    }
}

/// Level number, always 1..=3
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct LevelId(u8);

impl LevelId {
    pub const FIRST: LevelId = LevelId(1);
    pub const LAST: LevelId = LevelId(3);

    pub fn new(n: u8) -> Option<Self> {
        (Self::FIRST.0..=Self::LAST.0).contains(&n).then_some(LevelId(n))
    }

    pub fn get(self) -> u8 {
        self.0
    }

    pub fn config(self) -> LevelConfig {
        LevelConfig::for_level(self)
    }

    fn sorted_by_cargo(self) -> bool {
        self.0 == 3
    }
}

impl Default for LevelId {
    fn default() -> Self {
        LevelId::FIRST
    }
}

impl std::fmt::Display for LevelId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Tuning for one level
#[derive(Debug, Clone, PartialEq)]
pub struct LevelConfig {
    pub inbound_docks: usize,
    pub outbound_docks: usize,
    /// Spawn interval at the start of a round
    pub spawn_interval_ms: f32,
    /// Floor the interval shrinks towards (50 ms per spawn)
    pub min_spawn_interval_ms: f32,
    pub truck_kinds: Vec<TruckKind>,
}

impl LevelConfig {
    pub fn for_level(level: LevelId) -> Self {
        match level.get() {
            1 => Self {
                inbound_docks: 1,
                outbound_docks: 1,
                spawn_interval_ms: 3000.0,
                min_spawn_interval_ms: 1500.0,
                truck_kinds: vec![TruckKind::INBOUND, TruckKind::OUTBOUND],
            },
            2 => Self {
                inbound_docks: 2,
                outbound_docks: 2,
                spawn_interval_ms: 2500.0,
                min_spawn_interval_ms: 1200.0,
                truck_kinds: vec![TruckKind::INBOUND, TruckKind::OUTBOUND],
            },
            _ => Self {
                inbound_docks: 3,
                outbound_docks: 3,
                spawn_interval_ms: 2000.0,
                min_spawn_interval_ms: 1000.0,
                truck_kinds: [Direction::Inbound, Direction::Outbound]
                    .into_iter()
                    .flat_map(|d| Cargo::SORTED.into_iter().map(move |c| TruckKind::new(d, c)))
                    .collect(),
            },
        }
    }
}

/// A drop target on the warehouse floor
#[derive(Debug, Clone, PartialEq)]
pub struct Dock {
    pub kind: TruckKind,
    pub rect: Rect,
    pub color: u32,
    /// Lines are separated by '\n'
    pub label: String,
}

impl Dock {
    pub fn contains(&self, x: f32, y: f32) -> bool {
        self.rect.contains(x, y)
    }
}

pub const DOCK_WIDTH: f32 = 100.0;

/// Lay out the docks for a level. Inbound docks come first, so where docks
/// overlap the inbound one wins the hit test.
pub fn build_docks(level: LevelId, canvas_width: f32) -> Vec<Dock> {
    let config = level.config();
    let mut docks = Vec::with_capacity(config.inbound_docks + config.outbound_docks);
    docks.extend(side_docks(level, Direction::Inbound, config.inbound_docks, canvas_width));
    docks.extend(side_docks(level, Direction::Outbound, config.outbound_docks, canvas_width));
    docks
}

fn side_docks(level: LevelId, direction: Direction, count: usize, canvas_width: f32) -> Vec<Dock> {
    let (height, spacing, start_y) = if level.sorted_by_cargo() {
        (120.0, 140.0, 150.0)
    } else {
        (200.0, 220.0, 200.0)
    };
    let heading = match direction {
        Direction::Inbound => "INBOUND",
        Direction::Outbound => "OUTBOUND",
    };

    (0..count)
        .map(|i| {
            let kind = if level.sorted_by_cargo() {
                TruckKind::new(direction, Cargo::SORTED[i % Cargo::SORTED.len()])
            } else {
                TruckKind::new(direction, Cargo::General)
            };
            let label = if level.sorted_by_cargo() {
                format!("{}\n{}", heading, kind.cargo.label())
            } else if count > 1 {
                format!("{}\nDOCK {}", heading, i + 1)
            } else {
                format!("{}\nDOCK", heading)
            };
            let x = match direction {
                Direction::Inbound => 20.0 + i as f32 * 60.0,
                Direction::Outbound => canvas_width - 120.0 - i as f32 * 60.0,
            };
            let y = start_y + i as f32 * (spacing / count as f32);
            Dock {
                kind,
                rect: Rect::new(x, y, DOCK_WIDTH, height),
                color: kind.color(),
                label,
            }
        })
        .collect()
}

/// Docks for the default canvas width
pub fn docks_for(level: LevelId) -> Vec<Dock> {
    build_docks(level, SCREEN_WIDTH as f32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_ids_outside_range_are_rejected() {
        assert!(LevelId::new(0).is_none());
        assert!(LevelId::new(4).is_none());
        assert_eq!(LevelId::new(2).map(LevelId::get), Some(2));
    }

    #[test]
    fn level_table_pacing() {
        let expect = [(1, 3000.0, 1500.0), (2, 2500.0, 1200.0), (3, 2000.0, 1000.0)];
        for (n, start, min) in expect {
            let cfg = LevelId::new(n).unwrap().config();
            assert_eq!(cfg.spawn_interval_ms, start, "level {}", n);
            assert_eq!(cfg.min_spawn_interval_ms, min, "level {}", n);
        }
    }

    #[test]
    fn dock_count_matches_table() {
        for n in 1..=3 {
            let level = LevelId::new(n).unwrap();
            let cfg = level.config();
            assert_eq!(docks_for(level).len(), cfg.inbound_docks + cfg.outbound_docks);
        }
    }

    #[test]
    fn level_one_layout() {
        let docks = docks_for(LevelId::FIRST);
        assert_eq!(docks[0].kind, TruckKind::INBOUND);
        assert_eq!(docks[0].rect, Rect::new(20.0, 200.0, 100.0, 200.0));
        assert_eq!(docks[0].label, "INBOUND\nDOCK");
        assert_eq!(docks[1].kind, TruckKind::OUTBOUND);
        assert_eq!(docks[1].rect, Rect::new(680.0, 200.0, 100.0, 200.0));
        assert_eq!(docks[1].color, 0xFF3498DB);
    }

    #[test]
    fn level_two_docks_are_numbered_and_staggered() {
        let docks = docks_for(LevelId::new(2).unwrap());
        assert_eq!(docks[1].label, "INBOUND\nDOCK 2");
        assert_eq!(docks[1].rect.x, 80.0);
        assert_eq!(docks[1].rect.y, 310.0);
        assert_eq!(docks[3].label, "OUTBOUND\nDOCK 2");
        assert_eq!(docks[3].rect.x, 620.0);
    }

    #[test]
    fn level_three_docks_sorted_by_cargo() {
        let docks = docks_for(LevelId::LAST);
        let names: Vec<String> = docks.iter().map(|d| d.kind.name()).collect();
        assert_eq!(
            names,
            [
                "inbound_tires", "inbound_rims", "inbound_tools",
                "outbound_tires", "outbound_rims", "outbound_tools",
            ]
        );
        assert_eq!(docks[2].label, "INBOUND\nTOOLS");
        assert_eq!(docks[0].rect.height, 120.0);
        assert!((docks[1].rect.y - (150.0 + 140.0 / 3.0)).abs() < 1e-3);
    }

    #[test]
    fn every_level_three_truck_kind_has_a_dock() {
        let level = LevelId::LAST;
        let docks = docks_for(level);
        for kind in level.config().truck_kinds {
            assert!(docks.iter().any(|d| d.kind == kind), "no dock for {}", kind.name());
        }
    }

    #[test]
    fn truck_labels() {
        assert_eq!(TruckKind::INBOUND.truck_label(), "IN");
        assert_eq!(TruckKind::OUTBOUND.truck_label(), "OUT");
        assert_eq!(TruckKind::new(Direction::Outbound, Cargo::Rims).truck_label(), "RIMS");
    }
}
