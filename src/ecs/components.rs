//! ECS Components
//!
//! Components stored on world entities, plus the small value types the
//! player record is built from.

use serde::{Deserialize, Serialize};

use crate::data::{EnemyTemplate, TownTemplate};

// ============================================================================
// Position & Movement
// ============================================================================

/// Position on the world grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Chebyshev distance (allows diagonal)
    pub fn chebyshev_distance(&self, other: &Position) -> i32 {
        (self.x - other.x).abs().max((self.y - other.y).abs())
    }

    /// Straight-line distance
    pub fn euclidean_distance(&self, other: &Position) -> f64 {
        let dx = (self.x - other.x) as f64;
        let dy = (self.y - other.y) as f64;
        (dx * dx + dy * dy).sqrt()
    }

    /// Neighbouring position one step in `dir`
    pub fn step(&self, dir: Direction) -> Position {
        let (dx, dy) = dir.delta();
        Position::new(self.x + dx, self.y + dy)
    }
}

/// Cardinal movement directions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    South,
    West,
    East,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::West,
        Direction::East,
    ];

    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::South => (0, 1),
            Direction::West => (-1, 0),
            Direction::East => (1, 0),
        }
    }
}

// ============================================================================
// World entities
// ============================================================================

/// Payload of a world-placed entity. Stored next to its `Position`.
#[derive(Debug, Clone)]
pub enum EntityKind {
    Town(TownTemplate),
    Enemy(EnemyTemplate),
    Treasure(Treasure),
}

impl EntityKind {
    pub fn label(&self) -> &'static str {
        match self {
            EntityKind::Town(_) => "town",
            EntityKind::Enemy(e) if e.is_boss => "boss",
            EntityKind::Enemy(_) => "enemy",
            EntityKind::Treasure(_) => "treasure",
        }
    }

    pub fn as_enemy(&self) -> Option<&EnemyTemplate> {
        match self {
            EntityKind::Enemy(e) => Some(e),
            _ => None,
        }
    }

    pub fn as_town(&self) -> Option<&TownTemplate> {
        match self {
            EntityKind::Town(t) => Some(t),
            _ => None,
        }
    }
}

/// A treasure chest lying in the overworld
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Treasure {
    pub gold: u32,
}

// ============================================================================
// Combat Stats
// ============================================================================

/// Health pool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Health {
    pub current: i32,
    pub max: i32,
}

impl Health {
    pub fn new(max: i32) -> Self {
        Self { current: max, max }
    }

    pub fn take_damage(&mut self, amount: i32) -> i32 {
        let actual = amount.max(0).min(self.current);
        self.current -= actual;
        actual
    }

    pub fn heal(&mut self, amount: i32) -> i32 {
        let actual = amount.max(0).min(self.max - self.current);
        self.current += actual;
        actual
    }

    pub fn restore_full(&mut self) {
        self.current = self.max;
    }

    pub fn is_dead(&self) -> bool {
        self.current <= 0
    }

    pub fn percentage(&self) -> f32 {
        if self.max <= 0 {
            return 0.0;
        }
        self.current as f32 / self.max as f32
    }
}

/// Mana pool for magic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mana {
    pub current: i32,
    pub max: i32,
}

impl Mana {
    pub fn new(max: i32) -> Self {
        Self { current: max, max }
    }

    pub fn spend(&mut self, amount: i32) -> bool {
        if self.current >= amount {
            self.current -= amount;
            true
        } else {
            false
        }
    }

    /// Restore up to `amount`, returns how much was actually restored
    pub fn restore(&mut self, amount: i32) -> i32 {
        let actual = amount.max(0).min(self.max - self.current);
        self.current += actual;
        actual
    }

    pub fn restore_full(&mut self) {
        self.current = self.max;
    }

    pub fn percentage(&self) -> f32 {
        if self.max <= 0 {
            return 0.0;
        }
        self.current as f32 / self.max as f32
    }
}

/// Experience and level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Experience {
    pub level: u32,
    pub current_xp: u32,
    pub xp_to_next: u32,
}

impl Experience {
    pub fn new(xp_to_next: u32) -> Self {
        Self {
            level: 1,
            current_xp: 0,
            xp_to_next: xp_to_next.max(1),
        }
    }

    /// Bank XP without resolving level-ups (see `progression::check_level_ups`)
    pub fn add_xp(&mut self, amount: u32) {
        self.current_xp = self.current_xp.saturating_add(amount);
    }

    pub fn can_level_up(&self) -> bool {
        self.current_xp >= self.xp_to_next
    }
}

impl Default for Experience {
    fn default() -> Self {
        Self::new(100)
    }
}

// ============================================================================
// Status Effects
// ============================================================================

/// Transient battle statuses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusEffect {
    /// Halves the next incoming enemy hit, then wears off
    Defending,
}

/// Collection of active status effects. Each status is held at most once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusEffects {
    pub effects: Vec<StatusEffect>,
}
