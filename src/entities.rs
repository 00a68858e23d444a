//! Game entity types — plain data plus the few helpers every entity shares.
//!
//! Behaviour lives next to each type (`player`, `enemy`, `bullet`) and in
//! the per-tick update (`compute`).

use std::ops::{BitOr, BitOrAssign};

use crate::collision::Aabb;
use crate::vector::Vector2;

pub type EntityId = u64;

// ── Sides ─────────────────────────────────────────────────────────────────────

/// Which side a plane or bullet fights for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Faction {
    Player,
    Enemy,
}

/// One of the two human-controlled planes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PlayerSlot {
    One,
    Two,
}

impl PlayerSlot {
    pub const ALL: [PlayerSlot; 2] = [PlayerSlot::One, PlayerSlot::Two];

    pub fn index(self) -> usize {
        match self {
            PlayerSlot::One => 0,
            PlayerSlot::Two => 1,
        }
    }
}

// ── Input ─────────────────────────────────────────────────────────────────────

/// Held-direction bitmask for one player; bits combine freely.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Direction(u8);

impl Direction {
    pub const NONE: Direction = Direction(0);
    pub const FORWARD: Direction = Direction(0x01);
    pub const BACKWARD: Direction = Direction(0x02);
    pub const LEFT: Direction = Direction(0x04);
    pub const RIGHT: Direction = Direction(0x08);

    pub fn contains(self, other: Direction) -> bool {
        other.0 != 0 && self.0 & other.0 == other.0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for Direction {
    type Output = Direction;

    fn bitor(self, rhs: Direction) -> Direction {
        Direction(self.0 | rhs.0)
    }
}

impl BitOrAssign for Direction {
    fn bitor_assign(&mut self, rhs: Direction) {
        self.0 |= rhs.0;
    }
}

// ── Bodies ────────────────────────────────────────────────────────────────────

/// Sprite dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Position, velocity and extent shared by every on-screen entity.
/// The bounding box is centred on `position`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Body {
    pub position: Vector2,
    pub velocity: Vector2,
    pub size: Size,
}

impl Body {
    pub fn new(position: Vector2, size: Size) -> Self {
        Self {
            position,
            velocity: Vector2::ZERO,
            size,
        }
    }

    /// Euler step: `position += velocity * dt`.
    pub fn integrate(&mut self, dt: f64) {
        self.position += self.velocity * dt;
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::centered(self.position, self.size)
    }
}

// ── Projectiles ───────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Bullet {
    pub id: EntityId,
    pub body: Body,
    pub faction: Faction,
    /// Cleared when the bullet scores a hit; the cull phase removes it.
    pub alive: bool,
}

// ── Enemies ───────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SweepDirection {
    Left,
    Right,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    pub id: EntityId,
    pub body: Body,
    pub sweep: SweepDirection,
    pub shoot_cooldown: i32,
    /// Set when a player bullet scores on this plane.  Does not remove it;
    /// enemies only leave the field through the vertical bounds.
    pub hit: bool,
}

/// The three enemies of the current wave, by id, in spawn order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Wave(pub [EntityId; 3]);

// ── Players ───────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExplosionState {
    Alive,
    Exploding { frame: u32 },
}

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub slot: PlayerSlot,
    pub body: Body,
    pub fire_cooldown: i32,
    pub explosion: ExplosionState,
    /// Where the explosion animation is drawn; frozen when it starts.
    pub explosion_position: Vector2,
    pub explosion_frames: u32,
    /// Seconds of simulated flight, reserved for sound pacing.
    pub timer: f64,
    pub anchor: Vector2,
}

// ── Match ─────────────────────────────────────────────────────────────────────

/// Life counters of both sides.  Each runs 2 → 1 → 0 → -1, where -1 means
/// that side has lost and the counter is frozen until a new match.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MatchState {
    pub player_lives: i32,
    pub enemy_lives: i32,
}

pub const LOST: i32 = -1;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Players,
    Enemies,
}

impl MatchState {
    pub fn new(starting_lives: i32) -> Self {
        Self {
            player_lives: starting_lives,
            enemy_lives: starting_lives,
        }
    }

    /// The side that has lost, if the match is decided.
    pub fn loser(&self) -> Option<Side> {
        if self.enemy_lives == LOST {
            Some(Side::Enemies)
        } else if self.player_lives == LOST {
            Some(Side::Players)
        } else {
            None
        }
    }

    pub fn is_over(&self) -> bool {
        self.loser().is_some()
    }
}
