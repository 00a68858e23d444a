//! Plain-text match snapshots.
//!
//! ```text
//! Plane1: <x> <y>
//! Plane2: <x> <y>
//! Enemy1: <x> <y>
//! Enemy2: <x> <y>
//! Enemy3: <x> <y>
//! FriendlyLives: <int>
//! EnemyLives: <int>
//! ```
//!
//! Records are positional: the labels are checked but carry no meaning of
//! their own.

use std::fs;
use std::path::Path;

use tracing::info;

use crate::compute::World;
use crate::entities::{MatchState, PlayerSlot, LOST};
use crate::error::{PersistenceError, Result};
use crate::player::Players;
use crate::vector::Vector2;

const PLANE_LABELS: [&str; 2] = ["Plane1:", "Plane2:"];
const ENEMY_LABELS: [&str; 3] = ["Enemy1:", "Enemy2:", "Enemy3:"];
const PLAYER_LIVES_LABEL: &str = "FriendlyLives:";
const ENEMY_LIVES_LABEL: &str = "EnemyLives:";

const MAX_LIVES: i32 = 2;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SaveRecord {
    pub planes: [Vector2; 2],
    pub enemies: [Vector2; 3],
    pub lives: MatchState,
}

impl SaveRecord {
    /// Snapshot the tracked entities.  Fails if the current wave is no longer
    /// complete.
    pub fn capture(players: &Players, world: &World) -> Result<Self> {
        Ok(Self {
            planes: PlayerSlot::ALL.map(|slot| players[slot].position()),
            enemies: world.wave_positions()?,
            lives: world.lives,
        })
    }

    /// Put every tracked entity back where the record says.  The world is
    /// left untouched if the current wave is incomplete.
    pub fn apply(&self, players: &mut Players, world: &mut World) -> Result<()> {
        world.place_wave(self.enemies)?;
        for (slot, position) in PlayerSlot::ALL.into_iter().zip(self.planes) {
            let body = &mut players[slot].body;
            body.velocity = Vector2::ZERO;
            body.position = position;
        }
        world.lives = self.lives;
        Ok(())
    }

    pub fn encode(&self) -> String {
        let mut lines = Vec::with_capacity(7);
        for (label, p) in PLANE_LABELS.iter().zip(self.planes) {
            lines.push(format!("{label} {} {}", p.x, p.y));
        }
        for (label, p) in ENEMY_LABELS.iter().zip(self.enemies) {
            lines.push(format!("{label} {} {}", p.x, p.y));
        }
        lines.push(format!("{PLAYER_LIVES_LABEL} {}", self.lives.player_lives));
        lines.push(format!("{ENEMY_LIVES_LABEL} {}", self.lives.enemy_lives));
        lines.join("\n")
    }

    pub fn decode(text: &str) -> std::result::Result<Self, PersistenceError> {
        let mut lines = text.lines().filter(|l| !l.trim().is_empty());

        let mut planes = [Vector2::ZERO; 2];
        for (slot, label) in planes.iter_mut().zip(PLANE_LABELS) {
            *slot = read_position(lines.next(), label)?;
        }
        let mut enemies = [Vector2::ZERO; 3];
        for (slot, label) in enemies.iter_mut().zip(ENEMY_LABELS) {
            *slot = read_position(lines.next(), label)?;
        }
        let lives = MatchState {
            player_lives: read_lives(lines.next(), PLAYER_LIVES_LABEL)?,
            enemy_lives: read_lives(lines.next(), ENEMY_LIVES_LABEL)?,
        };

        if let Some(extra) = lines.next() {
            return Err(PersistenceError::TrailingData {
                line: extra.to_string(),
            });
        }
        Ok(Self {
            planes,
            enemies,
            lives,
        })
    }
}

// ── Files ─────────────────────────────────────────────────────────────────────

/// Snapshot and write, replacing whatever the file held.
pub fn save_game(path: &Path, players: &Players, world: &World) -> Result<SaveRecord> {
    let record = SaveRecord::capture(players, world)?;
    fs::write(path, record.encode()).map_err(PersistenceError::from)?;
    info!(path = %path.display(), lives = ?record.lives, "game saved");
    Ok(record)
}

/// Read, validate and apply a snapshot.  On any error nothing is changed.
pub fn load_game(path: &Path, players: &mut Players, world: &mut World) -> Result<SaveRecord> {
    let text = fs::read_to_string(path).map_err(PersistenceError::from)?;
    let record = SaveRecord::decode(&text)?;
    record.apply(players, world)?;
    info!(path = %path.display(), lives = ?record.lives, "game loaded");
    Ok(record)
}

// ── Line parsing ──────────────────────────────────────────────────────────────

/// Split a line into its fields after checking the leading label.
fn fields<'a>(
    line: Option<&'a str>,
    label: &'static str,
) -> std::result::Result<std::str::SplitWhitespace<'a>, PersistenceError> {
    let line = line.ok_or(PersistenceError::MissingLine { label })?;
    let mut fields = line.split_whitespace();
    match fields.next() {
        Some(found) if found == label => Ok(fields),
        found => Err(PersistenceError::UnexpectedLabel {
            expected: label,
            found: found.unwrap_or_default().to_string(),
        }),
    }
}

fn finish(
    mut fields: std::str::SplitWhitespace<'_>,
) -> std::result::Result<(), PersistenceError> {
    match fields.next() {
        Some(extra) => Err(PersistenceError::TrailingData {
            line: extra.to_string(),
        }),
        None => Ok(()),
    }
}

fn number<T: std::str::FromStr>(
    field: Option<&str>,
    label: &'static str,
) -> std::result::Result<T, PersistenceError> {
    let field = field.ok_or(PersistenceError::MissingField { label })?;
    field.parse().map_err(|_| PersistenceError::InvalidNumber {
        label,
        value: field.to_string(),
    })
}

fn read_position(
    line: Option<&str>,
    label: &'static str,
) -> std::result::Result<Vector2, PersistenceError> {
    let mut fields = fields(line, label)?;
    let x: f64 = number(fields.next(), label)?;
    let y: f64 = number(fields.next(), label)?;
    if !x.is_finite() || !y.is_finite() {
        return Err(PersistenceError::InvalidNumber {
            label,
            value: format!("{x} {y}"),
        });
    }
    finish(fields)?;
    Ok(Vector2::new(x, y))
}

fn read_lives(
    line: Option<&str>,
    label: &'static str,
) -> std::result::Result<i32, PersistenceError> {
    let mut fields = fields(line, label)?;
    let lives: i32 = number(fields.next(), label)?;
    if !(LOST..=MAX_LIVES).contains(&lives) {
        return Err(PersistenceError::LivesOutOfRange {
            label,
            value: lives,
        });
    }
    finish(fields)?;
    Ok(lives)
}
