//! The match world and its per-tick update.
//!
//! `World` owns every bullet and enemy.  The two players belong to the
//! caller and are lent to `tick` for collision handling.

use tracing::{debug, info};

use crate::assets::SpriteSheet;
use crate::bullet::Bullets;
use crate::collision::bodies_collide;
use crate::entities::{Enemy, EntityId, Faction, MatchState, Wave, LOST};
use crate::error::{GameError, Result};
use crate::player::Players;
use crate::ports::{Audio, Background};
use crate::tuning::Tuning;
use crate::vector::Vector2;

#[derive(Clone, Debug)]
pub struct World {
    pub bullets: Bullets,
    pub enemies: Vec<Enemy>,
    pub lives: MatchState,
    pub frame: u64,
    wave: Option<Wave>,
    next_enemy_id: EntityId,
    sheet: SpriteSheet,
    tuning: Tuning,
}

impl World {
    /// A fresh match with the first wave already in place.
    pub fn new(sheet: SpriteSheet, tuning: Tuning) -> Self {
        let mut world = Self {
            bullets: Bullets::new(sheet.bullet, tuning.bullet),
            enemies: Vec::new(),
            lives: MatchState::new(tuning.player.starting_lives),
            frame: 0,
            wave: None,
            next_enemy_id: 1,
            sheet,
            tuning,
        };
        world.spawn_wave();
        world
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn sheet(&self) -> &SpriteSheet {
        &self.sheet
    }

    pub fn wave(&self) -> Option<Wave> {
        self.wave
    }

    pub fn enemy(&self, id: EntityId) -> Option<&Enemy> {
        self.enemies.iter().find(|e| e.id == id)
    }

    // ── Spawning ─────────────────────────────────────────────────────────────

    pub fn spawn_enemy(&mut self, position: Vector2) -> EntityId {
        let id = self.next_enemy_id;
        self.next_enemy_id = self.next_enemy_id.wrapping_add(1);
        self.enemies
            .push(Enemy::new(id, position, self.sheet.enemy, &self.tuning.enemy));
        id
    }

    /// Three enemies at the wave anchors.
    pub fn spawn_wave(&mut self) -> Wave {
        let anchors = self.tuning.enemy.wave_anchors;
        let wave = Wave(anchors.map(|anchor| self.spawn_enemy(anchor)));
        self.wave = Some(wave);
        info!(frame = self.frame, ids = ?wave.0, "enemy wave spawned");
        wave
    }

    // ── Wave access ──────────────────────────────────────────────────────────

    /// Indices into `enemies` of the current wave, in spawn order.
    fn wave_slots(&self) -> Result<[usize; 3]> {
        let Wave(ids) = self.wave.ok_or_else(|| GameError::InvariantViolation {
            what: "no enemy wave has been spawned".to_string(),
        })?;

        let mut slots = [0; 3];
        for (slot, id) in slots.iter_mut().zip(ids) {
            *slot = self
                .enemies
                .iter()
                .position(|e| e.id == id)
                .ok_or_else(|| GameError::InvariantViolation {
                    what: format!("wave enemy {id} is no longer in the world"),
                })?;
        }
        Ok(slots)
    }

    pub fn wave_positions(&self) -> Result<[Vector2; 3]> {
        Ok(self.wave_slots()?.map(|i| self.enemies[i].position()))
    }

    /// Move the three wave enemies.  Nothing moves unless all three exist.
    pub fn place_wave(&mut self, positions: [Vector2; 3]) -> Result<()> {
        let slots = self.wave_slots()?;
        for (i, position) in slots.into_iter().zip(positions) {
            let body = &mut self.enemies[i].body;
            body.position = position;
            body.velocity = Vector2::ZERO;
        }
        Ok(())
    }

    // ── Per-frame tick ───────────────────────────────────────────────────────

    /// Advance the match by one tick.
    pub fn tick(&mut self, players: &mut Players, audio: &mut dyn Audio) {
        self.frame += 1;

        // 0. Weapon cooldowns of the players.
        for player in players.iter_mut() {
            player.cool_down();
        }

        // 1. Enemy AI, frozen once the match is decided.
        if !self.lives.is_over() {
            for enemy in &mut self.enemies {
                enemy.cool_down();
                enemy.sweep(&self.tuning.enemy);
                enemy.shoot(&mut self.bullets);
            }
        }

        // 2. Bullets.
        self.bullets.advance_all();

        // 3. Enemy planes ramming players.
        for enemy in &self.enemies {
            for player in players.iter_mut() {
                if bodies_collide(&enemy.body, &player.body) {
                    debug!(slot = ?player.slot, enemy = enemy.id, "player rammed");
                    player.shot_down(audio);
                }
            }
        }

        // 4. Player bullets against enemies.
        self.resolve_enemy_hits();

        // 5. Enemy bullets against players.
        if !self.lives.is_over() {
            self.resolve_player_hits(players, audio);
        }

        // 6. Next wave.
        if self.enemies.is_empty() && self.lives.enemy_lives != LOST {
            self.spawn_wave();
        }

        // 7. Cull.
        self.cull();
    }

    fn resolve_enemy_hits(&mut self) {
        let lives = &mut self.lives;
        let mut won = false;
        for bullet in self.bullets.iter_mut() {
            if lives.enemy_lives == LOST {
                break;
            }
            if !bullet.alive || bullet.faction != Faction::Player {
                continue;
            }

            let Some(enemy) = self
                .enemies
                .iter_mut()
                .find(|e| bodies_collide(&bullet.body, &e.body))
            else {
                continue;
            };

            bullet.alive = false;
            if lives.enemy_lives > 0 {
                enemy.hit = true;
                lives.enemy_lives -= 1;
                debug!(enemy = enemy.id, bullet = bullet.id, enemy_lives = lives.enemy_lives, "enemy hit");
            } else {
                lives.enemy_lives = LOST;
                won = true;
                info!(frame = self.frame, enemy = enemy.id, "enemy side lost");
            }
        }

        if won {
            self.ground_wave_leader();
        }
    }

    /// The wave leader returns to its anchor and stays there.  The wave
    /// itself stays complete so the match can still be saved and loaded.
    fn ground_wave_leader(&mut self) {
        let Some(Wave([leader, ..])) = self.wave else {
            return;
        };
        let anchor = self.tuning.enemy.wave_anchors[0];
        if let Some(enemy) = self.enemies.iter_mut().find(|e| e.id == leader) {
            enemy.body.position = anchor;
            enemy.body.velocity = Vector2::ZERO;
        }
    }

    fn resolve_player_hits(&mut self, players: &mut Players, audio: &mut dyn Audio) {
        let lives = &mut self.lives;
        for bullet in self.bullets.iter_mut() {
            if lives.player_lives == LOST {
                break;
            }
            if !bullet.alive || bullet.faction != Faction::Enemy {
                continue;
            }

            let Some(player) = players
                .iter_mut()
                .find(|p| bodies_collide(&bullet.body, &p.body))
            else {
                continue;
            };

            bullet.alive = false;
            if lives.player_lives > 0 {
                lives.player_lives -= 1;
                debug!(slot = ?player.slot, bullet = bullet.id, player_lives = lives.player_lives, "player hit");
            } else {
                player.shot_down(audio);
                lives.player_lives = LOST;
                info!(frame = self.frame, slot = ?player.slot, "player side lost");
            }
        }
    }

    fn cull(&mut self) {
        let (top, bottom) = (self.tuning.arena.cull_top, self.tuning.arena.cull_bottom);
        let in_field = |y: f64| (top..=bottom).contains(&y);

        if self.lives.is_over() {
            self.bullets.clear();
        } else {
            self.bullets
                .retain(|b| b.alive && in_field(b.body.position.y));
        }
        self.enemies
            .retain(|e| in_field(e.body.position.y));
    }

    // ── Presentation key ─────────────────────────────────────────────────────

    /// Backdrop for the current life counters.  An enemy defeat outranks
    /// everything else.
    pub fn background(&self) -> Background {
        let MatchState {
            player_lives,
            enemy_lives,
        } = self.lives;

        if enemy_lives == LOST {
            return Background::EnemiesLost;
        }
        match player_lives {
            l if l >= 2 => Background::Lives2,
            1 => Background::Lives1,
            0 => Background::Lives0,
            _ => Background::PlayersLost,
        }
    }
}
