//! A playing session: both players, the world, and the explosion pulse.
//!
//! Front ends feed it held directions every frame plus discrete commands,
//! and ask it to draw.  Drawing never changes state.

use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::{info, warn};

use crate::assets::SpriteSheet;
use crate::compute::World;
use crate::entities::{Direction, ExplosionState, PlayerSlot};
use crate::error::Result;
use crate::persistence::{load_game, save_game};
use crate::player::Players;
use crate::ports::{draw_or_warn, play_or_warn, Audio, Renderer, Sound, Sprite};
use crate::timer::ExplosionTimer;
use crate::tuning::Tuning;

/// One-shot inputs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Shoot(PlayerSlot),
    SelfDestruct(PlayerSlot),
    Save,
    Load,
    Restart,
}

#[derive(Clone, Debug)]
pub struct Game {
    pub players: Players,
    pub world: World,
    explosions: ExplosionTimer,
    save_file: PathBuf,
}

impl Game {
    pub fn new(
        sheet: SpriteSheet,
        tuning: Tuning,
        explosion_interval: Duration,
        save_file: impl Into<PathBuf>,
    ) -> Self {
        Self {
            players: Players::new(&sheet, &tuning),
            world: World::new(sheet, tuning),
            explosions: ExplosionTimer::new(explosion_interval),
            save_file: save_file.into(),
        }
    }

    pub fn save_file(&self) -> &Path {
        &self.save_file
    }

    pub fn explosions(&self) -> &ExplosionTimer {
        &self.explosions
    }

    /// Handle one discrete input.  Save/load failures are returned and leave
    /// the session as it was.
    pub fn command(&mut self, command: Command, audio: &mut dyn Audio) -> Result<()> {
        match command {
            Command::Shoot(slot) => {
                self.players[slot].shoot(&mut self.world.bullets);
            }
            Command::SelfDestruct(slot) => {
                self.players[slot].shot_down(audio);
                self.explosions.arm();
            }
            Command::Save => {
                save_game(&self.save_file, &self.players, &self.world)?;
            }
            Command::Load => {
                load_game(&self.save_file, &mut self.players, &mut self.world)?;
                play_or_warn(audio, Sound::Song);
            }
            Command::Restart => {
                let sheet = *self.world.sheet();
                let tuning = *self.world.tuning();
                self.players = Players::new(&sheet, &tuning);
                self.world = World::new(sheet, tuning);
                self.explosions.stop();
                info!("new match started");
            }
        }
        Ok(())
    }

    /// One frame: steer and integrate the planes, tick the world, then let
    /// the explosion pulse catch up with `dt`.
    pub fn frame(&mut self, directions: [Direction; 2], dt: Duration, audio: &mut dyn Audio) {
        let tuning = *self.world.tuning();
        for (slot, direction) in PlayerSlot::ALL.into_iter().zip(directions) {
            let player = &mut self.players[slot];
            player.steer(direction, &tuning);
            player.update(dt.as_secs_f64());
        }

        self.world.tick(&mut self.players, audio);
        self.pulse_explosions(dt);
    }

    fn pulse_explosions(&mut self, dt: Duration) {
        if self.players.any_exploding() && !self.explosions.is_running() {
            self.explosions.arm();
        }

        for _ in 0..self.explosions.advance(dt) {
            let mut animating = false;
            for player in self.players.iter_mut() {
                animating |= player.advance_explosion();
            }
            if !animating {
                self.explosions.stop();
                break;
            }
        }
    }

    /// Issue draw calls for the current state.
    pub fn draw(&self, renderer: &mut dyn Renderer) {
        if let Err(error) = renderer.background(self.world.background()) {
            warn!(%error, "background draw failed");
        }

        if !self.world.lives.is_over() {
            for player in self.players.iter() {
                match player.explosion {
                    ExplosionState::Alive => {
                        draw_or_warn(renderer, Sprite::Plane(player.slot), player.position());
                    }
                    ExplosionState::Exploding { frame } => {
                        let sprite = Sprite::Explosion {
                            slot: player.slot,
                            frame,
                        };
                        draw_or_warn(renderer, sprite, player.explosion_position);
                    }
                }
            }
            for enemy in &self.world.enemies {
                draw_or_warn(renderer, Sprite::Enemy, enemy.position());
            }
        }

        for bullet in self.world.bullets.iter() {
            draw_or_warn(renderer, Sprite::Bullet(bullet.faction), bullet.body.position);
        }

        if let Err(error) = renderer.present() {
            warn!(%error, "present failed");
        }
    }
}
