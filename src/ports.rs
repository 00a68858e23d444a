use std::io;

use tracing::warn;

use crate::entities::{Faction, PlayerSlot};
use crate::vector::Vector2;

// Collaborators the engine calls into.  The engine never depends on their
// results: failures are logged and the simulation carries on.

/// What to draw at a position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sprite {
    Plane(PlayerSlot),
    Explosion { slot: PlayerSlot, frame: u32 },
    Enemy,
    Bullet(Faction),
}

/// Backdrop keyed by the match state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Background {
    Lives2,
    Lives1,
    Lives0,
    PlayersLost,
    EnemiesLost,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sound {
    Explosion,
    Song,
}

pub trait Renderer {
    fn background(&mut self, background: Background) -> io::Result<()>;
    fn draw(&mut self, sprite: Sprite, position: Vector2) -> io::Result<()>;
    fn present(&mut self) -> io::Result<()> {
        Ok(())
    }
}

pub trait Audio {
    fn play(&mut self, sound: Sound) -> io::Result<()>;
}

/// Audio sink that discards every request.
#[derive(Clone, Copy, Debug, Default)]
pub struct Silence;

impl Audio for Silence {
    fn play(&mut self, _sound: Sound) -> io::Result<()> {
        Ok(())
    }
}

pub(crate) fn play_or_warn(audio: &mut dyn Audio, sound: Sound) {
    if let Err(error) = audio.play(sound) {
        warn!(?sound, %error, "audio request failed");
    }
}

pub(crate) fn draw_or_warn(renderer: &mut dyn Renderer, sprite: Sprite, position: Vector2) {
    if let Err(error) = renderer.draw(sprite, position) {
        warn!(?sprite, %error, "draw failed");
    }
}
