use std::ops::{Index, IndexMut};

use tracing::debug;

use crate::assets::SpriteSheet;
use crate::bullet::Bullets;
use crate::entities::{Body, Direction, EntityId, ExplosionState, Faction, Player, PlayerSlot};
use crate::ports::{play_or_warn, Audio, Sound};
use crate::tuning::Tuning;
use crate::vector::Vector2;

impl Player {
    pub fn new(slot: PlayerSlot, sheet: &SpriteSheet, tuning: &Tuning) -> Self {
        let anchor = tuning.player.anchors[slot.index()];
        Self {
            slot,
            body: Body::new(anchor, sheet.plane),
            fire_cooldown: 0,
            explosion: ExplosionState::Alive,
            explosion_position: anchor,
            explosion_frames: sheet.explosion_frames,
            timer: 0.0,
            anchor,
        }
    }

    pub fn position(&self) -> Vector2 {
        self.body.position
    }

    pub fn is_exploding(&self) -> bool {
        matches!(self.explosion, ExplosionState::Exploding { .. })
    }

    /// Apply this tick's held directions, then keep the plane inside its
    /// flight band.  Each axis is clamped right after its impulse and a
    /// clamped axis loses its velocity.
    pub fn steer(&mut self, direction: Direction, tuning: &Tuning) {
        let impulse = tuning.player.impulse;
        let width = tuning.arena.width;
        let (min_y, max_y) = (tuning.player.min_y, tuning.player.max_y);
        let body = &mut self.body;

        if direction.contains(Direction::LEFT) {
            body.velocity.x -= impulse;
        }
        if body.position.x < 0.0 {
            body.position.x = 0.0;
            body.velocity.x = 0.0;
        }

        if direction.contains(Direction::RIGHT) {
            body.velocity.x += impulse;
        }
        if body.position.x > width {
            body.position.x = width;
            body.velocity.x = 0.0;
        }

        if direction.contains(Direction::FORWARD) {
            body.velocity.y -= impulse;
        }
        if body.position.y < min_y {
            body.position.y = min_y;
            body.velocity.y = 0.0;
        }

        if direction.contains(Direction::BACKWARD) {
            body.velocity.y += impulse;
        }
        if body.position.y > max_y {
            body.position.y = max_y;
            body.velocity.y = 0.0;
        }
    }

    /// Integrate position over `dt` seconds.
    pub fn update(&mut self, dt: f64) {
        self.body.integrate(dt);
        self.timer += dt;
    }

    /// One simulation tick of weapon cooldown.  Never drops below 1.
    pub fn cool_down(&mut self) {
        if self.fire_cooldown > 1 {
            self.fire_cooldown -= 1;
        }
    }

    pub fn shoot(&mut self, bullets: &mut Bullets) -> Option<EntityId> {
        bullets.fire(&mut self.fire_cooldown, self.body.position, Faction::Player)
    }

    pub fn explode(&mut self, audio: &mut dyn Audio) {
        debug!(slot = ?self.slot, x = self.body.position.x, y = self.body.position.y, "player exploded");
        self.explosion = ExplosionState::Exploding { frame: 0 };
        self.explosion_position = self.body.position;
        self.body.velocity = Vector2::ZERO;
        play_or_warn(audio, Sound::Explosion);
    }

    /// Step the explosion animation by one frame.  Returns `true` while more
    /// frames remain; `false` once the animation has finished (the plane is
    /// back to `Alive`) or if there was nothing to animate.
    pub fn advance_explosion(&mut self) -> bool {
        let ExplosionState::Exploding { frame } = self.explosion else {
            return false;
        };

        let next = frame + 1;
        if next >= self.explosion_frames {
            self.explosion = ExplosionState::Alive;
            self.body.velocity = Vector2::ZERO;
            return false;
        }
        self.explosion = ExplosionState::Exploding { frame: next };
        true
    }

    /// Back to the slot's spawn point, at rest.
    pub fn respawn(&mut self) {
        self.body.position = self.anchor;
        self.body.velocity = Vector2::ZERO;
    }

    /// Explode where it stands, then reappear at the spawn point.
    pub fn shot_down(&mut self, audio: &mut dyn Audio) {
        self.explode(audio);
        self.respawn();
    }
}

/// Both human-controlled planes, indexed by slot.
#[derive(Clone, Debug, PartialEq)]
pub struct Players([Player; 2]);

impl Players {
    pub fn new(sheet: &SpriteSheet, tuning: &Tuning) -> Self {
        Self(PlayerSlot::ALL.map(|slot| Player::new(slot, sheet, tuning)))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Player> {
        self.0.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Player> {
        self.0.iter_mut()
    }

    pub fn any_exploding(&self) -> bool {
        self.0.iter().any(Player::is_exploding)
    }
}

impl Index<PlayerSlot> for Players {
    type Output = Player;

    fn index(&self, slot: PlayerSlot) -> &Player {
        &self.0[slot.index()]
    }
}

impl IndexMut<PlayerSlot> for Players {
    fn index_mut(&mut self, slot: PlayerSlot) -> &mut Player {
        &mut self.0[slot.index()]
    }
}
