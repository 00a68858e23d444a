use std::slice;

use crate::entities::{Body, Bullet, EntityId, Faction, Size};
use crate::tuning::BulletTuning;
use crate::vector::Vector2;

impl Bullet {
    /// Enemy bullets fall, player bullets climb.  No horizontal motion.
    pub fn advance(&mut self, speed: f64) {
        match self.faction {
            Faction::Enemy => self.body.position.y += speed,
            Faction::Player => self.body.position.y -= speed,
        }
    }
}

/// The world's bullet collection and the spawn API handed to shooters.
#[derive(Clone, Debug)]
pub struct Bullets {
    items: Vec<Bullet>,
    next_id: EntityId,
    size: Size,
    tuning: BulletTuning,
}

impl Bullets {
    pub fn new(size: Size, tuning: BulletTuning) -> Self {
        Self {
            items: Vec::new(),
            next_id: 1,
            size,
            tuning,
        }
    }

    /// Fire from `position` if `cooldown` allows it, resetting the cooldown.
    /// Shared gate for players and enemies.
    pub fn fire(
        &mut self,
        cooldown: &mut i32,
        position: Vector2,
        faction: Faction,
    ) -> Option<EntityId> {
        if *cooldown >= self.tuning.fire_threshold {
            return None;
        }
        *cooldown = self.tuning.fire_reset;
        Some(self.spawn(position, faction))
    }

    /// Unconditionally add a bullet.
    pub fn spawn(&mut self, position: Vector2, faction: Faction) -> EntityId {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        self.items.push(Bullet {
            id,
            body: Body::new(position, self.size),
            faction,
            alive: true,
        });
        id
    }

    pub fn advance_all(&mut self) {
        let speed = self.tuning.speed;
        for bullet in &mut self.items {
            bullet.advance(speed);
        }
    }

    pub fn retain(&mut self, keep: impl FnMut(&Bullet) -> bool) {
        self.items.retain(keep);
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn get(&self, id: EntityId) -> Option<&Bullet> {
        self.items.iter().find(|b| b.id == id)
    }

    pub fn iter(&self) -> slice::Iter<'_, Bullet> {
        self.items.iter()
    }

    pub fn iter_mut(&mut self) -> slice::IterMut<'_, Bullet> {
        self.items.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
