use crate::bullet::Bullets;
use crate::entities::{Body, Enemy, EntityId, Faction, Size, SweepDirection};
use crate::tuning::EnemyTuning;
use crate::vector::Vector2;

impl Enemy {
    pub fn new(id: EntityId, position: Vector2, size: Size, tuning: &EnemyTuning) -> Self {
        Self {
            id,
            body: Body::new(position, size),
            sweep: SweepDirection::Right,
            shoot_cooldown: tuning.initial_cooldown,
            hit: false,
        }
    }

    pub fn position(&self) -> Vector2 {
        self.body.position
    }

    /// Horizontal patrol: turn around at either edge of the sweep band, then
    /// take one step.  Steps never carry the plane past the band edges.
    pub fn sweep(&mut self, tuning: &EnemyTuning) {
        let x = self.body.position.x;
        if x <= tuning.sweep_min_x {
            self.sweep = SweepDirection::Right;
        } else if x >= tuning.sweep_max_x {
            self.sweep = SweepDirection::Left;
        }

        self.body.position.x = match self.sweep {
            SweepDirection::Right => (x + tuning.sweep_step).min(tuning.sweep_max_x),
            SweepDirection::Left => (x - tuning.sweep_step).max(tuning.sweep_min_x),
        };
    }

    pub fn cool_down(&mut self) {
        self.shoot_cooldown -= 1;
    }

    pub fn shoot(&mut self, bullets: &mut Bullets) -> Option<EntityId> {
        bullets.fire(&mut self.shoot_cooldown, self.body.position, Faction::Enemy)
    }
}
