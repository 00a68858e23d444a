use crate::vector::Vector2;

// Gameplay tuning.
//
// Keep this separate from runtime configuration (tick rates, file paths),
// which lives in `config`.

// ── Arena ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy)]
pub struct ArenaTuning {
    /// Logical screen width in pixels; players are clamped to `[0, width]`.
    pub width: f64,

    /// Logical screen height in pixels.
    pub height: f64,

    /// Bullets and enemies outside `[cull_top, cull_bottom]` are removed.
    pub cull_top: f64,
    pub cull_bottom: f64,
}

impl Default for ArenaTuning {
    fn default() -> Self {
        Self {
            width: 1920.0,
            height: 1080.0,
            cull_top: 35.0,
            cull_bottom: 960.0,
        }
    }
}

// ── Players ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy)]
pub struct PlayerTuning {
    /// Velocity change per held direction per tick.
    pub impulse: f64,

    /// Vertical band the planes may fly in.
    pub min_y: f64,
    pub max_y: f64,

    /// Respawn points for player one and player two.
    pub anchors: [Vector2; 2],

    /// Lives each side starts a match with.
    pub starting_lives: i32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            impulse: 3.5,
            min_y: 300.0,
            max_y: 920.0,
            anchors: [Vector2::new(100.0, 900.0), Vector2::new(1800.0, 900.0)],
            starting_lives: 2,
        }
    }
}

// ── Enemies ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy)]
pub struct EnemyTuning {
    /// Horizontal sweep band.
    pub sweep_min_x: f64,
    pub sweep_max_x: f64,

    /// Horizontal distance covered per tick.
    pub sweep_step: f64,

    /// Shoot cooldown a freshly spawned enemy starts with.
    pub initial_cooldown: i32,

    /// Spawn points of the three planes of a wave.
    pub wave_anchors: [Vector2; 3],
}

impl Default for EnemyTuning {
    fn default() -> Self {
        Self {
            sweep_min_x: 200.0,
            sweep_max_x: 1700.0,
            sweep_step: 3.0,
            initial_cooldown: 150,
            wave_anchors: [
                Vector2::new(950.0, 70.0),
                Vector2::new(350.0, 70.0),
                Vector2::new(1550.0, 70.0),
            ],
        }
    }
}

// ── Bullets & shooting ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy)]
pub struct BulletTuning {
    /// Vertical distance covered per tick.
    pub speed: f64,

    /// A shooter may fire while its cooldown is below this value.
    pub fire_threshold: i32,

    /// Cooldown after a shot.
    pub fire_reset: i32,
}

impl Default for BulletTuning {
    fn default() -> Self {
        Self {
            speed: 3.0,
            fire_threshold: 5,
            fire_reset: 100,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Tuning {
    pub arena: ArenaTuning,
    pub player: PlayerTuning,
    pub enemy: EnemyTuning,
    pub bullet: BulletTuning,
}
