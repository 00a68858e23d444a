use std::path::Path;

use tracing::info;

use crate::entities::Size;
use crate::error::{GameError, Result};

const PLANE_FILE: &str = "planeimgandmask.bmp";
const ENEMY_FILE: &str = "enemy_plane.bmp";
const BULLET_FILE: &str = "bullet1.bmp";
const EXPLOSION_FILE: &str = "explosion.bmp";

/// One backdrop per match state; all must be present for a data directory
/// to be usable.
const BACKGROUND_FILES: [&str; 5] = [
    "background2.bmp",
    "background1.bmp",
    "background0.bmp",
    "background-1.bmp",
    "background-2.bmp",
];

/// Explosion sheets are a grid of square frames of this many pixels.
const EXPLOSION_FRAME_EDGE: u32 = 128;

/// Sprite extents the simulation needs for collision and animation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpriteSheet {
    pub plane: Size,
    pub enemy: Size,
    pub bullet: Size,
    pub explosion: Size,
    pub explosion_frames: u32,
}

impl Default for SpriteSheet {
    fn default() -> Self {
        Self {
            plane: Size::new(100.0, 100.0),
            enemy: Size::new(100.0, 100.0),
            bullet: Size::new(10.0, 20.0),
            explosion: Size::new(128.0, 128.0),
            explosion_frames: 16,
        }
    }
}

impl SpriteSheet {
    /// Read sprite dimensions from the bitmaps in `dir`.
    pub fn load(dir: &Path) -> Result<Self> {
        let plane = dimensions(dir, PLANE_FILE)?;
        let enemy = dimensions(dir, ENEMY_FILE)?;
        let bullet = dimensions(dir, BULLET_FILE)?;
        let (sheet_w, sheet_h) = dimensions(dir, EXPLOSION_FILE)?;

        let frames = (sheet_w / EXPLOSION_FRAME_EDGE) * (sheet_h / EXPLOSION_FRAME_EDGE);
        if frames == 0 {
            return Err(GameError::AssetLoad {
                path: dir.join(EXPLOSION_FILE),
                reason: format!(
                    "sheet {sheet_w}x{sheet_h} holds no {EXPLOSION_FRAME_EDGE}px frame"
                ),
            });
        }

        for background in BACKGROUND_FILES {
            dimensions(dir, background)?;
        }

        let sheet = Self {
            plane: to_size(plane),
            enemy: to_size(enemy),
            bullet: to_size(bullet),
            explosion: Size::new(EXPLOSION_FRAME_EDGE as f64, EXPLOSION_FRAME_EDGE as f64),
            explosion_frames: frames,
        };
        info!(dir = %dir.display(), ?sheet, "sprite sheet loaded");
        Ok(sheet)
    }
}

fn dimensions(dir: &Path, file: &str) -> Result<(u32, u32)> {
    let path = dir.join(file);
    image::image_dimensions(&path).map_err(|e| GameError::AssetLoad {
        path,
        reason: e.to_string(),
    })
}

fn to_size((width, height): (u32, u32)) -> Size {
    Size::new(width as f64, height as f64)
}
