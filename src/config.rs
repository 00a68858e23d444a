use std::{env, path::PathBuf, time::Duration};

// Runtime settings (not gameplay tuning), read from the environment.

pub const DEFAULT_TICK_MS: u64 = 16;
pub const DEFAULT_EXPLOSION_MS: u64 = 70;
pub const DEFAULT_SAVE_FILE: &str = "game_data.txt";
pub const DEFAULT_LOG_FILE: &str = "plane_battle.log";

fn millis(var: &str, default: u64) -> Duration {
    let millis = env::var(var)
        .ok()
        .and_then(|value| value.parse::<u64>().ok())
        .filter(|&ms| ms > 0)
        .unwrap_or(default);
    Duration::from_millis(millis)
}

/// Interval between simulation ticks.
pub fn tick_interval() -> Duration {
    millis("PLANES_TICK_MS", DEFAULT_TICK_MS)
}

/// Interval between explosion animation frames.
pub fn explosion_interval() -> Duration {
    millis("PLANES_EXPLOSION_MS", DEFAULT_EXPLOSION_MS)
}

pub fn save_file() -> PathBuf {
    env::var_os("PLANES_SAVE_FILE")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_SAVE_FILE))
}

/// Directory holding the sprite bitmaps.  Unset means built-in sizes.
pub fn data_dir() -> Option<PathBuf> {
    env::var_os("PLANES_DATA_DIR").map(PathBuf::from)
}

pub fn log_file() -> PathBuf {
    env::var_os("PLANES_LOG_FILE")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE))
}

#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub tick_interval: Duration,
    pub explosion_interval: Duration,
    pub save_file: PathBuf,
    pub data_dir: Option<PathBuf>,
}

impl RuntimeConfig {
    pub fn from_env() -> Self {
        Self {
            tick_interval: tick_interval(),
            explosion_interval: explosion_interval(),
            save_file: save_file(),
            data_dir: data_dir(),
        }
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_millis(DEFAULT_TICK_MS),
            explosion_interval: Duration::from_millis(DEFAULT_EXPLOSION_MS),
            save_file: PathBuf::from(DEFAULT_SAVE_FILE),
            data_dir: None,
        }
    }
}
