//! Two-plane arcade battle engine.
//!
//! The library holds the whole simulation: entities, the per-tick world
//! update, collision, the save codec and the collaborator ports.  The binary
//! in `main.rs` is a terminal front end that drives it.

pub mod assets;
pub mod bullet;
pub mod collision;
pub mod compute;
pub mod config;
pub mod enemy;
pub mod entities;
pub mod error;
pub mod game;
pub mod persistence;
pub mod player;
pub mod ports;
pub mod timer;
pub mod tuning;
pub mod vector;
