//! Sister's Quest, a single-screen dodge-and-collect arcade game.
//!
//! The library is the fixed-tick simulation core plus a crossterm backend
//! in [`display`]; the binary wires them to a real terminal.

pub mod assets;
pub mod audio;
pub mod clock;
pub mod config;
pub mod crawl;
pub mod cutscene;
pub mod display;
pub mod entities;
pub mod error;
pub mod input;
pub mod particles;
pub mod player;
pub mod powerup;
pub mod projectile;
pub mod render;
pub mod session;

pub use error::{GameError, Result};
pub use session::GameSession;
