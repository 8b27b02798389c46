//! Error types for the game.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GameError {
    /// An AssetStore was asked for a key it does not hold.  Fatal at startup.
    #[error("Asset not found: {0}")]
    AssetNotFound(String),

    /// A sound or music track could not be played.  Logged, never fatal.
    #[error("Audio playback failed: {0}")]
    AudioPlayback(String),

    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, GameError>;
