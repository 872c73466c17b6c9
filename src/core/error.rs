use glam::Vec3;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HuntError {
    /// A position identical to an already-registered one was registered
    /// again. The validity check should have rejected it, so this is a
    /// coordinator bug, not a recoverable condition.
    #[error("duplicate spawn position registered at ({}, {}, {})", .0.x, .0.y, .0.z)]
    DuplicateRegistration(Vec3),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("config parse error: {0}")]
    ConfigParseError(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, HuntError>;
