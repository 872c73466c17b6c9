pub mod config;
pub mod error;
pub mod types;

pub use config::HuntConfig;
pub use error::{HuntError, Result};
pub use types::{EntityId, Pose, POSITION_EPSILON};
