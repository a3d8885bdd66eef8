//! Core types shared by every module

pub mod config;
pub mod error;
pub mod types;

pub use config::MovementConfig;
pub use error::{MoveError, Result};
pub use types::{Mp, UnitId};
