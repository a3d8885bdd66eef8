use thiserror::Error;

use crate::core::types::UnitId;
use crate::movement::hex::Coord;

#[derive(Error, Debug)]
pub enum MoveError {
    #[error("Coordinate off the board: {0}")]
    OutOfBounds(Coord),

    #[error("Unknown unit: {0}")]
    UnknownUnit(UnitId),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

impl MoveError {
    /// Off-map conditions are permanent for a coordinate; everything else is not
    pub fn is_out_of_bounds(&self) -> bool {
        matches!(self, MoveError::OutOfBounds(_))
    }
}

pub type Result<T> = std::result::Result<T, MoveError>;
