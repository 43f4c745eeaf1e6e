//! Error types for autotile construction

use thiserror::Error;

use crate::parts::Corner;

/// Errors raised while building autotile tables.
///
/// Lookups on a successfully built table never fail, so every variant here
/// is reported at construction time.
#[derive(Debug, Error)]
pub enum AutotileError {
    #[error("Offset ({dx}, {dy}) is not one of the 8 neighbor directions")]
    InvalidDirectionVector { dx: i32, dy: i32 },
    #[error("Unknown direction name: {0}")]
    UnknownDirection(String),
    #[error("Bitmask {bitmask:#010b} matches {matches} tile definitions (expected exactly one)")]
    AmbiguousOrMissingTile { bitmask: u8, matches: usize },
    #[error("No {corner:?} part matches bitmask {bitmask:#010b}")]
    MissingPart { corner: Corner, bitmask: u8 },
    #[error("Dimension mismatch: {0}")]
    DimensionMismatch(String),
    #[error("Invalid autotile config: {0}")]
    Config(String),
    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, AutotileError>;
