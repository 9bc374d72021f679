use thiserror::Error;

use crate::grid::Position;

/// Configuration problems detected before a run starts. A run that fails
/// with one of these has not touched any state or emitted any snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VisualizerError {
    #[error("unknown {kind} algorithm '{id}' (expected one of: {expected})")]
    UnknownAlgorithm {
        kind: &'static str,
        id: String,
        expected: &'static str,
    },

    #[error("speed {0} is outside 1..=100")]
    InvalidSpeed(u8),

    #[error("position ({}, {}) is outside the {width}x{height} grid", .position.x, .position.y)]
    OutOfBounds {
        position: Position,
        width: usize,
        height: usize,
    },

    #[error("position ({}, {}) is a wall and cannot be a start or end point", .0.x, .0.y)]
    BlockedEndpoint(Position),
}

pub type Result<T> = std::result::Result<T, VisualizerError>;
