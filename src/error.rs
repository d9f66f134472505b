use crate::cell::Cell;
use thiserror::Error;

/// Which end of a path query a precondition refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Endpoint {
    Start,
    Goal,
}

impl core::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match self {
            Endpoint::Start => write!(f, "start"),
            Endpoint::Goal => write!(f, "goal"),
        }
    }
}

/// Precondition violations, detected once before any search begins. An unreachable goal is
/// not an error; it is reported as an absent path.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    #[error("grid has no cells")]
    EmptyGrid,

    #[error("row {row} has length {len}, expected {expected}")]
    RaggedRow {
        row: usize,
        len: usize,
        expected: usize,
    },

    #[error("{endpoint} {cell} lies outside the {rows}x{cols} grid")]
    OutOfBounds {
        endpoint: Endpoint,
        cell: Cell,
        rows: usize,
        cols: usize,
    },
}
