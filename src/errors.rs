//! Errors used throughout the variant engine.
//!
//! This module defines the canonical error type returned by board setup,
//! move application and search. The enum `Errors` is used as the single
//! error type across the crate to simplify propagation and matching.
//! Configuration problems (bad piece symbols, unsupported variant options)
//! fail fast at setup time; illegal-move variants signal caller contract
//! violations on the checked entry points. Having no legal move is *not* an
//! error in game terms — boards expose it as an ordinary state — so
//! `NoLegalMoves` only appears when a caller asks for a move selection
//! from a position that has none.

use crate::board::square::Coord;

/// Unified error type for the variant engine.
#[derive(Debug, PartialEq, Eq)]
pub enum Errors {
    /// A piece descriptor used a kind character outside `K Q R B N P V D`.
    UnknownPieceSymbol(char),

    /// A square name (for example `"e4"`) failed to parse or named a square
    /// outside this board.
    InvalidSquareName(String),

    /// An internal coordinate fell outside the board grid.
    OutOfBounds(Coord),

    /// A move was requested to a destination that is not in the piece's
    /// current legal set. Payload: origin and destination square names.
    IllegalMove { from: String, to: String },

    /// A move request addressed a square with no piece on it.
    NoPieceOnSquare(String),

    /// Killer games accept only 8, 12 or 16 diamonds per side.
    InvalidDiamondCount(usize),

    /// Pawn Battle boards accept only 4 to 8 columns.
    InvalidColumnCount(usize),

    /// A move selection was requested for a side with no legal movements.
    NoLegalMoves,

    /// A session operation was attempted outside the `InProgress` state.
    GameNotInProgress,
}
