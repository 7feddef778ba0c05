//! Movements: the unit of exchange between move generation, search and
//! the game session.

use std::fmt;

use crate::board::board::Board;
use crate::board::square::{square_name, Coord};
use crate::pieces::piece::PieceRef;

/// A candidate move: a piece, a destination square and a score.
///
/// The score starts at zero and is filled in by whoever ranks the
/// movement (the negamax search). A movement with no piece and no
/// destination is a search leaf that carries only a score.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Movement {
    pub piece: Option<PieceRef>,
    pub to: Option<Coord>,
    pub score: i32,
}

impl Movement {
    pub fn new(piece: PieceRef, to: Coord) -> Self {
        Movement {
            piece: Some(piece),
            to: Some(to),
            score: 0,
        }
    }

    /// A leaf movement: terminal score only, nothing to play.
    pub fn leaf(score: i32) -> Self {
        Movement {
            piece: None,
            to: None,
            score,
        }
    }

    /// True when there is an actual move to play.
    pub fn is_playable(&self) -> bool {
        self.piece.is_some() && self.to.is_some()
    }

    /// Human-readable description against a concrete board, in the shape
    /// "queen a1 to d4 (score = 120)".
    pub fn describe(&self, board: &Board) -> String {
        match (self.piece, self.to) {
            (Some(piece_ref), Some(to)) => {
                let piece = board.piece(piece_ref);
                let from = piece
                    .square()
                    .map(|sq| square_name(sq, board.n_rows()))
                    .unwrap_or_else(|| "X".to_string());
                format!(
                    "{} {} to {} (score = {})",
                    piece.kind().name(),
                    from,
                    square_name(to, board.n_rows()),
                    self.score
                )
            }
            _ => format!("no movement -> score: {}", self.score),
        }
    }
}

impl fmt::Display for Movement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.piece, self.to) {
            (Some(piece_ref), Some(to)) => write!(
                f,
                "{:?} piece {} to ({}, {}) (score = {})",
                piece_ref.side, piece_ref.index, to.0, to.1, self.score
            ),
            _ => write!(f, "no movement -> score: {}", self.score),
        }
    }
}
