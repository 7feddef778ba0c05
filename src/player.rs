//! Sides and players.
//!
//! A game always has exactly two sides. The two `Player` values are owned
//! together by the game session and refer to each other by `Side` rather
//! than holding back-references, so "my opponent" is always
//! `side.opponent()` looked up in the session.

use crate::board::board::Board;
use crate::engine::difficulty::Difficulty;
use crate::pieces::movement::Movement;

/// One of the two competing sides. White moves first.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Side {
    White,
    Black,
}

impl Side {
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Side::White => 0,
            Side::Black => 1,
        }
    }

    #[inline]
    pub const fn opponent(self) -> Self {
        match self {
            Side::White => Side::Black,
            Side::Black => Side::White,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Side::White => "white",
            Side::Black => "black",
        }
    }
}

/// Who controls a side.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PlayerKind {
    /// Moves are delivered from outside (a UI collaborator or the CLI).
    Human,
    /// Moves are chosen by the search, gated by a per-player difficulty.
    Computer { difficulty: Difficulty },
}

/// A player bound to one side of a game.
///
/// Pieces live in the board's per-side collections; the player addresses
/// them through its `Side`. The `has_turn` flag mirrors whose move it is at
/// the session level.
#[derive(Clone, Debug)]
pub struct Player {
    side: Side,
    kind: PlayerKind,
    has_turn: bool,
}

impl Player {
    pub fn new(side: Side, kind: PlayerKind) -> Self {
        Player {
            side,
            kind,
            has_turn: false,
        }
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn kind(&self) -> PlayerKind {
        self.kind
    }

    pub fn is_computer(&self) -> bool {
        matches!(self.kind, PlayerKind::Computer { .. })
    }

    pub fn is_human(&self) -> bool {
        matches!(self.kind, PlayerKind::Human)
    }

    pub fn has_turn(&self) -> bool {
        self.has_turn
    }

    /// Marks this player as next to move, recomputing its legal movements.
    pub fn gain_turn(&mut self, board: &mut Board) {
        board.def_legal_moves(self.side);
        self.has_turn = true;
    }

    /// Clears the turn flag; the session hands the turn to the opponent.
    pub fn pass_turn(&mut self) {
        self.has_turn = false;
    }

    /// All movements this player could make in the current position.
    ///
    /// Forces a recomputation of every owned living piece, then flattens
    /// the cached legal sets in piece order.
    pub fn moves_available(&self, board: &mut Board) -> Vec<Movement> {
        board.movements_for(self.side)
    }

    /// Number of this player's pieces still in play.
    pub fn living_pieces(&self, board: &Board) -> usize {
        board.pieces(self.side).iter().filter(|p| p.is_living()).count()
    }
}
