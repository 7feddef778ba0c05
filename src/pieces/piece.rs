//! Pieces and piece kinds.
//!
//! A kind is a tagged variant carrying its movement data: a direction
//! vector table plus a short/long flag for the pieces that share the
//! generic walk, and dedicated rules for pawns (pushes and diagonal
//! captures), kings (check-safety filtering) and diamonds (immobile).
//! Pawn state (double-step availability, promotion) lives on the piece
//! itself because it changes during play.

use crate::board::square::{square_name, Coord};
use crate::errors::Errors;
use crate::player::Side;

/// Index of a piece inside a board: its side plus its position in that
/// side's ordered collection. Stable across board clones, because cloning
/// serializes pieces in collection order.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PieceRef {
    pub side: Side,
    pub index: usize,
}

/// Piece kind. `Diamond` is the immobile capture target used by the killer
/// games; every other kind is a standard chess piece.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PieceKind {
    King,
    Queen,
    Rook,
    Bishop,
    Knight,
    Pawn,
    Diamond,
}

const ALL_DIRECTIONS: &[Coord] = &[
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

const ORTHOGONALS: &[Coord] = &[(-1, 0), (0, -1), (0, 1), (1, 0)];

const DIAGONALS: &[Coord] = &[(-1, -1), (-1, 1), (1, -1), (1, 1)];

const KNIGHT_JUMPS: &[Coord] = &[
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

impl PieceKind {
    /// Direction vector table for the generic walk. Pawns and diamonds
    /// have dedicated rules and no table.
    pub fn vectors(self) -> &'static [Coord] {
        match self {
            PieceKind::King | PieceKind::Queen => ALL_DIRECTIONS,
            PieceKind::Rook => ORTHOGONALS,
            PieceKind::Bishop => DIAGONALS,
            PieceKind::Knight => KNIGHT_JUMPS,
            PieceKind::Pawn | PieceKind::Diamond => &[],
        }
    }

    /// True for one-step movers, false for sliders.
    pub fn is_short(self) -> bool {
        match self {
            PieceKind::King | PieceKind::Knight => true,
            PieceKind::Queen | PieceKind::Rook | PieceKind::Bishop => false,
            PieceKind::Pawn | PieceKind::Diamond => true,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            PieceKind::King => "king",
            PieceKind::Queen => "queen",
            PieceKind::Rook => "rook",
            PieceKind::Bishop => "bishop",
            PieceKind::Knight => "knight",
            PieceKind::Pawn => "pawn",
            PieceKind::Diamond => "diamond",
        }
    }
}

/// A piece in a variant game.
#[derive(Clone, Debug)]
pub struct Piece {
    kind: PieceKind,
    side: Side,
    square: Option<Coord>,
    living: bool,
    captured: bool,
    /// Pawn only: double step still available.
    first_move: bool,
    /// Pawn only: reached its promotion row.
    promoted: bool,
    /// Pawn only: fixed when the pawn is first placed.
    promotion_row: i8,
    legal_moves: Vec<Coord>,
    protected: Vec<Coord>,
}

impl Piece {
    /// Makes a new piece, off-board until `start_square` places it.
    pub fn new(kind: PieceKind, side: Side) -> Self {
        Piece {
            kind,
            side,
            square: None,
            living: false,
            captured: false,
            first_move: kind == PieceKind::Pawn,
            promoted: false,
            promotion_row: 0,
            legal_moves: Vec::new(),
            protected: Vec::new(),
        }
    }

    /// Decodes a descriptor kind character into a fresh piece.
    ///
    /// `P` is a pawn that may still double-step, `V` one that may not.
    /// Unknown characters are a configuration error.
    pub fn from_symbol(symbol: char, side: Side) -> Result<Self, Errors> {
        let piece = match symbol {
            'K' => Piece::new(PieceKind::King, side),
            'Q' => Piece::new(PieceKind::Queen, side),
            'R' => Piece::new(PieceKind::Rook, side),
            'B' => Piece::new(PieceKind::Bishop, side),
            'N' => Piece::new(PieceKind::Knight, side),
            'P' => Piece::new(PieceKind::Pawn, side),
            'V' => {
                let mut pawn = Piece::new(PieceKind::Pawn, side);
                pawn.first_move = false;
                pawn
            }
            'D' => Piece::new(PieceKind::Diamond, side),
            other => return Err(Errors::UnknownPieceSymbol(other)),
        };
        Ok(piece)
    }

    /// Descriptor kind character. A pawn's character tracks whether the
    /// double step is still available, so clones keep that state.
    pub fn symbol(&self) -> char {
        match self.kind {
            PieceKind::King => 'K',
            PieceKind::Queen => 'Q',
            PieceKind::Rook => 'R',
            PieceKind::Bishop => 'B',
            PieceKind::Knight => 'N',
            PieceKind::Pawn => {
                if self.first_move {
                    'P'
                } else {
                    'V'
                }
            }
            PieceKind::Diamond => 'D',
        }
    }

    /// Serializes this piece to its placement descriptor,
    /// `<kindChar><squareName>` when living or `<kindChar>X` when off the
    /// board.
    pub fn descriptor(&self, n_rows: i8) -> String {
        match (self.living, self.square) {
            (true, Some(coord)) => format!("{}{}", self.symbol(), square_name(coord, n_rows)),
            _ => format!("{}X", self.symbol()),
        }
    }

    /// Places this piece on a starting square, bringing it into play.
    pub(crate) fn start_square(&mut self, coord: Coord, n_rows: i8) {
        self.living = true;
        self.square = Some(coord);
        if self.kind == PieceKind::Pawn {
            self.promotion_row = match self.side {
                Side::White => 0,
                Side::Black => n_rows - 1,
            };
        }
    }

    /// Removes this piece from play, permanently.
    pub(crate) fn remove_from_game(&mut self) {
        self.captured = true;
        self.living = false;
        self.square = None;
        self.legal_moves.clear();
        self.protected.clear();
    }

    /// Relocates this piece; capture bookkeeping is the board's job.
    pub(crate) fn relocate(&mut self, to: Coord) {
        self.square = Some(to);
        if self.kind == PieceKind::Pawn {
            self.first_move = false;
            if to.0 == self.promotion_row {
                self.promoted = true;
            }
        }
    }

    pub(crate) fn set_move_sets(&mut self, legal: Vec<Coord>, protected: Vec<Coord>) {
        self.legal_moves = legal;
        self.protected = protected;
    }

    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    pub fn side(&self) -> Side {
        self.side
    }

    /// Current square, absent when captured or never placed.
    pub fn square(&self) -> Option<Coord> {
        self.square
    }

    pub fn is_living(&self) -> bool {
        self.living
    }

    pub fn is_captured(&self) -> bool {
        self.captured
    }

    /// Pawn only: double step still available.
    pub fn may_double_step(&self) -> bool {
        self.first_move
    }

    /// Pawn only: true once the pawn has reached its promotion row.
    pub fn is_promoted(&self) -> bool {
        self.promoted
    }

    pub fn promotion_row(&self) -> i8 {
        self.promotion_row
    }

    /// Cached legal destinations from the last recomputation. Stale
    /// immediately after any move on the board.
    pub fn legal_moves(&self) -> &[Coord] {
        &self.legal_moves
    }

    /// Cached protected squares from the last recomputation.
    pub fn protected_squares(&self) -> &[Coord] {
        &self.protected
    }

    pub fn is_legal_move(&self, to: Coord) -> bool {
        self.legal_moves.contains(&to)
    }

    /// True when this piece has no legal movement at all.
    pub fn is_blocked(&self) -> bool {
        self.legal_moves.is_empty()
    }

    pub fn total_legal_moves(&self) -> usize {
        self.legal_moves.len()
    }
}
