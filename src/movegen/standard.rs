//! Shared data-driven move generation.
//!
//! Every piece kind except the pawn resolves to the same outward walk over
//! its direction vector table; pawns and kings layer their own rules on
//! top and diamonds never move. The walk produces two sets: legal
//! destinations and protected squares (squares the piece defends, or the
//! square behind an enemy king pinned on a slider's line).

use crate::board::board::Board;
use crate::board::square::Coord;
use crate::movegen::{king, pawn};
use crate::pieces::piece::{PieceKind, PieceRef};

/// Computes the `(legal, protected)` square sets for a piece, dispatching
/// on its kind. Pure with respect to the board: nothing is cached here.
pub fn compute_move_sets(board: &Board, piece_ref: PieceRef) -> (Vec<Coord>, Vec<Coord>) {
    match board.piece(piece_ref).kind() {
        PieceKind::Diamond => (Vec::new(), Vec::new()),
        PieceKind::Pawn => pawn::compute(board, piece_ref),
        PieceKind::King => king::compute(board, piece_ref),
        kind => walk(board, piece_ref, kind.vectors(), kind.is_short()),
    }
}

/// Walks outward along each direction vector.
///
/// Empty squares are legal; an enemy occupant is a legal capture ending
/// the ray; a friendly occupant ends the ray as a protected square. When a
/// slider hits the enemy king, the in-bounds square directly behind the
/// king is also protected, so a fleeing king cannot step backwards along
/// the attacking line.
pub fn walk(
    board: &Board,
    piece_ref: PieceRef,
    vectors: &[Coord],
    short_move: bool,
) -> (Vec<Coord>, Vec<Coord>) {
    let piece = board.piece(piece_ref);
    let origin = match piece.square() {
        Some(coord) => coord,
        None => return (Vec::new(), Vec::new()),
    };
    let side = piece.side();

    let mut legal = Vec::new();
    let mut protected = Vec::new();

    for &(d_row, d_col) in vectors {
        let mut coord = (origin.0 + d_row, origin.1 + d_col);
        while board.in_bounds(coord) {
            match board.piece_at(coord) {
                None => {
                    legal.push(coord);
                }
                Some(occupant) => {
                    if occupant.side != side {
                        legal.push(coord);
                        if board.piece(occupant).kind() == PieceKind::King && !short_move {
                            let beyond = (coord.0 + d_row, coord.1 + d_col);
                            if board.in_bounds(beyond) {
                                protected.push(beyond);
                            }
                        }
                    } else {
                        protected.push(coord);
                    }
                    break;
                }
            }
            if short_move {
                break;
            }
            coord = (coord.0 + d_row, coord.1 + d_col);
        }
    }

    (legal, protected)
}
