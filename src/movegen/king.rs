//! King move generation with check safety built in.
//!
//! The king starts from the ordinary one-step walk, then strips every
//! square attacked by a living opponent piece. Opponent sets are computed
//! transiently (never cached here): an opposing king contributes its raw
//! one-step walk so the filter cannot recurse, and pawns are excluded from
//! the legal-set overlap rule because their forward pushes are not
//! attacks — their diagonal threats arrive through the protected set.

use crate::board::board::Board;
use crate::board::square::Coord;
use crate::movegen::{pawn, standard};
use crate::pieces::piece::{PieceKind, PieceRef};

/// Computes the `(legal, protected)` sets for a king.
pub fn compute(board: &Board, piece_ref: PieceRef) -> (Vec<Coord>, Vec<Coord>) {
    let (mut legal, protected) = standard::walk(
        board,
        piece_ref,
        PieceKind::King.vectors(),
        PieceKind::King.is_short(),
    );

    let opponent = board.piece(piece_ref).side().opponent();
    for index in 0..board.pieces(opponent).len() {
        if legal.is_empty() {
            break;
        }
        let opp_ref = PieceRef {
            side: opponent,
            index,
        };
        let opp_piece = board.piece(opp_ref);
        if opp_piece.is_captured() || !opp_piece.is_living() {
            continue;
        }

        let kind = opp_piece.kind();
        let (opp_legal, opp_protected) = match kind {
            // Raw walk only: no recursive safety filtering.
            PieceKind::King => standard::walk(
                board,
                opp_ref,
                PieceKind::King.vectors(),
                true,
            ),
            PieceKind::Pawn => pawn::compute(board, opp_ref),
            PieceKind::Diamond => (Vec::new(), Vec::new()),
            other => standard::walk(board, opp_ref, other.vectors(), other.is_short()),
        };

        if kind != PieceKind::Pawn {
            legal.retain(|sq| !opp_legal.contains(sq));
        }
        legal.retain(|sq| !opp_protected.contains(sq));
    }

    (legal, protected)
}
