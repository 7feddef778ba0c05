//! Pawn move generation.
//!
//! Pawns do not fit the generic walk: pushes only onto empty squares
//! (two while the double step is available), captures only diagonally
//! onto enemy pieces. A diagonal that is empty or own-occupied is a
//! protected square, which is how pawn threats reach the king-safety
//! filter. A pawn standing on its promotion row generates nothing.

use crate::board::board::Board;
use crate::board::square::Coord;
use crate::pieces::piece::PieceRef;
use crate::player::Side;

/// Row direction a side's pawns advance in: White climbs toward row 0.
pub fn advance_direction(side: Side) -> i8 {
    match side {
        Side::White => -1,
        Side::Black => 1,
    }
}

/// Computes the `(legal, protected)` sets for a pawn.
pub fn compute(board: &Board, piece_ref: PieceRef) -> (Vec<Coord>, Vec<Coord>) {
    let piece = board.piece(piece_ref);
    let (row, col) = match piece.square() {
        Some(coord) => coord,
        None => return (Vec::new(), Vec::new()),
    };
    let side = piece.side();
    let dp = advance_direction(side);

    let mut legal = Vec::new();
    let mut protected = Vec::new();

    if piece.promotion_row() == row {
        return (legal, protected);
    }

    let push = (row + dp, col);
    if board.in_bounds(push) && board.piece_at(push).is_none() {
        legal.push(push);
        if piece.may_double_step() {
            let double = (row + 2 * dp, col);
            if board.in_bounds(double) && board.piece_at(double).is_none() {
                legal.push(double);
            }
        }
    }

    for d_col in [-1, 1] {
        let target = (row + dp, col + d_col);
        if !board.in_bounds(target) {
            continue;
        }
        match board.piece_at(target) {
            Some(occupant) if occupant.side != side => legal.push(target),
            _ => protected.push(target),
        }
    }

    (legal, protected)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptors(specs: &[&str]) -> Vec<String> {
        specs.iter().map(|s| s.to_string()).collect()
    }

    fn coord(board: &Board, name: &str) -> Coord {
        board.square_named(name).expect("square").coord()
    }

    #[test]
    fn fresh_pawn_may_push_one_or_two() {
        let mut board = Board::default();
        board
            .place_pieces(&descriptors(&["Pe2"]), &[])
            .expect("valid placement");
        let pawn = board.piece_on("e2").expect("pawn");
        let (legal, _) = compute(&board, pawn);
        assert_eq!(legal, vec![coord(&board, "e3"), coord(&board, "e4")]);
    }

    #[test]
    fn double_step_is_spent_after_the_first_move() {
        let mut board = Board::default();
        board
            .place_pieces(&descriptors(&["Pe2"]), &[])
            .expect("valid placement");
        let pawn = board.piece_on("e2").expect("pawn");
        board.def_legal_move(pawn);
        board
            .try_move(pawn, coord(&board, "e3"))
            .expect("single push");
        let (legal, _) = compute(&board, pawn);
        assert_eq!(legal, vec![coord(&board, "e4")]);
    }

    #[test]
    fn single_step_variant_never_double_steps() {
        let mut board = Board::default();
        board
            .place_pieces(&descriptors(&["Ve2"]), &[])
            .expect("valid placement");
        let pawn = board.piece_on("e2").expect("pawn");
        let (legal, _) = compute(&board, pawn);
        assert_eq!(legal, vec![coord(&board, "e3")]);
    }

    #[test]
    fn pushes_are_blocked_by_any_occupant() {
        let mut board = Board::default();
        board
            .place_pieces(&descriptors(&["Pe2"]), &descriptors(&["Ne3"]))
            .expect("valid placement");
        let pawn = board.piece_on("e2").expect("pawn");
        let (legal, protected) = compute(&board, pawn);
        // No push, no capture straight ahead; both diagonals empty and
        // therefore protected.
        assert!(legal.is_empty());
        assert_eq!(
            protected,
            vec![coord(&board, "d3"), coord(&board, "f3")]
        );
    }

    #[test]
    fn captures_only_diagonally_onto_enemies() {
        let mut board = Board::default();
        board
            .place_pieces(&descriptors(&["Pe2", "Pd3"]), &descriptors(&["Nf3"]))
            .expect("valid placement");
        let pawn = board.piece_on("e2").expect("pawn");
        let (legal, protected) = compute(&board, pawn);
        assert!(legal.contains(&coord(&board, "f3")));
        assert!(!legal.contains(&coord(&board, "d3")));
        assert_eq!(protected, vec![coord(&board, "d3")]);
    }

    #[test]
    fn edge_file_pawn_has_one_diagonal() {
        let mut board = Board::new(2, 1);
        board
            .place_pieces(&descriptors(&["Pa1"]), &[])
            .expect("valid placement");
        let pawn = board.piece_on("a1").expect("pawn");
        let (legal, protected) = compute(&board, pawn);
        assert_eq!(legal, vec![(0, 0)]);
        assert!(protected.is_empty());
    }

    #[test]
    fn promoted_pawn_generates_nothing() {
        let mut board = Board::new(3, 1);
        board
            .place_pieces(&descriptors(&["Va2"]), &[])
            .expect("valid placement");
        let pawn = board.piece_on("a2").expect("pawn");
        board.def_legal_move(pawn);
        board.try_move(pawn, (0, 0)).expect("pawn promotes");
        assert!(board.piece(pawn).is_promoted());
        let (legal, protected) = compute(&board, pawn);
        assert!(legal.is_empty());
        assert!(protected.is_empty());
    }
}
