//! Fixed-depth negamax over board clones.
//!
//! The search never mutates the board it is given beyond refreshing the
//! cached move sets: every candidate move is applied to an independent
//! clone produced by `Board::apply_move`, so no state leaks between
//! search nodes. There is deliberately no pruning, no move ordering
//! beyond enumeration order and no transposition table; the enumeration
//! order doubles as the tie-break (the first movement with a strictly
//! better score wins and ties keep the earliest candidate).

use rand::{seq::IteratorRandom, Rng};

use crate::board::board::Board;
use crate::engine::difficulty::Difficulty;
use crate::errors::Errors;
use crate::games::variant::Variant;
use crate::pieces::movement::Movement;

/// Search depth used by computer players, in plies.
pub const SEARCH_DEPTH: u32 = 4;

/// Picks a movement for the side to move on `board`.
///
/// With probability `difficulty.random_fraction()` the answer is a
/// uniformly random legal movement; otherwise it is the negamax choice at
/// `max_depth` plies. Errs with `NoLegalMoves` when the side to move has
/// nothing to play.
pub fn choose_move(
    variant: &dyn Variant,
    board: &mut Board,
    full_moves: u32,
    max_depth: u32,
    difficulty: Difficulty,
    rng: &mut impl Rng,
) -> Result<Movement, Errors> {
    if rng.gen::<f64>() < difficulty.random_fraction() {
        return random_movement(board, rng);
    }
    let movement = negamax(variant, board, full_moves, max_depth, 0)?;
    if movement.is_playable() {
        Ok(movement)
    } else {
        Err(Errors::NoLegalMoves)
    }
}

/// Uniformly random legal movement for the side to move.
pub fn random_movement(board: &mut Board, rng: &mut impl Rng) -> Result<Movement, Errors> {
    board
        .legal_moves_for_side_to_move()
        .into_iter()
        .choose(rng)
        .ok_or(Errors::NoLegalMoves)
}

/// Recursive negamax.
///
/// Terminal positions and positions at the depth limit score as
/// `evaluate(board) - current_depth`; the depth penalty biases the search
/// toward faster wins and slower losses. Positions with no movements and
/// no declared game over are scored the same way rather than exploring an
/// empty move list.
pub fn negamax(
    variant: &dyn Variant,
    board: &mut Board,
    full_moves: u32,
    max_depth: u32,
    current_depth: u32,
) -> Result<Movement, Errors> {
    if variant.is_game_over(board, full_moves) || current_depth == max_depth {
        return Ok(Movement::leaf(
            variant.evaluate(board) - current_depth as i32,
        ));
    }

    let movements = board.legal_moves_for_side_to_move();
    if movements.is_empty() {
        return Ok(Movement::leaf(
            variant.evaluate(board) - current_depth as i32,
        ));
    }

    let mut best: Option<Movement> = None;
    let mut best_score = i32::MIN;

    for mut movement in movements {
        let mut next = board.apply_move(&movement)?;
        let reply = negamax(variant, &mut next, full_moves, max_depth, current_depth + 1)?;
        let score = -reply.score;

        if score > best_score {
            best_score = score;
            movement.score = score;
            best = Some(movement);
        }
    }

    best.ok_or(Errors::NoLegalMoves)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    use crate::games::pawn_battle::PawnBattle;
    use crate::player::Side;

    fn started_pawn_battle(columns: i8) -> (PawnBattle, Board) {
        let variant = PawnBattle::new(columns).expect("valid column count");
        let mut board = variant.new_board();
        variant
            .place_starting_pieces(&mut board)
            .expect("valid placement");
        (variant, board)
    }

    #[test]
    fn depth_zero_returns_the_bare_evaluation_with_no_move() {
        let (variant, mut board) = started_pawn_battle(4);
        let expected = variant.evaluate(&mut board);
        let movement = negamax(&variant, &mut board, 0, 0, 0).expect("leaf");
        assert!(!movement.is_playable());
        assert_eq!(movement.score, expected);
    }

    #[test]
    fn terminal_positions_score_as_bare_leaves_at_any_depth() {
        // White has no pawns left, so the position is terminal before the
        // depth limit matters.
        let variant = PawnBattle::new(4).expect("valid column count");
        let mut board = variant.new_board();
        board
            .place_pieces(&["VX".to_string()], &["Va5".to_string()])
            .expect("valid placement");

        let movement = negamax(&variant, &mut board, 0, 4, 0).expect("leaf");
        assert!(!movement.is_playable());
        assert_eq!(movement.score, -1000);
    }

    #[test]
    fn ties_keep_the_earliest_enumerated_movement() {
        // From the symmetric starting position every reply scores the
        // same at depth 1, so the first enumerated movement must win:
        // the a-file pawn's single push.
        let (variant, mut board) = started_pawn_battle(4);
        let movement = negamax(&variant, &mut board, 0, 1, 0).expect("choice");
        let expected = board.legal_moves_for_side_to_move();
        assert_eq!(movement.piece, expected[0].piece);
        assert_eq!(movement.to, expected[0].to);
    }

    #[test]
    fn hard_difficulty_always_searches() {
        let (variant, mut board) = started_pawn_battle(4);
        let mut rng = StdRng::seed_from_u64(7);
        let movement = choose_move(
            &variant,
            &mut board,
            0,
            2,
            Difficulty::Hard,
            &mut rng,
        )
        .expect("movement");
        assert!(movement.is_playable());
        assert_eq!(movement.piece.expect("piece").side, Side::White);
    }

    #[test]
    fn random_movement_is_always_legal() {
        let (_, mut board) = started_pawn_battle(5);
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..20 {
            let movement = random_movement(&mut board, &mut rng).expect("movement");
            let piece = movement.piece.expect("piece");
            let legal = board.piece(piece).legal_moves().to_vec();
            assert!(legal.contains(&movement.to.expect("destination")));
        }
    }

    #[test]
    fn search_leaves_the_live_board_untouched() {
        let (variant, mut board) = started_pawn_battle(4);
        let before: Vec<_> = board
            .pieces(Side::White)
            .iter()
            .chain(board.pieces(Side::Black).iter())
            .map(|p| (p.square(), p.is_living()))
            .collect();
        negamax(&variant, &mut board, 0, 3, 0).expect("search");
        let after: Vec<_> = board
            .pieces(Side::White)
            .iter()
            .chain(board.pieces(Side::Black).iter())
            .map(|p| (p.square(), p.is_living()))
            .collect();
        assert_eq!(before, after);
        assert_eq!(board.side_to_move(), Side::White);
    }
}
