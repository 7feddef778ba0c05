//! King Duel: one king per side, facing off on a randomly chosen file of
//! an 8x8 board. White races for the 8th rank under a move-count cap;
//! Black wins by holding the blockade until the cap runs out.

use rand::Rng;

use crate::board::board::Board;
use crate::errors::Errors;
use crate::games::variant::Variant;
use crate::pieces::piece::PieceRef;
use crate::player::Side;

pub struct KingDuel {
    max_moves: u32,
    starting_file: i8,
}

impl KingDuel {
    /// Makes a duel capped at `max_moves` full moves, on a random file.
    pub fn new(max_moves: u32) -> Self {
        let starting_file = rand::thread_rng().gen_range(0..8);
        KingDuel {
            max_moves,
            starting_file,
        }
    }

    /// Fixed-file constructor for deterministic setups.
    pub fn with_starting_file(max_moves: u32, starting_file: i8) -> Self {
        debug_assert!((0..8).contains(&starting_file));
        KingDuel {
            max_moves,
            starting_file,
        }
    }

    pub fn max_moves(&self) -> u32 {
        self.max_moves
    }

    pub fn starting_file(&self) -> i8 {
        self.starting_file
    }

    fn king(side: Side) -> PieceRef {
        PieceRef { side, index: 0 }
    }
}

impl Variant for KingDuel {
    fn name(&self) -> &str {
        "King Duel"
    }

    fn new_board(&self) -> Board {
        Board::default()
    }

    fn place_starting_pieces(&self, board: &mut Board) -> Result<(), Errors> {
        let file = (b'a' + self.starting_file as u8) as char;
        board.place_pieces(&[format!("K{file}1")], &[format!("K{file}8")])
    }

    fn is_game_over(&self, board: &mut Board, full_moves: u32) -> bool {
        if full_moves == self.max_moves {
            board.set_winner(
                Side::Black,
                format!(
                    "black king blocks white king after {} movements",
                    self.max_moves
                ),
            );
            return true;
        }

        let white_king_square = board.piece(Self::king(Side::White)).square();
        if let Some((row, _)) = white_king_square {
            if row == 0 {
                board.set_winner(Side::White, "white king arrives 8th rank");
                return true;
            }
        }

        false
    }

    fn evaluate(&self, board: &mut Board) -> i32 {
        let white = match board.piece(Self::king(Side::White)).square() {
            Some(square) => square,
            None => return 0,
        };
        let black = match board.piece(Self::king(Side::Black)).square() {
            Some(square) => square,
            None => return 0,
        };

        // Display ranks grow toward White's goal, so the advancement term
        // uses the rank number rather than the internal row.
        let white_rank = (board.n_rows() - white.0) as i32;
        let factor = if board.side_to_move() == Side::White {
            2
        } else {
            -2
        };
        let rank_parity = ((black.0 - white.0).abs() as i32 % 2) * 10;
        let file_distance = (black.1 - white.1).abs() as i32 * -2;

        factor * white_rank + rank_parity + file_distance
    }

    fn fresh_instance(&self) -> Box<dyn Variant> {
        // A new duel rolls a new starting file.
        Box::new(KingDuel::new(self.max_moves))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn started(max_moves: u32, file: i8) -> (KingDuel, Board) {
        let variant = KingDuel::with_starting_file(max_moves, file);
        let mut board = variant.new_board();
        variant
            .place_starting_pieces(&mut board)
            .expect("valid placement");
        (variant, board)
    }

    #[test]
    fn kings_start_on_opposite_ranks_of_the_same_file() {
        let (_, board) = started(10, 4);
        let white = board.piece_on("e1").expect("white king");
        let black = board.piece_on("e8").expect("black king");
        assert_eq!(white, KingDuel::king(Side::White));
        assert_eq!(black, KingDuel::king(Side::Black));
    }

    #[test]
    fn random_file_is_always_on_the_board() {
        for _ in 0..32 {
            let duel = KingDuel::new(10);
            assert!((0..8).contains(&duel.starting_file()));
        }
    }

    #[test]
    fn the_move_cap_gives_black_the_blockade_win() {
        let (variant, mut board) = started(10, 0);
        assert!(!variant.is_game_over(&mut board, 9));
        assert!(variant.is_game_over(&mut board, 10));
        assert_eq!(board.winner(), Some(Side::Black));
        assert_eq!(
            board.winner_message(),
            Some("black king blocks white king after 10 movements")
        );
    }

    #[test]
    fn white_wins_by_reaching_the_last_rank() {
        let variant = KingDuel::with_starting_file(20, 3);
        let mut board = variant.new_board();
        board
            .place_pieces(&["Kd8".to_string()], &["Ka5".to_string()])
            .expect("valid placement");
        assert!(variant.is_game_over(&mut board, 5));
        assert_eq!(board.winner(), Some(Side::White));
        assert_eq!(board.winner_message(), Some("white king arrives 8th rank"));
    }

    #[test]
    fn evaluation_rewards_white_advancement_for_white() {
        let variant = KingDuel::with_starting_file(20, 0);
        let mut board = variant.new_board();
        board
            .place_pieces(&["Ka4".to_string()], &["Kc7".to_string()])
            .expect("valid placement");
        // White to move: rank 4 advancement (8), odd rank gap parity
        // bonus (10), two-file separation penalty (-4).
        assert_eq!(variant.evaluate(&mut board), 2 * 4 + 10 - 4);
        board.pass_turn();
        assert_eq!(variant.evaluate(&mut board), -2 * 4 + 10 - 4);
    }

    #[test]
    fn fresh_instances_keep_the_move_cap() {
        let duel = KingDuel::with_starting_file(15, 2);
        let fresh = duel.fresh_instance();
        assert_eq!(fresh.name(), "King Duel");
        let mut board = fresh.new_board();
        fresh
            .place_starting_pieces(&mut board)
            .expect("valid placement");
        assert!(!fresh.is_game_over(&mut board, 14));
        assert!(fresh.is_game_over(&mut board, 15));
    }
}
