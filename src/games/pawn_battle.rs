//! Pawn Battle: one rank of pawns per side on an 8-row board of 4 to 8
//! columns. Win by capturing every enemy pawn, promoting a pawn, or
//! leaving the opponent without a move.

use crate::board::board::Board;
use crate::errors::Errors;
use crate::games::variant::Variant;
use crate::player::Side;

const MIN_COLUMNS: i8 = 4;
const MAX_COLUMNS: i8 = 8;

pub struct PawnBattle {
    columns: i8,
}

impl PawnBattle {
    /// Makes a Pawn Battle over `columns` files. Column counts outside
    /// 4..=8 are a configuration error.
    pub fn new(columns: i8) -> Result<Self, Errors> {
        if !(MIN_COLUMNS..=MAX_COLUMNS).contains(&columns) {
            return Err(Errors::InvalidColumnCount(columns as usize));
        }
        Ok(PawnBattle { columns })
    }

    pub fn columns(&self) -> i8 {
        self.columns
    }

    fn any_living_promoted(board: &Board, side: Side) -> bool {
        board
            .pieces(side)
            .iter()
            .any(|p| p.is_living() && p.is_promoted())
    }
}

impl Variant for PawnBattle {
    fn name(&self) -> &str {
        "Pawn Battle"
    }

    fn new_board(&self) -> Board {
        Board::new(8, self.columns)
    }

    fn place_starting_pieces(&self, board: &mut Board) -> Result<(), Errors> {
        let mut white = Vec::with_capacity(self.columns as usize);
        let mut black = Vec::with_capacity(self.columns as usize);
        for file in 0..self.columns {
            let letter = (b'a' + file as u8) as char;
            white.push(format!("P{letter}2"));
            black.push(format!("P{letter}7"));
        }
        board.place_pieces(&white, &black)
    }

    fn is_game_over(&self, board: &mut Board, _full_moves: u32) -> bool {
        if board.count_living(Side::White) == 0 {
            board.set_winner(Side::Black, "all white pawns are captured");
            return true;
        }
        if board.count_living(Side::Black) == 0 {
            board.set_winner(Side::White, "all black pawns are captured");
            return true;
        }

        if Self::any_living_promoted(board, Side::White) {
            board.set_winner(Side::White, "white pawn arrives last rank");
            return true;
        }
        if Self::any_living_promoted(board, Side::Black) {
            board.set_winner(Side::Black, "black pawn arrives last rank");
            return true;
        }

        // The blocked side loses, whichever it is.
        let to_move = board.side_to_move();
        if board.has_no_moves(to_move) {
            board.set_winner(
                to_move.opponent(),
                format!("{} player can't move any pawn", to_move.name()),
            );
            return true;
        }

        false
    }

    fn evaluate(&self, board: &mut Board) -> i32 {
        let this = board.side_to_move();
        let opponent = this.opponent();

        let this_count = board.count_living(this) as i32;
        let opponent_count = board.count_living(opponent) as i32;

        if this_count == 0 {
            return -1000;
        }
        if opponent_count == 0 {
            return 1000;
        }

        if board.has_no_moves(this) {
            return -1000;
        }
        if board.has_no_moves(opponent) {
            return 1000;
        }

        if Self::any_living_promoted(board, this) {
            return 1000;
        }
        if Self::any_living_promoted(board, opponent) {
            return -1000;
        }

        100 * (this_count - opponent_count)
    }

    fn fresh_instance(&self) -> Box<dyn Variant> {
        Box::new(PawnBattle {
            columns: self.columns,
        })
    }
}
