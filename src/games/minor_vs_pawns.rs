//! Bishops Against Pawns and Knights Against Pawns on a 5x5 board.
//!
//! One side fields two minor pieces on its back rank; the other fields
//! five single-step pawns on the opposite rank. The pawns win by wiping
//! out the minors or by landing a pawn on the minors' back rank where no
//! living minor can capture it; the minors win by capturing every pawn
//! or by leaving the pawn side without a move on its turn.

use crate::board::board::Board;
use crate::errors::Errors;
use crate::games::variant::Variant;
use crate::pieces::piece::{PieceKind, PieceRef};
use crate::player::Side;

const BOARD_SIZE: i8 = 5;
const PAWN_COUNT: usize = 5;

pub struct MinorVsPawns {
    minor: PieceKind,
    minor_side: Side,
}

/// One pass over the position; both the termination test and the
/// evaluation read the same facts.
struct Scan {
    living_pawns: i32,
    living_minors: i32,
    undefended_last_rank_pawn: bool,
    pawn_moves: usize,
}

impl MinorVsPawns {
    pub fn bishops(minor_side: Side) -> Self {
        MinorVsPawns {
            minor: PieceKind::Bishop,
            minor_side,
        }
    }

    pub fn knights(minor_side: Side) -> Self {
        MinorVsPawns {
            minor: PieceKind::Knight,
            minor_side,
        }
    }

    pub fn minor_side(&self) -> Side {
        self.minor_side
    }

    fn pawn_side(&self) -> Side {
        self.minor_side.opponent()
    }

    /// Display rank of the minors' home row, which the pawns must reach.
    fn win_rank(&self) -> i8 {
        match self.minor_side {
            Side::White => 1,
            Side::Black => BOARD_SIZE,
        }
    }

    /// Internal row of the win rank.
    fn target_row(&self) -> i8 {
        BOARD_SIZE - self.win_rank()
    }

    /// Files carrying the two minors: bishops sit adjacent, knights a
    /// square apart.
    fn minor_files(&self) -> [char; 2] {
        match self.minor {
            PieceKind::Knight => ['b', 'd'],
            _ => ['b', 'c'],
        }
    }

    fn scan(&self, board: &mut Board) -> Scan {
        let pawn_side = self.pawn_side();
        let target_row = self.target_row();
        let pawn_count = board.pieces(pawn_side).len();
        let minor_count = board.pieces(self.minor_side).len();

        let mut scan = Scan {
            living_pawns: 0,
            living_minors: 0,
            undefended_last_rank_pawn: false,
            pawn_moves: 0,
        };

        for index in 0..pawn_count {
            let pawn_ref = PieceRef {
                side: pawn_side,
                index,
            };
            if !board.piece(pawn_ref).is_living() {
                continue;
            }
            scan.living_pawns += 1;

            let pawn_square = board.piece(pawn_ref).square();
            if let Some(square) = pawn_square {
                if square.0 == target_row {
                    let mut defended = false;
                    for minor_index in 0..minor_count {
                        let minor_ref = PieceRef {
                            side: self.minor_side,
                            index: minor_index,
                        };
                        if !board.piece(minor_ref).is_living() {
                            continue;
                        }
                        board.def_legal_move(minor_ref);
                        if board.piece(minor_ref).is_legal_move(square) {
                            defended = true;
                        }
                    }
                    if !defended {
                        scan.undefended_last_rank_pawn = true;
                    }
                }
            }

            board.def_legal_move(pawn_ref);
            scan.pawn_moves += board.piece(pawn_ref).total_legal_moves();
        }

        scan.living_minors = board.count_living(self.minor_side) as i32;

        scan
    }
}

impl Variant for MinorVsPawns {
    fn name(&self) -> &str {
        match self.minor {
            PieceKind::Knight => "Knights Against Pawns",
            _ => "Bishops Against Pawns",
        }
    }

    fn new_board(&self) -> Board {
        Board::new(BOARD_SIZE, BOARD_SIZE)
    }

    fn place_starting_pieces(&self, board: &mut Board) -> Result<(), Errors> {
        let symbol = match self.minor {
            PieceKind::Knight => 'N',
            _ => 'B',
        };
        let minors: Vec<String> = self
            .minor_files()
            .iter()
            .map(|file| format!("{symbol}{file}{}", self.win_rank()))
            .collect();

        let pawn_rank = BOARD_SIZE + 1 - self.win_rank();
        let pawns: Vec<String> = (0..PAWN_COUNT)
            .map(|file| {
                let letter = (b'a' + file as u8) as char;
                format!("V{letter}{pawn_rank}")
            })
            .collect();

        match self.minor_side {
            Side::White => board.place_pieces(&minors, &pawns),
            Side::Black => board.place_pieces(&pawns, &minors),
        }
    }

    fn is_game_over(&self, board: &mut Board, _full_moves: u32) -> bool {
        let scan = self.scan(board);
        let minor_name = self.minor.name();

        if scan.living_pawns == 0 {
            board.set_winner(self.minor_side, format!("{minor_name}s captured all pawns."));
            return true;
        }

        if scan.living_minors == 0 {
            board.set_winner(
                self.pawn_side(),
                format!("pawns captured all {minor_name}s."),
            );
            return true;
        }

        if scan.undefended_last_rank_pawn {
            board.set_winner(self.pawn_side(), "a pawn arrives last rank.");
            return true;
        }

        if scan.pawn_moves == 0 && board.side_to_move() == self.pawn_side() {
            board.set_winner(self.minor_side, "pawns have no legal move to play.");
            return true;
        }

        false
    }

    fn evaluate(&self, board: &mut Board) -> i32 {
        let scan = self.scan(board);
        let pawn_side_moves = board.side_to_move() == self.pawn_side();

        if scan.living_pawns == 0 {
            return if pawn_side_moves { -1000 } else { 1000 };
        }
        if scan.living_minors == 0 {
            return if pawn_side_moves { 1000 } else { -1000 };
        }
        if scan.undefended_last_rank_pawn {
            return if pawn_side_moves { 1000 } else { -1000 };
        }
        if scan.pawn_moves == 0 && pawn_side_moves {
            return -1000;
        }

        let (pawn_value, minor_value) = if pawn_side_moves { (100, -25) } else { (-100, 25) };
        scan.living_pawns * pawn_value + scan.living_minors * minor_value
    }

    fn fresh_instance(&self) -> Box<dyn Variant> {
        Box::new(MinorVsPawns {
            minor: self.minor,
            minor_side: self.minor_side,
        })
    }
}
