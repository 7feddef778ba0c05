//! The killer game family: Killer Queen, Killer Rook and Killer Knight.
//!
//! Each side fields one mobile "killer" piece plus 8, 12 or 16 immobile
//! diamonds on a standard 8x8 board. The killer is always index 0 of its
//! side's collection; the diamonds follow. A side wins by capturing the
//! enemy killer or every enemy diamond.

use crate::board::board::Board;
use crate::errors::Errors;
use crate::games::variant::Variant;
use crate::pieces::piece::{PieceKind, PieceRef};
use crate::player::Side;

// Diamond layouts keyed by killer mobility. The queen and rook share the
// sliding layouts; the knight gets denser maps tuned to its jump pattern.
const SLIDER_WHITE_8: &[&str] = &["Da4", "Db6", "Dc3", "Dd5", "De2", "De7", "Df4", "Dg6"];
const SLIDER_BLACK_8: &[&str] = &["Db3", "Dc5", "Dd2", "Dd7", "De4", "Df6", "Dg3", "Dh5"];
const SLIDER_WHITE_12: &[&str] = &[
    "Da4", "Db6", "Dc3", "Dd5", "De2", "De7", "Df4", "Dg6", "Da8", "Df3", "Dg1", "Dh3",
];
const SLIDER_BLACK_12: &[&str] = &[
    "Db3", "Dc5", "Dd2", "Dd7", "De4", "Df6", "Dg3", "Dh5", "Da6", "Db8", "Dc6", "Dh1",
];
const SLIDER_WHITE_16: &[&str] = &[
    "Da4", "Db6", "Dc3", "Dd5", "De2", "De7", "Df4", "Dg6", "Da8", "Df3", "Dg1", "Dh3", "Db2",
    "Dc4", "Dd6", "De3",
];
const SLIDER_BLACK_16: &[&str] = &[
    "Db3", "Dc5", "Dd2", "Dd7", "De4", "Df6", "Dg3", "Dh5", "Da6", "Db8", "Dc6", "Dh1", "Dg7",
    "Df5", "Dd3", "De6",
];

const KNIGHT_WHITE_8: &[&str] = &["Da7", "Db2", "Dd1", "Dd4", "Dd7", "Dg4", "Dh1", "Dh7"];
const KNIGHT_BLACK_8: &[&str] = &["Da2", "Da8", "Db5", "De2", "De5", "De8", "Dg7", "Dh2"];
const KNIGHT_WHITE_12: &[&str] = &[
    "Db1", "Dg1", "Dg2", "Dd3", "De3", "Da5", "Dc5", "Df5", "Dh5", "Dg7", "Dd8", "De8",
];
const KNIGHT_BLACK_12: &[&str] = &[
    "Dd1", "De1", "Db2", "Da4", "Dc4", "Df4", "Dh4", "Dd6", "De6", "Db7", "Db8", "Dg8",
];
const KNIGHT_WHITE_16: &[&str] = &[
    "Db1", "Dg1", "Da2", "De2", "Dh2", "Db3", "Df3", "Dg3", "De4", "Dg4", "Da5", "Db5", "Dd5",
    "Dh5", "Dc6", "Dd7",
];
const KNIGHT_BLACK_16: &[&str] = &[
    "Dd2", "Dc3", "Da4", "Db4", "Dd4", "Dh4", "De5", "Dg5", "Db6", "Df6", "Dg6", "Da7", "De7",
    "Dh7", "Db8", "Dg8",
];

pub struct KillerGame {
    killer: PieceKind,
    diamonds: usize,
}

impl KillerGame {
    pub fn queen(diamonds: usize) -> Result<Self, Errors> {
        KillerGame::new(PieceKind::Queen, diamonds)
    }

    pub fn rook(diamonds: usize) -> Result<Self, Errors> {
        KillerGame::new(PieceKind::Rook, diamonds)
    }

    pub fn knight(diamonds: usize) -> Result<Self, Errors> {
        KillerGame::new(PieceKind::Knight, diamonds)
    }

    fn new(killer: PieceKind, diamonds: usize) -> Result<Self, Errors> {
        if !matches!(diamonds, 8 | 12 | 16) {
            return Err(Errors::InvalidDiamondCount(diamonds));
        }
        Ok(KillerGame { killer, diamonds })
    }

    pub fn diamonds(&self) -> usize {
        self.diamonds
    }

    fn killer_symbol(&self) -> char {
        match self.killer {
            PieceKind::Rook => 'R',
            PieceKind::Knight => 'N',
            _ => 'Q',
        }
    }

    fn diamond_maps(&self) -> (&'static [&'static str], &'static [&'static str]) {
        if self.killer == PieceKind::Knight {
            match self.diamonds {
                8 => (KNIGHT_WHITE_8, KNIGHT_BLACK_8),
                12 => (KNIGHT_WHITE_12, KNIGHT_BLACK_12),
                _ => (KNIGHT_WHITE_16, KNIGHT_BLACK_16),
            }
        } else {
            match self.diamonds {
                8 => (SLIDER_WHITE_8, SLIDER_BLACK_8),
                12 => (SLIDER_WHITE_12, SLIDER_BLACK_12),
                _ => (SLIDER_WHITE_16, SLIDER_BLACK_16),
            }
        }
    }

    fn killer_ref(side: Side) -> PieceRef {
        PieceRef { side, index: 0 }
    }

    fn living_diamonds(&self, board: &Board, side: Side) -> usize {
        board.pieces(side)[1..=self.diamonds]
            .iter()
            .filter(|p| p.is_living())
            .count()
    }
}

impl Variant for KillerGame {
    fn name(&self) -> &str {
        match self.killer {
            PieceKind::Rook => "Killer Rook",
            PieceKind::Knight => "Killer Knight",
            _ => "Killer Queen",
        }
    }

    fn new_board(&self) -> Board {
        Board::default()
    }

    fn place_starting_pieces(&self, board: &mut Board) -> Result<(), Errors> {
        let (white_map, black_map) = self.diamond_maps();
        let symbol = self.killer_symbol();

        let mut white = Vec::with_capacity(1 + self.diamonds);
        white.push(format!("{symbol}a1"));
        white.extend(white_map.iter().map(|d| d.to_string()));

        let mut black = Vec::with_capacity(1 + self.diamonds);
        black.push(format!("{symbol}h8"));
        black.extend(black_map.iter().map(|d| d.to_string()));

        board.place_pieces(&white, &black)
    }

    fn is_game_over(&self, board: &mut Board, _full_moves: u32) -> bool {
        let kind = self.killer.name();

        if !board.piece(Self::killer_ref(Side::White)).is_living() {
            board.set_winner(Side::Black, format!("black {kind} captured white {kind}."));
            return true;
        }
        if !board.piece(Self::killer_ref(Side::Black)).is_living() {
            board.set_winner(Side::White, format!("white {kind} captured black {kind}."));
            return true;
        }

        if self.living_diamonds(board, Side::White) == 0 {
            board.set_winner(
                Side::Black,
                format!("black {kind} captured all white diamonds."),
            );
            return true;
        }
        if self.living_diamonds(board, Side::Black) == 0 {
            board.set_winner(
                Side::White,
                format!("white {kind} captured all black diamonds."),
            );
            return true;
        }

        false
    }

    fn evaluate(&self, board: &mut Board) -> i32 {
        let this = board.side_to_move();
        let opponent = this.opponent();
        let this_killer = Self::killer_ref(this);
        let opponent_killer = Self::killer_ref(opponent);

        if !board.piece(this_killer).is_living() {
            return -1000;
        }
        if !board.piece(opponent_killer).is_living() {
            return 1000;
        }

        board.def_legal_move(this_killer);
        board.def_legal_move(opponent_killer);

        // c/m count captured diamonds, a/d count living diamonds the
        // killers currently attack, from each perspective.
        let mut captured = 0;
        let mut missing = 0;
        let mut attacking = 0;
        let mut defending_risk = 0;

        for index in 1..=self.diamonds {
            let own = &board.pieces(this)[index];
            if !own.is_living() {
                missing += 1;
            } else if let Some(square) = own.square() {
                if board.piece(opponent_killer).is_legal_move(square) {
                    defending_risk += 1;
                }
            }

            let other = &board.pieces(opponent)[index];
            if !other.is_living() {
                captured += 1;
            } else if let Some(square) = other.square() {
                if board.piece(this_killer).is_legal_move(square) {
                    attacking += 1;
                }
            }
        }

        if captured == self.diamonds {
            return 1000;
        }
        if missing == self.diamonds {
            return -1000;
        }

        100 * captured as i32 + 20 * attacking as i32
            - 100 * missing as i32
            - 20 * defending_risk as i32
    }

    fn fresh_instance(&self) -> Box<dyn Variant> {
        Box::new(KillerGame {
            killer: self.killer,
            diamonds: self.diamonds,
        })
    }
}
