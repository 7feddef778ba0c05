//! The board: a fixed-size grid of squares plus the two piece collections.
//!
//! Boards are mutated in place while a game is played, but never during
//! search: hypothetical positions are explored on clones produced by
//! `apply_move`, which serializes every piece to its placement descriptor
//! and rebuilds a fresh board, keeping search nodes fully independent.

use crate::board::square::{parse_square_name, square_name, Coord, Square};
use crate::errors::Errors;
use crate::movegen::standard::compute_move_sets;
use crate::pieces::movement::Movement;
use crate::pieces::piece::{Piece, PieceRef};
use crate::player::Side;

/// A rectangular board with two ordered piece collections.
#[derive(Clone, Debug)]
pub struct Board {
    n_rows: i8,
    n_cols: i8,
    /// Row-major square grid, created once at construction.
    squares: Vec<Square>,
    /// Piece collections indexed by `Side::index()`. Collection order is
    /// significant: variants address pieces by index (the killer piece is
    /// always index 0) and move enumeration follows it.
    pieces: [Vec<Piece>; 2],
    side_to_move: Side,
    winner: Option<(Side, String)>,
}

impl Default for Board {
    /// A standard 8x8 board with no pieces.
    fn default() -> Self {
        Board::new(8, 8)
    }
}

impl Board {
    /// Makes an empty board. Both dimensions must be at least 1.
    pub fn new(n_rows: i8, n_cols: i8) -> Self {
        debug_assert!(n_rows >= 1 && n_cols >= 1);
        let mut squares = Vec::with_capacity(n_rows as usize * n_cols as usize);
        for row in 0..n_rows {
            for column in 0..n_cols {
                squares.push(Square::new(row, column, n_rows));
            }
        }
        Board {
            n_rows,
            n_cols,
            squares,
            pieces: [Vec::new(), Vec::new()],
            side_to_move: Side::White,
            winner: None,
        }
    }

    pub fn n_rows(&self) -> i8 {
        self.n_rows
    }

    pub fn n_cols(&self) -> i8 {
        self.n_cols
    }

    pub fn side_to_move(&self) -> Side {
        self.side_to_move
    }

    #[inline]
    pub fn in_bounds(&self, coord: Coord) -> bool {
        coord.0 >= 0 && coord.0 < self.n_rows && coord.1 >= 0 && coord.1 < self.n_cols
    }

    #[inline]
    fn index_of(&self, coord: Coord) -> usize {
        coord.0 as usize * self.n_cols as usize + coord.1 as usize
    }

    /// The square at an internal coordinate.
    pub fn square_at(&self, coord: Coord) -> Result<&Square, Errors> {
        if !self.in_bounds(coord) {
            return Err(Errors::OutOfBounds(coord));
        }
        Ok(&self.squares[self.index_of(coord)])
    }

    /// The square with a display name such as `"e4"`.
    pub fn square_named(&self, name: &str) -> Result<&Square, Errors> {
        let coord = parse_square_name(name, self.n_rows, self.n_cols)?;
        Ok(&self.squares[self.index_of(coord)])
    }

    /// Every square in row-major order, for rendering.
    pub fn squares(&self) -> &[Square] {
        &self.squares
    }

    pub fn pieces(&self, side: Side) -> &[Piece] {
        &self.pieces[side.index()]
    }

    pub fn piece(&self, piece_ref: PieceRef) -> &Piece {
        &self.pieces[piece_ref.side.index()][piece_ref.index]
    }

    pub(crate) fn piece_mut(&mut self, piece_ref: PieceRef) -> &mut Piece {
        &mut self.pieces[piece_ref.side.index()][piece_ref.index]
    }

    /// The piece sitting on a coordinate, if any.
    pub fn piece_at(&self, coord: Coord) -> Option<PieceRef> {
        if !self.in_bounds(coord) {
            return None;
        }
        self.squares[self.index_of(coord)].occupant()
    }

    /// The piece sitting on a named square.
    pub fn piece_on(&self, name: &str) -> Result<PieceRef, Errors> {
        self.square_named(name)?
            .occupant()
            .ok_or_else(|| Errors::NoPieceOnSquare(name.to_string()))
    }

    /// Number of living pieces on a side.
    pub fn count_living(&self, side: Side) -> usize {
        self.pieces(side).iter().filter(|p| p.is_living()).count()
    }

    /// Parses per-piece descriptors and populates both collections.
    ///
    /// Each descriptor is `<kindChar><squareName>` or `<kindChar>X` for a
    /// piece instantiated but withheld from the board. Placing onto an
    /// occupied square captures the prior occupant; this is the only
    /// capture mechanism in the engine.
    pub fn place_pieces(&mut self, white: &[String], black: &[String]) -> Result<(), Errors> {
        self.place_side(white, Side::White)?;
        self.place_side(black, Side::Black)
    }

    fn place_side(&mut self, descriptors: &[String], side: Side) -> Result<(), Errors> {
        for descriptor in descriptors {
            let mut chars = descriptor.chars();
            let symbol = chars
                .next()
                .ok_or_else(|| Errors::InvalidSquareName(descriptor.clone()))?;
            let mut piece = Piece::from_symbol(symbol, side)?;

            let square = chars.as_str();
            let index = self.pieces[side.index()].len();
            if square != "X" {
                let coord = parse_square_name(square, self.n_rows, self.n_cols)?;
                piece.start_square(coord, self.n_rows);
                self.occupy(coord, PieceRef { side, index });
            }
            self.pieces[side.index()].push(piece);
        }
        Ok(())
    }

    /// Puts a piece on a square, capturing any prior occupant.
    fn occupy(&mut self, coord: Coord, piece_ref: PieceRef) {
        let square_index = self.index_of(coord);
        if let Some(prior) = self.squares[square_index].occupant() {
            self.pieces[prior.side.index()][prior.index].remove_from_game();
        }
        self.squares[square_index].set_occupant(piece_ref);
    }

    /// Recomputes one piece's cached legal and protected sets.
    pub fn def_legal_move(&mut self, piece_ref: PieceRef) {
        if !self.piece(piece_ref).is_living() {
            return;
        }
        let (legal, protected) = compute_move_sets(self, piece_ref);
        self.piece_mut(piece_ref).set_move_sets(legal, protected);
    }

    /// Recomputes every living piece of a side.
    pub fn def_legal_moves(&mut self, side: Side) {
        for index in 0..self.pieces[side.index()].len() {
            self.def_legal_move(PieceRef { side, index });
        }
    }

    /// All movements available to a side, freshly recomputed and flattened
    /// in piece order then destination enumeration order. That ordering is
    /// part of observable AI behavior (the search keeps the earliest of
    /// tied movements).
    pub fn movements_for(&mut self, side: Side) -> Vec<Movement> {
        self.def_legal_moves(side);
        let mut movements = Vec::new();
        for (index, piece) in self.pieces(side).iter().enumerate() {
            for &to in piece.legal_moves() {
                movements.push(Movement::new(PieceRef { side, index }, to));
            }
        }
        movements
    }

    /// All movements for the side whose turn it is.
    pub fn legal_moves_for_side_to_move(&mut self) -> Vec<Movement> {
        self.movements_for(self.side_to_move)
    }

    /// True only when it is `side`'s turn and none of its living pieces
    /// has a legal destination. Not an error condition: callers check this
    /// before offering a move.
    pub fn has_no_moves(&mut self, side: Side) -> bool {
        if self.side_to_move != side {
            return false;
        }
        for index in 0..self.pieces[side.index()].len() {
            let piece_ref = PieceRef { side, index };
            self.def_legal_move(piece_ref);
            if self.piece(piece_ref).total_legal_moves() > 0 {
                return false;
            }
        }
        true
    }

    /// Moves a piece without legality checking. Capture happens as a side
    /// effect of occupying the destination square. Cached move sets of
    /// every piece are stale after this.
    pub(crate) fn do_move(&mut self, piece_ref: PieceRef, to: Coord) -> Result<(), Errors> {
        if !self.in_bounds(to) {
            return Err(Errors::OutOfBounds(to));
        }
        let from = self
            .piece(piece_ref)
            .square()
            .ok_or_else(|| Errors::NoPieceOnSquare("X".to_string()))?;
        let from_index = self.index_of(from);
        self.squares[from_index].clear_occupant();
        self.occupy(to, piece_ref);
        self.piece_mut(piece_ref).relocate(to);
        Ok(())
    }

    /// Checked move entry point for human/UI callers: the destination must
    /// be in the piece's current cached legal set.
    pub fn try_move(&mut self, piece_ref: PieceRef, to: Coord) -> Result<(), Errors> {
        let piece = self.piece(piece_ref);
        if !piece.is_living() || !piece.is_legal_move(to) {
            let from = piece
                .square()
                .map(|sq| square_name(sq, self.n_rows))
                .unwrap_or_else(|| "X".to_string());
            return Err(Errors::IllegalMove {
                from,
                to: square_name(to, self.n_rows),
            });
        }
        self.do_move(piece_ref, to)
    }

    /// Returns a new board with the movement played.
    ///
    /// Every piece is serialized to its descriptor (captured pieces as the
    /// `X` sentinel, preserving collection indices), a fresh board is built
    /// from those descriptors, and the single move is applied to it. A
    /// fresh board starts with White to move and the turn is advanced only
    /// when the pre-move side was White; combined, the clone is always left
    /// with the opponent of the pre-move side to move.
    ///
    /// Leaf movements (no piece attached) cannot be applied and yield
    /// `Errors::NoLegalMoves`.
    pub fn apply_move(&self, movement: &Movement) -> Result<Board, Errors> {
        let (piece_ref, to) = match (movement.piece, movement.to) {
            (Some(piece_ref), Some(to)) => (piece_ref, to),
            _ => return Err(Errors::NoLegalMoves),
        };

        let white: Vec<String> = self
            .pieces(Side::White)
            .iter()
            .map(|p| p.descriptor(self.n_rows))
            .collect();
        let black: Vec<String> = self
            .pieces(Side::Black)
            .iter()
            .map(|p| p.descriptor(self.n_rows))
            .collect();

        let mut clone = Board::new(self.n_rows, self.n_cols);
        clone.place_pieces(&white, &black)?;
        clone.do_move(piece_ref, to)?;
        if self.side_to_move == Side::White {
            clone.pass_turn();
        }
        Ok(clone)
    }

    /// Flips the side to move.
    pub fn pass_turn(&mut self) {
        self.side_to_move = self.side_to_move.opponent();
    }

    /// Hands the turn to a specific side.
    pub fn pass_turn_to(&mut self, side: Side) {
        self.side_to_move = side;
    }

    /// Records the game outcome. Called by variant rules when they detect
    /// a terminal position.
    pub fn set_winner(&mut self, side: Side, reason: impl Into<String>) {
        self.winner = Some((side, reason.into()));
    }

    pub fn winner(&self) -> Option<Side> {
        self.winner.as_ref().map(|(side, _)| *side)
    }

    pub fn winner_message(&self) -> Option<&str> {
        self.winner.as_ref().map(|(_, reason)| reason.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pieces::piece::PieceKind;

    fn descriptors(specs: &[&str]) -> Vec<String> {
        specs.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn place_pieces_parses_descriptors_and_sentinels() {
        let mut board = Board::default();
        board
            .place_pieces(&descriptors(&["Ke1", "Pa2", "QX"]), &descriptors(&["Ke8"]))
            .expect("valid placement");

        let king = board.piece_on("e1").expect("king placed");
        assert_eq!(board.piece(king).kind(), PieceKind::King);
        assert_eq!(board.pieces(Side::White)[2].kind(), PieceKind::Queen);
        assert!(!board.pieces(Side::White)[2].is_living());
        assert!(!board.pieces(Side::White)[2].is_captured());
        assert_eq!(board.count_living(Side::White), 2);
    }

    #[test]
    fn boards_beyond_127_squares_construct_and_index_fully() {
        let mut board = Board::new(16, 16);
        assert_eq!(board.squares().len(), 256);
        assert_eq!(board.square_named("a16").expect("top-left").coord(), (0, 0));
        assert_eq!(board.square_named("p1").expect("bottom-right").coord(), (15, 15));

        board
            .place_pieces(&descriptors(&["Kk4"]), &[])
            .expect("valid placement");
        let king = board.piece_on("k4").expect("king placed");
        assert_eq!(board.piece(king).kind(), PieceKind::King);
    }

    #[test]
    fn unknown_symbol_fails_placement() {
        let mut board = Board::default();
        let result = board.place_pieces(&descriptors(&["Ze1"]), &[]);
        assert!(matches!(result, Err(Errors::UnknownPieceSymbol('Z'))));
    }

    #[test]
    fn placement_onto_occupied_square_captures() {
        let mut board = Board::default();
        board
            .place_pieces(&descriptors(&["Re4"]), &descriptors(&["Ne4"]))
            .expect("valid placement");
        // The black knight lands last and takes the square.
        let occupant = board.piece_on("e4").expect("occupied");
        assert_eq!(occupant.side, Side::Black);
        assert!(board.pieces(Side::White)[0].is_captured());
        assert!(!board.pieces(Side::White)[0].is_living());
    }

    #[test]
    fn try_move_rejects_destinations_outside_the_legal_set() {
        let mut board = Board::default();
        board
            .place_pieces(&descriptors(&["Ra1"]), &[])
            .expect("valid placement");
        let rook = board.piece_on("a1").expect("rook placed");
        board.def_legal_move(rook);

        let d4 = board.square_named("d4").expect("square").coord();
        let result = board.try_move(rook, d4);
        assert!(matches!(result, Err(Errors::IllegalMove { .. })));

        let a4 = board.square_named("a4").expect("square").coord();
        board.try_move(rook, a4).expect("rook slides up the a-file");
        assert_eq!(board.piece(rook).square(), Some(a4));
    }

    #[test]
    fn apply_move_clones_and_leaves_the_source_untouched() {
        let mut board = Board::default();
        board
            .place_pieces(&descriptors(&["Ra1", "Pb2"]), &descriptors(&["Na8"]))
            .expect("valid placement");
        let rook = board.piece_on("a1").expect("rook placed");
        board.def_legal_move(rook);

        let a8 = board.square_named("a8").expect("square").coord();
        let movement = Movement::new(rook, a8);
        let clone = board.apply_move(&movement).expect("clone with move played");

        // Source board unchanged.
        assert!(board.piece_on("a1").is_ok());
        assert!(board.pieces(Side::Black)[0].is_living());
        assert_eq!(board.side_to_move(), Side::White);

        // Clone has the capture played and the turn flipped.
        assert_eq!(clone.piece_on("a8").expect("rook arrived"), rook);
        assert!(!clone.pieces(Side::Black)[0].is_living());
        assert_eq!(clone.side_to_move(), Side::Black);

        // Uninvolved pieces keep position and flags.
        assert_eq!(
            clone.pieces(Side::White)[1].square(),
            board.pieces(Side::White)[1].square()
        );
    }

    #[test]
    fn apply_move_flips_the_turn_for_black_too() {
        let mut board = Board::default();
        board
            .place_pieces(&descriptors(&["Ra1"]), &descriptors(&["Nh8"]))
            .expect("valid placement");
        board.pass_turn();
        assert_eq!(board.side_to_move(), Side::Black);

        let knight = board.piece_on("h8").expect("knight placed");
        board.def_legal_move(knight);
        let g6 = board.square_named("g6").expect("square").coord();
        let clone = board
            .apply_move(&Movement::new(knight, g6))
            .expect("clone with move played");
        assert_eq!(clone.side_to_move(), Side::White);
    }

    #[test]
    fn has_no_moves_requires_the_turn() {
        let mut board = Board::new(2, 1);
        // A lone white pawn blocked by a black pawn directly ahead.
        board
            .place_pieces(&descriptors(&["Va1"]), &descriptors(&["Va2"]))
            .expect("valid placement");
        assert!(board.has_no_moves(Side::White));
        // Not black's turn, so the question is answered negatively.
        assert!(!board.has_no_moves(Side::Black));
    }

    #[test]
    fn descriptor_round_trip_preserves_every_legal_set() {
        // Reach a mid-game position with a capture and a spent double step,
        // then rebuild the board from its own descriptors.
        let mut board = Board::default();
        board
            .place_pieces(
                &descriptors(&["Ke1", "Ra1", "Pb2", "Pe2"]),
                &descriptors(&["Ke8", "Na3", "Pd7"]),
            )
            .expect("valid placement");
        let rook = board.piece_on("a1").expect("rook");
        board.def_legal_move(rook);
        let a3 = board.square_named("a3").expect("square").coord();
        board.try_move(rook, a3).expect("rook takes the knight");
        let pawn = board.piece_on("e2").expect("pawn");
        board.def_legal_move(pawn);
        let e3 = board.square_named("e3").expect("square").coord();
        board.try_move(pawn, e3).expect("single push");

        let white: Vec<String> = board
            .pieces(Side::White)
            .iter()
            .map(|p| p.descriptor(board.n_rows()))
            .collect();
        let black: Vec<String> = board
            .pieces(Side::Black)
            .iter()
            .map(|p| p.descriptor(board.n_rows()))
            .collect();
        let mut rebuilt = Board::new(board.n_rows(), board.n_cols());
        rebuilt
            .place_pieces(&white, &black)
            .expect("descriptors parse back");

        for side in [Side::White, Side::Black] {
            board.def_legal_moves(side);
            rebuilt.def_legal_moves(side);
            for (original, copy) in board.pieces(side).iter().zip(rebuilt.pieces(side)) {
                assert_eq!(original.kind(), copy.kind());
                assert_eq!(original.is_living(), copy.is_living());
                assert_eq!(original.square(), copy.square());
                assert_eq!(original.legal_moves(), copy.legal_moves());
                assert_eq!(original.protected_squares(), copy.protected_squares());
            }
        }
    }

    #[test]
    fn leaf_movements_cannot_be_applied() {
        let board = Board::default();
        let result = board.apply_move(&Movement::leaf(42));
        assert!(matches!(result, Err(Errors::NoLegalMoves)));
    }
}
