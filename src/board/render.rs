//! Terminal-oriented Unicode board renderer.
//!
//! Creates a human-readable board view for the CLI, tests and
//! diagnostics. Works for any board dimensions the engine supports.

use crate::board::board::Board;
use crate::pieces::piece::PieceKind;
use crate::player::Side;

/// Render the board to a Unicode string for terminal output.
pub fn render_board(board: &Board) -> String {
    let mut out = String::new();

    let file_header = {
        let mut header = String::from(" ");
        for col in 0..board.n_cols() {
            header.push(' ');
            header.push(char::from(b'a' + col as u8));
        }
        header
    };

    out.push_str(&file_header);
    out.push('\n');

    for row in 0..board.n_rows() {
        let rank = board.n_rows() - row;
        out.push_str(&rank.to_string());

        for col in 0..board.n_cols() {
            out.push(' ');
            match board.piece_at((row, col)) {
                Some(piece_ref) => {
                    let piece = board.piece(piece_ref);
                    out.push(piece_glyph(piece.side(), piece.kind()));
                }
                None => out.push('·'),
            }
        }

        out.push(' ');
        out.push_str(&rank.to_string());
        out.push('\n');
    }

    out.push_str(&file_header);
    out
}

fn piece_glyph(side: Side, kind: PieceKind) -> char {
    match (side, kind) {
        (Side::White, PieceKind::Pawn) => '♙',
        (Side::White, PieceKind::Knight) => '♘',
        (Side::White, PieceKind::Bishop) => '♗',
        (Side::White, PieceKind::Rook) => '♖',
        (Side::White, PieceKind::Queen) => '♕',
        (Side::White, PieceKind::King) => '♔',
        (Side::White, PieceKind::Diamond) => '◇',
        (Side::Black, PieceKind::Pawn) => '♟',
        (Side::Black, PieceKind::Knight) => '♞',
        (Side::Black, PieceKind::Bishop) => '♝',
        (Side::Black, PieceKind::Rook) => '♜',
        (Side::Black, PieceKind::Queen) => '♛',
        (Side::Black, PieceKind::King) => '♚',
        (Side::Black, PieceKind::Diamond) => '◆',
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_small_boards_with_coordinates() {
        let mut board = Board::new(2, 3);
        board
            .place_pieces(&["Ka1".to_string()], &["Dc2".to_string()])
            .expect("valid placement");
        let rendered = render_board(&board);
        assert_eq!(rendered, "  a b c\n2 · · ◆ 2\n1 ♔ · · 1\n  a b c");
    }
}
