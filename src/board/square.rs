//! Squares and board coordinates.
//!
//! Coordinates are internal `(row, column)` pairs with row 0 at the top of
//! the grid; display names follow chess convention (`a1` is the bottom-left
//! corner), so the displayed rank is `n_rows - row`. Boards are not
//! necessarily 8x8, which is why every conversion takes the board height.

use crate::errors::Errors;
use crate::pieces::piece::PieceRef;

/// Internal board coordinate as a `(row, column)` pair.
pub type Coord = (i8, i8);

/// Builds the display name for a coordinate on a board with `n_rows` rows.
pub fn square_name(coord: Coord, n_rows: i8) -> String {
    let letter = char::from(b'a' + coord.1 as u8);
    format!("{}{}", letter, n_rows - coord.0)
}

/// Parses a display name (for example `"e4"`) back to an internal
/// coordinate on a board of the given dimensions.
pub fn parse_square_name(name: &str, n_rows: i8, n_cols: i8) -> Result<Coord, Errors> {
    let mut chars = name.chars();
    let letter = match chars.next() {
        Some(c) if c.is_ascii_lowercase() => c,
        _ => return Err(Errors::InvalidSquareName(name.to_string())),
    };
    let rank: i8 = chars
        .as_str()
        .parse()
        .map_err(|_| Errors::InvalidSquareName(name.to_string()))?;

    let column = (letter as u8 - b'a') as i8;
    let row = n_rows - rank;
    if row < 0 || row >= n_rows || column >= n_cols {
        return Err(Errors::InvalidSquareName(name.to_string()));
    }
    Ok((row, column))
}

/// Visual class of a square, alternating by `(row + column)` parity.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SquareShade {
    Light,
    Dark,
}

/// A square in a board grid.
///
/// The square tracks which piece currently sits on it as a plain index pair
/// into the board's piece collections; it does not own the piece.
#[derive(Clone, Debug)]
pub struct Square {
    row: i8,
    column: i8,
    shade: SquareShade,
    name: String,
    occupant: Option<PieceRef>,
}

impl Square {
    /// Makes a new empty square for a board with `n_rows` rows.
    pub fn new(row: i8, column: i8, n_rows: i8) -> Self {
        let shade = if (row + column) % 2 == 0 {
            SquareShade::Light
        } else {
            SquareShade::Dark
        };
        Square {
            row,
            column,
            shade,
            name: square_name((row, column), n_rows),
            occupant: None,
        }
    }

    pub fn coord(&self) -> Coord {
        (self.row, self.column)
    }

    pub fn shade(&self) -> SquareShade {
        self.shade
    }

    /// Display name, e.g. `"a1"` for the bottom-left square.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn occupant(&self) -> Option<PieceRef> {
        self.occupant
    }

    pub fn is_occupied(&self) -> bool {
        self.occupant.is_some()
    }

    pub(crate) fn set_occupant(&mut self, piece: PieceRef) {
        self.occupant = Some(piece);
    }

    pub(crate) fn clear_occupant(&mut self) {
        self.occupant = None;
    }
}
