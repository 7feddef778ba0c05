//! The rule-set contract shared by every variant.
//!
//! A variant supplies the board shape, the starting placement, the
//! termination test and the position evaluation; the board/piece engine,
//! the session turn loop and the search depend only on this trait. The
//! board itself is owned by whoever drives the game (the session for the
//! live board, the search for its clones) and is passed in explicitly, so
//! hypothetical positions go through exactly the same hooks as the live
//! one.

use crate::board::board::Board;
use crate::errors::Errors;

/// A concrete rule set: starting layout, termination and evaluation over
/// the shared board engine.
pub trait Variant: Send {
    /// Display name of the variant.
    fn name(&self) -> &str;

    /// A fresh, empty board of this variant's dimensions.
    fn new_board(&self) -> Board;

    /// Places the starting pieces on an empty board. Configuration
    /// problems (bad descriptors, unsupported option counts) surface here.
    fn place_starting_pieces(&self, board: &mut Board) -> Result<(), Errors>;

    /// Tests whether the position is terminal, recording winner and reason
    /// on the board as a side effect when it is.
    ///
    /// `full_moves` is the session's completed move-pair count; only some
    /// variants consult it. The search passes the live game's counter
    /// unchanged for hypothetical boards.
    fn is_game_over(&self, board: &mut Board, full_moves: u32) -> bool;

    /// Scores the position for the side to move on `board` (the negamax
    /// convention: the caller negates when comparing across a ply).
    fn evaluate(&self, board: &mut Board) -> i32;

    /// A fresh instance of this rule set for a new game. A new game is
    /// always a new instance, never a reset.
    fn fresh_instance(&self) -> Box<dyn Variant>;
}
