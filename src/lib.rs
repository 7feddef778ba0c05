//! Crate root module declarations for the prechess engine project.
//!
//! This file exposes all top-level subsystems (board and square model,
//! piece movement rules, variant rule sets, search, and the game session)
//! so binaries, tests, and external tooling can import stable module
//! paths.

pub mod errors;

pub mod board {
    pub mod board;
    pub mod render;
    pub mod square;
}

pub mod pieces {
    pub mod movement;
    pub mod piece;
}

pub mod movegen {
    pub mod king;
    pub mod pawn;
    pub mod standard;
}

pub mod player;

pub mod games {
    pub mod killer;
    pub mod king_duel;
    pub mod minor_vs_pawns;
    pub mod pawn_battle;
    pub mod session;
    pub mod variant;
}

pub mod engine {
    pub mod difficulty;
    pub mod negamax;
}
