//! A game session: one variant instance, two players, one live board.
//!
//! The session is the only place the live board is mutated. It moves
//! through three states: `NotStarted` until `start_game` places the
//! pieces, `InProgress` while turns alternate, `Finished` once the
//! variant declares the position terminal. A new game is a new session
//! built from `Variant::fresh_instance`, never a reset.
//!
//! `run` drives the whole game on the calling thread (use `spawn` for a
//! dedicated worker): computer turns search synchronously, human turns
//! block on a channel until the UI collaborator delivers a move. The
//! blocking receive replaces the busy-wait flag of older designs; the
//! worker is woken exactly once per submitted human move.

use std::sync::mpsc::{Receiver, Sender};
use std::thread::{self, JoinHandle};

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::board::board::Board;
use crate::board::square::square_name;
use crate::engine::negamax::{choose_move, SEARCH_DEPTH};
use crate::errors::Errors;
use crate::games::variant::Variant;
use crate::pieces::movement::Movement;
use crate::player::{Player, PlayerKind, Side};

/// Session lifecycle state.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SessionState {
    NotStarted,
    InProgress,
    Finished,
}

/// A human move selection delivered by the UI collaborator: origin and
/// destination square names.
#[derive(Clone, Debug)]
pub struct HumanMove {
    pub from: String,
    pub to: String,
}

/// Events published by the session worker for the UI collaborator.
#[derive(Clone, Debug)]
pub enum SessionEvent {
    /// The worker is blocked waiting for this side's human move.
    AwaitingHuman(Side),
    /// A move was played on the live board.
    MoveApplied {
        side: Side,
        from: String,
        to: String,
    },
    /// A submitted human move was rejected; the worker keeps waiting.
    IllegalMove { side: Side, reason: String },
    /// The game reached a terminal position.
    GameOver { winner: Side, reason: String },
}

/// One running game: rule set, live board, both players and the move
/// counter.
pub struct GameSession {
    variant: Box<dyn Variant>,
    board: Board,
    players: [Player; 2],
    state: SessionState,
    half_moves: u32,
    rng: StdRng,
}

impl GameSession {
    pub fn new(variant: Box<dyn Variant>, white: PlayerKind, black: PlayerKind) -> Self {
        let board = variant.new_board();
        GameSession {
            variant,
            board,
            players: [
                Player::new(Side::White, white),
                Player::new(Side::Black, black),
            ],
            state: SessionState::NotStarted,
            half_moves: 0,
            rng: StdRng::from_entropy(),
        }
    }

    /// Same as `new` but with a deterministic random stream, for tests.
    pub fn with_seed(
        variant: Box<dyn Variant>,
        white: PlayerKind,
        black: PlayerKind,
        seed: u64,
    ) -> Self {
        let mut session = GameSession::new(variant, white, black);
        session.rng = StdRng::seed_from_u64(seed);
        session
    }

    pub fn variant(&self) -> &dyn Variant {
        self.variant.as_ref()
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn player(&self, side: Side) -> &Player {
        &self.players[side.index()]
    }

    /// Completed move pairs (a White move followed by a Black move).
    pub fn full_moves(&self) -> u32 {
        self.half_moves / 2
    }

    pub fn current_side(&self) -> Side {
        self.board.side_to_move()
    }

    /// Places the starting pieces and grants White the first turn.
    pub fn start_game(&mut self) -> Result<(), Errors> {
        if self.state != SessionState::NotStarted {
            return Err(Errors::GameNotInProgress);
        }
        self.variant.place_starting_pieces(&mut self.board)?;
        self.board.pass_turn_to(Side::White);
        self.players[Side::White.index()].gain_turn(&mut self.board);
        self.state = SessionState::InProgress;
        Ok(())
    }

    /// Hands the turn to the opponent and recomputes its legal movements.
    pub fn pass_move(&mut self) {
        let side = self.current_side();
        self.players[side.index()].pass_turn();
        self.board.pass_turn();
        let opponent = side.opponent();
        self.players[opponent.index()].gain_turn(&mut self.board);
        self.half_moves += 1;
    }

    /// Runs the variant's termination test against the live board and
    /// finishes the session when it fires.
    pub fn check_game_over(&mut self) -> bool {
        let full_moves = self.half_moves / 2;
        let over = self.variant.is_game_over(&mut self.board, full_moves);
        if over {
            self.state = SessionState::Finished;
        }
        over
    }

    /// Validates and plays a human move on the live board.
    pub fn submit_human_move(&mut self, from: &str, to: &str) -> Result<Movement, Errors> {
        if self.state != SessionState::InProgress {
            return Err(Errors::GameNotInProgress);
        }
        let piece_ref = self.board.piece_on(from)?;
        if piece_ref.side != self.current_side() {
            return Err(Errors::IllegalMove {
                from: from.to_string(),
                to: to.to_string(),
            });
        }
        let destination = self.board.square_named(to)?.coord();
        self.board.try_move(piece_ref, destination)?;
        Ok(Movement::new(piece_ref, destination))
    }

    /// Searches and plays one computer move on the live board. Returns
    /// the origin and destination square names of the played move.
    pub fn play_computer_turn(&mut self) -> Result<(String, String), Errors> {
        if self.state != SessionState::InProgress {
            return Err(Errors::GameNotInProgress);
        }
        let side = self.current_side();
        let difficulty = match self.players[side.index()].kind() {
            PlayerKind::Computer { difficulty } => difficulty,
            PlayerKind::Human => return Err(Errors::GameNotInProgress),
        };
        let full_moves = self.half_moves / 2;
        let movement = choose_move(
            self.variant.as_ref(),
            &mut self.board,
            full_moves,
            SEARCH_DEPTH,
            difficulty,
            &mut self.rng,
        )?;
        let (piece_ref, to) = match (movement.piece, movement.to) {
            (Some(piece_ref), Some(to)) => (piece_ref, to),
            _ => return Err(Errors::NoLegalMoves),
        };
        let n_rows = self.board.n_rows();
        let from_name = self
            .board
            .piece(piece_ref)
            .square()
            .map(|coord| square_name(coord, n_rows))
            .ok_or(Errors::NoLegalMoves)?;
        let to_name = square_name(to, n_rows);
        self.board.try_move(piece_ref, to)?;
        Ok((from_name, to_name))
    }

    /// Drives the game to completion on the calling thread.
    ///
    /// Human moves are received over `moves`; progress is published on
    /// `events`. Returns the finished session (or the session as-is if
    /// the move channel disconnects first). Event-send failures are
    /// ignored: a vanished listener should not stop the game thread.
    pub fn run(mut self, moves: Receiver<HumanMove>, events: Sender<SessionEvent>) -> Self {
        if self.state == SessionState::NotStarted && self.start_game().is_err() {
            return self;
        }

        while self.state == SessionState::InProgress {
            let side = self.current_side();

            if self.players[side.index()].is_computer() {
                match self.play_computer_turn() {
                    Ok((from, to)) => {
                        let _ = events.send(SessionEvent::MoveApplied { side, from, to });
                    }
                    Err(_) => {
                        // No movement to play; let the termination test
                        // below settle the game.
                    }
                }
            } else {
                loop {
                    let _ = events.send(SessionEvent::AwaitingHuman(side));
                    let human_move = match moves.recv() {
                        Ok(human_move) => human_move,
                        Err(_) => return self,
                    };
                    match self.submit_human_move(&human_move.from, &human_move.to) {
                        Ok(_) => {
                            let _ = events.send(SessionEvent::MoveApplied {
                                side,
                                from: human_move.from,
                                to: human_move.to,
                            });
                            break;
                        }
                        Err(error) => {
                            let _ = events.send(SessionEvent::IllegalMove {
                                side,
                                reason: format!("{error:?}"),
                            });
                        }
                    }
                }
            }

            self.pass_move();

            if self.check_game_over() {
                if let (Some(winner), Some(reason)) =
                    (self.board.winner(), self.board.winner_message())
                {
                    let _ = events.send(SessionEvent::GameOver {
                        winner,
                        reason: reason.to_string(),
                    });
                }
            }
        }

        self
    }

    /// Spawns the session worker on a dedicated thread.
    pub fn spawn(
        self,
        moves: Receiver<HumanMove>,
        events: Sender<SessionEvent>,
    ) -> JoinHandle<GameSession> {
        thread::spawn(move || self.run(moves, events))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc::channel;

    use crate::engine::difficulty::Difficulty;
    use crate::games::pawn_battle::PawnBattle;

    fn computer(difficulty: Difficulty) -> PlayerKind {
        PlayerKind::Computer { difficulty }
    }

    fn pawn_battle(columns: i8) -> Box<dyn Variant> {
        Box::new(PawnBattle::new(columns).expect("valid column count"))
    }

    #[test]
    fn starting_a_game_places_pieces_and_gives_white_the_turn() {
        let mut session = GameSession::new(
            pawn_battle(4),
            PlayerKind::Human,
            computer(Difficulty::Hard),
        );
        assert_eq!(session.state(), SessionState::NotStarted);
        session.start_game().expect("game starts");

        assert_eq!(session.state(), SessionState::InProgress);
        assert_eq!(session.current_side(), Side::White);
        assert!(session.player(Side::White).has_turn());
        assert_eq!(session.full_moves(), 0);
        assert_eq!(session.board().count_living(Side::White), 4);

        assert!(matches!(
            session.start_game(),
            Err(Errors::GameNotInProgress)
        ));
    }

    #[test]
    fn human_moves_are_validated_against_turn_and_legality() {
        let mut session = GameSession::new(
            pawn_battle(4),
            PlayerKind::Human,
            computer(Difficulty::Hard),
        );
        session.start_game().expect("game starts");

        // Black piece while White is to move.
        assert!(matches!(
            session.submit_human_move("a7", "a6"),
            Err(Errors::IllegalMove { .. })
        ));
        // Empty square.
        assert!(matches!(
            session.submit_human_move("c4", "c5"),
            Err(Errors::NoPieceOnSquare(_))
        ));
        // A pawn cannot jump three ranks.
        assert!(matches!(
            session.submit_human_move("b2", "b5"),
            Err(Errors::IllegalMove { .. })
        ));

        let movement = session.submit_human_move("b2", "b4").expect("legal push");
        assert!(movement.is_playable());
        session.pass_move();
        assert_eq!(session.current_side(), Side::Black);
        assert_eq!(session.full_moves(), 0);
    }

    #[test]
    fn half_moves_pair_up_into_full_moves() {
        let mut session = GameSession::new(
            pawn_battle(4),
            PlayerKind::Human,
            PlayerKind::Human,
        );
        session.start_game().expect("game starts");

        session.submit_human_move("a2", "a3").expect("white move");
        session.pass_move();
        assert_eq!(session.full_moves(), 0);
        session.submit_human_move("a7", "a6").expect("black move");
        session.pass_move();
        assert_eq!(session.full_moves(), 1);
    }

    #[test]
    fn a_computer_versus_computer_game_runs_to_completion() {
        let session = GameSession::with_seed(
            pawn_battle(4),
            computer(Difficulty::Hard),
            computer(Difficulty::Hard),
            11,
        );

        let (_move_tx, move_rx) = channel::<HumanMove>();
        let (event_tx, event_rx) = channel::<SessionEvent>();
        let worker = session.spawn(move_rx, event_tx);

        let mut saw_game_over = false;
        let mut applied = 0;
        while let Ok(event) = event_rx.recv() {
            match event {
                SessionEvent::MoveApplied { .. } => applied += 1,
                SessionEvent::GameOver { .. } => {
                    saw_game_over = true;
                }
                _ => {}
            }
        }

        let session = worker.join().expect("worker finishes");
        assert!(saw_game_over);
        assert!(applied > 0);
        assert_eq!(session.state(), SessionState::Finished);
        assert!(session.board().winner().is_some());
        assert!(session.board().winner_message().is_some());
    }
}
