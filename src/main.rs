use std::env;
use std::io::{self, BufRead, Write};
use std::process;
use std::sync::mpsc::channel;

use prechess::board::render::render_board;
use prechess::engine::difficulty::Difficulty;
use prechess::games::king_duel::KingDuel;
use prechess::games::killer::KillerGame;
use prechess::games::minor_vs_pawns::MinorVsPawns;
use prechess::games::pawn_battle::PawnBattle;
use prechess::games::session::{GameSession, HumanMove, SessionEvent};
use prechess::games::variant::Variant;
use prechess::player::{PlayerKind, Side};

const DEFAULT_DIAMONDS: usize = 8;
const DEFAULT_COLUMNS: i8 = 8;
const DEFAULT_MAX_MOVES: u32 = 20;

fn usage() -> ! {
    eprintln!("usage: prechess <variant> [option] [difficulty]");
    eprintln!("  variants:");
    eprintln!("    killer-queen | killer-rook | killer-knight  [diamonds: 8|12|16]");
    eprintln!("    pawn-battle                                 [columns: 4..8]");
    eprintln!("    king-duel                                   [move cap]");
    eprintln!("    bishops | knights                           (minors play white)");
    eprintln!("  difficulty: easy | medium | hard (default medium)");
    process::exit(2);
}

fn parse_variant(name: &str, option: Option<&str>) -> Option<Box<dyn Variant>> {
    let variant: Box<dyn Variant> = match name {
        "killer-queen" | "killer-rook" | "killer-knight" => {
            let diamonds = match option {
                Some(raw) => raw.parse().ok()?,
                None => DEFAULT_DIAMONDS,
            };
            let game = match name {
                "killer-rook" => KillerGame::rook(diamonds),
                "killer-knight" => KillerGame::knight(diamonds),
                _ => KillerGame::queen(diamonds),
            };
            Box::new(game.ok()?)
        }
        "pawn-battle" => {
            let columns = match option {
                Some(raw) => raw.parse().ok()?,
                None => DEFAULT_COLUMNS,
            };
            Box::new(PawnBattle::new(columns).ok()?)
        }
        "king-duel" => {
            let max_moves = match option {
                Some(raw) => raw.parse().ok()?,
                None => DEFAULT_MAX_MOVES,
            };
            Box::new(KingDuel::new(max_moves))
        }
        "bishops" => Box::new(MinorVsPawns::bishops(Side::White)),
        "knights" => Box::new(MinorVsPawns::knights(Side::White)),
        _ => return None,
    };
    Some(variant)
}

fn parse_difficulty(raw: &str) -> Option<Difficulty> {
    match raw {
        "easy" => Some(Difficulty::Easy),
        "medium" => Some(Difficulty::Medium),
        "hard" => Some(Difficulty::Hard),
        _ => None,
    }
}

fn main() {
    let args: Vec<String> = env::args().collect();
    let variant_name = match args.get(1) {
        Some(name) => name.as_str(),
        None => usage(),
    };

    // Trailing difficulty word; anything before it is the variant option.
    let mut option = args.get(2).map(String::as_str);
    let mut difficulty = Difficulty::Medium;
    if let Some(last) = args.last().map(String::as_str) {
        if let Some(parsed) = parse_difficulty(last) {
            difficulty = parsed;
            if args.len() == 3 {
                option = None;
            }
        }
    }

    let variant = match parse_variant(variant_name, option) {
        Some(variant) => variant,
        None => usage(),
    };

    println!("{} - you play white, the engine plays black", variant.name());

    let session = GameSession::new(
        variant,
        PlayerKind::Human,
        PlayerKind::Computer { difficulty },
    );

    let (move_tx, move_rx) = channel::<HumanMove>();
    let (event_tx, event_rx) = channel::<SessionEvent>();
    let worker = session.spawn(move_rx, event_tx);

    let stdin = io::stdin();
    let mut stdin_lock = stdin.lock();
    let mut input = String::new();

    while let Ok(event) = event_rx.recv() {
        match event {
            SessionEvent::AwaitingHuman(side) => {
                // The board snapshot lives on the worker; prompt only.
                print!("{}> ", side.name());
                io::stdout().flush().ok();
                input.clear();
                match stdin_lock.read_line(&mut input) {
                    Ok(0) | Err(_) => break,
                    Ok(_) => {}
                }
                let mut tokens = input.split_whitespace();
                match (tokens.next(), tokens.next()) {
                    (Some(from), Some(to)) => {
                        let human_move = HumanMove {
                            from: from.to_string(),
                            to: to.to_string(),
                        };
                        if move_tx.send(human_move).is_err() {
                            break;
                        }
                    }
                    _ => {
                        println!("enter a move as two squares, e.g. 'e2 e4'");
                        // Resend nothing; the worker still waits, so feed it
                        // an impossible move to get a fresh prompt.
                        let retry = HumanMove {
                            from: String::new(),
                            to: String::new(),
                        };
                        if move_tx.send(retry).is_err() {
                            break;
                        }
                    }
                }
            }
            SessionEvent::MoveApplied { side, from, to } => {
                println!("{} plays {} {}", side.name(), from, to);
            }
            SessionEvent::IllegalMove { side, reason } => {
                println!("illegal move for {}: {}", side.name(), reason);
            }
            SessionEvent::GameOver { winner, reason } => {
                println!("game over: {} wins - {}", winner.name(), reason);
                break;
            }
        }
    }

    drop(move_tx);
    if let Ok(session) = worker.join() {
        println!("{}", render_board(session.board()));
    }
}
