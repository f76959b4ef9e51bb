use concentration_core::{self as game, Alphabet, MemoryGame, Position, Session};
use crossbeam_channel::{Receiver, select};
use std::fmt::Write as _;
use std::io::{self, BufRead};
use std::ops::ControlFlow;
use std::thread;
use std::time::Instant;

use crate::timer::DeadlineScheduler;

const HELP: &str = "\
Commands:
  <number>   turn over the card with that number
  n, new     start a new game
  h, help    show this help
  q, quit    leave";

#[derive(Clone, Debug, PartialEq)]
enum Command {
    Select(Position),
    NewGame,
    Help,
    Quit,
    Unknown(String),
}

impl Command {
    /// Cards are numbered from 1 on screen
    fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        Some(match line.to_lowercase().as_str() {
            "n" | "new" => Self::NewGame,
            "h" | "help" | "?" => Self::Help,
            "q" | "quit" | "exit" => Self::Quit,
            other => match other.parse::<Position>().ok().and_then(|n| n.checked_sub(1)) {
                Some(position) => Self::Select(position),
                None => Self::Unknown(line.to_owned()),
            },
        })
    }
}

/// Text rendering of a session, one row of `columns` cards per line.
#[derive(Clone, Debug)]
struct BoardView {
    alphabet: Alphabet,
    columns: usize,
}

impl BoardView {
    fn new(alphabet: Alphabet, columns: u16) -> Self {
        Self {
            alphabet,
            columns: usize::from(columns.max(1)),
        }
    }

    fn render(&self, session: &Session) -> String {
        let mut out = String::new();
        let width = session.cards().len().to_string().len();

        for row in session.cards().chunks(self.columns) {
            let cells: Vec<String> = row
                .iter()
                .map(|card| {
                    let symbol = self.alphabet.get(card.symbol).unwrap_or("?");
                    let face = if !card.state.is_face_up() {
                        "?".to_owned()
                    } else if card.state.is_matched() {
                        format!("[{symbol}]")
                    } else {
                        format!(" {symbol}")
                    };
                    format!("{:>width$}:{:<4}", card.position + 1, face)
                })
                .collect();
            let _ = writeln!(out, "{}", cells.join(" ").trim_end());
        }

        let _ = writeln!(
            out,
            "Moves: {}   Pairs Found: {} / {}",
            session.move_count(),
            session.matched_pairs(),
            session.total_pairs()
        );
        if session.won() {
            let _ = writeln!(
                out,
                "Congratulations! You won in {} moves! Type `new` to play again.",
                session.move_count()
            );
        }

        out
    }
}

enum Event {
    Line(String),
    Timer(Instant),
    InputClosed,
}

fn spawn_input_reader() -> Receiver<String> {
    let (tx, rx) = crossbeam_channel::unbounded();
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            match line {
                Ok(line) => {
                    if tx.send(line).is_err() {
                        break;
                    }
                }
                Err(err) => {
                    log::error!("Could not read input: {}", err);
                    break;
                }
            }
        }
        log::debug!("Input closed");
    });
    rx
}

/// Play until the player quits or input ends.
pub(crate) fn run(config: &game::GameConfig, json: bool) -> anyhow::Result<()> {
    let mut game = MemoryGame::new(config, DeadlineScheduler::default())?;
    let view = BoardView::new(game.alphabet().clone(), config.columns);

    if json {
        let emit = |session: &Session| match serde_json::to_string(session) {
            Ok(line) => println!("{line}"),
            Err(err) => log::error!("Could not serialize session: {}", err),
        };
        emit(game.session());
        game.subscribe(emit);
    } else {
        print!("{}", view.render(game.session()));
        let view = view.clone();
        game.subscribe(move |session| print!("{}", view.render(session)));
        eprintln!("{HELP}");
    }

    let input = spawn_input_reader();
    loop {
        let timeout = game
            .scheduler()
            .next_deadline()
            .map_or_else(crossbeam_channel::never, crossbeam_channel::at);

        let event = select! {
            recv(input) -> line => line.map_or(Event::InputClosed, Event::Line),
            recv(timeout) -> now => now.map_or(Event::InputClosed, Event::Timer),
        };

        if handle_event(&mut game, event).is_break() {
            break;
        }
    }

    log::debug!("Leaving after {} moves", game.move_count());
    Ok(())
}

/// Apply one event to the game, `Break` once the player is done.
fn handle_event(game: &mut MemoryGame<DeadlineScheduler>, event: Event) -> ControlFlow<()> {
    match event {
        Event::Line(line) => match Command::parse(&line) {
            None => {}
            Some(Command::Select(position)) => {
                if !game.select_card(position).has_update() {
                    eprintln!("Card {} cannot be turned over right now", position + 1);
                }
            }
            Some(Command::NewGame) => {
                game.new_game();
            }
            Some(Command::Help) => eprintln!("{HELP}"),
            Some(Command::Quit) => return ControlFlow::Break(()),
            Some(Command::Unknown(text)) => eprintln!("Unknown command {text:?}, type `help`"),
        },
        Event::Timer(now) => {
            for pending in game.scheduler_mut().take_due(now) {
                game.resolve(pending);
            }
        }
        Event::InputClosed => return ControlFlow::Break(()),
    }

    ControlFlow::Continue(())
}
