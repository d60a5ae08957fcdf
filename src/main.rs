#![forbid(unsafe_code)]
#![warn(clippy::pedantic)]

use std::{
    fmt::Write as _,
    io::{Write as _, stdin, stdout},
    time::Duration,
};

use anyhow::{Context, Result, bail};
use chessboard_rules::{
    ActorId, Board, Color, GameOptions, Outcome, Position, Registry, SidePreference,
    board_display::BoardDisplay,
};
use clap::Parser;

const HOST: ActorId = ActorId(0);
const GUEST: ActorId = ActorId(1);

/// Two players sharing one terminal.
#[derive(Debug, Clone, Parser)]
#[command(version, about)]
struct Args {
    /// Starting clock of each side, in minutes.
    #[arg(short, long, default_value_t = 10)]
    minutes: u64,

    /// Seconds added to a clock after each move.
    #[arg(short, long, default_value_t = 0)]
    increment: u64,

    /// Side of the first player: white, black or random.
    #[arg(short, long, default_value_t = SidePreference::Random)]
    side: SidePreference,
}
impl Args {
    /// Game settings; an oversized clock saturates instead of overflowing.
    fn options(&self) -> GameOptions {
        GameOptions {
            time: Duration::from_secs(self.minutes.saturating_mul(60)),
            increment: Duration::from_secs(self.increment),
            side: self.side,
        }
    }
}

/// The local copy of a game: the registry relays moves and results, the
/// terminal keeps its own board in step with them.
struct Table {
    board: Board,
    players: [ActorId; 2],
    outcome: Option<Outcome>,
}
impl Table {
    fn start(registry: &mut Registry, options: GameOptions) -> Result<Self> {
        let id = registry.create(HOST, options)?;
        let guest_color = registry.join(GUEST, id)?;
        println!("player 1 plays {}, player 2 plays {guest_color}", !guest_color);
        let mut players = [HOST; 2];
        players[guest_color.index()] = GUEST;
        Ok(Table {
            board: Board::starting_position(),
            players,
            outcome: None,
        })
    }
    fn actor_to_move(&self) -> ActorId {
        self.players[self.board.side_to_move().index()]
    }
}
fn parse_move(input: &str) -> Result<(Position, Position)> {
    let (Some(origin), Some(destination)) = (input.get(0..2), input.get(2..4)) else {
        bail!("{input} is not a move");
    };
    if !matches!(input.get(4..), Some("" | "q")) {
        bail!("only queen promotion is supported");
    }
    Ok((origin.parse()?, destination.parse()?))
}

#[allow(
    clippy::too_many_lines,
    reason = "the loop is a flat command dispatch; splitting it scatters its state"
)]
fn main() -> Result<()> {
    let args = Args::parse();
    let options = args.options();
    let mut registry = Registry::new();
    let mut table = Table::start(&mut registry, options)?;
    let mut info = String::new();
    let mut highlighted: Vec<Position> = Vec::new();
    let mut view = Color::White;
    let mut first_time = true;
    loop {
        let board = &table.board;
        info.clear();
        match table.outcome {
            Some(outcome) => writeln!(&mut info, "{outcome}")?,
            None => {
                writeln!(&mut info, "{} plays", board.side_to_move())?;
                if board.is_checked(board.side_to_move()) {
                    writeln!(&mut info, "check")?;
                }
            }
        }
        if first_time {
            writeln!(&mut info, "type `help` for instructions")?;
            first_time = false;
        }
        print!(
            "{}",
            BoardDisplay {
                board,
                view,
                highlighted: &highlighted,
                info: &info,
            },
        );
        loop {
            print!("> ");
            stdout().flush()?;
            let mut input = String::new();
            if stdin().read_line(&mut input)? == 0 {
                return Ok(());
            }
            let input = input.trim();
            if input == "help" {
                println!("flip           - flip the board");
                println!("fen            - export the position as fen");
                println!("resign         - the side to move abandons the game");
                println!("new            - start another game");
                println!("exit           - exit the game");
                println!("e2             - view legal moves");
                println!("e2e4           - play the move");
                println!("e7e8q          - move and promote");
                println!("e1g1           - perform castling");
            } else if input == "exit" {
                return Ok(());
            } else if input == "flip" {
                view = !view;
            } else if input == "fen" {
                println!("{}", table.board.fen());
                continue;
            } else if input == "resign" {
                if let Some((_, outcome)) = registry.disconnect(table.actor_to_move()) {
                    table.outcome = Some(outcome);
                }
                highlighted.clear();
            } else if input == "new" {
                registry.disconnect(HOST);
                registry.disconnect(GUEST);
                table = Table::start(&mut registry, options)?;
                highlighted.clear();
            } else if let Ok(position) = input.parse::<Position>() {
                highlighted = table.board.legal_destinations(position);
            } else {
                let (origin, destination) = match parse_move(input) {
                    Ok(movement) => movement,
                    Err(err) => {
                        eprintln!("Error: {err}");
                        continue;
                    }
                };
                let actor = table.actor_to_move();
                let relayed = match registry.submit_move(actor, origin, destination) {
                    Ok(relayed) => relayed,
                    Err(err) => {
                        eprintln!("Error: {err}");
                        continue;
                    }
                };
                table
                    .board
                    .move_piece(relayed.summary.origin, relayed.summary.destination)
                    .context("local board fell out of step with the game")?;
                table.outcome = relayed.outcome;
                highlighted.clear();
                highlighted.extend([origin, destination]);
            }
            break;
        }
    }
}
