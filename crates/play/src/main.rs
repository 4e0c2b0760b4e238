//! tilechess
//!
//! Play against the minimax engine in the terminal.

use std::env;
use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use tilechess_core::{Color, GameOutcome, Move};
use tilechess_play::{PlayConfig, Session, Turn};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

fn print_usage() {
    println!("tilechess: play chess against a minimax engine");
    println!();
    println!("Usage:");
    println!("  tilechess [--config FILE] [--depth N] [--human white|black] [--layout FILE]");
    println!();
    println!("Commands during play:");
    println!("  e2e4      - move a piece (also \"e2 e4\")");
    println!("  moves     - list legal moves");
    println!("  board     - show the board again");
    println!("  quit      - leave the game");
}

/// Command-line overrides on top of the config file.
#[derive(Debug, Default)]
struct Args {
    config: Option<PathBuf>,
    depth: Option<u8>,
    human: Option<Color>,
    layout: Option<PathBuf>,
    help: bool,
}

fn parse_args(args: &[String]) -> Result<Args> {
    let mut parsed = Args::default();
    let mut i = 0;
    while i < args.len() {
        let flag = args[i].as_str();
        let value = || {
            args.get(i + 1)
                .with_context(|| format!("{flag} needs a value"))
        };
        match flag {
            "--config" | "-c" => parsed.config = Some(PathBuf::from(value()?)),
            "--layout" | "-l" => parsed.layout = Some(PathBuf::from(value()?)),
            "--depth" | "-d" => {
                let raw = value()?;
                parsed.depth = Some(raw.parse().with_context(|| format!("bad depth {raw:?}"))?);
            }
            "--human" => {
                parsed.human = Some(match value()?.as_str() {
                    "white" | "w" => Color::White,
                    "black" | "b" => Color::Black,
                    other => bail!("unknown color {other:?}"),
                });
            }
            "--help" | "-h" => {
                parsed.help = true;
                i += 1;
                continue;
            }
            other => bail!("unknown argument {other:?}"),
        }
        i += 2;
    }
    Ok(parsed)
}

fn announce(outcome: GameOutcome) {
    match outcome {
        GameOutcome::Checkmate { winner } => println!("Checkmate. {winner} wins."),
        GameOutcome::Stalemate => println!("Stalemate."),
        GameOutcome::InProgress => {}
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let argv: Vec<String> = env::args().skip(1).collect();
    let args = parse_args(&argv)?;
    if args.help {
        print_usage();
        return Ok(());
    }

    let mut config = match &args.config {
        Some(path) => PlayConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => PlayConfig::default(),
    };
    if let Some(depth) = args.depth {
        config.depth = depth;
    }
    if let Some(human) = args.human {
        config.human = human;
    }
    if args.layout.is_some() {
        config.layout = args.layout;
    }
    config.validate()?;

    let mut session = Session::from_config(&config).context("failed to set up the board")?;
    println!("You play {}. Engine depth {}.", session.human(), session.depth());
    println!("{}", session.render());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        match session.turn() {
            Turn::Over(outcome) => {
                announce(outcome);
                break;
            }
            Turn::Engine => {
                println!("Engine is thinking...");
                let Some(mv) = session.play_engine().await else {
                    bail!("engine failed to produce a move");
                };
                println!("Engine plays {mv}");
                println!("{}", session.render());
            }
            Turn::Human => {
                print!("{} to move> ", session.board().active_color());
                std::io::stdout().flush().ok();

                let Some(line) = lines.next_line().await.context("failed to read stdin")? else {
                    break;
                };
                match line.trim() {
                    "" => {}
                    "quit" | "exit" => break,
                    "help" => print_usage(),
                    "board" => println!("{}", session.render()),
                    "moves" => println!("{}", session.legal_move_list().join(" ")),
                    text => match Move::parse(text) {
                        None => println!("Could not read {text:?}; try e2e4."),
                        Some(mv) => {
                            if session.play_human(mv) {
                                println!("{}", session.render());
                            } else {
                                println!("{mv} is not legal here.");
                            }
                        }
                    },
                }
            }
        }
    }
    Ok(())
}
