//! Perft benchmark for profiling with cargo-flamegraph.
//!
//! Usage:
//!   cargo flamegraph --example perft_bench -p tilechess_core -- [depth] [fen]
//!
//! Without a FEN the standard opening is used. The FEN may carry a side to
//! move ("w" or "b"); other fields are ignored.

use std::env;
use std::time::Instant;

use tilechess_core::{Board, divide, perft};

fn main() {
    let args: Vec<String> = env::args().collect();
    let depth: u8 = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(4);

    let mut board = match args.get(2) {
        Some(fen) => match Board::from_fen(fen) {
            Ok(board) => board,
            Err(e) => {
                eprintln!("bad FEN: {e}");
                std::process::exit(2);
            }
        },
        None => Board::standard(),
    };

    if env::var("DIVIDE").is_ok() {
        for (mv, nodes) in divide(&mut board, depth) {
            println!("{mv}: {nodes}");
        }
    }

    let start = Instant::now();
    let nodes = perft(&mut board, depth);
    let elapsed = start.elapsed();
    println!(
        "depth {depth}: {nodes} nodes in {elapsed:.3?} ({:.2} Mn/s)",
        nodes as f64 / 1_000_000.0 / elapsed.as_secs_f64()
    );
}
