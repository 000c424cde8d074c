//! Perft benchmark for profiling with cargo-flamegraph.
//!
//! Usage:
//!   cargo flamegraph --example perft_bench -p chess_rules -- [depth]
//!
//! Examples:
//!   # Default: depth 3 from the starting position
//!   cargo flamegraph --example perft_bench -p chess_rules
//!
//!   # Custom depth, with per-move breakdown
//!   cargo run --release --example perft_bench -p chess_rules -- 4 divide

use chess_rules::{Game, divide, perft};
use std::env;
use std::time::Instant;

fn main() {
    let args: Vec<String> = env::args().collect();

    let depth: u8 = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(3);
    let game = Game::new();

    println!("Depth: {depth}");
    println!();

    if args.get(2).is_some_and(|s| s == "divide") {
        let start = Instant::now();
        let split = divide(&game, depth);
        let total: u64 = split.iter().map(|(_, n)| n).sum();
        for (mv, nodes) in &split {
            println!("{mv}: {nodes}");
        }
        println!();
        println!("Nodes: {total}");
        println!("Time: {:.3?}", start.elapsed());
        return;
    }

    // Warm-up run at lower depth
    if depth > 2 {
        let _ = perft(&game, depth.saturating_sub(2));
    }

    let start = Instant::now();
    let nodes = perft(&game, depth);
    let elapsed = start.elapsed();

    let nps = if elapsed.as_secs_f64() > 0.0 {
        nodes as f64 / elapsed.as_secs_f64()
    } else {
        0.0
    };

    println!("Nodes: {nodes}");
    println!("Time: {elapsed:.3?}");
    println!("NPS: {nps:.0}");
}
