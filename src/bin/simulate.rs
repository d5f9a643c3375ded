//! Scenario runner.
//!
//! Loads a JSON scenario, runs the single-player and multiplayer simulations
//! and writes both results as JSON next to each other.
//!
//! Usage: `simulate [scenario.json] [output_dir]`
//!
//! Type "Q" + Enter to stop the current run early; the partial result is
//! still written. Set `RUST_LOG=debug` for run setup details.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use indicatif::{ProgressBar, ProgressStyle};

use holdem_sim::eval::Category;
use holdem_sim::sim::{Scenario, Simulator};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    println!("=== Hold'em Monte Carlo Simulator ===\n");

    let scenario = load_scenario();
    let resolved = match scenario.resolve() {
        Ok(resolved) => resolved,
        Err(e) => {
            eprintln!("Invalid scenario: {}", e);
            std::process::exit(1);
        }
    };
    let output_dir = std::env::args()
        .nth(2)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("output"));
    std::fs::create_dir_all(&output_dir).expect("Failed to create output directory");

    let cancel = Arc::new(AtomicBool::new(false));
    listen_for_quit(cancel.clone());

    println!("Hero: {}", resolved.hero);
    println!("Board: {:?}", resolved.board);
    println!();

    // Single-player category frequencies
    let config = scenario.single_config();
    let bar = progress_bar(config.trials);
    let start = Instant::now();
    let freq = Simulator::new(config)
        .with_cancel_flag(cancel.clone())
        .run_single_with_progress(&resolved.hero, &resolved.board, |n| bar.inc(n))
        .unwrap_or_else(|e| {
            bar.abandon();
            eprintln!("Single-player run failed: {}", e);
            std::process::exit(1);
        });
    bar.finish_and_clear();

    println!(
        "Single-player: {} trials in {:.2}s",
        freq.trials,
        start.elapsed().as_secs_f64()
    );
    for (category, count) in freq.iter() {
        println!("  {:<16} {:>10}", category.name(), count);
    }
    if let Some(category) = freq.most_likely() {
        println!("  Most likely: {}", category);
    }
    if freq.count(Category::StraightFlush) > 0 {
        println!("  Straight flush seen {} times", freq.count(Category::StraightFlush));
    }

    let path = output_dir.join("single.json");
    freq.save_json(&path).expect("Failed to write single-player result");
    println!("  Saved to {}\n", path.display());

    if cancel.load(Ordering::Relaxed) {
        return;
    }

    // Multiplayer win counts
    let config = scenario.multiplayer_config();
    let bar = progress_bar(config.trials);
    let start = Instant::now();
    let result = Simulator::new(config)
        .with_cancel_flag(cancel.clone())
        .run_multiplayer_with_progress(
            &resolved.hero,
            &resolved.opponents,
            &resolved.board,
            scenario.opponent_count,
            |n| bar.inc(n),
        )
        .unwrap_or_else(|e| {
            bar.abandon();
            eprintln!("Multiplayer run failed: {}", e);
            std::process::exit(1);
        });
    bar.finish_and_clear();

    println!(
        "Multiplayer: {} trials, {} chops in {:.2}s",
        result.trials,
        result.chops,
        start.elapsed().as_secs_f64()
    );
    for contestant in &result.contestants {
        let hole = contestant
            .hole
            .map(|h| h.to_string())
            .unwrap_or_else(|| "random".to_string());
        println!(
            "  Seat {} ({:<6}) wins {:>8}",
            contestant.seat, hole, contestant.wins
        );
    }

    let path = output_dir.join("multiplayer.json");
    result
        .save_json(&path)
        .expect("Failed to write multiplayer result");
    println!("  Saved to {}", path.display());
}

fn load_scenario() -> Scenario {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "scenario.json".to_string());

    match Scenario::from_json_file(&path) {
        Ok(scenario) => {
            println!("Loaded scenario from: {}", path);
            scenario
        }
        Err(e) => {
            eprintln!("Could not load {}: {}", path, e);
            std::process::exit(1);
        }
    }
}

fn progress_bar(trials: u64) -> ProgressBar {
    let bar = ProgressBar::new(trials);
    if let Ok(style) = ProgressStyle::with_template("{elapsed_precise} [{bar:40}] {pos}/{len} trials ({eta})") {
        bar.set_style(style.progress_chars("=> "));
    }
    bar
}

/// Type "Q" + Enter to stop after the current trial.
fn listen_for_quit(cancel: Arc<AtomicBool>) {
    std::thread::spawn(move || {
        let mut buffer = String::new();
        while std::io::stdin().read_line(&mut buffer).is_ok_and(|n| n > 0) {
            if buffer.trim().eq_ignore_ascii_case("q") {
                log::warn!("interrupt requested, stopping current run");
                cancel.store(true, Ordering::Relaxed);
                break;
            }
            buffer.clear();
        }
    });
}
