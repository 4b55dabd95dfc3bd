// Café Replay Runner: scripted visits on a virtual clock
// Drives the engine headless and writes a JSONL timeline of page snapshots
//
// Usage:
//   cargo run --bin cafe-replay                              # Built-in visit, default config
//   cargo run --bin cafe-replay -- --config cafe.json        # Custom demo settings
//   cargo run --bin cafe-replay -- --script visit.json       # Custom visit
//   cargo run --bin cafe-replay -- --seed 42 --out t.jsonl   # Seeded feed/graph, custom output
//   RUST_LOG=cafe_engine=debug cargo run --bin cafe-replay   # Engine tracing

mod script;
mod timeline;

use cafe_engine::*;
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use script::{apply, default_visit, load_visit};
use timeline::{TimelineEntry, TimelineRecorder};

// ─── CLI Parsing ────────────────────────────────────────────────────────────

#[derive(Debug, Parser)]
#[command(name = "cafe-replay", version, about = "Replay a scripted café visit")]
struct CliArgs {
    /// JSON config; missing fields use the demo defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// JSON array of steps; defaults to the built-in visit
    #[arg(long)]
    script: Option<PathBuf>,

    /// Seed for the feed, graph and jitter
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Timeline output path
    #[arg(long, default_value = "replay-results/timeline.jsonl")]
    out: PathBuf,
}

fn load_config(path: Option<&PathBuf>) -> std::result::Result<CafeConfig, String> {
    match path {
        None => Ok(CafeConfig::default()),
        Some(p) => {
            let json = std::fs::read_to_string(p).map_err(|e| format!("{}: {e}", p.display()))?;
            CafeConfig::from_json(&json).map_err(|e| e.to_string())
        }
    }
}

// ─── Main ───────────────────────────────────────────────────────────────────

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_target(false)
        .init();

    let cli = CliArgs::parse();

    let config = match load_config(cli.config.as_ref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("  Config error: {e}");
            return ExitCode::FAILURE;
        }
    };
    let steps = match &cli.script {
        None => default_visit(),
        Some(path) => match load_visit(path) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("  Script error: {}: {e}", path.display());
                return ExitCode::FAILURE;
            }
        },
    };
    let mut app = match CafeApp::with_config(config, cli.seed) {
        Ok(a) => a,
        Err(e) => {
            eprintln!("  Engine error: {e}");
            return ExitCode::FAILURE;
        }
    };

    println!("\n  Café Replay Runner v{}", env!("CARGO_PKG_VERSION"));
    println!("  PRNG: ChaCha8Rng | Seed: {} | Steps: {}\n", cli.seed, steps.len());
    println!("  {:>10}  {:<14} {:<6} {}", "t (s)", "Action", "Result", "Detail");
    println!("  {}", "-".repeat(72));

    let mut recorder = TimelineRecorder::new();
    for (index, step) in steps.iter().enumerate() {
        let outcome = apply(&mut app, step);
        let effects = app.cafe_mut().drain_effects();
        let label = format!("{:?}", step.action);
        let label = label.split([' ', '{']).next().unwrap_or_default().to_string();
        let detail = outcome
            .error
            .clone()
            .or_else(|| outcome.detail.clone())
            .unwrap_or_default()
            .replace('\n', " ");
        println!(
            "  {:>10.1}  {:<14} {:<6} {}",
            step.at_ms as f64 / 1000.0,
            label,
            if outcome.ok { "ok" } else { "REJECT" },
            detail,
        );

        recorder.record(TimelineEntry {
            index,
            at_ms: step.at_ms,
            action: step.action.clone(),
            outcome,
            effects,
            view: app.cafe().view(),
        });
    }

    let view = app.cafe().view();
    println!("  {}", "-".repeat(72));
    println!(
        "  Steps: {}  Rejected: {}  LADY: {}  BEANS: {}  Total brewed: {}  Coffee level: {}",
        recorder.len(),
        recorder.rejected(),
        app.cafe().balances().get(Currency::Lady),
        app.cafe().balances().get(Currency::Beans),
        view.total_brewed,
        view.coffee_level,
    );
    if let Some(last) = recorder.entries().last() {
        println!("  Final wallet: {}", last.view.profile_wallet);
    }

    if let Err(e) = recorder.write_jsonl(&cli.out) {
        eprintln!("  Failed to write {}: {e}", cli.out.display());
        return ExitCode::FAILURE;
    }
    println!("  Timeline saved to: {}\n", cli.out.display());
    ExitCode::SUCCESS
}
