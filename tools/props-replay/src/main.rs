//! Props Replay: run a call script against a fresh props ledger.

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use props_ledger::service::LedgerConfig;
use props_replay::{parse_script, Replay};
use props_telemetry::{init_tracing, TelemetryConfig};

/// Props Replay: host simulator for the props ledger
#[derive(Parser, Debug)]
#[command(name = "props-replay")]
#[command(about = "Replay a JSON-lines call script against an in-memory props ledger")]
struct Args {
    /// Script file, one call per line
    script: PathBuf,

    /// Emit logs as JSON lines on stderr
    #[arg(long)]
    json_logs: bool,

    /// Log level filter (overrides PROPS_LOG_LEVEL)
    #[arg(long)]
    log_level: Option<String>,

    /// Principals to include in the final summary
    #[arg(long = "stats", value_name = "PRINCIPAL")]
    stats: Vec<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut telemetry = TelemetryConfig::for_service("props-replay");
    telemetry.json_logs |= args.json_logs;
    if let Some(level) = &args.log_level {
        telemetry.log_level.clone_from(level);
    }
    init_tracing(&telemetry).context("initializing tracing")?;

    let text = std::fs::read_to_string(&args.script)
        .with_context(|| format!("reading script {}", args.script.display()))?;
    let steps = parse_script(&text)
        .with_context(|| format!("parsing script {}", args.script.display()))?;
    info!(steps = steps.len(), "Replaying script");

    let mut replay = Replay::new(LedgerConfig::from_env());
    let stdout = io::stdout();
    let mut out = stdout.lock();

    for step in &steps {
        let outcome = replay.apply(step);
        serde_json::to_writer(&mut out, &outcome).context("writing step outcome")?;
        writeln!(out)?;
    }

    let summary = replay.summary(args.stats.iter().map(String::as_str));
    serde_json::to_writer(&mut out, &summary).context("writing summary")?;
    writeln!(out)?;

    info!(
        successful = summary.successful,
        rejected = summary.rejected,
        "Replay finished"
    );
    Ok(())
}
