//! Command handlers. Output goes to stdout; logs go to stderr.

use std::fmt::Write as _;

use postwatch_core::{AppConfig, Creator};
use postwatch_store::{JsonFileStore, SeenState};
use postwatch_tracker::{RunMode, RunStats};

/// Runs exactly one cycle. Per-creator failures show up in the printed
/// statistics, not in the exit status.
///
/// # Errors
///
/// Returns an error if the creators file cannot be loaded or the HTTP
/// clients cannot be built.
pub(crate) async fn run_check(config: &AppConfig, heartbeat: bool) -> anyhow::Result<()> {
    let creators = postwatch_core::load_creators(&config.creators_path)?.creators;
    let runner = postwatch_tracker::build_runner(config, creators)?;
    let mode = if heartbeat {
        RunMode::Automated
    } else {
        RunMode::Interactive
    };

    let stats = runner.run_cycle(mode).await;
    print!("{}", format_stats(&stats));
    Ok(())
}

/// # Errors
///
/// Returns an error if the creators file is missing or invalid.
pub(crate) fn run_creators(config: &AppConfig) -> anyhow::Result<()> {
    let file = postwatch_core::load_creators(&config.creators_path)?;
    print!("{}", format_creators(&file.creators));
    Ok(())
}

/// # Errors
///
/// Returns an error only if the loaded state cannot be serialized.
pub(crate) fn run_state(config: &AppConfig) -> anyhow::Result<()> {
    let state: SeenState = JsonFileStore::new(config.state_path.clone()).load();
    println!("{}", serde_json::to_string_pretty(&state)?);
    Ok(())
}

pub(crate) fn format_stats(stats: &RunStats) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "started_at:           {}", stats.started_at.to_rfc3339());
    let _ = writeln!(out, "creators_checked:     {}", stats.creators_checked);
    let _ = writeln!(out, "new_posts:            {}", stats.new_posts);
    let _ = writeln!(out, "errors:               {}", stats.errors);
    let _ = writeln!(out, "skipped (baseline):   {}", stats.skipped);
    let _ = writeln!(out, "notifications_failed: {}", stats.notifications_failed);
    let _ = writeln!(out, "state_saved:          {}", stats.state_saved);
    let _ = writeln!(out, "elapsed_ms:           {}", stats.elapsed_ms);
    out
}

pub(crate) fn format_creators(creators: &[Creator]) -> String {
    let width = creators
        .iter()
        .map(|c| c.service.len() + 1 + c.id.len())
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    for creator in creators {
        let key = format!("{}/{}", creator.service, creator.id);
        let _ = writeln!(out, "{key:<width$}  {}", creator.display_name);
    }
    out
}
