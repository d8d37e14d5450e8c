//! Handler for the `run` command.

use tokio::signal;
use tracing::info;

use crate::adapter::inbound::cli::command::RunArgs;
use crate::adapter::inbound::cli::output;
use crate::adapter::render::signed_pct;
use crate::application::{MonitorState, MonitorStatus};
use crate::error::Result;
use crate::infrastructure::bootstrap::build_monitor;
use crate::infrastructure::config::Config;

/// Start the monitor and block until Ctrl-C, then cancel it cleanly.
///
/// Without a notification channel the monitor stays `NotStarted`; the
/// status is printed and the command returns.
pub async fn execute(args: &RunArgs, config: Config) -> Result<()> {
    let handle = build_monitor(&config, args.dry_run);
    let state = handle.start();

    print_startup(&handle.status(), args.dry_run);

    if state != MonitorState::Running {
        output::warning("Monitor not started: Telegram credentials are not configured");
        output::hint("set TELEGRAM_BOT_TOKEN and TELEGRAM_CHAT_ID, or pass --dry-run");
        return Ok(());
    }

    signal::ctrl_c().await?;
    info!("Shutdown signal received");

    handle.cancel();
    handle.join().await;

    let status = handle.status();
    if output::is_json() {
        output::json_output("status", serde_json::to_value(&status)?);
    } else {
        output::section("Stopped");
        output::field("Ticks", status.ticks_completed);
        for (key, at) in &status.last_alerts {
            output::field(key, at.format("%Y-%m-%d %H:%M:%S UTC"));
        }
    }
    Ok(())
}

fn print_startup(status: &MonitorStatus, dry_run: bool) {
    if output::is_json() {
        if let Ok(payload) = serde_json::to_value(status) {
            output::json_output("status", payload);
        }
        return;
    }

    let coins: Vec<&str> = status.symbols.iter().map(|s| s.as_str()).collect();
    output::header(env!("CARGO_PKG_VERSION"));
    output::field("Monitor", status.state);
    output::field("Coins", coins.join(", "));
    output::field(
        "Thresholds",
        format!(
            "{} / {}",
            signed_pct(status.thresholds.high_pct),
            signed_pct(status.thresholds.low_pct)
        ),
    );
    output::field(
        "Cooldown",
        format!("{} min", status.thresholds.cooldown.num_minutes()),
    );

    if dry_run {
        output::warning("Dry-run mode enabled - alerts are logged, not sent");
    }
}
