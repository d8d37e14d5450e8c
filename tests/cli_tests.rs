use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const ENV_KEYS: &[&str] = &[
    "TELEGRAM_BOT_TOKEN",
    "TELEGRAM_CHAT_ID",
    "ALERT_HIGH",
    "ALERT_LOW",
    "ALERT_COINS",
    "ALERT_INTERVAL",
    "ALERT_COOLDOWN",
    "RUST_LOG",
];

/// `kimchi` run from an empty directory with a clean environment.
fn kimchi(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("kimchi").expect("kimchi binary");
    cmd.current_dir(dir.path());
    for key in ENV_KEYS {
        cmd.env_remove(key);
    }
    cmd
}

#[test]
fn help_lists_subcommands() {
    let dir = TempDir::new().unwrap();
    kimchi(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("premium")
                .and(predicate::str::contains("compare"))
                .and(predicate::str::contains("check"))
                .and(predicate::str::contains("movers"))
                .and(predicate::str::contains("orderbook"))
                .and(predicate::str::contains("run")),
        );
}

#[test]
fn check_with_defaults_reports_alerts_disabled() {
    let dir = TempDir::new().unwrap();
    kimchi(&dir)
        .arg("check")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("built-in defaults")
                .and(predicate::str::contains("BTC, ETH, XRP"))
                .and(predicate::str::contains("alerts disabled")),
        );
}

#[test]
fn check_json_emits_report() {
    let dir = TempDir::new().unwrap();
    let output = kimchi(&dir)
        .args(["check", "--json"])
        .env("ALERT_COINS", "sol")
        .output()
        .unwrap();
    assert!(output.status.success());

    let line = String::from_utf8_lossy(&output.stdout);
    let value: serde_json::Value = serde_json::from_str(line.trim()).unwrap();
    assert_eq!(value["type"], "check");
    assert_eq!(value["payload"]["symbols"][0], "SOL");
    assert_eq!(value["payload"]["alerts_enabled"], false);
}

#[test]
fn check_rejects_inverted_thresholds() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.toml");
    fs::write(&path, "[alerts]\nhigh_pct = -3\nlow_pct = 1\n").unwrap();

    kimchi(&dir)
        .arg("check")
        .arg("--config")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("high_pct"));
}

#[test]
fn check_rejects_missing_explicit_config() {
    let dir = TempDir::new().unwrap();
    kimchi(&dir)
        .args(["check", "--config", "nope.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read config file"));
}

#[test]
fn run_without_credentials_does_not_start() {
    let dir = TempDir::new().unwrap();
    kimchi(&dir)
        .arg("run")
        .assert()
        .success()
        .stdout(predicate::str::contains("Monitor not started"));
}

#[test]
fn premium_reports_unreachable_upstream() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(
        &path,
        concat!(
            "[upstream]\n",
            "upbit_url = \"http://127.0.0.1:9/v1\"\n",
            "coingecko_url = \"http://127.0.0.1:9/api/v3\"\n",
            "fx_url = \"http://127.0.0.1:9/latest\"\n",
            "timeout_secs = 2\n",
        ),
    )
    .unwrap();

    kimchi(&dir)
        .args(["premium", "btc"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unavailable"));
}

#[test]
fn price_reports_unreachable_upstream() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("config.toml"),
        concat!(
            "[upstream]\n",
            "upbit_url = \"http://127.0.0.1:9/v1\"\n",
            "timeout_secs = 2\n",
        ),
    )
    .unwrap();

    kimchi(&dir)
        .args(["price", "btc", "eth"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unavailable"));
}

#[test]
fn candles_reject_unknown_interval() {
    let dir = TempDir::new().unwrap();
    kimchi(&dir)
        .args(["candles", "btc", "--interval", "hours"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown interval"));
}

#[test]
fn orderbook_rejects_malformed_symbol() {
    let dir = TempDir::new().unwrap();
    kimchi(&dir)
        .args(["orderbook", "BTC/../X"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a valid coin symbol"));
}
