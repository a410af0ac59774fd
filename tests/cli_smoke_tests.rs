use std::net::TcpListener;

use assert_cmd::Command;
use predicates::{prelude::PredicateBooleanExt, str::contains};
use tempfile::TempDir;

const BIN_NAME: &str = "money_saver_cli";

fn script_command(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin(BIN_NAME).expect("binary exists");
    cmd.env("MONEY_SAVER_CLI_SCRIPT", "1")
        .env("MONEY_SAVER_HOME", home.path())
        .env_remove("MONEY_SAVER_API_URL")
        .env_remove("MONEY_SAVER_TOKEN");
    cmd
}

fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);
    format!("http://{addr}/api")
}

#[test]
fn help_lists_goal_commands() {
    let home = TempDir::new().unwrap();
    script_command(&home)
        .write_stdin("help\nexit\n")
        .assert()
        .success()
        .stdout(contains("goals").and(contains("badges")).and(contains("config")));
}

#[test]
fn version_prints_build_metadata() {
    let home = TempDir::new().unwrap();
    script_command(&home)
        .write_stdin("version\nexit\n")
        .assert()
        .success()
        .stdout(contains("Money Saver").and(contains("Build hash")));
}

#[test]
fn unknown_command_suggests_closest_match() {
    let home = TempDir::new().unwrap();
    script_command(&home)
        .write_stdin("gaols\nexit\n")
        .assert()
        .success()
        .stdout(contains("Unknown command `gaols`").and(contains("`goals`")));
}

#[test]
fn config_show_lists_defaults_and_set_persists() {
    let home = TempDir::new().unwrap();
    script_command(&home)
        .write_stdin("config show\nconfig set currency eur\nexit\n")
        .assert()
        .success()
        .stdout(
            contains("http://localhost:5000/api")
                .and(contains("request_timeout_secs"))
                .and(contains("currency set to EUR")),
        );

    let stored = std::fs::read_to_string(home.path().join("config").join("config.json"))
        .expect("config written");
    assert!(stored.contains("\"EUR\""));
}

#[test]
fn unreachable_ledger_reports_collection_error() {
    let home = TempDir::new().unwrap();
    script_command(&home)
        .env("MONEY_SAVER_API_URL", closed_port_url())
        .write_stdin("goals\nbadges\nexit\n")
        .assert()
        .success()
        .stdout(contains("Failed to load goals.").and(contains("Failed to load badges.")));
}

#[test]
fn goal_creation_requires_every_field() {
    let home = TempDir::new().unwrap();
    script_command(&home)
        .env("MONEY_SAVER_API_URL", closed_port_url())
        .write_stdin("goal new \"\" 100\ngoal new Trip -5\nexit\n")
        .assert()
        .success()
        .stdout(
            contains("Please fill in all fields.")
                .and(contains("Target amount must be a positive number.")),
        );
}
