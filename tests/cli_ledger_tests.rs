use std::{
    sync::{mpsc, Arc, Mutex},
    thread,
};

use assert_cmd::Command;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use predicates::{prelude::PredicateBooleanExt, str::contains};
use serde_json::{json, Value};
use tempfile::TempDir;

#[derive(Default)]
struct Ledger {
    goals: Mutex<Vec<Value>>,
    savings: Mutex<Vec<Value>>,
}

type Shared = Arc<Ledger>;

async fn list_goals(State(state): State<Shared>) -> Json<Value> {
    Json(Value::Array(state.goals.lock().unwrap().clone()))
}

async fn create_goal(State(state): State<Shared>, Json(body): Json<Value>) -> Json<Value> {
    let mut goals = state.goals.lock().unwrap();
    let goal = json!({
        "id": goals.len() + 1,
        "name": body["name"],
        "target_amount": body["target_amount"],
        "current_amount": 0
    });
    goals.push(goal.clone());
    Json(goal)
}

async fn add_saving(
    State(state): State<Shared>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    state.savings.lock().unwrap().push(body.clone());
    let amount = body["amount"].as_f64().unwrap_or_default();
    let mut goals = state.goals.lock().unwrap();
    match goals.iter_mut().find(|goal| goal["id"].to_string() == id) {
        Some(goal) => {
            let current = goal["current_amount"].as_f64().unwrap_or_default();
            goal["current_amount"] = json!(current + amount);
            Json(goal.clone()).into_response()
        }
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({"message": "Goal not found"})),
        )
            .into_response(),
    }
}

async fn list_badges() -> Json<Value> {
    Json(json!([
        {"id": 1, "name": "First Save", "description": "Save once", "unlocked": true,
         "unlocked_date": "2024-05-01T10:00:00Z"},
        {"id": 2, "name": "Halfway", "unlocked": false}
    ]))
}

/// Fake ledger backed by in-memory goals.
fn spawn_ledger(goals: Vec<Value>) -> (String, Shared) {
    let state = Shared::default();
    *state.goals.lock().unwrap() = goals;
    let app = Router::new()
        .route("/api/goals", get(list_goals).post(create_goal))
        .route("/api/goals/:id/savings", post(add_saving))
        .route("/api/badges", get(list_badges))
        .with_state(state.clone());
    (serve(app), state)
}

/// Serves `app` on its own runtime thread for the lifetime of the test and
/// returns the API base URL.
fn serve(app: Router) -> String {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let runtime = tokio::runtime::Runtime::new().expect("server runtime");
        runtime.block_on(async move {
            let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
                .await
                .expect("bind test ledger");
            tx.send(listener.local_addr().expect("addr")).expect("send addr");
            axum::serve(listener, app).await.expect("serve");
        });
    });
    let addr = rx.recv().expect("ledger address");
    format!("http://{addr}/api")
}

fn laptop() -> Value {
    json!({"id": 1, "name": "Laptop", "target_amount": 1000.0, "current_amount": 750.0})
}

fn script_command(home: &TempDir, api_url: &str) -> Command {
    let mut cmd = Command::cargo_bin("money_saver_cli").expect("binary exists");
    cmd.env("MONEY_SAVER_CLI_SCRIPT", "1")
        .env("MONEY_SAVER_HOME", home.path())
        .env("MONEY_SAVER_API_URL", api_url)
        .env_remove("MONEY_SAVER_TOKEN");
    cmd
}

#[test]
fn goals_lists_cards_and_totals() {
    let home = TempDir::new().unwrap();
    let (api, _) = spawn_ledger(vec![
        laptop(),
        json!({"id": 2, "name": "Trip", "target_amount": 600, "current_amount": 200}),
    ]);
    script_command(&home, &api)
        .write_stdin("goals\nexit\n")
        .assert()
        .success()
        .stdout(
            contains("Total saved: $950.00 of $1,600.00")
                .and(contains("#1 Laptop"))
                .and(contains("#2 Trip")),
        );
}

#[test]
fn tapping_a_cell_funds_the_goal_and_updates_totals() {
    let home = TempDir::new().unwrap();
    let (api, state) = spawn_ledger(vec![laptop()]);
    script_command(&home, &api)
        .write_stdin("goal grid 1\ngoal tap 1 1\ngoals\nexit\n")
        .assert()
        .success()
        .stdout(
            contains("[ ]  5. $50.00")
                .and(contains("now $800.00 of $1,000.00"))
                .and(contains("Total saved: $800.00 of $1,000.00 (80.00%)")),
        );
    assert_eq!(
        state.savings.lock().unwrap().as_slice(),
        &[json!({"amount": 50.0})]
    );
}

#[test]
fn invalid_manual_amount_never_reaches_the_ledger() {
    let home = TempDir::new().unwrap();
    let (api, state) = spawn_ledger(vec![laptop()]);
    script_command(&home, &api)
        .write_stdin("goal save 1 abc\ngoal save 1 -3\nexit\n")
        .assert()
        .success()
        .stdout(contains("Please enter a valid positive amount."));
    assert!(state.savings.lock().unwrap().is_empty());
}

#[test]
fn manual_saving_that_reaches_target_reports_achievement() {
    let home = TempDir::new().unwrap();
    let (api, _) = spawn_ledger(vec![laptop()]);
    script_command(&home, &api)
        .write_stdin("goal save 1 250\ngoal tap 1 1\nexit\n")
        .assert()
        .success()
        .stdout(contains("now $1,000.00 of $1,000.00").and(contains("Goal Achieved!")));
}

#[test]
fn created_goal_is_listed_first() {
    let home = TempDir::new().unwrap();
    let (api, _) = spawn_ledger(vec![laptop()]);
    script_command(&home, &api)
        .write_stdin("goals\ngoal new Summer Trip 1200\ngoal show 1\nexit\n")
        .assert()
        .success()
        .stdout(
            contains("Created goal `Summer Trip` with a target of $1,200.00.")
                .and(contains("#1 Summer Trip")),
        );
}

#[test]
fn goal_can_be_created_while_the_goal_list_is_unavailable() {
    let home = TempDir::new().unwrap();
    let state = Shared::default();
    let app = Router::new()
        .route(
            "/api/goals",
            get(|| async {
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({"message": "listing is down"})),
                )
            })
            .post(create_goal),
        )
        .with_state(state.clone());
    let api = serve(app);

    script_command(&home, &api)
        .write_stdin("goal new Rainy Day 300\nexit\n")
        .assert()
        .success()
        .stdout(contains("Created goal `Rainy Day` with a target of $300.00."));
    assert_eq!(state.goals.lock().unwrap().len(), 1);
}

#[test]
fn badges_show_unlock_summary() {
    let home = TempDir::new().unwrap();
    let (api, _) = spawn_ledger(Vec::new());
    script_command(&home, &api)
        .write_stdin("badges\nexit\n")
        .assert()
        .success()
        .stdout(
            contains("First Save (unlocked 2024-05-01)")
                .and(contains("Halfway (locked)"))
                .and(contains("1 of 2 unlocked.")),
        );
}
