use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use axum::{
    extract::{Path, State},
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use rust_decimal_macros::dec;
use saver_core::{LedgerError, RemoteLedger};
use saver_domain::{GoalId, NewGoal};
use saver_http::{HttpLedger, HttpLedgerConfig};
use serde_json::{json, Value};

#[derive(Default)]
struct ServerState {
    auth: Mutex<Vec<Option<String>>>,
    bodies: Mutex<Vec<Value>>,
}

impl ServerState {
    fn record_auth(&self, headers: &HeaderMap) {
        let value = headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        self.auth.lock().unwrap().push(value);
    }
}

type Shared = Arc<ServerState>;

async fn list_goals(State(state): State<Shared>, headers: HeaderMap) -> Json<Value> {
    state.record_auth(&headers);
    Json(json!([
        {"id": 1, "name": "Laptop", "target_amount": 1000.0, "current_amount": 750.0},
        {"id": "trip-7", "name": "Trip", "target_amount": "500", "current_amount": 0}
    ]))
}

async fn create_goal(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    state.record_auth(&headers);
    state.bodies.lock().unwrap().push(body.clone());
    (
        StatusCode::CREATED,
        Json(json!({
            "id": 2,
            "name": body["name"],
            "target_amount": body["target_amount"],
            "current_amount": 0
        })),
    )
}

async fn add_saving(
    State(state): State<Shared>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    state.record_auth(&headers);
    state.bodies.lock().unwrap().push(body.clone());
    let amount = body["amount"].as_f64().unwrap_or_default();
    match id.as_str() {
        "1" => Json(json!({
            "id": 1,
            "name": "Laptop",
            "target_amount": 1000.0,
            "current_amount": 750.0 + amount
        }))
        .into_response(),
        "slow" => {
            tokio::time::sleep(Duration::from_secs(5)).await;
            StatusCode::OK.into_response()
        }
        "garbled" => (StatusCode::OK, "definitely not json").into_response(),
        "bare" => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
        _ => (
            StatusCode::NOT_FOUND,
            Json(json!({"message": "Goal not found"})),
        )
            .into_response(),
    }
}

async fn list_badges() -> Json<Value> {
    Json(json!([
        {"id": "b1", "name": "First Save", "description": "Save once", "unlocked": true,
         "unlocked_date": "2024-05-01T10:00:00Z"},
        {"id": 2, "name": "Halfway", "unlocked": false}
    ]))
}

async fn spawn_server() -> (String, Shared) {
    let state = Shared::default();
    let app = Router::new()
        .route("/api/goals", get(list_goals).post(create_goal))
        .route("/api/goals/:id/savings", post(add_saving))
        .route("/api/badges", get(list_badges))
        .with_state(state.clone());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test server");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve");
    });
    (format!("http://{addr}/api"), state)
}

fn ledger(base_url: &str, token: Option<&str>) -> HttpLedger {
    HttpLedger::new(
        HttpLedgerConfig::new(base_url)
            .with_token(token.map(str::to_string))
            .with_timeout(Duration::from_millis(500)),
    )
    .expect("http ledger")
}

#[tokio::test]
async fn lists_goals_with_mixed_id_and_amount_encodings() {
    let (base, state) = spawn_server().await;
    let goals = ledger(&base, Some("t0k3n")).list_goals().await.expect("goals");

    assert_eq!(goals.len(), 2);
    assert_eq!(goals[0].id, GoalId::new("1"));
    assert_eq!(goals[0].remaining(), dec!(250));
    assert_eq!(goals[1].id, GoalId::new("trip-7"));
    assert_eq!(goals[1].target_amount, dec!(500));
    assert_eq!(
        state.auth.lock().unwrap().as_slice(),
        &[Some("Bearer t0k3n".to_string())]
    );
}

#[tokio::test]
async fn requests_without_token_carry_no_authorization() {
    let (base, state) = spawn_server().await;
    ledger(&base, None).list_goals().await.expect("goals");
    assert_eq!(state.auth.lock().unwrap().as_slice(), &[None]);
}

#[tokio::test]
async fn add_saving_posts_numeric_amount_and_returns_server_goal() {
    let (base, state) = spawn_server().await;
    let goal = ledger(&base, None)
        .add_saving(&GoalId::new("1"), dec!(50))
        .await
        .expect("saving");

    assert_eq!(goal.current_amount, dec!(800));
    assert_eq!(state.bodies.lock().unwrap().as_slice(), &[json!({"amount": 50.0})]);
}

#[tokio::test]
async fn create_goal_returns_created_goal() {
    let (base, state) = spawn_server().await;
    let draft = NewGoal {
        name: "Car".into(),
        target_amount: dec!(8000),
    };
    let goal = ledger(&base, None).create_goal(&draft).await.expect("created");

    assert_eq!(goal.id, GoalId::new("2"));
    assert_eq!(goal.name, "Car");
    assert_eq!(goal.target_amount, dec!(8000));
    assert_eq!(
        state.bodies.lock().unwrap().as_slice(),
        &[json!({"name": "Car", "target_amount": 8000.0})]
    );
}

#[tokio::test]
async fn error_bodies_become_rejections() {
    let (base, _) = spawn_server().await;
    let client = ledger(&base, None);

    let err = client
        .add_saving(&GoalId::new("404"), dec!(5))
        .await
        .expect_err("missing goal");
    assert_eq!(
        err,
        LedgerError::Rejected {
            status: 404,
            message: "Goal not found".into()
        }
    );

    let err = client
        .add_saving(&GoalId::new("bare"), dec!(5))
        .await
        .expect_err("server error");
    assert_eq!(
        err,
        LedgerError::Rejected {
            status: 500,
            message: "Request failed with status 500".into()
        }
    );
}

#[tokio::test]
async fn unreadable_success_body_is_a_decode_error() {
    let (base, _) = spawn_server().await;
    let err = ledger(&base, None)
        .add_saving(&GoalId::new("garbled"), dec!(5))
        .await
        .expect_err("garbled body");
    assert!(matches!(err, LedgerError::Decode(_)));
}

#[tokio::test]
async fn slow_server_is_unreachable() {
    let (base, _) = spawn_server().await;
    let err = ledger(&base, None)
        .add_saving(&GoalId::new("slow"), dec!(5))
        .await
        .expect_err("timed out");
    assert_eq!(err, LedgerError::Unreachable("request timed out".into()));
}

#[tokio::test]
async fn closed_port_is_unreachable() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let err = ledger(&format!("http://{addr}/api"), None)
        .list_goals()
        .await
        .expect_err("nothing listening");
    assert!(matches!(err, LedgerError::Unreachable(_)));
}

#[tokio::test]
async fn badges_decode_with_optional_fields() {
    let (base, _) = spawn_server().await;
    let badges = ledger(&base, None).list_badges().await.expect("badges");

    assert_eq!(badges.len(), 2);
    assert!(badges[0].visible_unlock_date().is_some());
    assert_eq!(badges[1].id, "2");
    assert!(badges[1].description.is_empty());
    assert!(badges[1].visible_unlock_date().is_none());
}
