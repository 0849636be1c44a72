use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use super::*;
use crate::fixtures::{raw_batch, ScriptedSource};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use tokio::net::TcpListener;

#[derive(Clone, Copy)]
enum UpstreamMode {
    Ok,
    ServerError,
    MissingResults,
}

#[derive(Clone)]
struct UpstreamState {
    mode: UpstreamMode,
    queries: Arc<Mutex<Vec<HashMap<String, String>>>>,
}

fn user_json(index: usize) -> Value {
    json!({
        "gender": "male",
        "name": { "title": "Mr", "first": format!("First{index}"), "last": format!("Last{index}") },
        "location": { "city": "Bergen", "country": "Norway", "postcode": 5003 },
        "email": format!("user{index}@example.com"),
        "login": { "uuid": format!("00000000-0000-0000-0000-{index:012}"), "username": "x" },
        "picture": {
            "large": format!("https://randomuser.me/api/portraits/men/{index}.jpg"),
            "medium": format!("https://randomuser.me/api/portraits/med/men/{index}.jpg"),
            "thumbnail": format!("https://randomuser.me/api/portraits/thumb/men/{index}.jpg")
        },
        "nat": "NO"
    })
}

async fn handle_random_users(
    State(state): State<UpstreamState>,
    Query(query): Query<HashMap<String, String>>,
) -> impl IntoResponse {
    let count = query
        .get("results")
        .and_then(|value| value.parse::<usize>().ok())
        .unwrap_or(1);
    state.queries.lock().expect("queries lock").push(query);

    match state.mode {
        UpstreamMode::Ok => (
            StatusCode::OK,
            Json(json!({
                "results": (0..count).map(user_json).collect::<Vec<_>>(),
                "info": { "seed": "abc", "results": count, "page": 1, "version": "1.4" }
            })),
        ),
        UpstreamMode::ServerError => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": "Uh oh, something has gone wrong." })),
        ),
        UpstreamMode::MissingResults => (
            StatusCode::OK,
            Json(json!({ "info": { "seed": "abc" } })),
        ),
    }
}

async fn handle_picture() -> impl IntoResponse {
    (StatusCode::OK, vec![0x89_u8, b'P', b'N', b'G'])
}

async fn spawn_upstream(
    mode: UpstreamMode,
) -> anyhow::Result<(String, Arc<Mutex<Vec<HashMap<String, String>>>>)> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let queries = Arc::new(Mutex::new(Vec::new()));
    let state = UpstreamState {
        mode,
        queries: queries.clone(),
    };
    let app = Router::new()
        .route("/api/", get(handle_random_users))
        .route("/portraits/1.jpg", get(handle_picture))
        .with_state(state);
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Ok((format!("http://{addr}"), queries))
}

fn batch(value: i64) -> BatchSize {
    BatchSize::new(value).expect("valid batch size")
}

#[tokio::test]
async fn fetch_profiles_sends_results_param_and_decodes_batch() {
    let (base, queries) = spawn_upstream(UpstreamMode::Ok).await.expect("spawn");
    let client = RandomUserClient::new(&format!("{base}/api/")).expect("client");

    let raw = client.fetch_profiles(batch(3)).await.expect("fetch");

    assert_eq!(raw.len(), 3);
    assert_eq!(raw[2].email, "user2@example.com");
    let queries = queries.lock().expect("queries lock");
    assert_eq!(queries.len(), 1);
    assert_eq!(queries[0].get("results").map(String::as_str), Some("3"));
}

#[tokio::test]
async fn non_success_status_is_reported_with_upstream_message() {
    let (base, _) = spawn_upstream(UpstreamMode::ServerError)
        .await
        .expect("spawn");
    let client = RandomUserClient::new(&format!("{base}/api/")).expect("client");

    let err = client.fetch_profiles(batch(5)).await.expect_err("500");
    assert_eq!(
        err,
        FetchError::Status {
            status: 500,
            message: Some("Uh oh, something has gone wrong.".to_string()),
        }
    );
    assert_eq!(
        err.to_string(),
        "upstream returned HTTP 500: Uh oh, something has gone wrong."
    );
}

#[tokio::test]
async fn payload_without_results_is_a_decode_error() {
    let (base, _) = spawn_upstream(UpstreamMode::MissingResults)
        .await
        .expect("spawn");
    let client = RandomUserClient::new(&format!("{base}/api/")).expect("client");

    let err = client.fetch_profiles(batch(5)).await.expect_err("decode");
    assert!(matches!(err, FetchError::Decode(ref message) if message.contains("results")));
}

#[tokio::test]
async fn unreachable_upstream_is_a_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let client = RandomUserClient::new(&format!("http://{addr}/api/")).expect("client");
    let err = client.fetch_profiles(batch(1)).await.expect_err("refused");
    assert!(matches!(err, FetchError::Transport(_)), "got {err:?}");
}

#[tokio::test]
async fn fetch_picture_returns_body_bytes() {
    let (base, _) = spawn_upstream(UpstreamMode::Ok).await.expect("spawn");
    let client = RandomUserClient::new(&format!("{base}/api/")).expect("client");

    let bytes = client
        .fetch_picture(&format!("{base}/portraits/1.jpg"))
        .await
        .expect("picture");
    assert_eq!(bytes, vec![0x89, b'P', b'N', b'G']);

    let err = client
        .fetch_picture(&format!("{base}/portraits/missing.jpg"))
        .await
        .expect_err("404");
    assert!(matches!(err, FetchError::Status { status: 404, .. }));
}

#[test]
fn request_url_keeps_other_query_pairs_and_replaces_results() {
    let client =
        RandomUserClient::new("https://randomuser.me/api/?nat=no&results=9").expect("client");
    let url = client.request_url(batch(4));

    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();
    assert_eq!(
        pairs,
        vec![
            ("nat".to_string(), "no".to_string()),
            ("results".to_string(), "4".to_string()),
        ]
    );
}

#[test]
fn invalid_endpoint_is_rejected_at_construction() {
    assert!(RandomUserClient::new("not a url").is_err());
}

#[tokio::test]
async fn session_runs_initial_load_against_http_upstream() {
    let (base, queries) = spawn_upstream(UpstreamMode::Ok).await.expect("spawn");
    let settings = ClientSettings {
        endpoint: format!("{base}/api/"),
        ..ClientSettings::default()
    };
    let client = RandomUserClient::from_settings(&settings).expect("client");
    let mut session = FeedSession::new(client, settings.batch_size());

    assert!(session.initialize().await);
    assert_eq!(session.state().profiles().len(), 5);
    assert!(!session.state().is_fetching());
    assert!(matches!(session.view(), FeedView::Feed(_)));
    assert_eq!(queries.lock().expect("queries lock").len(), 1);
}

#[tokio::test]
async fn session_appends_resets_and_skips_invalid_sizes() {
    let source = ScriptedSource::with_outcomes([
        Ok(raw_batch(0, 5)),
        Ok(raw_batch(10, 2)),
        Err(FetchError::Transport("connection reset".to_string())),
        Ok(raw_batch(20, 1)),
    ]);
    let mut session = FeedSession::new(source, BatchSize::default());

    assert!(session.initialize().await);
    session.set_requested_batch_size(2);
    assert!(session.load_more().await);
    assert_eq!(session.state().profiles().len(), 7);

    assert!(session.load_more().await);
    assert_eq!(session.state().profiles().len(), 7);
    assert_eq!(
        session.state().last_error(),
        Some("network error: connection reset")
    );

    session.set_requested_batch_size(101);
    assert!(!session.load_more().await);
    assert!(!session.reset().await);

    session.set_requested_batch_size(1);
    assert!(session.reset().await);
    assert_eq!(session.state().profiles().len(), 1);
    assert!(session.state().last_error().is_none());

    assert_eq!(session.source().calls(), vec![5, 2, 2, 1]);
}
