//! Local stand-in for the Telegram Bot API used by handler tests.

use axum::{extract::State, http::StatusCode, Json, Router};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use teloxide::Bot;

/// Request bodies received, in order.
pub type Seen = Arc<Mutex<Vec<Value>>>;

async fn bot_api(
    State((seen, refuse_formatted)): State<(Seen, bool)>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let formatted = body.get("parse_mode").is_some();
    seen.lock().unwrap().push(body);
    if formatted && refuse_formatted {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "ok": false,
                "error_code": 400,
                "description": "Bad Request: can't parse entities: Can't find end of the entity"
            })),
        );
    }
    (
        StatusCode::OK,
        Json(json!({
            "ok": true,
            "result": {
                "message_id": 2,
                "date": 1700000000,
                "chat": {"id": 42, "first_name": "Test", "type": "private"},
                "text": "ok"
            }
        })),
    )
}

/// Starts the stand-in on a free port. With `refuse_formatted`, every message
/// carrying a parse mode is answered with an entity-parse error.
pub async fn spawn(refuse_formatted: bool) -> (Bot, Seen) {
    let seen: Seen = Arc::default();
    let app = Router::new()
        .fallback(bot_api)
        .with_state((seen.clone(), refuse_formatted));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    let url = reqwest::Url::parse(&format!("http://{addr}")).unwrap();
    let client = reqwest::Client::builder().no_proxy().build().unwrap();
    (Bot::with_client("123:test", client).set_api_url(url), seen)
}
