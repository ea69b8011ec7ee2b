#![allow(dead_code)]

use axum::{http::header, http::StatusCode, routing::post, Json, Router};
use serde_json::Value;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::Mutex;

/// Stand-in for the Slack webhook, served on an ephemeral local port.
pub struct StubWebhook {
    pub base_url: String,
    pub received: Arc<Mutex<Vec<Value>>>,
    pub redirect_hits: Arc<AtomicUsize>,
}

impl StubWebhook {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn received(&self) -> Vec<Value> {
        self.received.lock().await.clone()
    }

    pub fn redirect_hits(&self) -> usize {
        self.redirect_hits.load(Ordering::SeqCst)
    }
}

pub async fn spawn_stub_webhook() -> StubWebhook {
    let received = Arc::new(Mutex::new(Vec::new()));
    let redirect_hits = Arc::new(AtomicUsize::new(0));

    let app = Router::new()
        .route(
            "/ok",
            post({
                let received = received.clone();
                move |Json(body): Json<Value>| async move {
                    received.lock().await.push(body);
                    (StatusCode::OK, "ok")
                }
            }),
        )
        .route("/no-content", post(|| async { StatusCode::NO_CONTENT }))
        .route(
            "/missing",
            post(|| async { (StatusCode::NOT_FOUND, "no_service") }),
        )
        .route(
            "/broken",
            post(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
        )
        .route(
            "/moved",
            post(|| async { (StatusCode::FOUND, [(header::LOCATION, "/target")]) }),
        )
        .route(
            "/target",
            post({
                let redirect_hits = redirect_hits.clone();
                move || async move {
                    redirect_hits.fetch_add(1, Ordering::SeqCst);
                    StatusCode::OK
                }
            }),
        );

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    StubWebhook {
        base_url: format!("http://{}", addr),
        received,
        redirect_hits,
    }
}

/// URL of a local port nothing listens on.
pub async fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}/hook", addr)
}
