//! In-process stand-in for the flight backend.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::Router;
use axum::extract::State;
use axum::http::{StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use serde_json::Value;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

use crate::{BaseUrl, FlightApi};

#[derive(Debug, Clone)]
struct Reply {
    status: StatusCode,
    body: String,
}

#[derive(Clone)]
struct Shared {
    routes: Arc<HashMap<String, Reply>>,
    hits: Arc<Mutex<Vec<String>>>,
}

/// Builder for a [`StubUpstream`]. Unrouted paths answer 404.
#[derive(Default)]
pub struct StubBuilder {
    routes: HashMap<String, Reply>,
}

impl StubBuilder {
    /// Answer `path` with 200 and a JSON body.
    pub fn json(self, path: &str, body: Value) -> Self {
        self.route(path, StatusCode::OK, body.to_string())
    }

    /// Answer `path` with an empty body and the given status.
    pub fn status(self, path: &str, status: u16) -> Self {
        let status = StatusCode::from_u16(status).unwrap();
        self.route(path, status, String::new())
    }

    /// Answer `path` with 200 and a verbatim body.
    pub fn raw(self, path: &str, body: &str) -> Self {
        self.route(path, StatusCode::OK, body.to_string())
    }

    fn route(mut self, path: &str, status: StatusCode, body: String) -> Self {
        self.routes.insert(path.to_string(), Reply { status, body });
        self
    }

    pub async fn start(self) -> StubUpstream {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let shared = Shared {
            routes: Arc::new(self.routes),
            hits: Arc::new(Mutex::new(Vec::new())),
        };
        let hits = Arc::clone(&shared.hits);
        let app = Router::new().fallback(handle).with_state(shared);

        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    let _ = shutdown_rx.await;
                })
                .await
                .unwrap();
        });

        StubUpstream {
            base: BaseUrl::parse(&format!("http://{addr}")).unwrap(),
            hits,
            shutdown_tx: Some(shutdown_tx),
        }
    }
}

async fn handle(State(shared): State<Shared>, uri: Uri) -> Response {
    let path = uri.path().to_string();
    shared.hits.lock().unwrap().push(path.clone());

    match shared.routes.get(&path) {
        Some(reply) => (
            reply.status,
            [(header::CONTENT_TYPE, "application/json")],
            reply.body.clone(),
        )
            .into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

/// A running stub that records the path of every request it receives.
pub struct StubUpstream {
    base: BaseUrl,
    hits: Arc<Mutex<Vec<String>>>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl StubUpstream {
    pub fn builder() -> StubBuilder {
        StubBuilder::default()
    }

    pub fn base(&self) -> &BaseUrl {
        &self.base
    }

    /// Client for this stub, bypassing any proxy set in the environment.
    pub fn api(&self) -> FlightApi {
        FlightApi::with_client(self.base.clone(), client())
    }

    /// Request paths seen so far, in arrival order.
    pub fn hits(&self) -> Vec<String> {
        self.hits.lock().unwrap().clone()
    }
}

impl Drop for StubUpstream {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

pub fn client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}

/// A base URL whose port has nothing listening on it.
pub async fn unreachable_base() -> BaseUrl {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    BaseUrl::parse(&format!("http://{addr}")).unwrap()
}
