//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    response::Response,
    Router,
};
use tokio::net::TcpListener;
use webhooks_dashboard::config::{AccessToken, DashboardConfig};
use webhooks_dashboard::{HttpServer, Shutdown};

pub const STORE: &str = "demo.myshopify.com";
pub const TOKEN: &str = "shpat_test_token";

/// One request as seen by the stub upstream.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub access_token: Option<String>,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

/// What the stub answers with.
#[derive(Debug, Clone)]
pub struct StubResponse {
    pub status: u16,
    pub headers: Vec<(&'static str, String)>,
    pub body: Vec<u8>,
}

impl StubResponse {
    pub fn new(status: u16) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: Vec::new(),
        }
    }

    pub fn json(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self::new(status)
            .header("content-type", "application/json; charset=utf-8")
            .body(body)
    }

    pub fn header(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.headers.push((name, value.into()));
        self
    }

    pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }
}

type Responder = dyn Fn(&RecordedCall) -> StubResponse + Send + Sync;

#[derive(Clone)]
struct StubState {
    calls: Arc<Mutex<Vec<RecordedCall>>>,
    responder: Arc<Responder>,
}

/// A programmable upstream that records every call it receives.
pub struct StubUpstream {
    pub addr: SocketAddr,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl StubUpstream {
    pub async fn start<F>(responder: F) -> Self
    where
        F: Fn(&RecordedCall) -> StubResponse + Send + Sync + 'static,
    {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let state = StubState {
            calls: calls.clone(),
            responder: Arc::new(responder),
        };
        let app = Router::new().fallback(stub_handler).with_state(state);

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { addr, calls }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

async fn stub_handler(State(state): State<StubState>, request: Request<Body>) -> Response {
    let (parts, body) = request.into_parts();
    let header = |name: &str| {
        parts
            .headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };
    let body = axum::body::to_bytes(body, usize::MAX).await.unwrap();

    let call = RecordedCall {
        method: parts.method.to_string(),
        path: parts.uri.path().to_string(),
        query: parts.uri.query().map(str::to_string),
        access_token: header("x-shopify-access-token"),
        content_type: header("content-type"),
        body: body.to_vec(),
    };
    let stub = (state.responder)(&call);
    state.calls.lock().unwrap().push(call);

    let mut builder = Response::builder().status(StatusCode::from_u16(stub.status).unwrap());
    for (name, value) in stub.headers {
        builder = builder.header(name, value);
    }
    builder.body(Body::from(stub.body)).unwrap()
}

/// Config pointing the dashboard at `base_url`.
pub fn dashboard_config(base_url: &str) -> DashboardConfig {
    let mut config = DashboardConfig::default();
    config.listener.bind_address = "127.0.0.1:0".into();
    config.upstream.store = STORE.into();
    config.upstream.access_token = AccessToken::new(TOKEN);
    config.upstream.base_url = Some(base_url.to_string());
    config.upstream.use_system_proxy = false;
    config
}

/// A running dashboard bound to an ephemeral loopback port.
pub struct Dashboard {
    pub addr: SocketAddr,
    pub client: reqwest::Client,
    shutdown: Shutdown,
}

impl Dashboard {
    pub async fn start(base_url: &str) -> Self {
        let server = HttpServer::new(dashboard_config(base_url)).unwrap();
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let shutdown = Shutdown::new();
        let receiver = shutdown.subscribe();
        tokio::spawn(async move {
            let _ = server.run(listener, receiver).await;
        });

        let client = reqwest::Client::builder().no_proxy().build().unwrap();
        Self {
            addr,
            client,
            shutdown,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

impl Drop for Dashboard {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}
