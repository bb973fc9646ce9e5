//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (tracing, request ID)
//! - Bind server to listener
//! - Dispatch webhook requests through translate, call and relay
//! - Serve dashboard assets for every other path

use std::sync::Arc;
use std::time::Instant;

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceExt;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::config::DashboardConfig;
use crate::http::assets::{asset_service, AssetError};
use crate::http::error::ProxyError;
use crate::http::request::{
    propagate_request_id_layer, read_body, set_request_id_layer, RequestIdExt,
};
use crate::http::response::relay;
use crate::routing::{self, Route, WEBHOOKS_PATH};
use crate::upstream::{ListParams, UpstreamClient, UpstreamError, WebhookCall};

/// Fatal errors while building or running the server.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    #[error(transparent)]
    Assets(#[from] AssetError),

    #[error("Server I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub upstream: Arc<UpstreamClient>,
    pub assets: Option<ServeDir<ServeFile>>,
    pub max_body_bytes: usize,
}

/// HTTP server for the dashboard.
pub struct HttpServer {
    router: Router,
    config: DashboardConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    ///
    /// Fails when the upstream client cannot be built or the configured
    /// asset directory is unusable.
    pub fn new(config: DashboardConfig) -> Result<Self, ServerError> {
        let upstream = Arc::new(UpstreamClient::new(&config.upstream)?);
        let assets = config.assets.dir.as_deref().map(asset_service).transpose()?;
        if assets.is_none() {
            tracing::warn!("No asset directory configured; only the API is served");
        }

        let state = AppState {
            upstream,
            assets,
            max_body_bytes: config.limits.max_body_bytes,
        };

        let router = Self::build_router(state);
        Ok(Self { router, config })
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(state: AppState) -> Router {
        Router::new()
            .route("/healthz", get(health_handler))
            .fallback(dispatch_handler)
            .with_state(state)
            .layer(propagate_request_id_layer())
            .layer(TraceLayer::new_for_http())
            .layer(set_request_id_layer())
    }

    /// The configured router, for embedding or in-process testing.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until the shutdown receiver fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), ServerError> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }
}

#[derive(Serialize)]
struct HealthStatus {
    status: &'static str,
    version: &'static str,
}

async fn health_handler() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

fn is_webhook_path(path: &str) -> bool {
    path.strip_prefix(WEBHOOKS_PATH)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
}

/// Sends webhook paths to the proxy and everything else to the assets.
async fn dispatch_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    if is_webhook_path(request.uri().path()) {
        return proxy_handler(&state, request).await;
    }

    match state.assets {
        Some(assets) => match assets.oneshot(request).await {
            Ok(response) => response.into_response(),
            Err(never) => match never {},
        },
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

/// Main proxy handler.
/// Resolves the route, forwards the call upstream and relays the result.
async fn proxy_handler(state: &AppState, request: Request<Body>) -> Response {
    let start_time = Instant::now();
    let request_id = request.request_id().to_string();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    tracing::debug!(
        request_id = %request_id,
        method = %method,
        path = %path,
        "Proxying request"
    );

    match forward(state, request).await {
        Ok((route, response)) => {
            tracing::info!(
                request_id = %request_id,
                operation = route.operation(),
                status = response.status().as_u16(),
                elapsed_ms = start_time.elapsed().as_millis() as u64,
                "Webhook request completed"
            );
            response
        }
        Err(err) => {
            match &err {
                ProxyError::Upstream { operation, source } => tracing::error!(
                    request_id = %request_id,
                    operation = *operation,
                    error = %source,
                    "Upstream error"
                ),
                _ => tracing::warn!(
                    request_id = %request_id,
                    method = %method,
                    path = %path,
                    error = %err,
                    "Rejected request"
                ),
            }
            err.into_response()
        }
    }
}

/// Dispatch → translate → call → relay. Any failure short-circuits.
async fn forward(state: &AppState, request: Request<Body>) -> Result<(Route, Response), ProxyError> {
    let route = routing::resolve(request.method(), request.uri().path())?;

    let call = match &route {
        Route::List => WebhookCall::List(ListParams::from_query(request.uri().query())),
        Route::Create => {
            WebhookCall::Create(read_body(request.into_body(), state.max_body_bytes).await?)
        }
        Route::Update(id) => WebhookCall::Update(
            id.clone(),
            read_body(request.into_body(), state.max_body_bytes).await?,
        ),
        Route::Delete(id) => WebhookCall::Delete(id.clone()),
    };

    let upstream = state
        .upstream
        .execute(call)
        .await
        .map_err(|e| ProxyError::upstream(&route, e))?;

    let response = relay(&route, upstream);
    Ok((route, response))
}
