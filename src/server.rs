//! HTTP front of the analysis pipeline.
//!
//! `GET /health` and `POST /analyze`; errors answer `{ "detail": "..." }`.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::State;
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use crate::config::ServerConfig;
use crate::engine::AnalysisEngine;
use crate::net::analyze::{AnalyzeRequest, AnalyzeResponse};
use crate::net::fetch::{has_http_scheme, normalize_url};

#[derive(Debug, Serialize)]
struct ErrorBody {
    detail: String,
}

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    detail: String,
}

impl ApiError {
    pub fn new(status: StatusCode, detail: impl Into<String>) -> Self {
        Self {
            status,
            detail: detail.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ErrorBody { detail: self.detail })).into_response()
    }
}

#[derive(Serialize)]
struct Health {
    status: &'static str,
}

async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

async fn analyze(
    State(engine): State<Arc<AnalysisEngine>>,
    Json(req): Json<AnalyzeRequest>,
) -> Result<Json<AnalyzeResponse>, ApiError> {
    // Only absolute http(s) URLs are accepted here; the fetcher's scheme
    // guessing is a convenience for the desktop client.
    if !has_http_scheme(&req.url) {
        return Err(ApiError::new(
            StatusCode::UNPROCESSABLE_ENTITY,
            "url: must be an absolute http(s) URL",
        ));
    }
    let url = normalize_url(&req.url)
        .map_err(|e| ApiError::new(StatusCode::UNPROCESSABLE_ENTITY, format!("url: {}", e)))?;

    log::info!("analyze {}", url);
    let result = tokio::task::spawn_blocking(move || engine.analyze_url(url.as_str()))
        .await
        .map_err(|e| ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    match result {
        Ok(analysis) => Ok(Json(AnalyzeResponse {
            keywords: analysis.keywords,
        })),
        Err(e) => {
            log::warn!("[{}] {}", e.phase.as_str(), e.message);
            let status = StatusCode::from_u16(e.phase.http_status())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            Err(ApiError::new(status, e.message))
        }
    }
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| match HeaderValue::from_str(o) {
            Ok(v) => Some(v),
            Err(_) => {
                log::warn!("ignoring invalid CORS origin {:?}", o);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Build the service router around a shared engine.
pub fn router(config: &ServerConfig) -> Router {
    let engine = Arc::new(AnalysisEngine::new(config.analysis.clone()));
    Router::new()
        .route("/health", get(health))
        .route("/analyze", post(analyze))
        .with_state(engine)
        .layer(cors_layer(&config.allowed_origins))
}

/// A running analysis server.
pub struct AnalysisServer {
    addr: SocketAddr,
    shutdown: Option<oneshot::Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl AnalysisServer {
    /// Bind `config.bind` and start serving in the background.
    pub async fn start(config: ServerConfig) -> std::io::Result<Self> {
        let app = router(&config);
        let listener = TcpListener::bind(config.bind).await?;
        let addr = listener.local_addr()?;
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

        let handle = tokio::spawn(async move {
            let served = axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    let _ = shutdown_rx.await;
                })
                .await;
            if let Err(e) = served {
                log::error!("server error: {}", e);
            }
        });

        log::info!("analysis service listening on http://{}", addr);
        Ok(Self {
            addr,
            shutdown: Some(shutdown_tx),
            handle: Some(handle),
        })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Signal graceful shutdown and wait for in-flight requests.
    pub async fn stop(mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            let _ = handle.await;
        }
    }
}

impl Drop for AnalysisServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::{json, Value};

    fn test_config() -> ServerConfig {
        ServerConfig {
            bind: SocketAddr::from(([127, 0, 0, 1], 0)),
            ..ServerConfig::default()
        }
    }

    #[tokio::test]
    async fn binds_random_port_and_reports_health() {
        let server = AnalysisServer::start(test_config()).await.expect("start");
        assert_ne!(server.addr().port(), 0);

        let body: Value = reqwest::get(format!("http://{}/health", server.addr()))
            .await
            .expect("request")
            .json()
            .await
            .expect("json");
        assert_eq!(body, json!({ "status": "ok" }));
        server.stop().await;
    }

    async fn preflight(server: &AnalysisServer, origin: &str) -> reqwest::Response {
        reqwest::Client::new()
            .request(reqwest::Method::OPTIONS, format!("http://{}/analyze", server.addr()))
            .header("Origin", origin)
            .header("Access-Control-Request-Method", "POST")
            .header("Access-Control-Request-Headers", "content-type")
            .send()
            .await
            .expect("request")
    }

    #[tokio::test]
    async fn cors_allows_configured_origin() {
        let server = AnalysisServer::start(test_config()).await.expect("start");

        let resp = preflight(&server, "http://localhost:5173").await;
        assert!(resp.status().is_success());
        assert_eq!(
            resp.headers()
                .get("access-control-allow-origin")
                .and_then(|v| v.to_str().ok()),
            Some("http://localhost:5173")
        );

        let resp = preflight(&server, "http://evil.test").await;
        assert!(resp.headers().get("access-control-allow-origin").is_none());
        server.stop().await;
    }

    #[tokio::test]
    async fn cors_honours_custom_origin_list() {
        let config = ServerConfig {
            allowed_origins: vec!["https://cloud.test".to_string()],
            ..test_config()
        };
        let server = AnalysisServer::start(config).await.expect("start");

        let resp = preflight(&server, "https://cloud.test").await;
        assert_eq!(
            resp.headers()
                .get("access-control-allow-origin")
                .and_then(|v| v.to_str().ok()),
            Some("https://cloud.test")
        );
        let resp = preflight(&server, "http://localhost:5173").await;
        assert!(resp.headers().get("access-control-allow-origin").is_none());
        server.stop().await;
    }

    #[tokio::test]
    async fn accepts_uppercase_scheme() {
        let server = AnalysisServer::start(test_config()).await.expect("start");
        let resp = reqwest::Client::new()
            .post(format!("http://{}/analyze", server.addr()))
            .json(&json!({ "url": "HTTPS://" }))
            .send()
            .await
            .expect("request");
        let body: Value = resp.json().await.expect("json");
        // Passes the scheme gate and fails URL parsing instead
        assert_ne!(body["detail"], "url: must be an absolute http(s) URL");
        server.stop().await;
    }

    #[tokio::test]
    async fn rejects_relative_url() {
        let server = AnalysisServer::start(test_config()).await.expect("start");
        let resp = reqwest::Client::new()
            .post(format!("http://{}/analyze", server.addr()))
            .json(&json!({ "url": "not a url" }))
            .send()
            .await
            .expect("request");
        assert_eq!(resp.status().as_u16(), 422);
        server.stop().await;
    }

    #[tokio::test]
    async fn short_article_is_unprocessable() {
        let page = MockServer::start_async().await;
        page.mock_async(|when, then| {
            when.method(GET).path("/brief");
            then.status(200)
                .header("content-type", "text/html")
                .body("<html><body><p>Just a few words.</p></body></html>");
        })
        .await;

        let server = AnalysisServer::start(test_config()).await.expect("start");
        let resp = reqwest::Client::new()
            .post(format!("http://{}/analyze", server.addr()))
            .json(&json!({ "url": page.url("/brief") }))
            .send()
            .await
            .expect("request");
        assert_eq!(resp.status().as_u16(), 422);
        let body: Value = resp.json().await.expect("json");
        assert_eq!(body["detail"], "Not enough article text extracted");
        server.stop().await;
    }

    #[tokio::test]
    async fn returns_keywords_for_article() {
        let para = "Astronomers observed the comet passing close to the planet, \
                    and the comet tail stretched across telescopes worldwide tonight.";
        let html = format!(
            "<html><body><article><p>{p}</p><p>{p}</p><p>{p}</p><p>{p}</p></article></body></html>",
            p = para
        );
        let page = MockServer::start_async().await;
        page.mock_async(|when, then| {
            when.method(GET).path("/comet");
            then.status(200).header("content-type", "text/html").body(html);
        })
        .await;

        let server = AnalysisServer::start(test_config()).await.expect("start");
        let resp = reqwest::Client::new()
            .post(format!("http://{}/analyze", server.addr()))
            .json(&json!({ "url": page.url("/comet") }))
            .send()
            .await
            .expect("request");
        assert!(resp.status().is_success());
        let body: AnalyzeResponse = resp.json().await.expect("json");
        assert_eq!(body.keywords[0].word, "comet");
        server.stop().await;
    }
}
