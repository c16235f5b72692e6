//! Purse Suggestion Server
//!
//! Axum-based API that turns pre-aggregated monthly figures into spending
//! suggestions. The service is stateless: every request carries the numbers
//! it needs and nothing is stored.
//!
//! Behavior at the boundary:
//! - Cross-origin requests allowed (any origin unless configured otherwise)
//! - Preflight OPTIONS requests answered with an empty 200
//! - Request bodies validated field by field before reaching the engine
//! - Panics converted into a generic JSON 500 instead of a dropped connection

use std::any::Any;
use std::sync::Arc;

use axum::{
    http::{header, HeaderName, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{AllowOrigin, Any as AnyOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing::{error, info, warn};

use purse_core::SuggestionEngine;

mod handlers;

/// Generic message returned for faults the client can't act on
const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Cross-origin policy applied to every route
#[derive(Clone, Debug)]
pub struct CorsConfig {
    /// Allowed origins (empty or containing "*" = any origin)
    pub allowed_origins: Vec<String>,
    pub allowed_methods: Vec<Method>,
    pub allowed_headers: Vec<HeaderName>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec![],
            allowed_methods: vec![
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::OPTIONS,
            ],
            allowed_headers: vec![
                header::CONTENT_TYPE,
                header::AUTHORIZATION,
                HeaderName::from_static("x-client-info"),
                HeaderName::from_static("apikey"),
            ],
        }
    }
}

impl CorsConfig {
    fn layer(&self) -> CorsLayer {
        let base = CorsLayer::new()
            .allow_methods(self.allowed_methods.clone())
            .allow_headers(self.allowed_headers.clone());

        if self.allowed_origins.is_empty() || self.allowed_origins.iter().any(|o| o == "*") {
            return base.allow_origin(AnyOrigin);
        }

        let origins: Vec<HeaderValue> = self
            .allowed_origins
            .iter()
            .filter_map(|o| match o.parse() {
                Ok(value) => Some(value),
                Err(_) => {
                    warn!(origin = %o, "Ignoring invalid CORS origin");
                    None
                }
            })
            .collect();
        base.allow_origin(AllowOrigin::list(origins))
    }
}

/// Server configuration
#[derive(Clone, Debug, Default)]
pub struct ServerConfig {
    pub cors: CorsConfig,
    /// Engine used for every request (carries the currency symbol)
    pub engine: SuggestionEngine,
}

/// Shared application state
pub struct AppState {
    pub config: ServerConfig,
}

/// Parse a comma-separated list of origins
///
/// Examples:
/// - "" - no restriction (any origin)
/// - "https://app.example.com" - single origin
/// - "https://a.example.com, http://localhost:8081" - multiple origins
pub fn parse_origins(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .collect()
}

/// Create the application router
pub fn create_router(config: ServerConfig) -> Router {
    let state = Arc::new(AppState {
        config: config.clone(),
    });

    let api_routes = Router::new()
        .route("/health", get(handlers::health))
        .route("/suggestions", post(handlers::create_suggestions));

    let routes = Router::new()
        .nest("/api", api_routes)
        // Path used by the mobile client's hosted function
        .route(
            "/functions/v1/ai-spending-suggestions",
            post(handlers::create_suggestions),
        )
        .with_state(state);

    with_middleware(routes, &config)
}

/// Wrap routes with panic handling, request tracing and CORS (outermost)
pub(crate) fn with_middleware(routes: Router, config: &ServerConfig) -> Router {
    routes
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(TraceLayer::new_for_http())
        .layer(config.cors.layer())
}

fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    error!(panic = detail, "Request handler panicked");

    AppError::internal(INTERNAL_ERROR_MESSAGE).into_response()
}

/// Start the server with default configuration
pub async fn serve(host: &str, port: u16) -> anyhow::Result<()> {
    serve_with_config(host, port, ServerConfig::default()).await
}

/// Start the server with custom configuration
pub async fn serve_with_config(host: &str, port: u16, config: ServerConfig) -> anyhow::Result<()> {
    if config.cors.allowed_origins.is_empty() {
        info!("CORS: any origin allowed");
    } else {
        info!(origins = ?config.cors.allowed_origins, "CORS: restricted origins");
    }

    let app = create_router(config);
    let addr = format!("{}:{}", host, port);

    info!("Starting server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

// ============================================================================
// Error Handling
// ============================================================================

/// Application error type with proper HTTP status codes
pub struct AppError {
    status: StatusCode,
    message: String,
    internal: Option<anyhow::Error>,
}

impl AppError {
    pub fn bad_request(msg: &str) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: msg.to_string(),
            internal: None,
        }
    }

    pub fn internal(msg: &str) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: msg.to_string(),
            internal: None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log the full internal error if present
        if let Some(err) = &self.internal {
            error!(error = %err, "Internal error");
        }

        let body = Json(serde_json::json!({
            "error": self.message
        }));

        (self.status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        let err = err.into();
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            // Return generic message to client
            message: INTERNAL_ERROR_MESSAGE.to_string(),
            // Keep full error for logging
            internal: Some(err),
        }
    }
}
