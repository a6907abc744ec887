//! Call ingestion HTTP server.
//!
//! `POST /api/calls` stores a call event; `GET /health` reports whether the
//! database answers.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::any::Any as PanicPayload;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::domain::errors::DomainError;
use crate::domain::models::{CallSubmission, LookupKind, ServerConfig};
use crate::domain::ports::{CallRepository, LookupRepository};
use crate::services::CallService;

/// Configuration for the calls HTTP server.
#[derive(Debug, Clone)]
pub struct CallsHttpConfig {
    /// Host to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Whether to enable CORS.
    pub enable_cors: bool,
}

impl Default for CallsHttpConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            enable_cors: true,
        }
    }
}

impl From<&ServerConfig> for CallsHttpConfig {
    fn from(config: &ServerConfig) -> Self {
        Self {
            host: config.host.clone(),
            port: config.port,
            enable_cors: config.enable_cors,
        }
    }
}

/// Response for a stored call.
#[derive(Debug, Serialize, Deserialize)]
pub struct CallResponse {
    pub id: i64,
    pub number: String,
    pub timestamp: DateTime<Utc>,
    pub message: String,
}

/// Error response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// Health check response.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

/// Turn a panicking handler into a 500 instead of a dropped connection.
fn panic_response(payload: Box<dyn PanicPayload + Send + 'static>) -> Response {
    let details = payload
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| payload.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    tracing::error!(panic = details, "request handler panicked");

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse::new("Internal server error")),
    )
        .into_response()
}

/// Map a domain error to the status and message returned to the client.
fn error_response(err: &DomainError) -> ApiError {
    let (status, message) = match err {
        DomainError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg.as_str()),
        DomainError::UnknownCampaign(_) => {
            (StatusCode::BAD_REQUEST, "Invalid client_campaign_model_id")
        }
        DomainError::LookupMiss {
            kind: LookupKind::Voice,
            ..
        } => (StatusCode::BAD_REQUEST, "Voice doesn't exist"),
        DomainError::LookupMiss {
            kind: LookupKind::ResponseCategory,
            ..
        } => (StatusCode::BAD_REQUEST, "Response category doesn't exist"),
        DomainError::StoreUnavailable(_) => {
            (StatusCode::INTERNAL_SERVER_ERROR, "Lookup store unavailable")
        }
        DomainError::PersistFailed(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Failed to save call"),
    };

    (status, Json(ErrorResponse::new(message)))
}

/// Calls HTTP Server.
pub struct CallsHttpServer<L: LookupRepository + 'static, C: CallRepository + 'static> {
    config: CallsHttpConfig,
    service: CallService<L, C>,
}

impl<L: LookupRepository + 'static, C: CallRepository + 'static> CallsHttpServer<L, C> {
    pub fn new(service: CallService<L, C>, config: CallsHttpConfig) -> Self {
        Self { config, service }
    }

    /// Build the router.
    pub fn build_router(self) -> Router {
        let app = Router::new()
            .route("/api/calls", post(create_call::<L, C>))
            .route("/health", get(health_check::<L, C>))
            .with_state(self.service)
            .layer(CatchPanicLayer::custom(panic_response));

        if self.config.enable_cors {
            app.layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any))
                .layer(TraceLayer::new_for_http())
        } else {
            app.layer(TraceLayer::new_for_http())
        }
    }

    /// Start the server with a shutdown signal.
    pub async fn serve_with_shutdown<F>(
        self,
        shutdown: F,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let addr: SocketAddr = format!("{}:{}", self.config.host, self.config.port).parse()?;
        let router = self.build_router();

        let listener = TcpListener::bind(addr).await?;
        tracing::info!("Call ingestion server listening on {}", addr);

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown)
            .await?;
        Ok(())
    }
}

// Handler functions

async fn create_call<L: LookupRepository + 'static, C: CallRepository + 'static>(
    State(service): State<CallService<L, C>>,
    payload: Result<Json<CallSubmission>, JsonRejection>,
) -> Result<(StatusCode, Json<CallResponse>), ApiError> {
    let Json(submission) = payload.map_err(|rejection| {
        tracing::debug!(error = %rejection, "rejected call body");
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new("Invalid request")),
        )
    })?;

    let number = submission.number.clone();
    let campaign_id = submission.client_campaign_model_id;
    match service.create_call(submission).await {
        Ok(saved) => Ok((
            StatusCode::CREATED,
            Json(CallResponse {
                id: saved.id,
                number,
                timestamp: saved.timestamp,
                message: "Call saved successfully".to_string(),
            }),
        )),
        Err(e) => {
            if e.is_client_error() {
                tracing::debug!(error = %e, campaign_id, "call rejected");
            } else {
                tracing::error!(error = %e, campaign_id, "call failed");
            }
            Err(error_response(&e))
        }
    }
}

async fn health_check<L: LookupRepository + 'static, C: CallRepository + 'static>(
    State(service): State<CallService<L, C>>,
) -> (StatusCode, Json<HealthResponse>) {
    if service.health().await {
        (
            StatusCode::OK,
            Json(HealthResponse {
                status: "healthy".to_string(),
            }),
        )
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(HealthResponse {
                status: "unhealthy".to_string(),
            }),
        )
    }
}
