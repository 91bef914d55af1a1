//! HTTP server for the summarization API
//!
//! Thin orchestration layer: validates the incoming document list, hands the
//! concatenated text to the summarizer on the blocking pool, and maps
//! outcomes to HTTP status codes.

use crate::error::SummarizeError;
use crate::preprocess;
use crate::summarize::Summarizer;
use anyhow::Result;
use axum::extract::rejection::JsonRejection;
use axum::extract::{DefaultBodyLimit, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum::routing::{get, post};
use axum::Router;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::{error, info, warn};

/// One document in a summarize request
#[derive(Debug, Deserialize)]
pub struct DocumentInput {
    pub text: String,
}

/// Body of `POST /summarize`
#[derive(Debug, Deserialize)]
pub struct SummarizeRequest {
    pub documents: Vec<DocumentInput>,
}

/// Shared application state for all route handlers
pub struct AppState {
    pub summarizer: Summarizer,
    pub model_name: String,
}

/// Build the API router
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/summarize", post(summarize_route))
        .route("/info", get(info_route))
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(DefaultBodyLimit::max(10 * 1024 * 1024)) // 10MB request cap
}

/// Bind and serve until shutdown
pub async fn run(state: Arc<AppState>, port: u16) -> Result<()> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}")).await?;
    info!(addr = %listener.local_addr()?, "listening");
    axum::serve(listener, app).await?;
    Ok(())
}

async fn summarize_route(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<SummarizeRequest>, JsonRejection>,
) -> Response {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return rejection_response(rejection),
    };

    // All validation happens before any model work.
    if request.documents.is_empty() {
        return error_response(
            StatusCode::UNPROCESSABLE_ENTITY,
            "validation_error",
            "documents must be a non-empty list",
        );
    }
    if let Some(position) = request.documents.iter().position(|d| d.text.is_empty()) {
        return error_response(
            StatusCode::UNPROCESSABLE_ENTITY,
            "validation_error",
            &format!("documents[{position}].text must be non-empty"),
        );
    }

    let texts: Vec<String> = request.documents.into_iter().map(|d| d.text).collect();
    let full_text = preprocess::concatenate_documents(&texts);
    if full_text.is_empty() {
        warn!("no text found in provided documents");
        return error_response(
            StatusCode::BAD_REQUEST,
            "validation_error",
            "no text found in documents",
        );
    }

    info!(
        documents = texts.len(),
        chars = full_text.len(),
        "received summarize request"
    );

    // Model inference is blocking CPU/accelerator work.
    let summarizer = state.summarizer.clone();
    let result =
        tokio::task::spawn_blocking(move || summarizer.summarize_long_text(&full_text)).await;

    match result {
        Ok(Ok(summary)) => (
            StatusCode::OK,
            Json(json!({ "status": "success", "summary": summary })),
        )
            .into_response(),
        Ok(Err(e)) => {
            error!(error = %e, "summarization failed");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, e.kind(), &e.to_string())
        }
        Err(e) => {
            error!(error = %e, "summarization task panicked");
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                "unexpected internal error",
            )
        }
    }
}

async fn info_route(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    let options = state.summarizer.options();
    Json(json!({
        "model": state.model_name,
        "capacity": state.summarizer.capacity(),
        "window_size": options.window_size,
        "stride": options.stride,
        "max_depth": options.max_depth,
        "workers": options.workers,
    }))
}

fn rejection_response(rejection: JsonRejection) -> Response {
    match rejection {
        JsonRejection::MissingJsonContentType(r) => {
            let err = SummarizeError::UnsupportedMedia(r.to_string());
            error_response(StatusCode::UNSUPPORTED_MEDIA_TYPE, err.kind(), &err.to_string())
        }
        // Valid JSON that doesn't match the schema (missing key, wrong type).
        JsonRejection::JsonDataError(r) => {
            let err = SummarizeError::Validation(r.to_string());
            error_response(StatusCode::UNPROCESSABLE_ENTITY, err.kind(), &err.to_string())
        }
        // Body isn't JSON at all.
        JsonRejection::JsonSyntaxError(r) => {
            let err = SummarizeError::Validation(r.to_string());
            error_response(StatusCode::BAD_REQUEST, err.kind(), &err.to_string())
        }
        rejection => {
            let err = SummarizeError::Validation(rejection.to_string());
            error_response(StatusCode::BAD_REQUEST, err.kind(), &err.to_string())
        }
    }
}

fn error_response(status: StatusCode, kind: &str, message: &str) -> Response {
    (
        status,
        Json(json!({ "status": "error", "kind": kind, "message": message })),
    )
        .into_response()
}
