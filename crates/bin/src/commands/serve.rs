//! Serve command - runs the note message API over HTTP.

use std::sync::Arc;

use axum::{
    Json, Router,
    body::Bytes,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};
use serde::Serialize;
use tokio::signal::unix::{SignalKind, signal};

use notelock::{
    service::{NoteService, Request, Response, ServiceHandle},
    store::NoteStore,
};

use crate::backend::{StoreClaim, create_store, persist, store_path};
use crate::cli::ServeArgs;

/// Shared application state
#[derive(Clone)]
struct AppState {
    handle: ServiceHandle,
    store: Arc<dyn NoteStore>,
    backend: &'static str,
}

/// Health check response
#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    backend: &'static str,
    notes: usize,
}

/// Run the Notelock server
pub async fn run(args: &ServeArgs) -> Result<(), Box<dyn std::error::Error>> {
    // Held until the shutdown snapshot is written.
    let _claim = StoreClaim::acquire(&args.store)?;
    let store = create_store(&args.store).await?;
    let handle = ServiceHandle::spawn(NoteService::new(store.clone()));

    let app_state = AppState {
        handle: handle.clone(),
        store: store.clone(),
        backend: args.store.backend.name(),
    };

    let app = router(app_state);

    // Bind server
    let addr = format!("{}:{}", args.host, args.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    let local_addr = listener.local_addr()?;

    println!("Notelock server listening on http://{local_addr}");
    println!();
    println!("Available endpoints:");
    println!("  POST /api/v0/messages - Note message API (saveNote, loadNotes, deleteNote, getAllNotes, unlockNote)");
    println!("  GET  /health          - Health check");
    println!();
    println!("Press Ctrl+C to shutdown");

    let snapshot_path = store_path(&args.store);

    // Start server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown_signal().await;
            // Waits for accepted messages, so the snapshot below includes them.
            handle.shutdown().await;

            // Save notes on shutdown (only needed for the InMemory store)
            if let Err(e) = persist(&store, &snapshot_path).await {
                tracing::error!("Failed to save notes: {e}");
                eprintln!("Failed to save notes: {e}");
            }
        })
        .await?;

    println!("Server shut down");
    Ok(())
}

fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handle_health_endpoint))
        .route("/api/v0/messages", post(handle_message))
        .with_state(state)
}

async fn shutdown_signal() {
    let terminate = async {
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::warn!("Failed to set up SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    tokio::select! {
        _ = terminate => tracing::info!("Received SIGTERM, initiating graceful shutdown..."),
        _ = tokio::signal::ctrl_c() => tracing::info!("Received SIGINT, initiating graceful shutdown..."),
    }
}

/// Handler for POST /api/v0/messages
///
/// Application failures are `200` with `success: false`; only a body that is
/// not a valid message is rejected at the HTTP level.
async fn handle_message(
    State(state): State<AppState>,
    body: Bytes,
) -> (StatusCode, Json<Response>) {
    let request: Request = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(e) => {
            tracing::warn!("Rejected malformed message: {e}");
            return (
                StatusCode::BAD_REQUEST,
                Json(Response::failure(format!("Invalid message: {e}"))),
            );
        }
    };

    match state.handle.send(request).await {
        Ok(response) => (StatusCode::OK, Json(response)),
        Err(e) => (StatusCode::SERVICE_UNAVAILABLE, Json(Response::failure(e))),
    }
}

/// Handler for GET /health
async fn handle_health_endpoint(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, String)> {
    let notes = state
        .store
        .count()
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    Ok(Json(HealthResponse {
        status: "healthy",
        backend: state.backend,
        notes,
    }))
}
