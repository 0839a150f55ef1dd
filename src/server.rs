//! HTTP control surface.
//!
//! `POST /control` with `{enabled, name}` toggles the loop and persists the
//! choice; `GET /status` reports the controller's current state.

use std::path::PathBuf;
use std::sync::Arc;

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use howler_engine::{BotController, BotStatus};

use crate::store::{self, Preferences};

#[derive(Clone)]
pub(crate) struct AppState {
    pub controller: Arc<BotController>,
    pub prefs_path: PathBuf,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ControlRequest {
    pub enabled: bool,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct Ack {
    pub ok: bool,
}

pub(crate) fn router(state: AppState) -> Router {
    Router::new()
        .route("/control", post(control))
        .route("/status", get(status))
        .with_state(state)
}

pub(crate) async fn serve(state: AppState, port: u16) -> anyhow::Result<()> {
    let addr = std::net::SocketAddr::from(([127, 0, 0, 1], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("control surface listening on http://{}", addr);
    axum::serve(listener, router(state)).await?;
    Ok(())
}

async fn control(State(state): State<AppState>, Json(req): Json<ControlRequest>) -> Json<Ack> {
    if let Some(name) = &req.name {
        state.controller.set_name(name);
    }
    state.controller.set_enabled(req.enabled);

    let prefs = Preferences {
        running: req.enabled,
        name: state.controller.name(),
    };
    if let Err(e) = store::save(&state.prefs_path, &prefs) {
        warn!("failed to persist preferences: {}", e);
    }
    Json(Ack { ok: true })
}

async fn status(State(state): State<AppState>) -> Json<BotStatus> {
    Json(state.controller.status())
}
