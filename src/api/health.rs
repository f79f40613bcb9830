// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{extract::State, Json};
use tracing::warn;

use crate::{
    models::{DbHealthResponse, HealthResponse},
    state::AppState,
};

/// Liveness probe handler.
///
/// Always returns 200 if the process is running.
#[utoipa::path(
    get,
    path = "/api/health",
    tag = "Health",
    responses(
        (status = 200, description = "Service is alive", body = HealthResponse)
    )
)]
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

/// Database connectivity check.
///
/// Never fails at the HTTP level: a missing store or a failed ping is
/// reported in the body with `connected: false`.
#[utoipa::path(
    get,
    path = "/api/db/health",
    tag = "Health",
    responses(
        (status = 200, description = "Database connectivity report", body = DbHealthResponse)
    )
)]
pub async fn db_health(State(state): State<AppState>) -> Json<DbHealthResponse> {
    let Some(store) = state.store.as_ref() else {
        return Json(DbHealthResponse {
            connected: false,
            db: None,
            error: Some("db not initialized".to_string()),
        });
    };

    let report = match store.ping().await {
        Ok(()) => DbHealthResponse {
            connected: true,
            db: Some(store.database_name().to_string()),
            error: None,
        },
        Err(e) => {
            warn!(error = %e, "Database ping failed");
            DbHealthResponse {
                connected: false,
                db: None,
                error: Some(e.to_string()),
            }
        }
    };

    Json(report)
}
