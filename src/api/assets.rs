// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Serving of the prebuilt frontend bundle.
//!
//! Nothing is mounted when the bundle directory is absent, so `/` falls
//! through to the default 404.

use std::path::{Path, PathBuf};

use axum::{
    extract::Request,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;
use tower::ServiceExt;
use tower_http::services::{ServeDir, ServeFile};
use tracing::info;

pub const INDEX_FILE: &str = "index.html";
pub const ASSETS_DIR: &str = "assets";
pub const MISSING_BUILD_MESSAGE: &str =
    "Frontend build not found. Run scripts/build_frontend.sh to generate it.";

/// Routes for the bundle in `static_dir`, or `None` if the directory does
/// not exist.
pub fn static_routes(static_dir: &Path) -> Option<Router> {
    if !static_dir.is_dir() {
        return None;
    }

    let mut router = Router::new();

    let assets_dir = static_dir.join(ASSETS_DIR);
    if assets_dir.is_dir() {
        router = router.nest_service("/assets", ServeDir::new(assets_dir));
    }

    let index = static_dir.join(INDEX_FILE);
    router = router.route(
        "/",
        get(move |request: Request| serve_index(index.clone(), request)),
    );

    info!(dir = %static_dir.display(), "Serving frontend bundle");
    Some(router)
}

async fn serve_index(index: PathBuf, request: Request) -> Response {
    let exists = tokio::fs::metadata(&index)
        .await
        .map(|metadata| metadata.is_file())
        .unwrap_or(false);
    if !exists {
        return Json(json!({ "message": MISSING_BUILD_MESSAGE })).into_response();
    }

    match ServeFile::new(index).oneshot(request).await {
        Ok(response) => response.into_response(),
        Err(never) => match never {},
    }
}
