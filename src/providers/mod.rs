// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Outbound clients for the upstream APIs the service fronts.
//!
//! Clients are built per request from [`Config`](crate::config::Config).
//! Each call is a single attempt with a fixed timeout: upstream error
//! statuses are surfaced with their raw body, everything else that goes
//! wrong on the wire is a transport error.

pub mod habitica;
pub mod nutritionix;

use std::time::Duration;

use axum::http::StatusCode;
use reqwest::{Client, Response};
use serde_json::Value;

pub use habitica::HabiticaClient;
pub use nutritionix::NutritionixClient;

/// Timeout applied to every upstream request.
pub const UPSTREAM_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    #[error("{0}")]
    MissingCredentials(&'static str),

    #[error("upstream returned {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("{0}")]
    Transport(String),

    #[error("{0}")]
    InvalidResponse(String),
}

/// Build the HTTP client used for a single upstream call.
///
/// With `verify_tls` set, certificates are checked against the bundled web
/// PKI roots; otherwise certificate validation is disabled entirely.
pub fn build_http_client(verify_tls: bool) -> Result<Client, UpstreamError> {
    Client::builder()
        .timeout(UPSTREAM_TIMEOUT)
        .danger_accept_invalid_certs(!verify_tls)
        .build()
        .map_err(|e| UpstreamError::Transport(format!("failed to build HTTP client: {e}")))
}

/// Pass a successful upstream JSON body through untouched, or turn an error
/// status into [`UpstreamError::Status`].
async fn relay_json(response: Response) -> Result<Value, UpstreamError> {
    let status = response.status();
    if !status.is_success() {
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => format!("failed to read upstream error body: {e}"),
        };
        return Err(UpstreamError::Status { status, body });
    }

    response
        .json()
        .await
        .map_err(|e| UpstreamError::InvalidResponse(e.to_string()))
}

fn join_url(base: &str, path: &str) -> String {
    format!("{}{}", base.trim_end_matches('/'), path)
}
