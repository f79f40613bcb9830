// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Nutritionix natural-language nutrition lookup.

use reqwest::Client;
use serde_json::{json, Value};

use super::{build_http_client, join_url, relay_json, UpstreamError};
use crate::config::{Config, NutritionixCredentials};

pub const MISSING_CREDENTIALS: &str = "Nutritionix credentials not configured";

#[derive(Debug, Clone)]
pub struct NutritionixClient {
    api_base_url: String,
    credentials: NutritionixCredentials,
    http: Client,
}

impl NutritionixClient {
    pub fn from_config(config: &Config) -> Result<Self, UpstreamError> {
        let credentials = config
            .nutritionix
            .clone()
            .ok_or(UpstreamError::MissingCredentials(MISSING_CREDENTIALS))?;

        Ok(Self {
            api_base_url: config.nutritionix_api_base.clone(),
            credentials,
            http: build_http_client(config.verify_ssl)?,
        })
    }

    /// `POST /natural/nutrients` with a free-text query such as "1 banana".
    pub async fn natural_nutrients(&self, query: &str) -> Result<Value, UpstreamError> {
        let path = "/natural/nutrients";
        let response = self
            .http
            .post(join_url(&self.api_base_url, path))
            .header("x-app-id", &self.credentials.app_id)
            .header("x-app-key", &self.credentials.api_key)
            .json(&json!({ "query": query }))
            .send()
            .await
            .map_err(|e| UpstreamError::Transport(e.to_string()))?;

        relay_json(response).await
    }
}
