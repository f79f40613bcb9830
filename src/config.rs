// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! Configuration is read once from the environment at startup and is never
//! mutated afterwards. Missing upstream credentials or a missing database
//! URI are valid states: the handlers that need them report the gap per
//! request instead of the process refusing to start.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `8000` |
//! | `NUTRITIONIX_APP_ID` | Nutritionix application id | unset |
//! | `NUTRITIONIX_API_KEY` | Nutritionix application key | unset |
//! | `NUTRITIONIX_API_BASE` | Nutritionix API base URL | `https://trackapi.nutritionix.com/v2` |
//! | `HABITICA_USER_ID` | Habitica user id | unset |
//! | `HABITICA_API_TOKEN` | Habitica API token | unset |
//! | `HABITICA_API_BASE` | Habitica API base URL | `https://habitica.com/api/v3` |
//! | `HABITICA_CLIENT` | Value of the `x-client` header | `showup-api-local` |
//! | `MONGODB_URI` | MongoDB connection string | unset (no habits API) |
//! | `MONGODB_DB` | MongoDB database name | `myapp` |
//! | `ALLOWED_ORIGINS` | Comma-separated CORS allow-list | `*` |
//! | `VERIFY_SSL` | Verify upstream TLS certificates | `true` |
//! | `STATIC_DIR` | Prebuilt frontend bundle directory | `static` |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |

use std::path::PathBuf;

pub const HOST_ENV: &str = "HOST";
pub const PORT_ENV: &str = "PORT";
pub const NUTRITIONIX_APP_ID_ENV: &str = "NUTRITIONIX_APP_ID";
pub const NUTRITIONIX_API_KEY_ENV: &str = "NUTRITIONIX_API_KEY";
pub const NUTRITIONIX_API_BASE_ENV: &str = "NUTRITIONIX_API_BASE";
pub const HABITICA_USER_ID_ENV: &str = "HABITICA_USER_ID";
pub const HABITICA_API_TOKEN_ENV: &str = "HABITICA_API_TOKEN";
pub const HABITICA_API_BASE_ENV: &str = "HABITICA_API_BASE";
pub const HABITICA_CLIENT_ENV: &str = "HABITICA_CLIENT";
pub const MONGODB_URI_ENV: &str = "MONGODB_URI";
pub const MONGODB_DB_ENV: &str = "MONGODB_DB";
pub const ALLOWED_ORIGINS_ENV: &str = "ALLOWED_ORIGINS";
pub const VERIFY_SSL_ENV: &str = "VERIFY_SSL";
pub const STATIC_DIR_ENV: &str = "STATIC_DIR";
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_NUTRITIONIX_API_BASE: &str = "https://trackapi.nutritionix.com/v2";
pub const DEFAULT_HABITICA_API_BASE: &str = "https://habitica.com/api/v3";
pub const DEFAULT_HABITICA_CLIENT: &str = "showup-api-local";
pub const DEFAULT_MONGODB_DB: &str = "myapp";
pub const DEFAULT_STATIC_DIR: &str = "static";
pub const DEFAULT_LOG_FILTER: &str = "info,tower_http=debug";

/// Nutritionix application credentials. Only built when both halves are set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NutritionixCredentials {
    pub app_id: String,
    pub api_key: String,
}

/// Habitica user credentials. Only built when both halves are set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HabiticaCredentials {
    pub user_id: String,
    pub api_token: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    Json,
    #[default]
    Pretty,
}

/// CORS allow-list as configured by `ALLOWED_ORIGINS`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllowedOrigins {
    Any,
    List(Vec<String>),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub nutritionix: Option<NutritionixCredentials>,
    pub nutritionix_api_base: String,
    pub habitica: Option<HabiticaCredentials>,
    pub habitica_api_base: String,
    pub habitica_client: String,
    pub mongodb_uri: Option<String>,
    pub mongodb_db: String,
    pub allowed_origins: AllowedOrigins,
    pub verify_ssl: bool,
    pub static_dir: PathBuf,
    pub log_format: LogFormat,
}

impl Config {
    /// Load configuration from the process environment, reading `.env` first
    /// when one is present.
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let nutritionix = match (get(NUTRITIONIX_APP_ID_ENV), get(NUTRITIONIX_API_KEY_ENV)) {
            (Some(app_id), Some(api_key)) => Some(NutritionixCredentials { app_id, api_key }),
            _ => None,
        };

        let habitica = match (get(HABITICA_USER_ID_ENV), get(HABITICA_API_TOKEN_ENV)) {
            (Some(user_id), Some(api_token)) => Some(HabiticaCredentials { user_id, api_token }),
            _ => None,
        };

        Self {
            host: get(HOST_ENV).unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: get(PORT_ENV)
                .and_then(|port| port.parse().ok())
                .unwrap_or(DEFAULT_PORT),
            nutritionix,
            nutritionix_api_base: get(NUTRITIONIX_API_BASE_ENV)
                .unwrap_or_else(|| DEFAULT_NUTRITIONIX_API_BASE.to_string()),
            habitica,
            habitica_api_base: get(HABITICA_API_BASE_ENV)
                .unwrap_or_else(|| DEFAULT_HABITICA_API_BASE.to_string()),
            habitica_client: get(HABITICA_CLIENT_ENV)
                .unwrap_or_else(|| DEFAULT_HABITICA_CLIENT.to_string()),
            mongodb_uri: get(MONGODB_URI_ENV),
            mongodb_db: get(MONGODB_DB_ENV).unwrap_or_else(|| DEFAULT_MONGODB_DB.to_string()),
            allowed_origins: parse_allowed_origins(get(ALLOWED_ORIGINS_ENV).as_deref()),
            verify_ssl: get(VERIFY_SSL_ENV)
                .map(|value| value.eq_ignore_ascii_case("true"))
                .unwrap_or(true),
            static_dir: get(STATIC_DIR_ENV)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_STATIC_DIR)),
            log_format: match get(LOG_FORMAT_ENV).as_deref() {
                Some(format) if format.eq_ignore_ascii_case("json") => LogFormat::Json,
                _ => LogFormat::Pretty,
            },
        }
    }

    /// Socket address string to bind the HTTP listener to.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

fn parse_allowed_origins(raw: Option<&str>) -> AllowedOrigins {
    let origins: Vec<String> = raw
        .unwrap_or("*")
        .split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect();

    if origins.is_empty() || origins.iter().any(|origin| origin == "*") {
        AllowedOrigins::Any
    } else {
        AllowedOrigins::List(origins)
    }
}
