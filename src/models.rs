// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # API Data Models
//!
//! Request and response bodies for the REST API. Request bodies keep their
//! fields optional so that missing values are reported with the API's own
//! 400 messages instead of a generic deserialization failure.
//!
//! ## Model Categories
//!
//! - **Habits**: the locally persisted habit list
//! - **Habitica**: task scoring and creation payloads
//! - **Health**: liveness and database connectivity

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::{IntoParams, ToSchema};

// =============================================================================
// Habit Models
// =============================================================================

/// A habit as returned by the API. The store's internal `_id` is never
/// exposed.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct Habit {
    pub name: String,
    #[serde(default)]
    pub notes: String,
    /// Creation time as RFC 3339 text, assigned by the server.
    #[serde(rename = "createdAt")]
    pub created_at: String,
}

/// Request to create a habit.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct CreateHabitRequest {
    /// Display name, required and non-empty.
    pub name: Option<String>,
    /// Free-form notes, defaults to an empty string.
    pub notes: Option<String>,
}

// =============================================================================
// Nutrition Models
// =============================================================================

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct NutritionQuery {
    /// Natural-language food description, e.g. "1 banana".
    pub food: Option<String>,
}

// =============================================================================
// Habitica Models
// =============================================================================

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct TaskListQuery {
    /// One of `habits`, `dailys`, `todos`, `rewards`.
    #[serde(rename = "type")]
    pub task_type: Option<String>,
}

/// Direction a Habitica task is scored in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ScoreDirection {
    Up,
    Down,
}

impl ScoreDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            ScoreDirection::Up => "up",
            ScoreDirection::Down => "down",
        }
    }

    /// Accepts exactly `"up"` or `"down"`.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "up" => Some(ScoreDirection::Up),
            "down" => Some(ScoreDirection::Down),
            _ => None,
        }
    }
}

/// Request to score a Habitica task.
///
/// `direction` is kept as raw JSON so that any non-`up`/`down` value,
/// including a non-string, is answered with the same 400.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct ScoreTaskRequest {
    /// `"up"` or `"down"`.
    #[schema(value_type = ScoreDirection)]
    pub direction: Option<Value>,
    /// Optional score amount, forwarded as-is. Habitica validates it.
    #[schema(value_type = Option<f64>)]
    pub amount: Option<Value>,
}

impl ScoreTaskRequest {
    pub fn direction(&self) -> Option<ScoreDirection> {
        self.direction
            .as_ref()
            .and_then(Value::as_str)
            .and_then(ScoreDirection::parse)
    }
}

/// Request to create a Habitica task. Only `text` is checked; every field is
/// forwarded to Habitica unchanged.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[schema(value_type = Object)]
pub struct CreateTaskRequest(pub Map<String, Value>);

impl CreateTaskRequest {
    pub fn text(&self) -> Option<&str> {
        self.0
            .get("text")
            .and_then(Value::as_str)
            .filter(|text| !text.trim().is_empty())
    }
}

/// Fields to change on an existing Habitica task, forwarded unchanged.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[schema(value_type = Object)]
pub struct UpdateTaskRequest(pub Map<String, Value>);

// =============================================================================
// Health Models
// =============================================================================

/// Liveness response.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct HealthResponse {
    pub status: String,
}

/// Database connectivity report. Always returned with HTTP 200.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct DbHealthResponse {
    pub connected: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub db: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
