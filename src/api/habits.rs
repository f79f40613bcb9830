// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use bson::{doc, Bson, DateTime, Document};
use serde_json::Value;
use tracing::info;

use crate::{
    error::ApiError,
    models::{CreateHabitRequest, Habit},
    normalize,
    state::AppState,
    storage::{FindOptions, HABITS_COLLECTION},
};

/// Convert a freshly written habit document into its API shape.
fn habit_from_document(document: Document) -> Result<Habit, ApiError> {
    let value = normalize::to_json(Bson::Document(document));
    serde_json::from_value(value)
        .map_err(|e| ApiError::internal(format!("malformed habit document: {e}")))
}

#[utoipa::path(
    get,
    path = "/api/habits",
    tag = "Habits",
    responses(
        (status = 200, description = "Stored habit documents, newest first", body = [Habit]),
        (status = 500, description = "Database not configured")
    )
)]
pub async fn list_habits(State(state): State<AppState>) -> Result<Json<Vec<Value>>, ApiError> {
    let store = state.store()?;
    let documents = store
        .find_all(
            HABITS_COLLECTION,
            FindOptions::new()
                .projection(doc! { "_id": 0 })
                .sort(doc! { "createdAt": -1 }),
        )
        .await?;

    // Documents are returned as stored, so older shapes in the collection
    // are listed rather than failing the whole request.
    let habits = documents
        .into_iter()
        .map(|document| normalize::to_json(Bson::Document(document)))
        .collect();
    Ok(Json(habits))
}

#[utoipa::path(
    post,
    path = "/api/habits",
    request_body = CreateHabitRequest,
    tag = "Habits",
    responses(
        (status = 200, description = "Created habit", body = Habit),
        (status = 400, description = "Missing 'name'"),
        (status = 500, description = "Database not configured")
    )
)]
pub async fn create_habit(
    State(state): State<AppState>,
    payload: Result<Json<CreateHabitRequest>, JsonRejection>,
) -> Result<Json<Habit>, ApiError> {
    let store = state.store()?;
    let Json(request) = payload?;

    let name = request
        .name
        .filter(|name| !name.is_empty())
        .ok_or_else(|| ApiError::bad_request("Missing 'name'"))?;

    let document = doc! {
        "name": name,
        "notes": request.notes.unwrap_or_default(),
        "createdAt": DateTime::now(),
    };
    store
        .insert_one(HABITS_COLLECTION, document.clone())
        .await?;

    let habit = habit_from_document(document)?;
    info!(name = %habit.name, "Habit created");
    Ok(Json(habit))
}
