// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Habitica task proxy.
//!
//! Requests are validated before credentials are looked up, so a malformed
//! request never reaches Habitica.

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    Json,
};
use serde_json::Value;

use crate::{
    error::ApiError,
    models::{CreateTaskRequest, ScoreTaskRequest, TaskListQuery, UpdateTaskRequest},
    providers::HabiticaClient,
    state::AppState,
};

#[utoipa::path(
    get,
    path = "/api/habitica/tasks",
    params(TaskListQuery),
    tag = "Habitica",
    responses(
        (status = 200, description = "Habitica response, unchanged"),
        (status = 500, description = "Credentials missing or upstream unreachable")
    )
)]
pub async fn list_tasks(
    State(state): State<AppState>,
    Query(params): Query<TaskListQuery>,
) -> Result<Json<Value>, ApiError> {
    let client = HabiticaClient::from_config(&state.config)?;
    let task_type = params.task_type.as_deref().filter(|t| !t.is_empty());
    Ok(Json(client.list_tasks(task_type).await?))
}

#[utoipa::path(
    post,
    path = "/api/habitica/tasks",
    request_body = CreateTaskRequest,
    tag = "Habitica",
    responses(
        (status = 200, description = "Habitica response, unchanged"),
        (status = 400, description = "Missing 'text'"),
        (status = 500, description = "Credentials missing or upstream unreachable")
    )
)]
pub async fn create_task(
    State(state): State<AppState>,
    payload: Result<Json<CreateTaskRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(request) = payload?;
    if request.text().is_none() {
        return Err(ApiError::bad_request("Missing 'text'"));
    }

    let client = HabiticaClient::from_config(&state.config)?;
    let task = Value::Object(request.0);
    Ok(Json(client.create_task(&task).await?))
}

#[utoipa::path(
    put,
    path = "/api/habitica/tasks/{task_id}",
    params(
        ("task_id" = String, Path, description = "Habitica task id or alias")
    ),
    request_body = UpdateTaskRequest,
    tag = "Habitica",
    responses(
        (status = 200, description = "Habitica response, unchanged"),
        (status = 400, description = "Body is not a JSON object"),
        (status = 500, description = "Credentials missing or upstream unreachable")
    )
)]
pub async fn update_task(
    Path(task_id): Path<String>,
    State(state): State<AppState>,
    payload: Result<Json<UpdateTaskRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(request) = payload?;
    let client = HabiticaClient::from_config(&state.config)?;
    let changes = Value::Object(request.0);
    Ok(Json(client.update_task(&task_id, &changes).await?))
}

#[utoipa::path(
    delete,
    path = "/api/habitica/tasks/{task_id}",
    params(
        ("task_id" = String, Path, description = "Habitica task id or alias")
    ),
    tag = "Habitica",
    responses(
        (status = 200, description = "Habitica response, unchanged"),
        (status = 500, description = "Credentials missing or upstream unreachable")
    )
)]
pub async fn delete_task(
    Path(task_id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<Value>, ApiError> {
    let client = HabiticaClient::from_config(&state.config)?;
    Ok(Json(client.delete_task(&task_id).await?))
}

#[utoipa::path(
    post,
    path = "/api/habitica/tasks/{task_id}/score",
    params(
        ("task_id" = String, Path, description = "Habitica task id or alias")
    ),
    request_body = ScoreTaskRequest,
    tag = "Habitica",
    responses(
        (status = 200, description = "Habitica response, unchanged"),
        (status = 400, description = "'direction' must be 'up' or 'down'"),
        (status = 500, description = "Credentials missing or upstream unreachable")
    )
)]
pub async fn score_task(
    Path(task_id): Path<String>,
    State(state): State<AppState>,
    payload: Result<Json<ScoreTaskRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(request) = payload?;
    let direction = request
        .direction()
        .ok_or_else(|| ApiError::bad_request("'direction' must be 'up' or 'down'"))?;

    let client = HabiticaClient::from_config(&state.config)?;
    let body = client
        .score_task(&task_id, direction, request.amount)
        .await?;
    Ok(Json(body))
}
