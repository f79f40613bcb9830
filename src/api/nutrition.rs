// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Nutritionix lookup proxy.

use axum::{
    extract::{Query, State},
    Json,
};
use serde_json::Value;

use crate::{error::ApiError, models::NutritionQuery, providers::NutritionixClient, state::AppState};

#[utoipa::path(
    get,
    path = "/api/nutrition",
    params(NutritionQuery),
    tag = "Nutrition",
    responses(
        (status = 200, description = "Nutritionix response, unchanged"),
        (status = 400, description = "Missing 'food' query parameter"),
        (status = 500, description = "Credentials missing or upstream unreachable")
    )
)]
pub async fn nutrition(
    State(state): State<AppState>,
    Query(params): Query<NutritionQuery>,
) -> Result<Json<Value>, ApiError> {
    let food = params
        .food
        .filter(|food| !food.is_empty())
        .ok_or_else(|| ApiError::bad_request("Missing 'food' query parameter"))?;

    let client = NutritionixClient::from_config(&state.config)?;
    let body = client.natural_nutrients(&food).await?;
    Ok(Json(body))
}
