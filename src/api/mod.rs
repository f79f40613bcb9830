// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    http::HeaderValue,
    routing::{get, post, put},
    Router,
};
use tower_http::{
    cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use tracing::warn;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    config::AllowedOrigins,
    models::{
        CreateHabitRequest, CreateTaskRequest, DbHealthResponse, Habit, HealthResponse,
        ScoreDirection, ScoreTaskRequest, UpdateTaskRequest,
    },
    state::AppState,
};

pub mod assets;
pub mod habitica;
pub mod habits;
pub mod health;
pub mod nutrition;

pub fn router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.allowed_origins);
    let static_dir = state.config.static_dir.clone();

    let api_routes = Router::new()
        .route("/health", get(health::health))
        .route("/db/health", get(health::db_health))
        .route("/nutrition", get(nutrition::nutrition))
        .route(
            "/habitica/tasks",
            get(habitica::list_tasks).post(habitica::create_task),
        )
        .route(
            "/habitica/tasks/{task_id}",
            put(habitica::update_task).delete(habitica::delete_task),
        )
        .route(
            "/habitica/tasks/{task_id}/score",
            post(habitica::score_task),
        )
        .route(
            "/habits",
            get(habits::list_habits).post(habits::create_habit),
        )
        .with_state(state);

    let mut app = Router::new()
        .nest("/api", api_routes)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()));

    if let Some(frontend) = assets::static_routes(&static_dir) {
        app = app.merge(frontend);
    }

    app.layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(cors)
}

/// A `*` allow-list is fully permissive. An explicit list allows credentials
/// and mirrors the requested method and headers back.
fn cors_layer(origins: &AllowedOrigins) -> CorsLayer {
    match origins {
        AllowedOrigins::Any => CorsLayer::permissive(),
        AllowedOrigins::List(origins) => {
            let origins: Vec<HeaderValue> = origins
                .iter()
                .filter_map(|origin| match HeaderValue::from_str(origin) {
                    Ok(value) => Some(value),
                    Err(_) => {
                        warn!(origin = %origin, "Ignoring invalid CORS origin");
                        None
                    }
                })
                .collect();

            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods(AllowMethods::mirror_request())
                .allow_headers(AllowHeaders::mirror_request())
                .allow_credentials(true)
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "ShowUp API",
        description = "Nutrition, habits, and integrations API for the ShowUp app."
    ),
    paths(
        health::health,
        health::db_health,
        nutrition::nutrition,
        habitica::list_tasks,
        habitica::create_task,
        habitica::update_task,
        habitica::delete_task,
        habitica::score_task,
        habits::list_habits,
        habits::create_habit
    ),
    components(
        schemas(
            Habit,
            CreateHabitRequest,
            CreateTaskRequest,
            ScoreTaskRequest,
            UpdateTaskRequest,
            ScoreDirection,
            HealthResponse,
            DbHealthResponse
        )
    ),
    tags(
        (name = "Health", description = "Liveness and database connectivity"),
        (name = "Nutrition", description = "Nutritionix lookup proxy"),
        (name = "Habitica", description = "Habitica task proxy"),
        (name = "Habits", description = "Locally stored habits")
    )
)]
struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{header, Method, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::{
        config::Config,
        storage::{DocumentStore, InMemoryStore},
    };

    fn app_with_store() -> Router {
        let store: Arc<dyn DocumentStore> = Arc::new(InMemoryStore::new("testdb"));
        router(AppState::new(Config::default(), Some(store)))
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn json_request(method: Method, uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn router_builds_with_all_routes() {
        let app = router(AppState::default());
        let _ = app.into_make_service();
    }

    #[tokio::test]
    async fn health_routes_respond() {
        let app = router(AppState::default());

        let (status, body) = send(&app, get_request("/api/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "status": "ok" }));

        let (status, body) = send(&app, get_request("/api/db/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "connected": false, "error": "db not initialized" }));
    }

    #[tokio::test]
    async fn habits_round_trip_over_http() {
        let app = app_with_store();

        let (status, body) = send(&app, get_request("/api/habits")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([]));

        let (status, created) = send(
            &app,
            json_request(
                Method::POST,
                "/api/habits",
                r#"{"name":"Test Habit","notes":"n"}"#,
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(created["name"], "Test Habit");
        assert_eq!(created["notes"], "n");
        assert!(created["createdAt"].is_string());
        assert!(created.get("_id").is_none());

        let (status, listed) = send(&app, get_request("/api/habits")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(listed, json!([created]));
    }

    #[tokio::test]
    async fn malformed_bodies_are_bad_requests() {
        let app = app_with_store();

        let (status, body) =
            send(&app, json_request(Method::POST, "/api/habits", "{not json")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["detail"].is_string());

        let (status, body) =
            send(&app, json_request(Method::POST, "/api/habits", r#"{"notes":"x"}"#)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "detail": "Missing 'name'" }));

        let (status, listed) = send(&app, get_request("/api/habits")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(listed, json!([]));
    }

    #[tokio::test]
    async fn sideways_score_is_rejected() {
        let app = router(AppState::default());
        let (status, body) = send(
            &app,
            json_request(
                Method::POST,
                "/api/habitica/tasks/abc/score",
                r#"{"direction":"sideways"}"#,
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "detail": "'direction' must be 'up' or 'down'" }));
    }

    #[tokio::test]
    async fn task_update_requires_object_body() {
        let app = router(AppState::default());
        let (status, body) = send(
            &app,
            json_request(Method::PUT, "/api/habitica/tasks/abc", "[1, 2]"),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["detail"].is_string());
    }

    #[tokio::test]
    async fn nutrition_without_food_is_bad_request() {
        let app = router(AppState::default());
        let (status, body) = send(&app, get_request("/api/nutrition")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "detail": "Missing 'food' query parameter" }));
    }

    #[tokio::test]
    async fn responses_carry_request_id() {
        let app = router(AppState::default());
        let response = app.oneshot(get_request("/api/health")).await.unwrap();
        assert!(response.headers().contains_key("x-request-id"));
    }

    #[tokio::test]
    async fn root_is_not_routed_without_frontend_bundle() {
        let config = Config {
            static_dir: "/nonexistent/showup/static".into(),
            ..Config::default()
        };
        let app = router(AppState::new(config, None));
        let response = app.oneshot(get_request("/")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn explicit_origins_are_allowed_with_credentials() {
        let config = Config {
            allowed_origins: AllowedOrigins::List(vec!["http://localhost:5173".into()]),
            ..Config::default()
        };
        let app = router(AppState::new(config, None));

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/api/health")
                    .header(header::ORIGIN, "http://localhost:5173")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(
            response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN),
            Some(&HeaderValue::from_static("http://localhost:5173"))
        );
        assert_eq!(
            response
                .headers()
                .get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS),
            Some(&HeaderValue::from_static("true"))
        );

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/health")
                    .header(header::ORIGIN, "http://evil.example")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert!(response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .is_none());
    }
}
