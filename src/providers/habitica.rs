// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Habitica task API.
//!
//! Every request carries the `x-api-user` / `x-api-key` credential pair and
//! the `x-client` identifier Habitica asks third-party tools to send.

use reqwest::{
    header::{HeaderValue, CONTENT_TYPE},
    Client, Request, RequestBuilder,
};
use serde_json::{json, Value};

use super::{build_http_client, join_url, relay_json, UpstreamError};
use crate::{
    config::{Config, HabiticaCredentials},
    models::ScoreDirection,
};

pub const MISSING_CREDENTIALS: &str = "Habitica credentials not configured";

#[derive(Debug, Clone)]
pub struct HabiticaClient {
    api_base_url: String,
    client_id: String,
    credentials: HabiticaCredentials,
    http: Client,
}

impl HabiticaClient {
    pub fn from_config(config: &Config) -> Result<Self, UpstreamError> {
        let credentials = config
            .habitica
            .clone()
            .ok_or(UpstreamError::MissingCredentials(MISSING_CREDENTIALS))?;

        Ok(Self {
            api_base_url: config.habitica_api_base.clone(),
            client_id: config.habitica_client.clone(),
            credentials,
            http: build_http_client(config.verify_ssl)?,
        })
    }

    /// `GET /tasks/user`, optionally narrowed to one task type.
    pub async fn list_tasks(&self, task_type: Option<&str>) -> Result<Value, UpstreamError> {
        let mut request = self.http.get(join_url(&self.api_base_url, "/tasks/user"));
        if let Some(task_type) = task_type {
            request = request.query(&[("type", task_type)]);
        }
        self.send(request).await
    }

    /// `POST /tasks/user` with a caller-built task object.
    pub async fn create_task(&self, task: &Value) -> Result<Value, UpstreamError> {
        let request = self
            .http
            .post(join_url(&self.api_base_url, "/tasks/user"))
            .json(task);
        self.send(request).await
    }

    /// `PUT /tasks/{task_id}` with the fields to change.
    pub async fn update_task(
        &self,
        task_id: &str,
        changes: &Value,
    ) -> Result<Value, UpstreamError> {
        let path = format!("/tasks/{task_id}");
        let request = self
            .http
            .put(join_url(&self.api_base_url, &path))
            .json(changes);
        self.send(request).await
    }

    /// `DELETE /tasks/{task_id}`.
    pub async fn delete_task(&self, task_id: &str) -> Result<Value, UpstreamError> {
        let path = format!("/tasks/{task_id}");
        let request = self.http.delete(join_url(&self.api_base_url, &path));
        self.send(request).await
    }

    /// `POST /tasks/{task_id}/score/{direction}`.
    ///
    /// A body is only sent when `amount` is given.
    pub async fn score_task(
        &self,
        task_id: &str,
        direction: ScoreDirection,
        amount: Option<Value>,
    ) -> Result<Value, UpstreamError> {
        let path = format!("/tasks/{task_id}/score/{}", direction.as_str());
        let mut request = self.http.post(join_url(&self.api_base_url, &path));
        if let Some(amount) = amount {
            request = request.json(&json!({ "amount": amount }));
        }
        self.send(request).await
    }

    /// Attach the credential headers. `Content-Type` is only added when no
    /// JSON body has set it already.
    fn prepare(&self, request: RequestBuilder) -> Result<Request, UpstreamError> {
        let mut request = request
            .header("x-api-user", &self.credentials.user_id)
            .header("x-api-key", &self.credentials.api_token)
            .header("x-client", &self.client_id)
            .build()
            .map_err(|e| UpstreamError::Transport(e.to_string()))?;
        request
            .headers_mut()
            .entry(CONTENT_TYPE)
            .or_insert(HeaderValue::from_static("application/json"));
        Ok(request)
    }

    async fn send(&self, request: RequestBuilder) -> Result<Value, UpstreamError> {
        let request = self.prepare(request)?;
        let response = self
            .http
            .execute(request)
            .await
            .map_err(|e| UpstreamError::Transport(e.to_string()))?;

        relay_json(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use mockito::Matcher;

    fn config(base: &str) -> Config {
        Config {
            habitica: Some(HabiticaCredentials {
                user_id: "user-1".into(),
                api_token: "token-1".into(),
            }),
            habitica_api_base: base.to_string(),
            habitica_client: "showup-tests".into(),
            ..Config::default()
        }
    }

    #[test]
    fn from_config_requires_credentials() {
        assert!(matches!(
            HabiticaClient::from_config(&Config::default()),
            Err(UpstreamError::MissingCredentials(MISSING_CREDENTIALS))
        ));
    }

    #[tokio::test]
    async fn list_tasks_passes_type_filter_and_headers() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/tasks/user")
            .match_query(Matcher::UrlEncoded("type".into(), "dailys".into()))
            .match_header("x-api-user", "user-1")
            .match_header("x-api-key", "token-1")
            .match_header("x-client", "showup-tests")
            .with_status(200)
            .with_body(r#"{"success":true,"data":[]}"#)
            .create_async()
            .await;

        let client = HabiticaClient::from_config(&config(&server.url())).unwrap();
        let body = client.list_tasks(Some("dailys")).await.unwrap();
        assert_eq!(body, json!({ "success": true, "data": [] }));

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn list_tasks_without_type_hits_task_list() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/tasks/user")
            .with_status(200)
            .with_body(r#"{"success":true,"data":[{"id":"t1"}]}"#)
            .create_async()
            .await;

        let client = HabiticaClient::from_config(&config(&server.url())).unwrap();
        client.list_tasks(None).await.unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn score_task_forwards_amount_in_body() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/tasks/task-9/score/down")
            .match_body(Matcher::Json(json!({ "amount": 2 })))
            .with_status(200)
            .with_body(r#"{"success":true,"data":{"delta":-1}}"#)
            .create_async()
            .await;

        let client = HabiticaClient::from_config(&config(&server.url())).unwrap();
        let body = client
            .score_task("task-9", ScoreDirection::Down, Some(json!(2)))
            .await
            .unwrap();
        assert_eq!(body["data"]["delta"], json!(-1));

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn score_task_without_amount_sends_empty_body() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/tasks/task-9/score/up")
            .match_body("")
            .with_status(200)
            .with_body(r#"{"success":true}"#)
            .create_async()
            .await;

        let client = HabiticaClient::from_config(&config(&server.url())).unwrap();
        client
            .score_task("task-9", ScoreDirection::Up, None)
            .await
            .unwrap();

        mock.assert_async().await;
    }

    #[test]
    fn json_requests_carry_a_single_content_type() {
        let client = HabiticaClient::from_config(&config("http://localhost:3000")).unwrap();

        let with_body = client
            .prepare(
                client
                    .http
                    .post("http://localhost:3000/tasks/t1/score/up")
                    .json(&json!({ "amount": 2 })),
            )
            .unwrap();
        let without_body = client
            .prepare(client.http.get("http://localhost:3000/tasks/user"))
            .unwrap();

        for request in [with_body, without_body] {
            let values: Vec<&str> = request
                .headers()
                .get_all(CONTENT_TYPE)
                .iter()
                .map(|value| value.to_str().unwrap())
                .collect();
            assert_eq!(values, vec!["application/json"]);
            assert_eq!(request.headers()["x-api-user"], "user-1");
        }
    }

    #[tokio::test]
    async fn update_task_puts_changes() {
        let changes = json!({ "text": "Floss twice", "priority": 2 });
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("PUT", "/tasks/task-3")
            .match_header("x-api-key", "token-1")
            .match_body(Matcher::Json(changes.clone()))
            .with_status(200)
            .with_body(r#"{"success":true,"data":{"id":"task-3"}}"#)
            .create_async()
            .await;

        let client = HabiticaClient::from_config(&config(&server.url())).unwrap();
        let body = client.update_task("task-3", &changes).await.unwrap();
        assert_eq!(body["data"]["id"], json!("task-3"));

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn delete_task_hits_task_path() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("DELETE", "/tasks/task-3")
            .match_header("x-api-user", "user-1")
            .with_status(200)
            .with_body(r#"{"success":true,"data":{}}"#)
            .create_async()
            .await;

        let client = HabiticaClient::from_config(&config(&server.url())).unwrap();
        let body = client.delete_task("task-3").await.unwrap();
        assert_eq!(body, json!({ "success": true, "data": {} }));

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn upstream_error_status_is_preserved() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/tasks/user")
            .with_status(401)
            .with_body(r#"{"success":false,"error":"NotAuthorized"}"#)
            .create_async()
            .await;

        let client = HabiticaClient::from_config(&config(&server.url())).unwrap();
        match client.create_task(&json!({ "text": "Floss", "type": "daily" })).await {
            Err(UpstreamError::Status { status, body }) => {
                assert_eq!(status, StatusCode::UNAUTHORIZED);
                assert_eq!(body, r#"{"success":false,"error":"NotAuthorized"}"#);
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
