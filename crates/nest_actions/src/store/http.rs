//! REST client for the project API.
//!
//! Every response is wrapped in `{success, data, message, error}`.

use async_trait::async_trait;
use nest_core::{List, Project, Task};
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::{ListPatch, NewList, NewTask, ProjectStore, StoreError, TaskPatch};

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    #[serde(default)]
    success: bool,
    data: Option<T>,
    message: Option<String>,
    error: Option<String>,
}

impl<T> Envelope<T> {
    fn failure_text(&self) -> String {
        self.error
            .clone()
            .or_else(|| self.message.clone())
            .unwrap_or_else(|| "Request was not successful".to_string())
    }
}

pub struct HttpProjectStore {
    base_url: String,
    token: Option<String>,
    client: Client,
}

impl HttpProjectStore {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            base_url,
            token: None,
            client: Client::new(),
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}/{}", self.base_url, path);
        let builder = self.client.request(method, url);
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, StoreError> {
        let envelope = self.send_envelope::<T>(builder).await?;
        envelope
            .data
            .ok_or_else(|| StoreError::InvalidResponse("response carried no data".to_string()))
    }

    async fn send_unit(&self, builder: RequestBuilder) -> Result<(), StoreError> {
        self.send_envelope::<serde_json::Value>(builder).await.map(|_| ())
    }

    async fn send_envelope<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
    ) -> Result<Envelope<T>, StoreError> {
        let response = builder.send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(status_error(response).await);
        }

        let text = response.text().await?;
        if text.trim().is_empty() {
            return Ok(Envelope {
                success: true,
                data: None,
                message: None,
                error: None,
            });
        }

        let envelope: Envelope<T> = serde_json::from_str(&text)
            .map_err(|e| StoreError::InvalidResponse(e.to_string()))?;
        if !envelope.success {
            return Err(StoreError::Rejected(envelope.failure_text()));
        }
        Ok(envelope)
    }

    fn with_body<B: Serialize>(&self, method: Method, path: &str, body: &B) -> RequestBuilder {
        self.request(method, path).json(body)
    }
}

async fn status_error(response: Response) -> StoreError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<Envelope<serde_json::Value>>(&body)
        .ok()
        .and_then(|env| env.error.or(env.message))
        .unwrap_or(body);
    StoreError::Status { status, message }
}

#[async_trait]
impl ProjectStore for HttpProjectStore {
    async fn fetch_project(&self, project_uid: &str) -> Result<Project, StoreError> {
        let path = format!("projects/{}", project_uid);
        self.send(self.request(Method::GET, &path)).await
    }

    async fn create_list(&self, list: NewList) -> Result<List, StoreError> {
        self.send(self.with_body(Method::POST, "lists", &list)).await
    }

    async fn update_list(&self, list_uid: &str, patch: ListPatch) -> Result<List, StoreError> {
        let path = format!("lists/{}", list_uid);
        self.send(self.with_body(Method::PATCH, &path, &patch)).await
    }

    async fn delete_list(&self, list_uid: &str) -> Result<(), StoreError> {
        let path = format!("lists/{}", list_uid);
        self.send_unit(self.request(Method::DELETE, &path)).await
    }

    async fn create_task(&self, task: NewTask) -> Result<Task, StoreError> {
        self.send(self.with_body(Method::POST, "tasks", &task)).await
    }

    async fn update_task(&self, task_uid: &str, patch: TaskPatch) -> Result<Task, StoreError> {
        let path = format!("tasks/{}", task_uid);
        self.send(self.with_body(Method::PATCH, &path, &patch)).await
    }

    async fn delete_task(&self, task_uid: &str) -> Result<(), StoreError> {
        let path = format!("tasks/{}", task_uid);
        self.send_unit(self.request(Method::DELETE, &path)).await
    }
}
