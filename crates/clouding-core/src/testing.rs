//! In-memory `ServerApi` used by unit tests.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::api::{ApiResponse, ServerApi};
use crate::error::CoreError;
use crate::models::{Server, ServerAction};

/// Scripted API: each target answers action calls from its own queue, and the
/// last scripted answer repeats once the queue runs dry.
#[derive(Default)]
pub struct ScriptedApi {
    servers: Vec<Server>,
    replies: Mutex<HashMap<String, VecDeque<(u16, Value)>>>,
    failures: Mutex<HashMap<String, CoreError>>,
    list_failure: Mutex<Option<CoreError>>,
    calls: Mutex<Vec<String>>,
    list_calls: Mutex<usize>,
}

impl ScriptedApi {
    pub fn with_servers(ids: &[&str]) -> Self {
        let servers = ids
            .iter()
            .map(|id| {
                serde_json::from_value(json!({"id": id, "status": "Active"}))
                    .expect("valid server")
            })
            .collect();
        Self {
            servers,
            ..Self::default()
        }
    }

    pub fn script(self, target: &str, replies: Vec<(u16, Value)>) -> Self {
        self.replies
            .lock()
            .unwrap()
            .insert(target.to_string(), replies.into());
        self
    }

    /// Make the next action call for `target` fail with `err`.
    pub fn fail(self, target: &str, err: CoreError) -> Self {
        self.failures
            .lock()
            .unwrap()
            .insert(target.to_string(), err);
        self
    }

    /// Make the next `list_servers` call fail with `err`.
    pub fn fail_list(self, err: CoreError) -> Self {
        *self.list_failure.lock().unwrap() = Some(err);
        self
    }

    /// Targets of every action call, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn list_calls(&self) -> usize {
        *self.list_calls.lock().unwrap()
    }
}

pub fn completed(id: &str) -> (u16, Value) {
    (200, json!({"id": id, "status": "completed"}))
}

pub fn in_progress(id: &str) -> (u16, Value) {
    (200, json!({"id": id, "status": "inProgress"}))
}

#[async_trait]
impl ServerApi for ScriptedApi {
    async fn list_servers(&self) -> Result<Vec<Server>, CoreError> {
        *self.list_calls.lock().unwrap() += 1;
        if let Some(err) = self.list_failure.lock().unwrap().take() {
            return Err(err);
        }
        Ok(self.servers.clone())
    }

    async fn get_server(&self, id: &str) -> Result<Server, CoreError> {
        self.servers
            .iter()
            .find(|s| s.id == id)
            .cloned()
            .ok_or_else(|| CoreError::Api {
                url: format!("mock://servers/{}", id),
                status: 404,
                message: "Not Found".to_string(),
                body: None,
            })
    }

    async fn request_action(
        &self,
        id: &str,
        action: ServerAction,
    ) -> Result<ApiResponse, CoreError> {
        self.calls.lock().unwrap().push(id.to_string());
        if let Some(err) = self.failures.lock().unwrap().remove(id) {
            return Err(err);
        }

        let (status, body) = {
            let mut replies = self.replies.lock().unwrap();
            let queue = replies
                .get_mut(id)
                .unwrap_or_else(|| panic!("no script for {}", id));
            if queue.len() > 1 {
                queue.pop_front().expect("non-empty queue")
            } else {
                queue.front().cloned().expect("non-empty queue")
            }
        };

        let url = format!("mock://servers/{}/{}", id, action);
        ApiResponse::from_parts(&url, status, &body.to_string())
    }
}
