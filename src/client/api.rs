//! HTTP side of the client: one call per endpoint, no retries.

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use super::error::ClientError;
use crate::{
    delete_task_response::DeleteTaskResponse, reorder_tasks_request::ReorderTasksRequest,
    task::Task, task_id::TaskId,
};

pub const DEFAULT_SERVER_URL: &str = "http://localhost:5000";

#[async_trait]
pub trait TaskApi: Send + Sync {
    async fn list(&self) -> Result<Vec<Task>, ClientError>;
    async fn create(&self, task: &Task) -> Result<Task, ClientError>;
    async fn replace(&self, id: TaskId, task: &Task) -> Result<Task, ClientError>;
    async fn delete(&self, id: TaskId) -> Result<(), ClientError>;
    async fn reorder(&self, ids: &[TaskId]) -> Result<Vec<Task>, ClientError>;
}

#[derive(Debug, Clone)]
pub struct HttpTaskApi {
    client: reqwest::Client,
    tasks_url: String,
}

impl HttpTaskApi {
    /// `server_url` is the origin, e.g. `http://localhost:5000`.
    pub fn new(server_url: &str) -> Self {
        Self::with_client(reqwest::Client::new(), server_url)
    }

    pub fn with_client(client: reqwest::Client, server_url: &str) -> Self {
        Self {
            client,
            tasks_url: format!("{}/api/tasks", server_url.trim_end_matches('/')),
        }
    }

    async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ClientError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Status { status: status.as_u16(), body });
        }
        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl TaskApi for HttpTaskApi {
    async fn list(&self) -> Result<Vec<Task>, ClientError> {
        let response = self.client.get(&self.tasks_url).send().await?;
        Self::read_json(response).await
    }

    async fn create(&self, task: &Task) -> Result<Task, ClientError> {
        let response = self.client.post(&self.tasks_url).json(task).send().await?;
        Self::read_json(response).await
    }

    async fn replace(&self, id: TaskId, task: &Task) -> Result<Task, ClientError> {
        let url = format!("{}/{}", self.tasks_url, id);
        let response = self.client.put(url).json(task).send().await?;
        Self::read_json(response).await
    }

    async fn delete(&self, id: TaskId) -> Result<(), ClientError> {
        let url = format!("{}/{}", self.tasks_url, id);
        let response = self.client.delete(url).send().await?;
        let _: DeleteTaskResponse = Self::read_json(response).await?;
        Ok(())
    }

    async fn reorder(&self, ids: &[TaskId]) -> Result<Vec<Task>, ClientError> {
        let url = format!("{}/order", self.tasks_url);
        let body = ReorderTasksRequest { ids: ids.to_vec() };
        let response = self.client.put(url).json(&body).send().await?;
        Self::read_json(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tasks_url_ignores_trailing_slash() {
        assert_eq!(HttpTaskApi::new("http://localhost:5000/").tasks_url, "http://localhost:5000/api/tasks");
        assert_eq!(HttpTaskApi::new(DEFAULT_SERVER_URL).tasks_url, "http://localhost:5000/api/tasks");
    }
}
