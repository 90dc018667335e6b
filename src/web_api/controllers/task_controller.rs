use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
    Json,
};

use crate::{
    app_state::SharedState, delete_task_response::DeleteTaskResponse,
    reorder_tasks_request::ReorderTasksRequest, task::Task, task_id::TaskId,
    web_api::{api_error::ApiError, controllers::with_store},
};

pub struct TaskController {}

impl TaskController {
    // GET /api/tasks
    pub async fn get_all(State(state): State<SharedState>) -> Result<Json<Vec<Task>>, ApiError> {
        Ok(Json(with_store(&state, |ctx| ctx.list_tasks()).await?))
    }

    // POST /api/tasks
    pub async fn add(
        State(state): State<SharedState>,
        Json(task): Json<Task>,
    ) -> Result<Json<Task>, ApiError> {
        let task = with_store(&state, move |ctx| ctx.append_task(&task).map(|()| task)).await?;
        tracing::info!(id = %task.id, "task added");
        Ok(Json(task))
    }

    // PUT /api/tasks/:id
    //
    // Echoes the submitted task even when no stored task has this id.
    pub async fn replace(
        State(state): State<SharedState>,
        Path(id): Path<i64>,
        Json(task): Json<Task>,
    ) -> Result<Json<Task>, ApiError> {
        let id = TaskId::from(id);
        let (replaced, task) =
            with_store(&state, move |ctx| ctx.replace_task(id, &task).map(|hit| (hit, task))).await?;
        if replaced {
            tracing::info!(%id, "task replaced");
        } else {
            tracing::warn!(%id, "replace target not found, collection unchanged");
        }
        Ok(Json(task))
    }

    // DELETE /api/tasks/:id
    pub async fn delete(
        State(state): State<SharedState>,
        Path(id): Path<i64>,
    ) -> Result<Json<DeleteTaskResponse>, ApiError> {
        let id = TaskId::from(id);
        let removed = with_store(&state, move |ctx| ctx.remove_tasks(id)).await?;
        tracing::info!(%id, removed, "task delete");
        Ok(Json(DeleteTaskResponse::ok()))
    }

    // PUT /api/tasks/order
    pub async fn reorder(
        State(state): State<SharedState>,
        Json(body): Json<ReorderTasksRequest>,
    ) -> Result<Json<Vec<Task>>, ApiError> {
        let tasks = with_store(&state, move |ctx| ctx.reorder_tasks(&body.ids)).await?;
        tracing::info!(count = tasks.len(), "task order saved");
        Ok(Json(tasks))
    }

    // GET /api/tasks/export
    pub async fn export(State(state): State<SharedState>) -> Result<impl IntoResponse, ApiError> {
        let body = with_store(&state, |ctx| ctx.export_json()).await?;
        Ok((
            [
                (header::CONTENT_TYPE, "application/json"),
                (header::CONTENT_DISPOSITION, "attachment; filename=\"tasks.json\""),
            ],
            body,
        ))
    }
}

#[cfg(test)]
mod tests {
    use crate::{app_state::AppState, data_access::data_context::DataContext, map_routes, task::Task};
    use axum::{
        body::Body,
        http::{Method, Request, StatusCode},
        Router,
    };
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tempfile::TempDir;
    use tower::ServiceExt;

    fn test_app() -> (Router, TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let ctx = DataContext::new(dir.path().join("tasks.redb")).unwrap();
        let static_dir = dir.path().join("static");
        (map_routes(AppState::shared(ctx), &static_dir), dir)
    }

    async fn call(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut request = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(v) => {
                request = request.header("content-type", "application/json");
                Body::from(v.to_string())
            }
            None => Body::empty(),
        };
        let response = app.clone().oneshot(request.body(body).unwrap()).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    fn milk() -> Value {
        json!({
            "id": 1718000000000i64,
            "text": "Buy milk",
            "completed": false,
            "priority": "high",
            "dueDate": "2024-06-11",
            "tags": ["shopping"]
        })
    }

    #[tokio::test]
    async fn list_starts_empty() {
        let (app, _dir) = test_app();
        let (status, body) = call(&app, Method::GET, "/api/tasks", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([]));
    }

    #[tokio::test]
    async fn post_echoes_and_appends() {
        let (app, _dir) = test_app();
        let (status, body) = call(&app, Method::POST, "/api/tasks", Some(milk())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, milk());

        let (_, list) = call(&app, Method::GET, "/api/tasks", None).await;
        assert_eq!(list, json!([milk()]));
    }

    #[tokio::test]
    async fn post_does_not_validate_content() {
        let (app, _dir) = test_app();
        let blank = json!({"id": 1, "text": "   "});
        let (status, _) = call(&app, Method::POST, "/api/tasks", Some(blank.clone())).await;
        assert_eq!(status, StatusCode::OK);
        let (status, _) = call(&app, Method::POST, "/api/tasks", Some(blank)).await;
        assert_eq!(status, StatusCode::OK);

        let (_, list) = call(&app, Method::GET, "/api/tasks", None).await;
        assert_eq!(list.as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn put_replaces_matching_task() {
        let (app, _dir) = test_app();
        call(&app, Method::POST, "/api/tasks", Some(milk())).await;

        let mut done = milk();
        done["completed"] = json!(true);
        let (status, body) = call(&app, Method::PUT, "/api/tasks/1718000000000", Some(done.clone())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, done);

        let (_, list) = call(&app, Method::GET, "/api/tasks", None).await;
        assert_eq!(list, json!([done]));
    }

    #[tokio::test]
    async fn put_on_missing_id_reports_success_and_changes_nothing() {
        let (app, _dir) = test_app();
        call(&app, Method::POST, "/api/tasks", Some(milk())).await;

        let ghost = json!({"id": 99, "text": "ghost"});
        let (status, body) = call(&app, Method::PUT, "/api/tasks/99", Some(ghost.clone())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["text"], ghost["text"]);

        let (_, list) = call(&app, Method::GET, "/api/tasks", None).await;
        assert_eq!(list, json!([milk()]));
    }

    #[tokio::test]
    async fn delete_reports_success_even_when_nothing_matched() {
        let (app, _dir) = test_app();
        call(&app, Method::POST, "/api/tasks", Some(milk())).await;

        let (status, body) = call(&app, Method::DELETE, "/api/tasks/12345", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"success": true}));
        let (_, list) = call(&app, Method::GET, "/api/tasks", None).await;
        assert_eq!(list.as_array().unwrap().len(), 1);

        let (_, body) = call(&app, Method::DELETE, "/api/tasks/1718000000000", None).await;
        assert_eq!(body, json!({"success": true}));
        let (_, list) = call(&app, Method::GET, "/api/tasks", None).await;
        assert_eq!(list, json!([]));
    }

    #[tokio::test]
    async fn delete_removes_all_duplicates() {
        let (app, _dir) = test_app();
        call(&app, Method::POST, "/api/tasks", Some(json!({"id": 5, "text": "a"}))).await;
        call(&app, Method::POST, "/api/tasks", Some(json!({"id": 5, "text": "b"}))).await;
        call(&app, Method::POST, "/api/tasks", Some(json!({"id": 6, "text": "c"}))).await;

        call(&app, Method::DELETE, "/api/tasks/5", None).await;
        let (_, list) = call(&app, Method::GET, "/api/tasks", None).await;
        let tasks: Vec<Task> = serde_json::from_value(list).unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].text, "c");
    }

    #[tokio::test]
    async fn non_numeric_id_is_rejected() {
        let (app, _dir) = test_app();
        let (status, _) = call(&app, Method::DELETE, "/api/tasks/abc", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn malformed_body_is_rejected() {
        let (app, _dir) = test_app();
        let (status, _) = call(&app, Method::POST, "/api/tasks", Some(json!({"text": "no id"}))).await;
        assert!(status.is_client_error());
        let (_, list) = call(&app, Method::GET, "/api/tasks", None).await;
        assert_eq!(list, json!([]));
    }

    #[tokio::test]
    async fn order_endpoint_persists_new_order() {
        let (app, _dir) = test_app();
        for (id, text) in [(1, "a"), (2, "b"), (3, "c")] {
            call(&app, Method::POST, "/api/tasks", Some(json!({"id": id, "text": text}))).await;
        }

        let (status, body) =
            call(&app, Method::PUT, "/api/tasks/order", Some(json!({"ids": [3, 1, 2]}))).await;
        assert_eq!(status, StatusCode::OK);
        let (_, list) = call(&app, Method::GET, "/api/tasks", None).await;
        assert_eq!(body, list);
        let texts: Vec<&str> = list.as_array().unwrap().iter().map(|t| t["text"].as_str().unwrap()).collect();
        assert_eq!(texts, ["c", "a", "b"]);
    }

    #[tokio::test]
    async fn export_and_health() {
        let (app, _dir) = test_app();
        call(&app, Method::POST, "/api/tasks", Some(milk())).await;

        let (status, exported) = call(&app, Method::GET, "/api/tasks/export", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(exported, json!([milk()]));

        let (status, health) = call(&app, Method::GET, "/api/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(health, json!({"status": "ok", "tasks": 1}));
    }
}
