use std::path::Path;

use taskboard::{
    app_state::AppState,
    client::{
        api::{HttpTaskApi, TaskApi},
        draft::Draft,
        notification::Severity,
        store::TaskStore,
    },
    data_access::data_context::DataContext,
    map_routes,
    tag::Tag,
    task::Task,
    task_id::TaskId,
    task_priority::TaskPriority,
};
use tempfile::TempDir;

async fn spawn_server(dir: &TempDir) -> String {
    let data_context = DataContext::new(dir.path().join("tasks.redb")).unwrap();
    let app = map_routes(AppState::shared(data_context), Path::new("does-not-exist"));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

#[tokio::test(flavor = "multi_thread")]
async fn store_drives_a_live_server() {
    let dir = TempDir::new().unwrap();
    let url = spawn_server(&dir).await;
    let mut store = TaskStore::new(HttpTaskApi::new(&url));

    store.refresh().await.unwrap();
    assert!(store.list().is_empty());

    let mut draft = Draft::new("Buy milk");
    draft.priority = TaskPriority::High;
    draft.toggle_tag(Tag::Shopping);
    let milk = store.add(draft).await.unwrap();
    let call = store.add(Draft::new("Call mom")).await.unwrap();
    assert_ne!(milk.id, call.id);
    assert_eq!(store.list().len(), 2);
    assert_eq!(store.list()[0].tags, vec![Tag::Shopping]);

    let toggled = store.toggle(milk.id).await.unwrap();
    assert!(toggled.completed);
    assert!(store.get(milk.id).unwrap().completed);
    assert_eq!(
        store.notifications().last().unwrap().message,
        "Task \"Buy milk\" marked as completed."
    );

    assert!(store.move_task(call.id, milk.id).await.unwrap());
    let order: Vec<TaskId> = store.list().iter().map(|t| t.id).collect();
    assert_eq!(order, vec![call.id, milk.id]);

    // A fresh client sees the saved order.
    let mut other = TaskStore::new(HttpTaskApi::new(&url));
    other.refresh().await.unwrap();
    let order: Vec<TaskId> = other.list().iter().map(|t| t.id).collect();
    assert_eq!(order, vec![call.id, milk.id]);

    store.remove(milk.id).await.unwrap();
    assert_eq!(store.list().len(), 1);
    assert_eq!(store.analytics().total, 1);
    assert!(store
        .notifications()
        .iter()
        .all(|n| n.severity != Severity::Error));
}

#[tokio::test(flavor = "multi_thread")]
async fn http_api_round_trips_raw_calls() {
    let dir = TempDir::new().unwrap();
    let url = spawn_server(&dir).await;
    let api = HttpTaskApi::new(&format!("{url}/"));

    let task = Task::new(TaskId(7), "Read book");
    assert_eq!(api.create(&task).await.unwrap(), task);

    let mut renamed = task.clone();
    renamed.text = "Read two books".into();
    api.replace(TaskId(7), &renamed).await.unwrap();
    assert_eq!(api.list().await.unwrap(), vec![renamed]);

    // Deleting an unknown id is still a success.
    api.delete(TaskId(99)).await.unwrap();
    api.delete(TaskId(7)).await.unwrap();
    assert!(api.list().await.unwrap().is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn unreachable_server_raises_fetch_notification() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let mut store = TaskStore::new(HttpTaskApi::new(&format!("http://{addr}")));
    assert!(store.refresh().await.is_err());
    let notifications = store.notifications();
    let latest = notifications.last().unwrap();
    assert_eq!(latest.severity, Severity::Error);
    assert_eq!(latest.message, "Failed to fetch tasks.");
}
