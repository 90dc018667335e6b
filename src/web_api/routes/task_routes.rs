use axum::{routing::{get, put}, Router};

use crate::{app_state::SharedState, task_controller::TaskController};

pub const ROUTER_PATH: &str = "/api/tasks";

pub fn get_router(app_state: SharedState) -> Router {
    Router::new()
        .route(ROUTER_PATH, get(TaskController::get_all).post(TaskController::add))
        .route(format!("{}/order", ROUTER_PATH).as_str(), put(TaskController::reorder))
        .route(format!("{}/export", ROUTER_PATH).as_str(), get(TaskController::export))
        .route(
            format!("{}/:id", ROUTER_PATH).as_str(),
            put(TaskController::replace).delete(TaskController::delete),
        )
        .with_state(app_state)
}
