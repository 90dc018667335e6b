use axum::{routing::get, Router};

use crate::{app_state::SharedState, health_controller::HealthController};

pub const ROUTER_PATH: &str = "/api/health";

pub fn get_router(app_state: SharedState) -> Router {
    Router::new()
        .route(ROUTER_PATH, get(HealthController::get))
        .with_state(app_state)
}
