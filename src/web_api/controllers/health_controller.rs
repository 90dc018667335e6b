use axum::{extract::State, Json};

use crate::{
    app_state::SharedState,
    health_response::HealthResponse,
    web_api::{api_error::ApiError, controllers::with_store},
};

pub struct HealthController {}

impl HealthController {
    pub async fn get(State(state): State<SharedState>) -> Result<Json<HealthResponse>, ApiError> {
        let tasks = with_store(&state, |ctx| ctx.list_tasks().map(|tasks| tasks.len())).await?;
        Ok(Json(HealthResponse { status: "ok".to_string(), tasks }))
    }
}
