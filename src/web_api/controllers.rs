pub mod health_controller;
pub mod task_controller;

use crate::{
    app_state::SharedState,
    data_access::data_context::{DataContext, StoreError},
    web_api::api_error::ApiError,
};

/// Run a redb call on the blocking pool.
pub(crate) async fn with_store<T, F>(state: &SharedState, f: F) -> Result<T, ApiError>
where
    F: FnOnce(DataContext) -> Result<T, StoreError> + Send + 'static,
    T: Send + 'static,
{
    let data_context = state.data_context.clone();
    Ok(tokio::task::spawn_blocking(move || f(data_context)).await??)
}
