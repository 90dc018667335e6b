use std::sync::Arc;

use crate::data_access::data_context::DataContext;

pub struct AppState {
    pub data_context: DataContext,
}

pub type SharedState = Arc<AppState>;

impl AppState {
    pub fn shared(data_context: DataContext) -> SharedState {
        Arc::new(AppState { data_context })
    }
}
