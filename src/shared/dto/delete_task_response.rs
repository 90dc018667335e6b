use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteTaskResponse {
    pub success: bool,
}

impl DeleteTaskResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}
