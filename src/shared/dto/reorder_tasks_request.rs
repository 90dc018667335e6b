use serde::{Deserialize, Serialize};

use crate::task_id::TaskId;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReorderTasksRequest {
    pub ids: Vec<TaskId>,
}
