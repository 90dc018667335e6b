// Requests
pub mod reorder_tasks_request;

// Responses
pub mod delete_task_response;
pub mod health_response;
