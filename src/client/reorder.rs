use crate::{task::Task, task_id::TaskId};

/// Drop `dragged` onto `target`: take it out of the list and insert it at
/// the index `target` had before the removal. Dragging downwards therefore
/// lands after the target, upwards before it.
///
/// Returns false, leaving the list alone, when the ids are equal or either
/// is missing.
pub fn move_task(tasks: &mut Vec<Task>, dragged: TaskId, target: TaskId) -> bool {
    if dragged == target {
        return false;
    }
    let from = tasks.iter().position(|t| t.id == dragged);
    let to = tasks.iter().position(|t| t.id == target);
    match (from, to) {
        (Some(from), Some(to)) => {
            let task = tasks.remove(from);
            tasks.insert(to, task);
            true
        }
        _ => false,
    }
}
