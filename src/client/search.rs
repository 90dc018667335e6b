use crate::task::Task;

/// Case-insensitive substring match on the text or any tag.
/// An empty term matches everything.
pub fn matches(task: &Task, term: &str) -> bool {
    let needle = term.to_lowercase();
    task.text.to_lowercase().contains(&needle)
        || task.tags.iter().any(|tag| tag.as_str().contains(&needle))
}

pub fn filter_tasks<'a>(tasks: &'a [Task], term: &str) -> Vec<&'a Task> {
    tasks.iter().filter(|task| matches(task, term)).collect()
}
