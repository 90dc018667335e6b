use std::time::Duration;

use anyhow::Context;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use taskboard::{
    client::{
        api::{HttpTaskApi, TaskApi, DEFAULT_SERVER_URL},
        reminder::{reminder_ticker, REMINDER_INTERVAL},
        store::TaskStore,
    },
    tag::Tag,
    task::Task,
    task_id::TaskId,
    task_priority::TaskPriority,
    telemetry,
};

#[derive(Debug, Parser)]
#[command(name = "taskctl", version, about = "Command-line client for the taskboard server")]
struct Cli {
    /// Server origin
    #[arg(long, env = "TASKBOARD_URL", default_value = DEFAULT_SERVER_URL)]
    server: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Show tasks, optionally narrowed by a search term
    List {
        #[arg(long, short)]
        search: Option<String>,
    },
    /// Create a task
    Add {
        text: String,
        #[arg(long, short, default_value_t = TaskPriority::Medium)]
        priority: TaskPriority,
        /// Due date, YYYY-MM-DD
        #[arg(long)]
        due: Option<NaiveDate>,
        #[arg(long = "tag", short)]
        tags: Vec<Tag>,
    },
    /// Change a task's text, priority, due date or tags
    Edit {
        id: TaskId,
        #[arg(long)]
        text: Option<String>,
        #[arg(long, short)]
        priority: Option<TaskPriority>,
        #[arg(long, conflicts_with = "clear_due")]
        due: Option<NaiveDate>,
        #[arg(long)]
        clear_due: bool,
        /// Add the tag if missing, drop it if present
        #[arg(long = "tag", short)]
        tags: Vec<Tag>,
    },
    /// Flip a task between pending and completed
    Toggle { id: TaskId },
    /// Delete every task with this id
    Rm { id: TaskId },
    /// Drop one task onto another's position
    Move { dragged: TaskId, target: TaskId },
    /// Completion and priority breakdown
    Stats,
    /// Warn about open tasks due within 24 hours
    Remind,
    /// Keep running and repeat the reminder scan
    Watch {
        #[arg(long, default_value_t = REMINDER_INTERVAL.as_secs())]
        interval_secs: u64,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    telemetry::init_tracing("warn");
    let cli = Cli::parse();

    let mut store = TaskStore::new(HttpTaskApi::new(&cli.server));
    let fetched = store.refresh().await;
    if let Err(e) = fetched {
        flush(&mut store);
        return Err(e).with_context(|| format!("cannot reach {}", cli.server));
    }

    let outcome = run(&mut store, cli.command).await;
    flush(&mut store);
    outcome
}

async fn run<A: TaskApi>(store: &mut TaskStore<A>, command: Command) -> anyhow::Result<()> {
    match command {
        Command::List { search } => {
            if let Some(term) = search {
                store.set_search_term(term);
            }
            for task in store.filtered() {
                print_task(task);
            }
        }

        Command::Add { text, priority, due, tags } => {
            let draft = store.draft_mut();
            draft.text = text;
            draft.priority = priority;
            draft.due_date = due;
            for tag in tags {
                draft.toggle_tag(tag);
            }
            let task = store.submit().await?;
            print_task(&task);
        }

        Command::Edit { id, text, priority, due, clear_due, tags } => {
            store.start_edit(id)?;
            let draft = store.draft_mut();
            if let Some(text) = text {
                draft.text = text;
            }
            if let Some(priority) = priority {
                draft.priority = priority;
            }
            if due.is_some() || clear_due {
                draft.due_date = due;
            }
            for tag in tags {
                draft.toggle_tag(tag);
            }
            let task = store.submit().await?;
            print_task(&task);
        }

        Command::Toggle { id } => {
            store.toggle(id).await?;
        }

        Command::Rm { id } => {
            store.remove(id).await?;
        }

        Command::Move { dragged, target } => {
            if !store.move_task(dragged, target).await? {
                println!("nothing to move");
            }
            for task in store.list() {
                print_task(task);
            }
        }

        Command::Stats => {
            let stats = store.analytics();
            println!("{}/{} completed ({}%)", stats.completed, stats.total, stats.completion_percent);
            for (priority, count) in &stats.by_priority {
                println!("  {priority:<6} {count}");
            }
        }

        Command::Remind => {
            if store.check_reminders() == 0 {
                println!("nothing due within 24 hours");
            }
        }

        Command::Watch { interval_secs } => {
            let mut ticker = reminder_ticker(Duration::from_secs(interval_secs.max(1)));
            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        if store.refresh().await.is_ok() {
                            store.check_reminders();
                        }
                        flush(store);
                    }
                    _ = tokio::signal::ctrl_c() => break,
                }
            }
        }
    }
    Ok(())
}

fn print_task(task: &Task) {
    let mark = if task.completed { 'x' } else { ' ' };
    let due = task
        .due_date
        .map(|d| format!("  due {d}"))
        .unwrap_or_default();
    let tags = if task.tags.is_empty() {
        String::new()
    } else {
        let names: Vec<&str> = task.tags.iter().map(Tag::as_str).collect();
        format!("  #{}", names.join(" #"))
    };
    println!("{:>14} [{mark}] {:<6} {}{due}{tags}", task.id, task.priority, task.text);
}

fn flush<A: TaskApi>(store: &mut TaskStore<A>) {
    for notification in store.notifications_mut().drain() {
        println!("{notification}");
    }
}
