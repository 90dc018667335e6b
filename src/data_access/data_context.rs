//! Task collection ↔ redb.
//!
//! Each task lives under a slot key. Slots ascend in collection order, so
//! iterating the table yields the list as the client sees it. Removal
//! leaves gaps; a reorder rewrites them densely. Ids are not unique: the `task_id_index` multimap maps an id to
//! every slot holding it.

use redb::{
    Database, MultimapTableDefinition, ReadableMultimapTable, ReadableTable, TableDefinition,
};
use std::{fs, io, path::Path, sync::Arc};
use thiserror::Error;

use crate::{task::Task, task_id::TaskId};

const TASKS_TABLE: TableDefinition<u64, &[u8]> = TableDefinition::new("tasks");
const TASK_ID_INDEX: MultimapTableDefinition<i64, u64> = MultimapTableDefinition::new("task_id_index");
const META_TABLE: TableDefinition<&str, u64> = TableDefinition::new("meta");

const NEXT_SLOT: &str = "next_slot";

/// Cloneable handle to the task database (Arc inside).
#[derive(Clone)]
pub struct DataContext {
    db: Arc<Database>,
}

impl DataContext {
    /// Open (or create) the database file and make sure every table exists.
    pub fn new(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let db = Database::create(path.as_ref())?;
        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(TASKS_TABLE)?;
            let _ = write_txn.open_multimap_table(TASK_ID_INDEX)?;
            let _ = write_txn.open_table(META_TABLE)?;
        }
        write_txn.commit()?;
        Ok(DataContext { db: Arc::new(db) })
    }

    /// The whole collection, in order.
    pub fn list_tasks(&self) -> Result<Vec<Task>, StoreError> {
        let read_txn = self.db.begin_read()?;
        let tasks_table = read_txn.open_table(TASKS_TABLE)?;

        let mut tasks = Vec::new();
        for entry in tasks_table.iter()? {
            let (_, value) = entry?;
            tasks.push(decode(value.value())?);
        }
        Ok(tasks)
    }

    pub fn is_empty(&self) -> Result<bool, StoreError> {
        let read_txn = self.db.begin_read()?;
        let tasks_table = read_txn.open_table(TASKS_TABLE)?;
        let empty = tasks_table.iter()?.next().is_none();
        Ok(empty)
    }

    /// Append to the end of the collection. No uniqueness or field checks.
    pub fn append_task(&self, task: &Task) -> Result<(), StoreError> {
        self.append_tasks(std::slice::from_ref(task))
    }

    pub fn append_tasks(&self, tasks: &[Task]) -> Result<(), StoreError> {
        let write_txn = self.db.begin_write()?;
        {
            let mut tasks_table = write_txn.open_table(TASKS_TABLE)?;
            let mut id_index = write_txn.open_multimap_table(TASK_ID_INDEX)?;
            let mut meta = write_txn.open_table(META_TABLE)?;

            let mut slot = next_slot(&meta)?;
            for task in tasks {
                let task_bytes = encode(task)?;
                tasks_table.insert(slot, task_bytes.as_slice())?;
                id_index.insert(task.id.get(), slot)?;
                tracing::debug!(id = %task.id, slot, "appended task");
                slot += 1;
            }
            meta.insert(NEXT_SLOT, slot)?;
        }
        write_txn.commit()?;
        Ok(())
    }

    /// Overwrite the first entry whose id is `id`, keeping its position.
    /// Returns false (and changes nothing) when no entry matches.
    pub fn replace_task(&self, id: TaskId, task: &Task) -> Result<bool, StoreError> {
        let write_txn = self.db.begin_write()?;
        let replaced;
        {
            let mut tasks_table = write_txn.open_table(TASKS_TABLE)?;
            let mut id_index = write_txn.open_multimap_table(TASK_ID_INDEX)?;

            let first_slot = {
                let mut slots = id_index.get(id.get())?;
                match slots.next() {
                    Some(slot) => Some(slot?.value()),
                    None => None,
                }
            };

            replaced = match first_slot {
                Some(slot) => {
                    let task_bytes = encode(task)?;
                    tasks_table.insert(slot, task_bytes.as_slice())?;
                    if task.id != id {
                        id_index.remove(id.get(), slot)?;
                        id_index.insert(task.id.get(), slot)?;
                    }
                    tracing::debug!(%id, slot, "replaced task");
                    true
                }
                None => false,
            };
        }
        write_txn.commit()?;
        Ok(replaced)
    }

    /// Remove every entry whose id is `id`. Returns how many went.
    pub fn remove_tasks(&self, id: TaskId) -> Result<usize, StoreError> {
        let write_txn = self.db.begin_write()?;
        let removed;
        {
            let mut tasks_table = write_txn.open_table(TASKS_TABLE)?;
            let mut id_index = write_txn.open_multimap_table(TASK_ID_INDEX)?;

            let slots = {
                let mut slots = Vec::new();
                for slot in id_index.remove_all(id.get())? {
                    slots.push(slot?.value());
                }
                slots
            };
            for slot in &slots {
                tasks_table.remove(*slot)?;
            }
            removed = slots.len();
            tracing::debug!(%id, removed, "removed tasks");
        }
        write_txn.commit()?;
        Ok(removed)
    }

    /// Rewrite the collection so listed ids come first, in the given order.
    /// Unlisted entries follow, keeping their relative order.
    pub fn reorder_tasks(&self, ids: &[TaskId]) -> Result<Vec<Task>, StoreError> {
        let mut rank = std::collections::HashMap::with_capacity(ids.len());
        for (position, id) in ids.iter().enumerate() {
            rank.entry(*id).or_insert(position);
        }

        let write_txn = self.db.begin_write()?;
        let mut tasks = {
            let tasks_table = write_txn.open_table(TASKS_TABLE)?;
            let mut tasks = Vec::new();
            for entry in tasks_table.iter()? {
                let (_, value) = entry?;
                tasks.push(decode(value.value())?);
            }
            tasks
        };
        tasks.sort_by_key(|task: &Task| rank.get(&task.id).copied().unwrap_or(ids.len()));

        write_txn.delete_table(TASKS_TABLE)?;
        write_txn.delete_multimap_table(TASK_ID_INDEX)?;
        {
            let mut tasks_table = write_txn.open_table(TASKS_TABLE)?;
            let mut id_index = write_txn.open_multimap_table(TASK_ID_INDEX)?;
            let mut meta = write_txn.open_table(META_TABLE)?;

            for (slot, task) in (0u64..).zip(tasks.iter()) {
                let task_bytes = encode(task)?;
                tasks_table.insert(slot, task_bytes.as_slice())?;
                id_index.insert(task.id.get(), slot)?;
            }
            meta.insert(NEXT_SLOT, tasks.len() as u64)?;
        }
        write_txn.commit()?;
        tracing::debug!(count = tasks.len(), "reordered tasks");
        Ok(tasks)
    }

    /// Seed an empty store from a JSON array file written by the
    /// flat-file server. Returns how many tasks were imported.
    pub fn import_legacy_file(&self, path: impl AsRef<Path>) -> Result<usize, StoreError> {
        let path = path.as_ref();
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(0),
            Err(e) => return Err(StoreError::Import(format!("{}: {e}", path.display()))),
        };
        if !self.is_empty()? {
            tracing::debug!(path = %path.display(), "store already populated, skipping legacy import");
            return Ok(0);
        }

        let tasks: Vec<Task> = serde_json::from_str(&content)
            .map_err(|e| StoreError::Import(format!("{}: {e}", path.display())))?;
        self.append_tasks(&tasks)?;
        Ok(tasks.len())
    }

    /// The collection as a pretty-printed JSON array.
    pub fn export_json(&self) -> Result<String, StoreError> {
        let tasks = self.list_tasks()?;
        serde_json::to_string_pretty(&tasks).map_err(|e| StoreError::Encode(e.to_string()))
    }
}

fn next_slot(meta: &impl ReadableTable<&'static str, u64>) -> Result<u64, StoreError> {
    Ok(meta.get(NEXT_SLOT)?.map(|slot| slot.value()).unwrap_or(0))
}

fn encode(task: &Task) -> Result<Vec<u8>, StoreError> {
    serde_json::to_vec(task).map_err(|e| StoreError::Encode(e.to_string()))
}

fn decode(bytes: &[u8]) -> Result<Task, StoreError> {
    serde_json::from_slice(bytes).map_err(|e| StoreError::Decode(e.to_string()))
}

// ── Errors ─────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("redb: {0}")]
    Redb(String),
    #[error("decode: {0}")]
    Decode(String),
    #[error("encode: {0}")]
    Encode(String),
    #[error("legacy import: {0}")]
    Import(String),
}

// redb 2.x has many error types. Blanket them all into StoreError::Redb.
macro_rules! from_redb {
    ($($t:ty),*) => {
        $(impl From<$t> for StoreError {
            fn from(e: $t) -> Self { StoreError::Redb(e.to_string()) }
        })*
    };
}

from_redb!(
    redb::Error,
    redb::DatabaseError,
    redb::TableError,
    redb::TransactionError,
    redb::StorageError,
    redb::CommitError
);

// ── Tests ──────────────────────────────────────────────────────
