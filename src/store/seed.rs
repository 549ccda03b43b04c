use crate::errors::StorageError;
use crate::todo::{NewTodo, TodoId};
use serde::Deserialize;
use std::path::Path;

use super::MemoryTodoStore;

/// One entry of a seed file. `_id` is optional; when given it must be a 24-char hex id.
#[derive(Debug, Clone, Deserialize)]
pub struct SeedTodo {
    #[serde(rename = "_id", default)]
    pub id: Option<TodoId>,
    pub owner: String,
    pub status: bool,
    pub body: String,
    pub category: String,
}

/// Parses a JSON array of todos.
///
/// # Errors
/// Returns `StorageError::Seed` if the text is not a JSON array of todo objects.
pub fn parse_seed(json: &str) -> Result<Vec<SeedTodo>, StorageError> {
    serde_json::from_str(json).map_err(|e| StorageError::Seed(e.to_string()))
}

/// Reads and parses a seed file.
///
/// # Errors
/// Returns `StorageError::Seed` if the file cannot be read or parsed.
pub fn load_seed_file(path: &Path) -> Result<Vec<SeedTodo>, StorageError> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| StorageError::Seed(format!("{}: {e}", path.display())))?;
    parse_seed(&text)
}

impl MemoryTodoStore {
    /// Inserts every seed entry, keeping explicit ids.
    ///
    /// # Errors
    /// Returns `StorageError::DuplicateId` on the first id clash; entries before it stay inserted.
    pub fn seed(&self, todos: Vec<SeedTodo>) -> Result<usize, StorageError> {
        let mut inserted = 0usize;
        for t in todos {
            let new = NewTodo { owner: t.owner, status: t.status, body: t.body, category: t.category };
            match t.id {
                Some(id) => {
                    self.insert_document(new.with_id(id).to_document())?;
                }
                None => {
                    self.insert(new);
                }
            }
            inserted += 1;
        }
        log::info!("seeded {inserted} todos into '{}'", self.name());
        Ok(inserted)
    }
}
