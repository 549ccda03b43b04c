//! Collection handles the list handler queries through.

mod memory;
mod seed;

pub use memory::MemoryTodoStore;
pub use seed::{SeedTodo, load_seed_file, parse_seed};

use crate::errors::StorageError;
use crate::query::{Filter, FindOptions};
use crate::todo::Todo;
use async_trait::async_trait;

/// Read access to a todo collection.
///
/// Implementations must be safe to share between concurrent requests.
#[async_trait]
pub trait TodoCollection: Send + Sync {
    /// Returns every todo matching `filter`, shaped by `options`, as one ordered sequence.
    async fn find(&self, filter: &Filter, options: &FindOptions) -> Result<Vec<Todo>, StorageError>;
}
