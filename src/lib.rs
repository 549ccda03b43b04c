pub mod api;
pub mod config;
pub mod errors;
pub mod logger;
pub mod query;
pub mod store;
pub mod todo;

pub use crate::api::{API_TODOS, Controller, RouteBinding, TodoController, router};
pub use crate::errors::{ApiError, ConfigError, StorageError, ValidationError};
pub use crate::query::{Filter, FindOptions, QueryParams, build_query};
pub use crate::store::{MemoryTodoStore, TodoCollection};
pub use crate::todo::{NewTodo, Todo, TodoId};

