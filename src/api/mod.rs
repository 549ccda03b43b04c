// Submodules for clear separation of concerns
mod error;
pub mod health;
pub mod todos;

pub use todos::{API_TODOS, TodoController, get_todos};

use crate::store::TodoCollection;
use axum::Router;
use axum::http::Method;
use std::sync::Arc;

/// One HTTP method + path pair a controller serves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteBinding {
    pub method: Method,
    pub path: &'static str,
}

/// A group of handlers that knows how to mount itself on a router.
pub trait Controller: Send + Sync + 'static {
    /// The bindings `add_routes` registers, in registration order.
    fn routes(&self) -> Vec<RouteBinding>;

    /// Registers every binding from [`Controller::routes`] on `router`.
    fn add_routes(self: Arc<Self>, router: Router) -> Router;
}

/// The service's full router: the todo controller plus the health check.
pub fn router(todos: Arc<dyn TodoCollection>) -> Router {
    let controller = Arc::new(TodoController::new(todos));
    let router = health::add_routes(Router::new());
    controller.add_routes(router)
}
