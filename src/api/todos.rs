use crate::errors::ApiError;
use crate::query::{QueryParams, build_query};
use crate::store::TodoCollection;
use crate::todo::Todo;
use axum::extract::{Query, State};
use axum::http::{Method, StatusCode};
use axum::routing::{MethodFilter, on};
use axum::{Json, Router};
use std::sync::Arc;
use std::time::Instant;

use super::{Controller, RouteBinding};

pub const API_TODOS: &str = "/api/todos";

/// Serves the todo list endpoint over an injected collection handle.
pub struct TodoController {
    collection: Arc<dyn TodoCollection>,
}

impl TodoController {
    pub fn new(collection: Arc<dyn TodoCollection>) -> Self {
        Self { collection }
    }

    /// Lists the todos matching `params`.
    ///
    /// Parameters are validated before anything is read, so an invalid request never
    /// reaches the collection. A valid one issues exactly one `find`.
    ///
    /// # Errors
    /// `ApiError::Validation` for a bad parameter, `ApiError::Storage` if the find fails.
    pub async fn list(&self, params: &QueryParams) -> Result<Vec<Todo>, ApiError> {
        let query = build_query(params)?;
        log::debug!("todo query filter={} options={:?}", query.filter, query.options);
        let todos = self.collection.find(&query.filter, &query.options).await?;
        Ok(todos)
    }
}

impl Controller for TodoController {
    fn routes(&self) -> Vec<RouteBinding> {
        vec![RouteBinding { method: Method::GET, path: API_TODOS }]
    }

    fn add_routes(self: Arc<Self>, router: Router) -> Router {
        // List todos, filtered using query parameters
        self.routes().into_iter().fold(router, |router, binding| match MethodFilter::try_from(binding.method.clone()) {
            Ok(filter) => router.route(binding.path, on(filter, get_todos).with_state(Arc::clone(&self))),
            Err(e) => {
                log::error!("cannot mount {} {}: {e}", binding.method, binding.path);
                router
            }
        })
    }
}

/// `GET /api/todos`: a JSON array of matching todos with status 200.
///
/// # Errors
/// 400 with the offending parameter on validation failure, 500 if the collection fails.
pub async fn get_todos(
    State(controller): State<Arc<TodoController>>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<(StatusCode, Json<Vec<Todo>>), ApiError> {
    let start = Instant::now();
    let params: QueryParams = pairs.into_iter().collect();
    match controller.list(&params).await {
        Ok(todos) => {
            log::info!(
                target: "todo_api::access",
                "GET {API_TODOS} params={params:?} status=200 results={} duration_ms={}",
                todos.len(),
                start.elapsed().as_millis()
            );
            Ok((StatusCode::OK, Json(todos)))
        }
        Err(e) => {
            match &e {
                ApiError::Validation(v) => log::warn!("rejected todo request: {v}"),
                ApiError::Storage(s) => log::error!("todo query failed: {s}"),
            }
            log::info!(
                target: "todo_api::access",
                "GET {API_TODOS} params={params:?} status={} duration_ms={}",
                e.status().as_u16(),
                start.elapsed().as_millis()
            );
            Err(e)
        }
    }
}
