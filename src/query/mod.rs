// Submodules for separation of concerns
mod eval;
mod params;
mod types;

pub use eval::{compare_bson, compare_docs, eval_filter};
pub use params::{
    BODY_KEY, CATEGORY_KEY, LIMIT_KEY, MAX_LIMIT, OWNER_KEY, ParamKind, ParamSpec, QueryParams, SORT_KEY,
    SORT_ORDER_KEY, STATUS_KEY, TODO_PARAMS, TodoQuery, build_query, build_query_with, construct_filter,
};
pub use types::{Filter, FindOptions, Order, SortSpec, TextPattern};
