//! Translation of request query parameters into a filter and find options.
//!
//! Every parameter the todo endpoint understands is declared once in [`TODO_PARAMS`]. The
//! builder walks that table in order, looks each key up in the request, and either adds a
//! sub-filter / option or stops at the first invalid value. Keys that are not in the table
//! are ignored.

use std::collections::BTreeMap;
use std::num::{IntErrorKind, ParseIntError};

use bson::Bson;

use super::types::{Filter, FindOptions, Order, SortSpec, TextPattern};
use crate::errors::ValidationError;

/// Upper bound accepted for `limit`.
pub const MAX_LIMIT: usize = 150;

/// Query parameters as received: each key maps to every value sent for it, in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams(BTreeMap<String, Vec<String>>);

impl QueryParams {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.entry(key.into()).or_default().push(value.into());
    }

    /// The first value sent for `key`.
    #[must_use]
    pub fn first(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(|vs| vs.first()).map(String::as_str)
    }

}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (k, v) in iter {
            params.insert(k, v);
        }
        params
    }
}

/// How a recognized parameter is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    /// Case-insensitive literal match against the whole field value.
    TextWhole { field: &'static str },
    /// Case-insensitive literal match anywhere in the field value.
    TextContains { field: &'static str },
    /// Allow-listed words mapped to a boolean equality on `field`.
    Flag { field: &'static str, truthy: &'static [&'static str], falsy: &'static [&'static str] },
    /// Integer result cap within `[min, max]`.
    Limit { min: usize, max: usize },
    /// Allow-listed field name to sort by.
    SortKey { allowed: &'static [&'static str] },
    /// `asc` or `desc`; only meaningful together with a sort key.
    SortOrder,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamSpec {
    pub key: &'static str,
    pub kind: ParamKind,
}

pub const OWNER_KEY: &str = "owner";
pub const CATEGORY_KEY: &str = "category";
pub const BODY_KEY: &str = "contains";
pub const STATUS_KEY: &str = "status";
pub const LIMIT_KEY: &str = "limit";
pub const SORT_KEY: &str = "orderBy";
pub const SORT_ORDER_KEY: &str = "sortorder";

pub static TODO_PARAMS: &[ParamSpec] = &[
    ParamSpec { key: OWNER_KEY, kind: ParamKind::TextWhole { field: "owner" } },
    ParamSpec { key: CATEGORY_KEY, kind: ParamKind::TextContains { field: "category" } },
    ParamSpec { key: BODY_KEY, kind: ParamKind::TextContains { field: "body" } },
    ParamSpec {
        key: STATUS_KEY,
        kind: ParamKind::Flag { field: "status", truthy: &["complete", "true"], falsy: &["incomplete", "false"] },
    },
    ParamSpec { key: LIMIT_KEY, kind: ParamKind::Limit { min: 1, max: MAX_LIMIT } },
    ParamSpec { key: SORT_KEY, kind: ParamKind::SortKey { allowed: &["owner", "status", "body", "category"] } },
    ParamSpec { key: SORT_ORDER_KEY, kind: ParamKind::SortOrder },
];

/// The full result of translating a request: what to match and how to shape the results.
#[derive(Debug, Clone, PartialEq)]
pub struct TodoQuery {
    pub filter: Filter,
    pub options: FindOptions,
}

/// Builds the filter and find options for `params` using [`TODO_PARAMS`].
///
/// # Errors
/// Returns the first `ValidationError` met while walking the table; nothing is partially
/// applied.
pub fn build_query(params: &QueryParams) -> Result<TodoQuery, ValidationError> {
    build_query_with(TODO_PARAMS, params)
}

/// Builds only the filter part of [`build_query`].
///
/// # Errors
/// Same as [`build_query`]: every recognized key is validated, including sort and limit keys.
pub fn construct_filter(params: &QueryParams) -> Result<Filter, ValidationError> {
    build_query(params).map(|q| q.filter)
}

/// Same as [`build_query`] against an arbitrary parameter table.
///
/// # Errors
/// Returns the first `ValidationError` met while walking `table`.
pub fn build_query_with(table: &[ParamSpec], params: &QueryParams) -> Result<TodoQuery, ValidationError> {
    let mut filters = Vec::new();
    let mut options = FindOptions::default();
    let mut sort_field: Option<&'static str> = None;
    let mut order = Order::Asc;

    for spec in table {
        let Some(raw) = params.first(spec.key) else { continue };
        match spec.kind {
            ParamKind::TextWhole { field } => {
                let pattern = TextPattern::whole_value(raw).map_err(|e| too_complex(spec.key, raw, &e))?;
                filters.push(Filter::Text { path: field.to_string(), pattern });
            }
            ParamKind::TextContains { field } => {
                let pattern = TextPattern::contains(raw).map_err(|e| too_complex(spec.key, raw, &e))?;
                filters.push(Filter::Text { path: field.to_string(), pattern });
            }
            ParamKind::Flag { field, truthy, falsy } => {
                let value = if one_of(raw, truthy) {
                    true
                } else if one_of(raw, falsy) {
                    false
                } else {
                    let allowed: Vec<&str> = truthy.iter().chain(falsy).copied().collect();
                    return Err(not_allowed(spec.key, raw, &allowed));
                };
                filters.push(Filter::Eq { path: field.to_string(), value: Bson::Boolean(value) });
            }
            ParamKind::Limit { min, max } => {
                let n: i64 = raw.trim().parse().map_err(|e: ParseIntError| match e.kind() {
                    IntErrorKind::PosOverflow => ValidationError::new(spec.key, raw, format!("must be at most {max}")),
                    IntErrorKind::NegOverflow => ValidationError::new(spec.key, raw, format!("must be at least {min}")),
                    _ => ValidationError::new(spec.key, raw, "must be an integer"),
                })?;
                if n < min as i64 {
                    return Err(ValidationError::new(spec.key, raw, format!("must be at least {min}")));
                }
                if n > max as i64 {
                    return Err(ValidationError::new(spec.key, raw, format!("must be at most {max}")));
                }
                options.limit = usize::try_from(n).ok();
            }
            ParamKind::SortKey { allowed } => {
                let field = allowed
                    .iter()
                    .copied()
                    .find(|a| a.eq_ignore_ascii_case(raw.trim()))
                    .ok_or_else(|| not_allowed(spec.key, raw, allowed))?;
                sort_field = Some(field);
            }
            ParamKind::SortOrder => {
                order = if raw.trim().eq_ignore_ascii_case("asc") {
                    Order::Asc
                } else if raw.trim().eq_ignore_ascii_case("desc") {
                    Order::Desc
                } else {
                    return Err(not_allowed(spec.key, raw, &["asc", "desc"]));
                };
            }
        }
    }

    if let Some(field) = sort_field {
        options.sort = Some(vec![SortSpec { field: field.to_string(), order }]);
    }
    Ok(TodoQuery { filter: Filter::and(filters), options })
}

fn one_of(raw: &str, words: &[&str]) -> bool {
    words.iter().any(|w| w.eq_ignore_ascii_case(raw.trim()))
}

fn not_allowed(key: &str, raw: &str, allowed: &[&str]) -> ValidationError {
    ValidationError::new(key, raw, format!("must be one of: {}", allowed.join(", ")))
}

fn too_complex(key: &str, raw: &str, e: &regex::Error) -> ValidationError {
    ValidationError::new(key, raw, format!("cannot be used as a text match ({e})"))
}
