use bson::{Bson, Document as BsonDocument, doc};
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Ascending or descending sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Order {
    Asc,
    Desc,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub field: String,
    pub order: Order,
}

/// Options for a find: optional sort and result cap.
///
/// `sort: None` keeps storage order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FindOptions {
    pub sort: Option<Vec<SortSpec>>,
    pub limit: Option<usize>,
}

/// A compiled, case-insensitive literal text matcher.
///
/// The source text is always escaped, so callers can never inject pattern syntax.
#[derive(Clone)]
pub struct TextPattern {
    whole_value: bool,
    regex: Regex,
}

impl TextPattern {
    /// Matches `literal` anywhere in the field value, ignoring case.
    ///
    /// # Errors
    /// Returns an error only if the escaped literal exceeds the regex size limit.
    pub fn contains(literal: &str) -> Result<Self, regex::Error> {
        Self::build(literal, false)
    }

    /// Matches the whole field value against `literal`, ignoring case.
    ///
    /// # Errors
    /// Returns an error only if the escaped literal exceeds the regex size limit.
    pub fn whole_value(literal: &str) -> Result<Self, regex::Error> {
        Self::build(literal, true)
    }

    fn build(literal: &str, whole_value: bool) -> Result<Self, regex::Error> {
        let escaped = regex::escape(literal);
        let source = if whole_value { format!("^{escaped}$") } else { escaped };
        let regex = RegexBuilder::new(&source).case_insensitive(true).build()?;
        Ok(Self { whole_value, regex })
    }

    #[must_use]
    pub const fn is_whole_value(&self) -> bool {
        self.whole_value
    }

    /// The regular expression source, as it would be sent to a document database.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    #[must_use]
    pub fn is_match(&self, haystack: &str) -> bool {
        self.regex.is_match(haystack)
    }
}

impl PartialEq for TextPattern {
    fn eq(&self, other: &Self) -> bool {
        self.regex.as_str() == other.regex.as_str()
    }
}

impl Eq for TextPattern {}

impl fmt::Debug for TextPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}/i", self.regex.as_str())
    }
}

/// A predicate over todo documents: a conjunction of equality and text matches.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    True,
    And(Vec<Filter>),
    Eq { path: String, value: Bson },
    Text { path: String, pattern: TextPattern },
}

impl Filter {
    /// Combines sub-filters with AND; an empty list becomes the match-all filter.
    #[must_use]
    pub fn and(mut filters: Vec<Self>) -> Self {
        match filters.len() {
            0 => Self::True,
            1 => filters.pop().unwrap_or(Self::True),
            _ => Self::And(filters),
        }
    }

    #[must_use]
    pub const fn is_match_all(&self) -> bool {
        matches!(self, Self::True)
    }

    /// Renders the filter as a Mongo-style filter document. `True` renders as `{}`.
    #[must_use]
    pub fn to_document(&self) -> BsonDocument {
        match self {
            Self::True => BsonDocument::new(),
            Self::And(fs) => {
                let clauses: Vec<Bson> = fs.iter().map(|f| Bson::Document(f.to_document())).collect();
                doc! { "$and": clauses }
            }
            Self::Eq { path, value } => {
                let mut d = BsonDocument::new();
                d.insert(path.clone(), doc! { "$eq": value.clone() });
                d
            }
            Self::Text { path, pattern } => {
                let mut d = BsonDocument::new();
                d.insert(path.clone(), doc! { "$regex": pattern.as_str(), "$options": "i" });
                d
            }
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_document())
    }
}
