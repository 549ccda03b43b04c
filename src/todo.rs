//! The todo record and its document mapping.

use crate::errors::StorageError;
use bson::oid::ObjectId;
use bson::{Document as BsonDocument, doc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// Storage-assigned identity of a todo, a BSON object id.
///
/// Serialized as a 24-char lowercase hex string so JSON clients see a plain string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TodoId(pub ObjectId);

impl TodoId {
    #[must_use]
    pub fn new() -> Self {
        Self(ObjectId::new())
    }

    #[must_use]
    pub fn to_hex(&self) -> String {
        self.0.to_hex()
    }
}

impl Default for TodoId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.to_hex())
    }
}

impl FromStr for TodoId {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ObjectId::parse_str(s).map(Self).map_err(|e| format!("'{s}' is not an object id: {e}"))
    }
}

impl Serialize for TodoId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for TodoId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// A persisted todo. Equality and hashing consider only `id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Todo {
    #[serde(rename = "_id")]
    pub id: TodoId,
    pub owner: String,
    pub status: bool,
    pub body: String,
    pub category: String,
}

impl PartialEq for Todo {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Todo {}

impl Hash for Todo {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for Todo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.body)
    }
}

impl Todo {
    /// Materializes a stored document.
    ///
    /// # Errors
    /// Returns `StorageError::Malformed` if `_id` is not an object id or any todo field is
    /// missing or has the wrong BSON type.
    pub fn from_document(doc: &BsonDocument) -> Result<Self, StorageError> {
        let id = doc.get_object_id("_id").map_err(|e| StorageError::Malformed {
            id: doc.get("_id").map_or_else(|| "<missing>".to_string(), ToString::to_string),
            reason: e.to_string(),
        })?;
        let malformed = |field: &str, e: &dyn fmt::Display| StorageError::Malformed {
            id: id.to_hex(),
            reason: format!("{field}: {e}"),
        };
        Ok(Self {
            id: TodoId(id),
            owner: doc.get_str("owner").map_err(|e| malformed("owner", &e))?.to_string(),
            status: doc.get_bool("status").map_err(|e| malformed("status", &e))?,
            body: doc.get_str("body").map_err(|e| malformed("body", &e))?.to_string(),
            category: doc.get_str("category").map_err(|e| malformed("category", &e))?.to_string(),
        })
    }

    #[must_use]
    pub fn to_document(&self) -> BsonDocument {
        doc! {
            "_id": self.id.0,
            "owner": self.owner.as_str(),
            "status": self.status,
            "body": self.body.as_str(),
            "category": self.category.as_str(),
        }
    }
}

/// A todo that has not been stored yet and therefore has no id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTodo {
    pub owner: String,
    pub status: bool,
    pub body: String,
    pub category: String,
}

impl NewTodo {
    pub fn new(owner: impl Into<String>, status: bool, body: impl Into<String>, category: impl Into<String>) -> Self {
        Self { owner: owner.into(), status, body: body.into(), category: category.into() }
    }

    #[must_use]
    pub fn with_id(self, id: TodoId) -> Todo {
        Todo { id, owner: self.owner, status: self.status, body: self.body, category: self.category }
    }
}
