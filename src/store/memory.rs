use crate::errors::StorageError;
use crate::query::{Filter, FindOptions, compare_docs, eval_filter};
use crate::todo::{NewTodo, Todo, TodoId};
use async_trait::async_trait;
use bson::{Bson, Document as BsonDocument};
use parking_lot::RwLock;
use std::time::Instant;

use super::TodoCollection;

/// An in-process collection of todo documents. Storage order is insertion order.
pub struct MemoryTodoStore {
    name: String,
    docs: RwLock<Vec<BsonDocument>>,
}

impl MemoryTodoStore {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), docs: RwLock::new(Vec::new()) }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Stores `todo` under a freshly assigned id.
    pub fn insert(&self, todo: NewTodo) -> TodoId {
        let stored = todo.with_id(TodoId::new());
        self.docs.write().push(stored.to_document());
        stored.id
    }

    pub fn insert_many(&self, todos: impl IntoIterator<Item = NewTodo>) -> Vec<TodoId> {
        todos.into_iter().map(|t| self.insert(t)).collect()
    }

    /// Stores a raw document, assigning `_id` when it has none.
    ///
    /// # Errors
    /// Returns `StorageError::Malformed` if `_id` is present but not an object id, and
    /// `StorageError::DuplicateId` if the id is already taken.
    pub fn insert_document(&self, mut doc: BsonDocument) -> Result<TodoId, StorageError> {
        let id = match doc.get("_id") {
            None => {
                let id = TodoId::new();
                doc.insert("_id", id.0);
                id
            }
            Some(Bson::ObjectId(oid)) => TodoId(*oid),
            Some(other) => {
                return Err(StorageError::Malformed {
                    id: other.to_string(),
                    reason: "_id must be an object id".into(),
                });
            }
        };
        let mut docs = self.docs.write();
        if docs.iter().any(|d| matches!(d.get("_id"), Some(Bson::ObjectId(oid)) if *oid == id.0)) {
            return Err(StorageError::DuplicateId(id.to_hex()));
        }
        docs.push(doc);
        Ok(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.docs.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.docs.read().is_empty()
    }

    /// Filters, sorts, then truncates to the limit, in that order.
    ///
    /// # Errors
    /// Returns `StorageError::Malformed` if a matching document does not have the todo shape.
    pub fn find_docs(&self, filter: &Filter, options: &FindOptions) -> Result<Vec<Todo>, StorageError> {
        let start = Instant::now();
        let mut matched: Vec<BsonDocument> = {
            let docs = self.docs.read();
            docs.iter().filter(|d| eval_filter(d, filter)).cloned().collect()
        };
        if let Some(sort) = &options.sort {
            matched.sort_by(|a, b| compare_docs(a, b, sort));
        }
        if let Some(limit) = options.limit {
            matched.truncate(limit);
        }
        let todos = matched.iter().map(Todo::from_document).collect::<Result<Vec<_>, _>>()?;
        log::debug!(
            "find collection={} filter={} matched={} duration_us={}",
            self.name,
            filter,
            todos.len(),
            start.elapsed().as_micros()
        );
        Ok(todos)
    }
}

#[async_trait]
impl TodoCollection for MemoryTodoStore {
    async fn find(&self, filter: &Filter, options: &FindOptions) -> Result<Vec<Todo>, StorageError> {
        self.find_docs(filter, options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::{Order, SortSpec, TextPattern};
    use bson::doc;

    fn store() -> MemoryTodoStore {
        let s = MemoryTodoStore::new("todos");
        s.insert_many([
            NewTodo::new("Blanche", false, "In sunt ex non", "software design"),
            NewTodo::new("Fry", true, "Ipsum esse est", "video games"),
            NewTodo::new("barry", false, "Quis est dolor", "homework"),
        ]);
        s
    }

    #[test]
    fn sort_then_limit() {
        let s = store();
        let opts = FindOptions {
            sort: Some(vec![SortSpec { field: "owner".into(), order: Order::Asc }]),
            limit: Some(2),
        };
        let owners: Vec<String> = s.find_docs(&Filter::True, &opts).unwrap().into_iter().map(|t| t.owner).collect();
        // byte order: uppercase before lowercase
        assert_eq!(owners, vec!["Blanche", "Fry"]);
    }

    #[test]
    fn unsorted_keeps_insertion_order() {
        let s = store();
        let owners: Vec<String> =
            s.find_docs(&Filter::True, &FindOptions::default()).unwrap().into_iter().map(|t| t.owner).collect();
        assert_eq!(owners, vec!["Blanche", "Fry", "barry"]);
    }

    #[test]
    fn insert_document_assigns_and_guards_ids() {
        let s = MemoryTodoStore::new("todos");
        let id = s
            .insert_document(doc! { "owner": "Nic", "status": false, "body": "Essay", "category": "homework" })
            .unwrap();
        let dup = s.insert_document(doc! { "_id": id.0, "owner": "x", "status": true, "body": "y", "category": "z" });
        assert!(matches!(dup, Err(StorageError::DuplicateId(_))));
        let bad = s.insert_document(doc! { "_id": "abc" });
        assert!(matches!(bad, Err(StorageError::Malformed { .. })));
        assert_eq!(s.len(), 1);
    }

    #[test]
    fn malformed_match_fails_the_whole_find() {
        let s = store();
        s.insert_document(doc! { "owner": "Ghost", "status": "maybe" }).unwrap();
        let f = Filter::Text { path: "owner".into(), pattern: TextPattern::whole_value("ghost").unwrap() };
        assert!(matches!(s.find_docs(&f, &FindOptions::default()), Err(StorageError::Malformed { .. })));
        let f = Filter::Text { path: "owner".into(), pattern: TextPattern::whole_value("fry").unwrap() };
        assert_eq!(s.find_docs(&f, &FindOptions::default()).unwrap().len(), 1);
    }
}
