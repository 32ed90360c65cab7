//! # Document Store Backend
//!
//! The seam between the gateway and the backing document database.
//!
//! `DocumentStore` models the store as schema-flexible JSON collections:
//! the store assigns ids, maintains `createdAt`/`updatedAt` when a
//! collection opts in, and enforces declared unique-field constraints so
//! the gateway never has to scan-then-insert. `MemoryStore` is the
//! in-process implementation; a deployment against an external database
//! would implement the same trait over its driver.

use std::collections::HashMap;
use std::sync::RwLock;

use chrono::Utc;
use serde_json::{Map, Value};
use thiserror::Error;
use uuid::Uuid;

/// Result type for backend operations
pub type BackendResult<T> = Result<T, BackendError>;

/// Store-internal error codes.
///
/// These never cross the HTTP boundary; the gateway translates them into
/// the public `StoreError` taxonomy.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BackendError {
    /// A declared unique constraint rejected the write
    #[error("duplicate value for unique field '{field}'")]
    DuplicateKey { field: String },

    /// Collection was never registered
    #[error("unknown collection '{0}'")]
    UnknownCollection(String),

    /// The store itself is unusable
    #[error("store connection lost: {0}")]
    Connection(String),
}

/// Declared shape of one collection
#[derive(Debug, Clone)]
pub struct CollectionSpec {
    pub name: String,
    /// Fields whose values must be unique across the collection
    /// (case-sensitive exact match)
    pub unique_fields: Vec<String>,
    /// Stamp `createdAt`/`updatedAt` on insert and modify
    pub timestamps: bool,
}

/// Backend trait for document storage
pub trait DocumentStore: Send + Sync {
    /// Register a collection. Idempotent: registering a collection that
    /// already exists leaves it untouched.
    fn ensure_collection(&self, spec: CollectionSpec) -> BackendResult<()>;

    /// Insert a document; the store assigns the id and timestamps.
    /// Returns the document as stored.
    fn insert(&self, collection: &str, document: Map<String, Value>) -> BackendResult<Value>;

    /// All documents in insertion order
    fn find_all(&self, collection: &str) -> BackendResult<Vec<Value>>;

    /// Document with the given id, if any
    fn find_by_id(&self, collection: &str, id: &Uuid) -> BackendResult<Option<Value>>;

    /// Merge `changes` into the document with the given id and return the
    /// post-update document, or None if absent
    fn update(
        &self,
        collection: &str,
        id: &Uuid,
        changes: Map<String, Value>,
    ) -> BackendResult<Option<Value>>;

    /// Remove the document with the given id and return its snapshot,
    /// or None if absent
    fn remove(&self, collection: &str, id: &Uuid) -> BackendResult<Option<Value>>;
}

struct Collection {
    spec: CollectionSpec,
    documents: Vec<Value>,
}

/// In-memory document store behind a single RwLock.
///
/// Uniqueness checks and the write they guard happen under the same write
/// lock, so a duplicate can never slip in between check and insert.
#[derive(Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<String, Collection>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn now_value() -> Value {
        Value::String(Utc::now().to_rfc3339())
    }

    fn matches_id(document: &Value, id: &str) -> bool {
        document.get("id").and_then(Value::as_str) == Some(id)
    }

    /// Reject `candidate` if any *other* document holds the same value in
    /// a unique field. `skip_id` excludes the document being updated.
    fn check_unique(
        spec: &CollectionSpec,
        documents: &[Value],
        candidate: &Map<String, Value>,
        skip_id: Option<&str>,
    ) -> BackendResult<()> {
        for field in &spec.unique_fields {
            let Some(value) = candidate.get(field) else {
                continue;
            };
            if value.is_null() {
                continue;
            }
            let taken = documents.iter().any(|doc| {
                if let Some(skip) = skip_id {
                    if Self::matches_id(doc, skip) {
                        return false;
                    }
                }
                doc.get(field) == Some(value)
            });
            if taken {
                return Err(BackendError::DuplicateKey {
                    field: field.clone(),
                });
            }
        }
        Ok(())
    }
}

impl DocumentStore for MemoryStore {
    fn ensure_collection(&self, spec: CollectionSpec) -> BackendResult<()> {
        let mut collections = self
            .collections
            .write()
            .map_err(|_| BackendError::Connection("lock poisoned".to_string()))?;

        collections.entry(spec.name.clone()).or_insert(Collection {
            spec,
            documents: Vec::new(),
        });
        Ok(())
    }

    fn insert(&self, collection: &str, mut document: Map<String, Value>) -> BackendResult<Value> {
        let mut collections = self
            .collections
            .write()
            .map_err(|_| BackendError::Connection("lock poisoned".to_string()))?;

        let entry = collections
            .get_mut(collection)
            .ok_or_else(|| BackendError::UnknownCollection(collection.to_string()))?;

        Self::check_unique(&entry.spec, &entry.documents, &document, None)?;

        document.insert("id".to_string(), Value::String(Uuid::new_v4().to_string()));
        if entry.spec.timestamps {
            let now = Self::now_value();
            document.insert("createdAt".to_string(), now.clone());
            document.insert("updatedAt".to_string(), now);
        }

        let stored = Value::Object(document);
        entry.documents.push(stored.clone());
        Ok(stored)
    }

    fn find_all(&self, collection: &str) -> BackendResult<Vec<Value>> {
        let collections = self
            .collections
            .read()
            .map_err(|_| BackendError::Connection("lock poisoned".to_string()))?;

        let entry = collections
            .get(collection)
            .ok_or_else(|| BackendError::UnknownCollection(collection.to_string()))?;
        Ok(entry.documents.clone())
    }

    fn find_by_id(&self, collection: &str, id: &Uuid) -> BackendResult<Option<Value>> {
        let collections = self
            .collections
            .read()
            .map_err(|_| BackendError::Connection("lock poisoned".to_string()))?;

        let entry = collections
            .get(collection)
            .ok_or_else(|| BackendError::UnknownCollection(collection.to_string()))?;

        let id = id.to_string();
        Ok(entry
            .documents
            .iter()
            .find(|doc| Self::matches_id(doc, &id))
            .cloned())
    }

    fn update(
        &self,
        collection: &str,
        id: &Uuid,
        changes: Map<String, Value>,
    ) -> BackendResult<Option<Value>> {
        let mut collections = self
            .collections
            .write()
            .map_err(|_| BackendError::Connection("lock poisoned".to_string()))?;

        let entry = collections
            .get_mut(collection)
            .ok_or_else(|| BackendError::UnknownCollection(collection.to_string()))?;

        let id = id.to_string();
        let Some(index) = entry
            .documents
            .iter()
            .position(|doc| Self::matches_id(doc, &id))
        else {
            return Ok(None);
        };

        Self::check_unique(&entry.spec, &entry.documents, &changes, Some(id.as_str()))?;

        let stamp = entry.spec.timestamps.then(Self::now_value);
        let document = &mut entry.documents[index];
        if let Some(object) = document.as_object_mut() {
            for (key, value) in changes {
                object.insert(key, value);
            }
            if let Some(now) = stamp {
                object.insert("updatedAt".to_string(), now);
            }
        }

        Ok(Some(document.clone()))
    }

    fn remove(&self, collection: &str, id: &Uuid) -> BackendResult<Option<Value>> {
        let mut collections = self
            .collections
            .write()
            .map_err(|_| BackendError::Connection("lock poisoned".to_string()))?;

        let entry = collections
            .get_mut(collection)
            .ok_or_else(|| BackendError::UnknownCollection(collection.to_string()))?;

        let id = id.to_string();
        let Some(index) = entry
            .documents
            .iter()
            .position(|doc| Self::matches_id(doc, &id))
        else {
            return Ok(None);
        };

        Ok(Some(entry.documents.remove(index)))
    }
}
