//! # Record Store Gateway
//!
//! Validated CRUD for Employee records over a `DocumentStore`.
//!
//! The gateway owns the schema: it validates incoming fields, decides
//! which fields a client may write, and translates store-internal error
//! codes into the public `StoreError` taxonomy. Callers above this layer
//! never see a `BackendError`.

use std::sync::Arc;

use serde_json::{Map, Value};
use uuid::Uuid;

use super::backend::{BackendError, CollectionSpec, DocumentStore};
use super::employee::{Employee, EmployeeFields};
use super::errors::{StoreError, StoreResult};

/// Collection holding the employee documents
pub const EMPLOYEES_COLLECTION: &str = "employees";

/// Employee store gateway
#[derive(Clone)]
pub struct EmployeeStore {
    backend: Arc<dyn DocumentStore>,
}

impl EmployeeStore {
    /// Open the gateway over a backend, registering the employees
    /// collection (unique email, automatic timestamps). Registration is
    /// idempotent, so opening twice over the same backend is harmless.
    pub fn open(backend: Arc<dyn DocumentStore>) -> StoreResult<Self> {
        backend
            .ensure_collection(CollectionSpec {
                name: EMPLOYEES_COLLECTION.to_string(),
                unique_fields: vec!["email".to_string()],
                timestamps: true,
            })
            .map_err(translate)?;
        Ok(Self { backend })
    }

    /// All employees in insertion order
    pub fn list_all(&self) -> StoreResult<Vec<Employee>> {
        let documents = self
            .backend
            .find_all(EMPLOYEES_COLLECTION)
            .map_err(translate)?;
        documents.into_iter().map(decode).collect()
    }

    /// Employee with the given id
    pub fn get_by_id(&self, id: &str) -> StoreResult<Employee> {
        let id = parse_id(id)?;
        let document = self
            .backend
            .find_by_id(EMPLOYEES_COLLECTION, &id)
            .map_err(translate)?
            .ok_or(StoreError::NotFound)?;
        decode(document)
    }

    /// Validate and persist a new employee. Every violated field
    /// constraint is reported, not just the first.
    pub fn create(&self, fields: EmployeeFields) -> StoreResult<Employee> {
        let violations = fields.validate_create();
        if !violations.is_empty() {
            return Err(StoreError::Validation(violations));
        }

        let document = self
            .backend
            .insert(EMPLOYEES_COLLECTION, to_document(fields))
            .map_err(translate)?;
        decode(document)
    }

    /// Re-validate the supplied fields and replace them on the record.
    /// Only `name`, `email` and `department` are updatable.
    pub fn update(&self, id: &str, fields: EmployeeFields) -> StoreResult<Employee> {
        let id = parse_id(id)?;

        let violations = fields.validate_update();
        if !violations.is_empty() {
            return Err(StoreError::Validation(violations));
        }

        let document = self
            .backend
            .update(EMPLOYEES_COLLECTION, &id, to_document(fields))
            .map_err(translate)?
            .ok_or(StoreError::NotFound)?;
        decode(document)
    }

    /// Remove the record permanently and return its snapshot
    pub fn delete_by_id(&self, id: &str) -> StoreResult<Employee> {
        let id = parse_id(id)?;
        let document = self
            .backend
            .remove(EMPLOYEES_COLLECTION, &id)
            .map_err(translate)?
            .ok_or(StoreError::NotFound)?;
        decode(document)
    }
}

/// An id must be a structurally valid UUID; anything else is
/// `InvalidId`, distinct from `NotFound`.
fn parse_id(id: &str) -> StoreResult<Uuid> {
    Uuid::parse_str(id).map_err(|_| StoreError::InvalidId(id.to_string()))
}

/// Only supplied fields make it into the document, so an update replaces
/// exactly what the client sent.
fn to_document(fields: EmployeeFields) -> Map<String, Value> {
    let mut document = Map::new();
    if let Some(name) = fields.name {
        document.insert("name".to_string(), Value::String(name));
    }
    if let Some(email) = fields.email {
        document.insert("email".to_string(), Value::String(email));
    }
    if let Some(department) = fields.department {
        document.insert("department".to_string(), Value::String(department));
    }
    document
}

fn decode(document: Value) -> StoreResult<Employee> {
    serde_json::from_value(document)
        .map_err(|e| StoreError::Unavailable(format!("malformed document: {}", e)))
}

/// Map store-internal codes onto the public taxonomy. The route layer
/// never inspects a `BackendError` directly.
fn translate(err: BackendError) -> StoreError {
    match err {
        BackendError::DuplicateKey { field } if field == "email" => StoreError::DuplicateEmail,
        BackendError::DuplicateKey { field } => {
            StoreError::Unavailable(format!("unexpected unique constraint on '{}'", field))
        }
        BackendError::UnknownCollection(name) => {
            StoreError::Unavailable(format!("collection '{}' not registered", name))
        }
        BackendError::Connection(detail) => StoreError::Unavailable(detail),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::backend::MemoryStore;

    fn open_store() -> EmployeeStore {
        EmployeeStore::open(Arc::new(MemoryStore::new())).unwrap()
    }

    fn ann() -> EmployeeFields {
        EmployeeFields {
            name: Some("Ann".to_string()),
            email: Some("ann@x.com".to_string()),
            department: Some("Sales".to_string()),
        }
    }

    #[test]
    fn test_create_then_get_returns_same_fields() {
        let store = open_store();
        let created = store.create(ann()).unwrap();

        let fetched = store.get_by_id(&created.id).unwrap();
        assert_eq!(fetched, created);
        assert_eq!(fetched.name, "Ann");
        assert_eq!(fetched.email, "ann@x.com");
        assert_eq!(fetched.department, "Sales");
    }

    #[test]
    fn test_create_empty_lists_three_violations() {
        let store = open_store();
        let err = store.create(EmployeeFields::default()).unwrap_err();
        match err {
            StoreError::Validation(messages) => assert_eq!(messages.len(), 3),
            other => panic!("expected validation failure, got {:?}", other),
        }
    }

    #[test]
    fn test_duplicate_email_leaves_first_record_intact() {
        let store = open_store();
        let first = store.create(ann()).unwrap();

        let mut second = ann();
        second.name = Some("Bob".to_string());
        assert_eq!(store.create(second).unwrap_err(), StoreError::DuplicateEmail);

        assert_eq!(store.get_by_id(&first.id).unwrap(), first);
        assert_eq!(store.list_all().unwrap().len(), 1);
    }

    #[test]
    fn test_partial_update_touches_only_department() {
        let store = open_store();
        let created = store.create(ann()).unwrap();

        std::thread::sleep(std::time::Duration::from_millis(2));
        let updated = store
            .update(
                &created.id,
                EmployeeFields {
                    department: Some("Eng".to_string()),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(updated.department, "Eng");
        assert_eq!(updated.name, created.name);
        assert_eq!(updated.email, created.email);
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at > created.updated_at);
    }

    #[test]
    fn test_update_rejects_bad_email() {
        let store = open_store();
        let created = store.create(ann()).unwrap();
        let err = store
            .update(
                &created.id,
                EmployeeFields {
                    email: Some("nope".to_string()),
                    ..Default::default()
                },
            )
            .unwrap_err();
        assert_eq!(
            err,
            StoreError::Validation(vec!["Invalid email format".to_string()])
        );
    }

    #[test]
    fn test_update_to_taken_email_is_duplicate() {
        let store = open_store();
        store.create(ann()).unwrap();
        let bob = store
            .create(EmployeeFields {
                name: Some("Bob".to_string()),
                email: Some("bob@x.com".to_string()),
                department: Some("Eng".to_string()),
            })
            .unwrap();

        let err = store
            .update(
                &bob.id,
                EmployeeFields {
                    email: Some("ann@x.com".to_string()),
                    ..Default::default()
                },
            )
            .unwrap_err();
        assert_eq!(err, StoreError::DuplicateEmail);
    }

    #[test]
    fn test_delete_then_get_is_not_found() {
        let store = open_store();
        let created = store.create(ann()).unwrap();

        let removed = store.delete_by_id(&created.id).unwrap();
        assert_eq!(removed, created);
        assert_eq!(store.get_by_id(&created.id).unwrap_err(), StoreError::NotFound);
        assert_eq!(
            store.delete_by_id(&created.id).unwrap_err(),
            StoreError::NotFound
        );
    }

    #[test]
    fn test_malformed_id_is_distinct_from_not_found() {
        let store = open_store();
        let err = store.get_by_id("not-a-valid-id-format").unwrap_err();
        assert!(matches!(err, StoreError::InvalidId(_)));

        // a well-formed but absent id is NotFound
        let absent = Uuid::new_v4().to_string();
        assert_eq!(store.get_by_id(&absent).unwrap_err(), StoreError::NotFound);
    }

    #[test]
    fn test_list_all_in_insertion_order() {
        let store = open_store();
        for n in 0..3 {
            store
                .create(EmployeeFields {
                    name: Some(format!("P{}", n)),
                    email: Some(format!("p{}@x.com", n)),
                    department: Some("Ops".to_string()),
                })
                .unwrap();
        }
        let names: Vec<_> = store
            .list_all()
            .unwrap()
            .into_iter()
            .map(|e| e.name)
            .collect();
        assert_eq!(names, vec!["P0", "P1", "P2"]);
    }
}
