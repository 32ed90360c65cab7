//! Employee record store: schema, validation, and the document-store seam.

pub mod backend;
pub mod employee;
pub mod errors;
pub mod gateway;

pub use backend::{BackendError, CollectionSpec, DocumentStore, MemoryStore};
pub use employee::{Employee, EmployeeFields};
pub use errors::{StoreError, StoreResult};
pub use gateway::{EmployeeStore, EMPLOYEES_COLLECTION};
