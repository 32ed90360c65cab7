//! rosterd - a minimal employee directory service
//!
//! A REST backend over a document store: five CRUD routes plus a health
//! probe, with validation and error mapping at the route boundary.

pub mod cli;
pub mod http_server;
pub mod observability;
pub mod store;
