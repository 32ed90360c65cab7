//! # Employee Schema
//!
//! The Employee record, the input schema for create/update, and field
//! validation. Validation accumulates every violated constraint rather
//! than stopping at the first.

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// local-part@domain with at least one dot in the domain. Syntax only,
/// no DNS or mailbox verification.
static EMAIL_SYNTAX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@.]+(\.[^\s@.]+)+$").expect("email regex"));

/// One employee record as persisted and served
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    /// Store-assigned UUID, immutable
    pub id: String,
    pub name: String,
    pub email: String,
    pub department: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Mutable fields accepted from clients.
///
/// This is the whole whitelist: `id` and the timestamps are not part of the
/// schema, and unknown fields are rejected at deserialization, so a request
/// body can never overwrite store-managed fields.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EmployeeFields {
    pub name: Option<String>,
    pub email: Option<String>,
    pub department: Option<String>,
}

impl EmployeeFields {
    /// Validate for creation: all three fields must be present and
    /// non-empty, and the email must be well-formed. Returns one message
    /// per violated constraint.
    pub fn validate_create(&self) -> Vec<String> {
        let mut violations = Vec::new();

        if !is_present(&self.name) {
            violations.push("Name is required".to_string());
        }
        match &self.email {
            Some(email) if !email.is_empty() => {
                if !is_valid_email(email) {
                    violations.push("Invalid email format".to_string());
                }
            }
            _ => violations.push("Email is required".to_string()),
        }
        if !is_present(&self.department) {
            violations.push("Department is required".to_string());
        }

        violations
    }

    /// Validate for update: only supplied fields are checked, under the
    /// same rules as creation.
    pub fn validate_update(&self) -> Vec<String> {
        let mut violations = Vec::new();

        if let Some(name) = &self.name {
            if name.is_empty() {
                violations.push("Name is required".to_string());
            }
        }
        if let Some(email) = &self.email {
            if email.is_empty() {
                violations.push("Email is required".to_string());
            } else if !is_valid_email(email) {
                violations.push("Invalid email format".to_string());
            }
        }
        if let Some(department) = &self.department {
            if department.is_empty() {
                violations.push("Department is required".to_string());
            }
        }

        violations
    }
}

fn is_present(field: &Option<String>) -> bool {
    field.as_deref().is_some_and(|s| !s.is_empty())
}

/// Syntax check for an email address
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_SYNTAX.is_match(email)
}
