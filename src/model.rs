//! Student entity and request/query payloads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A student record as stored and as returned in JSON responses.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub registration_no: String,
    pub name: String,
    #[serde(rename = "class")]
    #[sqlx(rename = "class")]
    pub class_name: String,
    pub roll_no: i32,
    pub contact_number: String,
    pub status: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields for an insert. `status` is always forced to true by the service.
#[derive(Debug, Clone)]
pub struct NewStudent {
    pub registration_no: String,
    pub name: String,
    pub class_name: String,
    pub roll_no: i32,
    pub contact_number: String,
}

/// Partial update. `None` means "leave unchanged".
#[derive(Debug, Clone, Default)]
pub struct StudentChanges {
    pub name: Option<String>,
    pub class_name: Option<String>,
    pub roll_no: Option<i32>,
    pub contact_number: Option<String>,
    pub status: Option<bool>,
}

impl StudentChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.class_name.is_none()
            && self.roll_no.is_none()
            && self.contact_number.is_none()
            && self.status.is_none()
    }
}

/// Raw request body for create and update. `roll_no` and `status` stay
/// untyped: clients may send the roll number as a number or a numeric
/// string, and any boolean-coercible value for the status. Coercion
/// lives in `service::validation`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StudentInput {
    pub registration_no: Option<String>,
    pub name: Option<String>,
    #[serde(rename = "class")]
    pub class_name: Option<String>,
    pub roll_no: Option<Value>,
    pub contact_number: Option<String>,
    /// An explicit `"status": null` must reach the merge (null coerces
    /// to false, deactivating the record), so a supplied null is kept
    /// as `Some(Value::Null)` instead of collapsing into "absent".
    #[serde(deserialize_with = "explicit_null")]
    pub status: Option<Value>,
}

fn explicit_null<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// Query string for GET /students.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub status: Option<String>,
}

/// Query string for DELETE /students/:reg_no.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeleteQuery {
    pub permanent: Option<String>,
}

impl DeleteQuery {
    /// Permanent deletion requires the literal string "true".
    pub fn is_permanent(&self) -> bool {
        self.permanent.as_deref() == Some("true")
    }
}
