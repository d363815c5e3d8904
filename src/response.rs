//! Standard response envelope helpers.

use axum::{http::StatusCode, Json};
use serde::Serialize;

/// `{message, data}` body used by create and update.
#[derive(Serialize)]
pub struct MessageData<T> {
    pub message: String,
    pub data: T,
}

/// `{data}` body used by single-record reads.
#[derive(Serialize)]
pub struct DataOnly<T> {
    pub data: T,
}

/// `{message}` body used by delete and the welcome banner.
#[derive(Serialize)]
pub struct MessageOnly {
    pub message: String,
}

/// `{data, meta}` body used by paginated lists.
#[derive(Serialize)]
pub struct Paginated<T> {
    pub data: Vec<T>,
    pub meta: PageMeta,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    pub total: i64,
    pub page: i64,
    pub limit: i64,
    pub total_pages: i64,
}

pub fn created<T: Serialize>(message: &str, data: T) -> (StatusCode, Json<MessageData<T>>) {
    (
        StatusCode::CREATED,
        Json(MessageData {
            message: message.to_string(),
            data,
        }),
    )
}

pub fn updated<T: Serialize>(message: &str, data: T) -> (StatusCode, Json<MessageData<T>>) {
    (
        StatusCode::OK,
        Json(MessageData {
            message: message.to_string(),
            data,
        }),
    )
}

pub fn one<T: Serialize>(data: T) -> (StatusCode, Json<DataOnly<T>>) {
    (StatusCode::OK, Json(DataOnly { data }))
}

pub fn message(message: &str) -> (StatusCode, Json<MessageOnly>) {
    (
        StatusCode::OK,
        Json(MessageOnly {
            message: message.to_string(),
        }),
    )
}

pub fn page<T: Serialize>(data: Vec<T>, meta: PageMeta) -> (StatusCode, Json<Paginated<T>>) {
    (StatusCode::OK, Json(Paginated { data, meta }))
}
