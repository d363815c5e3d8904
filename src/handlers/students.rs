//! Student CRUD handlers: create, list, read, update, delete.
//!
//! Each handler runs its chain in order: param check, then body
//! validation, then the operation.

use crate::error::AppError;
use crate::model::{DeleteQuery, ListQuery, StudentInput};
use crate::response;
use crate::service::{
    validate_reg_no_param, validate_student_data, StudentService, ValidationMode,
};
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    Json,
};

pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<StudentInput>,
) -> Result<impl IntoResponse, AppError> {
    let errors = validate_student_data(&body, ValidationMode::Create);
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }
    let student = StudentService::create(state.repo.as_ref(), body).await?;
    Ok(response::created("Student created successfully", student))
}

pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let (rows, meta) = StudentService::list(state.repo.as_ref(), &query).await?;
    Ok(response::page(rows, meta))
}

pub async fn get_by_reg_no(
    State(state): State<AppState>,
    Path(reg_no): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    validate_reg_no_param(&reg_no)?;
    let student = StudentService::get_by_registration_no(state.repo.as_ref(), &reg_no).await?;
    Ok(response::one(student))
}

pub async fn update(
    State(state): State<AppState>,
    Path(reg_no): Path<String>,
    Json(body): Json<StudentInput>,
) -> Result<impl IntoResponse, AppError> {
    validate_reg_no_param(&reg_no)?;
    let errors = validate_student_data(&body, ValidationMode::Update);
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }
    let student = StudentService::update(state.repo.as_ref(), &reg_no, body).await?;
    Ok(response::updated("Student updated successfully", student))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(reg_no): Path<String>,
    Query(query): Query<DeleteQuery>,
) -> Result<impl IntoResponse, AppError> {
    validate_reg_no_param(&reg_no)?;
    let msg = StudentService::delete(state.repo.as_ref(), &reg_no, query.is_permanent()).await?;
    Ok(response::message(msg))
}
