use crate::dtos::{parse_employee_id, EmployeeRequest, EmployeeResponse};
use crate::services::EmployeeError;
use crate::startup::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use service_core::error::AppError;

/// Literal payload returned by a successful delete.
pub const DELETE_CONFIRMATION: &str = "record Deleted";

pub async fn list_employees(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let employees: Vec<EmployeeResponse> = state
        .employees
        .list()
        .await?
        .into_iter()
        .map(EmployeeResponse::from)
        .collect();

    Ok(Json(employees))
}

pub async fn create_employee(
    State(state): State<AppState>,
    payload: Result<Json<EmployeeRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(request) =
        payload.map_err(|rejection| EmployeeError::CreateBodyRejected(rejection.body_text()))?;

    let created = state.employees.create(request).await?;

    Ok((StatusCode::CREATED, Json(EmployeeResponse::from(created))))
}

pub async fn update_employee(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    payload: Result<Json<EmployeeRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_employee_id(&raw_id)?;
    let Json(request) =
        payload.map_err(|rejection| EmployeeError::MalformedBody(rejection.body_text()))?;

    state.employees.update(id, &request).await?;

    Ok(Json(EmployeeResponse::echo(raw_id, request)))
}

pub async fn delete_employee(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_employee_id(&raw_id)?;
    state.employees.delete(id).await?;

    Ok(Json(DELETE_CONFIRMATION))
}
