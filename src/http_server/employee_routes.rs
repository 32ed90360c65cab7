//! Employee HTTP Routes
//!
//! The five CRUD endpoints, mapped directly onto the store gateway.
//!
//! Bodies are taken through `JsonRejection` rather than a bare `Json`
//! extractor so that malformed JSON and unknown fields come back as a 400
//! with the `{"error"}` shape instead of the framework's plain-text
//! rejection.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::{delete, get, post, put},
    Json, Router,
};

use crate::store::{Employee, EmployeeFields, EmployeeStore};

use super::errors::ApiResult;

/// State shared across employee handlers
pub struct EmployeeState {
    pub store: EmployeeStore,
}

impl EmployeeState {
    pub fn new(store: EmployeeStore) -> Self {
        Self { store }
    }
}

/// Create employee routes
pub fn employee_routes(state: Arc<EmployeeState>) -> Router {
    Router::new()
        .route("/employees", get(list_employees_handler))
        .route("/employees", post(create_employee_handler))
        .route("/employees/:id", get(get_employee_handler))
        .route("/employees/:id", put(update_employee_handler))
        .route("/employees/:id", delete(delete_employee_handler))
        .with_state(state)
}

async fn list_employees_handler(
    State(state): State<Arc<EmployeeState>>,
) -> ApiResult<Json<Vec<Employee>>> {
    Ok(Json(state.store.list_all()?))
}

async fn get_employee_handler(
    State(state): State<Arc<EmployeeState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<Employee>> {
    Ok(Json(state.store.get_by_id(&id)?))
}

async fn create_employee_handler(
    State(state): State<Arc<EmployeeState>>,
    payload: Result<Json<EmployeeFields>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Employee>)> {
    let Json(fields) = payload?;
    let employee = state.store.create(fields)?;
    Ok((StatusCode::CREATED, Json(employee)))
}

async fn update_employee_handler(
    State(state): State<Arc<EmployeeState>>,
    Path(id): Path<String>,
    payload: Result<Json<EmployeeFields>, JsonRejection>,
) -> ApiResult<Json<Employee>> {
    let Json(fields) = payload?;
    Ok(Json(state.store.update(&id, fields)?))
}

async fn delete_employee_handler(
    State(state): State<Arc<EmployeeState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<Employee>> {
    Ok(Json(state.store.delete_by_id(&id)?))
}
