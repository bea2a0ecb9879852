use crate::{AppState, error::AppError, extract::AuthUser, params::FilterParams};
use analytics::export::{EXPORT_FILE_NAME, to_csv_string};
use analytics::{AggregateResult, QueryResult, SalaryBucket};
use auth::AuthError;
use axum::{
    Json,
    extract::{Path, State},
    http::{StatusCode, header},
    response::IntoResponse,
};
use axum_extra::extract::Query;
use core_types::{Employee, EmployeeUpdate, NewEmployee};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: Uuid,
    pub username: String,
}

#[derive(Debug, Deserialize)]
pub struct PromoteRequest {
    pub new_salary: Decimal,
}

/// Everything the analytics dashboard renders: KPI tiles, the per-department
/// bars and the salary histogram.
#[derive(Debug, Serialize, Deserialize)]
pub struct DashboardResponse {
    /// Head count before filtering, for the "change" delta on the KPI tile.
    pub total_employees: usize,
    pub stats: AggregateResult,
    pub salary_distribution: Vec<SalaryBucket>,
}

/// # POST /api/auth/register
pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(credentials): Json<Credentials>,
) -> Result<impl IntoResponse, AppError> {
    state
        .auth
        .register(&credentials.username, &credentials.password)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({ "username": credentials.username.trim() })),
    ))
}

/// # POST /api/auth/login
/// Exchanges valid credentials for a bearer token.
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(credentials): Json<Credentials>,
) -> Result<Json<LoginResponse>, AppError> {
    if !state
        .auth
        .verify(&credentials.username, &credentials.password)
        .await?
    {
        return Err(AuthError::InvalidCredentials.into());
    }

    let username = credentials.username.trim().to_string();
    let token = state.sessions.open(&username)?;
    let active_sessions = state.sessions.session_count()?;
    tracing::info!(%username, active_sessions, "User logged in.");
    Ok(Json(LoginResponse { token, username }))
}

/// # POST /api/auth/logout
pub async fn logout(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
) -> Result<StatusCode, AppError> {
    state.sessions.close(user.token)?;
    tracing::info!(username = %user.username, "User logged out.");
    Ok(StatusCode::NO_CONTENT)
}

/// # GET /api/employees
/// Lists the employees matching the query-string filters, with aggregates.
pub async fn list_employees(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
    Query(params): Query<FilterParams>,
) -> Result<Json<QueryResult>, AppError> {
    let snapshot = state.employees.list().await?;
    let result = state.engine.apply(&snapshot, &params.into_spec());
    Ok(Json(result))
}

/// # GET /api/employees/export.csv
/// The same query as `list_employees`, rendered as a CSV download.
pub async fn export_employees(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
    Query(params): Query<FilterParams>,
) -> Result<impl IntoResponse, AppError> {
    let snapshot = state.employees.list().await?;
    let result = state.engine.apply(&snapshot, &params.into_spec());
    let body = to_csv_string(&result.filtered)?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", EXPORT_FILE_NAME),
            ),
        ],
        body,
    ))
}

/// # GET /api/employees/:id
pub async fn get_employee(
    Path(id): Path<i64>,
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
) -> Result<Json<Employee>, AppError> {
    Ok(Json(state.employees.get(id).await?))
}

/// # POST /api/employees
pub async fn create_employee(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
    Json(payload): Json<NewEmployee>,
) -> Result<(StatusCode, Json<Employee>), AppError> {
    let employee = state.employees.insert(payload).await?;
    Ok((StatusCode::CREATED, Json(employee)))
}

/// # PUT /api/employees/:id
pub async fn update_employee(
    Path(id): Path<i64>,
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
    Json(payload): Json<EmployeeUpdate>,
) -> Result<Json<Employee>, AppError> {
    Ok(Json(state.employees.update(id, payload).await?))
}

/// # DELETE /api/employees/:id
pub async fn delete_employee(
    Path(id): Path<i64>,
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
) -> Result<StatusCode, AppError> {
    state.employees.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// # POST /api/employees/:id/promote
pub async fn promote_employee(
    Path(id): Path<i64>,
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
    Json(payload): Json<PromoteRequest>,
) -> Result<Json<Employee>, AppError> {
    Ok(Json(state.employees.promote(id, payload.new_salary).await?))
}

/// # GET /api/dashboard
pub async fn get_dashboard(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
    Query(params): Query<FilterParams>,
) -> Result<Json<DashboardResponse>, AppError> {
    let snapshot = state.employees.list().await?;
    let result = state.engine.apply(&snapshot, &params.into_spec());
    let salary_distribution = state
        .engine
        .salary_distribution(&result.filtered, state.salary_histogram_bins)?;

    Ok(Json(DashboardResponse {
        total_employees: snapshot.len(),
        stats: result.stats,
        salary_distribution,
    }))
}
