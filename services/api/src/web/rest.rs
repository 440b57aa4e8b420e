//! services/api/src/web/rest.rs
//!
//! Contains the Axum handlers for the REST API endpoints and the master
//! definition for the OpenAPI specification.

use crate::error::ApiError;
use crate::web::protocol::{
    ErrorResponse, HistoryEntryResponse, OrganizationResponse, SessionRequest, SessionResponse,
    StudentHistoryResponse, StudentRequest, StudentResponse, SummaryResponse,
};
use crate::web::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use std::sync::Arc;
use tutor_roster_core::domain::Organization;
use tutor_roster_core::ports::PortError;
use utoipa::OpenApi;
use uuid::Uuid;

//=========================================================================================
// OpenAPI Master Definition
//=========================================================================================

#[derive(OpenApi)]
#[openapi(
    paths(
        list_organizations_handler,
        list_students_handler,
        add_student_handler,
        get_student_handler,
        edit_student_handler,
        delete_student_handler,
        list_sessions_handler,
        student_history_handler,
        record_session_handler,
        summary_handler,
    ),
    components(
        schemas(
            OrganizationResponse,
            StudentRequest,
            StudentResponse,
            SessionRequest,
            SessionResponse,
            HistoryEntryResponse,
            StudentHistoryResponse,
            SummaryResponse,
            ErrorResponse,
        )
    ),
    tags(
        (name = "Tutor Roster API", description = "Students, sessions and hour balances per organization.")
    )
)]
pub struct ApiDoc;

fn parse_organization(name: &str) -> Result<Organization, ApiError> {
    name.parse::<Organization>()
        .map_err(|e| ApiError::Port(PortError::NotFound(e.0)))
}

//=========================================================================================
// Organization Handlers
//=========================================================================================

/// List the organizations in display order with their student counts.
#[utoipa::path(
    get,
    path = "/organizations",
    responses(
        (status = 200, description = "All organizations", body = [OrganizationResponse])
    )
)]
pub async fn list_organizations_handler(
    State(app_state): State<Arc<AppState>>,
) -> Result<Json<Vec<OrganizationResponse>>, ApiError> {
    let overview = app_state.roster.list_organizations().await?;
    Ok(Json(overview.into_iter().map(Into::into).collect()))
}

/// Dashboard totals for one organization.
#[utoipa::path(
    get,
    path = "/organizations/{org}/summary",
    params(("org" = String, Path, description = "Organization name, e.g. `Ed-tech`.")),
    responses(
        (status = 200, description = "Organization totals", body = SummaryResponse),
        (status = 404, description = "Unknown organization", body = ErrorResponse)
    )
)]
pub async fn summary_handler(
    State(app_state): State<Arc<AppState>>,
    Path(org): Path<String>,
) -> Result<Json<SummaryResponse>, ApiError> {
    let organization = parse_organization(&org)?;
    let summary = app_state.roster.summary(organization).await?;
    Ok(Json(summary.into()))
}

//=========================================================================================
// Student Handlers
//=========================================================================================

#[utoipa::path(
    get,
    path = "/organizations/{org}/students",
    params(("org" = String, Path, description = "Organization name.")),
    responses(
        (status = 200, description = "Students with derived progress", body = [StudentResponse]),
        (status = 404, description = "Unknown organization", body = ErrorResponse)
    )
)]
pub async fn list_students_handler(
    State(app_state): State<Arc<AppState>>,
    Path(org): Path<String>,
) -> Result<Json<Vec<StudentResponse>>, ApiError> {
    let organization = parse_organization(&org)?;
    let students = app_state.roster.list_students(organization).await?;
    Ok(Json(students.into_iter().map(Into::into).collect()))
}

/// Add a student with a fresh hour balance.
#[utoipa::path(
    post,
    path = "/organizations/{org}/students",
    params(("org" = String, Path, description = "Organization name.")),
    request_body = StudentRequest,
    responses(
        (status = 201, description = "Student created", body = StudentResponse),
        (status = 404, description = "Unknown organization", body = ErrorResponse),
        (status = 400, description = "Body is not valid JSON", body = ErrorResponse),
        (status = 422, description = "Field validation failed", body = ErrorResponse)
    )
)]
pub async fn add_student_handler(
    State(app_state): State<Arc<AppState>>,
    Path(org): Path<String>,
    payload: Result<Json<StudentRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let organization = parse_organization(&org)?;
    let Json(req) = payload?;
    let view = app_state.roster.add_student(organization, req.into()).await?;
    Ok((StatusCode::CREATED, Json(StudentResponse::from(view))))
}

#[utoipa::path(
    get,
    path = "/organizations/{org}/students/{student_id}",
    params(
        ("org" = String, Path, description = "Organization name."),
        ("student_id" = Uuid, Path, description = "The student's id.")
    ),
    responses(
        (status = 200, description = "The student", body = StudentResponse),
        (status = 404, description = "Unknown organization or student", body = ErrorResponse)
    )
)]
pub async fn get_student_handler(
    State(app_state): State<Arc<AppState>>,
    Path((org, student_id)): Path<(String, Uuid)>,
) -> Result<Json<StudentResponse>, ApiError> {
    let organization = parse_organization(&org)?;
    let view = app_state.roster.get_student(organization, student_id).await?;
    Ok(Json(view.into()))
}

/// Replace a student's details. Used hours are kept; the total may not drop below them.
#[utoipa::path(
    put,
    path = "/organizations/{org}/students/{student_id}",
    params(
        ("org" = String, Path, description = "Organization name."),
        ("student_id" = Uuid, Path, description = "The student's id.")
    ),
    request_body = StudentRequest,
    responses(
        (status = 200, description = "Student updated", body = StudentResponse),
        (status = 404, description = "Unknown organization or student", body = ErrorResponse),
        (status = 400, description = "Body is not valid JSON", body = ErrorResponse),
        (status = 422, description = "Field validation failed", body = ErrorResponse)
    )
)]
pub async fn edit_student_handler(
    State(app_state): State<Arc<AppState>>,
    Path((org, student_id)): Path<(String, Uuid)>,
    payload: Result<Json<StudentRequest>, JsonRejection>,
) -> Result<Json<StudentResponse>, ApiError> {
    let organization = parse_organization(&org)?;
    let Json(req) = payload?;
    let view = app_state
        .roster
        .edit_student(organization, student_id, req.into())
        .await?;
    Ok(Json(view.into()))
}

/// Delete a student together with all of its sessions.
#[utoipa::path(
    delete,
    path = "/organizations/{org}/students/{student_id}",
    params(
        ("org" = String, Path, description = "Organization name."),
        ("student_id" = Uuid, Path, description = "The student's id.")
    ),
    responses(
        (status = 204, description = "Student deleted"),
        (status = 404, description = "Unknown organization or student", body = ErrorResponse)
    )
)]
pub async fn delete_student_handler(
    State(app_state): State<Arc<AppState>>,
    Path((org, student_id)): Path<(String, Uuid)>,
) -> Result<StatusCode, ApiError> {
    let organization = parse_organization(&org)?;
    app_state.roster.delete_student(organization, student_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

//=========================================================================================
// Session Handlers
//=========================================================================================

/// A student's sessions in the order they were recorded.
#[utoipa::path(
    get,
    path = "/organizations/{org}/students/{student_id}/sessions",
    params(
        ("org" = String, Path, description = "Organization name."),
        ("student_id" = Uuid, Path, description = "The student's id.")
    ),
    responses(
        (status = 200, description = "Sessions in insertion order", body = [SessionResponse]),
        (status = 404, description = "Unknown organization or student", body = ErrorResponse)
    )
)]
pub async fn list_sessions_handler(
    State(app_state): State<Arc<AppState>>,
    Path((org, student_id)): Path<(String, Uuid)>,
) -> Result<Json<Vec<SessionResponse>>, ApiError> {
    let organization = parse_organization(&org)?;
    let sessions = app_state.roster.list_sessions(organization, student_id).await?;
    Ok(Json(sessions.into_iter().map(Into::into).collect()))
}

/// A student's history, newest session first.
#[utoipa::path(
    get,
    path = "/organizations/{org}/students/{student_id}/history",
    params(
        ("org" = String, Path, description = "Organization name."),
        ("student_id" = Uuid, Path, description = "The student's id.")
    ),
    responses(
        (status = 200, description = "Student and sessions", body = StudentHistoryResponse),
        (status = 404, description = "Unknown organization or student", body = ErrorResponse)
    )
)]
pub async fn student_history_handler(
    State(app_state): State<Arc<AppState>>,
    Path((org, student_id)): Path<(String, Uuid)>,
) -> Result<Json<StudentHistoryResponse>, ApiError> {
    let organization = parse_organization(&org)?;
    let history = app_state.roster.student_history(organization, student_id).await?;
    Ok(Json(history.into()))
}

/// Record a session and charge its hours to the student.
#[utoipa::path(
    post,
    path = "/organizations/{org}/sessions",
    params(("org" = String, Path, description = "Organization name.")),
    request_body = SessionRequest,
    responses(
        (status = 201, description = "Session recorded", body = SessionResponse),
        (status = 404, description = "Unknown organization", body = ErrorResponse),
        (status = 400, description = "Body is not valid JSON", body = ErrorResponse),
        (status = 422, description = "Field validation failed", body = ErrorResponse)
    )
)]
pub async fn record_session_handler(
    State(app_state): State<Arc<AppState>>,
    Path(org): Path<String>,
    payload: Result<Json<SessionRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let organization = parse_organization(&org)?;
    let Json(req) = payload?;
    let session = app_state.roster.record_session(organization, req.into()).await?;
    Ok((StatusCode::CREATED, Json(SessionResponse::from(session))))
}
