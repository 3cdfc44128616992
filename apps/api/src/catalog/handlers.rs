use axum::{extract::State, Json};
use chrono::Utc;
use serde::Serialize;

use crate::catalog::services::{self, AttendanceSummary, Dashboard};
use crate::errors::AppError;
use crate::models::learning::{Certificate, InternshipAgendaItem, Project, Session, StudyMaterial};
use crate::models::student::Student;
use crate::profile::CurrentStudent;
use crate::state::AppState;

#[derive(Serialize)]
pub struct StudentProjects {
    pub student: Student,
    pub projects: Vec<Project>,
}

#[derive(Serialize)]
pub struct StudentCertificates {
    pub student: Student,
    pub certificates: Vec<Certificate>,
}

/// GET /api/v1/dashboard
pub async fn handle_dashboard(
    State(state): State<AppState>,
    current: CurrentStudent,
) -> Result<Json<Dashboard>, AppError> {
    let dashboard = services::dashboard(
        state.store.as_ref(),
        current.student,
        Utc::now().date_naive(),
    )
    .await?;
    Ok(Json(dashboard))
}

/// GET /api/v1/sessions
pub async fn handle_sessions(
    State(state): State<AppState>,
    _current: CurrentStudent,
) -> Result<Json<Vec<Session>>, AppError> {
    Ok(Json(state.store.list_sessions().await?))
}

/// GET /api/v1/sessions/recordings
pub async fn handle_recordings(
    State(state): State<AppState>,
    _current: CurrentStudent,
) -> Result<Json<Vec<Session>>, AppError> {
    Ok(Json(services::recordings(state.store.as_ref()).await?))
}

/// GET /api/v1/attendance
pub async fn handle_attendance(
    State(state): State<AppState>,
    current: CurrentStudent,
) -> Result<Json<AttendanceSummary>, AppError> {
    let summary = services::attendance_summary(state.store.as_ref(), current.student.id).await?;
    Ok(Json(summary))
}

/// GET /api/v1/projects
pub async fn handle_projects(
    State(state): State<AppState>,
    current: CurrentStudent,
) -> Result<Json<StudentProjects>, AppError> {
    let projects = state.store.list_projects(current.student.id).await?;
    Ok(Json(StudentProjects {
        student: current.student,
        projects,
    }))
}

/// GET /api/v1/study-materials
pub async fn handle_study_materials(
    State(state): State<AppState>,
    _current: CurrentStudent,
) -> Result<Json<Vec<StudyMaterial>>, AppError> {
    Ok(Json(state.store.list_study_materials().await?))
}

/// GET /api/v1/certificates
pub async fn handle_certificates(
    State(state): State<AppState>,
    current: CurrentStudent,
) -> Result<Json<StudentCertificates>, AppError> {
    let certificates = state.store.list_certificates(current.student.id).await?;
    Ok(Json(StudentCertificates {
        student: current.student,
        certificates,
    }))
}

/// GET /api/v1/internship-agenda
pub async fn handle_agenda(
    State(state): State<AppState>,
    _current: CurrentStudent,
) -> Result<Json<Vec<InternshipAgendaItem>>, AppError> {
    Ok(Json(state.store.list_agenda().await?))
}
