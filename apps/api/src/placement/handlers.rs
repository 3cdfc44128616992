use anyhow::anyhow;
use axum::{
    extract::State,
    http::{header, HeaderValue},
    response::IntoResponse,
    Json,
};
use bytes::Bytes;
use chrono::Utc;
use serde::Serialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::extract::{AppJson, AppPath};
use crate::models::learning::Project;
use crate::models::placement::{MockInterview, OfferLetter};
use crate::models::student::Student;
use crate::placement::offer;
use crate::placement::readiness::{readiness, Readiness};
use crate::placement::tracking::{
    self, ApplicationForm, InterviewRequest, NotificationFeed, PlacementForm, ProjectForm,
};
use crate::profile::CurrentStudent;
use crate::render::offer_letter::{offer_letter_filename, render_offer_letter, Letterhead};
use crate::routes::ActionResponse;
use crate::state::AppState;

#[derive(Serialize)]
pub struct ProjectSubmitted {
    pub success: bool,
    pub message: String,
    pub project: Project,
}

#[derive(Serialize)]
pub struct InterviewResponse {
    pub success: bool,
    pub message: String,
    pub interview: MockInterview,
}

#[derive(Serialize)]
pub struct OfferLetterPage {
    pub student: Student,
    pub offer_letter: OfferLetter,
}

/// GET /api/v1/placement
pub async fn handle_placement_form(
    State(state): State<AppState>,
    current: CurrentStudent,
) -> Result<Json<PlacementForm>, AppError> {
    let form = tracking::placement_form(state.store.as_ref(), current.student).await?;
    Ok(Json(form))
}

/// POST /api/v1/placement/apply
pub async fn handle_apply(
    State(state): State<AppState>,
    current: CurrentStudent,
    AppJson(form): AppJson<ApplicationForm>,
) -> Result<Json<ActionResponse>, AppError> {
    tracking::apply(state.store.as_ref(), &current.student, &form).await?;
    Ok(Json(ActionResponse::ok("Application submitted successfully!")))
}

/// GET /api/v1/placement/readiness
pub async fn handle_readiness(
    State(state): State<AppState>,
    current: CurrentStudent,
) -> Result<Json<Readiness>, AppError> {
    Ok(Json(readiness(state.store.as_ref(), &current.student).await?))
}

/// POST /api/v1/projects
pub async fn handle_submit_project(
    State(state): State<AppState>,
    current: CurrentStudent,
    AppJson(form): AppJson<ProjectForm>,
) -> Result<Json<ProjectSubmitted>, AppError> {
    let project = tracking::submit_project(state.store.as_ref(), current.student.id, form).await?;
    Ok(Json(ProjectSubmitted {
        success: true,
        message: "Project submitted successfully!".to_string(),
        project,
    }))
}

/// POST /api/v1/mock-interviews
pub async fn handle_request_interview(
    State(state): State<AppState>,
    current: CurrentStudent,
    AppJson(request): AppJson<InterviewRequest>,
) -> Result<Json<InterviewResponse>, AppError> {
    let interview =
        tracking::request_mock_interview(state.store.as_ref(), current.student.id, request).await?;
    Ok(Json(InterviewResponse {
        success: true,
        message: "Mock interview requested.".to_string(),
        interview,
    }))
}

/// POST /api/v1/mock-interviews/:id/cancel
pub async fn handle_cancel_interview(
    State(state): State<AppState>,
    current: CurrentStudent,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<InterviewResponse>, AppError> {
    let interview =
        tracking::cancel_mock_interview(state.store.as_ref(), current.student.id, id).await?;
    Ok(Json(InterviewResponse {
        success: true,
        message: "Mock interview cancelled.".to_string(),
        interview,
    }))
}

/// GET /api/v1/notifications
pub async fn handle_notifications(
    State(state): State<AppState>,
    current: CurrentStudent,
) -> Result<Json<NotificationFeed>, AppError> {
    Ok(Json(
        tracking::notification_feed(state.store.as_ref(), current.student.id).await?,
    ))
}

/// POST /api/v1/notifications/:id/read
pub async fn handle_mark_read(
    State(state): State<AppState>,
    current: CurrentStudent,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<ActionResponse>, AppError> {
    tracking::mark_notification_read(state.store.as_ref(), current.student.id, id).await?;
    Ok(Json(ActionResponse::ok("Notification marked as read.")))
}

/// GET /api/v1/offer-letter
pub async fn handle_offer_letter(
    State(state): State<AppState>,
    current: CurrentStudent,
) -> Result<Json<OfferLetterPage>, AppError> {
    let offer_letter = offer::get_or_issue(
        state.store.as_ref(),
        &current.student,
        &state.config.company_name,
        Utc::now().date_naive(),
    )
    .await?;
    Ok(Json(OfferLetterPage {
        student: current.student,
        offer_letter,
    }))
}

/// GET /api/v1/offer-letter/download
pub async fn handle_offer_letter_download(
    State(state): State<AppState>,
    current: CurrentStudent,
) -> Result<impl IntoResponse, AppError> {
    let letter = offer::require_latest(state.store.as_ref(), &current.student).await?;
    let letterhead = Letterhead {
        company_name: &state.config.company_name,
        tagline: &state.config.company_tagline,
    };
    let pdf = render_offer_letter(&current.student, &letter, &letterhead)?;

    let disposition = format!(
        "attachment; filename=\"{}\"",
        offer_letter_filename(&current.student.full_name)
    );
    let disposition = HeaderValue::from_str(&disposition)
        .map_err(|e| anyhow!("invalid content-disposition for student {}: {e}", current.student.id))?;

    Ok((
        [
            (header::CONTENT_TYPE, HeaderValue::from_static("application/pdf")),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        Bytes::from(pdf),
    ))
}
