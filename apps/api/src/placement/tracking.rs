//! Student-initiated records: job applications, project submissions,
//! mock interview requests and notification state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::learning::{NewProject, Project, ProjectStatus};
use crate::models::placement::{
    InterviewStatus, JobApplication, JobOpening, MockInterview, NewMockInterview, Notification,
};
use crate::models::student::{Student, StudentUpdate};
use crate::store::Store;

pub const DEFAULT_PROJECT_TITLE: &str = "Project Submission";

/// A job opening with its display salary band.
#[derive(Debug, Serialize)]
pub struct OpeningView {
    #[serde(flatten)]
    pub opening: JobOpening,
    pub salary_range: String,
}

#[derive(Debug, Serialize)]
pub struct PlacementForm {
    pub student: Student,
    pub job_openings: Vec<OpeningView>,
    pub applications: Vec<JobApplication>,
}

/// Selected openings plus the contact details the form also edits.
#[derive(Debug, Default, Deserialize)]
pub struct ApplicationForm {
    #[serde(default)]
    pub job_opening: Vec<Uuid>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub linkedin: Option<String>,
    pub github: Option<String>,
    pub portfolio: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ProjectForm {
    pub title: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub github_url: String,
    #[serde(default)]
    pub live_demo_url: String,
    #[serde(default)]
    pub technologies: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct InterviewRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub preferred_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize)]
pub struct NotificationFeed {
    pub notifications: Vec<Notification>,
    pub unread_count: usize,
}

pub async fn placement_form(store: &dyn Store, student: Student) -> Result<PlacementForm, AppError> {
    let job_openings = store
        .list_active_job_openings()
        .await?
        .into_iter()
        .map(|opening| OpeningView {
            salary_range: opening.salary_range(),
            opening,
        })
        .collect();
    let applications = store.list_job_applications(student.id).await?;
    Ok(PlacementForm {
        student,
        job_openings,
        applications,
    })
}

/// Applies to every selected opening and saves the contact fields.
///
/// All ids are checked before anything is written, so an unknown id leaves
/// no partial applications behind.
pub async fn apply(
    store: &dyn Store,
    student: &Student,
    form: &ApplicationForm,
) -> Result<Student, AppError> {
    for job_id in &form.job_opening {
        if store.get_job_opening(*job_id).await?.is_none() {
            warn!("Student {} applied to unknown opening {}", student.id, job_id);
            return Err(AppError::NotFound(format!("Job opening {job_id} not found")));
        }
    }

    for job_id in &form.job_opening {
        if store.create_job_application(student.id, *job_id).await? {
            info!("Student {} applied to opening {}", student.id, job_id);
        }
    }

    let mut update = StudentUpdate::from(student);
    let contact = [
        (&mut update.phone, &form.phone),
        (&mut update.address, &form.address),
        (&mut update.linkedin_profile, &form.linkedin),
        (&mut update.github_profile, &form.github),
        (&mut update.portfolio, &form.portfolio),
    ];
    for (field, value) in contact {
        if let Some(v) = value {
            *field = v.trim().to_string();
        }
    }
    store.update_student(student.id, &update).await
}

pub async fn submit_project(
    store: &dyn Store,
    student_id: Uuid,
    form: ProjectForm,
) -> Result<Project, AppError> {
    let title = form
        .title
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| DEFAULT_PROJECT_TITLE.to_string());

    let project = store
        .insert_project(&NewProject {
            student_id,
            title,
            description: form.description,
            github_url: form.github_url,
            live_demo_url: form.live_demo_url,
            technologies: form.technologies,
            status: ProjectStatus::Submitted,
            submitted_at: Some(Utc::now()),
        })
        .await?;
    info!("Student {} submitted project '{}'", student_id, project.title);
    Ok(project)
}

pub async fn request_mock_interview(
    store: &dyn Store,
    student_id: Uuid,
    request: InterviewRequest,
) -> Result<MockInterview, AppError> {
    let title = request.title.trim();
    if title.is_empty() {
        return Err(AppError::Validation("Interview title is required.".to_string()));
    }

    let interview = store
        .insert_mock_interview(&NewMockInterview {
            student_id,
            title: title.to_string(),
            description: request.description,
            requested_date: request.preferred_date.unwrap_or_else(Utc::now),
        })
        .await?;
    info!("Student {} requested mock interview {}", student_id, interview.id);
    Ok(interview)
}

pub async fn cancel_mock_interview(
    store: &dyn Store,
    student_id: Uuid,
    interview_id: Uuid,
) -> Result<MockInterview, AppError> {
    let interview = store
        .get_mock_interview(student_id, interview_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Mock interview {interview_id} not found")))?;

    if interview.has_status(InterviewStatus::Completed) {
        return Err(AppError::Validation(
            "A completed interview cannot be cancelled.".to_string(),
        ));
    }
    if interview.has_status(InterviewStatus::Cancelled) {
        return Err(AppError::Validation(
            "This interview is already cancelled.".to_string(),
        ));
    }

    let cancelled = store
        .set_mock_interview_status(interview_id, InterviewStatus::Cancelled)
        .await?;
    info!("Student {} cancelled mock interview {}", student_id, interview_id);
    Ok(cancelled)
}

pub async fn notification_feed(
    store: &dyn Store,
    student_id: Uuid,
) -> Result<NotificationFeed, AppError> {
    let notifications = store.list_notifications(student_id).await?;
    let unread_count = notifications.iter().filter(|n| !n.is_read).count();
    Ok(NotificationFeed {
        notifications,
        unread_count,
    })
}

pub async fn mark_notification_read(
    store: &dyn Store,
    student_id: Uuid,
    notification_id: Uuid,
) -> Result<(), AppError> {
    if store
        .mark_notification_read(student_id, notification_id)
        .await?
    {
        Ok(())
    } else {
        Err(AppError::NotFound(format!(
            "Notification {notification_id} not found"
        )))
    }
}
