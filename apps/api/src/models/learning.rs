use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Session {
    pub id: Uuid,
    pub title: String,
    pub topic: String,
    pub mentor: String,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub description: String,
    pub recording_url: String,
    pub is_completed: bool,
    pub created_at: DateTime<Utc>,
}

impl Session {
    pub fn has_recording(&self) -> bool {
        !self.recording_url.trim().is_empty()
    }
}

/// An attendance mark joined with the session it refers to.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AttendanceRecord {
    pub id: Uuid,
    pub student_id: Uuid,
    pub session_id: Uuid,
    pub is_present: bool,
    pub marked_at: DateTime<Utc>,
    pub session_title: String,
    pub session_topic: String,
    pub session_mentor: String,
    pub session_date: NaiveDate,
    pub session_start_time: NaiveTime,
    pub session_end_time: NaiveTime,
    pub session_recording_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct StudyMaterial {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub file_url: String,
    /// pdf | doc | docx | ppt | pptx | zip | epub | other
    pub file_type: String,
    pub file_size: Option<i64>,
    pub uploaded_at: DateTime<Utc>,
    pub is_active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Certificate {
    pub id: Uuid,
    pub student_id: Uuid,
    pub title: String,
    pub description: String,
    pub issued_date: NaiveDate,
    pub is_verified: bool,
    pub verification_code: String,
}

/// Eight upper-case hex characters taken from a fresh v4 UUID.
pub fn new_verification_code() -> String {
    Uuid::new_v4().simple().to_string()[..8].to_uppercase()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    InProgress,
    Completed,
    Submitted,
}

impl ProjectStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectStatus::InProgress => "in_progress",
            ProjectStatus::Completed => "completed",
            ProjectStatus::Submitted => "submitted",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Project {
    pub id: Uuid,
    pub student_id: Uuid,
    pub title: String,
    pub description: String,
    pub github_url: String,
    pub live_demo_url: String,
    pub technologies: String,
    pub status: String,
    pub submitted_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewProject {
    pub student_id: Uuid,
    pub title: String,
    pub description: String,
    pub github_url: String,
    pub live_demo_url: String,
    pub technologies: String,
    pub status: ProjectStatus,
    pub submitted_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct InternshipAgendaItem {
    pub id: Uuid,
    pub week: String,
    pub agenda: String,
    pub deliverables: String,
    pub notes: String,
    pub responsibilities: String,
    pub sort_order: i32,
}
