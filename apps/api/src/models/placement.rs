use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JobOpening {
    pub id: Uuid,
    pub title: String,
    pub company: String,
    pub description: String,
    pub requirements: String,
    pub location: String,
    /// In lakhs per annum.
    pub salary_min: Option<f64>,
    pub salary_max: Option<f64>,
    /// full_time | part_time | internship | contract
    pub job_type: String,
    pub is_active: bool,
    pub posted_at: DateTime<Utc>,
    pub application_deadline: Option<NaiveDate>,
}

impl JobOpening {
    pub fn salary_range(&self) -> String {
        let positive = |v: Option<f64>| v.filter(|amount| *amount > 0.0);
        match (positive(self.salary_min), positive(self.salary_max)) {
            (Some(min), Some(max)) => format!("₹{min:.2} - ₹{max:.2} LPA"),
            (Some(min), None) => format!("₹{min:.2} LPA+"),
            (None, Some(max)) => format!("Up to ₹{max:.2} LPA"),
            (None, None) => "Not disclosed".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JobApplication {
    pub id: Uuid,
    pub student_id: Uuid,
    pub job_opening_id: Uuid,
    pub applied_at: DateTime<Utc>,
    /// applied | under_review | shortlisted | interviewed | selected | rejected
    pub status: String,
    pub cover_letter: String,
    pub linkedin_profile: String,
    pub github_profile: String,
    pub portfolio_url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterviewStatus {
    Requested,
    Scheduled,
    Completed,
    Cancelled,
}

impl InterviewStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InterviewStatus::Requested => "requested",
            InterviewStatus::Scheduled => "scheduled",
            InterviewStatus::Completed => "completed",
            InterviewStatus::Cancelled => "cancelled",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MockInterview {
    pub id: Uuid,
    pub student_id: Uuid,
    pub title: String,
    pub description: String,
    pub requested_date: DateTime<Utc>,
    pub scheduled_date: Option<DateTime<Utc>>,
    pub status: String,
    pub feedback: String,
    pub created_at: DateTime<Utc>,
}

impl MockInterview {
    pub fn has_status(&self, status: InterviewStatus) -> bool {
        self.status == status.as_str()
    }
}

#[derive(Debug, Clone)]
pub struct NewMockInterview {
    pub student_id: Uuid,
    pub title: String,
    pub description: String,
    pub requested_date: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Notification {
    pub id: Uuid,
    pub student_id: Uuid,
    pub title: String,
    pub message: String,
    /// info | warning | success | error
    pub notification_type: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct OfferLetter {
    pub id: Uuid,
    pub student_id: Uuid,
    pub title: String,
    pub company: String,
    pub start_date: NaiveDate,
    /// Monthly stipend in rupees.
    pub compensation: f64,
    pub reporting_to: String,
    pub location: String,
    pub issued_date: NaiveDate,
    pub is_accepted: bool,
    pub accepted_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone)]
pub struct NewOfferLetter {
    pub student_id: Uuid,
    pub title: String,
    pub company: String,
    pub start_date: NaiveDate,
    pub compensation: f64,
    pub reporting_to: String,
    pub location: String,
    pub issued_date: NaiveDate,
}
