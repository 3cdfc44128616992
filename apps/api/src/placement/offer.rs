use chrono::{Duration, NaiveDate};
use tracing::info;

use crate::errors::AppError;
use crate::models::placement::{NewOfferLetter, OfferLetter};
use crate::models::student::Student;
use crate::store::Store;

pub const DEFAULT_TITLE: &str = "Full Stack Developer Intern";
pub const DEFAULT_REPORTING_TO: &str = "Senior Engineering Manager";
pub const DEFAULT_LOCATION: &str = "Hyderabad (Hybrid)";
pub const DEFAULT_COMPENSATION: f64 = 15000.00;
pub const DEFAULT_START_OFFSET_DAYS: i64 = 30;

/// The standard internship offer issued on first view.
pub fn default_offer(student_id: uuid::Uuid, company: &str, today: NaiveDate) -> NewOfferLetter {
    NewOfferLetter {
        student_id,
        title: DEFAULT_TITLE.to_string(),
        company: company.to_string(),
        start_date: today + Duration::days(DEFAULT_START_OFFSET_DAYS),
        compensation: DEFAULT_COMPENSATION,
        reporting_to: DEFAULT_REPORTING_TO.to_string(),
        location: DEFAULT_LOCATION.to_string(),
        issued_date: today,
    }
}

/// Latest offer letter for the student, issuing the default one if there is none.
pub async fn get_or_issue(
    store: &dyn Store,
    student: &Student,
    company: &str,
    today: NaiveDate,
) -> Result<OfferLetter, AppError> {
    if let Some(letter) = store.latest_offer_letter(student.id).await? {
        return Ok(letter);
    }
    let letter = store
        .get_or_issue_offer_letter(&default_offer(student.id, company, today))
        .await?;
    info!("Offer letter {} for student {}", letter.id, student.id);
    Ok(letter)
}

/// Latest offer letter, or NotFound. Never issues one.
pub async fn require_latest(store: &dyn Store, student: &Student) -> Result<OfferLetter, AppError> {
    store
        .latest_offer_letter(student.id)
        .await?
        .ok_or_else(|| AppError::NotFound("No offer letter has been issued".to_string()))
}
