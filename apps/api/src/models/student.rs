use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Student {
    pub id: Uuid,
    pub identity_id: String,
    pub full_name: String,
    pub phone: String,
    pub date_of_birth: Option<NaiveDate>,
    pub address: String,
    pub college: String,
    pub branch: String,
    pub year: String,
    pub linkedin_profile: String,
    pub github_profile: String,
    pub portfolio: String,
    pub enrollment_date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Student {
    /// True once every field the placement team asks for has been filled in.
    pub fn is_profile_complete(&self) -> bool {
        [
            &self.phone,
            &self.address,
            &self.college,
            &self.branch,
            &self.linkedin_profile,
            &self.github_profile,
        ]
        .iter()
        .all(|field| !field.trim().is_empty())
    }
}

/// Values for a Student created on first access.
#[derive(Debug, Clone)]
pub struct NewStudent {
    pub identity_id: String,
    pub full_name: String,
    pub college: String,
    pub branch: String,
    pub year: String,
    pub enrollment_date: NaiveDate,
}

/// Full replacement value set for the mutable profile fields.
#[derive(Debug, Clone, PartialEq)]
pub struct StudentUpdate {
    pub full_name: String,
    pub phone: String,
    pub date_of_birth: Option<NaiveDate>,
    pub address: String,
    pub college: String,
    pub branch: String,
    pub year: String,
    pub linkedin_profile: String,
    pub github_profile: String,
    pub portfolio: String,
}

impl From<&Student> for StudentUpdate {
    fn from(student: &Student) -> Self {
        Self {
            full_name: student.full_name.clone(),
            phone: student.phone.clone(),
            date_of_birth: student.date_of_birth,
            address: student.address.clone(),
            college: student.college.clone(),
            branch: student.branch.clone(),
            year: student.year.clone(),
            linkedin_profile: student.linkedin_profile.clone(),
            github_profile: student.github_profile.clone(),
            portfolio: student.portfolio.clone(),
        }
    }
}
