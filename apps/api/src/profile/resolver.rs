//! Maps an authenticated identity onto its Student record and applies
//! profile and credential edits.

use chrono::NaiveDate;
use serde::Deserialize;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::identity::Identity;
use crate::models::student::{NewStudent, Student, StudentUpdate};
use crate::profile::credentials::{hash_password, verify_password};
use crate::store::Store;

pub const DEFAULT_COLLEGE: &str = "Default College";
pub const DEFAULT_BRANCH: &str = "Computer Science";
pub const DEFAULT_YEAR: &str = "1st";

/// Returns the identity's Student, creating it with portal defaults on first visit.
pub async fn resolve(
    store: &dyn Store,
    identity: &Identity,
    today: NaiveDate,
) -> Result<Student, AppError> {
    if let Some(student) = store.find_student_by_identity(&identity.id).await? {
        return Ok(student);
    }

    let student = store
        .get_or_create_student(&NewStudent {
            identity_id: identity.id.clone(),
            full_name: identity.display_name(),
            college: DEFAULT_COLLEGE.to_string(),
            branch: DEFAULT_BRANCH.to_string(),
            year: DEFAULT_YEAR.to_string(),
            enrollment_date: today,
        })
        .await?;
    info!("Resolved new student {} for identity {}", student.id, identity.id);
    Ok(student)
}

/// Profile edit form. Absent fields keep their stored value.
#[derive(Debug, Default, Deserialize)]
pub struct ProfileForm {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub address: Option<String>,
    pub college: Option<String>,
    pub branch: Option<String>,
    pub year: Option<String>,
    pub linkedin_profile: Option<String>,
    pub github_profile: Option<String>,
    pub portfolio: Option<String>,
}

fn replace(target: &mut String, value: &Option<String>) {
    if let Some(v) = value {
        *target = v.trim().to_string();
    }
}

/// Builds the replacement value set: stored values overlaid with the form.
pub fn apply_form(student: &Student, identity: &Identity, form: &ProfileForm) -> StudentUpdate {
    let mut update = StudentUpdate::from(student);

    if form.first_name.is_some() || form.last_name.is_some() {
        let renamed = Identity {
            first_name: form.first_name.clone().or_else(|| identity.first_name.clone()),
            last_name: form.last_name.clone().or_else(|| identity.last_name.clone()),
            ..identity.clone()
        };
        if let Some(full_name) = renamed.full_name() {
            update.full_name = full_name;
        }
    }

    replace(&mut update.phone, &form.phone);
    replace(&mut update.address, &form.address);
    replace(&mut update.college, &form.college);
    replace(&mut update.branch, &form.branch);
    replace(&mut update.year, &form.year);
    replace(&mut update.linkedin_profile, &form.linkedin_profile);
    replace(&mut update.github_profile, &form.github_profile);
    replace(&mut update.portfolio, &form.portfolio);
    if form.date_of_birth.is_some() {
        update.date_of_birth = form.date_of_birth;
    }
    update
}

pub async fn update_profile(
    store: &dyn Store,
    student: &Student,
    identity: &Identity,
    form: &ProfileForm,
) -> Result<Student, AppError> {
    let update = apply_form(student, identity, form);
    let updated = store.update_student(student.id, &update).await?;
    info!("Updated profile of student {}", student.id);
    Ok(updated)
}

#[derive(Debug, Deserialize)]
pub struct PasswordChange {
    #[serde(default)]
    pub current_password: String,
    #[serde(default)]
    pub new_password: String,
    #[serde(default)]
    pub confirm_password: String,
}

/// Verifies the current credential and stores the new one.
///
/// An identity without a stored credential must send an empty current password.
pub async fn change_password(
    store: &dyn Store,
    identity: &Identity,
    change: &PasswordChange,
) -> Result<(), AppError> {
    let current_ok = match store.password_hash(&identity.id).await? {
        Some(stored) => verify_password(&change.current_password, &stored),
        None => change.current_password.is_empty(),
    };
    if !current_ok {
        warn!("Rejected password change for identity {}", identity.id);
        return Err(AppError::Validation("Current password is incorrect.".to_string()));
    }
    if change.new_password != change.confirm_password {
        return Err(AppError::Validation("New passwords do not match.".to_string()));
    }
    if change.new_password.is_empty() {
        return Err(AppError::Validation("New password must not be empty.".to_string()));
    }

    let hash = hash_password(&change.new_password)?;
    store.set_password_hash(&identity.id, &hash).await?;
    info!("Password changed for identity {}", identity.id);
    Ok(())
}
