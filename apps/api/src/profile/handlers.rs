use axum::{extract::State, Json};
use serde::Serialize;

use crate::errors::AppError;
use crate::extract::AppJson;
use crate::models::student::Student;
use crate::profile::resolver::{change_password, update_profile, PasswordChange, ProfileForm};
use crate::profile::CurrentStudent;
use crate::routes::ActionResponse;
use crate::state::AppState;

#[derive(Serialize)]
pub struct ProfileResponse {
    pub student: Student,
    pub profile_complete: bool,
}

/// GET /api/v1/profile
pub async fn handle_get_profile(current: CurrentStudent) -> Json<ProfileResponse> {
    Json(ProfileResponse {
        profile_complete: current.student.is_profile_complete(),
        student: current.student,
    })
}

/// POST /api/v1/profile
pub async fn handle_update_profile(
    State(state): State<AppState>,
    current: CurrentStudent,
    AppJson(form): AppJson<ProfileForm>,
) -> Result<Json<ActionResponse>, AppError> {
    update_profile(
        state.store.as_ref(),
        &current.student,
        &current.identity,
        &form,
    )
    .await?;
    Ok(Json(ActionResponse::ok("Profile updated successfully!")))
}

/// POST /api/v1/profile/password
pub async fn handle_change_password(
    State(state): State<AppState>,
    current: CurrentStudent,
    AppJson(change): AppJson<PasswordChange>,
) -> Result<Json<ActionResponse>, AppError> {
    change_password(state.store.as_ref(), &current.identity, &change).await?;
    Ok(Json(ActionResponse::ok("Password changed successfully!")))
}
