// Profile resolution: every student-facing route starts by turning the
// gateway identity into a Student row.

pub mod credentials;
pub mod handlers;
pub mod resolver;

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use chrono::Utc;

use crate::errors::AppError;
use crate::identity::Identity;
use crate::models::student::Student;
use crate::state::AppState;

/// The resolved Student for the calling identity. Creates the Student on first visit.
#[derive(Debug, Clone)]
pub struct CurrentStudent {
    pub identity: Identity,
    pub student: Student,
}

#[async_trait]
impl FromRequestParts<AppState> for CurrentStudent {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let identity = Identity::from_request_parts(parts, state).await?;
        let student =
            resolver::resolve(state.store.as_ref(), &identity, Utc::now().date_naive()).await?;
        Ok(CurrentStudent { identity, student })
    }
}
