//! Identity forwarded by the upstream authentication gateway.
//!
//! The portal does not authenticate anyone itself. The gateway in front of it
//! sets `x-identity-id` (required) and the optional display-name headers.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};

use crate::errors::AppError;

pub const IDENTITY_ID_HEADER: &str = "x-identity-id";
pub const USERNAME_HEADER: &str = "x-identity-username";
pub const FIRST_NAME_HEADER: &str = "x-identity-first-name";
pub const LAST_NAME_HEADER: &str = "x-identity-last-name";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub id: String,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl Identity {
    /// "First Last" when either part is known, otherwise `None`.
    pub fn full_name(&self) -> Option<String> {
        let parts: Vec<&str> = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .collect();
        if parts.is_empty() {
            None
        } else {
            Some(parts.join(" "))
        }
    }

    /// Name shown on a freshly created profile: full name, then username, then the raw id.
    pub fn display_name(&self) -> String {
        self.full_name()
            .or_else(|| {
                self.username
                    .as_deref()
                    .map(str::trim)
                    .filter(|u| !u.is_empty())
                    .map(str::to_string)
            })
            .unwrap_or_else(|| self.id.clone())
    }
}

fn header(parts: &Parts, name: &str) -> Option<String> {
    parts
        .headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[async_trait]
impl<S> FromRequestParts<S> for Identity
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let id = header(parts, IDENTITY_ID_HEADER).ok_or(AppError::Unauthorized)?;
        Ok(Identity {
            id,
            username: header(parts, USERNAME_HEADER),
            first_name: header(parts, FIRST_NAME_HEADER),
            last_name: header(parts, LAST_NAME_HEADER),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity(first: Option<&str>, last: Option<&str>, username: Option<&str>) -> Identity {
        Identity {
            id: "idp|42".to_string(),
            username: username.map(str::to_string),
            first_name: first.map(str::to_string),
            last_name: last.map(str::to_string),
        }
    }

    #[test]
    fn test_display_name_prefers_full_name() {
        let who = identity(Some("Asha"), Some("Rao"), Some("asha"));
        assert_eq!(who.display_name(), "Asha Rao");
    }

    #[test]
    fn test_display_name_falls_back_to_username() {
        let who = identity(None, Some("  "), Some("asha"));
        assert_eq!(who.display_name(), "asha");
    }

    #[test]
    fn test_display_name_falls_back_to_id() {
        assert_eq!(identity(None, None, None).display_name(), "idp|42");
    }

    #[test]
    fn test_single_name_part() {
        assert_eq!(
            identity(None, Some("Rao"), None).full_name().as_deref(),
            Some("Rao")
        );
    }

    #[tokio::test]
    async fn test_missing_identity_header_is_unauthorized() {
        let (mut parts, _) = axum::http::Request::builder()
            .uri("/")
            .body(())
            .unwrap()
            .into_parts();
        let result = Identity::from_request_parts(&mut parts, &()).await;
        assert!(matches!(result, Err(AppError::Unauthorized)));
    }

    #[tokio::test]
    async fn test_headers_are_extracted() {
        let (mut parts, _) = axum::http::Request::builder()
            .uri("/")
            .header(IDENTITY_ID_HEADER, "u-7")
            .header(FIRST_NAME_HEADER, "Asha")
            .body(())
            .unwrap()
            .into_parts();
        let who = Identity::from_request_parts(&mut parts, &()).await.unwrap();
        assert_eq!(who.id, "u-7");
        assert_eq!(who.first_name.as_deref(), Some("Asha"));
        assert_eq!(who.username, None);
    }
}
