pub mod health;

use axum::{
    routing::{get, post},
    Router,
};
use serde::Serialize;

use crate::catalog::handlers as catalog;
use crate::placement::handlers as placement;
use crate::profile::handlers as profile;
use crate::quiz::handlers as quiz;
use crate::state::AppState;

/// `{success, message}` body returned by mutations.
#[derive(Debug, Serialize)]
pub struct ActionResponse {
    pub success: bool,
    pub message: String,
}

impl ActionResponse {
    pub fn ok(message: &str) -> Self {
        ActionResponse {
            success: true,
            message: message.to_string(),
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Student profile
        .route("/api/v1/dashboard", get(catalog::handle_dashboard))
        .route(
            "/api/v1/profile",
            get(profile::handle_get_profile).post(profile::handle_update_profile),
        )
        .route(
            "/api/v1/profile/password",
            post(profile::handle_change_password),
        )
        // Learning catalog
        .route("/api/v1/sessions", get(catalog::handle_sessions))
        .route(
            "/api/v1/sessions/recordings",
            get(catalog::handle_recordings),
        )
        .route("/api/v1/attendance", get(catalog::handle_attendance))
        .route(
            "/api/v1/projects",
            get(catalog::handle_projects).post(placement::handle_submit_project),
        )
        .route(
            "/api/v1/study-materials",
            get(catalog::handle_study_materials),
        )
        .route("/api/v1/certificates", get(catalog::handle_certificates))
        .route("/api/v1/internship-agenda", get(catalog::handle_agenda))
        // Assessments and mock tests
        .route("/api/v1/assessments", get(quiz::handle_list_assessments))
        .route("/api/v1/quiz", get(quiz::handle_quiz_page))
        .route("/api/v1/quiz/submit", post(quiz::handle_submit_quiz))
        .route("/api/v1/quiz/:mock_test_id", get(quiz::handle_mock_test_page))
        .route(
            "/api/v1/quiz/:mock_test_id/submit",
            post(quiz::handle_submit_mock_test),
        )
        // Placement
        .route("/api/v1/placement", get(placement::handle_placement_form))
        .route("/api/v1/placement/apply", post(placement::handle_apply))
        .route(
            "/api/v1/placement/readiness",
            get(placement::handle_readiness),
        )
        .route(
            "/api/v1/mock-interviews",
            post(placement::handle_request_interview),
        )
        .route(
            "/api/v1/mock-interviews/:id/cancel",
            post(placement::handle_cancel_interview),
        )
        .route("/api/v1/notifications", get(placement::handle_notifications))
        .route(
            "/api/v1/notifications/:id/read",
            post(placement::handle_mark_read),
        )
        .route("/api/v1/offer-letter", get(placement::handle_offer_letter))
        .route(
            "/api/v1/offer-letter/download",
            get(placement::handle_offer_letter_download),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::identity::{FIRST_NAME_HEADER, IDENTITY_ID_HEADER, LAST_NAME_HEADER};
    use crate::models::assessment::MockTest;
    use crate::store::{seed, MemoryStore, Store};
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use axum::response::Response;
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn app(store: Arc<MemoryStore>) -> Router {
        build_router(AppState {
            store,
            config: Config::for_tests(),
        })
    }

    fn get_as(uri: &str, identity: &str) -> Request<Body> {
        Request::builder()
            .uri(uri)
            .header(IDENTITY_ID_HEADER, identity)
            .header(FIRST_NAME_HEADER, "Asha")
            .header(LAST_NAME_HEADER, "Rao")
            .body(Body::empty())
            .unwrap()
    }

    fn post_as(uri: &str, identity: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(IDENTITY_ID_HEADER, identity)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn post_raw(uri: &str, identity: &str, body: &'static str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(IDENTITY_ID_HEADER, identity)
            .header(FIRST_NAME_HEADER, "Asha")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    async fn json_body(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn first_mock_test(store: &MemoryStore) -> MockTest {
        store
            .list_active_mock_tests()
            .await
            .unwrap()
            .into_iter()
            .next()
            .unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let response = app(Arc::new(MemoryStore::new()))
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["service"], "portal-api");
    }

    #[tokio::test]
    async fn test_missing_identity_is_unauthorized() {
        let response = app(Arc::new(MemoryStore::new()))
            .oneshot(
                Request::builder()
                    .uri("/api/v1/dashboard")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body = json_body(response).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["error"]["code"], "UNAUTHORIZED");
    }

    #[tokio::test]
    async fn test_dashboard_creates_student_on_first_visit() {
        let store = Arc::new(seed::sample_store().await.unwrap());
        let response = app(Arc::clone(&store))
            .oneshot(get_as("/api/v1/dashboard", "u-new"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["student"]["full_name"], "Asha Rao");
        assert_eq!(body["student"]["college"], "Default College");
        assert_eq!(body["total_sessions"], 3);
        assert_eq!(store.student_count(), 2);
    }

    #[tokio::test]
    async fn test_quiz_page_hides_answers() {
        let store = Arc::new(seed::sample_store().await.unwrap());
        let response = app(store)
            .oneshot(get_as("/api/v1/quiz", "u-quiz"))
            .await
            .unwrap();
        let body = json_body(response).await;
        let questions = body["questions"].as_array().unwrap();
        assert_eq!(questions.len(), 10);
        assert!(questions.iter().all(|q| q.get("correct").is_none()));
    }

    #[tokio::test]
    async fn test_submit_assessment_via_http() {
        let store = Arc::new(seed::sample_store().await.unwrap());
        let assessment_id = store.list_active_assessments().await.unwrap()[0].id;
        let response = app(store)
            .oneshot(post_as(
                "/api/v1/quiz/submit",
                "u-quiz",
                json!({
                    "assessment_id": assessment_id,
                    "answers": "{\"0\":\"14\",\"1\":\"def\"}"
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["score"], 2);
        assert_eq!(body["incorrect"], 8);
        assert_eq!(body["breakdown"][2]["submitted"], Value::Null);
    }

    #[tokio::test]
    async fn test_mock_test_attempts_number_up() {
        let store = Arc::new(seed::sample_store().await.unwrap());
        let test = first_mock_test(&store).await;
        let uri = format!("/api/v1/quiz/{}/submit", test.id);
        for expected in 1..=2 {
            let response = app(Arc::clone(&store))
                .oneshot(post_as(&uri, "u-mock", json!({"answers": {"0": test.questions.0[0].correct}})))
                .await
                .unwrap();
            let body = json_body(response).await;
            assert_eq!(body["attempt_number"], expected);
            assert_eq!(body["score"], 1);
        }

        let page = app(Arc::clone(&store))
            .oneshot(get_as(&format!("/api/v1/quiz/{}", test.id), "u-mock"))
            .await
            .unwrap();
        let body = json_body(page).await;
        assert_eq!(body["attempts"].as_array().unwrap().len(), 2);
        assert_eq!(body["best"]["status"], "completed");
        assert!(body["questions"][0].get("correct").is_none());
    }

    #[tokio::test]
    async fn test_unknown_mock_test_is_not_found() {
        let response = app(Arc::new(seed::sample_store().await.unwrap()))
            .oneshot(get_as(
                "/api/v1/quiz/00000000-0000-0000-0000-000000000000",
                "u-x",
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(json_body(response).await["success"], false);
    }

    #[tokio::test]
    async fn test_apply_and_list_applications() {
        let store = Arc::new(seed::sample_store().await.unwrap());
        let job_id = store.list_active_job_openings().await.unwrap()[0].id;
        let response = app(Arc::clone(&store))
            .oneshot(post_as(
                "/api/v1/placement/apply",
                "u-job",
                json!({"job_opening": [job_id], "phone": "98765"}),
            ))
            .await
            .unwrap();
        let body = json_body(response).await;
        assert_eq!(body["message"], "Application submitted successfully!");

        let form = json_body(
            app(store)
                .oneshot(get_as("/api/v1/placement", "u-job"))
                .await
                .unwrap(),
        )
        .await;
        assert_eq!(form["applications"].as_array().unwrap().len(), 1);
        assert_eq!(form["student"]["phone"], "98765");
        assert!(form["job_openings"][0]["salary_range"].is_string());
    }

    #[tokio::test]
    async fn test_change_password_mismatch_is_bad_request() {
        let response = app(Arc::new(MemoryStore::new()))
            .oneshot(post_as(
                "/api/v1/profile/password",
                "u-pw",
                json!({"current_password": "", "new_password": "a", "confirm_password": "b"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            json_body(response).await["message"],
            "New passwords do not match."
        );
    }

    #[tokio::test]
    async fn test_offer_letter_view_then_download() {
        let store = Arc::new(MemoryStore::new());

        let missing = app(Arc::clone(&store))
            .oneshot(get_as("/api/v1/offer-letter/download", "u-offer"))
            .await
            .unwrap();
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);

        let view = json_body(
            app(Arc::clone(&store))
                .oneshot(get_as("/api/v1/offer-letter", "u-offer"))
                .await
                .unwrap(),
        )
        .await;
        assert_eq!(view["offer_letter"]["title"], "Full Stack Developer Intern");

        let download = app(store)
            .oneshot(get_as("/api/v1/offer-letter/download", "u-offer"))
            .await
            .unwrap();
        assert_eq!(download.status(), StatusCode::OK);
        assert_eq!(
            download.headers()[header::CONTENT_TYPE],
            "application/pdf"
        );
        assert_eq!(
            download.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"offer_letter_Asha_Rao.pdf\""
        );
        let bytes = to_bytes(download.into_body(), usize::MAX).await.unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
    }

    #[tokio::test]
    async fn test_readiness_lists_seeded_mock_tests() {
        let store = Arc::new(seed::sample_store().await.unwrap());
        let body = json_body(
            app(store)
                .oneshot(get_as("/api/v1/placement/readiness", "u-ready"))
                .await
                .unwrap(),
        )
        .await;
        let tests = body["mock_tests"].as_array().unwrap();
        assert_eq!(tests.len(), 2);
        assert!(tests.iter().all(|t| t["status"] == "pending"));
        assert_eq!(body["checklist"].as_array().unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_project_submit_then_list() {
        let store = Arc::new(MemoryStore::new());
        let response = app(Arc::clone(&store))
            .oneshot(post_as(
                "/api/v1/projects",
                "u-proj",
                json!({"github_url": "https://github.com/asha/portal"}),
            ))
            .await
            .unwrap();
        let body = json_body(response).await;
        assert_eq!(body["project"]["title"], "Project Submission");

        let list = json_body(
            app(store)
                .oneshot(get_as("/api/v1/projects", "u-proj"))
                .await
                .unwrap(),
        )
        .await;
        assert_eq!(list["projects"][0]["status"], "submitted");
    }

    #[tokio::test]
    async fn test_truncated_mock_test_body_grades_as_empty() {
        let store = Arc::new(seed::sample_store().await.unwrap());
        let test = first_mock_test(&store).await;
        let response = app(Arc::clone(&store))
            .oneshot(post_raw(
                &format!("/api/v1/quiz/{}/submit", test.id),
                "u-trunc",
                r#"{"answers": {"0": "a""#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["score"], 0);
        assert_eq!(body["attempt_number"], 1);

        let student = store
            .find_student_by_identity("u-trunc")
            .await
            .unwrap()
            .unwrap();
        let attempts = store
            .list_mock_test_attempts(student.id, test.id)
            .await
            .unwrap();
        assert_eq!(attempts.len(), 1);
    }

    #[tokio::test]
    async fn test_quiz_submit_without_assessment_id_is_an_envelope() {
        let response = app(Arc::new(seed::sample_store().await.unwrap()))
            .oneshot(post_raw("/api/v1/quiz/submit", "u-noid", r#"{"answers": {}}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "A valid assessment_id is required.");
    }

    #[tokio::test]
    async fn test_bad_path_and_body_render_the_envelope() {
        let store = Arc::new(seed::sample_store().await.unwrap());

        let bad_path = app(Arc::clone(&store))
            .oneshot(post_raw("/api/v1/quiz/not-a-uuid/submit", "u-bad", "{}"))
            .await
            .unwrap();
        assert_eq!(bad_path.status(), StatusCode::BAD_REQUEST);
        let body = json_body(bad_path).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["error"]["code"], "BAD_REQUEST");

        let bad_body = app(store)
            .oneshot(post_raw("/api/v1/placement/apply", "u-bad", r#"{"job_opening": "#))
            .await
            .unwrap();
        assert_eq!(bad_body.status(), StatusCode::BAD_REQUEST);
        let body = json_body(bad_body).await;
        assert_eq!(body["success"], false);
        assert!(body["message"].is_string());
    }

    #[tokio::test]
    async fn test_download_filename_strips_quotes() {
        let store = Arc::new(MemoryStore::new());
        let request = |uri: &str| {
            Request::builder()
                .uri(uri)
                .header(IDENTITY_ID_HEADER, "u-quoted")
                .header(FIRST_NAME_HEADER, "Asha \"AK\"")
                .header(LAST_NAME_HEADER, "Rao")
                .body(Body::empty())
                .unwrap()
        };
        app(Arc::clone(&store))
            .oneshot(request("/api/v1/offer-letter"))
            .await
            .unwrap();
        let download = app(store)
            .oneshot(request("/api/v1/offer-letter/download"))
            .await
            .unwrap();
        assert_eq!(download.status(), StatusCode::OK);
        assert_eq!(
            download.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"offer_letter_Asha_AK_Rao.pdf\""
        );
    }
}
