//! Placement readiness: best mock-test results plus a derived checklist.

use serde::Serialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::learning::ProjectStatus;
use crate::models::placement::{InterviewStatus, MockInterview};
use crate::models::student::Student;
use crate::quiz::engine::{best_attempt, MockTestStatus};
use crate::store::Store;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChecklistItem {
    pub item: String,
    pub completed: bool,
}

#[derive(Debug, Serialize)]
pub struct MockTestReadiness {
    pub id: Uuid,
    pub title: String,
    #[serde(flatten)]
    pub status: MockTestStatus,
}

#[derive(Debug, Serialize)]
pub struct Readiness {
    pub readiness_score: u32,
    pub checklist: Vec<ChecklistItem>,
    pub mock_interviews: Vec<MockInterview>,
    pub mock_tests: Vec<MockTestReadiness>,
}

/// Percentage of completed checklist items, rounded; 0 for an empty list.
pub fn readiness_score(checklist: &[ChecklistItem]) -> u32 {
    if checklist.is_empty() {
        return 0;
    }
    let done = checklist.iter().filter(|c| c.completed).count();
    (done as f64 / checklist.len() as f64 * 100.0).round() as u32
}

fn item(label: &str, completed: bool) -> ChecklistItem {
    ChecklistItem {
        item: label.to_string(),
        completed,
    }
}

pub async fn readiness(store: &dyn Store, student: &Student) -> Result<Readiness, AppError> {
    let mut mock_tests = Vec::new();
    for test in store.list_active_mock_tests().await? {
        mock_tests.push(MockTestReadiness {
            status: best_attempt(store, student.id, test.id).await?,
            id: test.id,
            title: test.title,
        });
    }

    let mock_interviews = store.list_mock_interviews(student.id).await?;
    let project_submitted = store
        .list_projects(student.id)
        .await?
        .iter()
        .any(|p| p.status == ProjectStatus::Submitted.as_str());

    let checklist = vec![
        item("Profile Completed", student.is_profile_complete()),
        item("Portfolio Project Submitted", project_submitted),
        item(
            "Mock Interview Completed",
            mock_interviews
                .iter()
                .any(|i| i.has_status(InterviewStatus::Completed)),
        ),
        item(
            "Mock Test Attempted",
            mock_tests
                .iter()
                .any(|t| matches!(t.status, MockTestStatus::Completed { .. })),
        ),
    ];

    Ok(Readiness {
        readiness_score: readiness_score(&checklist),
        checklist,
        mock_interviews,
        mock_tests,
    })
}
