//! Assessment and mock-test workflows on top of the `Store`.
//!
//! Assessments are single-attempt: the one (student, assessment) record is
//! overwritten by each submission. Mock tests are multi-attempt: every
//! submission appends a new numbered record.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use serde_json::Value;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::assessment::{
    Assessment, GradedSubmission, MockTest, Question, StudentAssessment, StudentMockTest,
};
use crate::quiz::grading::{grade, parse_answers, GradeReport};
use crate::quiz::question_bank;
use crate::store::Store;

#[derive(Debug, Serialize)]
pub struct AssessmentSubmission {
    pub record: StudentAssessment,
    pub report: GradeReport,
}

#[derive(Debug, Serialize)]
pub struct MockTestSubmission {
    pub attempt: StudentMockTest,
    pub report: GradeReport,
}

/// Readiness status of one mock test for one student.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum MockTestStatus {
    Pending,
    Completed {
        score: f64,
        max_score: f64,
        percentage: f64,
        date: Option<DateTime<Utc>>,
        attempts: usize,
    },
}

#[derive(Debug, Serialize)]
pub struct AssessmentEntry {
    pub assessment: Assessment,
    pub record: StudentAssessment,
    pub percentage_score: f64,
}

#[derive(Debug, Serialize)]
pub struct AssessmentOverview {
    pub student_assessments: Vec<AssessmentEntry>,
    pub pending_count: usize,
    pub completed_count: usize,
    pub average_score: f64,
}

/// Rounds to one decimal place, the precision every portal summary uses.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

async fn require_assessment(store: &dyn Store, assessment_id: Uuid) -> Result<Assessment, AppError> {
    store
        .get_assessment(assessment_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Assessment {assessment_id} not found")))
}

pub async fn require_mock_test(store: &dyn Store, mock_test_id: Uuid) -> Result<MockTest, AppError> {
    store
        .get_mock_test(mock_test_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Mock test {mock_test_id} not found")))
}

/// Existing (graded or ungraded) record for the pair, or a fresh ungraded one.
pub async fn get_or_init_attempt(
    store: &dyn Store,
    student_id: Uuid,
    assessment_id: Uuid,
) -> Result<StudentAssessment, AppError> {
    require_assessment(store, assessment_id).await?;
    store
        .get_or_init_student_assessment(student_id, assessment_id)
        .await
}

fn graded(questions: &[Question], payload: &Value) -> (GradeReport, GradedSubmission) {
    let report = grade(questions, &parse_answers(payload));
    let submission = GradedSubmission {
        score: report.score as f64,
        max_score: report.total as f64,
        answers: payload.clone(),
        submitted_at: Utc::now(),
    };
    (report, submission)
}

/// Grades against the built-in question bank and overwrites the single record.
pub async fn submit_assessment(
    store: &dyn Store,
    student_id: Uuid,
    assessment_id: Uuid,
    payload: &Value,
) -> Result<AssessmentSubmission, AppError> {
    require_assessment(store, assessment_id).await?;
    let (report, submission) = graded(&question_bank::python_fundamentals(), payload);
    let record = store
        .save_assessment_result(student_id, assessment_id, &submission)
        .await?;

    info!(
        "Student {} scored {}/{} on assessment {}",
        student_id, report.score, report.total, assessment_id
    );
    Ok(AssessmentSubmission { record, report })
}

/// Grades against the mock test's own questions and appends a new attempt.
pub async fn submit_mock_test(
    store: &dyn Store,
    student_id: Uuid,
    mock_test_id: Uuid,
    payload: &Value,
) -> Result<MockTestSubmission, AppError> {
    let mock_test = require_mock_test(store, mock_test_id).await?;
    let (report, submission) = graded(&mock_test.questions.0, payload);
    let attempt = store
        .insert_mock_test_attempt(student_id, mock_test_id, &submission)
        .await?;

    info!(
        "Student {} attempt {} on mock test '{}': {}/{}",
        student_id, attempt.attempt_number, mock_test.title, report.score, report.total
    );
    Ok(MockTestSubmission { attempt, report })
}

/// Highest-scoring completed attempt; the earliest attempt wins a tie.
pub fn pick_best(attempts: &[StudentMockTest]) -> Option<&StudentMockTest> {
    attempts
        .iter()
        .filter(|a| a.is_completed)
        .filter_map(|a| a.score.map(|score| (score, a)))
        .fold(None, |best: Option<(f64, &StudentMockTest)>, (score, a)| match best {
            Some((top, _)) if top >= score => best,
            _ => Some((score, a)),
        })
        .map(|(_, a)| a)
}

pub fn status_of(attempts: &[StudentMockTest]) -> MockTestStatus {
    match pick_best(attempts) {
        None => MockTestStatus::Pending,
        Some(best) => MockTestStatus::Completed {
            score: best.score.unwrap_or_default(),
            max_score: best.max_score,
            percentage: round1(best.percentage_score()),
            date: best.submitted_at,
            attempts: attempts.iter().filter(|a| a.is_completed).count(),
        },
    }
}

pub async fn best_attempt(
    store: &dyn Store,
    student_id: Uuid,
    mock_test_id: Uuid,
) -> Result<MockTestStatus, AppError> {
    let attempts = store
        .list_mock_test_attempts(student_id, mock_test_id)
        .await?;
    Ok(status_of(&attempts))
}

/// Lists active assessments with the student's record for each, seeding
/// ungraded records for any the student has not seen yet.
pub async fn assessment_overview(
    store: &dyn Store,
    student_id: Uuid,
    today: NaiveDate,
) -> Result<AssessmentOverview, AppError> {
    let assessments = store.list_active_assessments().await?;

    let mut entries = Vec::with_capacity(assessments.len());
    for assessment in assessments {
        let record = store
            .get_or_init_student_assessment(student_id, assessment.id)
            .await?;
        entries.push(AssessmentEntry {
            percentage_score: round1(record.percentage_score()),
            assessment,
            record,
        });
    }

    let pending_count = entries
        .iter()
        .filter(|e| !e.record.is_completed && e.assessment.due_date.date_naive() >= today)
        .count();
    let completed: Vec<f64> = entries
        .iter()
        .filter(|e| e.record.is_completed)
        .filter_map(|e| e.record.score)
        .collect();
    let completed_count = entries.iter().filter(|e| e.record.is_completed).count();
    let average_score = if completed.is_empty() {
        0.0
    } else {
        round1(completed.iter().sum::<f64>() / completed.len() as f64)
    };

    Ok(AssessmentOverview {
        student_assessments: entries,
        pending_count,
        completed_count,
        average_score,
    })
}
