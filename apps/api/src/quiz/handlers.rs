use axum::{extract::State, Json};
use bytes::Bytes;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::errors::AppError;
use crate::extract::{AppPath, AppQuery};
use crate::models::assessment::{MockTest, Question, StudentAssessment, StudentMockTest};
use crate::profile::CurrentStudent;
use crate::quiz::engine::{
    self, assessment_overview, get_or_init_attempt, submit_assessment, submit_mock_test,
    AssessmentOverview, MockTestStatus,
};
use crate::quiz::grading::GradeReport;
use crate::quiz::question_bank;
use crate::state::AppState;

/// A question as shown to the student: the answer is never sent.
#[derive(Debug, Serialize)]
pub struct QuestionView {
    pub index: usize,
    pub question: String,
    pub options: Vec<String>,
}

fn public_questions(questions: &[Question]) -> Vec<QuestionView> {
    questions
        .iter()
        .enumerate()
        .map(|(index, q)| QuestionView {
            index,
            question: q.question.clone(),
            options: q.options.clone(),
        })
        .collect()
}

#[derive(Deserialize)]
pub struct QuizQuery {
    pub assessment_id: Option<Uuid>,
}

#[derive(Serialize)]
pub struct QuizPage {
    pub record: Option<StudentAssessment>,
    pub questions: Vec<QuestionView>,
}

/// Body of a quiz submission, read leniently: a body that is not valid JSON
/// still submits, with an empty answer set.
#[derive(Debug, Default)]
pub struct SubmittedAnswers {
    pub assessment_id: Option<Uuid>,
    pub answers: Value,
}

impl SubmittedAnswers {
    pub fn from_body(body: &[u8]) -> Self {
        let payload: Value = serde_json::from_slice(body).unwrap_or(Value::Null);
        SubmittedAnswers {
            assessment_id: payload
                .get("assessment_id")
                .and_then(Value::as_str)
                .and_then(|id| Uuid::parse_str(id.trim()).ok()),
            answers: payload.get("answers").cloned().unwrap_or(Value::Null),
        }
    }
}

#[derive(Serialize)]
pub struct GradedResponse {
    pub success: bool,
    pub message: String,
    #[serde(flatten)]
    pub report: GradeReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attempt_number: Option<i32>,
}

impl GradedResponse {
    fn new(report: GradeReport, attempt_number: Option<i32>) -> Self {
        GradedResponse {
            success: true,
            message: format!("You scored {} out of {}.", report.score, report.total),
            report,
            attempt_number,
        }
    }
}

#[derive(Serialize)]
pub struct MockTestPage {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub topic: String,
    pub duration_minutes: i32,
    pub questions: Vec<QuestionView>,
    pub attempts: Vec<StudentMockTest>,
    pub best: MockTestStatus,
}

impl MockTestPage {
    fn new(test: MockTest, attempts: Vec<StudentMockTest>) -> Self {
        MockTestPage {
            questions: public_questions(&test.questions.0),
            best: engine::status_of(&attempts),
            id: test.id,
            title: test.title,
            description: test.description,
            topic: test.topic,
            duration_minutes: test.duration_minutes,
            attempts,
        }
    }
}

/// GET /api/v1/assessments
pub async fn handle_list_assessments(
    State(state): State<AppState>,
    current: CurrentStudent,
) -> Result<Json<AssessmentOverview>, AppError> {
    let overview = assessment_overview(
        state.store.as_ref(),
        current.student.id,
        Utc::now().date_naive(),
    )
    .await?;
    Ok(Json(overview))
}

/// GET /api/v1/quiz?assessment_id=
pub async fn handle_quiz_page(
    State(state): State<AppState>,
    current: CurrentStudent,
    AppQuery(params): AppQuery<QuizQuery>,
) -> Result<Json<QuizPage>, AppError> {
    let record = match params.assessment_id {
        Some(assessment_id) => Some(
            get_or_init_attempt(state.store.as_ref(), current.student.id, assessment_id).await?,
        ),
        None => None,
    };
    Ok(Json(QuizPage {
        record,
        questions: public_questions(&question_bank::python_fundamentals()),
    }))
}

/// POST /api/v1/quiz/submit
pub async fn handle_submit_quiz(
    State(state): State<AppState>,
    current: CurrentStudent,
    body: Bytes,
) -> Result<Json<GradedResponse>, AppError> {
    let submitted = SubmittedAnswers::from_body(&body);
    let assessment_id = submitted
        .assessment_id
        .ok_or_else(|| AppError::Validation("A valid assessment_id is required.".to_string()))?;
    let submission = submit_assessment(
        state.store.as_ref(),
        current.student.id,
        assessment_id,
        &submitted.answers,
    )
    .await?;
    Ok(Json(GradedResponse::new(submission.report, None)))
}

/// GET /api/v1/quiz/:mock_test_id
pub async fn handle_mock_test_page(
    State(state): State<AppState>,
    current: CurrentStudent,
    AppPath(mock_test_id): AppPath<Uuid>,
) -> Result<Json<MockTestPage>, AppError> {
    let store = state.store.as_ref();
    let test = engine::require_mock_test(store, mock_test_id).await?;
    let attempts = store
        .list_mock_test_attempts(current.student.id, mock_test_id)
        .await?;
    Ok(Json(MockTestPage::new(test, attempts)))
}

/// POST /api/v1/quiz/:mock_test_id/submit
pub async fn handle_submit_mock_test(
    State(state): State<AppState>,
    current: CurrentStudent,
    AppPath(mock_test_id): AppPath<Uuid>,
    body: Bytes,
) -> Result<Json<GradedResponse>, AppError> {
    let submitted = SubmittedAnswers::from_body(&body);
    let submission = submit_mock_test(
        state.store.as_ref(),
        current.student.id,
        mock_test_id,
        &submitted.answers,
    )
    .await?;
    Ok(Json(GradedResponse::new(
        submission.report,
        Some(submission.attempt.attempt_number),
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_questions_hide_answers() {
        let views = public_questions(&question_bank::python_fundamentals());
        let json = serde_json::to_value(&views).unwrap();
        for item in json.as_array().unwrap() {
            assert!(item.get("correct").is_none());
            assert!(item.get("options").is_some());
        }
        assert_eq!(views[3].index, 3);
    }

    #[test]
    fn test_submitted_answers_read_leniently() {
        let id = Uuid::new_v4();
        let body = format!(r#"{{"assessment_id": "{id}", "answers": {{"0": "14"}}}}"#);
        let submitted = SubmittedAnswers::from_body(body.as_bytes());
        assert_eq!(submitted.assessment_id, Some(id));
        assert_eq!(submitted.answers["0"], "14");

        let truncated = SubmittedAnswers::from_body(br#"{"answers": {"0": "a""#);
        assert_eq!(truncated.assessment_id, None);
        assert!(truncated.answers.is_null());

        let bad_id = SubmittedAnswers::from_body(br#"{"assessment_id": "nope"}"#);
        assert_eq!(bad_id.assessment_id, None);
    }
}
