use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

/// One multiple-choice question. `correct` holds the exact option text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub question: String,
    #[serde(default)]
    pub options: Vec<String>,
    pub correct: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Assessment {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub topic: String,
    pub total_marks: i32,
    pub duration_minutes: i32,
    pub due_date: DateTime<Utc>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct StudentAssessment {
    pub id: Uuid,
    pub student_id: Uuid,
    pub assessment_id: Uuid,
    pub score: Option<f64>,
    pub max_score: f64,
    pub submitted_at: Option<DateTime<Utc>>,
    pub is_completed: bool,
    pub answers: Option<Value>,
}

impl StudentAssessment {
    pub fn percentage_score(&self) -> f64 {
        percentage_of(self.score, self.max_score)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MockTest {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub topic: String,
    pub total_marks: i32,
    pub duration_minutes: i32,
    pub questions: Json<Vec<Question>>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct StudentMockTest {
    pub id: Uuid,
    pub student_id: Uuid,
    pub mock_test_id: Uuid,
    pub score: Option<f64>,
    pub max_score: f64,
    pub submitted_at: Option<DateTime<Utc>>,
    pub is_completed: bool,
    pub answers: Option<Value>,
    pub attempt_number: i32,
}

impl StudentMockTest {
    pub fn percentage_score(&self) -> f64 {
        percentage_of(self.score, self.max_score)
    }
}

/// Outcome of grading, ready to be persisted against an assessment or mock test.
#[derive(Debug, Clone)]
pub struct GradedSubmission {
    pub score: f64,
    pub max_score: f64,
    /// Raw answer payload exactly as submitted.
    pub answers: Value,
    pub submitted_at: DateTime<Utc>,
}

/// Default `max_score` of a record nobody has submitted yet.
pub const DEFAULT_MAX_SCORE: f64 = 100.0;

fn percentage_of(score: Option<f64>, max_score: f64) -> f64 {
    match score {
        Some(score) if max_score > 0.0 => score / max_score * 100.0,
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attempt(score: Option<f64>, max_score: f64) -> StudentMockTest {
        StudentMockTest {
            id: Uuid::new_v4(),
            student_id: Uuid::new_v4(),
            mock_test_id: Uuid::new_v4(),
            score,
            max_score,
            submitted_at: None,
            is_completed: score.is_some(),
            answers: None,
            attempt_number: 1,
        }
    }

    #[test]
    fn test_percentage_score_of_graded_attempt() {
        assert!((attempt(Some(7.0), 10.0).percentage_score() - 70.0).abs() < 1e-9);
    }

    #[test]
    fn test_percentage_score_ungraded_is_zero() {
        assert_eq!(attempt(None, DEFAULT_MAX_SCORE).percentage_score(), 0.0);
    }

    #[test]
    fn test_percentage_score_zero_max_is_zero() {
        assert_eq!(attempt(Some(3.0), 0.0).percentage_score(), 0.0);
    }

    #[test]
    fn test_question_options_default_to_empty() {
        let q: Question = serde_json::from_str(r#"{"question":"2+2?","correct":"4"}"#).unwrap();
        assert!(q.options.is_empty());
        assert_eq!(q.correct, "4");
    }
}
