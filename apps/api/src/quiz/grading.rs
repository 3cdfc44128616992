//! Quiz grading: pure comparison of submitted answers against a question set.

use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::debug;

use crate::models::assessment::Question;

/// Submitted answers keyed by question index rendered as a string ("0", "1", ...).
pub type AnswerSheet = BTreeMap<String, String>;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuestionResult {
    pub index: usize,
    /// `None` when the question was left unanswered.
    pub submitted: Option<String>,
    pub correct: String,
    pub is_correct: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GradeReport {
    pub score: usize,
    pub incorrect: usize,
    pub total: usize,
    /// 0.0 – 100.0; 0.0 for an empty question set.
    pub percentage: f64,
    /// One entry per question, in question order.
    pub breakdown: Vec<QuestionResult>,
}

/// Grades `answers` against `questions` with exact string equality.
/// Missing answers count as incorrect.
pub fn grade(questions: &[Question], answers: &AnswerSheet) -> GradeReport {
    let breakdown: Vec<QuestionResult> = questions
        .iter()
        .enumerate()
        .map(|(index, question)| {
            let submitted = answers.get(&index.to_string()).cloned();
            let is_correct = submitted.as_deref() == Some(question.correct.as_str());
            QuestionResult {
                index,
                submitted,
                correct: question.correct.clone(),
                is_correct,
            }
        })
        .collect();

    let total = questions.len();
    let score = breakdown.iter().filter(|r| r.is_correct).count();
    let percentage = if total == 0 {
        0.0
    } else {
        score as f64 / total as f64 * 100.0
    };

    GradeReport {
        score,
        incorrect: total - score,
        total,
        percentage,
        breakdown,
    }
}

/// Reads an answer payload that is either a JSON object or a string holding one.
///
/// Anything else, including unparseable text, yields an empty sheet.
pub fn parse_answers(payload: &Value) -> AnswerSheet {
    match payload {
        Value::Object(map) => map
            .iter()
            .filter_map(|(key, value)| {
                let answer = match value {
                    Value::String(s) => s.clone(),
                    Value::Null => return None,
                    other => other.to_string(),
                };
                Some((key.clone(), answer))
            })
            .collect(),
        Value::String(raw) => match serde_json::from_str::<Value>(raw) {
            Ok(inner @ Value::Object(_)) => parse_answers(&inner),
            Ok(_) | Err(_) => {
                debug!("Answer payload is not a JSON object; grading as empty");
                AnswerSheet::new()
            }
        },
        _ => AnswerSheet::new(),
    }
}
