//! Storage layer. Every uniqueness and counter invariant of the portal lives
//! behind the `Store` trait so services never do read-then-write races.
//!
//! `AppState` holds an `Arc<dyn Store>`: `PgStore` in production,
//! `MemoryStore` for tests and local demos.

use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::assessment::{
    Assessment, GradedSubmission, MockTest, StudentAssessment, StudentMockTest,
};
use crate::models::learning::{
    AttendanceRecord, Certificate, InternshipAgendaItem, NewProject, Project, Session,
    StudyMaterial,
};
use crate::models::placement::{
    InterviewStatus, JobApplication, JobOpening, MockInterview, NewMockInterview, NewOfferLetter,
    Notification, OfferLetter,
};
use crate::models::student::{NewStudent, Student, StudentUpdate};

pub mod memory;
pub mod postgres;
pub mod seed;

pub use memory::MemoryStore;
pub use postgres::PgStore;

#[async_trait]
pub trait Store: Send + Sync {
    // ── Students ───────────────────────────────────────────────────────────

    async fn find_student_by_identity(&self, identity_id: &str)
        -> Result<Option<Student>, AppError>;

    /// Atomic get-or-create keyed on `identity_id`. Concurrent callers for the
    /// same identity all receive the single stored row.
    async fn get_or_create_student(&self, new: &NewStudent) -> Result<Student, AppError>;

    async fn update_student(
        &self,
        student_id: Uuid,
        update: &StudentUpdate,
    ) -> Result<Student, AppError>;

    async fn password_hash(&self, identity_id: &str) -> Result<Option<String>, AppError>;

    async fn set_password_hash(&self, identity_id: &str, hash: &str) -> Result<(), AppError>;

    // ── Catalog ────────────────────────────────────────────────────────────

    /// Newest first.
    async fn list_sessions(&self) -> Result<Vec<Session>, AppError>;

    /// Newest session first.
    async fn list_attendance(&self, student_id: Uuid) -> Result<Vec<AttendanceRecord>, AppError>;

    async fn list_study_materials(&self) -> Result<Vec<StudyMaterial>, AppError>;

    async fn list_certificates(&self, student_id: Uuid) -> Result<Vec<Certificate>, AppError>;

    async fn list_projects(&self, student_id: Uuid) -> Result<Vec<Project>, AppError>;

    async fn insert_project(&self, new: &NewProject) -> Result<Project, AppError>;

    async fn list_agenda(&self) -> Result<Vec<InternshipAgendaItem>, AppError>;

    // ── Assessments ────────────────────────────────────────────────────────

    async fn list_active_assessments(&self) -> Result<Vec<Assessment>, AppError>;

    async fn get_assessment(&self, assessment_id: Uuid) -> Result<Option<Assessment>, AppError>;

    /// Returns the single (student, assessment) row, inserting an ungraded one if absent.
    async fn get_or_init_student_assessment(
        &self,
        student_id: Uuid,
        assessment_id: Uuid,
    ) -> Result<StudentAssessment, AppError>;

    async fn list_student_assessments(
        &self,
        student_id: Uuid,
    ) -> Result<Vec<StudentAssessment>, AppError>;

    /// Upsert: the single (student, assessment) row takes the submission's values.
    async fn save_assessment_result(
        &self,
        student_id: Uuid,
        assessment_id: Uuid,
        result: &GradedSubmission,
    ) -> Result<StudentAssessment, AppError>;

    async fn list_active_mock_tests(&self) -> Result<Vec<MockTest>, AppError>;

    async fn get_mock_test(&self, mock_test_id: Uuid) -> Result<Option<MockTest>, AppError>;

    /// Appends a completed attempt. The store assigns the attempt number from a
    /// per-(student, mock test) counter that never hands out a number twice.
    async fn insert_mock_test_attempt(
        &self,
        student_id: Uuid,
        mock_test_id: Uuid,
        result: &GradedSubmission,
    ) -> Result<StudentMockTest, AppError>;

    /// Ordered by attempt number ascending.
    async fn list_mock_test_attempts(
        &self,
        student_id: Uuid,
        mock_test_id: Uuid,
    ) -> Result<Vec<StudentMockTest>, AppError>;

    // ── Placement ──────────────────────────────────────────────────────────

    async fn list_active_job_openings(&self) -> Result<Vec<JobOpening>, AppError>;

    async fn get_job_opening(&self, job_opening_id: Uuid) -> Result<Option<JobOpening>, AppError>;

    async fn list_job_applications(&self, student_id: Uuid)
        -> Result<Vec<JobApplication>, AppError>;

    /// Returns `true` when a new application was recorded, `false` when one already existed.
    async fn create_job_application(
        &self,
        student_id: Uuid,
        job_opening_id: Uuid,
    ) -> Result<bool, AppError>;

    async fn list_mock_interviews(&self, student_id: Uuid) -> Result<Vec<MockInterview>, AppError>;

    async fn insert_mock_interview(&self, new: &NewMockInterview)
        -> Result<MockInterview, AppError>;

    async fn get_mock_interview(
        &self,
        student_id: Uuid,
        interview_id: Uuid,
    ) -> Result<Option<MockInterview>, AppError>;

    async fn set_mock_interview_status(
        &self,
        interview_id: Uuid,
        status: InterviewStatus,
    ) -> Result<MockInterview, AppError>;

    /// Newest first.
    async fn list_notifications(&self, student_id: Uuid) -> Result<Vec<Notification>, AppError>;

    /// Returns `false` when the notification does not belong to the student.
    async fn mark_notification_read(
        &self,
        student_id: Uuid,
        notification_id: Uuid,
    ) -> Result<bool, AppError>;

    async fn latest_offer_letter(&self, student_id: Uuid) -> Result<Option<OfferLetter>, AppError>;

    /// Latest letter for `new.student_id`, or `new` inserted when the student
    /// has none. Concurrent calls for one student issue a single letter.
    async fn get_or_issue_offer_letter(&self, new: &NewOfferLetter)
        -> Result<OfferLetter, AppError>;
}
