use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, warn};
use uuid::Uuid;

use super::Store;
use crate::errors::AppError;
use crate::models::assessment::{
    Assessment, GradedSubmission, MockTest, StudentAssessment, StudentMockTest, DEFAULT_MAX_SCORE,
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

/// Retries for an attempt insert that lost a race on the
/// (student_id, mock_test_id, attempt_number) unique constraint.
const MAX_ATTEMPT_RETRIES: u32 = 3;

/// PostgreSQL-backed store. Schema: `apps/api/schema.sql`.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .and_then(|db| db.code())
        .map_or(false, |code| code == "23505")
}

#[async_trait]
impl Store for PgStore {
    async fn find_student_by_identity(
        &self,
        identity_id: &str,
    ) -> Result<Option<Student>, AppError> {
        Ok(
            sqlx::query_as::<_, Student>("SELECT * FROM students WHERE identity_id = $1")
                .bind(identity_id)
                .fetch_optional(&self.pool)
                .await?,
        )
    }

    async fn get_or_create_student(&self, new: &NewStudent) -> Result<Student, AppError> {
        // Losing the race is fine: the row inserted by the winner is read back below.
        let inserted = sqlx::query(
            r#"
            INSERT INTO students (id, identity_id, full_name, college, branch, year, enrollment_date)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (identity_id) DO NOTHING
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&new.identity_id)
        .bind(&new.full_name)
        .bind(&new.college)
        .bind(&new.branch)
        .bind(&new.year)
        .bind(new.enrollment_date)
        .execute(&self.pool)
        .await?
        .rows_affected();

        if inserted > 0 {
            debug!("Created student for identity {}", new.identity_id);
        }

        self.find_student_by_identity(&new.identity_id)
            .await?
            .ok_or_else(|| {
                AppError::Internal(anyhow::anyhow!(
                    "student for identity {} vanished after insert",
                    new.identity_id
                ))
            })
    }

    async fn update_student(
        &self,
        student_id: Uuid,
        update: &StudentUpdate,
    ) -> Result<Student, AppError> {
        sqlx::query_as::<_, Student>(
            r#"
            UPDATE students SET
                full_name = $1, phone = $2, date_of_birth = $3, address = $4,
                college = $5, branch = $6, year = $7, linkedin_profile = $8,
                github_profile = $9, portfolio = $10, updated_at = NOW()
            WHERE id = $11
            RETURNING *
            "#,
        )
        .bind(&update.full_name)
        .bind(&update.phone)
        .bind(update.date_of_birth)
        .bind(&update.address)
        .bind(&update.college)
        .bind(&update.branch)
        .bind(&update.year)
        .bind(&update.linkedin_profile)
        .bind(&update.github_profile)
        .bind(&update.portfolio)
        .bind(student_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Student {student_id} not found")))
    }

    async fn password_hash(&self, identity_id: &str) -> Result<Option<String>, AppError> {
        Ok(sqlx::query_scalar::<_, String>(
            "SELECT password_hash FROM credentials WHERE identity_id = $1",
        )
        .bind(identity_id)
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn set_password_hash(&self, identity_id: &str, hash: &str) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO credentials (identity_id, password_hash)
            VALUES ($1, $2)
            ON CONFLICT (identity_id)
            DO UPDATE SET password_hash = EXCLUDED.password_hash, updated_at = NOW()
            "#,
        )
        .bind(identity_id)
        .bind(hash)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn list_sessions(&self) -> Result<Vec<Session>, AppError> {
        Ok(sqlx::query_as::<_, Session>(
            "SELECT * FROM sessions ORDER BY date DESC, start_time DESC",
        )
        .fetch_all(&self.pool)
        .await?)
    }

    async fn list_attendance(&self, student_id: Uuid) -> Result<Vec<AttendanceRecord>, AppError> {
        Ok(sqlx::query_as::<_, AttendanceRecord>(
            r#"
            SELECT a.id, a.student_id, a.session_id, a.is_present, a.marked_at,
                   s.title AS session_title,
                   s.topic AS session_topic,
                   s.mentor AS session_mentor,
                   s.date AS session_date,
                   s.start_time AS session_start_time,
                   s.end_time AS session_end_time,
                   s.recording_url AS session_recording_url
            FROM attendance a
            JOIN sessions s ON s.id = a.session_id
            WHERE a.student_id = $1
            ORDER BY s.date DESC, s.start_time DESC
            "#,
        )
        .bind(student_id)
        .fetch_all(&self.pool)
        .await?)
    }

    async fn list_study_materials(&self) -> Result<Vec<StudyMaterial>, AppError> {
        Ok(sqlx::query_as::<_, StudyMaterial>(
            "SELECT * FROM study_materials WHERE is_active ORDER BY uploaded_at DESC",
        )
        .fetch_all(&self.pool)
        .await?)
    }

    async fn list_certificates(&self, student_id: Uuid) -> Result<Vec<Certificate>, AppError> {
        Ok(sqlx::query_as::<_, Certificate>(
            "SELECT * FROM certificates WHERE student_id = $1 ORDER BY issued_date DESC",
        )
        .bind(student_id)
        .fetch_all(&self.pool)
        .await?)
    }

    async fn list_projects(&self, student_id: Uuid) -> Result<Vec<Project>, AppError> {
        Ok(sqlx::query_as::<_, Project>(
            r#"
            SELECT * FROM projects
            WHERE student_id = $1
            ORDER BY submitted_at DESC NULLS LAST, created_at DESC
            "#,
        )
        .bind(student_id)
        .fetch_all(&self.pool)
        .await?)
    }

    async fn insert_project(&self, new: &NewProject) -> Result<Project, AppError> {
        Ok(sqlx::query_as::<_, Project>(
            r#"
            INSERT INTO projects
                (id, student_id, title, description, github_url, live_demo_url,
                 technologies, status, submitted_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(new.student_id)
        .bind(&new.title)
        .bind(&new.description)
        .bind(&new.github_url)
        .bind(&new.live_demo_url)
        .bind(&new.technologies)
        .bind(new.status.as_str())
        .bind(new.submitted_at)
        .fetch_one(&self.pool)
        .await?)
    }

    async fn list_agenda(&self) -> Result<Vec<InternshipAgendaItem>, AppError> {
        Ok(sqlx::query_as::<_, InternshipAgendaItem>(
            "SELECT * FROM internship_agenda ORDER BY sort_order ASC",
        )
        .fetch_all(&self.pool)
        .await?)
    }

    async fn list_active_assessments(&self) -> Result<Vec<Assessment>, AppError> {
        Ok(sqlx::query_as::<_, Assessment>(
            "SELECT * FROM assessments WHERE is_active ORDER BY due_date ASC, title ASC",
        )
        .fetch_all(&self.pool)
        .await?)
    }

    async fn get_assessment(&self, assessment_id: Uuid) -> Result<Option<Assessment>, AppError> {
        Ok(
            sqlx::query_as::<_, Assessment>("SELECT * FROM assessments WHERE id = $1")
                .bind(assessment_id)
                .fetch_optional(&self.pool)
                .await?,
        )
    }

    async fn get_or_init_student_assessment(
        &self,
        student_id: Uuid,
        assessment_id: Uuid,
    ) -> Result<StudentAssessment, AppError> {
        sqlx::query(
            r#"
            INSERT INTO student_assessments (id, student_id, assessment_id, max_score)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (student_id, assessment_id) DO NOTHING
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(student_id)
        .bind(assessment_id)
        .bind(DEFAULT_MAX_SCORE)
        .execute(&self.pool)
        .await?;

        Ok(sqlx::query_as::<_, StudentAssessment>(
            "SELECT * FROM student_assessments WHERE student_id = $1 AND assessment_id = $2",
        )
        .bind(student_id)
        .bind(assessment_id)
        .fetch_one(&self.pool)
        .await?)
    }

    async fn list_student_assessments(
        &self,
        student_id: Uuid,
    ) -> Result<Vec<StudentAssessment>, AppError> {
        Ok(sqlx::query_as::<_, StudentAssessment>(
            "SELECT * FROM student_assessments WHERE student_id = $1",
        )
        .bind(student_id)
        .fetch_all(&self.pool)
        .await?)
    }

    async fn save_assessment_result(
        &self,
        student_id: Uuid,
        assessment_id: Uuid,
        result: &GradedSubmission,
    ) -> Result<StudentAssessment, AppError> {
        Ok(sqlx::query_as::<_, StudentAssessment>(
            r#"
            INSERT INTO student_assessments
                (id, student_id, assessment_id, score, max_score, submitted_at, is_completed, answers)
            VALUES ($1, $2, $3, $4, $5, $6, TRUE, $7)
            ON CONFLICT (student_id, assessment_id) DO UPDATE SET
                score = EXCLUDED.score,
                max_score = EXCLUDED.max_score,
                submitted_at = EXCLUDED.submitted_at,
                is_completed = TRUE,
                answers = EXCLUDED.answers
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(student_id)
        .bind(assessment_id)
        .bind(result.score)
        .bind(result.max_score)
        .bind(result.submitted_at)
        .bind(&result.answers)
        .fetch_one(&self.pool)
        .await?)
    }

    async fn list_active_mock_tests(&self) -> Result<Vec<MockTest>, AppError> {
        Ok(sqlx::query_as::<_, MockTest>(
            "SELECT * FROM mock_tests WHERE is_active ORDER BY created_at ASC",
        )
        .fetch_all(&self.pool)
        .await?)
    }

    async fn get_mock_test(&self, mock_test_id: Uuid) -> Result<Option<MockTest>, AppError> {
        Ok(
            sqlx::query_as::<_, MockTest>("SELECT * FROM mock_tests WHERE id = $1")
                .bind(mock_test_id)
                .fetch_optional(&self.pool)
                .await?,
        )
    }

    async fn insert_mock_test_attempt(
        &self,
        student_id: Uuid,
        mock_test_id: Uuid,
        result: &GradedSubmission,
    ) -> Result<StudentMockTest, AppError> {
        let mut retries = 0;
        loop {
            let mut tx = self.pool.begin().await?;

            // The counter row is locked by the upsert until commit, so concurrent
            // submissions for the same pair are serialized here.
            let attempt_number: i32 = sqlx::query_scalar(
                r#"
                INSERT INTO mock_test_attempt_counters (student_id, mock_test_id, last_attempt)
                VALUES ($1, $2, 1)
                ON CONFLICT (student_id, mock_test_id)
                DO UPDATE SET last_attempt = mock_test_attempt_counters.last_attempt + 1
                RETURNING last_attempt
                "#,
            )
            .bind(student_id)
            .bind(mock_test_id)
            .fetch_one(&mut *tx)
            .await?;

            let inserted = sqlx::query_as::<_, StudentMockTest>(
                r#"
                INSERT INTO student_mock_tests
                    (id, student_id, mock_test_id, score, max_score, submitted_at,
                     is_completed, answers, attempt_number)
                VALUES ($1, $2, $3, $4, $5, $6, TRUE, $7, $8)
                RETURNING *
                "#,
            )
            .bind(Uuid::new_v4())
            .bind(student_id)
            .bind(mock_test_id)
            .bind(result.score)
            .bind(result.max_score)
            .bind(result.submitted_at)
            .bind(&result.answers)
            .bind(attempt_number)
            .fetch_one(&mut *tx)
            .await;

            match inserted {
                Ok(attempt) => {
                    tx.commit().await?;
                    return Ok(attempt);
                }
                Err(e) if is_unique_violation(&e) && retries < MAX_ATTEMPT_RETRIES => {
                    // The counter fell behind existing rows; move it past them and try again.
                    warn!(
                        "Attempt {attempt_number} already taken for student {student_id}, mock test {mock_test_id}; retrying"
                    );
                    tx.rollback().await?;
                    sqlx::query(
                        r#"
                        UPDATE mock_test_attempt_counters
                        SET last_attempt = GREATEST(
                            last_attempt,
                            (SELECT COALESCE(MAX(attempt_number), 0) FROM student_mock_tests
                             WHERE student_id = $1 AND mock_test_id = $2))
                        WHERE student_id = $1 AND mock_test_id = $2
                        "#,
                    )
                    .bind(student_id)
                    .bind(mock_test_id)
                    .execute(&self.pool)
                    .await?;
                    retries += 1;
                }
                Err(e) if is_unique_violation(&e) => {
                    return Err(AppError::Conflict(
                        "Could not record the attempt; please submit again.".to_string(),
                    ))
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    async fn list_mock_test_attempts(
        &self,
        student_id: Uuid,
        mock_test_id: Uuid,
    ) -> Result<Vec<StudentMockTest>, AppError> {
        Ok(sqlx::query_as::<_, StudentMockTest>(
            r#"
            SELECT * FROM student_mock_tests
            WHERE student_id = $1 AND mock_test_id = $2
            ORDER BY attempt_number ASC
            "#,
        )
        .bind(student_id)
        .bind(mock_test_id)
        .fetch_all(&self.pool)
        .await?)
    }

    async fn list_active_job_openings(&self) -> Result<Vec<JobOpening>, AppError> {
        Ok(sqlx::query_as::<_, JobOpening>(
            "SELECT * FROM job_openings WHERE is_active ORDER BY posted_at DESC",
        )
        .fetch_all(&self.pool)
        .await?)
    }

    async fn get_job_opening(&self, job_opening_id: Uuid) -> Result<Option<JobOpening>, AppError> {
        Ok(
            sqlx::query_as::<_, JobOpening>("SELECT * FROM job_openings WHERE id = $1")
                .bind(job_opening_id)
                .fetch_optional(&self.pool)
                .await?,
        )
    }

    async fn list_job_applications(
        &self,
        student_id: Uuid,
    ) -> Result<Vec<JobApplication>, AppError> {
        Ok(sqlx::query_as::<_, JobApplication>(
            "SELECT * FROM job_applications WHERE student_id = $1 ORDER BY applied_at DESC",
        )
        .bind(student_id)
        .fetch_all(&self.pool)
        .await?)
    }

    async fn create_job_application(
        &self,
        student_id: Uuid,
        job_opening_id: Uuid,
    ) -> Result<bool, AppError> {
        let inserted = sqlx::query(
            r#"
            INSERT INTO job_applications (id, student_id, job_opening_id)
            VALUES ($1, $2, $3)
            ON CONFLICT (student_id, job_opening_id) DO NOTHING
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(student_id)
        .bind(job_opening_id)
        .execute(&self.pool)
        .await?
        .rows_affected();
        Ok(inserted > 0)
    }

    async fn list_mock_interviews(&self, student_id: Uuid) -> Result<Vec<MockInterview>, AppError> {
        Ok(sqlx::query_as::<_, MockInterview>(
            "SELECT * FROM mock_interviews WHERE student_id = $1 ORDER BY requested_date DESC",
        )
        .bind(student_id)
        .fetch_all(&self.pool)
        .await?)
    }

    async fn insert_mock_interview(
        &self,
        new: &NewMockInterview,
    ) -> Result<MockInterview, AppError> {
        Ok(sqlx::query_as::<_, MockInterview>(
            r#"
            INSERT INTO mock_interviews (id, student_id, title, description, requested_date, status)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(new.student_id)
        .bind(&new.title)
        .bind(&new.description)
        .bind(new.requested_date)
        .bind(InterviewStatus::Requested.as_str())
        .fetch_one(&self.pool)
        .await?)
    }

    async fn get_mock_interview(
        &self,
        student_id: Uuid,
        interview_id: Uuid,
    ) -> Result<Option<MockInterview>, AppError> {
        Ok(sqlx::query_as::<_, MockInterview>(
            "SELECT * FROM mock_interviews WHERE id = $1 AND student_id = $2",
        )
        .bind(interview_id)
        .bind(student_id)
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn set_mock_interview_status(
        &self,
        interview_id: Uuid,
        status: InterviewStatus,
    ) -> Result<MockInterview, AppError> {
        sqlx::query_as::<_, MockInterview>(
            "UPDATE mock_interviews SET status = $1 WHERE id = $2 RETURNING *",
        )
        .bind(status.as_str())
        .bind(interview_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Mock interview {interview_id} not found")))
    }

    async fn list_notifications(&self, student_id: Uuid) -> Result<Vec<Notification>, AppError> {
        Ok(sqlx::query_as::<_, Notification>(
            "SELECT * FROM notifications WHERE student_id = $1 ORDER BY created_at DESC",
        )
        .bind(student_id)
        .fetch_all(&self.pool)
        .await?)
    }

    async fn mark_notification_read(
        &self,
        student_id: Uuid,
        notification_id: Uuid,
    ) -> Result<bool, AppError> {
        let updated = sqlx::query(
            "UPDATE notifications SET is_read = TRUE WHERE id = $1 AND student_id = $2",
        )
        .bind(notification_id)
        .bind(student_id)
        .execute(&self.pool)
        .await?
        .rows_affected();
        Ok(updated > 0)
    }

    async fn latest_offer_letter(&self, student_id: Uuid) -> Result<Option<OfferLetter>, AppError> {
        Ok(sqlx::query_as::<_, OfferLetter>(
            r#"
            SELECT * FROM offer_letters
            WHERE student_id = $1
            ORDER BY issued_date DESC, created_at DESC
            LIMIT 1
            "#,
        )
        .bind(student_id)
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn get_or_issue_offer_letter(
        &self,
        new: &NewOfferLetter,
    ) -> Result<OfferLetter, AppError> {
        let mut tx = self.pool.begin().await?;

        // Locking the student row serializes first views for the same student.
        sqlx::query("SELECT id FROM students WHERE id = $1 FOR UPDATE")
            .bind(new.student_id)
            .execute(&mut *tx)
            .await?;

        let existing = sqlx::query_as::<_, OfferLetter>(
            r#"
            SELECT * FROM offer_letters
            WHERE student_id = $1
            ORDER BY issued_date DESC, created_at DESC
            LIMIT 1
            "#,
        )
        .bind(new.student_id)
        .fetch_optional(&mut *tx)
        .await?;
        if let Some(letter) = existing {
            tx.commit().await?;
            return Ok(letter);
        }

        let letter = sqlx::query_as::<_, OfferLetter>(
            r#"
            INSERT INTO offer_letters
                (id, student_id, title, company, start_date, compensation,
                 reporting_to, location, issued_date)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(new.student_id)
        .bind(&new.title)
        .bind(&new.company)
        .bind(new.start_date)
        .bind(new.compensation)
        .bind(&new.reporting_to)
        .bind(&new.location)
        .bind(new.issued_date)
        .fetch_one(&mut *tx)
        .await?;
        tx.commit().await?;
        debug!("Issued offer letter {} to student {}", letter.id, new.student_id);
        Ok(letter)
    }
}
