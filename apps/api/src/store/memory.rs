use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::debug;
use uuid::Uuid;

use super::Store;
use crate::errors::AppError;
use crate::models::assessment::{
    Assessment, GradedSubmission, MockTest, StudentAssessment, StudentMockTest, DEFAULT_MAX_SCORE,
};
use crate::models::learning::{
    new_verification_code, AttendanceRecord, Certificate, InternshipAgendaItem, NewProject,
    Project, Session, StudyMaterial,
};
use crate::models::placement::{
    InterviewStatus, JobApplication, JobOpening, MockInterview, NewMockInterview, NewOfferLetter,
    Notification, OfferLetter,
};
use crate::models::student::{NewStudent, Student, StudentUpdate};

#[derive(Debug, Clone)]
struct AttendanceMark {
    id: Uuid,
    student_id: Uuid,
    session_id: Uuid,
    is_present: bool,
    marked_at: DateTime<Utc>,
}

/// Tables are plain vectors so ties in sort keys keep insertion order.
#[derive(Default)]
struct Tables {
    students: Vec<Student>,
    credentials: HashMap<String, String>,
    sessions: Vec<Session>,
    attendance: Vec<AttendanceMark>,
    study_materials: Vec<StudyMaterial>,
    certificates: Vec<Certificate>,
    projects: Vec<Project>,
    agenda: Vec<InternshipAgendaItem>,
    assessments: Vec<Assessment>,
    student_assessments: Vec<StudentAssessment>,
    mock_tests: Vec<MockTest>,
    mock_test_attempts: Vec<StudentMockTest>,
    attempt_counters: HashMap<(Uuid, Uuid), i32>,
    job_openings: Vec<JobOpening>,
    job_applications: Vec<JobApplication>,
    mock_interviews: Vec<MockInterview>,
    notifications: Vec<Notification>,
    offer_letters: Vec<OfferLetter>,
}

/// In-memory storage for tests and local demos.
///
/// Every operation runs under one lock acquisition, which gives the same
/// get-or-create and attempt-counter guarantees the Postgres constraints give.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn tables(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // Catalog records are written by processes outside the portal; these
    // inserts stand in for them in tests and demo data.

    pub fn add_session(&self, session: Session) {
        self.tables().sessions.push(session);
    }

    /// Unique per (student, session): a second mark replaces the first.
    pub fn mark_attendance(&self, student_id: Uuid, session_id: Uuid, is_present: bool) {
        let mut tables = self.tables();
        tables
            .attendance
            .retain(|a| !(a.student_id == student_id && a.session_id == session_id));
        tables.attendance.push(AttendanceMark {
            id: Uuid::new_v4(),
            student_id,
            session_id,
            is_present,
            marked_at: Utc::now(),
        });
    }

    pub fn add_study_material(&self, material: StudyMaterial) {
        self.tables().study_materials.push(material);
    }

    /// A blank verification code is replaced with a generated one.
    pub fn add_certificate(&self, mut certificate: Certificate) -> Certificate {
        if certificate.verification_code.trim().is_empty() {
            certificate.verification_code = new_verification_code();
        }
        self.tables().certificates.push(certificate.clone());
        certificate
    }

    pub fn add_agenda_item(&self, item: InternshipAgendaItem) {
        self.tables().agenda.push(item);
    }

    pub fn add_assessment(&self, assessment: Assessment) {
        self.tables().assessments.push(assessment);
    }

    pub fn add_mock_test(&self, mock_test: MockTest) {
        self.tables().mock_tests.push(mock_test);
    }

    pub fn add_job_opening(&self, opening: JobOpening) {
        self.tables().job_openings.push(opening);
    }

    pub fn add_notification(&self, notification: Notification) {
        self.tables().notifications.push(notification);
    }

    pub fn add_mock_interview(&self, interview: MockInterview) {
        self.tables().mock_interviews.push(interview);
    }

    /// Removes an attempt row without touching the pair's attempt counter.
    #[cfg(test)]
    pub fn delete_mock_test_attempt(&self, attempt_id: Uuid) -> bool {
        let mut tables = self.tables();
        let before = tables.mock_test_attempts.len();
        tables.mock_test_attempts.retain(|a| a.id != attempt_id);
        tables.mock_test_attempts.len() < before
    }

    #[cfg(test)]
    pub fn student_count(&self) -> usize {
        self.tables().students.len()
    }
}

fn sorted_desc_by<T, K: Ord>(mut rows: Vec<T>, key: impl Fn(&T) -> K) -> Vec<T> {
    rows.sort_by(|a, b| key(b).cmp(&key(a)));
    rows
}

#[async_trait]
impl Store for MemoryStore {
    async fn find_student_by_identity(
        &self,
        identity_id: &str,
    ) -> Result<Option<Student>, AppError> {
        Ok(self
            .tables()
            .students
            .iter()
            .find(|s| s.identity_id == identity_id)
            .cloned())
    }

    async fn get_or_create_student(&self, new: &NewStudent) -> Result<Student, AppError> {
        let mut tables = self.tables();
        if let Some(existing) = tables
            .students
            .iter()
            .find(|s| s.identity_id == new.identity_id)
        {
            return Ok(existing.clone());
        }
        let now = Utc::now();
        let student = Student {
            id: Uuid::new_v4(),
            identity_id: new.identity_id.clone(),
            full_name: new.full_name.clone(),
            phone: String::new(),
            date_of_birth: None,
            address: String::new(),
            college: new.college.clone(),
            branch: new.branch.clone(),
            year: new.year.clone(),
            linkedin_profile: String::new(),
            github_profile: String::new(),
            portfolio: String::new(),
            enrollment_date: new.enrollment_date,
            created_at: now,
            updated_at: now,
        };
        debug!("Created student {} for identity {}", student.id, student.identity_id);
        tables.students.push(student.clone());
        Ok(student)
    }

    async fn update_student(
        &self,
        student_id: Uuid,
        update: &StudentUpdate,
    ) -> Result<Student, AppError> {
        let mut tables = self.tables();
        let student = tables
            .students
            .iter_mut()
            .find(|s| s.id == student_id)
            .ok_or_else(|| AppError::NotFound(format!("Student {student_id} not found")))?;
        student.full_name = update.full_name.clone();
        student.phone = update.phone.clone();
        student.date_of_birth = update.date_of_birth;
        student.address = update.address.clone();
        student.college = update.college.clone();
        student.branch = update.branch.clone();
        student.year = update.year.clone();
        student.linkedin_profile = update.linkedin_profile.clone();
        student.github_profile = update.github_profile.clone();
        student.portfolio = update.portfolio.clone();
        student.updated_at = Utc::now();
        Ok(student.clone())
    }

    async fn password_hash(&self, identity_id: &str) -> Result<Option<String>, AppError> {
        Ok(self.tables().credentials.get(identity_id).cloned())
    }

    async fn set_password_hash(&self, identity_id: &str, hash: &str) -> Result<(), AppError> {
        self.tables()
            .credentials
            .insert(identity_id.to_string(), hash.to_string());
        Ok(())
    }

    async fn list_sessions(&self) -> Result<Vec<Session>, AppError> {
        let sessions = self.tables().sessions.clone();
        Ok(sorted_desc_by(sessions, |s| (s.date, s.start_time)))
    }

    async fn list_attendance(&self, student_id: Uuid) -> Result<Vec<AttendanceRecord>, AppError> {
        let tables = self.tables();
        let records = tables
            .attendance
            .iter()
            .filter(|a| a.student_id == student_id)
            .filter_map(|a| {
                let session = tables.sessions.iter().find(|s| s.id == a.session_id)?;
                Some(AttendanceRecord {
                    id: a.id,
                    student_id: a.student_id,
                    session_id: a.session_id,
                    is_present: a.is_present,
                    marked_at: a.marked_at,
                    session_title: session.title.clone(),
                    session_topic: session.topic.clone(),
                    session_mentor: session.mentor.clone(),
                    session_date: session.date,
                    session_start_time: session.start_time,
                    session_end_time: session.end_time,
                    session_recording_url: session.recording_url.clone(),
                })
            })
            .collect();
        Ok(sorted_desc_by(records, |r: &AttendanceRecord| {
            (r.session_date, r.session_start_time)
        }))
    }

    async fn list_study_materials(&self) -> Result<Vec<StudyMaterial>, AppError> {
        let materials = self
            .tables()
            .study_materials
            .iter()
            .filter(|m| m.is_active)
            .cloned()
            .collect();
        Ok(sorted_desc_by(materials, |m: &StudyMaterial| m.uploaded_at))
    }

    async fn list_certificates(&self, student_id: Uuid) -> Result<Vec<Certificate>, AppError> {
        let certificates = self
            .tables()
            .certificates
            .iter()
            .filter(|c| c.student_id == student_id)
            .cloned()
            .collect();
        Ok(sorted_desc_by(certificates, |c: &Certificate| c.issued_date))
    }

    async fn list_projects(&self, student_id: Uuid) -> Result<Vec<Project>, AppError> {
        let projects = self
            .tables()
            .projects
            .iter()
            .filter(|p| p.student_id == student_id)
            .cloned()
            .collect();
        Ok(sorted_desc_by(projects, |p: &Project| {
            (p.submitted_at, p.created_at)
        }))
    }

    async fn insert_project(&self, new: &NewProject) -> Result<Project, AppError> {
        let now = Utc::now();
        let project = Project {
            id: Uuid::new_v4(),
            student_id: new.student_id,
            title: new.title.clone(),
            description: new.description.clone(),
            github_url: new.github_url.clone(),
            live_demo_url: new.live_demo_url.clone(),
            technologies: new.technologies.clone(),
            status: new.status.as_str().to_string(),
            submitted_at: new.submitted_at,
            created_at: now,
            updated_at: now,
        };
        self.tables().projects.push(project.clone());
        Ok(project)
    }

    async fn list_agenda(&self) -> Result<Vec<InternshipAgendaItem>, AppError> {
        let mut agenda = self.tables().agenda.clone();
        agenda.sort_by_key(|item| item.sort_order);
        Ok(agenda)
    }

    async fn list_active_assessments(&self) -> Result<Vec<Assessment>, AppError> {
        let mut assessments: Vec<Assessment> = self
            .tables()
            .assessments
            .iter()
            .filter(|a| a.is_active)
            .cloned()
            .collect();
        assessments.sort_by(|a, b| a.due_date.cmp(&b.due_date).then(a.title.cmp(&b.title)));
        Ok(assessments)
    }

    async fn get_assessment(&self, assessment_id: Uuid) -> Result<Option<Assessment>, AppError> {
        Ok(self
            .tables()
            .assessments
            .iter()
            .find(|a| a.id == assessment_id)
            .cloned())
    }

    async fn get_or_init_student_assessment(
        &self,
        student_id: Uuid,
        assessment_id: Uuid,
    ) -> Result<StudentAssessment, AppError> {
        let mut tables = self.tables();
        if let Some(existing) = tables
            .student_assessments
            .iter()
            .find(|sa| sa.student_id == student_id && sa.assessment_id == assessment_id)
        {
            return Ok(existing.clone());
        }
        let record = StudentAssessment {
            id: Uuid::new_v4(),
            student_id,
            assessment_id,
            score: None,
            max_score: DEFAULT_MAX_SCORE,
            submitted_at: None,
            is_completed: false,
            answers: None,
        };
        tables.student_assessments.push(record.clone());
        Ok(record)
    }

    async fn list_student_assessments(
        &self,
        student_id: Uuid,
    ) -> Result<Vec<StudentAssessment>, AppError> {
        Ok(self
            .tables()
            .student_assessments
            .iter()
            .filter(|sa| sa.student_id == student_id)
            .cloned()
            .collect())
    }

    async fn save_assessment_result(
        &self,
        student_id: Uuid,
        assessment_id: Uuid,
        result: &GradedSubmission,
    ) -> Result<StudentAssessment, AppError> {
        let mut tables = self.tables();
        let position = tables
            .student_assessments
            .iter()
            .position(|sa| sa.student_id == student_id && sa.assessment_id == assessment_id);
        let record = StudentAssessment {
            id: position
                .map(|i| tables.student_assessments[i].id)
                .unwrap_or_else(Uuid::new_v4),
            student_id,
            assessment_id,
            score: Some(result.score),
            max_score: result.max_score,
            submitted_at: Some(result.submitted_at),
            is_completed: true,
            answers: Some(result.answers.clone()),
        };
        match position {
            Some(i) => tables.student_assessments[i] = record.clone(),
            None => tables.student_assessments.push(record.clone()),
        }
        Ok(record)
    }

    async fn list_active_mock_tests(&self) -> Result<Vec<MockTest>, AppError> {
        let mut tests: Vec<MockTest> = self
            .tables()
            .mock_tests
            .iter()
            .filter(|t| t.is_active)
            .cloned()
            .collect();
        tests.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(tests)
    }

    async fn get_mock_test(&self, mock_test_id: Uuid) -> Result<Option<MockTest>, AppError> {
        Ok(self
            .tables()
            .mock_tests
            .iter()
            .find(|t| t.id == mock_test_id)
            .cloned())
    }

    async fn insert_mock_test_attempt(
        &self,
        student_id: Uuid,
        mock_test_id: Uuid,
        result: &GradedSubmission,
    ) -> Result<StudentMockTest, AppError> {
        let mut tables = self.tables();
        let counter = tables
            .attempt_counters
            .entry((student_id, mock_test_id))
            .or_insert(0);
        *counter += 1;
        let attempt = StudentMockTest {
            id: Uuid::new_v4(),
            student_id,
            mock_test_id,
            score: Some(result.score),
            max_score: result.max_score,
            submitted_at: Some(result.submitted_at),
            is_completed: true,
            answers: Some(result.answers.clone()),
            attempt_number: *counter,
        };
        debug!(
            "Recorded attempt {} of mock test {} for student {}",
            attempt.attempt_number, mock_test_id, student_id
        );
        tables.mock_test_attempts.push(attempt.clone());
        Ok(attempt)
    }

    async fn list_mock_test_attempts(
        &self,
        student_id: Uuid,
        mock_test_id: Uuid,
    ) -> Result<Vec<StudentMockTest>, AppError> {
        let mut attempts: Vec<StudentMockTest> = self
            .tables()
            .mock_test_attempts
            .iter()
            .filter(|a| a.student_id == student_id && a.mock_test_id == mock_test_id)
            .cloned()
            .collect();
        attempts.sort_by_key(|a| a.attempt_number);
        Ok(attempts)
    }

    async fn list_active_job_openings(&self) -> Result<Vec<JobOpening>, AppError> {
        let openings = self
            .tables()
            .job_openings
            .iter()
            .filter(|j| j.is_active)
            .cloned()
            .collect();
        Ok(sorted_desc_by(openings, |j: &JobOpening| j.posted_at))
    }

    async fn get_job_opening(&self, job_opening_id: Uuid) -> Result<Option<JobOpening>, AppError> {
        Ok(self
            .tables()
            .job_openings
            .iter()
            .find(|j| j.id == job_opening_id)
            .cloned())
    }

    async fn list_job_applications(
        &self,
        student_id: Uuid,
    ) -> Result<Vec<JobApplication>, AppError> {
        let applications = self
            .tables()
            .job_applications
            .iter()
            .filter(|a| a.student_id == student_id)
            .cloned()
            .collect();
        Ok(sorted_desc_by(applications, |a: &JobApplication| a.applied_at))
    }

    async fn create_job_application(
        &self,
        student_id: Uuid,
        job_opening_id: Uuid,
    ) -> Result<bool, AppError> {
        let mut tables = self.tables();
        if tables
            .job_applications
            .iter()
            .any(|a| a.student_id == student_id && a.job_opening_id == job_opening_id)
        {
            return Ok(false);
        }
        tables.job_applications.push(JobApplication {
            id: Uuid::new_v4(),
            student_id,
            job_opening_id,
            applied_at: Utc::now(),
            status: "applied".to_string(),
            cover_letter: String::new(),
            linkedin_profile: String::new(),
            github_profile: String::new(),
            portfolio_url: String::new(),
        });
        Ok(true)
    }

    async fn list_mock_interviews(&self, student_id: Uuid) -> Result<Vec<MockInterview>, AppError> {
        let interviews = self
            .tables()
            .mock_interviews
            .iter()
            .filter(|i| i.student_id == student_id)
            .cloned()
            .collect();
        Ok(sorted_desc_by(interviews, |i: &MockInterview| i.requested_date))
    }

    async fn insert_mock_interview(
        &self,
        new: &NewMockInterview,
    ) -> Result<MockInterview, AppError> {
        let interview = MockInterview {
            id: Uuid::new_v4(),
            student_id: new.student_id,
            title: new.title.clone(),
            description: new.description.clone(),
            requested_date: new.requested_date,
            scheduled_date: None,
            status: InterviewStatus::Requested.as_str().to_string(),
            feedback: String::new(),
            created_at: Utc::now(),
        };
        self.tables().mock_interviews.push(interview.clone());
        Ok(interview)
    }

    async fn get_mock_interview(
        &self,
        student_id: Uuid,
        interview_id: Uuid,
    ) -> Result<Option<MockInterview>, AppError> {
        Ok(self
            .tables()
            .mock_interviews
            .iter()
            .find(|i| i.id == interview_id && i.student_id == student_id)
            .cloned())
    }

    async fn set_mock_interview_status(
        &self,
        interview_id: Uuid,
        status: InterviewStatus,
    ) -> Result<MockInterview, AppError> {
        let mut tables = self.tables();
        let interview = tables
            .mock_interviews
            .iter_mut()
            .find(|i| i.id == interview_id)
            .ok_or_else(|| AppError::NotFound(format!("Mock interview {interview_id} not found")))?;
        interview.status = status.as_str().to_string();
        Ok(interview.clone())
    }

    async fn list_notifications(&self, student_id: Uuid) -> Result<Vec<Notification>, AppError> {
        let notifications = self
            .tables()
            .notifications
            .iter()
            .filter(|n| n.student_id == student_id)
            .cloned()
            .collect();
        Ok(sorted_desc_by(notifications, |n: &Notification| n.created_at))
    }

    async fn mark_notification_read(
        &self,
        student_id: Uuid,
        notification_id: Uuid,
    ) -> Result<bool, AppError> {
        let mut tables = self.tables();
        match tables
            .notifications
            .iter_mut()
            .find(|n| n.id == notification_id && n.student_id == student_id)
        {
            Some(notification) => {
                notification.is_read = true;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn latest_offer_letter(&self, student_id: Uuid) -> Result<Option<OfferLetter>, AppError> {
        Ok(self
            .tables()
            .offer_letters
            .iter()
            .filter(|o| o.student_id == student_id)
            .max_by_key(|o| o.issued_date)
            .cloned())
    }

    async fn get_or_issue_offer_letter(
        &self,
        new: &NewOfferLetter,
    ) -> Result<OfferLetter, AppError> {
        let mut tables = self.tables();
        if let Some(existing) = tables
            .offer_letters
            .iter()
            .filter(|o| o.student_id == new.student_id)
            .max_by_key(|o| o.issued_date)
        {
            return Ok(existing.clone());
        }
        let letter = OfferLetter {
            id: Uuid::new_v4(),
            student_id: new.student_id,
            title: new.title.clone(),
            company: new.company.clone(),
            start_date: new.start_date,
            compensation: new.compensation,
            reporting_to: new.reporting_to.clone(),
            location: new.location.clone(),
            issued_date: new.issued_date,
            is_accepted: false,
            accepted_at: None,
        };
        tables.offer_letters.push(letter.clone());
        debug!("Issued offer letter {} to student {}", letter.id, new.student_id);
        Ok(letter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;
    use std::sync::Arc;

    fn new_student(identity: &str) -> NewStudent {
        NewStudent {
            identity_id: identity.to_string(),
            full_name: "Asha Rao".to_string(),
            college: "Default College".to_string(),
            branch: "Computer Science".to_string(),
            year: "1st".to_string(),
            enrollment_date: NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(),
        }
    }

    fn submission(score: f64) -> GradedSubmission {
        GradedSubmission {
            score,
            max_score: 10.0,
            answers: json!({"0": "a"}),
            submitted_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_get_or_create_student_is_idempotent() {
        let store = MemoryStore::new();
        let first = store.get_or_create_student(&new_student("u-1")).await.unwrap();
        let second = store.get_or_create_student(&new_student("u-1")).await.unwrap();
        assert_eq!(first.id, second.id);
        assert_eq!(store.student_count(), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_get_or_create_yields_one_student() {
        let store = Arc::new(MemoryStore::new());
        let mut handles = Vec::new();
        for _ in 0..8 {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move {
                store.get_or_create_student(&new_student("racer")).await.unwrap().id
            }));
        }
        let mut ids = Vec::new();
        for handle in handles {
            ids.push(handle.await.unwrap());
        }
        ids.dedup();
        assert_eq!(ids.len(), 1);
        assert_eq!(store.student_count(), 1);
    }

    #[tokio::test]
    async fn test_attempt_numbers_are_not_reused_after_delete() {
        let store = MemoryStore::new();
        let (student, test) = (Uuid::new_v4(), Uuid::new_v4());
        store.insert_mock_test_attempt(student, test, &submission(3.0)).await.unwrap();
        let second = store
            .insert_mock_test_attempt(student, test, &submission(5.0))
            .await
            .unwrap();
        assert!(store.delete_mock_test_attempt(second.id));

        let third = store
            .insert_mock_test_attempt(student, test, &submission(6.0))
            .await
            .unwrap();
        assert_eq!(third.attempt_number, 3);
    }

    #[tokio::test]
    async fn test_attempt_counters_are_scoped_per_pair() {
        let store = MemoryStore::new();
        let student = Uuid::new_v4();
        let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
        store.insert_mock_test_attempt(student, a, &submission(1.0)).await.unwrap();
        store.insert_mock_test_attempt(student, a, &submission(1.0)).await.unwrap();
        let first_of_b = store.insert_mock_test_attempt(student, b, &submission(1.0)).await.unwrap();
        assert_eq!(first_of_b.attempt_number, 1);
    }

    #[tokio::test]
    async fn test_job_application_unique_per_pair() {
        let store = MemoryStore::new();
        let (student, job) = (Uuid::new_v4(), Uuid::new_v4());
        assert!(store.create_job_application(student, job).await.unwrap());
        assert!(!store.create_job_application(student, job).await.unwrap());
        assert_eq!(store.list_job_applications(student).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_mark_attendance_replaces_existing_mark() {
        let store = MemoryStore::new();
        let student = Uuid::new_v4();
        let session = seed_session_for_test(&store);
        store.mark_attendance(student, session, false);
        store.mark_attendance(student, session, true);
        let records = store.list_attendance(student).await.unwrap();
        assert_eq!(records.len(), 1);
        assert!(records[0].is_present);
    }

    #[tokio::test]
    async fn test_foreign_notification_is_not_marked() {
        let store = MemoryStore::new();
        let owner = Uuid::new_v4();
        let id = Uuid::new_v4();
        store.add_notification(Notification {
            id,
            student_id: owner,
            title: "Welcome".to_string(),
            message: "Hello".to_string(),
            notification_type: "info".to_string(),
            is_read: false,
            created_at: Utc::now(),
        });
        assert!(!store.mark_notification_read(Uuid::new_v4(), id).await.unwrap());
        assert!(store.mark_notification_read(owner, id).await.unwrap());
    }

    #[tokio::test]
    async fn test_certificates_get_codes_and_list_newest_first() {
        let store = MemoryStore::new();
        let student = Uuid::new_v4();
        for (day, code) in [(1, ""), (20, "CAFEBABE")] {
            store.add_certificate(Certificate {
                id: Uuid::new_v4(),
                student_id: student,
                title: format!("Certificate {day}"),
                description: String::new(),
                issued_date: NaiveDate::from_ymd_opt(2026, 2, day).unwrap(),
                is_verified: true,
                verification_code: code.to_string(),
            });
        }
        let listed = store.list_certificates(student).await.unwrap();
        assert_eq!(listed[0].verification_code, "CAFEBABE");
        assert_eq!(listed[1].verification_code.len(), 8);
    }

    fn seed_session_for_test(store: &MemoryStore) -> Uuid {
        let id = Uuid::new_v4();
        store.add_session(Session {
            id,
            title: "Intro".to_string(),
            topic: "HTML".to_string(),
            mentor: "Ravi".to_string(),
            date: NaiveDate::from_ymd_opt(2026, 2, 1).unwrap(),
            start_time: chrono::NaiveTime::from_hms_opt(17, 30, 0).unwrap(),
            end_time: chrono::NaiveTime::from_hms_opt(19, 30, 0).unwrap(),
            description: String::new(),
            recording_url: String::new(),
            is_completed: true,
            created_at: Utc::now(),
        });
        id
    }
}
