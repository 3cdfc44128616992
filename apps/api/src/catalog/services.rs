//! Read-only views over the learning catalog and the student's own records.

use chrono::NaiveDate;
use serde::Serialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::learning::{AttendanceRecord, Project, Session};
use crate::models::student::Student;
use crate::quiz::engine::round1;
use crate::store::Store;

const DASHBOARD_LIST_LEN: usize = 3;

#[derive(Debug, Serialize)]
pub struct Dashboard {
    pub student: Student,
    pub upcoming_sessions: Vec<Session>,
    pub attendance_percentage: f64,
    pub total_sessions: usize,
    pub attended_sessions: usize,
    pub total_assessments: usize,
    pub completed_assessments: usize,
    pub recent_projects: Vec<Project>,
    pub recent_sessions: Vec<AttendanceRecord>,
}

#[derive(Debug, Serialize)]
pub struct AttendanceSummary {
    pub attendances: Vec<AttendanceRecord>,
    pub total_sessions: usize,
    pub present_count: usize,
    pub absent_count: usize,
    pub attendance_rate: f64,
}

fn rate(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        round1(part as f64 / whole as f64 * 100.0)
    }
}

/// Sessions on or after `today` that have not run yet, soonest first.
pub fn upcoming(sessions: &[Session], today: NaiveDate, limit: usize) -> Vec<Session> {
    let mut upcoming: Vec<Session> = sessions
        .iter()
        .filter(|s| s.date >= today && !s.is_completed)
        .cloned()
        .collect();
    upcoming.sort_by_key(|s| (s.date, s.start_time));
    upcoming.truncate(limit);
    upcoming
}

pub async fn dashboard(
    store: &dyn Store,
    student: Student,
    today: NaiveDate,
) -> Result<Dashboard, AppError> {
    let sessions = store.list_sessions().await?;
    let attendance = store.list_attendance(student.id).await?;

    let total_sessions = sessions.iter().filter(|s| s.is_completed).count();
    let attended: Vec<AttendanceRecord> =
        attendance.into_iter().filter(|a| a.is_present).collect();

    let total_assessments = store.list_active_assessments().await?.len();
    let completed_assessments = store
        .list_student_assessments(student.id)
        .await?
        .iter()
        .filter(|sa| sa.is_completed)
        .count();

    let mut recent_projects = store.list_projects(student.id).await?;
    recent_projects.truncate(DASHBOARD_LIST_LEN);

    Ok(Dashboard {
        upcoming_sessions: upcoming(&sessions, today, DASHBOARD_LIST_LEN),
        attendance_percentage: rate(attended.len(), total_sessions),
        total_sessions,
        attended_sessions: attended.len(),
        total_assessments,
        completed_assessments,
        recent_projects,
        recent_sessions: attended.into_iter().take(DASHBOARD_LIST_LEN).collect(),
        student,
    })
}

pub async fn attendance_summary(
    store: &dyn Store,
    student_id: Uuid,
) -> Result<AttendanceSummary, AppError> {
    let attendances = store.list_attendance(student_id).await?;
    let total_sessions = attendances.len();
    let present_count = attendances.iter().filter(|a| a.is_present).count();

    Ok(AttendanceSummary {
        attendance_rate: rate(present_count, total_sessions),
        absent_count: total_sessions - present_count,
        present_count,
        total_sessions,
        attendances,
    })
}

pub async fn recordings(store: &dyn Store) -> Result<Vec<Session>, AppError> {
    Ok(store
        .list_sessions()
        .await?
        .into_iter()
        .filter(Session::has_recording)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::learning::{NewProject, ProjectStatus};
    use crate::models::student::NewStudent;
    use crate::store::MemoryStore;
    use chrono::{Duration, NaiveTime, Utc};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 5, 10).unwrap()
    }

    fn session(title: &str, offset_days: i64, hour: u32, completed: bool, recording: &str) -> Session {
        Session {
            id: Uuid::new_v4(),
            title: title.to_string(),
            topic: "Web".to_string(),
            mentor: "John Doe".to_string(),
            date: today() + Duration::days(offset_days),
            start_time: NaiveTime::from_hms_opt(hour, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(hour + 2, 0, 0).unwrap(),
            description: String::new(),
            recording_url: recording.to_string(),
            is_completed: completed,
            created_at: Utc::now(),
        }
    }

    async fn student(store: &MemoryStore) -> Student {
        store
            .get_or_create_student(&NewStudent {
                identity_id: "u-dash".to_string(),
                full_name: "Asha Rao".to_string(),
                college: "Default College".to_string(),
                branch: "Computer Science".to_string(),
                year: "1st".to_string(),
                enrollment_date: today(),
            })
            .await
            .unwrap()
    }

    #[test]
    fn test_upcoming_orders_soonest_first_and_limits() {
        let sessions = vec![
            session("Later", 5, 17, false, ""),
            session("Past", -1, 17, false, ""),
            session("Today late", 0, 18, false, ""),
            session("Today early", 0, 9, false, ""),
            session("Done", 1, 9, true, ""),
            session("Far", 9, 9, false, ""),
        ];
        let titles: Vec<String> = upcoming(&sessions, today(), 3)
            .into_iter()
            .map(|s| s.title)
            .collect();
        assert_eq!(titles, vec!["Today early", "Today late", "Later"]);
    }

    #[tokio::test]
    async fn test_dashboard_attendance_percentage() {
        let store = MemoryStore::new();
        let completed: Vec<Session> = (1..=3)
            .map(|i| session(&format!("S{i}"), -i, 17, true, ""))
            .collect();
        for s in &completed {
            store.add_session(s.clone());
        }
        store.add_session(session("Next", 2, 17, false, ""));
        let student = student(&store).await;
        store.mark_attendance(student.id, completed[0].id, true);
        store.mark_attendance(student.id, completed[1].id, true);
        store.mark_attendance(student.id, completed[2].id, false);

        let dash = dashboard(&store, student, today()).await.unwrap();
        assert_eq!(dash.total_sessions, 3);
        assert_eq!(dash.attended_sessions, 2);
        assert_eq!(dash.attendance_percentage, 66.7);
        assert_eq!(dash.upcoming_sessions.len(), 1);
        assert_eq!(dash.recent_sessions.len(), 2);
    }

    #[tokio::test]
    async fn test_dashboard_without_completed_sessions_is_zero_percent() {
        let store = MemoryStore::new();
        let student = student(&store).await;
        let dash = dashboard(&store, student, today()).await.unwrap();
        assert_eq!(dash.attendance_percentage, 0.0);
        assert!(dash.recent_projects.is_empty());
    }

    #[tokio::test]
    async fn test_dashboard_keeps_three_recent_projects() {
        let store = MemoryStore::new();
        let student = student(&store).await;
        for i in 0..5 {
            store
                .insert_project(&NewProject {
                    student_id: student.id,
                    title: format!("Project {i}"),
                    description: String::new(),
                    github_url: String::new(),
                    live_demo_url: String::new(),
                    technologies: String::new(),
                    status: ProjectStatus::Submitted,
                    submitted_at: Some(Utc::now() + Duration::minutes(i)),
                })
                .await
                .unwrap();
        }
        let dash = dashboard(&store, student, today()).await.unwrap();
        assert_eq!(dash.recent_projects.len(), 3);
        assert_eq!(dash.recent_projects[0].title, "Project 4");
    }

    #[tokio::test]
    async fn test_attendance_summary_counts() {
        let store = MemoryStore::new();
        let a = session("A", -3, 17, true, "");
        let b = session("B", -2, 17, true, "");
        store.add_session(a.clone());
        store.add_session(b.clone());
        let student_id = Uuid::new_v4();
        store.mark_attendance(student_id, a.id, true);
        store.mark_attendance(student_id, b.id, false);

        let summary = attendance_summary(&store, student_id).await.unwrap();
        assert_eq!(summary.total_sessions, 2);
        assert_eq!(summary.present_count, 1);
        assert_eq!(summary.absent_count, 1);
        assert_eq!(summary.attendance_rate, 50.0);
        assert_eq!(summary.attendances[0].session_title, "B");
    }

    #[tokio::test]
    async fn test_recordings_skip_sessions_without_url() {
        let store = MemoryStore::new();
        store.add_session(session("Recorded", -3, 17, true, "https://example.org/v/1"));
        store.add_session(session("Blank", -2, 17, true, "   "));
        let recorded = recordings(&store).await.unwrap();
        assert_eq!(recorded.len(), 1);
        assert_eq!(recorded[0].title, "Recorded");
    }
}
