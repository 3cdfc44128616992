//! Demo catalog for `STORE_BACKEND=memory`, so the API is explorable without Postgres.

use chrono::{Duration, NaiveTime, Utc};
use sqlx::types::Json;
use uuid::Uuid;

use super::{MemoryStore, Store};
use crate::errors::AppError;
use crate::models::assessment::{Assessment, MockTest, Question};
use crate::models::learning::{Certificate, InternshipAgendaItem, Session, StudyMaterial};
use crate::models::placement::{InterviewStatus, JobOpening, MockInterview, Notification};
use crate::models::student::NewStudent;
use crate::profile::resolver::{DEFAULT_BRANCH, DEFAULT_COLLEGE, DEFAULT_YEAR};

/// Identity of the pre-populated demo student (`x-identity-id: demo-student`).
pub const DEMO_IDENTITY: &str = "demo-student";

fn q(question: &str, options: [&str; 4], correct: &str) -> Question {
    Question {
        question: question.to_string(),
        options: options.iter().map(|o| o.to_string()).collect(),
        correct: correct.to_string(),
    }
}

fn time(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or(NaiveTime::MIN)
}

pub async fn sample_store() -> Result<MemoryStore, AppError> {
    let store = MemoryStore::new();
    let now = Utc::now();
    let today = now.date_naive();

    let sessions = [
        ("Introduction to HTML", "HTML Basics", "John Doe", -14, true, "https://www.youtube.com/live/tpVgfaWiftA"),
        ("CSS Fundamentals", "Styling Web Pages", "Jane Smith", -7, true, "https://www.youtube.com/live/hcGnztmTeeo"),
        ("JavaScript Basics", "Programming Logic", "Bob Johnson", -2, true, ""),
        ("Introduction to React", "React Basics", "Alice Brown", 2, false, ""),
        ("Django Models", "Backend Development", "Charlie Wilson", 5, false, ""),
    ];
    for (title, topic, mentor, offset_days, is_completed, recording_url) in sessions {
        store.add_session(Session {
            id: Uuid::new_v4(),
            title: title.to_string(),
            topic: topic.to_string(),
            mentor: mentor.to_string(),
            date: today + Duration::days(offset_days),
            start_time: time(17, 30),
            end_time: time(19, 30),
            description: format!("{topic} with {mentor}"),
            recording_url: recording_url.to_string(),
            is_completed,
            created_at: now,
        });
    }

    for (title, topic) in [
        ("HTML Assessment", "HTML"),
        ("CSS Assessment", "CSS"),
        ("Python Fundamentals Quiz", "Python"),
    ] {
        store.add_assessment(Assessment {
            id: Uuid::new_v4(),
            title: title.to_string(),
            description: format!("Test your {topic} knowledge"),
            topic: topic.to_string(),
            total_marks: 100,
            duration_minutes: 60,
            due_date: now + Duration::days(7),
            is_active: true,
            created_at: now,
        });
    }

    store.add_mock_test(MockTest {
        id: Uuid::new_v4(),
        title: "Aptitude Series A".to_string(),
        description: "Test your quantitative aptitude skills".to_string(),
        topic: "Aptitude".to_string(),
        total_marks: 4,
        duration_minutes: 30,
        questions: Json(vec![
            q("What is 15% of 200?", ["20", "25", "30", "35"], "30"),
            q("What is the next number in the sequence: 2, 4, 8, 16, ...?", ["24", "32", "28", "20"], "32"),
            q("What is the square root of 144?", ["10", "11", "12", "13"], "12"),
            q("If x + 5 = 12, what is x?", ["5", "6", "7", "8"], "7"),
        ]),
        is_active: true,
        created_at: now,
    });
    store.add_mock_test(MockTest {
        id: Uuid::new_v4(),
        title: "Reasoning Test".to_string(),
        description: "Test your logical reasoning abilities".to_string(),
        topic: "Reasoning".to_string(),
        total_marks: 3,
        duration_minutes: 25,
        questions: Json(vec![
            q("Which word does not belong: Apple, Banana, Carrot, Orange?", ["Apple", "Banana", "Carrot", "Orange"], "Carrot"),
            q("What comes next: A, C, E, G, ...?", ["H", "I", "J", "K"], "I"),
            q("What is the opposite of \"ascend\"?", ["Climb", "Rise", "Descend", "Soar"], "Descend"),
        ]),
        is_active: true,
        created_at: now + Duration::seconds(1),
    });

    for (title, file_url, file_type, file_size) in [
        ("HTML5 Complete Guide", "https://www.w3.org/TR/html5/", "pdf", 2_048_000),
        ("JavaScript Fundamentals", "https://developer.mozilla.org/en-US/docs/Web/JavaScript/Guide", "epub", 1_024_000),
        ("Full Stack Development Roadmap", "https://roadmap.sh/full-stack", "pdf", 512_000),
    ] {
        store.add_study_material(StudyMaterial {
            id: Uuid::new_v4(),
            title: title.to_string(),
            description: String::new(),
            file_url: file_url.to_string(),
            file_type: file_type.to_string(),
            file_size: Some(file_size),
            uploaded_at: now,
            is_active: true,
        });
    }

    store.add_job_opening(JobOpening {
        id: Uuid::new_v4(),
        title: "Full Stack Developer Intern".to_string(),
        company: "Manac Infotech Pvt Ltd".to_string(),
        description: "Build and ship features across the Django and React stack.".to_string(),
        requirements: "Python, JavaScript, Git".to_string(),
        location: "Hyderabad (Hybrid)".to_string(),
        salary_min: Some(1.8),
        salary_max: Some(3.0),
        job_type: "internship".to_string(),
        is_active: true,
        posted_at: now,
        application_deadline: Some(today + Duration::days(21)),
    });

    let weeks = [
        ("Week 1", "Python Fundamentals & Development Environment Setup"),
        ("Week 2", "Python Data Structures & Object-Oriented Programming"),
        ("Week 3", "HTML, CSS & Frontend Fundamentals"),
        ("Week 4", "Django Web Framework - Backend Development"),
        ("Week 5", "Database Integration & Full Stack Project Development"),
        ("Week 6", "Deployment, Testing & Final Project Presentation"),
    ];
    for (order, (week, agenda)) in weeks.into_iter().enumerate() {
        let first = order == 0;
        store.add_agenda_item(InternshipAgendaItem {
            id: Uuid::new_v4(),
            week: week.to_string(),
            agenda: agenda.to_string(),
            deliverables: "Complete the weekly milestone".to_string(),
            notes: if first {
                "Certificate: complete milestones, 80% attendance, pass final exam (60%)".to_string()
            } else {
                String::new()
            },
            responsibilities: if first {
                "6 weeks | Sessions 5:30-7:30 PM | Attendance 80% mandatory".to_string()
            } else {
                String::new()
            },
            sort_order: order as i32 + 1,
        });
    }

    seed_demo_student(&store).await?;
    Ok(store)
}

async fn seed_demo_student(store: &MemoryStore) -> Result<(), AppError> {
    let now = Utc::now();
    let today = now.date_naive();
    let student = store
        .get_or_create_student(&NewStudent {
            identity_id: DEMO_IDENTITY.to_string(),
            full_name: "Demo Student".to_string(),
            college: DEFAULT_COLLEGE.to_string(),
            branch: DEFAULT_BRANCH.to_string(),
            year: DEFAULT_YEAR.to_string(),
            enrollment_date: today - Duration::days(21),
        })
        .await?;

    let sessions = store.list_sessions().await?;
    for (i, session) in sessions.iter().filter(|s| s.is_completed).enumerate() {
        store.mark_attendance(student.id, session.id, i != 0);
    }

    store.add_certificate(Certificate {
        id: Uuid::new_v4(),
        student_id: student.id,
        title: "HTML & CSS Foundations".to_string(),
        description: "Awarded for completing the first two modules".to_string(),
        issued_date: today - Duration::days(3),
        is_verified: true,
        verification_code: String::new(),
    });
    store.add_notification(Notification {
        id: Uuid::new_v4(),
        student_id: student.id,
        title: "Welcome to the portal".to_string(),
        message: "Your internship starts this week. Check the agenda for details.".to_string(),
        notification_type: "info".to_string(),
        is_read: false,
        created_at: now,
    });
    store.add_mock_interview(MockInterview {
        id: Uuid::new_v4(),
        student_id: student.id,
        title: "Technical Round 1".to_string(),
        description: "JavaScript and CSS layout".to_string(),
        requested_date: now - Duration::days(10),
        scheduled_date: Some(now - Duration::days(7)),
        status: InterviewStatus::Completed.as_str().to_string(),
        feedback: "Strong in JS, need work on CSS Grid.".to_string(),
        created_at: now - Duration::days(10),
    });
    Ok(())
}
