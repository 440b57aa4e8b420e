//! crates/tutor_roster_core/src/seed.rs
//!
//! Demo records materialized at startup: two organizations carry a few
//! students and sessions, the rest start empty.
//!
//! Seeded usage reflects hours consumed before these rosters were kept, so a
//! seeded student's `used_hours` may exceed the sum of its listed sessions.

use crate::domain::{CourseType, Organization, Session, Student};
use crate::store::{OrganizationRoster, RosterStore};
use chrono::NaiveDate;
use uuid::Uuid;

fn student(
    name: &str,
    grade: &str,
    contact: &str,
    course_type: CourseType,
    total_hours: f64,
    used_hours: f64,
) -> Student {
    Student {
        id: Uuid::new_v4(),
        name: name.to_string(),
        grade: grade.to_string(),
        contact: contact.to_string(),
        course_type,
        total_hours,
        used_hours,
        remaining_hours: total_hours - used_hours,
    }
}

fn session(student: &Student, (y, m, d): (i32, u32, u32), hours_used: f64, content: &str, teacher: &str) -> Session {
    Session {
        id: Uuid::new_v4(),
        student_id: student.id,
        date: NaiveDate::from_ymd_opt(y, m, d).expect("valid seed date"),
        hours_used,
        content: content.to_string(),
        teacher: teacher.to_string(),
    }
}

fn login_roster() -> OrganizationRoster {
    let somjai = student("นางสาวสมใจ ใจดี", "ม.6", "081-234-5678", CourseType::Theory, 20.0, 8.0);
    let wichai = student("นายวิชัย เก่งมาก", "ม.5", "082-345-6789", CourseType::Practical, 15.0, 5.0);
    let sessions = vec![
        session(&somjai, (2024, 1, 15), 2.0, "สมการกำลังสอง และการแยกตัวประกอบ", "อาจารย์สมชาย"),
        session(&somjai, (2024, 1, 18), 3.0, "ฟังก์ชันและกราฟ", "อาจารย์สมหญิง"),
    ];
    OrganizationRoster::from_records(vec![somjai, wichai], sessions)
}

fn meta_roster() -> OrganizationRoster {
    let panya = student("นางสาวปัญญา ฉลาด", "ม.4", "083-456-7890", CourseType::Theory, 25.0, 18.0);
    let sessions = vec![session(&panya, (2024, 1, 16), 2.5, "เรขาคณิตวิเคราะห์", "อาจารย์วิชัย")];
    OrganizationRoster::from_records(vec![panya], sessions)
}

/// A store holding the demo records.
pub fn demo_store() -> RosterStore {
    let mut store = RosterStore::new();
    store.set_roster(Organization::Login, login_roster());
    store.set_roster(Organization::Meta, meta_roster());
    store
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_store_populates_two_organizations() {
        let store = demo_store();
        let counts: Vec<_> = store.overview().iter().map(|o| o.student_count).collect();
        assert_eq!(counts, vec![2, 1, 0, 0, 0]);
        assert_eq!(store.roster(Organization::Login).sessions().len(), 2);
        assert_eq!(store.roster(Organization::Meta).sessions().len(), 1);
    }

    #[test]
    fn seeded_session_dates_are_as_written() {
        let store = demo_store();
        let dates: Vec<String> = Organization::ALL
            .iter()
            .flat_map(|&org| store.roster(org).sessions().to_vec())
            .map(|session| session.date.to_string())
            .collect();
        assert_eq!(dates, vec!["2024-01-15", "2024-01-18", "2024-01-16"]);
    }

    #[test]
    fn seeded_sessions_reference_seeded_students() {
        let store = demo_store();
        for org in Organization::ALL {
            let roster = store.roster(org);
            for session in roster.sessions() {
                assert!(roster.get_student(session.student_id).is_some());
            }
            for student in roster.students() {
                assert_eq!(student.remaining_hours, student.total_hours - student.used_hours);
            }
        }
    }
}
