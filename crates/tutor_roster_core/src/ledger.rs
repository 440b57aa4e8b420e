//! crates/tutor_roster_core/src/ledger.rs
//!
//! The hour ledger: pure arithmetic over a student's contracted, used and
//! remaining hours. Nothing here touches a roster; the store decides when a
//! session may be applied.

use crate::domain::{Student, StudentView};

/// Remaining hours at or below this value are flagged as a low balance.
pub const LOW_BALANCE_THRESHOLD: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BalanceStatus {
    Normal,
    Low,
}

impl BalanceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BalanceStatus::Normal => "normal",
            BalanceStatus::Low => "low",
        }
    }
}

/// Percentage of the contracted hours already used.
///
/// `total_hours` must be positive; the store never admits a student whose
/// total is not.
pub fn compute_progress(used_hours: f64, total_hours: f64) -> f64 {
    debug_assert!(total_hours > 0.0, "total_hours must be positive");
    used_hours / total_hours * 100.0
}

/// Returns the student with `hours_used` charged against its balance.
///
/// Assumes the caller already checked `0 < hours_used <= remaining_hours`.
pub fn apply_session(student: &Student, hours_used: f64) -> Student {
    let used_hours = student.used_hours + hours_used;
    Student {
        used_hours,
        remaining_hours: student.total_hours - used_hours,
        ..student.clone()
    }
}

pub fn classify(remaining_hours: f64) -> BalanceStatus {
    if remaining_hours <= LOW_BALANCE_THRESHOLD {
        BalanceStatus::Low
    } else {
        BalanceStatus::Normal
    }
}

/// Attaches the derived progress fields to a student.
pub fn student_view(student: &Student, session_count: usize) -> StudentView {
    StudentView {
        progress_percent: compute_progress(student.used_hours, student.total_hours),
        balance_status: classify(student.remaining_hours),
        student: student.clone(),
        session_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CourseType;
    use uuid::Uuid;

    fn student(total: f64, used: f64) -> Student {
        Student {
            id: Uuid::new_v4(),
            name: "Ann".to_string(),
            grade: "M.6".to_string(),
            contact: "081-000-0000".to_string(),
            course_type: CourseType::Theory,
            total_hours: total,
            used_hours: used,
            remaining_hours: total - used,
        }
    }

    #[test]
    fn progress_is_used_over_total() {
        assert_eq!(compute_progress(8.0, 20.0), 40.0);
        assert_eq!(compute_progress(0.0, 15.0), 0.0);
        assert_eq!(compute_progress(25.0, 25.0), 100.0);
    }

    #[test]
    fn apply_session_updates_used_and_remaining() {
        let before = student(20.0, 8.0);
        let after = apply_session(&before, 2.5);

        assert_eq!(after.used_hours, 10.5);
        assert_eq!(after.remaining_hours, 9.5);
        assert_eq!(after.total_hours, 20.0);
        assert_eq!(after.id, before.id);
        // The input record is left alone.
        assert_eq!(before.used_hours, 8.0);
    }

    #[test]
    fn classify_boundary_is_inclusive() {
        assert_eq!(classify(5.0), BalanceStatus::Low);
        assert_eq!(classify(5.01), BalanceStatus::Normal);
        assert_eq!(classify(0.0), BalanceStatus::Low);
        assert_eq!(classify(12.0), BalanceStatus::Normal);
    }

    #[test]
    fn student_view_derives_fields() {
        let view = student_view(&student(25.0, 18.0), 7);
        assert_eq!(view.progress_percent, 72.0);
        assert_eq!(view.balance_status, BalanceStatus::Normal);
        assert_eq!(view.session_count, 7);

        let view = student_view(&student(10.0, 6.0), 0);
        assert_eq!(view.balance_status, BalanceStatus::Low);
    }
}
