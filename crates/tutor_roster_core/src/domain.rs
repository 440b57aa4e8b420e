//! crates/tutor_roster_core/src/domain.rs
//!
//! Defines the pure, core data structures for the roster.
//! These structs are independent of any transport or serialization format.

use crate::ledger::BalanceStatus;
use chrono::NaiveDate;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

//=========================================================================================
// Organizations (the closed set of contexts)
//=========================================================================================

/// One organizational unit. Each owns an isolated roster and session log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Organization {
    Login,
    Meta,
    Med,
    Ire,
    EdTech,
}

impl Organization {
    /// Every organization, in display order.
    pub const ALL: [Organization; 5] = [
        Organization::Login,
        Organization::Meta,
        Organization::Med,
        Organization::Ire,
        Organization::EdTech,
    ];

    /// Position in [`Organization::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(&self) -> &'static str {
        match self {
            Organization::Login => "Login",
            Organization::Meta => "Meta",
            Organization::Med => "Med",
            Organization::Ire => "IRE",
            Organization::EdTech => "Ed-tech",
        }
    }
}

impl fmt::Display for Organization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown organization: {0}")]
pub struct UnknownOrganization(pub String);

impl FromStr for Organization {
    type Err = UnknownOrganization;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Organization::ALL
            .into_iter()
            .find(|org| org.name() == s)
            .ok_or_else(|| UnknownOrganization(s.to_string()))
    }
}

//=========================================================================================
// Students and Sessions
//=========================================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CourseType {
    Theory,
    Practical,
}

impl CourseType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CourseType::Theory => "theory",
            CourseType::Practical => "practical",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown course type: {0}")]
pub struct UnknownCourseType(pub String);

impl FromStr for CourseType {
    type Err = UnknownCourseType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "theory" => Ok(CourseType::Theory),
            "practical" => Ok(CourseType::Practical),
            other => Err(UnknownCourseType(other.to_string())),
        }
    }
}

/// A tutoring client with a contracted hour allotment.
///
/// `remaining_hours` is always `total_hours - used_hours`; only the ledger
/// and the store write these three fields.
#[derive(Debug, Clone, PartialEq)]
pub struct Student {
    pub id: Uuid,
    pub name: String,
    pub grade: String,
    pub contact: String,
    pub course_type: CourseType,
    pub total_hours: f64,
    pub used_hours: f64,
    pub remaining_hours: f64,
}

/// One recorded teaching event. Immutable once appended to a roster.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub id: Uuid,
    pub student_id: Uuid,
    pub date: NaiveDate,
    pub hours_used: f64,
    pub content: String,
    pub teacher: String,
}

//=========================================================================================
// Command Inputs (unvalidated, as collected from a form)
//=========================================================================================

/// Fields for adding or editing a student.
#[derive(Debug, Clone, Default)]
pub struct StudentInput {
    pub name: String,
    pub grade: String,
    pub contact: String,
    pub course_type: String,
    pub total_hours: f64,
}

/// Fields for recording a session. `date` is ISO `YYYY-MM-DD`.
#[derive(Debug, Clone, Default)]
pub struct SessionInput {
    pub student_id: Uuid,
    pub date: String,
    pub hours_used: f64,
    pub content: String,
    pub teacher: String,
}

//=========================================================================================
// Derived Read Models
//=========================================================================================

/// A student together with its derived progress fields.
#[derive(Debug, Clone, PartialEq)]
pub struct StudentView {
    pub student: Student,
    pub progress_percent: f64,
    pub balance_status: BalanceStatus,
    pub session_count: usize,
}

/// A session with its position in the student's history (oldest is 1).
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    pub ordinal: usize,
    pub session: Session,
}

/// A student's sessions, newest first.
#[derive(Debug, Clone, PartialEq)]
pub struct StudentHistory {
    pub student: StudentView,
    pub entries: Vec<HistoryEntry>,
}

/// Aggregate figures for one organization's dashboard.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrganizationSummary {
    pub student_count: usize,
    pub total_hours: f64,
    pub used_hours: f64,
    pub remaining_hours: f64,
    pub session_count: usize,
    pub normal_count: usize,
    pub low_count: usize,
}

/// An organization and how many students it currently holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrganizationOverview {
    pub organization: Organization,
    pub student_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn organizations_parse_by_display_name() {
        assert_eq!("Ed-tech".parse::<Organization>(), Ok(Organization::EdTech));
        assert_eq!("IRE".parse::<Organization>(), Ok(Organization::Ire));
        assert!("ire".parse::<Organization>().is_err());
        assert!("Acme".parse::<Organization>().is_err());
    }

    #[test]
    fn organizations_keep_display_order() {
        let names: Vec<_> = Organization::ALL.iter().map(|o| o.name()).collect();
        assert_eq!(names, vec!["Login", "Meta", "Med", "IRE", "Ed-tech"]);
        for (position, org) in Organization::ALL.iter().enumerate() {
            assert_eq!(org.index(), position);
        }
    }

    #[test]
    fn course_type_rejects_unknown_values() {
        assert_eq!("theory".parse::<CourseType>(), Ok(CourseType::Theory));
        assert_eq!(" practical ".parse::<CourseType>(), Ok(CourseType::Practical));
        assert!("".parse::<CourseType>().is_err());
        assert!("lab".parse::<CourseType>().is_err());
    }
}
