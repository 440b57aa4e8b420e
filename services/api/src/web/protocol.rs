//! services/api/src/web/protocol.rs
//!
//! Defines the JSON payloads exchanged between the browser client and the API
//! server, and their conversions from the core domain types.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tutor_roster_core::domain::{
    HistoryEntry, OrganizationOverview, OrganizationSummary, Session, SessionInput, StudentHistory,
    StudentInput, StudentView,
};
use utoipa::ToSchema;
use uuid::Uuid;

/// Every field name a request body may carry, as spelled on the wire.
pub const REQUEST_FIELDS: [&str; 10] = [
    "name",
    "grade",
    "contact",
    "courseType",
    "totalHours",
    "studentId",
    "date",
    "hoursUsed",
    "content",
    "teacher",
];

//=========================================================================================
// Requests FROM the Client
//=========================================================================================
// Missing fields default to empty values so that they are reported as field
// errors rather than rejected as malformed JSON.
//=========================================================================================

/// The student form, used for both adding and editing.
#[derive(Deserialize, Debug, Default, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct StudentRequest {
    pub name: String,
    pub grade: String,
    pub contact: String,
    /// `theory` or `practical`.
    pub course_type: String,
    pub total_hours: f64,
}

impl From<StudentRequest> for StudentInput {
    fn from(req: StudentRequest) -> Self {
        StudentInput {
            name: req.name,
            grade: req.grade,
            contact: req.contact,
            course_type: req.course_type,
            total_hours: req.total_hours,
        }
    }
}

/// The session form.
#[derive(Deserialize, Debug, Default, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct SessionRequest {
    pub student_id: Uuid,
    /// ISO date, `YYYY-MM-DD`.
    pub date: String,
    pub hours_used: f64,
    pub content: String,
    pub teacher: String,
}

impl From<SessionRequest> for SessionInput {
    fn from(req: SessionRequest) -> Self {
        SessionInput {
            student_id: req.student_id,
            date: req.date,
            hours_used: req.hours_used,
            content: req.content,
            teacher: req.teacher,
        }
    }
}

//=========================================================================================
// Responses TO the Client
//=========================================================================================

#[derive(Serialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationResponse {
    pub name: String,
    pub student_count: usize,
}

impl From<OrganizationOverview> for OrganizationResponse {
    fn from(overview: OrganizationOverview) -> Self {
        Self {
            name: overview.organization.name().to_string(),
            student_count: overview.student_count,
        }
    }
}

#[derive(Serialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StudentResponse {
    pub id: Uuid,
    pub name: String,
    pub grade: String,
    pub contact: String,
    pub course_type: String,
    pub total_hours: f64,
    pub used_hours: f64,
    pub remaining_hours: f64,
    pub progress_percent: f64,
    /// `normal` or `low`.
    pub balance_status: String,
    pub session_count: usize,
}

impl From<StudentView> for StudentResponse {
    fn from(view: StudentView) -> Self {
        let student = view.student;
        Self {
            id: student.id,
            name: student.name,
            grade: student.grade,
            contact: student.contact,
            course_type: student.course_type.as_str().to_string(),
            total_hours: student.total_hours,
            used_hours: student.used_hours,
            remaining_hours: student.remaining_hours,
            progress_percent: view.progress_percent,
            balance_status: view.balance_status.as_str().to_string(),
            session_count: view.session_count,
        }
    }
}

#[derive(Serialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub id: Uuid,
    pub student_id: Uuid,
    pub date: NaiveDate,
    pub hours_used: f64,
    pub content: String,
    pub teacher: String,
}

impl From<Session> for SessionResponse {
    fn from(session: Session) -> Self {
        Self {
            id: session.id,
            student_id: session.student_id,
            date: session.date,
            hours_used: session.hours_used,
            content: session.content,
            teacher: session.teacher,
        }
    }
}

#[derive(Serialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntryResponse {
    /// 1 for the oldest session.
    pub ordinal: usize,
    pub session: SessionResponse,
}

impl From<HistoryEntry> for HistoryEntryResponse {
    fn from(entry: HistoryEntry) -> Self {
        Self {
            ordinal: entry.ordinal,
            session: entry.session.into(),
        }
    }
}

#[derive(Serialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StudentHistoryResponse {
    pub student: StudentResponse,
    /// Newest first.
    pub sessions: Vec<HistoryEntryResponse>,
}

impl From<StudentHistory> for StudentHistoryResponse {
    fn from(history: StudentHistory) -> Self {
        Self {
            student: history.student.into(),
            sessions: history.entries.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Serialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SummaryResponse {
    pub student_count: usize,
    pub total_hours: f64,
    pub used_hours: f64,
    pub remaining_hours: f64,
    pub session_count: usize,
    pub normal_count: usize,
    pub low_count: usize,
}

impl From<OrganizationSummary> for SummaryResponse {
    fn from(summary: OrganizationSummary) -> Self {
        Self {
            student_count: summary.student_count,
            total_hours: summary.total_hours,
            used_hours: summary.used_hours,
            remaining_hours: summary.remaining_hours,
            session_count: summary.session_count,
            normal_count: summary.normal_count,
            low_count: summary.low_count,
        }
    }
}

/// Body of every non-2xx response. `errors` maps field names to messages when
/// a request was rejected (a body that is not JSON at all is reported under
/// `body`) and is omitted otherwise.
#[derive(Serialize, Debug, ToSchema)]
pub struct ErrorResponse {
    pub message: String,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub errors: BTreeMap<String, String>,
}

impl ErrorResponse {
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            errors: BTreeMap::new(),
        }
    }
}
