//! crates/tutor_roster_core/src/store.rs
//!
//! The roster store. Every mutation of a student's hours goes through here so
//! that `used_hours` always equals the sum of that student's sessions (on top
//! of whatever usage a record was seeded with) and
//! `remaining_hours == total_hours - used_hours`.

use crate::domain::{
    HistoryEntry, Organization, OrganizationOverview, OrganizationSummary, Session, SessionInput,
    Student, StudentHistory, StudentInput, StudentView,
};
use crate::ledger::{self, BalanceStatus};
use crate::validation::{self, ValidationErrors};
use uuid::Uuid;

//=========================================================================================
// OrganizationRoster (one context)
//=========================================================================================

/// The students and session log of a single organization.
#[derive(Debug, Clone, Default)]
pub struct OrganizationRoster {
    students: Vec<Student>,
    sessions: Vec<Session>,
}

impl OrganizationRoster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a roster from existing records, taken as they are.
    pub fn from_records(students: Vec<Student>, sessions: Vec<Session>) -> Self {
        Self { students, sessions }
    }

    pub fn students(&self) -> &[Student] {
        &self.students
    }

    pub fn sessions(&self) -> &[Session] {
        &self.sessions
    }

    pub fn get_student(&self, student_id: Uuid) -> Option<&Student> {
        self.students.iter().find(|s| s.id == student_id)
    }

    /// Adds a new student with no hours used yet.
    pub fn add_student(&mut self, input: &StudentInput) -> Result<Student, ValidationErrors> {
        let fields = validation::validate_student(input, 0.0)?;
        let student = Student {
            id: Uuid::new_v4(),
            name: fields.name,
            grade: fields.grade,
            contact: fields.contact,
            course_type: fields.course_type,
            total_hours: fields.total_hours,
            used_hours: 0.0,
            remaining_hours: fields.total_hours,
        };
        self.students.push(student.clone());
        Ok(student)
    }

    /// Replaces a student's details, keeping its used hours.
    ///
    /// Returns `Ok(None)` without touching anything when the student is unknown.
    pub fn edit_student(
        &mut self,
        student_id: Uuid,
        input: &StudentInput,
    ) -> Result<Option<Student>, ValidationErrors> {
        let Some(existing) = self.students.iter_mut().find(|s| s.id == student_id) else {
            return Ok(None);
        };
        let fields = validation::validate_student(input, existing.used_hours)?;

        existing.name = fields.name;
        existing.grade = fields.grade;
        existing.contact = fields.contact;
        existing.course_type = fields.course_type;
        existing.total_hours = fields.total_hours;
        existing.remaining_hours = fields.total_hours - existing.used_hours;
        Ok(Some(existing.clone()))
    }

    /// Removes a student and every session recorded against it.
    pub fn delete_student(&mut self, student_id: Uuid) -> Option<Student> {
        let position = self.students.iter().position(|s| s.id == student_id)?;
        let removed = self.students.remove(position);
        self.sessions.retain(|session| session.student_id != student_id);
        Some(removed)
    }

    /// Appends a session and charges its hours to the student.
    pub fn record_session(&mut self, input: &SessionInput) -> Result<Session, ValidationErrors> {
        let target = self
            .students
            .iter()
            .position(|s| s.id == input.student_id)
            .map(|index| (index, self.students[index].remaining_hours));
        let (index, fields) = validation::validate_session(input, target)?;

        let session = Session {
            id: Uuid::new_v4(),
            student_id: input.student_id,
            date: fields.date,
            hours_used: fields.hours_used,
            content: fields.content,
            teacher: fields.teacher,
        };
        self.students[index] = ledger::apply_session(&self.students[index], session.hours_used);
        self.sessions.push(session.clone());
        Ok(session)
    }

    /// A student's sessions in insertion order.
    pub fn list_sessions(&self, student_id: Uuid) -> Vec<Session> {
        self.sessions
            .iter()
            .filter(|session| session.student_id == student_id)
            .cloned()
            .collect()
    }

    fn session_count(&self, student_id: Uuid) -> usize {
        self.sessions
            .iter()
            .filter(|session| session.student_id == student_id)
            .count()
    }

    /// The student's derived view, including how many sessions it has.
    pub fn view(&self, student: &Student) -> StudentView {
        ledger::student_view(student, self.session_count(student.id))
    }

    pub fn student_view(&self, student_id: Uuid) -> Option<StudentView> {
        self.get_student(student_id).map(|student| self.view(student))
    }

    pub fn student_views(&self) -> Vec<StudentView> {
        self.students.iter().map(|student| self.view(student)).collect()
    }

    /// A student's sessions sorted newest first. Same-day sessions stay in
    /// the order they were recorded.
    pub fn student_history(&self, student_id: Uuid) -> Option<StudentHistory> {
        let student = self.get_student(student_id)?;

        let mut sessions: Vec<&Session> = self
            .sessions
            .iter()
            .filter(|session| session.student_id == student_id)
            .collect();
        // Stable sort.
        sessions.sort_by(|a, b| b.date.cmp(&a.date));

        let count = sessions.len();
        let entries = sessions
            .into_iter()
            .enumerate()
            .map(|(position, session)| HistoryEntry {
                ordinal: count - position,
                session: session.clone(),
            })
            .collect();

        Some(StudentHistory {
            student: self.view(student),
            entries,
        })
    }

    pub fn summary(&self) -> OrganizationSummary {
        let mut summary = OrganizationSummary {
            student_count: self.students.len(),
            session_count: self.sessions.len(),
            ..OrganizationSummary::default()
        };
        for student in &self.students {
            summary.total_hours += student.total_hours;
            summary.used_hours += student.used_hours;
            summary.remaining_hours += student.remaining_hours;
            match ledger::classify(student.remaining_hours) {
                BalanceStatus::Normal => summary.normal_count += 1,
                BalanceStatus::Low => summary.low_count += 1,
            }
        }
        summary
    }
}

//=========================================================================================
// RosterStore (all contexts)
//=========================================================================================

/// Owns one roster per organization. Organizations never share records.
#[derive(Debug, Clone, Default)]
pub struct RosterStore {
    rosters: [OrganizationRoster; 5],
}

impl RosterStore {
    /// A store with every organization empty.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn organizations(&self) -> &'static [Organization] {
        &Organization::ALL
    }

    pub fn overview(&self) -> Vec<OrganizationOverview> {
        Organization::ALL
            .iter()
            .map(|&organization| OrganizationOverview {
                organization,
                student_count: self.roster(organization).students().len(),
            })
            .collect()
    }

    pub fn roster(&self, organization: Organization) -> &OrganizationRoster {
        &self.rosters[organization.index()]
    }

    pub fn roster_mut(&mut self, organization: Organization) -> &mut OrganizationRoster {
        &mut self.rosters[organization.index()]
    }

    /// Replaces an organization's roster wholesale.
    pub fn set_roster(&mut self, organization: Organization, roster: OrganizationRoster) {
        self.rosters[organization.index()] = roster;
    }

    pub fn list_students(&self, organization: Organization) -> &[Student] {
        self.roster(organization).students()
    }

    pub fn list_sessions(&self, organization: Organization, student_id: Uuid) -> Vec<Session> {
        self.roster(organization).list_sessions(student_id)
    }

    pub fn add_student(
        &mut self,
        organization: Organization,
        input: &StudentInput,
    ) -> Result<Student, ValidationErrors> {
        self.roster_mut(organization).add_student(input)
    }

    pub fn edit_student(
        &mut self,
        organization: Organization,
        student_id: Uuid,
        input: &StudentInput,
    ) -> Result<Option<Student>, ValidationErrors> {
        self.roster_mut(organization).edit_student(student_id, input)
    }

    pub fn delete_student(&mut self, organization: Organization, student_id: Uuid) -> Option<Student> {
        self.roster_mut(organization).delete_student(student_id)
    }

    pub fn record_session(
        &mut self,
        organization: Organization,
        input: &SessionInput,
    ) -> Result<Session, ValidationErrors> {
        self.roster_mut(organization).record_session(input)
    }

    /// Splits the store into its per-organization rosters, indexed by
    /// [`Organization::index`].
    pub fn into_rosters(self) -> [OrganizationRoster; 5] {
        self.rosters
    }
}
