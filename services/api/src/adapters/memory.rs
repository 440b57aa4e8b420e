//! services/api/src/adapters/memory.rs
//!
//! The in-memory implementation of the `RosterService` port. Each organization's
//! roster sits behind its own mutex, so at most one command runs against an
//! organization at a time while different organizations proceed independently.

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::{info, warn};
use tutor_roster_core::domain::{
    Organization, OrganizationOverview, OrganizationSummary, Session, SessionInput, StudentHistory,
    StudentInput, StudentView,
};
use tutor_roster_core::ports::{PortError, PortResult, RosterService};
use tutor_roster_core::store::{OrganizationRoster, RosterStore};
use uuid::Uuid;

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// Holds every organization's roster for the lifetime of the process.
pub struct InMemoryRosterAdapter {
    rosters: [Mutex<OrganizationRoster>; 5],
}

impl InMemoryRosterAdapter {
    /// Creates a new `InMemoryRosterAdapter` taking ownership of the store's rosters.
    pub fn new(store: RosterStore) -> Self {
        Self {
            rosters: store.into_rosters().map(Mutex::new),
        }
    }

    fn roster(&self, organization: Organization) -> &Mutex<OrganizationRoster> {
        &self.rosters[organization.index()]
    }
}

fn student_not_found(organization: Organization, student_id: Uuid) -> PortError {
    PortError::NotFound(format!("student {} in {}", student_id, organization))
}

//=========================================================================================
// RosterService Implementation
//=========================================================================================

#[async_trait]
impl RosterService for InMemoryRosterAdapter {
    async fn list_organizations(&self) -> PortResult<Vec<OrganizationOverview>> {
        let mut overview = Vec::with_capacity(Organization::ALL.len());
        for organization in Organization::ALL {
            let roster = self.roster(organization).lock().await;
            overview.push(OrganizationOverview {
                organization,
                student_count: roster.students().len(),
            });
        }
        Ok(overview)
    }

    async fn list_students(&self, organization: Organization) -> PortResult<Vec<StudentView>> {
        let roster = self.roster(organization).lock().await;
        Ok(roster.student_views())
    }

    async fn get_student(&self, organization: Organization, student_id: Uuid) -> PortResult<StudentView> {
        let roster = self.roster(organization).lock().await;
        roster
            .student_view(student_id)
            .ok_or_else(|| student_not_found(organization, student_id))
    }

    async fn list_sessions(&self, organization: Organization, student_id: Uuid) -> PortResult<Vec<Session>> {
        let roster = self.roster(organization).lock().await;
        if roster.get_student(student_id).is_none() {
            return Err(student_not_found(organization, student_id));
        }
        Ok(roster.list_sessions(student_id))
    }

    async fn student_history(
        &self,
        organization: Organization,
        student_id: Uuid,
    ) -> PortResult<StudentHistory> {
        let roster = self.roster(organization).lock().await;
        roster
            .student_history(student_id)
            .ok_or_else(|| student_not_found(organization, student_id))
    }

    async fn summary(&self, organization: Organization) -> PortResult<OrganizationSummary> {
        let roster = self.roster(organization).lock().await;
        Ok(roster.summary())
    }

    async fn add_student(&self, organization: Organization, input: StudentInput) -> PortResult<StudentView> {
        let mut roster = self.roster(organization).lock().await;
        let student = roster.add_student(&input)?;
        info!(%organization, student_id = %student.id, "Student added");
        Ok(roster.view(&student))
    }

    async fn edit_student(
        &self,
        organization: Organization,
        student_id: Uuid,
        input: StudentInput,
    ) -> PortResult<StudentView> {
        let mut roster = self.roster(organization).lock().await;
        match roster.edit_student(student_id, &input)? {
            Some(student) => {
                info!(%organization, %student_id, "Student updated");
                Ok(roster.view(&student))
            }
            None => {
                warn!(%organization, %student_id, "Edit for unknown student ignored");
                Err(student_not_found(organization, student_id))
            }
        }
    }

    async fn delete_student(&self, organization: Organization, student_id: Uuid) -> PortResult<()> {
        let mut roster = self.roster(organization).lock().await;
        match roster.delete_student(student_id) {
            Some(_) => {
                info!(%organization, %student_id, "Student and sessions deleted");
                Ok(())
            }
            None => Err(student_not_found(organization, student_id)),
        }
    }

    async fn record_session(&self, organization: Organization, input: SessionInput) -> PortResult<Session> {
        let mut roster = self.roster(organization).lock().await;
        let session = roster.record_session(&input)?;
        info!(
            %organization,
            student_id = %session.student_id,
            hours_used = session.hours_used,
            "Session recorded"
        );
        Ok(session)
    }
}
