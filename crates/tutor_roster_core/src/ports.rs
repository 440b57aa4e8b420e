//! crates/tutor_roster_core/src/ports.rs
//!
//! Defines the service contract the outer layers program against.
//! Implementations decide how rosters are held and how writes are serialized.

use crate::domain::{
    Organization, OrganizationOverview, OrganizationSummary, Session, SessionInput, StudentHistory,
    StudentInput, StudentView,
};
use crate::validation::ValidationErrors;
use async_trait::async_trait;
use uuid::Uuid;

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

#[derive(Debug, thiserror::Error)]
pub enum PortError {
    #[error("Item not found: {0}")]
    NotFound(String),
    /// The command was rejected before anything changed.
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

#[async_trait]
pub trait RosterService: Send + Sync {
    // --- Queries ---
    async fn list_organizations(&self) -> PortResult<Vec<OrganizationOverview>>;

    async fn list_students(&self, organization: Organization) -> PortResult<Vec<StudentView>>;

    async fn get_student(&self, organization: Organization, student_id: Uuid) -> PortResult<StudentView>;

    async fn list_sessions(&self, organization: Organization, student_id: Uuid) -> PortResult<Vec<Session>>;

    async fn student_history(
        &self,
        organization: Organization,
        student_id: Uuid,
    ) -> PortResult<StudentHistory>;

    async fn summary(&self, organization: Organization) -> PortResult<OrganizationSummary>;

    // --- Commands ---
    async fn add_student(&self, organization: Organization, input: StudentInput) -> PortResult<StudentView>;

    /// Fails with `NotFound` when the student is not in this organization.
    async fn edit_student(
        &self,
        organization: Organization,
        student_id: Uuid,
        input: StudentInput,
    ) -> PortResult<StudentView>;

    /// Removes the student and its sessions.
    async fn delete_student(&self, organization: Organization, student_id: Uuid) -> PortResult<()>;

    async fn record_session(&self, organization: Organization, input: SessionInput) -> PortResult<Session>;
}
