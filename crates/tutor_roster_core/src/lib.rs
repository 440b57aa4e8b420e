pub mod domain;
pub mod ledger;
pub mod ports;
pub mod seed;
pub mod store;
pub mod validation;

pub use domain::{
    CourseType, HistoryEntry, Organization, OrganizationOverview, OrganizationSummary, Session,
    SessionInput, Student, StudentHistory, StudentInput, StudentView,
};
pub use ledger::{apply_session, classify, compute_progress, BalanceStatus, LOW_BALANCE_THRESHOLD};
pub use ports::{PortError, PortResult, RosterService};
pub use store::{OrganizationRoster, RosterStore};
pub use validation::ValidationErrors;
