//! services/api/src/web/state.rs
//!
//! Defines the application's shared state.

use crate::config::Config;
use std::sync::Arc;
use tutor_roster_core::ports::RosterService;

/// The shared application state, created once at startup and passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    pub roster: Arc<dyn RosterService>,
    pub config: Arc<Config>,
}
