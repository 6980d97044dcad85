use std::sync::Arc;

use crate::roster::Roster;

#[derive(Clone)]
pub struct AppState {
    pub roster: Arc<tokio::sync::RwLock<Roster>>,
}

impl AppState {
    pub fn new(roster: Roster) -> Self {
        Self {
            roster: Arc::new(tokio::sync::RwLock::new(roster)),
        }
    }
}
