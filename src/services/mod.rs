//! Client-side services: directory, session and specification views

pub mod directory;
pub mod filter;
pub mod session;
pub mod specifications;

use std::sync::Arc;

use crate::repository::Backend;

/// Container for all services
pub struct Services {
    pub directory: directory::Directory,
    pub session: session::Session,
    pub specifications: specifications::SpecificationViewer,
}

impl Services {
    /// Create all services sharing one backend
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self {
            directory: directory::Directory::new(backend.clone()),
            session: session::Session::new(backend.clone()),
            specifications: specifications::SpecificationViewer::new(backend),
        }
    }

    /// Run a status change as the currently logged-in user
    pub async fn change_status(
        &mut self,
        equipment_id: i64,
        target: &str,
    ) -> crate::error::AppResult<directory::StatusChange> {
        self.directory
            .request_status_change(self.session.current_user(), equipment_id, target)
            .await
    }
}
