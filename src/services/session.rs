//! Login session
//!
//! Holds the authenticated user in memory. Nothing is persisted: a new
//! process starts logged out.

use std::sync::Arc;

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{user::MISSING_CREDENTIALS, LoginCredentials, User},
    repository::Backend,
};

pub struct Session {
    backend: Arc<dyn Backend>,
    user: Option<User>,
    error: Option<String>,
}

impl Session {
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self {
            backend,
            user: None,
            error: None,
        }
    }

    pub fn current_user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// Message from the last failed login attempt
    pub fn error_message(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Authenticate against the user endpoint.
    ///
    /// Empty fields are rejected before any request is made. On failure the
    /// previous user, if any, is kept.
    pub async fn login(&mut self, credentials: &LoginCredentials) -> AppResult<User> {
        if credentials.validate().is_err() {
            self.error = Some(MISSING_CREDENTIALS.to_string());
            return Err(AppError::Validation(MISSING_CREDENTIALS.to_string()));
        }

        self.error = None;
        match self.backend.authenticate(credentials).await {
            Ok(user) => {
                tracing::info!("User {} logged in", user.id);
                self.user = Some(user.clone());
                Ok(user)
            }
            Err(e) => {
                tracing::warn!("Login failed for {}: {}", credentials.email, e);
                self.error = Some(e.user_message());
                Err(e)
            }
        }
    }

    /// All registered users
    pub async fn users(&self) -> AppResult<Vec<User>> {
        self.backend.list_users().await
    }

    pub fn logout(&mut self) {
        if let Some(user) = self.user.take() {
            tracing::info!("User {} logged out", user.id);
        }
        self.error = None;
    }
}
