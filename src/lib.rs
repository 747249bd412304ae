//! Tech Lab equipment monitor
//!
//! Client for the lab equipment API: lists instruments, filters them,
//! shows their technical specifications and lets a logged-in user request
//! a loan on an item.

use std::sync::Arc;

pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use crate::config::AppConfig;
pub use crate::error::{AppError, AppResult};

use crate::repository::{Backend, Repository};
use crate::services::Services;

/// Application state owned by the front-end for the whole session
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Services,
}

impl AppState {
    /// Build the state around the HTTP repository
    pub fn new(config: AppConfig) -> AppResult<Self> {
        let repository = Repository::new(&config.api)?;
        Ok(Self::with_backend(config, Arc::new(repository)))
    }

    pub fn with_backend(config: AppConfig, backend: Arc<dyn Backend>) -> Self {
        Self {
            config: Arc::new(config),
            services: Services::new(backend),
        }
    }
}
