//! Personal Library server
//!
//! A small REST JSON API over a single `library` collection of books, each
//! carrying a title and an append-only list of comments.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

use repository::BookStore;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}

impl AppState {
    /// Wire the services over an already connected store
    pub fn new(config: AppConfig, store: Arc<dyn BookStore>) -> Self {
        let services = services::Services::new(store, config.database.operation_timeout());
        Self {
            config: Arc::new(config),
            services: Arc::new(services),
        }
    }
}
