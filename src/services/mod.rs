//! Business logic services

pub mod library;

use std::{sync::Arc, time::Duration};

use crate::repository::BookStore;

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub library: library::LibraryService,
}

impl Services {
    /// Create all services over the given store
    pub fn new(store: Arc<dyn BookStore>, operation_timeout: Duration) -> Self {
        Self {
            library: library::LibraryService::new(store, operation_timeout),
        }
    }
}
