pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;

use std::sync::Arc;

use crate::database::candidate_store::CandidateStore;
use crate::services::{candidate_service::CandidateService, legacy_service::CandidateNotifier};

#[derive(Clone)]
pub struct AppState {
    pub candidate_service: CandidateService,
}

impl AppState {
    pub fn new(store: CandidateStore, notifier: Arc<dyn CandidateNotifier>) -> Self {
        Self {
            candidate_service: CandidateService::new(store, notifier),
        }
    }
}
