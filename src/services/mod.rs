pub mod candidate_service;
pub mod legacy_service;
