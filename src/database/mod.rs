pub mod candidate_store;
pub mod pool;
