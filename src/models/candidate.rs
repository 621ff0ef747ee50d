use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Candidate {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub experience_years: i64,
    pub notes: Option<String>,
    pub status: String,
    pub consent_date: String,
    pub offers: Json<Vec<i64>>,
}

/// A submission that passed the presence and type checks, ready to insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCandidate {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub experience_years: i64,
    pub notes: Option<String>,
    pub status: String,
    pub consent_date: String,
    pub offers: Vec<i64>,
}
