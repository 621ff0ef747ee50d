use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use validator::Validate;

use crate::error::{Error, Result};
use crate::models::candidate::{Candidate, NewCandidate};

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_LIMIT: i64 = 10;

/// Raw `POST /candidates` body.
///
/// Fields stay untyped JSON until the presence check has run, so that a
/// falsy value of any type is reported as missing rather than as a type error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCandidatePayload {
    pub first_name: Option<JsonValue>,
    pub last_name: Option<JsonValue>,
    pub email: Option<JsonValue>,
    pub phone: Option<JsonValue>,
    pub experience_years: Option<JsonValue>,
    pub notes: Option<JsonValue>,
    pub status: Option<JsonValue>,
    pub consent_date: Option<JsonValue>,
    pub offers: Option<JsonValue>,
}

impl CreateCandidatePayload {
    pub fn field(&self, name: &str) -> Option<&JsonValue> {
        match name {
            "firstName" => self.first_name.as_ref(),
            "lastName" => self.last_name.as_ref(),
            "email" => self.email.as_ref(),
            "phone" => self.phone.as_ref(),
            "experienceYears" => self.experience_years.as_ref(),
            "status" => self.status.as_ref(),
            "consentDate" => self.consent_date.as_ref(),
            "offers" => self.offers.as_ref(),
            _ => None,
        }
    }
}

/// The submitted offer ids. Only this field is typed ahead of the offer
/// checks; every other field is converted after them.
#[derive(Debug, Clone, PartialEq, Eq, Validate)]
pub struct OfferSelection {
    #[validate(length(min = 1))]
    pub offers: Vec<i64>,
}

/// Integer value of a JSON number, accepting integral floats such as `5.0`.
fn whole_number(value: &JsonValue) -> Option<i64> {
    value.as_i64().or_else(|| {
        value
            .as_f64()
            .filter(|f| f.fract() == 0.0 && *f >= i64::MIN as f64 && *f < i64::MAX as f64)
            .map(|f| f as i64)
    })
}

fn text(value: Option<JsonValue>, field: &'static str) -> Result<String> {
    match value {
        Some(JsonValue::String(s)) => Ok(s),
        _ => Err(Error::InvalidField(field)),
    }
}

impl CreateCandidatePayload {
    pub fn offer_selection(&self) -> Result<OfferSelection> {
        let offers = match &self.offers {
            Some(JsonValue::Array(items)) => items
                .iter()
                .map(|item| whole_number(item).ok_or(Error::InvalidField("offers")))
                .collect::<Result<Vec<_>>>()?,
            _ => return Err(Error::InvalidField("offers")),
        };
        Ok(OfferSelection { offers })
    }

    /// Types the remaining fields around an already checked offer list.
    pub fn into_new_candidate(self, offers: Vec<i64>) -> Result<NewCandidate> {
        let experience_years = self
            .experience_years
            .as_ref()
            .and_then(whole_number)
            .ok_or(Error::InvalidField("experienceYears"))?;

        let notes = match self.notes {
            None | Some(JsonValue::Null) => None,
            Some(JsonValue::String(s)) if s.is_empty() => None,
            Some(JsonValue::String(s)) => Some(s),
            Some(_) => return Err(Error::InvalidField("notes")),
        };

        Ok(NewCandidate {
            first_name: text(self.first_name, "firstName")?,
            last_name: text(self.last_name, "lastName")?,
            email: text(self.email, "email")?,
            phone: text(self.phone, "phone")?,
            experience_years,
            notes,
            status: text(self.status, "status")?,
            consent_date: text(self.consent_date, "consentDate")?,
            offers,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCandidateResponse {
    pub message: String,
    pub id: i64,
}

/// `GET /candidates` query. Values are kept as text so that anything
/// unparsable falls back to the defaults instead of rejecting the request.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CandidateListQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
}

/// Leading integer of `raw`, ignoring whatever follows it: `"2abc"` is 2,
/// `"1.5"` is 1, `"abc"` is nothing.
fn leading_integer(raw: &str) -> Option<i64> {
    let raw = raw.trim_start();
    let digits_from = usize::from(raw.starts_with(&['+', '-'][..]));
    let end = raw[digits_from..]
        .find(|c: char| !c.is_ascii_digit())
        .map_or(raw.len(), |i| i + digits_from);
    raw[..end].parse().ok()
}

fn positive_or(raw: Option<&str>, default: i64) -> i64 {
    raw.and_then(leading_integer)
        .filter(|v| *v > 0)
        .unwrap_or(default)
}

impl CandidateListQuery {
    pub fn page(&self) -> i64 {
        positive_or(self.page.as_deref(), DEFAULT_PAGE)
    }

    pub fn limit(&self) -> i64 {
        positive_or(self.limit.as_deref(), DEFAULT_LIMIT)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateResponse {
    pub id: i64,
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

impl From<Candidate> for CandidateResponse {
    fn from(value: Candidate) -> Self {
        Self {
            id: value.id,
            first_name: value.first_name,
            last_name: value.last_name,
            email: value.email,
            phone: value.phone,
            experience_years: value.experience_years,
            notes: value.notes,
            status: value.status,
            consent_date: value.consent_date,
            offers: value.offers.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateListResponse {
    pub total: i64,
    pub page: i64,
    pub limit: i64,
    pub data: Vec<CandidateResponse>,
}
