use std::sync::Arc;

use validator::Validate;

use crate::database::candidate_store::CandidateStore;
use crate::dto::candidate_dto::{CandidateListResponse, CreateCandidatePayload};
use crate::error::{Error, Result};
use crate::services::legacy_service::{CandidateNotifier, LegacyCandidatePayload};
use crate::utils::validation::first_missing;

/// Checked in this order; the first one missing is the one reported.
pub const REQUIRED_FIELDS: [&str; 8] = [
    "firstName",
    "lastName",
    "email",
    "phone",
    "experienceYears",
    "status",
    "consentDate",
    "offers",
];

#[derive(Clone)]
pub struct CandidateService {
    store: CandidateStore,
    notifier: Arc<dyn CandidateNotifier>,
}

impl CandidateService {
    pub fn new(store: CandidateStore, notifier: Arc<dyn CandidateNotifier>) -> Self {
        Self { store, notifier }
    }

    pub fn store(&self) -> &CandidateStore {
        &self.store
    }

    /// Validates and stores a submission, then hands the reduced record to the
    /// notifier. Returns the new candidate id.
    ///
    /// The offer lookup and the insert are not one transaction: offers are
    /// checked at a point in time, and email uniqueness rests entirely on the
    /// store's constraint.
    pub async fn create(&self, payload: CreateCandidatePayload) -> Result<i64> {
        if let Some(field) = first_missing(&REQUIRED_FIELDS, |name| payload.field(name)) {
            tracing::debug!(field, "Rejecting candidate with missing field");
            return Err(Error::MissingField(field));
        }

        let selection = payload.offer_selection()?;
        selection.validate().map_err(|_| Error::NoOffers)?;

        // Duplicate ids in the submission are counted as submitted, so
        // [1, 1] fails here even though offer 1 exists.
        let existing = self.store.find_offer_ids(&selection.offers).await?;
        if existing.len() < selection.offers.len() {
            tracing::warn!(
                requested = ?selection.offers,
                found = existing.len(),
                "Rejecting candidate referencing unknown job offers"
            );
            return Err(Error::UnknownOffer);
        }

        let candidate = payload.into_new_candidate(selection.offers)?;

        let id = match self.store.insert_candidate(&candidate).await {
            Ok(id) => id,
            Err(Error::DuplicateEmail) => {
                tracing::warn!(email = %candidate.email, "Candidate email already registered");
                return Err(Error::DuplicateEmail);
            }
            Err(e) => return Err(e),
        };

        tracing::info!(candidate_id = id, "Candidate added");
        self.notifier.dispatch(LegacyCandidatePayload::from(&candidate));

        Ok(id)
    }

    pub async fn list(&self, page: i64, limit: i64) -> Result<CandidateListResponse> {
        let offset = page.saturating_sub(1).saturating_mul(limit);
        let items = self.store.list_candidates(limit, offset).await?;
        let total = self.store.count_candidates().await?;

        Ok(CandidateListResponse {
            total,
            page,
            limit,
            data: items.into_iter().map(Into::into).collect(),
        })
    }
}
