#![forbid(unsafe_code)]

use super::Tracker;
use crate::error::EngineError;
use crate::views::DealProgress;
use dd_core::ids::DealId;

impl Tracker {
    pub fn deal_progress(&self, deal_id: &DealId) -> Result<DealProgress, EngineError> {
        let counts = self.store.deal_counts(deal_id.as_str())?;
        Ok(DealProgress::from_counts(counts))
    }

    /// Roll-up for every deal that has requests, one pass. Agrees with
    /// `deal_progress` called per deal.
    pub fn all_deals_progress(&self) -> Result<Vec<DealProgress>, EngineError> {
        Ok(self
            .store
            .all_deal_counts()?
            .into_iter()
            .map(DealProgress::from_counts)
            .collect())
    }
}
