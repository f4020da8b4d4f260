use dealherald_core::{Candidate, Result};

use crate::clock::{Clock, SystemClock};
use crate::record::{HistoryRecord, HistoryStats};
use crate::store::HistoryStore;

/// Partitions candidate deals into new vs already-posted, consulting and
/// mutating the [`HistoryStore`].
///
/// The intended call sequence is `filter_new` → post → `mark_posted`.
/// The two steps are not atomic across a crash: a deal posted right
/// before the process dies is posted again on the next run. Accepted
/// failure mode for a batch job; the alternative (mark before post) would
/// silently drop deals on delivery failure.
#[derive(Debug)]
pub struct Deduplicator<C: Clock = SystemClock> {
    store: HistoryStore,
    max_age_days: f64,
    clock: C,
}

impl Deduplicator<SystemClock> {
    #[must_use]
    pub fn new(store: HistoryStore, max_age_days: f64) -> Self {
        Self::with_clock(store, max_age_days, SystemClock)
    }
}

impl<C: Clock> Deduplicator<C> {
    #[must_use]
    pub fn with_clock(store: HistoryStore, max_age_days: f64, clock: C) -> Self {
        Self { store, max_age_days, clock }
    }

    /// Loads the record fresh and applies a rotation sweep if one is due.
    /// Returns the record plus whether it was rotated.
    fn load_rotated(&self, now_ms: i64) -> (HistoryRecord, bool) {
        let record = self.store.load(now_ms).into_record();
        if record.should_rotate(self.max_age_days, now_ms) {
            (record.rotate(self.max_age_days, now_ms), true)
        } else {
            (record, false)
        }
    }

    /// Returns the candidates not yet tracked as posted, in input order.
    ///
    /// If a rotation sweep fires it is persisted immediately, before any
    /// deal is marked: the sweep must survive even if the process dies
    /// between posting and marking.
    ///
    /// # Errors
    /// Returns [`dealherald_core::HeraldError::InvalidDeal`] when a
    /// candidate lacks an identity key.
    pub fn filter_new(&self, candidates: &[Candidate]) -> Result<Vec<Candidate>> {
        let now_ms = self.clock.now_ms();
        let (record, rotated) = self.load_rotated(now_ms);
        if rotated {
            self.store.save(&record);
        }

        let mut fresh = Vec::with_capacity(candidates.len());
        for candidate in candidates {
            let key = candidate.identity_key()?;
            if !record.contains(&key) {
                fresh.push(candidate.clone());
            }
        }

        tracing::info!(
            candidates = candidates.len(),
            fresh = fresh.len(),
            tracked = record.posted_deals.len(),
            "filtered candidate deals against history"
        );
        Ok(fresh)
    }

    /// Records every candidate as posted at the current time and persists
    /// once. Re-marking an already-tracked key refreshes its timestamp.
    ///
    /// # Errors
    /// Returns [`dealherald_core::HeraldError::InvalidDeal`] when a
    /// candidate lacks an identity key; in that case nothing is recorded.
    pub fn mark_posted(&self, candidates: &[Candidate]) -> Result<()> {
        // Derive all keys up front so a malformed candidate cannot leave
        // a partially-updated history behind.
        let keys: Vec<String> =
            candidates.iter().map(Candidate::identity_key).collect::<Result<_>>()?;

        let now_ms = self.clock.now_ms();
        let (mut record, _) = self.load_rotated(now_ms);
        for key in keys {
            record.posted_deals.insert(key, now_ms);
        }
        self.store.save(&record);
        Ok(())
    }

    /// Whether this single deal is already tracked as posted.
    ///
    /// # Errors
    /// Returns [`dealherald_core::HeraldError::InvalidDeal`] when the
    /// candidate lacks an identity key.
    pub fn is_posted(&self, candidate: &Candidate) -> Result<bool> {
        Ok(self.filter_new(std::slice::from_ref(candidate))?.is_empty())
    }

    /// Summary of the current history contents.
    #[must_use]
    pub fn stats(&self) -> HistoryStats {
        self.store.load(self.clock.now_ms()).into_record().stats()
    }

    /// Resets the history to an empty record.
    pub fn clear(&self) {
        self.store.save(&HistoryRecord::empty(self.clock.now_ms()));
        tracing::info!("deal history cleared");
    }

    #[must_use]
    pub fn store(&self) -> &HistoryStore {
        &self.store
    }
}
