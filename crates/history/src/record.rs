use std::collections::HashMap;

use dealherald_core::constants::MS_PER_DAY;
use serde::{Deserialize, Serialize};

/// The persisted history document.
///
/// Wire layout (camelCase names) is the external interface of this crate:
/// `{ "postedDeals": { "<key>": <epoch-ms>, ... }, "lastRotation": <epoch-ms> }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryRecord {
    /// Identity key of every deal previously confirmed posted, mapped to
    /// the time it was last posted.
    pub posted_deals: HashMap<String, i64>,
    /// When the last rotation sweep ran. Monotonically non-decreasing:
    /// rotation only ever moves it forward to "now".
    pub last_rotation: i64,
}

/// Summary of the history contents, for logging and the `stats` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HistoryStats {
    /// Number of tracked deal keys.
    pub tracked: usize,
    /// Timestamp of the oldest tracked entry, if any.
    pub oldest: Option<i64>,
}

impl HistoryRecord {
    /// Fresh record with no tracked deals.
    #[must_use]
    pub fn empty(now_ms: i64) -> Self {
        Self { posted_deals: HashMap::new(), last_rotation: now_ms }
    }

    /// Whether a rotation sweep is due: at least `max_age_days` of
    /// wall-clock time (fractional days allowed) since the last one.
    #[must_use]
    pub fn should_rotate(&self, max_age_days: f64, now_ms: i64) -> bool {
        #[allow(clippy::cast_precision_loss, reason = "epoch-ms deltas fit f64 exactly for centuries")]
        let elapsed_days = (now_ms - self.last_rotation) as f64 / MS_PER_DAY;
        elapsed_days >= max_age_days
    }

    /// Rotation sweep: drops every entry whose timestamp is at or before
    /// `now - max_age_days` and stamps the sweep time. Only entries
    /// strictly newer than the cutoff survive. This is the sole pruning
    /// mechanism; nothing expires entries outside a sweep.
    #[must_use]
    pub fn rotate(&self, max_age_days: f64, now_ms: i64) -> Self {
        #[allow(clippy::cast_possible_truncation, reason = "retention windows are far below i64::MAX ms")]
        let cutoff = now_ms - (max_age_days * MS_PER_DAY) as i64;

        let posted_deals: HashMap<String, i64> = self
            .posted_deals
            .iter()
            .filter(|&(_, &ts)| ts > cutoff)
            .map(|(k, &ts)| (k.clone(), ts))
            .collect();

        tracing::info!(
            removed = self.posted_deals.len() - posted_deals.len(),
            kept = posted_deals.len(),
            "rotated posted-deal history"
        );

        Self { posted_deals, last_rotation: now_ms }
    }

    /// Whether `key` is tracked as already posted.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.posted_deals.contains_key(key)
    }

    #[must_use]
    pub fn stats(&self) -> HistoryStats {
        HistoryStats {
            tracked: self.posted_deals.len(),
            oldest: self.posted_deals.values().min().copied(),
        }
    }
}
