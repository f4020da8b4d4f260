//! Shared constants for dealherald.
//!
//! Centralizes defaults that would otherwise be duplicated across crates.

/// Milliseconds in one day, for retention-window arithmetic.
pub const MS_PER_DAY: f64 = 86_400_000.0;

/// Default retention window for the posted-deal history, in days.
pub const DEFAULT_MAX_AGE_DAYS: f64 = 7.0;

/// Default path of the posted-deal history file.
pub const DEFAULT_HISTORY_FILE: &str = "deal-history.json";

/// Default number of deals posted per run when no store split is configured.
pub const DEFAULT_DEAL_LIMIT: usize = 20;

/// Default number of deals fetched per store in multi-store mode.
pub const DEFAULT_DEALS_PER_STORE: usize = 3;

/// Page size requested from the upstream deals endpoints.
pub const DEFAULT_PAGE_SIZE: usize = 60;

/// Timeout for all outbound HTTP requests, in seconds.
pub const HTTP_TIMEOUT_SECS: u64 = 30;

/// Politeness pause between sequential upstream fetches and between
/// posted messages, in milliseconds.
pub const REQUEST_PAUSE_MS: u64 = 1000;

/// Discord rejects message bodies longer than this.
pub const DISCORD_MESSAGE_LIMIT: usize = 2000;

/// Deals expiring within this window are skipped: by the time readers
/// see the post the price is usually gone.
pub const EXPIRY_WINDOW_HOURS: i64 = 48;
