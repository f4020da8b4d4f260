//! Deal source adapters.
//!
//! Thin async wrappers over the two upstream aggregator APIs. They fetch,
//! apply the configured quality thresholds, and hand candidate deals to
//! the caller; deduplication happens elsewhere. No retries here: a failed
//! fetch fails the batch run.

mod cheapshark;
mod error;
mod itad;

pub use cheapshark::*;
pub use error::*;
pub use itad::*;
