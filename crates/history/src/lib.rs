//! Posted-deal history with age-based rotation.
//!
//! The only stateful part of dealherald: a single JSON file mapping deal
//! identity keys to the timestamp they were last posted, plus the timestamp
//! of the last rotation sweep. Every operation performs a full
//! load-mutate-save cycle against that file; nothing is cached in memory
//! across calls, and there is no locking. Concurrent runs race with
//! last-writer-wins, which is acceptable for a once-per-schedule batch job.

mod clock;
mod dedup;
mod record;
mod store;

pub use clock::*;
pub use dedup::*;
pub use record::*;
pub use store::*;

#[cfg(test)]
mod tests;
