use anyhow::Result;
use dealherald_history::{Deduplicator, HistoryStore};

use crate::config::HistoryConfig;

fn open_dedup() -> Deduplicator {
    let config = HistoryConfig::from_env();
    Deduplicator::new(HistoryStore::new(config.file), config.max_age_days)
}

pub(crate) fn stats() -> Result<()> {
    let stats = open_dedup().stats();
    println!("{}", serde_json::to_string_pretty(&stats)?);
    Ok(())
}

pub(crate) fn clear() -> Result<()> {
    open_dedup().clear();
    Ok(())
}
