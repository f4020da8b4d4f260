//! Environment-driven configuration for the batch job.

use std::path::PathBuf;

use anyhow::{Context, Result};
use dealherald_core::constants::{
    DEFAULT_DEAL_LIMIT, DEFAULT_DEALS_PER_STORE, DEFAULT_HISTORY_FILE, DEFAULT_MAX_AGE_DAYS,
    DEFAULT_PAGE_SIZE,
};
use dealherald_core::{env_id_list, env_parse_optional, env_parse_with_default};
use dealherald_source::{DealThresholds, DealsQuery, ItadQuery, store_id_from_name};

pub(crate) struct HistoryConfig {
    pub file: PathBuf,
    pub max_age_days: f64,
}

impl HistoryConfig {
    pub fn from_env() -> Self {
        let file = std::env::var("HISTORY_FILE")
            .unwrap_or_else(|_| DEFAULT_HISTORY_FILE.to_owned());
        Self {
            file: PathBuf::from(file),
            max_age_days: env_parse_with_default("MAX_AGE_DAYS", DEFAULT_MAX_AGE_DAYS),
        }
    }
}

pub(crate) struct DiscordConfig {
    pub token: String,
    pub channel_id: String,
    pub use_embeds: bool,
}

impl DiscordConfig {
    pub fn from_env() -> Result<Self> {
        let token = std::env::var("DISCORD_TOKEN")
            .context("DISCORD_TOKEN environment variable must be set")?;
        let channel_id = std::env::var("DISCORD_CHANNEL_ID")
            .context("DISCORD_CHANNEL_ID environment variable must be set")?;
        Ok(Self { token, channel_id, use_embeds: env_parse_with_default("USE_EMBEDS", false) })
    }
}

/// Which upstream feeds the run, with its full query configuration.
///
/// Setting `ITAD_API_KEY` selects the ITAD source; otherwise the keyless
/// CheapShark API is used.
pub(crate) enum SourceConfig {
    CheapShark {
        query: DealsQuery,
        store_ids: Vec<i64>,
        deals_per_store: usize,
        deal_limit: usize,
    },
    Itad {
        api_key: String,
        query: ItadQuery,
        thresholds: DealThresholds,
        deal_limit: usize,
    },
}

/// Parses the store list, accepting numeric CheapShark IDs or store
/// names ("steam", "gog", ...). Unknown entries are skipped.
fn store_ids_from_env(var: &str) -> Vec<i64> {
    let Ok(raw) = std::env::var(var) else {
        return Vec::new();
    };
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .filter_map(|s| {
            s.parse().ok().or_else(|| store_id_from_name(s)).or_else(|| {
                tracing::warn!(var, entry = s, "unknown store, skipping");
                None
            })
        })
        .collect()
}

impl SourceConfig {
    pub fn from_env() -> Self {
        if let Ok(api_key) = std::env::var("ITAD_API_KEY") {
            let query = ItadQuery {
                country: std::env::var("COUNTRY").unwrap_or_else(|_| "US".to_owned()),
                limit: env_parse_with_default("ITAD_LIMIT", ItadQuery::default().limit),
                sort: std::env::var("ITAD_SORT").unwrap_or_else(|_| "-cut".to_owned()),
                shops: env_id_list("SHOP_IDS"),
                ..ItadQuery::default()
            };
            let defaults = DealThresholds::default();
            let thresholds = DealThresholds {
                min_savings: env_parse_with_default("MIN_SAVINGS", defaults.min_savings),
                max_savings: env_parse_optional("MAX_SAVINGS"),
                min_review_count: env_parse_with_default(
                    "MIN_REVIEW_COUNT",
                    defaults.min_review_count,
                ),
                min_rating: env_parse_optional("MIN_STEAM_RATING"),
            };
            Self::Itad {
                api_key,
                query,
                thresholds,
                deal_limit: env_parse_with_default("DEAL_LIMIT", DEFAULT_DEAL_LIMIT),
            }
        } else {
            let query = DealsQuery {
                sort_by: Some(std::env::var("SORT_BY").unwrap_or_else(|_| "Savings".to_owned())),
                desc: Some(true),
                lower_price: env_parse_optional("LOWER_PRICE"),
                upper_price: env_parse_optional("UPPER_PRICE"),
                metacritic: env_parse_optional("MIN_METACRITIC"),
                steam_rating: env_parse_optional("MIN_STEAM_RATING"),
                on_sale: Some(env_parse_with_default("ON_SALE", false)),
                store_id: None,
                page_size: Some(DEFAULT_PAGE_SIZE),
                min_review_count: env_parse_optional("MIN_REVIEW_COUNT"),
            };
            Self::CheapShark {
                query,
                store_ids: store_ids_from_env("STORE_ID"),
                deals_per_store: env_parse_with_default(
                    "DEALS_PER_STORE",
                    DEFAULT_DEALS_PER_STORE,
                ),
                deal_limit: env_parse_with_default("DEAL_LIMIT", DEFAULT_DEAL_LIMIT),
            }
        }
    }
}
