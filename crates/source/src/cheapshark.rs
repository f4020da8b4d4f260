//! Adapter for the CheapShark deals API.

use std::time::Duration;

use dealherald_core::CheapSharkDeal;
use dealherald_core::constants::{HTTP_TIMEOUT_SECS, REQUEST_PAUSE_MS};

use crate::error::SourceError;

/// Production endpoint of the CheapShark API.
pub const CHEAPSHARK_BASE_URL: &str = "https://www.cheapshark.com/api/1.0";

/// Query configuration for the `/deals` endpoint.
///
/// `min_review_count` is applied client-side after the fetch; CheapShark
/// has no server-side parameter for it.
#[derive(Debug, Clone, Default)]
pub struct DealsQuery {
    pub sort_by: Option<String>,
    pub desc: Option<bool>,
    pub lower_price: Option<f64>,
    pub upper_price: Option<f64>,
    pub metacritic: Option<u32>,
    pub steam_rating: Option<u32>,
    pub on_sale: Option<bool>,
    pub store_id: Option<i64>,
    pub page_size: Option<usize>,
    pub min_review_count: Option<u32>,
}

impl DealsQuery {
    fn query_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(sort_by) = &self.sort_by {
            params.push(("sortBy", sort_by.clone()));
        }
        if let Some(desc) = self.desc {
            params.push(("desc", flag(desc)));
        }
        if let Some(lower) = self.lower_price {
            params.push(("lowerPrice", lower.to_string()));
        }
        if let Some(upper) = self.upper_price {
            params.push(("upperPrice", upper.to_string()));
        }
        if let Some(metacritic) = self.metacritic {
            params.push(("metacritic", metacritic.to_string()));
        }
        if let Some(steam_rating) = self.steam_rating {
            params.push(("steamRating", steam_rating.to_string()));
        }
        if let Some(on_sale) = self.on_sale {
            params.push(("onSale", flag(on_sale)));
        }
        if let Some(store_id) = self.store_id {
            params.push(("storeID", store_id.to_string()));
        }
        if let Some(page_size) = self.page_size {
            params.push(("pageSize", page_size.to_string()));
        }
        params
    }
}

fn flag(value: bool) -> String {
    if value { "1".to_owned() } else { "0".to_owned() }
}

/// Client for the CheapShark deals API. No authentication required.
#[derive(Debug, Clone)]
pub struct CheapSharkClient {
    client: reqwest::Client,
    base_url: String,
}

impl CheapSharkClient {
    /// Creates a client against the given base URL (see
    /// [`CHEAPSHARK_BASE_URL`] for production).
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>) -> Result<Self, SourceError> {
        let base_url = base_url.into().trim_end_matches('/').to_owned();
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
            .build()
            .map_err(|e| SourceError::ClientInit(e.to_string()))?;
        Ok(Self { client, base_url })
    }

    /// Fetches deals matching `query`, applies the review-count
    /// post-filter, and truncates to `limit` when given.
    ///
    /// # Errors
    /// Returns an error on request failure, a non-success status, or an
    /// unparseable response body.
    pub async fn get_deals(
        &self,
        query: &DealsQuery,
        limit: Option<usize>,
    ) -> Result<Vec<CheapSharkDeal>, SourceError> {
        let url = format!("{}/deals", self.base_url);
        tracing::info!(url = %url, "fetching deals from CheapShark");

        let response = self.client.get(&url).query(&query.query_params()).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SourceError::HttpStatus { code: status.as_u16(), body });
        }

        let mut deals: Vec<CheapSharkDeal> = response.json().await?;
        tracing::info!(fetched = deals.len(), "fetched deals from CheapShark");

        if let Some(min_reviews) = query.min_review_count.filter(|&m| m > 0) {
            deals.retain(|deal| {
                deal.steam_rating_count.parse::<u32>().unwrap_or(0) >= min_reviews
            });
            tracing::info!(
                remaining = deals.len(),
                min_reviews,
                "applied review-count filter"
            );
        }

        if let Some(limit) = limit {
            deals.truncate(limit);
        }
        Ok(deals)
    }

    /// Fetches `per_store` deals from each store in turn, with a
    /// politeness pause between requests, and concatenates the results.
    ///
    /// # Errors
    /// Fails on the first store whose fetch fails.
    pub async fn get_deals_from_multiple_stores(
        &self,
        query: &DealsQuery,
        store_ids: &[i64],
        per_store: usize,
    ) -> Result<Vec<CheapSharkDeal>, SourceError> {
        let mut all_deals = Vec::new();
        for (i, &store_id) in store_ids.iter().enumerate() {
            if i > 0 {
                tokio::time::sleep(Duration::from_millis(REQUEST_PAUSE_MS)).await;
            }
            tracing::info!(store_id, per_store, "fetching deals for store");
            let store_query = DealsQuery { store_id: Some(store_id), ..query.clone() };
            let deals = self.get_deals(&store_query, Some(per_store)).await?;
            all_deals.extend(deals);
        }
        tracing::info!(total = all_deals.len(), "fetched deals from all stores");
        Ok(all_deals)
    }
}

/// Maps a human-friendly store name to CheapShark's numeric store ID.
#[must_use]
pub fn store_id_from_name(name: &str) -> Option<i64> {
    let id = match name.to_lowercase().as_str() {
        "steam" => 1,
        "gamersgate" => 2,
        "greenmangaming" | "gmg" => 3,
        "amazon" => 4,
        "gamestop" => 5,
        "direct2drive" => 6,
        "gog" => 7,
        "origin" => 8,
        "humble" | "humblestore" => 11,
        "uplay" => 13,
        "fanatical" => 15,
        "wingamestore" => 21,
        "gamesplanet" => 23,
        "voidu" => 24,
        "epicgames" | "epic" => 25,
        _ => return None,
    };
    Some(id)
}
