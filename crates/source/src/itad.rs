//! Adapter for the IsThereAnyDeal (ITAD) API.

use std::collections::HashMap;
use std::time::Duration;

use chrono::{DateTime, Utc};
use dealherald_core::ItadDeal;
use dealherald_core::constants::{EXPIRY_WINDOW_HOURS, HTTP_TIMEOUT_SECS};
use serde::Deserialize;

use crate::error::SourceError;

/// Production endpoint of the ITAD API.
pub const ITAD_BASE_URL: &str = "https://api.isthereanydeal.com";

/// Query configuration for the `/deals/v2` endpoint.
#[derive(Debug, Clone)]
pub struct ItadQuery {
    pub country: String,
    pub offset: usize,
    pub limit: usize,
    pub sort: String,
    /// Restrict results to these shop IDs; empty means all shops.
    pub shops: Vec<i64>,
}

impl Default for ItadQuery {
    fn default() -> Self {
        Self {
            country: "US".to_owned(),
            offset: 0,
            limit: 100,
            sort: "-cut".to_owned(),
            shops: Vec::new(),
        }
    }
}

/// Quality thresholds applied to fetched ITAD deals.
#[derive(Debug, Clone)]
pub struct DealThresholds {
    /// Minimum discount percentage.
    pub min_savings: f64,
    /// Maximum discount percentage; discounts above this are usually
    /// shovelware promotions.
    pub max_savings: Option<f64>,
    /// Minimum number of Steam reviews.
    pub min_review_count: i64,
    /// Minimum Steam review score, when set.
    pub min_rating: Option<i64>,
}

impl Default for DealThresholds {
    fn default() -> Self {
        Self { min_savings: 30.0, max_savings: None, min_review_count: 100, min_rating: None }
    }
}

#[derive(Debug, Deserialize)]
struct DealsPage {
    #[serde(default)]
    list: Vec<ItadDeal>,
}

#[derive(Debug, Deserialize)]
struct ShopEntry {
    id: i64,
    title: String,
}

/// Client for the ITAD API.
#[derive(Clone)]
pub struct ItadClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl std::fmt::Debug for ItadClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ItadClient")
            .field("client", &self.client)
            .field("api_key", &"***")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl ItadClient {
    /// Creates a client with the given API key against `base_url` (see
    /// [`ITAD_BASE_URL`] for production).
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(api_key: String, base_url: impl Into<String>) -> Result<Self, SourceError> {
        let base_url = base_url.into().trim_end_matches('/').to_owned();
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
            .build()
            .map_err(|e| SourceError::ClientInit(e.to_string()))?;
        Ok(Self { client, api_key, base_url })
    }

    /// Fetches the current deals page matching `query`.
    ///
    /// # Errors
    /// Returns an error on request failure, a non-success status, or an
    /// unparseable response body.
    pub async fn get_deals(&self, query: &ItadQuery) -> Result<Vec<ItadDeal>, SourceError> {
        let mut params = vec![
            ("key", self.api_key.clone()),
            ("country", query.country.clone()),
            ("offset", query.offset.to_string()),
            ("limit", query.limit.to_string()),
            ("sort", query.sort.clone()),
            ("nondeals", "false".to_owned()),
            ("mature", "false".to_owned()),
        ];
        if !query.shops.is_empty() {
            let shops =
                query.shops.iter().map(ToString::to_string).collect::<Vec<_>>().join(",");
            params.push(("shops", shops));
        }

        tracing::info!(country = %query.country, limit = query.limit, "fetching deals from ITAD");
        let response = self
            .client
            .get(format!("{}/deals/v2", self.base_url))
            .query(&params)
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SourceError::HttpStatus { code: status.as_u16(), body });
        }

        let page: DealsPage = response.json().await?;
        tracing::info!(fetched = page.list.len(), "fetched deals from ITAD");
        Ok(page.list)
    }

    /// Fetches the shop ID → title map. Degrades to an empty map on any
    /// failure: shop names are cosmetic and must not fail the run.
    pub async fn get_shops(&self) -> HashMap<i64, String> {
        match self.try_get_shops().await {
            Ok(shops) => shops,
            Err(e) => {
                tracing::warn!(error = %e, "failed to fetch ITAD shop list, continuing without");
                HashMap::new()
            },
        }
    }

    async fn try_get_shops(&self) -> Result<HashMap<i64, String>, SourceError> {
        let response =
            self.client.get(format!("{}/service/shops/v1", self.base_url)).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SourceError::HttpStatus { code: status.as_u16(), body });
        }
        let shops: Vec<ShopEntry> = response.json().await?;
        Ok(shops.into_iter().map(|s| (s.id, s.title)).collect())
    }
}

/// Applies the quality thresholds to a fetched batch, preserving order.
///
/// A deal survives when it is a game, its discount falls inside the
/// configured band, it has a Steam review aggregate meeting the review
/// count (and rating, when set), it ships a Steam key, and it does not
/// expire within the posting window.
#[must_use]
pub fn filter_deals(
    deals: Vec<ItadDeal>,
    thresholds: &DealThresholds,
    now: DateTime<Utc>,
) -> Vec<ItadDeal> {
    let before = deals.len();
    let kept: Vec<ItadDeal> =
        deals.into_iter().filter(|deal| passes_thresholds(deal, thresholds, now)).collect();
    tracing::info!(before, after = kept.len(), "applied deal thresholds");
    kept
}

fn passes_thresholds(deal: &ItadDeal, thresholds: &DealThresholds, now: DateTime<Utc>) -> bool {
    if deal.kind != "game" {
        return false;
    }

    if deal.deal.cut < thresholds.min_savings {
        return false;
    }
    if thresholds.max_savings.is_some_and(|max| deal.deal.cut > max) {
        return false;
    }

    let Some(steam) = deal.steam_review() else {
        return false;
    };
    if steam.count.unwrap_or(0) < thresholds.min_review_count {
        return false;
    }
    if let Some(min_rating) = thresholds.min_rating
        && steam.score.unwrap_or(0) < min_rating
    {
        return false;
    }

    if !deal.has_steam_drm() {
        return false;
    }

    // An unparseable expiry is treated as no expiry, as upstream shops
    // occasionally publish junk in this field.
    if let Some(expiry) = deal.deal.expiry.as_deref()
        && let Ok(expiry) = DateTime::parse_from_rfc3339(expiry)
        && expiry.with_timezone(&Utc) - now <= chrono::Duration::hours(EXPIRY_WINDOW_HOURS)
    {
        return false;
    }

    true
}
