//! Deal record shapes for the two upstream aggregators, plus identity-key
//! derivation.
//!
//! The deduplication layer never looks inside these shapes directly; it
//! depends only on [`Candidate::identity_key`].

use serde::{Deserialize, Serialize};

use crate::error::{HeraldError, Result};

/// A deal as returned by the CheapShark `/deals` endpoint.
///
/// CheapShark serves numeric values as strings on the wire; they are kept
/// as strings here and parsed at the formatting edge.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheapSharkDeal {
    pub internal_name: String,
    pub title: String,
    #[serde(default)]
    pub metacritic_link: Option<String>,
    #[serde(rename = "dealID")]
    pub deal_id: String,
    #[serde(rename = "storeID")]
    pub store_id: String,
    #[serde(rename = "gameID")]
    pub game_id: String,
    pub sale_price: String,
    pub normal_price: String,
    pub is_on_sale: String,
    pub savings: String,
    pub metacritic_score: String,
    #[serde(default)]
    pub steam_rating_text: Option<String>,
    pub steam_rating_percent: String,
    pub steam_rating_count: String,
    #[serde(rename = "steamAppID", default)]
    pub steam_app_id: Option<String>,
    pub release_date: i64,
    pub last_change: i64,
    pub deal_rating: String,
    pub thumb: String,
}

/// Shop reference inside an ITAD deal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItadShop {
    pub id: i64,
    pub name: String,
}

/// A price value from ITAD (current, regular, store low, ...).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItadPrice {
    pub amount: f64,
    #[serde(default)]
    pub amount_int: Option<i64>,
    pub currency: String,
}

/// Named reference used for DRM and platform entries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItadNamedRef {
    #[serde(default)]
    pub id: Option<i64>,
    pub name: String,
}

/// Artwork URLs attached to an ITAD deal.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ItadAssets {
    #[serde(default)]
    pub boxart: Option<String>,
    #[serde(default)]
    pub banner145: Option<String>,
    #[serde(default)]
    pub banner300: Option<String>,
    #[serde(default)]
    pub banner400: Option<String>,
    #[serde(default)]
    pub banner600: Option<String>,
}

/// Review aggregate attached to an ITAD deal (Steam, Metascore, ...).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItadReview {
    pub source: String,
    #[serde(default)]
    pub score: Option<i64>,
    #[serde(default)]
    pub count: Option<i64>,
    #[serde(default)]
    pub url: Option<String>,
}

/// The pricing block of an ITAD deal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItadDealInfo {
    pub shop: ItadShop,
    pub price: ItadPrice,
    pub regular: ItadPrice,
    /// Discount percentage (0-100).
    pub cut: f64,
    /// `"H"` marks a historical low, `"N"` a new deal, `"S"` a store low.
    #[serde(default)]
    pub flag: Option<String>,
    #[serde(default)]
    pub drm: Vec<ItadNamedRef>,
    #[serde(default)]
    pub platforms: Vec<ItadNamedRef>,
    #[serde(default)]
    pub timestamp: Option<String>,
    /// RFC 3339 expiry of the deal, when the shop publishes one.
    #[serde(default)]
    pub expiry: Option<String>,
    pub url: String,
}

/// A deal as returned by the ITAD `/deals/v2` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItadDeal {
    pub id: String,
    #[serde(default)]
    pub slug: String,
    pub title: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub mature: bool,
    #[serde(default)]
    pub assets: ItadAssets,
    pub deal: ItadDealInfo,
    #[serde(default)]
    pub reviews: Option<Vec<ItadReview>>,
}

impl ItadDeal {
    /// The Steam review aggregate, if the deal carries one.
    #[must_use]
    pub fn steam_review(&self) -> Option<&ItadReview> {
        self.reviews.as_deref()?.iter().find(|r| r.source == "Steam")
    }

    /// The Metascore aggregate, if the deal carries one.
    #[must_use]
    pub fn metascore(&self) -> Option<&ItadReview> {
        self.reviews.as_deref()?.iter().find(|r| r.source == "Metascore")
    }

    /// Whether the deal grants a Steam key.
    #[must_use]
    pub fn has_steam_drm(&self) -> bool {
        self.deal.drm.iter().any(|d| d.name == "Steam")
    }

    /// Whether the deal is flagged as a historical low.
    #[must_use]
    pub fn is_historical_low(&self) -> bool {
        self.deal.flag.as_deref() == Some("H")
    }
}

/// A candidate deal from either upstream source.
///
/// Closed set of shapes: downstream code matches exhaustively instead of
/// duck-typing on field presence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Candidate {
    CheapShark(CheapSharkDeal),
    Itad(ItadDeal),
}

impl Candidate {
    /// Derives the stable identity key used for deduplication.
    ///
    /// CheapShark deal IDs are already unique per store, so the base
    /// identifier stands alone. ITAD identifies a game, not a listing, so
    /// the shop ID is appended: the same game on two stores is tracked
    /// independently.
    ///
    /// # Errors
    /// Returns [`HeraldError::InvalidDeal`] when the base identifier is
    /// empty. Such a candidate must never reach the history map.
    pub fn identity_key(&self) -> Result<String> {
        match self {
            Self::CheapShark(d) => {
                if d.deal_id.trim().is_empty() {
                    return Err(HeraldError::InvalidDeal(format!(
                        "CheapShark deal {:?} has no dealID",
                        d.title
                    )));
                }
                Ok(d.deal_id.clone())
            },
            Self::Itad(d) => {
                if d.id.trim().is_empty() {
                    return Err(HeraldError::InvalidDeal(format!(
                        "ITAD deal {:?} has no id",
                        d.title
                    )));
                }
                Ok(format!("{}-{}", d.id, d.deal.shop.id))
            },
        }
    }

    /// Display title of the deal.
    #[must_use]
    pub fn title(&self) -> &str {
        match self {
            Self::CheapShark(d) => &d.title,
            Self::Itad(d) => &d.title,
        }
    }
}
