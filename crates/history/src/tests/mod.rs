//! Test utilities and module declarations for history tests.

use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

use dealherald_core::constants::MS_PER_DAY;
use dealherald_core::{
    Candidate, CheapSharkDeal, ItadAssets, ItadDeal, ItadDealInfo, ItadPrice, ItadShop,
};
use tempfile::TempDir;

use crate::{Clock, Deduplicator, HistoryStore};

mod record_tests;

/// Virtual clock driven by the tests.
#[derive(Debug, Clone)]
pub struct ManualClock(Arc<AtomicI64>);

impl ManualClock {
    pub fn new(start_ms: i64) -> Self {
        Self(Arc::new(AtomicI64::new(start_ms)))
    }

    pub fn advance_days(&self, days: f64) {
        #[allow(clippy::cast_possible_truncation, reason = "test clock, small spans")]
        let delta = (days * MS_PER_DAY) as i64;
        self.0.fetch_add(delta, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> i64 {
        self.0.load(Ordering::SeqCst)
    }
}

#[expect(clippy::unwrap_used, reason = "test code")]
pub fn temp_store() -> (HistoryStore, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let store = HistoryStore::new(temp_dir.path().join("deal-history.json"));
    (store, temp_dir)
}

/// Deduplicator over a fresh temp file, driven by a manual clock starting
/// at `start_ms`.
pub fn test_dedup(
    start_ms: i64,
    max_age_days: f64,
) -> (Deduplicator<ManualClock>, ManualClock, TempDir) {
    let (store, temp_dir) = temp_store();
    let clock = ManualClock::new(start_ms);
    let dedup = Deduplicator::with_clock(store, max_age_days, clock.clone());
    (dedup, clock, temp_dir)
}

pub fn cheapshark_candidate(deal_id: &str) -> Candidate {
    Candidate::CheapShark(CheapSharkDeal {
        internal_name: deal_id.to_uppercase(),
        title: format!("Game {deal_id}"),
        metacritic_link: None,
        deal_id: deal_id.to_owned(),
        store_id: "1".to_owned(),
        game_id: "100".to_owned(),
        sale_price: "4.99".to_owned(),
        normal_price: "19.99".to_owned(),
        is_on_sale: "1".to_owned(),
        savings: "75.0".to_owned(),
        metacritic_score: "80".to_owned(),
        steam_rating_text: Some("Very Positive".to_owned()),
        steam_rating_percent: "92".to_owned(),
        steam_rating_count: "12000".to_owned(),
        steam_app_id: Some("400".to_owned()),
        release_date: 962_236_800,
        last_change: 1_621_536_418,
        deal_rating: "9.5".to_owned(),
        thumb: "https://cdn.example/thumb.jpg".to_owned(),
    })
}

pub fn itad_candidate(id: &str, shop_id: i64) -> Candidate {
    Candidate::Itad(ItadDeal {
        id: id.to_owned(),
        slug: String::new(),
        title: format!("Game {id}"),
        kind: "game".to_owned(),
        mature: false,
        assets: ItadAssets::default(),
        deal: ItadDealInfo {
            shop: ItadShop { id: shop_id, name: "Steam".to_owned() },
            price: ItadPrice { amount: 4.99, amount_int: Some(499), currency: "USD".to_owned() },
            regular: ItadPrice {
                amount: 19.99,
                amount_int: Some(1999),
                currency: "USD".to_owned(),
            },
            cut: 75.0,
            flag: None,
            drm: vec![],
            platforms: vec![],
            timestamp: None,
            expiry: None,
            url: "https://example.com/deal".to_owned(),
        },
        reviews: None,
    })
}
