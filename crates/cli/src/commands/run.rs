use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Utc;
use dealherald_core::Candidate;
use dealherald_core::constants::REQUEST_PAUSE_MS;
use dealherald_history::{Deduplicator, HistoryStore};
use dealherald_notify::{
    DISCORD_API_BASE_URL, DiscordClient, format_deal_embed, format_deal_message,
};
use dealherald_source::{
    CHEAPSHARK_BASE_URL, CheapSharkClient, ITAD_BASE_URL, ItadClient, filter_deals,
};

use crate::config::{DiscordConfig, HistoryConfig, SourceConfig};

/// One batch run: fetch candidates, drop already-posted ones, post the
/// rest, then record them. Posting and marking are not atomic: a crash
/// in between means a duplicate post next run, never a silently dropped
/// deal.
pub(crate) async fn run(dry_run: bool) -> Result<()> {
    let history = HistoryConfig::from_env();
    let dedup = Deduplicator::new(HistoryStore::new(history.file), history.max_age_days);

    let candidates = fetch_candidates().await?;
    if candidates.is_empty() {
        tracing::info!("no deals matched the configured thresholds");
        if !dry_run {
            let config = DiscordConfig::from_env()?;
            let discord = DiscordClient::new(config.token, DISCORD_API_BASE_URL)?;
            discord
                .post_message(
                    &config.channel_id,
                    "No game deals found today matching your filters.",
                )
                .await?;
        }
        return Ok(());
    }

    let fresh = dedup.filter_new(&candidates)?;
    tracing::info!(candidates = candidates.len(), fresh = fresh.len(), "deduplicated deals");
    if fresh.is_empty() {
        tracing::info!("every matching deal was already posted");
        return Ok(());
    }

    if dry_run {
        for deal in &fresh {
            println!("{}", format_deal_message(deal));
        }
        tracing::info!(would_post = fresh.len(), "dry run: not posting, not marking");
        return Ok(());
    }

    let config = DiscordConfig::from_env()?;
    let discord = DiscordClient::new(config.token, DISCORD_API_BASE_URL)?;

    let mut posted: Vec<Candidate> = Vec::new();
    let mut delivery_error: Option<anyhow::Error> = None;
    for (i, deal) in fresh.iter().enumerate() {
        if i > 0 {
            tokio::time::sleep(Duration::from_millis(REQUEST_PAUSE_MS)).await;
        }

        let result = match deal {
            Candidate::Itad(itad) if config.use_embeds => {
                discord.post_embed(&config.channel_id, &format_deal_embed(itad)).await
            },
            _ => discord.post_message(&config.channel_id, &format_deal_message(deal)).await,
        };

        match result {
            Ok(()) => {
                tracing::info!(
                    posted = i + 1,
                    total = fresh.len(),
                    title = deal.title(),
                    "posted deal"
                );
                posted.push(deal.clone());
            },
            Err(e) => {
                delivery_error = Some(anyhow::Error::new(e).context(format!(
                    "failed to post deal {:?}",
                    deal.title()
                )));
                break;
            },
        }
    }

    // Record what actually went out, even if a later post failed: those
    // deals were delivered and must not be posted again.
    if !posted.is_empty() {
        dedup.mark_posted(&posted)?;
    }
    if let Some(e) = delivery_error {
        return Err(e);
    }

    let stats = dedup.stats();
    tracing::info!(posted = posted.len(), tracked = stats.tracked, "run complete");
    Ok(())
}

async fn fetch_candidates() -> Result<Vec<Candidate>> {
    match SourceConfig::from_env() {
        SourceConfig::Itad { api_key, query, thresholds, deal_limit } => {
            let client = ItadClient::new(api_key, ITAD_BASE_URL)
                .context("failed to build ITAD client")?;
            if !query.shops.is_empty() {
                let shops = client.get_shops().await;
                let names: Vec<&str> = query
                    .shops
                    .iter()
                    .filter_map(|id| shops.get(id).map(String::as_str))
                    .collect();
                tracing::info!(shops = ?query.shops, names = ?names, "restricting to shops");
            }
            let deals = client.get_deals(&query).await?;
            let mut kept = filter_deals(deals, &thresholds, Utc::now());
            kept.truncate(deal_limit);
            Ok(kept.into_iter().map(Candidate::Itad).collect())
        },
        SourceConfig::CheapShark { query, store_ids, deals_per_store, deal_limit } => {
            let client = CheapSharkClient::new(CHEAPSHARK_BASE_URL)
                .context("failed to build CheapShark client")?;
            let deals = if store_ids.is_empty() {
                client.get_deals(&query, Some(deal_limit)).await?
            } else {
                client
                    .get_deals_from_multiple_stores(&query, &store_ids, deals_per_store)
                    .await?
            };
            Ok(deals.into_iter().map(Candidate::CheapShark).collect())
        },
    }
}
