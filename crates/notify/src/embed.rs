//! Rich-embed rendering for ITAD deals.
//!
//! The structs mirror the subset of Discord's embed object this bot
//! emits; they serialize straight into the create-message payload.

use dealherald_core::ItadDeal;
use serde::Serialize;

use crate::format::sanitize_mentions;

/// Accent color for deal embeds (Discord blurple).
const EMBED_COLOR: u32 = 0x5865_F2;

#[derive(Debug, Clone, Default, Serialize)]
pub struct Embed {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<u32>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<EmbedField>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<EmbedImage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<EmbedImage>,
}

#[derive(Debug, Clone, Serialize)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct EmbedImage {
    pub url: String,
}

/// Builds the rich embed for an ITAD deal.
///
/// Artwork preference: boxart as thumbnail when present, otherwise the
/// widest available banner as the full-width image.
#[must_use]
pub fn format_deal_embed(deal: &ItadDeal) -> Embed {
    let info = &deal.deal;

    let mut embed = Embed {
        title: Some(sanitize_mentions(&deal.title)),
        url: Some(info.url.clone()),
        color: Some(EMBED_COLOR),
        ..Embed::default()
    };

    if deal.is_historical_low() {
        embed.description = Some("Historical low price!".to_owned());
    }

    embed.fields.push(EmbedField {
        name: "Price".to_owned(),
        value: format!(
            "{} {:.2} (was {:.2})",
            info.price.currency, info.price.amount, info.regular.amount
        ),
        inline: true,
    });
    embed.fields.push(EmbedField {
        name: "Discount".to_owned(),
        value: format!("{:.0}% OFF", info.cut),
        inline: true,
    });
    embed.fields.push(EmbedField {
        name: "Store".to_owned(),
        value: info.shop.name.clone(),
        inline: true,
    });

    if let Some(steam) = deal.steam_review() {
        embed.fields.push(EmbedField {
            name: "Steam Rating".to_owned(),
            value: format!("{}% ({} reviews)", steam.score.unwrap_or(0), steam.count.unwrap_or(0)),
            inline: true,
        });
    }
    if let Some(metascore) = deal.metascore() {
        embed.fields.push(EmbedField {
            name: "Metacritic".to_owned(),
            value: format!("{}/100", metascore.score.unwrap_or(0)),
            inline: true,
        });
    }

    let assets = &deal.assets;
    if let Some(boxart) = &assets.boxart {
        embed.thumbnail = Some(EmbedImage { url: boxart.clone() });
    } else if let Some(banner) = assets
        .banner600
        .as_ref()
        .or(assets.banner400.as_ref())
        .or(assets.banner300.as_ref())
        .or(assets.banner145.as_ref())
    {
        embed.image = Some(EmbedImage { url: banner.clone() });
    }

    embed
}
