//! Plain-text message rendering for candidate deals.

use std::fmt::Write as _;

use dealherald_core::{Candidate, CheapSharkDeal, ItadDeal};

/// Zero-width space, used to break up mention tokens without changing
/// how the text reads.
const ZWSP: char = '\u{200B}';

/// Neutralizes mass-ping and raw-mention tokens in upstream text.
///
/// Game titles are upstream-controlled; a title containing `@everyone`
/// or `<@…>` must not ping anyone when posted verbatim.
#[must_use]
pub fn sanitize_mentions(text: &str) -> String {
    text.replace("@everyone", &format!("@{ZWSP}everyone"))
        .replace("@here", &format!("@{ZWSP}here"))
        .replace("<@", &format!("<{ZWSP}@"))
}

/// Renders a deal into the plain-text message posted to the channel.
#[must_use]
pub fn format_deal_message(candidate: &Candidate) -> String {
    match candidate {
        Candidate::CheapShark(deal) => format_cheapshark_message(deal),
        Candidate::Itad(deal) => format_itad_message(deal),
    }
}

fn format_cheapshark_message(deal: &CheapSharkDeal) -> String {
    let savings = deal.savings.parse::<f64>().unwrap_or(0.0);
    let sale_price = deal.sale_price.parse::<f64>().unwrap_or(0.0);
    let normal_price = deal.normal_price.parse::<f64>().unwrap_or(0.0);

    let mut message = format!("**{}**\n\n", sanitize_mentions(&deal.title));
    let _ = writeln!(message, "Price: ${sale_price:.2} (was ${normal_price:.2})");
    let _ = writeln!(message, "Discount: {savings:.0}% OFF");

    if deal.steam_rating_percent.parse::<u32>().unwrap_or(0) > 0 {
        let _ = write!(message, "Steam Rating: {}%", deal.steam_rating_percent);
        if let Some(text) = &deal.steam_rating_text {
            let _ = write!(message, " ({text})");
        }
        message.push('\n');
    }

    if deal.metacritic_score.parse::<u32>().unwrap_or(0) > 0 {
        let _ = writeln!(message, "Metacritic: {}/100", deal.metacritic_score);
    }

    let _ = writeln!(
        message,
        "Link: https://www.cheapshark.com/redirect?dealID={}",
        deal.deal_id
    );
    message
}

fn format_itad_message(deal: &ItadDeal) -> String {
    let info = &deal.deal;

    let mut message = format!("**{}**\n\n", sanitize_mentions(&deal.title));
    let _ = writeln!(
        message,
        "Price: {} {:.2} (was {:.2})",
        info.price.currency, info.price.amount, info.regular.amount
    );
    let _ = writeln!(message, "Discount: {:.0}% OFF", info.cut);

    if let Some(steam) = deal.steam_review() {
        let _ = writeln!(
            message,
            "Steam Rating: {}% ({} reviews)",
            steam.score.unwrap_or(0),
            steam.count.unwrap_or(0)
        );
    }
    if let Some(metascore) = deal.metascore() {
        let _ = writeln!(message, "Metacritic: {}/100", metascore.score.unwrap_or(0));
    }

    let _ = writeln!(message, "Store: {}", info.shop.name);
    if deal.is_historical_low() {
        message.push_str("HISTORICAL LOW!\n");
    }
    let _ = writeln!(message, "Link: {}", info.url);
    message
}

#[cfg(test)]
mod tests {
    #![expect(clippy::unwrap_used, reason = "test code")]

    use dealherald_core::{ItadReview, ItadShop};

    use super::*;

    fn cheapshark_deal() -> CheapSharkDeal {
        serde_json::from_value(serde_json::json!({
            "internalName": "DEUSEX",
            "title": "Deus Ex",
            "metacriticLink": null,
            "dealID": "Xyz123",
            "storeID": "1",
            "gameID": "187",
            "salePrice": "0.97",
            "normalPrice": "6.99",
            "isOnSale": "1",
            "savings": "86.123",
            "metacriticScore": "90",
            "steamRatingText": "Overwhelmingly Positive",
            "steamRatingPercent": "96",
            "steamRatingCount": "21000",
            "steamAppID": "6910",
            "releaseDate": 962_236_800,
            "lastChange": 1_621_536_418,
            "dealRating": "9.8",
            "thumb": "https://cdn.example/thumb.jpg"
        }))
        .unwrap()
    }

    fn itad_deal() -> ItadDeal {
        serde_json::from_value(serde_json::json!({
            "id": "abc",
            "slug": "some-game",
            "title": "Some Game",
            "type": "game",
            "mature": false,
            "assets": {},
            "deal": {
                "shop": { "id": 61, "name": "Steam" },
                "price": { "amount": 4.99, "amountInt": 499, "currency": "USD" },
                "regular": { "amount": 19.99, "amountInt": 1999, "currency": "USD" },
                "cut": 75,
                "flag": "H",
                "drm": [ { "id": 61, "name": "Steam" } ],
                "platforms": [],
                "url": "https://example.com/deal"
            },
            "reviews": [
                { "score": 92, "count": 12000, "source": "Steam" },
                { "score": 88, "count": null, "source": "Metascore" }
            ]
        }))
        .unwrap()
    }

    #[test]
    fn cheapshark_message_has_required_elements() {
        let message = format_deal_message(&Candidate::CheapShark(cheapshark_deal()));
        assert!(message.contains("**Deus Ex**"));
        assert!(message.contains("Price: $0.97 (was $6.99)"));
        assert!(message.contains("Discount: 86% OFF"));
        assert!(message.contains("Steam Rating: 96% (Overwhelmingly Positive)"));
        assert!(message.contains("Metacritic: 90/100"));
        assert!(message.contains("https://www.cheapshark.com/redirect?dealID=Xyz123"));
    }

    #[test]
    fn cheapshark_message_omits_zero_ratings() {
        let mut deal = cheapshark_deal();
        deal.steam_rating_percent = "0".to_owned();
        deal.metacritic_score = "0".to_owned();
        let message = format_deal_message(&Candidate::CheapShark(deal));
        assert!(!message.contains("Steam Rating"));
        assert!(!message.contains("Metacritic"));
    }

    #[test]
    fn itad_message_has_required_elements() {
        let message = format_deal_message(&Candidate::Itad(itad_deal()));
        assert!(message.contains("**Some Game**"));
        assert!(message.contains("Price: USD 4.99 (was 19.99)"));
        assert!(message.contains("Discount: 75% OFF"));
        assert!(message.contains("Steam Rating: 92% (12000 reviews)"));
        assert!(message.contains("Metacritic: 88/100"));
        assert!(message.contains("Store: Steam"));
        assert!(message.contains("HISTORICAL LOW!"));
        assert!(message.contains("Link: https://example.com/deal"));
    }

    #[test]
    fn itad_message_without_flag_has_no_low_marker() {
        let mut deal = itad_deal();
        deal.deal.flag = None;
        let message = format_deal_message(&Candidate::Itad(deal));
        assert!(!message.contains("HISTORICAL LOW"));
    }

    #[test]
    fn titles_are_mention_sanitized() {
        let mut deal = itad_deal();
        deal.title = "Free keys @everyone @here <@123> <@&456>".to_owned();
        deal.reviews = Some(vec![ItadReview {
            source: "Steam".to_owned(),
            score: Some(90),
            count: Some(500),
            url: None,
        }]);
        deal.deal.shop = ItadShop { id: 61, name: "Steam".to_owned() };

        let message = format_deal_message(&Candidate::Itad(deal));
        assert!(!message.contains("@everyone"));
        assert!(!message.contains("@here"));
        assert!(!message.contains("<@123>"));
        assert!(!message.contains("<@&456>"));
        // The text still reads the same once the zero-width breaks are in.
        assert!(message.contains("everyone"));
    }

    #[test]
    fn message_fits_discord_limit() {
        let message = format_deal_message(&Candidate::Itad(itad_deal()));
        assert!(message.len() <= dealherald_core::constants::DISCORD_MESSAGE_LIMIT);
    }
}
