//! Renders deals into social-media sized messages.
//!
//! Budgets are counted in `char`s. Name and description budgets keep ordinary
//! deals well under [`MAX_MESSAGE_LEN`]; anything that still overflows is
//! shortened further and finally hard-truncated.

use crate::model::Deal;
use crate::parser::extract::truncate_description;
use crate::utils::{ELLIPSIS, truncate_chars};

pub const MAX_MESSAGE_LEN: usize = 280;
pub const SINGLE_NAME_BUDGET: usize = 50;
pub const DIGEST_NAME_BUDGET: usize = 30;
pub const NAME_TAG_BUDGET: usize = 20;
pub const HASHTAGS: &str = "#SteamDeals #Gaming #Deals";
pub const NO_DEALS_MESSAGE: &str =
    "🎮 No Steam deals found right now. Check back later! #SteamDeals #Gaming";

// Below this many characters a shortened description is not worth keeping.
const MIN_DESCRIPTION_BUDGET: usize = 20;

pub fn no_deals_message() -> String {
    NO_DEALS_MESSAGE.to_string()
}

/// Hashtag built from the game name: alphanumerics only, capped.
pub fn name_hashtag(name: &str) -> Option<String> {
    let tag: String = name
        .chars()
        .filter(|c| c.is_alphanumeric())
        .take(NAME_TAG_BUDGET)
        .collect();
    (!tag.is_empty()).then(|| format!("#{tag}"))
}

pub fn placeholder_description(name: &str) -> String {
    format!("{name} is on sale on Steam right now!")
}

/// Message announcing a single deal.
pub fn format_single(deal: &Deal) -> String {
    let description = deal
        .description
        .as_deref()
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| placeholder_description(&deal.name));

    let message = render_single(deal, Some(&description));
    let overflow = message.chars().count().saturating_sub(MAX_MESSAGE_LEN);
    if overflow == 0 {
        return message;
    }

    let budget = description
        .chars()
        .count()
        .saturating_sub(overflow + ELLIPSIS.len());
    let message = if budget >= MIN_DESCRIPTION_BUDGET {
        render_single(deal, Some(&truncate_description(&description, budget)))
    } else {
        render_single(deal, None)
    };
    truncate_chars(&message, MAX_MESSAGE_LEN)
}

fn render_single(deal: &Deal, description: Option<&str>) -> String {
    let name = truncate_chars(&deal.name, SINGLE_NAME_BUDGET);
    let was = deal
        .original_price
        .as_deref()
        .map(|p| format!(" (was {p})"))
        .unwrap_or_default();
    let tags = match name_hashtag(&deal.name) {
        Some(tag) => format!("{HASHTAGS} {tag}"),
        None => HASHTAGS.to_string(),
    };

    let mut message = format!("🏷️{} {} off!\n", name, deal.raw_discount_text);
    message.push_str(&format!("{}{}  |  {}\n\n", deal.price, was, deal.source_label));
    if let Some(description) = description {
        message.push_str(&format!("{description}\n\n"));
    }
    if let Some(url) = &deal.source_url {
        message.push_str(&format!("{url}\n"));
    }
    message.push_str(&tags);
    message
}

/// Numbered summary of the first `max_count` deals (at least one line).
pub fn format_digest(deals: &[Deal], max_count: usize) -> String {
    if deals.is_empty() {
        return no_deals_message();
    }

    let mut lines: Vec<String> = deals
        .iter()
        .take(max_count.max(1))
        .enumerate()
        .map(|(i, deal)| {
            format!(
                "{}. {} - {} ({})",
                i + 1,
                truncate_chars(&deal.name, DIGEST_NAME_BUDGET),
                deal.price,
                deal.raw_discount_text
            )
        })
        .collect();

    let mut message = render_digest(&lines);
    while message.chars().count() > MAX_MESSAGE_LEN && lines.len() > 1 {
        lines.pop();
        message = render_digest(&lines);
    }
    truncate_chars(&message, MAX_MESSAGE_LEN)
}

fn render_digest(lines: &[String]) -> String {
    format!("🎮 Top Steam Deals:\n\n{}\n\n{}", lines.join("\n"), HASHTAGS)
}

/// Best deal as a message, or the fixed no-deals message.
pub fn format_best(deals: &[Deal]) -> String {
    deals.first().map(format_single).unwrap_or_else(no_deals_message)
}
