// Illustrative deals shown when every source comes back empty
use crate::model::{Deal, FALLBACK_SOURCE_LABEL};
use crate::utils::search_url;

struct Entry {
    name: &'static str,
    discount: u32,
    price: &'static str,
    original_price: &'static str,
    description: &'static str,
}

const ENTRIES: &[Entry] = &[
    Entry {
        name: "The Witcher 3: Wild Hunt",
        discount: 80,
        price: "$7.99",
        original_price: "$39.99",
        description: "A story-driven open world RPG set in a dark fantasy universe.",
    },
    Entry {
        name: "Hollow Knight",
        discount: 50,
        price: "$7.49",
        original_price: "$14.99",
        description: "Forge your own path through a vast ruined kingdom of insects and heroes.",
    },
    Entry {
        name: "Stardew Valley",
        discount: 20,
        price: "$11.99",
        original_price: "$14.99",
        description: "Inherit your grandfather's old farm plot and build a life in Stardew Valley.",
    },
];

/// Synthetic deals, already in ranked order, every one labelled
/// [`FALLBACK_SOURCE_LABEL`].
pub fn fallback_deals(store_base: &str) -> Vec<Deal> {
    ENTRIES
        .iter()
        .map(|entry| Deal {
            name: entry.name.to_string(),
            discount_percent: entry.discount,
            raw_discount_text: format!("-{}%", entry.discount),
            price: entry.price.to_string(),
            original_price: Some(entry.original_price.to_string()),
            description: Some(entry.description.to_string()),
            source_url: Some(search_url(store_base, entry.name)),
            source_label: FALLBACK_SOURCE_LABEL.to_string(),
        })
        .collect()
}
