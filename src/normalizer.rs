use crate::model::{Deal, RawFragment};
use crate::parser::extract::{
    DEFAULT_DESCRIPTION_LEN, clean_name, parse_discount_percent, truncate_description,
};
use crate::utils::collapse_whitespace;
use std::collections::HashSet;
use tracing::debug;

pub const MIN_NAME_LEN: usize = 3;

/// Validates fragments from one source and turns them into deals.
pub fn normalize(fragments: Vec<RawFragment>, source_label: &str) -> Vec<Deal> {
    fragments
        .into_iter()
        .filter_map(|fragment| normalize_fragment(fragment, source_label))
        .collect()
}

fn normalize_fragment(fragment: RawFragment, source_label: &str) -> Option<Deal> {
    let name = if fragment.exact_name {
        collapse_whitespace(&fragment.name)
    } else {
        clean_name(&fragment.name)
    };
    if name.chars().count() < MIN_NAME_LEN {
        debug!("Dropping fragment with unusable name {:?}", fragment.name);
        return None;
    }

    let description = fragment
        .description
        .map(|d| truncate_description(&d, DEFAULT_DESCRIPTION_LEN))
        .filter(|d| !d.is_empty());

    Some(Deal {
        name,
        discount_percent: parse_discount_percent(&fragment.discount_text),
        raw_discount_text: fragment.discount_text,
        price: fragment.price,
        original_price: fragment.original_price,
        description,
        source_url: fragment.source_url,
        source_label: source_label.to_string(),
    })
}

/// Drops later duplicates by dedup key, keeping first-seen order.
pub fn merge(deals: Vec<Deal>) -> Vec<Deal> {
    let mut seen = HashSet::new();
    deals
        .into_iter()
        .filter(|deal| seen.insert(deal.dedup_key()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::featured_api::parse_featured;

    fn fragment(name: &str, discount: &str) -> RawFragment {
        RawFragment {
            name: name.to_string(),
            discount_text: discount.to_string(),
            price: "$9.99".to_string(),
            ..Default::default()
        }
    }

    fn names(deals: &[Deal]) -> Vec<&str> {
        deals.iter().map(|d| d.name.as_str()).collect()
    }

    #[test]
    fn normalizes_names_and_percent() {
        let deals = normalize(
            vec![fragment("Great Game  10 January, 2024 -20% Rp 50000", "-20%")],
            "Steam Daily Deals",
        );
        assert_eq!(deals.len(), 1);
        assert_eq!(deals[0].name, "Great Game");
        assert_eq!(deals[0].discount_percent, 20);
        assert_eq!(deals[0].raw_discount_text, "-20%");
        assert_eq!(deals[0].source_label, "Steam Daily Deals");
    }

    #[test]
    fn api_names_ending_in_a_year_are_kept() {
        let json = r#"{"specials": {"items": [
            {"id": 1091500, "name": "Cyberpunk 2077", "discounted": true, "discount_percent": 50,
             "final_price": 2999, "currency": "USD"},
            {"id": 2252570, "name": "Football  Manager 2024", "discounted": true,
             "discount_percent": 75, "final_price": 1374, "currency": "USD"}
        ]}}"#;
        let fragments = parse_featured(json, "https://store.steampowered.com").unwrap();
        let deals = normalize(fragments, "Steam Specials API");
        assert_eq!(names(&deals), ["Cyberpunk 2077", "Football Manager 2024"]);
        assert_eq!(deals[1].dedup_key(), "football manager 2024");
    }

    #[test]
    fn drops_names_shorter_than_three_chars() {
        let deals = normalize(
            vec![
                fragment("Go", "-10%"),
                fragment("  ", "-10%"),
                fragment("12 March, 2023", "-5%"),
            ],
            "x",
        );
        assert!(deals.is_empty());
    }

    #[test]
    fn caps_descriptions() {
        let mut raw = fragment("Outer Wilds", "-40%");
        raw.description = Some("space ".repeat(100));
        let deals = normalize(vec![raw], "x");
        let description = deals[0].description.as_deref().unwrap();
        assert!(description.chars().count() <= DEFAULT_DESCRIPTION_LEN + 3);
    }

    #[test]
    fn merge_keeps_first_seen() {
        let mut deals = normalize(
            vec![fragment("Hades", "-50%"), fragment("Celeste", "-75%")],
            "api",
        );
        deals.extend(normalize(vec![fragment("hades ", "-60%")], "html"));

        let merged = merge(deals);
        assert_eq!(names(&merged), ["Hades", "Celeste"]);
        assert_eq!(merged[0].source_label, "api");
        assert_eq!(merged[0].discount_percent, 50);
    }

    #[test]
    fn merge_is_idempotent() {
        let deals = normalize(
            vec![
                fragment("Hades", "-50%"),
                fragment("Celeste", "-75%"),
                fragment("Tunic", "-30%"),
            ],
            "api",
        );
        let once = merge(deals.clone());
        let mut doubled = deals.clone();
        doubled.extend(deals);
        assert_eq!(merge(doubled), once);
        assert_eq!(merge(once.clone()), once);
    }
}
