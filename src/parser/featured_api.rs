// Steam storefront `featuredcategories` JSON parsing
use crate::model::{ParserError, RawFragment};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct FeaturedCategories {
    specials: Option<Category>,
}

#[derive(Debug, Deserialize)]
struct Category {
    #[serde(default)]
    items: Vec<SpecialItem>,
}

#[derive(Debug, Deserialize)]
struct SpecialItem {
    id: u64,
    name: String,
    discounted: Option<bool>,
    #[serde(default)]
    discount_percent: u32,
    original_price: Option<i64>,
    final_price: Option<i64>,
    currency: Option<String>,
}

/// Turns the `specials` category of the storefront API into fragments.
///
/// Prices arrive as integer minor units; items without a discount or a final
/// price are skipped.
pub fn parse_featured(json: &str, store_base: &str) -> Result<Vec<RawFragment>, ParserError> {
    let payload: FeaturedCategories = serde_json::from_str(json)?;
    let items = payload.specials.map(|c| c.items).unwrap_or_default();

    let fragments = items
        .into_iter()
        .filter(|item| item.discounted != Some(false) && item.discount_percent > 0)
        .filter_map(|item| {
            let currency = item.currency.as_deref().unwrap_or("USD");
            let price = format_minor_units(item.final_price?, currency);
            Some(RawFragment {
                discount_text: format!("-{}%", item.discount_percent),
                price,
                original_price: item.original_price.map(|p| format_minor_units(p, currency)),
                source_url: Some(format!(
                    "{}/app/{}/",
                    store_base.trim_end_matches('/'),
                    item.id
                )),
                name: item.name,
                description: None,
                exact_name: true,
            })
        })
        .collect();

    Ok(fragments)
}

/// Renders an amount in minor units (cents) as a display price.
pub fn format_minor_units(amount: i64, currency: &str) -> String {
    let major = amount / 100;
    let minor = (amount % 100).abs();
    match currency.to_ascii_uppercase().as_str() {
        "USD" => format!("${major}.{minor:02}"),
        "EUR" => format!("€{major}.{minor:02}"),
        "GBP" => format!("£{major}.{minor:02}"),
        "IDR" => format!("Rp {major}"),
        other => format!("{other} {major}.{minor:02}"),
    }
}
