// Generic parser for HTML deal listings with inconsistent markup
use crate::model::{ParserError, RawFragment};
use crate::parser::extract::{container_text, extract_discount, extract_name, extract_price};
use crate::utils::{absolute_url, search_url};
use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;
use tracing::debug;

static CLASSED: LazyLock<Selector> = LazyLock::new(|| Selector::parse("[class]").unwrap());

/// Which elements count as deal containers: tag in `tags` and a `class`
/// attribute containing one of `keywords` (case-insensitive).
#[derive(Debug, Clone)]
pub struct ContainerRule {
    pub tags: Vec<String>,
    pub keywords: Vec<String>,
}

impl ContainerRule {
    pub fn new(tags: &[&str], keywords: &[&str]) -> Self {
        Self {
            tags: tags.iter().map(|t| t.to_string()).collect(),
            keywords: keywords.iter().map(|k| k.to_lowercase()).collect(),
        }
    }

    fn selector(&self) -> Result<Selector, ParserError> {
        let css = self
            .tags
            .iter()
            .map(|tag| format!("{tag}[class]"))
            .collect::<Vec<_>>()
            .join(", ");
        Selector::parse(&css).map_err(|e| ParserError::Selector(e.to_string()))
    }

    fn matches(&self, element: ElementRef<'_>) -> bool {
        element.value().attr("class").is_some_and(|class| {
            let class = class.to_lowercase();
            self.keywords.iter().any(|k| class.contains(k.as_str()))
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameStrategy {
    /// Title element, app link, then free-text line scan.
    LinkOrLines,
    /// Title element or app link only; containers without either are skipped.
    LinkOnly,
}

#[derive(Debug, Clone)]
pub struct ListingLayout {
    pub rule: ContainerRule,
    pub max_candidates: usize,
    pub name_strategy: NameStrategy,
}

/// Extracts deal fragments from a listing page.
///
/// Only the first `max_candidates` matching containers are examined; any
/// container missing a discount, a price or a name is skipped.
pub fn parse_listing(
    html: &str,
    layout: &ListingLayout,
    store_base: &str,
) -> Result<Vec<RawFragment>, ParserError> {
    let selector = layout.rule.selector()?;
    let document = Html::parse_document(html);

    let fragments = document
        .select(&selector)
        .filter(|el| layout.rule.matches(*el))
        .take(layout.max_candidates)
        .filter_map(|container| fragment_from_container(container, layout, store_base))
        .collect();

    Ok(fragments)
}

fn fragment_from_container(
    container: ElementRef<'_>,
    layout: &ListingLayout,
    store_base: &str,
) -> Option<RawFragment> {
    let text = container_text(container);

    let Some(discount_text) = extract_discount(&text) else {
        debug!("Skipping container without discount marker");
        return None;
    };
    let final_price = classed_price(container, "final_price");
    let Some(price) = final_price.or_else(|| extract_price(&text)) else {
        debug!("Skipping container without price");
        return None;
    };
    let original_price = classed_price(container, "original_price").filter(|p| *p != price);

    let allow_line_scan = layout.name_strategy == NameStrategy::LinkOrLines;
    let Some(found) = extract_name(container, allow_line_scan) else {
        debug!("Skipping container without recognizable name");
        return None;
    };

    let source_url = match found.href {
        Some(href) => absolute_url(store_base, &href),
        None => search_url(store_base, &found.name),
    };

    Some(RawFragment {
        name: found.name,
        discount_text,
        price,
        original_price,
        source_url: Some(source_url),
        description: None,
        exact_name: false,
    })
}

/// Price inside a descendant whose class mentions `marker`, e.g. Steam's
/// `discount_final_price`.
fn classed_price(container: ElementRef<'_>, marker: &str) -> Option<String> {
    container
        .select(&CLASSED)
        .filter(|el| {
            el.value()
                .attr("class")
                .is_some_and(|c| c.to_lowercase().contains(marker))
        })
        .find_map(|el| extract_price(&el.text().collect::<String>()))
}
