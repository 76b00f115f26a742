// Concrete adapters: the storefront JSON API and the HTML listing pages
use crate::config::PipelineConfig;
use crate::model::{RawFragment, SourceError};
use crate::parser::{ContainerRule, ListingLayout, NameStrategy, parse_featured, parse_listing};
use crate::scraper::fetcher::HttpFetcher;
use crate::scraper::traits::Source;
use std::sync::Arc;

pub const FEATURED_API_LABEL: &str = "Steam Specials API";
pub const DAILY_DEALS_LABEL: &str = "Steam Daily Deals";
pub const POPULAR_DEALS_LABEL: &str = "Steam Popular Deals";

/// Structured source: the storefront `featuredcategories` endpoint.
pub struct FeaturedApiSource {
    fetcher: Arc<HttpFetcher>,
    store_base: String,
    country_code: String,
}

impl FeaturedApiSource {
    pub fn new(fetcher: Arc<HttpFetcher>, store_base: &str, country_code: &str) -> Self {
        Self {
            fetcher,
            store_base: store_base.trim_end_matches('/').to_string(),
            country_code: country_code.to_string(),
        }
    }

    fn url(&self) -> String {
        format!(
            "{}/api/featuredcategories?cc={}&l=english",
            self.store_base, self.country_code
        )
    }
}

#[async_trait::async_trait]
impl Source for FeaturedApiSource {
    fn label(&self) -> &str {
        FEATURED_API_LABEL
    }

    async fn fetch_fragments(&self) -> Result<Vec<RawFragment>, SourceError> {
        let body = self.fetcher.get_text(&self.url()).await?;
        Ok(parse_featured(&body, &self.store_base)?)
    }
}

/// Unstructured source: one HTML listing page scanned with a container rule.
pub struct HtmlListingSource {
    fetcher: Arc<HttpFetcher>,
    label: String,
    url: String,
    store_base: String,
    layout: ListingLayout,
}

impl HtmlListingSource {
    pub fn new(
        fetcher: Arc<HttpFetcher>,
        label: &str,
        url: String,
        store_base: &str,
        layout: ListingLayout,
    ) -> Self {
        Self {
            fetcher,
            label: label.to_string(),
            url,
            store_base: store_base.trim_end_matches('/').to_string(),
            layout,
        }
    }

    /// The "specials" listing.
    pub fn daily_deals(fetcher: Arc<HttpFetcher>, store_base: &str) -> Self {
        let base = store_base.trim_end_matches('/');
        Self::new(
            fetcher,
            DAILY_DEALS_LABEL,
            format!("{base}/specials"),
            base,
            ListingLayout {
                rule: ContainerRule::new(&["div"], &["game", "item", "discount", "special"]),
                max_candidates: 10,
                name_strategy: NameStrategy::LinkOrLines,
            },
        )
    }

    /// Search results filtered to discounted titles, most reviewed first.
    pub fn popular_deals(fetcher: Arc<HttpFetcher>, store_base: &str) -> Self {
        let base = store_base.trim_end_matches('/');
        Self::new(
            fetcher,
            POPULAR_DEALS_LABEL,
            format!("{base}/search/?sort_by=Reviews_DESC&specials=1&page=1"),
            base,
            ListingLayout {
                rule: ContainerRule::new(&["div", "a"], &["search_result", "result"]),
                max_candidates: 5,
                name_strategy: NameStrategy::LinkOnly,
            },
        )
    }
}

#[async_trait::async_trait]
impl Source for HtmlListingSource {
    fn label(&self) -> &str {
        &self.label
    }

    async fn fetch_fragments(&self) -> Result<Vec<RawFragment>, SourceError> {
        let html = self.fetcher.get_text(&self.url).await?;
        Ok(parse_listing(&html, &self.layout, &self.store_base)?)
    }
}

/// Default adapters in priority order: API, daily deals, popular deals.
pub fn default_sources(fetcher: Arc<HttpFetcher>, cfg: &PipelineConfig) -> Vec<Box<dyn Source>> {
    vec![
        Box::new(FeaturedApiSource::new(
            fetcher.clone(),
            &cfg.store_base_url,
            &cfg.country_code,
        )),
        Box::new(HtmlListingSource::daily_deals(fetcher.clone(), &cfg.store_base_url)),
        Box::new(HtmlListingSource::popular_deals(fetcher, &cfg.store_base_url)),
    ]
}
