// Description lookup for the deals that are about to be shown
use crate::model::{Deal, FetchError};
use crate::parser::extract::{DEFAULT_DESCRIPTION_LEN, truncate_description};
use crate::parser::{find_app_link, parse_store_description};
use crate::scraper::HttpFetcher;
use crate::utils::search_url;
use futures::future::join_all;
use std::sync::Arc;
use tokio::time::{Instant, timeout_at};
use tracing::{debug, info, warn};

struct StorePage {
    url: String,
    description: Option<String>,
}

/// Fills in missing descriptions (and canonical store links) from game pages.
pub struct DescriptionEnricher {
    fetcher: Arc<HttpFetcher>,
    store_base: String,
}

impl DescriptionEnricher {
    pub fn new(fetcher: Arc<HttpFetcher>, store_base: &str) -> Self {
        Self {
            fetcher,
            store_base: store_base.trim_end_matches('/').to_string(),
        }
    }

    /// Enriches every deal concurrently; lookups still running at `deadline`
    /// are abandoned and leave their deal untouched.
    pub async fn enrich_all(&self, deals: &mut [Deal], deadline: Instant) {
        let lookups = deals.iter_mut().map(|deal| async move {
            let name = deal.name.clone();
            if timeout_at(deadline, self.enrich(deal)).await.is_err() {
                warn!("Description lookup for '{}' timed out", name);
            }
        });
        join_all(lookups).await;
    }

    /// Looks up one deal. Deals that already carry a description and
    /// synthetic deals are left alone; failures keep the deal as it was.
    pub async fn enrich(&self, deal: &mut Deal) {
        if deal.description.is_some() || deal.is_synthetic() {
            return;
        }

        match self.lookup(deal).await {
            Ok(Some(page)) => {
                info!("📄 Found store page for '{}'", deal.name);
                deal.source_url = Some(page.url);
                deal.description = page
                    .description
                    .map(|d| truncate_description(&d, DEFAULT_DESCRIPTION_LEN))
                    .filter(|d| !d.is_empty());
            }
            Ok(None) => debug!("No store page found for '{}'", deal.name),
            Err(e) => warn!("Description lookup for '{}' failed: {}", deal.name, e),
        }
    }

    async fn lookup(&self, deal: &Deal) -> Result<Option<StorePage>, FetchError> {
        let known_page = deal
            .source_url
            .as_deref()
            .filter(|url| url.contains("/app/"))
            .map(str::to_string);

        let url = match known_page {
            Some(url) => url,
            None => {
                let results = self
                    .fetcher
                    .get_text(&search_url(&self.store_base, &deal.name))
                    .await?;
                match find_app_link(&results, &self.store_base) {
                    Some(url) => url,
                    None => return Ok(None),
                }
            }
        };

        let html = self.fetcher.get_text(&url).await?;
        Ok(Some(StorePage {
            description: parse_store_description(&html),
            url,
        }))
    }
}
