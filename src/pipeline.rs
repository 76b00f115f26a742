//! Orchestrates one discovery run: fetch from every source, aggregate, select.
//!
//! The run never fails. Broken sources contribute nothing, and a run where
//! every source came back empty substitutes the synthetic fallback catalog,
//! marked by [`DealOrigin::Fallback`] and by each deal's source label.

use crate::catalog::fallback_deals;
use crate::config::PipelineConfig;
use crate::enricher::DescriptionEnricher;
use crate::formatter::{format_best, format_digest};
use crate::model::{Deal, FetchError};
use crate::normalizer::{merge, normalize};
use crate::ranker::{rank, top};
use crate::scraper::{HttpFetcher, Source, default_sources};
use crate::utils::search_url;
use futures::future::join_all;
use serde::Serialize;
use std::sync::Arc;
use tokio::time::{Instant, timeout_at};
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DealOrigin {
    Live,
    Fallback,
}

/// Ranked, deduplicated result of a run. Never empty.
#[derive(Debug, Clone, Serialize)]
pub struct DealSet {
    origin: DealOrigin,
    deals: Vec<Deal>,
}

impl DealSet {
    pub fn deals(&self) -> &[Deal] {
        &self.deals
    }

    pub fn into_deals(self) -> Vec<Deal> {
        self.deals
    }

    pub fn origin(&self) -> DealOrigin {
        self.origin
    }

    pub fn is_fallback(&self) -> bool {
        self.origin == DealOrigin::Fallback
    }

    pub fn best(&self) -> Option<&Deal> {
        self.deals.first()
    }

    pub fn top(&self, n: usize) -> &[Deal] {
        top(&self.deals, n)
    }
}

pub struct DealPipeline {
    sources: Vec<Box<dyn Source>>,
    enricher: Option<DescriptionEnricher>,
    config: PipelineConfig,
}

impl DealPipeline {
    /// Builds the shared fetcher and the default sources.
    pub fn from_config(config: PipelineConfig) -> Result<Self, FetchError> {
        let fetcher = Arc::new(HttpFetcher::new(
            &config.user_agent,
            config.request_timeout(),
        )?);
        let sources = default_sources(fetcher.clone(), &config);
        let enricher = config
            .enrich_descriptions
            .then(|| DescriptionEnricher::new(fetcher, &config.store_base_url));

        Ok(Self {
            sources,
            enricher,
            config,
        })
    }

    /// Pipeline over caller-supplied sources, without description lookup.
    pub fn with_sources(sources: Vec<Box<dyn Source>>, config: PipelineConfig) -> Self {
        Self {
            sources,
            enricher: None,
            config,
        }
    }

    pub fn with_enricher(mut self, enricher: DescriptionEnricher) -> Self {
        self.enricher = Some(enricher);
        self
    }

    /// Fetch → aggregate → rank.
    pub async fn run(&self) -> DealSet {
        let deadline = Instant::now() + self.config.deadline();
        info!("Fetching deals from {} sources...", self.sources.len());

        let fetches = self.sources.iter().map(|source| async move {
            let limit = (Instant::now() + self.config.source_timeout()).min(deadline);
            match timeout_at(limit, source.fetch()).await {
                Ok(fragments) => normalize(fragments, source.label()),
                Err(_) => {
                    warn!("[{}] abandoned: still running at its deadline", source.label());
                    Vec::new()
                }
            }
        });
        let per_source = join_all(fetches).await;

        let mut merged = merge(per_source.into_iter().flatten().collect());
        let store_base = &self.config.store_base_url;
        for deal in merged.iter_mut().filter(|d| d.source_url.is_none()) {
            deal.source_url = Some(search_url(store_base, &deal.name));
        }
        info!("Aggregated {} unique deals", merged.len());

        if merged.is_empty() {
            warn!("No source produced deals, using fallback catalog");
            return DealSet {
                origin: DealOrigin::Fallback,
                deals: fallback_deals(&self.config.store_base_url),
            };
        }

        DealSet {
            origin: DealOrigin::Live,
            deals: rank(merged),
        }
    }

    /// The `n` best deals, with descriptions looked up for the first
    /// `enrich_limit` of them when enrichment is enabled.
    pub async fn top_deals(&self, n: usize) -> DealSet {
        let mut set = self.run().await;
        set.deals.truncate(n.max(1));

        if let Some(enricher) = &self.enricher {
            if !set.is_fallback() {
                let count = self.config.enrich_limit.min(set.deals.len());
                let deadline = Instant::now() + self.config.source_timeout();
                info!("Looking up descriptions for {} deals...", count);
                enricher.enrich_all(&mut set.deals[..count], deadline).await;
            }
        }
        set
    }

    pub async fn best_deal(&self) -> Option<Deal> {
        self.top_deals(1).await.into_deals().into_iter().next()
    }

    pub async fn best_deal_message(&self) -> String {
        format_best(self.top_deals(1).await.deals())
    }

    pub async fn digest_message(&self, max_count: usize) -> String {
        format_digest(self.run().await.deals(), max_count)
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }
}
