//! Finds discounted games across storefront sources, ranks them, and renders
//! them as short social-media messages.

pub mod catalog;
pub mod config;
pub mod enricher;
pub mod formatter;
pub mod model;
pub mod normalizer;
pub mod notifier;
pub mod parser;
pub mod pipeline;
pub mod ranker;
pub mod scraper;
pub mod utils;

pub use config::{AppConfig, PipelineConfig};
pub use model::{Deal, RawFragment};
pub use pipeline::{DealOrigin, DealPipeline, DealSet};
