pub mod fetcher;
pub mod sources;
pub mod traits;

pub use fetcher::HttpFetcher;
pub use sources::{FeaturedApiSource, HtmlListingSource, default_sources};
pub use traits::Source;
