// Parsing of raw source content into deal fragments
pub mod extract;
pub mod featured_api;
pub mod listing;
pub mod store_page;

pub use featured_api::parse_featured;
pub use listing::{ContainerRule, ListingLayout, NameStrategy, parse_listing};
pub use store_page::{find_app_link, parse_store_description};
