pub mod api;
pub mod client;

pub use api::{external_source, FindResults};
pub use client::{TmdbClient, TmdbQuery, API_URL, IMAGE_PATH};
