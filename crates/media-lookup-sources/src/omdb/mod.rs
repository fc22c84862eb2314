pub mod client;

pub use client::{parse_ratings, OmdbClient, OMDB_URL};
