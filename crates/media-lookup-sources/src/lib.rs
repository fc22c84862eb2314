pub mod traits;
pub mod error;
pub mod tmdb;
pub mod omdb;
pub mod kodi;

pub use traits::{LibrarySource, library_properties};
pub use error::SourceError;
pub use tmdb::{TmdbClient, TmdbQuery};
pub use omdb::OmdbClient;
pub use kodi::KodiJsonRpc;
