use async_trait::async_trait;
use media_lookup_models::{MediaKind, RawLibraryRow};
use crate::error::SourceError;

/// Read-only access to the host's local media library
///
/// Implementations return rows in the host's order (newest year first for Kodi).
/// The caller snapshots the result once per session.
#[async_trait]
pub trait LibrarySource: Send + Sync {
    fn source_name(&self) -> &str;

    async fn query(&self, kind: MediaKind, properties: &[&str]) -> Result<Vec<RawLibraryRow>, SourceError>;
}

/// Properties needed to reconcile remote records against each table
pub fn library_properties(kind: MediaKind) -> &'static [&'static str] {
    match kind {
        MediaKind::Movie => &["title", "originaltitle", "year", "imdbnumber", "playcount", "file"],
        MediaKind::Show => &["title", "originaltitle", "year", "imdbnumber", "playcount", "episode", "watchedepisodes"],
    }
}
