// Local-match reconciliation of remote records against the local index

use crate::normalize::{movie_record, show_record};
use media_lookup_models::{
    FilterOptions, LocalLibrary, LocalMediaItem, MatchResult, MediaKind, RemoteRecord, TmdbMovie, TmdbShow,
};
use tracing::debug;

/// Largest release-year drift accepted when both titles agree
const MAX_YEAR_DRIFT: i32 = 2;

/// Find the local item a remote record corresponds to
///
/// First match wins, in index order:
/// 1. identical external id (checked across the whole index first)
/// 2. same year and one of: original titles equal, local title equals the
///    remote original title, titles equal
/// 3. year off by one or two and both title and original title equal
///
/// Missing years never match rules 2 and 3. Never fails; an empty index
/// simply yields an unmatched result.
pub fn reconcile(remote: &RemoteRecord, index: &[LocalMediaItem]) -> MatchResult {
    match find_match(remote, index) {
        Some(item) => {
            debug!(title = %remote.title, local_id = item.local_id, "Matched local item");
            MatchResult::from_local(item)
        }
        None => MatchResult::unmatched(),
    }
}

fn find_match<'a>(remote: &RemoteRecord, index: &'a [LocalMediaItem]) -> Option<&'a LocalMediaItem> {
    if let Some(external_id) = remote.external_id.as_deref().filter(|id| !id.is_empty()) {
        if let Some(item) = index.iter().find(|item| item.external_id.as_deref() == Some(external_id)) {
            return Some(item);
        }
    }

    let remote_year = remote.year?;
    index.iter().find(|item| {
        let Some(local_year) = item.year else {
            return false;
        };
        let drift = (local_year - remote_year).abs();

        if drift == 0 {
            same_title(&item.original_title, &remote.original_title)
                || same_title(&item.title, &remote.original_title)
                || same_title(&item.title, &remote.title)
        } else if drift <= MAX_YEAR_DRIFT {
            same_title(&item.title, &remote.title) && same_title(&item.original_title, &remote.original_title)
        } else {
            false
        }
    })
}

/// Exact, case-sensitive comparison
fn same_title(local: &str, remote: &str) -> bool {
    local == remote
}

/// Local library snapshot plus listing filters for one session
#[derive(Debug, Clone, Default)]
pub struct ReconcileSession {
    library: LocalLibrary,
    filters: FilterOptions,
}

impl ReconcileSession {
    pub fn new(library: LocalLibrary, filters: FilterOptions) -> Self {
        Self { library, filters }
    }

    pub fn library(&self) -> &LocalLibrary {
        &self.library
    }

    pub fn filters(&self) -> &FilterOptions {
        &self.filters
    }

    pub fn match_record(&self, kind: MediaKind, remote: &RemoteRecord) -> MatchResult {
        reconcile(remote, self.library.items(kind))
    }

    pub fn match_movie(&self, movie: &TmdbMovie) -> MatchResult {
        self.match_record(MediaKind::Movie, &movie_record(movie))
    }

    pub fn match_show(&self, show: &TmdbShow) -> MatchResult {
        self.match_record(MediaKind::Show, &show_record(show))
    }
}
