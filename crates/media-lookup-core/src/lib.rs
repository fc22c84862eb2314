pub mod local_index;
pub mod normalize;
pub mod reconcile;
pub mod ordering;
pub mod filmography;
pub mod person;
pub mod listing;

pub use local_index::{build_items, build_library, fetch_local_library};
pub use normalize::{movie_record, movie_title, show_record, show_title, year_from_date};
pub use reconcile::{reconcile, ReconcileSession};
pub use ordering::{sort_by_date_key, ASCENDING_SENTINEL, DESCENDING_SENTINEL};
pub use filmography::{Credit, CreditListing, Filmography, FilmographyList};
pub use person::{calc_age, fallback_text, PersonSummary, FALLBACK_LANGUAGE};
pub use listing::{
    certification, format_currency, image_url, join_names, studio_logos, CastEntry, CollectionInfo, EpisodeInfo,
    ListingEntry, SeasonEntry, StudioLogo, VideoEntry,
};
