pub mod media;
pub mod local;
pub mod remote;
pub mod options;
pub mod ratings;
pub mod tmdb;

pub use media::MediaKind;
pub use local::{LocalLibrary, LocalMediaItem, RawLibraryRow, NO_LOCAL_MATCH};
pub use remote::{MatchResult, RemoteRecord};
pub use options::{FilterOptions, default_shows_blacklist};
pub use ratings::ExternalRatings;
pub use tmdb::{
    CastMember, Collection, Company, ContentRating, Credits, CrewMember, Episode, ExternalIds, Gender,
    NamedItem, PersonCredits, PersonImages, ProfileImage, ReleaseDate, ReleaseDateCountry,
    Results, Season, TmdbMovie, TmdbPerson, TmdbShow, Translation, TranslationData, Translations, Video,
};
