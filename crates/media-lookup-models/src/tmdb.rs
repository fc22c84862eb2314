//! TMDb payload types
//!
//! The same struct is used for search hits, credit entries and full details;
//! fields the endpoint doesn't send stay `None`/empty. Credit-only fields
//! (`character`, `job`, `department`) live on the movie/show itself because
//! that is how TMDb flattens `movie_credits` and `tv_credits`.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct NamedItem {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Company {
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub logo_path: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Collection {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CastMember {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub character: Option<String>,
    #[serde(default)]
    pub profile_path: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CrewMember {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub job: String,
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub profile_path: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Credits {
    #[serde(default)]
    pub cast: Vec<CastMember>,
    #[serde(default)]
    pub crew: Vec<CrewMember>,
}

/// `{"results": [...]}` wrapper used by search and several appended blocks
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Results<T> {
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
}

impl<T> Default for Results<T> {
    fn default() -> Self {
        Self { results: Vec::new() }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ReleaseDate {
    #[serde(default)]
    pub certification: String,
    #[serde(default)]
    pub release_date: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ReleaseDateCountry {
    pub iso_3166_1: String,
    #[serde(default)]
    pub release_dates: Vec<ReleaseDate>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ContentRating {
    pub iso_3166_1: String,
    #[serde(default)]
    pub rating: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TranslationData {
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub biography: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Translation {
    #[serde(default)]
    pub iso_639_1: String,
    #[serde(default)]
    pub data: TranslationData,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Translations {
    #[serde(default)]
    pub translations: Vec<Translation>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ExternalIds {
    #[serde(default)]
    pub imdb_id: Option<String>,
    #[serde(default)]
    pub tvdb_id: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Episode {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub episode_number: Option<u32>,
    #[serde(default)]
    pub season_number: Option<u32>,
    #[serde(default)]
    pub air_date: Option<String>,
    #[serde(default)]
    pub still_path: Option<String>,
}

/// One season, either the summary inside a show or the full `/season/{n}` document
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Season {
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub air_date: Option<String>,
    #[serde(default)]
    pub season_number: u32,
    #[serde(default)]
    pub poster_path: Option<String>,
    /// Only present in the summary inside a show
    #[serde(default)]
    pub episode_count: Option<u32>,
    /// Only present in the full season document
    #[serde(default)]
    pub episodes: Vec<Episode>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Video {
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub site: String,
    #[serde(default, rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TmdbMovie {
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub original_title: Option<String>,
    #[serde(default)]
    pub imdb_id: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub runtime: Option<u32>,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub vote_count: Option<u64>,
    #[serde(default)]
    pub tagline: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub homepage: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub budget: Option<u64>,
    #[serde(default)]
    pub revenue: Option<u64>,
    #[serde(default)]
    pub genres: Vec<NamedItem>,
    #[serde(default)]
    pub genre_ids: Vec<u32>,
    #[serde(default)]
    pub production_countries: Vec<NamedItem>,
    #[serde(default)]
    pub production_companies: Vec<Company>,
    #[serde(default)]
    pub belongs_to_collection: Option<Collection>,
    #[serde(default)]
    pub credits: Option<Credits>,
    #[serde(default)]
    pub release_dates: Option<Results<ReleaseDateCountry>>,
    #[serde(default)]
    pub translations: Option<Translations>,
    #[serde(default)]
    pub character: Option<String>,
    #[serde(default)]
    pub job: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TmdbShow {
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub original_name: Option<String>,
    #[serde(default)]
    pub first_air_date: Option<String>,
    #[serde(default)]
    pub external_ids: Option<ExternalIds>,
    #[serde(default)]
    pub next_episode_to_air: Option<Episode>,
    #[serde(default)]
    pub last_episode_to_air: Option<Episode>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub vote_count: Option<u64>,
    #[serde(default)]
    pub number_of_seasons: Option<u32>,
    #[serde(default)]
    pub number_of_episodes: Option<u32>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub homepage: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub genres: Vec<NamedItem>,
    #[serde(default)]
    pub genre_ids: Vec<u32>,
    #[serde(default)]
    pub seasons: Vec<Season>,
    #[serde(default)]
    pub networks: Vec<Company>,
    #[serde(default)]
    pub production_companies: Vec<Company>,
    #[serde(default)]
    pub created_by: Vec<NamedItem>,
    #[serde(default)]
    pub credits: Option<Credits>,
    #[serde(default)]
    pub content_ratings: Option<Results<ContentRating>>,
    #[serde(default)]
    pub translations: Option<Translations>,
    #[serde(default)]
    pub character: Option<String>,
    #[serde(default)]
    pub job: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PersonCredits<T> {
    #[serde(default = "Vec::new")]
    pub cast: Vec<T>,
    #[serde(default = "Vec::new")]
    pub crew: Vec<T>,
}

impl<T> Default for PersonCredits<T> {
    fn default() -> Self {
        Self { cast: Vec::new(), crew: Vec::new() }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ProfileImage {
    pub file_path: Option<String>,
    #[serde(default)]
    pub width: u32,
    #[serde(default)]
    pub height: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PersonImages {
    #[serde(default)]
    pub profiles: Vec<ProfileImage>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TmdbPerson {
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub gender: Option<u8>,
    #[serde(default)]
    pub birthday: Option<String>,
    #[serde(default)]
    pub deathday: Option<String>,
    #[serde(default)]
    pub biography: Option<String>,
    #[serde(default)]
    pub place_of_birth: Option<String>,
    #[serde(default)]
    pub known_for_department: Option<String>,
    #[serde(default)]
    pub profile_path: Option<String>,
    #[serde(default)]
    pub translations: Option<Translations>,
    #[serde(default)]
    pub movie_credits: PersonCredits<TmdbMovie>,
    #[serde(default)]
    pub tv_credits: PersonCredits<TmdbShow>,
    #[serde(default)]
    pub images: PersonImages,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Female,
    Male,
}

impl Gender {
    /// TMDb encodes 1 = female, 2 = male, 0/3 = unspecified or non-binary
    pub fn from_tmdb(code: Option<u8>) -> Option<Self> {
        match code {
            Some(1) => Some(Gender::Female),
            Some(2) => Some(Gender::Male),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_movie_credit_deserializes_with_nulls() {
        let json = r#"{
            "id": 438631,
            "title": "Dune",
            "original_title": "Dune",
            "release_date": null,
            "character": "Paul Atreides",
            "genre_ids": [878, 12],
            "poster_path": null
        }"#;
        let movie: TmdbMovie = serde_json::from_str(json).unwrap();
        assert_eq!(movie.id, 438631);
        assert_eq!(movie.release_date, None);
        assert_eq!(movie.genre_ids, vec![878, 12]);
        assert_eq!(movie.character.as_deref(), Some("Paul Atreides"));
    }

    #[test]
    fn test_person_without_appended_blocks() {
        let person: TmdbPerson = serde_json::from_str(r#"{"id": 1, "name": "Someone", "gender": 1}"#).unwrap();
        assert!(person.movie_credits.cast.is_empty());
        assert!(person.images.profiles.is_empty());
        assert_eq!(Gender::from_tmdb(person.gender), Some(Gender::Female));
    }

    #[test]
    fn test_season_and_video_payloads() {
        let json = r#"{
            "id": 3624,
            "air_date": "2011-04-17",
            "name": "Season 1",
            "season_number": 1,
            "poster_path": null,
            "episodes": [{"name": "Winter Is Coming", "episode_number": 1, "season_number": 1}]
        }"#;
        let season: Season = serde_json::from_str(json).unwrap();
        assert_eq!(season.season_number, 1);
        assert_eq!(season.episodes.len(), 1);
        assert_eq!(season.episode_count, None);

        let video: Video = serde_json::from_str(r#"{"key": "n9xhJrPXop4", "name": "Trailer", "site": "YouTube", "type": "Trailer"}"#).unwrap();
        assert_eq!(video.kind, "Trailer");
    }
}
