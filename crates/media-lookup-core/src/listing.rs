// Display entries for movies and shows

use crate::normalize::{movie_title, show_title, year_from_date};
use crate::person::fallback_text;
use media_lookup_models::{
    CastMember, Collection, Company, ContentRating, Credits, Episode, ExternalRatings, MatchResult, MediaKind,
    NamedItem, ReleaseDateCountry, Results, Season, TmdbMovie, TmdbShow, Video,
};
use media_lookup_sources::tmdb::IMAGE_PATH;
use serde::Serialize;

const SEPARATOR: &str = " / ";
const YOUTUBE_THUMB: &str = "https://img.youtube.com/vi";
const YOUTUBE_WATCH: &str = "https://www.youtube.com/watch?v=";

/// Full-size TMDb image URL for a relative path
pub fn image_url(path: Option<&str>) -> Option<String> {
    path.filter(|p| !p.is_empty()).map(|p| format!("{}{}", IMAGE_PATH, p))
}

/// `1234567` -> `"1,234,567"`; zero or unknown amounts are blank
pub fn format_currency(amount: Option<u64>) -> String {
    let Some(amount) = amount.filter(|a| *a >= 1) else {
        return String::new();
    };

    let digits = amount.to_string();
    let mut formatted = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            formatted.push(',');
        }
        formatted.push(c);
    }
    formatted
}

pub fn join_names<'a, I>(names: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    names
        .into_iter()
        .filter(|n| !n.is_empty())
        .collect::<Vec<_>>()
        .join(SEPARATOR)
}

fn cert_prefix(country: &str) -> &'static str {
    if country == "DE" {
        "FSK "
    } else {
        ""
    }
}

/// Certification of a movie or show for one country
pub fn certification(
    content_ratings: Option<&Results<ContentRating>>,
    release_dates: Option<&Results<ReleaseDateCountry>>,
    country: &str,
) -> Option<String> {
    let prefix = cert_prefix(country);

    if let Some(ratings) = content_ratings.filter(|r| !r.results.is_empty()) {
        return ratings
            .results
            .iter()
            .find(|r| r.iso_3166_1 == country)
            .map(|r| format!("{}{}", prefix, r.rating));
    }

    release_dates?
        .results
        .iter()
        .find(|r| r.iso_3166_1 == country)
        .and_then(|r| r.release_dates.first())
        .map(|r| format!("{}{}", prefix, r.certification))
}

fn named(items: &[NamedItem]) -> String {
    join_names(items.iter().map(|i| i.name.as_str()))
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct EpisodeInfo {
    pub name: String,
    pub overview: Option<String>,
    pub season: Option<u32>,
    pub episode: Option<u32>,
    pub air_date: Option<String>,
    pub thumb: Option<String>,
}

impl From<&Episode> for EpisodeInfo {
    fn from(episode: &Episode) -> Self {
        Self {
            name: episode.name.clone(),
            overview: episode.overview.clone(),
            season: episode.season_number,
            episode: episode.episode_number,
            air_date: episode.air_date.clone(),
            thumb: image_url(episode.still_path.as_deref()),
        }
    }
}

/// Cast member of a movie or show
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CastEntry {
    pub id: u64,
    pub name: String,
    pub role: Option<String>,
    pub thumb: Option<String>,
}

impl From<&CastMember> for CastEntry {
    fn from(member: &CastMember) -> Self {
        Self {
            id: member.id,
            name: member.name.clone(),
            role: member.character.clone().filter(|c| !c.is_empty()),
            thumb: image_url(member.profile_path.as_deref()),
        }
    }
}

fn cast_list(credits: Option<&Credits>) -> Vec<CastEntry> {
    credits.map(|c| c.cast.iter().map(CastEntry::from).collect()).unwrap_or_default()
}

/// Studio or network that has a logo on TMDb
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct StudioLogo {
    pub name: String,
    pub icon: String,
}

/// Companies without a logo are left out
pub fn studio_logos(companies: &[Company]) -> Vec<StudioLogo> {
    companies
        .iter()
        .filter_map(|company| {
            let icon = image_url(company.logo_path.as_deref())?;
            Some(StudioLogo { name: company.name.clone(), icon })
        })
        .collect()
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CollectionInfo {
    pub id: u64,
    pub name: String,
    pub poster: Option<String>,
    pub fanart: Option<String>,
}

impl From<&Collection> for CollectionInfo {
    fn from(collection: &Collection) -> Self {
        Self {
            id: collection.id,
            name: collection.name.clone(),
            poster: image_url(collection.poster_path.as_deref()),
            fanart: image_url(collection.backdrop_path.as_deref()),
        }
    }
}

/// YouTube video of a movie or show
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct VideoEntry {
    pub key: String,
    pub name: String,
    pub kind: String,
    pub thumb: String,
    pub url: String,
}

impl From<&Video> for VideoEntry {
    fn from(video: &Video) -> Self {
        Self {
            key: video.key.clone(),
            name: video.name.clone(),
            kind: video.kind.clone(),
            thumb: format!("{}/{}/0.jpg", YOUTUBE_THUMB, video.key),
            url: format!("{}{}", YOUTUBE_WATCH, video.key),
        }
    }
}

/// Flattened view of one movie or show with its local state
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ListingEntry {
    pub kind: MediaKind,
    pub tmdb_id: u64,
    pub label: String,
    pub original_title: String,
    pub year: Option<i32>,
    pub premiered: Option<String>,
    pub imdb_id: Option<String>,
    pub tvdb_id: Option<u64>,
    pub rating: Option<f64>,
    pub votes: Option<u64>,
    pub certification: Option<String>,
    pub tagline: Option<String>,
    pub status: Option<String>,
    /// Runtime in seconds
    pub duration: Option<u32>,
    pub plot: String,
    pub genre: String,
    pub studio: String,
    pub country: String,
    pub director: String,
    pub writer: String,
    pub role: Option<String>,
    pub budget: String,
    pub revenue: String,
    pub homepage: Option<String>,
    pub poster: Option<String>,
    pub fanart: Option<String>,
    pub collection: Option<CollectionInfo>,
    pub studio_logos: Vec<StudioLogo>,
    pub network_logos: Vec<StudioLogo>,
    pub cast: Vec<CastEntry>,
    pub seasons: Option<u32>,
    pub episodes: Option<u32>,
    pub last_episode: Option<EpisodeInfo>,
    pub next_episode: Option<EpisodeInfo>,
    pub local: MatchResult,
    pub ratings: Option<ExternalRatings>,
}

impl ListingEntry {
    pub fn from_movie(movie: &TmdbMovie, local: MatchResult, country: &str) -> Self {
        let crew = movie.credits.as_ref().map(|c| c.crew.as_slice()).unwrap_or_default();

        Self {
            kind: MediaKind::Movie,
            tmdb_id: movie.id,
            label: movie_title(movie),
            original_title: movie.original_title.clone().unwrap_or_default(),
            year: movie.release_date.as_deref().and_then(year_from_date),
            premiered: movie.release_date.clone().filter(|d| !d.is_empty()),
            imdb_id: movie.imdb_id.clone().filter(|id| !id.is_empty()),
            tvdb_id: None,
            rating: movie.vote_average,
            votes: movie.vote_count,
            certification: certification(None, movie.release_dates.as_ref(), country),
            tagline: movie.tagline.clone().filter(|t| !t.is_empty()),
            status: movie.status.clone(),
            duration: movie.runtime.filter(|r| *r > 0).and_then(|r| r.checked_mul(60)),
            plot: fallback_text(movie.overview.as_deref(), movie.translations.as_ref(), |d| d.overview.as_deref()),
            genre: named(&movie.genres),
            studio: join_names(movie.production_companies.iter().map(|c| c.name.as_str())),
            country: named(&movie.production_countries),
            director: join_names(crew.iter().filter(|c| c.job == "Director").map(|c| c.name.as_str())),
            writer: join_names(crew.iter().filter(|c| c.department == "Writing").map(|c| c.name.as_str())),
            role: movie.character.clone().filter(|c| !c.is_empty()),
            budget: format_currency(movie.budget),
            revenue: format_currency(movie.revenue),
            homepage: movie.homepage.clone().filter(|h| !h.is_empty()),
            poster: image_url(movie.poster_path.as_deref()),
            fanart: image_url(movie.backdrop_path.as_deref()),
            collection: movie.belongs_to_collection.as_ref().map(CollectionInfo::from),
            studio_logos: studio_logos(&movie.production_companies),
            network_logos: Vec::new(),
            cast: cast_list(movie.credits.as_ref()),
            seasons: None,
            episodes: None,
            last_episode: None,
            next_episode: None,
            local,
            ratings: None,
        }
    }

    pub fn from_show(show: &TmdbShow, local: MatchResult, country: &str) -> Self {
        let external_ids = show.external_ids.as_ref();

        Self {
            kind: MediaKind::Show,
            tmdb_id: show.id,
            label: show_title(show),
            original_title: show.original_name.clone().unwrap_or_default(),
            year: show.first_air_date.as_deref().and_then(year_from_date),
            premiered: show.first_air_date.clone().filter(|d| !d.is_empty()),
            imdb_id: external_ids.and_then(|ids| ids.imdb_id.clone()).filter(|id| !id.is_empty()),
            tvdb_id: external_ids.and_then(|ids| ids.tvdb_id),
            rating: show.vote_average,
            votes: show.vote_count,
            certification: certification(show.content_ratings.as_ref(), None, country),
            tagline: None,
            status: show.status.clone(),
            duration: None,
            plot: fallback_text(show.overview.as_deref(), show.translations.as_ref(), |d| d.overview.as_deref()),
            genre: named(&show.genres),
            studio: join_names(show.networks.iter().map(|n| n.name.as_str())),
            country: String::new(),
            director: named(&show.created_by),
            writer: String::new(),
            role: show.character.clone().filter(|c| !c.is_empty()),
            budget: String::new(),
            revenue: String::new(),
            homepage: show.homepage.clone().filter(|h| !h.is_empty()),
            poster: image_url(show.poster_path.as_deref()),
            fanart: image_url(show.backdrop_path.as_deref()),
            collection: None,
            studio_logos: studio_logos(&show.production_companies),
            network_logos: studio_logos(&show.networks),
            cast: cast_list(show.credits.as_ref()),
            seasons: show.number_of_seasons,
            episodes: show.number_of_episodes,
            last_episode: show.last_episode_to_air.as_ref().map(EpisodeInfo::from),
            next_episode: show.next_episode_to_air.as_ref().map(EpisodeInfo::from),
            local,
            ratings: None,
        }
    }

    pub fn with_ratings(mut self, ratings: ExternalRatings) -> Self {
        if !ratings.is_empty() {
            self.ratings = Some(ratings);
        }
        self
    }

    pub fn is_local(&self) -> bool {
        self.local.is_local()
    }
}

/// One season of a show, labelled with the show's title
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SeasonEntry {
    pub tmdb_id: u64,
    pub label: String,
    pub title: String,
    pub season: u32,
    pub premiered: Option<String>,
    pub episode_count: usize,
    pub plot: String,
    pub genre: String,
    pub rating: Option<f64>,
    pub votes: Option<u64>,
    pub certification: Option<String>,
    pub imdb_id: Option<String>,
    pub poster: Option<String>,
    pub fanart: Option<String>,
    pub studio_logos: Vec<StudioLogo>,
    pub network_logos: Vec<StudioLogo>,
    pub episodes: Vec<EpisodeInfo>,
}

impl SeasonEntry {
    /// `show` supplies everything the season document lacks
    pub fn from_season(season: &Season, show: &TmdbShow, country: &str) -> Self {
        let episode_count = if season.episodes.is_empty() {
            season.episode_count.unwrap_or(0) as usize
        } else {
            season.episodes.len()
        };

        Self {
            tmdb_id: show.id,
            label: show_title(show),
            title: season.name.clone(),
            season: season.season_number,
            premiered: season.air_date.clone().filter(|d| !d.is_empty()),
            episode_count,
            plot: season.overview.clone().unwrap_or_default(),
            genre: named(&show.genres),
            rating: show.vote_average,
            votes: show.vote_count,
            certification: certification(show.content_ratings.as_ref(), None, country),
            imdb_id: show.external_ids.as_ref().and_then(|ids| ids.imdb_id.clone()).filter(|id| !id.is_empty()),
            poster: image_url(season.poster_path.as_deref()).or_else(|| image_url(show.poster_path.as_deref())),
            fanart: image_url(show.backdrop_path.as_deref()),
            studio_logos: studio_logos(&show.production_companies),
            network_logos: studio_logos(&show.networks),
            episodes: season.episodes.iter().map(EpisodeInfo::from).collect(),
        }
    }
}
