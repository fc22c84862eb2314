// Person filmography lists with local matches

use crate::ordering::{sort_by_date_key, ASCENDING_SENTINEL, DESCENDING_SENTINEL};
use crate::reconcile::ReconcileSession;
use chrono::NaiveDate;
use media_lookup_models::{FilterOptions, MatchResult, MediaKind, TmdbMovie, TmdbPerson, TmdbShow};
use serde::Serialize;
use std::collections::HashSet;
use tracing::debug;

const DOCUMENTARY_GENRE: u32 = 99;
const ACTING: &str = "Acting";

/// One credit of a person, movie or show
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "media_type", rename_all = "lowercase")]
pub enum Credit {
    Movie(TmdbMovie),
    Show(TmdbShow),
}

impl Credit {
    pub fn id(&self) -> u64 {
        match self {
            Credit::Movie(movie) => movie.id,
            Credit::Show(show) => show.id,
        }
    }

    pub fn kind(&self) -> MediaKind {
        match self {
            Credit::Movie(_) => MediaKind::Movie,
            Credit::Show(_) => MediaKind::Show,
        }
    }

    pub fn title(&self) -> String {
        match self {
            Credit::Movie(movie) => crate::normalize::movie_title(movie),
            Credit::Show(show) => crate::normalize::show_title(show),
        }
    }

    /// Release date for movies, first air date for shows
    pub fn date(&self) -> Option<&str> {
        match self {
            Credit::Movie(movie) => movie.release_date.as_deref(),
            Credit::Show(show) => show.first_air_date.as_deref(),
        }
    }

    fn date_mut(&mut self) -> &mut Option<String> {
        match self {
            Credit::Movie(movie) => &mut movie.release_date,
            Credit::Show(show) => &mut show.first_air_date,
        }
    }

    pub fn character(&self) -> Option<&str> {
        match self {
            Credit::Movie(movie) => movie.character.as_deref(),
            Credit::Show(show) => show.character.as_deref(),
        }
    }
}

/// A credit together with its local-library state
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CreditListing {
    pub credit: Credit,
    pub local: MatchResult,
    /// Crew job; `None` for cast credits
    pub job: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilmographyList {
    Movies,
    TvShows,
    MovieCrew,
    TvCrew,
    KnownFor,
    Combined,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Filmography {
    pub movies: Vec<CreditListing>,
    pub tv_shows: Vec<CreditListing>,
    pub movie_crew: Vec<CreditListing>,
    pub tv_crew: Vec<CreditListing>,
    pub known_for: Vec<CreditListing>,
    pub combined: Vec<CreditListing>,
    pub local_movie_count: usize,
    pub local_show_count: usize,
}

impl Filmography {
    /// Build every list for a person fetched with `movie_credits,tv_credits`
    ///
    /// `today` is the reference day of the upcoming-release filter.
    pub fn build(person: &TmdbPerson, session: &ReconcileSession, today: NaiveDate) -> Self {
        let filters = session.filters();
        let department = person.known_for_department.as_deref();

        let movies = movie_cast(&person.movie_credits.cast, session, filters, today);
        let tv_shows = show_list(&person.tv_credits.cast, session, filters, today, false);
        let movie_crew = movie_crew(&person.movie_credits.crew, session, filters, department);
        let tv_crew = show_list(&person.tv_credits.crew, session, filters, today, true);

        let known_for = if department == Some(ACTING) {
            movies.clone()
        } else {
            known_for_crew(&person.movie_credits.crew, session, department)
        };

        let combined = combine(&movies, &tv_shows);

        let local_movie_count = movies.iter().filter(|l| l.local.is_local()).count();
        let local_show_count = tv_shows.iter().filter(|l| l.local.is_local()).count();

        debug!(
            person = person.id,
            movies = movies.len(),
            tv_shows = tv_shows.len(),
            movie_crew = movie_crew.len(),
            tv_crew = tv_crew.len(),
            local_movie_count,
            local_show_count,
            "Built filmography"
        );

        Self {
            movies,
            tv_shows,
            movie_crew,
            tv_crew,
            known_for,
            combined,
            local_movie_count,
            local_show_count,
        }
    }

    pub fn local_total(&self) -> usize {
        self.local_movie_count + self.local_show_count
    }

    pub fn list(&self, list: FilmographyList) -> &[CreditListing] {
        match list {
            FilmographyList::Movies => &self.movies,
            FilmographyList::TvShows => &self.tv_shows,
            FilmographyList::MovieCrew => &self.movie_crew,
            FilmographyList::TvCrew => &self.tv_crew,
            FilmographyList::KnownFor => &self.known_for,
            FilmographyList::Combined => &self.combined,
        }
    }
}

/// Released more than `filter_day_delta` days after `today`
fn is_upcoming(date: Option<&str>, filters: &FilterOptions, today: NaiveDate) -> bool {
    let Some(date) = date.and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok()) else {
        return false;
    };
    (date - today).num_days() > filters.filter_day_delta
}

fn is_undated(date: Option<&str>) -> bool {
    match date {
        None => true,
        Some(d) => d.is_empty() || d == DESCENDING_SENTINEL || d == ASCENDING_SENTINEL,
    }
}

/// "Himself"/"herself" appearances in documentaries
fn is_self_documentary(movie: &TmdbMovie) -> bool {
    let Some(character) = movie.character.as_deref().filter(|c| !c.is_empty()) else {
        return false;
    };
    let character = character.to_lowercase();
    movie.genre_ids.contains(&DOCUMENTARY_GENRE) && (character.contains("himself") || character.contains("herself"))
}

fn is_blacklisted_show(show: &TmdbShow, filters: &FilterOptions) -> bool {
    show.genre_ids.is_empty() || show.genre_ids.iter().any(|g| filters.filter_shows_blacklist.contains(g))
}

fn movie_cast(credits: &[TmdbMovie], session: &ReconcileSession, filters: &FilterOptions, today: NaiveDate) -> Vec<CreditListing> {
    let sorted = sort_by_date_key(credits.to_vec(), |m| &mut m.release_date, true);
    let mut seen = HashSet::new();
    let mut listings = Vec::new();

    for movie in sorted {
        if filters.filter_movies_documentaries && is_self_documentary(&movie) {
            continue;
        }
        if filters.filter_upcoming && is_upcoming(movie.release_date.as_deref(), filters, today) {
            continue;
        }
        if !seen.insert(movie.id) {
            continue;
        }

        let local = session.match_movie(&movie);
        listings.push(CreditListing { credit: Credit::Movie(movie), local, job: None });
    }

    listings
}

fn movie_crew(
    credits: &[TmdbMovie],
    session: &ReconcileSession,
    filters: &FilterOptions,
    department: Option<&str>,
) -> Vec<CreditListing> {
    let sorted = sort_by_date_key(credits.to_vec(), |m| &mut m.release_date, true);
    let mut seen = HashSet::new();
    let mut listings = Vec::new();

    for movie in sorted {
        if filters.filter_movies_documentaries {
            if movie.job.as_deref() == Some("Thanks") {
                continue;
            }
            if department.is_some() && movie.department.as_deref() == department {
                continue;
            }
        }
        if filters.filter_upcoming && is_undated(movie.release_date.as_deref()) {
            continue;
        }
        if !seen.insert(movie.id) {
            continue;
        }

        let local = session.match_movie(&movie);
        let job = movie.job.clone();
        listings.push(CreditListing { credit: Credit::Movie(movie), local, job });
    }

    listings
}

/// Crew credits in the person's own department, for people not known for acting
fn known_for_crew(credits: &[TmdbMovie], session: &ReconcileSession, department: Option<&str>) -> Vec<CreditListing> {
    let Some(department) = department else {
        return Vec::new();
    };

    let sorted = sort_by_date_key(credits.to_vec(), |m| &mut m.release_date, true);
    let mut seen = HashSet::new();

    sorted
        .into_iter()
        .filter(|movie| movie.department.as_deref() == Some(department))
        .filter(|movie| seen.insert(movie.id))
        .map(|movie| {
            let local = session.match_movie(&movie);
            let job = movie.job.clone();
            CreditListing { credit: Credit::Movie(movie), local, job }
        })
        .collect()
}

fn show_list(
    credits: &[TmdbShow],
    session: &ReconcileSession,
    filters: &FilterOptions,
    today: NaiveDate,
    crew: bool,
) -> Vec<CreditListing> {
    let sorted = sort_by_date_key(credits.to_vec(), |s| &mut s.first_air_date, true);
    let mut seen = HashSet::new();
    let mut listings = Vec::new();

    for show in sorted {
        if filters.filters_shows() && is_blacklisted_show(&show, filters) {
            continue;
        }
        if filters.filter_upcoming && is_upcoming(show.first_air_date.as_deref(), filters, today) {
            continue;
        }
        if !seen.insert(show.id) {
            continue;
        }

        let local = session.match_show(&show);
        let job = if crew { show.job.clone() } else { None };
        listings.push(CreditListing { credit: Credit::Show(show), local, job });
    }

    listings
}

/// Movie and show cast credits in one date-ordered list
fn combine(movies: &[CreditListing], shows: &[CreditListing]) -> Vec<CreditListing> {
    let mut seen = HashSet::new();
    let merged: Vec<CreditListing> = movies
        .iter()
        .chain(shows.iter())
        .filter(|listing| seen.insert((listing.credit.kind(), listing.credit.id())))
        .cloned()
        .collect();

    sort_by_date_key(merged, |listing| listing.credit.date_mut(), true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use media_lookup_models::{LocalLibrary, LocalMediaItem, PersonCredits};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    fn movie(id: u64, title: &str, date: Option<&str>) -> TmdbMovie {
        TmdbMovie {
            id,
            title: Some(title.to_string()),
            original_title: Some(title.to_string()),
            release_date: date.map(str::to_string),
            genre_ids: vec![18],
            ..Default::default()
        }
    }

    fn show(id: u64, name: &str, date: Option<&str>, genres: Vec<u32>) -> TmdbShow {
        TmdbShow {
            id,
            name: Some(name.to_string()),
            original_name: Some(name.to_string()),
            first_air_date: date.map(str::to_string),
            genre_ids: genres,
            ..Default::default()
        }
    }

    fn session(filters: FilterOptions) -> ReconcileSession {
        let library = LocalLibrary {
            movies: vec![LocalMediaItem {
                kind: MediaKind::Movie,
                title: "Dune".to_string(),
                original_title: "Dune".to_string(),
                year: Some(2021),
                external_id: None,
                local_id: 5,
                play_count: 1,
                episode_count: None,
                watched_episode_count: None,
                file_path: None,
            }],
            shows: Vec::new(),
        };
        ReconcileSession::new(library, filters)
    }

    fn person(movies: Vec<TmdbMovie>, shows: Vec<TmdbShow>) -> TmdbPerson {
        TmdbPerson {
            id: 1,
            name: "Someone".to_string(),
            known_for_department: Some(ACTING.to_string()),
            movie_credits: PersonCredits { cast: movies, crew: Vec::new() },
            tv_credits: PersonCredits { cast: shows, crew: Vec::new() },
            ..Default::default()
        }
    }

    fn ids(listings: &[CreditListing]) -> Vec<u64> {
        listings.iter().map(|l| l.credit.id()).collect()
    }

    #[test]
    fn test_duplicate_credits_keep_first_occurrence() {
        let mut first = movie(1, "Dune", Some("2021-09-15"));
        first.character = Some("Paul".to_string());
        let mut again = movie(1, "Dune", Some("2021-09-15"));
        again.character = Some("Narrator".to_string());
        let person = person(vec![first, movie(2, "Wonka", Some("2020-12-15")), again], Vec::new());

        let filmography = Filmography::build(&person, &session(FilterOptions::disabled()), today());
        assert_eq!(ids(&filmography.movies), vec![1, 2]);
        assert_eq!(filmography.movies[0].credit.character(), Some("Paul"));
    }

    #[test]
    fn test_movies_sorted_with_undated_last_and_matched() {
        let person = person(
            vec![movie(3, "Untitled", None), movie(2, "Wonka", Some("2020-12-15")), movie(1, "Dune", Some("2021-09-15"))],
            Vec::new(),
        );
        let filmography = Filmography::build(&person, &session(FilterOptions::disabled()), today());
        assert_eq!(ids(&filmography.movies), vec![1, 2, 3]);
        assert_eq!(filmography.movies[2].credit.date(), Some(DESCENDING_SENTINEL));
        assert_eq!(filmography.movies[0].local.local_id, 5);
        assert_eq!(filmography.local_movie_count, 1);
        assert_eq!(filmography.local_total(), 1);
    }

    #[test]
    fn test_documentary_self_appearances_filtered() {
        let mut doc = movie(7, "Making of Dune", Some("2021-10-01"));
        doc.genre_ids = vec![99];
        doc.character = Some("Himself".to_string());
        let person = person(vec![doc.clone(), movie(1, "Dune", Some("2021-09-15"))], Vec::new());

        let filtered = Filmography::build(&person, &session(FilterOptions::default()), today());
        assert_eq!(ids(&filtered.movies), vec![1]);

        let unfiltered = Filmography::build(&person, &session(FilterOptions::disabled()), today());
        assert_eq!(ids(&unfiltered.movies), vec![7, 1]);
    }

    #[test]
    fn test_upcoming_filter_respects_day_delta() {
        let person = person(
            vec![
                movie(1, "Soon", Some("2024-01-20")),
                movie(2, "Later", Some("2024-06-01")),
                movie(3, "Untitled", None),
            ],
            Vec::new(),
        );
        let filmography = Filmography::build(&person, &session(FilterOptions::default()), today());
        assert_eq!(ids(&filmography.movies), vec![1, 3]);
    }

    #[test]
    fn test_show_blacklist_and_missing_genres() {
        let person = person(
            Vec::new(),
            vec![
                show(1, "Dark", Some("2017-12-01"), vec![18]),
                show(2, "Late Show", Some("2015-09-08"), vec![10767, 35]),
                show(3, "Unknown", Some("2010-01-01"), Vec::new()),
            ],
        );
        let filtered = Filmography::build(&person, &session(FilterOptions::default()), today());
        assert_eq!(ids(&filtered.tv_shows), vec![1]);

        let unfiltered = Filmography::build(&person, &session(FilterOptions::disabled()), today());
        assert_eq!(ids(&unfiltered.tv_shows), vec![1, 2, 3]);
    }

    #[test]
    fn test_crew_filters_and_jobs() {
        let mut directing = movie(1, "Dune", Some("2021-09-15"));
        directing.job = Some("Director".to_string());
        directing.department = Some("Directing".to_string());
        let mut thanks = movie(2, "Other", Some("2019-01-01"));
        thanks.job = Some("Thanks".to_string());
        thanks.department = Some("Crew".to_string());
        let mut writing = movie(3, "Arrival", Some("2016-11-10"));
        writing.job = Some("Screenplay".to_string());
        writing.department = Some("Writing".to_string());
        let mut undated = movie(4, "Rendezvous", None);
        undated.job = Some("Producer".to_string());
        undated.department = Some("Production".to_string());

        let mut person = person(Vec::new(), Vec::new());
        person.known_for_department = Some("Directing".to_string());
        person.movie_credits.crew = vec![directing, thanks, writing, undated];

        let filmography = Filmography::build(&person, &session(FilterOptions::default()), today());
        assert_eq!(ids(&filmography.movie_crew), vec![3]);
        assert_eq!(filmography.movie_crew[0].job.as_deref(), Some("Screenplay"));

        assert_eq!(ids(&filmography.known_for), vec![1]);
        assert_eq!(filmography.known_for[0].job.as_deref(), Some("Director"));
        assert!(filmography.known_for[0].local.matched);
    }

    #[test]
    fn test_known_for_actor_uses_movie_cast() {
        let person = person(vec![movie(1, "Dune", Some("2021-09-15"))], Vec::new());
        let filmography = Filmography::build(&person, &session(FilterOptions::disabled()), today());
        assert_eq!(ids(&filmography.known_for), ids(&filmography.movies));
    }

    #[test]
    fn test_combined_merges_by_date() {
        let person = person(
            vec![movie(1, "Dune", Some("2021-09-15")), movie(2, "Wonka", Some("2023-12-06"))],
            vec![show(1, "Dark", Some("2017-12-01"), vec![18]), show(4, "Untitled", None, vec![18])],
        );
        let filmography = Filmography::build(&person, &session(FilterOptions::disabled()), today());
        let combined: Vec<(MediaKind, u64)> =
            filmography.combined.iter().map(|l| (l.credit.kind(), l.credit.id())).collect();
        assert_eq!(
            combined,
            vec![
                (MediaKind::Movie, 2),
                (MediaKind::Movie, 1),
                (MediaKind::Show, 1),
                (MediaKind::Show, 4),
            ]
        );
        assert_eq!(filmography.list(FilmographyList::Combined).len(), 4);
    }
}
