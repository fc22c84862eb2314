// Normalize TMDb payloads into comparable remote records

use media_lookup_models::{RemoteRecord, TmdbMovie, TmdbShow};

/// Year of a `YYYY-MM-DD` date; empty or garbled input yields `None`
pub fn year_from_date(date: &str) -> Option<i32> {
    let year = date.trim().get(..4)?;
    if !year.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    year.parse::<i32>().ok().filter(|y| *y > 0)
}

fn text(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("")
}

/// Display title with the original title as fallback
pub fn movie_title(movie: &TmdbMovie) -> String {
    let title = text(&movie.title);
    if title.is_empty() {
        text(&movie.original_title).to_string()
    } else {
        title.to_string()
    }
}

pub fn show_title(show: &TmdbShow) -> String {
    let name = text(&show.name);
    if name.is_empty() {
        text(&show.original_name).to_string()
    } else {
        name.to_string()
    }
}

pub fn movie_record(movie: &TmdbMovie) -> RemoteRecord {
    let record = RemoteRecord::new(
        movie_title(movie),
        text(&movie.original_title),
        movie.release_date.as_deref().and_then(year_from_date),
    );
    match &movie.imdb_id {
        Some(imdb_id) => record.with_external_id(imdb_id.as_str()),
        None => record,
    }
}

/// Shows are linked through their TVDb id, which is what Kodi scrapers store
pub fn show_record(show: &TmdbShow) -> RemoteRecord {
    let record = RemoteRecord::new(
        show_title(show),
        text(&show.original_name),
        show.first_air_date.as_deref().and_then(year_from_date),
    );
    match show.external_ids.as_ref().and_then(|ids| ids.tvdb_id) {
        Some(tvdb_id) => record.with_external_id(tvdb_id.to_string()),
        None => record,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use media_lookup_models::ExternalIds;

    #[test]
    fn test_year_from_date() {
        assert_eq!(year_from_date("2021-10-22"), Some(2021));
        assert_eq!(year_from_date("1984"), Some(1984));
        assert_eq!(year_from_date(""), None);
        assert_eq!(year_from_date("soon"), None);
        assert_eq!(year_from_date("20-1-01"), None);
        assert_eq!(year_from_date("0000-01-01"), None);
    }

    #[test]
    fn test_movie_record_falls_back_to_original_title() {
        let movie = TmdbMovie {
            title: Some(String::new()),
            original_title: Some("Wo hu cang long".to_string()),
            release_date: Some("2000-07-06".to_string()),
            imdb_id: Some("tt0190332".to_string()),
            ..Default::default()
        };
        let record = movie_record(&movie);
        assert_eq!(record.title, "Wo hu cang long");
        assert_eq!(record.original_title, "Wo hu cang long");
        assert_eq!(record.year, Some(2000));
        assert_eq!(record.external_id.as_deref(), Some("tt0190332"));
    }

    #[test]
    fn test_show_record_uses_tvdb_id() {
        let show = TmdbShow {
            name: Some("Dark".to_string()),
            original_name: Some("Dark".to_string()),
            first_air_date: Some("2017-12-01".to_string()),
            external_ids: Some(ExternalIds { imdb_id: Some("tt5753856".to_string()), tvdb_id: Some(334824) }),
            ..Default::default()
        };
        let record = show_record(&show);
        assert_eq!(record.external_id.as_deref(), Some("334824"));
        assert_eq!(record.year, Some(2017));
    }

    #[test]
    fn test_credit_without_ids_or_dates() {
        let record = movie_record(&TmdbMovie { title: Some("Untitled".to_string()), ..Default::default() });
        assert_eq!(record.external_id, None);
        assert_eq!(record.year, None);
        assert_eq!(record.original_title, "");
    }
}
