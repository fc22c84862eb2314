use super::context::AppContext;
use super::ui::Busy;
use crate::output::{check_mark, details_table, new_table, Output};
use comfy_table::Cell;
use color_eyre::Result;
use media_lookup_core::{ListingEntry, ReconcileSession};
use media_lookup_models::{ExternalRatings, MediaKind};
use media_lookup_sources::OmdbClient;
use tracing::{debug, warn};

pub async fn run_details(kind: MediaKind, id: u64, output: &Output) -> Result<()> {
    let context = AppContext::load()?;
    let session = context.session(output).await;
    let entry = fetch_entry(&context, &session, kind, id, output).await?;
    print_entry(&entry, output);
    Ok(())
}

/// Fetch one movie or show, match it locally and attach OMDb ratings
pub async fn fetch_entry(
    context: &AppContext,
    session: &ReconcileSession,
    kind: MediaKind,
    id: u64,
    output: &Output,
) -> Result<ListingEntry> {
    let tmdb = context.tmdb()?;
    let country = context.country_code();

    let busy = Busy::start(output, &format!("Fetching {} {} from TMDb...", kind, id));
    let fetched = match kind {
        MediaKind::Movie => tmdb.movie(id).await.map(|movie| {
            let local = session.match_movie(&movie);
            ListingEntry::from_movie(&movie, local, &country)
        }),
        MediaKind::Show => tmdb.tv(id).await.map(|show| {
            let local = session.match_show(&show);
            ListingEntry::from_show(&show, local, &country)
        }),
    };
    busy.finish();

    let entry = fetched.map_err(|e| color_eyre::eyre::eyre!("TMDb lookup for {} {} failed: {}", kind, id, e))?;

    match context.omdb() {
        Some(omdb) => {
            let ratings = fetch_ratings(&omdb, &entry).await;
            Ok(entry.with_ratings(ratings))
        }
        None => Ok(entry),
    }
}

/// OMDb failures only cost the ratings, never the listing
async fn fetch_ratings(omdb: &OmdbClient, entry: &ListingEntry) -> ExternalRatings {
    let result = match (&entry.imdb_id, entry.year) {
        (Some(imdb_id), _) => omdb.ratings(imdb_id).await,
        (None, Some(year)) => omdb.ratings_by_title(&entry.original_title, year, entry.kind).await,
        (None, None) => return ExternalRatings::default(),
    };

    match result {
        Ok(ratings) => ratings,
        Err(e) if e.is_empty_result() => {
            debug!(label = %entry.label, "No OMDb entry");
            ExternalRatings::default()
        }
        Err(e) => {
            warn!(label = %entry.label, error = %e, "OMDb lookup failed");
            ExternalRatings::default()
        }
    }
}

fn opt<T: ToString>(value: &Option<T>) -> String {
    value.as_ref().map(|v| v.to_string()).unwrap_or_default()
}

pub fn print_entry(entry: &ListingEntry, output: &Output) {
    if !output.is_human() {
        output.json(&serde_json::to_value(entry).unwrap_or_default());
        return;
    }

    let local = &entry.local;
    let mut rows: Vec<(&str, String)> = vec![
        ("Title", entry.label.clone()),
        ("Original title", entry.original_title.clone()),
        ("TMDb id", entry.tmdb_id.to_string()),
        ("IMDb", opt(&entry.imdb_id)),
        ("TVDb", opt(&entry.tvdb_id)),
        ("Premiered", opt(&entry.premiered)),
        ("Status", opt(&entry.status)),
        ("Certification", opt(&entry.certification)),
        ("Rating", entry.rating.map(|r| format!("{:.1} ({} votes)", r, entry.votes.unwrap_or(0))).unwrap_or_default()),
        ("Runtime", entry.duration.map(|d| format!("{} min", d / 60)).unwrap_or_default()),
        ("Genre", entry.genre.clone()),
        ("Studio", entry.studio.clone()),
        ("Country", entry.country.clone()),
        ("Director", entry.director.clone()),
        ("Writer", entry.writer.clone()),
        ("Collection", entry.collection.as_ref().map(|c| c.name.clone()).unwrap_or_default()),
        ("Budget", entry.budget.clone()),
        ("Revenue", entry.revenue.clone()),
        ("Seasons", opt(&entry.seasons)),
        ("Episodes", opt(&entry.episodes)),
        ("Tagline", opt(&entry.tagline)),
        ("Homepage", opt(&entry.homepage)),
        ("Poster", opt(&entry.poster)),
    ];

    if let Some(last) = &entry.last_episode {
        rows.push(("Last episode", format!("S{:02}E{:02} {} ({})", last.season.unwrap_or(0), last.episode.unwrap_or(0), last.name, opt(&last.air_date))));
    }
    if let Some(next) = &entry.next_episode {
        rows.push(("Next episode", format!("S{:02}E{:02} {} ({})", next.season.unwrap_or(0), next.episode.unwrap_or(0), next.name, opt(&next.air_date))));
    }

    if let Some(ratings) = &entry.ratings {
        rows.push(("IMDb rating", opt(&ratings.imdb_rating)));
        rows.push(("IMDb votes", opt(&ratings.imdb_votes)));
        rows.push(("Rotten Tomatoes", ratings.rotten_tomatoes.as_ref().map(|r| format!("{}%", r)).unwrap_or_default()));
        rows.push(("Metacritic", opt(&ratings.metacritic)));
        rows.push(("Awards", opt(&ratings.awards)));
    }

    rows.push(("In library", check_mark(local.is_local())));
    if local.matched {
        rows.push(("Library id", local.local_id.to_string()));
        rows.push(("Play count", local.play_count.to_string()));
        rows.push(("File", opt(&local.file_path)));
        if let (Some(total), Some(unwatched)) = (local.episode_count, local.unwatched_episode_count) {
            rows.push(("Episodes watched", format!("{} of {} ({} unwatched)", total - unwatched, total, unwatched)));
        }
    }

    output.table(&entry.label, &details_table(&rows));
    if !entry.plot.is_empty() {
        output.info(format!("\n{}", entry.plot));
    }

    if !entry.cast.is_empty() {
        let mut cast = new_table(&["Name", "Role", "TMDb"]);
        for member in &entry.cast {
            cast.add_row(vec![
                Cell::new(&member.name),
                Cell::new(member.role.clone().unwrap_or_default()),
                Cell::new(member.id),
            ]);
        }
        output.table(&format!("Cast ({})", entry.cast.len()), &cast);
    }
}
