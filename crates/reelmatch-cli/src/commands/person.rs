use super::context::{today, AppContext};
use super::ui::Busy;
use crate::output::{check_mark, details_table, new_table, Output};
use color_eyre::Result;
use comfy_table::Cell;
use media_lookup_core::{CreditListing, Filmography, FilmographyList, PersonSummary};
use serde_json::json;

pub async fn run_person(id: u64, list: FilmographyList, output: &Output) -> Result<()> {
    let context = AppContext::load()?;
    let tmdb = context.tmdb()?;
    let session = context.session(output).await;

    let busy = Busy::start(output, &format!("Fetching person {} from TMDb...", id));
    let person = tmdb.person(id).await;
    busy.finish();
    let person = person.map_err(|e| color_eyre::eyre::eyre!("TMDb lookup for person {} failed: {}", id, e))?;

    let today = today();
    let summary = PersonSummary::from_person(&person, today);
    let filmography = Filmography::build(&person, &session, today);
    let credits = filmography.list(list);

    if !output.is_human() {
        output.json(&json!({
            "person": summary,
            "local_movies": filmography.local_movie_count,
            "local_tvshows": filmography.local_show_count,
            "local_total": filmography.local_total(),
            "list": list_name(list),
            "credits": credits,
        }));
        return Ok(());
    }

    let rows = vec![
        ("Name", summary.name.clone()),
        ("Department", summary.known_for_department.clone().unwrap_or_default()),
        ("Born", summary.birthday.clone().unwrap_or_default()),
        ("Died", summary.deathday.clone().unwrap_or_default()),
        ("Age", summary.age.map(|a| a.to_string()).unwrap_or_default()),
        ("Place of birth", summary.place_of_birth.clone().unwrap_or_default()),
        (
            "Local media",
            format!(
                "{} movies, {} shows ({} total)",
                filmography.local_movie_count,
                filmography.local_show_count,
                filmography.local_total()
            ),
        ),
    ];
    output.table(&summary.name, &details_table(&rows));
    if !summary.biography.is_empty() {
        output.info(format!("\n{}", summary.biography));
    }

    if credits.is_empty() {
        output.info(format!("\nNo entries in {}.", list_name(list)));
        return Ok(());
    }
    output.table(&format!("{} ({})", list_name(list), credits.len()), &credits_table(credits));
    Ok(())
}

fn list_name(list: FilmographyList) -> &'static str {
    match list {
        FilmographyList::Movies => "movies",
        FilmographyList::TvShows => "tvshows",
        FilmographyList::MovieCrew => "movie_crew",
        FilmographyList::TvCrew => "tv_crew",
        FilmographyList::KnownFor => "known_for",
        FilmographyList::Combined => "combined",
    }
}

fn credits_table(credits: &[CreditListing]) -> comfy_table::Table {
    let mut table = new_table(&["Date", "Title", "Type", "Role / Job", "TMDb", "Local", "Plays"]);
    for listing in credits {
        let role = listing
            .job
            .clone()
            .or_else(|| listing.credit.character().map(str::to_string))
            .unwrap_or_default();
        table.add_row(vec![
            Cell::new(listing.credit.date().unwrap_or("")),
            Cell::new(listing.credit.title()),
            Cell::new(listing.credit.kind().to_string()),
            Cell::new(role),
            Cell::new(listing.credit.id()),
            Cell::new(check_mark(listing.local.is_local())),
            Cell::new(if listing.local.matched { listing.local.play_count.to_string() } else { String::new() }),
        ]);
    }
    table
}
