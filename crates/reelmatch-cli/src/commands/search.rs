use super::context::AppContext;
use super::details::{fetch_entry, print_entry};
use super::person::run_person;
use super::prompts::select_item;
use super::ui::Busy;
use crate::output::{check_mark, new_table, Output};
use crate::SearchKind;
use color_eyre::Result;
use comfy_table::Cell;
use media_lookup_core::{year_from_date, FilmographyList, ListingEntry};
use media_lookup_models::{MatchResult, MediaKind, TmdbPerson};
use media_lookup_sources::SourceError;
use serde_json::json;

pub async fn run_search(kind: SearchKind, query: &str, year: Option<i32>, select: bool, output: &Output) -> Result<()> {
    let context = AppContext::load()?;
    let tmdb = context.tmdb()?;
    let include_adult = context.config.tmdb.include_adult;

    if kind == SearchKind::Person {
        let busy = Busy::start(output, &format!("Searching people for '{}'...", query));
        let people = tmdb.search_people(query, include_adult).await;
        busy.finish();
        let people = no_results_as_empty(people)?;
        return show_people(&people, query, select, output).await;
    }

    let session = context.session(output).await;
    let country = context.country_code();

    let busy = Busy::start(output, &format!("Searching TMDb for '{}'...", query));
    let entries = match kind {
        SearchKind::Movie => no_results_as_empty(tmdb.search_movies(query, year, include_adult).await).map(|movies| {
            movies
                .iter()
                .map(|movie| ListingEntry::from_movie(movie, session.match_movie(movie), &country))
                .collect::<Vec<_>>()
        }),
        _ => no_results_as_empty(tmdb.search_shows(query, year, include_adult).await).map(|shows| {
            shows
                .iter()
                .map(|show| ListingEntry::from_show(show, session.match_show(show), &country))
                .collect::<Vec<_>>()
        }),
    };
    busy.finish();
    let entries = entries?;

    if entries.is_empty() {
        output.warn(format!("No results for '{}'", query));
        return Ok(());
    }

    if select {
        let labels: Vec<String> = entries.iter().map(entry_label).collect();
        let Some(index) = select_item("Select", &labels)? else {
            return Ok(());
        };
        let chosen = &entries[index];
        let entry = fetch_entry(&context, &session, chosen.kind, chosen.tmdb_id, output).await?;
        print_entry(&entry, output);
        return Ok(());
    }

    if !output.is_human() {
        output.json(&json!({"query": query, "results": entries}));
        return Ok(());
    }

    let mut table = new_table(&["Year", "Title", "Original title", "TMDb", "Local", "Plays"]);
    for entry in &entries {
        table.add_row(vec![
            Cell::new(entry.year.map(|y| y.to_string()).unwrap_or_default()),
            Cell::new(&entry.label),
            Cell::new(&entry.original_title),
            Cell::new(entry.tmdb_id),
            Cell::new(check_mark(entry.is_local())),
            Cell::new(play_count(&entry.local)),
        ]);
    }
    output.table(&format!("Results for '{}' ({})", query, entries.len()), &table);
    Ok(())
}

fn no_results_as_empty<T>(result: std::result::Result<Vec<T>, SourceError>) -> Result<Vec<T>> {
    match result {
        Ok(items) => Ok(items),
        Err(e) if e.is_empty_result() => Ok(Vec::new()),
        Err(e) => Err(color_eyre::eyre::eyre!("TMDb search failed: {}", e)),
    }
}

fn play_count(local: &MatchResult) -> String {
    if local.matched {
        local.play_count.to_string()
    } else {
        String::new()
    }
}

/// "Title (Year)" with a marker for entries already in the library
fn entry_label(entry: &ListingEntry) -> String {
    let mut label = match entry.year {
        Some(year) => format!("{} ({})", entry.label, year),
        None => entry.label.clone(),
    };
    if entry.kind == MediaKind::Show && entry.original_title != entry.label && !entry.original_title.is_empty() {
        label.push_str(&format!(" [{}]", entry.original_title));
    }
    if entry.is_local() {
        label.push_str(" *");
    }
    label
}

fn person_label(person: &TmdbPerson) -> String {
    match person.known_for_department.as_deref() {
        Some(department) if !department.is_empty() => format!("{} ({})", person.name, department),
        _ => person.name.clone(),
    }
}

async fn show_people(people: &[TmdbPerson], query: &str, select: bool, output: &Output) -> Result<()> {
    if people.is_empty() {
        output.warn(format!("No results for '{}'", query));
        return Ok(());
    }

    if select {
        let labels: Vec<String> = people.iter().map(person_label).collect();
        let Some(index) = select_item("Select", &labels)? else {
            return Ok(());
        };
        return run_person(people[index].id, FilmographyList::Movies, output).await;
    }

    if !output.is_human() {
        let results: Vec<_> = people
            .iter()
            .map(|p| json!({"id": p.id, "name": p.name, "known_for_department": p.known_for_department}))
            .collect();
        output.json(&json!({"query": query, "results": results}));
        return Ok(());
    }

    let mut table = new_table(&["Name", "Department", "TMDb", "Born"]);
    for person in people {
        table.add_row(vec![
            Cell::new(&person.name),
            Cell::new(person.known_for_department.clone().unwrap_or_default()),
            Cell::new(person.id),
            Cell::new(person.birthday.as_deref().and_then(year_from_date).map(|y| y.to_string()).unwrap_or_default()),
        ]);
    }
    output.table(&format!("People matching '{}' ({})", query, people.len()), &table);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use media_lookup_models::TmdbMovie;

    #[test]
    fn test_entry_label_marks_local_entries() {
        let movie = TmdbMovie {
            id: 438631,
            title: Some("Dune".to_string()),
            original_title: Some("Dune".to_string()),
            release_date: Some("2021-09-15".to_string()),
            ..Default::default()
        };
        let mut local = MatchResult::unmatched();
        assert_eq!(entry_label(&ListingEntry::from_movie(&movie, local.clone(), "US")), "Dune (2021)");

        local.matched = true;
        local.local_id = 5;
        assert_eq!(entry_label(&ListingEntry::from_movie(&movie, local, "US")), "Dune (2021) *");
    }

    #[test]
    fn test_person_label() {
        let person = TmdbPerson {
            name: "Denis Villeneuve".to_string(),
            known_for_department: Some("Directing".to_string()),
            ..Default::default()
        };
        assert_eq!(person_label(&person), "Denis Villeneuve (Directing)");
    }
}
