use super::context::AppContext;
use crate::output::{new_table, Output};
use color_eyre::Result;
use comfy_table::Cell;
use media_lookup_models::LocalMediaItem;
use serde_json::json;

pub async fn run_library(output: &Output) -> Result<()> {
    let context = AppContext::load()?;
    let Some(source) = context.library_source() else {
        output.warn("No [library] section configured. Run 'reelmatch config library' first.");
        return Ok(());
    };
    output.info(format!("Library: {}", source.url()));

    let session = context.session(output).await;
    let library = session.library();

    if !output.is_human() {
        output.json(&json!({
            "movies": library.movies.len(),
            "tvshows": library.shows.len(),
            "items": library,
        }));
        return Ok(());
    }

    output.table(&format!("Movies ({})", library.movies.len()), &items_table(&library.movies, false));
    output.table(&format!("TV shows ({})", library.shows.len()), &items_table(&library.shows, true));
    Ok(())
}

fn items_table(items: &[LocalMediaItem], shows: bool) -> comfy_table::Table {
    let header: &[&str] = if shows {
        &["Id", "Year", "Title", "Original title", "External id", "Plays", "Episodes", "Watched"]
    } else {
        &["Id", "Year", "Title", "Original title", "External id", "Plays"]
    };
    let mut table = new_table(header);

    for item in items {
        let mut row = vec![
            Cell::new(item.local_id),
            Cell::new(item.year.map(|y| y.to_string()).unwrap_or_default()),
            Cell::new(&item.title),
            Cell::new(&item.original_title),
            Cell::new(item.external_id.clone().unwrap_or_default()),
            Cell::new(item.play_count),
        ];
        if shows {
            row.push(Cell::new(item.episode_count.map(|c| c.to_string()).unwrap_or_default()));
            row.push(Cell::new(item.watched_episode_count.map(|c| c.to_string()).unwrap_or_default()));
        }
        table.add_row(row);
    }
    table
}
