use super::context::AppContext;
use super::ui::Busy;
use crate::output::{details_table, new_table, Output};
use color_eyre::Result;
use comfy_table::Cell;
use media_lookup_core::SeasonEntry;
use media_lookup_sources::SourceError;

pub async fn run_season(tv_id: u64, season_number: u32, output: &Output) -> Result<()> {
    let context = AppContext::load()?;
    let tmdb = context.tmdb()?;

    let busy = Busy::start(output, &format!("Fetching season {} of show {} from TMDb...", season_number, tv_id));
    let fetched = async {
        let show = tmdb.tv(tv_id).await?;
        let season = tmdb.season(tv_id, season_number).await?;
        Ok::<_, SourceError>((show, season))
    }
    .await;
    busy.finish();

    let (show, season) = match fetched {
        Ok(fetched) => fetched,
        Err(e) if e.is_empty_result() => {
            output.warn(format!("No season {} found for show {}", season_number, tv_id));
            return Ok(());
        }
        Err(e) => {
            return Err(color_eyre::eyre::eyre!("TMDb lookup for season {} of show {} failed: {}", season_number, tv_id, e))
        }
    };

    let entry = SeasonEntry::from_season(&season, &show, &context.country_code());
    print_season(&entry, output);
    Ok(())
}

fn print_season(entry: &SeasonEntry, output: &Output) {
    if !output.is_human() {
        output.json(&serde_json::to_value(entry).unwrap_or_default());
        return;
    }

    let rows = vec![
        ("Show", entry.label.clone()),
        ("Season", format!("{} ({})", entry.title, entry.season)),
        ("Premiered", entry.premiered.clone().unwrap_or_default()),
        ("Episodes", entry.episode_count.to_string()),
        ("Genre", entry.genre.clone()),
        ("Certification", entry.certification.clone().unwrap_or_default()),
        ("Rating", entry.rating.map(|r| format!("{:.1} ({} votes)", r, entry.votes.unwrap_or(0))).unwrap_or_default()),
        ("Network", entry.network_logos.iter().map(|n| n.name.as_str()).collect::<Vec<_>>().join(" / ")),
        ("Poster", entry.poster.clone().unwrap_or_default()),
    ];
    output.table(&format!("{} - {}", entry.label, entry.title), &details_table(&rows));
    if !entry.plot.is_empty() {
        output.info(format!("\n{}", entry.plot));
    }

    if entry.episodes.is_empty() {
        return;
    }
    let mut table = new_table(&["#", "Title", "Aired"]);
    for episode in &entry.episodes {
        table.add_row(vec![
            Cell::new(episode.episode.map(|e| e.to_string()).unwrap_or_default()),
            Cell::new(&episode.name),
            Cell::new(episode.air_date.clone().unwrap_or_default()),
        ]);
    }
    output.table("Episodes", &table);
}
