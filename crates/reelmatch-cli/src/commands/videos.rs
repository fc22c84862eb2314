use super::context::AppContext;
use super::ui::Busy;
use crate::output::{new_table, Output};
use color_eyre::Result;
use comfy_table::Cell;
use media_lookup_core::VideoEntry;
use media_lookup_models::MediaKind;
use serde_json::json;

pub async fn run_videos(kind: MediaKind, id: u64, output: &Output) -> Result<()> {
    let context = AppContext::load()?;
    let tmdb = context.tmdb()?;

    let busy = Busy::start(output, &format!("Fetching videos of {} {}...", kind, id));
    let videos = tmdb.videos(kind, id).await;
    busy.finish();

    let videos: Vec<VideoEntry> = videos
        .map_err(|e| color_eyre::eyre::eyre!("TMDb video lookup for {} {} failed: {}", kind, id, e))?
        .iter()
        .map(VideoEntry::from)
        .collect();

    if !output.is_human() {
        output.json(&json!({"kind": kind, "id": id, "videos": videos}));
        return Ok(());
    }

    if videos.is_empty() {
        output.warn(format!("No YouTube videos for {} {}", kind, id));
        return Ok(());
    }

    let mut table = new_table(&["Name", "Type", "URL"]);
    for video in &videos {
        table.add_row(vec![Cell::new(&video.name), Cell::new(&video.kind), Cell::new(&video.url)]);
    }
    output.table(&format!("Videos ({})", videos.len()), &table);
    Ok(())
}
