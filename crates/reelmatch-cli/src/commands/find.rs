use super::context::AppContext;
use super::details::{fetch_entry, print_entry};
use super::ui::Busy;
use crate::output::Output;
use color_eyre::Result;
use media_lookup_models::MediaKind;
use tracing::debug;

pub async fn run_find(external_id: &str, kind: MediaKind, output: &Output) -> Result<()> {
    let context = AppContext::load()?;
    let tmdb = context.tmdb()?;

    let busy = Busy::start(output, &format!("Looking up {}...", external_id));
    let found = tmdb.find_id(kind, external_id).await;
    busy.finish();

    let id = match found {
        Ok(id) => id,
        Err(e) if e.is_empty_result() => {
            output.warn(format!("No {} found for {}", kind, external_id));
            return Ok(());
        }
        Err(e) => return Err(color_eyre::eyre::eyre!("TMDb find for {} failed: {}", external_id, e)),
    };
    debug!(external_id, tmdb_id = id, "Resolved external id");

    let session = context.session(output).await;
    let entry = fetch_entry(&context, &session, kind, id, output).await?;
    print_entry(&entry, output);
    Ok(())
}
