use tabled::Table;

use crate::{
    api, error, info, success, warning,
    youtube::{YtStreamResolver, types::FormatTableRow},
};

use super::spinner;

pub async fn resolve(id: String) {
    let url = api::WATCH_URL_PREFIX.to_string() + &id;

    let pb = spinner("Resolving streams...");
    let descriptor = match YtStreamResolver::new().fetch_descriptor(&url).await {
        Ok(descriptor) => descriptor,
        Err(e) => {
            pb.finish_and_clear();
            error!("Failed to resolve {}. Err: {}", url, e);
        }
    };
    pb.finish_and_clear();

    success!(
        "{} - {} ({} formats)",
        descriptor.author,
        descriptor.title,
        descriptor.info.formats.len()
    );

    match descriptor.audio_url() {
        Some(audio) => info!("Audio: {}", audio),
        None => warning!("No direct audio-only format available."),
    }

    let rows: Vec<FormatTableRow> = descriptor
        .info
        .requested_formats
        .iter()
        .map(FormatTableRow::from)
        .collect();
    if !rows.is_empty() {
        println!("{}", Table::new(rows));
    }
}
