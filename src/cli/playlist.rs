use rand::seq::IndexedRandom;
use tabled::Table;

use crate::{
    api, config, error, info, success, warning,
    youtube::{
        YtMusicClient,
        types::{Playlist, TrackTableRow},
    },
};

use super::spinner;

pub async fn playlist(random: bool) {
    let pb = spinner("Fetching playlist...");
    let client = YtMusicClient::new(config::playlist_track_limit());
    let playlist: Playlist = match client.fetch_playlist(api::PLAYLIST_ID).await {
        Ok(playlist) => playlist,
        Err(e) => {
            pb.finish_and_clear();
            error!("Failed to fetch playlist {}. Err: {}", api::PLAYLIST_ID, e);
        }
    };
    pb.finish_and_clear();

    success!(
        "Fetched {} of {} tracks from \"{}\"",
        playlist.tracks.len(),
        playlist
            .track_count
            .map(|c| c.to_string())
            .unwrap_or_else(|| "?".to_string()),
        playlist.title
    );

    if playlist.tracks.is_empty() {
        warning!("Playlist has no tracks.");
        return;
    }

    let rows: Vec<TrackTableRow> = if random {
        match playlist.tracks.choose(&mut rand::rng()) {
            Some(track) => {
                info!("Picked a random track");
                vec![TrackTableRow::from(track)]
            }
            None => Vec::new(),
        }
    } else {
        playlist.tracks.iter().map(TrackTableRow::from).collect()
    };

    println!("{}", Table::new(rows));
}
