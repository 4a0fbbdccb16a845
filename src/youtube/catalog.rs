use async_trait::async_trait;
use chrono::Utc;
use reqwest::{Client, header};
use serde_json::{Value, json};

use super::{
    CatalogClient, YTM_BASE_URL, YoutubeError,
    types::{Playlist, PlaylistAuthor, PlaylistTrack, Thumbnail, TrackAlbum, TrackArtist},
};
use crate::utils;

const BROWSER_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:128.0) Gecko/20100101 Firefox/128.0";
const YTM_ORIGIN: &str = "https://music.youtube.com";

const TWO_COLUMN_HEADER: &str = "/contents/twoColumnBrowseResultsRenderer/tabs/0/tabRenderer/content/sectionListRenderer/contents/0/musicResponsiveHeaderRenderer";
const TWO_COLUMN_SHELF: &str = "/contents/twoColumnBrowseResultsRenderer/secondaryContents/sectionListRenderer/contents/0/musicPlaylistShelfRenderer";
const SINGLE_COLUMN_HEADER: &str = "/header/musicDetailHeaderRenderer";
const SINGLE_COLUMN_SHELF: &str = "/contents/singleColumnBrowseResultsRenderer/tabs/0/tabRenderer/content/sectionListRenderer/contents/0/musicPlaylistShelfRenderer";
const APPENDED_ITEMS: &str =
    "/onResponseReceivedActions/0/appendContinuationItemsAction/continuationItems";
const LEGACY_CONTINUATION_SHELF: &str = "/continuationContents/musicPlaylistShelfContinuation";

const GREY_OUT_POLICY: &str = "MUSIC_ITEM_RENDERER_DISPLAY_POLICY_GREY_OUT";
const EXPLICIT_BADGE: &str = "MUSIC_EXPLICIT_BADGE";

/// YouTube Music playlist client.
///
/// Fetches the playlist page from the `browse` endpoint and follows
/// continuations until `track_limit` tracks are collected or the playlist
/// ends. One `reqwest::Client` is kept for the lifetime of the handle so
/// connections are reused across requests.
#[derive(Debug, Clone)]
pub struct YtMusicClient {
    client: Client,
    base_url: String,
    track_limit: usize,
}

/// One page of playlist items and the token for the next page, if any.
#[derive(Debug, Default)]
pub(crate) struct TrackPage {
    pub tracks: Vec<PlaylistTrack>,
    pub continuation: Option<String>,
}

impl YtMusicClient {
    pub fn new(track_limit: usize) -> Self {
        Self::with_base_url(YTM_BASE_URL, track_limit)
    }

    pub fn with_base_url(base_url: &str, track_limit: usize) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            track_limit,
        }
    }

    /// Fetches a playlist and its tracks, up to the configured track limit.
    ///
    /// # Errors
    ///
    /// - `YoutubeError::Http` - network failure or non-2xx status
    /// - `YoutubeError::UnexpectedResponse` - the page has no playlist shelf
    pub async fn fetch_playlist(&self, playlist_id: &str) -> Result<Playlist, YoutubeError> {
        let browse_id = if playlist_id.starts_with("VL") {
            playlist_id.to_string()
        } else {
            format!("VL{}", playlist_id)
        };

        let page = self
            .post_browse(json!({ "browseId": browse_id }), None)
            .await?;
        let mut playlist = parse_playlist_page(&page)?;
        let mut continuation = parse_first_continuation(&page);

        while playlist.tracks.len() < self.track_limit {
            let Some(token) = continuation.take() else {
                break;
            };

            let next = self.post_browse(json!({}), Some(&token)).await?;
            let page = parse_continuation_page(&next);
            if page.tracks.is_empty() {
                break;
            }

            playlist.tracks.extend(page.tracks);
            continuation = page.continuation;
        }

        playlist.tracks.truncate(self.track_limit);
        Ok(playlist)
    }

    async fn post_browse(
        &self,
        mut body: Value,
        continuation: Option<&str>,
    ) -> Result<Value, YoutubeError> {
        body["context"] = web_remix_context();

        let mut request = self
            .client
            .post(format!("{}/browse", self.base_url))
            .query(&[("alt", "json")])
            .header(header::USER_AGENT, BROWSER_USER_AGENT)
            .header(header::ORIGIN, YTM_ORIGIN)
            .header(header::ACCEPT_LANGUAGE, "en-US,en;q=0.5");

        if let Some(token) = continuation {
            body["continuation"] = Value::String(token.to_string());
            request = request.query(&[("ctoken", token), ("continuation", token), ("type", "next")]);
        }

        let response = request.json(&body).send().await?.error_for_status()?;
        Ok(response.json::<Value>().await?)
    }
}

#[async_trait]
impl CatalogClient for YtMusicClient {
    async fn get_playlist(&self, playlist_id: &str) -> Result<Value, YoutubeError> {
        let playlist = self.fetch_playlist(playlist_id).await?;
        Ok(serde_json::to_value(playlist)?)
    }
}

fn web_remix_context() -> Value {
    json!({
        "client": {
            "clientName": "WEB_REMIX",
            "clientVersion": utils::client_version(Utc::now().date_naive()),
            "hl": "en",
            "gl": "US"
        },
        "user": {}
    })
}

/// Parses the first page of a playlist in either page layout.
pub(crate) fn parse_playlist_page(page: &Value) -> Result<Playlist, YoutubeError> {
    let (header, shelf) = match page.pointer(TWO_COLUMN_SHELF) {
        Some(shelf) => (page.pointer(TWO_COLUMN_HEADER), shelf),
        None => match page.pointer(SINGLE_COLUMN_SHELF) {
            Some(shelf) => (page.pointer(SINGLE_COLUMN_HEADER), shelf),
            None => {
                return Err(YoutubeError::UnexpectedResponse {
                    reason: "playlist page has no track shelf".to_string(),
                });
            }
        },
    };

    let id = shelf
        .get("playlistId")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    let items = shelf
        .get("contents")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();

    let mut playlist = Playlist {
        id,
        privacy: "PUBLIC".to_string(),
        title: String::new(),
        description: None,
        author: None,
        year: None,
        duration: None,
        track_count: None,
        thumbnails: Vec::new(),
        tracks: parse_items(items).tracks,
    };

    if let Some(header) = header {
        apply_header(&mut playlist, header);
    }

    Ok(playlist)
}

/// Continuation token of the first page, from a trailing
/// `continuationItemRenderer` or the legacy `continuations` list.
pub(crate) fn parse_first_continuation(page: &Value) -> Option<String> {
    let shelf = page
        .pointer(TWO_COLUMN_SHELF)
        .or_else(|| page.pointer(SINGLE_COLUMN_SHELF))?;

    let items = shelf
        .get("contents")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();

    parse_items(items)
        .continuation
        .or_else(|| legacy_continuation(shelf))
}

pub(crate) fn parse_continuation_page(page: &Value) -> TrackPage {
    if let Some(items) = page.pointer(APPENDED_ITEMS).and_then(Value::as_array) {
        return parse_items(items);
    }

    match page.pointer(LEGACY_CONTINUATION_SHELF) {
        Some(shelf) => {
            let items = shelf
                .get("contents")
                .and_then(Value::as_array)
                .map(Vec::as_slice)
                .unwrap_or_default();
            let mut page = parse_items(items);
            page.continuation = page.continuation.or_else(|| legacy_continuation(shelf));
            page
        }
        None => TrackPage::default(),
    }
}

fn legacy_continuation(shelf: &Value) -> Option<String> {
    shelf
        .pointer("/continuations/0/nextContinuationData/continuation")
        .and_then(Value::as_str)
        .map(str::to_string)
}

fn parse_items(items: &[Value]) -> TrackPage {
    let mut page = TrackPage::default();

    for item in items {
        if let Some(renderer) = item.get("musicResponsiveListItemRenderer") {
            if let Some(track) = parse_track(renderer) {
                page.tracks.push(track);
            }
        } else if let Some(token) = item
            .pointer("/continuationItemRenderer/continuationEndpoint/continuationCommand/token")
            .and_then(Value::as_str)
        {
            page.continuation = Some(token.to_string());
        }
    }

    page
}

fn flex_column_runs(renderer: &Value, index: usize) -> Option<&Vec<Value>> {
    renderer
        .pointer(&format!(
            "/flexColumns/{}/musicResponsiveListItemFlexColumnRenderer/text/runs",
            index
        ))
        .and_then(Value::as_array)
}

fn browse_id(run: &Value) -> Option<String> {
    run.pointer("/navigationEndpoint/browseEndpoint/browseId")
        .and_then(Value::as_str)
        .map(str::to_string)
}

fn parse_track(renderer: &Value) -> Option<PlaylistTrack> {
    let title_run = flex_column_runs(renderer, 0)?.first()?;
    let title = title_run.get("text").and_then(Value::as_str)?.to_string();

    let video_id = renderer
        .pointer("/playlistItemData/videoId")
        .or_else(|| title_run.pointer("/navigationEndpoint/watchEndpoint/videoId"))
        .and_then(Value::as_str)
        .map(str::to_string);

    let set_video_id = renderer
        .pointer("/playlistItemData/playlistSetVideoId")
        .and_then(Value::as_str)
        .map(str::to_string);

    // runs alternate between names and separators
    let artists = flex_column_runs(renderer, 1)
        .map(|runs| {
            runs.iter()
                .step_by(2)
                .filter_map(|run| {
                    let name = run.get("text").and_then(Value::as_str)?;
                    Some(TrackArtist {
                        name: name.to_string(),
                        id: browse_id(run),
                    })
                })
                .collect()
        })
        .unwrap_or_default();

    let album = flex_column_runs(renderer, 2)
        .and_then(|runs| runs.first())
        .and_then(|run| {
            let id = browse_id(run)?;
            let name = run.get("text").and_then(Value::as_str)?;
            Some(TrackAlbum {
                name: name.to_string(),
                id: Some(id),
            })
        });

    let duration = renderer
        .pointer("/fixedColumns/0/musicResponsiveListItemFixedColumnRenderer/text")
        .and_then(utils::text_of)
        .filter(|d| !d.is_empty());
    let duration_seconds = duration.as_deref().and_then(utils::parse_duration);

    let thumbnails = parse_thumbnails(
        renderer.pointer("/thumbnail/musicThumbnailRenderer/thumbnail/thumbnails"),
    );

    let is_available = renderer
        .get("musicItemRendererDisplayPolicy")
        .and_then(Value::as_str)
        != Some(GREY_OUT_POLICY);

    let is_explicit = renderer
        .get("badges")
        .and_then(Value::as_array)
        .is_some_and(|badges| {
            badges.iter().any(|b| {
                b.pointer("/musicInlineBadgeRenderer/icon/iconType")
                    .and_then(Value::as_str)
                    == Some(EXPLICIT_BADGE)
            })
        });

    Some(PlaylistTrack {
        video_id,
        title,
        artists,
        album,
        duration,
        duration_seconds,
        thumbnails,
        is_available,
        is_explicit,
        set_video_id,
    })
}

pub(crate) fn parse_thumbnails(value: Option<&Value>) -> Vec<Thumbnail> {
    value
        .cloned()
        .and_then(|v| serde_json::from_value::<Vec<Thumbnail>>(v).ok())
        .unwrap_or_default()
}

fn apply_header(playlist: &mut Playlist, header: &Value) {
    playlist.title = header
        .get("title")
        .and_then(utils::text_of)
        .unwrap_or_default();

    playlist.description = header
        .pointer("/description/musicDescriptionShelfRenderer/description")
        .or_else(|| header.get("description"))
        .and_then(utils::text_of)
        .filter(|d| !d.is_empty());

    playlist.thumbnails = parse_thumbnails(
        header
            .pointer("/thumbnail/musicThumbnailRenderer/thumbnail/thumbnails")
            .or_else(|| {
                header.pointer("/thumbnail/croppedSquareThumbnailRenderer/thumbnail/thumbnails")
            }),
    );

    let subtitle_runs = header
        .pointer("/subtitle/runs")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();

    playlist.year = subtitle_runs
        .last()
        .and_then(|run| run.get("text").and_then(Value::as_str))
        .filter(|text| text.len() == 4 && text.chars().all(|c| c.is_ascii_digit()))
        .map(str::to_string);

    // the two-column header carries the author in its strapline, the older
    // one as the third subtitle run
    let author_run = header
        .pointer("/straplineTextOne/runs/0")
        .or_else(|| subtitle_runs.get(2).filter(|_| subtitle_runs.len() > 3));
    playlist.author = author_run.and_then(|run| {
        let name = run.get("text").and_then(Value::as_str)?;
        Some(PlaylistAuthor {
            name: name.to_string(),
            id: browse_id(run),
        })
    });

    let second_subtitle = header
        .pointer("/secondSubtitle/runs")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();
    let texts: Vec<&str> = second_subtitle
        .iter()
        .filter_map(|run| run.get("text").and_then(Value::as_str))
        .filter(|text| text.trim() != "•")
        .collect();

    playlist.track_count = texts.iter().find_map(|t| {
        t.contains("song")
            .then(|| utils::parse_leading_number(t))
            .flatten()
    });
    playlist.duration = texts
        .iter()
        .find(|t| t.contains("hour") || t.contains("minute") || t.contains("second"))
        .map(|t| t.to_string());
}
