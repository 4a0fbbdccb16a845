use async_trait::async_trait;
use reqwest::{Client, header};
use serde::Deserialize;
use serde_json::{Value, json};

use super::{
    StreamResolver, YT_BASE_URL, YoutubeError,
    types::{StreamDescriptor, StreamFormat, StreamInfo, Thumbnail},
};
use crate::{api::WATCH_URL_PREFIX, utils};

const ANDROID_CLIENT_VERSION: &str = "19.09.37";
const ANDROID_USER_AGENT: &str = "com.google.android.youtube/19.09.37 (Linux; U; Android 11) gzip";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlayerResponse {
    playability_status: PlayabilityStatus,
    video_details: Option<VideoDetails>,
    streaming_data: Option<StreamingData>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlayabilityStatus {
    status: String,
    reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VideoDetails {
    video_id: String,
    title: String,
    author: String,
    channel_id: Option<String>,
    length_seconds: Option<String>,
    view_count: Option<String>,
    short_description: Option<String>,
    thumbnail: Option<ThumbnailList>,
}

#[derive(Debug, Deserialize)]
struct ThumbnailList {
    thumbnails: Vec<Thumbnail>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StreamingData {
    #[serde(default)]
    formats: Vec<RawFormat>,
    #[serde(default)]
    adaptive_formats: Vec<RawFormat>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawFormat {
    itag: Option<u32>,
    url: Option<String>,
    mime_type: Option<String>,
    bitrate: Option<u64>,
    width: Option<u32>,
    height: Option<u32>,
    fps: Option<u32>,
    quality_label: Option<String>,
    audio_quality: Option<String>,
    audio_sample_rate: Option<String>,
    audio_channels: Option<u32>,
    content_length: Option<String>,
}

/// YouTube stream resolver backed by the InnerTube `player` endpoint.
///
/// Uses the Android client, whose responses carry direct format URLs for most
/// videos. Formats that only come with a `signatureCipher` are skipped.
#[derive(Debug, Clone)]
pub struct YtStreamResolver {
    client: Client,
    base_url: String,
}

impl Default for YtStreamResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl YtStreamResolver {
    pub fn new() -> Self {
        Self::with_base_url(YT_BASE_URL)
    }

    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Resolves a watch URL into its metadata and playable formats.
    ///
    /// # Errors
    ///
    /// - `YoutubeError::InvalidVideoUrl` - no 11 character video id in the URL
    /// - `YoutubeError::Http` - network failure or non-2xx status
    /// - `YoutubeError::Unplayable` - YouTube refused playback (private,
    ///   removed, age-gated, ...)
    pub async fn fetch_descriptor(&self, url: &str) -> Result<StreamDescriptor, YoutubeError> {
        let video_id = utils::extract_video_id(url).ok_or_else(|| YoutubeError::InvalidVideoUrl {
            url: url.to_string(),
        })?;

        let body = json!({
            "videoId": video_id,
            "context": {
                "client": {
                    "clientName": "ANDROID",
                    "clientVersion": ANDROID_CLIENT_VERSION,
                    "androidSdkVersion": 30,
                    "hl": "en",
                    "gl": "US"
                }
            },
            "contentCheckOk": true,
            "racyCheckOk": true
        });

        let response = self
            .client
            .post(format!("{}/player", self.base_url))
            .header(header::USER_AGENT, ANDROID_USER_AGENT)
            .header("X-YouTube-Client-Name", "3")
            .header("X-YouTube-Client-Version", ANDROID_CLIENT_VERSION)
            .json(&body)
            .send()
            .await?
            .error_for_status()?;

        let player = response.json::<Value>().await?;
        descriptor_from_player(player)
    }
}

#[async_trait]
impl StreamResolver for YtStreamResolver {
    async fn resolve(&self, url: &str) -> Result<Value, YoutubeError> {
        let descriptor = self.fetch_descriptor(url).await?;
        Ok(serde_json::to_value(descriptor)?)
    }
}

/// Builds a descriptor out of a raw `player` response.
pub(crate) fn descriptor_from_player(player: Value) -> Result<StreamDescriptor, YoutubeError> {
    let player: PlayerResponse = serde_json::from_value(player)?;

    if player.playability_status.status != "OK" {
        return Err(YoutubeError::Unplayable {
            reason: player
                .playability_status
                .reason
                .unwrap_or(player.playability_status.status),
        });
    }

    let details = player
        .video_details
        .ok_or_else(|| YoutubeError::UnexpectedResponse {
            reason: "player response has no videoDetails".to_string(),
        })?;
    let streaming = player.streaming_data.unwrap_or_default();

    let formats: Vec<StreamFormat> = streaming
        .formats
        .into_iter()
        .chain(streaming.adaptive_formats)
        .filter_map(convert_format)
        .collect();

    let requested_formats: Vec<StreamFormat> = utils::best_video_format(&formats)
        .into_iter()
        .chain(utils::best_audio_format(&formats))
        .cloned()
        .collect();

    let thumbnails = details
        .thumbnail
        .map(|t| t.thumbnails)
        .unwrap_or_default();
    let length = details
        .length_seconds
        .as_deref()
        .and_then(|s| s.parse::<u64>().ok());
    let viewcount = details
        .view_count
        .as_deref()
        .and_then(|s| s.parse::<u64>().ok());

    Ok(StreamDescriptor {
        watchv_url: format!("{}{}", WATCH_URL_PREFIX, details.video_id),
        videoid: details.video_id.clone(),
        title: details.title.clone(),
        author: details.author.clone(),
        length,
        viewcount,
        thumb: thumbnails.first().map(|t| t.url.clone()),
        bigthumb: thumbnails.last().map(|t| t.url.clone()),
        info: StreamInfo {
            id: details.video_id,
            title: details.title,
            uploader: details.author,
            channel_id: details.channel_id,
            duration: length,
            view_count: viewcount,
            description: details.short_description,
            thumbnails,
            formats,
            requested_formats,
        },
    })
}

fn convert_format(raw: RawFormat) -> Option<StreamFormat> {
    let url = raw.url?;
    let itag = raw.itag?;
    let mime_type = raw.mime_type?;
    let mime = utils::parse_mime_type(&mime_type)?;

    let (vcodec, acodec) = match (mime.media.as_str(), mime.codecs.as_slice()) {
        ("audio", [codec, ..]) => ("none".to_string(), codec.clone()),
        ("video", [video, audio, ..]) => (video.clone(), audio.clone()),
        ("video", [video]) => (video.clone(), "none".to_string()),
        _ => return None,
    };

    let is_audio = mime.media == "audio";
    Some(StreamFormat {
        format_id: itag.to_string(),
        url,
        ext: utils::format_extension(&mime).to_string(),
        mime_type,
        vcodec,
        acodec,
        tbr: raw.bitrate.map(|b| b as f64 / 1000.0),
        width: raw.width,
        height: raw.height,
        fps: if is_audio { None } else { raw.fps },
        asr: raw
            .audio_sample_rate
            .as_deref()
            .and_then(|s| s.parse::<u32>().ok()),
        audio_channels: raw.audio_channels,
        filesize: raw
            .content_length
            .as_deref()
            .and_then(|s| s.parse::<u64>().ok()),
        format_note: if is_audio {
            raw.audio_quality
        } else {
            raw.quality_label
        },
    })
}
