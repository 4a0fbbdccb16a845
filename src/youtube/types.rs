use serde::{Deserialize, Serialize};
use tabled::Tabled;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Thumbnail {
    pub url: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaylistAuthor {
    pub name: String,
    pub id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Playlist {
    pub id: String,
    pub privacy: String,
    pub title: String,
    pub description: Option<String>,
    pub author: Option<PlaylistAuthor>,
    pub year: Option<String>,
    pub duration: Option<String>,
    #[serde(rename = "trackCount")]
    pub track_count: Option<u64>,
    pub thumbnails: Vec<Thumbnail>,
    pub tracks: Vec<PlaylistTrack>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackArtist {
    pub name: String,
    pub id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackAlbum {
    pub name: String,
    pub id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaylistTrack {
    #[serde(rename = "videoId")]
    pub video_id: Option<String>,
    pub title: String,
    pub artists: Vec<TrackArtist>,
    pub album: Option<TrackAlbum>,
    pub duration: Option<String>,
    pub duration_seconds: Option<u64>,
    pub thumbnails: Vec<Thumbnail>,
    #[serde(rename = "isAvailable")]
    pub is_available: bool,
    #[serde(rename = "isExplicit")]
    pub is_explicit: bool,
    #[serde(rename = "setVideoId")]
    pub set_video_id: Option<String>,
}

#[derive(Tabled)]
pub struct TrackTableRow {
    pub title: String,
    pub artists: String,
    pub duration: String,
    pub video_id: String,
}

impl From<&PlaylistTrack> for TrackTableRow {
    fn from(track: &PlaylistTrack) -> Self {
        Self {
            title: track.title.clone(),
            artists: track
                .artists
                .iter()
                .map(|a| a.name.as_str())
                .collect::<Vec<_>>()
                .join(", "),
            duration: track.duration.clone().unwrap_or_default(),
            video_id: track.video_id.clone().unwrap_or_default(),
        }
    }
}

/// Media type, container and codecs split out of a `mimeType` string such as
/// `video/mp4; codecs="avc1.4d401f, mp4a.40.2"`.
#[derive(Debug, Clone, PartialEq)]
pub struct MimeType {
    pub media: String,
    pub container: String,
    pub codecs: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreamFormat {
    pub format_id: String,
    pub url: String,
    pub ext: String,
    pub mime_type: String,
    pub vcodec: String,
    pub acodec: String,
    /// Total bitrate in kbit/s.
    pub tbr: Option<f64>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub fps: Option<u32>,
    pub asr: Option<u32>,
    pub audio_channels: Option<u32>,
    pub filesize: Option<u64>,
    pub format_note: Option<String>,
}

impl StreamFormat {
    pub fn is_audio_only(&self) -> bool {
        self.vcodec == "none" && self.acodec != "none"
    }

    pub fn is_video_only(&self) -> bool {
        self.acodec == "none" && self.vcodec != "none"
    }
}

#[derive(Tabled)]
pub struct FormatTableRow {
    pub itag: String,
    pub ext: String,
    pub note: String,
    pub vcodec: String,
    pub acodec: String,
    pub kbps: String,
}

impl From<&StreamFormat> for FormatTableRow {
    fn from(format: &StreamFormat) -> Self {
        Self {
            itag: format.format_id.clone(),
            ext: format.ext.clone(),
            note: format.format_note.clone().unwrap_or_default(),
            vcodec: format.vcodec.clone(),
            acodec: format.acodec.clone(),
            kbps: format
                .tbr
                .map(|tbr| format!("{:.0}", tbr))
                .unwrap_or_default(),
        }
    }
}

/// Video level metadata plus every directly playable format. Serialized under
/// `_ydl_info`, which is the key the web client reads thumbnails and the audio
/// URL from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreamInfo {
    pub id: String,
    pub title: String,
    pub uploader: String,
    pub channel_id: Option<String>,
    pub duration: Option<u64>,
    pub view_count: Option<u64>,
    pub description: Option<String>,
    pub thumbnails: Vec<Thumbnail>,
    pub formats: Vec<StreamFormat>,
    pub requested_formats: Vec<StreamFormat>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreamDescriptor {
    pub videoid: String,
    pub watchv_url: String,
    pub title: String,
    pub author: String,
    pub length: Option<u64>,
    pub viewcount: Option<u64>,
    pub thumb: Option<String>,
    pub bigthumb: Option<String>,
    #[serde(rename = "_ydl_info")]
    pub info: StreamInfo,
}

impl StreamDescriptor {
    /// The audio-only entry of `requested_formats`, which is what the player
    /// hands to its `<video>` element.
    pub fn audio_url(&self) -> Option<&str> {
        self.info
            .requested_formats
            .iter()
            .find(|f| f.fps.is_none())
            .map(|f| f.url.as_str())
    }
}
