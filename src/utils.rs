use std::cmp::Ordering;

use chrono::NaiveDate;
use serde_json::Value;
use url::Url;

use crate::youtube::types::{MimeType, StreamFormat};

/// `WEB_REMIX` client version for the given day, e.g. `1.20240115.01.00`.
pub fn client_version(date: NaiveDate) -> String {
    format!("1.{}.01.00", date.format("%Y%m%d"))
}

/// Parses `H:MM:SS`, `M:SS` or `SS` into seconds.
pub fn parse_duration(text: &str) -> Option<u64> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    let mut seconds = 0u64;
    for part in text.split(':') {
        let value = part.trim().parse::<u64>().ok()?;
        seconds = seconds.checked_mul(60)?.checked_add(value)?;
    }
    Some(seconds)
}

/// Leading number of a label such as `1,234 songs`.
pub fn parse_leading_number(text: &str) -> Option<u64> {
    let digits: String = text
        .trim()
        .chars()
        .take_while(|c| c.is_ascii_digit() || *c == ',' || *c == '.')
        .filter(|c| c.is_ascii_digit())
        .collect();
    digits.parse::<u64>().ok()
}

/// Concatenated text of an InnerTube `runs` array, or its `simpleText`.
pub fn text_of(value: &Value) -> Option<String> {
    if let Some(simple) = value.get("simpleText").and_then(Value::as_str) {
        return Some(simple.to_string());
    }

    let runs = value.get("runs")?.as_array()?;
    let text: String = runs
        .iter()
        .filter_map(|r| r.get("text").and_then(Value::as_str))
        .collect();
    Some(text)
}

pub fn parse_mime_type(mime: &str) -> Option<MimeType> {
    let mut parts = mime.splitn(2, ';');
    let essence = parts.next()?.trim();
    let (media, container) = essence.split_once('/')?;
    if media.is_empty() || container.is_empty() {
        return None;
    }

    let codecs = parts
        .next()
        .and_then(|params| {
            params
                .split_once("codecs=")
                .map(|(_, list)| list.trim().trim_matches('"'))
        })
        .map(|list| {
            list.split(',')
                .map(|c| c.trim().to_string())
                .filter(|c| !c.is_empty())
                .collect()
        })
        .unwrap_or_default();

    Some(MimeType {
        media: media.to_string(),
        container: container.to_string(),
        codecs,
    })
}

/// File extension for a stream, using `m4a` for audio in an mp4 container.
pub fn format_extension(mime: &MimeType) -> &'static str {
    match (mime.media.as_str(), mime.container.as_str()) {
        ("audio", "mp4") => "m4a",
        (_, "mp4") => "mp4",
        (_, "webm") => "webm",
        (_, "3gpp") => "3gp",
        _ => "unknown_video",
    }
}

pub fn is_valid_video_id(id: &str) -> bool {
    id.len() == 11
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Video id of a `youtube.com/watch?v=` or `youtu.be/` link.
pub fn extract_video_id(watch_url: &str) -> Option<String> {
    let url = Url::parse(watch_url).ok()?;
    let host = url.host_str()?;

    let id = if host == "youtu.be" {
        url.path_segments()?.next()?.to_string()
    } else if host.ends_with("youtube.com") {
        url.query_pairs()
            .find(|(key, _)| key == "v")
            .map(|(_, value)| value.into_owned())?
    } else {
        return None;
    };

    is_valid_video_id(&id).then_some(id)
}

pub fn best_video_format(formats: &[StreamFormat]) -> Option<&StreamFormat> {
    formats
        .iter()
        .filter(|f| f.is_video_only())
        .max_by(|a, b| {
            a.height
                .cmp(&b.height)
                .then_with(|| compare_bitrate(a.tbr, b.tbr))
        })
}

pub fn best_audio_format(formats: &[StreamFormat]) -> Option<&StreamFormat> {
    formats
        .iter()
        .filter(|f| f.is_audio_only())
        .max_by(|a, b| compare_bitrate(a.tbr, b.tbr))
}

fn compare_bitrate(a: Option<f64>, b: Option<f64>) -> Ordering {
    a.unwrap_or(0.0)
        .partial_cmp(&b.unwrap_or(0.0))
        .unwrap_or(Ordering::Equal)
}
