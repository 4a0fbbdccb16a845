use bardo::utils::*;
use bardo::youtube::types::{MimeType, StreamFormat};
use chrono::NaiveDate;
use serde_json::json;

// Helper function to create a test format
fn create_test_format(itag: &str, vcodec: &str, acodec: &str, height: Option<u32>, kbps: f64) -> StreamFormat {
    StreamFormat {
        format_id: itag.to_string(),
        url: format!("https://rr.googlevideo.com/{}", itag),
        ext: "mp4".to_string(),
        mime_type: "video/mp4".to_string(),
        vcodec: vcodec.to_string(),
        acodec: acodec.to_string(),
        tbr: Some(kbps),
        width: None,
        height,
        fps: if vcodec == "none" { None } else { Some(30) },
        asr: None,
        audio_channels: None,
        filesize: None,
        format_note: None,
    }
}

#[test]
fn test_client_version() {
    let date = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
    assert_eq!(client_version(date), "1.20240105.01.00");
}

#[test]
fn test_parse_duration() {
    assert_eq!(parse_duration("3:32"), Some(212));
    assert_eq!(parse_duration("1:02:03"), Some(3723));
    assert_eq!(parse_duration("45"), Some(45));
    assert_eq!(parse_duration(" 0:07 "), Some(7));
    assert_eq!(parse_duration(""), None);
    assert_eq!(parse_duration("live"), None);
}

#[test]
fn test_parse_duration_overflow() {
    assert_eq!(parse_duration("18446744073709551615:00"), None);
    assert_eq!(parse_duration("1:18446744073709551615"), None);
    assert_eq!(parse_duration("18446744073709551615"), Some(u64::MAX));
}

#[test]
fn test_parse_leading_number() {
    assert_eq!(parse_leading_number("1,204 songs"), Some(1204));
    assert_eq!(parse_leading_number("12 songs"), Some(12));
    assert_eq!(parse_leading_number("songs"), None);
}

#[test]
fn test_text_of_runs_and_simple_text() {
    let runs = json!({ "runs": [ { "text": "Hello" }, { "text": ", " }, { "text": "World" } ] });
    assert_eq!(text_of(&runs).as_deref(), Some("Hello, World"));

    let simple = json!({ "simpleText": "3:45" });
    assert_eq!(text_of(&simple).as_deref(), Some("3:45"));

    assert_eq!(text_of(&json!({})), None);
}

#[test]
fn test_parse_mime_type() {
    let muxed = parse_mime_type("video/mp4; codecs=\"avc1.42001E, mp4a.40.2\"").unwrap();
    assert_eq!(
        muxed,
        MimeType {
            media: "video".to_string(),
            container: "mp4".to_string(),
            codecs: vec!["avc1.42001E".to_string(), "mp4a.40.2".to_string()],
        }
    );

    let audio = parse_mime_type("audio/webm; codecs=\"opus\"").unwrap();
    assert_eq!(audio.media, "audio");
    assert_eq!(audio.codecs, vec!["opus".to_string()]);

    let bare = parse_mime_type("video/3gpp").unwrap();
    assert!(bare.codecs.is_empty());

    assert!(parse_mime_type("garbage").is_none());
}

#[test]
fn test_format_extension() {
    let ext = |mime: &str| format_extension(&parse_mime_type(mime).unwrap());

    assert_eq!(ext("audio/mp4; codecs=\"mp4a.40.2\""), "m4a");
    assert_eq!(ext("video/mp4; codecs=\"avc1.4d401f\""), "mp4");
    assert_eq!(ext("audio/webm; codecs=\"opus\""), "webm");
    assert_eq!(ext("video/3gpp"), "3gp");
}

#[test]
fn test_is_valid_video_id() {
    assert!(is_valid_video_id("dQw4w9WgXcQ"));
    assert!(is_valid_video_id("a-b_c-d_e-f"));
    assert!(!is_valid_video_id(""));
    assert!(!is_valid_video_id("abc123"));
    assert!(!is_valid_video_id("dQw4w9WgXc!"));
}

#[test]
fn test_extract_video_id() {
    assert_eq!(
        extract_video_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ").as_deref(),
        Some("dQw4w9WgXcQ")
    );
    assert_eq!(
        extract_video_id("https://music.youtube.com/watch?list=PL1&v=dQw4w9WgXcQ").as_deref(),
        Some("dQw4w9WgXcQ")
    );
    assert_eq!(
        extract_video_id("https://youtu.be/dQw4w9WgXcQ").as_deref(),
        Some("dQw4w9WgXcQ")
    );

    // the service forwards ids untouched, so these reach the resolver
    assert_eq!(extract_video_id("https://www.youtube.com/watch?v="), None);
    assert_eq!(extract_video_id("https://www.youtube.com/watch?v=abc123"), None);
    assert_eq!(extract_video_id("https://example.com/watch?v=dQw4w9WgXcQ"), None);
    assert_eq!(extract_video_id("not a url"), None);
}

#[test]
fn test_best_video_format_prefers_height_then_bitrate() {
    let formats = vec![
        create_test_format("18", "avc1", "mp4a", Some(1080), 9000.0), // muxed, ignored
        create_test_format("136", "avc1", "none", Some(720), 2000.0),
        create_test_format("247", "vp9", "none", Some(720), 2500.0),
        create_test_format("135", "avc1", "none", Some(480), 8000.0),
        create_test_format("140", "none", "mp4a", None, 130.0),
    ];

    let best = best_video_format(&formats).unwrap();
    assert_eq!(best.format_id, "247");
}

#[test]
fn test_best_audio_format() {
    let formats = vec![
        create_test_format("139", "none", "mp4a", None, 48.0),
        create_test_format("251", "none", "opus", None, 160.0),
        create_test_format("140", "none", "mp4a", None, 130.0),
        create_test_format("136", "avc1", "none", Some(720), 2000.0),
    ];

    let best = best_audio_format(&formats).unwrap();
    assert_eq!(best.format_id, "251");
    assert!(best.fps.is_none());
}

#[test]
fn test_best_formats_absent() {
    let formats = vec![create_test_format("18", "avc1", "mp4a", Some(360), 500.0)];

    assert!(best_video_format(&formats).is_none());
    assert!(best_audio_format(&formats).is_none());
}
