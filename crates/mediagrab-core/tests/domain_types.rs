//! Integration tests for the public domain surface.
//!
//! Exercises the crate-root re-exports the way adapters use them.

use mediagrab_core::{
    AppConfig, HISTORY_CAPACITY, HistoryEntry, Job, JobRequest, JobState, MediaType,
    QualitySelector, UiEvent,
};

#[test]
fn test_config_document_round_trips_existing_file() {
    let raw = r#"{
        "downloads_path": "/home/user/Videos",
        "history": [
            {"date": "01/02/2024 10:30", "title": "First", "format": "AudioMp3"},
            {"date": "02/02/2024 11:00", "title": "Second", "format": "VideoContainer"}
        ]
    }"#;

    let config: AppConfig = serde_json::from_str(raw).unwrap();
    assert_eq!(config.downloads_path, "/home/user/Videos");
    assert_eq!(config.history.len(), 2);
    assert_eq!(config.recent_history(1)[0].title, "Second");

    let written = serde_json::to_value(&config).unwrap();
    assert_eq!(written["history"][0]["format"], "AudioMp3");
    assert_eq!(written["history"][1]["date"], "02/02/2024 11:00");
}

#[test]
fn test_unknown_keys_are_ignored() {
    let raw = r#"{"downloads_path": "d", "theme": "dark", "history": []}"#;
    let config: AppConfig = serde_json::from_str(raw).unwrap();
    assert_eq!(config.downloads_path, "d");
}

#[test]
fn test_history_bound_holds_for_long_runs() {
    let mut config = AppConfig::default();
    for i in 0..(HISTORY_CAPACITY * 3) {
        config.push_history(HistoryEntry::new("d", format!("t{i}"), "AudioM4a"));
        assert!(config.history.len() <= HISTORY_CAPACITY);
    }
    assert_eq!(config.history.first().unwrap().title, "t100");
}

#[test]
fn test_request_to_accepted_job() {
    let request =
        JobRequest::from_raw("https://example.com/watch?v=1", "/tmp", MediaType::VideoAudioMkv, "480p")
            .unwrap();
    let job = Job::accepted(request);
    assert_eq!(job.state, JobState::ExtractingMetadata);
    assert_eq!(job.quality, QualitySelector::HeightCap(480));
    assert_eq!(job.media_type.label(), "VideoAudioMkv");
}

#[test]
fn test_events_serialize_with_type_tag() {
    let event = UiEvent::error("Download error", "HTTP Error 404");
    let json = serde_json::to_value(&event).unwrap();
    assert_eq!(json["type"], "error_notice");
    assert_eq!(json["title"], "Download error");
}
