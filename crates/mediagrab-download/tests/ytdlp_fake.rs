//! yt-dlp adapter tests against a fake executable.
//!
//! The fake is a small shell script that answers the metadata call with a
//! canned info JSON and the fetch call with protocol lines, so the whole
//! spawn / stream / parse path runs without network access.

#![cfg(unix)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use tempfile::TempDir;

use mediagrab_download::{
    FetchRequest, JobError, MediaFetcherPort, MediaType, ProgressCallback, QualitySelector,
    RawProgress, RawStatus, YtDlpFetcher, resolve_format,
};

const METADATA_BRANCH: &str = r#"
for arg in "$@"; do
  if [ "$arg" = "--dump-single-json" ]; then
    echo '{"title": "Fake Clip", "duration": 125.4, "channel": "Fake Channel", "view_count": 1234567}'
    exit 0
  fi
done
"#;

fn fake_ytdlp(dir: &Path, fetch_body: &str) -> PathBuf {
    let path = dir.join("yt-dlp");
    fs::write(&path, format!("#!/bin/sh\n{METADATA_BRANCH}\n{fetch_body}\n")).unwrap();
    let mut perms = fs::metadata(&path).unwrap().permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&path, perms).unwrap();
    path
}

fn request(dir: &Path) -> FetchRequest {
    FetchRequest {
        url: "https://valid/video".to_string(),
        target_dir: dir.to_path_buf(),
        plan: resolve_format(MediaType::VideoContainer, QualitySelector::HeightCap(720)),
    }
}

fn recording_callback() -> (ProgressCallback, Arc<Mutex<Vec<RawProgress>>>) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let callback: ProgressCallback = Box::new(move |raw| {
        sink.lock().unwrap().push(raw);
        Ok(())
    });
    (callback, seen)
}

#[tokio::test]
async fn metadata_is_parsed_from_dump_json() {
    let dir = TempDir::new().unwrap();
    let fetcher = YtDlpFetcher::new(fake_ytdlp(dir.path(), "exit 1"));

    let metadata = fetcher.extract_metadata("https://valid/video").await.unwrap();
    assert_eq!(metadata.title, "Fake Clip");
    assert_eq!(metadata.duration_seconds, Some(125));
    assert_eq!(metadata.uploader.as_deref(), Some("Fake Channel"));
    assert_eq!(metadata.views_display().as_deref(), Some("1,234,567"));
}

#[tokio::test]
async fn progress_lines_reach_the_callback() {
    let dir = TempDir::new().unwrap();
    let script = r#"
echo '[youtube] abc: Downloading webpage'
echo 'mediagrab-progress {"status": "downloading", "downloaded_bytes": 10, "total_bytes": 100, "_speed_str": "1.0MiB/s"}'
echo 'mediagrab-progress {"status": "downloading", "downloaded_bytes": 60.0, "total_bytes_estimate": 100.0}'
echo 'mediagrab-progress {"status": "finished", "filename": "Fake Clip.mp4"}'
echo 'mediagrab-postprocess {"status": "started", "postprocessor": "Merger"}'
echo 'mediagrab-title Fake Clip'
exit 0
"#;
    let fetcher = YtDlpFetcher::new(fake_ytdlp(dir.path(), script));
    let (callback, seen) = recording_callback();

    let outcome = fetcher.fetch(&request(dir.path()), &callback).await.unwrap();
    assert_eq!(outcome.final_title.as_deref(), Some("Fake Clip"));

    let seen = seen.lock().unwrap();
    let statuses: Vec<RawStatus> = seen.iter().map(|r| r.status).collect();
    assert_eq!(
        statuses,
        [
            RawStatus::Downloading,
            RawStatus::Downloading,
            RawStatus::Finished,
            RawStatus::Processing
        ]
    );
    assert_eq!(seen[0].downloaded_bytes, Some(10));
    assert_eq!(seen[0].speed_str.as_deref(), Some("1.0MiB/s"));
    assert_eq!(seen[1].total(), Some(100));
    assert_eq!(seen[2].filename.as_deref(), Some("Fake Clip.mp4"));
    assert_eq!(seen[3].postprocessor.as_deref(), Some("Merger"));
}

#[tokio::test]
async fn failing_exit_reports_the_error_line() {
    let dir = TempDir::new().unwrap();
    let script = r#"
echo 'WARNING: falling back' >&2
echo 'ERROR: [generic] Unable to download webpage: HTTP Error 404' >&2
exit 1
"#;
    let fetcher = YtDlpFetcher::new(fake_ytdlp(dir.path(), script));
    let (callback, _seen) = recording_callback();

    let err = fetcher.fetch(&request(dir.path()), &callback).await.unwrap_err();
    assert_eq!(
        err,
        JobError::fetch("[generic] Unable to download webpage: HTTP Error 404")
    );
}

#[tokio::test]
async fn aborting_callback_stops_the_process() {
    let dir = TempDir::new().unwrap();
    let script = r#"
echo 'mediagrab-progress {"status": "downloading", "downloaded_bytes": 30, "total_bytes": 100}'
exec sleep 30
"#;
    let fetcher = YtDlpFetcher::new(fake_ytdlp(dir.path(), script));
    let callback: ProgressCallback = Box::new(|_| Err(JobError::Aborted));

    let result = tokio::time::timeout(
        std::time::Duration::from_secs(10),
        fetcher.fetch(&request(dir.path()), &callback),
    )
    .await
    .expect("fetch should return promptly after abort");
    assert_eq!(result, Err(JobError::Aborted));
}

#[tokio::test]
async fn missing_binary_is_an_extraction_error() {
    let dir = TempDir::new().unwrap();
    let fetcher = YtDlpFetcher::new(dir.path().join("no-such-yt-dlp"));

    let err = fetcher.extract_metadata("https://valid/video").await.unwrap_err();
    assert!(matches!(err, JobError::Extraction { .. }));
}
