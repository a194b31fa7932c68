//! yt-dlp argument construction.

use std::ffi::OsString;

use mediagrab_core::ports::FetchRequest;

use super::protocol::{POSTPROCESS_PREFIX, PROGRESS_PREFIX, TITLE_PREFIX};

/// Arguments for a metadata-only run.
pub fn metadata_args(url: &str) -> Vec<OsString> {
    [
        "--dump-single-json",
        "--skip-download",
        "--no-playlist",
        "--no-warnings",
        "--",
        url,
    ]
    .into_iter()
    .map(OsString::from)
    .collect()
}

/// Arguments for the fetch itself.
pub fn fetch_args(request: &FetchRequest) -> Vec<OsString> {
    let plan = &request.plan;
    let mut args: Vec<OsString> = Vec::with_capacity(24);

    args.push("-f".into());
    args.push(plan.format_spec.clone().into());
    args.push("-o".into());
    args.push(request.target_dir.join("%(title)s.%(ext)s").into_os_string());

    if let Some(container) = plan.post_processing.merge_container {
        args.push("--merge-output-format".into());
        args.push(container.as_str().into());
    }

    if let Some(extract) = plan.post_processing.extract_audio {
        args.push("-x".into());
        args.push("--audio-format".into());
        args.push(extract.codec.as_str().into());
        if let Some(kbps) = extract.bitrate_kbps {
            args.push("--audio-quality".into());
            args.push(format!("{kbps}K").into());
        }
    }

    for flag in ["--no-playlist", "--newline", "--progress", "--no-colors"] {
        args.push(flag.into());
    }
    args.push("--progress-template".into());
    args.push(format!("download:{PROGRESS_PREFIX}%(progress)j").into());
    args.push("--progress-template".into());
    args.push(format!("postprocess:{POSTPROCESS_PREFIX}%(progress)j").into());
    args.push("--print".into());
    args.push(format!("after_move:{TITLE_PREFIX}%(title)s").into());

    args.push("--".into());
    args.push(request.url.clone().into());
    args
}
