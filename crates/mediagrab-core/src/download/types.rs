//! Core download types: media types, quality selectors and format plans.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::errors::JobError;

/// Audio bitrate (kbps) used when an mp3 request carries no explicit bitrate.
pub const DEFAULT_MP3_BITRATE_KBPS: u32 = 192;

/// The output kind a user asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MediaType {
    /// Video in an mp4 container.
    VideoContainer,
    /// Audio extracted to mp3.
    AudioMp3,
    /// Audio extracted to m4a.
    AudioM4a,
    /// Best video plus best audio merged into mkv.
    VideoAudioMkv,
}

impl MediaType {
    /// All media types, in menu order.
    pub const ALL: [Self; 4] = [
        Self::VideoContainer,
        Self::AudioMp3,
        Self::AudioM4a,
        Self::VideoAudioMkv,
    ];

    /// Whether this type produces a video file.
    #[must_use]
    pub const fn is_video(self) -> bool {
        matches!(self, Self::VideoContainer | Self::VideoAudioMkv)
    }

    /// Stable label stored in the history document.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::VideoContainer => "VideoContainer",
            Self::AudioMp3 => "AudioMp3",
            Self::AudioM4a => "AudioM4a",
            Self::VideoAudioMkv => "VideoAudioMkv",
        }
    }

    /// Human-readable name for menus.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::VideoContainer => "Video (MP4)",
            Self::AudioMp3 => "Audio (MP3)",
            Self::AudioM4a => "Audio (M4A)",
            Self::VideoAudioMkv => "Video + Audio (MKV)",
        }
    }

    /// Short token accepted on the command line.
    #[must_use]
    pub const fn short_name(self) -> &'static str {
        match self {
            Self::VideoContainer => "mp4",
            Self::AudioMp3 => "mp3",
            Self::AudioM4a => "m4a",
            Self::VideoAudioMkv => "mkv",
        }
    }

    /// Raw quality strings a front-end should offer for this type.
    #[must_use]
    pub const fn quality_presets(self) -> &'static [&'static str] {
        if self.is_video() {
            &["best", "worst", "1080p", "720p", "480p", "360p", "240p"]
        } else {
            &["320k", "192k", "128k", "64k"]
        }
    }

    /// Preset selected when the user has not picked one.
    #[must_use]
    pub const fn default_quality(self) -> &'static str {
        if self.is_video() { "720p" } else { "192k" }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for MediaType {
    type Err = JobError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mp4" | "video" | "videocontainer" => Ok(Self::VideoContainer),
            "mp3" | "audio" | "audiomp3" => Ok(Self::AudioMp3),
            "m4a" | "audiom4a" => Ok(Self::AudioM4a),
            "mkv" | "videoaudiomkv" => Ok(Self::VideoAudioMkv),
            other => Err(JobError::invalid_request(format!(
                "unknown media type '{other}' (expected mp4, mp3, m4a or mkv)"
            ))),
        }
    }
}

/// Typed quality selector, parsed once from the raw UI string.
///
/// `"480p"` and `"192k"` are structurally distinct: the former is a height
/// cap, the latter an audio bitrate. Labels such as `"Default (192k)"` are
/// accepted and parsed from the parenthesised part.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum QualitySelector {
    #[default]
    Best,
    Worst,
    /// Maximum video height in pixels.
    HeightCap(u32),
    /// Target audio bitrate in kbps.
    AudioBitrate(u32),
}

impl QualitySelector {
    /// Parse a raw quality string.
    pub fn parse(raw: &str) -> Result<Self, JobError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Ok(Self::Best);
        }

        // "Label (192k)" -> "192k"
        if let (Some(open), Some(close)) = (trimmed.rfind('('), trimmed.rfind(')')) {
            if open < close {
                return Self::parse_token(&trimmed[open + 1..close], raw);
            }
        }

        Self::parse_token(trimmed, raw)
    }

    fn parse_token(token: &str, raw: &str) -> Result<Self, JobError> {
        let lower = token.trim().to_ascii_lowercase();
        match lower.as_str() {
            "best" => return Ok(Self::Best),
            "worst" => return Ok(Self::Worst),
            _ => {}
        }

        let invalid = || JobError::invalid_request(format!("unrecognised quality '{raw}'"));

        if let Some(height) = lower.strip_suffix('p') {
            let value: u32 = height.trim().parse().map_err(|_| invalid())?;
            return if value == 0 { Err(invalid()) } else { Ok(Self::HeightCap(value)) };
        }

        let bitrate = lower
            .strip_suffix("kbps")
            .or_else(|| lower.strip_suffix('k'));
        if let Some(bitrate) = bitrate {
            let value: u32 = bitrate.trim().parse().map_err(|_| invalid())?;
            return if value == 0 { Err(invalid()) } else { Ok(Self::AudioBitrate(value)) };
        }

        Err(invalid())
    }
}

impl fmt::Display for QualitySelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Best => f.write_str("best"),
            Self::Worst => f.write_str("worst"),
            Self::HeightCap(h) => write!(f, "{h}p"),
            Self::AudioBitrate(k) => write!(f, "{k}k"),
        }
    }
}

impl FromStr for QualitySelector {
    type Err = JobError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Container the fetcher merges separate streams into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Container {
    Mp4,
    Mkv,
}

impl Container {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Mp4 => "mp4",
            Self::Mkv => "mkv",
        }
    }
}

impl fmt::Display for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Codec for audio extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioCodec {
    Mp3,
    M4a,
}

impl AudioCodec {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Mp3 => "mp3",
            Self::M4a => "m4a",
        }
    }
}

impl fmt::Display for AudioCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Audio extraction directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioExtraction {
    pub codec: AudioCodec,
    /// Target bitrate in kbps; `None` lets the fetcher choose.
    pub bitrate_kbps: Option<u32>,
}

/// Post-processing the fetcher applies after the download.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PostProcessing {
    /// Merge separate video/audio streams into this container.
    pub merge_container: Option<Container>,
    /// Extract the audio track to a standalone file.
    pub extract_audio: Option<AudioExtraction>,
}

/// Resolved format selection handed to the media fetcher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatPlan {
    /// Format-selector expression (e.g. `bestvideo+bestaudio/best`).
    pub format_spec: String,
    pub post_processing: PostProcessing,
}

/// Metadata extracted without downloading.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MediaMetadata {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_seconds: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uploader: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub view_count: Option<u64>,
}

impl MediaMetadata {
    /// Duration formatted as `mm:ss`, if known and non-zero.
    #[must_use]
    pub fn duration_display(&self) -> Option<String> {
        self.duration_seconds
            .filter(|d| *d > 0)
            .map(|d| format!("{:02}:{:02}", d / 60, d % 60))
    }

    /// View count with thousands separators.
    #[must_use]
    pub fn views_display(&self) -> Option<String> {
        self.view_count.map(group_thousands)
    }

    /// Multi-line summary for status displays.
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Title: {}\nChannel: {}\nDuration: {}\nViews: {}",
            self.title,
            self.uploader.as_deref().unwrap_or("unavailable"),
            self.duration_display()
                .unwrap_or_else(|| "unavailable".to_string()),
            self.views_display()
                .unwrap_or_else(|| "unavailable".to_string()),
        )
    }
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
