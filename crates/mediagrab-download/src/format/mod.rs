//! Format resolution.
//!
//! Maps a (media type, quality selector) pair to the format-selector
//! expression and post-processing directives handed to the fetcher.
//!
//! # Rules
//!
//! - Audio types always select `bestaudio/best` and extract audio; they never
//!   carry a height predicate. `Worst` and `HeightCap` are ignored for them.
//! - Video types use a per-type default expression; `Worst` selects its dual
//!   and `HeightCap(h)` bounds both streams by height. The merge container is
//!   never changed by the quality selector.
//! - `AudioBitrate` on a video type is ignored.
//!
//! ```ignore
//! let plan = resolve_format(MediaType::VideoContainer, QualitySelector::HeightCap(480));
//! assert_eq!(plan.format_spec, "bestvideo[height<=480]+bestaudio/best[height<=480]");
//! ```

use mediagrab_core::download::{
    AudioCodec, AudioExtraction, Container, DEFAULT_MP3_BITRATE_KBPS, FormatPlan, MediaType,
    PostProcessing, QualitySelector,
};

const BEST_AUDIO: &str = "bestaudio/best";
const MP4_BEST: &str = "bestvideo[ext=mp4]+bestaudio[ext=m4a]/best[ext=mp4]/best";
const MP4_WORST: &str = "worstvideo[ext=mp4]+worstaudio[ext=m4a]/worst[ext=mp4]/worst";
const MKV_BEST: &str = "bestvideo+bestaudio/best";
const MKV_WORST: &str = "worstvideo+worstaudio/worst";

/// Resolve a typed request into a format plan. Pure and infallible.
#[must_use]
pub fn resolve_format(media_type: MediaType, quality: QualitySelector) -> FormatPlan {
    match media_type {
        MediaType::AudioMp3 => audio_plan(AudioCodec::Mp3, Some(mp3_bitrate(quality))),
        MediaType::AudioM4a => audio_plan(AudioCodec::M4a, None),
        MediaType::VideoContainer => video_plan(Container::Mp4, MP4_BEST, MP4_WORST, quality),
        MediaType::VideoAudioMkv => video_plan(Container::Mkv, MKV_BEST, MKV_WORST, quality),
    }
}

const fn mp3_bitrate(quality: QualitySelector) -> u32 {
    match quality {
        QualitySelector::AudioBitrate(kbps) => kbps,
        _ => DEFAULT_MP3_BITRATE_KBPS,
    }
}

fn audio_plan(codec: AudioCodec, bitrate_kbps: Option<u32>) -> FormatPlan {
    FormatPlan {
        format_spec: BEST_AUDIO.to_string(),
        post_processing: PostProcessing {
            merge_container: None,
            extract_audio: Some(AudioExtraction {
                codec,
                bitrate_kbps,
            }),
        },
    }
}

fn video_plan(
    container: Container,
    best: &str,
    worst: &str,
    quality: QualitySelector,
) -> FormatPlan {
    let format_spec = match quality {
        QualitySelector::HeightCap(h) => {
            format!("bestvideo[height<={h}]+bestaudio/best[height<={h}]")
        }
        QualitySelector::Worst => worst.to_string(),
        QualitySelector::Best | QualitySelector::AudioBitrate(_) => best.to_string(),
    };

    FormatPlan {
        format_spec,
        post_processing: PostProcessing {
            merge_container: Some(container),
            extract_audio: None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_QUALITIES: [QualitySelector; 6] = [
        QualitySelector::Best,
        QualitySelector::Worst,
        QualitySelector::HeightCap(480),
        QualitySelector::HeightCap(1080),
        QualitySelector::AudioBitrate(128),
        QualitySelector::AudioBitrate(320),
    ];

    #[test]
    fn test_audio_never_has_height_predicate() {
        for media in [MediaType::AudioMp3, MediaType::AudioM4a] {
            for quality in ALL_QUALITIES {
                let plan = resolve_format(media, quality);
                assert!(!plan.format_spec.contains("height"), "{media} {quality}");
                assert_eq!(plan.format_spec, "bestaudio/best");
                assert!(plan.post_processing.merge_container.is_none());
            }
        }
    }

    #[test]
    fn test_height_cap_on_mp4_keeps_container() {
        let plan = resolve_format(MediaType::VideoContainer, QualitySelector::HeightCap(480));
        assert_eq!(
            plan.format_spec,
            "bestvideo[height<=480]+bestaudio/best[height<=480]"
        );
        assert_eq!(plan.post_processing.merge_container, Some(Container::Mp4));
        assert!(plan.post_processing.extract_audio.is_none());
    }

    #[test]
    fn test_height_cap_on_mkv_keeps_container() {
        let plan = resolve_format(MediaType::VideoAudioMkv, QualitySelector::HeightCap(720));
        assert!(plan.format_spec.contains("[height<=720]"));
        assert_eq!(plan.post_processing.merge_container, Some(Container::Mkv));
    }

    #[test]
    fn test_mp3_bitrate() {
        let plan = resolve_format(MediaType::AudioMp3, QualitySelector::AudioBitrate(320));
        let extract = plan.post_processing.extract_audio.unwrap();
        assert_eq!(extract.codec, AudioCodec::Mp3);
        assert_eq!(extract.bitrate_kbps, Some(320));

        for quality in [QualitySelector::Best, QualitySelector::HeightCap(720)] {
            let plan = resolve_format(MediaType::AudioMp3, quality);
            assert_eq!(
                plan.post_processing.extract_audio.unwrap().bitrate_kbps,
                Some(DEFAULT_MP3_BITRATE_KBPS)
            );
        }
    }

    #[test]
    fn test_m4a_has_no_bitrate() {
        let plan = resolve_format(MediaType::AudioM4a, QualitySelector::AudioBitrate(128));
        let extract = plan.post_processing.extract_audio.unwrap();
        assert_eq!(extract.codec, AudioCodec::M4a);
        assert_eq!(extract.bitrate_kbps, None);
    }

    #[test]
    fn test_video_defaults_and_worst() {
        assert_eq!(
            resolve_format(MediaType::VideoContainer, QualitySelector::Best).format_spec,
            MP4_BEST
        );
        assert_eq!(
            resolve_format(MediaType::VideoContainer, QualitySelector::Worst).format_spec,
            MP4_WORST
        );
        assert_eq!(
            resolve_format(MediaType::VideoAudioMkv, QualitySelector::Best).format_spec,
            MKV_BEST
        );
        assert_eq!(
            resolve_format(MediaType::VideoAudioMkv, QualitySelector::Worst).format_spec,
            MKV_WORST
        );
    }

    #[test]
    fn test_bitrate_on_video_is_ignored() {
        let plan = resolve_format(MediaType::VideoContainer, QualitySelector::AudioBitrate(192));
        assert_eq!(plan.format_spec, MP4_BEST);
        assert!(plan.post_processing.extract_audio.is_none());
    }

    #[test]
    fn test_resolution_is_deterministic() {
        for media in MediaType::ALL {
            for quality in ALL_QUALITIES {
                assert_eq!(resolve_format(media, quality), resolve_format(media, quality));
            }
        }
    }
}
