//! Progress normalization and throttling.
//!
//! - `normalizer` turns raw fetcher payloads into `ProgressEvent`s
//! - `throttle` rate-limits rendering for adapters

mod normalizer;
mod throttle;

pub use normalizer::{ProgressNormalizer, parse_percent_str, strip_ansi};
pub use throttle::ProgressThrottle;
