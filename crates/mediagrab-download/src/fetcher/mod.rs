//! yt-dlp fetcher adapter.
//!
//! - `binary` - locating the executable
//! - `command` - argument construction from a `FetchRequest`
//! - `protocol` - parsing of the prefixed progress/title lines
//! - `ytdlp` - the `MediaFetcherPort` implementation

mod binary;
mod command;
mod protocol;
mod ytdlp;

pub use binary::{FetcherConfig, FetcherSetupError, YT_DLP_ENV};
pub use command::{fetch_args, metadata_args};
pub use protocol::{FetcherEvent, ProtocolError, parse_line, parse_metadata};
pub use ytdlp::YtDlpFetcher;
