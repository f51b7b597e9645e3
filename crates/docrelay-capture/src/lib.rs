//! Capture side of docrelay: decide whether a page is a usable source and
//! acquire its artifact.
//!
//! - [`CaptureProbe`] classifies a URL as a PDF, a YouTube watch page, or neither
//! - [`PdfDownloader`] fetches the PDF bytes
//! - [`TranscriptExtractor`] pulls caption text out of a YouTube tab

mod download;
mod error;
mod probe;
pub mod transcript;

pub use download::{PdfDocument, PdfDownloader, filename_from_url};
pub use error::CaptureError;
pub use probe::{CaptureProbe, SourceKind, youtube_video_id};
pub use transcript::{CaptionFetcher, CaptionTrack, HttpCaptionFetcher, TranscriptExtractor};
