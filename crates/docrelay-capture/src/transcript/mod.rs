//! YouTube transcript extraction.
//!
//! Two strategies run in order against the watch page: the on-page transcript
//! panel, then the caption tracks listed in the embedded player state. The first
//! non-empty transcript wins.

mod captions;
mod fetcher;
mod panel;
mod player;

use std::sync::Arc;

use docrelay_browser::Page;
use docrelay_config::TranscriptConfig;
use tracing::{debug, info, warn};

use crate::error::CaptureError;
use crate::probe::youtube_video_id;

pub use captions::{decode_html_entities, parse_caption_body, unescape_xml};
pub use fetcher::{CaptionFetcher, HttpCaptionFetcher};
pub use player::{CaptionTrack, caption_url, select_track};

/// Extracts the transcript of the video shown on a page.
pub struct TranscriptExtractor {
    config: TranscriptConfig,
    fetcher: Arc<dyn CaptionFetcher>,
}

impl TranscriptExtractor {
    pub fn new(config: TranscriptConfig, fetcher: Arc<dyn CaptionFetcher>) -> Self {
        Self { config, fetcher }
    }

    pub async fn extract(&self, page: &dyn Page) -> Result<String, CaptureError> {
        match panel::read_panel(page, &self.config).await {
            Ok(Some(text)) => {
                info!("Transcript read from panel ({} chars)", text.chars().count());
                return Ok(text);
            }
            Ok(None) => debug!("Panel strategy found nothing"),
            Err(e) => warn!("Panel strategy failed: {}", e),
        }

        match self.from_player_state(page).await {
            Ok(Some(text)) => {
                info!("Transcript read from caption track ({} chars)", text.chars().count());
                return Ok(text);
            }
            Ok(None) => debug!("Player-state strategy found nothing"),
            Err(e) => warn!("Player-state strategy failed: {}", e),
        }

        Err(CaptureError::NoCaptionsAvailable)
    }

    async fn from_player_state(&self, page: &dyn Page) -> Result<Option<String>, CaptureError> {
        let url = page.url().await?;
        if youtube_video_id(&url).is_none() {
            debug!("No video id in {}", url);
            return Ok(None);
        }

        let Some(state) = player::player_state(page).await? else {
            return Ok(None);
        };
        let tracks = player::caption_tracks(&state);
        let Some(track) = select_track(&tracks) else {
            debug!("Player state lists no caption tracks");
            return Ok(None);
        };

        debug!("Using caption track {}", track.language_code);
        let body = self.fetcher.fetch(&caption_url(&track.base_url)).await?;
        Ok(parse_caption_body(&body))
    }
}

#[cfg(test)]
#[path = "transcript_tests.rs"]
mod tests;
