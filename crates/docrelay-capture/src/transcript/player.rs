//! Caption tracks from the embedded player state.

use std::sync::OnceLock;

use docrelay_browser::{BrowserError, Page};
use regex::Regex;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

const PLAYER_STATE: &str = "ytInitialPlayerResponse";
const PREFERRED_LANGUAGES: [&str; 3] = ["en", "en-US", "en-GB"];

/// One entry of `captions.playerCaptionsTracklistRenderer.captionTracks`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptionTrack {
    pub language_code: String,
    pub base_url: String,
}

fn embedded_state_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"var ytInitialPlayerResponse = (\{.+?\});").expect("valid regex"))
}

/// Player state from the page global, else from the first inline script that
/// embeds a parseable copy.
pub(crate) async fn player_state(page: &dyn Page) -> Result<Option<Value>, BrowserError> {
    if let Some(state) = page.global_json(PLAYER_STATE).await? {
        if state.is_object() {
            return Ok(Some(state));
        }
    }

    for script in page.inline_scripts(PLAYER_STATE).await? {
        match parse_embedded_state(&script) {
            Some(state) => return Ok(Some(state)),
            None => debug!("Inline script has no parseable player state"),
        }
    }
    Ok(None)
}

pub(crate) fn parse_embedded_state(script: &str) -> Option<Value> {
    let caps = embedded_state_regex().captures(script)?;
    serde_json::from_str(&caps[1]).ok()
}

pub(crate) fn caption_tracks(state: &Value) -> Vec<CaptionTrack> {
    state
        .pointer("/captions/playerCaptionsTracklistRenderer/captionTracks")
        .and_then(Value::as_array)
        .map(|tracks| {
            tracks
                .iter()
                .filter_map(|t| serde_json::from_value(t.clone()).ok())
                .collect()
        })
        .unwrap_or_default()
}

/// English if offered, otherwise the first track.
pub fn select_track(tracks: &[CaptionTrack]) -> Option<&CaptionTrack> {
    tracks
        .iter()
        .find(|t| PREFERRED_LANGUAGES.contains(&t.language_code.as_str()))
        .or_else(|| tracks.first())
}

/// Request `json3` unless the URL already names a format.
pub fn caption_url(base_url: &str) -> String {
    if base_url.contains("fmt=") {
        base_url.to_string()
    } else if base_url.contains('?') {
        format!("{base_url}&fmt=json3")
    } else {
        format!("{base_url}?fmt=json3")
    }
}
