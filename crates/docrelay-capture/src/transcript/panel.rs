//! Reads the transcript from YouTube's own transcript panel.

use docrelay_browser::{BrowserError, ElementInfo, Locator, Page, SelectorStrategy, poll_until};
use docrelay_config::TranscriptConfig;
use tracing::debug;

const PANEL: &str = "ytd-transcript-renderer";
const SEGMENT: &str = "ytd-transcript-segment-renderer";
const SEGMENT_TEXT: &str = "yt-formatted-string.segment-text";
const EXPAND_DESCRIPTION: &str = "tp-yt-paper-button#expand, #expand";

/// Controls that open the transcript panel, most specific first.
fn show_transcript_strategy() -> SelectorStrategy {
    SelectorStrategy::css([
        r#"button[aria-label*="transcript" i]"#,
        r#"button[aria-label*="Show transcript" i]"#,
        r#"yt-button-shape button:has-text("Show transcript")"#,
        r#"[class*="transcript"] button"#,
        r#"ytd-button-renderer button:has-text("Show transcript")"#,
    ])
    .then(Locator::text(
        "button",
        ["transcript", "show transcript", "資訊文字", "顯示完整資訊文字"],
    ))
}

async fn first(page: &dyn Page, selector: &str) -> Option<ElementInfo> {
    page.query(selector, None).await.ok()?.into_iter().next()
}

/// Open the panel if needed and read every segment.
///
/// `Ok(None)` means the panel or its segments never showed up.
pub(crate) async fn read_panel(
    page: &dyn Page,
    config: &TranscriptConfig,
) -> Result<Option<String>, BrowserError> {
    let mut panel = first(page, PANEL).await;

    if panel.is_none() {
        expand_description(page, config).await?;

        let Some(button) = show_transcript_strategy().find_first(page, None, |_| true).await? else {
            debug!("No show-transcript control on page");
            return Ok(None);
        };
        page.click(&button.handle).await?;

        panel = poll_until(config.poll_interval(), config.panel_timeout(), move || async move {
            first(page, PANEL).await
        })
        .await;
    }

    let Some(panel) = panel else {
        debug!("Transcript panel did not appear");
        return Ok(None);
    };

    let scope = &panel.handle;
    let segments = poll_until(config.poll_interval(), config.segment_timeout(), move || async move {
        let found = page.query(SEGMENT, Some(scope)).await.ok()?;
        (!found.is_empty()).then_some(found)
    })
    .await;

    let Some(segments) = segments else {
        debug!("Transcript panel has no segments");
        return Ok(None);
    };

    let mut parts = Vec::with_capacity(segments.len());
    for segment in &segments {
        if let Some(text) = page.query(SEGMENT_TEXT, Some(&segment.handle)).await?.into_iter().next() {
            let text = text.text.trim();
            if !text.is_empty() {
                parts.push(text.to_string());
            }
        }
    }

    let transcript = parts.join(" ").trim().to_string();
    debug!("Read {} transcript segments", parts.len());
    Ok((!transcript.is_empty()).then_some(transcript))
}

async fn expand_description(page: &dyn Page, config: &TranscriptConfig) -> Result<(), BrowserError> {
    let Some(expand) = first(page, EXPAND_DESCRIPTION).await else {
        return Ok(());
    };
    let text = expand.text.to_lowercase();
    if text.contains("more") || text.contains("更多") {
        page.click(&expand.handle).await?;
        tokio::time::sleep(config.expand_delay()).await;
    }
    Ok(())
}
