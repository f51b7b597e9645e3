//! `probe` and `transcript` handlers: run one capture step on its own.

use std::sync::Arc;

use docrelay_capture::{CaptureProbe, HttpCaptionFetcher, SourceKind, TranscriptExtractor};
use docrelay_config::Config;

/// Classify a URL the way `send` would.
pub(crate) async fn probe(config: &Config, url: &str) -> Result<(), Box<dyn std::error::Error>> {
    let probe = CaptureProbe::new(&config.capture);
    let verdict = match probe.classify(url).await {
        SourceKind::Pdf => "pdf",
        SourceKind::YouTubeWatch => "youtube",
        SourceKind::None => "none",
    };
    println!("{}", verdict);
    Ok(())
}

/// Print the transcript of a watch page without relaying it.
pub(crate) async fn transcript(
    config: &Config,
    tab: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let browser = crate::browser(config);
    let page = match tab {
        Some(target_id) => browser.attach_tab(&target_id).await?,
        None => browser.active_tab().await?,
    };

    let fetcher = Arc::new(HttpCaptionFetcher::new(&config.capture));
    let extractor = TranscriptExtractor::new(config.transcript.clone(), fetcher);
    let text = extractor.extract(page.as_ref()).await?;
    println!("{}", text);

    browser.close().await?;
    Ok(())
}
