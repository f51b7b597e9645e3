//! Submit-control discovery.

use docrelay_browser::{BrowserError, ElementHandle, ElementInfo, Page};
use docrelay_config::AutomationConfig;
use tracing::debug;

use crate::profile::{PlatformProfile, SubmitHeuristic};

const COMPOSER_FORM: &str = r#"form[data-type="unified-composer"]"#;
const TRAILING_AREA: &str = r#"[class*="grid-area:trailing"], .\[grid-area\:trailing\]"#;
const ROUND_BUTTONS: &str = r#"button.rounded-full, button[class*="rounded-full"]"#;
const ICON_BUTTONS: &str = "button:has(svg)";
/// Buttons whose bottom edge is this close to the viewport bottom count as
/// part of the composer.
const BOTTOM_BAND_PX: f64 = 200.0;

/// Where the submit control stands.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitTarget {
    Enabled(ElementInfo),
    Disabled(ElementInfo),
    Missing,
}

async fn first_in(
    page: &dyn Page,
    selector: &str,
    scope: Option<&ElementHandle>,
) -> Result<Option<ElementInfo>, BrowserError> {
    Ok(page.query(selector, scope).await?.into_iter().next())
}

/// Poll the selector strategy, then fall back to the profile's heuristics.
pub(crate) async fn find_submit(
    page: &dyn Page,
    profile: &PlatformProfile,
    config: &AutomationConfig,
) -> Result<SubmitTarget, BrowserError> {
    let attempts = config.submit_attempts.max(1);
    for attempt in 1..=attempts {
        if let Some(button) = profile.submit.find_first(page, None, |el| !el.disabled).await? {
            debug!("Submit control found on attempt {}", attempt);
            return Ok(SubmitTarget::Enabled(button));
        }
        if attempt < attempts {
            tokio::time::sleep(config.submit_interval()).await;
        }
    }

    for heuristic in &profile.submit_heuristics {
        if let Some(button) = heuristic.find(page, profile).await? {
            debug!("Submit control found by {:?}", heuristic);
            return Ok(SubmitTarget::Enabled(button));
        }
    }

    Ok(match profile.submit.find_first(page, None, |_| true).await? {
        Some(button) => SubmitTarget::Disabled(button),
        None => SubmitTarget::Missing,
    })
}

impl SubmitHeuristic {
    pub(crate) async fn find(
        self,
        page: &dyn Page,
        profile: &PlatformProfile,
    ) -> Result<Option<ElementInfo>, BrowserError> {
        let usable = |el: &ElementInfo| !el.disabled && !profile.is_excluded(el);

        match self {
            SubmitHeuristic::ComposerTrailingButton => {
                let Some(form) = first_in(page, COMPOSER_FORM, None).await? else {
                    return Ok(None);
                };
                let Some(trailing) = first_in(page, TRAILING_AREA, Some(&form.handle)).await? else {
                    return Ok(None);
                };
                Ok(page
                    .query("button", Some(&trailing.handle))
                    .await?
                    .into_iter()
                    .find(|el| {
                        (el.has_class_fragment("rounded-full")
                            || el.has_class_fragment("composer-secondary-button"))
                            && usable(el)
                    }))
            }
            SubmitHeuristic::ComposerRoundButton => {
                let Some(form) = first_in(page, COMPOSER_FORM, None).await? else {
                    return Ok(None);
                };
                Ok(page
                    .query(ROUND_BUTTONS, Some(&form.handle))
                    .await?
                    .into_iter()
                    .find(|el| usable(el)))
            }
            SubmitHeuristic::RightmostNearBottom => {
                let viewport = page.viewport().await?;
                let floor = viewport.height - BOTTOM_BAND_PX;
                let mut best: Option<ElementInfo> = None;
                for el in page.query("button", None).await? {
                    if !usable(&el) || el.rect.bottom <= floor || el.rect.right <= 0.0 {
                        continue;
                    }
                    if best.as_ref().is_none_or(|b| el.rect.right > b.rect.right) {
                        best = Some(el);
                    }
                }
                Ok(best)
            }
            SubmitHeuristic::FirstIconButton => Ok(page
                .query(ICON_BUTTONS, None)
                .await?
                .into_iter()
                .find(|el| usable(el))),
        }
    }
}

#[cfg(test)]
#[path = "submit_tests.rs"]
mod tests;
