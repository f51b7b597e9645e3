//! Per-platform automation profiles.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use docrelay_browser::{ElementInfo, Locator, SelectorStrategy};
use docrelay_protocols::Platform;

/// Last-resort ways of finding a submit control once the selector strategy
/// has been exhausted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmitHeuristic {
    /// Round button in the trailing grid area of the composer form.
    ComposerTrailingButton,
    /// Any round button inside the composer form.
    ComposerRoundButton,
    /// Rightmost enabled button near the bottom of the viewport.
    RightmostNearBottom,
    /// First enabled button that contains an icon.
    FirstIconButton,
}

/// How the driver finds its way around one destination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformProfile {
    pub platform: Platform,
    /// Text-entry element.
    pub composer: SelectorStrategy,
    /// `<input type=file>` candidates.
    pub file_input: SelectorStrategy,
    /// Controls that reveal a file input when clicked.
    pub attach_trigger: SelectorStrategy,
    /// Submit control; the first enabled match wins.
    pub submit: SelectorStrategy,
    pub submit_heuristics: Vec<SubmitHeuristic>,
    /// Aria-label fragments that rule a button out as a submit control.
    pub excluded_labels: Vec<String>,
    /// Wait after attaching a file.
    pub upload_settle_ms: u64,
    /// Wait after inserting text, before looking for the submit control.
    pub insert_settle_ms: u64,
}

const EXCLUDED_LABELS: [&str; 9] = [
    "voice", "dictate", "remove", "delete", "plus", "add", "attach", "移除", "刪除",
];

/// Controls an attach-trigger scan must never click: they submit, record or
/// discard instead of opening a file picker.
const NON_ATTACH_LABELS: [&str; 9] = [
    "send", "submit", "voice", "dictate", "remove", "delete", "送出", "移除", "刪除",
];

fn file_input_strategy() -> SelectorStrategy {
    SelectorStrategy::css([
        r#"input[type="file"]"#,
        r#"input[accept*="pdf"]"#,
        r#"input[accept*="application/pdf"]"#,
    ])
}

fn excluded_labels() -> Vec<String> {
    EXCLUDED_LABELS.iter().map(|s| s.to_string()).collect()
}

impl PlatformProfile {
    pub fn for_platform(platform: Platform) -> Self {
        match platform {
            Platform::ChatGpt => Self::chatgpt(),
            Platform::Claude => Self::claude(),
        }
    }

    pub fn chatgpt() -> Self {
        Self {
            platform: Platform::ChatGpt,
            composer: SelectorStrategy::css([
                r#"div#prompt-textarea[contenteditable="true"]"#,
                "#prompt-textarea",
                r#"div[contenteditable="true"]"#,
                "textarea",
            ]),
            file_input: file_input_strategy(),
            attach_trigger: SelectorStrategy::css([
                r#"button[aria-label*="Attach"]"#,
                r#"button[aria-label*="附加"]"#,
                "button:has(svg)",
            ]),
            submit: SelectorStrategy::css([
                r#"button[data-testid="send-button"]"#,
                r#"button[data-testid="fruitjuice-send-button"]"#,
                r#"button[aria-label*="Send"]"#,
                r#"button[aria-label*="送出"]"#,
                r#"button[type="submit"]"#,
            ])
            .then(Locator::text("button", ["send"])),
            submit_heuristics: vec![
                SubmitHeuristic::ComposerTrailingButton,
                SubmitHeuristic::ComposerRoundButton,
                SubmitHeuristic::RightmostNearBottom,
            ],
            excluded_labels: excluded_labels(),
            upload_settle_ms: 5000,
            insert_settle_ms: 2000,
        }
    }

    pub fn claude() -> Self {
        Self {
            platform: Platform::Claude,
            composer: SelectorStrategy::css([r#"div[contenteditable="true"]"#, "textarea"]),
            file_input: file_input_strategy(),
            attach_trigger: SelectorStrategy::new(vec![Locator::text(
                r#"button, [role="button"]"#,
                ["attach", "upload", "file"],
            )]),
            submit: SelectorStrategy::css([
                r#"button[type="submit"]"#,
                r#"button[aria-label*="Send"]"#,
                r#"button[aria-label*="submit"]"#,
                r#"button[data-testid*="send"]"#,
                r#"button[data-testid*="submit"]"#,
            ])
            .then(Locator::text("button", ["send", "submit", "發送", "送出"])),
            submit_heuristics: vec![SubmitHeuristic::FirstIconButton],
            excluded_labels: excluded_labels(),
            upload_settle_ms: 2000,
            insert_settle_ms: 500,
        }
    }

    pub fn upload_settle(&self) -> Duration {
        Duration::from_millis(self.upload_settle_ms)
    }

    pub fn insert_settle(&self) -> Duration {
        Duration::from_millis(self.insert_settle_ms)
    }

    /// Whether the element's aria-label names a non-submit function.
    pub fn is_excluded(&self, element: &ElementInfo) -> bool {
        let label = element.label_lower();
        self.excluded_labels
            .iter()
            .any(|fragment| label.contains(&fragment.to_lowercase()))
    }

    /// Whether a candidate attach trigger is really a submit, voice or
    /// delete control.
    pub fn is_unsafe_attach_trigger(&self, element: &ElementInfo) -> bool {
        let label = element.label_lower();
        NON_ATTACH_LABELS.iter().any(|fragment| label.contains(fragment))
    }
}

#[cfg(test)]
#[path = "profile_tests.rs"]
mod tests;
