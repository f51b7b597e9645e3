//! Persisted user settings: prompts and preferred platforms.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use docrelay_protocols::Platform;

use crate::error::ConfigError;

const DEFAULT_PDF_PROMPT: &str = "以考生的角度，分析問題並撰寫模擬答案，考慮到時間限制，條列式回答，盡可能使用學術性的關鍵字，並且用繁體中文回答。並在每一大題後加上詳解，解釋解題思路和脈絡。";
const DEFAULT_TRANSCRIPT_PROMPT: &str = "將所有英文字幕 翻譯成繁體中文，並附在每一行後面";
const DEFAULT_SUMMARIZE_PROMPT: &str = "請用繁體中文條列式整理這部影片字幕的重點摘要";

/// User-editable prompts and platforms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(rename = "prompt", default = "default_pdf_prompt")]
    pub pdf_prompt: String,

    #[serde(rename = "aiPlatform", default)]
    pub pdf_platform: Platform,

    #[serde(rename = "transcriptPrompt", alias = "youtubePrompt", default = "default_transcript_prompt")]
    pub transcript_prompt: String,

    #[serde(rename = "summarizePrompt", default = "default_summarize_prompt")]
    pub summarize_prompt: String,

    #[serde(rename = "youtubeAiPlatform", default)]
    pub youtube_platform: Platform,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            pdf_prompt: default_pdf_prompt(),
            pdf_platform: Platform::default(),
            transcript_prompt: default_transcript_prompt(),
            summarize_prompt: default_summarize_prompt(),
            youtube_platform: Platform::default(),
        }
    }
}

impl Settings {
    /// Prompt used for a transcript capture.
    pub fn transcript_prompt_for(&self, summarize: bool) -> &str {
        if summarize {
            &self.summarize_prompt
        } else {
            &self.transcript_prompt
        }
    }
}

fn default_pdf_prompt() -> String {
    DEFAULT_PDF_PROMPT.to_string()
}

fn default_transcript_prompt() -> String {
    DEFAULT_TRANSCRIPT_PROMPT.to_string()
}

fn default_summarize_prompt() -> String {
    DEFAULT_SUMMARIZE_PROMPT.to_string()
}

/// JSON-file backed settings storage.
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load settings, writing the defaults on first use.
    pub fn load(&self) -> Result<Settings, ConfigError> {
        if !self.path.exists() {
            info!("Creating default settings at {}", self.path.display());
            let settings = Settings::default();
            self.save(&settings)?;
            return Ok(settings);
        }

        let content = fs::read_to_string(&self.path)?;
        let settings: Settings = serde_json::from_str(&content)?;
        debug!("Loaded settings from {}", self.path.display());
        Ok(settings)
    }

    /// Overwrite the stored settings.
    pub fn save(&self, settings: &Settings) -> Result<(), ConfigError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(settings)?;
        fs::write(&self.path, content)?;
        Ok(())
    }

    /// Restore the defaults.
    pub fn reset(&self) -> Result<Settings, ConfigError> {
        let settings = Settings::default();
        self.save(&settings)?;
        Ok(settings)
    }

    /// Record the prompt/platform chosen for a PDF capture.
    pub fn remember_pdf(&self, prompt: &str, platform: Platform) -> Result<Settings, ConfigError> {
        let mut settings = self.load()?;
        settings.pdf_prompt = prompt.to_string();
        settings.pdf_platform = platform;
        self.save(&settings)?;
        Ok(settings)
    }

    /// Record the prompt/platform chosen for a transcript capture.
    pub fn remember_transcript(
        &self,
        prompt: &str,
        platform: Platform,
        summarize: bool,
    ) -> Result<Settings, ConfigError> {
        let mut settings = self.load()?;
        if summarize {
            settings.summarize_prompt = prompt.to_string();
        } else {
            settings.transcript_prompt = prompt.to_string();
        }
        settings.youtube_platform = platform;
        self.save(&settings)?;
        Ok(settings)
    }
}

#[cfg(test)]
#[path = "settings_tests.rs"]
mod tests;
