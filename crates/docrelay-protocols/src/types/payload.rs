//! Captured artifacts staged for a destination tab.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Platform;

/// Fallback name when a PDF URL has no usable last path segment.
pub const DEFAULT_PDF_FILENAME: &str = "document.pdf";

/// The captured artifact itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PayloadContent {
    /// Opaque PDF bytes and the name to upload them under.
    Pdf { bytes: Vec<u8>, filename: String },
    /// Plain caption text of a video.
    Transcript { text: String },
}

/// Discriminant of [`PayloadContent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayloadKind {
    Pdf,
    Transcript,
}

/// An artifact plus the prompt and platform chosen at capture time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payload {
    pub content: PayloadContent,
    pub prompt: String,
    pub platform: Platform,
    pub created_at: DateTime<Utc>,
}

impl Payload {
    /// Create a PDF payload.
    pub fn pdf(
        bytes: Vec<u8>,
        filename: impl Into<String>,
        prompt: impl Into<String>,
        platform: Platform,
    ) -> Self {
        Self {
            content: PayloadContent::Pdf {
                bytes,
                filename: filename.into(),
            },
            prompt: prompt.into(),
            platform,
            created_at: Utc::now(),
        }
    }

    /// Create a transcript payload.
    pub fn transcript(text: impl Into<String>, prompt: impl Into<String>, platform: Platform) -> Self {
        Self {
            content: PayloadContent::Transcript { text: text.into() },
            prompt: prompt.into(),
            platform,
            created_at: Utc::now(),
        }
    }

    /// Replace the creation timestamp.
    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    pub fn kind(&self) -> PayloadKind {
        match self.content {
            PayloadContent::Pdf { .. } => PayloadKind::Pdf,
            PayloadContent::Transcript { .. } => PayloadKind::Transcript,
        }
    }

    /// Text to type into the destination composer.
    ///
    /// For a PDF this is the prompt alone (the file travels as an attachment);
    /// for a transcript the captions follow the prompt after a blank line.
    pub fn composed_text(&self) -> String {
        match &self.content {
            PayloadContent::Pdf { .. } => self.prompt.clone(),
            PayloadContent::Transcript { text } => {
                let prompt = self.prompt.trim();
                if prompt.is_empty() {
                    text.clone()
                } else {
                    format!("{}\n\n{}", prompt, text)
                }
            }
        }
    }

    /// Size of the artifact in bytes.
    pub fn artifact_len(&self) -> usize {
        match &self.content {
            PayloadContent::Pdf { bytes, .. } => bytes.len(),
            PayloadContent::Transcript { text } => text.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pdf_payload_kind() {
        let payload = Payload::pdf(b"%PDF-1.4".to_vec(), "exam.pdf", "solve", Platform::Claude);
        assert_eq!(payload.kind(), PayloadKind::Pdf);
        assert_eq!(payload.artifact_len(), 8);
    }

    #[test]
    fn test_pdf_composed_text_is_prompt() {
        let payload = Payload::pdf(vec![1, 2, 3], "a.pdf", "summarize this", Platform::ChatGpt);
        assert_eq!(payload.composed_text(), "summarize this");
    }

    #[test]
    fn test_transcript_composed_text() {
        let payload = Payload::transcript("hello world", "Translate:", Platform::ChatGpt);
        assert_eq!(payload.composed_text(), "Translate:\n\nhello world");
    }

    #[test]
    fn test_transcript_composed_text_without_prompt() {
        let payload = Payload::transcript("hello world", "  ", Platform::Claude);
        assert_eq!(payload.composed_text(), "hello world");
    }

    #[test]
    fn test_with_created_at() {
        let at = DateTime::parse_from_rfc3339("2024-01-01T00:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let payload = Payload::transcript("t", "p", Platform::Claude).with_created_at(at);
        assert_eq!(payload.created_at, at);
    }
}
