//! Wire format of a staged payload.
//!
//! This is the shape returned by `getPDFData` / `getYouTubeData`. PDF bytes
//! travel base64-encoded and timestamps are Unix milliseconds.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Payload, PayloadContent, Platform};
use crate::error::ProtocolError;

/// Staged PDF record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PdfRecord {
    pub pdf_data: String,
    pub pdf_file_name: String,
    pub pending_prompt: String,
    #[serde(default)]
    pub pending_platform: Option<Platform>,
    pub timestamp: i64,
}

/// Staged transcript record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranscriptRecord {
    pub youtube_text: String,
    pub youtube_prompt: String,
    #[serde(default)]
    pub youtube_platform: Option<Platform>,
    pub youtube_timestamp: i64,
}

/// Either staged record shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StagedRecord {
    Pdf(PdfRecord),
    Transcript(TranscriptRecord),
}

impl From<&Payload> for StagedRecord {
    fn from(payload: &Payload) -> Self {
        let timestamp = payload.created_at.timestamp_millis();
        match &payload.content {
            PayloadContent::Pdf { bytes, filename } => StagedRecord::Pdf(PdfRecord {
                pdf_data: BASE64.encode(bytes),
                pdf_file_name: filename.clone(),
                pending_prompt: payload.prompt.clone(),
                pending_platform: Some(payload.platform),
                timestamp,
            }),
            PayloadContent::Transcript { text } => StagedRecord::Transcript(TranscriptRecord {
                youtube_text: text.clone(),
                youtube_prompt: payload.prompt.clone(),
                youtube_platform: Some(payload.platform),
                youtube_timestamp: timestamp,
            }),
        }
    }
}

impl TryFrom<StagedRecord> for Payload {
    type Error = ProtocolError;

    /// Records written without a platform belong to Claude.
    fn try_from(record: StagedRecord) -> Result<Self, Self::Error> {
        match record {
            StagedRecord::Pdf(r) => {
                let bytes = BASE64
                    .decode(r.pdf_data.as_bytes())
                    .map_err(|e| ProtocolError::InvalidRecord(format!("pdfData: {}", e)))?;
                Ok(Payload {
                    content: PayloadContent::Pdf {
                        bytes,
                        filename: r.pdf_file_name,
                    },
                    prompt: r.pending_prompt,
                    platform: r.pending_platform.unwrap_or(Platform::Claude),
                    created_at: millis_to_datetime(r.timestamp)?,
                })
            }
            StagedRecord::Transcript(r) => Ok(Payload {
                content: PayloadContent::Transcript { text: r.youtube_text },
                prompt: r.youtube_prompt,
                platform: r.youtube_platform.unwrap_or(Platform::Claude),
                created_at: millis_to_datetime(r.youtube_timestamp)?,
            }),
        }
    }
}

fn millis_to_datetime(millis: i64) -> Result<DateTime<Utc>, ProtocolError> {
    DateTime::<Utc>::from_timestamp_millis(millis)
        .ok_or_else(|| ProtocolError::InvalidRecord(format!("timestamp out of range: {}", millis)))
}

#[cfg(test)]
#[path = "record_tests.rs"]
mod tests;
