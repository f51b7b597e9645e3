//! Action requests.

use serde::{Deserialize, Serialize};

use crate::error::ProtocolError;
use crate::types::Platform;

/// A request routed to the privileged side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action")]
pub enum Action {
    /// Consume the staged PDF for a platform.
    #[serde(rename = "getPDFData")]
    GetPdfData { platform: Platform },

    /// Consume the staged transcript for a platform.
    #[serde(rename = "getYouTubeData")]
    GetYouTubeData { platform: Platform },

    /// Download a PDF, stage it and open the destination.
    #[serde(rename = "processPDF", rename_all = "camelCase")]
    ProcessPdf {
        url: String,
        #[serde(default)]
        prompt: Option<String>,
        #[serde(default)]
        platform: Option<Platform>,
        #[serde(default)]
        tab_id: Option<String>,
    },

    /// Extract the transcript of a watch-page tab, stage it and open the destination.
    #[serde(rename = "processYouTubeTranscript", rename_all = "camelCase")]
    ProcessYouTubeTranscript {
        tab_id: String,
        #[serde(default)]
        prompt: Option<String>,
        #[serde(default)]
        platform: Option<Platform>,
        #[serde(default)]
        summarize: bool,
    },

    /// Classify a URL as PDF or not.
    #[serde(rename = "checkIfPDF")]
    CheckIfPdf { url: String },

    /// Fetch a caption URL on behalf of a page.
    #[serde(rename = "fetchCaptionUrl")]
    FetchCaptionUrl { url: String },
}

impl Action {
    /// Wire name of the action.
    pub fn name(&self) -> &'static str {
        match self {
            Action::GetPdfData { .. } => "getPDFData",
            Action::GetYouTubeData { .. } => "getYouTubeData",
            Action::ProcessPdf { .. } => "processPDF",
            Action::ProcessYouTubeTranscript { .. } => "processYouTubeTranscript",
            Action::CheckIfPdf { .. } => "checkIfPDF",
            Action::FetchCaptionUrl { .. } => "fetchCaptionUrl",
        }
    }

    /// Parse an action from its JSON form.
    pub fn from_json(json: &str) -> Result<Self, ProtocolError> {
        serde_json::from_str(json).map_err(|e| ProtocolError::InvalidAction(e.to_string()))
    }
}
