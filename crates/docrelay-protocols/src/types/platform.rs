//! Supported destination platforms.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ProtocolError;

/// An AI chat web application that can receive a payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Platform {
    #[serde(rename = "chatgpt")]
    ChatGpt,
    #[serde(rename = "claude")]
    Claude,
}

impl Platform {
    /// All supported platforms.
    pub const ALL: [Platform; 2] = [Platform::ChatGpt, Platform::Claude];

    /// Stable identifier, as stored in settings and staged records.
    pub fn id(&self) -> &'static str {
        match self {
            Platform::ChatGpt => "chatgpt",
            Platform::Claude => "claude",
        }
    }

    /// Human-facing name.
    pub fn display_name(&self) -> &'static str {
        match self {
            Platform::ChatGpt => "ChatGPT",
            Platform::Claude => "Claude AI",
        }
    }

    /// Fixed entry point opened for a new conversation.
    pub fn default_entry_url(&self) -> &'static str {
        match self {
            Platform::ChatGpt => "https://chatgpt.com/",
            Platform::Claude => "https://claude.ai/new",
        }
    }
}

impl Default for Platform {
    fn default() -> Self {
        Platform::ChatGpt
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Platform {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "chatgpt" => Ok(Platform::ChatGpt),
            "claude" => Ok(Platform::Claude),
            other => Err(ProtocolError::UnknownPlatform(other.to_string())),
        }
    }
}

#[cfg(test)]
#[path = "platform_tests.rs"]
mod tests;
