//! CLI definitions for docrelay.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use docrelay_protocols::Platform;

/// docrelay CLI.
#[derive(Parser)]
#[command(name = "docrelay")]
#[command(about = "Relay a PDF or a YouTube transcript into ChatGPT or Claude")]
#[command(version)]
pub(crate) struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config/default.toml", global = true)]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Capture a PDF or transcript and send it to an AI chat
    Send {
        /// Source URL (a PDF or a YouTube watch page)
        #[arg(long, conflicts_with = "tab")]
        url: Option<String>,

        /// Source tab, by CDP target id (default: the active tab)
        #[arg(long)]
        tab: Option<String>,

        /// Destination platform (chatgpt, claude)
        #[arg(short, long)]
        platform: Option<Platform>,

        /// Prompt placed before the content
        #[arg(long)]
        prompt: Option<String>,

        /// Use the summarize prompt for transcripts
        #[arg(long)]
        summarize: bool,
    },

    /// Report whether a URL is a PDF or a YouTube watch page
    Probe {
        /// URL to classify
        url: String,
    },

    /// Print the transcript of a YouTube tab
    Transcript {
        /// Tab, by CDP target id (default: the active tab)
        #[arg(long)]
        tab: Option<String>,
    },

    /// Show or edit the persisted prompts and platforms
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },

    /// Route one raw JSON action, e.g. '{"action":"checkIfPDF","url":"..."}'
    Message {
        /// The action as JSON
        json: String,
    },
}

#[derive(Subcommand)]
pub(crate) enum SettingsAction {
    /// Print the current settings as JSON
    Show,

    /// Change one or more settings
    Set {
        /// Prompt for PDF captures
        #[arg(long)]
        pdf_prompt: Option<String>,

        /// Platform for PDF captures
        #[arg(long)]
        pdf_platform: Option<Platform>,

        /// Prompt for transcript captures
        #[arg(long)]
        transcript_prompt: Option<String>,

        /// Prompt for summarized transcript captures
        #[arg(long)]
        summarize_prompt: Option<String>,

        /// Platform for transcript captures
        #[arg(long)]
        youtube_platform: Option<Platform>,
    },

    /// Restore the default prompts and platforms
    Reset,
}
