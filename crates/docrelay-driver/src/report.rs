use serde::Serialize;
use tracing::warn;

use docrelay_protocols::{PayloadKind, Platform};

/// Driver lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DriverState {
    Idle,
    AwaitingPayload,
    FileAttach,
    TextInserting,
    Submitting,
    Done,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DriverOutcome {
    /// A payload was claimed and every step was attempted.
    Completed,
    /// Nothing was staged for this tab.
    NoOp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AttachOutcome {
    FileInput,
    Dropped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmitOutcome {
    Clicked,
    EnterPressed,
}

/// What one run of the driver did.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DriverReport {
    pub platform: Platform,
    pub states: Vec<DriverState>,
    pub outcome: DriverOutcome,
    pub payload_kind: Option<PayloadKind>,
    pub attach: Option<AttachOutcome>,
    pub text_inserted: bool,
    pub submit: Option<SubmitOutcome>,
    /// Step failures, in order.
    pub failures: Vec<String>,
}

impl DriverReport {
    pub(crate) fn new(platform: Platform) -> Self {
        Self {
            platform,
            states: vec![DriverState::Idle],
            outcome: DriverOutcome::NoOp,
            payload_kind: None,
            attach: None,
            text_inserted: false,
            submit: None,
            failures: Vec::new(),
        }
    }

    pub(crate) fn enter(&mut self, state: DriverState) {
        self.states.push(state);
    }

    pub(crate) fn fail(&mut self, step: &str, error: impl std::fmt::Display) {
        warn!("{}: {} failed: {}", self.platform, step, error);
        self.failures.push(format!("{step}: {error}"));
    }

    pub(crate) fn finish(mut self, outcome: DriverOutcome) -> Self {
        self.outcome = outcome;
        self.enter(DriverState::Done);
        self
    }

    pub fn state(&self) -> DriverState {
        self.states.last().copied().unwrap_or(DriverState::Idle)
    }

    pub fn is_noop(&self) -> bool {
        self.outcome == DriverOutcome::NoOp
    }
}
