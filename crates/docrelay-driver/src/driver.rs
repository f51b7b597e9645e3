use std::sync::Arc;
use std::time::Duration;

use docrelay_browser::{
    AttachMode, BrowserError, ElementInfo, FileUpload, Page, poll_until,
};
use docrelay_config::AutomationConfig;
use docrelay_protocols::{Payload, PayloadContent};
use docrelay_store::ReadOutcome;
use tracing::{debug, info, warn};

use crate::error::DriverError;
use crate::profile::PlatformProfile;
use crate::report::{AttachOutcome, DriverOutcome, DriverReport, DriverState, SubmitOutcome};
use crate::source::PayloadSource;
use crate::submit::{SubmitTarget, find_submit};

const COMPOSER_POLL_INTERVAL: Duration = Duration::from_millis(250);
const FILE_INPUT: &str = r#"input[type="file"]"#;

/// Runs the attach, insert and submit sequence in one destination tab.
pub struct PageDriver {
    profile: PlatformProfile,
    config: AutomationConfig,
    source: Arc<dyn PayloadSource>,
}

impl PageDriver {
    pub fn new(profile: PlatformProfile, config: AutomationConfig, source: Arc<dyn PayloadSource>) -> Self {
        Self {
            profile,
            config,
            source,
        }
    }

    pub fn profile(&self) -> &PlatformProfile {
        &self.profile
    }

    /// Drive `page` to completion. Step failures are logged and recorded in
    /// the report; this never fails.
    pub async fn run(&self, page: &dyn Page) -> DriverReport {
        let mut report = DriverReport::new(self.profile.platform);

        report.enter(DriverState::AwaitingPayload);
        let Some(payload) = self.await_payload(&mut report).await else {
            info!("{}: nothing staged, leaving page untouched", self.profile.platform);
            return report.finish(DriverOutcome::NoOp);
        };
        report.payload_kind = Some(payload.kind());
        info!(
            "{}: claimed {:?} payload ({} bytes)",
            self.profile.platform,
            payload.kind(),
            payload.artifact_len()
        );

        let mut composer = self.locate_composer(page).await;
        if composer.is_none() {
            report.fail("composer", DriverError::Missing("text-entry element"));
        }

        if let PayloadContent::Pdf { bytes, filename } = &payload.content {
            report.enter(DriverState::FileAttach);
            let file = FileUpload::pdf(filename.clone(), bytes.clone());
            match self.attach(page, &file, composer.as_ref()).await {
                Ok(outcome) => {
                    report.attach = Some(outcome);
                    tokio::time::sleep(self.profile.upload_settle()).await;
                    // The composer is often re-rendered once the upload lands.
                    if let Some(fresh) = self.locate_composer(page).await {
                        composer = Some(fresh);
                    }
                }
                Err(e) => report.fail("file attach", e),
            }
        }

        let text = payload.composed_text();
        if text.trim().is_empty() {
            debug!("{}: empty prompt, not inserting or submitting", self.profile.platform);
            return report.finish(DriverOutcome::Completed);
        }

        report.enter(DriverState::TextInserting);
        match &composer {
            Some(el) => match self.insert_text(page, el, &text).await {
                Ok(()) => report.text_inserted = true,
                Err(e) => report.fail("text insert", e),
            },
            None => report.fail("text insert", DriverError::Missing("text-entry element")),
        }

        report.enter(DriverState::Submitting);
        match self.submit(page, composer.as_ref()).await {
            Ok(outcome) => report.submit = Some(outcome),
            Err(e) => report.fail("submit", e),
        }

        info!("{}: automation finished", self.profile.platform);
        report.finish(DriverOutcome::Completed)
    }

    async fn await_payload(&self, report: &mut DriverReport) -> Option<Payload> {
        let platform = self.profile.platform;
        let attempts = self.config.payload_attempts.max(1);

        for attempt in 1..=attempts {
            match self.source.take(platform).await {
                Ok(ReadOutcome::Payload(payload)) => return Some(payload),
                Ok(ReadOutcome::Expired) => debug!("{}: staged payload expired", platform),
                Ok(ReadOutcome::Absent) => debug!("{}: nothing staged (attempt {}/{})", platform, attempt, attempts),
                Err(e) => report.fail("payload claim", e),
            }
            if attempt < attempts {
                tokio::time::sleep(self.config.payload_retry()).await;
            }
        }
        None
    }

    async fn locate_composer(&self, page: &dyn Page) -> Option<ElementInfo> {
        let strategy = &self.profile.composer;
        poll_until(COMPOSER_POLL_INTERVAL, self.config.composer_timeout(), move || async move {
            match strategy.find_first(page, None, |_| true).await {
                Ok(found) => found,
                Err(e) => {
                    debug!("Composer lookup failed: {}", e);
                    None
                }
            }
        })
        .await
    }

    async fn attach(
        &self,
        page: &dyn Page,
        file: &FileUpload,
        composer: Option<&ElementInfo>,
    ) -> Result<AttachOutcome, DriverError> {
        if let Some(input) = self.find_file_input(page).await? {
            debug!("Attaching {} through {}", file.name, input.handle);
            page.attach_file(&input.handle, file, AttachMode::Input).await?;
            return Ok(AttachOutcome::FileInput);
        }

        let Some(target) = composer else {
            return Err(DriverError::Missing("file input or drop target"));
        };
        debug!("No file input, dropping {} onto composer", file.name);
        page.attach_file(&target.handle, file, AttachMode::Drop).await?;
        Ok(AttachOutcome::Dropped)
    }

    async fn find_file_input(&self, page: &dyn Page) -> Result<Option<ElementInfo>, BrowserError> {
        if let Some(input) = self.profile.file_input.find_first(page, None, |_| true).await? {
            return Ok(Some(input));
        }

        let triggers = self.profile.attach_trigger.find_all(page, None).await?;
        let limit = self.config.attach_attempts as usize;
        let candidates = triggers
            .iter()
            .filter(|t| !t.disabled && !self.profile.is_unsafe_attach_trigger(t));
        for trigger in candidates.take(limit) {
            debug!("Clicking attach trigger {}", trigger.handle);
            if let Err(e) = page.click(&trigger.handle).await {
                warn!("Attach trigger {} not clickable: {}", trigger.handle, e);
                continue;
            }
            tokio::time::sleep(self.config.attach_delay()).await;

            if let Some(input) = page.query(FILE_INPUT, None).await?.into_iter().next() {
                return Ok(Some(input));
            }
        }
        Ok(None)
    }

    async fn insert_text(&self, page: &dyn Page, composer: &ElementInfo, text: &str) -> Result<(), BrowserError> {
        page.focus(&composer.handle).await?;
        page.insert_text(&composer.handle, text, composer.text_shape()).await?;
        debug!("Inserted {} chars into {}", text.chars().count(), composer.handle);
        tokio::time::sleep(self.profile.insert_settle()).await;
        Ok(())
    }

    async fn submit(&self, page: &dyn Page, composer: Option<&ElementInfo>) -> Result<SubmitOutcome, DriverError> {
        let target = match find_submit(page, &self.profile, &self.config).await {
            Ok(target) => target,
            Err(e) => {
                warn!("{}: submit control lookup failed: {}", self.profile.platform, e);
                SubmitTarget::Missing
            }
        };
        if let SubmitTarget::Enabled(button) = &target {
            debug!("Clicking submit control {}", button.handle);
            page.click(&button.handle).await?;
            return Ok(SubmitOutcome::Clicked);
        }

        let Some(composer) = composer else {
            return Err(DriverError::Missing("submit control"));
        };
        match target {
            SubmitTarget::Disabled(_) => debug!("Submit control disabled, pressing Enter"),
            _ => debug!("No submit control, pressing Enter"),
        }
        page.press_enter(&composer.handle).await?;
        Ok(SubmitOutcome::EnterPressed)
    }
}

#[cfg(test)]
#[path = "driver_tests.rs"]
mod tests;
