//! Configuration validation.

use docrelay_protocols::Platform;

use crate::error::ConfigError;
use crate::schema::Config;

/// Validation result.
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }

    /// Collapse the errors into a single `ConfigError`.
    pub fn into_error(self) -> Option<ConfigError> {
        let first = self.errors.into_iter().next()?;
        Some(ConfigError::InvalidValue {
            field: first.path,
            message: first.message,
        })
    }
}

/// A validation error.
#[derive(Debug)]
pub struct ValidationError {
    pub path: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// A validation warning.
#[derive(Debug)]
pub struct ValidationWarning {
    pub path: String,
    pub message: String,
}

impl ValidationWarning {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate the configuration.
    pub fn validate(config: &Config) -> Result<ValidationResult, ConfigError> {
        let mut result = ValidationResult::default();

        Self::validate_browser(config, &mut result);
        Self::validate_store(config, &mut result);
        Self::validate_capture(config, &mut result);
        Self::validate_automation(config, &mut result);
        Self::validate_platforms(config, &mut result);

        Ok(result)
    }

    fn validate_browser(config: &Config, result: &mut ValidationResult) {
        if config.browser.debug_port == 0 {
            result.add_error(ValidationError::new(
                "browser.debug_port",
                "Port cannot be 0",
            ));
        }

        if config.browser.launch_timeout_ms < 1000 {
            result.add_warning(ValidationWarning::new(
                "browser.launch_timeout_ms",
                "launch_timeout_ms is below 1s, Chrome may not be ready in time",
            ));
        }
    }

    fn validate_store(config: &Config, result: &mut ValidationResult) {
        if config.store.ttl_seconds == 0 {
            result.add_error(ValidationError::new(
                "store.ttl_seconds",
                "ttl_seconds must be greater than 0",
            ));
        }

        // The destination tab needs time to load before it claims the payload.
        if config.store.ttl_seconds > 0 && config.store.ttl_seconds < 30 {
            result.add_warning(ValidationWarning::new(
                "store.ttl_seconds",
                "ttl_seconds is very low (<30), payloads may expire before the tab loads",
            ));
        }
    }

    fn validate_capture(config: &Config, result: &mut ValidationResult) {
        let timeouts = [
            ("capture.probe_timeout_secs", config.capture.probe_timeout_secs),
            ("capture.download_timeout_secs", config.capture.download_timeout_secs),
            ("capture.caption_timeout_secs", config.capture.caption_timeout_secs),
        ];
        for (path, value) in timeouts {
            if value == 0 {
                result.add_error(ValidationError::new(path, "timeout must be greater than 0"));
            }
        }

        for host in &config.capture.extra_pdf_hosts {
            if host.contains("://") || host.contains('/') {
                result.add_warning(ValidationWarning::new(
                    "capture.extra_pdf_hosts",
                    format!("'{}' looks like a URL, expected a bare host name", host),
                ));
            }
        }
    }

    fn validate_automation(config: &Config, result: &mut ValidationResult) {
        let automation = &config.automation;
        let attempts = [
            ("automation.payload_attempts", automation.payload_attempts),
            ("automation.attach_attempts", automation.attach_attempts),
            ("automation.submit_attempts", automation.submit_attempts),
        ];
        for (path, value) in attempts {
            if value == 0 {
                result.add_error(ValidationError::new(path, "attempts must be greater than 0"));
            }
        }

        if config.transcript.poll_interval_ms == 0 {
            result.add_error(ValidationError::new(
                "transcript.poll_interval_ms",
                "poll_interval_ms must be greater than 0",
            ));
        }

        if automation.composer_timeout_ms > 120_000 {
            result.add_warning(ValidationWarning::new(
                "automation.composer_timeout_ms",
                "composer_timeout_ms is very high (>2min)",
            ));
        }
    }

    fn validate_platforms(config: &Config, result: &mut ValidationResult) {
        for platform in Platform::ALL {
            let url = config.platforms.entry_url(platform);
            if !url.starts_with("http://") && !url.starts_with("https://") {
                result.add_error(ValidationError::new(
                    format!("platforms.{}.url", platform.id()),
                    "url must start with http:// or https://",
                ));
            }
        }
    }
}

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;
