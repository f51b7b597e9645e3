use std::time::Duration;

use super::*;

#[test]
fn test_config_default() {
    let config = Config::default();
    assert_eq!(config.browser.debug_port, 9222);
    assert!(!config.browser.headless);
    assert_eq!(config.store.ttl_seconds, 300);
    assert_eq!(config.settings_path, "~/.docrelay/settings.json");
}

#[test]
fn test_automation_defaults_match_driver_bounds() {
    let automation = AutomationConfig::default();
    assert_eq!(automation.payload_attempts, 5);
    assert_eq!(automation.payload_retry(), Duration::from_millis(800));
    assert_eq!(automation.composer_timeout(), Duration::from_secs(10));
    assert_eq!(automation.submit_attempts, 10);
    assert_eq!(automation.submit_interval(), Duration::from_millis(500));
}

#[test]
fn test_transcript_defaults() {
    let transcript = TranscriptConfig::default();
    assert_eq!(transcript.expand_delay(), Duration::from_millis(800));
    assert!(transcript.poll_interval() < transcript.segment_timeout());
    assert!(transcript.segment_timeout() <= transcript.panel_timeout());
}

#[test]
fn test_capture_default_extra_hosts() {
    let capture = CaptureConfig::default();
    assert_eq!(capture.extra_pdf_hosts, vec!["moex.gov.tw".to_string()]);
}

#[test]
fn test_platform_entry_urls() {
    let platforms = PlatformsConfig::default();
    assert_eq!(platforms.entry_url(Platform::ChatGpt), "https://chatgpt.com/");
    assert_eq!(platforms.entry_url(Platform::Claude), "https://claude.ai/new");
}

#[test]
fn test_partial_section_keeps_other_defaults() {
    let json = r#"{"payload_attempts": 2}"#;
    let automation: AutomationConfig = serde_json::from_str(json).unwrap();
    assert_eq!(automation.payload_attempts, 2);
    assert_eq!(automation.payload_retry_ms, 800);
}

#[test]
fn test_logging_defaults() {
    let logging = LoggingConfig::default();
    assert_eq!(logging.level, "info");
    assert_eq!(logging.max_files, 14);
}
