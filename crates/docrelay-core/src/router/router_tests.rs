use super::*;
use crate::test_support::FakeTabs;
use docrelay_browser::ElementInfo;
use docrelay_browser::testing::{FakePage, PageAction};
use docrelay_config::Settings;
use docrelay_driver::{AttachOutcome, DriverOutcome, SubmitOutcome};
use docrelay_protocols::Payload;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const PDF_BYTES: &[u8] = b"%PDF-1.4 test";
const WATCH_URL: &str = "https://www.youtube.com/watch?v=abc123";

fn test_config(dir: &TempDir) -> Config {
    let mut config = Config::default();
    config.settings_path = dir.path().join("settings.json").to_string_lossy().into_owned();
    config.automation.payload_attempts = 2;
    config.automation.payload_retry_ms = 10;
    config.automation.composer_timeout_ms = 200;
    config.automation.attach_delay_ms = 10;
    config.automation.submit_attempts = 2;
    config.automation.submit_interval_ms = 10;
    config.transcript.expand_delay_ms = 0;
    config.transcript.panel_timeout_ms = 100;
    config.transcript.segment_timeout_ms = 100;
    config.transcript.poll_interval_ms = 10;
    config
}

fn router(dir: &TempDir, tabs: Arc<FakeTabs>) -> Arc<MessageRouter> {
    let quick = |profile: PlatformProfile| PlatformProfile {
        upload_settle_ms: 0,
        insert_settle_ms: 0,
        ..profile
    };
    Arc::new(
        MessageRouter::new(test_config(dir), tabs)
            .with_profile(quick(PlatformProfile::chatgpt()))
            .with_profile(quick(PlatformProfile::claude())),
    )
}

async fn pdf_server() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/exam/paper.pdf"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "application/pdf")
                .set_body_bytes(PDF_BYTES),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/exam/missing.pdf"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/article"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "text/html")
                .set_body_string("<html></html>"),
        )
        .mount(&server)
        .await;
    server
}

fn watch_page() -> FakePage {
    let page = FakePage::new(WATCH_URL);
    let panel = page.add(
        "ytd-transcript-renderer",
        ElementInfo::new("panel", "ytd-transcript-renderer"),
    );
    for (i, text) in ["Hello", "world"].iter().enumerate() {
        let segment = page.add_within(
            &panel,
            "ytd-transcript-segment-renderer",
            ElementInfo::new(format!("seg{i}"), "ytd-transcript-segment-renderer"),
        );
        page.add_within(
            &segment,
            "yt-formatted-string.segment-text",
            ElementInfo::new(format!("txt{i}"), "yt-formatted-string").with_text(*text),
        );
    }
    page
}

#[tokio::test]
async fn test_process_pdf_relays_and_drives() {
    let dir = TempDir::new().unwrap();
    let server = pdf_server().await;
    let tabs = FakeTabs::new();
    let router = router(&dir, tabs.clone());

    let response = router
        .route(Action::ProcessPdf {
            url: format!("{}/exam/paper.pdf", server.uri()),
            prompt: Some("Solve".to_string()),
            platform: Some(Platform::Claude),
            tab_id: None,
        })
        .await;

    assert!(response.success, "{:?}", response.error);
    assert_eq!(response.get_str("platform"), Some("claude"));
    assert_eq!(tabs.opened_urls(), vec!["https://claude.ai/new".to_string()]);

    let reports = router.wait_for_deliveries().await;
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].outcome, DriverOutcome::Completed);
    assert_eq!(reports[0].attach, Some(AttachOutcome::FileInput));
    assert_eq!(reports[0].submit, Some(SubmitOutcome::Clicked));

    let dest = tabs.opened_page(0).unwrap();
    assert!(dest.actions().iter().any(|a| matches!(
        a,
        PageAction::AttachFile { name, size, .. } if name == "paper.pdf" && *size == PDF_BYTES.len()
    )));
    assert!(router.store().is_empty());
    assert!(router.in_flight().is_empty());

    let saved = router.settings().load().unwrap();
    assert_eq!(saved.pdf_prompt, "Solve");
    assert_eq!(saved.pdf_platform, Platform::Claude);
}

#[tokio::test]
async fn test_get_pdf_data_consumes_record() {
    let dir = TempDir::new().unwrap();
    let router = router(&dir, FakeTabs::new());
    router.store().write(
        Platform::ChatGpt,
        Payload::pdf(PDF_BYTES.to_vec(), "paper.pdf", "Solve", Platform::ChatGpt),
    );

    let response = router.route(Action::GetPdfData { platform: Platform::ChatGpt }).await;
    assert!(response.success);
    assert_eq!(response.get_str("pdfFileName"), Some("paper.pdf"));

    let payload = Payload::try_from(response.record().unwrap()).unwrap();
    assert_eq!(payload.platform, Platform::ChatGpt);
    assert_eq!(payload.content, docrelay_protocols::PayloadContent::Pdf {
        bytes: PDF_BYTES.to_vec(),
        filename: "paper.pdf".to_string(),
    });

    let again = router.route(Action::GetPdfData { platform: Platform::ChatGpt }).await;
    assert!(!again.success);
    assert_eq!(again.error.as_deref(), Some("No pending PDF data"));
}

#[tokio::test]
async fn test_claim_of_other_kind_leaves_payload() {
    let dir = TempDir::new().unwrap();
    let router = router(&dir, FakeTabs::new());
    router.store().write(
        Platform::Claude,
        Payload::pdf(PDF_BYTES.to_vec(), "paper.pdf", "Solve", Platform::Claude),
    );

    let response = router.route(Action::GetYouTubeData { platform: Platform::Claude }).await;
    assert!(!response.success);
    assert_eq!(response.error.as_deref(), Some("No pending YouTube data"));
    assert_eq!(router.store().peek_kind(Platform::Claude), Some(PayloadKind::Pdf));

    let claimed = router.route(Action::GetPdfData { platform: Platform::Claude }).await;
    assert!(claimed.success);
    assert!(router.store().is_empty());
}

#[tokio::test]
async fn test_check_if_pdf() {
    let dir = TempDir::new().unwrap();
    let server = pdf_server().await;
    let router = router(&dir, FakeTabs::new());

    let check = |url: String| {
        let router = router.clone();
        async move { router.route(Action::CheckIfPdf { url }).await.get_bool("isPDF") }
    };

    assert_eq!(check("https://example.com/a.PDF?dl=1".to_string()).await, Some(true));
    assert_eq!(check(WATCH_URL.to_string()).await, Some(false));
    assert_eq!(check(format!("{}/article", server.uri())).await, Some(false));
}

#[tokio::test]
async fn test_fetch_caption_url() {
    let dir = TempDir::new().unwrap();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/timedtext"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"events":[]}"#))
        .mount(&server)
        .await;
    let router = router(&dir, FakeTabs::new());

    let response = router
        .route(Action::FetchCaptionUrl {
            url: format!("{}/api/timedtext?v=abc123&fmt=json3", server.uri()),
        })
        .await;
    assert!(response.success);
    assert_eq!(response.get_str("text"), Some(r#"{"events":[]}"#));
}

#[tokio::test]
async fn test_non_pdf_url_is_ineligible() {
    let dir = TempDir::new().unwrap();
    let server = pdf_server().await;
    let tabs = FakeTabs::new();
    let router = router(&dir, tabs.clone());

    let response = router
        .route(Action::ProcessPdf {
            url: format!("{}/article", server.uri()),
            prompt: None,
            platform: None,
            tab_id: None,
        })
        .await;

    assert!(!response.success);
    assert!(response.error.unwrap().starts_with("Not a PDF or YouTube video page"));
    assert!(tabs.opened_urls().is_empty());
}

#[tokio::test]
async fn test_download_failure_stages_nothing() {
    let dir = TempDir::new().unwrap();
    let server = pdf_server().await;
    let tabs = FakeTabs::new();
    let router = router(&dir, tabs.clone());

    let response = router
        .route(Action::ProcessPdf {
            url: format!("{}/exam/missing.pdf", server.uri()),
            prompt: None,
            platform: None,
            tab_id: Some("tab-7".to_string()),
        })
        .await;

    assert!(!response.success);
    assert!(response.error.unwrap().contains("HTTP 404"));
    assert!(router.store().is_empty());
    assert!(tabs.opened_urls().is_empty());
    assert!(!router.in_flight().contains("tab-7"));
}

#[tokio::test]
async fn test_dispatch_failure_is_reported() {
    let dir = TempDir::new().unwrap();
    let server = pdf_server().await;
    let tabs = FakeTabs::new();
    tabs.fail_open();
    let router = router(&dir, tabs);

    let response = router
        .route(Action::ProcessPdf {
            url: format!("{}/exam/paper.pdf", server.uri()),
            prompt: None,
            platform: Some(Platform::Claude),
            tab_id: None,
        })
        .await;

    assert!(!response.success);
    assert!(response.error.unwrap().starts_with("Could not open Claude AI tab"));
    assert!(router.wait_for_deliveries().await.is_empty());
}

#[tokio::test]
async fn test_transcript_relay_with_summarize_prompt() {
    let dir = TempDir::new().unwrap();
    let tabs = FakeTabs::new();
    tabs.insert("yt-1", watch_page());
    let router = router(&dir, tabs.clone());

    let response = router
        .route(Action::ProcessYouTubeTranscript {
            tab_id: "yt-1".to_string(),
            prompt: None,
            platform: None,
            summarize: true,
        })
        .await;

    assert!(response.success, "{:?}", response.error);
    assert_eq!(tabs.opened_urls(), vec!["https://chatgpt.com/".to_string()]);

    let reports = router.wait_for_deliveries().await;
    assert_eq!(reports[0].payload_kind, Some(PayloadKind::Transcript));
    assert!(reports[0].text_inserted);

    let expected = format!("{}\n\nHello world", Settings::default().summarize_prompt);
    let dest = tabs.opened_page(0).unwrap();
    assert!(dest.actions().iter().any(|a| matches!(
        a,
        PageAction::InsertText { text, .. } if *text == expected
    )));
}

#[tokio::test]
async fn test_transcript_rejected_while_in_flight() {
    let dir = TempDir::new().unwrap();
    let tabs = FakeTabs::new();
    tabs.insert("yt-1", watch_page());
    let router = router(&dir, tabs.clone());

    let _busy = router.in_flight().acquire("yt-1").unwrap();
    let response = router
        .route(Action::ProcessYouTubeTranscript {
            tab_id: "yt-1".to_string(),
            prompt: None,
            platform: None,
            summarize: false,
        })
        .await;

    assert!(!response.success);
    assert!(response.error.unwrap().contains("already in progress"));
    assert!(tabs.opened_urls().is_empty());
}

#[tokio::test]
async fn test_transcript_without_captions_fails() {
    let dir = TempDir::new().unwrap();
    let tabs = FakeTabs::new();
    tabs.insert("yt-2", FakePage::new(WATCH_URL));
    let router = router(&dir, tabs.clone());

    let response = router
        .route(Action::ProcessYouTubeTranscript {
            tab_id: "yt-2".to_string(),
            prompt: Some("Translate".to_string()),
            platform: Some(Platform::Claude),
            summarize: false,
        })
        .await;

    assert!(!response.success);
    assert!(tabs.opened_urls().is_empty());
    assert!(router.store().is_empty());
}

#[tokio::test]
async fn test_send_active_tab_rejects_ordinary_page() {
    let dir = TempDir::new().unwrap();
    let tabs = FakeTabs::new();
    tabs.insert("a", FakePage::new("about:blank"));
    let router = router(&dir, tabs.clone());

    let err = router.send(SendTarget::Active, None, None, false).await.unwrap_err();
    assert!(matches!(err, crate::RelayError::Ineligible(url) if url == "about:blank"));
}

#[tokio::test]
async fn test_send_tab_with_watch_page() {
    let dir = TempDir::new().unwrap();
    let tabs = FakeTabs::new();
    tabs.insert("yt-1", watch_page());
    let router = router(&dir, tabs.clone());

    let ticket = router
        .send(SendTarget::Tab("yt-1".to_string()), Some("Notes".to_string()), Some(Platform::Claude), false)
        .await
        .unwrap();

    assert_eq!(ticket.platform, Platform::Claude);
    assert_eq!(ticket.kind, PayloadKind::Transcript);
    assert_eq!(ticket.len, "Hello world".len());
    router.wait_for_deliveries().await;

    let saved = router.settings().load().unwrap();
    assert_eq!(saved.transcript_prompt, "Notes");
    assert_eq!(saved.youtube_platform, Platform::Claude);
}
