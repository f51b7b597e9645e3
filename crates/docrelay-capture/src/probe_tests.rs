use super::*;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn probe() -> CaptureProbe {
    CaptureProbe::new(&CaptureConfig::default())
}

#[test]
fn test_youtube_video_id() {
    assert_eq!(
        youtube_video_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=10"),
        Some("dQw4w9WgXcQ".to_string())
    );
    assert_eq!(youtube_video_id("https://m.youtube.com/watch?v=abc"), Some("abc".to_string()));
    assert_eq!(youtube_video_id("https://youtube.com/watch?v="), None);
    assert_eq!(youtube_video_id("https://www.youtube.com/shorts/abc"), None);
    assert_eq!(youtube_video_id("https://music.youtube.com/watch?v=abc"), None);
    assert_eq!(youtube_video_id("not a url"), None);
}

#[tokio::test]
async fn test_youtube_classification() {
    let kind = probe().classify("https://www.youtube.com/watch?v=abc").await;
    assert_eq!(kind, SourceKind::YouTubeWatch);
}

#[test]
fn test_pdf_suffix_variants() {
    let p = probe();
    assert!(p.is_pdf_without_network("https://example.org/exam.pdf"));
    assert!(p.is_pdf_without_network("https://example.org/EXAM.PDF"));
    assert!(p.is_pdf_without_network("https://example.org/exam.pdf?download=1"));
    assert!(p.is_pdf_without_network("https://example.org/exam.pdf#page=2"));
    assert!(!p.is_pdf_without_network("https://example.org/exam.pdfx"));
    assert!(!p.is_pdf_without_network("https://example.org/exam"));
}

#[test]
fn test_extra_pdf_hosts() {
    let p = probe();
    assert!(p.is_pdf_without_network("https://wwwq.moex.gov.tw/exam/wFrmExamQandASearch.aspx"));
    assert!(p.is_pdf_without_network("https://moex.gov.tw/"));
    assert!(!p.is_pdf_without_network("https://notmoex.gov.tw/"));
}

#[tokio::test]
async fn test_suffix_needs_no_network() {
    // Unroutable host: any network attempt would fail and classify as None.
    let kind = probe().classify("http://127.0.0.1:1/paper.pdf").await;
    assert_eq!(kind, SourceKind::Pdf);
}

#[tokio::test]
async fn test_sniff_by_content_type() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/download"))
        .and(header("range", "bytes=0-10"))
        .respond_with(
            ResponseTemplate::new(206)
                .insert_header("content-type", "application/pdf")
                .set_body_bytes(b"%PDF-1.7\n%".to_vec()),
        )
        .mount(&server)
        .await;

    let kind = probe().classify(&format!("{}/download", server.uri())).await;
    assert_eq!(kind, SourceKind::Pdf);
}

#[tokio::test]
async fn test_sniff_by_magic_bytes() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/file"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "application/octet-stream")
                .set_body_bytes(b"%PDF-1.4 rest".to_vec()),
        )
        .mount(&server)
        .await;

    let kind = probe().classify(&format!("{}/file", server.uri())).await;
    assert_eq!(kind, SourceKind::Pdf);
}

#[tokio::test]
async fn test_sniff_html_is_not_pdf() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/page"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "text/html")
                .set_body_string("<html></html>"),
        )
        .mount(&server)
        .await;

    let kind = probe().classify(&format!("{}/page", server.uri())).await;
    assert_eq!(kind, SourceKind::None);
}

#[tokio::test]
async fn test_sniff_error_status_is_not_pdf() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404).insert_header("content-type", "application/pdf"))
        .mount(&server)
        .await;

    let kind = probe().classify(&format!("{}/gone", server.uri())).await;
    assert_eq!(kind, SourceKind::None);
}

#[tokio::test]
async fn test_network_failure_is_not_pdf() {
    let kind = probe().classify("http://127.0.0.1:1/document").await;
    assert_eq!(kind, SourceKind::None);
}

#[tokio::test]
async fn test_non_http_is_not_pdf() {
    assert_eq!(probe().classify("chrome://settings").await, SourceKind::None);
    assert_eq!(probe().classify("garbage").await, SourceKind::None);
}
