use super::*;
use crate::types::{Payload, Platform, StagedRecord};

#[test]
fn test_action_wire_names() {
    let action = Action::CheckIfPdf {
        url: "https://example.com/a.pdf".to_string(),
    };
    let json = serde_json::to_value(&action).unwrap();
    assert_eq!(json["action"], "checkIfPDF");
    assert_eq!(action.name(), "checkIfPDF");
}

#[test]
fn test_process_youtube_camel_case_fields() {
    let action = Action::from_json(
        r#"{"action": "processYouTubeTranscript", "tabId": "T1", "prompt": "go", "platform": "claude"}"#,
    )
    .unwrap();
    assert_eq!(
        action,
        Action::ProcessYouTubeTranscript {
            tab_id: "T1".to_string(),
            prompt: Some("go".to_string()),
            platform: Some(Platform::Claude),
            summarize: false,
        }
    );
}

#[test]
fn test_process_pdf_optional_fields() {
    let action = Action::from_json(r#"{"action": "processPDF", "url": "https://x/a.pdf"}"#).unwrap();
    match action {
        Action::ProcessPdf { url, prompt, platform, tab_id } => {
            assert_eq!(url, "https://x/a.pdf");
            assert!(prompt.is_none());
            assert!(platform.is_none());
            assert!(tab_id.is_none());
        }
        other => panic!("unexpected action {:?}", other),
    }
}

#[test]
fn test_unknown_action_rejected() {
    let err = Action::from_json(r#"{"action": "launchRockets"}"#).unwrap_err();
    assert!(err.to_string().contains("Invalid action"));
}

#[test]
fn test_failure_response_shape() {
    let json = serde_json::to_value(ActionResponse::failure("No pending PDF data")).unwrap();
    assert_eq!(json, serde_json::json!({"success": false, "error": "No pending PDF data"}));
}

#[test]
fn test_ok_response_with_fields() {
    let resp = ActionResponse::ok().with("isPDF", true);
    let json = serde_json::to_value(&resp).unwrap();
    assert_eq!(json, serde_json::json!({"success": true, "isPDF": true}));
    assert_eq!(resp.get_bool("isPDF"), Some(true));
}

#[test]
fn test_response_carries_record() {
    let payload = Payload::transcript("captions", "p", Platform::ChatGpt);
    let record = StagedRecord::from(&payload);
    let resp = ActionResponse::ok().with_record(&record).unwrap();

    let text = serde_json::to_string(&resp).unwrap();
    let parsed: ActionResponse = serde_json::from_str(&text).unwrap();
    assert_eq!(parsed.get_str("youtubeText"), Some("captions"));
    assert_eq!(parsed.record(), Some(record));
}

#[test]
fn test_failed_response_has_no_record() {
    assert!(ActionResponse::failure("nope").record().is_none());
}
