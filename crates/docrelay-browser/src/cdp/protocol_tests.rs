use super::*;

#[test]
fn test_cdp_request_serialize() {
    let req = CdpRequest {
        id: 7,
        method: "Runtime.evaluate".to_string(),
        params: Some(serde_json::json!({"expression": "1 + 1"})),
        session_id: Some("S1".to_string()),
    };
    let json = serde_json::to_value(&req).unwrap();
    assert_eq!(json["id"], 7);
    assert_eq!(json["sessionId"], "S1");
    assert_eq!(json["params"]["expression"], "1 + 1");
}

#[test]
fn test_cdp_request_omits_empty_fields() {
    let req = CdpRequest {
        id: 1,
        method: "Target.getTargets".to_string(),
        params: None,
        session_id: None,
    };
    let json = serde_json::to_string(&req).unwrap();
    assert!(!json.contains("params"));
    assert!(!json.contains("sessionId"));
}

#[test]
fn test_cdp_response_deserialize() {
    let json = r#"{"id": 1, "result": {"result": {"type": "number", "value": 2}}}"#;
    let resp: CdpResponse = serde_json::from_str(json).unwrap();
    assert_eq!(resp.id, Some(1));
    assert!(resp.error.is_none());
}

#[test]
fn test_cdp_event_deserialize() {
    let json = r#"{"method": "Page.loadEventFired", "params": {"timestamp": 1.0}, "sessionId": "S1"}"#;
    let resp: CdpResponse = serde_json::from_str(json).unwrap();
    assert!(resp.id.is_none());
    assert_eq!(resp.method.as_deref(), Some("Page.loadEventFired"));
    assert_eq!(resp.session_id.as_deref(), Some("S1"));
}

#[test]
fn test_page_info_web_tab() {
    let json = r#"{
        "id": "ABC",
        "type": "page",
        "title": "Exam",
        "url": "https://example.org/exam.pdf",
        "webSocketDebuggerUrl": "ws://localhost:9222/devtools/page/ABC"
    }"#;
    let info: PageInfo = serde_json::from_str(json).unwrap();
    assert!(info.is_web_tab());

    let devtools = PageInfo {
        url: "devtools://devtools/bundled/inspector.html".to_string(),
        ..info.clone()
    };
    assert!(!devtools.is_web_tab());

    let worker = PageInfo {
        page_type: "service_worker".to_string(),
        ..info
    };
    assert!(!worker.is_web_tab());
}

#[test]
fn test_exception_message_prefers_description() {
    let json = r#"{
        "exceptionId": 1,
        "text": "Uncaught",
        "lineNumber": 0,
        "columnNumber": 5,
        "exception": {"type": "object", "description": "TypeError: x is null"}
    }"#;
    let details: ExceptionDetails = serde_json::from_str(json).unwrap();
    assert_eq!(details.message(), "TypeError: x is null");

    let bare: ExceptionDetails = serde_json::from_str(r#"{"text": "Uncaught"}"#).unwrap();
    assert_eq!(bare.message(), "Uncaught");
}
