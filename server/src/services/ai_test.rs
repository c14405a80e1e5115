use super::*;

#[test]
fn parse_accepts_a_model_bearing_body() {
    let message = parse_probe_response(200, r#"{"model":"claude-3-5-haiku-latest","id":"msg_1"}"#).unwrap();
    assert!(message.contains("claude-3-5-haiku-latest"));
}

#[test]
fn parse_rejects_non_200_with_status_and_body() {
    let err = parse_probe_response(401, r#"{"error":"invalid x-api-key"}"#).unwrap_err();
    let message = err.to_string();
    assert!(message.contains("401"));
    assert!(message.contains("invalid x-api-key"));
}

#[test]
fn parse_rejects_bodies_without_a_model() {
    assert!(matches!(parse_probe_response(200, "{}"), Err(AiError::Parse(_))));
    assert!(matches!(parse_probe_response(200, "<html>"), Err(AiError::Parse(_))));
}

#[test]
fn probe_request_serializes_the_minimal_payload() {
    let body = ProbeRequest {
        model: "m",
        max_tokens: 1,
        messages: &[ProbeMessage { role: "user", content: "ping" }],
    };
    let json = serde_json::to_value(&body).unwrap();
    assert_eq!(json["model"], "m");
    assert_eq!(json["max_tokens"], 1);
    assert_eq!(json["messages"][0]["role"], "user");
    assert_eq!(json["messages"][0]["content"], "ping");
}

#[test]
fn missing_api_key_error_names_the_variable() {
    let err = AiError::MissingApiKey { var: "AI_API_KEY".into() };
    assert_eq!(err.to_string(), "AI api key not configured (set AI_API_KEY)");
}
