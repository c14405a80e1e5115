use super::*;
use crate::state::ActionKind;

#[test]
fn endpoints_match_the_server_contract() {
    assert_eq!(action_endpoint(ActionKind::Sign, "p1"), "/sign_apk/p1");
    assert_eq!(action_endpoint(ActionKind::Compile, "p1"), "/compile/p1");
    assert_eq!(action_endpoint(ActionKind::TestAi, "p1"), "/test_ai");
    assert_eq!(compile_endpoint("p1", SignOption::Unsigned), "/compile/p1/unsigned");
    assert_eq!(compile_endpoint("p1", SignOption::Signed), "/compile/p1/signed");
}

#[test]
fn default_sign_option_is_signed() {
    assert_eq!(SignOption::default(), SignOption::Signed);
}

#[test]
fn success_response_parses_to_success() {
    let outcome = outcome_from_response(200, r#"{"success":true,"message":"APK signed"}"#);
    assert_eq!(outcome, ActionOutcome::Success { message: "APK signed".into() });
}

#[test]
fn server_reported_failure_keeps_message_verbatim() {
    let outcome = outcome_from_response(200, r#"{"success":false,"message":"keystore missing"}"#);
    assert!(!outcome.is_success());
    assert_eq!(outcome.message(), "keystore missing");
}

#[test]
fn missing_message_defaults_to_empty() {
    let outcome = outcome_from_response(200, r#"{"success":true}"#);
    assert_eq!(outcome, ActionOutcome::Success { message: String::new() });
}

#[test]
fn non_2xx_is_a_transport_failure() {
    let outcome = outcome_from_response(502, "");
    assert_eq!(outcome, ActionOutcome::Failure { message: "request failed: 502".into() });
}

#[test]
fn non_json_body_is_a_transport_failure() {
    let outcome = outcome_from_response(200, "<html>oops</html>");
    assert_eq!(outcome, ActionOutcome::Failure { message: "unexpected server response".into() });
}
