use super::*;
use crate::services::project::ProjectMeta;
use crate::state::test_helpers::test_app_state;

#[test]
fn sign_option_parses_the_two_known_values() {
    assert_eq!(parse_sign_option("signed"), Some(SignOption::Signed));
    assert_eq!(parse_sign_option("unsigned"), Some(SignOption::Unsigned));
    assert_eq!(parse_sign_option("debug"), None);
    assert_eq!(parse_sign_option(""), None);
}

#[tokio::test]
async fn sign_on_unknown_project_reports_failure_in_the_body() {
    let (state, _dir) = test_app_state();
    let Json(response) = sign(State(state), Path(Uuid::new_v4())).await;
    assert!(!response.success);
    assert!(response.message.contains("not found"));
}

#[tokio::test]
async fn sign_without_a_signer_reports_missing_configuration() {
    let (state, _dir) = test_app_state();
    let id = Uuid::new_v4();
    state.store.save_meta(&ProjectMeta::new(id, "p", "app.apk")).unwrap();

    let Json(response) = sign(State(state), Path(id)).await;
    assert!(!response.success);
    assert!(response.message.contains("not configured"));
}

#[tokio::test]
async fn test_ai_without_configuration_fails_with_guidance() {
    let (state, _dir) = test_app_state();
    let Json(response) = test_ai(State(state)).await;
    assert!(!response.success);
    assert!(response.message.contains("AI_API_KEY"));
}

#[tokio::test]
async fn configure_ai_installs_a_probe_client() {
    let (state, _dir) = test_app_state();
    let Json(body) = configure_ai(
        State(state.clone()),
        Form(AiConfigBody { api_key: "test-key".into(), model: Some("test-model".into()) }),
    )
    .await
    .unwrap();

    assert_eq!(body["ok"], true);
    assert_eq!(body["model"], "test-model");
    assert!(state.ai.read().await.is_some());
}

#[tokio::test]
async fn configure_ai_rejects_an_empty_key() {
    let (state, _dir) = test_app_state();
    let (status, _) = configure_ai(
        State(state.clone()),
        Form(AiConfigBody { api_key: "   ".into(), model: None }),
    )
    .await
    .unwrap_err();
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(state.ai.read().await.is_none());
}

#[tokio::test]
async fn compile_on_unknown_project_is_404() {
    let (state, _dir) = test_app_state();
    let response = compile_default(State(state), Path(Uuid::new_v4())).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn compile_without_apktool_is_503() {
    let (state, _dir) = test_app_state();
    let id = Uuid::new_v4();
    state.store.save_meta(&ProjectMeta::new(id, "p", "app.apk")).unwrap();

    let response = compile_default(State(state), Path(id)).await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn compile_with_bad_sign_option_is_400() {
    let (state, _dir) = test_app_state();
    let response = compile_with_option(State(state), Path((Uuid::new_v4(), "debug".to_owned()))).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[test]
fn action_response_wire_shape_matches_the_editor_contract() {
    let body = serde_json::to_value(ActionResponse { success: false, message: "keystore missing".into() }).unwrap();
    assert_eq!(body, serde_json::json!({ "success": false, "message": "keystore missing" }));
}
