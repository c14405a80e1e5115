use super::*;
use crate::services::project::ProjectMeta;
use crate::state::test_helpers::test_app_state;

fn seed_with_strings(state: &AppState) -> Uuid {
    let id = Uuid::new_v4();
    state.store.save_meta(&ProjectMeta::new(id, "p", "app.apk")).unwrap();
    let values = state.store.decompiled_dir(id).join("res/values");
    std::fs::create_dir_all(&values).unwrap();
    std::fs::write(values.join("strings.xml"), "<resources><string name=\"a\">b</string></resources>").unwrap();
    id
}

#[tokio::test]
async fn fetch_returns_text_content_for_strings() {
    let (state, _dir) = test_app_state();
    let id = seed_with_strings(&state);

    let Json(found) = fetch(
        State(state),
        Path(id),
        Query(ResourceQuery { kind: ResourceKind::String, path: "res/values/strings.xml".into() }),
    )
    .await
    .unwrap();

    assert_eq!(found.path, "res/values/strings.xml");
    assert!(found.content.unwrap().contains("name=\"a\""));
    assert!(found.size.is_none());
}

#[tokio::test]
async fn fetch_for_unknown_project_is_404() {
    let (state, _dir) = test_app_state();
    let (status, _) = fetch(
        State(state),
        Path(Uuid::new_v4()),
        Query(ResourceQuery { kind: ResourceKind::String, path: "res/values/strings.xml".into() }),
    )
    .await
    .unwrap_err();
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn fetch_rejects_traversal_paths() {
    let (state, _dir) = test_app_state();
    let id = seed_with_strings(&state);
    let (status, _) = fetch(
        State(state),
        Path(id),
        Query(ResourceQuery { kind: ResourceKind::Layout, path: "../metadata.json".into() }),
    )
    .await
    .unwrap_err();
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn save_round_trips_layout_content() {
    let (state, _dir) = test_app_state();
    let id = seed_with_strings(&state);

    save(
        State(state.clone()),
        Path(id),
        axum::extract::Form(SaveResourceBody {
            kind: ResourceKind::Layout,
            path: "res/layout/main.xml".into(),
            content: "<LinearLayout/>".into(),
        }),
    )
    .await
    .unwrap();

    let Json(found) = fetch(
        State(state),
        Path(id),
        Query(ResourceQuery { kind: ResourceKind::Layout, path: "res/layout/main.xml".into() }),
    )
    .await
    .unwrap();
    assert_eq!(found.content.as_deref(), Some("<LinearLayout/>"));
}

#[tokio::test]
async fn save_refuses_image_kind() {
    let (state, _dir) = test_app_state();
    let id = seed_with_strings(&state);
    let (status, message) = save(
        State(state),
        Path(id),
        axum::extract::Form(SaveResourceBody {
            kind: ResourceKind::Image,
            path: "res/drawable/icon.png".into(),
            content: String::new(),
        }),
    )
    .await
    .unwrap_err();
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(message.contains("image"));
}

#[test]
fn resource_errors_map_to_statuses() {
    assert_eq!(
        resource_error_to_status(&ResourceError::NotFound("x".into())),
        StatusCode::NOT_FOUND
    );
    assert_eq!(
        resource_error_to_status(&ResourceError::OutsideTree("../x".into())),
        StatusCode::BAD_REQUEST
    );
    assert_eq!(
        resource_error_to_status(&ResourceError::NotText("x.png".into())),
        StatusCode::UNPROCESSABLE_ENTITY
    );
}
