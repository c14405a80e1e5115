use super::*;
use crate::state::test_helpers::test_app_state;

fn seed(state: &AppState, name: &str) -> Uuid {
    let id = Uuid::new_v4();
    state.store.save_meta(&ProjectMeta::new(id, name, "app.apk")).unwrap();
    id
}

#[tokio::test]
async fn list_starts_empty_and_reflects_seeded_projects() {
    let (state, _dir) = test_app_state();
    let Json(projects) = list(State(state.clone())).await.unwrap();
    assert!(projects.is_empty());

    seed(&state, "Demo");
    let Json(projects) = list(State(state)).await.unwrap();
    assert_eq!(projects.len(), 1);
    assert_eq!(projects[0].meta.name, "Demo");
}

#[tokio::test]
async fn detail_includes_the_resource_index() {
    let (state, _dir) = test_app_state();
    let id = seed(&state, "Demo");
    std::fs::create_dir_all(state.store.decompiled_dir(id).join("res/values")).unwrap();
    std::fs::write(
        state.store.decompiled_dir(id).join("res/values/strings.xml"),
        "<resources/>",
    )
    .unwrap();

    let Json(found) = detail(State(state), Path(id)).await.unwrap();
    assert_eq!(found.summary.meta.id, id);
    assert_eq!(found.resources.strings.len(), 1);
}

#[tokio::test]
async fn detail_of_unknown_project_is_404() {
    let (state, _dir) = test_app_state();
    let (status, _) = detail(State(state), Path(Uuid::new_v4())).await.unwrap_err();
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_removes_and_404s_afterwards() {
    let (state, _dir) = test_app_state();
    let id = seed(&state, "Demo");
    delete(State(state.clone()), Path(id)).await.unwrap();
    let (status, _) = delete(State(state), Path(id)).await.unwrap_err();
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn download_without_a_build_is_404_with_guidance() {
    let (state, _dir) = test_app_state();
    let id = seed(&state, "Demo");
    let (status, message) = download(State(state), Path(id)).await.unwrap_err();
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(message.contains("compile"));
}

#[tokio::test]
async fn download_serves_attachment_headers() {
    let (state, _dir) = test_app_state();
    let id = seed(&state, "Demo");
    std::fs::write(state.store.signed_apk_path(id), b"apk bytes").unwrap();
    state.store.set_status(id, crate::services::project::ProjectStatus::Signed).unwrap();

    let response = download(State(state), Path(id)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let headers = response.headers();
    assert_eq!(headers.get(CONTENT_TYPE).unwrap(), APK_MIME);
    let disposition = headers.get(CONTENT_DISPOSITION).unwrap().to_str().unwrap();
    assert!(disposition.contains("app-signed.apk"), "got {disposition}");
}

#[test]
fn download_file_name_tracks_the_status() {
    let mut meta = ProjectMeta::new(Uuid::nil(), "p", "game.apk");
    assert_eq!(download_file_name(&meta), "game-decompiled.apk");
    meta.status = crate::services::project::ProjectStatus::Signed;
    assert_eq!(download_file_name(&meta), "game-signed.apk");
}

#[test]
fn project_errors_map_to_statuses() {
    assert_eq!(
        project_error_to_status(&ProjectError::NotFound(Uuid::nil())),
        StatusCode::NOT_FOUND
    );
    let io = ProjectError::Io(std::io::Error::other("disk"));
    assert_eq!(project_error_to_status(&io), StatusCode::INTERNAL_SERVER_ERROR);
}
