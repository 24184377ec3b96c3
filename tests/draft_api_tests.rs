
use reqwest::StatusCode;
use serde_json::{json, Value};
use test_utils::*;

async fn open_draft(app: &TestApp, profile_id: &str) -> Value {
    let (status, body) = app.post_empty(&format!("/profiles/{}/drafts", profile_id)).await;
    assert_eq!(status, StatusCode::CREATED);
    body
}

#[actix_rt::test]
async fn draft_edits_are_saved_and_published() {
    let app = TestApp::spawn().await;
    let profile_id = app.import_profile_id("https://x.my.site").await;
    let draft = open_draft(&app, &profile_id).await;
    let draft_id = draft["draft_id"].as_str().unwrap();
    let commands = format!("/drafts/{}/commands", draft_id);

    for (field, value) in [("first_name", "Ada"), ("last_name", "Lovelace")] {
        let (status, _) = app
            .post_json(&commands, &json!({ "op": "set_basic_field", "field": field, "value": value }))
            .await;
        assert_eq!(status, StatusCode::OK);
    }

    let (_, snapshot) = app.post_json(&commands, &json!({ "op": "add_experience" })).await;
    let experience_id = snapshot["draft"]["experiences"][0]["id"].as_str().unwrap().to_string();

    let (status, report) = app.post_empty(&format!("/drafts/{}/validate", draft_id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["valid"], false);
    assert!(report["errors"]["experiences[0].job_title"].is_string());

    let (status, _) = app.post_json(&commands, &json!({ "op": "remove_experience", "experience_id": experience_id })).await;
    assert_eq!(status, StatusCode::OK);

    let (status, profile) = app.post_empty(&format!("/drafts/{}/save", draft_id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(profile["status"], "published");
    assert_eq!(profile["first_name"], "Ada");

    let (status, _) = app.get_json(&format!("/drafts/{}", draft_id)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[actix_rt::test]
async fn undo_reverts_last_command() {
    let app = TestApp::spawn().await;
    let profile_id = app.import_profile_id("https://test.com").await;
    let draft = open_draft(&app, &profile_id).await;
    let draft_id = draft["draft_id"].as_str().unwrap();

    app.post_json(
        &format!("/drafts/{}/commands", draft_id),
        &json!({ "op": "set_basic_field", "field": "summary", "value": "Changed" }),
    )
    .await;

    let (status, snapshot) = app.post_empty(&format!("/drafts/{}/undo", draft_id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(snapshot["draft"]["summary"], draft["draft"]["summary"]);
    assert_eq!(snapshot["undo_depth"], 0);

    let (status, _) = app.post_empty(&format!("/drafts/{}/undo", draft_id)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[actix_rt::test]
async fn invalid_save_keeps_draft_open() {
    let app = TestApp::spawn().await;
    let profile_id = app.import_profile_id("https://x.my.site").await;
    let draft = open_draft(&app, &profile_id).await;
    let draft_id = draft["draft_id"].as_str().unwrap();

    let (status, body) = app.post_empty(&format!("/drafts/{}/save", draft_id)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"].as_array().unwrap().len(), 2);

    let (status, snapshot) = app.get_json(&format!("/drafts/{}", draft_id)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(snapshot["last_error"].is_string());

    let (_, profile) = app.get_json(&format!("/profiles/{}", profile_id)).await;
    assert_eq!(profile["status"], "pending_review");
}

#[actix_rt::test]
async fn bad_values_and_unknown_ids_are_rejected() {
    let app = TestApp::spawn().await;
    let profile_id = app.import_profile_id("https://test.com").await;
    let draft = open_draft(&app, &profile_id).await;
    let draft_id = draft["draft_id"].as_str().unwrap();
    let commands = format!("/drafts/{}/commands", draft_id);

    let (_, snapshot) = app.post_json(&commands, &json!({ "op": "add_experience" })).await;
    let experience_id = snapshot["draft"]["experiences"][0]["id"].as_str().unwrap().to_string();

    let (status, _) = app
        .post_json(&commands, &json!({
            "op": "update_experience_field",
            "experience_id": experience_id,
            "field": "start_date",
            "value": "last spring"
        }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .post_json(&commands, &json!({ "op": "add_sample", "experience_id": uuid::Uuid::new_v4() }))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let response = app.client.delete(app.url(&format!("/drafts/{}", draft_id))).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}
