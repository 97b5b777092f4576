mod common;

use std::collections::HashSet;

use axum::http::StatusCode;
use common::TestApp;
use serde_json::{Value, json};

fn ids(list: &Value) -> HashSet<String> {
    list.as_array()
        .unwrap()
        .iter()
        .map(|job| job["id"].as_str().unwrap().to_string())
        .collect()
}

async fn state_of(app: &TestApp, token: &str, job_id: impl std::fmt::Display) -> Value {
    let (status, body) = app.get(&format!("/pekerjaan/detail/{}", job_id), token).await;
    assert_eq!(status, StatusCode::OK);
    body["state"].clone()
}

#[tokio::test]
async fn test_admin_trashes_every_job_of_one_alumni() {
    let app = TestApp::new();
    let (_, admin) = app.admin_token().await;
    let a1 = app.insert_alumni("Alumni One").await;
    let other = app.insert_alumni("Alumni Other").await;

    let mut job_ids = HashSet::new();
    for employer in ["Acme", "Globex", "Initech"] {
        job_ids.insert(app.insert_job(a1.id, employer).await.id.to_string());
    }
    let untouched = app.insert_job(other.id, "Umbrella").await;

    let (status, body) = app
        .request(
            "DELETE",
            &format!("/pekerjaan/{}?alumni_id={}", untouched.id, a1.id),
            Some(&admin),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["affected"], 3);

    let (status, active) = app.get(&format!("/pekerjaan/{}", a1.id), &admin).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(active, json!([]));

    let (status, trash) = app.get("/trash/pekerjaan", &admin).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&trash["data"]), job_ids);
    assert_eq!(trash["meta"]["total"], 3);

    assert_eq!(state_of(&app, &admin, untouched.id).await, "active");
}

#[tokio::test]
async fn test_owner_cannot_trash_another_alumnis_job() {
    let app = TestApp::new();
    let a2 = app.insert_alumni("Alumni Two").await;
    let a3 = app.insert_alumni("Alumni Three").await;
    let _j1 = app.insert_job(a2.id, "Acme").await;
    let j2 = app.insert_job(a3.id, "Globex").await;
    let (_, owner) = app.user_token(Some(a2.id)).await;

    let (status, body) = app
        .request("DELETE", &format!("/pekerjaan/{}", j2.id), Some(&owner), None)
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].is_string());
    assert_eq!(state_of(&app, &owner, j2.id).await, "active");
}

#[tokio::test]
async fn test_owner_trash_and_restore_own_job() {
    let app = TestApp::new();
    let alumni = app.insert_alumni("Owner").await;
    let job = app.insert_job(alumni.id, "Acme").await;
    let (_, owner) = app.user_token(Some(alumni.id)).await;

    let (status, body) = app
        .request("DELETE", &format!("/pekerjaan/{}", job.id), Some(&owner), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["affected"], 1);
    assert_eq!(body["message"], "Job moved to trash");

    let (_, detail) = app.get(&format!("/pekerjaan/detail/{}", job.id), &owner).await;
    assert_eq!(detail["state"], "trashed");
    assert!(detail["deleted_at"].is_string());

    let (status, _) = app
        .request(
            "PUT",
            &format!("/trash/pekerjaan/{}/restore", job.id),
            Some(&owner),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (_, detail) = app.get(&format!("/pekerjaan/detail/{}", job.id), &owner).await;
    assert_eq!(detail["state"], "active");
    assert!(detail.get("deleted_at").is_none());
}

#[tokio::test]
async fn test_transitions_from_the_wrong_state_are_not_found() {
    let app = TestApp::new();
    let alumni = app.insert_alumni("Owner").await;
    let job = app.insert_job(alumni.id, "Acme").await;
    let (_, owner) = app.user_token(Some(alumni.id)).await;

    // Restoring an active job.
    let (status, _) = app
        .request(
            "PUT",
            &format!("/trash/pekerjaan/{}/restore", job.id),
            Some(&owner),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Hard-deleting an active job.
    let (status, _) = app
        .request(
            "DELETE",
            &format!("/trash/pekerjaan/{}/hard-delete", job.id),
            Some(&owner),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(state_of(&app, &owner, job.id).await, "active");

    // Soft-deleting a trashed job.
    let (status, _) = app
        .request("DELETE", &format!("/pekerjaan/{}", job.id), Some(&owner), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = app
        .request("DELETE", &format!("/pekerjaan/{}", job.id), Some(&owner), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_owner_cannot_restore_or_purge_another_alumnis_job() {
    let app = TestApp::new();
    let (_, admin) = app.admin_token().await;
    let mine = app.insert_alumni("Mine").await;
    let theirs = app.insert_alumni("Theirs").await;
    let job = app.insert_job(theirs.id, "Globex").await;
    let (_, owner) = app.user_token(Some(mine.id)).await;

    app.request("DELETE", &format!("/pekerjaan/{}", job.id), Some(&admin), None)
        .await;

    let (status, _) = app
        .request(
            "PUT",
            &format!("/trash/pekerjaan/{}/restore", job.id),
            Some(&owner),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app
        .request(
            "DELETE",
            &format!("/trash/pekerjaan/{}/hard-delete", job.id),
            Some(&owner),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    assert_eq!(state_of(&app, &admin, job.id).await, "trashed");
}

#[tokio::test]
async fn test_hard_delete_removes_the_record() {
    let app = TestApp::new();
    let alumni = app.insert_alumni("Owner").await;
    let job = app.insert_job(alumni.id, "Acme").await;
    let (_, owner) = app.user_token(Some(alumni.id)).await;

    app.request("DELETE", &format!("/pekerjaan/{}", job.id), Some(&owner), None)
        .await;
    let (status, body) = app
        .request(
            "DELETE",
            &format!("/trash/pekerjaan/{}/hard-delete", job.id),
            Some(&owner),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Job permanently deleted");

    let (status, _) = app.get(&format!("/pekerjaan/detail/{}", job.id), &owner).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Irreversible.
    let (status, _) = app
        .request(
            "PUT",
            &format!("/trash/pekerjaan/{}/restore", job.id),
            Some(&owner),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_admin_restore_without_filter_ignores_ownership() {
    let app = TestApp::new();
    let (_, admin) = app.admin_token().await;
    let alumni = app.insert_alumni("Someone").await;
    let job = app.insert_job(alumni.id, "Acme").await;
    let sibling = app.insert_job(alumni.id, "Globex").await;

    app.request(
        "DELETE",
        &format!("/pekerjaan/{}?alumni_id={}", job.id, alumni.id),
        Some(&admin),
        None,
    )
    .await;

    let (status, body) = app
        .request(
            "PUT",
            &format!("/trash/pekerjaan/{}/restore", job.id),
            Some(&admin),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["affected"], 1);

    assert_eq!(state_of(&app, &admin, job.id).await, "active");
    assert_eq!(state_of(&app, &admin, sibling.id).await, "trashed");
}

#[tokio::test]
async fn test_admin_bulk_restore_and_hard_delete() {
    let app = TestApp::new();
    let (_, admin) = app.admin_token().await;
    let alumni = app.insert_alumni("Someone").await;
    let first = app.insert_job(alumni.id, "Acme").await;
    app.insert_job(alumni.id, "Globex").await;

    let bulk = |path: &str| format!("{}?alumni_id={}", path, alumni.id);

    app.request("DELETE", &bulk(&format!("/pekerjaan/{}", first.id)), Some(&admin), None)
        .await;

    let (status, body) = app
        .request(
            "PUT",
            &bulk(&format!("/trash/pekerjaan/{}/restore", first.id)),
            Some(&admin),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["affected"], 2);
    assert_eq!(body["message"], "2 jobs restored");

    // Nothing left in the trash for this alumni.
    let (status, _) = app
        .request(
            "PUT",
            &bulk(&format!("/trash/pekerjaan/{}/restore", first.id)),
            Some(&admin),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    app.request("DELETE", &bulk(&format!("/pekerjaan/{}", first.id)), Some(&admin), None)
        .await;
    let (status, body) = app
        .request(
            "DELETE",
            &bulk(&format!("/trash/pekerjaan/{}/hard-delete", first.id)),
            Some(&admin),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["affected"], 2);

    let (_, trash) = app.get("/trash/pekerjaan", &admin).await;
    assert_eq!(trash["meta"]["total"], 0);
}

#[tokio::test]
async fn test_trash_listing_is_scoped_for_users() {
    let app = TestApp::new();
    let (_, admin) = app.admin_token().await;
    let mine = app.insert_alumni("Mine").await;
    let theirs = app.insert_alumni("Theirs").await;
    let my_job = app.insert_job(mine.id, "Acme").await;
    app.insert_job(theirs.id, "Globex").await;

    for alumni in [mine.id, theirs.id] {
        app.request(
            "DELETE",
            &format!("/pekerjaan/{}?alumni_id={}", my_job.id, alumni),
            Some(&admin),
            None,
        )
        .await;
    }

    let (_, owner) = app.user_token(Some(mine.id)).await;
    let (status, trash) = app.get("/trash/pekerjaan", &owner).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(trash["meta"]["total"], 1);
    assert_eq!(trash["data"][0]["id"], my_job.id.to_string());

    let (_, unlinked) = app.user_token(None).await;
    let (_, trash) = app.get("/trash/pekerjaan", &unlinked).await;
    assert_eq!(trash["meta"]["total"], 0);

    let (_, trash) = app.get("/trash/pekerjaan", &admin).await;
    assert_eq!(trash["meta"]["total"], 2);
}

#[tokio::test]
async fn test_create_job() {
    let app = TestApp::new();
    let (_, admin) = app.admin_token().await;
    let alumni = app.insert_alumni("Someone").await;

    let (status, body) = app
        .request(
            "POST",
            "/pekerjaan",
            Some(&admin),
            Some(json!({
                "alumni_id": alumni.id,
                "employer": "PT Telkom Indonesia",
                "position": "Backend Engineer",
                "industry": "Telecommunication",
                "location": "Bandung",
                "salary_range": "10-15 juta",
                "start_date": "2023-02-01"
            })),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["state"], "active");
    assert_eq!(body["employment_status"], "active");
    assert_eq!(body["alumni_id"], alumni.id.to_string());
}

#[tokio::test]
async fn test_create_job_rejections() {
    let app = TestApp::new();
    let (_, admin) = app.admin_token().await;
    let alumni = app.insert_alumni("Someone").await;
    let (_, user) = app.user_token(Some(alumni.id)).await;

    let body = |alumni_id: String, end: &str| {
        json!({
            "alumni_id": alumni_id,
            "employer": "Acme",
            "position": "Engineer",
            "industry": "Software",
            "location": "Jakarta",
            "start_date": "2023-02-01",
            "end_date": end
        })
    };

    let (status, res) = app
        .request(
            "POST",
            "/pekerjaan",
            Some(&admin),
            Some(body(uuid::Uuid::new_v4().to_string(), "2024-01-01")),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(res["error"], "Alumni not found");

    let (status, res) = app
        .request(
            "POST",
            "/pekerjaan",
            Some(&admin),
            Some(body(alumni.id.to_string(), "2022-01-01")),
        )
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(res["error"], "end_date must not be before start_date");

    let (status, _) = app
        .request(
            "POST",
            "/pekerjaan",
            Some(&user),
            Some(body(alumni.id.to_string(), "2024-01-01")),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_update_job() {
    let app = TestApp::new();
    let (_, admin) = app.admin_token().await;
    let alumni = app.insert_alumni("Someone").await;
    let job = app.insert_job(alumni.id, "Acme").await;

    let (status, body) = app
        .request(
            "PUT",
            &format!("/pekerjaan/{}", job.id),
            Some(&admin),
            Some(json!({ "employer": "Globex", "salary_range": "15-25 juta" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["employer"], "Globex");
    assert_eq!(body["salary_range"], "15-25 juta");
    assert_eq!(body["position"], "Software Engineer");

    let (status, _) = app
        .request("PUT", &format!("/pekerjaan/{}", job.id), Some(&admin), Some(json!({})))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    app.request("DELETE", &format!("/pekerjaan/{}", job.id), Some(&admin), None)
        .await;
    let (status, _) = app
        .request(
            "PUT",
            &format!("/pekerjaan/{}", job.id),
            Some(&admin),
            Some(json!({ "employer": "Initech" })),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_jobs_of_unknown_alumni() {
    let app = TestApp::new();
    let (_, token) = app.user_token(None).await;

    let (status, body) = app
        .get(&format!("/pekerjaan/{}", uuid::Uuid::new_v4()), &token)
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Alumni not found");
}
