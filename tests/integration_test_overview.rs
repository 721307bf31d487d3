mod common;

use axum::http::StatusCode;
use common::{jazz_night_form, TestApp};
use serde_json::json;

async fn seed(app: &TestApp, auth: &common::AuthHeaders) -> (String, String) {
    let (_, body) = app.send(auth, "POST", "/api/v1/events", Some(jazz_night_form())).await;
    let summer = body["eventId"].as_str().unwrap().to_string();

    let mut form = jazz_night_form();
    form["name"] = json!("Harvest Fair");
    form["description"] = json!("<b>Pies</b>");
    form["startDateTime"] = json!("2026-10-19T10:00");
    form["endDateTime"] = json!("2026-10-19T16:00");
    let (_, body) = app.send(auth, "POST", "/api/v1/events", Some(form)).await;
    let autumn = body["eventId"].as_str().unwrap().to_string();

    (summer, autumn)
}

#[tokio::test]
async fn test_overview_defaults_to_latest_event() {
    let app = TestApp::new().await;
    let auth = app.login().await;
    let (summer, autumn) = seed(&app, &auth).await;

    let (status, body) = app.send(&auth, "GET", "/api/v1/events/overview", None).await;
    assert_eq!(status, StatusCode::OK);

    assert_eq!(body["options"], json!([
        { "id": autumn, "label": "Harvest Fair (Oct 19)" },
        { "id": summer, "label": "Jazz Night (Jul 3)" },
    ]));
    assert_eq!(body["selectedId"], autumn.as_str());

    let selected = &body["selected"];
    assert_eq!(selected["starts"], "2026-10-19T10:00");
    assert_eq!(selected["ends"], "2026-10-19T16:00");
    assert_eq!(selected["available"], 100);
    assert_eq!(selected["descriptionRaw"], "<b>Pies</b>");
    assert_eq!(selected["descriptionHtml"], "<b>Pies</b>");
}

#[tokio::test]
async fn test_overview_selects_requested_event() {
    let app = TestApp::new().await;
    let auth = app.login().await;
    let (summer, _) = seed(&app, &auth).await;

    let uri = format!("/api/v1/events/overview?selected={}", summer);
    let (status, body) = app.send(&auth, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["selectedId"], summer.as_str());
    assert_eq!(body["selected"]["name"], "Jazz Night");
    assert_eq!(body["selected"]["starts"], "2026-07-03T19:00");
}

#[tokio::test]
async fn test_overview_ignores_unknown_selection() {
    let app = TestApp::new().await;
    let auth = app.login().await;
    let (_, autumn) = seed(&app, &auth).await;

    let (_, body) = app.send(&auth, "GET", "/api/v1/events/overview?selected=ghost", None).await;
    assert_eq!(body["selectedId"], autumn.as_str());
}

#[tokio::test]
async fn test_overview_with_no_events() {
    let app = TestApp::new().await;
    let auth = app.login().await;

    let (status, body) = app.send(&auth, "GET", "/api/v1/events/overview", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "options": [], "selectedId": "", "selected": null }));
}

#[tokio::test]
async fn test_preview_renders_without_storing() {
    let app = TestApp::new().await;
    let auth = app.login().await;

    let mut form = jazz_night_form();
    form["description"] = json!("<p>Live</p><script>x()</script>");

    let (status, body) = app.send(&auth, "POST", "/api/v1/events/preview", Some(form)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Jazz Night");
    assert_eq!(body["price"], 10.85);
    assert_eq!(body["descriptionHtml"], "<p>Live</p>");
    assert_eq!(body["dateLabel"], "July 3, 2026");
    assert_eq!(body["timeRange"], "7:00 PM to 10:00 PM PT");
    assert_eq!(body["ticketsAvailable"], 100);

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM documents")
        .fetch_one(&app.pool)
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[tokio::test]
async fn test_preview_of_incomplete_form() {
    let app = TestApp::new().await;
    let auth = app.login().await;

    let (status, body) = app.send(&auth, "POST", "/api/v1/events/preview", Some(json!({
        "name": "Draft",
        "startDateTime": "2026-07-03T19:00"
    }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["price"], serde_json::Value::Null);
    assert_eq!(body["dateLabel"], serde_json::Value::Null);
    assert_eq!(body["ticketsAvailable"], 0);
}
