//! End-to-end tests over real HTTP.

use reqwest::redirect::Policy;
use reqwest::StatusCode;
use serde_json::{json, Value};

mod common;

fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(Policy::none())
        .build()
        .expect("client")
}

#[tokio::test]
async fn shell_page_embeds_the_page_config() {
    let dirs = common::scaffold();
    let addr = common::spawn_app(common::host_for(&dirs)).await;

    let response = client()
        .get(format!("http://{addr}/vitrina"))
        .send()
        .await
        .expect("request");
    assert_eq!(response.status(), StatusCode::OK);

    let body = response.text().await.expect("body");
    assert!(!body.contains("{{page_config}}"));
    assert!(body.contains("\"appName\":\"Vitrina\""));
    assert!(body.contains("\"settingsUrl\":\"/vitrina/api/settings\""));
}

#[tokio::test]
async fn root_redirects_with_302() {
    let dirs = common::scaffold();
    let addr = common::spawn_app(common::host_for(&dirs)).await;

    let response = client()
        .get(format!("http://{addr}/"))
        .send()
        .await
        .expect("request");
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(response.headers()["location"], "/vitrina");
}

#[tokio::test]
async fn static_assets_are_served_with_caching() {
    let dirs = common::scaffold();
    let addr = common::spawn_app(common::host_for(&dirs)).await;

    let response = client()
        .get(format!("http://{addr}/static/vitrina/bundle.js"))
        .send()
        .await
        .expect("request");
    assert_eq!(response.status(), StatusCode::OK);
    let cache = response.headers()["cache-control"].to_str().unwrap();
    assert!(cache.contains("max-age"));
}

#[tokio::test]
async fn cache_can_be_disabled_per_host() {
    let dirs = common::scaffold();
    let mut host = common::host_for(&dirs);
    host.cache_files = false;
    let addr = common::spawn_app(host).await;

    let response = client()
        .get(format!("http://{addr}/static/vitrina/bundle.js"))
        .send()
        .await
        .expect("request");
    assert_eq!(response.headers()["cache-control"], "no-cache");
}

#[tokio::test]
async fn traversal_out_of_the_bundle_is_rejected() {
    let dirs = common::scaffold();
    let addr = common::spawn_app(common::host_for(&dirs)).await;

    let response = client()
        .get(format!("http://{addr}/static/vitrina/..%2f..%2fsecret"))
        .send()
        .await
        .expect("request");
    assert_ne!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn themes_are_served_from_the_bundle() {
    let dirs = common::scaffold();
    let addr = common::spawn_app(common::host_for(&dirs)).await;

    let response = client()
        .get(format!("http://{addr}/vitrina/themes/light/index.css"))
        .send()
        .await
        .expect("request");
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn settings_list_and_item_round_trip() {
    let dirs = common::scaffold();
    let addr = common::spawn_app(common::host_for(&dirs)).await;
    let http = client();

    let list: Value = http
        .get(format!("http://{addr}/vitrina/api/settings"))
        .send()
        .await
        .expect("list")
        .json()
        .await
        .expect("json");
    assert_eq!(list["settings"][0]["id"], "@vitrina/shell:plugin");

    let put = http
        .put(format!(
            "http://{addr}/vitrina/api/settings/@vitrina/shell:plugin"
        ))
        .body(r#"{"theme": "dark"}"#)
        .send()
        .await
        .expect("put");
    assert_eq!(put.status(), StatusCode::NO_CONTENT);

    let item: Value = http
        .get(format!(
            "http://{addr}/vitrina/api/settings/@vitrina/shell:plugin"
        ))
        .send()
        .await
        .expect("get")
        .json()
        .await
        .expect("json");
    assert_eq!(item["settings"]["theme"], "dark");
    assert_eq!(item["schema"]["title"], "Shell");
}

#[tokio::test]
async fn workspaces_round_trip_and_reserved_slug() {
    let dirs = common::scaffold();
    let addr = common::spawn_app(common::host_for(&dirs)).await;
    let http = client();

    let workspace = json!({
        "data": {"layout": {"left": ["files"]}},
        "metadata": {"name": "analysis"},
    });
    let put = http
        .put(format!("http://{addr}/vitrina/api/workspaces/analysis"))
        .body(workspace.to_string())
        .send()
        .await
        .expect("put");
    assert_eq!(put.status(), StatusCode::NO_CONTENT);

    let list: Value = http
        .get(format!("http://{addr}/vitrina/api/workspaces"))
        .send()
        .await
        .expect("list")
        .json()
        .await
        .expect("json");
    assert_eq!(list["workspaces"]["ids"], json!(["analysis"]));

    // The reserved slug is acknowledged but never written.
    let reserved = http
        .put(format!(
            "http://{addr}/vitrina/api/workspaces/vitrina-single-workspace"
        ))
        .body("{}")
        .send()
        .await
        .expect("put");
    assert_eq!(reserved.status(), StatusCode::NO_CONTENT);

    let list: Value = http
        .get(format!("http://{addr}/vitrina/api/workspaces"))
        .send()
        .await
        .expect("list")
        .json()
        .await
        .expect("json");
    assert_eq!(list["workspaces"]["ids"], json!(["analysis"]));
}

#[tokio::test]
async fn collection_routes_accept_a_trailing_slash() {
    let dirs = common::scaffold();
    let addr = common::spawn_app(common::host_for(&dirs)).await;
    let http = client();

    let settings = http
        .get(format!("http://{addr}/vitrina/api/settings/"))
        .send()
        .await
        .expect("settings list");
    assert_eq!(settings.status(), StatusCode::OK);
    let settings: Value = settings.json().await.expect("json");
    assert_eq!(settings["settings"][0]["id"], "@vitrina/shell:plugin");

    let workspaces = http
        .get(format!("http://{addr}/vitrina/api/workspaces/"))
        .send()
        .await
        .expect("workspaces list");
    assert_eq!(workspaces.status(), StatusCode::OK);
    let workspaces: Value = workspaces.json().await.expect("json");
    assert!(workspaces["workspaces"]["ids"].is_array());
}

#[tokio::test]
async fn workspace_client_url_renders_the_shell() {
    let dirs = common::scaffold();
    let addr = common::spawn_app(common::host_for(&dirs)).await;

    let response = client()
        .get(format!("http://{addr}/vitrina/workspaces/analysis"))
        .send()
        .await
        .expect("request");
    assert_eq!(response.status(), StatusCode::OK);
    let body = response.text().await.expect("body");
    assert!(body.contains("\"workspace\":\"analysis\""));
}

#[tokio::test]
async fn single_document_mode_serves_the_app_at_root() {
    let dirs = common::scaffold();
    let mut host = common::host_for(&dirs);
    host.file_to_run = Some("report.ipynb".to_string());
    let addr = common::spawn_app(host).await;
    let http = client();

    let response = http
        .get(format!("http://{addr}/"))
        .send()
        .await
        .expect("request");
    assert_eq!(response.status(), StatusCode::OK);
    let body = response.text().await.expect("body");
    assert!(body.contains("\"notebookPath\":\"report.ipynb\""));

    // No browsing-mode main route and no single sub-route.
    let response = http
        .get(format!("http://{addr}/vitrina"))
        .send()
        .await
        .expect("request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn unknown_settings_schema_is_404() {
    let dirs = common::scaffold();
    let addr = common::spawn_app(common::host_for(&dirs)).await;

    let response = client()
        .get(format!("http://{addr}/vitrina/api/settings/nope"))
        .send()
        .await
        .expect("request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
