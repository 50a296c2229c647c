//! Shared helpers for the integration tests.

use std::fs;
use std::net::SocketAddr;
use std::path::Path;

use tempfile::TempDir;
use tokio::net::TcpListener;

use vitrina::{AppServer, HostConfig};

/// A scaffolded bundle plus data directories, kept alive with the server.
pub struct TestDirs {
    pub root: TempDir,
    pub app_dir: String,
    pub user_settings_dir: String,
    pub workspaces_dir: String,
}

/// Create a bundle directory with a shell template, one static asset, one
/// settings schema and one theme file.
pub fn scaffold() -> TestDirs {
    let root = TempDir::new().expect("tempdir");
    let app = root.path().join("app");

    write(
        &app.join("static/index.html"),
        "<!doctype html><html><body><script id=\"config\">{{page_config}}</script></body></html>",
    );
    write(&app.join("static/bundle.js"), "console.log('vitrina');");
    write(
        &app.join("schemas/@vitrina/shell/plugin.json"),
        r#"{"title": "Shell", "properties": {"theme": {"type": "string"}}}"#,
    );
    write(&app.join("themes/light/index.css"), "body { color: #000; }");

    let user_settings = root.path().join("user-settings");
    let workspaces = root.path().join("workspaces");
    fs::create_dir_all(&user_settings).unwrap();
    fs::create_dir_all(&workspaces).unwrap();

    TestDirs {
        app_dir: app.to_string_lossy().into_owned(),
        user_settings_dir: user_settings.to_string_lossy().into_owned(),
        workspaces_dir: workspaces.to_string_lossy().into_owned(),
        root,
    }
}

/// Host record pointing at the scaffolded directories.
pub fn host_for(dirs: &TestDirs) -> HostConfig {
    HostConfig {
        app_dir: Some(dirs.app_dir.clone()),
        user_settings_dir: Some(dirs.user_settings_dir.clone()),
        workspaces_dir: Some(dirs.workspaces_dir.clone()),
        ..HostConfig::default()
    }
}

/// Start the app on an ephemeral port and return its address.
pub async fn spawn_app(host: HostConfig) -> SocketAddr {
    let server = AppServer::new(&host);
    let router = server.router();
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("serve");
    });
    addr
}

fn write(path: &Path, content: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}
