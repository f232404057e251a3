use {
    axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
        Router,
    },
    serde_json::{json, Value},
    sitecms_api::ApiServer,
    sitecms_common::{CmsConfig, StoreConfig},
    sitecms_render::{DocumentSource, Endpoint, HttpSource},
    std::{net::SocketAddr, path::Path},
    tempfile::TempDir,
    tower::ServiceExt,
};

struct Site {
    dir: TempDir,
    server: ApiServer,
}

impl Site {
    fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        std::fs::create_dir_all(root.join("public")).unwrap();
        std::fs::create_dir_all(root.join("cms")).unwrap();
        std::fs::write(root.join("cms/index.html"), "<h1>Admin</h1>").unwrap();
        std::fs::write(root.join("cms/app.js"), "console.log('admin');").unwrap();

        let mut config = CmsConfig::default();
        config.server.admin_ui_root = root.join("cms");
        config.store = StoreConfig {
            primary_root: root.join("public"),
            deployed_root: root.join("dist"),
            ..StoreConfig::default()
        };

        let server = ApiServer::new(config).unwrap();
        Self { dir, server }
    }

    fn root(&self) -> &Path {
        self.dir.path()
    }

    fn router(&self) -> Router {
        self.server.router()
    }
}

async fn send(router: Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, body.to_vec())
}

async fn get(router: Router, uri: &str) -> (StatusCode, Vec<u8>) {
    send(router, Request::get(uri).body(Body::empty()).unwrap()).await
}

async fn save(router: Router, file: &str, body: &str) -> (StatusCode, Value) {
    let request = Request::post(format!("/api/save?file={}", file))
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let (status, bytes) = send(router, request).await;
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn json_body(bytes: &[u8]) -> Value {
    serde_json::from_slice(bytes).unwrap()
}

#[tokio::test]
async fn test_save_then_get() {
    let site = Site::new();

    let (status, body) = save(site.router(), "config.json", r#"{"text":{"name":"Example"}}"#).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "success": true, "message": "File saved and deployed to dist." })
    );

    let (status, body) = get(site.router(), "/api/get?file=config.json").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json_body(&body), json!({ "text": { "name": "Example" } }));

    let primary = std::fs::read(site.root().join("public/config.json")).unwrap();
    let mirror = std::fs::read(site.root().join("dist/config.json")).unwrap();
    assert_eq!(primary, mirror);
}

#[tokio::test]
async fn test_second_save_keeps_backup() {
    let site = Site::new();

    save(site.router(), "seo.json", r#"{"title":"First"}"#).await;
    save(site.router(), "seo.json", r#"{"title":"Second"}"#).await;

    let backup = std::fs::read(site.root().join("public/seo.json.bak")).unwrap();
    assert_eq!(json_body(&backup), json!({ "title": "First" }));
    let (_, body) = get(site.router(), "/api/get?file=seo.json").await;
    assert_eq!(json_body(&body), json!({ "title": "Second" }));
}

#[tokio::test]
async fn test_disallowed_file_is_forbidden() {
    let site = Site::new();

    let (status, body) = save(site.router(), "secrets.json", r#"{"a":1}"#).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body, json!({ "error": "Access denied to this file" }));
    assert!(!site.root().join("public/secrets.json").exists());
    assert!(!site.root().join("dist/secrets.json").exists());

    let (status, body) = get(site.router(), "/api/get?file=../Cargo.toml").await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(json_body(&body), json!({ "error": "Access denied to this file" }));

    let (status, _) = get(site.router(), "/api/get").await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_repeated_file_parameter_is_forbidden() {
    let site = Site::new();
    save(site.router(), "config.json", "{}").await;

    let (status, body) = get(site.router(), "/api/get?file=config.json&file=secrets.json").await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(json_body(&body), json!({ "error": "Access denied to this file" }));

    let (status, body) = save(site.router(), "secrets.json&file=config.json", r#"{"a":1}"#).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body, json!({ "error": "Access denied to this file" }));
    assert!(!site.root().join("public/secrets.json").exists());
    assert_eq!(
        json_body(&std::fs::read(site.root().join("public/config.json")).unwrap()),
        json!({})
    );
}

#[tokio::test]
async fn test_disallowed_file_is_checked_before_body() {
    let site = Site::new();

    let (status, body) = save(site.router(), "secrets.json", "not json").await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body, json!({ "error": "Access denied to this file" }));
}

#[tokio::test]
async fn test_malformed_body_is_bad_request() {
    let site = Site::new();

    let (status, body) = save(site.router(), "config.json", "{ not json").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
    assert!(!site.root().join("public/config.json").exists());
}

#[tokio::test]
async fn test_read_errors() {
    let site = Site::new();

    let (status, body) = get(site.router(), "/api/get?file=config.json").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json_body(&body), json!({ "error": "Error reading file" }));

    std::fs::write(site.root().join("public/seo.json"), "{ broken").unwrap();
    let (status, body) = get(site.router(), "/api/get?file=seo.json").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json_body(&body), json!({ "error": "Error reading file" }));
}

#[tokio::test]
async fn test_write_error() {
    let site = Site::new();
    std::fs::create_dir_all(site.root().join("public/config.json")).unwrap();

    let (status, body) = save(site.router(), "config.json", r#"{"a":1}"#).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "Error writing file" }));
}

#[tokio::test]
async fn test_static_routes() {
    let site = Site::new();
    std::fs::write(site.root().join("public/robots.txt"), "User-agent: *").unwrap();

    let (status, body) = get(site.router(), "/sys-ops").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"<h1>Admin</h1>");

    let (status, body) = get(site.router(), "/cms-assets/app.js").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"console.log('admin');");

    let (status, body) = get(site.router(), "/robots.txt").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"User-agent: *");

    let (status, _) = get(site.router(), "/missing.txt").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_preview_renders_saved_documents() {
    let site = Site::new();

    let (status, body) = get(site.router(), "/sys-ops/preview").await;
    assert_eq!(status, StatusCode::OK);
    let html = String::from_utf8(body).unwrap();
    assert!(html.contains(r#"<div class="error">Error loading content. Check console.</div>"#));

    save(
        site.router(),
        "config.json",
        r#"{"text":{"name":"Example","about":{"title":"About Example"}}}"#,
    )
    .await;
    save(site.router(), "seo.json", r#"{"title":"Example | Home"}"#).await;

    let (status, body) = get(site.router(), "/sys-ops/preview").await;
    assert_eq!(status, StatusCode::OK);
    let html = String::from_utf8(body).unwrap();
    assert!(html.contains("<title>Example | Home</title>"));
    assert!(html.contains(r#"<html lang="fr">"#));
    assert!(html.contains("About Example"));
}

#[tokio::test]
async fn test_health_and_status() {
    let site = Site::new();
    site.server.register_default_checks().await;

    let (status, body) = get(site.router(), "/health").await;
    assert_eq!(status, StatusCode::OK);
    let health = json_body(&body);
    assert_eq!(health["status"], "degraded");
    assert_eq!(health["checks"]["primary_root"]["status"], "healthy");

    save(site.router(), "config.json", "{}").await;
    let (_, body) = get(site.router(), "/health").await;
    assert_eq!(json_body(&body)["status"], "healthy");

    let (status, body) = get(site.router(), "/status").await;
    assert_eq!(status, StatusCode::OK);
    let status_body = json_body(&body);
    assert_eq!(status_body["success"], true);
    assert_eq!(status_body["data"]["name"], "sitecms");
    assert_eq!(status_body["data"]["additional"]["admin_path"], "/sys-ops");
}

#[tokio::test]
async fn test_http_source_against_running_server() {
    let site = Site::new();
    save(site.router(), "config.json", r#"{"text":{"name":"Example"}}"#).await;

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr: SocketAddr = listener.local_addr().unwrap();
    let (tx, rx) = tokio::sync::oneshot::channel::<()>();
    let router = site.router();
    let server = tokio::spawn(async move {
        axum::serve(listener, router)
            .with_graceful_shutdown(async {
                let _ = rx.await;
            })
            .await
    });

    let base = format!("http://{}", addr);
    let api = HttpSource::new(base.clone(), Endpoint::Api);
    assert_eq!(
        api.fetch("config.json").await.unwrap(),
        json!({ "text": { "name": "Example" } })
    );
    assert!(api.fetch("secrets.json").await.is_err());

    let files = HttpSource::new(base, Endpoint::StaticFiles);
    assert_eq!(
        files.fetch("config.json").await.unwrap(),
        json!({ "text": { "name": "Example" } })
    );
    assert!(files.fetch("seo.json").await.is_err());

    tx.send(()).unwrap();
    server.await.unwrap().unwrap();
}
