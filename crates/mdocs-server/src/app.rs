//! Router construction.
//!
//! Builds the axum router with all routes and middleware.

use std::sync::Arc;

use axum::Router;
use axum::middleware;
use axum::routing::get;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::access;
use crate::handlers;
use crate::middleware::security;
use crate::state::AppState;
use crate::static_files;

/// Create the application router.
///
/// Route segments share parameter names across routes; the handlers extract
/// them positionally.
pub(crate) fn create_router(state: Arc<AppState>) -> Router {
    let docs_routes = Router::new()
        .route("/docs", get(handlers::listing::get_listing))
        .route("/docs/", get(handlers::listing::get_listing))
        .route("/docs/{first}", get(handlers::documents::redirect_root_document))
        .route("/docs/{first}/", get(handlers::documents::get_root_document))
        .route("/docs/{first}/{second}", get(handlers::assets::get_root_asset))
        .route(
            "/docs/{first}/{second}/",
            get(handlers::documents::get_folder_document),
        )
        .route(
            "/docs/{first}/{second}/{file_name}",
            get(handlers::assets::get_folder_asset),
        )
        .route("/api/navigation", get(handlers::navigation::get_navigation))
        .route_layer(middleware::from_fn_with_state(
            Arc::clone(&state),
            access::require_documentation,
        ));

    let csp = security::csp_layer(&state.client.origins());

    Router::new()
        .merge(docs_routes)
        .merge(static_files::static_router())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(csp)
                .layer(security::content_type_options_layer())
                .layer(security::frame_options_layer()),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use axum::body::{Body, to_bytes};
    use axum::http::{HeaderMap, Request, StatusCode, header};
    use mdocs_site::{AssetPolicy, DocUrls, PageRenderer, StaticSource};
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;
    use tower::ServiceExt;

    use super::*;
    use crate::access::{AccessControl, AllowAll, BearerTokens};
    use crate::layout::ClientAssets;

    /// Denies every capability.
    struct DenyAll;

    impl AccessControl for DenyAll {
        fn has_capability(&self, _capability: &str, _headers: &HeaderMap) -> bool {
            false
        }
    }

    fn write(dir: &Path, name: &str, content: &[u8]) {
        std::fs::write(dir.join(name), content).unwrap();
    }

    /// Docs: "Readme" at the root, "Developer/Setup" in a folder, and
    /// "Gone" whose file does not exist.
    fn fixture() -> TempDir {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "readme.md", b"# Readme\n\n![x](diagram.png)\n");
        write(
            dir.path(),
            "setup.md",
            b"---\ntitle: Setting up\n---\n\n```graph LR\nA --- B\n```\n",
        );
        write(dir.path(), "diagram.png", b"\x89PNG");
        write(dir.path(), "notes.txt", b"some notes");
        write(dir.path(), "secrets.conf", b"password=hunter2");
        dir
    }

    fn router(dir: &TempDir, access: Arc<dyn AccessControl>) -> Router {
        let source = StaticSource::new([
            ("Readme", dir.path().join("readme.md")),
            ("Developer/Setup", dir.path().join("setup.md")),
            ("Gone", dir.path().join("gone.md")),
        ]);
        create_router(Arc::new(AppState {
            source: Arc::new(source),
            access,
            urls: DocUrls::default(),
            renderer: PageRenderer::default(),
            assets: AssetPolicy::default(),
            client: ClientAssets::default(),
            version: "test".to_owned(),
        }))
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn body_bytes(response: axum::response::Response) -> Vec<u8> {
        to_bytes(response.into_body(), usize::MAX).await.unwrap().to_vec()
    }

    async fn body_string(response: axum::response::Response) -> String {
        String::from_utf8(body_bytes(response).await).unwrap()
    }

    #[tokio::test]
    async fn listing_links_every_document() {
        let dir = fixture();
        for uri in ["/docs", "/docs/"] {
            let resp = router(&dir, Arc::new(AllowAll)).oneshot(get(uri)).await.unwrap();
            assert_eq!(resp.status(), StatusCode::OK, "{uri}");
            let body = body_string(resp).await;
            assert!(body.contains(r#"<a href="/docs/readme/">Readme</a>"#));
            assert!(body.contains(r#"<a href="/docs/developer/setup/">Developer/Setup</a>"#));
        }
    }

    #[tokio::test]
    async fn root_document_renders() {
        let dir = fixture();
        let resp = router(&dir, Arc::new(AllowAll))
            .oneshot(get("/docs/readme/"))
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        assert!(resp.headers().contains_key(header::ETAG));
        assert_eq!(resp.headers()["x-frame-options"], "DENY");
        let body = body_string(resp).await;
        assert!(body.contains("<h1>Readme</h1>"));
        assert!(body.contains(r#"<img src="diagram.png""#));
    }

    #[tokio::test]
    async fn folder_document_renders_diagram() {
        let dir = fixture();
        let resp = router(&dir, Arc::new(AllowAll))
            .oneshot(get("/docs/developer/setup/"))
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_string(resp).await;
        assert!(body.contains("<title>Setting up - Documentation</title>"));
        assert!(body.contains("<div class=\"mermaid\">graph LR\nA --- B</div>"));
    }

    #[tokio::test]
    async fn document_without_trailing_slash_redirects() {
        let dir = fixture();
        for (uri, location) in [
            ("/docs/readme", "/docs/readme/"),
            ("/docs/developer", "/docs/developer/"),
            ("/docs/developer/setup", "/docs/developer/setup/"),
        ] {
            let resp = router(&dir, Arc::new(AllowAll)).oneshot(get(uri)).await.unwrap();
            assert_eq!(resp.status(), StatusCode::PERMANENT_REDIRECT, "{uri}");
            assert_eq!(resp.headers()[header::LOCATION], location);
        }
    }

    #[tokio::test]
    async fn unknown_document_is_not_found() {
        let dir = fixture();
        for uri in ["/docs/nope/", "/docs/developer/nope/", "/docs/nope/diagram.png"] {
            let resp = router(&dir, Arc::new(AllowAll)).oneshot(get(uri)).await.unwrap();
            assert_eq!(resp.status(), StatusCode::NOT_FOUND, "{uri}");
        }
    }

    #[tokio::test]
    async fn missing_backing_file_is_not_found() {
        let dir = fixture();
        let resp = router(&dir, Arc::new(AllowAll))
            .oneshot(get("/docs/gone/"))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert!(!body_string(resp).await.contains(&*dir.path().to_string_lossy()));
    }

    #[tokio::test]
    async fn file_deleted_after_startup_is_not_found() {
        let dir = fixture();
        let app = router(&dir, Arc::new(AllowAll));
        std::fs::remove_file(dir.path().join("readme.md")).unwrap();

        let resp = app.oneshot(get("/docs/readme/")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn matching_etag_returns_not_modified() {
        let dir = fixture();
        let first = router(&dir, Arc::new(AllowAll))
            .oneshot(get("/docs/readme/"))
            .await
            .unwrap();
        let etag = first.headers()[header::ETAG].clone();

        let request = Request::builder()
            .uri("/docs/readme/")
            .header(header::IF_NONE_MATCH, etag)
            .body(Body::empty())
            .unwrap();
        let second = router(&dir, Arc::new(AllowAll)).oneshot(request).await.unwrap();
        assert_eq!(second.status(), StatusCode::NOT_MODIFIED);
    }

    #[tokio::test]
    async fn weak_etag_in_list_returns_not_modified() {
        let dir = fixture();
        let first = router(&dir, Arc::new(AllowAll))
            .oneshot(get("/docs/readme/"))
            .await
            .unwrap();
        let etag = first.headers()[header::ETAG].to_str().unwrap().to_owned();

        let request = Request::builder()
            .uri("/docs/readme/")
            .header(header::IF_NONE_MATCH, format!("\"stale\", W/{etag}"))
            .body(Body::empty())
            .unwrap();
        let second = router(&dir, Arc::new(AllowAll)).oneshot(request).await.unwrap();
        assert_eq!(second.status(), StatusCode::NOT_MODIFIED);
    }

    /// A root document owns `/docs/{doc}/{name}`, so the slash-less URL of
    /// a folder document with the same folder name is an asset lookup.
    #[tokio::test]
    async fn root_document_shadows_folder_document_redirect() {
        let dir = fixture();
        write(dir.path(), "guides.md", b"# Guides\n");
        write(dir.path(), "guides-setup.md", b"# Setup\n");
        let source = StaticSource::new([
            ("Guides", dir.path().join("guides.md")),
            ("Guides/Setup", dir.path().join("guides-setup.md")),
        ]);
        let app = create_router(Arc::new(AppState {
            source: Arc::new(source),
            access: Arc::new(AllowAll),
            urls: DocUrls::default(),
            renderer: PageRenderer::default(),
            assets: AssetPolicy::default(),
            client: ClientAssets::default(),
            version: "test".to_owned(),
        }));

        let resp = app.clone().oneshot(get("/docs/guides/setup")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);

        let resp = app.oneshot(get("/docs/guides/setup/")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn allowed_asset_is_served_with_content_type() {
        let dir = fixture();
        let resp = router(&dir, Arc::new(AllowAll))
            .oneshot(get("/docs/readme/diagram.png"))
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers()[header::CONTENT_TYPE], "image/png");
        assert_eq!(body_bytes(resp).await, b"\x89PNG");
    }

    #[tokio::test]
    async fn folder_document_asset_is_served() {
        let dir = fixture();
        let resp = router(&dir, Arc::new(AllowAll))
            .oneshot(get("/docs/developer/setup/notes.txt"))
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_string(resp).await, "some notes");
    }

    #[tokio::test]
    async fn disallowed_asset_type_is_rejected() {
        let dir = fixture();
        for uri in [
            "/docs/readme/secrets.conf",
            "/docs/developer/setup/secrets.conf",
            "/docs/readme/missing.conf",
        ] {
            let resp = router(&dir, Arc::new(AllowAll)).oneshot(get(uri)).await.unwrap();
            assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED, "{uri}");
            assert!(!body_string(resp).await.contains("hunter2"));
        }
    }

    #[tokio::test]
    async fn missing_asset_is_not_found() {
        let dir = fixture();
        let resp = router(&dir, Arc::new(AllowAll))
            .oneshot(get("/docs/readme/missing.png"))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn asset_of_document_with_missing_file_is_not_found() {
        let dir = fixture();
        let resp = router(&dir, Arc::new(AllowAll))
            .oneshot(get("/docs/gone/diagram.png"))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn encoded_traversal_is_not_found() {
        let dir = fixture();
        let resp = router(&dir, Arc::new(AllowAll))
            .oneshot(get("/docs/developer/setup/..%2Fsecrets.png"))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn denied_caller_is_forbidden_everywhere() {
        let dir = fixture();
        for uri in [
            "/docs",
            "/docs/",
            "/docs/readme/",
            "/docs/nope/",
            "/docs/gone/",
            "/docs/readme/diagram.png",
            "/docs/readme/secrets.conf",
            "/docs/developer/setup/",
            "/docs/developer/setup/notes.txt",
            "/docs/readme",
            "/api/navigation",
        ] {
            let resp = router(&dir, Arc::new(DenyAll)).oneshot(get(uri)).await.unwrap();
            assert_eq!(resp.status(), StatusCode::FORBIDDEN, "{uri}");
        }
    }

    #[tokio::test]
    async fn bearer_token_grants_access() {
        let dir = fixture();
        let access = || -> Arc<dyn AccessControl> {
            Arc::new(BearerTokens::new(vec!["s3cret".to_owned()]))
        };

        let denied = router(&dir, access()).oneshot(get("/docs/")).await.unwrap();
        assert_eq!(denied.status(), StatusCode::FORBIDDEN);

        let request = Request::builder()
            .uri("/docs/")
            .header(header::AUTHORIZATION, "Bearer s3cret")
            .body(Body::empty())
            .unwrap();
        let allowed = router(&dir, access()).oneshot(request).await.unwrap();
        assert_eq!(allowed.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn navigation_json() {
        let dir = fixture();
        let resp = router(&dir, Arc::new(AllowAll))
            .oneshot(get("/api/navigation"))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let json: serde_json::Value = serde_json::from_str(&body_string(resp).await).unwrap();
        assert_eq!(json["label"], "Documentation");
        assert_eq!(json["children"][0]["uri"], "/docs/readme/");
        assert_eq!(json["children"][1]["label"], "Developer");
        assert_eq!(json["children"][1]["children"][0]["uri"], "/docs/developer/setup/");
        assert_eq!(json["children"][2]["label"], "Gone");
    }

    #[tokio::test]
    async fn client_script_is_public() {
        let dir = fixture();
        let resp = router(&dir, Arc::new(DenyAll))
            .oneshot(get("/static/mdocs.js"))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers()[header::CONTENT_TYPE],
            "text/javascript; charset=utf-8"
        );
    }

    #[tokio::test]
    async fn csp_allows_configured_cdn() {
        let dir = fixture();
        let resp = router(&dir, Arc::new(AllowAll))
            .oneshot(get("/docs/"))
            .await
            .unwrap();
        let csp = resp.headers()["content-security-policy"].to_str().unwrap();
        assert!(csp.contains("https://cdnjs.cloudflare.com"));
    }

    #[tokio::test]
    async fn invalid_configuration_is_server_error() {
        let state = AppState {
            source: Arc::new(StaticSource::new([("a/b/c", "x.md")])),
            access: Arc::new(AllowAll),
            urls: DocUrls::default(),
            renderer: PageRenderer::default(),
            assets: AssetPolicy::default(),
            client: ClientAssets::default(),
            version: String::new(),
        };
        let resp = create_router(Arc::new(state))
            .oneshot(get("/docs/"))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
