//! HTTP server facade for Lectern: router assembly, middleware and error bodies.

use anyhow::Context;
use axum::{routing::get, Router};

use lectern_kernel::settings::Settings;
use lectern_kernel::ModuleRegistry;

pub mod error;
pub mod router;

use router::RouterBuilder;

/// Serve the registry's modules until ctrl-c.
pub async fn start_server(registry: &ModuleRegistry, settings: &Settings) -> anyhow::Result<()> {
    let app = build_router(registry, settings)
        .await
        .context("failed to build HTTP router")?;

    let address = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind to {address}"))?;

    tracing::info!("HTTP server listening on http://{address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    tracing::info!("HTTP server stopped");
    Ok(())
}

/// Build the main HTTP router with all module routes mounted
pub async fn build_router(
    registry: &ModuleRegistry,
    settings: &Settings,
) -> anyhow::Result<Router> {
    let mut router_builder = RouterBuilder::new().route("/healthz", get(health_check));

    for module in registry.modules() {
        let mount_path = module.mount_path();
        tracing::info!(module = module.name(), path = %mount_path, "mounting module routes");
        router_builder = router_builder.mount_module(&mount_path, module.routes());
    }

    Ok(router_builder
        .with_not_found()
        .with_tracing()
        .with_request_id()
        .with_timeout(settings.server.request_timeout_ms)
        .build())
}

async fn health_check() -> &'static str {
    "ok"
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "could not listen for ctrl-c; serving until killed");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::{body::Body, http::Request, http::StatusCode};
    use lectern_kernel::Module;
    use std::sync::Arc;
    use tower::ServiceExt;

    struct Shelf;

    #[async_trait]
    impl Module for Shelf {
        fn name(&self) -> &'static str {
            "shelf"
        }

        fn mount_path(&self) -> String {
            "/tables/shelf".to_string()
        }

        fn routes(&self) -> Router {
            Router::new().route("/", get(|| async { "<tbody></tbody>" }))
        }
    }

    async fn text(response: axum::response::Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn router_serves_health_modules_and_json_404() {
        let mut registry = ModuleRegistry::new();
        registry.register(Arc::new(Shelf));
        let router = build_router(&registry, &Settings::default()).await.unwrap();

        let response = router
            .clone()
            .oneshot(Request::get("/healthz").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(text(response).await, "ok");

        let response = router
            .clone()
            .oneshot(Request::get("/tables/shelf").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(text(response).await, "<tbody></tbody>");

        let response = router
            .oneshot(Request::get("/nowhere").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body: serde_json::Value = serde_json::from_str(&text(response).await).unwrap();
        assert_eq!(body["error"]["code"], "not_found");
    }
}
