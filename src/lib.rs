//! Lectern: a browser console for the library reservation service.
//!
//! The [`console`] holds the table and form state; [`modules`] exposes it over
//! HTTP through the kernel's module registry.

pub mod console;
pub mod modules;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use lectern_client::HttpLibraryApi;
use lectern_kernel::settings::{BackendSettings, Settings};
use lectern_kernel::{InitCtx, ModuleRegistry};

use console::ReservationConsole;

/// Build the HTTP client for the configured backend.
pub fn library_api(backend: &BackendSettings) -> anyhow::Result<HttpLibraryApi> {
    HttpLibraryApi::new(
        backend.base_url.clone(),
        Duration::from_millis(backend.request_timeout_ms),
    )
    .with_context(|| format!("invalid backend url '{}'", backend.base_url))
}

/// Run the console server until shutdown.
pub async fn serve(settings: &Settings) -> anyhow::Result<()> {
    let api = Arc::new(library_api(&settings.backend)?);
    let console = Arc::new(ReservationConsole::from_settings(api, &settings.console)?);

    let mut registry = ModuleRegistry::new();
    modules::register_all(&mut registry, console);
    tracing::info!(modules = registry.module_count(), "modules registered");

    let ctx = InitCtx { settings };
    registry.init_modules(&ctx).await?;
    registry.start_modules(&ctx).await?;

    let served = lectern_http::start_server(&registry, settings).await;
    registry.stop_modules().await?;
    served
}
