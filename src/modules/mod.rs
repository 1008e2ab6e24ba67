//! Console modules registered with the kernel registry.

pub mod books;
pub mod console;
pub mod reservations;
pub mod users;

use std::sync::Arc;

use axum::{response::Html, routing::get, Router};
use lectern_kernel::ModuleRegistry;

use crate::console::{render_tbody, Collection, ReservationConsole};

/// Register the console page and the three table panels.
pub fn register_all(registry: &mut ModuleRegistry, shared: Arc<ReservationConsole>) {
    registry.register(console::create_module(shared.clone()));
    registry.register(books::create_module(shared.clone()));
    registry.register(reservations::create_module(shared.clone()));
    registry.register(users::create_module(shared));
}

fn panel_path(collection: Collection) -> String {
    format!("/tables/{}", collection.name())
}

/// `GET /` refreshes the collection and answers with its `<tbody>`.
fn panel_routes(shared: Arc<ReservationConsole>, collection: Collection) -> Router {
    Router::new().route(
        "/",
        get(move || {
            let shared = shared.clone();
            async move {
                let state = shared.fetch(collection).await;
                Html(render_tbody(&state, collection.columns()))
            }
        }),
    )
}
