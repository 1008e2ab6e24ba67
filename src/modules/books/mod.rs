pub mod rows;

use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use lectern_kernel::{InitCtx, Module};

use crate::console::{Collection, ReservationConsole};

/// Serves the books table body at `/tables/books`.
pub struct BooksPanel {
    console: Arc<ReservationConsole>,
}

impl BooksPanel {
    pub fn new(console: Arc<ReservationConsole>) -> Self {
        Self { console }
    }
}

#[async_trait]
impl Module for BooksPanel {
    fn name(&self) -> &'static str {
        "books"
    }

    fn mount_path(&self) -> String {
        super::panel_path(Collection::Books)
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            "books panel initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        super::panel_routes(self.console.clone(), Collection::Books)
    }
}

pub fn create_module(console: Arc<ReservationConsole>) -> Arc<dyn Module> {
    Arc::new(BooksPanel::new(console))
}
