pub mod rows;

use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use lectern_kernel::{InitCtx, Module};

use crate::console::{Collection, ReservationConsole};

/// Serves the reservations table body at `/tables/reservations`.
pub struct ReservationsPanel {
    console: Arc<ReservationConsole>,
}

impl ReservationsPanel {
    pub fn new(console: Arc<ReservationConsole>) -> Self {
        Self { console }
    }
}

#[async_trait]
impl Module for ReservationsPanel {
    fn name(&self) -> &'static str {
        "reservations"
    }

    fn mount_path(&self) -> String {
        super::panel_path(Collection::Reservations)
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            utc_offset_minutes = ctx.settings.console.utc_offset_minutes,
            "reservations panel initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        super::panel_routes(self.console.clone(), Collection::Reservations)
    }
}

pub fn create_module(console: Arc<ReservationConsole>) -> Arc<dyn Module> {
    Arc::new(ReservationsPanel::new(console))
}
