pub mod rows;

use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use lectern_kernel::Module;

use crate::console::{Collection, ReservationConsole};

pub struct UsersPanel {
    console: Arc<ReservationConsole>,
}

impl UsersPanel {
    pub fn new(console: Arc<ReservationConsole>) -> Self {
        Self { console }
    }
}

#[async_trait]
impl Module for UsersPanel {
    fn name(&self) -> &'static str {
        "users"
    }

    fn mount_path(&self) -> String {
        super::panel_path(Collection::Users)
    }

    fn routes(&self) -> Router {
        super::panel_routes(self.console.clone(), Collection::Users)
    }
}

pub fn create_module(console: Arc<ReservationConsole>) -> Arc<dyn Module> {
    Arc::new(UsersPanel::new(console))
}
