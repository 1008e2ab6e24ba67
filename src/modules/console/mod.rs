//! The console page and its three form endpoints.
//!
//! Form posts answer `303 See Other` back to `/`, carrying the submitter's
//! alerts as `notice` query parameters so they reach only that visitor.

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    extract::{rejection::FormRejection, RawQuery, State},
    response::{Html, Redirect},
    routing::{get, post},
    Form, Router,
};
use lectern_http::error::AppError;
use lectern_kernel::{InitCtx, Module};
use serde_json::json;

use crate::console::{
    render_page, FormInputs, FormKind, NoticeBoard, ReservationConsole, SubmitOutcome,
};

const NOTICE_PARAM: &str = "notice";

pub struct ConsoleModule {
    console: Arc<ReservationConsole>,
}

impl ConsoleModule {
    pub fn new(console: Arc<ReservationConsole>) -> Self {
        Self { console }
    }
}

#[async_trait]
impl Module for ConsoleModule {
    fn name(&self) -> &'static str {
        "console"
    }

    fn mount_path(&self) -> String {
        "/".to_string()
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            backend = %ctx.settings.backend.base_url,
            update_variant = ?self.console.update_variant(),
            "console module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        Router::new()
            .route("/", get(show_page))
            .route(FormKind::Make.action_path(), post(make_reservation))
            .route(FormKind::Update.action_path(), post(update_reservation))
            .route(FormKind::Remove.action_path(), post(remove_reservation))
            .with_state(self.console.clone())
    }

    /// Warm the tables so the first render is not all loading rows.
    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        self.console.load().await;
        tracing::info!(module = self.name(), "initial tables loaded");
        Ok(())
    }
}

pub fn create_module(console: Arc<ReservationConsole>) -> Arc<dyn Module> {
    Arc::new(ConsoleModule::new(console))
}

async fn show_page(
    State(console): State<Arc<ReservationConsole>>,
    RawQuery(query): RawQuery,
) -> Html<String> {
    console.load().await;
    let view = console.page(notices_from(query.as_deref())).await;
    Html(render_page(&view))
}

async fn make_reservation(
    State(console): State<Arc<ReservationConsole>>,
    inputs: Result<Form<FormInputs>, FormRejection>,
) -> Result<Redirect, AppError> {
    submit(&console, FormKind::Make, inputs).await
}

async fn update_reservation(
    State(console): State<Arc<ReservationConsole>>,
    inputs: Result<Form<FormInputs>, FormRejection>,
) -> Result<Redirect, AppError> {
    submit(&console, FormKind::Update, inputs).await
}

async fn remove_reservation(
    State(console): State<Arc<ReservationConsole>>,
    inputs: Result<Form<FormInputs>, FormRejection>,
) -> Result<Redirect, AppError> {
    submit(&console, FormKind::Remove, inputs).await
}

async fn submit(
    console: &ReservationConsole,
    form: FormKind,
    inputs: Result<Form<FormInputs>, FormRejection>,
) -> Result<Redirect, AppError> {
    let Form(inputs) = inputs.map_err(|rejection| AppError::bad_request(rejection.body_text()))?;

    let board = NoticeBoard::new();
    match console.submit(form, &inputs, &board).await {
        SubmitOutcome::Busy => Err(AppError::conflict(
            vec![json!({ "form": form.form_id() })],
            format!("{} is already being submitted", form.title()),
        )),
        SubmitOutcome::Replied(_) | SubmitOutcome::Failed(_) => {
            Ok(Redirect::to(&page_location(&board.drain())))
        }
    }
}

fn page_location(notices: &[String]) -> String {
    if notices.is_empty() {
        return "/".to_string();
    }
    let mut query = form_urlencoded::Serializer::new(String::new());
    for notice in notices {
        query.append_pair(NOTICE_PARAM, notice);
    }
    format!("/?{}", query.finish())
}

fn notices_from(query: Option<&str>) -> Vec<String> {
    let Some(query) = query else {
        return Vec::new();
    };
    form_urlencoded::parse(query.as_bytes())
        .filter_map(|(key, value)| (key == NOTICE_PARAM).then(|| value.into_owned()))
        .collect()
}
