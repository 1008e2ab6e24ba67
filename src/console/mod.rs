//! The reservation console.
//!
//! Three read-only collection tables (books, reservations, users) and three
//! forms that mutate reservations on the backend. State is held explicitly
//! per table and re-rendered only through the fetch operations below.

mod format;
mod forms;
mod guard;
mod notify;
mod page;
mod table;

#[cfg(test)]
pub(crate) mod testing;

use std::sync::Arc;

use lectern_client::{
    ClientError, LibraryApi, MakeReservation, RemoveReservation, ServerReply, UpdateReservation,
};
use lectern_kernel::settings::{ConsoleSettings, UpdateVariant};

use crate::modules::{books, reservations, users};

pub use format::{CellFormatter, INVALID_DATE};
pub use forms::{input_ids, FormInputs, FormKind};
pub use notify::{NoticeBoard, Notifier};
pub use page::{render_page, PageView};
pub use table::{escape_html, render_tbody, render_text, TableRow, TableState};

use guard::SubmitGuard;
use table::TableSlot;

/// Alert text for a reply that carries neither a message nor an error.
pub const NO_MESSAGE: &str = "The server sent no message.";

/// One of the three collection tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Books,
    Reservations,
    Users,
}

impl Collection {
    pub const ALL: [Collection; 3] = [
        Collection::Books,
        Collection::Reservations,
        Collection::Users,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Collection::Books => "books",
            Collection::Reservations => "reservations",
            Collection::Users => "users",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Collection::Books => "Books",
            Collection::Reservations => "Reservations",
            Collection::Users => "Users",
        }
    }

    pub fn table_id(self) -> &'static str {
        match self {
            Collection::Books => "books-table",
            Collection::Reservations => "reservations-table",
            Collection::Users => "users-table",
        }
    }

    pub fn columns(self) -> &'static [&'static str] {
        match self {
            Collection::Books => books::rows::COLUMNS,
            Collection::Reservations => reservations::rows::COLUMNS,
            Collection::Users => users::rows::COLUMNS,
        }
    }
}

/// Result of submitting one of the forms.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// The backend answered; its message or error was alerted.
    Replied(ServerReply),
    /// The request itself failed; the failure was alerted.
    Failed(String),
    /// A submission of the same form is still in flight; nothing was sent.
    Busy,
}

pub struct ReservationConsole {
    api: Arc<dyn LibraryApi>,
    formatter: CellFormatter,
    update_variant: UpdateVariant,
    books: TableSlot,
    reservations: TableSlot,
    users: TableSlot,
    make_guard: SubmitGuard,
    update_guard: SubmitGuard,
    remove_guard: SubmitGuard,
}

impl ReservationConsole {
    pub fn new(
        api: Arc<dyn LibraryApi>,
        formatter: CellFormatter,
        update_variant: UpdateVariant,
    ) -> Self {
        Self {
            api,
            formatter,
            update_variant,
            books: TableSlot::new(),
            reservations: TableSlot::new(),
            users: TableSlot::new(),
            make_guard: SubmitGuard::default(),
            update_guard: SubmitGuard::default(),
            remove_guard: SubmitGuard::default(),
        }
    }

    pub fn from_settings(
        api: Arc<dyn LibraryApi>,
        settings: &ConsoleSettings,
    ) -> anyhow::Result<Self> {
        let formatter = CellFormatter::from_settings(settings)?;
        Ok(Self::new(api, formatter, settings.update_variant))
    }

    pub fn update_variant(&self) -> UpdateVariant {
        self.update_variant
    }

    /// Initial page load: all three collections, fetched concurrently.
    pub async fn load(&self) {
        tokio::join!(
            self.fetch_books(),
            self.fetch_reservations(),
            self.fetch_users()
        );
    }

    pub async fn fetch_books(&self) -> TableState {
        let ticket = self.books.issue();
        let fetched = self.api.list_books().await;
        self.settle(Collection::Books, ticket, fetched).await
    }

    pub async fn fetch_reservations(&self) -> TableState {
        let ticket = self.reservations.issue();
        let fetched = self.api.list_reservations().await;
        self.settle(Collection::Reservations, ticket, fetched).await
    }

    pub async fn fetch_users(&self) -> TableState {
        let ticket = self.users.issue();
        let fetched = self.api.list_users().await;
        self.settle(Collection::Users, ticket, fetched).await
    }

    pub async fn fetch(&self, collection: Collection) -> TableState {
        match collection {
            Collection::Books => self.fetch_books().await,
            Collection::Reservations => self.fetch_reservations().await,
            Collection::Users => self.fetch_users().await,
        }
    }

    /// What the table shows right now, without fetching.
    pub async fn table(&self, collection: Collection) -> TableState {
        self.slot(collection).snapshot().await
    }

    /// Snapshot every table into a page with the given notices.
    pub async fn page(&self, notices: Vec<String>) -> PageView {
        let mut tables = Vec::with_capacity(Collection::ALL.len());
        for collection in Collection::ALL {
            tables.push((collection, self.table(collection).await));
        }

        PageView {
            tables,
            notices,
            update_variant: self.update_variant,
        }
    }

    /// Submit one form. The reply, or the failure, is alerted to `notifier`
    /// only, so each caller sees exactly its own alerts.
    pub async fn submit(
        &self,
        form: FormKind,
        inputs: &FormInputs,
        notifier: &dyn Notifier,
    ) -> SubmitOutcome {
        match form {
            FormKind::Make => self.submit_make_reservation(inputs, notifier).await,
            FormKind::Update => self.submit_update_reservation(inputs, notifier).await,
            FormKind::Remove => self.submit_remove_reservation(inputs, notifier).await,
        }
    }

    pub async fn submit_make_reservation(
        &self,
        inputs: &FormInputs,
        notifier: &dyn Notifier,
    ) -> SubmitOutcome {
        let Some(_permit) = self.make_guard.try_acquire() else {
            return busy(FormKind::Make);
        };

        let body = MakeReservation {
            book_id: inputs.value(input_ids::BOOK_ID),
            user_id: inputs.value(input_ids::USER_ID),
        };
        let result = self.api.make_reservation(&body).await;
        let outcome = self.deliver(FormKind::Make, result, notifier);

        tokio::join!(self.fetch_books(), self.fetch_reservations());
        outcome
    }

    pub async fn submit_update_reservation(
        &self,
        inputs: &FormInputs,
        notifier: &dyn Notifier,
    ) -> SubmitOutcome {
        let Some(_permit) = self.update_guard.try_acquire() else {
            return busy(FormKind::Update);
        };

        let body = match self.update_variant {
            UpdateVariant::ReservationId => UpdateReservation::ByReservation {
                reservation_id: inputs.value(input_ids::RESERVATION_ID),
                new_user_id: inputs.value(input_ids::NEW_USER_ID),
            },
            UpdateVariant::BookUser => UpdateReservation::ByBookAndUser {
                book_id: inputs.value(input_ids::UPDATE_BOOK_ID),
                user_id: inputs.value(input_ids::UPDATE_USER_ID),
            },
        };
        let result = self.api.update_reservation(&body).await;
        let outcome = self.deliver(FormKind::Update, result, notifier);

        // An update never changes which books are free.
        self.fetch_reservations().await;
        outcome
    }

    pub async fn submit_remove_reservation(
        &self,
        inputs: &FormInputs,
        notifier: &dyn Notifier,
    ) -> SubmitOutcome {
        let Some(_permit) = self.remove_guard.try_acquire() else {
            return busy(FormKind::Remove);
        };

        let body = RemoveReservation {
            book_id: inputs.value(input_ids::REMOVE_BOOK_ID),
            user_id: inputs.value(input_ids::REMOVE_USER_ID),
        };
        let result = self.api.remove_reservation(&body).await;
        let outcome = self.deliver(FormKind::Remove, result, notifier);

        tokio::join!(self.fetch_books(), self.fetch_reservations());
        outcome
    }

    fn slot(&self, collection: Collection) -> &TableSlot {
        match collection {
            Collection::Books => &self.books,
            Collection::Reservations => &self.reservations,
            Collection::Users => &self.users,
        }
    }

    async fn settle<T: TableRow>(
        &self,
        collection: Collection,
        ticket: u64,
        fetched: Result<Vec<T>, ClientError>,
    ) -> TableState {
        let state = match fetched {
            Ok(items) => {
                tracing::debug!(
                    table = collection.table_id(),
                    rows = items.len(),
                    "collection refreshed"
                );
                let rows = items.iter().map(|item| item.cells(&self.formatter));
                TableState::Ready(rows.collect())
            }
            Err(err) => {
                tracing::warn!(
                    table = collection.table_id(),
                    error = %err,
                    "collection refresh failed"
                );
                TableState::Failed(err.to_string())
            }
        };

        self.slot(collection).settle(ticket, state).await
    }

    fn deliver(
        &self,
        form: FormKind,
        result: Result<ServerReply, ClientError>,
        notifier: &dyn Notifier,
    ) -> SubmitOutcome {
        match result {
            Ok(reply) => {
                tracing::info!(
                    form = form.form_id(),
                    rejected = reply.is_error(),
                    "form submitted"
                );
                notifier.alert(reply.alert_text().unwrap_or(NO_MESSAGE));
                SubmitOutcome::Replied(reply)
            }
            Err(err) => {
                tracing::warn!(form = form.form_id(), error = %err, "form submission failed");
                let text = format!("{} failed: {err}", form.title());
                notifier.alert(&text);
                SubmitOutcome::Failed(text)
            }
        }
    }
}

fn busy(form: FormKind) -> SubmitOutcome {
    tracing::info!(form = form.form_id(), "submission already in flight; ignored");
    SubmitOutcome::Busy
}
