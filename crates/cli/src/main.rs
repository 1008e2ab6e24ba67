use std::sync::Arc;

use anyhow::{bail, Context};
use clap::{ArgGroup, Args, Parser, Subcommand};
use lectern_app::console::{
    input_ids, render_text, CellFormatter, Collection, FormInputs, FormKind, Notifier,
    ReservationConsole, SubmitOutcome, TableRow, TableState,
};
use lectern_client::bulk::{self, DEFAULT_PROGRESS_EVERY};
use lectern_client::{LibraryApi, ReservationLookup};
use lectern_kernel::settings::{Settings, UpdateVariant};

#[derive(Parser)]
#[command(name = "lectern", version, about = "Console for the library reservation service")]
struct Cli {
    /// Backend base URL, overriding configuration
    #[arg(long, global = true)]
    backend_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Serve the web console
    Serve,
    /// Print the books table
    Books,
    /// Print the reservations table
    Reservations,
    /// Print the users table
    Users,
    /// Reserve a book for a user
    Make(BookUser),
    /// Move a reservation to another user
    Update(UpdateArgs),
    /// Cancel a user's reservation of a book
    Remove(BookUser),
    /// Show a single reservation
    View {
        reservation_id: String,
    },
    /// Remove every reservation, one request each
    Purge {
        /// Log remaining count after this many removals
        #[arg(long, default_value_t = DEFAULT_PROGRESS_EVERY)]
        progress_every: usize,
    },
}

#[derive(Args)]
struct BookUser {
    #[arg(long)]
    book_id: String,
    #[arg(long)]
    user_id: String,
}

#[derive(Args)]
#[command(group(ArgGroup::new("target").required(true).args(["reservation_id", "book_id"])))]
struct UpdateArgs {
    #[arg(long, requires = "new_user_id")]
    reservation_id: Option<String>,
    #[arg(long, requires = "reservation_id")]
    new_user_id: Option<String>,
    #[arg(long, requires = "user_id")]
    book_id: Option<String>,
    #[arg(long, requires = "book_id")]
    user_id: Option<String>,
}

impl UpdateArgs {
    fn into_form(self) -> (UpdateVariant, FormInputs) {
        match (self.reservation_id, self.new_user_id) {
            (Some(reservation_id), new_user_id) => (
                UpdateVariant::ReservationId,
                FormInputs::new()
                    .with(input_ids::RESERVATION_ID, reservation_id)
                    .with(input_ids::NEW_USER_ID, new_user_id.unwrap_or_default()),
            ),
            (None, _) => (
                UpdateVariant::BookUser,
                FormInputs::new()
                    .with(input_ids::UPDATE_BOOK_ID, self.book_id.unwrap_or_default())
                    .with(input_ids::UPDATE_USER_ID, self.user_id.unwrap_or_default()),
            ),
        }
    }
}

/// Alerts go straight to the terminal.
struct StdoutNotifier;

impl Notifier for StdoutNotifier {
    fn alert(&self, text: &str) {
        println!("{text}");
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut settings = Settings::load().with_context(|| "failed to load Lectern settings")?;
    if let Some(url) = cli.backend_url {
        settings.backend.base_url = url;
    }
    // One-shot commands print to stdout; keep the log to errors.
    if !matches!(cli.command, Command::Serve | Command::Purge { .. }) {
        settings.telemetry.filter = "error".to_string();
    }
    lectern_telemetry::init(&settings.telemetry)?;

    match cli.command {
        Command::Serve => lectern_app::serve(&settings).await,
        Command::Books => print_table(&settings, Collection::Books).await,
        Command::Reservations => print_table(&settings, Collection::Reservations).await,
        Command::Users => print_table(&settings, Collection::Users).await,
        Command::Make(args) => {
            let inputs = FormInputs::new()
                .with(input_ids::BOOK_ID, args.book_id)
                .with(input_ids::USER_ID, args.user_id);
            submit(&settings, FormKind::Make, inputs).await
        }
        Command::Update(args) => {
            let (variant, inputs) = args.into_form();
            settings.console.update_variant = variant;
            submit(&settings, FormKind::Update, inputs).await
        }
        Command::Remove(args) => {
            let inputs = FormInputs::new()
                .with(input_ids::REMOVE_BOOK_ID, args.book_id)
                .with(input_ids::REMOVE_USER_ID, args.user_id);
            submit(&settings, FormKind::Remove, inputs).await
        }
        Command::View { reservation_id } => view(&settings, &reservation_id).await,
        Command::Purge { progress_every } => purge(&settings, progress_every).await,
    }
}

fn console(settings: &Settings) -> anyhow::Result<ReservationConsole> {
    let api = Arc::new(lectern_app::library_api(&settings.backend)?);
    ReservationConsole::from_settings(api, &settings.console)
}

async fn print_table(settings: &Settings, collection: Collection) -> anyhow::Result<()> {
    let state = console(settings)?.fetch(collection).await;
    print!("{}", render_text(&state, collection.columns()));
    if state.is_failed() {
        bail!("{} could not be loaded", collection.title());
    }
    Ok(())
}

async fn submit(settings: &Settings, form: FormKind, inputs: FormInputs) -> anyhow::Result<()> {
    match console(settings)?.submit(form, &inputs, &StdoutNotifier).await {
        SubmitOutcome::Replied(reply) if reply.is_error() => {
            bail!("{} was rejected", form.title())
        }
        SubmitOutcome::Replied(_) => Ok(()),
        SubmitOutcome::Failed(reason) => bail!(reason),
        SubmitOutcome::Busy => bail!("{} is already being submitted", form.title()),
    }
}

async fn view(settings: &Settings, reservation_id: &str) -> anyhow::Result<()> {
    let api = lectern_app::library_api(&settings.backend)?;
    match api.view_reservation(reservation_id).await? {
        ReservationLookup::Found(reservation) => {
            let formatter = CellFormatter::from_settings(&settings.console)?;
            let state = TableState::Ready(vec![reservation.cells(&formatter)]);
            print!("{}", render_text(&state, Collection::Reservations.columns()));
            Ok(())
        }
        ReservationLookup::Missing { error } => bail!(error),
    }
}

async fn purge(settings: &Settings, progress_every: usize) -> anyhow::Result<()> {
    let api = lectern_app::library_api(&settings.backend)?;
    let report = bulk::remove_all_reservations(&api, progress_every).await?;
    println!(
        "removed {} of {} reservations ({} rejected)",
        report.removed, report.total, report.rejected
    );
    Ok(())
}
