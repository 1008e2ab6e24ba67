//! Bulk maintenance built from the single-record endpoints.

use crate::api::LibraryApi;
use crate::error::ClientError;
use crate::payload::RemoveReservation;

/// Log progress after this many removals unless told otherwise.
pub const DEFAULT_PROGRESS_EVERY: usize = 250;

/// Outcome of [`remove_all_reservations`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PurgeReport {
    pub total: usize,
    pub removed: usize,
    pub rejected: usize,
}

/// Remove every reservation the backend lists, one request per reservation.
///
/// A reply carrying `error` counts as rejected and the sweep continues; a
/// transport failure stops it.
pub async fn remove_all_reservations(
    api: &dyn LibraryApi,
    progress_every: usize,
) -> Result<PurgeReport, ClientError> {
    let reservations = api.list_reservations().await?;
    let mut report = PurgeReport {
        total: reservations.len(),
        ..PurgeReport::default()
    };

    tracing::info!(total = report.total, "removing all reservations");

    for (done, reservation) in reservations.iter().enumerate() {
        let body = RemoveReservation {
            book_id: reservation.book_id.to_string(),
            user_id: reservation.user_id.to_string(),
        };

        let reply = api.remove_reservation(&body).await?;
        if reply.is_error() {
            report.rejected += 1;
            tracing::warn!(
                reservation_id = %reservation.reservation_id,
                error = reply.alert_text().unwrap_or_default(),
                "reservation not removed"
            );
        } else {
            report.removed += 1;
        }

        let done = done + 1;
        if progress_every > 0 && done % progress_every == 0 {
            tracing::info!(remaining = report.total - done, "reservations remaining");
        }
    }

    Ok(report)
}
