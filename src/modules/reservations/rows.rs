use lectern_client::Reservation;

use crate::console::{CellFormatter, TableRow};

pub const COLUMNS: &[&str] = &["Reservation ID", "Book ID", "User ID", "Reserved at"];

impl TableRow for Reservation {
    fn cells(&self, fmt: &CellFormatter) -> Vec<String> {
        vec![
            self.reservation_id.to_string(),
            self.book_id.to_string(),
            self.user_id.to_string(),
            fmt.timestamp(self.reserved_at.as_deref()),
        ]
    }
}
