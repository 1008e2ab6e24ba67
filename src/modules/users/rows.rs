use lectern_client::User;

use crate::console::{CellFormatter, TableRow};

pub const COLUMNS: &[&str] = &["User ID", "Name", "Email"];

impl TableRow for User {
    fn cells(&self, _fmt: &CellFormatter) -> Vec<String> {
        vec![self.user_id.to_string(), self.name.clone(), self.email.clone()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_email_renders_empty() {
        let user: User =
            serde_json::from_str(r#"{"user_id":5,"name":"Ada","email":null}"#).unwrap();
        assert_eq!(user.cells(&CellFormatter::default()), ["5", "Ada", ""]);
        assert_eq!(COLUMNS.len(), 3);
    }
}
