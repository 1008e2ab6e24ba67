use lectern_client::Book;

use crate::console::{CellFormatter, TableRow};

pub const COLUMNS: &[&str] = &["Book ID", "Title", "Author", "Genre", "Published", "Available"];

impl TableRow for Book {
    fn cells(&self, fmt: &CellFormatter) -> Vec<String> {
        vec![
            self.book_id.to_string(),
            self.title.clone(),
            self.author.clone(),
            fmt.text(self.genre.as_deref()),
            fmt.number(self.published_year),
            fmt.flag(self.available),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn older_backends_leave_optional_cells_blank() {
        let raw = r#"{"book_id":"b-7","title":"Emma","author":"Austen"}"#;
        let book: Book = serde_json::from_str(raw).unwrap();
        let cells = book.cells(&CellFormatter::default());

        assert_eq!(cells, ["b-7", "Emma", "Austen", "", "", ""]);
        assert_eq!(cells.len(), COLUMNS.len());
    }

    #[test]
    fn null_columns_render_as_empty_cells() {
        let books: Vec<Book> = serde_json::from_str(
            r#"[
                {"book_id":1,"title":null,"author":"Herbert","genre":null,
                 "published_year":null,"available":false},
                {"book_id":2,"title":"Emma","author":"Austen"}
            ]"#,
        )
        .unwrap();
        let fmt = CellFormatter::default();
        let rows: Vec<Vec<String>> = books.iter().map(|book| book.cells(&fmt)).collect();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], ["1", "", "Herbert", "", "", "No"]);
    }
}
