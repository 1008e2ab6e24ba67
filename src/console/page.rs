//! The console page: three tables, three forms, and any pending notices.

use lectern_kernel::settings::UpdateVariant;

use super::forms::FormKind;
use super::table::{escape_html, render_tbody, TableState};
use super::Collection;

const STYLE: &str = "body{font-family:sans-serif;margin:2rem}\
table{border-collapse:collapse;margin-bottom:1.5rem}\
th,td{border:1px solid #ccc;padding:.25rem .5rem;text-align:left}\
tr.error td{color:#a00}\
.notice{border:1px solid #888;background:#ffd;padding:.5rem;margin-bottom:1rem}\
form{margin-bottom:1rem}label{margin-right:.25rem}input{margin-right:.75rem}";

/// Everything the page shows at one moment.
#[derive(Debug, Clone)]
pub struct PageView {
    pub tables: Vec<(Collection, TableState)>,
    pub notices: Vec<String>,
    pub update_variant: UpdateVariant,
}

pub fn render_page(view: &PageView) -> String {
    let mut html = String::from(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>Library reservations</title>\n",
    );
    html.push_str(&format!("<style>{STYLE}</style>\n</head>\n<body>\n"));
    html.push_str("<h1>Library reservations</h1>\n");

    for notice in &view.notices {
        html.push_str(&format!(
            "<div class=\"notice\" role=\"alert\">{}</div>\n",
            escape_html(notice)
        ));
    }

    for (collection, state) in &view.tables {
        html.push_str(&render_table(*collection, state));
    }

    for form in FormKind::ALL {
        html.push_str(&render_form(form, view.update_variant));
    }

    html.push_str("</body>\n</html>\n");
    html
}

fn render_table(collection: Collection, state: &TableState) -> String {
    let headings: String = collection
        .columns()
        .iter()
        .map(|heading| format!("<th>{}</th>", escape_html(heading)))
        .collect();

    format!(
        "<section>\n<h2>{title}</h2>\n<table id=\"{id}\">\n\
         <thead><tr>{headings}</tr></thead>\n{body}\n</table>\n</section>\n",
        title = collection.title(),
        id = collection.table_id(),
        body = render_tbody(state, collection.columns()),
    )
}

fn render_form(form: FormKind, variant: UpdateVariant) -> String {
    let fields: String = form
        .inputs(variant)
        .iter()
        .map(|(id, label)| {
            format!("<label for=\"{id}\">{label}</label><input id=\"{id}\" name=\"{id}\" required>")
        })
        .collect();

    format!(
        "<section>\n<h2>{title}</h2>\n\
         <form id=\"{id}\" method=\"post\" action=\"{action}\">{fields}\
         <button type=\"submit\">{title}</button></form>\n</section>\n",
        title = form.title(),
        id = form.form_id(),
        action = form.action_path(),
    )
}
