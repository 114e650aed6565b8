//! Text rendering of a [`DeskState`].
//!
//! Layout follows the single-page table: banners on top, then a table whose
//! first row is the search box plus the create/edit form, followed by either
//! a loading row, an empty-list row or one row per book.

use crate::desk::DeskState;
use comfy_table::{Cell, Table};

pub fn render(state: &DeskState) -> String {
    let mut out = String::new();
    if let Some(message) = state.banners.message() {
        out.push_str(&format!("[ok] {message}\n"));
    }
    if let Some(error) = state.banners.error() {
        out.push_str(&format!("[error] {error}\n"));
    }
    out.push_str(&render_table(state).to_string());
    out
}

fn render_table(state: &DeskState) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["Book ID", "Book Name", "Book Price", ""]);

    let form = &state.form;
    let actions = if form.is_editing() { "Save | Cancel" } else { "Create" };
    table.add_row(vec![
        Cell::new(format!("search: {}", state.search_query)),
        Cell::new(form.book_name()),
        Cell::new(form.book_price()),
        Cell::new(actions),
    ]);

    if state.loading {
        table.add_row(vec!["Loading..."]);
        return table;
    }
    if state.books.is_empty() {
        table.add_row(vec!["No books found."]);
        return table;
    }

    for book in &state.books {
        let actions = if form.is_editing_book(&book.id) {
            "Editing..."
        } else {
            "edit | delete"
        };
        table.add_row(vec![
            Cell::new(&book.id),
            Cell::new(&book.name),
            Cell::new(book.price),
            Cell::new(actions),
        ]);
    }
    table
}
