//! The inline create/edit form and its two-state machine.
//!
//! ```text
//!            select(book)
//!   Idle ───────────────────▶ Editing(id)
//!    ▲                            │
//!    └──── cancel / saved ────────┘
//! ```
//!
//! Creating never passes through `Editing`: the form starts (and returns to)
//! `Idle`, and a save from `Idle` creates a new book.

use crate::model::{Book, BookDraft, BookId};
use thiserror::Error;

/// Which text field of the form an edit targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    Price,
}

/// What a submit from the current form will do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(BookId),
}

/// Client-side checks that run before any request is sent.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ValidationError {
    #[error("Book name and price are required.")]
    MissingFields,

    #[error("Book price must be a number.")]
    InvalidPrice(String),
}

/// Mirrors the book being created or edited. No id means create mode.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormState {
    id: Option<BookId>,
    book_name: String,
    book_price: String,
}

impl FormState {
    pub fn id(&self) -> Option<&BookId> {
        self.id.as_ref()
    }

    pub fn book_name(&self) -> &str {
        &self.book_name
    }

    pub fn book_price(&self) -> &str {
        &self.book_price
    }

    pub fn is_editing(&self) -> bool {
        self.id.is_some()
    }

    pub fn mode(&self) -> FormMode {
        match &self.id {
            Some(id) => FormMode::Edit(id.clone()),
            None => FormMode::Create,
        }
    }

    /// Whether the form is editing the book with `id`.
    pub fn is_editing_book(&self, id: &BookId) -> bool {
        self.id.as_ref() == Some(id)
    }

    /// Replaces one field, leaving the mode untouched.
    pub fn set(&mut self, field: FormField, value: String) {
        match field {
            FormField::Name => self.book_name = value,
            FormField::Price => self.book_price = value,
        }
    }

    /// Enters edit mode for `book`, copying its fields.
    pub fn prefill(&mut self, book: &Book) {
        self.id = Some(book.id.clone());
        self.book_name = book.name.clone();
        self.book_price = book.price.to_string();
    }

    /// Back to the empty create form.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Checks the fields and builds the request body.
    pub fn to_draft(&self) -> Result<BookDraft, ValidationError> {
        let name = self.book_name.trim();
        let price = self.book_price.trim();
        if name.is_empty() || price.is_empty() {
            return Err(ValidationError::MissingFields);
        }
        let price = price
            .parse::<f64>()
            .ok()
            .filter(|p| p.is_finite())
            .ok_or_else(|| ValidationError::InvalidPrice(self.book_price.clone()))?;
        Ok(BookDraft {
            name: name.to_string(),
            price,
        })
    }
}
