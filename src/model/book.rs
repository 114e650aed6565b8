//! A book record as served by the REST backend.
//!
//! The backend assigns ids; the client only ever echoes them back. Older
//! backends stored prices exactly as the form sent them (strings), so both
//! numeric and string prices are accepted on decode.

use serde::{Deserialize, Deserializer, Serialize};

use std::fmt::Display;

/// Server-assigned identifier for a [`Book`].
///
/// json-server hands out either numbers or strings depending on its version,
/// so the id is kept in its string form and compared as such.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct BookId(pub String);

impl BookId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<u64> for BookId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl From<&str> for BookId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for BookId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl Display for BookId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawScalar {
    Number(serde_json::Number),
    Text(String),
}

impl<'de> Deserialize<'de> for BookId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match RawScalar::deserialize(deserializer)? {
            RawScalar::Number(n) => Ok(Self(n.to_string())),
            RawScalar::Text(s) => Ok(Self(s)),
        }
    }
}

fn lenient_price<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    match RawScalar::deserialize(deserializer)? {
        RawScalar::Number(n) => n
            .as_f64()
            .ok_or_else(|| serde::de::Error::custom(format!("price out of range: {n}"))),
        RawScalar::Text(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| serde::de::Error::custom(format!("price is not a number: {s:?}"))),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    pub id: BookId,
    pub name: String,
    #[serde(deserialize_with = "lenient_price")]
    pub price: f64,
}

impl Book {
    /// Creates a new Book instance.
    ///
    /// # Arguments
    /// * `id` - Identifier assigned by the backend
    /// * `name` - Book title
    /// * `price` - Book price
    pub fn new(id: impl Into<BookId>, name: impl Into<String>, price: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
        }
    }

    /// Builds the stored record for a draft under a freshly assigned id.
    pub fn from_draft(id: BookId, draft: BookDraft) -> Self {
        Self {
            id,
            name: draft.name,
            price: draft.price,
        }
    }
}

/// Request body for `POST /books` and `PUT /books/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookDraft {
    pub name: String,
    pub price: f64,
}
