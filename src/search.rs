//! # Search
//!
//! A non-empty search string is looked up three ways at once (by id, by name
//! and by price) and the three result sets are merged into one list.
//!
//! Merge order is id-results, then name-results, then price-results. A book
//! that shows up in more than one result set is kept once, at its first
//! occurrence.

use crate::api::{ApiError, BooksApi, SearchField};
use crate::model::Book;
use std::collections::HashSet;
use tracing::{debug, instrument};

/// Concatenates `result_sets` in order, dropping every book whose id has
/// already been seen.
pub fn merge_unique<I>(result_sets: I) -> Vec<Book>
where
    I: IntoIterator<Item = Vec<Book>>,
{
    let mut seen = HashSet::new();
    result_sets
        .into_iter()
        .flatten()
        .filter(|book| seen.insert(book.id.clone()))
        .collect()
}

/// Fetches the books matching `query`.
///
/// An empty query lists every book. Otherwise the three filtered queries are
/// issued concurrently; the first failure fails the whole search.
#[instrument(skip(api))]
pub async fn fetch_books(api: &dyn BooksApi, query: &str) -> Result<Vec<Book>, ApiError> {
    if query.is_empty() {
        return api.list().await;
    }

    let (by_id, by_name, by_price) = tokio::try_join!(
        api.find(SearchField::Id, query),
        api.find(SearchField::Name, query),
        api.find(SearchField::Price, query),
    )?;
    debug!(
        by_id = by_id.len(),
        by_name = by_name.len(),
        by_price = by_price.len(),
        "Merging search results"
    );
    Ok(merge_unique([by_id, by_name, by_price]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ApiCall, MockBooksApi};

    #[test]
    fn first_occurrence_wins() {
        let merged = merge_unique([
            vec![Book::new("1", "Emma", 10.0)],
            vec![Book::new("2", "10", 3.0), Book::new("1", "stale copy", 0.0)],
            vec![Book::new("3", "Dune", 10.0), Book::new("2", "other", 1.0)],
        ]);

        let ids: Vec<_> = merged.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, ["1", "2", "3"]);
        assert_eq!(merged[0].name, "Emma");
        assert_eq!(merged[1].name, "10");
    }

    #[test]
    fn empty_sets_merge_to_nothing() {
        assert!(merge_unique([Vec::new(), Vec::new(), Vec::new()]).is_empty());
    }

    #[tokio::test]
    async fn empty_query_lists_everything() {
        let mock = MockBooksApi::new();
        mock.expect_list()
            .return_ok(vec![Book::new("1", "Emma", 10.0)]);

        let books = fetch_books(&mock, "").await.unwrap();
        assert_eq!(books.len(), 1);
        assert_eq!(mock.calls(), vec![ApiCall::List]);
    }

    #[tokio::test]
    async fn query_fans_out_to_every_field() {
        let mock = MockBooksApi::new();
        mock.expect_find(SearchField::Id).return_ok(Vec::new());
        mock.expect_find(SearchField::Name)
            .return_ok(vec![Book::new("4", "10", 2.0)]);
        mock.expect_find(SearchField::Price)
            .return_ok(vec![Book::new("7", "Emma", 10.0), Book::new("4", "10", 2.0)]);

        let books = fetch_books(&mock, "10").await.unwrap();
        let ids: Vec<_> = books.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, ["4", "7"]);
        assert_eq!(mock.calls().len(), 3);
        mock.verify();
    }

    #[tokio::test]
    async fn one_failed_query_fails_the_search() {
        let mock = MockBooksApi::new();
        mock.expect_find(SearchField::Id).return_ok(Vec::new());
        mock.expect_find(SearchField::Name)
            .return_err(ApiError::Network("connection refused".to_string()));
        mock.expect_find(SearchField::Price).return_ok(Vec::new());

        let err = fetch_books(&mock, "Emma").await.unwrap_err();
        assert!(matches!(err, ApiError::Network(_)));
    }
}
