//! Property-based tests for search result merging.

use book_desk::model::{Book, BookId};
use book_desk::search::merge_unique;
use proptest::prelude::*;
use std::collections::HashSet;

fn book() -> impl Strategy<Value = Book> {
    (0u64..12, "[a-z]{1,6}", 0u32..100).prop_map(|(id, name, price)| {
        Book::new(BookId::from(id), name, f64::from(price))
    })
}

fn result_set() -> impl Strategy<Value = Vec<Book>> {
    prop::collection::vec(book(), 0..10)
}

proptest! {
    /// Each id appears at most once in the merged list.
    #[test]
    fn merged_ids_are_unique(a in result_set(), b in result_set(), c in result_set()) {
        let merged = merge_unique([a, b, c]);
        let mut seen = HashSet::new();
        for book in &merged {
            prop_assert!(seen.insert(book.id.clone()), "duplicate id {}", book.id);
        }
    }

    /// Every id from any input set survives the merge.
    #[test]
    fn no_id_is_lost(a in result_set(), b in result_set(), c in result_set()) {
        let expected: HashSet<BookId> =
            a.iter().chain(&b).chain(&c).map(|book| book.id.clone()).collect();
        let merged = merge_unique([a, b, c]);
        let actual: HashSet<BookId> = merged.iter().map(|book| book.id.clone()).collect();
        prop_assert_eq!(actual, expected);
    }

    /// The kept copy of each id is its first occurrence across the sets, in order.
    #[test]
    fn first_occurrence_wins(a in result_set(), b in result_set(), c in result_set()) {
        let mut first = Vec::new();
        let mut seen = HashSet::new();
        for book in a.iter().chain(&b).chain(&c) {
            if seen.insert(book.id.clone()) {
                first.push(book.clone());
            }
        }
        prop_assert_eq!(merge_unique([a, b, c]), first);
    }
}
