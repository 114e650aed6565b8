use book_desk::config::DeskConfig;
use book_desk::desk::DeskError;
use book_desk::lifecycle::{sample_books, DeskSystem};
use book_desk::model::{Book, BookId};
use book_desk::repl;
use tokio::io::{AsyncReadExt, BufWriter};

/// Full flow against the in-process backend: load, create, edit, search, delete.
#[tokio::test]
async fn test_full_desk_flow_against_memory_backend() {
    let system = DeskSystem::memory(sample_books(), &DeskConfig::default());
    let desk = &system.desk;

    let books = desk.refresh().await.expect("Failed to load books");
    assert_eq!(books, sample_books());

    // Create: the backend assigns the next id
    desk.set_name("Ulysses").await.unwrap();
    desk.set_price("20").await.unwrap();
    let created = desk.submit().await.expect("Failed to create book");
    assert_eq!(created, Book::new("5", "Ulysses", 20.0));

    // Edit: replaced in place, backend agrees after a reload
    desk.select("2").await.unwrap();
    desk.set_price("14.5").await.unwrap();
    let updated = desk.submit().await.expect("Failed to update book");
    assert_eq!(updated, Book::new("2", "Dune", 14.5));

    let reloaded = desk.refresh().await.unwrap();
    assert_eq!(reloaded[1], updated);
    assert_eq!(reloaded.len(), 5);

    // Search: "39.99" matches two books by price and nothing else
    let found = desk.search("39.99").await.unwrap();
    let ids: Vec<_> = found.iter().map(|b| b.id.as_str()).collect();
    assert_eq!(ids, ["1", "4"]);

    // Search by id
    let found = desk.search("5").await.unwrap();
    assert_eq!(found, vec![created]);

    // Delete from the filtered view, then clear the search
    desk.delete("5").await.expect("Failed to delete book");
    assert!(desk.snapshot().await.unwrap().books.is_empty());
    let all = desk.search("").await.unwrap();
    assert_eq!(all.len(), 4);
    assert!(all.iter().all(|b| b.id != BookId::from("5")));

    system.shutdown().await.expect("Failed to shutdown system");
}

#[tokio::test]
async fn test_deleted_book_cannot_be_selected() {
    let system = DeskSystem::memory(sample_books(), &DeskConfig::default());
    let desk = system.desk.clone();
    desk.refresh().await.unwrap();

    desk.select("3").await.unwrap();
    desk.delete("3").await.unwrap();
    assert!(!desk.snapshot().await.unwrap().form.is_editing());
    let err = desk.select("3").await.unwrap_err();
    assert_eq!(err, DeskError::UnknownBook(BookId::from("3")));

    drop(desk);
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_terminal_session() {
    let system = DeskSystem::memory(sample_books(), &DeskConfig::default());
    system.desk.refresh().await.unwrap();

    let input = b"name Ulysses\nprice 20\nsave\nedit 9\nfly\nsearch Dune\nquit\nshow\n";
    let mut output = Vec::new();
    repl::run(&system.desk, &input[..], &mut output)
        .await
        .expect("session failed");

    let output = String::from_utf8(output).unwrap();
    assert!(output.contains("Book created successfully."));
    assert!(output.contains("Book 9 is not in the list."));
    assert!(output.contains("unknown command `fly`"));
    assert!(output.contains("search: Dune"));
    // Nothing after `quit` is executed
    assert_eq!(output.matches("search: Dune").count(), 1);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_help_and_parse_errors_reach_a_buffered_terminal() {
    let system = DeskSystem::memory(sample_books(), &DeskConfig::default());

    let (terminal, mut screen) = tokio::io::duplex(64 * 1024);
    let input = b"help\nfly\n";
    repl::run(&system.desk, &input[..], BufWriter::new(terminal))
        .await
        .expect("session failed");

    // The writer is gone; anything it did not flush is lost.
    let mut output = String::new();
    screen.read_to_string(&mut output).await.unwrap();
    assert!(output.contains(repl::HELP));
    assert!(output.contains("unknown command `fly`"));

    system.shutdown().await.unwrap();
}
