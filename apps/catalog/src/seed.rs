//! Sample records loaded at startup.

use crate::domain::{Book, Item};

/// Three sample items (ids 1 to 3).
#[must_use]
pub fn items() -> Vec<Item> {
    [("Item 1", "First item", 10), ("Item 2", "Second item", 20), ("Item 3", "Third item", 15)]
        .into_iter()
        .zip(1..)
        .map(|((name, description, quantity), id)| Item {
            id,
            name: name.to_string(),
            description: description.to_string(),
            quantity,
        })
        .collect()
}

/// Five classic novels (ids 1 to 5).
#[must_use]
pub fn books() -> Vec<Book> {
    [
        ("The Brothers Karamazov", "Fyodor Dostoevsky", 1880),
        ("Invisible Man", "Ralph Ellison", 1952),
        ("Middlemarch", "George Eliot", 1871),
        ("Slaughterhouse-Five", "Kurt Vonnegut", 1969),
        ("Things Fall Apart", "Chinua Achebe", 1958),
    ]
    .into_iter()
    .zip(1..)
    .map(|((title, author, year), id)| Book {
        id,
        title: title.to_string(),
        author: author.to_string(),
        publication_year: Some(year),
        isbn: None,
    })
    .collect()
}
