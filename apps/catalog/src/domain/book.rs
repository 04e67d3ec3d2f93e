//! Books.

use super::{Resource, ValidationErrors, non_blank};
use chrono::{DateTime, Datelike, Utc};
use composable_crud_lifecycle::Entity;
use serde::{Deserialize, Serialize};

/// A catalogued book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    /// Server-assigned id
    pub id: u64,
    /// Title
    pub title: String,
    /// Author
    pub author: String,
    /// Year of first publication
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publication_year: Option<i32>,
    /// ISBN, unique within the collection
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub isbn: Option<String>,
}

/// Body of `POST /api/books`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookDraft {
    /// Required
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Required
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    /// Optional
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publication_year: Option<i32>,
    /// Optional
    #[serde(skip_serializing_if = "Option::is_none")]
    pub isbn: Option<String>,
}

/// Body of `PUT /api/books/{id}`; absent fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookPatch {
    /// New title
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// New author
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    /// New publication year
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publication_year: Option<i32>,
    /// New ISBN
    #[serde(skip_serializing_if = "Option::is_none")]
    pub isbn: Option<String>,
}

impl BookDraft {
    /// Draft with the required fields.
    #[must_use]
    pub fn new(title: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            author: Some(author.into()),
            ..Self::default()
        }
    }

    /// Set the publication year.
    #[must_use]
    pub const fn published(mut self, year: i32) -> Self {
        self.publication_year = Some(year);
        self
    }
}

impl BookPatch {
    /// Patch changing only the title.
    #[must_use]
    pub fn title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }
}

fn check_year(errors: &mut ValidationErrors, year: Option<i32>, now: DateTime<Utc>) {
    let latest = now.year() + 1;
    if let Some(year) = year {
        errors.check(
            (0..=latest).contains(&year),
            format!("Publication year must be between 0 and {latest}"),
        );
    }
}

impl Resource for Book {
    type Draft = BookDraft;
    type Patch = BookPatch;

    const COLLECTION: &'static str = "books";
    const LABEL: &'static str = "Book";

    fn record_id(&self) -> u64 {
        self.id
    }

    fn from_draft(id: u64, draft: BookDraft, now: DateTime<Utc>) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let title = non_blank(draft.title);
        errors.check(title.is_some(), "Title is required");

        let author = non_blank(draft.author);
        errors.check(author.is_some(), "Author is required");

        check_year(&mut errors, draft.publication_year, now);

        match (title, author) {
            (Some(title), Some(author)) => errors.finish(Self {
                id,
                title,
                author,
                publication_year: draft.publication_year,
                isbn: non_blank(draft.isbn),
            }),
            _ => Err(errors),
        }
    }

    fn apply(&mut self, patch: BookPatch, now: DateTime<Utc>) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let title = patch.title.map(|t| non_blank(Some(t)));
        errors.check(!matches!(title, Some(None)), "Title cannot be empty");

        let author = patch.author.map(|a| non_blank(Some(a)));
        errors.check(!matches!(author, Some(None)), "Author cannot be empty");

        check_year(&mut errors, patch.publication_year, now);

        errors.finish(())?;

        if let Some(Some(title)) = title {
            self.title = title;
        }
        if let Some(Some(author)) = author {
            self.author = author;
        }
        if patch.publication_year.is_some() {
            self.publication_year = patch.publication_year;
        }
        if let Some(isbn) = patch.isbn {
            self.isbn = non_blank(Some(isbn));
        }
        Ok(())
    }

    fn conflicts(&self, others: &[Self]) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        if let Some(isbn) = &self.isbn {
            errors.check(
                !others.iter().any(|b| b.isbn.as_ref() == Some(isbn)),
                "ISBN must be unique",
            );
        }
        errors
    }
}

impl Entity for Book {
    type Id = u64;
    type Draft = BookDraft;
    type Patch = BookPatch;

    const COLLECTION: &'static str = <Self as Resource>::COLLECTION;
    const LABEL: &'static str = <Self as Resource>::LABEL;

    fn id(&self) -> &u64 {
        &self.id
    }
}
