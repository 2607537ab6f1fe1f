//! Authors, books and reviews.

use serde::{Deserialize, Serialize};

use crate::define_id_type;

define_id_type!(i64, AuthorId);
define_id_type!(i64, BookId);
define_id_type!(i64, ReviewId);

/// A persisted author. Owns zero or more [`Book`]s.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub id: AuthorId,
    pub name: String,
    #[serde(default)]
    pub bio: Option<String>,
}

/// Payload accepted by `POST /authors`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAuthor {
    pub name: String,
    #[serde(default)]
    pub bio: Option<String>,
}

impl NewAuthor {
    pub fn new(name: impl Into<String>, bio: Option<&str>) -> Self {
        Self {
            name: name.into(),
            bio: bio.map(str::to_string),
        }
    }

    /// Attach the identifier assigned by storage.
    pub fn into_author(self, id: AuthorId) -> Author {
        Author {
            id,
            name: self.name,
            bio: self.bio,
        }
    }
}

/// A persisted book. Owns zero or more [`Review`]s.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: BookId,
    pub title: String,
    #[serde(default)]
    pub genre: Option<String>,
    /// Free-form text; no date format is enforced.
    #[serde(default)]
    pub publish_date: Option<String>,
    pub author_id: AuthorId,
}

/// Payload accepted by `POST /books`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewBook {
    pub title: String,
    #[serde(default)]
    pub genre: Option<String>,
    #[serde(default)]
    pub publish_date: Option<String>,
    pub author_id: AuthorId,
}

impl NewBook {
    pub fn new(
        title: impl Into<String>,
        genre: Option<&str>,
        publish_date: Option<&str>,
        author_id: AuthorId,
    ) -> Self {
        Self {
            title: title.into(),
            genre: genre.map(str::to_string),
            publish_date: publish_date.map(str::to_string),
            author_id,
        }
    }

    pub fn into_book(self, id: BookId) -> Book {
        Book {
            id,
            title: self.title,
            genre: self.genre,
            publish_date: self.publish_date,
            author_id: self.author_id,
        }
    }
}

/// A persisted review of a [`Book`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    pub id: ReviewId,
    /// Unbounded; any `i64` is stored as given.
    pub rating: i64,
    pub content: String,
    pub book_id: BookId,
}

/// Payload accepted by `POST /reviews`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewReview {
    pub rating: i64,
    pub content: String,
    pub book_id: BookId,
}

impl NewReview {
    pub fn new(rating: i64, content: impl Into<String>, book_id: BookId) -> Self {
        Self {
            rating,
            content: content.into(),
            book_id,
        }
    }

    pub fn into_review(self, id: ReviewId) -> Review {
        Review {
            id,
            rating: self.rating,
            content: self.content,
            book_id: self.book_id,
        }
    }
}
