use diesel::prelude::*;

use super::schema::{authors, books, reviews};
use crate::models::{Author, AuthorId, Book, BookId, NewAuthor, NewBook, NewReview, Review, ReviewId};

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = authors)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct AuthorRow {
    pub id: i64,
    pub name: String,
    pub bio: Option<String>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = authors)]
pub struct NewAuthorRow<'a> {
    pub name: &'a str,
    pub bio: Option<&'a str>,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = books)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct BookRow {
    pub id: i64,
    pub title: String,
    pub genre: Option<String>,
    pub publish_date: Option<String>,
    pub author_id: i64,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = books)]
pub struct NewBookRow<'a> {
    pub title: &'a str,
    pub genre: Option<&'a str>,
    pub publish_date: Option<&'a str>,
    pub author_id: i64,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = reviews)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ReviewRow {
    pub id: i64,
    pub rating: i64,
    pub content: String,
    pub book_id: i64,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = reviews)]
pub struct NewReviewRow<'a> {
    pub rating: i64,
    pub content: &'a str,
    pub book_id: i64,
}

impl From<AuthorRow> for Author {
    fn from(row: AuthorRow) -> Self {
        Author {
            id: AuthorId(row.id),
            name: row.name,
            bio: row.bio,
        }
    }
}

impl From<BookRow> for Book {
    fn from(row: BookRow) -> Self {
        Book {
            id: BookId(row.id),
            title: row.title,
            genre: row.genre,
            publish_date: row.publish_date,
            author_id: AuthorId(row.author_id),
        }
    }
}

impl From<ReviewRow> for Review {
    fn from(row: ReviewRow) -> Self {
        Review {
            id: ReviewId(row.id),
            rating: row.rating,
            content: row.content,
            book_id: BookId(row.book_id),
        }
    }
}

impl<'a> From<&'a NewAuthor> for NewAuthorRow<'a> {
    fn from(author: &'a NewAuthor) -> Self {
        NewAuthorRow {
            name: &author.name,
            bio: author.bio.as_deref(),
        }
    }
}

impl<'a> From<&'a NewBook> for NewBookRow<'a> {
    fn from(book: &'a NewBook) -> Self {
        NewBookRow {
            title: &book.title,
            genre: book.genre.as_deref(),
            publish_date: book.publish_date.as_deref(),
            author_id: book.author_id.value(),
        }
    }
}

impl<'a> From<&'a NewReview> for NewReviewRow<'a> {
    fn from(review: &'a NewReview) -> Self {
        NewReviewRow {
            rating: review.rating,
            content: &review.content,
            book_id: review.book_id.value(),
        }
    }
}
