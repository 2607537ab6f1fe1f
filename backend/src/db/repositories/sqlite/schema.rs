// Diesel table declarations; kept in sync with `CREATE_TABLES_SQL`.

diesel::table! {
    authors (id) {
        id -> BigInt,
        name -> Text,
        bio -> Nullable<Text>,
    }
}

diesel::table! {
    books (id) {
        id -> BigInt,
        title -> Text,
        genre -> Nullable<Text>,
        publish_date -> Nullable<Text>,
        author_id -> BigInt,
    }
}

diesel::table! {
    reviews (id) {
        id -> BigInt,
        rating -> BigInt,
        content -> Text,
        book_id -> BigInt,
    }
}

diesel::joinable!(books -> authors (author_id));
diesel::joinable!(reviews -> books (book_id));

diesel::allow_tables_to_appear_in_same_query!(authors, books, reviews);

/// DDL executed when the repository opens. Idempotent.
pub const CREATE_TABLES_SQL: &str = "
CREATE TABLE IF NOT EXISTS authors (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL,
    bio TEXT
);

CREATE TABLE IF NOT EXISTS books (
    id INTEGER PRIMARY KEY,
    title TEXT NOT NULL,
    genre TEXT,
    publish_date TEXT,
    author_id INTEGER NOT NULL REFERENCES authors (id)
);

CREATE TABLE IF NOT EXISTS reviews (
    id INTEGER PRIMARY KEY,
    rating INTEGER NOT NULL,
    content TEXT NOT NULL,
    book_id INTEGER NOT NULL REFERENCES books (id)
);

CREATE INDEX IF NOT EXISTS idx_books_author_id ON books (author_id);
CREATE INDEX IF NOT EXISTS idx_reviews_book_id ON reviews (book_id);
";
