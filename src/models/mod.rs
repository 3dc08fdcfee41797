pub mod author;
pub mod author_books;
pub mod book;
pub mod library;
pub mod library_books;
pub mod user;
