//! Data models for the catalog server

pub mod book;

pub use book::{Book, BookPatch, NewBook, SortKey, SortOrder};
