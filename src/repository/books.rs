//! In-memory book store.
//!
//! The catalog is a single ordered `Vec<Book>` plus a monotonically
//! increasing id counter, both guarded by one mutex. Every operation takes
//! the lock exactly once and does its whole read-modify-write under it, so
//! concurrent requests always observe a consistent catalog. The lock is
//! never held across an await point.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::{
    error::{AppError, AppResult},
    models::{Book, BookPatch, NewBook},
};

struct CatalogState {
    books: Vec<Book>,
    next_id: i64,
}

/// Handle to the shared in-memory catalog
#[derive(Clone)]
pub struct BooksRepository {
    state: Arc<Mutex<CatalogState>>,
}

impl BooksRepository {
    /// Create a store seeded with the fifteen fixed catalog records.
    /// Ids 1..=15 are consumed by the seeds; the counter continues at 16.
    pub fn new() -> Self {
        let books = seed_books();
        let next_id = books.len() as i64 + 1;
        Self {
            state: Arc::new(Mutex::new(CatalogState { books, next_id })),
        }
    }

    fn lock(&self) -> AppResult<MutexGuard<'_, CatalogState>> {
        self.state
            .lock()
            .map_err(|_| AppError::Internal("catalog lock poisoned".to_string()))
    }

    /// Snapshot of the full catalog in storage order
    pub fn list(&self) -> AppResult<Vec<Book>> {
        Ok(self.lock()?.books.clone())
    }

    /// Look up a single book by id
    pub fn get(&self, id: i64) -> AppResult<Option<Book>> {
        Ok(self.lock()?.books.iter().find(|b| b.id == id).cloned())
    }

    /// Append a new book with the next server-assigned id and return the
    /// full updated catalog
    pub fn create(&self, new: NewBook) -> AppResult<Vec<Book>> {
        let mut state = self.lock()?;
        let id = state.next_id;
        state.next_id += 1;
        let book = new.into_book(id);
        tracing::debug!(id, title = %book.title, "catalog create");
        state.books.push(book);
        Ok(state.books.clone())
    }

    /// Replace the book with the given id in place, keeping its sequence
    /// position. Returns `None` if no book has that id.
    pub fn replace(&self, id: i64, new: NewBook) -> AppResult<Option<Book>> {
        let mut state = self.lock()?;
        match state.books.iter_mut().find(|b| b.id == id) {
            Some(slot) => {
                let book = new.into_book(id);
                *slot = book.clone();
                Ok(Some(book))
            }
            None => Ok(None),
        }
    }

    /// Apply a partial update to the book with the given id; unset fields
    /// are left untouched. Returns `None` if no book has that id.
    pub fn patch(&self, id: i64, patch: BookPatch) -> AppResult<Option<Book>> {
        let mut state = self.lock()?;
        match state.books.iter_mut().find(|b| b.id == id) {
            Some(book) => {
                if let Some(title) = patch.title {
                    book.title = title;
                }
                if let Some(author) = patch.author {
                    book.author = author;
                }
                if let Some(price) = patch.price {
                    book.price = price;
                }
                Ok(Some(book.clone()))
            }
            None => Ok(None),
        }
    }

    /// Remove the book with the given id and return it, or `None` if no
    /// book has that id. Removed ids are never reassigned.
    pub fn remove(&self, id: i64) -> AppResult<Option<Book>> {
        let mut state = self.lock()?;
        match state.books.iter().position(|b| b.id == id) {
            Some(index) => {
                let removed = state.books.remove(index);
                tracing::debug!(id, title = %removed.title, "catalog delete");
                Ok(Some(removed))
            }
            None => Ok(None),
        }
    }
}

impl Default for BooksRepository {
    fn default() -> Self {
        Self::new()
    }
}

fn seed_books() -> Vec<Book> {
    let seeds: [(&str, &str, f64); 15] = [
        ("Spring Boot in Action", "Craig Walls", 39.99),
        ("Effective Java", "Joshua Bloch", 45.00),
        ("Clean Code", "Robert Martin", 42.50),
        ("Java Concurrency in Practice", "Brian Goetz", 49.99),
        ("Design Patterns", "Gang of Four", 54.99),
        ("Head First Java", "Kathy Sierra", 35.00),
        ("Spring in Action", "Craig Walls", 44.99),
        ("Clean Architecture", "Robert Martin", 39.99),
        ("Refactoring", "Martin Fowler", 47.50),
        ("The Pragmatic Programmer", "Andrew Hunt", 41.99),
        ("You Don't Know JS", "Kyle Simpson", 29.99),
        ("JavaScript: The Good Parts", "Douglas Crockford", 32.50),
        ("Eloquent JavaScript", "Marijn Haverbeke", 27.99),
        ("Python Crash Course", "Eric Matthes", 38.00),
        ("Automate the Boring Stuff", "Al Sweigart", 33.50),
    ];

    seeds
        .iter()
        .enumerate()
        .map(|(i, (title, author, price))| Book {
            id: i as i64 + 1,
            title: title.to_string(),
            author: author.to_string(),
            price: *price,
        })
        .collect()
}
