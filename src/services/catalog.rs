//! Catalog service: listing, search, sorting, price filtering and
//! pagination semantics over the book repository.
//!
//! Read operations work on a snapshot of the stored sequence; sorting and
//! filtering never change storage order. Mutations go through the
//! repository under its single lock.

use std::cmp::Ordering;

use crate::{
    error::{AppError, AppResult},
    models::{Book, BookPatch, NewBook, SortKey, SortOrder},
    repository::Repository,
};

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
}

impl CatalogService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Full catalog in storage order
    pub fn list_all(&self) -> AppResult<Vec<Book>> {
        self.repository.books.list()
    }

    /// Filter by title substring, sort, then slice out one page.
    /// Processing order is fixed: filter, sort, paginate.
    pub fn list_advanced(
        &self,
        title: &str,
        sort_by: &str,
        order: &str,
        page: usize,
        size: usize,
    ) -> AppResult<Vec<Book>> {
        let mut books = filter_by_title(self.repository.books.list()?, title);
        sort_books(&mut books, SortKey::parse(sort_by), SortOrder::parse(order));
        Ok(page_slice(books, page, size))
    }

    /// Single book by id, or not-found
    pub fn get(&self, id: i64) -> AppResult<Book> {
        self.repository
            .books
            .get(id)?
            .ok_or_else(|| AppError::NotFound(format!("No book with id {}", id)))
    }

    /// Append a new book; returns the full updated catalog
    pub fn create(&self, new: NewBook) -> AppResult<Vec<Book>> {
        self.repository.books.create(new)
    }

    /// Case-insensitive title substring search; an empty needle returns
    /// the whole catalog
    pub fn search(&self, title: &str) -> AppResult<Vec<Book>> {
        Ok(filter_by_title(self.repository.books.list()?, title))
    }

    /// Books whose price lies within the inclusive bounds; either bound
    /// may be absent
    pub fn price_range(&self, min: Option<f64>, max: Option<f64>) -> AppResult<Vec<Book>> {
        let books = self.repository.books.list()?;
        Ok(books
            .into_iter()
            .filter(|b| {
                min.map_or(true, |m| b.price >= m) && max.map_or(true, |m| b.price <= m)
            })
            .collect())
    }

    /// Sorted copy of the catalog; storage order is unaffected
    pub fn sorted(&self, sort_by: &str, order: &str) -> AppResult<Vec<Book>> {
        let mut books = self.repository.books.list()?;
        sort_books(&mut books, SortKey::parse(sort_by), SortOrder::parse(order));
        Ok(books)
    }

    /// Full replace of the book at the path id. The id in the body is
    /// ignored; an unknown id is rejected as not-found (no upsert).
    pub fn update(&self, id: i64, new: NewBook) -> AppResult<Book> {
        self.repository
            .books
            .replace(id, new)?
            .ok_or_else(|| AppError::NotFound(format!("No book with id {}", id)))
    }

    /// Partial update of the book at the path id; unset fields are left
    /// unchanged
    pub fn modify(&self, id: i64, patch: BookPatch) -> AppResult<Book> {
        self.repository
            .books
            .patch(id, patch)?
            .ok_or_else(|| AppError::NotFound(format!("No book with id {}", id)))
    }

    /// Remove and return the book at the given id
    pub fn delete(&self, id: i64) -> AppResult<Book> {
        self.repository
            .books
            .remove(id)?
            .ok_or_else(|| AppError::NotFound(format!("No book with id {}", id)))
    }

    /// Page of the catalog in storage order, no filter or sort
    pub fn paginate(&self, page: usize, size: usize) -> AppResult<Vec<Book>> {
        Ok(page_slice(self.repository.books.list()?, page, size))
    }
}

fn filter_by_title(books: Vec<Book>, needle: &str) -> Vec<Book> {
    if needle.is_empty() {
        return books;
    }
    let needle = needle.to_lowercase();
    books
        .into_iter()
        .filter(|b| b.title.to_lowercase().contains(&needle))
        .collect()
}

/// Stable sort with the comparator reversed for descending order, so equal
/// keys keep their storage-relative order in both directions
fn sort_books(books: &mut [Book], key: SortKey, order: SortOrder) {
    fn field(b: &Book, key: SortKey) -> &str {
        match key {
            SortKey::Title => &b.title,
            SortKey::Author => &b.author,
        }
    }
    books.sort_by(|a, b| {
        let ord: Ordering = field(a, key).cmp(field(b, key));
        match order {
            SortOrder::Asc => ord,
            SortOrder::Desc => ord.reverse(),
        }
    });
}

/// Slice `[page*size, page*size + size)` with out-of-range indices clamped:
/// a start past the end yields an empty page rather than an error
fn page_slice(books: Vec<Book>, page: usize, size: usize) -> Vec<Book> {
    let start = page.saturating_mul(size).min(books.len());
    let end = start.saturating_add(size).min(books.len());
    books[start..end].to_vec()
}
