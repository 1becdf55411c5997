//! Repository layer holding the in-process catalog state

pub mod books;

/// Main repository struct owning all in-memory stores
#[derive(Clone)]
pub struct Repository {
    pub books: books::BooksRepository,
}

impl Repository {
    /// Create a new repository with the seeded book catalog
    pub fn new() -> Self {
        Self {
            books: books::BooksRepository::new(),
        }
    }
}

impl Default for Repository {
    fn default() -> Self {
        Self::new()
    }
}
