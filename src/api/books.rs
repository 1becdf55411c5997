//! Book catalog endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::{
        book::{AdvancedQuery, PriceRangeQuery, SearchQuery, SortQuery},
        Book, BookPatch, NewBook,
    },
};

/// List the full catalog in storage order
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    responses(
        (status = 200, description = "All books", body = Vec<Book>)
    )
)]
pub async fn list_books(State(state): State<crate::AppState>) -> AppResult<Json<Vec<Book>>> {
    let books = state.services.catalog.list_all()?;
    Ok(Json(books))
}

/// Filtered, sorted and paginated listing
#[utoipa::path(
    get,
    path = "/books/advanced/{page}/{size}",
    tag = "books",
    params(
        ("page" = usize, Path, description = "Zero-based page index"),
        ("size" = usize, Path, description = "Page size"),
        AdvancedQuery
    ),
    responses(
        (status = 200, description = "One page of the filtered, sorted catalog", body = Vec<Book>)
    )
)]
pub async fn list_books_advanced(
    State(state): State<crate::AppState>,
    Path((page, size)): Path<(usize, usize)>,
    Query(query): Query<AdvancedQuery>,
) -> AppResult<Json<Vec<Book>>> {
    let books = state.services.catalog.list_advanced(
        query.title.as_deref().unwrap_or(""),
        query.sort_by.as_deref().unwrap_or("title"),
        query.order.as_deref().unwrap_or("asc"),
        page,
        size,
    )?;
    Ok(Json(books))
}

/// Get a single book by id
#[utoipa::path(
    get,
    path = "/books/{id}",
    tag = "books",
    params(
        ("id" = i64, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Book details", body = Book),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_book(
    State(state): State<crate::AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Book>> {
    let book = state.services.catalog.get(id)?;
    Ok(Json(book))
}

/// Create a new book; the id is assigned by the server
#[utoipa::path(
    post,
    path = "/books",
    tag = "books",
    request_body = NewBook,
    responses(
        (status = 201, description = "Book created, full updated catalog returned", body = Vec<Book>),
        (status = 400, description = "Malformed body")
    )
)]
pub async fn create_book(
    State(state): State<crate::AppState>,
    Json(new): Json<NewBook>,
) -> AppResult<(StatusCode, Json<Vec<Book>>)> {
    let books = state.services.catalog.create(new)?;
    Ok((StatusCode::CREATED, Json(books)))
}

/// Search by title substring, case-insensitive
#[utoipa::path(
    get,
    path = "/books/search",
    tag = "books",
    params(SearchQuery),
    responses(
        (status = 200, description = "Matching books in storage order", body = Vec<Book>)
    )
)]
pub async fn search_books(
    State(state): State<crate::AppState>,
    Query(query): Query<SearchQuery>,
) -> AppResult<Json<Vec<Book>>> {
    let books = state
        .services
        .catalog
        .search(query.title.as_deref().unwrap_or(""))?;
    Ok(Json(books))
}

/// Filter by inclusive price range; either bound may be omitted
#[utoipa::path(
    get,
    path = "/books/price-range",
    tag = "books",
    params(PriceRangeQuery),
    responses(
        (status = 200, description = "Books within the price bounds", body = Vec<Book>)
    )
)]
pub async fn price_range(
    State(state): State<crate::AppState>,
    Query(query): Query<PriceRangeQuery>,
) -> AppResult<Json<Vec<Book>>> {
    let books = state
        .services
        .catalog
        .price_range(query.min_price, query.max_price)?;
    Ok(Json(books))
}

/// Sorted copy of the catalog
#[utoipa::path(
    get,
    path = "/books/sorted",
    tag = "books",
    params(SortQuery),
    responses(
        (status = 200, description = "Sorted catalog", body = Vec<Book>)
    )
)]
pub async fn sorted_books(
    State(state): State<crate::AppState>,
    Query(query): Query<SortQuery>,
) -> AppResult<Json<Vec<Book>>> {
    let books = state.services.catalog.sorted(
        query.sort_by.as_deref().unwrap_or("title"),
        query.order.as_deref().unwrap_or("asc"),
    )?;
    Ok(Json(books))
}

/// Replace a book in full; the path id always wins over any body id
#[utoipa::path(
    put,
    path = "/books/{id}",
    tag = "books",
    params(
        ("id" = i64, Path, description = "Book ID")
    ),
    request_body = NewBook,
    responses(
        (status = 200, description = "Book replaced", body = Book),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_book(
    State(state): State<crate::AppState>,
    Path(id): Path<i64>,
    Json(new): Json<NewBook>,
) -> AppResult<Json<Book>> {
    let book = state.services.catalog.update(id, new)?;
    Ok(Json(book))
}

/// Partially update a book; omitted fields are left unchanged
#[utoipa::path(
    patch,
    path = "/books/{id}",
    tag = "books",
    params(
        ("id" = i64, Path, description = "Book ID")
    ),
    request_body = BookPatch,
    responses(
        (status = 200, description = "Book updated", body = Book),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn patch_book(
    State(state): State<crate::AppState>,
    Path(id): Path<i64>,
    Json(patch): Json<BookPatch>,
) -> AppResult<Json<Book>> {
    let book = state.services.catalog.modify(id, patch)?;
    Ok(Json(book))
}

/// Delete a book, returning the removed record
#[utoipa::path(
    delete,
    path = "/books/{id}",
    tag = "books",
    params(
        ("id" = i64, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Removed book", body = Book),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_book(
    State(state): State<crate::AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Book>> {
    let book = state.services.catalog.delete(id)?;
    Ok(Json(book))
}

/// Page of the catalog in storage order, no filter or sort
#[utoipa::path(
    get,
    path = "/books/pagination/{page}/{size}",
    tag = "books",
    params(
        ("page" = usize, Path, description = "Zero-based page index"),
        ("size" = usize, Path, description = "Page size")
    ),
    responses(
        (status = 200, description = "One page of the catalog", body = Vec<Book>)
    )
)]
pub async fn paginate_books(
    State(state): State<crate::AppState>,
    Path((page, size)): Path<(usize, usize)>,
) -> AppResult<Json<Vec<Book>>> {
    let books = state.services.catalog.paginate(page, size)?;
    Ok(Json(books))
}
