//! Book model and related wire types.
//!
//! The catalog stores plain `Book` records; the write endpoints use
//! dedicated body types so that client-supplied ids can never leak into
//! the store (`NewBook`) and so that "field omitted" is distinguishable
//! from a real value (`BookPatch`).

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// A catalog entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Book {
    /// Server-assigned identifier, unique for the life of the process
    pub id: i64,
    pub title: String,
    pub author: String,
    pub price: f64,
}

/// Body for create and full-replace requests.
///
/// Any `id` field in the payload is ignored; the server assigns ids on
/// create and forces the path id on update.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub price: f64,
}

impl NewBook {
    /// Materialize a `Book` with the given server-chosen id
    pub fn into_book(self, id: i64) -> Book {
        Book {
            id,
            title: self.title,
            author: self.author,
            price: self.price,
        }
    }
}

/// Body for partial updates; `None` means "leave unchanged"
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct BookPatch {
    pub title: Option<String>,
    pub author: Option<String>,
    pub price: Option<f64>,
}

/// Field the catalog can be sorted on.
///
/// Unrecognized keys resolve to `Title`, matching the lenient behavior the
/// API has always had.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Title,
    Author,
}

impl SortKey {
    /// Parse a `sortBy` query value, case-insensitively
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "author" => SortKey::Author,
            "title" => SortKey::Title,
            _ => SortKey::Title,
        }
    }
}

/// Direction of a sorted listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    /// Parse an `order` query value; anything but `desc` is ascending
    pub fn parse(s: &str) -> Self {
        if s.eq_ignore_ascii_case("desc") {
            SortOrder::Desc
        } else {
            SortOrder::Asc
        }
    }
}

/// Query parameters for the sorted listing endpoints
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct SortQuery {
    /// Sort key: `title` (default) or `author`
    #[serde(rename = "sortBy")]
    pub sort_by: Option<String>,
    /// Sort order: `asc` (default) or `desc`
    pub order: Option<String>,
}

/// Query parameters for the advanced listing endpoint
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct AdvancedQuery {
    /// Title substring filter; empty or absent matches everything
    pub title: Option<String>,
    #[serde(rename = "sortBy")]
    pub sort_by: Option<String>,
    pub order: Option<String>,
}

/// Query parameters for the title search endpoint
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct SearchQuery {
    pub title: Option<String>,
}

/// Query parameters for the price range endpoint; bounds are inclusive
/// and each may be absent independently
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct PriceRangeQuery {
    #[serde(rename = "minPrice")]
    pub min_price: Option<f64>,
    #[serde(rename = "maxPrice")]
    pub max_price: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_key_known_values() {
        assert_eq!(SortKey::parse("author"), SortKey::Author);
        assert_eq!(SortKey::parse("AUTHOR"), SortKey::Author);
        assert_eq!(SortKey::parse("title"), SortKey::Title);
    }

    #[test]
    fn test_sort_key_falls_back_to_title() {
        assert_eq!(SortKey::parse("bogus-key"), SortKey::Title);
        assert_eq!(SortKey::parse(""), SortKey::Title);
    }

    #[test]
    fn test_sort_order() {
        assert_eq!(SortOrder::parse("desc"), SortOrder::Desc);
        assert_eq!(SortOrder::parse("DESC"), SortOrder::Desc);
        assert_eq!(SortOrder::parse("asc"), SortOrder::Asc);
        assert_eq!(SortOrder::parse("anything"), SortOrder::Asc);
    }
}
