//! Listing query state
//!
//! The category/page/sort triple that determines what the shop listing
//! requests and shows, and its round trip through the URL query string.

use std::fmt;
use std::num::NonZeroU32;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Query-string value meaning "no category filter".
pub const ALL_CATEGORIES: &str = "all";

// =============================================================================
// Sorting
// =============================================================================

/// Field the catalog can order listings by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortField {
    Title,
    Price,
    Rating,
}

impl SortField {
    /// Value sent as the catalog's `sortBy` parameter.
    pub fn as_str(self) -> &'static str {
        match self {
            SortField::Title => "title",
            SortField::Price => "price",
            SortField::Rating => "rating",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    /// Value sent as the catalog's `order` parameter.
    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

/// Structured sort selection.
///
/// Rendered in URLs as a `field_direction` token such as `price_asc`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Sort {
    pub field: SortField,
    pub order: SortOrder,
}

impl Sort {
    pub fn new(field: SortField, order: SortOrder) -> Self {
        Self { field, order }
    }

    /// Parses an optional sort token; empty or unknown tokens mean unsorted.
    pub fn from_token(token: Option<&str>) -> Option<Self> {
        token
            .filter(|token| !token.is_empty())
            .and_then(|token| token.parse().ok())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown sort option '{0}'")]
pub struct UnknownSort(String);

impl FromStr for Sort {
    type Err = UnknownSort;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let unknown = || UnknownSort(token.to_string());
        let (field, order) = token.split_once('_').ok_or_else(unknown)?;

        let field = match field {
            "title" => SortField::Title,
            "price" => SortField::Price,
            "rating" => SortField::Rating,
            _ => return Err(unknown()),
        };
        let order = match order {
            "asc" => SortOrder::Asc,
            "desc" => SortOrder::Desc,
            _ => return Err(unknown()),
        };

        Ok(Sort { field, order })
    }
}

impl fmt::Display for Sort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.field.as_str(), self.order.as_str())
    }
}

/// Sort options offered by the shop's sort selector, as `(token, label)`.
pub const SORT_OPTIONS: [(&str, &str); 4] = [
    ("title_asc", "Title A-Z"),
    ("title_desc", "Title Z-A"),
    ("price_asc", "Price Low to High"),
    ("price_desc", "Price High to Low"),
];

// =============================================================================
// Category
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Category {
    #[default]
    All,
    Named(String),
}

impl Category {
    /// Parses a query-string value; empty and `all` both mean no filter.
    pub fn from_param(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            None | Some("") | Some(ALL_CATEGORIES) => Category::All,
            Some(name) => Category::Named(name.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Category::All => ALL_CATEGORIES,
            Category::Named(name) => name,
        }
    }
}

/// Human label for a category slug, e.g. `mens-shirts` -> `mens shirts`.
pub fn category_label(slug: &str) -> String {
    slug.replace('-', " ")
}

// =============================================================================
// Listing Query
// =============================================================================

/// Raw query-string parameters of the shop listing URL.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawListingParams {
    pub category: Option<String>,
    pub page: Option<String>,
    pub sort: Option<String>,
}

/// The listing query state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingQuery {
    pub category: Category,
    pub page: NonZeroU32,
    pub sort: Option<Sort>,
}

impl Default for ListingQuery {
    fn default() -> Self {
        Self {
            category: Category::All,
            page: NonZeroU32::MIN,
            sort: None,
        }
    }
}

impl ListingQuery {
    /// Reads the query state from URL parameters.
    ///
    /// Missing values take their defaults; an unparsable or non-positive page
    /// falls back to 1 and an unknown sort token to unsorted.
    pub fn from_params(params: &RawListingParams) -> Self {
        let page = params
            .page
            .as_deref()
            .and_then(|page| page.trim().parse::<NonZeroU32>().ok())
            .unwrap_or(NonZeroU32::MIN);

        Self {
            category: Category::from_param(params.category.as_deref()),
            page,
            sort: Sort::from_token(params.sort.as_deref()),
        }
    }

    /// Changing category always starts over at page 1.
    pub fn with_category(&self, category: Category) -> Self {
        Self {
            category,
            page: NonZeroU32::MIN,
            sort: self.sort,
        }
    }

    pub fn with_page(&self, page: NonZeroU32) -> Self {
        Self {
            page,
            ..self.clone()
        }
    }

    pub fn with_sort(&self, sort: Option<Sort>) -> Self {
        Self {
            sort,
            ..self.clone()
        }
    }

    /// Number of products to skip for this page at the given page size.
    pub fn skip(&self, limit: u64) -> u64 {
        u64::from(self.page.get() - 1).saturating_mul(limit)
    }

    /// Encodes the state back into a URL query string.
    ///
    /// `category` and `page` are always written; `sort` only when set.
    pub fn to_query_string(&self) -> String {
        let mut query = url::form_urlencoded::Serializer::new(String::new());
        query.append_pair("category", self.category.as_str());
        query.append_pair("page", &self.page.to_string());
        if let Some(sort) = self.sort {
            query.append_pair("sort", &sort.to_string());
        }
        query.finish()
    }
}
