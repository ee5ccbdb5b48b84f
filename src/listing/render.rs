//! Listing documents returned to the UI.

use std::num::NonZeroU32;

use serde::Serialize;

use super::pagination::Pagination;
use super::query::{category_label, Category, ListingQuery, Sort, SORT_OPTIONS};
use crate::catalog::{Product, ProductPage};
use crate::views::page_title;

pub const NO_PRODUCTS_MESSAGE: &str = "No products found in this category";

/// One option of the sort selector.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SortOption {
    pub value: &'static str,
    pub label: &'static str,
    pub selected: bool,
    /// Query string selecting this option
    pub query: String,
}

/// A pagination control, with the query string it navigates to.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PageLink {
    pub label: String,
    pub page: u64,
    pub current: bool,
    pub query: String,
}

/// The rendered shop listing.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ShopListing {
    pub title: String,
    pub category: String,
    pub page: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,

    /// Bookmarkable query string for this state
    pub query: String,

    pub products: Vec<Product>,
    pub total: u64,
    pub pagination: Pagination,
    pub page_links: Vec<PageLink>,
    pub sort_options: Vec<SortOption>,

    /// Shown instead of the grid when nothing matched
    #[serde(skip_serializing_if = "Option::is_none")]
    pub empty_message: Option<&'static str>,

    /// Catalog failure text; the grid is empty when set
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Query string that re-issues the same request
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retry: Option<String>,
}

impl ShopListing {
    pub fn from_page(query: &ListingQuery, page: ProductPage, limit: u64) -> Self {
        let pagination = Pagination::new(u64::from(query.page.get()), page.total, limit, page.skip);
        let empty_message = page.products.is_empty().then_some(NO_PRODUCTS_MESSAGE);
        Self {
            products: page.products,
            total: page.total,
            page_links: page_links(query, &pagination),
            pagination,
            empty_message,
            ..Self::blank(query, limit)
        }
    }

    /// Listing shown when the catalog request failed.
    pub fn failed(query: &ListingQuery, message: String, limit: u64) -> Self {
        Self {
            error: Some(message),
            retry: Some(query.to_query_string()),
            ..Self::blank(query, limit)
        }
    }

    fn blank(query: &ListingQuery, limit: u64) -> Self {
        let selected = query.sort.map(|sort| sort.to_string());
        let unsorted = SortOption {
            value: "",
            label: "Sort By",
            selected: selected.is_none(),
            query: query.with_sort(None).to_query_string(),
        };
        let sort_options = std::iter::once(unsorted)
            .chain(SORT_OPTIONS.iter().map(|&(value, label)| SortOption {
                value,
                label,
                selected: selected.as_deref() == Some(value),
                query: query.with_sort(Sort::from_token(Some(value))).to_query_string(),
            }))
            .collect();

        Self {
            title: page_title("Shop"),
            category: query.category.as_str().to_string(),
            page: query.page.get(),
            sort: selected,
            query: query.to_query_string(),
            products: Vec::new(),
            total: 0,
            pagination: Pagination::new(u64::from(query.page.get()), 0, limit, query.skip(limit)),
            page_links: Vec::new(),
            sort_options,
            empty_message: None,
            error: None,
            retry: None,
        }
    }
}

/// Previous, numbered and next controls. Empty when pagination is hidden.
fn page_links(query: &ListingQuery, pagination: &Pagination) -> Vec<PageLink> {
    if !pagination.visible {
        return Vec::new();
    }

    let link = |label: String, page: u64| PageLink {
        current: page == pagination.current_page,
        query: u32::try_from(page)
            .ok()
            .and_then(NonZeroU32::new)
            .map(|page| query.with_page(page).to_query_string())
            .unwrap_or_default(),
        label,
        page,
    };

    let mut links = Vec::with_capacity(pagination.pages.len() + 2);
    if let Some(previous) = pagination.previous {
        links.push(link("Previous".to_string(), previous));
    }
    links.extend(pagination.pages.iter().map(|&page| link(page.to_string(), page)));
    if let Some(next) = pagination.next {
        links.push(link("Next".to_string(), next));
    }
    links
}

/// One entry of the category sidebar.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CategoryEntry {
    pub slug: String,
    pub label: String,
    pub selected: bool,
    /// Query string selecting this category, back on page 1
    pub query: String,
}

/// Sidebar entries, led by the "All Categories" choice.
pub fn category_entries(categories: &[String], current: &ListingQuery) -> Vec<CategoryEntry> {
    let selected = current.category.as_str();
    let entry = |category: Category, label: String| CategoryEntry {
        slug: category.as_str().to_string(),
        selected: category.as_str() == selected,
        query: current.with_category(category).to_query_string(),
        label,
    };

    std::iter::once(entry(Category::All, "All Categories".to_string()))
        .chain(categories.iter().map(|slug| {
            entry(Category::from_param(Some(slug.as_str())), category_label(slug))
        }))
        .collect()
}
