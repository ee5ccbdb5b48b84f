//! HTTP client for the remote product catalog.

use std::time::Duration;

use reqwest::header::{self, HeaderMap, HeaderValue};
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use super::error::CatalogError;
use super::models::{PageRequest, Product, ProductPage};

/// Timeout applied to every catalog request unless configured otherwise.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Connection settings for [`CatalogClient`].
#[derive(Debug, Clone)]
pub struct CatalogClientConfig {
    /// Base URL of the catalog service, e.g. `https://dummyjson.com`
    pub base_url: String,
    pub timeout: Duration,
    pub user_agent: Option<String>,
}

impl CatalogClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: DEFAULT_REQUEST_TIMEOUT,
            user_agent: None,
        }
    }
}

/// Thin wrapper over GET requests to the catalog service.
///
/// There is no caching, retrying or cancellation here; callers that issue
/// overlapping requests guard against stale results themselves (see
/// [`crate::listing::ListingView`]).
#[derive(Debug, Clone)]
pub struct CatalogClient {
    http: reqwest::Client,
    base_url: Url,
}

impl CatalogClient {
    pub fn new(config: CatalogClientConfig) -> Result<Self, CatalogError> {
        let base_url = Url::parse(&config.base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(CatalogError::Client(format!(
                "catalog url {base_url} cannot be used as a base"
            )));
        }

        let mut headers = HeaderMap::new();
        headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));

        debug!(
            catalog_url = %base_url,
            timeout_ms = config.timeout.as_millis() as u64,
            "building catalog HTTP client"
        );

        let builder = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout);
        let builder = match config.user_agent {
            Some(ref user_agent) => builder.user_agent(user_agent),
            None => builder,
        };

        let http = builder
            .build()
            .map_err(|e| CatalogError::Client(e.to_string()))?;

        Ok(Self { http, base_url })
    }

    /// `GET /products`
    pub async fn fetch_products(&self, request: PageRequest) -> Result<ProductPage, CatalogError> {
        let url = self.endpoint(&["products"])?;
        let body = self.get_json(url, &page_params(&request)).await?;
        Ok(ProductPage::from_response(&body, request.limit))
    }

    /// `GET /products/category/{category}`
    pub async fn fetch_products_by_category(
        &self,
        category: &str,
        request: PageRequest,
    ) -> Result<ProductPage, CatalogError> {
        if category.is_empty() {
            return Err(CatalogError::MissingArgument("Category"));
        }

        let url = self.endpoint(&["products", "category", category])?;
        let body = self.get_json(url, &page_params(&request)).await?;
        Ok(ProductPage {
            category: Some(category.to_string()),
            ..ProductPage::from_response(&body, request.limit)
        })
    }

    /// `GET /products/{id}`
    pub async fn fetch_product(&self, id: u64) -> Result<Product, CatalogError> {
        let url = self.endpoint(&["products", &id.to_string()])?;
        let body = self.get_json(url, &[]).await?;
        if body.is_null() {
            debug!(id, "catalog returned no product");
            return Err(CatalogError::NotFound);
        }
        serde_json::from_value(body).map_err(|e| CatalogError::MalformedResponse(e.to_string()))
    }

    /// `GET /products/category-list`
    pub async fn fetch_categories(&self) -> Result<Vec<String>, CatalogError> {
        let url = self.endpoint(&["products", "category-list"])?;
        let body = self.get_json(url, &[]).await?;
        serde_json::from_value(body).map_err(|e| CatalogError::MalformedResponse(e.to_string()))
    }

    /// `GET /products/search?q=`
    pub async fn search_products(
        &self,
        query: &str,
        limit: u64,
        skip: u64,
    ) -> Result<ProductPage, CatalogError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(CatalogError::MissingArgument("Search query"));
        }

        let url = self.endpoint(&["products", "search"])?;
        let params = [
            ("q", query.to_string()),
            ("limit", limit.to_string()),
            ("skip", skip.to_string()),
        ];
        let body = self.get_json(url, &params).await?;
        Ok(ProductPage::from_response(&body, limit))
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, CatalogError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| CatalogError::Client("catalog url cannot be a base".into()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json(&self, url: Url, params: &[(&str, String)]) -> Result<Value, CatalogError> {
        debug!(%url, ?params, "catalog request");

        let response = self
            .http
            .get(url.clone())
            .query(params)
            .send()
            .await
            .map_err(|err| log_failure(&url, err.into()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(log_failure(&url, CatalogError::from_status(status)));
        }

        response
            .json::<Value>()
            .await
            .map_err(|err| log_failure(&url, err.into()))
    }
}

fn log_failure(url: &Url, err: CatalogError) -> CatalogError {
    warn!(%url, error = %err, "catalog request failed");
    err
}

/// Only meaningful parameters are sent; an unsorted request carries neither
/// `sortBy` nor `order`.
fn page_params(request: &PageRequest) -> Vec<(&'static str, String)> {
    let mut params = Vec::new();
    if request.limit > 0 {
        params.push(("limit", request.limit.to_string()));
    }
    if request.skip > 0 {
        params.push(("skip", request.skip.to_string()));
    }
    if let Some(sort) = request.sort {
        params.push(("sortBy", sort.field.as_str().to_string()));
        params.push(("order", sort.order.as_str().to_string()));
    }
    params
}

#[cfg(test)]
mod tests {
    use httpmock::prelude::*;
    use serde_json::json;

    use super::*;
    use crate::listing::{Sort, SortField, SortOrder};

    fn client(server: &MockServer) -> CatalogClient {
        CatalogClient::new(CatalogClientConfig::new(server.base_url())).unwrap()
    }

    #[tokio::test]
    async fn fetch_products_sends_sort_pair() {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/products")
                .query_param("limit", "20")
                .query_param("skip", "40")
                .query_param("sortBy", "price")
                .query_param("order", "desc");
            then.status(200).json_body(json!({
                "products": [{ "id": 1, "title": "Phone", "price": 499.5 }],
                "total": 194,
                "skip": 40,
                "limit": 20
            }));
        });

        let request = PageRequest::new(20, 40).sorted(Some(Sort {
            field: SortField::Price,
            order: SortOrder::Desc,
        }));
        let page = client(&server).fetch_products(request).await.unwrap();

        mock.assert();
        assert_eq!(page.total, 194);
        assert_eq!(page.products.len(), 1);
        assert_eq!(page.category, None);
    }

    #[test]
    fn unsorted_first_page_omits_defaults() {
        let params = page_params(&PageRequest::new(20, 0));
        assert_eq!(params, vec![("limit", "20".to_string())]);
    }

    #[tokio::test]
    async fn category_listing_uses_category_path() {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(GET).path("/products/category/smartphones");
            then.status(200).json_body(json!({ "products": [], "total": 16, "skip": 0, "limit": 20 }));
        });

        let page = client(&server)
            .fetch_products_by_category("smartphones", PageRequest::new(20, 0))
            .await
            .unwrap();

        mock.assert();
        assert_eq!(page.category.as_deref(), Some("smartphones"));
        assert_eq!(page.total, 16);
    }

    #[tokio::test]
    async fn empty_category_is_rejected_before_request() {
        let server = MockServer::start_async().await;
        let err = client(&server)
            .fetch_products_by_category("", PageRequest::new(20, 0))
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::MissingArgument("Category")));
    }

    #[tokio::test]
    async fn not_found_maps_to_not_found() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET).path("/products/999");
            then.status(404).json_body(json!({ "message": "Product with id '999' not found" }));
        });

        let err = client(&server).fetch_product(999).await.unwrap_err();
        assert!(matches!(err, CatalogError::NotFound), "found: {err:?}");
    }

    #[tokio::test]
    async fn null_product_body_is_not_found() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET).path("/products/12");
            then.status(200).header("content-type", "application/json").body("null");
        });

        let err = client(&server).fetch_product(12).await.unwrap_err();
        assert!(matches!(err, CatalogError::NotFound), "found: {err:?}");
        assert_eq!(err.user_message(), "The requested resource was not found.");
    }

    #[tokio::test]
    async fn server_errors_keep_status() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET).path("/products/category-list");
            then.status(503);
        });

        let err = client(&server).fetch_categories().await.unwrap_err();
        assert_eq!(
            err.user_message(),
            "Service unavailable. Please try again later."
        );
    }

    #[tokio::test]
    async fn non_json_body_is_malformed() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET).path("/products/3");
            then.status(200).body("<html>oops</html>");
        });

        let err = client(&server).fetch_product(3).await.unwrap_err();
        assert!(matches!(err, CatalogError::MalformedResponse(_)), "found: {err:?}");
    }

    #[tokio::test]
    async fn timeout_is_classified() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET).path("/products/category-list");
            then.status(200)
                .delay(Duration::from_millis(500))
                .json_body(json!(["beauty"]));
        });

        let config = CatalogClientConfig {
            timeout: Duration::from_millis(50),
            ..CatalogClientConfig::new(server.base_url())
        };
        let err = CatalogClient::new(config)
            .unwrap()
            .fetch_categories()
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::Timeout), "found: {err:?}");
    }

    #[tokio::test]
    async fn search_trims_query() {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(GET).path("/products/search").query_param("q", "phone");
            then.status(200).json_body(json!({ "products": [], "total": 0 }));
        });

        client(&server).search_products("  phone ", 20, 0).await.unwrap();
        mock.assert();
    }

    #[tokio::test]
    async fn base_url_path_prefix_is_kept() {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(GET).path("/api/products/category-list");
            then.status(200).json_body(json!(["beauty", "fragrances"]));
        });

        let client =
            CatalogClient::new(CatalogClientConfig::new(server.url("/api"))).unwrap();
        let categories = client.fetch_categories().await.unwrap();

        mock.assert();
        assert_eq!(categories, vec!["beauty", "fragrances"]);
    }
}
