//! Application State
//!
//! Everything the views share, constructed once at startup and handed to
//! handlers as [`SharedState`].

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::cart::storage::{CartStorage, FileStorage};
use crate::cart::store::CartStore;
use crate::catalog::{CatalogClient, CatalogError};
use crate::checkout::CheckoutGate;
use crate::config::Config;
use crate::listing::{ListingQuery, ListingView, RequestTicket, ShopListing};

/// Shared application state that can be safely passed between threads
pub type SharedState = Arc<AppState>;

/// Tunables the views need at request time.
#[derive(Debug, Clone, Copy)]
pub struct ViewSettings {
    /// Products per listing page
    pub page_size: u64,
    /// Simulated order processing time
    pub checkout_delay: Duration,
    /// Listing views kept before the least recently active is evicted
    pub max_sessions: usize,
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self {
            page_size: 20,
            checkout_delay: Duration::from_millis(1500),
            max_sessions: 10_000,
        }
    }
}

/// Core application state
#[derive(Debug)]
pub struct AppState {
    /// The shopper's cart; one writer at a time.
    pub cart: Mutex<CartStore>,

    pub catalog: CatalogClient,

    /// Listing views keyed by session id, at most `settings.max_sessions`.
    pub listings: DashMap<String, ListingView<ShopListing>>,

    /// Activity counter used to find the least recently active view.
    listing_clock: AtomicU64,

    pub checkout: CheckoutGate,

    pub settings: ViewSettings,
}

impl AppState {
    /// Builds the state from configuration, persisting the cart under
    /// `config.data_dir`.
    pub fn from_config(config: &Config) -> Result<Self, CatalogError> {
        let catalog = CatalogClient::new(config.catalog())?;
        let storage = FileStorage::new(&config.data_dir);
        info!(
            catalog_url = %config.catalog_url,
            data_dir = %config.data_dir.display(),
            "initializing storefront state"
        );

        Ok(Self::new(
            catalog,
            storage,
            ViewSettings {
                page_size: config.page_size,
                checkout_delay: config.checkout_delay(),
                max_sessions: config.max_sessions(),
            },
        ))
    }

    pub fn new(
        catalog: CatalogClient,
        storage: impl CartStorage + 'static,
        settings: ViewSettings,
    ) -> Self {
        Self {
            cart: Mutex::new(CartStore::load(storage)),
            catalog,
            listings: DashMap::new(),
            listing_clock: AtomicU64::new(0),
            checkout: CheckoutGate::default(),
            settings,
        }
    }

    /// Starts a listing fetch for `session_id`, creating its view if needed.
    ///
    /// When this pushes the number of views past `settings.max_sessions`,
    /// the least recently active views of other sessions are dropped.
    pub fn begin_listing(&self, session_id: &str, query: ListingQuery) -> RequestTicket {
        let stamp = self.listing_clock.fetch_add(1, Ordering::Relaxed);
        let ticket = {
            let mut view = self.listings.entry(session_id.to_string()).or_default();
            view.mark_active(stamp);
            view.begin(query)
        };
        self.evict_idle_listings(session_id);
        ticket
    }

    fn evict_idle_listings(&self, keep: &str) {
        while self.listings.len() > self.settings.max_sessions {
            let oldest = self
                .listings
                .iter()
                .filter(|entry| entry.key() != keep)
                .min_by_key(|entry| entry.value().last_active())
                .map(|entry| entry.key().clone());

            match oldest {
                Some(session_id) => {
                    self.listings.remove(&session_id);
                    debug!(%session_id, "evicted idle listing view");
                }
                None => break,
            }
        }
    }
}
