//! Shared handler state.

use std::sync::Arc;

use lib_rates::{FeedSource, RateIngestor, RateReporter, RateStore};

/// Handler state: one ingestor and one reporter sharing a store.
#[derive(Clone)]
pub struct AppState {
    pub ingestor: Arc<RateIngestor>,
    pub reporter: Arc<RateReporter>,
}

impl AppState {
    pub fn new(feed: Arc<dyn FeedSource>, store: Arc<dyn RateStore>) -> Self {
        Self {
            ingestor: Arc::new(RateIngestor::new(feed, store.clone())),
            reporter: Arc::new(RateReporter::new(store)),
        }
    }
}
