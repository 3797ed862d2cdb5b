use std::sync::Arc;

use tokio::sync::broadcast;

use crate::config::Config;
use crate::error::AppError;
use crate::engine::availability::ConflictWindow;
use crate::engine::dispatcher::Dispatcher;
use crate::engine::distance::RandomDistance;
use crate::engine::ranking::RankReporter;
use crate::models::delivery::Delivery;
use crate::observability::metrics::Metrics;
use crate::store::memory::InMemoryStore;

pub struct AppState {
    pub store: Arc<InMemoryStore>,
    pub dispatcher: Dispatcher,
    pub ranking: RankReporter,
    pub delivery_events_tx: broadcast::Sender<Delivery>,
    pub metrics: Metrics,
}

impl AppState {
    pub fn new(window: ConflictWindow, max_distance_km: f64, event_buffer_size: usize) -> Self {
        let store = Arc::new(InMemoryStore::new());
        let (delivery_events_tx, _unused_rx) = broadcast::channel(event_buffer_size);

        let dispatcher = Dispatcher::new(store.clone(), window)
            .with_distance_estimator(Arc::new(RandomDistance::new(max_distance_km)));

        Self {
            ranking: RankReporter::new(store.clone()),
            store,
            dispatcher,
            delivery_events_tx,
            metrics: Metrics::new(),
        }
    }

    pub fn from_config(config: &Config) -> Result<Self, AppError> {
        Ok(Self::new(
            config.conflict_window()?,
            config.max_distance_km,
            config.event_buffer_size,
        ))
    }
}
