use std::sync::Arc;

use livepost_core::{PostStore, SharedPostStore};

use crate::config::ServerConfig;
use crate::graphql::{build_schema, LivepostSchema, PostBus};

/// Application state shared across all routes
#[derive(Clone)]
pub struct AppState {
    pub store: SharedPostStore,
    pub bus: PostBus,
    pub schema: LivepostSchema,
    pub config: ServerConfig,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Self {
        let store = if config.seed {
            PostStore::seeded()
        } else {
            PostStore::new()
        };
        let bus = PostBus::with_capacity(config.subscriber_buffer);
        Self::with_parts(config, Arc::new(store), bus)
    }

    /// Build state around an existing store and bus.
    pub fn with_parts(config: ServerConfig, store: SharedPostStore, bus: PostBus) -> Self {
        Self {
            schema: build_schema(store.clone(), bus.clone()),
            store,
            bus,
            config,
        }
    }
}
