use std::sync::Arc;

use summit_core::config::{MatcherConfig, ServerConfig};
use summit_peaks::{ConfiguredCatalog, PeakMatcher};

/// Shared by every handler.
pub struct State {
    pub matcher: PeakMatcher<ConfiguredCatalog>,
    pub defaults: MatcherConfig,
    pub server: ServerConfig,
}

impl State {
    pub fn new(catalog: ConfiguredCatalog, defaults: MatcherConfig, server: ServerConfig) -> Arc<Self> {
        Arc::new(Self {
            matcher: PeakMatcher::new(catalog),
            defaults,
            server,
        })
    }

    pub fn from_config(config: &summit_core::config::ConfigSchema) -> Arc<Self> {
        let catalog = ConfiguredCatalog::from_path(config.catalog.path.as_deref());
        tracing::info!(catalog = %catalog.describe(), "Using peak catalog");
        Self::new(catalog, config.matcher.clone(), config.server.clone())
    }
}
