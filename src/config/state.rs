// Application state module
// Read-only state shared by every connection task

use std::sync::atomic::AtomicUsize;
use std::sync::Arc;

use super::types::Config;
use crate::fact::{self, FactError, FactProvider};

/// Application state
pub struct AppState {
    pub config: Config,
    pub fact_provider: Arc<dyn FactProvider>,
    /// Open connections, used only to enforce `max_connections`
    pub active_connections: AtomicUsize,
}

impl AppState {
    /// Build state with the fact provider described by `config.fact`
    pub fn new(config: Config) -> Result<Self, FactError> {
        let provider = fact::provider_from_config(&config.fact)?;
        Ok(Self::with_provider(config, provider))
    }

    pub fn with_provider(config: Config, fact_provider: Arc<dyn FactProvider>) -> Self {
        Self {
            config,
            fact_provider,
            active_connections: AtomicUsize::new(0),
        }
    }
}
