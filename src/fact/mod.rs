//! Fun fact module
//!
//! Resolves a short trivia sentence for a number:
//! - `FactProvider` is the seam in front of any remote source
//! - `lookup_fact` never fails; provider errors are logged and absorbed
//! - `fallback_fact` builds the local sentence from an existing classification

mod numbers_api;

pub use numbers_api::NumbersApiProvider;

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

use crate::classifier;
use crate::config::FactConfig;
use crate::logger;

/// Reasons a provider could not produce a fact
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FactError {
    #[error("request timed out")]
    Timeout,
    #[error("provider returned status {0}")]
    Status(u16),
    #[error("network error: {0}")]
    Network(String),
    #[error("unreadable response body: {0}")]
    Body(String),
    #[error("provider returned an empty fact")]
    Empty,
    #[error("fact provider disabled")]
    Disabled,
}

/// Source of trivia sentences
#[async_trait]
pub trait FactProvider: Send + Sync {
    /// Provider name for logging
    fn name(&self) -> &'static str;

    async fn fetch_fact(&self, n: i64) -> Result<String, FactError>;
}

/// Provider used when remote lookups are switched off
pub struct OfflineProvider;

#[async_trait]
impl FactProvider for OfflineProvider {
    fn name(&self) -> &'static str {
        "offline"
    }

    async fn fetch_fact(&self, _n: i64) -> Result<String, FactError> {
        Err(FactError::Disabled)
    }
}

/// Build the provider described by the configuration
pub fn provider_from_config(config: &FactConfig) -> Result<Arc<dyn FactProvider>, FactError> {
    if config.enabled {
        Ok(Arc::new(NumbersApiProvider::new(config)?))
    } else {
        Ok(Arc::new(OfflineProvider))
    }
}

/// Locally computed fact: `"{n} is {even|odd} and {is|is not} prime."`
///
/// Primality comes from the caller so the trial division is not run twice.
pub fn fallback_fact(n: i64, is_prime: bool) -> String {
    let parity = if classifier::is_even(n) { "even" } else { "odd" };
    let prime = if is_prime { "is" } else { "is not" };
    format!("{n} is {parity} and {prime} prime.")
}

/// Ask the provider for a fact; `None` means the caller should fall back
pub async fn lookup_fact(provider: &dyn FactProvider, n: i64) -> Option<String> {
    match provider.fetch_fact(n).await {
        Ok(fact) => Some(fact),
        // Configured off, nothing went wrong
        Err(FactError::Disabled) => {
            logger::log_debug(&format!("Fact lookup disabled; using fallback for {n}"));
            None
        }
        Err(e) => {
            logger::log_warning(&format!(
                "Fact provider '{}' failed for {n}: {e}; using fallback",
                provider.name()
            ));
            None
        }
    }
}

#[cfg(test)]
pub mod testing {
    //! Canned providers shared by handler tests

    use super::{async_trait, FactError, FactProvider};

    pub struct FixedProvider(pub &'static str);

    #[async_trait]
    impl FactProvider for FixedProvider {
        fn name(&self) -> &'static str {
            "fixed"
        }

        async fn fetch_fact(&self, _n: i64) -> Result<String, FactError> {
            Ok(self.0.to_string())
        }
    }

    pub struct FailingProvider(pub FactError);

    #[async_trait]
    impl FactProvider for FailingProvider {
        fn name(&self) -> &'static str {
            "failing"
        }

        async fn fetch_fact(&self, _n: i64) -> Result<String, FactError> {
            Err(self.0.clone())
        }
    }
}
