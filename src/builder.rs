use std::sync::Arc;

use crate::{
    Config, Result, StoreType, SurveyCore, SurveyKitError,
    store::{DocBackend, MemBackend, PgBackend},
};

/// Builds a [`SurveyCore`] from a validated configuration. The default
/// configuration uses the in-memory store.
pub struct CoreBuilder {
    config: Config,
}

impl Default for CoreBuilder {
    fn default() -> Self {
        Self {
            config: Config::default(),
        }
    }
}

impl CoreBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(
        mut self,
        config: Config,
    ) -> Self {
        self.config = config;
        self
    }

    /// Validates the configuration and wires the core. Configuration
    /// problems fail here, not on the first read or write.
    pub fn build(&self) -> Result<SurveyCore> {
        self.config.validate()?;

        let backend: Arc<dyn DocBackend> = match self.config.store.store_type {
            StoreType::Mem => Arc::new(MemBackend::new()),
            StoreType::Postgres => {
                let postgres = self
                    .config
                    .store
                    .postgres
                    .as_ref()
                    .ok_or_else(|| SurveyKitError::Config("postgres store selected but [store.postgres] is missing".to_string()))?;
                Arc::new(PgBackend::new(&postgres.database_url))
            }
        };

        Ok(SurveyCore::new(backend))
    }
}
