//! Wiring of configuration, stores and adapters for one CLI run.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use cardvote_application::SessionManager;
use cardvote_core::config::{AuthMode, ClientConfig};
use cardvote_core::content::ContentGateway;
use cardvote_core::store::KeyValueStore;
use cardvote_core::user::AuthBackend;
use cardvote_infrastructure::{
    ApiClient, ConfigService, HttpAuthBackend, HttpContentGateway, JsonFileStore,
    LocalAuthBackend, MemoryStore, MockSessionStore,
};

/// Global command line options.
pub struct Options {
    pub config: Option<PathBuf>,
    pub api_url: Option<String>,
    pub ephemeral: bool,
}

pub struct AppContext {
    pub config: ClientConfig,
    pub session: Arc<SessionManager>,
    pub gateway: Arc<dyn ContentGateway>,
}

impl AppContext {
    pub fn build(options: &Options) -> Result<Self> {
        let service = match &options.config {
            Some(path) => ConfigService::with_path(path),
            None => ConfigService::new()?,
        };
        let mut config = service
            .load()
            .with_context(|| format!("Failed to load {}", service.path().display()))?;
        if let Some(url) = &options.api_url {
            config.api_base_url = url.trim_end_matches('/').to_string();
        }

        let kv: Arc<dyn KeyValueStore> = if options.ephemeral {
            Arc::new(MemoryStore::new())
        } else {
            let path = ConfigService::store_path(&config)?;
            tracing::debug!("Using session store at {:?}", path);
            Arc::new(JsonFileStore::new(path))
        };
        let store = MockSessionStore::new(kv);
        let api = ApiClient::new(config.api_base_url.clone(), config.request_timeout())?;

        let backend: Arc<dyn AuthBackend> = match config.auth_mode {
            AuthMode::Local => Arc::new(LocalAuthBackend::new(store.clone(), config.auth_latency())),
            AuthMode::Remote => Arc::new(HttpAuthBackend::new(api.clone())),
        };
        let session = Arc::new(SessionManager::new(backend, store.clone()));
        let gateway = Arc::new(HttpContentGateway::new(api, store));

        Ok(Self {
            config,
            session,
            gateway,
        })
    }
}
