//! Infrastructure adapters for CardVote.
//!
//! Implements the ports declared in `cardvote-core`: key-value stores, the
//! typed mock session store, the local and HTTP auth backends, and the HTTP
//! content gateway.

pub mod config_service;
pub mod http_auth_backend;
pub mod http_client;
pub mod http_content_gateway;
pub mod local_auth_backend;
pub mod mock_session_store;
pub mod paths;
pub mod storage;

pub use crate::config_service::ConfigService;
pub use crate::http_auth_backend::HttpAuthBackend;
pub use crate::http_client::ApiClient;
pub use crate::http_content_gateway::HttpContentGateway;
pub use crate::local_auth_backend::LocalAuthBackend;
pub use crate::mock_session_store::MockSessionStore;
pub use crate::storage::{JsonFileStore, MemoryStore};
