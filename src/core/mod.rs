// src/core/mod.rs
//! Backend access, configuration and local persistence

pub mod api_client;
pub mod config_manager;
pub mod store;

pub use api_client::ApiClient;
pub use config_manager::{ClientConfig, ConfigManager, LogFormat};
pub use store::{KeyValueStore, MemoryStore, SharedStore, SqliteStore};
