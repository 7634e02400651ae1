pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod service;

pub use config::AppConfig;
pub use db::{create_pool, CatalogStore, MemoryCatalogStore, PgCatalogStore};
pub use error::{CoreError, CoreResult, StoreError};
pub use service::{FuzzyMatcher, ReceiptMatcher, RecommendationService};
