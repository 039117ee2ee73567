//! Infrastructure layer: tenant-scoped storage, trace-back log and configuration.

pub mod config;
pub mod read_model;
pub mod repository;
pub mod traceback;

pub use config::{AppConfig, ConfigError};
pub use read_model::{InMemoryTenantStore, TenantStore};
pub use repository::InMemoryRepository;
pub use traceback::{TraceBack, TraceBackService};
