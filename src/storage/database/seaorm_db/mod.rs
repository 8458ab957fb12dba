// Module declarations
mod audit_ops;
mod connection;
mod role_ops;
mod store;
mod types;
mod user_ops;

// Re-export public types
pub use types::{DatabaseBackendType, DatabaseStats, SeaOrmDatabase};
