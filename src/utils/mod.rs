//! Utility modules for the authorization core
//!
//! - **error**: error type and result alias
//! - **logging**: tracing subscriber setup

pub mod error;
pub mod logging;

pub use error::{AuthzError, Result};
pub use logging::init_tracing;
