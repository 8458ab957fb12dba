//! Error handling for the authorization core
//!
//! This module defines the error type shared by the stores, the permission
//! cache, configuration loading and the background workers.

mod helpers;
mod types;

pub use types::{AuthzError, Result};
