//! Integration tests for backoffice-authz
//!
//! These tests verify the interaction between multiple components
//! and test real system behavior without mocking.

pub mod authorization_tests;
pub mod background_tests;
pub mod config_tests;
pub mod database_tests;
