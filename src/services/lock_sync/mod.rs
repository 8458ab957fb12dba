//! Locked-user reconciliation between the relational and fast stores

mod reconciler;

pub use reconciler::{LockReconciler, ReconcileReport};
