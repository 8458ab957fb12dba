//! Policy strings and the requirements they resolve to
//!
//! A policy is either a bare permission name, `HasAll:<p1>,<p2>,...` or
//! `HasAny:<p1>,<p2>,...`.

mod resolver;
#[cfg(test)]
mod tests;
mod types;

pub use resolver::{ALL_OF_PREFIX, ANY_OF_PREFIX, PolicyResolver};
pub use types::Requirement;
