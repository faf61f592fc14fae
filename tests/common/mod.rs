//! Common test infrastructure
//!
//! Seeds a `movies.json` document in a temporary directory and exposes the
//! titles it contains.

mod fixtures;

pub use fixtures::*;
