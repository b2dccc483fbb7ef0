//! Adapter implementations of the port traits.
//!
//! - `live`: real disk and `$PATH` lookups.
//! - `memory`: in-memory doubles used by tests and dry runs.

pub mod live;
pub mod memory;
