//! In-memory adapters for tests and dry runs.

pub mod executables;
pub mod filesystem;

pub use executables::FixedExecutables;
pub use filesystem::MemoryFileSystem;
