//! Port traits defining external boundaries.
//!
//! Each trait represents a boundary between the migration logic and the
//! outside world (the project directory and the executables on `$PATH`).
//! Implementations live in `src/adapters/`.

pub mod executables;
pub mod filesystem;

pub use executables::ExecutableLocator;
pub use filesystem::FileSystem;
