//! Live adapters for real external interactions.

pub mod executables;
pub mod filesystem;

pub use executables::LiveExecutableLocator;
pub use filesystem::LiveFileSystem;
