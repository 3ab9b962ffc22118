//! Port traits defining external boundaries.
//!
//! The only boundary the bridge crosses is process execution; adapters for
//! it live in `src/adapters/`.

pub mod shell;

pub use shell::{CommandOutput, ShellError, ShellExecutor};
