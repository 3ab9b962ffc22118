//! Live adapters for real external interactions.

pub mod shell;
