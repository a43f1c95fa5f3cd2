//! Command implementations for the repository tools.
//!
//! Each command loads the repository configuration, runs the operation, and
//! prints its report in the requested format.

pub mod generate;
pub mod package;
