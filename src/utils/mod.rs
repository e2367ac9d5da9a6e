//! Utility modules for logging and dotted-path handling.

pub mod logging;
pub mod paths;

pub use paths::{expand_paths, flatten_value};
