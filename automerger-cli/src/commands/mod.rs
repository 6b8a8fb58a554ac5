//! CLI command implementations

pub mod merge;

pub use merge::{MergeArgs, MergeError};
