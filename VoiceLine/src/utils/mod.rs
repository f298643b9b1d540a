//! Utility functions

pub mod hash;
pub mod path;

pub use hash::stable_hash;
pub use path::{expand_tilde, file_name_string};
