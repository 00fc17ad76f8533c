//! URL handling module for Fathom
//!
//! This module provides host extraction, same-origin comparison, and the
//! content-address keys used to index page records.

mod domain;
mod key;

// Re-export main functions
pub use domain::{extract_host, same_host};
pub use key::page_key;
