//! Built-site audit.
//!
//! Provides:
//! - Document providers that enumerate a built site's HTML pages
//! - The duplicate tag-loader scan over those pages

pub mod provider;
pub mod scanner;
