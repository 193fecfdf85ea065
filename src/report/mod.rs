//! Renderers for search results.
//!
//! - [`terminal`] — one block per dependency listing the files it appears in.
//! - JSON output is produced directly from [`crate::discovery::DiscoveryMap`]'s
//!   `Serialize` impl.

pub mod terminal;
