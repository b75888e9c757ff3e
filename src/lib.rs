//! wikisense - Wikilinks entity-ambiguity analyzer
//!
//! A one-shot batch tool over the Wikilinks cross-document entity-linking
//! corpus. It cross-references mention URLs against the MediaWiki API to
//! find canonical titles and redirect synonyms, then reports surface forms
//! whose mentions split across multiple popular targets.
//!
//! # Architecture
//!
//! - [`config`] - Configuration with env-var overrides
//! - [`title`] - Percent-decoding and title normalization
//! - [`api`] - MediaWiki API client with rate limiting and retry
//! - [`cache`] - Bounded LRU memoization for lookups
//! - [`resolver`] - Redirect and synonym resolution over the API
//! - [`corpus`] - Shard enumeration, validation, line-oriented scanning
//! - [`analysis`] - Ambiguity aggregation and corpus query operations
//! - [`report`] - Flat-file report writers
//!
//! # Example
//!
//! ```no_run
//! use wikisense::api::WikiClient;
//! use wikisense::config::Config;
//! use wikisense::resolver::RedirectResolver;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     let client = WikiClient::new(&config.api)?;
//!     let mut resolver = RedirectResolver::new(client, config.cache.capacity);
//!     let title = resolver
//!         .resolve_canonical("http://en.wikipedia.org/wiki/VVP")
//!         .await?;
//!     println!("{title}");
//!     Ok(())
//! }
//! ```

pub mod analysis;
pub mod api;
pub mod cache;
pub mod commands;
pub mod config;
pub mod corpus;
pub mod error;
pub mod report;
pub mod resolver;
pub mod title;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::analysis::{AmbiguityRecord, AmbiguousEntities, TargetCounts};
    pub use crate::api::WikiClient;
    pub use crate::config::Config;
    pub use crate::corpus::Record;
    pub use crate::error::{Error, Result};
    pub use crate::resolver::{RedirectResolver, SynonymResolver};
}
