//! Redirect and synonym resolution over the MediaWiki API
//!
//! Both resolvers memoize by the exact raw reference string, so repeated
//! mentions of the same URL in the corpus cost one API round trip. The
//! cache is a bounded LRU injected at construction; see [`crate::cache`].

use crate::api::WikiClient;
use crate::cache::LruCache;
use crate::error::Result;
use crate::title::{article_url, title_from_reference};

/// Resolves raw article references to canonical titles, following redirects
pub struct RedirectResolver {
    client: WikiClient,
    cache: LruCache<String, String>,
}

impl RedirectResolver {
    /// Create a resolver with a cache of the given capacity
    pub fn new(client: WikiClient, cache_capacity: usize) -> Self {
        Self {
            client,
            cache: LruCache::new(cache_capacity),
        }
    }

    /// Resolve a raw reference to its canonical display title
    ///
    /// Normalizes the reference's final path segment, then asks the API to
    /// follow redirects. Memoized by the raw reference string.
    pub async fn resolve_canonical(&mut self, reference: &str) -> Result<String> {
        if let Some(hit) = self.cache.get(reference) {
            tracing::trace!(reference = %reference, "Redirect cache hit");
            return Ok(hit.clone());
        }

        let title = title_from_reference(reference)?;
        let canonical = self.client.resolve_title(&title).await?;

        self.cache.put(reference.to_string(), canonical.clone());
        Ok(canonical)
    }

    /// Resolve a raw reference to the canonical article URL form
    pub async fn resolve_canonical_url(&mut self, reference: &str) -> Result<String> {
        let canonical = self.resolve_canonical(reference).await?;
        Ok(article_url(&canonical))
    }

    /// Access the underlying API client
    pub fn client(&self) -> &WikiClient {
        &self.client
    }
}

/// Resolves the synonym set of a target: the canonical title plus every
/// title known to redirect to it
pub struct SynonymResolver {
    redirects: RedirectResolver,
    backlink_limit: u32,
    cache: LruCache<String, Vec<String>>,
}

impl SynonymResolver {
    /// Create a resolver with a cache of the given capacity
    ///
    /// `backlink_limit` caps how many redirect titles one backlink query
    /// returns; targets with more redirects lose the excess.
    pub fn new(redirects: RedirectResolver, backlink_limit: u32, cache_capacity: usize) -> Self {
        Self {
            redirects,
            backlink_limit,
            cache: LruCache::new(cache_capacity),
        }
    }

    /// Resolve the synonym set for a raw reference
    ///
    /// The canonical title itself is always a member. Memoized by the raw
    /// reference string.
    pub async fn resolve_synonyms(&mut self, reference: &str) -> Result<Vec<String>> {
        if let Some(hit) = self.cache.get(reference) {
            tracing::trace!(reference = %reference, "Synonym cache hit");
            return Ok(hit.clone());
        }

        let canonical = self.redirects.resolve_canonical(reference).await?;
        let mut synonyms = self
            .redirects
            .client()
            .redirect_backlinks(&canonical, self.backlink_limit)
            .await?;
        synonyms.push(canonical);

        self.cache.put(reference.to_string(), synonyms.clone());
        Ok(synonyms)
    }
}
