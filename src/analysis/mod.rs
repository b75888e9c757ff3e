//! Ambiguity aggregation and corpus query operations
//!
//! Three read operations over the scanned mention stream, all consulting
//! the resolvers to normalize raw references into canonical targets:
//!
//! - [`find_ambiguous_entities`]: per-surface-form target frequencies with
//!   early exit once enough forms are confirmed ambiguous
//! - [`find_annotations`]: every (form, document) pair mapping to a target
//! - [`find_synonyms`]: every surface form referring to a target, with the
//!   documents it appears in
//!
//! Scans run file by file in the given order, line by line within a file.
//! The current document is an explicit accumulator reset at each file
//! boundary; a mention preceding any `URL` line belongs to the
//! empty-string document.

use crate::corpus::{Record, ShardReader};
use crate::error::Result;
use crate::resolver::{RedirectResolver, SynonymResolver};
use crate::title::title_from_reference;
use std::collections::{BTreeMap, HashSet};
use std::path::PathBuf;

/// Canonical target URL mapped to its mention count, for one surface form
pub type TargetCounts = BTreeMap<String, u32>;

/// One confirmed-ambiguous surface form with its target frequencies
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AmbiguityRecord {
    pub surface_form: String,
    pub targets: TargetCounts,
}

/// Result of an ambiguity scan
#[derive(Debug)]
pub struct AmbiguousEntities {
    /// Confirmed forms in confirmation order (first found in scan order)
    pub records: Vec<AmbiguityRecord>,

    /// False when the corpus ran out before `n_wanted` confirmations
    pub complete: bool,
}

/// Find surface forms whose mentions split across popular targets
///
/// A form is ambiguous once at least `k_ann` of its canonical targets have
/// each accumulated `threshold` mentions. Scanning stops entirely, files
/// and lines included, the moment `n_wanted` forms are confirmed; this is
/// an early-exit policy, not a ranking. If the corpus is exhausted first,
/// the shortfall is logged and reported through `complete`, never an error.
pub async fn find_ambiguous_entities(
    n_wanted: usize,
    files: &[PathBuf],
    threshold: u32,
    k_ann: usize,
    resolver: &mut RedirectResolver,
) -> Result<AmbiguousEntities> {
    let mut counts: BTreeMap<String, TargetCounts> = BTreeMap::new();
    let mut confirmed: Vec<String> = Vec::new();
    let mut confirmed_set: HashSet<String> = HashSet::new();

    'scan: for file in files {
        for record in ShardReader::open(file)? {
            let Record::Mention {
                surface_form,
                reference_url,
            } = record?
            else {
                continue;
            };

            let target = resolver.resolve_canonical_url(&reference_url).await?;
            let form_counts = counts.entry(surface_form.clone()).or_default();
            *form_counts.entry(target).or_insert(0) += 1;

            if !confirmed_set.contains(&surface_form)
                && is_ambiguous(form_counts, threshold, k_ann)
            {
                tracing::info!(form = %surface_form, "Confirmed ambiguous surface form");
                confirmed_set.insert(surface_form.clone());
                confirmed.push(surface_form);
                if confirmed.len() >= n_wanted {
                    break 'scan;
                }
            }
        }
    }

    let complete = confirmed.len() >= n_wanted;
    if !complete {
        tracing::warn!(
            wanted = n_wanted,
            found = confirmed.len(),
            "Not enough ambiguous entities found"
        );
    }

    let records = confirmed
        .into_iter()
        .map(|surface_form| {
            let targets = counts.remove(&surface_form).unwrap_or_default();
            AmbiguityRecord {
                surface_form,
                targets,
            }
        })
        .collect();

    Ok(AmbiguousEntities { records, complete })
}

/// Does this form have `k_ann` targets at or above the mention threshold?
fn is_ambiguous(targets: &TargetCounts, threshold: u32, k_ann: usize) -> bool {
    targets.len() >= k_ann
        && targets
            .values()
            .filter(|&&count| count >= threshold)
            .take(k_ann)
            .count()
            >= k_ann
}

/// Collect every (form, document) pair annotated with each canonical target
///
/// Only mentions whose surface form is in `forms` are considered. Lists
/// are in scan order with duplicates retained.
pub async fn find_annotations(
    forms: &[String],
    files: &[PathBuf],
    resolver: &mut RedirectResolver,
) -> Result<BTreeMap<String, Vec<(String, String)>>> {
    let wanted: HashSet<&str> = forms.iter().map(String::as_str).collect();
    let mut annotations: BTreeMap<String, Vec<(String, String)>> = BTreeMap::new();

    for file in files {
        let mut current_document = String::new();
        for record in ShardReader::open(file)? {
            match record? {
                Record::DocumentBoundary { document_url } => {
                    current_document = document_url;
                }
                Record::Mention {
                    surface_form,
                    reference_url,
                } => {
                    if !wanted.contains(surface_form.as_str()) {
                        continue;
                    }
                    let target = resolver.resolve_canonical_url(&reference_url).await?;
                    annotations
                        .entry(target)
                        .or_default()
                        .push((surface_form, current_document.clone()));
                }
            }
        }
    }

    Ok(annotations)
}

/// Collect the documents in which each surface form refers to a target
///
/// The target's synonym set (canonical title plus redirect titles) is
/// resolved once; a mention refers to the target when its normalized title
/// is a member. Document lists are in scan order with duplicates retained.
pub async fn find_synonyms(
    target_reference: &str,
    files: &[PathBuf],
    resolver: &mut SynonymResolver,
) -> Result<BTreeMap<String, Vec<String>>> {
    let synonym_set: HashSet<String> = resolver
        .resolve_synonyms(target_reference)
        .await?
        .into_iter()
        .collect();
    let mut forms: BTreeMap<String, Vec<String>> = BTreeMap::new();

    for file in files {
        let mut current_document = String::new();
        for record in ShardReader::open(file)? {
            match record? {
                Record::DocumentBoundary { document_url } => {
                    current_document = document_url;
                }
                Record::Mention {
                    surface_form,
                    reference_url,
                } => {
                    let title = title_from_reference(&reference_url)?;
                    if synonym_set.contains(&title) {
                        forms
                            .entry(surface_form)
                            .or_default()
                            .push(current_document.clone());
                    }
                }
            }
        }
    }

    Ok(forms)
}

/// The `k` most-mentioned targets of an ambiguity record
///
/// Ties break on title order for reproducibility.
pub fn top_targets(targets: &TargetCounts, k: usize) -> Vec<String> {
    let mut ranked: Vec<(&String, &u32)> = targets.iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
    ranked.into_iter().take(k).map(|(url, _)| url.clone()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(pairs: &[(&str, u32)]) -> TargetCounts {
        pairs
            .iter()
            .map(|(url, n)| (url.to_string(), *n))
            .collect()
    }

    #[test]
    fn test_is_ambiguous_requires_k_popular_targets() {
        let targets = counts(&[("https://x/wiki/A", 5), ("https://x/wiki/B", 4)]);
        assert!(!is_ambiguous(&targets, 5, 2));

        let targets = counts(&[("https://x/wiki/A", 5), ("https://x/wiki/B", 5)]);
        assert!(is_ambiguous(&targets, 5, 2));
    }

    #[test]
    fn test_is_ambiguous_single_popular_target_is_not_ambiguous() {
        let targets = counts(&[("https://x/wiki/A", 100)]);
        assert!(!is_ambiguous(&targets, 5, 2));
    }

    #[test]
    fn test_top_targets_orders_by_count_then_title() {
        let targets = counts(&[
            ("https://x/wiki/A", 3),
            ("https://x/wiki/B", 7),
            ("https://x/wiki/C", 3),
        ]);
        assert_eq!(
            top_targets(&targets, 2),
            vec!["https://x/wiki/B".to_string(), "https://x/wiki/A".to_string()]
        );
    }

    #[test]
    fn test_top_targets_k_larger_than_targets() {
        let targets = counts(&[("https://x/wiki/A", 1)]);
        assert_eq!(top_targets(&targets, 5).len(), 1);
    }
}
