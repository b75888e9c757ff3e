use anyhow::Result;
use std::path::PathBuf;

use crate::analysis::{find_ambiguous_entities, top_targets};
use crate::api::WikiClient;
use crate::config::Config;
use crate::corpus::validate_corpus_dir;
use crate::report::write_mentions;
use crate::resolver::RedirectResolver;

/// Scan the corpus for ambiguous surface forms and write the mentions report
pub async fn ambiguous(
    config: Config,
    corpus: PathBuf,
    count: usize,
    threshold: u32,
    k_ann: usize,
    output: PathBuf,
) -> Result<()> {
    let files = validate_corpus_dir(&corpus)?;

    let client = WikiClient::new(&config.api)?;
    let mut resolver = RedirectResolver::new(client, config.cache.capacity);

    let result = find_ambiguous_entities(count, &files, threshold, k_ann, &mut resolver).await?;

    if !result.complete {
        println!(
            "Not enough ambiguous entities found. Required {}, found {}",
            count,
            result.records.len()
        );
    }

    write_mentions(&result.records, &output)?;
    println!("Ambiguous entities: {}", result.records.len());
    for record in &result.records {
        println!(
            "  {}\tmost popular: {}",
            record.surface_form,
            top_targets(&record.targets, k_ann).join(", ")
        );
    }
    println!("Report written to {}", output.display());
    Ok(())
}
