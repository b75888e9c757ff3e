use anyhow::Result;
use std::path::PathBuf;

use crate::analysis::find_annotations;
use crate::api::WikiClient;
use crate::config::Config;
use crate::corpus::validate_corpus_dir;
use crate::report::write_annotations;
use crate::resolver::RedirectResolver;

/// Collect every annotation of the given surface forms and write the
/// ambiguous-entity report
pub async fn annotations(
    config: Config,
    corpus: PathBuf,
    forms: Vec<String>,
    output: PathBuf,
) -> Result<()> {
    let files = validate_corpus_dir(&corpus)?;

    let client = WikiClient::new(&config.api)?;
    let mut resolver = RedirectResolver::new(client, config.cache.capacity);

    let result = find_annotations(&forms, &files, &mut resolver).await?;

    write_annotations(&result, &output)?;
    println!("Targets annotated by {:?}: {}", forms, result.len());
    println!("Report written to {}", output.display());
    Ok(())
}
