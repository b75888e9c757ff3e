use anyhow::Result;
use std::path::PathBuf;

use crate::analysis::find_synonyms;
use crate::api::WikiClient;
use crate::config::Config;
use crate::corpus::validate_corpus_dir;
use crate::report::write_forms;
use crate::resolver::{RedirectResolver, SynonymResolver};

/// Collect the surface forms mentioning a target article and write the
/// forms report
pub async fn synonyms(
    config: Config,
    corpus: PathBuf,
    url: String,
    output: PathBuf,
) -> Result<()> {
    let files = validate_corpus_dir(&corpus)?;

    let client = WikiClient::new(&config.api)?;
    let redirects = RedirectResolver::new(client, config.cache.capacity);
    let mut resolver = SynonymResolver::new(
        redirects,
        config.api.backlink_limit,
        config.cache.capacity,
    );

    let result = find_synonyms(&url, &files, &mut resolver).await?;

    write_forms(&result, &output)?;
    println!("Surface forms referring to {url}: {}", result.len());
    println!("Report written to {}", output.display());
    Ok(())
}
