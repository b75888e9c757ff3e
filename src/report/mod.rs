//! Flat-file report writers
//!
//! Serializes the three analysis outputs to tab-separated text files. The
//! shapes are fixed: downstream tooling greps these by the leading tag.

use crate::analysis::AmbiguityRecord;
use crate::error::Result;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Write the mentions report: per entity, its target mention counts
///
/// ```text
/// ENTITY\t<form>
/// ANNOTATION\t<url>\t<count>
/// ```
/// with two blank lines between entities.
pub fn write_mentions(records: &[AmbiguityRecord], path: &Path) -> Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    for record in records {
        writeln!(out, "ENTITY\t{}", record.surface_form)?;
        for (url, count) in &record.targets {
            writeln!(out, "ANNOTATION\t{url}\t{count}")?;
        }
        writeln!(out)?;
        writeln!(out)?;
    }
    out.flush()?;
    tracing::info!(path = %path.display(), entities = records.len(), "Wrote mentions report");
    Ok(())
}

/// Write the ambiguous-entity report: per target, its mention list
///
/// ```text
///
/// ANNOTATION\t<url>
/// MENTION\t<form>\t<document>
/// ```
pub fn write_annotations(
    annotations: &BTreeMap<String, Vec<(String, String)>>,
    path: &Path,
) -> Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    for (url, mentions) in annotations {
        writeln!(out)?;
        writeln!(out, "ANNOTATION\t{url}")?;
        for (form, document) in mentions {
            writeln!(out, "MENTION\t{form}\t{document}")?;
        }
    }
    out.flush()?;
    tracing::info!(path = %path.display(), targets = annotations.len(), "Wrote annotation report");
    Ok(())
}

/// Write the forms report: per surface form, its document list
///
/// ```text
/// FORM\t<form>
/// MENTION\t<document>
/// ```
/// with a blank line after each form.
pub fn write_forms(forms: &BTreeMap<String, Vec<String>>, path: &Path) -> Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    for (form, documents) in forms {
        writeln!(out, "FORM\t{form}")?;
        for document in documents {
            writeln!(out, "MENTION\t{document}")?;
        }
        writeln!(out)?;
    }
    out.flush()?;
    tracing::info!(path = %path.display(), forms = forms.len(), "Wrote forms report");
    Ok(())
}
