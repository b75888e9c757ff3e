//! Wikilinks corpus scanning
//!
//! A corpus is ten tab-separated shard files named
//! `data-0000{0..9}-of-00010`. The first three characters of a line act as
//! a record-type tag: `URL` marks a document boundary, `MEN` a mention
//! inside the most recent document, and anything else is skipped.
//!
//! [`ShardReader`] streams one shard at a time; each file is opened,
//! read line by line, and closed before the next begins. The "current
//! document" is deliberately not tracked here: callers carry it as an
//! explicit accumulator reset at every file boundary, so per-file scans
//! stay independent.

use crate::error::{Error, Result};
use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::{Path, PathBuf};

/// Number of shard files in a corpus directory
pub const SHARD_COUNT: usize = 10;

/// One classified corpus line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Record {
    /// `URL\t<document_url>` - document context for subsequent mentions
    DocumentBoundary { document_url: String },

    /// `MEN\t...\t<surface_form>\t...\t<reference_url>` - one entity mention
    Mention {
        surface_form: String,
        reference_url: String,
    },
}

/// Streaming reader over one corpus shard
///
/// Yields `Result<Record>` in line order, skipping lines that carry
/// neither tag. Malformed tagged lines yield [`Error::Parse`] naming the
/// file and line number.
pub struct ShardReader {
    path: PathBuf,
    lines: Lines<BufReader<File>>,
    line_no: usize,
}

impl ShardReader {
    /// Open a shard for scanning
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        tracing::debug!(file = %path.display(), "Scanning corpus shard");
        Ok(Self {
            path: path.to_path_buf(),
            lines: BufReader::new(file).lines(),
            line_no: 0,
        })
    }

    fn parse_line(&self, line: &str) -> Result<Option<Record>> {
        if line.starts_with("URL") {
            let fields: Vec<&str> = line.split('\t').collect();
            if fields.len() < 2 {
                return Err(self.malformed("URL", 2, fields.len()));
            }
            Ok(Some(Record::DocumentBoundary {
                document_url: fields[1].to_string(),
            }))
        } else if line.starts_with("MEN") {
            let fields: Vec<&str> = line.split('\t').collect();
            // Four fields minimum, so the third-from-last can never be the
            // tag itself.
            if fields.len() < 4 {
                return Err(self.malformed("MEN", 4, fields.len()));
            }
            Ok(Some(Record::Mention {
                surface_form: fields[fields.len() - 3].to_string(),
                reference_url: fields[fields.len() - 1].to_string(),
            }))
        } else {
            Ok(None)
        }
    }

    fn malformed(&self, tag: &'static str, expected: usize, got: usize) -> Error {
        Error::Parse {
            file: self.path.clone(),
            line: self.line_no,
            tag,
            expected,
            got,
        }
    }
}

impl Iterator for ShardReader {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(e) => return Some(Err(e.into())),
            };
            self.line_no += 1;
            match self.parse_line(&line) {
                Ok(Some(record)) => return Some(Ok(record)),
                Ok(None) => continue,
                Err(e) => return Some(Err(e)),
            }
        }
    }
}

/// Expected shard paths for a corpus directory, in scan order
pub fn shard_files(dir: &Path) -> Vec<PathBuf> {
    (0..SHARD_COUNT)
        .map(|i| dir.join(format!("data-0000{i}-of-00010")))
        .collect()
}

/// Check that the corpus directory and all ten shards exist
///
/// # Errors
///
/// Returns [`Error::DirectoryNotFound`] if `dir` is not a directory, or
/// [`Error::MissingShard`] naming the first absent shard.
pub fn validate_corpus_dir(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(Error::DirectoryNotFound(dir.to_path_buf()));
    }
    let files = shard_files(dir);
    for file in &files {
        if !file.exists() {
            return Err(Error::MissingShard(file.clone()));
        }
    }
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn shard_with(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_classifies_records_in_order() {
        let file = shard_with(
            "URL\thttp://example.com/doc1\textra\n\
             MEN\t42\tPutin\tcontext\thttp://en.wikipedia.org/wiki/Putin\n\
             some other line\n\
             MEN\t7\tVVP\tcontext\thttp://en.wikipedia.org/wiki/VVP\n",
        );

        let records: Vec<Record> = ShardReader::open(file.path())
            .unwrap()
            .collect::<Result<_>>()
            .unwrap();

        assert_eq!(
            records,
            vec![
                Record::DocumentBoundary {
                    document_url: "http://example.com/doc1".into()
                },
                Record::Mention {
                    surface_form: "Putin".into(),
                    reference_url: "http://en.wikipedia.org/wiki/Putin".into()
                },
                Record::Mention {
                    surface_form: "VVP".into(),
                    reference_url: "http://en.wikipedia.org/wiki/VVP".into()
                },
            ]
        );
    }

    #[test]
    fn test_surface_form_is_third_from_last_field() {
        // Real shards carry variable context columns between the form and
        // the reference URL.
        let file = shard_with("MEN\toffset\tleft ctx\tObama\tright ctx\thttp://x/wiki/Barack_Obama\n");
        let records: Vec<Record> = ShardReader::open(file.path())
            .unwrap()
            .collect::<Result<_>>()
            .unwrap();
        assert_eq!(
            records[0],
            Record::Mention {
                surface_form: "Obama".into(),
                reference_url: "http://x/wiki/Barack_Obama".into()
            }
        );
    }

    #[test]
    fn test_malformed_mention_line_fails_with_location() {
        let file = shard_with("URL\thttp://example.com/doc1\nMEN\tonly_two\n");
        let result: Result<Vec<Record>> = ShardReader::open(file.path()).unwrap().collect();

        match result {
            Err(Error::Parse { line, tag, got, .. }) => {
                assert_eq!(line, 2);
                assert_eq!(tag, "MEN");
                assert_eq!(got, 2);
            }
            other => panic!("expected Parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_malformed_url_line_fails() {
        let file = shard_with("URL_without_tab\n");
        let result: Result<Vec<Record>> = ShardReader::open(file.path()).unwrap().collect();
        assert!(matches!(result, Err(Error::Parse { tag: "URL", .. })));
    }

    #[test]
    fn test_untagged_lines_skipped() {
        let file = shard_with("TOKEN\tfoo\tbar\n\n# comment\n");
        let records: Vec<Record> = ShardReader::open(file.path())
            .unwrap()
            .collect::<Result<_>>()
            .unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_classification_uses_first_three_chars_only() {
        // Anything starting with the MEN tag is treated as a mention record
        let file = shard_with("MENTION COUNT: 3\n");
        let result: Result<Vec<Record>> = ShardReader::open(file.path()).unwrap().collect();
        assert!(matches!(result, Err(Error::Parse { tag: "MEN", got: 1, .. })));
    }

    #[test]
    fn test_shard_files_naming() {
        let files = shard_files(Path::new("/corpus"));
        assert_eq!(files.len(), SHARD_COUNT);
        assert_eq!(files[0], PathBuf::from("/corpus/data-00000-of-00010"));
        assert_eq!(files[9], PathBuf::from("/corpus/data-00009-of-00010"));
    }

    #[test]
    fn test_validate_missing_directory() {
        let result = validate_corpus_dir(Path::new("/definitely/not/there"));
        assert!(matches!(result, Err(Error::DirectoryNotFound(_))));
    }

    #[test]
    fn test_validate_missing_shard() {
        let dir = tempfile::tempdir().unwrap();
        // Create all shards except the last
        for file in shard_files(dir.path()).iter().take(SHARD_COUNT - 1) {
            File::create(file).unwrap();
        }
        let result = validate_corpus_dir(dir.path());
        match result {
            Err(Error::MissingShard(path)) => {
                assert!(path.ends_with("data-00009-of-00010"));
            }
            other => panic!("expected MissingShard, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_complete_corpus() {
        let dir = tempfile::tempdir().unwrap();
        for file in shard_files(dir.path()) {
            File::create(file).unwrap();
        }
        let files = validate_corpus_dir(dir.path()).unwrap();
        assert_eq!(files.len(), SHARD_COUNT);
    }
}
