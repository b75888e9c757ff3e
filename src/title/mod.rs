//! Title normalization for encyclopedia article references
//!
//! Corpus reference URLs arrive percent-encoded, sometimes more than once.
//! [`unquote_fully`] decodes to a fixed point with a hard round bound,
//! and [`title_from_reference`] maps a raw reference URL to a display
//! title (spaces, no percent escapes). Both are pure, no I/O.

use crate::error::{Error, Result};

/// Maximum percent-decoding rounds before the input is considered malformed
pub const MAX_DECODE_ROUNDS: u32 = 10;

/// Article URL prefix used when wrapping a canonical title back into a URL
pub const ARTICLE_URL_PREFIX: &str = "https://en.wikipedia.org/wiki/";

/// Percent-decode `s` repeatedly until no further change occurs
///
/// Nested encodings (`%2520` for an escaped space) need more than one
/// round. The output is a fixed point: decoding it again changes nothing.
/// A sequence that is not valid UTF-8 after decoding stops the loop, since
/// no further decoding is possible.
///
/// # Errors
///
/// Returns [`Error::DecodeLoop`] if the value keeps changing after
/// [`MAX_DECODE_ROUNDS`] rounds.
pub fn unquote_fully(s: &str) -> Result<String> {
    let mut current = s.to_string();
    for _ in 0..MAX_DECODE_ROUNDS {
        let decoded = match urlencoding::decode(&current) {
            Ok(decoded) => decoded.into_owned(),
            Err(_) => return Ok(current),
        };
        if decoded == current {
            return Ok(current);
        }
        current = decoded;
    }
    Err(Error::DecodeLoop {
        input: s.to_string(),
        rounds: MAX_DECODE_ROUNDS,
    })
}

/// Derive a display title from a raw article reference URL
///
/// Takes the final path segment, fully percent-decodes it, and replaces
/// underscores with spaces. `https://en.wikipedia.org/wiki/Vladimir_Putin`
/// becomes `Vladimir Putin`.
pub fn title_from_reference(reference: &str) -> Result<String> {
    let segment = reference.rsplit('/').next().unwrap_or(reference);
    let decoded = unquote_fully(segment)?;
    Ok(decoded.replace('_', " "))
}

/// Wrap a canonical display title back into its article URL form
pub fn article_url(title: &str) -> String {
    format!("{}{}", ARTICLE_URL_PREFIX, title.replace(' ', "_"))
}
