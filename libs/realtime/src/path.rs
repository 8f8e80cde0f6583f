use std::borrow::Cow;

use percent_encoding::percent_decode_str;

/// Derive a group key from a connection path: the last non-empty segment,
/// percent-decoded.
///
/// `/ws/collaborate/doc42` yields `doc42` and `/ws/collaborate/my%20doc`
/// yields `my doc`, matching the id an HTTP route extracts from the same
/// segment. Trailing slashes, a query string and a fragment are ignored.
/// The segment is not validated, so any trailing segment forms its own
/// group; invalid UTF-8 after decoding is replaced lossily.
pub fn group_key_from_path(path: &str) -> Option<Cow<'_, str>> {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let segment = path.split('/').rev().find(|segment| !segment.is_empty())?;
    Some(percent_decode_str(segment).decode_utf8_lossy())
}
