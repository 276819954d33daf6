//! Marker codec.
//!
//! A marker is the plaintext identity string stamped on every issued copy,
//! both as visible overlay text and (encrypted) as container metadata.

/// Fixed prefix in front of every recipient name.
pub const MARKER_PREFIX: &str = "Watermarked for ";

/// Build the marker for a recipient. No escaping is applied.
pub fn build(name: &str) -> String {
    format!("{MARKER_PREFIX}{name}")
}

/// Strip exactly one leading [`MARKER_PREFIX`].
///
/// Input without the prefix is returned unchanged.
pub fn parse(marker: &str) -> &str {
    marker.strip_prefix(MARKER_PREFIX).unwrap_or(marker)
}

/// Like [`parse`], but only yields a name when the prefix is present and the
/// remaining name is not empty. Whitespace-only names are kept as issued.
pub fn parse_strict(marker: &str) -> Option<&str> {
    marker
        .strip_prefix(MARKER_PREFIX)
        .filter(|name| !name.is_empty())
}
