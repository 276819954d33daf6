//! Recipient roster.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{Result, StegaError};

/// Ordered list of recipient names, one per line of the source text.
///
/// Duplicates and blank lines are kept as-is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Roster {
    names: Vec<String>,
}

impl Roster {
    /// Load a roster from a UTF-8 text file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| StegaError::read(path, e))?;
        let roster = Self::from_text(&text);
        debug!(path = %path.display(), entries = roster.len(), "Loaded roster");
        Ok(roster)
    }

    /// Split `text` into lines. `\n` and `\r\n` both end a line; a trailing
    /// terminator does not produce an extra entry.
    pub fn from_text(text: &str) -> Self {
        Self {
            names: text.lines().map(str::to_owned).collect(),
        }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|entry| entry == name)
    }
}

impl<S: Into<String>> FromIterator<S> for Roster {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().map(Into::into).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_text_preserves_order_duplicates_and_blanks() {
        let roster = Roster::from_text("alice\nbob\n\nalice\n");
        assert_eq!(roster.names(), ["alice", "bob", "", "alice"]);
    }

    #[test]
    fn test_from_text_handles_crlf() {
        let roster = Roster::from_text("alice\r\nbob");
        assert_eq!(roster.names(), ["alice", "bob"]);
    }

    #[test]
    fn test_empty_text() {
        assert!(Roster::from_text("").is_empty());
    }

    #[test]
    fn test_contains_is_exact() {
        let roster: Roster = ["alice", "bob"].into_iter().collect();
        assert!(roster.contains("alice"));
        assert!(!roster.contains("Alice"));
        assert!(!roster.contains("ali"));
    }

    #[test]
    fn test_load_missing_file() {
        let err = Roster::load(Path::new("/nonexistent/people.txt")).unwrap_err();
        assert!(matches!(err, StegaError::Read { .. }));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("people.txt");
        fs::write(&path, "alice\nbob").unwrap();
        assert_eq!(Roster::load(&path).unwrap().names(), ["alice", "bob"]);
    }
}
