//! Verification: recover and check the recipient of suspect images.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::cipher::{self, BatchKey};
use crate::error::{Result, StegaError};
use crate::marker;
use crate::metadata::{read_text_field, WATERMARK_FIELD};
use crate::roster::Roster;
use crate::scan::scan_images;

/// Message shown for every undetermined image, whatever the cause.
pub const UNDETERMINED_MESSAGE: &str =
    "No Watermark Detected or Watermark Not Issued to Anyone in the List!";

/// Why no identity could be recovered. Kept for diagnostics only; all
/// causes render as [`UNDETERMINED_MESSAGE`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UndeterminedCause {
    /// No `watermark` field, or the container could not be parsed.
    Absent,
    /// Bad token, wrong key or tampering.
    DecryptFailed,
    /// Decrypted payload is not a marker with a non-empty name.
    MalformedMarker,
    /// Recovered name is not on the roster.
    NotInRoster,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerificationOutcome {
    Identified(String),
    Undetermined(UndeterminedCause),
}

impl VerificationOutcome {
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Identified(name) => Some(name),
            Self::Undetermined(_) => None,
        }
    }

    pub fn is_identified(&self) -> bool {
        matches!(self, Self::Identified(_))
    }
}

impl fmt::Display for VerificationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Identified(name) => f.write_str(name),
            Self::Undetermined(_) => f.write_str(UNDETERMINED_MESSAGE),
        }
    }
}

/// Outcome for one scanned file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationEntry {
    pub file_name: String,
    pub path: PathBuf,
    pub outcome: VerificationOutcome,
}

impl fmt::Display for VerificationEntry {
    /// `{file_name} -> "{name or message}"`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> \"{}\"", self.file_name, self.outcome)
    }
}

/// Checks images against a roster under one operator-supplied key.
#[derive(Debug)]
pub struct Verifier {
    roster: Roster,
    key: BatchKey,
}

impl Verifier {
    pub fn new(roster: Roster, key: BatchKey) -> Self {
        Self { roster, key }
    }

    /// Classify an in-memory image. `label` only appears in log output.
    ///
    /// Never fails: every problem with the embedded marker becomes an
    /// [`UndeterminedCause`].
    pub fn verify_bytes(&self, label: &str, bytes: &[u8]) -> VerificationOutcome {
        let token = match read_text_field(bytes, WATERMARK_FIELD) {
            Ok(Some(token)) if !token.is_empty() => token,
            Ok(_) => {
                debug!(file = label, "No watermark field");
                return VerificationOutcome::Undetermined(UndeterminedCause::Absent);
            }
            Err(e) => {
                warn!(file = label, error = %e, "Unreadable image container");
                return VerificationOutcome::Undetermined(UndeterminedCause::Absent);
            }
        };

        let plaintext = match cipher::decrypt(&self.key, &token) {
            Ok(plaintext) => plaintext,
            Err(e) => {
                warn!(file = label, error = %e, "Error decrypting watermark");
                return VerificationOutcome::Undetermined(UndeterminedCause::DecryptFailed);
            }
        };

        let Ok(text) = String::from_utf8(plaintext) else {
            warn!(file = label, "Decrypted watermark is not UTF-8");
            return VerificationOutcome::Undetermined(UndeterminedCause::MalformedMarker);
        };

        let Some(name) = marker::parse_strict(&text) else {
            warn!(file = label, "Decrypted watermark is not a valid marker");
            return VerificationOutcome::Undetermined(UndeterminedCause::MalformedMarker);
        };

        if self.roster.contains(name) {
            VerificationOutcome::Identified(name.to_owned())
        } else {
            debug!(file = label, name, "Recovered name is not on the roster");
            VerificationOutcome::Undetermined(UndeterminedCause::NotInRoster)
        }
    }

    /// Read and classify one file. Only a failed read is an error.
    pub fn verify_file(&self, path: &Path) -> Result<VerificationOutcome> {
        let bytes = fs::read(path).map_err(|e| StegaError::read(path, e))?;
        Ok(self.verify_bytes(&path.display().to_string(), &bytes))
    }

    /// Classify every recognized image in `dir`, handing each entry to
    /// `visit` as soon as it is produced. Returns the number of entries.
    ///
    /// A failed read stops the scan; entries visited before it stay visited.
    pub fn verify_each<F>(&self, dir: &Path, mut visit: F) -> Result<usize>
    where
        F: FnMut(VerificationEntry),
    {
        let images = scan_images(dir)?;
        info!(dir = %dir.display(), images = images.len(), "Starting verification");

        let (mut scanned, mut identified) = (0usize, 0usize);
        for image in images {
            let outcome = self.verify_file(&image.path)?;
            debug!(file = %image.file_name, outcome = ?outcome, "Verified image");
            if outcome.is_identified() {
                identified += 1;
            }
            scanned += 1;
            visit(VerificationEntry {
                file_name: image.file_name,
                path: image.path,
                outcome,
            });
        }

        info!(scanned, identified, "Verification complete");
        Ok(scanned)
    }

    /// Classify every recognized image in `dir`, one entry per file.
    pub fn verify_dir(&self, dir: &Path) -> Result<Vec<VerificationEntry>> {
        let mut entries = Vec::new();
        self.verify_each(dir, |entry| entries.push(entry))?;
        Ok(entries)
    }
}
