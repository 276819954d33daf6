//! Verifywm command implementation.

use std::path::PathBuf;

use anyhow::{Context, Result};
use stegatool_core::{BatchKey, Roster, Verifier};
use tracing::debug;

/// Execute the verifywm command.
///
/// Prints one `{file} -> "{name}"` line per scanned image as soon as it is
/// classified. Images whose marker cannot be recovered never fail the
/// command.
pub fn execute(input_dir: PathBuf, key: String, people_file: PathBuf) -> Result<()> {
    let roster = Roster::load(&people_file)
        .with_context(|| format!("Failed to read people file: {}", people_file.display()))?;
    let key = BatchKey::decode(&key).context("Invalid -key value")?;
    debug!(recipients = roster.len(), "Loaded people file and key");

    let verifier = Verifier::new(roster, key);
    verifier
        .verify_each(&input_dir, |entry| println!("{entry}"))
        .with_context(|| format!("Failed to verify images in {}", input_dir.display()))?;

    Ok(())
}
