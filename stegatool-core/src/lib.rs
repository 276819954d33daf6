//! StegaTool Core - per-recipient image watermarking library
//!
//! This crate stamps copies of images with the identity of the recipient they
//! were issued to, and recovers that identity from a suspect copy later.
//!
//! # Features
//!
//! - Visible bottom-right text overlay (`Watermarked for {name}`)
//! - XChaCha20-Poly1305 encrypted marker stored in a PNG `tEXt` chunk
//! - One batch key per issuance run, wiped from memory on drop
//! - Verification against a roster with diagnosable "undetermined" causes
//!
//! The marker lives in container metadata, not in pixel data, so
//! re-encoding an issued image strips it.
//!
//! # Example
//!
//! ```no_run
//! use stegatool_core::{issue_batch, IssuanceConfig, Roster, Verifier};
//!
//! # fn example() -> stegatool_core::Result<()> {
//! let roster = Roster::from_text("alice\nbob");
//! let config = IssuanceConfig::new("photos", roster.clone(), "issued");
//! let report = issue_batch(&config)?;
//! println!("Watermark key: {}", report.key.encode());
//!
//! let verifier = Verifier::new(roster, report.key);
//! for entry in verifier.verify_dir("issued".as_ref())? {
//!     println!("{entry}");
//! }
//! # Ok(())
//! # }
//! ```

pub mod cipher;
pub mod error;
pub mod issue;
pub mod marker;
pub mod metadata;
pub mod overlay;
pub mod roster;
pub mod scan;
pub mod verify;

// Re-export main types for convenience
pub use cipher::{BatchKey, DecryptionError};
pub use error::{Result, StegaError};
pub use issue::{issue_batch, issue_batch_with_key, IssuanceConfig, IssuanceReport};
pub use marker::MARKER_PREFIX;
pub use metadata::WATERMARK_FIELD;
pub use overlay::{render_overlay, BitmapFace, GlyphFace, OverlayStyle};
pub use roster::Roster;
pub use scan::RECOGNIZED_EXTENSIONS;
pub use verify::{
    UndeterminedCause, VerificationEntry, VerificationOutcome, Verifier, UNDETERMINED_MESSAGE,
};

#[cfg(feature = "truetype")]
pub use overlay::TrueTypeFace;

#[cfg(test)]
mod tests {
    use super::*;

    /// Round trip through marker, cipher and marker again for every entry.
    #[test]
    fn test_marker_cipher_round_trip() {
        let roster = Roster::from_text("alice\nbob\nZoë O'Brien\nWatermarked for eve");
        let key = BatchKey::generate();

        for name in roster.names() {
            let token = cipher::encrypt(&key, marker::build(name).as_bytes())
                .expect("Failed to encrypt marker");
            let plaintext = cipher::decrypt(&key, &token).expect("Failed to decrypt marker");
            let text = String::from_utf8(plaintext).expect("Marker should be UTF-8");
            assert_eq!(marker::parse(&text), name);
        }
    }

    /// A token under one key never opens under another.
    #[test]
    fn test_cross_key_never_yields_a_name() {
        let k1 = BatchKey::generate();
        let k2 = BatchKey::generate();
        let token = cipher::encrypt(&k1, marker::build("alice").as_bytes()).unwrap();
        assert!(cipher::decrypt(&k2, &token).is_err());
    }
}
