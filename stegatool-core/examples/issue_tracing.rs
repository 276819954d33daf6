//! Example demonstrating issuance and verification with tracing enabled.
//!
//! Run with: cargo run -p stegatool-core --example issue_tracing

use image::{ImageBuffer, Rgb, RgbImage};
use stegatool_core::{issue_batch, IssuanceConfig, Roster, Verifier};
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing subscriber with debug level
    fmt()
        .with_env_filter(EnvFilter::new("stegatool_core=debug,info"))
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();

    println!("=== StegaTool Tracing Demo ===\n");

    let input = tempfile::tempdir()?;
    let output = tempfile::tempdir()?;

    let img: RgbImage = ImageBuffer::from_fn(480, 120, |x, y| {
        Rgb([(x % 256) as u8, (y * 2) as u8, 96])
    });
    img.save(input.path().join("photo.png"))?;

    let roster = Roster::from_text("alice\nbob");
    let config = IssuanceConfig::new(input.path(), roster.clone(), output.path());
    let report = issue_batch(&config)?;

    println!("\nWatermark key: {}", report.key.encode());
    println!("Outputs: {}\n", report.outputs.len());

    let verifier = Verifier::new(roster, report.key);
    for entry in verifier.verify_dir(output.path())? {
        println!("{entry}");
    }

    Ok(())
}
