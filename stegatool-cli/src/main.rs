//! StegaTool CLI - per-recipient image watermarking tool.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, CommandFactory, Parser, Subcommand};
use colored::Colorize;
use tracing_subscriber::EnvFilter;

mod commands;
mod exit_codes;
mod utils;

const ABOUT: &str =
    "StegaTool - A basic steganography tool for creating and verifying watermarks in images.";

const EXIT_CODES_HELP: &str = "\
Exit codes:
  0   Success
  1   General error
  64  Usage error (invalid arguments or key)
  65  Input image could not be decoded
  66  Input not found (people file, input directory, font)
  74  Output could not be written";

#[derive(Parser)]
#[command(name = "stegatool")]
#[command(
    author,
    version,
    about = ABOUT,
    long_about = None,
    after_help = EXIT_CODES_HELP
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Suppress hints on standard error
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create watermarks in images
    Createwm {
        /// Input directory containing the images to watermark
        #[arg(long = "inputdir", value_name = "DIR")]
        input_dir: PathBuf,

        /// File containing a list of people to issue the watermark to
        #[arg(long = "peoplefile", value_name = "FILE")]
        people_file: PathBuf,

        /// Output directory for the watermarked images
        #[arg(long = "outputdir", value_name = "DIR")]
        output_dir: PathBuf,

        /// TrueType/OpenType font for the overlay (built-in bitmap font if
        /// omitted)
        #[arg(long = "font", value_name = "TTF")]
        font: Option<PathBuf>,

        /// Overlay text size in pixels
        #[arg(
            long = "fontsize",
            value_name = "PX",
            default_value_t = 36.0,
            value_parser = utils::parse_font_size
        )]
        font_size: f32,
    },

    /// Verify the watermark in images and retrieve the name of the person the
    /// watermark was issued to
    Verifywm {
        /// Input directory containing the watermarked images to verify
        #[arg(long = "inputdir", value_name = "DIR")]
        input_dir: PathBuf,

        /// Watermark key printed by createwm
        #[arg(long = "key", value_name = "KEY", allow_hyphen_values = true)]
        key: String,

        /// File containing list of people to verify for
        #[arg(value_name = "PEOPLEFILE")]
        people_file: PathBuf,
    },
}

fn init_tracing(verbosity: u8) {
    let default_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> ExitCode {
    let args = utils::normalize_single_dash_flags(std::env::args_os());
    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(err) => {
            let code = if err.use_stderr() {
                exit_codes::USAGE_ERROR
            } else {
                exit_codes::SUCCESS
            };
            // Printing can only fail if the terminal is gone
            let _ = err.print();
            return ExitCode::from(code as u8);
        }
    };

    init_tracing(cli.verbose);

    let Some(command) = cli.command else {
        let _ = Cli::command().print_help();
        println!();
        return ExitCode::SUCCESS;
    };

    let result = match command {
        Commands::Createwm {
            input_dir,
            people_file,
            output_dir,
            font,
            font_size,
        } => commands::createwm::execute(
            input_dir,
            people_file,
            output_dir,
            font,
            font_size,
            cli.quiet,
        ),
        Commands::Verifywm {
            input_dir,
            key,
            people_file,
        } => commands::verifywm::execute(input_dir, key, people_file),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let exit = exit_codes::ExitCode::from_anyhow(&err);
            if let Some(message) = &exit.message {
                eprintln!("{} {}", "Error:".red().bold(), message);
            }
            ExitCode::from(exit.status())
        }
    }
}
