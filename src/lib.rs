//! yolo2coco: convert YOLO text annotations into a COCO JSON dataset.
//!
//! A YOLO dataset is a directory of images, a directory of per-image label
//! files holding normalized `class x_center y_center width height` rows, and
//! a class list. The converter turns that into a single COCO detection
//! document with `images`, `annotations` and `categories` tables.
//!
//! # Modules
//!
//! - [`coco`]: COCO output model and JSON writer
//! - [`yolo`]: class list, label file and image directory readers
//! - [`convert`]: the conversion itself and its summary report
//! - [`error`]: error type for yolo2coco operations

pub mod coco;
pub mod convert;
pub mod error;
pub mod yolo;

use std::path::PathBuf;

use clap::{ArgAction, Parser};
use log::info;

pub use convert::{build_dataset, convert, ConversionReport, ConvertOptions};
pub use error::{render_error_chain, Yolo2CocoError};

const COMPLETION_MESSAGE: &str = "Conversion to COCO format completed.";

/// Convert YOLO format annotations to COCO format.
#[derive(Parser, Debug)]
#[command(name = "yolo2coco")]
#[command(version, about)]
struct Cli {
    /// Directory containing images (.png, .jpg, .jpeg).
    #[arg(long)]
    images: PathBuf,

    /// Directory containing YOLO format label files.
    #[arg(long)]
    labels: PathBuf,

    /// File containing class names, one per line.
    #[arg(long)]
    classes: PathBuf,

    /// Output file for COCO format annotations.
    #[arg(long, default_value = convert::DEFAULT_OUTPUT)]
    output: PathBuf,

    /// Increase log verbosity (-v for info, -vv for debug).
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Do not print the completion message.
    #[arg(short, long)]
    quiet: bool,
}

impl Cli {
    fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    }
}

/// Run the yolo2coco CLI.
///
/// This is the main entry point for the CLI, called from `main.rs`.
pub fn run() -> Result<(), Yolo2CocoError> {
    let cli = Cli::parse();

    // RUST_LOG still wins when set.
    let env = env_logger::Env::default().default_filter_or(cli.log_filter());
    let _ = env_logger::Builder::from_env(env).try_init();

    let opts = ConvertOptions::new(cli.images, cli.labels, cli.classes).with_output(cli.output);
    let report = convert(&opts)?;

    info!("conversion summary:\n{report}");
    if !cli.quiet {
        println!("{COMPLETION_MESSAGE}");
    }
    Ok(())
}
