//!
//! # Polygon-Job to GPF Conversion CLI
//!
//! Converts a serialized [`ebeam21converters::poly2gpf::ExportJob`]
//! into a `.gpf` exposure file.
//!

use clap::Parser;
use std::error::Error;

// Use our own crate, note by name, not `crate::` or `super::`.
use ebeam21converters::poly2gpf::{convert, ConvOptions};

// => The doc-comment on `ProgramOptions` here is displayed by the `clap`-generated help docs =>

/// # Polygon-Job to GPF Conversion CLI
/// Converts a serialized export-job description into a `.gpf` exposure file.
#[derive(Parser)]
pub struct ProgramOptions {
    /// Job Input File
    #[arg(short = 'i', long, default_value = "")]
    pub input: String,
    /// Input Format. One of ("json", "yaml", "toml").
    /// Inferred from the input file's extension when omitted.
    #[arg(short = 'f', long, default_value = "")]
    pub fmt: String,
    /// Output File
    #[arg(short = 'o', long, default_value = "")]
    pub out: String,
    /// Verbose Output Mode
    #[arg(short, long)]
    pub verbose: bool,
}

impl From<ProgramOptions> for ConvOptions {
    /// Convert into the [`poly2gpf::ConvOptions`] struct.
    fn from(options: ProgramOptions) -> Self {
        ConvOptions {
            input: options.input,
            fmt: options.fmt,
            out: options.out,
            verbose: options.verbose,
        }
    }
}

/// Main entry point.
/// Parses the command-line arguments and calls [`poly2gpf::convert`].
pub fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt::init();
    let options = ProgramOptions::parse();
    convert(&options.into())
}
