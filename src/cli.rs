use clap::Parser;
use std::path::PathBuf;

use gsop::{gram_schmidt::DEFAULT_TOLERANCE, Config, OutputFormat};

#[derive(Parser)]
#[command(name = "gsop")]
#[command(author, version, about = "Orthonormalize a vector basis with the Gram-Schmidt process")]
pub struct Cli {
    /// Read the basis from a file like [[1 0] [1 1]] instead of prompting
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Relative residual norm below which the basis counts as degenerate
    #[arg(long, default_value_t = DEFAULT_TOLERANCE)]
    pub tolerance: f64,

    /// Digits after the decimal point in text output
    #[arg(long, default_value_t = 6)]
    pub precision: usize,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn config(&self) -> Config {
        Config {
            input: self.input.clone(),
            format: self.format,
            tolerance: self.tolerance,
            precision: self.precision,
            color: !self.no_color,
        }
    }

    /// Log lines carry ANSI styling unless color is disabled.
    pub fn ansi_logs(&self) -> bool {
        !self.no_color
    }

    pub fn log_level(&self) -> tracing::Level {
        match self.verbose {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        }
    }
}
