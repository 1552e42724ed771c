//! Run configuration collected from the command line.

use std::path::PathBuf;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::gram_schmidt::DEFAULT_TOLERANCE;

/// How the result is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Read the basis from this bracketed matrix file instead of prompting
    pub input: Option<PathBuf>,
    pub format: OutputFormat,
    /// Relative degeneracy threshold passed to the orthonormalizer
    pub tolerance: f64,
    /// Fractional digits in text output
    pub precision: usize,
    pub color: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input: None,
            format: OutputFormat::Text,
            tolerance: DEFAULT_TOLERANCE,
            precision: 6,
            color: true,
        }
    }
}

impl Config {
    /// Prompts are only shown when the basis is typed in.
    pub fn is_interactive(&self) -> bool {
        self.input.is_none()
    }
}
