//! Text and JSON rendering of an orthonormalization run.

use std::io::Write;

use colored::*;
use serde::{Deserialize, Serialize};

use crate::config::OutputFormat;
use crate::error::Result;
use crate::gram_schmidt::GsoResult;

/// Everything printed after a successful run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BasisReport {
    pub input: Vec<Vec<f64>>,
    pub orthonormal: Vec<Vec<f64>>,
    pub max_orthogonality_error: f64,
    pub max_normalization_error: f64,
}

impl BasisReport {
    pub fn new(input: Vec<Vec<f64>>, gso: &GsoResult) -> Self {
        Self {
            input,
            orthonormal: gso.basis().to_vec(),
            max_orthogonality_error: gso.max_orthogonality_error(),
            max_normalization_error: gso.max_normalization_error(),
        }
    }

    pub fn write<W: Write>(&self, out: &mut W, format: OutputFormat, precision: usize) -> Result<()> {
        match format {
            OutputFormat::Text => {
                write_input(out, &self.input, precision)?;
                self.write_orthonormal(out, precision)?;
            }
            OutputFormat::Json => {
                serde_json::to_writer_pretty(&mut *out, self)?;
                writeln!(out)?;
            }
        }
        Ok(())
    }

    /// Text section printed once the orthonormal basis exists.
    pub fn write_orthonormal<W: Write>(&self, out: &mut W, precision: usize) -> Result<()> {
        write_basis(
            out,
            "The orthonormal basis for the space spanned by the above basis is",
            &self.orthonormal,
            precision,
        )?;
        writeln!(
            out,
            "\n{} {:.2e}  {} {:.2e}",
            "max |<q_i, q_j>|:".dimmed(),
            self.max_orthogonality_error,
            "max | ||q_i|| - 1 |:".dimmed(),
            self.max_normalization_error
        )?;
        Ok(())
    }
}

/// Text section echoing the basis before it is orthonormalized.
pub fn write_input<W: Write>(out: &mut W, basis: &[Vec<f64>], precision: usize) -> Result<()> {
    write_basis(out, "Input basis", basis, precision)?;
    writeln!(out)?;
    Ok(())
}

/// Format one vector as `[a, b, c]` with `precision` fractional digits.
pub fn format_vector(v: &[f64], precision: usize) -> String {
    let parts: Vec<String> = v
        .iter()
        // Avoid printing "-0.000000" for tiny negative residues
        .map(|&x| {
            let s = format!("{:.*}", precision, x);
            if s.trim_start_matches('-').chars().all(|c| c == '0' || c == '.') {
                s.trim_start_matches('-').to_string()
            } else {
                s
            }
        })
        .collect();
    format!("[{}]", parts.join(", "))
}

/// Print a titled basis, one labeled vector per line.
pub fn write_basis<W: Write>(out: &mut W, title: &str, basis: &[Vec<f64>], precision: usize) -> Result<()> {
    writeln!(out, "{}", title.bright_white().bold())?;
    for (i, v) in basis.iter().enumerate() {
        writeln!(out, "  {} {}", format!("b{}:", i).bright_cyan(), format_vector(v, precision))?;
    }
    Ok(())
}
