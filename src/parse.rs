//! Basis text parsing
//!
//! Two input shapes are understood:
//!
//! - one vector per line, components separated by whitespace (`1 0 2`), as
//!   typed at the interactive prompt;
//! - a bracketed matrix where each row is a basis vector:
//!
//! ```text
//! [[row1_val1 row1_val2 ... row1_valn]
//!  [row2_val1 row2_val2 ... row2_valn]
//!  ...]
//! ```
//!
//! Integers and decimals are both accepted and converted to `f64`.

use std::fs;
use std::path::Path;

use crate::error::{GsoError, Result};

/// Parse the dimension prompt answer.
///
/// `line` is the 1-based input line used in error messages.
pub fn parse_dimension(text: &str, line: usize) -> Result<usize> {
    let text = text.trim();
    let n: usize = text
        .parse()
        .map_err(|_| GsoError::parse(line, format!("'{}' is not a valid dimension", text)))?;

    if n == 0 {
        return Err(GsoError::parse(line, "dimension must be at least 1"));
    }
    Ok(n)
}

fn parse_component(token: &str, line: usize) -> Result<f64> {
    let value: f64 = token
        .parse()
        .map_err(|_| GsoError::parse(line, format!("'{}' is not a number", token)))?;

    if !value.is_finite() {
        return Err(GsoError::parse(line, format!("'{}' is not a finite number", token)));
    }
    Ok(value)
}

/// Parse one whitespace-separated vector of exactly `expected_len` components.
///
/// `index` is the 0-based basis position reported on a length mismatch.
pub fn parse_vector(text: &str, expected_len: usize, index: usize, line: usize) -> Result<Vec<f64>> {
    let values = text
        .split_whitespace()
        .map(|token| parse_component(token, line))
        .collect::<Result<Vec<f64>>>()?;

    if values.len() != expected_len {
        return Err(GsoError::DimensionMismatch {
            index,
            expected: expected_len,
            found: values.len(),
        });
    }
    Ok(values)
}

/// 1-based line of `part`, which must be a subslice of `text`.
fn line_of(text: &str, part: &str) -> usize {
    let offset = (part.as_ptr() as usize).saturating_sub(text.as_ptr() as usize);
    text[..offset.min(text.len())].matches('\n').count() + 1
}

/// Parse a bracketed basis: `[[a b c] [d e f] ...]`
///
/// Rows may be split across lines; errors report the line of the offending
/// text. All rows must share the first row's length.
pub fn parse_basis_str(s: &str) -> Result<Vec<Vec<f64>>> {
    let body = s.trim();

    if !body.starts_with('[') || !body.ends_with(']') {
        return Err(GsoError::parse(line_of(s, body), "expected format [[...] [...] ...]"));
    }

    // Remove the outer brackets; what is left is a sequence of [..] rows
    let mut rest = body[1..body.len() - 1].trim_start();
    let mut basis: Vec<Vec<f64>> = Vec::new();

    while !rest.is_empty() {
        let line = line_of(s, rest);
        if !rest.starts_with('[') {
            return Err(GsoError::parse(line, format!("expected '[' at '{}'", rest)));
        }
        let close = rest
            .find(']')
            .ok_or_else(|| GsoError::parse(line, "unterminated row"))?;

        let row = rest[1..close]
            .split_whitespace()
            .map(|token| parse_component(token, line_of(s, token)))
            .collect::<Result<Vec<f64>>>()?;

        if row.is_empty() {
            return Err(GsoError::parse(line, "empty row"));
        }

        if let Some(first) = basis.first() {
            if row.len() != first.len() {
                return Err(GsoError::DimensionMismatch {
                    index: basis.len(),
                    expected: first.len(),
                    found: row.len(),
                });
            }
        }
        basis.push(row);

        rest = rest[close + 1..].trim_start();
    }

    if basis.is_empty() {
        return Err(GsoError::parse(line_of(s, body), "no basis vectors found"));
    }

    Ok(basis)
}

/// Read and parse a bracketed basis file.
pub fn parse_basis_file<P: AsRef<Path>>(path: P) -> Result<Vec<Vec<f64>>> {
    let content = fs::read_to_string(path)?;
    parse_basis_str(&content)
}
