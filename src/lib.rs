//! Classical Gram-Schmidt orthonormalization.
//!
//! The library turns an ordered basis into an orthonormal basis spanning the
//! same subspace and rejects linearly dependent input with
//! [`GsoError::DegenerateBasis`] instead of producing NaN.
//!
//! ```
//! let q = gsop::orthogonalize(&[vec![1.0, 0.0], vec![1.0, 1.0]]).unwrap();
//! assert_eq!(q, vec![vec![1.0, 0.0], vec![0.0, 1.0]]);
//! ```
//!
//! # Modules
//!
//! - `gram_schmidt`: the orthonormalizer and its result type
//! - `vector`: dot product, norm, axpy kernels
//! - `parse`: dimension, vector, and bracketed matrix parsing
//! - `session`: interactive prompt flow over any reader/writer
//! - `report`: text and JSON output

use std::io::{BufRead, Write};

use tracing::info;

pub mod config;
pub mod error;
pub mod gram_schmidt;
pub mod parse;
pub mod report;
pub mod session;
pub mod vector;

pub use config::{Config, OutputFormat};
pub use error::{GsoError, Result};
pub use gram_schmidt::{orthogonalize, GramSchmidt, GsoResult};
pub use report::BasisReport;

/// Read a basis, orthonormalize it, and print the report.
///
/// With no input file configured the basis is read interactively from `input`,
/// with prompts written to `prompts`. The report always goes to `output`; in
/// text mode the input basis is printed before orthonormalization starts.
pub fn run<R, P, W>(config: &Config, input: R, prompts: P, output: &mut W) -> Result<BasisReport>
where
    R: BufRead,
    P: Write,
    W: Write,
{
    let basis = match &config.input {
        Some(path) => {
            info!(path = %path.display(), "reading basis file");
            parse::parse_basis_file(path)?
        }
        None => session::Session::new(input, prompts).read_basis()?,
    };

    // Text mode echoes the basis first so a degenerate one is still shown
    if config.format == OutputFormat::Text {
        report::write_input(output, &basis, config.precision)?;
    }

    let gso = GramSchmidt::with_tolerance(config.tolerance).compute(&basis)?;
    info!(
        vectors = gso.len(),
        dimension = gso.dimension(),
        max_orthogonality_error = gso.max_orthogonality_error(),
        "orthonormalized basis"
    );

    let report = BasisReport::new(basis, &gso);
    match config.format {
        OutputFormat::Text => report.write_orthonormal(output, config.precision)?,
        OutputFormat::Json => report.write(output, OutputFormat::Json, config.precision)?,
    }
    Ok(report)
}
