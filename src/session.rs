//! Interactive basis entry.
//!
//! Reads the dimension `n`, then `n` vectors of `n` components each, printing
//! a prompt before every answer. Generic over the reader and writer so the
//! same flow runs against stdin/stdout and in-memory buffers.

use std::io::{self, BufRead, Write};

use tracing::debug;

use crate::error::{GsoError, Result};
use crate::parse::{parse_dimension, parse_vector};

/// English ordinal suffix: 1st, 2nd, 3rd, 4th, 11th, 21st ...
fn ordinal(k: usize) -> String {
    let suffix = match (k % 10, k % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{}{}", k, suffix)
}

pub struct Session<R, W> {
    input: R,
    output: W,
    line: usize,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            line: 0,
        }
    }

    fn read_line(&mut self) -> Result<String> {
        let mut buf = String::new();
        let read = self.input.read_line(&mut buf)?;
        if read == 0 {
            return Err(GsoError::Io(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "input ended before the basis was complete",
            )));
        }
        self.line += 1;
        Ok(buf)
    }

    fn prompt(&mut self, text: &str) -> Result<()> {
        writeln!(self.output, "{}", text)?;
        self.output.flush()?;
        Ok(())
    }

    /// Run the prompt flow and return the entered basis (`n` vectors of length `n`).
    pub fn read_basis(&mut self) -> Result<Vec<Vec<f64>>> {
        self.prompt("Enter the dimension of the vector space")?;
        let text = self.read_line()?;
        let n = parse_dimension(&text, self.line)?;
        debug!(dimension = n, "dimension entered");

        self.prompt("\nNow enter the basis vector's elements separated by spaces\n")?;

        let mut basis = Vec::with_capacity(n);
        for i in 0..n {
            self.prompt(&format!("{} Basis vector", ordinal(i + 1)))?;
            let text = self.read_line()?;
            basis.push(parse_vector(&text, n, i, self.line)?);
        }

        Ok(basis)
    }

    pub fn into_output(self) -> W {
        self.output
    }
}
