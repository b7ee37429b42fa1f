//! Line-based terminal interaction
//!
//! Wraps an input reader and an output writer so commands can print and ask
//! for numeric selections without touching stdin/stdout directly.

use std::fmt;
use std::io::{self, BufRead, Write};

pub struct Console<R, W> {
    input: R,
    output: W,
}

impl Console<io::StdinLock<'static>, io::Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Print one line
    pub fn line(&mut self, args: fmt::Arguments<'_>) -> io::Result<()> {
        self.output.write_fmt(args)?;
        self.output.write_all(b"\n")
    }

    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }

    /// Ask for an index in `[0, max]`
    ///
    /// An empty answer selects 0. Non-numeric and out-of-range answers are
    /// reported and the prompt repeats until a valid index is entered. Closed
    /// input is an error since no answer can arrive anymore.
    pub fn select(&mut self, prompt: &str, max: usize) -> io::Result<usize> {
        loop {
            write!(self.output, "{}", prompt)?;
            self.output.flush()?;

            let mut answer = String::new();
            if self.input.read_line(&mut answer)? == 0 {
                return Err(io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    "input closed before a selection was made",
                ));
            }

            let answer = answer.trim();
            if answer.is_empty() {
                return Ok(0);
            }

            // Negative answers count as out of range, not as invalid
            match answer.parse::<i64>().map(usize::try_from) {
                Ok(Ok(index)) if index <= max => return Ok(index),
                Ok(_) => writeln!(self.output, "{} is not in range [0-{}]...", answer, max)?,
                Err(_) => writeln!(self.output, "{} is not a valid number...", answer)?,
            }
        }
    }
}
