//! Line-oriented prompts with range validation.

use std::io::{BufRead, Write};

use anyhow::Result;
use thiserror::Error;

/// Input reached end of file while a prompt was waiting.
#[derive(Debug, Error)]
#[error("input closed")]
pub struct InputClosed;

/// Reads answers from `input` and writes prompts to `output`.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn out(&mut self) -> &mut W {
        &mut self.output
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }

    /// Print `message` and read one line without its line terminator.
    ///
    /// Bytes that are not valid UTF-8 are replaced rather than rejected.
    pub fn read_line(&mut self, message: &str) -> Result<String> {
        write!(self.output, "{message}")?;
        self.output.flush()?;

        let mut buf = Vec::new();
        if self.input.read_until(b'\n', &mut buf)? == 0 {
            return Err(InputClosed.into());
        }
        let line = String::from_utf8_lossy(&buf);
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    /// Ask until the answer is a whole number in `min..=max`.
    pub fn read_number(&mut self, message: &str, min: u32, max: u32) -> Result<u32> {
        loop {
            let line = self.read_line(message)?;
            if let Ok(n) = line.trim().parse::<u32>() {
                if (min..=max).contains(&n) {
                    return Ok(n);
                }
            }
            writeln!(
                self.output,
                "Invalid input. Please enter a number between {min} and {max}."
            )?;
        }
    }

    /// Same as [`read_number`](Self::read_number) for list sizes and positions.
    pub fn read_index(&mut self, message: &str, min: usize, max: usize) -> Result<usize> {
        let clamp = |n: usize| u32::try_from(n).unwrap_or(u32::MAX);
        let n = self.read_number(message, clamp(min), clamp(max))?;
        Ok(n as usize)
    }

    /// Ask until the answer contains something other than whitespace.
    pub fn read_non_empty(&mut self, message: &str) -> Result<String> {
        loop {
            let line = self.read_line(message)?;
            if !line.trim().is_empty() {
                return Ok(line);
            }
            writeln!(self.output, "The text must not be empty.")?;
        }
    }

    /// "1" for yes, "0" for no.
    pub fn read_yes_no(&mut self, message: &str) -> Result<bool> {
        Ok(self.read_number(message, 0, 1)? == 1)
    }
}
