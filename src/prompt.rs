//! Numbered-choice terminal prompt
//!
//! Options are listed as `N - option`. Typing a number picks that option,
//! `?N` asks for its details without picking it, and anything else
//! re-prompts.

use crate::CatalogError;
use std::fmt::Display;
use std::io::{self, BufRead, Write};

/// Environment variable the CLI reads the shop password from
pub const PASSWORD_ENV: &str = "TOLVU_PASSWORD";

/// What the user answered to a numbered question
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    /// Zero-based index of the picked option
    Selected(usize),
    /// Zero-based index of the option to describe
    Details(usize),
}

/// Parses one answer line against `count` options
///
/// Numbers on the line are one-based. Returns `None` for anything that is
/// not a valid pick or details request.
pub fn parse_choice(line: &str, count: usize) -> Option<Choice> {
    let line = line.trim();
    let (number, details) = match line.strip_prefix('?') {
        Some(rest) => (rest, true),
        None => (line, false),
    };

    let n: usize = number.parse().ok()?;
    if n == 0 || n > count {
        return None;
    }

    Some(if details {
        Choice::Details(n - 1)
    } else {
        Choice::Selected(n - 1)
    })
}

/// Line-based prompt over any reader and writer
pub struct Prompt<R, W> {
    input: R,
    output: W,
}

impl Prompt<io::StdinLock<'static>, io::Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Prompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Asks `question` until the answer is a valid pick or details request
    ///
    /// Fails with [`CatalogError::Validation`] when there is nothing to
    /// choose from, and with an I/O error when input ends.
    pub fn ask<T: Display>(&mut self, question: &str, options: &[T]) -> Result<Choice, CatalogError> {
        if options.is_empty() {
            return Err(CatalogError::Validation(format!(
                "Nothing to choose from for '{}'",
                question
            )));
        }

        let mut menu = format!("\n{}\n", question);
        for (i, option) in options.iter().enumerate() {
            menu.push_str(&format!("{} - {}\n", i + 1, option));
        }
        menu.push_str(&format!("?[1-{}] - Fyrir frekari upplýsingar.\n", options.len()));

        self.output.write_all(menu.as_bytes())?;
        loop {
            let line = self.line(&format!("veldu [1-{}]> ", options.len()))?;
            if let Some(choice) = parse_choice(&line, options.len()) {
                return Ok(choice);
            }
        }
    }

    /// Asks a free-text question and returns the trimmed answer
    pub fn text(&mut self, question: &str) -> Result<String, CatalogError> {
        self.line(question)
    }

    /// Asks for a secret on the line-based input
    ///
    /// Input is read as typed and the terminal echoes it, so a warning
    /// line is printed before the question.
    pub fn password(&mut self, question: &str) -> Result<String, CatalogError> {
        writeln!(
            self.output,
            "Aðvörun: lykilorðið sést á skjánum. Settu það frekar í {}.",
            PASSWORD_ENV
        )?;
        self.line(question)
    }

    /// Prints a block of text followed by a newline
    pub fn show(&mut self, text: &str) -> Result<(), CatalogError> {
        writeln!(self.output, "{}", text)?;
        Ok(())
    }

    fn line(&mut self, prompt: &str) -> Result<String, CatalogError> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "input closed").into());
        }
        Ok(line.trim().to_string())
    }
}
