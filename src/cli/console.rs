//! Interactive terminal input and output
//!
//! Commands talk to the user only through a [`Console`], so they can be
//! driven by scripted input in tests.

use std::io::{self, BufRead, Write};

/// Answers accepted as "yes" by [`Console::confirm`]
const YES_ANSWERS: [&str; 2] = ["y", "yes"];

pub struct Console<R, W> {
    input: R,
    output: W,
}

/// Console bound to the process stdin and stdout
pub fn stdio() -> Console<io::StdinLock<'static>, io::Stdout> {
    Console::new(io::stdin().lock(), io::stdout())
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Write one line of output
    pub fn line(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.output, "{}", text)
    }

    /// Low-level input prompting
    ///
    /// Returns the entered line without its line ending. End of input is an
    /// error so that a closed stdin cannot loop a re-prompt forever.
    pub fn prompt_input(&mut self, prompt: &str) -> io::Result<String> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut input = String::new();
        if self.input.read_line(&mut input)? == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "input closed while waiting for an answer",
            ));
        }

        Ok(input.trim_end_matches(['\r', '\n']).to_string())
    }

    /// Prompt for a value, mapping an empty answer to `None`
    pub fn prompt_optional(&mut self, prompt: &str) -> io::Result<Option<String>> {
        let input = self.prompt_input(prompt)?;
        if input.is_empty() {
            Ok(None)
        } else {
            Ok(Some(input))
        }
    }

    /// Ask a `[y/n]` question; only `y` or `yes` (any case) count as yes
    pub fn confirm(&mut self, prompt: &str) -> io::Result<bool> {
        let answer = self.prompt_input(&format!("{} [y/n]: ", prompt))?;
        Ok(YES_ANSWERS.contains(&answer.trim().to_lowercase().as_str()))
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }
}
