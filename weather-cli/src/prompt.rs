use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use inquire::{InquireError, Text};

/// Source of user input for the interactive shell.
///
/// `Ok(None)` means the user is gone (end of input, Ctrl-C, Esc) and the
/// session should end.
pub trait Prompt {
    fn ask(&mut self, message: &str) -> Result<Option<String>>;
}

/// Terminal prompt with line editing.
#[derive(Debug, Default)]
pub struct InquirePrompt;

impl Prompt for InquirePrompt {
    fn ask(&mut self, message: &str) -> Result<Option<String>> {
        match Text::new(message).prompt() {
            Ok(answer) => Ok(Some(answer)),
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => Ok(None),
            Err(e) => Err(e).context("Failed to read input"),
        }
    }
}

/// Plain line reader, used when stdin is not a terminal and in tests.
#[derive(Debug)]
pub struct LinePrompt<R, W> {
    input: R,
    echo: W,
}

impl<R: BufRead, W: Write> LinePrompt<R, W> {
    pub fn new(input: R, echo: W) -> Self {
        Self { input, echo }
    }
}

impl<R: BufRead, W: Write> Prompt for LinePrompt<R, W> {
    fn ask(&mut self, message: &str) -> Result<Option<String>> {
        write!(self.echo, "{message} ")?;
        self.echo.flush()?;

        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("Failed to read input")?;

        if read == 0 {
            return Ok(None);
        }

        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn line_prompt_reads_lines_until_eof() {
        let mut echo = Vec::new();
        let mut prompt = LinePrompt::new(Cursor::new("1\r\nLondon\n"), &mut echo);

        assert_eq!(prompt.ask("Choose:").unwrap().as_deref(), Some("1"));
        assert_eq!(prompt.ask("City:").unwrap().as_deref(), Some("London"));
        assert_eq!(prompt.ask("Choose:").unwrap(), None);

        assert_eq!(String::from_utf8(echo).unwrap(), "Choose: City: Choose: ");
    }
}
