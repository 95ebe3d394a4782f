//! Line-oriented prompting over arbitrary reader/writer pairs.
//!
//! Every prompt that needs a particular shape of answer goes through [`Prompter::ask_until`],
//! which feeds the trimmed line to a parser returning `Result` and repeats the prompt after a
//! retry message until the parser succeeds.

use std::io::{BufRead, Write};

/// Errors raised while talking to the console.
#[derive(Debug, thiserror::Error)]
pub enum ConsoleError {
    #[error("failed to read input: {0}")]
    Input(std::io::Error),
    #[error("input closed")]
    InputClosed,
    #[error("failed to write output: {0}")]
    Output(std::io::Error),
}

pub type ConsoleResult<T> = std::result::Result<T, ConsoleError>;

pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Writes one line of output.
    pub fn say(&mut self, line: impl AsRef<str>) -> ConsoleResult<()> {
        writeln!(self.output, "{}", line.as_ref()).map_err(ConsoleError::Output)
    }

    /// Reads one line, without the trailing newline.
    ///
    /// # Errors
    ///
    /// `ConsoleError::InputClosed` at end of input, `ConsoleError::Input` if the line cannot be
    /// read (including invalid UTF-8).
    pub fn read_line(&mut self) -> ConsoleResult<String> {
        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .map_err(ConsoleError::Input)?;
        if read == 0 {
            return Err(ConsoleError::InputClosed);
        }

        let trimmed_len = line.trim_end_matches(['\r', '\n']).len();
        line.truncate(trimmed_len);
        Ok(line)
    }

    /// Shows `prompt` on the same line and returns the trimmed answer.
    pub fn ask(&mut self, prompt: &str) -> ConsoleResult<String> {
        write!(self.output, "{prompt}").map_err(ConsoleError::Output)?;
        self.output.flush().map_err(ConsoleError::Output)?;
        Ok(self.read_line()?.trim().to_string())
    }

    /// Asks until `parse` accepts the trimmed answer, printing `retry` after each rejection.
    pub fn ask_until<T, E>(
        &mut self,
        prompt: &str,
        retry: &str,
        parse: impl Fn(&str) -> Result<T, E>,
    ) -> ConsoleResult<T> {
        loop {
            let answer = self.ask(prompt)?;
            match parse(&answer) {
                Ok(value) => return Ok(value),
                Err(_) => self.say(retry)?,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn prompter(input: &str) -> Prompter<Cursor<Vec<u8>>, Vec<u8>> {
        Prompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    fn output(p: Prompter<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8(p.into_output()).unwrap()
    }

    #[test]
    fn ask_trims_answer() {
        let mut p = prompter("  Alice  \r\n");
        assert_eq!(p.ask("Name: ").unwrap(), "Alice");
        assert_eq!(output(p), "Name: ");
    }

    #[test]
    fn ask_until_retries_on_rejection() {
        let mut p = prompter("abc\n\n42\n");
        let value = p
            .ask_until("Number: ", "Please enter a valid number.", |s| s.parse::<i32>())
            .unwrap();

        assert_eq!(value, 42);
        let out = output(p);
        assert_eq!(out.matches("Number: ").count(), 3);
        assert_eq!(out.matches("Please enter a valid number.").count(), 2);
    }

    #[test]
    fn end_of_input_is_reported() {
        let mut p = prompter("");
        assert!(matches!(p.ask("Name: "), Err(ConsoleError::InputClosed)));
    }

    #[test]
    fn read_line_keeps_inner_whitespace() {
        let mut p = prompter("  spaced  out \n");
        assert_eq!(p.read_line().unwrap(), "  spaced  out ");
    }
}
