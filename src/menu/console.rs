//! Line-oriented terminal I/O.

use std::fmt::Display;
use std::io::{self, BufRead, Write};

use crate::common::Result;

/// Prompts on a writer and reads answers from a reader, one line each.
///
/// Generic so the binary can use stdin/stdout while tests drive it from
/// in-memory buffers.
///
/// # Example
/// ```
/// use std::io::Cursor;
/// use studentdb::menu::Console;
///
/// let mut console = Console::new(Cursor::new("Ada\n"), Vec::new());
/// assert_eq!(console.ask("Enter name: ").unwrap(), "Ada");
/// assert_eq!(console.prompt("Again: ").unwrap(), None); // end of input
/// assert_eq!(console.output(), b"Enter name: Again: ");
/// ```
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Write `text` followed by a newline.
    pub fn say(&mut self, text: impl Display) -> Result<()> {
        writeln!(self.output, "{}", text)?;
        Ok(())
    }

    /// Show `label` and read one line without its line ending.
    ///
    /// Returns `None` at end of input.
    pub fn prompt(&mut self, label: &str) -> Result<Option<String>> {
        write!(self.output, "{}", label)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\n', '\r']).to_string()))
    }

    /// Like [`prompt`](Self::prompt), but end of input is an error.
    pub fn ask(&mut self, label: &str) -> Result<String> {
        self.prompt(label)?.ok_or_else(|| {
            io::Error::new(io::ErrorKind::UnexpectedEof, "input closed while prompting").into()
        })
    }

    /// Ask with a fallback for a blank answer.
    pub fn ask_or(&mut self, label: &str, default: &str) -> Result<String> {
        let answer = self.ask(label)?;
        if answer.trim().is_empty() {
            Ok(default.to_string())
        } else {
            Ok(answer)
        }
    }

    /// Yes/no question; only `yes` (any case) counts as yes.
    pub fn confirm(&mut self, label: &str) -> Result<bool> {
        Ok(self.ask(label)?.to_lowercase() == "yes")
    }

    pub fn output(&self) -> &W {
        &self.output
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::Error;
    use std::io::Cursor;

    fn console(input: &str) -> Console<Cursor<String>, Vec<u8>> {
        Console::new(Cursor::new(input.to_string()), Vec::new())
    }

    #[test]
    fn test_prompt_strips_line_endings() {
        let mut c = console("one\r\ntwo\n");
        assert_eq!(c.prompt("> ").unwrap().as_deref(), Some("one"));
        assert_eq!(c.prompt("> ").unwrap().as_deref(), Some("two"));
        assert_eq!(c.prompt("> ").unwrap(), None);
    }

    #[test]
    fn test_ask_at_eof_is_io_error() {
        let mut c = console("");
        assert!(matches!(c.ask("> "), Err(Error::Io(_))));
    }

    #[test]
    fn test_ask_or_default() {
        let mut c = console("\n  \nvalue\n");
        assert_eq!(c.ask_or("> ", "dflt").unwrap(), "dflt");
        assert_eq!(c.ask_or("> ", "dflt").unwrap(), "dflt");
        assert_eq!(c.ask_or("> ", "dflt").unwrap(), "value");
    }

    #[test]
    fn test_confirm_requires_exact_yes() {
        let mut c = console("yes\nYES\ny\n yes\nno\n");
        assert!(c.confirm("? ").unwrap());
        assert!(c.confirm("? ").unwrap());
        assert!(!c.confirm("? ").unwrap());
        assert!(!c.confirm("? ").unwrap());
        assert!(!c.confirm("? ").unwrap());
    }

    #[test]
    fn test_say_writes_line() {
        let mut c = console("");
        c.say("hello").unwrap();
        assert_eq!(String::from_utf8(c.into_output()).unwrap(), "hello\n");
    }
}
