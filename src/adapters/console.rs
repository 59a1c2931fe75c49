use crate::core::Terminal;
use crate::utils::error::{RegistryError, Result};
use std::io::{BufRead, Write};
use std::str::FromStr;

/// `Terminal` over any buffered reader and writer. The binary wires it to
/// stdin/stdout; tests use a `Cursor` and a `Vec<u8>`.
pub struct Console<R: BufRead, W: Write> {
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    pub fn writer(&self) -> &W {
        &self.writer
    }

    fn prompt(&mut self, text: &str) -> Result<()> {
        self.writer.write_all(text.as_bytes())?;
        self.writer.flush()?;
        Ok(())
    }

    /// Next line holding anything besides whitespace, with leading whitespace
    /// and the line terminator stripped.
    fn next_content_line(&mut self) -> Result<String> {
        loop {
            let mut line = String::new();
            if self.reader.read_line(&mut line)? == 0 {
                return Err(RegistryError::InputClosed);
            }
            let content = line.trim_start().trim_end_matches(['\n', '\r']);
            if !content.is_empty() {
                return Ok(content.to_string());
            }
        }
    }

    /// First token of the next non-blank line; the rest of that line is dropped.
    fn next_token(&mut self) -> Result<String> {
        let line = self.next_content_line()?;
        Ok(line
            .split_whitespace()
            .next()
            .unwrap_or_default()
            .to_string())
    }

    /// Reads the numeric prefix of the next token, so `12abc` gives 12. Input with no
    /// numeric prefix, out-of-range values and values failing `accept` re-prompt.
    fn read_number<T: FromStr>(
        &mut self,
        prompt: &str,
        decimal: bool,
        accept: fn(&T) -> bool,
    ) -> Result<T> {
        loop {
            self.prompt(prompt)?;
            let token = self.next_token()?;
            match numeric_prefix(&token, decimal).parse::<T>() {
                Ok(value) if accept(&value) => return Ok(value),
                _ => {
                    tracing::trace!(input = %token, "rejected non-numeric input");
                    self.print("Invalid number.\n")?;
                }
            }
        }
    }
}

/// Longest leading part of `token` made of an optional sign and digits, plus a
/// fraction and exponent when `decimal` is set. Empty when no digit leads.
fn numeric_prefix(token: &str, decimal: bool) -> &str {
    let bytes = token.as_bytes();
    let digits_from = |mut i: usize| {
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        i
    };

    let start = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let mut end = digits_from(start);
    let mut has_digits = end > start;

    if decimal {
        if bytes.get(end) == Some(&b'.') {
            let fraction_end = digits_from(end + 1);
            if has_digits || fraction_end > end + 1 {
                has_digits = true;
                end = fraction_end;
            }
        }
        if has_digits && matches!(bytes.get(end), Some(b'e' | b'E')) {
            let sign = usize::from(matches!(bytes.get(end + 1), Some(b'+' | b'-')));
            let exponent_end = digits_from(end + 1 + sign);
            if exponent_end > end + 1 + sign {
                end = exponent_end;
            }
        }
    }

    if has_digits {
        &token[..end]
    } else {
        ""
    }
}

impl<R: BufRead, W: Write> Terminal for Console<R, W> {
    fn read_line(&mut self, prompt: &str) -> Result<String> {
        self.prompt(prompt)?;
        self.next_content_line()
    }

    fn read_int(&mut self, prompt: &str) -> Result<i32> {
        self.read_number(prompt, false, |_| true)
    }

    fn read_f64(&mut self, prompt: &str) -> Result<f64> {
        self.read_number(prompt, true, |value: &f64| value.is_finite())
    }

    fn read_yes_no(&mut self, prompt: &str) -> Result<bool> {
        loop {
            self.prompt(&format!("{} (y/n): ", prompt))?;
            let answer = self
                .next_token()?
                .chars()
                .next()
                .map(|c| c.to_ascii_lowercase());
            match answer {
                Some('y') => return Ok(true),
                Some('n') => return Ok(false),
                _ => self.print("Only y or n allowed.\n")?,
            }
        }
    }

    fn print(&mut self, text: &str) -> Result<()> {
        self.writer.write_all(text.as_bytes())?;
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn console(input: &str) -> Console<Cursor<Vec<u8>>, Vec<u8>> {
        Console::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    fn output(console: &Console<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8(console.writer().clone()).unwrap()
    }

    #[test]
    fn test_read_line_skips_blank_lines_and_leading_whitespace() {
        let mut console = console("\n   \n   Ann Lee  \r\n");
        assert_eq!(console.read_line("Enter name: ").unwrap(), "Ann Lee  ");
        assert_eq!(output(&console), "Enter name: ");
    }

    #[test]
    fn test_read_int_retries_and_discards_whole_line() {
        let mut console = console("abc 12\n42 junk\n");
        assert_eq!(console.read_int("Age: ").unwrap(), 42);
        assert_eq!(output(&console), "Age: Invalid number.\nAge: ");
    }

    #[test]
    fn test_read_int_accepts_negative_numbers() {
        let mut console = console("-5\n");
        assert_eq!(console.read_int("Roll: ").unwrap(), -5);
    }

    #[test]
    fn test_read_f64() {
        let mut console = console("x\n1500.5\n");
        assert_eq!(console.read_f64("Scholarship: ").unwrap(), 1500.5);
    }

    #[test]
    fn test_read_int_takes_leading_digits() {
        let mut console = console("12abc\n+7\n");
        assert_eq!(console.read_int("Age: ").unwrap(), 12);
        assert_eq!(console.read_int("Age: ").unwrap(), 7);
        assert_eq!(output(&console), "Age: Age: ");
    }

    #[test]
    fn test_read_int_rejects_out_of_range() {
        let mut console = console("2147483648\n-\n3\n");
        assert_eq!(console.read_int("Roll: ").unwrap(), 3);
        assert_eq!(output(&console).matches("Invalid number.\n").count(), 2);
    }

    #[test]
    fn test_read_f64_rejects_non_finite() {
        let mut console = console("inf\ninfinity\nNaN\n1e999\n2.5kg\n");
        assert_eq!(console.read_f64("Scholarship: ").unwrap(), 2.5);
        assert_eq!(output(&console).matches("Invalid number.\n").count(), 4);
    }

    #[test]
    fn test_numeric_prefix() {
        assert_eq!(numeric_prefix("12abc", false), "12");
        assert_eq!(numeric_prefix("-5", false), "-5");
        assert_eq!(numeric_prefix("1.5", false), "1");
        assert_eq!(numeric_prefix("abc", false), "");
        assert_eq!(numeric_prefix("1.5e3x", true), "1.5e3");
        assert_eq!(numeric_prefix(".5", true), ".5");
        assert_eq!(numeric_prefix("3e", true), "3");
        assert_eq!(numeric_prefix("inf", true), "");
    }

    #[test]
    fn test_read_yes_no_is_case_insensitive() {
        let mut console = console("maybe\nY\nn\n");
        assert!(console.read_yes_no("Manual roll?").unwrap());
        assert!(!console.read_yes_no("Manual roll?").unwrap());
        assert_eq!(
            output(&console),
            "Manual roll? (y/n): Only y or n allowed.\nManual roll? (y/n): Manual roll? (y/n): "
        );
    }

    #[test]
    fn test_end_of_input_is_reported() {
        let mut console = console("");
        assert!(matches!(
            console.read_int("Choice: "),
            Err(RegistryError::InputClosed)
        ));
    }
}
