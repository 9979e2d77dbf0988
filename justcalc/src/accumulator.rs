//! Expression accumulator
//!
//! Owns the display buffer. Input tokens append to it or run one of the
//! commands (evaluate, square root, percent, delete, clear). Failures never
//! escape: they replace the buffer with a message and raise the error flag,
//! and the next input of any kind starts over from an empty buffer.

use crate::engine::{self, CalcError, CalcResult};
use crate::format::NumberFormat;
use crate::input::Token;

/// Shown when `%` cannot evaluate the buffer.
pub const PERCENT_ERROR: &str = "Error";

/// Characters that end a numeric literal.
const LITERAL_BOUNDARIES: &[char] = &['+', '-', '*', '/', '%', '^', '(', ')'];

/// What the presentation layer renders
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Display<'a> {
    pub text: &'a str,
    pub error: bool,
}

#[derive(Debug, Clone, Default)]
pub struct Accumulator {
    buffer: String,
    error: bool,
    format: NumberFormat,
}

impl Accumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_format(format: NumberFormat) -> Self {
        Self {
            format,
            ..Self::default()
        }
    }

    pub fn display(&self) -> Display<'_> {
        Display {
            text: &self.buffer,
            error: self.error,
        }
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    pub fn is_error(&self) -> bool {
        self.error
    }

    /// Applies one input token.
    pub fn process_input(&mut self, token: Token) {
        tracing::trace!(?token, "input");
        match token {
            Token::Clear => self.clear(),
            Token::Delete => self.delete_last(),
            Token::SquareRoot => self.square_root(),
            Token::Percent => self.percent(),
            Token::Equals => self.evaluate(),
            other => {
                if let Some(c) = other.buffer_char() {
                    self.append(c);
                }
            }
        }
    }

    /// Applies a keypad label such as `"7"` or `"DEL"`. Returns `false` and
    /// leaves the state untouched for labels that are not tokens.
    pub fn process_label(&mut self, label: &str) -> bool {
        match Token::from_label(label) {
            Some(token) => {
                self.process_input(token);
                true
            }
            None => {
                tracing::debug!(label, "ignoring unknown input label");
                false
            }
        }
    }

    /// Appends one character. A second `.` in the same numeric literal is
    /// dropped, as is a `.` after a scientific result such as `1e20`.
    pub fn append(&mut self, c: char) {
        self.reset_error();
        if c == '.' && trailing_literal(&self.buffer).contains(['.', 'e', 'E']) {
            return;
        }
        self.buffer.push(c);
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
        self.error = false;
    }

    pub fn delete_last(&mut self) {
        self.reset_error();
        self.buffer.pop();
    }

    /// Replaces the buffer with the square root of its value. Every failure,
    /// parse errors included, reports the domain message.
    pub fn square_root(&mut self) {
        self.reset_error();
        if self.buffer.is_empty() {
            return;
        }
        match self.value().and_then(engine::evaluator::sqrt) {
            Ok(root) => self.show_value(root),
            Err(e) => {
                tracing::debug!(buffer = %self.buffer, error = ?e, "square root failed");
                self.show_error(&CalcError::Domain.to_string());
            }
        }
    }

    /// Replaces the buffer with its value divided by 100.
    pub fn percent(&mut self) {
        self.reset_error();
        if self.buffer.is_empty() {
            return;
        }
        match self.value().and_then(|v| engine::Operator::Divide.apply(v, 100.0)) {
            Ok(value) => self.show_value(value),
            Err(e) => {
                tracing::debug!(buffer = %self.buffer, error = ?e, "percent failed");
                self.show_error(PERCENT_ERROR);
            }
        }
    }

    /// Evaluates the buffer and replaces it with the result or an error
    /// message. An empty buffer is left alone.
    pub fn evaluate(&mut self) {
        self.reset_error();
        if self.buffer.trim().is_empty() {
            return;
        }
        match self.value() {
            Ok(value) => self.show_value(value),
            Err(e) => {
                tracing::debug!(buffer = %self.buffer, error = ?e, kind = ?e.kind(), "evaluation failed");
                self.show_error(&e.to_string());
            }
        }
    }

    fn value(&self) -> CalcResult<f64> {
        engine::evaluate_str(&self.buffer)
    }

    fn reset_error(&mut self) {
        if self.error {
            self.clear();
        }
    }

    fn show_value(&mut self, value: f64) {
        let text = self.format.format(value);
        tracing::debug!(expression = %self.buffer, result = %text, "evaluated");
        self.buffer = text;
    }

    fn show_error(&mut self, message: &str) {
        self.buffer = message.to_string();
        self.error = true;
    }
}

/// The numeric literal at the end of `buffer`: everything after the last
/// operator or parenthesis. The sign of an exponent (`1e-12`) stays inside
/// the literal.
fn trailing_literal(buffer: &str) -> &str {
    let start = buffer
        .char_indices()
        .rev()
        .find(|&(i, c)| LITERAL_BOUNDARIES.contains(&c) && !is_exponent_sign(buffer, i, c))
        .map_or(0, |(i, c)| i + c.len_utf8());
    &buffer[start..]
}

/// `c` at byte `i` is a sign directly after the `e` of a number.
fn is_exponent_sign(buffer: &str, i: usize, c: char) -> bool {
    if !matches!(c, '+' | '-') {
        return false;
    }
    match buffer[..i].strip_suffix(['e', 'E']) {
        Some(mantissa) => mantissa.ends_with(|d: char| d.is_ascii_digit() || d == '.'),
        None => false,
    }
}
