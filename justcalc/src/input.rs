//! Input tokens accepted by the calculator
//!
//! Every button press and mapped key arrives as one [`Token`].

/// A single logical input unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Token {
    /// A decimal digit, always `0..=9`
    Digit(u8),
    Point,
    Add,
    Subtract,
    Multiply,
    Divide,
    Power,
    Percent,
    OpenParen,
    CloseParen,
    Equals,
    Clear,
    Delete,
    SquareRoot,
}

const DIGIT_LABELS: [&str; 10] = ["0", "1", "2", "3", "4", "5", "6", "7", "8", "9"];

impl Token {
    /// Parses a keypad label such as `"7"`, `"DEL"` or `"√"`
    pub fn from_label(label: &str) -> Option<Token> {
        let token = match label {
            "." => Token::Point,
            "+" => Token::Add,
            "-" => Token::Subtract,
            "*" => Token::Multiply,
            "/" => Token::Divide,
            "^" => Token::Power,
            "%" => Token::Percent,
            "(" => Token::OpenParen,
            ")" => Token::CloseParen,
            "=" => Token::Equals,
            "C" => Token::Clear,
            "DEL" => Token::Delete,
            "√" => Token::SquareRoot,
            _ => {
                let position = DIGIT_LABELS.iter().position(|d| *d == label)?;
                Token::Digit(position as u8)
            }
        };
        Some(token)
    }

    /// Maps a typed character. Accepts a few common aliases for the
    /// arithmetic symbols.
    pub fn from_char(c: char) -> Option<Token> {
        let token = match c {
            '0'..='9' => Token::Digit(c as u8 - b'0'),
            '.' | ',' => Token::Point,
            '+' => Token::Add,
            '-' | '−' => Token::Subtract,
            '*' | 'x' | 'X' | '×' => Token::Multiply,
            '/' | '÷' => Token::Divide,
            '^' => Token::Power,
            '%' => Token::Percent,
            '(' => Token::OpenParen,
            ')' => Token::CloseParen,
            '=' => Token::Equals,
            '√' => Token::SquareRoot,
            _ => return None,
        };
        Some(token)
    }

    /// Keypad label, the inverse of [`Token::from_label`]
    pub fn label(&self) -> &'static str {
        match self {
            Token::Digit(d) => DIGIT_LABELS.get(usize::from(*d)).copied().unwrap_or("?"),
            Token::Point => ".",
            Token::Add => "+",
            Token::Subtract => "-",
            Token::Multiply => "*",
            Token::Divide => "/",
            Token::Power => "^",
            Token::Percent => "%",
            Token::OpenParen => "(",
            Token::CloseParen => ")",
            Token::Equals => "=",
            Token::Clear => "C",
            Token::Delete => "DEL",
            Token::SquareRoot => "√",
        }
    }

    /// The character this token appends to the buffer, if it appends at all.
    /// Commands (`=`, `C`, `DEL`, `√`, `%`) return `None`.
    pub fn buffer_char(&self) -> Option<char> {
        match self {
            Token::Digit(d) if *d <= 9 => Some(char::from(b'0' + d)),
            Token::Point => Some('.'),
            Token::Add => Some('+'),
            Token::Subtract => Some('-'),
            Token::Multiply => Some('*'),
            Token::Divide => Some('/'),
            Token::Power => Some('^'),
            Token::OpenParen => Some('('),
            Token::CloseParen => Some(')'),
            _ => None,
        }
    }
}
