//! Tokenizer and recursive descent parser

use std::fmt;

use crate::engine::{CalcError, CalcResult};

/// Limit on AST height: every parenthesis, sign, exponent, call and chained
/// operator counts one level.
const MAX_DEPTH: usize = 256;

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
    /// `//`, division rounded toward negative infinity
    FloorDivide,
    /// `%`, remainder with the divisor's sign
    Modulo,
    /// `^` or `**`
    Power,
}

impl Operator {
    /// Returns the operator symbol for display
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
            Self::FloorDivide => "//",
            Self::Modulo => "%",
            Self::Power => "^",
        }
    }
}

/// Token types from lexical analysis
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Number(f64),
    Operator(Operator),
    LeftParen,
    RightParen,
    /// A bare identifier. Only `sqrt` (or `√`) means anything.
    Name(String),
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Operator(op) => f.write_str(op.symbol()),
            Self::LeftParen => f.write_str("("),
            Self::RightParen => f.write_str(")"),
            Self::Name(name) => f.write_str(name),
        }
    }
}

/// Abstract syntax tree node
#[derive(Debug, Clone, PartialEq)]
pub enum AstNode {
    Number(f64),
    Name(String),
    Negate(Box<AstNode>),
    Binary {
        left: Box<AstNode>,
        op: Operator,
        right: Box<AstNode>,
    },
    /// `callee(arg)`; only `sqrt` can actually be called
    Call {
        callee: Box<AstNode>,
        arg: Option<Box<AstNode>>,
    },
}

impl AstNode {
    #[must_use]
    pub fn number(value: f64) -> Self {
        Self::Number(value)
    }

    #[must_use]
    pub fn binary(left: AstNode, op: Operator, right: AstNode) -> Self {
        Self::Binary {
            left: Box::new(left),
            op,
            right: Box::new(right),
        }
    }

    #[must_use]
    pub fn negate(inner: AstNode) -> Self {
        Self::Negate(Box::new(inner))
    }

    #[must_use]
    pub fn call(callee: AstNode, arg: Option<AstNode>) -> Self {
        Self::Call {
            callee: Box::new(callee),
            arg: arg.map(Box::new),
        }
    }
}

/// Tokenizer for converting expression strings to tokens
#[derive(Debug)]
pub struct Tokenizer<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Tokenizer<'a> {
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    /// Tokenizes the entire input
    pub fn tokenize(&mut self) -> CalcResult<Vec<Token>> {
        let mut tokens = Vec::new();
        while let Some(token) = self.next_token()? {
            tokens.push(token);
        }
        Ok(tokens)
    }

    /// Returns the next token, or None at end of input
    pub fn next_token(&mut self) -> CalcResult<Option<Token>> {
        self.skip_whitespace();

        let Some(ch) = self.current_char() else {
            return Ok(None);
        };

        let token = match ch {
            '0'..='9' | '.' => self.read_number()?,
            '+' => self.operator(Operator::Add),
            '-' => self.operator(Operator::Subtract),
            '*' => {
                self.advance();
                if self.eat('*') {
                    Token::Operator(Operator::Power)
                } else {
                    Token::Operator(Operator::Multiply)
                }
            }
            '/' => {
                self.advance();
                if self.eat('/') {
                    Token::Operator(Operator::FloorDivide)
                } else {
                    Token::Operator(Operator::Divide)
                }
            }
            '%' => self.operator(Operator::Modulo),
            '^' => self.operator(Operator::Power),
            '(' => {
                self.advance();
                Token::LeftParen
            }
            ')' => {
                self.advance();
                Token::RightParen
            }
            '√' => {
                self.advance();
                Token::Name("sqrt".into())
            }
            c if c.is_alphabetic() || c == '_' => self.read_name(),
            _ => {
                return Err(CalcError::syntax(format!("unexpected character '{ch}'")));
            }
        };

        Ok(Some(token))
    }

    fn operator(&mut self, op: Operator) -> Token {
        self.advance();
        Token::Operator(op)
    }

    fn current_char(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn advance(&mut self) {
        if let Some(ch) = self.current_char() {
            self.pos += ch.len_utf8();
        }
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.current_char() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.current_char() {
            if ch.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn skip_digits(&mut self) {
        while matches!(self.current_char(), Some(c) if c.is_ascii_digit()) {
            self.advance();
        }
    }

    fn read_number(&mut self) -> CalcResult<Token> {
        let input = self.input;
        let start = self.pos;
        let mut dots = 0;

        while let Some(ch) = self.current_char() {
            if ch.is_ascii_digit() {
                self.advance();
            } else if ch == '.' {
                dots += 1;
                self.advance();
            } else {
                break;
            }
        }

        let mantissa = &input[start..self.pos];
        if dots > 1 {
            return Err(CalcError::syntax(format!("malformed number '{mantissa}'")));
        }
        if mantissa == "." {
            return Err(CalcError::syntax("decimal point without digits"));
        }

        let has_exponent = self.read_exponent();

        // `012` is rejected, `00`, `0.12` and `012e1` are fine
        if dots == 0
            && !has_exponent
            && mantissa.len() > 1
            && mantissa.starts_with('0')
            && mantissa.bytes().any(|b| b != b'0')
        {
            return Err(CalcError::syntax(format!("leading zero in '{mantissa}'")));
        }

        let text = &input[start..self.pos];
        let value: f64 = text
            .parse()
            .map_err(|_| CalcError::syntax(format!("invalid number '{text}'")))?;

        Ok(Token::Number(value))
    }

    /// Consume `e[+-]digits` if it follows the mantissa. A bare `e` is left
    /// for the name reader.
    fn read_exponent(&mut self) -> bool {
        if !matches!(self.current_char(), Some('e' | 'E')) {
            return false;
        }
        let rest = &self.input[self.pos + 1..];
        let sign_len = usize::from(rest.starts_with(['+', '-']));
        if !rest[sign_len..].starts_with(|c: char| c.is_ascii_digit()) {
            return false;
        }
        self.pos += 1 + sign_len;
        self.skip_digits();
        true
    }

    fn read_name(&mut self) -> Token {
        let start = self.pos;
        while matches!(self.current_char(), Some(c) if c.is_alphanumeric() || c == '_') {
            self.advance();
        }
        Token::Name(self.input[start..self.pos].to_string())
    }
}

/// Recursive descent parser
///
/// Grammar:
/// ```text
/// expression ::= term (('+' | '-') term)*
/// term       ::= unary (('*' | '/' | '//' | '%') unary)*
/// unary      ::= ('+' | '-') unary | power
/// power      ::= postfix ('^' unary)?          // right associative
/// postfix    ::= primary ('(' expression? ')')*
/// primary    ::= NUMBER | NAME | '(' expression ')'
/// ```
///
/// A sign on the left binds looser than `^`, so `-2^2` is `-4`.
#[derive(Debug)]
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
}

impl Parser {
    #[must_use]
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            pos: 0,
            depth: 0,
        }
    }

    /// Parses a string expression into an AST
    pub fn parse_str(input: &str) -> CalcResult<AstNode> {
        let tokens = Tokenizer::new(input).tokenize()?;
        Self::new(tokens).parse()
    }

    /// Parses all tokens into an AST
    pub fn parse(&mut self) -> CalcResult<AstNode> {
        if self.tokens.is_empty() {
            return Err(CalcError::Empty);
        }

        let ast = self.parse_expression()?;

        if let Some(token) = self.current() {
            return Err(CalcError::syntax(format!(
                "unexpected '{token}' at token {}",
                self.pos
            )));
        }

        Ok(ast)
    }

    fn current(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<&Token> {
        let token = self.tokens.get(self.pos);
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn descend(&mut self) -> CalcResult<()> {
        if self.depth >= MAX_DEPTH {
            return Err(CalcError::syntax("expression nested too deeply"));
        }
        self.depth += 1;
        Ok(())
    }

    /// Runs `parse` and restores the depth it started at, so levels taken by
    /// a chain inside `parse` are released once the chain is built.
    fn scoped(&mut self, parse: impl FnOnce(&mut Self) -> CalcResult<AstNode>) -> CalcResult<AstNode> {
        let start = self.depth;
        let result = parse(self);
        self.depth = start;
        result
    }

    fn nested(&mut self, parse: fn(&mut Self) -> CalcResult<AstNode>) -> CalcResult<AstNode> {
        self.scoped(|p| {
            p.descend()?;
            parse(p)
        })
    }

    fn parse_expression(&mut self) -> CalcResult<AstNode> {
        self.scoped(Self::parse_sum)
    }

    // Each operator in a chain deepens the left spine by one node.
    fn parse_sum(&mut self) -> CalcResult<AstNode> {
        let mut left = self.parse_term()?;

        while let Some(token) = self.current() {
            let op = match token {
                Token::Operator(op @ (Operator::Add | Operator::Subtract)) => *op,
                _ => break,
            };
            self.advance();
            self.descend()?;
            let right = self.parse_term()?;
            left = AstNode::binary(left, op, right);
        }

        Ok(left)
    }

    fn parse_term(&mut self) -> CalcResult<AstNode> {
        self.scoped(Self::parse_product)
    }

    fn parse_product(&mut self) -> CalcResult<AstNode> {
        let mut left = self.parse_unary()?;

        while let Some(token) = self.current() {
            let op = match token {
                Token::Operator(
                    op @ (Operator::Multiply
                    | Operator::Divide
                    | Operator::FloorDivide
                    | Operator::Modulo),
                ) => *op,
                _ => break,
            };
            self.advance();
            self.descend()?;
            let right = self.parse_unary()?;
            left = AstNode::binary(left, op, right);
        }

        Ok(left)
    }

    fn parse_unary(&mut self) -> CalcResult<AstNode> {
        match self.current() {
            Some(Token::Operator(Operator::Subtract)) => {
                self.advance();
                let inner = self.nested(Self::parse_unary)?;
                Ok(AstNode::negate(inner))
            }
            Some(Token::Operator(Operator::Add)) => {
                self.advance();
                self.nested(Self::parse_unary)
            }
            _ => self.parse_power(),
        }
    }

    fn parse_power(&mut self) -> CalcResult<AstNode> {
        let base = self.parse_postfix()?;

        if matches!(self.current(), Some(Token::Operator(Operator::Power))) {
            self.advance();
            let exponent = self.nested(Self::parse_unary)?;
            return Ok(AstNode::binary(base, Operator::Power, exponent));
        }

        Ok(base)
    }

    fn parse_postfix(&mut self) -> CalcResult<AstNode> {
        self.scoped(Self::parse_calls)
    }

    fn parse_calls(&mut self) -> CalcResult<AstNode> {
        let mut node = self.parse_primary()?;

        while matches!(self.current(), Some(Token::LeftParen)) {
            self.advance();
            self.descend()?;
            let arg = if matches!(self.current(), Some(Token::RightParen)) {
                None
            } else {
                Some(self.nested(Self::parse_expression)?)
            };
            self.expect_right_paren()?;
            node = AstNode::call(node, arg);
        }

        Ok(node)
    }

    fn parse_primary(&mut self) -> CalcResult<AstNode> {
        let token = self
            .advance()
            .cloned()
            .ok_or_else(|| CalcError::syntax("unexpected end of expression"))?;

        match token {
            Token::Number(n) => Ok(AstNode::number(n)),
            Token::Name(name) => Ok(AstNode::Name(name)),
            Token::LeftParen => {
                if matches!(self.current(), Some(Token::RightParen)) {
                    return Err(CalcError::syntax("empty parentheses"));
                }
                let expr = self.nested(Self::parse_expression)?;
                self.expect_right_paren()?;
                Ok(expr)
            }
            other => Err(CalcError::syntax(format!("unexpected '{other}'"))),
        }
    }

    fn expect_right_paren(&mut self) -> CalcResult<()> {
        match self.advance() {
            Some(Token::RightParen) => Ok(()),
            Some(t) => Err(CalcError::syntax(format!("expected ')' but found '{t}'"))),
            None => Err(CalcError::syntax("unclosed parenthesis")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(input: &str) -> Vec<Token> {
        Tokenizer::new(input).tokenize().unwrap()
    }

    fn is_syntax_error(input: &str) -> bool {
        matches!(Parser::parse_str(input), Err(CalcError::Syntax(_)))
    }

    // ===== Tokenizer tests =====

    #[test]
    fn test_tokenize_numbers() {
        assert_eq!(tokens("42"), vec![Token::Number(42.0)]);
        assert_eq!(tokens("3.25"), vec![Token::Number(3.25)]);
        assert_eq!(tokens(".5"), vec![Token::Number(0.5)]);
        assert_eq!(tokens("5."), vec![Token::Number(5.0)]);
        assert_eq!(tokens("00"), vec![Token::Number(0.0)]);
    }

    #[test]
    fn test_tokenize_exponent() {
        assert_eq!(tokens("1.5e20"), vec![Token::Number(1.5e20)]);
        assert_eq!(tokens("1e-10"), vec![Token::Number(1e-10)]);
        assert_eq!(tokens("2E+3"), vec![Token::Number(2000.0)]);
        // a dangling `e` is a name, not part of the number
        assert_eq!(
            tokens("2e"),
            vec![Token::Number(2.0), Token::Name("e".into())]
        );
    }

    #[test]
    fn test_tokenize_operators() {
        assert_eq!(
            tokens("+ - * / // % ^ **"),
            vec![
                Token::Operator(Operator::Add),
                Token::Operator(Operator::Subtract),
                Token::Operator(Operator::Multiply),
                Token::Operator(Operator::Divide),
                Token::Operator(Operator::FloorDivide),
                Token::Operator(Operator::Modulo),
                Token::Operator(Operator::Power),
                Token::Operator(Operator::Power),
            ]
        );
    }

    #[test]
    fn test_tokenize_names() {
        assert_eq!(
            tokens("sqrt(4)"),
            vec![
                Token::Name("sqrt".into()),
                Token::LeftParen,
                Token::Number(4.0),
                Token::RightParen,
            ]
        );
        assert_eq!(tokens("√")[0], Token::Name("sqrt".into()));
    }

    #[test]
    fn test_tokenize_rejects_malformed_numbers() {
        assert!(Tokenizer::new("1.2.3").tokenize().is_err());
        assert!(Tokenizer::new(".").tokenize().is_err());
        assert!(Tokenizer::new("012").tokenize().is_err());
        assert!(Tokenizer::new("012.5").tokenize().is_ok());
        assert!(Tokenizer::new("012e1").tokenize().is_ok());
    }

    #[test]
    fn test_tokenize_invalid_char() {
        let result = Tokenizer::new("2 @ 3").tokenize();
        assert!(matches!(result, Err(CalcError::Syntax(_))));
    }

    #[test]
    fn test_tokenize_empty_and_whitespace() {
        assert!(tokens("").is_empty());
        assert!(tokens("   ").is_empty());
    }

    // ===== Parser tests =====

    #[test]
    fn test_parse_single_number() {
        assert_eq!(Parser::parse_str("42").unwrap(), AstNode::Number(42.0));
    }

    #[test]
    fn test_parse_precedence_mul_over_add() {
        assert_eq!(
            Parser::parse_str("2 + 3 * 4").unwrap(),
            AstNode::binary(
                AstNode::number(2.0),
                Operator::Add,
                AstNode::binary(AstNode::number(3.0), Operator::Multiply, AstNode::number(4.0)),
            )
        );
    }

    #[test]
    fn test_parse_left_associative() {
        assert_eq!(
            Parser::parse_str("8 - 3 - 1").unwrap(),
            AstNode::binary(
                AstNode::binary(AstNode::number(8.0), Operator::Subtract, AstNode::number(3.0)),
                Operator::Subtract,
                AstNode::number(1.0),
            )
        );
    }

    #[test]
    fn test_parse_power_right_associative() {
        assert_eq!(
            Parser::parse_str("2 ^ 3 ^ 2").unwrap(),
            AstNode::binary(
                AstNode::number(2.0),
                Operator::Power,
                AstNode::binary(AstNode::number(3.0), Operator::Power, AstNode::number(2.0)),
            )
        );
    }

    #[test]
    fn test_parse_negation_binds_looser_than_power() {
        assert_eq!(
            Parser::parse_str("-2^2").unwrap(),
            AstNode::negate(AstNode::binary(
                AstNode::number(2.0),
                Operator::Power,
                AstNode::number(2.0)
            ))
        );
        assert_eq!(
            Parser::parse_str("2^-1").unwrap(),
            AstNode::binary(
                AstNode::number(2.0),
                Operator::Power,
                AstNode::negate(AstNode::number(1.0))
            )
        );
    }

    #[test]
    fn test_parse_unary_plus_and_repeated_signs() {
        assert_eq!(Parser::parse_str("+5").unwrap(), AstNode::number(5.0));
        assert_eq!(
            Parser::parse_str("2--3").unwrap(),
            AstNode::binary(
                AstNode::number(2.0),
                Operator::Subtract,
                AstNode::negate(AstNode::number(3.0))
            )
        );
    }

    #[test]
    fn test_parse_call() {
        assert_eq!(
            Parser::parse_str("sqrt(9)").unwrap(),
            AstNode::call(AstNode::Name("sqrt".into()), Some(AstNode::number(9.0)))
        );
        assert_eq!(
            Parser::parse_str("2(3)").unwrap(),
            AstNode::call(AstNode::number(2.0), Some(AstNode::number(3.0)))
        );
        assert_eq!(
            Parser::parse_str("sqrt()").unwrap(),
            AstNode::call(AstNode::Name("sqrt".into()), None)
        );
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(Parser::parse_str(""), Err(CalcError::Empty));
        assert!(is_syntax_error("2 +"));
        assert!(is_syntax_error("*2"));
        assert!(is_syntax_error("(2 + 3"));
        assert!(is_syntax_error("2 + 3)"));
        assert!(is_syntax_error("()"));
        assert!(is_syntax_error("2 3"));
        assert!(is_syntax_error("2^^3"));
        assert!(is_syntax_error("2***3"));
        assert!(is_syntax_error("2sqrt(4)"));
    }

    #[test]
    fn test_parse_depth_limit() {
        let deep = format!("{}1{}", "(".repeat(MAX_DEPTH + 10), ")".repeat(MAX_DEPTH + 10));
        assert!(is_syntax_error(&deep));

        let shallow = format!("{}1{}", "(".repeat(50), ")".repeat(50));
        assert_eq!(Parser::parse_str(&shallow), Ok(AstNode::number(1.0)));

        let signs = format!("{}1", "-".repeat(MAX_DEPTH + 10));
        assert!(is_syntax_error(&signs));
    }

    #[test]
    fn test_long_operator_chains_hit_depth_limit() {
        let sum = vec!["1"; 20_000].join("+");
        assert!(is_syntax_error(&sum));
        assert!(matches!(crate::engine::evaluate_str(&sum), Err(CalcError::Syntax(_))));

        let product = vec!["2"; 20_000].join("*");
        assert!(is_syntax_error(&product));

        let calls = format!("sqrt(4){}", "(1)".repeat(20_000));
        assert!(is_syntax_error(&calls));
    }

    #[test]
    fn test_chains_within_limit() {
        let sum = vec!["1"; 200].join("+");
        assert_eq!(crate::engine::evaluate_str(&sum), Ok(200.0));

        // chain levels are released once the chain is closed
        let groups = vec![format!("({})", vec!["1"; 200].join("+")); 3].join("+");
        assert_eq!(crate::engine::evaluate_str(&groups), Ok(600.0));
    }
}
