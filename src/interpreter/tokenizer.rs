use crate::{error::ParseError, interpreter::ops};

/// Classifies a token produced by the [`Tokenizer`].
///
/// The tokenizer never emits [`Function`](TokenKind::Function); identifiers
/// are reclassified as functions by the parser when a known function name is
/// followed by `(`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// A numeric literal, possibly signed, in scientific notation or with a
    /// trailing imaginary `i`.
    Number,
    /// A variable or function name.
    Identifier,
    /// A registered operator symbol or word operator.
    Operator,
    /// A function name, assigned by the parser.
    Function,
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `,`
    Comma,
}

/// A lexeme together with its kind and character offset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// The token text as it appeared in the input.
    pub text: String,
    /// The token class.
    pub kind: TokenKind,
    /// Zero-based character offset of the first character.
    pub pos:  usize,
}

impl Token {
    fn new(text: impl Into<String>, kind: TokenKind, pos: usize) -> Self {
        Self { text: text.into(),
               kind,
               pos }
    }
}

/// Splits a preprocessed expression string into [`Token`]s.
///
/// Single pass with one character of lookahead and one token of lookback.
/// The lookback decides whether a `-` starts a signed literal or is the
/// subtraction operator.
///
/// # Example
/// ```
/// use concalc::interpreter::tokenizer::Tokenizer;
///
/// let mut tokens = Tokenizer::new("2+3*4");
/// let mut texts = Vec::new();
/// while tokens.has_next() {
///     texts.push(tokens.next().unwrap().text);
/// }
/// assert_eq!(texts, ["2", "+", "3", "*", "4"]);
/// ```
pub struct Tokenizer {
    chars: Vec<char>,
    pos:   usize,
    prev:  Option<TokenKind>,
}

impl Tokenizer {
    /// Creates a tokenizer over a preprocessed expression string.
    #[must_use]
    pub fn new(input: &str) -> Self {
        Self { chars: input.chars().collect(),
               pos:   0,
               prev:  None, }
    }

    /// Returns the current character offset.
    #[must_use]
    pub const fn pos(&self) -> usize {
        self.pos
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.pos += 1;
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_ahead(&self) -> Option<char> {
        self.chars.get(self.pos + 1).copied()
    }

    /// Returns `true` if another token can be produced.
    pub fn has_next(&mut self) -> bool {
        self.skip_whitespace();
        self.pos < self.chars.len()
    }

    /// Produces the next token.
    ///
    /// # Errors
    /// Returns [`ParseError::UnknownOperator`] for a symbol run that matches
    /// no registered operator.
    pub fn next(&mut self) -> Result<Token, ParseError> {
        self.skip_whitespace();
        let start = self.pos;
        let Some(ch) = self.peek() else {
            return Err(ParseError::EmptyExpression);
        };

        let token = if ch.is_ascii_digit() {
            self.scan_number(start)
        } else if ch == '-' && self.peek_ahead().is_some_and(|c| c.is_ascii_digit()) && self.sign_context() {
            // A sign, not a subtraction: fuse it into the literal it
            // precedes.
            self.pos += 1;
            let literal = self.next()?;
            Token::new(format!("-{}", literal.text), literal.kind, start)
        } else if ch.is_alphabetic() || ch == '_' {
            self.scan_identifier(start)
        } else if matches!(ch, '(' | ')' | ',') {
            self.pos += 1;
            let kind = match ch {
                '(' => TokenKind::LParen,
                ')' => TokenKind::RParen,
                _ => TokenKind::Comma,
            };
            Token::new(ch, kind, start)
        } else {
            self.scan_symbols(start)?
        };

        self.prev = Some(token.kind);
        Ok(token)
    }

    /// True when a `-` here is a sign: at the start of the input, or right
    /// after `(`, `,` or an operator.
    fn sign_context(&self) -> bool {
        matches!(self.prev,
                 None | Some(TokenKind::Operator | TokenKind::LParen | TokenKind::Comma))
    }

    fn scan_number(&mut self, start: usize) -> Token {
        let mut text = String::new();
        let mut last = '\0';
        while let Some(ch) = self.peek() {
            let exponent_sign =
                matches!(ch, '+' | '-') && matches!(last, 'e' | 'E') && !text.is_empty();
            if ch.is_ascii_digit() || matches!(ch, '.' | 'e' | 'E' | 'i') || exponent_sign {
                text.push(ch);
                last = ch;
                self.pos += 1;
            } else {
                break;
            }
        }
        Token::new(text, TokenKind::Number, start)
    }

    fn scan_identifier(&mut self, start: usize) -> Token {
        let mut text = String::new();
        while let Some(ch) = self.peek() {
            if ch.is_alphanumeric() || ch == '_' {
                text.push(ch);
                self.pos += 1;
            } else {
                break;
            }
        }
        let kind = if text.eq_ignore_ascii_case("i") {
            // The bare imaginary unit is a literal, not a variable.
            TokenKind::Number
        } else if ops::is_operator(&text) {
            TokenKind::Operator
        } else {
            TokenKind::Identifier
        };
        Token::new(text, kind, start)
    }

    fn scan_symbols(&mut self, start: usize) -> Result<Token, ParseError> {
        let mut text = String::new();
        while let Some(ch) = self.peek() {
            if ch.is_alphanumeric() || ch == '_' || ch.is_whitespace() || matches!(ch, '(' | ')' | ',') {
                break;
            }
            text.push(ch);
            self.pos += 1;
            // A following '-' belongs to the next token (signed literal or
            // subtraction), never to this run.
            if self.peek() == Some('-') {
                break;
            }
        }
        if ops::is_operator(&text) {
            Ok(Token::new(text, TokenKind::Operator, start))
        } else {
            Err(ParseError::UnknownOperator { text, pos: start })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all(input: &str) -> Vec<Token> {
        let mut tokenizer = Tokenizer::new(input);
        let mut out = Vec::new();
        while tokenizer.has_next() {
            out.push(tokenizer.next().unwrap());
        }
        out
    }

    fn texts(input: &str) -> Vec<String> {
        all(input).into_iter().map(|t| t.text).collect()
    }

    #[test]
    fn scientific_notation_stays_one_literal() {
        assert_eq!(texts("1.5e-3+2"), ["1.5e-3", "+", "2"]);
    }

    #[test]
    fn minus_after_operand_is_subtraction() {
        let tokens = all("5-3");
        assert_eq!(tokens[1].kind, TokenKind::Operator);
        assert_eq!(tokens[2].text, "3");
    }

    #[test]
    fn minus_after_operator_fuses_into_the_literal() {
        assert_eq!(texts("5*-3"), ["5", "*", "-3"]);
        assert_eq!(texts("MAX(-1,-2)"), ["MAX", "(", "-1", ",", "-2", ")"]);
    }

    #[test]
    fn imaginary_literals_and_the_bare_unit() {
        let tokens = all("3i+i");
        assert_eq!(tokens[0].text, "3i");
        assert_eq!(tokens[0].kind, TokenKind::Number);
        assert_eq!(tokens[2].kind, TokenKind::Number);
    }

    #[test]
    fn word_operators_are_operators_not_identifiers() {
        let tokens = all("1 or 2");
        assert_eq!(tokens[1].kind, TokenKind::Operator);
        let tokens = all("orange");
        assert_eq!(tokens[0].kind, TokenKind::Identifier);
    }

    #[test]
    fn multi_character_symbol_runs_must_be_registered() {
        assert_eq!(texts("1>=2"), ["1", ">=", "2"]);
        let mut tokenizer = Tokenizer::new("1@@2");
        tokenizer.next().unwrap();
        assert_eq!(tokenizer.next(),
                   Err(ParseError::UnknownOperator { text: "@@".into(),
                                                     pos:  1, }));
    }

    #[test]
    fn positions_are_character_offsets() {
        let tokens = all("10+x");
        assert_eq!(tokens[0].pos, 0);
        assert_eq!(tokens[1].pos, 2);
        assert_eq!(tokens[2].pos, 3);
    }
}
