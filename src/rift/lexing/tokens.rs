//! Token types

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Identifier,
    Number,
    Operator,
    Whitespace,
    Unknown,
}

impl TokenKind {
    /// Resolve the upper-case name used in `*_PATTERN` governance keys
    pub fn from_governance_name(name: &str) -> Option<Self> {
        match name {
            "IDENTIFIER" => Some(TokenKind::Identifier),
            "NUMBER" => Some(TokenKind::Number),
            "OPERATOR" => Some(TokenKind::Operator),
            "WHITESPACE" => Some(TokenKind::Whitespace),
            "UNKNOWN" => Some(TokenKind::Unknown),
            _ => None,
        }
    }

    pub fn governance_name(self) -> &'static str {
        match self {
            TokenKind::Identifier => "IDENTIFIER",
            TokenKind::Number => "NUMBER",
            TokenKind::Operator => "OPERATOR",
            TokenKind::Whitespace => "WHITESPACE",
            TokenKind::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.governance_name())
    }
}

/// A classified lexeme
///
/// `column` is the 1-based ordinal of the token in the stream, not a character offset.
/// `line` is always 1: the accepted grammar is single-line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub line: usize,
    pub column: usize,
    pub priority: i32,
}

impl Token {
    pub fn new(kind: TokenKind, value: impl Into<String>, column: usize, priority: i32) -> Self {
        Token {
            kind,
            value: value.into(),
            line: 1,
            column,
            priority,
        }
    }
}

/// Tokens in left-to-right input order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenStream {
    tokens: Vec<Token>,
}

impl TokenStream {
    pub fn new() -> Self {
        TokenStream { tokens: Vec::new() }
    }

    /// Append a token at the end of the stream
    ///
    /// The stream owns token positions: `column` is overwritten with the token's ordinal and
    /// `line` with 1, whatever the caller set.
    pub fn push(&mut self, mut token: Token) {
        token.line = 1;
        token.column = self.tokens.len() + 1;
        self.tokens.push(token);
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index)
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.tokens.iter()
    }

    /// Token values, handy for assertions and logs
    pub fn values(&self) -> Vec<&str> {
        self.tokens.iter().map(|t| t.value.as_str()).collect()
    }
}

impl<'a> IntoIterator for &'a TokenStream {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}

impl FromIterator<Token> for TokenStream {
    fn from_iter<I: IntoIterator<Item = Token>>(iter: I) -> Self {
        let mut stream = TokenStream::new();
        for token in iter {
            stream.push(token);
        }
        stream
    }
}
