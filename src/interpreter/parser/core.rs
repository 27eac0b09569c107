use std::{iter::Peekable, slice};

use crate::{
    ast::Expr,
    error::ParseError,
    interpreter::token::{Token, TokenKind},
};

/// A recursive-descent parser over one line's tokens.
///
/// The parser never aborts. When something is missing it records a
/// [`ParseError`] and carries on with a placeholder, so every input yields a
/// tree. Parsing methods return `None` when no expression starts at the
/// current token.
pub struct Parser<'a> {
    pub(super) source: &'a str,
    pub(super) tokens: Peekable<slice::Iter<'a, Token>>,
    pub(super) errors: Vec<ParseError>,
}

impl<'a> Parser<'a> {
    /// Creates a parser over `tokens`, which must have been produced from
    /// `source`.
    #[must_use]
    pub fn new(source: &'a str, tokens: &'a [Token]) -> Self {
        Self { source,
               tokens: tokens.iter().peekable(),
               errors: Vec::new() }
    }

    /// Errors recorded so far.
    #[must_use]
    pub fn errors(&self) -> &[ParseError] {
        &self.errors
    }

    /// Consumes the parser and returns its errors.
    #[must_use]
    pub fn into_errors(self) -> Vec<ParseError> {
        self.errors
    }

    /// Parses a full expression, including a trailing `in TARGET`.
    ///
    /// Grammar: `expression := binary(0) (("in" | "to") target)*`
    pub fn parse_expression(&mut self) -> Option<Expr> {
        let expr = self.parse_binary(0)?;
        Some(self.parse_conversion_suffix(expr))
    }

    /// Kind of the next token; `Eof` once the stream is exhausted.
    pub(super) fn peek_kind(&mut self) -> TokenKind {
        self.tokens.peek().map_or(TokenKind::Eof, |token| token.kind)
    }

    /// Kind of the token after the next one.
    pub(super) fn peek_second_kind(&self) -> TokenKind {
        self.tokens
            .clone()
            .nth(1)
            .map_or(TokenKind::Eof, |token| token.kind)
    }

    /// Byte offset of the next token, or the end of the source.
    pub(super) fn current_pos(&mut self) -> usize {
        let end = self.source.len();
        self.tokens.peek().map_or(end, |token| token.pos)
    }

    pub(super) fn check(&mut self, kind: TokenKind) -> bool {
        self.peek_kind() == kind
    }

    pub(super) fn advance(&mut self) -> Option<&'a Token> {
        self.tokens.next()
    }

    /// Consumes the next token if it has the given kind.
    pub(super) fn eat(&mut self, kind: TokenKind) -> Option<&'a Token> {
        self.tokens.next_if(|token| token.kind == kind)
    }

    /// Consumes a token of `kind`, or records `error` built from the current
    /// position.
    pub(super) fn expect(&mut self, kind: TokenKind, error: impl FnOnce(usize) -> ParseError) {
        if self.eat(kind).is_none() {
            let pos = self.current_pos();
            self.record(error(pos));
        }
    }

    pub(super) fn record(&mut self, error: ParseError) {
        self.errors.push(error);
    }

    /// The source text from byte `start` up to the end of `last`.
    pub(super) fn span(&self, start: usize, last: &Token) -> String {
        self.source
            .get(start..last.end())
            .unwrap_or(&last.literal)
            .to_string()
    }
}
