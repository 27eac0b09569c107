use tracing::debug;

use crate::{
    ast::{Expr, Line, Statement},
    error::ParseError,
    interpreter::{parser::core::Parser, token::TokenKind},
};

impl Parser<'_> {
    /// Parses one line: a statement, an optional note and trailing comment,
    /// and a check that nothing else follows.
    ///
    /// A note is any run of words after a complete statement, as in
    /// `$50 lunch`. It is kept in the raw text only.
    ///
    /// Grammar:
    /// ```text
    /// line := comment
    ///       | statement [note] [comment]
    /// note := identifier { token }
    /// ```
    pub fn parse_line(&mut self) -> Line {
        while self.eat(TokenKind::NewLine).is_some() {}

        let raw = self.source.to_string();

        if self.check(TokenKind::Eof) {
            return Line { statement: Statement::Empty,
                          comment: None,
                          raw };
        }

        if let Some(comment) = self.eat(TokenKind::Comment) {
            return Line { statement: Statement::Comment(comment.literal.clone()),
                          comment: Some(comment.literal.clone()),
                          raw };
        }

        let statement = self.parse_statement();
        if self.check(TokenKind::Identifier) {
            self.skip_note();
        }
        let comment = self.eat(TokenKind::Comment)
                          .map(|token| token.literal.clone());

        if !matches!(self.peek_kind(), TokenKind::Eof | TokenKind::NewLine)
           && let Some(token) = self.advance()
        {
            self.record(ParseError::UnexpectedToken { token: token.literal.clone(),
                                                      pos:   token.pos, });
        }

        for error in &self.errors {
            debug!(pos = error.pos(), %error, "parse error");
        }

        Line { statement,
               comment,
               raw }
    }

    /// Skips a trailing note such as `lunch` in `$50 lunch`, stopping before
    /// a comment or the end of the line.
    fn skip_note(&mut self) {
        while !matches!(self.peek_kind(), TokenKind::Eof | TokenKind::NewLine | TokenKind::Comment) {
            self.advance();
        }
    }

    /// Parses an assignment, a continuation, a conversion continuation or a
    /// plain expression.
    fn parse_statement(&mut self) -> Statement {
        if self.check(TokenKind::Identifier) && self.peek_second_kind() == TokenKind::Equals {
            return self.parse_assignment();
        }

        let kind = self.peek_kind();
        if kind.is_binary_operator() {
            return self.parse_continuation();
        }
        if kind == TokenKind::In {
            return self.parse_conversion_continuation();
        }

        self.parse_expression()
            .map_or(Statement::Empty, Statement::Expression)
    }

    /// `name = expr`. A missing right-hand side records an error and assigns
    /// a `0` placeholder.
    fn parse_assignment(&mut self) -> Statement {
        let name = self.advance()
                       .map(|token| token.literal.clone())
                       .unwrap_or_default();
        self.advance();

        let Some(expr) = self.parse_expression() else {
            let pos = self.current_pos();
            self.record(ParseError::MissingOperand { after: "'='",
                                                     pos });
            return Statement::Assignment { name,
                                           expr: Expr::number(0.0) };
        };

        Statement::Assignment { name, expr }
    }

    /// `op expr`, applied to the previous line's result at evaluation time.
    fn parse_continuation(&mut self) -> Statement {
        let op = self.advance()
                     .and_then(|token| Self::binary_operator(token.kind));

        match (op, self.parse_expression()) {
            (Some(op), Some(expr)) => Statement::Expression(Expr::Continuation { op,
                                                                                 expr: Box::new(expr) }),
            _ => {
                let pos = self.current_pos();
                self.record(ParseError::MissingOperand { after: "operator",
                                                         pos });
                Statement::Empty
            },
        }
    }

    /// `in TARGET` / `to TARGET`, converting the previous line's result.
    fn parse_conversion_continuation(&mut self) -> Statement {
        self.advance();

        match self.parse_conversion_target() {
            Some(target) => Statement::Expression(Expr::ConversionContinuation { target }),
            None => {
                let pos = self.current_pos();
                self.record(ParseError::MissingConversionTarget { pos });
                Statement::Empty
            },
        }
    }
}
