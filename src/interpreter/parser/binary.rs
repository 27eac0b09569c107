use crate::{
    ast::{BinaryOperator, Expr},
    error::ParseError,
    interpreter::{parser::core::Parser, token::TokenKind},
};

impl Parser<'_> {
    /// Parses binary expressions by precedence climbing.
    ///
    /// Operators bind `+ -` < `* / mod` < `^ **`. All are left-associative
    /// except `^`, so `2 ^ 3 ^ 2` is `2 ^ (3 ^ 2)`.
    ///
    /// Grammar: `binary(p) := unary (op binary(p'))*` for every `op` with
    /// precedence at least `p`, where `p'` is one more than the operator's
    /// precedence (or equal to it, for `^`).
    pub(super) fn parse_binary(&mut self, min_precedence: u8) -> Option<Expr> {
        let mut left = self.parse_unary()?;

        while let Some(op) = Self::binary_operator(self.peek_kind())
              && op.precedence() >= min_precedence
        {
            self.advance();

            let next_precedence = if op.is_right_associative() {
                op.precedence()
            } else {
                op.precedence() + 1
            };

            let Some(right) = self.parse_binary(next_precedence) else {
                let pos = self.current_pos();
                self.record(ParseError::MissingOperand { after: "operator",
                                                         pos });
                return Some(left);
            };

            left = Expr::Binary { left: Box::new(left),
                                  op,
                                  right: Box::new(right) };
        }

        Some(left)
    }

    /// Wraps `expr` in a conversion for every trailing `in TARGET`.
    pub(super) fn parse_conversion_suffix(&mut self, mut expr: Expr) -> Expr {
        while self.eat(TokenKind::In).is_some() {
            let Some(target) = self.parse_conversion_target() else {
                let pos = self.current_pos();
                self.record(ParseError::MissingConversionTarget { pos });
                break;
            };
            expr = Expr::Conversion { expr: Box::new(expr),
                                      target };
        }
        expr
    }

    /// Reads a conversion target: a name such as `EUR` or `miles`, or a
    /// currency glyph such as `€`.
    pub(super) fn parse_conversion_target(&mut self) -> Option<String> {
        let kind = self.peek_kind();
        if kind == TokenKind::Identifier || kind.is_currency_glyph() {
            return self.advance().map(|token| token.literal.clone());
        }
        None
    }

    /// Maps an operator token to its binary operator.
    pub(super) const fn binary_operator(kind: TokenKind) -> Option<BinaryOperator> {
        match kind {
            TokenKind::Plus => Some(BinaryOperator::Add),
            TokenKind::Minus => Some(BinaryOperator::Sub),
            TokenKind::Star => Some(BinaryOperator::Mul),
            TokenKind::Slash => Some(BinaryOperator::Div),
            TokenKind::Mod => Some(BinaryOperator::Mod),
            TokenKind::Caret | TokenKind::Power => Some(BinaryOperator::Pow),
            _ => None,
        }
    }
}
