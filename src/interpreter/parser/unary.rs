use crate::{
    ast::{Expr, UnaryOperator},
    error::ParseError,
    interpreter::{parser::core::Parser, token::TokenKind},
};

impl Parser<'_> {
    /// Parses prefix `-` and `+`.
    ///
    /// Grammar: `unary := ("-" | "+") unary | postfix`
    pub(super) fn parse_unary(&mut self) -> Option<Expr> {
        let op = match self.peek_kind() {
            TokenKind::Minus => UnaryOperator::Negate,
            TokenKind::Plus => UnaryOperator::Plus,
            _ => return self.parse_postfix(),
        };
        self.advance();

        let expr = self.parse_unary()?;
        Some(Expr::Unary { op,
                           expr: Box::new(expr) })
    }

    /// Parses `PERCENT of unary`. Any other primary is returned unchanged.
    fn parse_postfix(&mut self) -> Option<Expr> {
        let expr = self.parse_primary()?;

        if !matches!(expr, Expr::PercentLit { .. }) || self.eat(TokenKind::Of).is_none() {
            return Some(expr);
        }

        let Some(value) = self.parse_unary() else {
            let pos = self.current_pos();
            self.record(ParseError::MissingOperand { after: "'of'",
                                                     pos });
            return Some(expr);
        };

        Some(Expr::PercentOf { percent: Box::new(expr),
                               value:   Box::new(value), })
    }
}
