use crate::{
    ast::Expr,
    error::ParseError,
    interpreter::{
        parser::core::Parser,
        token::{Token, TokenKind},
        value::{crypto::Crypto, currency::Currency, metal::Metal, unit::Unit},
    },
    util::num::parse_number,
};

impl<'a> Parser<'a> {
    /// Parses literals, names, calls and groups.
    ///
    /// Returns `None` at the end of the line, before a comment, and before
    /// `)` or `,` (which close an enclosing construct). Any other token that
    /// cannot start an operand is consumed and recorded as unexpected.
    pub(super) fn parse_primary(&mut self) -> Option<Expr> {
        let kind = self.peek_kind();
        match kind {
            TokenKind::Number => self.parse_number(),
            TokenKind::Percent => self.parse_percent(),
            TokenKind::Identifier => self.parse_identifier(),
            TokenKind::LParen => Some(self.parse_group()),
            _ if kind.is_currency_glyph() => Some(self.parse_symbol_amount()),
            TokenKind::Eof
            | TokenKind::NewLine
            | TokenKind::Comment
            | TokenKind::RParen
            | TokenKind::Comma => None,
            _ => {
                if let Some(token) = self.advance() {
                    self.record(ParseError::UnexpectedToken { token: token.literal.clone(),
                                                              pos:   token.pos, });
                }
                None
            },
        }
    }

    /// Parses a number, typing it when a currency, crypto, metal or unit
    /// name follows (tried in that order): `100 EUR`, `0.5 btc`, `5 km`.
    /// A currency glyph written after the amount also types it: `100₺`.
    fn parse_number(&mut self) -> Option<Expr> {
        let token = self.advance()?;
        let value = self.number_value(token);

        if self.check(TokenKind::Identifier)
           && let Some(expr) = self.parse_typed_suffix(token, value)
        {
            return Some(expr);
        }

        if self.peek_kind().is_currency_glyph()
           && let Some(expr) = self.parse_trailing_symbol(token, value)
        {
            return Some(expr);
        }

        Some(Expr::NumberLit { value,
                               raw: token.literal.clone() })
    }

    fn parse_typed_suffix(&mut self, number: &Token, amount: f64) -> Option<Expr> {
        let suffix: &'a Token = self.tokens.peek().copied()?;
        let name = suffix.literal.as_str();
        let raw = self.span(number.pos, suffix);

        let expr = if let Some(currency) = Currency::lookup(name) {
            Expr::CurrencyLit { amount,
                                currency,
                                raw }
        } else if let Some(crypto) = Crypto::lookup(name) {
            Expr::CryptoLit { amount,
                              crypto,
                              raw }
        } else if let Some(metal) = Metal::lookup(name) {
            Expr::MetalLit { amount,
                             metal,
                             raw }
        } else if let Some(unit) = Unit::lookup(name) {
            Expr::UnitLit { amount,
                            unit,
                            raw }
        } else {
            return None;
        };

        self.advance();
        Some(expr)
    }

    /// `100₺`: only currencies whose symbol is written after the amount.
    fn parse_trailing_symbol(&mut self, number: &Token, amount: f64) -> Option<Expr> {
        let symbol: &'a Token = self.tokens.peek().copied()?;
        let currency = Currency::by_symbol(&symbol.literal).filter(|currency| currency.symbol_after)?;

        self.advance();
        Some(Expr::CurrencyLit { amount,
                                 currency,
                                 raw: self.span(number.pos, symbol) })
    }

    fn parse_percent(&mut self) -> Option<Expr> {
        let token = self.advance()?;
        let value = self.number_value(token) / 100.0;

        Some(Expr::PercentLit { value,
                                raw: token.literal.clone() })
    }

    /// Parses `GLYPH NUMBER`: `$100`, `€50`, `₿0.5`. The glyph is looked up
    /// as a fiat symbol first, then as a crypto symbol.
    fn parse_symbol_amount(&mut self) -> Expr {
        let Some(symbol) = self.advance() else {
            return Expr::number(0.0);
        };
        let currency = Currency::by_symbol(&symbol.literal);
        let crypto = currency.is_none()
                             .then(|| Crypto::by_symbol(&symbol.literal))
                             .flatten();

        let (amount, last) = match self.eat(TokenKind::Number) {
            Some(number) => (self.number_value(number), number),
            None => {
                let pos = self.current_pos();
                self.record(ParseError::MissingAmount { pos });
                (0.0, symbol)
            },
        };
        let raw = self.span(symbol.pos, last);

        match (currency, crypto) {
            (Some(currency), _) => Expr::CurrencyLit { amount,
                                                       currency,
                                                       raw },
            (None, Some(crypto)) => Expr::CryptoLit { amount,
                                                      crypto,
                                                      raw },
            (None, None) => Expr::NumberLit { value: amount,
                                              raw },
        }
    }

    /// Parses a name or a call. `_` and `ans` (any case) both mean the
    /// previous result and normalize to `_`.
    fn parse_identifier(&mut self) -> Option<Expr> {
        let token = self.advance()?;

        if self.check(TokenKind::LParen) {
            return Some(self.parse_call(token.literal.clone()));
        }

        let name = if token.literal == "_" || token.literal.eq_ignore_ascii_case("ans") {
            "_".to_string()
        } else {
            token.literal.clone()
        };

        Some(Expr::Identifier { name })
    }

    /// Parses `name(arg, ...)`. A missing `)` is recorded and the call is
    /// kept with the arguments read so far.
    fn parse_call(&mut self, name: String) -> Expr {
        self.advance();

        let mut args = Vec::new();
        if !self.check(TokenKind::RParen) {
            loop {
                if let Some(arg) = self.parse_expression() {
                    args.push(arg);
                }
                if self.eat(TokenKind::Comma).is_none() {
                    break;
                }
            }
        }

        self.expect(TokenKind::RParen, |pos| ParseError::UnclosedCall { pos });

        Expr::Call { name, args }
    }

    /// Parses `( expression )`.
    fn parse_group(&mut self) -> Expr {
        self.advance();

        let expr = match self.parse_expression() {
            Some(expr) => expr,
            None => {
                let pos = self.current_pos();
                self.record(ParseError::EmptyGroup { pos });
                Expr::number(0.0)
            },
        };

        self.expect(TokenKind::RParen, |pos| ParseError::UnclosedGroup { pos });

        Expr::Group { expr: Box::new(expr) }
    }

    /// Reads a `Number` or `Percent` token's value, recording an error and
    /// returning 0 when it does not parse.
    fn number_value(&mut self, token: &Token) -> f64 {
        if let Some(value) = parse_number(&token.literal) {
            return value;
        }
        self.record(ParseError::InvalidNumber { literal: token.literal.clone(),
                                                pos:     token.pos, });
        0.0
    }
}
