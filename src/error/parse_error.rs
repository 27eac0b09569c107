use thiserror::Error;

/// Represents all errors the parser can record for a line.
///
/// None of these stop parsing. Each carries the byte offset of the token
/// where the problem was noticed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Found a token that cannot start or continue an expression here.
    #[error("unexpected token: {token}")]
    UnexpectedToken {
        /// The literal text of the token.
        token: String,
        /// Byte offset of the token.
        pos:   usize,
    },
    /// A number literal could not be read as a float.
    #[error("invalid number: {literal}")]
    InvalidNumber {
        /// The literal text of the number.
        literal: String,
        /// Byte offset of the number.
        pos:     usize,
    },
    /// An operator, `=` or `of` had nothing after it.
    #[error("expected expression after {after}")]
    MissingOperand {
        /// What the missing expression should have followed.
        after: &'static str,
        /// Byte offset where the operand was expected.
        pos:   usize,
    },
    /// `()` with nothing inside.
    #[error("expected expression inside parentheses")]
    EmptyGroup {
        /// Byte offset where the expression was expected.
        pos: usize,
    },
    /// A group was not closed.
    #[error("expected ')' after expression")]
    UnclosedGroup {
        /// Byte offset where `)` was expected.
        pos: usize,
    },
    /// A function call's argument list was not closed.
    #[error("expected ')' after function arguments")]
    UnclosedCall {
        /// Byte offset where `)` was expected.
        pos: usize,
    },
    /// A line starting with `in`/`to` had no target.
    #[error("expected unit or currency after 'in'/'to'")]
    MissingConversionTarget {
        /// Byte offset where the target was expected.
        pos: usize,
    },
    /// A currency glyph was not followed by an amount.
    #[error("expected number after currency symbol")]
    MissingAmount {
        /// Byte offset where the amount was expected.
        pos: usize,
    },
}

impl ParseError {
    /// Returns the byte offset the error refers to.
    #[must_use]
    pub const fn pos(&self) -> usize {
        match self {
            Self::UnexpectedToken { pos, .. }
            | Self::InvalidNumber { pos, .. }
            | Self::MissingOperand { pos, .. }
            | Self::EmptyGroup { pos }
            | Self::UnclosedGroup { pos }
            | Self::UnclosedCall { pos }
            | Self::MissingConversionTarget { pos }
            | Self::MissingAmount { pos } => *pos,
        }
    }
}
