use std::fmt;

use logos::Logos;

/// The kind of a lexical token.
///
/// Most variants are produced directly by the derived logos state machine.
/// `Eof` and `Illegal` are synthesized by the [`Lexer`] wrapper: `Eof` closes
/// every token stream and `Illegal` carries any input logos could not match.
///
/// [`Lexer`]: crate::interpreter::lexer::Lexer
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[logos(skip r"[ \t\r]+")]
pub enum TokenKind {
    /// End of input. Always the last token of a stream.
    Eof,
    /// Input that matched no rule.
    Illegal,

    /// Numeric literal tokens, such as `42`, `1,234.56`, `.5` or `2.1e-10`.
    #[regex(r"[0-9]+(,[0-9][0-9][0-9])*(\.[0-9]+)?([eE][+-]?[0-9]+)?")]
    #[regex(r"\.[0-9]+([eE][+-]?[0-9]+)?")]
    Number,
    /// A number immediately followed by `%`, such as `20%`.
    #[regex(r"[0-9]+(,[0-9][0-9][0-9])*(\.[0-9]+)?([eE][+-]?[0-9]+)?%")]
    #[regex(r"\.[0-9]+([eE][+-]?[0-9]+)?%")]
    Percent,
    /// Identifier tokens: variable names, function names, currency and unit
    /// names such as `price`, `sqrt` or `km`.
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
    Identifier,

    /// `+`
    #[token("+")]
    Plus,
    /// `-`
    #[token("-")]
    Minus,
    /// `*`
    #[token("*")]
    Star,
    /// `/`
    #[token("/")]
    Slash,
    /// `^`
    #[token("^")]
    Caret,
    /// `**`
    #[token("**")]
    Power,
    /// A standalone `%` or the `mod` keyword.
    #[token("%")]
    #[token("mod", ignore(case))]
    Mod,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `=`
    #[token("=")]
    Equals,
    /// `,`
    #[token(",")]
    Comma,

    /// `in` or `to`
    #[token("in", ignore(case))]
    #[token("to", ignore(case))]
    In,
    /// `of`
    #[token("of", ignore(case))]
    Of,

    /// `$`
    #[token("$")]
    Dollar,
    /// `€`
    #[token("€")]
    Euro,
    /// `£`
    #[token("£")]
    Pound,
    /// `¥`
    #[token("¥")]
    Yen,
    /// `₿`
    #[token("₿")]
    Bitcoin,
    /// Any other single-glyph currency or crypto symbol.
    #[regex(r"[₹₩₽₪₴₺₮₳ÐŁΞ◎]")]
    CurrencySymbol,

    /// `# comment` or `// comment`, kept whole so a line can be redisplayed.
    #[regex(r"#[^\n]*", allow_greedy = true)]
    #[regex(r"//[^\n]*", allow_greedy = true)]
    Comment,
    /// `\n`
    #[token("\n")]
    NewLine,
}

impl TokenKind {
    /// Returns `true` for the kinds that open a typed literal from a glyph,
    /// such as `$` or `₿`.
    #[must_use]
    pub const fn is_currency_glyph(self) -> bool {
        matches!(self,
                 Self::Dollar | Self::Euro | Self::Pound | Self::Yen | Self::Bitcoin | Self::CurrencySymbol)
    }

    /// Returns `true` for the kinds that may begin a continuation line.
    #[must_use]
    pub const fn is_binary_operator(self) -> bool {
        matches!(self,
                 Self::Plus
                 | Self::Minus
                 | Self::Star
                 | Self::Slash
                 | Self::Caret
                 | Self::Power
                 | Self::Mod)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Eof => "EOF",
            Self::Illegal => "ILLEGAL",
            Self::Number => "NUMBER",
            Self::Percent => "PERCENT",
            Self::Identifier => "IDENTIFIER",
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Star => "*",
            Self::Slash => "/",
            Self::Caret => "^",
            Self::Power => "**",
            Self::Mod => "mod",
            Self::LParen => "(",
            Self::RParen => ")",
            Self::Equals => "=",
            Self::Comma => ",",
            Self::In => "in",
            Self::Of => "of",
            Self::Dollar => "$",
            Self::Euro => "€",
            Self::Pound => "£",
            Self::Yen => "¥",
            Self::Bitcoin => "₿",
            Self::CurrencySymbol => "CURRENCY",
            Self::Comment => "COMMENT",
            Self::NewLine => "NEWLINE",
        };
        f.write_str(name)
    }
}

/// A lexical token.
///
/// `literal` is always the exact slice of the source the token was read from,
/// so `&source[token.pos..token.end()] == token.literal`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// What kind of token this is.
    pub kind:    TokenKind,
    /// The exact source text of the token.
    pub literal: String,
    /// Byte offset of the token's first byte.
    pub pos:     usize,
}

impl Token {
    /// Creates a token.
    #[must_use]
    pub fn new(kind: TokenKind, literal: impl Into<String>, pos: usize) -> Self {
        Self { kind,
               literal: literal.into(),
               pos }
    }

    /// Byte offset one past the token's last byte.
    #[must_use]
    pub const fn end(&self) -> usize {
        self.pos + self.literal.len()
    }

    /// Returns `true` if the token has the given kind.
    #[must_use]
    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }
}
