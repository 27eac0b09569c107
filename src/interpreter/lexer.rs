use logos::Logos;

use crate::interpreter::token::{Token, TokenKind};

/// Phrases that lex as a single identifier.
///
/// The first word is the trigger; the remaining words are read speculatively
/// and must all match (ASCII case-insensitive). When several phrases share a
/// trigger, the longest complete match wins.
const PHRASES: &[&[&str]] = &[
    // Currencies
    &["us", "dollar"],
    &["us", "dollars"],
    &["british", "pound"],
    &["british", "pounds"],
    &["swiss", "franc"],
    &["swiss", "francs"],
    &["canadian", "dollar"],
    &["canadian", "dollars"],
    &["australian", "dollar"],
    &["australian", "dollars"],
    &["aussie", "dollar"],
    &["kiwi", "dollar"],
    &["new", "zealand", "dollar"],
    &["hong", "kong", "dollar"],
    &["singapore", "dollar"],
    &["taiwan", "dollar"],
    &["nt", "dollar"],
    &["mexican", "peso"],
    &["argentine", "peso"],
    &["chilean", "peso"],
    &["colombian", "peso"],
    &["philippine", "peso"],
    &["brazilian", "real"],
    &["turkish", "lira"],
    &["turk", "lirasi"],
    &["czech", "koruna"],
    &["swedish", "krona"],
    &["swedish", "kronor"],
    &["norwegian", "krone"],
    &["norwegian", "kroner"],
    &["danish", "krone"],
    &["danish", "kroner"],
    &["emirati", "dirham"],
    &["saudi", "riyal"],
    &["qatari", "riyal"],
    &["kuwaiti", "dinar"],
    &["egyptian", "pound"],
    &["chinese", "yuan"],
    &["korean", "won"],
    &["south", "korean", "won"],
    &["south", "african", "rand"],
    &["indian", "rupee"],
    &["indian", "rupees"],
    &["pakistani", "rupee"],
    &["bangladeshi", "taka"],
    &["malaysian", "ringgit"],
    &["thai", "baht"],
    &["indonesian", "rupiah"],
    &["vietnamese", "dong"],
    &["nigerian", "naira"],
    &["kenyan", "shilling"],
    // Crypto
    &["usd", "coin"],
    &["binance", "usd"],
    &["binance", "coin"],
    &["shiba", "inu"],
    &["near", "protocol"],
    // Units
    &["square", "meter"],
    &["square", "meters"],
    &["square", "kilometer"],
    &["square", "kilometers"],
    &["square", "foot"],
    &["square", "feet"],
    &["square", "mile"],
    &["square", "miles"],
    &["sq", "m"],
    &["sq", "km"],
    &["sq", "ft"],
    &["sq", "mi"],
    &["cubic", "meter"],
    &["cubic", "meters"],
    &["cubic", "metre"],
    &["cubic", "metres"],
    &["fluid", "ounce"],
    &["fluid", "ounces"],
    &["fl", "oz"],
    &["troy", "ounce"],
    &["troy", "ounces"],
    &["oz", "t"],
    &["nautical", "mile"],
    &["nautical", "miles"],
    &["metric", "ton"],
    &["metric", "tons"],
];

/// Splits one calculator line into tokens.
///
/// `Lexer` drives the logos-derived [`TokenKind`] machine and layers the
/// context-sensitive rules on top of it:
///
/// - a `-` directly followed by a digit at the start of an expression folds
///   into the number that follows it;
/// - a word that begins a known phrase (`turkish lira`, `square feet`) absorbs
///   the following words when they complete the phrase, and otherwise leaves
///   the input exactly where it was;
/// - unmatched input becomes [`TokenKind::Illegal`] instead of an error.
///
/// Iterating a `Lexer` yields every token up to and including a single
/// [`TokenKind::Eof`].
///
/// # Example
/// ```
/// use tally::interpreter::{lexer::Lexer, token::TokenKind};
///
/// let kinds: Vec<_> = Lexer::new("100 - 5").map(|t| t.kind).collect();
/// assert_eq!(kinds,
///            [TokenKind::Number, TokenKind::Minus, TokenKind::Number, TokenKind::Eof]);
///
/// let tokens = Lexer::new("(-5").tokenize();
/// assert_eq!(tokens[1].literal, "-5");
/// ```
pub struct Lexer<'src> {
    source: &'src str,
    inner:  logos::Lexer<'src, TokenKind>,
    done:   bool,
}

impl<'src> Lexer<'src> {
    /// Creates a lexer over a single line (or several, separated by `\n`).
    #[must_use]
    pub fn new(source: &'src str) -> Self {
        Self { source,
               inner: TokenKind::lexer(source),
               done: false }
    }

    /// Byte offset of the next unread character.
    #[must_use]
    pub fn pos(&self) -> usize {
        self.inner.span().end
    }

    /// Consumes the lexer and returns all tokens, ending with `Eof`.
    #[must_use]
    pub fn tokenize(self) -> Vec<Token> {
        self.collect()
    }

    /// Returns the next token. After the input is exhausted this keeps
    /// returning `Eof`.
    pub fn next_token(&mut self) -> Token {
        let Some(result) = self.inner.next() else {
            return Token::new(TokenKind::Eof, "", self.source.len());
        };

        let span = self.inner.span();
        let kind = result.unwrap_or(TokenKind::Illegal);

        match kind {
            TokenKind::Minus if self.starts_negative_number(span.start) => {
                self.read_negative_number(span.start)
            },
            TokenKind::Identifier => self.read_identifier(span.start, span.end),
            _ => Token::new(kind, &self.source[span.start..span.end], span.start),
        }
    }

    /// A `-` starts a negative literal when a digit follows immediately and
    /// the nearest preceding non-blank character cannot end an operand.
    fn starts_negative_number(&self, minus_pos: usize) -> bool {
        let followed_by_digit = self.source
                                    .as_bytes()
                                    .get(minus_pos + 1)
                                    .is_some_and(u8::is_ascii_digit);
        if !followed_by_digit {
            return false;
        }

        self.source[..minus_pos].chars()
                                .rev()
                                .find(|c| *c != ' ' && *c != '\t')
                                .is_none_or(|c| matches!(c, '+' | '-' | '*' | '/' | '^' | '(' | '=' | ','))
    }

    /// Reads the number following a leading `-` and returns one token spanning
    /// both. The digit guarantees logos yields a `Number` or `Percent` next.
    fn read_negative_number(&mut self, minus_pos: usize) -> Token {
        let kind = match self.inner.next() {
            Some(Ok(kind @ (TokenKind::Number | TokenKind::Percent))) => kind,
            _ => TokenKind::Illegal,
        };
        let end = self.inner.span().end;

        Token::new(kind, &self.source[minus_pos..end], minus_pos)
    }

    /// Reads an identifier, absorbing a multi-word phrase when one follows.
    fn read_identifier(&mut self, start: usize, end: usize) -> Token {
        let first = &self.source[start..end];

        let mut best: Option<(usize, logos::Lexer<'src, TokenKind>)> = None;
        for phrase in PHRASES.iter().filter(|p| p[0].eq_ignore_ascii_case(first)) {
            if let Some(snapshot) = self.match_phrase_tail(&phrase[1..])
               && best.as_ref().is_none_or(|(words, _)| phrase.len() > *words)
            {
                best = Some((phrase.len(), snapshot));
            }
        }

        match best {
            Some((_, snapshot)) => {
                self.inner = snapshot;
                let phrase_end = self.inner.span().end;
                Token::new(TokenKind::Identifier, &self.source[start..phrase_end], start)
            },
            None => Token::new(TokenKind::Identifier, first, start),
        }
    }

    /// Tries to read `words` from a copy of the current cursor. Returns the
    /// advanced copy on a full match; the live cursor is never touched.
    fn match_phrase_tail(&self, words: &[&str]) -> Option<logos::Lexer<'src, TokenKind>> {
        let mut cursor = self.inner.clone();
        for word in words {
            match cursor.next() {
                Some(Ok(TokenKind::Identifier | TokenKind::In | TokenKind::Of | TokenKind::Mod))
                    if cursor.slice().eq_ignore_ascii_case(word) => {},
                _ => return None,
            }
        }
        Some(cursor)
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let token = self.next_token();
        if token.kind == TokenKind::Eof {
            self.done = true;
        }
        Some(token)
    }
}

/// Tokenizes `source` into a vector terminated by `Eof`.
///
/// # Example
/// ```
/// use tally::interpreter::{lexer::tokenize, token::TokenKind};
///
/// let tokens = tokenize("100 turkish lira");
/// assert_eq!(tokens[1].kind, TokenKind::Identifier);
/// assert_eq!(tokens[1].literal, "turkish lira");
/// ```
#[must_use]
pub fn tokenize(source: &str) -> Vec<Token> {
    Lexer::new(source).tokenize()
}

/// Returns the phrase table, for callers that want to check every phrase
/// resolves to something.
#[must_use]
pub fn phrases() -> impl Iterator<Item = String> {
    PHRASES.iter().map(|words| words.join(" "))
}
