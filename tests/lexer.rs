use tally::interpreter::{
    lexer::{Lexer, phrases, tokenize},
    parser::parse_line,
    token::{Token, TokenKind},
};

fn kinds(src: &str) -> Vec<TokenKind> {
    tokenize(src).into_iter().map(|t| t.kind).collect()
}

fn literals(src: &str) -> Vec<String> {
    tokenize(src).into_iter()
                 .filter(|t| t.kind != TokenKind::Eof)
                 .map(|t| t.literal)
                 .collect()
}

fn assert_round_trip(src: &str) {
    for token in tokenize(src) {
        if token.kind == TokenKind::Eof {
            assert_eq!(token.pos, src.len(), "Eof not at the end of {src:?}");
            continue;
        }
        assert_eq!(&src[token.pos..token.end()],
                   token.literal,
                   "token {token:?} does not reproduce its slice of {src:?}");
    }
}

#[test]
fn every_token_reproduces_its_source_slice() {
    for src in ["2 + 3 * 4",
                "$1,234.56 + €5 in GBP",
                "100 turkish lira to usd",
                "price = 20% of $150 # lunch",
                "(-5 + 3) ^ 2 // squared",
                "sqrt(16, ₿1) ₺ @",
                "3 square feet + 12 sq ft",
                "  \t 7 mod 2"]
    {
        assert_round_trip(src);
    }
}

#[test]
fn always_ends_with_eof() {
    for src in ["", "   ", "1", "@@@", "# only a comment"] {
        let tokens = tokenize(src);
        assert_eq!(tokens.last().map(|t| t.kind), Some(TokenKind::Eof), "{src:?}");
        assert_eq!(tokens.iter().filter(|t| t.kind == TokenKind::Eof).count(), 1);
    }
}

#[test]
fn exhausted_lexer_keeps_returning_eof() {
    let mut lexer = Lexer::new("1");
    assert_eq!(lexer.next_token().kind, TokenKind::Number);
    assert_eq!(lexer.next_token().kind, TokenKind::Eof);
    assert_eq!(lexer.next_token().kind, TokenKind::Eof);
}

#[test]
fn numbers_and_percentages() {
    assert_eq!(literals("1,234.56 .5 2e3 1.5E-2"), ["1,234.56", ".5", "2e3", "1.5E-2"]);
    assert_eq!(kinds("1,234.56 .5 2e3"),
               [TokenKind::Number, TokenKind::Number, TokenKind::Number, TokenKind::Eof]);

    assert_eq!(kinds("15%"), [TokenKind::Percent, TokenKind::Eof]);
    assert_eq!(kinds("15 %"), [TokenKind::Number, TokenKind::Mod, TokenKind::Eof]);
}

#[test]
fn minus_depends_on_what_precedes_it() {
    assert_eq!(kinds("100 - 5"),
               [TokenKind::Number, TokenKind::Minus, TokenKind::Number, TokenKind::Eof]);
    assert_eq!(kinds("100 -5"),
               [TokenKind::Number, TokenKind::Minus, TokenKind::Number, TokenKind::Eof]);
    assert_eq!(literals("-5"), ["-5"]);
    assert_eq!(literals("(, -5"), ["(", ",", "-5"]);
    assert_eq!(literals("x = -5"), ["x", "=", "-5"]);
    assert_eq!(literals("2 * -3%"), ["2", "*", "-3%"]);
    assert_eq!(literals("x -5"), ["x", "-", "5"]);
    assert_eq!(literals("- x"), ["-", "x"]);
}

#[test]
fn multi_word_names_are_one_identifier() {
    let tokens = tokenize("100 turkish lira");
    assert_eq!(tokens.len(), 3);
    assert_eq!(tokens[1],
               Token::new(TokenKind::Identifier, "turkish lira", 4));

    assert_eq!(literals("5 Hong Kong Dollar"), ["5", "Hong Kong Dollar"]);
    assert_eq!(literals("2 square   feet"), ["2", "square   feet"]);
}

#[test]
fn longest_phrase_wins() {
    assert_eq!(literals("1 south korean won"), ["1", "south korean won"]);
    assert_eq!(literals("1 new zealand dollar"), ["1", "new zealand dollar"]);
}

#[test]
fn unmatched_phrase_leaves_the_lexer_untouched() {
    assert_eq!(literals("100 turkish"), ["100", "turkish"]);
    assert_eq!(literals("100 turkish delight"), ["100", "turkish", "delight"]);
    assert_eq!(literals("hong kong + 1"), ["hong", "kong", "+", "1"]);

    let mut lexer = Lexer::new("100 turkish");
    lexer.next_token();
    let turkish = lexer.next_token();
    assert_eq!(turkish.literal, "turkish");
    assert_eq!(lexer.pos(), "100 turkish".len());
    assert_eq!(lexer.next_token().kind, TokenKind::Eof);
}

#[test]
fn currency_glyphs() {
    assert_eq!(kinds("$5"), [TokenKind::Dollar, TokenKind::Number, TokenKind::Eof]);
    assert_eq!(kinds("€ £ ¥ ₿"),
               [TokenKind::Euro, TokenKind::Pound, TokenKind::Yen, TokenKind::Bitcoin, TokenKind::Eof]);
    assert_eq!(kinds("₺100"), [TokenKind::CurrencySymbol, TokenKind::Number, TokenKind::Eof]);
    assert!(TokenKind::Euro.is_currency_glyph());
    assert!(!TokenKind::Plus.is_currency_glyph());
}

#[test]
fn comments_are_kept() {
    let tokens = tokenize("5 + 5 # lunch money");
    assert_eq!(tokens[3].kind, TokenKind::Comment);
    assert_eq!(tokens[3].literal, "# lunch money");

    assert_eq!(kinds("// note"), [TokenKind::Comment, TokenKind::Eof]);
}

#[test]
fn keywords_ignore_case() {
    assert_eq!(kinds("5 km IN m"),
               [TokenKind::Number, TokenKind::Identifier, TokenKind::In, TokenKind::Identifier, TokenKind::Eof]);
    assert_eq!(kinds("10 To eur")[1], TokenKind::In);
    assert_eq!(kinds("20% OF 5")[1], TokenKind::Of);
    assert_eq!(kinds("7 MOD 2")[1], TokenKind::Mod);
}

#[test]
fn unknown_characters_become_illegal_tokens() {
    let tokens = tokenize("2 @ 3");
    assert_eq!(tokens[1].kind, TokenKind::Illegal);
    assert_eq!(tokens[1].literal, "@");
    assert_eq!(tokens[2].kind, TokenKind::Number);
}

#[test]
fn newline_is_a_token() {
    assert_eq!(kinds("1\n2"),
               [TokenKind::Number, TokenKind::NewLine, TokenKind::Number, TokenKind::Eof]);
}

#[test]
fn every_phrase_lexes_as_one_identifier() {
    for phrase in phrases() {
        let src = format!("1 {phrase}");
        let tokens = tokenize(&src);
        assert_eq!(tokens.len(), 3, "{phrase:?} split into {tokens:?}");
        assert_eq!(tokens[1].literal, phrase);
    }
}

#[test]
fn every_phrase_names_something() {
    for phrase in phrases() {
        let (_, errors) = parse_line(&format!("1 {phrase}"));
        assert!(errors.is_empty(), "{phrase:?} gave {errors:?}");
    }
}
