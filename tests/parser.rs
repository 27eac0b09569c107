use tally::{
    ast::{BinaryOperator, Expr, Statement},
    error::ParseError,
    interpreter::parser::parse_line,
};

fn assert_parses_to(src: &str, expected: &str) {
    let (line, errors) = parse_line(src);
    assert!(errors.is_empty(), "{src:?} gave errors: {errors:?}");
    assert_eq!(line.to_string(), expected, "{src:?}");
}

fn expression(src: &str) -> Expr {
    let (line, errors) = parse_line(src);
    assert!(errors.is_empty(), "{src:?} gave errors: {errors:?}");
    match line.statement {
        Statement::Expression(expr) => expr,
        other => panic!("{src:?} parsed as {other:?}"),
    }
}

fn first_error(src: &str) -> ParseError {
    let (_, errors) = parse_line(src);
    errors.into_iter()
          .next()
          .unwrap_or_else(|| panic!("{src:?} parsed without errors"))
}

#[test]
fn precedence_and_associativity() {
    assert_parses_to("2 + 3 * 4", "(2 + (3 * 4))");
    assert_parses_to("2 * 3 + 4", "((2 * 3) + 4)");
    assert_parses_to("10 - 4 - 3", "((10 - 4) - 3)");
    assert_parses_to("2 ^ 3 ^ 2", "(2 ^ (3 ^ 2))");
    assert_parses_to("2 ** 3", "(2 ^ 3)");
    assert_parses_to("7 mod 3 * 2", "((7 % 3) * 2)");
    assert_parses_to("(2 + 3) * 4", "(((2 + 3)) * 4)");
}

#[test]
fn unary_binds_tighter_than_binary() {
    assert_parses_to("3 + -x ^ 2", "(3 + ((-x) ^ 2))");
    assert_parses_to("2 * -x", "(2 * (-x))");
    assert_parses_to("(- -3)", "((--3))");
}

#[test]
fn leading_operator_continues_the_previous_line() {
    assert_parses_to("-x ^ 2", "- (x ^ 2)");
    assert_parses_to("-5", "-5");
}

#[test]
fn conversion_wraps_the_whole_expression() {
    assert_parses_to("a + b in EUR", "(a + b) in EUR");
    assert_parses_to("5 km to m", "5 km in m");
    assert_parses_to("$5 in € in GBP", "$5 in € in GBP");

    let Expr::Conversion { expr, target } = expression("1 + 2 in usd") else {
        panic!("expected a conversion");
    };
    assert_eq!(target, "usd");
    assert!(matches!(*expr, Expr::Binary { op: BinaryOperator::Add, .. }));
}

#[test]
fn typed_literals() {
    let Expr::CurrencyLit { amount, currency, raw } = expression("100 turkish lira") else {
        panic!("expected a currency literal");
    };
    assert_eq!((amount, currency.code, raw.as_str()), (100.0, "TRY", "100 turkish lira"));

    assert!(matches!(expression("$1,000"), Expr::CurrencyLit { amount, currency, .. }
                     if amount == 1000.0 && currency.code == "USD"));
    assert!(matches!(expression("50 eur"), Expr::CurrencyLit { currency, .. } if currency.code == "EUR"));
    assert!(matches!(expression("100₺"), Expr::CurrencyLit { currency, .. } if currency.code == "TRY"));
    assert!(matches!(expression("0.5 btc"), Expr::CryptoLit { crypto, .. } if crypto.code == "BTC"));
    assert!(matches!(expression("₿2"), Expr::CryptoLit { amount, .. } if amount == 2.0));
    assert!(matches!(expression("2 gold"), Expr::MetalLit { metal, .. } if metal.code == "XAU"));
    assert!(matches!(expression("3 square feet"), Expr::UnitLit { unit, .. } if unit.code == "sqft"));
    assert!(matches!(expression("5 km"), Expr::UnitLit { unit, .. } if unit.code == "km"));
}

#[test]
fn currency_names_win_over_units() {
    assert!(matches!(expression("5 pounds"), Expr::CurrencyLit { currency, .. } if currency.code == "GBP"));
    assert!(matches!(expression("5 lbs"), Expr::UnitLit { unit, .. } if unit.code == "lb"));
}

#[test]
fn percent_of() {
    assert_parses_to("20% of 150", "20% of 150");
    assert!(matches!(expression("20% of $150"), Expr::PercentOf { .. }));
    assert!(matches!(expression("15%"), Expr::PercentLit { value, .. } if (value - 0.15).abs() < 1e-12));
}

#[test]
fn of_needs_a_percent_on_the_left() {
    assert_eq!(first_error("20 of 150"),
               ParseError::UnexpectedToken { token: "of".to_string(),
                                             pos:   3, });
}

#[test]
fn assignments() {
    let (line, errors) = parse_line("Price = $100 # base");
    assert!(errors.is_empty());
    assert_eq!(line.comment.as_deref(), Some("# base"));
    let Statement::Assignment { name, expr } = line.statement else {
        panic!("expected an assignment");
    };
    assert_eq!(name, "Price");
    assert!(matches!(expr, Expr::CurrencyLit { .. }));

    assert_eq!(first_error("x ="),
               ParseError::MissingOperand { after: "'='",
                                            pos:   3, });
}

#[test]
fn continuation_lines() {
    assert!(matches!(expression("+ 50"), Expr::Continuation { op: BinaryOperator::Add, .. }));
    assert!(matches!(expression("* 2"), Expr::Continuation { op: BinaryOperator::Mul, .. }));
    assert!(matches!(expression("mod 3"), Expr::Continuation { op: BinaryOperator::Mod, .. }));
    assert!(matches!(expression("in EUR"), Expr::ConversionContinuation { target } if target == "EUR"));
    assert!(matches!(expression("to €"), Expr::ConversionContinuation { target } if target == "€"));

    assert_eq!(first_error("in"), ParseError::MissingConversionTarget { pos: 2 });
}

#[test]
fn previous_result_names_normalize() {
    for src in ["_", "ans", "ANS", "Ans"] {
        assert!(matches!(expression(src), Expr::Identifier { name } if name == "_"), "{src:?}");
    }
}

#[test]
fn calls() {
    assert_parses_to("sum(1, 2, 3)", "sum(1, 2, 3)");
    assert_parses_to("max()", "max()");
    assert_parses_to("sqrt(16) + 1", "(sqrt(16) + 1)");

    let (line, errors) = parse_line("sum(1, 2");
    assert_eq!(errors, [ParseError::UnclosedCall { pos: 8 }]);
    let Statement::Expression(Expr::Call { name, args }) = line.statement else {
        panic!("expected a call");
    };
    assert_eq!(name, "sum");
    assert_eq!(args.len(), 2);
}

#[test]
fn comments() {
    let (line, errors) = parse_line("# groceries");
    assert!(errors.is_empty());
    assert_eq!(line.statement, Statement::Comment("# groceries".to_string()));

    let (line, _) = parse_line("5 + 5 // split");
    assert_eq!(line.comment.as_deref(), Some("// split"));
    assert_eq!(line.raw, "5 + 5 // split");
}

#[test]
fn empty_line() {
    let (line, errors) = parse_line("   ");
    assert!(errors.is_empty());
    assert_eq!(line.statement, Statement::Empty);
}

#[test]
fn errors_never_stop_parsing() {
    assert_eq!(first_error("(1 + 2"), ParseError::UnclosedGroup { pos: 6 });
    assert_eq!(first_error("()"), ParseError::EmptyGroup { pos: 1 });
    assert_eq!(first_error("1 +"), ParseError::MissingOperand { after: "operator",
                                                                pos:   3, });
    assert_eq!(first_error("$"), ParseError::MissingAmount { pos: 1 });
    assert_eq!(first_error("2 @ 3"),
               ParseError::UnexpectedToken { token: "@".to_string(),
                                             pos:   2, });

    let (line, errors) = parse_line("(1 + 2");
    assert_eq!(errors.len(), 1);
    assert!(matches!(line.statement, Statement::Expression(Expr::Group { .. })));
}

#[test]
fn trailing_words_are_a_note() {
    let (line, errors) = parse_line("100 turkish");
    assert!(errors.is_empty(), "{errors:?}");
    assert!(matches!(line.statement, Statement::Expression(Expr::NumberLit { value, .. }) if value == 100.0));

    let (line, errors) = parse_line("$50 lunch with Sam # friday");
    assert!(errors.is_empty(), "{errors:?}");
    assert!(matches!(line.statement, Statement::Expression(Expr::CurrencyLit { .. })));
    assert_eq!(line.comment.as_deref(), Some("# friday"));
}
