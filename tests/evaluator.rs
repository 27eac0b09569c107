use std::sync::Arc;

use tally::{
    interpreter::{
        context::Context,
        evaluator::{
            core::Evaluator,
            function::core::{BUILTIN_FUNCTIONS, call_builtin},
        },
        parser::parse_line,
        value::core::Value,
    },
    rates::{cache::RateCache, lookup::RateLookup},
};

/// A context over an empty rate cache, evaluated line by line.
struct Sheet {
    rates:   Arc<RateCache>,
    context: Context,
}

impl Sheet {
    fn new() -> Self {
        let rates = Arc::new(RateCache::empty());
        let context = Context::new(Arc::clone(&rates));
        Self { rates, context }
    }

    fn eval(&self, src: &str) -> Value {
        let (line, errors) = parse_line(src);
        assert!(errors.is_empty(), "{src:?} gave parse errors: {errors:?}");
        Evaluator::new(&self.context, self.rates.as_ref()).eval_line(&line)
    }

    fn assert_eval(&self, src: &str, expected: &str) {
        assert_eq!(self.eval(src).to_string(), expected, "{src:?}");
    }
}

fn assert_eval(src: &str, expected: &str) {
    Sheet::new().assert_eval(src, expected);
}

fn assert_error(src: &str, message: &str) {
    let value = Sheet::new().eval(src);
    assert!(value.is_error(), "{src:?} gave {value} instead of an error");
    assert_eq!(value.to_string(), format!("Error: {message}"), "{src:?}");
}

#[test]
fn arithmetic_and_precedence() {
    assert_eval("2 + 3 * 4", "14");
    assert_eval("2 ^ 3 ^ 2", "512");
    assert_eval("2 ** 10", "1024");
    assert_eval("10 / 4", "2.5");
    assert_eval("7 mod 3", "1");
    assert_eval("(2 + 3) * 4", "20");
    assert_eval("1,000 + .5", "1000.5");
    assert_eval("x = -3 * 2", "-6");
}

#[test]
fn percentage_of_base() {
    assert_eval("$100 + 15%", "$115.00");
    assert_eval("$100 - 10%", "$90.00");
    assert_eval("200 + 50%", "300");
    assert_eval("10 km - 10%", "9 km");
}

#[test]
fn percent_of() {
    assert_eval("20% of 150", "30");
    assert_eval("20% of $150", "$30.00");
    assert_eval("50% of 3 km", "1.5 km");
}

#[test]
fn percentages_scale() {
    assert_eval("200 * 10%", "20");
    assert_eval("10% * 200", "20");
    assert_eval("$80 * 25%", "$20.00");
    assert_eval("10% * 10%", "0.01");
}

#[test]
fn scalar_multiplication_keeps_the_type() {
    assert_eval("5 km * 2", "10 km");
    assert_eval("2 * 5 km", "10 km");
    assert_eval("$9 / 3", "$3.00");
    assert_eval("2 gold * 3", "6 XAU");
}

#[test]
fn power_and_modulo_give_plain_numbers() {
    assert_eval("5 km ^ 2", "25");
    assert_eval("$10 mod 3", "1");
    assert_eval("2 ^ 3 km", "8");
    assert_eval("10 mod 4 kg", "2");
}

#[test]
fn two_typed_operands_degrade_to_a_number() {
    assert_eval("5 km * 3 kg", "15");
    assert_eval("$10 / $4", "2.5");
}

#[test]
fn addition_of_measurements() {
    assert_eval("5 km + 300 m", "5.3 km");
    assert_eval("1 h - 30 min", "0.5 h");
    assert_eval("5 km + 2", "7 km");
    assert_eval("2 + 5 km", "7 km");
    assert_error("5 km + 3 kg", "incompatible units");
}

#[test]
fn division_and_modulo_by_zero() {
    assert_error("1 / 0", "division by zero");
    assert_error("5 km / 0", "division by zero");
    assert_error("$5 / (2 - 2)", "division by zero");
    assert_error("7 mod 0", "modulo by zero");
    assert_error("$5 mod 0", "modulo by zero");
}

#[test]
fn unary_operators_keep_the_type() {
    assert_eval("x = -$5", "-$5.00");
    assert_eval("x = +5 km", "5 km");
    assert_eval("3 - -2", "5");
}

#[test]
fn errors_short_circuit() {
    assert_error("1 / 0 + 5", "division by zero");
    assert_error("sqrt(1 / 0)", "division by zero");
    assert_error("(7 mod 0) in km", "modulo by zero");
}

#[test]
fn builtin_functions() {
    assert_eval("sqrt(16)", "4");
    assert_eval("SQRT(9)", "3");
    assert_eval("abs(-5)", "5");
    assert_eval("round(2.5)", "3");
    assert_eval("floor(2.7) + ceil(2.1)", "5");
    assert_eval("pow(2, 10)", "1024");
    assert_eval("log(1000)", "3");
    assert_eval("ln(1)", "0");
    assert_eval("sin(0)", "0");
}

#[test]
fn every_builtin_is_callable() {
    for name in BUILTIN_FUNCTIONS {
        let args: &[Value] = if *name == "pow" {
            &[Value::Number(1.0), Value::Number(1.0)]
        } else {
            &[Value::Number(1.0)]
        };
        let result = call_builtin(name, args);
        assert!(result.is_ok(), "{name}: {result:?}");
    }
}

#[test]
fn aggregations_keep_the_first_type() {
    assert_eval("sum(1, 2, 3)", "6");
    assert_eval("sum($1, 2)", "$3.00");
    assert_eval("avg(2, 4, 9)", "5");
    assert_eval("average(1, 2)", "1.5");
    assert_eval("max($5, 10)", "$10.00");
    assert_eval("min(3 km, 1)", "1 km");
    assert_eval("count(1, 2, 3)", "3");
    assert_eval("sum()", "0");
}

#[test]
fn function_errors() {
    assert_error("sqrt(-1)", "invalid result");
    assert_error("ln(0)", "invalid result");
    assert_error("foo(1)", "unknown function: foo");
    assert_error("sqrt(1, 2)", "function requires exactly one argument");
    assert_error("pow(2)", "pow requires exactly two arguments");
    assert_error("max()", "max requires at least one argument");
}

#[test]
fn variables() {
    let sheet = Sheet::new();
    sheet.assert_eval("price = $100", "$100.00");
    sheet.assert_eval("price * 2", "$200.00");
    sheet.assert_eval("PRICE + 1", "$101.00");

    sheet.assert_eval("Rent = 1200", "1200");
    assert_eq!(sheet.context.variable_names(), ["Rent", "price"]);
}

#[test]
fn failed_assignment_is_not_stored() {
    let sheet = Sheet::new();
    sheet.eval("x = 1 / 0");
    assert!(!sheet.context.has_variable("x"));
}

#[test]
fn previous_result() {
    let sheet = Sheet::new();
    sheet.assert_eval("2 + 3", "5");
    sheet.assert_eval("_ * 2", "10");
    sheet.assert_eval("ans + 1", "11");

    sheet.eval("1 / 0");
    sheet.assert_eval("ans", "11");
}

#[test]
fn strict_mode() {
    let sheet = Sheet::new();
    sheet.assert_eval("foo + 1", "1");

    sheet.context.set_strict(true);
    assert_eq!(sheet.eval("foo + 1").to_string(), "Error: undefined variable: foo");
}

#[test]
fn continuation_folds_the_previous_line() {
    let sheet = Sheet::new();
    sheet.assert_eval("100", "100");
    sheet.assert_eval("+ 50", "150");

    let lines = sheet.context.lines();
    assert!(lines[0].consumed);
    assert!(!lines[1].consumed);
    assert!(lines[1].continuation);
    assert_eq!(sheet.context.total().to_string(), "150");

    sheet.assert_eval("* 2", "300");
    assert_eq!(sheet.context.total().to_string(), "300");
}

#[test]
fn continuation_without_previous() {
    let sheet = Sheet::new();
    sheet.assert_eval("* 2", "2");

    let sheet = Sheet::new();
    assert_eq!(sheet.eval("in km").to_string(), "Error: no previous value to convert");
}

#[test]
fn conversions() {
    assert_eval("5 km in m", "5000 m");
    assert_eval("3 miles in km", "4.83 km");
    assert_eval("100 celsius in fahrenheit", "212 F");
    assert_eval("1 GB in MB", "1024 MB");
    assert_eval("10 lb in pounds", "10 lb");
    assert_eval("1 kg in pound", "2.2 lb");
    assert_error("5 km in kg", "cannot convert km to kg");
    assert_error("5 in blah", "unknown target: blah");

    let sheet = Sheet::new();
    sheet.assert_eval("2 km", "2 km");
    sheet.assert_eval("to m", "2000 m");
}

#[test]
fn currencies_need_a_rate() {
    let sheet = Sheet::new();
    assert_eq!(sheet.eval("$10 + €5").to_string(),
               "Error: no exchange rate from EUR to USD");
    assert_eq!(sheet.eval("$10 in EUR").to_string(),
               "Error: no rate available for conversion to EUR");

    sheet.rates.set_rate("EUR", "USD", 1.1);
    sheet.assert_eval("$10 + €5", "$15.50");
    sheet.assert_eval("$11 in EUR", "€10.00");
    sheet.assert_eval("€10 - $11", "€0.00");
}

#[test]
fn multi_word_currency() {
    assert_eval("100 turkish lira", "100.00₺");
    assert_eval("100₺ + 5", "105.00₺");
    assert_eval("5 hong kong dollar", "HK$5.00");
}

struct FlatRates;

impl RateLookup for FlatRates {
    fn get_rate(&self, from: &str, to: &str) -> Option<f64> {
        (from != to).then_some(2.0)
    }

    fn convert_value(&self, _: &Value, _: &str) -> Option<Value> {
        None
    }
}

#[test]
fn any_rate_source_plugs_in() {
    let context = Context::default();
    let evaluator = Evaluator::new(&context, &FlatRates);

    let (line, _) = parse_line("$1 + €1");
    assert_eq!(evaluator.eval_line(&line).to_string(), "$3.00");

    let (line, _) = parse_line("$1 in EUR");
    assert_eq!(evaluator.eval_line(&line).to_string(),
               "Error: no rate available for conversion to EUR");
}
