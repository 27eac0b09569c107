use std::{collections::HashMap, fs, sync::Arc, thread};

use tally::{
    Engine, Value,
    config::EngineConfig,
    error::{ConfigError, FetchError},
    rates::{RateCategory, RateProvider, cache::RateCache},
};

fn offline_engine() -> Engine {
    Engine::with_rate_cache(Arc::new(RateCache::empty()))
}

fn assert_lines(engine: &Engine, lines: &[(&str, &str)]) {
    for (src, expected) in lines {
        assert_eq!(engine.eval(src).to_string(), *expected, "{src:?}");
    }
}

#[test]
fn a_worked_sheet() {
    let engine = Engine::new();
    assert_lines(&engine,
                 &[("rent = $1,200", "$1200.00"),
                   ("food = $400", "$400.00"),
                   ("rent + food", "$1600.00"),
                   ("- 10%", "$1440.00"),
                   ("/ 2", "$720.00"),
                   ("20% of 150", "30")]);

    assert_eq!(engine.variable("rent").map(|v| v.to_string()), Some("$1200.00".to_string()));
    assert_eq!(engine.previous().to_string(), "30");
    assert_eq!(engine.lines().len(), 6);
}

#[test]
fn blank_and_comment_lines_are_not_recorded() {
    let engine = Engine::new();
    for src in ["", "   ", "# groceries", "// note"] {
        assert!(engine.eval(src).is_empty(), "{src:?}");
    }
    assert!(engine.lines().is_empty());

    assert_eq!(engine.eval("5 + 5 # trailing").to_string(), "10");
    assert_eq!(engine.lines().len(), 1);
}

#[test]
fn parse_errors_are_values() {
    let engine = Engine::new();
    assert_eq!(engine.eval("(1 + 2").to_string(), "Error: expected ')' after expression");
    assert_eq!(engine.eval("5 +").to_string(), "Error: expected expression after operator");
    assert_eq!(engine.eval("2 @ 3").to_string(), "Error: unexpected token: @");
    assert!(engine.lines().is_empty());
    assert!(engine.previous().is_empty());
}

#[test]
fn trailing_words_keep_the_value() {
    let engine = Engine::new();
    assert_eq!(engine.eval("100 turkish").to_string(), "100");
    assert_eq!(engine.eval("$50 lunch").to_string(), "$50.00");
    assert_eq!(engine.eval("x = 3 apples").to_string(), "3");
    assert_eq!(engine.variable("x"), Some(Value::Number(3.0)));
}

#[test]
fn preview_never_changes_the_session() {
    let engine = Engine::new();
    engine.eval("x = 5");

    assert_eq!(engine.eval_preview("x = 10").to_string(), "10");
    assert_eq!(engine.eval_preview("+ 1").to_string(), "6");
    assert_eq!(engine.eval_preview("x * 2").to_string(), "10");

    assert_eq!(engine.eval("x").to_string(), "5");
    let lines = engine.lines();
    assert_eq!(lines.len(), 2);
    assert!(!lines[0].consumed);
}

#[test]
fn continuation_and_total() {
    let engine = Engine::new();
    assert_lines(&engine, &[("100", "100"), ("+ 50", "150")]);

    let lines = engine.lines();
    assert!(lines[0].consumed);
    assert_eq!(engine.total().to_string(), "150");
    assert_eq!(engine.eval("total").to_string(), "150");
}

#[test]
fn currency_combination_needs_a_rate() {
    let engine = offline_engine();
    assert!(engine.eval("$10 + €5").is_error());

    engine.set_rate("EUR", "USD", 1.1);
    assert_eq!(engine.eval("$10 + €5").to_string(), "$15.50");
    assert!(engine.get_rate("usd", "eur").is_some_and(|rate| (rate * 1.1 - 1.0).abs() < 1e-9));
}

#[test]
fn default_rates_convert_out_of_the_box() {
    let engine = Engine::new();
    let value = engine.eval("$100 in EUR");
    assert!(value.is_currency(), "{value}");
    assert!(engine.eval("1 btc in USD").is_currency());
    assert!(engine.eval("1 gold in USD").is_currency());
}

#[test]
fn literals_keep_their_kind() {
    let engine = offline_engine();
    assert!(engine.eval("5 km").is_unit());
    assert!(engine.eval("2 gold").is_metal());
    assert!(engine.eval("0.5 btc").is_crypto());
    assert!(engine.eval("$5").is_currency());
    assert!(!engine.eval("5 km * 3 kg").is_unit());
}

#[test]
fn grouped_totals() {
    let engine = offline_engine();
    engine.set_rate("EUR", "USD", 1.1);
    engine.eval_lines("$10\n€10\n5 km\n500 m\n3");

    let totals: Vec<String> = engine.grouped_totals().iter().map(ToString::to_string).collect();
    assert_eq!(totals, ["€19.09", "5500 m", "3"]);
}

#[test]
fn clear_keeps_the_rates() {
    let engine = offline_engine();
    engine.set_rate("EUR", "USD", 1.1);
    engine.eval("x = 5");
    engine.clear();

    assert!(engine.variables().is_empty());
    assert!(engine.lines().is_empty());
    assert!(engine.previous().is_empty());
    assert_eq!(engine.get_rate("EUR", "USD"), Some(1.1));
}

#[test]
fn variables_through_the_engine() {
    let engine = Engine::new();
    engine.set_variable("budget", Value::Number(250.0));
    assert_eq!(engine.eval("budget - 50").to_string(), "200");

    engine.set_variable("total", Value::Number(1.0));
    assert!(!engine.variables().contains_key("total"));

    assert_eq!(engine.delete_variable("budget"), Some(Value::Number(250.0)));
    assert_eq!(engine.eval("budget").to_string(), "0");
}

#[test]
fn precision_is_validated() {
    let engine = Engine::new();
    assert_eq!(engine.precision(), 2);

    engine.set_precision(4).unwrap();
    assert_eq!(engine.format(&Value::Number(3.141_59)), "3.1416");

    assert!(matches!(engine.set_precision(16),
                     Err(ConfigError::InvalidPrecision { value: 16, max: 15 })));
    assert!(engine.set_precision(-1).is_err());
    assert_eq!(engine.precision(), 4);
}

#[test]
fn strict_mode() {
    let engine = Engine::new();
    assert_eq!(engine.eval("ghost * 2").to_string(), "0");

    engine.set_strict(true);
    assert!(engine.is_strict());
    assert_eq!(engine.eval("ghost * 2").to_string(), "Error: undefined variable: ghost");
}

#[test]
fn clones_share_rates_but_not_sessions() {
    let engine = offline_engine();
    let other = engine.clone();

    other.set_rate("EUR", "USD", 1.1);
    other.eval("x = 1");

    assert_eq!(engine.get_rate("EUR", "USD"), Some(1.1));
    assert!(engine.variable("x").is_none());
}

#[test]
fn quick_eval_uses_a_fresh_engine() {
    assert_eq!(Engine::quick_eval("5 km * 2").to_string(), "10 km");
    assert_eq!(Engine::quick_eval("_").to_string(), "0");
}

#[test]
fn engine_is_shareable_across_threads() {
    let engine = Engine::new();
    thread::scope(|scope| {
        for _ in 0..4 {
            scope.spawn(|| {
                     assert_eq!(engine.eval("1 + 1").to_string(), "2");
                 });
        }
    });
    assert_eq!(engine.lines().len(), 4);
}

struct StubProvider;

impl RateProvider for StubProvider {
    fn name(&self) -> &str {
        "stub"
    }

    fn supports(&self, category: RateCategory) -> bool {
        category != RateCategory::Metals
    }

    fn fetch(&self, category: RateCategory) -> Result<HashMap<String, f64>, FetchError> {
        match category {
            RateCategory::Fiat => Ok(HashMap::from([("EUR".to_string(), 0.5)])),
            _ => Err(FetchError { provider: "stub".to_string(),
                                  category: category.to_string(),
                                  message:  "offline".to_string(), }),
        }
    }
}

#[test]
fn refresh_applies_what_succeeds() {
    let engine = offline_engine();
    let failures = engine.refresh_rates(&StubProvider);

    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].to_string(), "stub failed to fetch crypto rates: offline");
    assert_eq!(engine.get_rate("EUR", "USD"), Some(2.0));
    assert!(engine.rate_cache().is_valid());
}

#[test]
fn config_from_a_toml_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tally.toml");
    fs::write(&path,
              format!("precision = 4\nstrict = true\nrate_ttl_secs = 60\noffline_defaults = false\ncache_dir = {:?}\n",
                      dir.path().display().to_string())).unwrap();

    let config = EngineConfig::load(Some(path.as_path())).unwrap();
    assert_eq!(config.precision, 4);
    assert!(config.strict);
    assert_eq!(config.rate_ttl_secs, 60);
    assert_eq!(config.cache_file(), Some(dir.path().join("rates.json")));

    let engine = Engine::with_config(&config).unwrap();
    assert_eq!(engine.precision(), 4);
    assert!(engine.is_strict());
    assert_eq!(engine.get_rate("EUR", "USD"), None);
    assert_eq!(engine.rate_cache().ttl().as_secs(), 60);

    engine.apply_raw_rates(&HashMap::from([("EUR".to_string(), 0.5)]));
    engine.save_rates().unwrap();

    let reloaded = Engine::with_config(&config).unwrap();
    reloaded.load_rates().unwrap();
    assert_eq!(reloaded.get_rate("EUR", "USD"), Some(2.0));
}

#[test]
fn config_rejects_bad_values() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tally.toml");

    fs::write(&path, "precision = 20\n").unwrap();
    assert!(matches!(EngineConfig::load(Some(path.as_path())),
                     Err(ConfigError::InvalidPrecision { value: 20, .. })));

    fs::write(&path, "precision = \"lots\"\n").unwrap();
    assert!(matches!(EngineConfig::load(Some(path.as_path())), Err(ConfigError::Figment(_))));
}

#[test]
fn config_defaults() {
    let config = EngineConfig::default();
    assert_eq!(config.precision, 2);
    assert!(!config.strict);
    assert_eq!(config.rate_ttl_secs, 3600);
    assert!(config.offline_defaults);

    let engine = Engine::with_config(&config).unwrap();
    assert!(engine.get_rate("EUR", "USD").is_some());
}
