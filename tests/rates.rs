use std::{collections::HashMap, fs, sync::Arc, thread, time::Duration};

use chrono::Utc;
use tally::{
    error::CacheError,
    interpreter::value::{core::Value, crypto::Crypto, currency::Currency},
    rates::{CachedRates, cache::RateCache, persist::default_cache_dir},
};

fn assert_rate(rates: &RateCache, from: &str, to: &str, expected: f64) {
    let Some(rate) = rates.get_rate(from, to) else {
        panic!("no rate from {from} to {to}");
    };
    assert!((rate - expected).abs() < 1e-9,
            "rate {from} -> {to} is {rate}, expected {expected}");
}

fn raw(pairs: &[(&str, f64)]) -> HashMap<String, f64> {
    pairs.iter().map(|(code, rate)| ((*code).to_string(), *rate)).collect()
}

#[test]
fn stores_the_reciprocal() {
    let rates = RateCache::empty();
    rates.set_rate("eur", "usd", 1.25);

    assert_rate(&rates, "EUR", "USD", 1.25);
    assert_rate(&rates, "USD", "EUR", 0.8);
    assert!(rates.has_rate("usd", "eur"));
}

#[test]
fn same_code_is_always_one() {
    let rates = RateCache::empty();
    assert_eq!(rates.get_rate("XYZ", "xyz"), Some(1.0));
}

#[test]
fn zero_rate_has_no_reciprocal() {
    let rates = RateCache::empty();
    rates.set_rate("AAA", "BBB", 0.0);

    assert_eq!(rates.get_rate("AAA", "BBB"), Some(0.0));
    assert_eq!(rates.get_rate("BBB", "AAA"), None);
}

#[test]
fn path_search_multiplies_along_the_way() {
    let rates = RateCache::empty();
    rates.set_rate("AAA", "BBB", 2.0);
    rates.set_rate("BBB", "CCC", 3.0);

    assert_rate(&rates, "AAA", "CCC", 6.0);
    assert_rate(&rates, "CCC", "AAA", 1.0 / 6.0);
    assert_eq!(rates.get_rate("AAA", "ZZZ"), None);
}

#[test]
fn path_search_takes_the_fewest_hops() {
    let rates = RateCache::empty();
    rates.set_rate("AAA", "BBB", 2.0);
    rates.set_rate("BBB", "CCC", 2.0);
    rates.set_rate("CCC", "DDD", 2.0);
    rates.set_rate("AAA", "EEE", 10.0);
    rates.set_rate("EEE", "DDD", 10.0);

    assert_rate(&rates, "AAA", "DDD", 100.0);
}

#[test]
fn direct_rate_beats_a_path() {
    let rates = RateCache::empty();
    rates.set_rate("AAA", "BBB", 2.0);
    rates.set_rate("BBB", "CCC", 3.0);
    rates.set_rate("AAA", "CCC", 5.0);

    assert_rate(&rates, "AAA", "CCC", 5.0);
}

#[test]
fn raw_rates_are_anchored_on_the_dollar() {
    let rates = RateCache::empty();
    assert!(rates.is_expired());

    rates.apply_raw_rates(&raw(&[("EUR", 0.5), ("btc", 50_000.0), ("XAU", 2000.0)]));

    assert_rate(&rates, "USD", "EUR", 0.5);
    assert_rate(&rates, "EUR", "USD", 2.0);
    assert_rate(&rates, "BTC", "USD", 50_000.0);
    assert_rate(&rates, "XAU", "BTC", 0.04);
    assert!(rates.is_valid());
    assert!(rates.last_update().is_some());
    assert_eq!(rates.raw_rates().get("BTC"), Some(&50_000.0));
}

#[test]
fn raw_rates_replace_earlier_quotes() {
    let rates = RateCache::new();
    rates.apply_raw_rates(&raw(&[("EUR", 0.8)]));
    assert_rate(&rates, "USD", "EUR", 0.8);
    assert_rate(&rates, "EUR", "USD", 1.25);
}

#[test]
fn defaults_cover_every_kind() {
    let rates = RateCache::new();
    for code in ["EUR", "GBP", "JPY", "TRY", "BTC", "ETH", "XAU", "XAG"] {
        assert!(rates.has_rate(code, "USD"), "no default rate for {code}");
    }
    assert!(rates.is_expired());
    assert!(rates.raw_rates().is_empty());
}

#[test]
fn convert_value_takes_the_target_type() {
    let rates = RateCache::empty();
    rates.set_rate("USD", "EUR", 0.5);
    rates.set_rate("BTC", "USD", 40_000.0);

    let dollars = Value::currency(10.0, Currency::usd());
    assert_eq!(rates.convert_value(&dollars, "eur").map(|v| v.to_string()),
               Some("€5.00".to_string()));
    assert_eq!(rates.convert_value(&dollars, "GBP"), None);

    let bitcoin = Value::crypto(0.5, Crypto::lookup("btc").unwrap());
    let in_euro = rates.convert_value(&bitcoin, "€").unwrap();
    assert!(in_euro.is_currency());
    assert!((in_euro.amount() - 10_000.0).abs() < 1e-6);

    assert_eq!(rates.convert_value(&Value::Number(5.0), "EUR"), None);
}

#[test]
fn clear_drops_everything() {
    let rates = RateCache::new();
    rates.apply_raw_rates(&raw(&[("EUR", 0.9)]));
    rates.clear();

    assert_eq!(rates.get_rate("EUR", "USD"), None);
    assert!(rates.raw_rates().is_empty());
    assert!(rates.last_update().is_none());
}

#[test]
fn ttl_governs_expiry() {
    let rates = RateCache::empty().with_ttl(Duration::ZERO);
    rates.apply_raw_rates(&raw(&[("EUR", 0.9)]));
    thread::sleep(Duration::from_millis(10));
    assert!(rates.is_expired());

    let rates = RateCache::empty().with_ttl(Duration::from_secs(600));
    rates.apply_raw_rates(&raw(&[("EUR", 0.9)]));
    assert!(rates.is_valid());
    assert_eq!(rates.ttl(), Duration::from_secs(600));
}

#[test]
fn save_and_load_through_a_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("rates.json");

    let saved = RateCache::empty().with_cache_file(&path);
    saved.apply_raw_rates(&raw(&[("EUR", 0.5), ("BTC", 50_000.0)]));
    saved.save_to_file().unwrap();

    let cached: CachedRates = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(cached.base_currency, "USD");
    assert_eq!(cached.rates.len(), 2);

    let loaded = RateCache::empty().with_cache_file(&path);
    assert!(loaded.is_file_valid());
    loaded.load_from_file().unwrap();

    assert_rate(&loaded, "EUR", "USD", 2.0);
    assert_rate(&loaded, "BTC", "EUR", 25_000.0);
    assert_eq!(loaded.last_update().map(|t| t.timestamp()), Some(cached.timestamp));
    assert!(loaded.is_valid());
}

#[test]
fn expired_file_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("rates.json");
    let stale = format!(r#"{{ "timestamp": {}, "rates": {{ "EUR": 0.5 }} }}"#,
                        Utc::now().timestamp() - 7200);
    fs::write(&path, stale).unwrap();

    let rates = RateCache::empty().with_cache_file(&path);
    assert!(!rates.is_file_valid());
    let expired = rates.load_from_file().unwrap_err();
    assert!(matches!(expired, CacheError::Expired { ttl_secs: 3600, .. }));
    assert!(!expired.is_missing());
    assert_eq!(rates.get_rate("EUR", "USD"), None);

    let patient = RateCache::empty().with_ttl(Duration::from_secs(86_400));
    patient.load_from(&path).unwrap();
    assert_rate(&patient, "USD", "EUR", 0.5);
}

#[test]
fn broken_files_are_errors() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("rates.json");

    let rates = RateCache::empty();
    let missing = rates.load_from(&path).unwrap_err();
    assert!(matches!(missing, CacheError::Io { .. }));
    assert!(missing.is_missing());

    fs::write(&path, "not json").unwrap();
    let broken = rates.load_from(&path).unwrap_err();
    assert!(matches!(broken, CacheError::Json(_)));
    assert!(!broken.is_missing());

    let unset = rates.save_to_file().unwrap_err();
    assert!(matches!(unset, CacheError::NoCacheDir));
    assert!(unset.is_missing());
}

#[test]
fn stats_summarize_the_cache() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("rates.json");

    let rates = RateCache::empty().with_cache_file(&path);
    rates.set_rate("EUR", "USD", 1.1);

    let stats = rates.stats();
    assert_eq!(stats.direct_rates, 2);
    assert!(stats.expired);
    assert!(!stats.has_file_cache);
    assert_eq!(stats.cache_file.as_deref(), Some(path.as_path()));

    rates.save_to_file().unwrap();
    assert!(rates.stats().has_file_cache);
}

#[test]
fn shared_between_threads() {
    let rates = Arc::new(RateCache::empty());

    let writers: Vec<_> = (1..=8).map(|i| {
                                     let rates = Arc::clone(&rates);
                                     thread::spawn(move || {
                                         rates.set_rate(&format!("C{i:02}"), "USD", f64::from(i));
                                     })
                                 })
                                 .collect();
    for writer in writers {
        writer.join().unwrap();
    }

    assert_rate(&rates, "C02", "C08", 0.25);
}

#[test]
fn default_cache_dir_is_under_xdg_or_home() {
    let Some(dir) = default_cache_dir() else {
        panic!("no cache directory on this machine");
    };

    let in_xdg = std::env::var_os("XDG_CACHE_HOME").filter(|v| !v.is_empty())
                                                    .is_some_and(|xdg| dir.starts_with(xdg) && dir.ends_with("tally"));
    let in_home = dirs::home_dir().is_some_and(|home| dir == home.join(".tally").join("cache"));
    assert!(in_xdg || in_home, "unexpected cache directory {}", dir.display());
}
