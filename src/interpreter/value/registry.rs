use std::collections::HashMap;

/// A descriptor that can be found by code, symbol or alias.
pub trait Entry: 'static {
    /// Canonical code, e.g. `USD` or `km`.
    fn code(&self) -> &'static str;
    /// Display symbol, if the descriptor has one distinct from its code.
    fn symbol(&self) -> Option<&'static str> {
        None
    }
    /// Natural-language names.
    fn aliases(&self) -> &'static [&'static str];
}

/// Lookup tables over a static descriptor list.
///
/// Earlier entries win every collision, so the order of the source list is
/// the tie-break rule (`¥` is the yen because JPY is listed before CNY).
pub struct Registry<T: Entry> {
    exact_code: HashMap<&'static str, &'static T>,
    code:       HashMap<String, &'static T>,
    symbol:     HashMap<&'static str, &'static T>,
    alias:      HashMap<String, &'static T>,
}

impl<T: Entry> Registry<T> {
    /// Indexes `entries` by exact code, case-insensitive code, symbol and
    /// alias.
    #[must_use]
    pub fn new(entries: &'static [T]) -> Self {
        let mut registry = Self { exact_code: HashMap::new(),
                                  code: HashMap::new(),
                                  symbol: HashMap::new(),
                                  alias: HashMap::new() };

        for entry in entries {
            registry.exact_code.entry(entry.code()).or_insert(entry);
            registry.code
                    .entry(entry.code().to_lowercase())
                    .or_insert(entry);
            if let Some(symbol) = entry.symbol() {
                registry.symbol.entry(symbol).or_insert(entry);
            }
            for alias in entry.aliases() {
                registry.alias.entry(normalize(alias)).or_insert(entry);
            }
        }

        registry
    }

    /// Finds an entry whose symbol is exactly `symbol`.
    #[must_use]
    pub fn by_symbol(&self, symbol: &str) -> Option<&'static T> {
        self.symbol.get(symbol).copied()
    }

    /// Finds an entry by code, exact match first, then ignoring case.
    #[must_use]
    pub fn by_code(&self, code: &str) -> Option<&'static T> {
        self.exact_code
            .get(code)
            .or_else(|| self.code.get(&code.to_lowercase()))
            .copied()
    }

    /// Finds an entry by alias, ignoring case and runs of whitespace.
    #[must_use]
    pub fn by_alias(&self, alias: &str) -> Option<&'static T> {
        self.alias.get(&normalize(alias)).copied()
    }

    /// Finds an entry by symbol, then code, then alias.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&'static T> {
        let name = name.trim();
        self.by_symbol(name)
            .or_else(|| self.by_code(name))
            .or_else(|| self.by_alias(name))
    }
}

/// Lowercases `name` and collapses whitespace, so `Turkish  Lira` and
/// `turkish lira` are the same key.
#[must_use]
pub fn normalize(name: &str) -> String {
    name.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}
