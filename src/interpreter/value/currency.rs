use std::{fmt, sync::LazyLock};

use crate::interpreter::value::registry::{Entry, Registry};

/// A fiat currency.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct Currency {
    /// ISO 4217 code, e.g. `TRY`.
    pub code:         &'static str,
    /// Display symbol, e.g. `₺`.
    pub symbol:       &'static str,
    /// Full English name.
    pub name:         &'static str,
    /// Natural-language names accepted after an amount.
    pub aliases:      &'static [&'static str],
    /// Whether the symbol is written after the amount (`100₺`).
    pub symbol_after: bool,
}

impl Currency {
    /// Finds a currency by symbol, code or alias.
    ///
    /// # Example
    /// ```
    /// use tally::interpreter::value::currency::Currency;
    ///
    /// assert_eq!(Currency::lookup("turkish lira").map(|c| c.code), Some("TRY"));
    /// assert_eq!(Currency::lookup("$").map(|c| c.code), Some("USD"));
    /// assert_eq!(Currency::lookup("eur").map(|c| c.code), Some("EUR"));
    /// assert!(Currency::lookup("furlong").is_none());
    /// ```
    #[must_use]
    pub fn lookup(name: &str) -> Option<&'static Self> {
        REGISTRY.lookup(name)
    }

    /// Finds a currency by its display symbol only.
    #[must_use]
    pub fn by_symbol(symbol: &str) -> Option<&'static Self> {
        REGISTRY.by_symbol(symbol)
    }

    /// Finds a currency by ISO code only, ignoring case.
    #[must_use]
    pub fn by_code(code: &str) -> Option<&'static Self> {
        REGISTRY.by_code(code)
    }

    /// The US dollar, the anchor of every raw rate.
    #[must_use]
    pub fn usd() -> &'static Self {
        &CURRENCIES[0]
    }


    /// Formats `amount` with this currency's symbol and two decimals.
    #[must_use]
    pub fn format_amount(&self, amount: f64) -> String {
        let digits = format!("{:.2}", amount.abs());
        let sign = if amount < 0.0 && digits.bytes().any(|b| b.is_ascii_digit() && b != b'0') {
            "-"
        } else {
            ""
        };

        if self.symbol_after {
            format!("{sign}{digits}{}", self.symbol)
        } else {
            format!("{sign}{}{digits}", self.symbol)
        }
    }
}

impl Entry for Currency {
    fn code(&self) -> &'static str {
        self.code
    }

    fn symbol(&self) -> Option<&'static str> {
        Some(self.symbol)
    }

    fn aliases(&self) -> &'static [&'static str] {
        self.aliases
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code)
    }
}

static REGISTRY: LazyLock<Registry<Currency>> = LazyLock::new(|| Registry::new(CURRENCIES));

macro_rules! currency {
    ($code:literal, $symbol:literal, $name:literal, [$($alias:literal),* $(,)?]) => {
        currency!($code, $symbol, $name, [$($alias),*], false)
    };
    ($code:literal, $symbol:literal, $name:literal, [$($alias:literal),* $(,)?], $after:expr) => {
        Currency { code:         $code,
                   symbol:       $symbol,
                   name:         $name,
                   aliases:      &[$($alias),*],
                   symbol_after: $after }
    };
}

static CURRENCIES: &[Currency] = &[
    currency!("USD", "$", "US Dollar", ["dollar", "dollars", "usd", "bucks", "buck", "us dollar", "us dollars"]),
    currency!("EUR", "€", "Euro", ["euro", "euros", "eur"]),
    currency!("GBP", "£", "British Pound", ["pound", "pounds", "gbp", "quid", "sterling", "british pound", "british pounds"]),
    currency!("JPY", "¥", "Japanese Yen", ["yen", "jpy"]),
    currency!("CHF", "CHF", "Swiss Franc", ["franc", "francs", "chf", "swiss franc", "swiss francs"]),
    // Americas
    currency!("CAD", "C$", "Canadian Dollar", ["cad", "canadian dollar", "canadian dollars", "loonie"]),
    currency!("MXN", "MX$", "Mexican Peso", ["mxn", "peso", "pesos", "mexican peso"]),
    currency!("BRL", "R$", "Brazilian Real", ["brl", "real", "reais", "brazilian real"]),
    currency!("ARS", "AR$", "Argentine Peso", ["ars", "argentine peso"]),
    currency!("CLP", "CL$", "Chilean Peso", ["clp", "chilean peso"]),
    currency!("COP", "CO$", "Colombian Peso", ["cop", "colombian peso"]),
    // Europe
    currency!("RUB", "₽", "Russian Ruble", ["rub", "ruble", "rubles", "rouble", "roubles"], true),
    currency!("UAH", "₴", "Ukrainian Hryvnia", ["uah", "hryvnia", "hryvnias"], true),
    currency!("PLN", "zł", "Polish Zloty", ["pln", "zloty", "zlotys"], true),
    currency!("CZK", "Kč", "Czech Koruna", ["czk", "koruna", "korunas", "czech koruna"]),
    currency!("SEK", "kr", "Swedish Krona", ["sek", "swedish krona", "swedish kronor"]),
    currency!("NOK", "kr", "Norwegian Krone", ["nok", "norwegian krone", "norwegian kroner"]),
    currency!("DKK", "kr", "Danish Krone", ["dkk", "danish krone", "danish kroner"]),
    currency!("HUF", "Ft", "Hungarian Forint", ["huf", "forint", "forints"]),
    currency!("RON", "lei", "Romanian Leu", ["ron", "leu", "lei"]),
    // Middle East
    currency!("TRY", "₺", "Turkish Lira", ["try", "tl", "lira", "liras", "turkish lira", "turk lirasi"], true),
    currency!("ILS", "₪", "Israeli Shekel", ["ils", "shekel", "shekels", "nis"]),
    currency!("AED", "د.إ", "UAE Dirham", ["aed", "dirham", "dirhams", "emirati dirham"]),
    currency!("SAR", "﷼", "Saudi Riyal", ["sar", "riyal", "riyals", "saudi riyal"]),
    currency!("QAR", "﷼", "Qatari Riyal", ["qar", "qatari riyal"]),
    currency!("KWD", "د.ك", "Kuwaiti Dinar", ["kwd", "kuwaiti dinar"]),
    currency!("EGP", "E£", "Egyptian Pound", ["egp", "egyptian pound"]),
    // Asia Pacific
    currency!("CNY", "¥", "Chinese Yuan", ["cny", "yuan", "rmb", "renminbi", "chinese yuan"]),
    currency!("HKD", "HK$", "Hong Kong Dollar", ["hkd", "hong kong dollar"]),
    currency!("TWD", "NT$", "Taiwan Dollar", ["twd", "taiwan dollar", "nt dollar"]),
    currency!("KRW", "₩", "South Korean Won", ["krw", "won", "korean won", "south korean won"]),
    currency!("INR", "₹", "Indian Rupee", ["inr", "rupee", "rupees", "indian rupee", "indian rupees"]),
    currency!("PKR", "₨", "Pakistani Rupee", ["pkr", "pakistani rupee"]),
    currency!("BDT", "৳", "Bangladeshi Taka", ["bdt", "taka", "bangladeshi taka"]),
    currency!("SGD", "S$", "Singapore Dollar", ["sgd", "singapore dollar"]),
    currency!("MYR", "RM", "Malaysian Ringgit", ["myr", "ringgit", "malaysian ringgit"]),
    currency!("THB", "฿", "Thai Baht", ["thb", "baht", "thai baht"]),
    currency!("IDR", "Rp", "Indonesian Rupiah", ["idr", "rupiah", "indonesian rupiah"]),
    currency!("VND", "₫", "Vietnamese Dong", ["vnd", "dong", "vietnamese dong"]),
    currency!("PHP", "₱", "Philippine Peso", ["php", "philippine peso"]),
    // Oceania
    currency!("AUD", "A$", "Australian Dollar", ["aud", "australian dollar", "australian dollars", "aussie dollar"]),
    currency!("NZD", "NZ$", "New Zealand Dollar", ["nzd", "new zealand dollar", "kiwi dollar"]),
    // Africa
    currency!("ZAR", "R", "South African Rand", ["zar", "rand", "south african rand"]),
    currency!("NGN", "₦", "Nigerian Naira", ["ngn", "naira", "nigerian naira"]),
    currency!("KES", "KSh", "Kenyan Shilling", ["kes", "kenyan shilling"]),
];
