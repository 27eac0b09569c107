//! Offline fallback rates.
//!
//! Approximate market rates seeded into every [`RateCache::new`] so that
//! conversions work before the first refresh. Seeding does not stamp the
//! cache, so a freshly built cache still reports itself as expired.
//!
//! [`RateCache::new`]: crate::rates::cache::RateCache::new

/// Fiat rates quoted as `1 USD = rate CODE`.
pub const FIAT: &[(&str, f64)] = &[("EUR", 0.92),
                                   ("GBP", 0.79),
                                   ("JPY", 149.50),
                                   ("CHF", 0.88),
                                   ("CAD", 1.36),
                                   ("AUD", 1.53),
                                   ("CNY", 7.24),
                                   ("INR", 83.12),
                                   ("KRW", 1320.0),
                                   ("MXN", 17.15),
                                   ("BRL", 4.97),
                                   ("RUB", 92.50),
                                   ("TRY", 32.50),
                                   ("ZAR", 18.65),
                                   ("SGD", 1.34),
                                   ("HKD", 7.82),
                                   ("NOK", 10.65),
                                   ("SEK", 10.42),
                                   ("DKK", 6.87),
                                   ("PLN", 3.98),
                                   ("THB", 35.20),
                                   ("IDR", 15650.0),
                                   ("MYR", 4.72),
                                   ("PHP", 55.80),
                                   ("CZK", 22.85),
                                   ("ILS", 3.72),
                                   ("AED", 3.67),
                                   ("SAR", 3.75),
                                   ("TWD", 31.50),
                                   ("HUF", 355.0),
                                   ("UAH", 41.0),
                                   ("VND", 24500.0),
                                   ("EGP", 30.90),
                                   ("PKR", 285.0),
                                   ("BDT", 110.0),
                                   ("NGN", 800.0),
                                   ("ARS", 850.0),
                                   ("CLP", 880.0),
                                   ("COP", 3950.0),
                                   ("KES", 155.0),
                                   ("QAR", 3.64),
                                   ("KWD", 0.31),
                                   ("RON", 4.57),
                                   ("NZD", 1.64)];

/// Crypto prices quoted as `1 CODE = rate USD`.
pub const CRYPTO: &[(&str, f64)] = &[("BTC", 95000.0),
                                     ("ETH", 3500.0),
                                     ("SOL", 180.0),
                                     ("BNB", 650.0),
                                     ("XRP", 2.20),
                                     ("ADA", 0.95),
                                     ("DOGE", 0.38),
                                     ("DOT", 7.50),
                                     ("MATIC", 0.55),
                                     ("LTC", 105.0),
                                     ("LINK", 22.0),
                                     ("AVAX", 42.0),
                                     ("ATOM", 9.50),
                                     ("UNI", 12.0),
                                     ("XLM", 0.42),
                                     ("ALGO", 0.35),
                                     ("TON", 6.50),
                                     ("NEAR", 5.80),
                                     ("APT", 12.50),
                                     ("ARB", 1.10),
                                     ("OP", 2.80),
                                     ("AAVE", 350.0),
                                     ("MKR", 3200.0),
                                     ("CRV", 0.85),
                                     ("SHIB", 0.000_025),
                                     ("PEPE", 0.000_018),
                                     ("WIF", 2.50),
                                     ("BONK", 0.000_032),
                                     ("USDT", 1.0),
                                     ("USDC", 1.0),
                                     ("DAI", 1.0),
                                     ("BUSD", 1.0)];

/// Metal prices quoted as `1 CODE = rate USD` per troy ounce.
pub const METALS: &[(&str, f64)] = &[("XAU", 2650.0),
                                     ("XAG", 31.50),
                                     ("XPT", 1020.0),
                                     ("XPD", 1100.0)];
