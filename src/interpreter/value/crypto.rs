use std::{fmt, sync::LazyLock};

use crate::{
    interpreter::value::registry::{Entry, Registry},
    util::num::trim_fixed,
};

/// A cryptocurrency.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct Crypto {
    /// Ticker, e.g. `BTC`.
    pub code:     &'static str,
    /// Display glyph, or the ticker when the coin has none.
    pub symbol:   &'static str,
    /// Full name.
    pub name:     &'static str,
    /// Natural-language names.
    pub aliases:  &'static [&'static str],
    /// Decimal places shown when formatting.
    pub decimals: usize,
}

impl Crypto {
    /// Finds a coin by symbol, ticker or alias.
    #[must_use]
    pub fn lookup(name: &str) -> Option<&'static Self> {
        REGISTRY.lookup(name)
    }

    /// Finds a coin by its display glyph only.
    #[must_use]
    pub fn by_symbol(symbol: &str) -> Option<&'static Self> {
        REGISTRY.by_symbol(symbol)
    }

    /// Returns `true` if `code` is a known ticker.
    #[must_use]
    pub fn is_code(code: &str) -> bool {
        REGISTRY.by_code(code).is_some()
    }


    /// Returns `true` if the coin has a glyph distinct from its ticker.
    #[must_use]
    pub fn has_symbol(&self) -> bool {
        self.symbol != self.code
    }

    /// Formats `amount` as `<symbol><amount>` using the coin's decimals.
    #[must_use]
    pub fn format_amount(&self, amount: f64) -> String {
        let digits = trim_fixed(amount.abs(), self.decimals);
        let sign = if amount < 0.0 && digits != "0" { "-" } else { "" };
        if self.has_symbol() {
            format!("{sign}{}{digits}", self.symbol)
        } else {
            format!("{sign}{digits} {}", self.code)
        }
    }
}

impl Entry for Crypto {
    fn code(&self) -> &'static str {
        self.code
    }

    fn symbol(&self) -> Option<&'static str> {
        self.has_symbol().then_some(self.symbol)
    }

    fn aliases(&self) -> &'static [&'static str] {
        self.aliases
    }
}

impl fmt::Display for Crypto {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code)
    }
}

static REGISTRY: LazyLock<Registry<Crypto>> = LazyLock::new(|| Registry::new(CRYPTOS));

macro_rules! crypto {
    ($code:literal, $symbol:literal, $name:literal, [$($alias:literal),* $(,)?], $decimals:literal) => {
        Crypto { code:     $code,
                 symbol:   $symbol,
                 name:     $name,
                 aliases:  &[$($alias),*],
                 decimals: $decimals }
    };
}

static CRYPTOS: &[Crypto] = &[
    crypto!("BTC", "₿", "Bitcoin", ["bitcoin", "btc", "xbt"], 8),
    crypto!("ETH", "Ξ", "Ethereum", ["ethereum", "eth", "ether"], 6),
    // Stablecoins
    crypto!("USDT", "₮", "Tether", ["tether", "usdt"], 2),
    crypto!("USDC", "USDC", "USD Coin", ["usd coin", "usdc"], 2),
    crypto!("DAI", "DAI", "Dai", ["dai", "makerdao"], 2),
    crypto!("BUSD", "BUSD", "Binance USD", ["binance usd", "busd"], 2),
    // Major altcoins
    crypto!("BNB", "BNB", "BNB", ["bnb", "binance coin", "binance"], 4),
    crypto!("SOL", "◎", "Solana", ["solana", "sol"], 4),
    crypto!("XRP", "XRP", "XRP", ["xrp", "ripple"], 4),
    crypto!("ADA", "₳", "Cardano", ["cardano", "ada"], 4),
    crypto!("DOGE", "Ð", "Dogecoin", ["dogecoin", "doge"], 4),
    crypto!("DOT", "DOT", "Polkadot", ["polkadot", "dot"], 4),
    crypto!("MATIC", "MATIC", "Polygon", ["polygon", "matic"], 4),
    crypto!("AVAX", "AVAX", "Avalanche", ["avalanche", "avax"], 4),
    crypto!("LTC", "Ł", "Litecoin", ["litecoin", "ltc"], 4),
    crypto!("LINK", "LINK", "Chainlink", ["chainlink", "link"], 4),
    crypto!("ATOM", "ATOM", "Cosmos", ["cosmos", "atom"], 4),
    crypto!("UNI", "UNI", "Uniswap", ["uniswap", "uni"], 4),
    crypto!("XLM", "XLM", "Stellar", ["stellar", "xlm", "lumens"], 4),
    crypto!("ALGO", "ALGO", "Algorand", ["algorand", "algo"], 4),
    crypto!("TON", "TON", "Toncoin", ["toncoin", "telegram"], 4),
    // DeFi and others
    crypto!("AAVE", "AAVE", "Aave", ["aave"], 4),
    crypto!("MKR", "MKR", "Maker", ["maker", "mkr"], 4),
    crypto!("CRV", "CRV", "Curve", ["curve", "crv"], 4),
    crypto!("NEAR", "NEAR", "NEAR Protocol", ["near", "near protocol"], 4),
    crypto!("APT", "APT", "Aptos", ["aptos", "apt"], 4),
    crypto!("ARB", "ARB", "Arbitrum", ["arbitrum", "arb"], 4),
    crypto!("OP", "OP", "Optimism", ["optimism", "op"], 4),
    // Memecoins
    crypto!("SHIB", "SHIB", "Shiba Inu", ["shiba", "shib", "shiba inu"], 8),
    crypto!("PEPE", "PEPE", "Pepe", ["pepe"], 8),
    crypto!("WIF", "WIF", "dogwifhat", ["dogwifhat", "wif"], 4),
    crypto!("BONK", "BONK", "Bonk", ["bonk"], 8),
];
