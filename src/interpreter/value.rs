/// The `Value` enum and its formatting.
///
/// Defines every result type a line can produce and the display rules for
/// each kind.
pub mod core;
/// Lookup tables shared by the descriptor registries.
pub mod registry;
/// Fiat currencies.
///
/// Codes, symbols, natural-language aliases and display placement for the
/// supported currencies. Lookup accepts a symbol, an ISO code in any case or
/// an alias such as `turkish lira`.
pub mod currency;
/// Cryptocurrencies, with their glyphs and display decimals.
pub mod crypto;
/// Traded metals.
pub mod metal;
/// Units of measurement grouped by dimension, with conversion factors.
///
/// Linear units convert through a per-dimension base unit. Temperatures
/// convert through kelvin.
pub mod unit;
