use std::fmt;

use crate::{
    error::EvalError,
    interpreter::value::{
        crypto::Crypto,
        currency::Currency,
        metal::Metal,
        unit::Unit,
    },
    util::num::{format_number, format_with_decimals},
};

/// Represents the result of evaluating a line or sub-expression.
///
/// Typed variants carry a `'static` descriptor from the registries, so
/// values are cheap to clone and compare. A percentage stores its decimal
/// fraction: `15%` is `Percentage(0.15)`.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// No value: an empty line or a comment.
    Empty,
    /// A plain number.
    Number(f64),
    /// A percentage as a decimal fraction.
    Percentage(f64),
    /// An amount of fiat currency.
    Currency {
        amount:   f64,
        currency: &'static Currency,
    },
    /// A measurement.
    WithUnit {
        amount: f64,
        unit:   &'static Unit,
    },
    /// An amount of a traded metal.
    Metal {
        amount: f64,
        metal:  &'static Metal,
    },
    /// An amount of a cryptocurrency.
    Crypto {
        amount: f64,
        crypto: &'static Crypto,
    },
    /// A failed evaluation. Propagates through every operation.
    Error(EvalError),
}

/// The variant of a [`Value`] without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Empty,
    Number,
    Percentage,
    Currency,
    WithUnit,
    Metal,
    Crypto,
    Error,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Empty => "empty",
            Self::Number => "number",
            Self::Percentage => "percentage",
            Self::Currency => "currency",
            Self::WithUnit => "unit",
            Self::Metal => "metal",
            Self::Crypto => "crypto",
            Self::Error => "error",
        };
        f.write_str(name)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<EvalError> for Value {
    fn from(err: EvalError) -> Self {
        Self::Error(err)
    }
}

impl Value {
    /// Creates a currency amount.
    #[must_use]
    pub const fn currency(amount: f64, currency: &'static Currency) -> Self {
        Self::Currency { amount, currency }
    }

    /// Creates a measurement.
    #[must_use]
    pub const fn unit(amount: f64, unit: &'static Unit) -> Self {
        Self::WithUnit { amount, unit }
    }

    /// Creates a metal amount.
    #[must_use]
    pub const fn metal(amount: f64, metal: &'static Metal) -> Self {
        Self::Metal { amount, metal }
    }

    /// Creates a crypto amount.
    #[must_use]
    pub const fn crypto(amount: f64, crypto: &'static Crypto) -> Self {
        Self::Crypto { amount, crypto }
    }

    /// Creates a percentage from its display form: `percent(20.0)` is 20%.
    #[must_use]
    pub fn percent(display: f64) -> Self {
        Self::Percentage(display / 100.0)
    }

    /// Returns the variant of this value.
    #[must_use]
    pub const fn kind(&self) -> ValueKind {
        match self {
            Self::Empty => ValueKind::Empty,
            Self::Number(_) => ValueKind::Number,
            Self::Percentage(_) => ValueKind::Percentage,
            Self::Currency { .. } => ValueKind::Currency,
            Self::WithUnit { .. } => ValueKind::WithUnit,
            Self::Metal { .. } => ValueKind::Metal,
            Self::Crypto { .. } => ValueKind::Crypto,
            Self::Error(_) => ValueKind::Error,
        }
    }

    /// The numeric payload. Percentages return their decimal; `Empty` and
    /// `Error` return 0.
    #[must_use]
    pub const fn amount(&self) -> f64 {
        match self {
            Self::Number(n) | Self::Percentage(n) => *n,
            Self::Currency { amount, .. }
            | Self::WithUnit { amount, .. }
            | Self::Metal { amount, .. }
            | Self::Crypto { amount, .. } => *amount,
            Self::Empty | Self::Error(_) => 0.0,
        }
    }

    /// Returns a value of the same type and descriptor with a new amount.
    ///
    /// # Example
    /// ```
    /// use tally::interpreter::value::{core::Value, currency::Currency};
    ///
    /// let price = Value::currency(10.0, Currency::usd());
    /// assert_eq!(price.with_amount(12.5).to_string(), "$12.50");
    /// ```
    #[must_use]
    pub fn with_amount(&self, amount: f64) -> Self {
        match self {
            Self::Number(_) => Self::Number(amount),
            Self::Percentage(_) => Self::Percentage(amount),
            Self::Currency { currency, .. } => Self::currency(amount, *currency),
            Self::WithUnit { unit, .. } => Self::unit(amount, *unit),
            Self::Metal { metal, .. } => Self::metal(amount, *metal),
            Self::Crypto { crypto, .. } => Self::crypto(amount, *crypto),
            Self::Empty | Self::Error(_) => self.clone(),
        }
    }

    /// Negates the amount, keeping the type.
    #[must_use]
    pub fn negate(&self) -> Self {
        self.with_amount(-self.amount())
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    #[must_use]
    pub const fn is_number(&self) -> bool {
        matches!(self, Self::Number(_))
    }

    #[must_use]
    pub const fn is_percentage(&self) -> bool {
        matches!(self, Self::Percentage(_))
    }

    #[must_use]
    pub const fn is_currency(&self) -> bool {
        matches!(self, Self::Currency { .. })
    }

    #[must_use]
    pub const fn is_unit(&self) -> bool {
        matches!(self, Self::WithUnit { .. })
    }

    #[must_use]
    pub const fn is_metal(&self) -> bool {
        matches!(self, Self::Metal { .. })
    }

    #[must_use]
    pub const fn is_crypto(&self) -> bool {
        matches!(self, Self::Crypto { .. })
    }

    /// Returns `true` for every variant that carries an amount.
    #[must_use]
    pub const fn is_numeric(&self) -> bool {
        !matches!(self, Self::Empty | Self::Error(_))
    }

    /// Returns the error if this value is one.
    #[must_use]
    pub const fn as_error(&self) -> Option<&EvalError> {
        match self {
            Self::Error(err) => Some(err),
            _ => None,
        }
    }

    /// The code of the value's descriptor, e.g. `USD`, `km`, `XAU`, `BTC`.
    #[must_use]
    pub const fn code(&self) -> Option<&'static str> {
        match self {
            Self::Currency { currency, .. } => Some(currency.code),
            Self::WithUnit { unit, .. } => Some(unit.code),
            Self::Metal { metal, .. } => Some(metal.code),
            Self::Crypto { crypto, .. } => Some(crypto.code),
            _ => None,
        }
    }

    /// Formats the value rounding plain amounts to `precision` decimals.
    ///
    /// Numbers, percentages, measurements and metals are rounded and
    /// trimmed. Currency always shows two decimals and crypto its coin's
    /// own decimals.
    ///
    /// # Example
    /// ```
    /// use tally::interpreter::value::core::Value;
    ///
    /// assert_eq!(Value::Number(3.14159).format_with_precision(3), "3.142");
    /// assert_eq!(Value::Number(2.0).format_with_precision(3), "2");
    /// assert_eq!(Value::percent(12.345).format_with_precision(1), "12.3%");
    /// ```
    #[must_use]
    pub fn format_with_precision(&self, precision: u8) -> String {
        match self {
            Self::Number(n) => format_with_decimals(*n, precision),
            Self::Percentage(p) => format!("{}%", format_with_decimals(p * 100.0, precision)),
            Self::WithUnit { amount, unit } => {
                format!("{} {}", format_with_decimals(*amount, precision), unit.code)
            },
            Self::Metal { amount, metal } => {
                format!("{} {}", format_with_decimals(*amount, precision), metal.code)
            },
            _ => self.to_string(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => Ok(()),
            Self::Number(n) => f.write_str(&format_number(*n)),
            Self::Percentage(p) => write!(f, "{}%", format_number(p * 100.0)),
            Self::Currency { amount, currency } => f.write_str(&currency.format_amount(*amount)),
            Self::WithUnit { amount, unit } => write!(f, "{} {}", format_number(*amount), unit.code),
            Self::Metal { amount, metal } => write!(f, "{} {}", format_number(*amount), metal.code),
            Self::Crypto { amount, crypto } => f.write_str(&crypto.format_amount(*amount)),
            Self::Error(err) => write!(f, "Error: {err}"),
        }
    }
}
