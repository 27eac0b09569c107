use std::{fmt, sync::LazyLock};

use crate::interpreter::value::registry::{Entry, Registry};

/// The dimension a unit measures. Only units of the same type convert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum UnitType {
    Length,
    Weight,
    Time,
    Temperature,
    Data,
    Area,
    Volume,
    Speed,
}

impl fmt::Display for UnitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Length => "length",
            Self::Weight => "weight",
            Self::Time => "time",
            Self::Temperature => "temperature",
            Self::Data => "data",
            Self::Area => "area",
            Self::Volume => "volume",
            Self::Speed => "speed",
        };
        f.write_str(name)
    }
}

/// A unit of measurement.
///
/// Linear units convert through the base unit of their type with `to_base`.
/// Temperatures convert through kelvin with offsets and ignore `to_base`.
#[derive(Debug, PartialEq)]
pub struct Unit {
    /// Canonical code, e.g. `km`.
    pub code:    &'static str,
    /// Display symbol, e.g. `km²` for `sqkm`.
    pub symbol:  &'static str,
    /// Singular English name.
    pub name:    &'static str,
    /// Plural English name.
    pub plural:  &'static str,
    /// What the unit measures.
    pub kind:    UnitType,
    /// Natural-language names.
    pub aliases: &'static [&'static str],
    /// Multiplier from this unit to its type's base unit.
    pub to_base: f64,
}

impl Unit {
    /// Finds a unit by code (exact, then ignoring case) or alias.
    ///
    /// # Example
    /// ```
    /// use tally::interpreter::value::unit::{Unit, UnitType};
    ///
    /// let km = Unit::lookup("kilometers").unwrap();
    /// assert_eq!(km.code, "km");
    /// assert_eq!(km.kind, UnitType::Length);
    /// assert_eq!(Unit::lookup("square feet").map(|u| u.code), Some("sqft"));
    /// ```
    #[must_use]
    pub fn lookup(name: &str) -> Option<&'static Self> {
        let name = name.trim();
        REGISTRY.by_code(name).or_else(|| REGISTRY.by_alias(name))
    }


    /// Converts `value` from this unit to `target`.
    ///
    /// Returns `None` when the two units measure different things.
    ///
    /// # Example
    /// ```
    /// use tally::interpreter::value::unit::Unit;
    ///
    /// let c = Unit::lookup("C").unwrap();
    /// let f = Unit::lookup("F").unwrap();
    /// assert_eq!(c.convert_to(100.0, f), Some(212.0));
    ///
    /// let kg = Unit::lookup("kg").unwrap();
    /// assert_eq!(kg.convert_to(1.0, c), None);
    /// ```
    #[must_use]
    pub fn convert_to(&self, value: f64, target: &Self) -> Option<f64> {
        if self.kind != target.kind {
            return None;
        }
        if self.kind == UnitType::Temperature {
            return Some(from_kelvin(to_kelvin(value, self.code), target.code));
        }

        Some(value * self.to_base / target.to_base)
    }
}

fn to_kelvin(value: f64, code: &str) -> f64 {
    match code {
        "C" => value + 273.15,
        "F" => (value - 32.0) * 5.0 / 9.0 + 273.15,
        _ => value,
    }
}

fn from_kelvin(kelvin: f64, code: &str) -> f64 {
    match code {
        "C" => kelvin - 273.15,
        "F" => (kelvin - 273.15) * 9.0 / 5.0 + 32.0,
        _ => kelvin,
    }
}

impl Entry for Unit {
    fn code(&self) -> &'static str {
        self.code
    }

    fn aliases(&self) -> &'static [&'static str] {
        self.aliases
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code)
    }
}

static REGISTRY: LazyLock<Registry<Unit>> = LazyLock::new(|| Registry::new(UNITS));

macro_rules! unit {
    ($kind:ident, $code:literal, $symbol:literal, $name:literal, $plural:literal, $to_base:expr, [$($alias:literal),* $(,)?]) => {
        Unit { code:    $code,
               symbol:  $symbol,
               name:    $name,
               plural:  $plural,
               kind:    UnitType::$kind,
               aliases: &[$($alias),*],
               to_base: $to_base }
    };
}

static UNITS: &[Unit] = &[
    // Length, base metre
    unit!(Length, "m", "m", "meter", "meters", 1.0, ["meter", "meters", "metre", "metres"]),
    unit!(Length, "km", "km", "kilometer", "kilometers", 1000.0, ["kilometer", "kilometers", "kilometre", "kilometres"]),
    unit!(Length, "cm", "cm", "centimeter", "centimeters", 0.01, ["centimeter", "centimeters", "centimetre", "centimetres"]),
    unit!(Length, "mm", "mm", "millimeter", "millimeters", 0.001, ["millimeter", "millimeters", "millimetre", "millimetres"]),
    unit!(Length, "mi", "mi", "mile", "miles", 1609.344, ["mile", "miles"]),
    unit!(Length, "yd", "yd", "yard", "yards", 0.9144, ["yard", "yards"]),
    unit!(Length, "ft", "ft", "foot", "feet", 0.3048, ["foot", "feet"]),
    unit!(Length, "in", "in", "inch", "inches", 0.0254, ["inch", "inches"]),
    unit!(Length, "nm", "nm", "nautical mile", "nautical miles", 1852.0, ["nautical mile", "nautical miles", "nmi"]),
    // Weight, base gram
    unit!(Weight, "g", "g", "gram", "grams", 1.0, ["gram", "grams"]),
    unit!(Weight, "kg", "kg", "kilogram", "kilograms", 1000.0, ["kilogram", "kilograms", "kilo", "kilos"]),
    unit!(Weight, "mg", "mg", "milligram", "milligrams", 0.001, ["milligram", "milligrams"]),
    unit!(Weight, "t", "t", "tonne", "tonnes", 1_000_000.0, ["tons", "tonne", "tonnes", "metric ton", "metric tons"]),
    unit!(Weight, "lb", "lb", "pound", "pounds", 453.592, ["pound", "pounds", "lbs"]),
    unit!(Weight, "oz", "oz", "ounce", "ounces", 28.3495, ["ounce", "ounces"]),
    unit!(Weight, "st", "st", "stone", "stones", 6350.29, ["stone", "stones"]),
    unit!(Weight, "ozt", "ozt", "troy ounce", "troy ounces", 31.1035, ["troy ounce", "troy ounces", "oz t"]),
    // Time, base second
    unit!(Time, "s", "s", "second", "seconds", 1.0, ["second", "seconds", "sec", "secs"]),
    unit!(Time, "ms", "ms", "millisecond", "milliseconds", 0.001, ["millisecond", "milliseconds"]),
    unit!(Time, "min", "min", "minute", "minutes", 60.0, ["minute", "minutes", "mins"]),
    unit!(Time, "h", "h", "hour", "hours", 3600.0, ["hour", "hours", "hr", "hrs"]),
    unit!(Time, "d", "d", "day", "days", 86_400.0, ["day", "days"]),
    unit!(Time, "wk", "wk", "week", "weeks", 604_800.0, ["week", "weeks"]),
    unit!(Time, "mo", "mo", "month", "months", 2_629_746.0, ["month", "months"]),
    unit!(Time, "y", "y", "year", "years", 31_556_952.0, ["year", "years", "yr", "yrs"]),
    // Temperature, base kelvin
    unit!(Temperature, "K", "K", "kelvin", "kelvin", 1.0, ["kelvin"]),
    unit!(Temperature, "C", "°C", "celsius", "celsius", 1.0, ["celsius", "centigrade"]),
    unit!(Temperature, "F", "°F", "fahrenheit", "fahrenheit", 1.0, ["fahrenheit"]),
    // Data, base byte, binary multiples
    unit!(Data, "B", "B", "byte", "bytes", 1.0, ["byte", "bytes"]),
    unit!(Data, "KB", "KB", "kilobyte", "kilobytes", 1024.0, ["kilobyte", "kilobytes"]),
    unit!(Data, "MB", "MB", "megabyte", "megabytes", 1_048_576.0, ["megabyte", "megabytes"]),
    unit!(Data, "GB", "GB", "gigabyte", "gigabytes", 1_073_741_824.0, ["gigabyte", "gigabytes"]),
    unit!(Data, "TB", "TB", "terabyte", "terabytes", 1_099_511_627_776.0, ["terabyte", "terabytes"]),
    unit!(Data, "PB", "PB", "petabyte", "petabytes", 1_125_899_906_842_624.0, ["petabyte", "petabytes"]),
    unit!(Data, "bit", "bit", "bit", "bits", 0.125, ["bits"]),
    unit!(Data, "Kbit", "Kbit", "kilobit", "kilobits", 128.0, ["kilobit", "kilobits"]),
    unit!(Data, "Mbit", "Mbit", "megabit", "megabits", 131_072.0, ["megabit", "megabits"]),
    unit!(Data, "Gbit", "Gbit", "gigabit", "gigabits", 134_217_728.0, ["gigabit", "gigabits"]),
    // Area, base square metre
    unit!(Area, "sqm", "m²", "square meter", "square meters", 1.0, ["square meter", "square meters", "sq m", "m2"]),
    unit!(Area, "sqkm", "km²", "square kilometer", "square kilometers", 1_000_000.0, ["square kilometer", "square kilometers", "sq km", "km2"]),
    unit!(Area, "sqft", "ft²", "square foot", "square feet", 0.092_903, ["square foot", "square feet", "sq ft", "ft2"]),
    unit!(Area, "sqmi", "mi²", "square mile", "square miles", 2_589_988.0, ["square mile", "square miles", "sq mi", "mi2"]),
    unit!(Area, "acre", "acre", "acre", "acres", 4046.86, ["acres"]),
    unit!(Area, "ha", "ha", "hectare", "hectares", 10_000.0, ["hectare", "hectares"]),
    // Volume, base litre
    unit!(Volume, "L", "L", "liter", "liters", 1.0, ["liter", "liters", "litre", "litres"]),
    unit!(Volume, "mL", "mL", "milliliter", "milliliters", 0.001, ["milliliter", "milliliters", "millilitre", "millilitres"]),
    unit!(Volume, "gal", "gal", "gallon", "gallons", 3.785_41, ["gallon", "gallons"]),
    unit!(Volume, "qt", "qt", "quart", "quarts", 0.946_353, ["quart", "quarts"]),
    unit!(Volume, "pt", "pt", "pint", "pints", 0.473_176, ["pint", "pints"]),
    unit!(Volume, "cup", "cup", "cup", "cups", 0.236_588, ["cups"]),
    unit!(Volume, "floz", "fl oz", "fluid ounce", "fluid ounces", 0.029_573_5, ["fluid ounce", "fluid ounces", "fl oz"]),
    unit!(Volume, "tbsp", "tbsp", "tablespoon", "tablespoons", 0.014_786_8, ["tablespoon", "tablespoons"]),
    unit!(Volume, "tsp", "tsp", "teaspoon", "teaspoons", 0.004_928_92, ["teaspoon", "teaspoons"]),
    unit!(Volume, "m3", "m³", "cubic meter", "cubic meters", 1000.0, ["cubic meter", "cubic meters", "cubic metre", "cubic metres"]),
    // Speed, base metres per second
    unit!(Speed, "mps", "m/s", "meter per second", "meters per second", 1.0, ["mps"]),
    unit!(Speed, "kph", "km/h", "kilometer per hour", "kilometers per hour", 1.0 / 3.6, ["kmh", "kmph"]),
    unit!(Speed, "mph", "mph", "mile per hour", "miles per hour", 0.447_04, ["mph"]),
    unit!(Speed, "kn", "kn", "knot", "knots", 0.514_444, ["knot", "knots"]),
];
