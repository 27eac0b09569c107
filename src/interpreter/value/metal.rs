use std::{fmt, sync::LazyLock};

use crate::interpreter::value::registry::{Entry, Registry};

/// A traded metal priced per troy ounce or per pound.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct Metal {
    /// Commodity code, e.g. `XAU`.
    pub code:      &'static str,
    /// English name.
    pub name:      &'static str,
    /// Natural-language names.
    pub aliases:   &'static [&'static str],
    /// Quoting unit, `oz` or `lb`.
    pub unit_name: &'static str,
}

impl Metal {
    /// Finds a metal by code or alias.
    ///
    /// # Example
    /// ```
    /// use tally::interpreter::value::metal::Metal;
    ///
    /// assert_eq!(Metal::lookup("gold").map(|m| m.code), Some("XAU"));
    /// assert_eq!(Metal::lookup("xag").map(|m| m.code), Some("XAG"));
    /// ```
    #[must_use]
    pub fn lookup(name: &str) -> Option<&'static Self> {
        REGISTRY.lookup(name)
    }

    /// Returns `true` if `code` is a known metal code.
    #[must_use]
    pub fn is_code(code: &str) -> bool {
        REGISTRY.by_code(code).is_some()
    }

}

impl Entry for Metal {
    fn code(&self) -> &'static str {
        self.code
    }

    fn aliases(&self) -> &'static [&'static str] {
        self.aliases
    }
}

impl fmt::Display for Metal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code)
    }
}

static REGISTRY: LazyLock<Registry<Metal>> = LazyLock::new(|| Registry::new(METALS));

// `pt` and `pb` are left out as aliases: they are the pint and the petabyte.
static METALS: &[Metal] = &[
    Metal { code:      "XAU",
            name:      "Gold",
            aliases:   &["gold", "au", "xau"],
            unit_name: "oz", },
    Metal { code:      "XAG",
            name:      "Silver",
            aliases:   &["silver", "ag", "xag"],
            unit_name: "oz", },
    Metal { code:      "XPT",
            name:      "Platinum",
            aliases:   &["platinum", "xpt"],
            unit_name: "oz", },
    Metal { code:      "XPD",
            name:      "Palladium",
            aliases:   &["palladium", "pd", "xpd"],
            unit_name: "oz", },
    Metal { code:      "XCU",
            name:      "Copper",
            aliases:   &["copper", "cu", "xcu"],
            unit_name: "lb", },
    Metal { code:      "XAL",
            name:      "Aluminum",
            aliases:   &["aluminum", "aluminium", "al", "xal"],
            unit_name: "lb", },
    Metal { code:      "XNI",
            name:      "Nickel",
            aliases:   &["nickel", "ni", "xni"],
            unit_name: "lb", },
    Metal { code:      "XZN",
            name:      "Zinc",
            aliases:   &["zinc", "zn", "xzn"],
            unit_name: "lb", },
    Metal { code:      "XPB",
            name:      "Lead",
            aliases:   &["lead", "xpb"],
            unit_name: "lb", },
    Metal { code:      "XSN",
            name:      "Tin",
            aliases:   &["tin", "sn", "xsn"],
            unit_name: "lb", },
];
