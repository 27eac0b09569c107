use std::fmt;

use crate::interpreter::value::{crypto::Crypto, currency::Currency, metal::Metal, unit::Unit};

/// One parsed input line.
///
/// A line holds at most one statement plus an optional trailing comment. The
/// raw source is kept so a front end can redisplay exactly what was typed.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    /// The statement on the line.
    pub statement: Statement,
    /// A trailing `#` or `//` comment, including its marker.
    pub comment:   Option<String>,
    /// The line as it was typed.
    pub raw:       String,
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.statement, &self.comment) {
            (Statement::Empty, Some(comment)) => f.write_str(comment),
            (statement, Some(comment)) => write!(f, "{statement} {comment}"),
            (statement, None) => write!(f, "{statement}"),
        }
    }
}

/// The statement forms a line can take.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// Nothing but whitespace.
    Empty,
    /// A comment-only line; holds the full text including `#` or `//`.
    Comment(String),
    /// An expression whose value is the line's result.
    Expression(Expr),
    /// `name = expr`.
    Assignment {
        /// Variable name, exactly as typed.
        name: String,
        /// The right-hand side.
        expr: Expr,
    },
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => Ok(()),
            Self::Comment(text) => f.write_str(text),
            Self::Expression(expr) => write!(f, "{expr}"),
            Self::Assignment { name, expr } => write!(f, "{name} = {expr}"),
        }
    }
}

/// An abstract syntax tree node representing an expression.
///
/// Literal variants keep the source text they were read from in `raw`, and
/// typed literals hold the registry descriptor the parser resolved, so the
/// evaluator never looks names up a second time.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A plain number such as `1,234.5`.
    NumberLit {
        value: f64,
        raw:   String,
    },
    /// A percentage such as `20%`, stored as the decimal `0.2`.
    PercentLit {
        value: f64,
        raw:   String,
    },
    /// An amount of fiat currency: `$100`, `50 EUR`, `100 turkish lira`.
    CurrencyLit {
        amount:   f64,
        currency: &'static Currency,
        raw:      String,
    },
    /// A measurement: `5 km`, `3 square feet`.
    UnitLit {
        amount: f64,
        unit:   &'static Unit,
        raw:    String,
    },
    /// An amount of a traded metal: `2 gold`.
    MetalLit {
        amount: f64,
        metal:  &'static Metal,
        raw:    String,
    },
    /// An amount of a cryptocurrency: `0.5 BTC`, `₿1`.
    CryptoLit {
        amount: f64,
        crypto: &'static Crypto,
        raw:    String,
    },
    /// A name: a variable, `_` for the previous result, or `total`.
    Identifier {
        name: String,
    },
    /// `left op right`.
    Binary {
        left:  Box<Self>,
        op:    BinaryOperator,
        right: Box<Self>,
    },
    /// A prefix `-` or `+`.
    Unary {
        op:   UnaryOperator,
        expr: Box<Self>,
    },
    /// `20% of 150`.
    PercentOf {
        percent: Box<Self>,
        value:   Box<Self>,
    },
    /// `expr in target`. The target is resolved at evaluation time.
    Conversion {
        expr:   Box<Self>,
        target: String,
    },
    /// `name(args...)`.
    Call {
        name: String,
        args: Vec<Self>,
    },
    /// `( expr )`.
    Group {
        expr: Box<Self>,
    },
    /// A line starting with an operator, applied to the previous result.
    Continuation {
        op:   BinaryOperator,
        expr: Box<Self>,
    },
    /// A line starting with `in`/`to`, converting the previous result.
    ConversionContinuation {
        target: String,
    },
}

impl Expr {
    /// A plain number literal whose raw text is its own rendering. Used for
    /// placeholder operands after a parse error.
    #[must_use]
    pub fn number(value: f64) -> Self {
        Self::NumberLit { value,
                          raw: value.to_string() }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NumberLit { raw, .. }
            | Self::PercentLit { raw, .. }
            | Self::CurrencyLit { raw, .. }
            | Self::UnitLit { raw, .. }
            | Self::MetalLit { raw, .. }
            | Self::CryptoLit { raw, .. } => f.write_str(raw),
            Self::Identifier { name } => f.write_str(name),
            Self::Binary { left, op, right } => write!(f, "({left} {op} {right})"),
            Self::Unary { op, expr } => write!(f, "({op}{expr})"),
            Self::PercentOf { percent, value } => write!(f, "{percent} of {value}"),
            Self::Conversion { expr, target } => write!(f, "{expr} in {target}"),
            Self::Call { name, args } => {
                write!(f, "{name}(")?;
                for (index, arg) in args.iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{arg}")?;
                }
                write!(f, ")")
            },
            Self::Group { expr } => write!(f, "({expr})"),
            Self::Continuation { op, expr } => write!(f, "{op} {expr}"),
            Self::ConversionContinuation { target } => write!(f, "in {target}"),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Pow,
}

impl BinaryOperator {
    /// Binding strength: `+ -` is 1, `* / mod` is 2, `^` is 3.
    #[must_use]
    pub const fn precedence(self) -> u8 {
        match self {
            Self::Add | Self::Sub => 1,
            Self::Mul | Self::Div | Self::Mod => 2,
            Self::Pow => 3,
        }
    }

    #[must_use]
    pub const fn is_right_associative(self) -> bool {
        matches!(self, Self::Pow)
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let operator = match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Mod => "%",
            Self::Pow => "^",
        };
        f.write_str(operator)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum UnaryOperator {
    Negate,
    Plus,
}

impl fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
                        Self::Negate => "-",
                        Self::Plus => "+",
                    })
    }
}
