use std::fmt;

use thiserror::Error;

/// Represents every way evaluating a line can fail.
///
/// `EvalError` is carried inside [`Value::Error`] and propagates through an
/// expression tree by short-circuit. The variant records the broad kind of
/// failure; callers normally only display it.
///
/// [`Value::Error`]: crate::interpreter::value::core::Value::Error
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    /// The line did not parse; holds the first parser message.
    #[error("{0}")]
    Parse(String),
    /// A general evaluation failure, such as a bad function argument count.
    #[error("{0}")]
    Evaluation(String),
    /// A conversion between currencies, units or commodities failed.
    #[error("{0}")]
    Conversion(String),
    /// Division by a zero right operand.
    #[error("division by zero")]
    DivisionByZero,
    /// Modulo by a zero right operand.
    #[error("modulo by zero")]
    ModuloByZero,
    /// A name resolved to nothing in strict mode.
    #[error("undefined variable: {name}")]
    UndefinedVariable {
        /// The unresolved name.
        name: String,
    },
    /// A call to a function that does not exist.
    #[error("unknown function: {name}")]
    UnknownFunction {
        /// The lowercased function name.
        name: String,
    },
    /// Operands of kinds that cannot be combined.
    #[error("{0}")]
    TypeMismatch(String),
}

impl EvalError {
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    pub fn evaluation(msg: impl Into<String>) -> Self {
        Self::Evaluation(msg.into())
    }

    pub fn conversion(msg: impl Into<String>) -> Self {
        Self::Conversion(msg.into())
    }

    pub fn type_mismatch(msg: impl Into<String>) -> Self {
        Self::TypeMismatch(msg.into())
    }

    pub fn undefined_variable(name: impl Into<String>) -> Self {
        Self::UndefinedVariable { name: name.into() }
    }

    pub fn unknown_function(name: impl Into<String>) -> Self {
        Self::UnknownFunction { name: name.into() }
    }

    /// Returns the fieldless kind of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Parse(_) => ErrorKind::Parse,
            Self::Evaluation(_) => ErrorKind::Evaluation,
            Self::Conversion(_) => ErrorKind::Conversion,
            Self::DivisionByZero | Self::ModuloByZero => ErrorKind::DivisionByZero,
            Self::UndefinedVariable { .. } => ErrorKind::UndefinedVariable,
            Self::UnknownFunction { .. } => ErrorKind::UnknownFunction,
            Self::TypeMismatch(_) => ErrorKind::TypeMismatch,
        }
    }
}

/// Broad categories of evaluation failure. Informational only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Parse,
    Evaluation,
    Conversion,
    DivisionByZero,
    UndefinedVariable,
    UnknownFunction,
    TypeMismatch,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Parse => "parse error",
            Self::Evaluation => "evaluation error",
            Self::Conversion => "conversion error",
            Self::DivisionByZero => "division by zero",
            Self::UndefinedVariable => "undefined variable",
            Self::UnknownFunction => "unknown function",
            Self::TypeMismatch => "type mismatch",
        };
        f.write_str(name)
    }
}
