use crate::{
    ast::Expr,
    error::EvalError,
    interpreter::{
        evaluator::{
            core::{EvalResult, Evaluator},
            function::{aggregate, builtin, min_max},
            utils::check_arity,
        },
        value::core::Value,
    },
    rates::lookup::RateLookup,
};

/// Type alias for builtin function handlers.
///
/// A builtin receives its evaluated arguments and returns a value or an
/// error.
type BuiltinFn = fn(&[Value]) -> EvalResult<Value>;

/// Specifies the allowed number of arguments for a builtin.
///
/// - `Any` accepts any count, including none.
/// - `Exact(n)` requires exactly `n` arguments.
#[derive(Clone, Copy)]
enum Arity {
    Any,
    Exact(usize),
}

/// Defines builtin functions by generating a lookup table and a name list.
///
/// Each entry provides:
/// - a lowercase name,
/// - an arity specification,
/// - a function pointer implementing the builtin.
///
/// The macro produces:
/// - `BuiltinDef` (internal metadata),
/// - `BUILTIN_TABLE` (static table for lookup),
/// - `BUILTIN_FUNCTIONS` (public list of builtin names).
macro_rules! builtin_functions {
    (
        $(
            $name:literal => {
                arity: $arity:expr,
                func: $func:expr $(,)?
            }
        ),* $(,)?
    ) => {
        struct BuiltinDef {
            name:  &'static str,
            arity: Arity,
            func:  BuiltinFn,
        }
        static BUILTIN_TABLE: &[BuiltinDef] = &[
            $(
                BuiltinDef { name: $name, arity: $arity, func: $func },
            )*
        ];
        /// Every builtin function name, aliases included.
        pub const BUILTIN_FUNCTIONS: &[&str] = &[
            $($name,)*
        ];
    };
}

builtin_functions! {
    "sum"     => { arity: Arity::Any, func: aggregate::sum },
    "avg"     => { arity: Arity::Any, func: aggregate::avg },
    "average" => { arity: Arity::Any, func: aggregate::avg },
    "mean"    => { arity: Arity::Any, func: aggregate::avg },
    "count"   => { arity: Arity::Any, func: aggregate::count },
    "min"     => { arity: Arity::Any, func: |args| min_max::min_max("min", args) },
    "max"     => { arity: Arity::Any, func: |args| min_max::min_max("max", args) },
    "abs"     => { arity: Arity::Exact(1), func: builtin::abs },
    "sqrt"    => { arity: Arity::Exact(1), func: builtin::sqrt },
    "round"   => { arity: Arity::Exact(1), func: builtin::round },
    "floor"   => { arity: Arity::Exact(1), func: builtin::floor },
    "ceil"    => { arity: Arity::Exact(1), func: builtin::ceil },
    "log"     => { arity: Arity::Exact(1), func: builtin::log10 },
    "log10"   => { arity: Arity::Exact(1), func: builtin::log10 },
    "ln"      => { arity: Arity::Exact(1), func: builtin::ln },
    "exp"     => { arity: Arity::Exact(1), func: builtin::exp },
    "sin"     => { arity: Arity::Exact(1), func: builtin::sin },
    "cos"     => { arity: Arity::Exact(1), func: builtin::cos },
    "tan"     => { arity: Arity::Exact(1), func: builtin::tan },
    "asin"    => { arity: Arity::Exact(1), func: builtin::asin },
    "acos"    => { arity: Arity::Exact(1), func: builtin::acos },
    "atan"    => { arity: Arity::Exact(1), func: builtin::atan },
    "pow"     => { arity: Arity::Exact(2), func: builtin::pow },
}

impl<R: RateLookup + ?Sized> Evaluator<'_, R> {
    /// Evaluates a function call.
    ///
    /// Arguments are evaluated left to right and the first error is
    /// returned as is. The name is matched without regard to case.
    pub(crate) fn eval_call(&self, name: &str, args: &[Expr]) -> EvalResult<Value> {
        let values = args.iter()
                         .map(|arg| self.eval(arg))
                         .collect::<EvalResult<Vec<_>>>()?;

        call_builtin(name, &values)
    }
}

/// Calls a builtin on already evaluated arguments.
///
/// # Example
/// ```
/// use tally::interpreter::{evaluator::function::core::call_builtin, value::core::Value};
///
/// let r = call_builtin("SQRT", &[Value::Number(16.0)]).unwrap();
/// assert_eq!(r, Value::Number(4.0));
///
/// let err = call_builtin("frobnicate", &[]).unwrap_err();
/// assert_eq!(err.to_string(), "unknown function: frobnicate");
/// ```
pub fn call_builtin(name: &str, args: &[Value]) -> EvalResult<Value> {
    let name = name.to_lowercase();
    let builtin = BUILTIN_TABLE.iter()
                               .find(|b| b.name == name)
                               .ok_or_else(|| EvalError::unknown_function(name.as_str()))?;

    if let Arity::Exact(n) = builtin.arity {
        check_arity(builtin.name, args, n)?;
    }

    (builtin.func)(args)
}
