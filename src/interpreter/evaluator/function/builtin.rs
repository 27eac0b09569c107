use crate::interpreter::{
    evaluator::{
        core::EvalResult,
        utils::{check_arity, finite},
    },
    value::core::Value,
};

/// Defines a single-argument builtin over `f64`.
///
/// The argument's amount is used whatever its type, and the result is a
/// plain number. `NaN` and infinite results are errors.
///
/// # Example
/// ```
/// use tally::interpreter::{evaluator::function::builtin::sqrt, value::core::Value};
///
/// assert_eq!(sqrt(&[Value::Number(9.0)]).unwrap(), Value::Number(3.0));
/// assert!(sqrt(&[Value::Number(-1.0)]).is_err());
/// ```
macro_rules! real_builtin {
    ($($fname:ident => $real_fn:ident),* $(,)?) => {
        $(
            pub fn $fname(args: &[Value]) -> EvalResult<Value> {
                check_arity(stringify!($fname), args, 1)?;

                finite(args[0].amount().$real_fn()).map(Value::Number)
            }
        )*
    };
}

real_builtin! {
    abs   => abs,
    sqrt  => sqrt,
    round => round,
    floor => floor,
    ceil  => ceil,
    log10 => log10,
    ln    => ln,
    exp   => exp,
    sin   => sin,
    cos   => cos,
    tan   => tan,
    asin  => asin,
    acos  => acos,
    atan  => atan,
}

/// Raises the first argument to the power of the second.
///
/// # Example
/// ```
/// use tally::interpreter::{evaluator::function::builtin::pow, value::core::Value};
///
/// assert_eq!(pow(&[Value::Number(2.0), Value::Number(10.0)]).unwrap(), Value::Number(1024.0));
/// assert_eq!(pow(&[Value::Number(0.0), Value::Number(-1.0)]).unwrap_err().to_string(),
///            "invalid result");
/// ```
pub fn pow(args: &[Value]) -> EvalResult<Value> {
    check_arity("pow", args, 2)?;

    finite(args[0].amount().powf(args[1].amount())).map(Value::Number)
}
