use ordered_float::OrderedFloat;

use crate::{
    error::EvalError,
    interpreter::{evaluator::core::EvalResult, value::core::Value},
};

/// Computes the minimum or maximum of any number of values.
///
/// Amounts are compared as totally ordered floats. The result is expressed
/// in the first argument's type. The operation is selected by the `name`
/// parameter, which must be `"min"` or `"max"`.
///
/// # Errors
/// An empty argument list is an error naming the function.
///
/// # Example
/// ```
/// use tally::interpreter::{evaluator::function::min_max::min_max, value::core::Value};
///
/// let args = [Value::Number(3.0), Value::Number(7.0), Value::Number(-1.0)];
/// assert_eq!(min_max("min", &args).unwrap(), Value::Number(-1.0));
/// assert_eq!(min_max("max", &args).unwrap(), Value::Number(7.0));
///
/// assert_eq!(min_max("max", &[]).unwrap_err().to_string(),
///            "max requires at least one argument");
/// ```
pub fn min_max(name: &str, args: &[Value]) -> EvalResult<Value> {
    let first = args.first()
                    .ok_or_else(|| EvalError::evaluation(format!("{name} requires at least one argument")))?;

    let amounts = args.iter().map(|arg| OrderedFloat(arg.amount()));
    let extreme = if name == "min" { amounts.min() } else { amounts.max() };

    Ok(first.with_amount(extreme.map_or(0.0, |OrderedFloat(x)| x)))
}
