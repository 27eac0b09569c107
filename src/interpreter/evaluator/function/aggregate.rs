use crate::interpreter::{evaluator::core::EvalResult, value::core::Value};

/// Adds up the arguments' amounts in the first argument's type.
///
/// An empty call is a plain zero.
///
/// # Example
/// ```
/// use tally::interpreter::{
///     evaluator::function::aggregate::sum,
///     value::{core::Value, currency::Currency},
/// };
///
/// let usd = Currency::usd();
/// let r = sum(&[Value::currency(10.0, usd), Value::Number(5.0)]).unwrap();
/// assert_eq!(r.to_string(), "$15.00");
///
/// assert_eq!(sum(&[]).unwrap(), Value::Number(0.0));
/// ```
pub fn sum(args: &[Value]) -> EvalResult<Value> {
    let Some(first) = args.first() else {
        return Ok(Value::Number(0.0));
    };

    Ok(first.with_amount(args.iter().map(Value::amount).sum()))
}

/// The mean of the arguments' amounts in the first argument's type.
///
/// An empty call is a plain zero.
pub fn avg(args: &[Value]) -> EvalResult<Value> {
    let total = sum(args)?;
    if args.is_empty() {
        return Ok(total);
    }

    #[allow(clippy::cast_precision_loss)]
    let count = args.len() as f64;
    Ok(total.with_amount(total.amount() / count))
}

/// The number of arguments.
pub fn count(args: &[Value]) -> EvalResult<Value> {
    #[allow(clippy::cast_precision_loss)]
    let count = args.len() as f64;
    Ok(Value::Number(count))
}
