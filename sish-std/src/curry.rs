//! Partial application over declared arity.

use sish_core::{Args, BoxError, Function, Value};

/// Curry `function` over its declared arity.
///
/// The returned function collects arguments across calls. Once the total
/// reaches the arity, the original is invoked with every collected argument
/// in order; until then each call returns a new partial function (whose
/// declared arity is the number of arguments still missing). Supplying more
/// than the arity in one call invokes immediately and forwards all of them.
///
/// A function without a declared arity is treated as arity 0 and runs on the
/// first call.
///
/// ```rust,ignore
/// let add = Function::with_arity("add", 3, sum);
/// let curried = curry(&add);
/// let step = curried.call(args![1])?;          // partial, arity 2
/// let step = step.as_function().unwrap().call(args![2])?;
/// let total = step.as_function().unwrap().call(args![3])?; // 6
/// ```
pub fn curry(function: &Function) -> Function {
    let arity = function.arity().unwrap_or(0);
    partial(function.clone(), arity, Vec::new())
}

fn partial(function: Function, arity: usize, collected: Args) -> Function {
    let remaining = arity.saturating_sub(collected.len());
    let name = function.name().to_string();
    Function::with_arity(name, remaining, move |args: Args| {
        let mut all = collected.clone();
        all.extend(args);
        if all.len() >= arity {
            function.call(all).map_err(BoxError::from)
        } else {
            Ok(Value::Function(partial(function.clone(), arity, all)))
        }
    })
}
