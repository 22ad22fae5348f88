//! Definition tracking and currying through the public API.

use sish::{
    Dispatcher, Function, Scope, SishError, Value, args, curry, testing::CountingSource,
    testing::Recorder,
};
use std::sync::Arc;

mod common;
use common::Account;

#[test]
fn test_def_then_alter_then_defined() {
    let mut scope = Scope::new();
    scope.def("config.color", "red").unwrap();
    scope.def("config.size", 3).unwrap();

    let err = scope.def("config.color", "blue").unwrap_err();
    assert!(matches!(err, SishError::AlreadyDefined(ref name) if name == "config.color"));

    let previous = scope.alter("config.color", "green").unwrap();
    assert_eq!(previous, Value::from("red"));

    let defined = scope.defined(Some("config"));
    assert_eq!(defined.get("color"), Some(&Value::from("green")));
    assert_eq!(defined.get("size"), Some(&Value::Int(3)));
}

#[test]
fn test_alter_at_requires_existing_path() {
    let mut scope = Scope::new();
    scope.def("theme", "dark").unwrap();

    assert_eq!(scope.alter_at("theme").to("light").unwrap(), Value::from("dark"));

    let err = scope.alter_at("missing.key").to(1).unwrap_err();
    assert!(matches!(err, SishError::NotDefined(ref name) if name == "missing"));
}

#[test]
fn test_defined_values_are_dispatchable() {
    let recorder = Recorder::returning("sent");
    let mut scope = Scope::new();
    scope.def("mail.send", recorder.function("send")).unwrap();

    let d = Dispatcher::from_scope(scope);
    assert_eq!(d.call("mail.send", args!["hi"]).unwrap(), Value::from("sent"));
    assert_eq!(recorder.calls(), vec![args!["hi"]]);
}

#[test]
fn test_curry_collects_until_arity() {
    let add = Function::with_arity("add", 3, |args| {
        Ok(Value::Int(args.iter().filter_map(Value::as_int).sum()))
    });
    let curried = curry(&add);

    let step = curried.call(args![1]).unwrap();
    let step = step.as_function().unwrap().call(args![2]).unwrap();
    let sum = step.as_function().unwrap().call(args![3]).unwrap();
    assert_eq!(sum, Value::Int(6));

    // All at once invokes immediately.
    assert_eq!(curried.call(args![1, 2, 3]).unwrap(), Value::Int(6));
}

#[test]
fn test_curry_forwards_extra_arguments() {
    let recorder = Recorder::new();
    let f = Function::with_arity("f", 2, {
        let inner = recorder.function("f");
        move |args| inner.call(args).map_err(Into::into)
    });

    curry(&f).call(args![1, 2, 3]).unwrap();
    assert_eq!(recorder.last(), Some(args![1, 2, 3]));
}

#[test]
fn test_scope_curry_of_bound_method() {
    let account = Arc::new(Account::new("gus", 0));
    let mut scope = Scope::new();
    scope.import(&account, ["deposit"]).unwrap();

    let deposit = scope.curry("deposit").unwrap();
    deposit.call(args![7]).unwrap();
    assert_eq!(account.balance(), 7);

    let err = scope.curry("nothing").unwrap_err();
    assert!(matches!(err, SishError::NotDefined(ref name) if name == "nothing"));

    scope.set("plain", 1);
    let err = scope.curry("plain").unwrap_err();
    assert!(matches!(err, SishError::NotAFunction(_)));
}

#[test]
fn test_counting_source_receiver_identity() {
    let counter = Arc::new(CountingSource::new("c"));
    let mut d = Dispatcher::new();
    d.import(&counter, sish::Filter::All).unwrap();

    d.invoke("hit", args![]).unwrap();
    d.call("add", args![4]).unwrap();

    assert_eq!(counter.hits(), 5);
    assert_eq!(d.invoke("count", args![]).unwrap(), Value::Int(5));
    assert_eq!(d.get("label").unwrap(), Value::from("c"));
}
