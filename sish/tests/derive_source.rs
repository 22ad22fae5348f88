#![cfg(feature = "macros")]

use sish::{Args, BoxError, Dispatcher, Source, Value, args};
use std::sync::{
    Arc,
    atomic::{AtomicI64, Ordering},
};

#[derive(sish::Source)]
#[method(log)]
#[method(add, arity = 2)]
#[method(shout, rename = "yell")]
struct Console {
    prefix: String,
    #[source(rename = "lvl")]
    level: i64,
    #[source(skip)]
    written: AtomicI64,
}

impl Console {
    fn new(prefix: &str) -> Self {
        Self {
            prefix: prefix.to_string(),
            level: 2,
            written: AtomicI64::new(0),
        }
    }

    fn log(&self, args: Args) -> Result<Value, BoxError> {
        self.written.fetch_add(1, Ordering::SeqCst);
        Ok(Value::from(format!("{}{}", self.prefix, args[0])))
    }

    fn add(&self, args: Args) -> Result<Value, BoxError> {
        Ok(Value::Int(args.iter().filter_map(Value::as_int).sum()))
    }

    fn shout(&self, args: Args) -> Result<Value, BoxError> {
        Ok(Value::from(args[0].to_string().to_uppercase()))
    }
}

#[derive(sish::Source)]
#[method(ping)]
struct Pinger;

impl Pinger {
    fn ping(&self, _: Args) -> Result<Value, BoxError> {
        Ok(Value::from("pong"))
    }
}

#[test]
fn test_derived_keys() {
    let console = Console::new("> ");
    assert_eq!(console.keys(), vec!["prefix", "lvl", "log", "add", "yell"]);
    assert!(console.property("written").is_none());
    assert!(console.property("shout").is_none());
    assert!(console.property("add").unwrap().is_method());
}

#[test]
fn test_derived_source_dispatch() {
    let console = Arc::new(Console::new("> "));
    let d = Dispatcher::from_source(&console).unwrap();

    assert_eq!(d.get("prefix").unwrap(), Value::from("> "));
    assert_eq!(d.get("lvl").unwrap(), Value::Int(2));
    assert_eq!(d.call("log", args!["hi"]).unwrap(), Value::from("> hi"));
    assert_eq!(d.call("yell", args!["quiet"]).unwrap(), Value::from("QUIET"));
    assert_eq!(console.written.load(Ordering::SeqCst), 1);
}

#[test]
fn test_derived_arity_feeds_curry() {
    let d = Dispatcher::from_source(&Arc::new(Console::new(""))).unwrap();
    let add = d.scope().curry("add").unwrap();

    let plus_one = add.call(args![1]).unwrap();
    let total = plus_one.as_function().unwrap().call(args![41]).unwrap();
    assert_eq!(total, Value::Int(42));
}

#[test]
fn test_unit_struct_source() {
    let d = Dispatcher::from_source(&Arc::new(Pinger)).unwrap();
    assert_eq!(d.invoke("ping", args![]).unwrap(), Value::from("pong"));
}
