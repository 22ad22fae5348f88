#![cfg(feature = "tracing")]

use sish::{Dispatcher, ImportOptions, Scope, Value, args};
use tracing_subscriber::EnvFilter;

mod common;
use common::{greeter, logger};

fn init() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new("trace"))
        .with_test_writer()
        .try_init();
}

#[test]
fn test_instrumented_paths_run_under_subscriber() {
    init();

    let mut scope = Scope::new();
    scope
        .import_with(&greeter(), ImportOptions::new().namespaced("g"))
        .unwrap();
    scope.def("level", "info").unwrap();
    scope.alter("level", "trace").unwrap();

    let mut d = Dispatcher::from_scope(scope);
    d.import(&logger(), ["log"]).unwrap();

    assert_eq!(d.call("g.greet", args!["t"]).unwrap(), Value::from("Hello, t"));
    assert!(d.call("log", args![]).unwrap().is_function());
    assert_eq!(d.invoke("log", args!["x"]).unwrap(), Value::from("LOG:x"));
}
