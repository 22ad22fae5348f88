#![allow(dead_code)]

use sish::{Args, BoxError, Object, Property, Source, Value};
use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};

// ============================================================================
// Test Sources
// ============================================================================

/// `log(msg)` returns `"LOG:" + msg`.
pub fn logger() -> Arc<Object> {
    Arc::new(
        Object::new()
            .value("prefix", "LOG:")
            .method("log", |this: &Object, args: Args| {
                let prefix = this.get("prefix").cloned().unwrap_or_default();
                Ok(Value::from(format!("{}{}", prefix, args[0])))
            }),
    )
}

/// `greet(name)` returns `"Hello, " + name`.
pub fn greeter() -> Arc<Object> {
    Arc::new(Object::new().method("greet", |_: &Object, args: Args| {
        Ok(Value::from(format!("Hello, {}", args[0])))
    }))
}

/// A hand-written source whose methods mutate state on the receiver.
pub struct Account {
    pub owner: String,
    pub balance: Mutex<i64>,
    pub deposits: AtomicUsize,
}

impl Account {
    pub fn new(owner: &str, balance: i64) -> Self {
        Self {
            owner: owner.to_string(),
            balance: Mutex::new(balance),
            deposits: AtomicUsize::new(0),
        }
    }

    pub fn deposit(&self, args: Args) -> Result<Value, BoxError> {
        let amount = args
            .first()
            .and_then(Value::as_int)
            .ok_or("deposit expects an integer")?;
        if amount <= 0 {
            return Err(format!("invalid amount: {}", amount).into());
        }
        let mut balance = self.balance.lock().unwrap();
        *balance += amount;
        self.deposits.fetch_add(1, Ordering::SeqCst);
        Ok(Value::Int(*balance))
    }

    pub fn balance(&self) -> i64 {
        *self.balance.lock().unwrap()
    }
}

impl Source for Account {
    fn keys(&self) -> Vec<String> {
        vec!["owner".into(), "deposit".into(), "balance".into()]
    }

    fn property(&self, key: &str) -> Option<Property<Self>> {
        match key {
            "owner" => Some(Property::value(self.owner.clone())),
            "deposit" => Some(Property::method_with_arity(1, Account::deposit)),
            "balance" => Some(Property::method(|this: &Account, _| {
                Ok(Value::Int(this.balance()))
            })),
            _ => None,
        }
    }
}
