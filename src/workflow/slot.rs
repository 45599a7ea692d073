//! Typed workflow variables.
//!
//! A [`Slot`] names a variable and fixes the type stored in it. Stages
//! declare the slots they write and read, so the builder can check every
//! reference before anything runs.

use std::collections::BTreeMap;
use std::fmt;
use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::errors::{AppError, AppResult};

/// Handle to a named variable holding a `T`
pub struct Slot<T> {
    name: &'static str,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Slot<T> {
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            _marker: PhantomData,
        }
    }

    pub const fn name(&self) -> &'static str {
        self.name
    }
}

impl<T> Clone for Slot<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Slot<T> {}

impl<T> fmt::Debug for Slot<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Slot").field(&self.name).finish()
    }
}

/// Variables bound during one pipeline run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkflowContext {
    variables: BTreeMap<String, Value>,
}

impl WorkflowContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set<T: Serialize>(&mut self, slot: &Slot<T>, value: &T) -> AppResult<()> {
        self.set_raw(slot.name(), serde_json::to_value(value)?);
        Ok(())
    }

    pub fn set_raw(&mut self, name: &str, value: Value) {
        self.variables.insert(name.to_string(), value);
    }

    pub fn get<T: DeserializeOwned>(&self, slot: &Slot<T>) -> AppResult<T> {
        let value = self.get_raw(slot.name())?;
        Ok(serde_json::from_value(value.clone())?)
    }

    pub fn get_raw(&self, name: &str) -> AppResult<&Value> {
        self.variables
            .get(name)
            .ok_or_else(|| AppError::MissingVariable(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.variables.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.variables.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const COUNT: Slot<u32> = Slot::new("Count");

    #[test]
    fn test_round_trip_through_slot() {
        let mut ctx = WorkflowContext::new();
        ctx.set(&COUNT, &7).unwrap();

        assert_eq!(ctx.get(&COUNT).unwrap(), 7);
        assert!(ctx.contains("Count"));
    }

    #[test]
    fn test_missing_variable() {
        let ctx = WorkflowContext::new();
        let err = ctx.get(&COUNT).unwrap_err();
        assert!(matches!(err, AppError::MissingVariable(name) if name == "Count"));
    }

    #[test]
    fn test_type_mismatch_is_an_error() {
        let mut ctx = WorkflowContext::new();
        ctx.set_raw("Count", Value::String("seven".into()));
        assert!(matches!(ctx.get(&COUNT), Err(AppError::Json(_))));
    }
}
