//! Value expressions assigned by `SetVariable` stages.

use serde::Serialize;
use serde_json::Value;

use super::slot::{Slot, WorkflowContext};
use crate::errors::{AppError, AppResult};

/// How a variable's value is produced
#[derive(Debug, Clone, PartialEq)]
pub enum ValueExpr {
    /// A fixed value captured when the pipeline is built
    Literal(Value),
    /// A field of an object held by an earlier variable
    Field {
        source: &'static str,
        field: &'static str,
    },
    /// Boolean negation
    Not(Box<ValueExpr>),
}

impl ValueExpr {
    pub fn literal<T: Serialize>(value: &T) -> AppResult<Self> {
        Ok(ValueExpr::Literal(serde_json::to_value(value)?))
    }

    pub fn field<T>(source: &Slot<T>, field: &'static str) -> Self {
        ValueExpr::Field {
            source: source.name(),
            field,
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn not(self) -> Self {
        ValueExpr::Not(Box::new(self))
    }

    /// Variable this expression reads, if any
    pub fn source(&self) -> Option<&'static str> {
        match self {
            ValueExpr::Literal(_) => None,
            ValueExpr::Field { source, .. } => Some(*source),
            ValueExpr::Not(inner) => inner.source(),
        }
    }

    pub fn evaluate(&self, ctx: &WorkflowContext) -> AppResult<Value> {
        match self {
            ValueExpr::Literal(value) => Ok(value.clone()),
            ValueExpr::Field { source, field } => ctx
                .get_raw(source)?
                .get(*field)
                .cloned()
                .ok_or_else(|| AppError::MissingVariable(format!("{source}.{field}"))),
            ValueExpr::Not(inner) => match inner.evaluate(ctx)? {
                Value::Bool(b) => Ok(Value::Bool(!b)),
                other => Err(AppError::invalid_input(format!(
                    "cannot negate non-boolean value {other}"
                ))),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const OPTION: Slot<Value> = Slot::new("Option");

    fn context() -> WorkflowContext {
        let mut ctx = WorkflowContext::new();
        ctx.set(&OPTION, &json!({ "noOverwrite": true, "excludeDirectories": ["a"] }))
            .unwrap();
        ctx
    }

    #[test]
    fn test_field_reads_current_value() {
        let expr = ValueExpr::field(&OPTION, "excludeDirectories");
        assert_eq!(expr.evaluate(&context()).unwrap(), json!(["a"]));
        assert_eq!(expr.source(), Some("Option"));
    }

    #[test]
    fn test_not_negates_field() {
        let expr = ValueExpr::field(&OPTION, "noOverwrite").not();
        assert_eq!(expr.evaluate(&context()).unwrap(), json!(false));
        assert_eq!(expr.source(), Some("Option"));
    }

    #[test]
    fn test_missing_field() {
        let expr = ValueExpr::field(&OPTION, "nothing");
        assert!(matches!(
            expr.evaluate(&context()),
            Err(AppError::MissingVariable(name)) if name == "Option.nothing"
        ));
    }

    #[test]
    fn test_not_rejects_non_boolean() {
        let expr = ValueExpr::field(&OPTION, "excludeDirectories").not();
        assert!(matches!(expr.evaluate(&context()), Err(AppError::InvalidInput(_))));
    }
}
