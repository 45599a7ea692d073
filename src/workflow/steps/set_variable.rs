use async_trait::async_trait;

use crate::errors::AppResult;
use crate::workflow::expr::ValueExpr;
use crate::workflow::slot::{Slot, WorkflowContext};
use crate::workflow::stage::Stage;

/// Binds a variable to the value of an expression
#[derive(Debug, Clone)]
pub struct SetVariable {
    variable: &'static str,
    expr: ValueExpr,
}

impl SetVariable {
    pub fn new<T>(slot: &Slot<T>, expr: ValueExpr) -> Self {
        Self {
            variable: slot.name(),
            expr,
        }
    }
}

#[async_trait]
impl Stage for SetVariable {
    fn name(&self) -> &'static str {
        "SetVariable"
    }

    fn output(&self) -> Option<&'static str> {
        Some(self.variable)
    }

    fn inputs(&self) -> Vec<&'static str> {
        self.expr.source().into_iter().collect()
    }

    fn expression(&self) -> Option<&ValueExpr> {
        Some(&self.expr)
    }

    async fn execute(&self, ctx: &mut WorkflowContext) -> AppResult<()> {
        let value = self.expr.evaluate(ctx)?;
        ctx.set_raw(self.variable, value);
        Ok(())
    }
}
