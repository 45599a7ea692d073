use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::errors::AppResult;
use crate::generator::{GeneratedFile, TemplateGroup, TemplateStore, TypeCatalog};
use crate::workflow::slot::{Slot, WorkflowContext};
use crate::workflow::stage::Stage;
use crate::workflow::variables::OPTION;

/// Model key under which the serialized options are exposed
const OPTION_KEY: &str = "option";

/// Renders a template group against variables of the run.
///
/// The model always holds `option`; further keys are bound to variables
/// with [`RenderTemplates::bind`].
pub struct RenderTemplates {
    group: &'static TemplateGroup,
    templates: Arc<TemplateStore>,
    bindings: Vec<(&'static str, &'static str)>,
    catalog: Option<&'static str>,
    output: &'static str,
}

impl RenderTemplates {
    pub fn new(
        group: &'static TemplateGroup,
        templates: Arc<TemplateStore>,
        output: &Slot<Vec<GeneratedFile>>,
    ) -> Self {
        Self {
            group,
            templates,
            bindings: Vec::new(),
            catalog: None,
            output: output.name(),
        }
    }

    /// Expose the variable behind `slot` as `key`
    pub fn bind<T>(mut self, key: &'static str, slot: &Slot<T>) -> Self {
        self.bindings.push((key, slot.name()));
        self
    }

    /// Resolve route parameter types against this catalog
    pub fn with_catalog(mut self, slot: &Slot<TypeCatalog>) -> Self {
        self.catalog = Some(slot.name());
        self
    }
}

#[async_trait]
impl Stage for RenderTemplates {
    fn name(&self) -> &'static str {
        "RenderTemplates"
    }

    fn output(&self) -> Option<&'static str> {
        Some(self.output)
    }

    fn inputs(&self) -> Vec<&'static str> {
        std::iter::once(OPTION.name())
            .chain(self.bindings.iter().map(|(_, slot)| *slot))
            .chain(self.catalog)
            .collect()
    }

    async fn execute(&self, ctx: &mut WorkflowContext) -> AppResult<()> {
        let mut model = Map::new();
        model.insert(OPTION_KEY.to_string(), ctx.get_raw(OPTION.name())?.clone());
        for (key, slot) in &self.bindings {
            model.insert(key.to_string(), ctx.get_raw(slot)?.clone());
        }

        let catalog = match self.catalog {
            Some(name) => ctx.get(&Slot::<TypeCatalog>::new(name))?,
            None => TypeCatalog::new(),
        };

        let files = self
            .templates
            .render_group(self.group, &Value::Object(model), Arc::new(catalog))?;

        tracing::debug!("Rendered {} files from '{}'", files.len(), self.group.name);
        ctx.set(&Slot::<Vec<GeneratedFile>>::new(self.output), &files)
    }
}
