//! `generate controller` - an HTTP API controller forwarding to an
//! application service interface.

use serde::Serialize;
use serde_json::json;

use super::crud::validate_type_name;
use super::options::{BaseOptions, CommandOptions};
use super::runner::GeneratorCommand;
use crate::cli::{ArgumentAttr, FieldDescriptor, OptionSchema, OptionValues};
use crate::config::{APPLICATION_CONTRACTS_LAYER, APP_SERVICE_SUFFIX, HTTP_API_LAYER};
use crate::errors::AppResult;
use crate::generator::templates::CONTROLLER_TEMPLATES;
use crate::workflow::steps::{BuildTypeCatalog, FindProject, FindType, RenderTemplates, WriteFiles};
use crate::workflow::variables::{
    CONTROLLER_INFO, GENERATED_FILES, INTERFACE_INFO, PROJECT_INFO, TYPE_CATALOG, WRITTEN_FILES,
};
use crate::workflow::{PipelineBuilder, ValueExpr};

const NAME_FIELD: &str = "name";

const LAYERS: &[&str] = &[APPLICATION_CONTRACTS_LAYER, HTTP_API_LAYER];

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ControllerOptions {
    #[serde(flatten)]
    pub base: BaseOptions,
    /// Service name, e.g. `Book` for `IBookAppService`
    pub name: String,
}

impl CommandOptions for ControllerOptions {
    fn schema() -> OptionSchema {
        OptionSchema::new()
            .field(
                FieldDescriptor::text(NAME_FIELD).argument(
                    ArgumentAttr::new("Name")
                        .description("The service name, e.g. Book for IBookAppService"),
                ),
            )
            .merge(BaseOptions::schema())
    }

    fn from_values(values: &OptionValues<'_>) -> AppResult<Self> {
        let name = values.text(NAME_FIELD)?.unwrap_or_default();
        Ok(Self {
            base: BaseOptions::from_values(values)?,
            name: service_name(&validate_type_name(&name)?),
        })
    }

    fn base(&self) -> &BaseOptions {
        &self.base
    }

    fn base_mut(&mut self) -> &mut BaseOptions {
        &mut self.base
    }
}

/// `IBookAppService`, `BookAppService` and `Book` all name the `Book` service
fn service_name(name: &str) -> String {
    let name = name
        .strip_suffix(APP_SERVICE_SUFFIX)
        .filter(|n| !n.is_empty())
        .unwrap_or(name);

    let mut chars = name.chars();
    match (chars.next(), chars.next()) {
        (Some('I'), Some(c)) if c.is_uppercase() => name[1..].to_string(),
        _ => name.to_string(),
    }
}

pub struct ControllerCommand;

impl GeneratorCommand for ControllerCommand {
    type Options = ControllerOptions;

    fn name(&self) -> &'static str {
        "controller"
    }

    fn about(&self) -> &'static str {
        "Generate a controller from an application service interface"
    }

    fn configure_build(
        &self,
        builder: PipelineBuilder,
        options: &ControllerOptions,
    ) -> AppResult<PipelineBuilder> {
        let templates = builder.templates();
        let interface = format!("I{}{}", options.name, APP_SERVICE_SUFFIX);

        Ok(builder
            .then(FindProject::new(&PROJECT_INFO, LAYERS))
            .then(FindType::new(APPLICATION_CONTRACTS_LAYER, interface, &INTERFACE_INFO))
            .then(BuildTypeCatalog::new(&TYPE_CATALOG))
            .set_variable(&CONTROLLER_INFO, ValueExpr::Literal(json!({ "name": options.name })))
            .then(
                RenderTemplates::new(&CONTROLLER_TEMPLATES, templates, &GENERATED_FILES)
                    .bind("project", &PROJECT_INFO)
                    .bind("interface", &INTERFACE_INFO)
                    .bind("controller", &CONTROLLER_INFO)
                    .with_catalog(&TYPE_CATALOG),
            )
            .then(WriteFiles::new(&GENERATED_FILES, &WRITTEN_FILES)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_name_normalization() {
        assert_eq!(service_name("IBookAppService"), "Book");
        assert_eq!(service_name("BookAppService"), "Book");
        assert_eq!(service_name("Book"), "Book");
        assert_eq!(service_name("Item"), "Item");
        assert_eq!(service_name("IOTDevice"), "OTDevice");
    }

    #[test]
    fn test_pipeline_stage_order() {
        use crate::generator::TemplateStore;
        use std::sync::Arc;

        let options = ControllerOptions {
            name: "Book".into(),
            ..ControllerOptions::default()
        };
        let builder = crate::commands::runner::create_basic_workflow(
            PipelineBuilder::new(Arc::new(TemplateStore::embedded())),
            &options,
        )
        .unwrap();

        let pipeline = ControllerCommand
            .configure_build(builder, &options)
            .unwrap()
            .build()
            .unwrap();

        let labels: Vec<String> = pipeline.stages().iter().skip(4).map(|s| s.label()).collect();
        assert_eq!(
            labels,
            vec![
                "FindProject(ProjectInfo)",
                "FindType(InterfaceInfo)",
                "BuildTypeCatalog(TypeCatalog)",
                "SetVariable(ControllerInfo)",
                "RenderTemplates(GeneratedFiles)",
                "WriteFiles(WrittenFiles)",
            ]
        );
    }
}
