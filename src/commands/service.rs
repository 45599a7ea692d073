//! `generate service` - an empty application service and its interface.

use serde::Serialize;
use serde_json::json;

use super::crud::validate_type_name;
use super::options::{BaseOptions, CommandOptions};
use super::runner::GeneratorCommand;
use crate::cli::{ArgumentAttr, FieldDescriptor, OptionAttr, OptionSchema, OptionValues};
use crate::config::{APPLICATION_CONTRACTS_LAYER, APPLICATION_LAYER, APP_SERVICE_SUFFIX};
use crate::errors::AppResult;
use crate::generator::templates::SERVICE_TEMPLATES;
use crate::workflow::steps::{FindProject, RenderTemplates, WriteFiles};
use crate::workflow::variables::{GENERATED_FILES, PROJECT_INFO, SERVICE_INFO, WRITTEN_FILES};
use crate::workflow::{PipelineBuilder, ValueExpr};

const NAME_FIELD: &str = "name";
const FOLDER_FIELD: &str = "folder";

const LAYERS: &[&str] = &[APPLICATION_CONTRACTS_LAYER, APPLICATION_LAYER];

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceOptions {
    #[serde(flatten)]
    pub base: BaseOptions,
    /// Service name without the `AppService` suffix
    pub name: String,
    /// Folder under each layer project, `/` separated
    pub folder: String,
}

impl CommandOptions for ServiceOptions {
    fn schema() -> OptionSchema {
        OptionSchema::new()
            .field(
                FieldDescriptor::text(NAME_FIELD)
                    .argument(ArgumentAttr::new("Name").description("The service name")),
            )
            .field(
                FieldDescriptor::text(FOLDER_FIELD).option(
                    OptionAttr::long("folder")
                        .with_short('f')
                        .description("Folder of the service files, relative to each layer project"),
                ),
            )
            .merge(BaseOptions::schema())
    }

    fn from_values(values: &OptionValues<'_>) -> AppResult<Self> {
        let name = values.text(NAME_FIELD)?.unwrap_or_default();
        let name = validate_type_name(&name)?;
        Ok(Self {
            base: BaseOptions::from_values(values)?,
            name: name
                .strip_suffix(APP_SERVICE_SUFFIX)
                .filter(|n| !n.is_empty())
                .unwrap_or(name.as_str())
                .to_string(),
            folder: normalize_folder(&values.text(FOLDER_FIELD)?.unwrap_or_default()),
        })
    }

    fn base(&self) -> &BaseOptions {
        &self.base
    }

    fn base_mut(&mut self) -> &mut BaseOptions {
        &mut self.base
    }
}

/// `\` separators become `/`, surrounding and repeated separators are dropped
fn normalize_folder(folder: &str) -> String {
    folder
        .split(['/', '\\'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("/")
}

pub struct ServiceCommand;

impl GeneratorCommand for ServiceCommand {
    type Options = ServiceOptions;

    fn name(&self) -> &'static str {
        "service"
    }

    fn about(&self) -> &'static str {
        "Generate an application service and its interface"
    }

    fn configure_build(
        &self,
        builder: PipelineBuilder,
        options: &ServiceOptions,
    ) -> AppResult<PipelineBuilder> {
        let templates = builder.templates();
        let service = json!({ "name": options.name, "folder": options.folder });

        Ok(builder
            .then(FindProject::new(&PROJECT_INFO, LAYERS))
            .set_variable(&SERVICE_INFO, ValueExpr::Literal(service))
            .then(
                RenderTemplates::new(&SERVICE_TEMPLATES, templates, &GENERATED_FILES)
                    .bind("project", &PROJECT_INFO)
                    .bind("service", &SERVICE_INFO),
            )
            .then(WriteFiles::new(&GENERATED_FILES, &WRITTEN_FILES)))
    }
}
