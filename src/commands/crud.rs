//! `generate crud` - DTOs, application service and controller for an entity.

use serde::Serialize;

use super::options::{BaseOptions, CommandOptions};
use super::runner::GeneratorCommand;
use crate::cli::{ArgumentAttr, FieldDescriptor, OptionAttr, OptionSchema, OptionValues};
use crate::config::{APPLICATION_CONTRACTS_LAYER, APPLICATION_LAYER, DOMAIN_LAYER, HTTP_API_LAYER};
use crate::errors::{AppError, AppResult};
use crate::generator::templates::CRUD_TEMPLATES;
use crate::workflow::steps::{FindProject, FindType, RenderTemplates, WriteFiles};
use crate::workflow::variables::{ENTITY_INFO, GENERATED_FILES, PROJECT_INFO, WRITTEN_FILES};
use crate::workflow::PipelineBuilder;

const ENTITY_FIELD: &str = "entity";
const SEPARATE_DTO_FIELD: &str = "separateDto";
const SKIP_CONTROLLER_FIELD: &str = "skipController";

const LAYERS: &[&str] = &[DOMAIN_LAYER, APPLICATION_CONTRACTS_LAYER, APPLICATION_LAYER];
const LAYERS_WITH_CONTROLLER: &[&str] = &[
    DOMAIN_LAYER,
    APPLICATION_CONTRACTS_LAYER,
    APPLICATION_LAYER,
    HTTP_API_LAYER,
];

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CrudOptions {
    #[serde(flatten)]
    pub base: BaseOptions,
    /// Entity class name
    pub entity: String,
    /// Generate distinct create and update DTOs
    pub separate_dto: bool,
    /// Leave out the HTTP API controller
    pub skip_controller: bool,
}

impl CommandOptions for CrudOptions {
    fn schema() -> OptionSchema {
        OptionSchema::new()
            .field(
                FieldDescriptor::text(ENTITY_FIELD)
                    .argument(ArgumentAttr::new("Entity").description("The entity class name")),
            )
            .field(
                FieldDescriptor::flag(SEPARATE_DTO_FIELD).option(
                    OptionAttr::long("separate-dto")
                        .description("Generate separate create and update DTOs"),
                ),
            )
            .field(
                FieldDescriptor::flag(SKIP_CONTROLLER_FIELD).option(
                    OptionAttr::long("skip-controller").description("Do not generate a controller"),
                ),
            )
            .merge(BaseOptions::schema())
    }

    fn from_values(values: &OptionValues<'_>) -> AppResult<Self> {
        let entity = values.text(ENTITY_FIELD)?.unwrap_or_default();
        Ok(Self {
            base: BaseOptions::from_values(values)?,
            entity: validate_type_name(&entity)?,
            separate_dto: values.flag(SEPARATE_DTO_FIELD)?,
            skip_controller: values.flag(SKIP_CONTROLLER_FIELD)?,
        })
    }

    fn base(&self) -> &BaseOptions {
        &self.base
    }

    fn base_mut(&mut self) -> &mut BaseOptions {
        &mut self.base
    }
}

/// Trimmed `name`, rejected unless it is a plain C# identifier
pub(crate) fn validate_type_name(name: &str) -> AppResult<String> {
    let name = name.trim();
    let valid = name
        .chars()
        .next()
        .is_some_and(|c| c.is_alphabetic() || c == '_')
        && name.chars().all(|c| c.is_alphanumeric() || c == '_');

    if !valid {
        return Err(AppError::invalid_input(format!(
            "'{}' is not a valid type name",
            name
        )));
    }
    Ok(name.to_string())
}

pub struct CrudCommand;

impl GeneratorCommand for CrudCommand {
    type Options = CrudOptions;

    fn name(&self) -> &'static str {
        "crud"
    }

    fn about(&self) -> &'static str {
        "Generate DTOs, an application service and a controller for an entity"
    }

    fn configure_build(
        &self,
        builder: PipelineBuilder,
        options: &CrudOptions,
    ) -> AppResult<PipelineBuilder> {
        let layers = if options.skip_controller {
            LAYERS
        } else {
            LAYERS_WITH_CONTROLLER
        };
        let templates = builder.templates();

        Ok(builder
            .then(FindProject::new(&PROJECT_INFO, layers))
            .then(FindType::new(DOMAIN_LAYER, options.entity.clone(), &ENTITY_INFO))
            .then(
                RenderTemplates::new(&CRUD_TEMPLATES, templates, &GENERATED_FILES)
                    .bind("project", &PROJECT_INFO)
                    .bind("entity", &ENTITY_INFO),
            )
            .then(WriteFiles::new(&GENERATED_FILES, &WRITTEN_FILES)))
    }
}
