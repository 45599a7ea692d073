//! Code generation templates.
//!
//! Templates are minijinja sources embedded in the binary. A file of the
//! same name under the configured override directory replaces the embedded
//! source. Both the file content and its output path are rendered against
//! the model, and an optional `when` expression decides whether the file is
//! produced at all.

use std::borrow::Cow;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use heck::{ToKebabCase, ToSnakeCase};
use minijinja::value::ViaDeserialize;
use minijinja::Environment;
use serde_json::Value;

use super::catalog::TypeCatalog;
use super::functions;
use super::models::{GeneratedFile, MethodInfo, PropertyInfo};
use crate::errors::AppResult;

/// One template and where its output goes
#[derive(Debug)]
pub struct TemplateFile {
    /// Relative name, also the lookup key in the override directory
    pub name: &'static str,
    /// Output path template
    pub output: &'static str,
    /// Expression that must be true for the file to be produced
    pub when: Option<&'static str>,
    source: &'static str,
}

/// Templates rendered together by one generator
#[derive(Debug)]
pub struct TemplateGroup {
    pub name: &'static str,
    pub files: &'static [TemplateFile],
}

pub static CRUD_TEMPLATES: TemplateGroup = TemplateGroup {
    name: "crud",
    files: &[
        TemplateFile {
            name: "crud/EntityDto.cs",
            output: concat!(
                r#"{{ project.layers["Application.Contracts"].directory }}"#,
                "/{{ entity.relative_directory }}/Dtos/{{ entity.info.name }}Dto.cs"
            ),
            when: None,
            source: include_str!("../../templates/crud/EntityDto.cs.jinja"),
        },
        TemplateFile {
            name: "crud/CreateUpdateEntityDto.cs",
            output: concat!(
                r#"{{ project.layers["Application.Contracts"].directory }}"#,
                "/{{ entity.relative_directory }}/Dtos/CreateUpdate{{ entity.info.name }}Dto.cs"
            ),
            when: Some("not option.separateDto"),
            source: include_str!("../../templates/crud/CreateUpdateEntityDto.cs.jinja"),
        },
        TemplateFile {
            name: "crud/CreateEntityDto.cs",
            output: concat!(
                r#"{{ project.layers["Application.Contracts"].directory }}"#,
                "/{{ entity.relative_directory }}/Dtos/Create{{ entity.info.name }}Dto.cs"
            ),
            when: Some("option.separateDto"),
            source: include_str!("../../templates/crud/CreateEntityDto.cs.jinja"),
        },
        TemplateFile {
            name: "crud/UpdateEntityDto.cs",
            output: concat!(
                r#"{{ project.layers["Application.Contracts"].directory }}"#,
                "/{{ entity.relative_directory }}/Dtos/Update{{ entity.info.name }}Dto.cs"
            ),
            when: Some("option.separateDto"),
            source: include_str!("../../templates/crud/UpdateEntityDto.cs.jinja"),
        },
        TemplateFile {
            name: "crud/IEntityAppService.cs",
            output: concat!(
                r#"{{ project.layers["Application.Contracts"].directory }}"#,
                "/{{ entity.relative_directory }}/I{{ entity.info.name }}AppService.cs"
            ),
            when: None,
            source: include_str!("../../templates/crud/IEntityAppService.cs.jinja"),
        },
        TemplateFile {
            name: "crud/EntityAppService.cs",
            output: concat!(
                r#"{{ project.layers["Application"].directory }}"#,
                "/{{ entity.relative_directory }}/{{ entity.info.name }}AppService.cs"
            ),
            when: None,
            source: include_str!("../../templates/crud/EntityAppService.cs.jinja"),
        },
        TemplateFile {
            name: "crud/EntityController.cs",
            output: concat!(
                r#"{{ project.layers["HttpApi"].directory }}"#,
                "/Controllers/{{ entity.relative_directory }}/{{ entity.info.name }}Controller.cs"
            ),
            when: Some("not option.skipController"),
            source: include_str!("../../templates/crud/EntityController.cs.jinja"),
        },
    ],
};

pub static SERVICE_TEMPLATES: TemplateGroup = TemplateGroup {
    name: "service",
    files: &[
        TemplateFile {
            name: "service/IServiceAppService.cs",
            output: concat!(
                r#"{{ project.layers["Application.Contracts"].directory }}"#,
                "/{{ service.folder }}/I{{ service.name }}AppService.cs"
            ),
            when: None,
            source: include_str!("../../templates/service/IServiceAppService.cs.jinja"),
        },
        TemplateFile {
            name: "service/ServiceAppService.cs",
            output: concat!(
                r#"{{ project.layers["Application"].directory }}"#,
                "/{{ service.folder }}/{{ service.name }}AppService.cs"
            ),
            when: None,
            source: include_str!("../../templates/service/ServiceAppService.cs.jinja"),
        },
    ],
};

pub static CONTROLLER_TEMPLATES: TemplateGroup = TemplateGroup {
    name: "controller",
    files: &[TemplateFile {
        name: "controller/Controller.cs",
        output: concat!(
            r#"{{ project.layers["HttpApi"].directory }}"#,
            "/Controllers/{{ interface.relative_directory }}/{{ controller.name }}Controller.cs"
        ),
        when: None,
        source: include_str!("../../templates/controller/Controller.cs.jinja"),
    }],
};

/// Resolves template sources and renders groups
#[derive(Debug, Clone, Default)]
pub struct TemplateStore {
    override_dir: Option<PathBuf>,
}

impl TemplateStore {
    /// Store using only embedded templates
    pub fn embedded() -> Self {
        Self::default()
    }

    /// Store preferring files under `dir`
    pub fn with_overrides(dir: impl Into<PathBuf>) -> Self {
        Self {
            override_dir: Some(dir.into()),
        }
    }

    /// Source of a template, from the override directory when present
    pub fn source(&self, file: &TemplateFile) -> AppResult<Cow<'static, str>> {
        if let Some(dir) = &self.override_dir {
            let path = dir.join(file.name);
            if path.is_file() {
                tracing::debug!("Using template override {}", path.display());
                return Ok(Cow::Owned(fs::read_to_string(path)?));
            }
        }
        Ok(Cow::Borrowed(file.source))
    }

    /// Render every applicable file of `group`
    pub fn render_group(
        &self,
        group: &TemplateGroup,
        model: &Value,
        catalog: Arc<TypeCatalog>,
    ) -> AppResult<Vec<GeneratedFile>> {
        let env = environment(catalog);
        let ctx = minijinja::Value::from_serialize(model);

        let mut files = Vec::new();
        for file in group.files {
            if let Some(condition) = file.when {
                if !env.compile_expression(condition)?.eval(&ctx)?.is_true() {
                    tracing::debug!("Skipping template {} ({} is false)", file.name, condition);
                    continue;
                }
            }

            let source = self.source(file)?;
            let content = env.render_str(&source, &ctx)?;
            let path = env.render_str(file.output, &ctx)?;

            files.push(GeneratedFile {
                path: PathBuf::from(path.trim()),
                content,
            });
        }

        Ok(files)
    }
}

/// Template environment with the naming and route helpers registered
pub fn environment(catalog: Arc<TypeCatalog>) -> Environment<'static> {
    let mut env = Environment::new();
    env.set_trim_blocks(true);
    env.set_lstrip_blocks(true);
    env.set_keep_trailing_newline(true);

    env.add_function("camel_case", |text: String| functions::camel_case(&text));
    env.add_function("is_ignore_property", |property: ViaDeserialize<PropertyInfo>| {
        functions::is_ignore_property(&property)
    });
    env.add_function("get_http_verb", |method_name: String| {
        functions::get_http_verb(&method_name)
    });
    env.add_function("get_route", move |method: ViaDeserialize<MethodInfo>| {
        functions::get_route(&method, &catalog)
    });

    env.add_filter("camel_case", |text: String| functions::camel_case(&text));
    env.add_filter("kebab_case", |text: String| text.to_kebab_case());
    env.add_filter("snake_case", |text: String| text.to_snake_case());
    env.add_filter("pluralize", |text: String| functions::pluralize(&text));

    env
}
