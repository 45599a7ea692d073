use std::path::Path;

use async_trait::async_trait;

use crate::config::SOURCE_FILE_EXTENSION;
use crate::errors::{AppError, AppResult};
use crate::generator::{parser, ProjectInfo, SourceType, TypeCatalog};
use crate::utils::scan::relative_path;
use crate::utils::SourceScanner;
use crate::workflow::slot::{Slot, WorkflowContext};
use crate::workflow::stage::Stage;
use crate::workflow::variables::{BASE_DIRECTORY, EXCLUDE_DIRECTORIES, PROJECT_INFO};

/// Locates and parses a named type inside one layer project.
///
/// `<TypeName>.cs` files are tried first; when none declares the type every
/// source file of the layer is searched.
pub struct FindType {
    layer: &'static str,
    type_name: String,
    output: &'static str,
}

impl FindType {
    pub fn new(layer: &'static str, type_name: impl Into<String>, output: &Slot<SourceType>) -> Self {
        Self {
            layer,
            type_name: type_name.into(),
            output: output.name(),
        }
    }
}

#[async_trait]
impl Stage for FindType {
    fn name(&self) -> &'static str {
        "FindType"
    }

    fn output(&self) -> Option<&'static str> {
        Some(self.output)
    }

    fn inputs(&self) -> Vec<&'static str> {
        vec![PROJECT_INFO.name(), BASE_DIRECTORY.name(), EXCLUDE_DIRECTORIES.name()]
    }

    async fn execute(&self, ctx: &mut WorkflowContext) -> AppResult<()> {
        let project: ProjectInfo = ctx.get(&PROJECT_INFO)?;
        let base = ctx.get(&BASE_DIRECTORY)?;
        let excludes = ctx.get(&EXCLUDE_DIRECTORIES)?;

        let layer = project.layer(self.layer).ok_or_else(|| {
            AppError::not_found(format!(
                "Cannot find the {}.{} project",
                project.full_name, self.layer
            ))
        })?;

        let scanner = SourceScanner::new(&base, excludes).within(&layer.directory);
        let file_name = format!("{}.{}", self.type_name, SOURCE_FILE_EXTENSION);

        let mut candidates = scanner.files_named(&file_name)?;
        for path in scanner.files_with_extension(SOURCE_FILE_EXTENSION)? {
            if !candidates.contains(&path) {
                candidates.push(path);
            }
        }

        for path in candidates {
            let Some(source) = read_source(&path).await? else {
                continue;
            };
            if let Some(info) = parser::find_type(&source, &self.type_name) {
                let directory = path.parent().unwrap_or(&layer.directory);
                let relative = relative_path(&layer.directory, directory);
                tracing::info!("Found {} in {}", self.type_name, path.display());

                let located = SourceType::new(path, relative, info);
                return ctx.set(&Slot::<SourceType>::new(self.output), &located);
            }
        }

        Err(AppError::not_found(format!(
            "Cannot find type '{}' in project {}",
            self.type_name, layer.name
        )))
    }
}

/// Parses every source file under the base directory into a catalog
pub struct BuildTypeCatalog {
    output: &'static str,
}

impl BuildTypeCatalog {
    pub fn new(output: &Slot<TypeCatalog>) -> Self {
        Self {
            output: output.name(),
        }
    }
}

#[async_trait]
impl Stage for BuildTypeCatalog {
    fn name(&self) -> &'static str {
        "BuildTypeCatalog"
    }

    fn output(&self) -> Option<&'static str> {
        Some(self.output)
    }

    fn inputs(&self) -> Vec<&'static str> {
        vec![BASE_DIRECTORY.name(), EXCLUDE_DIRECTORIES.name()]
    }

    async fn execute(&self, ctx: &mut WorkflowContext) -> AppResult<()> {
        let base = ctx.get(&BASE_DIRECTORY)?;
        let excludes = ctx.get(&EXCLUDE_DIRECTORIES)?;

        let mut catalog = TypeCatalog::new();
        for path in SourceScanner::new(&base, excludes).files_with_extension(SOURCE_FILE_EXTENSION)? {
            if let Some(source) = read_source(&path).await? {
                catalog.extend(parser::parse_source(&source));
            }
        }

        tracing::debug!("Catalogued {} types", catalog.len());
        ctx.set(&Slot::<TypeCatalog>::new(self.output), &catalog)
    }
}

/// Read a source file, skipping (with a warning) files that are not UTF-8
async fn read_source(path: &Path) -> AppResult<Option<String>> {
    match tokio::fs::read_to_string(path).await {
        Ok(source) => Ok(Some(source)),
        Err(e) if e.kind() == std::io::ErrorKind::InvalidData => {
            tracing::warn!("Skipping {}: not valid UTF-8", path.display());
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}
