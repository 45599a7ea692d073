use std::collections::BTreeMap;
use std::path::Path;

use async_trait::async_trait;

use crate::config::{
    APPLICATION_CONTRACTS_LAYER, APPLICATION_LAYER, DOMAIN_LAYER, HTTP_API_LAYER,
    PROJECT_FILE_EXTENSION,
};
use crate::errors::{AppError, AppResult};
use crate::generator::{LayerInfo, ProjectInfo};
use crate::utils::SourceScanner;
use crate::workflow::slot::{Slot, WorkflowContext};
use crate::workflow::stage::Stage;
use crate::workflow::variables::{BASE_DIRECTORY, EXCLUDE_DIRECTORIES};

const LAYERS: &[&str] = &[
    DOMAIN_LAYER,
    APPLICATION_CONTRACTS_LAYER,
    APPLICATION_LAYER,
    HTTP_API_LAYER,
];

/// Locates the solution's layer projects under the base directory
pub struct FindProject {
    output: &'static str,
    required_layers: &'static [&'static str],
}

impl FindProject {
    pub fn new(output: &Slot<ProjectInfo>, required_layers: &'static [&'static str]) -> Self {
        Self {
            output: output.name(),
            required_layers,
        }
    }
}

#[async_trait]
impl Stage for FindProject {
    fn name(&self) -> &'static str {
        "FindProject"
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

        let project = locate_project(Path::new(&base), excludes)?;

        for layer in self.required_layers {
            if project.layer(layer).is_none() {
                return Err(AppError::not_found(format!(
                    "Cannot find the {}.{} project",
                    project.full_name, layer
                )));
            }
        }

        tracing::info!("Found project: {}", project.full_name);
        ctx.set(&Slot::<ProjectInfo>::new(self.output), &project)
    }
}

/// Find `<Name>.Domain.csproj` and the sibling layer projects of `<Name>`
pub fn locate_project(base: &Path, excludes: Vec<String>) -> AppResult<ProjectInfo> {
    let projects = SourceScanner::new(base, excludes).files_with_extension(PROJECT_FILE_EXTENSION)?;

    let domain_suffix = format!(".{DOMAIN_LAYER}");
    let full_name = projects
        .iter()
        .filter_map(|p| p.file_stem()?.to_str()?.strip_suffix(domain_suffix.as_str()))
        .map(String::from)
        .next()
        .ok_or_else(|| {
            AppError::not_found(format!(
                "Cannot find the domain project under '{}'",
                base.display()
            ))
        })?;

    let mut layers = BTreeMap::new();
    for layer in LAYERS {
        let project_name = format!("{full_name}.{layer}");
        let found = projects
            .iter()
            .find(|p| p.file_stem().is_some_and(|s| s == project_name.as_str()));

        if let Some(path) = found {
            tracing::debug!("Layer {} -> {}", layer, path.display());
            layers.insert(
                layer.to_string(),
                LayerInfo {
                    name: project_name,
                    directory: path.parent().unwrap_or(base).to_path_buf(),
                },
            );
        }
    }

    let name = full_name
        .rsplit('.')
        .next()
        .unwrap_or(&full_name)
        .to_string();

    Ok(ProjectInfo {
        base_directory: base.to_path_buf(),
        full_name,
        name,
        layers,
    })
}
