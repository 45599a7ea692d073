//! Application settings loaded from environment variables.

use std::env;
use std::path::PathBuf;

use super::constants::{ENV_EXCLUDE, ENV_TEMPLATE_DIR};

/// Application configuration
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Directory whose files replace embedded templates of the same name
    pub template_dir: Option<PathBuf>,
    /// Exclude patterns appended to every command's `--exclude` list
    pub exclude_directories: Vec<String>,
}

impl Config {
    /// Load configuration from `.env` and environment variables.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let template_dir = env::var(ENV_TEMPLATE_DIR)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from);

        if let Some(dir) = &template_dir {
            if !dir.is_dir() {
                tracing::warn!(
                    "{} points to '{}', which is not a directory; embedded templates will be used",
                    ENV_TEMPLATE_DIR,
                    dir.display()
                );
            }
        }

        Self {
            template_dir,
            exclude_directories: env::var(ENV_EXCLUDE)
                .map(|v| parse_list(&v))
                .unwrap_or_default(),
        }
    }
}

/// Split a comma-separated list, dropping blanks
fn parse_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_list_drops_blanks() {
        assert_eq!(
            parse_list(" **/test/** ,, docs "),
            vec!["**/test/**".to_string(), "docs".to_string()]
        );
        assert!(parse_list("").is_empty());
    }
}
