//! Binds option schemas to clap commands and reads values back.

use std::collections::HashSet;

use clap::parser::MatchesError;
use clap::{Arg, ArgAction, ArgMatches, Command};

use super::schema::{FieldDescriptor, OptionSchema, ValueType};
use crate::errors::{AppError, AppResult};

/// Long aliases owned by the root command or clap itself
const RESERVED_LONG: &[&str] = &["help", "version", "verbose"];

/// Short aliases owned by the root command or clap itself
const RESERVED_SHORT: &[char] = &['h', 'V', 'v'];

/// Add an argument for every bound field of `schema` to `command`.
///
/// A field tagged as option becomes a named flag, a field tagged only as
/// argument becomes a positional, and untagged fields are left out.
/// Malformed declarations are reported as configuration errors.
pub fn bind_options(mut command: Command, schema: &OptionSchema) -> AppResult<Command> {
    validate(command.get_name(), schema)?;

    for field in schema.fields() {
        if let Some(arg) = build_arg(field) {
            command = command.arg(arg);
        }
    }

    Ok(command)
}

fn validate(command: &str, schema: &OptionSchema) -> AppResult<()> {
    let invalid = |msg: String| AppError::configuration(format!("command '{command}': {msg}"));

    let mut fields = HashSet::new();
    let mut longs = HashSet::new();
    let mut shorts = HashSet::new();

    for field in schema.fields() {
        if field.field.is_empty() {
            return Err(invalid("field with an empty name".into()));
        }
        if !fields.insert(field.field) {
            return Err(invalid(format!("field '{}' is declared twice", field.field)));
        }

        if let Some(option) = &field.option {
            if option.name.is_none() && option.short_name.is_none() {
                return Err(invalid(format!(
                    "option '{}' declares neither a name nor a short name",
                    field.field
                )));
            }
            if option.required && field.value_type == ValueType::Flag {
                return Err(invalid(format!("flag '{}' cannot be required", field.field)));
            }
            if let Some(name) = option.name {
                if name.is_empty() || name.starts_with('-') {
                    return Err(invalid(format!("option '{}' has an invalid name '{}'", field.field, name)));
                }
                if RESERVED_LONG.contains(&name) || !longs.insert(name) {
                    return Err(invalid(format!("alias '--{}' is already in use", name)));
                }
            }
            if let Some(short) = option.short_name {
                if RESERVED_SHORT.contains(&short) || !shorts.insert(short) {
                    return Err(invalid(format!("alias '-{}' is already in use", short)));
                }
            }
        } else if let Some(argument) = &field.argument {
            if argument.name.trim().is_empty() {
                return Err(invalid(format!("argument '{}' has an empty name", field.field)));
            }
            if field.value_type == ValueType::Flag {
                return Err(invalid(format!(
                    "flag '{}' cannot be a positional argument",
                    field.field
                )));
            }
        }
    }

    Ok(())
}

fn build_arg(field: &FieldDescriptor) -> Option<Arg> {
    if let Some(option) = &field.option {
        let mut arg = Arg::new(field.field)
            .help(option.description)
            .required(option.required);
        if let Some(name) = option.name {
            arg = arg.long(name);
        }
        if let Some(short) = option.short_name {
            arg = arg.short(short);
        }
        arg = match field.value_type {
            ValueType::Text => arg.action(ArgAction::Set),
            ValueType::Flag => arg.action(ArgAction::SetTrue),
            ValueType::List => arg.action(ArgAction::Append),
        };
        return Some(arg);
    }

    let argument = field.argument.as_ref()?;
    let arg = Arg::new(field.field)
        .value_name(argument.name)
        .help(argument.description)
        .required(true);

    Some(match field.value_type {
        ValueType::List => arg.action(ArgAction::Append).num_args(1..),
        _ => arg.action(ArgAction::Set),
    })
}

/// Typed access to the parsed values of a bound schema
pub struct OptionValues<'a> {
    matches: &'a ArgMatches,
    schema: &'a OptionSchema,
}

impl<'a> OptionValues<'a> {
    pub fn new(matches: &'a ArgMatches, schema: &'a OptionSchema) -> Self {
        Self { matches, schema }
    }

    /// Value of a text field, `None` when omitted
    pub fn text(&self, field: &str) -> AppResult<Option<String>> {
        self.check(field, ValueType::Text)?;
        self.matches
            .try_get_one::<String>(field)
            .map(|v| v.cloned())
            .map_err(|e| read_error(field, e))
    }

    /// Value of a flag field
    pub fn flag(&self, field: &str) -> AppResult<bool> {
        self.check(field, ValueType::Flag)?;
        self.matches
            .try_get_one::<bool>(field)
            .map(|v| v.copied().unwrap_or(false))
            .map_err(|e| read_error(field, e))
    }

    /// Every value of a list field, in command-line order
    pub fn list(&self, field: &str) -> AppResult<Vec<String>> {
        self.check(field, ValueType::List)?;
        self.matches
            .try_get_many::<String>(field)
            .map(|v| v.map(|values| values.cloned().collect()).unwrap_or_default())
            .map_err(|e| read_error(field, e))
    }

    fn check(&self, field: &str, expected: ValueType) -> AppResult<()> {
        let descriptor = self
            .schema
            .get(field)
            .filter(|d| d.is_bound())
            .ok_or_else(|| {
                AppError::configuration(format!("field '{field}' is not part of the bound schema"))
            })?;

        if descriptor.value_type != expected {
            return Err(AppError::configuration(format!(
                "field '{}' is a {} value, not {}",
                field,
                descriptor.value_type.as_str(),
                expected.as_str()
            )));
        }
        Ok(())
    }
}

fn read_error(field: &str, error: MatchesError) -> AppError {
    AppError::configuration(format!("cannot read field '{field}': {error}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::schema::{ArgumentAttr, OptionAttr};

    fn schema() -> OptionSchema {
        OptionSchema::new()
            .field(
                FieldDescriptor::text("name")
                    .argument(ArgumentAttr::new("Name").description("Service name")),
            )
            .field(
                FieldDescriptor::text("folder")
                    .option(OptionAttr::long("folder").with_short('f').description("Folder")),
            )
            .field(FieldDescriptor::flag("noOverwrite").option(OptionAttr::long("no-overwrite")))
            .field(FieldDescriptor::list("excludeDirectories").option(OptionAttr::long("exclude")))
            .field(FieldDescriptor::text("internal"))
    }

    fn command() -> Command {
        bind_options(Command::new("service"), &schema()).unwrap()
    }

    #[test]
    fn test_binds_options_and_arguments() {
        let cmd = command();
        let ids: Vec<&str> = cmd.get_arguments().map(|a| a.get_id().as_str()).collect();
        assert_eq!(ids, vec!["name", "folder", "noOverwrite", "excludeDirectories"]);

        let folder = cmd.get_arguments().find(|a| a.get_id() == "folder").unwrap();
        assert_eq!(folder.get_long(), Some("folder"));
        assert_eq!(folder.get_short(), Some('f'));

        let name = cmd.get_arguments().find(|a| a.get_id() == "name").unwrap();
        assert!(name.is_positional());
        assert!(name.is_required_set());
    }

    #[test]
    fn test_reads_values_back() {
        let schema = schema();
        let matches = bind_options(Command::new("service"), &schema)
            .unwrap()
            .try_get_matches_from([
                "service", "Book", "-f", "Store", "--exclude", "a", "--exclude", "b/**",
            ])
            .unwrap();

        let values = OptionValues::new(&matches, &schema);
        assert_eq!(values.text("name").unwrap().as_deref(), Some("Book"));
        assert_eq!(values.text("folder").unwrap().as_deref(), Some("Store"));
        assert!(!values.flag("noOverwrite").unwrap());
        assert_eq!(values.list("excludeDirectories").unwrap(), vec!["a", "b/**"]);
    }

    #[test]
    fn test_missing_required_argument() {
        let result = command().try_get_matches_from(["service"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_required_option_omitted_is_error() {
        let schema = OptionSchema::new().field(
            FieldDescriptor::text("folder").option(OptionAttr::long("folder").required()),
        );
        let cmd = bind_options(Command::new("service"), &schema).unwrap();

        let err = cmd.clone().try_get_matches_from(["service"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);

        let matches = cmd.try_get_matches_from(["service", "--folder", "Books"]).unwrap();
        let values = OptionValues::new(&matches, &schema);
        assert_eq!(values.text("folder").unwrap().as_deref(), Some("Books"));
    }

    #[test]
    fn test_rejects_required_flag() {
        let schema = OptionSchema::new()
            .field(FieldDescriptor::flag("force").option(OptionAttr::long("force").required()));
        let err = bind_options(Command::new("crud"), &schema).unwrap_err();
        assert!(err.is_configuration());
        assert!(err.to_string().contains("flag 'force' cannot be required"));
    }

    #[test]
    fn test_reading_unbound_field_fails() {
        let schema = schema();
        let matches = command().try_get_matches_from(["service", "Book"]).unwrap();
        let values = OptionValues::new(&matches, &schema);

        assert!(values.text("internal").unwrap_err().is_configuration());
        assert!(values.text("unknown").unwrap_err().is_configuration());
        assert!(values.flag("folder").unwrap_err().is_configuration());
    }

    #[test]
    fn test_option_wins_over_argument() {
        let schema = OptionSchema::new().field(
            FieldDescriptor::text("name")
                .option(OptionAttr::long("name"))
                .argument(ArgumentAttr::new("Name")),
        );
        let cmd = bind_options(Command::new("crud"), &schema).unwrap();
        let arg = cmd.get_arguments().next().unwrap();
        assert!(!arg.is_positional());
        assert_eq!(arg.get_long(), Some("name"));
    }

    #[test]
    fn test_rejects_option_without_alias() {
        let schema = OptionSchema::new().field(FieldDescriptor::text("x").option(OptionAttr::default()));
        let err = bind_options(Command::new("crud"), &schema).unwrap_err();
        assert!(err.to_string().contains("neither a name nor a short name"));
    }

    #[test]
    fn test_rejects_empty_argument_name() {
        let schema = OptionSchema::new().field(FieldDescriptor::text("x").argument(ArgumentAttr::new(" ")));
        assert!(bind_options(Command::new("crud"), &schema).unwrap_err().is_configuration());
    }

    #[test]
    fn test_rejects_duplicates() {
        let duplicate_field = OptionSchema::new()
            .field(FieldDescriptor::text("x").option(OptionAttr::long("x")))
            .field(FieldDescriptor::text("x").option(OptionAttr::long("y")));
        assert!(bind_options(Command::new("crud"), &duplicate_field).is_err());

        let duplicate_alias = OptionSchema::new()
            .field(FieldDescriptor::text("x").option(OptionAttr::short('d')))
            .field(FieldDescriptor::text("y").option(OptionAttr::short('d')));
        let err = bind_options(Command::new("crud"), &duplicate_alias).unwrap_err();
        assert!(err.to_string().contains("'-d' is already in use"));
    }

    #[test]
    fn test_rejects_reserved_alias() {
        let schema = OptionSchema::new().field(FieldDescriptor::flag("debug").option(OptionAttr::short('v')));
        assert!(bind_options(Command::new("crud"), &schema).is_err());
    }

    #[test]
    fn test_rejects_positional_flag() {
        let schema = OptionSchema::new().field(FieldDescriptor::flag("x").argument(ArgumentAttr::new("X")));
        assert!(bind_options(Command::new("crud"), &schema).is_err());
    }
}
