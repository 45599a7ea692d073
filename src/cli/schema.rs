//! Declarative option schemas.
//!
//! Each command option type describes its fields once; the binder turns the
//! description into clap arguments and reads parsed values back by field
//! name.

/// Shape of a field's value on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueType {
    /// A single string
    Text,
    /// Boolean, true when present
    Flag,
    /// Repeatable string
    List,
}

impl ValueType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueType::Text => "text",
            ValueType::Flag => "flag",
            ValueType::List => "list",
        }
    }
}

/// Named flag metadata (`-x` / `--name`)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionAttr {
    pub name: Option<&'static str>,
    pub short_name: Option<char>,
    pub description: &'static str,
    pub required: bool,
}

impl OptionAttr {
    /// Option with a long alias
    pub fn long(name: &'static str) -> Self {
        Self {
            name: Some(name),
            ..Self::default()
        }
    }

    /// Option with only a short alias
    pub fn short(short_name: char) -> Self {
        Self {
            short_name: Some(short_name),
            ..Self::default()
        }
    }

    pub fn with_short(mut self, short_name: char) -> Self {
        self.short_name = Some(short_name);
        self
    }

    pub fn description(mut self, description: &'static str) -> Self {
        self.description = description;
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }
}

/// Positional argument metadata
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArgumentAttr {
    pub name: &'static str,
    pub description: &'static str,
}

impl ArgumentAttr {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            description: "",
        }
    }

    pub fn description(mut self, description: &'static str) -> Self {
        self.description = description;
        self
    }
}

/// One declared field of an options type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Serialized field name, also the clap argument id
    pub field: &'static str,
    pub value_type: ValueType,
    pub option: Option<OptionAttr>,
    pub argument: Option<ArgumentAttr>,
}

impl FieldDescriptor {
    pub fn new(field: &'static str, value_type: ValueType) -> Self {
        Self {
            field,
            value_type,
            option: None,
            argument: None,
        }
    }

    pub fn text(field: &'static str) -> Self {
        Self::new(field, ValueType::Text)
    }

    pub fn flag(field: &'static str) -> Self {
        Self::new(field, ValueType::Flag)
    }

    pub fn list(field: &'static str) -> Self {
        Self::new(field, ValueType::List)
    }

    pub fn option(mut self, option: OptionAttr) -> Self {
        self.option = Some(option);
        self
    }

    pub fn argument(mut self, argument: ArgumentAttr) -> Self {
        self.argument = Some(argument);
        self
    }

    /// Whether the field appears on the command line at all
    pub fn is_bound(&self) -> bool {
        self.option.is_some() || self.argument.is_some()
    }
}

/// Ordered field declarations of one options type
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionSchema {
    fields: Vec<FieldDescriptor>,
}

impl OptionSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a field
    pub fn field(mut self, field: FieldDescriptor) -> Self {
        self.fields.push(field);
        self
    }

    /// Append every field of `other`, keeping order
    pub fn merge(mut self, other: OptionSchema) -> Self {
        self.fields.extend(other.fields);
        self
    }

    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    pub fn get(&self, field: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.field == field)
    }
}
