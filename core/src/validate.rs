//! Schema validation.
//!
//! Parsing never rejects a schema: conflicting aliases are resolved by
//! registration order and malformed names simply never match. This module
//! reports those problems up front so they can be fixed before a user hits
//! them.
//!
//! # Examples
//!
//! ```
//! use argi_core::*;
//!
//! let schema = Schema::new()
//!     .with_option("number", OptionSpec::of_type(ValueType::Number).with_alias("n"))
//!     .with_option("name", OptionSpec::new().with_alias("n"));
//!
//! let errors = validate_schema(&schema);
//! assert!(matches!(errors.as_slice(), [SchemaError::DuplicateAlias { .. }]));
//! ```

use std::collections::{HashMap, HashSet};

use thiserror::Error;

use crate::{PositionalSpec, RESERVED_KEYS, Schema};

/// Structural schema problems.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// An option key is empty or whitespace-only.
    #[error("option name cannot be empty")]
    EmptyOptionName,
    /// An option uses one of the reserved positional keys as its name.
    #[error("option name is reserved: {0}")]
    ReservedOptionName(String),
    /// An alias is empty, starts with `-`, or contains `=` or whitespace.
    #[error("invalid alias {alias:?} for option {option}")]
    InvalidAlias { option: String, alias: String },
    /// Two options answer to the same name or alias.
    #[error("{alias:?} is claimed by both {first} and {second}")]
    DuplicateAlias {
        alias: String,
        first: String,
        second: String,
    },
    /// A sub-command or tail slot has no name.
    #[error("positional slot {0} has no name")]
    EmptyPositionalName(usize),
    /// A result key is produced by more than one option or slot.
    #[error("duplicate result name: {0}")]
    DuplicateName(String),
    /// A `rest` tail slot is followed by further slots.
    #[error("rest slot must be the last tail slot: {0}")]
    RestNotLast(String),
    /// `rest` was set on a sub-command slot.
    #[error("sub-command slot cannot be rest: {0}")]
    RestOnSubCommand(String),
    /// A custom value type has no registered transform.
    #[error("unknown value type {type_name:?} for {name}")]
    UnknownType { name: String, type_name: String },
}

/// Validates a schema, returning every problem found.
///
/// # Examples
///
/// ```
/// use argi_core::*;
///
/// let schema = Schema::new()
///     .with_tail(PositionalSpec::new("files").rest())
///     .with_tail(PositionalSpec::new("extra"));
///
/// assert_eq!(
///     validate_schema(&schema),
///     vec![SchemaError::RestNotLast("files".into())]
/// );
/// ```
pub fn validate_schema(schema: &Schema) -> Vec<SchemaError> {
    let mut errors = Vec::new();
    let mut owners: HashMap<&str, &str> = HashMap::new();

    for (name, spec) in &schema.options {
        if name.trim().is_empty() {
            errors.push(SchemaError::EmptyOptionName);
            continue;
        }
        if RESERVED_KEYS.contains(&name.as_str()) {
            errors.push(SchemaError::ReservedOptionName(name.clone()));
            continue;
        }

        for alias in std::iter::once(name).chain(&spec.alias) {
            if !is_valid_alias(alias) {
                errors.push(SchemaError::InvalidAlias {
                    option: name.clone(),
                    alias: alias.clone(),
                });
                continue;
            }
            match owners.get(alias.as_str()) {
                Some(first) if *first != name.as_str() => {
                    errors.push(SchemaError::DuplicateAlias {
                        alias: alias.clone(),
                        first: first.to_string(),
                        second: name.clone(),
                    });
                }
                Some(_) => {}
                None => {
                    owners.insert(alias.as_str(), name.as_str());
                }
            }
        }
    }

    let mut names: HashSet<&str> = schema.options.keys().map(String::as_str).collect();
    errors.extend(validate_slots(&schema.sub_commands, &mut names, true));
    errors.extend(validate_slots(&schema.tail, &mut names, false));

    errors
}

fn validate_slots<'a>(
    slots: &'a [PositionalSpec],
    names: &mut HashSet<&'a str>,
    sub_commands: bool,
) -> Vec<SchemaError> {
    let mut errors = Vec::new();

    for (index, slot) in slots.iter().enumerate() {
        if slot.name.trim().is_empty() {
            errors.push(SchemaError::EmptyPositionalName(index));
            continue;
        }
        if !names.insert(slot.name.as_str()) {
            errors.push(SchemaError::DuplicateName(slot.name.clone()));
        }
        if slot.rest {
            if sub_commands {
                errors.push(SchemaError::RestOnSubCommand(slot.name.clone()));
            } else if index + 1 < slots.len() {
                errors.push(SchemaError::RestNotLast(slot.name.clone()));
            }
        }
    }

    errors
}

fn is_valid_alias(alias: &str) -> bool {
    !alias.is_empty()
        && !alias.starts_with('-')
        && !alias.contains('=')
        && !alias.chars().any(char::is_whitespace)
}

#[cfg(test)]
mod tests {
    use crate::{OptionSpec, ValueType};

    use super::*;

    #[test]
    fn test_validate_accepts_valid_schema() {
        let schema = Schema::new()
            .with_sub_command(PositionalSpec::new("operation").required())
            .with_option(
                "number",
                OptionSpec::of_type(ValueType::Number)
                    .with_alias("n")
                    .with_alias("num"),
            )
            .with_option("help", OptionSpec::boolean().with_alias("h").with_alias("?"))
            .with_tail(PositionalSpec::new("source"))
            .with_tail(PositionalSpec::new("files").rest());

        assert!(validate_schema(&schema).is_empty());
    }

    #[test]
    fn test_validate_rejects_reserved_and_malformed_names() {
        let schema = Schema::new()
            .with_option("__tail", OptionSpec::new())
            .with_option("out", OptionSpec::new().with_alias("-o"))
            .with_option("with space", OptionSpec::new());

        assert_eq!(
            validate_schema(&schema),
            vec![
                SchemaError::ReservedOptionName("__tail".into()),
                SchemaError::InvalidAlias {
                    option: "out".into(),
                    alias: "-o".into()
                },
                SchemaError::InvalidAlias {
                    option: "with space".into(),
                    alias: "with space".into()
                },
            ]
        );
    }

    #[test]
    fn test_validate_alias_shadowing_option_name() {
        let schema = Schema::new()
            .with_option("v", OptionSpec::boolean())
            .with_option("verbose", OptionSpec::boolean().with_alias("v"));

        assert_eq!(
            validate_schema(&schema),
            vec![SchemaError::DuplicateAlias {
                alias: "v".into(),
                first: "v".into(),
                second: "verbose".into(),
            }]
        );
    }

    #[test]
    fn test_validate_positional_problems() {
        let schema = Schema::new()
            .with_option("source", OptionSpec::new())
            .with_sub_command(PositionalSpec::new("op").rest())
            .with_sub_command(PositionalSpec::new(""))
            .with_tail(PositionalSpec::new("source"));

        assert_eq!(
            validate_schema(&schema),
            vec![
                SchemaError::RestOnSubCommand("op".into()),
                SchemaError::EmptyPositionalName(1),
                SchemaError::DuplicateName("source".into()),
            ]
        );
    }
}
