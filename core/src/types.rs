//! Schema type definitions for argument parsing.
//!
//! This module defines the declarative data model consumed by the parser:
//! named options ([`OptionSpec`]), ordered positional slots
//! ([`PositionalSpec`]) for sub-commands and tail arguments, and the
//! [`Schema`] that groups them. Parsed values are represented by
//! [`ArgValue`].
//!
//! Schemas serialize with [`serde`] using the conventional document shape:
//! a map of option name to option fields, plus the reserved list keys
//! `__subCommands` and `__tail`.

use std::fmt;
use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};

use crate::document;
use crate::error::Result;
use crate::hooks::{Transform, Validation, Validator};

/// Reserved schema key holding the ordered sub-command slots.
pub const SUB_COMMANDS_KEY: &str = "__subCommands";

/// Reserved schema key holding the ordered tail-argument slots.
pub const TAIL_KEY: &str = "__tail";

/// Keys that can never name an option.
pub const RESERVED_KEYS: [&str; 2] = [SUB_COMMANDS_KEY, TAIL_KEY];

/// Value type for options and positional slots.
///
/// Selects the built-in coercer applied to a raw token. `Custom` names a
/// transform registered on the parser.
///
/// # Examples
///
/// ```
/// use argi_core::ValueType;
///
/// assert_eq!(ValueType::default(), ValueType::String);
/// assert_eq!(ValueType::from("csv"), ValueType::Csv);
/// assert_eq!(ValueType::from("upper"), ValueType::Custom("upper".into()));
/// assert_eq!(ValueType::Boolean.as_str(), "boolean");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ValueType {
    /// Raw string (the default).
    #[default]
    String,
    /// Floating point number, `NaN` when not numeric.
    Number,
    /// Unsigned decimal integer.
    Integer,
    /// `true`/`false`/`1`/`0`, also implied by flag presence.
    Boolean,
    /// Strict JSON document.
    Json,
    /// Comma separated list of strings.
    Csv,
    /// Named transform registered on the parser.
    Custom(String),
}

impl ValueType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Integer => "integer",
            Self::Boolean => "boolean",
            Self::Json => "json",
            Self::Csv => "csv",
            Self::Custom(name) => name,
        }
    }

    pub fn is_boolean(&self) -> bool {
        matches!(self, Self::Boolean)
    }
}

impl From<&str> for ValueType {
    fn from(name: &str) -> Self {
        match name {
            "string" => Self::String,
            "number" => Self::Number,
            "integer" => Self::Integer,
            "boolean" => Self::Boolean,
            "json" => Self::Json,
            "csv" => Self::Csv,
            other => Self::Custom(other.to_string()),
        }
    }
}

impl From<String> for ValueType {
    fn from(name: String) -> Self {
        Self::from(name.as_str())
    }
}

impl From<ValueType> for String {
    fn from(value_type: ValueType) -> Self {
        value_type.as_str().to_string()
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parsed (or declared default) value.
///
/// Serializes untagged, so a parse result renders as plain JSON/YAML.
/// `Number` may hold `NaN`; that is a legitimate coercion result which a
/// validator can reject.
///
/// # Examples
///
/// ```
/// use argi_core::ArgValue;
///
/// assert_eq!(ArgValue::from("bob").as_str(), Some("bob"));
/// assert_eq!(ArgValue::Number(15.0).to_string(), "15");
/// assert_eq!(ArgValue::from(vec!["a", "b"]).to_string(), "a,b");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ArgValue {
    Bool(bool),
    Integer(i64),
    Number(f64),
    String(String),
    List(Vec<ArgValue>),
    Json(serde_json::Value),
}

impl ArgValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Numeric view of `Number` and `Integer` values.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[ArgValue]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_json(&self) -> Option<&serde_json::Value> {
        match self {
            Self::Json(value) => Some(value),
            _ => None,
        }
    }
}

impl fmt::Display for ArgValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Integer(i) => write!(f, "{i}"),
            Self::Number(n) if n.is_infinite() => {
                f.write_str(if *n > 0.0 { "Infinity" } else { "-Infinity" })
            }
            Self::Number(n) => write!(f, "{n}"),
            Self::String(s) => f.write_str(s),
            Self::List(items) => {
                for (index, item) in items.iter().enumerate() {
                    if index > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{item}")?;
                }
                Ok(())
            }
            Self::Json(value) => write!(f, "{value}"),
        }
    }
}

impl From<&str> for ArgValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for ArgValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<bool> for ArgValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<f64> for ArgValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i64> for ArgValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<serde_json::Value> for ArgValue {
    fn from(value: serde_json::Value) -> Self {
        Self::Json(value)
    }
}

impl<T: Into<ArgValue>> From<Vec<T>> for ArgValue {
    fn from(items: Vec<T>) -> Self {
        Self::List(items.into_iter().map(Into::into).collect())
    }
}

fn one_or_many<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(alias) => vec![alias],
        OneOrMany::Many(aliases) => aliases,
    })
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// Schema for a named option (flag).
///
/// Single-character names and aliases match the short form (`-n`), longer
/// ones the long form (`--number`). An unset `value_type` falls back to the
/// parser's default type.
///
/// # Examples
///
/// ```
/// use argi_core::{ArgValue, OptionSpec, ValueType};
///
/// let number = OptionSpec::of_type(ValueType::Number)
///     .with_alias("n")
///     .required()
///     .with_description("How many times");
/// assert_eq!(number.alias, vec!["n"]);
/// assert!(number.required);
///
/// let verbose = OptionSpec::boolean().with_default(false);
/// assert_eq!(verbose.default_value, Some(ArgValue::Bool(false)));
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionSpec {
    /// Declared value type (parser default when unset)
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub value_type: Option<ValueType>,
    /// Alternate names; a single string is accepted in documents
    #[serde(
        default,
        deserialize_with = "one_or_many",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub alias: Vec<String>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub required: bool,
    /// Value used when the option never appears, stored as-is
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<ArgValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Placeholder shown in usage and error messages
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variable_name: Option<String>,
    #[serde(skip)]
    pub transform: Option<Transform>,
    #[serde(skip)]
    pub test: Option<Validator>,
}

impl OptionSpec {
    /// Creates an option of the parser's default type.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a boolean option.
    pub fn boolean() -> Self {
        Self::of_type(ValueType::Boolean)
    }

    pub fn of_type(value_type: ValueType) -> Self {
        Self {
            value_type: Some(value_type),
            ..Default::default()
        }
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias.push(alias.into());
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_default(mut self, value: impl Into<ArgValue>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    pub fn with_variable_name(mut self, name: &str) -> Self {
        self.variable_name = Some(name.to_string());
        self
    }

    /// Replaces the type's coercer for this option.
    pub fn with_transform<F>(mut self, f: F) -> Self
    where
        F: Fn(&str) -> ArgValue + Send + Sync + 'static,
    {
        self.transform = Some(Transform::new(f));
        self
    }

    /// Validates the coerced value; see [`Validation`] for return types.
    pub fn with_test<F, R>(mut self, f: F) -> Self
    where
        F: Fn(&ArgValue) -> R + Send + Sync + 'static,
        R: Into<Validation>,
    {
        self.test = Some(Validator::new(f));
        self
    }
}

/// Schema for an ordered positional slot.
///
/// Used both for sub-commands (leading positionals, before any flag) and
/// tail arguments (positionals left after flag matching). Position `i` in
/// the input fills slot `i`. A tail slot marked `rest` absorbs every
/// remaining positional token and must be the last slot.
///
/// # Examples
///
/// ```
/// use argi_core::PositionalSpec;
///
/// let files = PositionalSpec::new("files").rest().with_variable_name("...files");
/// assert!(files.rest);
/// assert!(!files.required);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionalSpec {
    pub name: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub value_type: Option<ValueType>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub required: bool,
    /// Variadic final tail slot
    #[serde(default, skip_serializing_if = "is_false")]
    pub rest: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variable_name: Option<String>,
    #[serde(skip)]
    pub transform: Option<Transform>,
    #[serde(skip)]
    pub test: Option<Validator>,
}

impl PositionalSpec {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Default::default()
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn rest(mut self) -> Self {
        self.rest = true;
        self
    }

    pub fn with_type(mut self, value_type: ValueType) -> Self {
        self.value_type = Some(value_type);
        self
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    pub fn with_variable_name(mut self, name: &str) -> Self {
        self.variable_name = Some(name.to_string());
        self
    }

    pub fn with_transform<F>(mut self, f: F) -> Self
    where
        F: Fn(&str) -> ArgValue + Send + Sync + 'static,
    {
        self.transform = Some(Transform::new(f));
        self
    }

    pub fn with_test<F, R>(mut self, f: F) -> Self
    where
        F: Fn(&ArgValue) -> R + Send + Sync + 'static,
        R: Into<Validation>,
    {
        self.test = Some(Validator::new(f));
        self
    }

    /// Name shown in usage text and error messages.
    pub fn display_name(&self) -> &str {
        self.variable_name.as_deref().unwrap_or(&self.name)
    }
}

/// Complete declarative schema for one parser.
///
/// Options keep their declaration order, which drives help output.
///
/// # Examples
///
/// ```
/// use argi_core::*;
///
/// let schema = Schema::new()
///     .with_sub_command(PositionalSpec::new("operation").required())
///     .with_option("number", OptionSpec::of_type(ValueType::Number).with_alias("n"))
///     .with_option("verbose", OptionSpec::boolean())
///     .with_tail(PositionalSpec::new("files").rest());
///
/// assert_eq!(schema.option_names(), vec!["number", "verbose"]);
/// assert!(schema.option("number").is_some());
/// assert_eq!(schema.tail.len(), 1);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Schema {
    #[serde(
        rename = "__subCommands",
        default,
        skip_serializing_if = "Vec::is_empty"
    )]
    pub sub_commands: Vec<PositionalSpec>,
    #[serde(rename = "__tail", default, skip_serializing_if = "Vec::is_empty")]
    pub tail: Vec<PositionalSpec>,
    #[serde(flatten)]
    pub options: IndexMap<String, OptionSpec>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_option(mut self, name: &str, spec: OptionSpec) -> Self {
        self.options.insert(name.to_string(), spec);
        self
    }

    pub fn with_sub_command(mut self, slot: PositionalSpec) -> Self {
        self.sub_commands.push(slot);
        self
    }

    pub fn with_tail(mut self, slot: PositionalSpec) -> Self {
        self.tail.push(slot);
        self
    }

    pub fn option(&self, name: &str) -> Option<&OptionSpec> {
        self.options.get(name)
    }

    pub fn option_names(&self) -> Vec<&str> {
        self.options.keys().map(String::as_str).collect()
    }

    /// Parses a schema from a JSON document.
    ///
    /// # Examples
    ///
    /// ```
    /// use argi_core::{Schema, ValueType};
    ///
    /// let schema = Schema::from_json_str(r#"{
    ///     "number": { "type": "number", "required": true, "alias": "n" },
    ///     "__tail": [{ "name": "files", "rest": true }]
    /// }"#).unwrap();
    /// let number = schema.option("number").unwrap();
    /// assert_eq!(number.value_type, Some(ValueType::Number));
    /// assert_eq!(number.alias, vec!["n"]);
    /// assert!(schema.tail[0].rest);
    /// ```
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parses a schema from a YAML document.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Loads a schema from a `.json`, `.yaml` or `.yml` file.
    ///
    /// # Errors
    ///
    /// Returns [`Io`](crate::ConfigError::Io) when the file cannot be read,
    /// a JSON/YAML error when it cannot be parsed, and
    /// [`UnsupportedFormat`](crate::ConfigError::UnsupportedFormat) for any
    /// other extension.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        document::load(path.as_ref())
    }

    /// Saves the schema; transforms and tests are not persisted.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        document::save(path.as_ref(), self)
    }
}
