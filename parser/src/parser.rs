//! The [`Parser`] type.

use std::collections::HashMap;
use std::ffi::OsString;

use argi_core::{
    ArgValue, OptionSpec, ParserConfig, PositionalSpec, Schema, SchemaError, Transform,
    Validation, Validator, ValueType, coerce, merge_schemas, parse_string, validate_schema,
};
use tracing::{debug, warn};

use crate::error::ParseError;
use crate::registry::Registry;
use crate::result::ParseResult;
use crate::run::ParseRun;

/// Canonical name of the built-in help flag.
pub const HELP_OPTION: &str = "help";

/// Canonical name of the built-in version flag.
pub const VERSION_OPTION: &str = "version";

/// A configured argument parser.
///
/// Built once from a [`ParserConfig`] and a [`Schema`], then reused for any
/// number of [`parse`](Parser::parse) calls. All per-parse state is local to
/// the call, so a `Parser` can be shared between threads.
///
/// # Examples
///
/// ```
/// use argi_core::{ArgValue, OptionSpec, ParserConfig, Schema, ValueType};
/// use argi_parser::Parser;
///
/// let schema = Schema::new()
///     .with_option(
///         "number",
///         OptionSpec::of_type(ValueType::Number).with_alias("n").required(),
///     )
///     .with_option("bool", OptionSpec::boolean());
/// let parser = Parser::new(ParserConfig::new("demo"), schema);
///
/// let result = parser.parse(["-n", "15", "--bool"]).unwrap();
/// assert_eq!(result.get("number"), Some(&ArgValue::Number(15.0)));
/// assert_eq!(result.get("bool"), Some(&ArgValue::Bool(true)));
///
/// assert!(parser.parse(Vec::<String>::new()).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct Parser {
    config: ParserConfig,
    /// User registrations, merged in order.
    schema: Schema,
    registry: Registry,
    transforms: HashMap<String, Transform>,
    type_tests: HashMap<ValueType, Validator>,
}

impl Parser {
    pub fn new(config: ParserConfig, schema: Schema) -> Self {
        let mut type_tests = HashMap::new();
        type_tests.insert(
            ValueType::Number,
            Validator::new(|value: &ArgValue| value.as_f64().is_none_or(|n| !n.is_nan())),
        );

        let mut parser = Self {
            config,
            schema,
            registry: Registry::default(),
            transforms: HashMap::new(),
            type_tests,
        };
        parser.rebuild();
        parser
    }

    /// Creates a parser with the default configuration.
    pub fn with_schema(schema: Schema) -> Self {
        Self::new(ParserConfig::default(), schema)
    }

    /// Registers a named transform.
    ///
    /// The name is matched against option and slot types: it supplies the
    /// coercer for a custom type, or replaces the built-in coercer when it
    /// names one (`"csv"`, `"number"`, ...).
    pub fn with_transform<F>(mut self, name: &str, f: F) -> Self
    where
        F: Fn(&str) -> ArgValue + Send + Sync + 'static,
    {
        self.transforms.insert(name.to_string(), Transform::new(f));
        self
    }

    /// Sets the test applied to every value of `value_type` that has no
    /// test of its own. Replaces the built-in `NaN` check for numbers.
    pub fn with_type_test<F, R>(mut self, value_type: ValueType, f: F) -> Self
    where
        F: Fn(&ArgValue) -> R + Send + Sync + 'static,
        R: Into<Validation>,
    {
        self.type_tests.insert(value_type, Validator::new(f));
        self
    }

    /// Merges `schema` into the registered schema and rebuilds the registry.
    ///
    /// Same-named options are replaced, new ones appended. Sub-command and
    /// tail lists are replaced only when `schema` declares them.
    pub fn register_options(&mut self, schema: Schema) {
        self.schema.merge(schema);
        self.rebuild();
    }

    fn rebuild(&mut self) {
        let effective = merge_schemas(&builtin_options(&self.config), &self.schema);
        self.registry = Registry::build(&effective, &self.config.default_type);
        debug!(
            program = %self.config.name,
            options = self.registry.options().count(),
            "schema registered"
        );
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// The user schema, without built-in flags.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Reports structural schema problems, including custom types that no
    /// registered transform covers.
    pub fn validate(&self) -> Vec<SchemaError> {
        let mut errors = validate_schema(&self.schema);

        let options = self
            .schema
            .options
            .iter()
            .map(|(name, spec)| (name.as_str(), spec.value_type.as_ref()));
        let slots = self
            .schema
            .sub_commands
            .iter()
            .chain(&self.schema.tail)
            .map(|slot| (slot.name.as_str(), slot.value_type.as_ref()));
        for (name, value_type) in options.chain(slots) {
            let value_type = value_type.unwrap_or(&self.config.default_type);
            if let ValueType::Custom(type_name) = value_type {
                if !self.transforms.contains_key(type_name) {
                    errors.push(SchemaError::UnknownType {
                        name: name.to_string(),
                        type_name: type_name.clone(),
                    });
                }
            }
        }
        errors
    }

    /// Parses one argument vector (without the program name).
    ///
    /// # Errors
    ///
    /// Any [`ParseError`]; help and version requests are reported as
    /// non-fatal errors carrying the text to print.
    pub fn parse<I, S>(&self, args: I) -> Result<ParseResult, ParseError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let tokens: Vec<String> = args.into_iter().map(Into::into).collect();
        ParseRun::new(self, tokens).execute()
    }

    /// Parses the current process arguments. Arguments that are not valid
    /// UTF-8 are converted lossily.
    pub fn parse_env(&self) -> Result<ParseResult, ParseError> {
        self.parse(os_args(std::env::args_os().skip(1)))
    }

    /// Type of a positional slot with the parser default applied.
    pub(crate) fn slot_type(&self, slot: &PositionalSpec) -> ValueType {
        slot.value_type
            .clone()
            .unwrap_or_else(|| self.config.default_type.clone())
    }

    /// Coerces a raw token: item transform, then named transform, then the
    /// built-in coercer.
    pub(crate) fn coerce_value(
        &self,
        raw: &str,
        value_type: &ValueType,
        transform: Option<&Transform>,
    ) -> ArgValue {
        if let Some(transform) = transform.or_else(|| self.transforms.get(value_type.as_str())) {
            return transform.apply(raw);
        }
        coerce(value_type, raw).unwrap_or_else(|| {
            warn!(type_name = %value_type, "no transform registered for custom type");
            parse_string(raw)
        })
    }

    /// Runs the item test, or the default test for its type.
    pub(crate) fn check_value(
        &self,
        name: &str,
        value: &ArgValue,
        value_type: &ValueType,
        test: Option<&Validator>,
    ) -> Result<(), ParseError> {
        let Some(validator) = test.or_else(|| self.type_tests.get(value_type)) else {
            return Ok(());
        };
        match validator.check(value) {
            Validation::Pass => Ok(()),
            Validation::Fail(message) => Err(ParseError::ValidationFailed {
                name: name.to_string(),
                value: value.to_string(),
                message: message
                    .unwrap_or_else(|| format!("\"{name}\": \"{value}\" failed validation")),
            }),
        }
    }
}

fn os_args(args: impl IntoIterator<Item = OsString>) -> Vec<String> {
    args.into_iter()
        .map(|arg| arg.to_string_lossy().into_owned())
        .collect()
}

/// Built-in flags, registered ahead of user options so that user options
/// of the same name replace them.
fn builtin_options(config: &ParserConfig) -> Schema {
    let mut schema = Schema::new();
    if config.help_flag {
        schema = schema.with_option(
            HELP_OPTION,
            OptionSpec::boolean()
                .with_alias("h")
                .with_alias("?")
                .with_description("Print this help text"),
        );
    }
    if config.version_flag {
        schema = schema.with_option(
            VERSION_OPTION,
            OptionSpec::boolean().with_description("Print the version"),
        );
    }
    schema
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_flags_come_first() {
        let parser = Parser::with_schema(Schema::new().with_option("name", OptionSpec::new()));
        let names: Vec<&str> = parser.registry().options().map(|o| o.name.as_str()).collect();
        assert_eq!(names, ["help", "version", "name"]);
        assert_eq!(parser.registry().resolve("?").unwrap().name, "help");
    }

    #[test]
    fn test_builtin_flags_can_be_disabled() {
        let mut config = ParserConfig::new("app");
        config.help_flag = false;
        config.version_flag = false;
        let parser = Parser::new(config, Schema::new());
        assert_eq!(parser.registry().options().count(), 0);
    }

    #[test]
    fn test_register_options_merges() {
        let mut parser = Parser::with_schema(
            Schema::new()
                .with_option("a", OptionSpec::new())
                .with_tail(PositionalSpec::new("files").rest()),
        );
        parser.register_options(Schema::new().with_option("b", OptionSpec::boolean()));

        assert_eq!(parser.schema().option_names(), ["a", "b"]);
        assert_eq!(parser.registry().tail().len(), 1);
        assert!(parser.registry().resolve("b").unwrap().is_boolean());
    }

    #[test]
    fn test_coerce_value_layering() {
        let parser = Parser::with_schema(Schema::new())
            .with_transform("upper", |raw| ArgValue::from(raw.to_uppercase()))
            .with_transform("csv", |raw| ArgValue::from(raw.split(';').collect::<Vec<_>>()));

        let upper = ValueType::from("upper");
        assert_eq!(parser.coerce_value("abc", &upper, None), ArgValue::from("ABC"));
        assert_eq!(
            parser.coerce_value("a;b", &ValueType::Csv, None),
            ArgValue::from(vec!["a", "b"])
        );

        let own = Transform::new(|raw| ArgValue::from(raw.len() as i64));
        assert_eq!(parser.coerce_value("abc", &upper, Some(&own)), ArgValue::Integer(3));

        let unknown = ValueType::from("email");
        assert_eq!(parser.coerce_value("x@y", &unknown, None), ArgValue::from("x@y"));
    }

    #[test]
    fn test_default_number_test_rejects_nan() {
        let parser = Parser::with_schema(Schema::new());
        let err = parser
            .check_value("count", &ArgValue::Number(f64::NAN), &ValueType::Number, None)
            .unwrap_err();
        assert_eq!(err.to_string(), r#""count": "NaN" failed validation"#);
        assert!(
            parser
                .check_value("count", &ArgValue::Number(1.0), &ValueType::Number, None)
                .is_ok()
        );
    }

    #[test]
    fn test_validate_reports_unknown_custom_types() {
        let schema = Schema::new()
            .with_option("mail", OptionSpec::of_type(ValueType::from("email")))
            .with_option("name", OptionSpec::of_type(ValueType::from("upper")));
        let parser = Parser::with_schema(schema).with_transform("upper", |raw| raw.into());

        let errors = parser.validate();
        assert_eq!(errors.len(), 1);
        assert!(matches!(
            &errors[0],
            SchemaError::UnknownType { name, type_name } if name == "mail" && type_name == "email"
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_os_args_are_converted_lossily() {
        use std::os::unix::ffi::OsStringExt;

        let args = vec![
            OsString::from("--name"),
            OsString::from_vec(vec![b'a', 0xff, b'b']),
        ];
        let tokens = os_args(args);
        assert_eq!(tokens, ["--name", "a\u{FFFD}b"]);

        let parser = Parser::with_schema(Schema::new().with_option("name", OptionSpec::new()));
        let result = parser.parse(tokens).unwrap();
        assert_eq!(result.get_str("name"), Some("a\u{FFFD}b"));
    }

    #[test]
    fn test_parser_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Parser>();
    }
}
