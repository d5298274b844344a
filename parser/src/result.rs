use argi_core::ArgValue;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Outcome of a successful parse.
///
/// # Examples
///
/// ```
/// use argi_core::{OptionSpec, Schema};
/// use argi_parser::Parser;
///
/// let parser = Parser::with_schema(Schema::new().with_option("verbose", OptionSpec::boolean()));
/// let result = parser.parse(["--verbose", "--", "--foo", "bar"]).unwrap();
///
/// assert_eq!(result.get_bool("verbose"), Some(true));
/// assert_eq!(result.pass_through.as_deref(), Some(&["--foo".to_string(), "bar".to_string()][..]));
/// assert!(result.unparsed.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseResult {
    /// Values by option, sub-command or tail name, in the order stored.
    pub options: IndexMap<String, ArgValue>,
    /// Tokens after the first `--`; `None` when there was no separator.
    pub pass_through: Option<Vec<String>>,
    /// Leftover tokens, only when the parser allows unrecognized input.
    pub unparsed: Vec<String>,
}

impl ParseResult {
    pub fn get(&self, name: &str) -> Option<&ArgValue> {
        self.options.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.options.contains_key(name)
    }

    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(ArgValue::as_str)
    }

    pub fn get_bool(&self, name: &str) -> Option<bool> {
        self.get(name).and_then(ArgValue::as_bool)
    }

    pub fn get_f64(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(ArgValue::as_f64)
    }
}
