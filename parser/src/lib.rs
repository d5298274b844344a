//! Argument parsing engine for argi.
//!
//! A [`Parser`] takes a [`Schema`](argi_core::Schema) of flags,
//! sub-commands and tail arguments, and turns a raw argument vector into a
//! [`ParseResult`]:
//!
//! ```
//! use argi_core::{ArgValue, OptionSpec, ParserConfig, PositionalSpec, Schema, ValueType};
//! use argi_parser::{ParseError, Parser};
//!
//! let schema = Schema::new()
//!     .with_sub_command(PositionalSpec::new("operation").required())
//!     .with_option("number", OptionSpec::of_type(ValueType::Number).with_alias("n"))
//!     .with_option("list", OptionSpec::of_type(ValueType::Csv))
//!     .with_tail(PositionalSpec::new("files").rest());
//! let parser = Parser::new(ParserConfig::new("demo"), schema);
//!
//! let result = parser
//!     .parse(["get", "-n", "30", "--list", "a,b", "./a", "./b", "--", "raw"])
//!     .unwrap();
//! assert_eq!(result.get_str("operation"), Some("get"));
//! assert_eq!(result.get_f64("number"), Some(30.0));
//! assert_eq!(result.get("list"), Some(&ArgValue::from(vec!["a", "b"])));
//! assert_eq!(result.get("files"), Some(&ArgValue::from(vec!["./a", "./b"])));
//! assert_eq!(result.pass_through, Some(vec!["raw".to_string()]));
//!
//! let help = parser.parse(["--help"]).unwrap_err();
//! assert!(matches!(help, ParseError::HelpRequested(_)));
//! assert_eq!(help.exit_code(), 0);
//! ```

mod error;
mod help;
mod parser;
mod registry;
mod result;
mod run;
pub mod token;

pub use error::{FAILURE_EXIT_CODE, MissingItem, MissingKind, ParseError};
pub use parser::{HELP_OPTION, Parser, VERSION_OPTION};
pub use registry::{Registry, ResolvedOption, flag_prefix};
pub use result::ParseResult;
