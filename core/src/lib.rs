//! Core schema types, value coercion and configuration for argi.
//!
//! This crate defines the declarative model that the `argi-parser` engine
//! consumes:
//!
//! - [`Schema`]: named options plus ordered sub-command and tail slots.
//! - [`OptionSpec`]: a flag with aliases, type, default, transform and test.
//! - [`PositionalSpec`]: a sub-command or tail slot, optionally variadic.
//! - [`ArgValue`]: a parsed value (string, number, integer, boolean, JSON or
//!   list).
//! - [`ParserConfig`]: program metadata and parser-wide defaults.
//!
//! The built-in coercers ([`coerce`], [`parse_number`], [`parse_bool`], ...)
//! never fail; tokens that do not fit fall back to the raw input.
//!
//! Validation ([`validate_schema`]) catches schema mistakes such as two
//! options sharing an alias or a `rest` slot that is not last. Merging
//! ([`merge_schemas`]) supports incremental registration.
//!
//! # Example
//!
//! ```
//! use argi_core::*;
//!
//! let schema = Schema::new()
//!     .with_option(
//!         "number",
//!         OptionSpec::of_type(ValueType::Number).with_alias("n").required(),
//!     )
//!     .with_option("bool", OptionSpec::boolean())
//!     .with_tail(PositionalSpec::new("files").rest());
//!
//! assert!(validate_schema(&schema).is_empty());
//! assert_eq!(coerce(&ValueType::Number, "15"), Some(ArgValue::Number(15.0)));
//! ```

mod coerce;
mod config;
mod document;
mod error;
mod hooks;
mod merge;
mod types;
mod validate;

pub use coerce::{
    bool_literal, coerce, parse_bool, parse_bool_or, parse_csv, parse_integer, parse_integer_or,
    parse_json, parse_json_or, parse_number, parse_string,
};
pub use config::ParserConfig;
pub use error::{ConfigError, Result};
pub use hooks::{Transform, Validation, Validator};
pub use merge::merge_schemas;
pub use types::*;
pub use validate::{SchemaError, validate_schema};
