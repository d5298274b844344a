//! Option registry.
//!
//! Resolves a [`Schema`] into the lookup structures the matcher needs: one
//! [`ResolvedOption`] per canonical name, an alias-to-canonical map, and
//! every matchable name ordered longest first.
//!
//! Longest-first ordering is what keeps `--ab` from being claimed by an
//! option named `a`, and a multi-letter alias from being split into its
//! single-letter parts.

use std::collections::HashMap;

use argi_core::{
    ArgValue, PositionalSpec, RESERVED_KEYS, Schema, Transform, Validator, ValueType,
};
use indexmap::IndexMap;
use tracing::{debug, warn};

/// Per-option configuration with parser defaults applied.
#[derive(Debug, Clone)]
pub struct ResolvedOption {
    pub name: String,
    /// Canonical name first, then declared aliases.
    pub aliases: Vec<String>,
    /// `--number, -n` style listing of every alias.
    pub display: String,
    pub value_type: ValueType,
    pub variable_name: String,
    pub required: bool,
    pub description: Option<String>,
    pub default_value: Option<ArgValue>,
    pub transform: Option<Transform>,
    pub test: Option<Validator>,
}

impl ResolvedOption {
    pub fn is_boolean(&self) -> bool {
        self.value_type.is_boolean()
    }

    /// Display string plus the value placeholder for non-boolean options.
    pub fn label(&self) -> String {
        if self.is_boolean() {
            self.display.clone()
        } else {
            format!("{} <{}>", self.display, self.variable_name)
        }
    }
}

/// Prefix for an alias as typed on the command line.
pub fn flag_prefix(alias: &str) -> &'static str {
    if alias.chars().count() > 1 { "--" } else { "-" }
}

fn display_string(aliases: &[String]) -> String {
    aliases
        .iter()
        .map(|alias| format!("{}{alias}", flag_prefix(alias)))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Resolved lookup tables for one schema.
///
/// # Examples
///
/// ```
/// use argi_core::{OptionSpec, Schema, ValueType};
/// use argi_parser::Registry;
///
/// let schema = Schema::new()
///     .with_option("number", OptionSpec::of_type(ValueType::Number).with_alias("n"))
///     .with_option("a", OptionSpec::boolean())
///     .with_option("ab", OptionSpec::boolean());
/// let registry = Registry::build(&schema, &ValueType::String);
///
/// assert_eq!(registry.flag_names(), ["number", "ab", "a", "n"]);
/// assert_eq!(registry.resolve("n").unwrap().name, "number");
/// assert_eq!(registry.option("number").unwrap().display, "--number, -n");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Registry {
    options: IndexMap<String, ResolvedOption>,
    aliases: HashMap<String, String>,
    flag_names: Vec<String>,
    required: Vec<String>,
    sub_commands: Vec<PositionalSpec>,
    tail: Vec<PositionalSpec>,
}

impl Registry {
    pub fn build(schema: &Schema, default_type: &ValueType) -> Self {
        let mut registry = Self {
            sub_commands: schema.sub_commands.clone(),
            tail: schema.tail.clone(),
            ..Default::default()
        };

        for (name, spec) in &schema.options {
            if RESERVED_KEYS.contains(&name.as_str()) {
                warn!(option = %name, "skipping reserved key in option table");
                continue;
            }

            let value_type = spec
                .value_type
                .clone()
                .unwrap_or_else(|| default_type.clone());
            let aliases: Vec<String> = std::iter::once(name.clone())
                .chain(spec.alias.iter().cloned())
                .collect();

            for alias in &aliases {
                if let Some(previous) = registry.aliases.insert(alias.clone(), name.clone()) {
                    if previous != *name {
                        warn!(%alias, %previous, option = %name, "alias reassigned to later option");
                    }
                }
            }
            if spec.required {
                registry.required.push(name.clone());
            }

            registry.options.insert(
                name.clone(),
                ResolvedOption {
                    name: name.clone(),
                    display: display_string(&aliases),
                    aliases,
                    variable_name: spec
                        .variable_name
                        .clone()
                        .unwrap_or_else(|| value_type.to_string()),
                    value_type,
                    required: spec.required,
                    description: spec.description.clone(),
                    default_value: spec.default_value.clone(),
                    transform: spec.transform.clone(),
                    test: spec.test.clone(),
                },
            );
        }

        let mut flag_names: Vec<String> = registry.aliases.keys().cloned().collect();
        flag_names.sort_by(|a, b| {
            b.chars()
                .count()
                .cmp(&a.chars().count())
                .then_with(|| a.cmp(b))
        });
        registry.flag_names = flag_names;

        debug!(
            options = registry.options.len(),
            flags = ?registry.flag_names,
            "registry built"
        );
        registry
    }

    /// Canonical option for a name or alias.
    pub fn resolve(&self, alias: &str) -> Option<&ResolvedOption> {
        self.aliases
            .get(alias)
            .and_then(|name| self.options.get(name))
    }

    pub fn option(&self, name: &str) -> Option<&ResolvedOption> {
        self.options.get(name)
    }

    /// Options in declaration order.
    pub fn options(&self) -> impl Iterator<Item = &ResolvedOption> {
        self.options.values()
    }

    /// Every name and alias, longest first, ties in lexicographic order.
    pub fn flag_names(&self) -> &[String] {
        &self.flag_names
    }

    /// Canonical names of required options in declaration order.
    pub fn required(&self) -> &[String] {
        &self.required
    }

    pub fn sub_commands(&self) -> &[PositionalSpec] {
        &self.sub_commands
    }

    pub fn tail(&self) -> &[PositionalSpec] {
        &self.tail
    }

    /// Whether `c` is the short alias of a value-taking option.
    pub fn short_takes_value(&self, c: char) -> bool {
        let mut buf = [0u8; 4];
        self.resolve(c.encode_utf8(&mut buf))
            .is_some_and(|option| !option.is_boolean())
    }
}
