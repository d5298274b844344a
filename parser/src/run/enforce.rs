//! Requirement enforcement, defaults and the leftover check.

use argi_core::PositionalSpec;
use tracing::debug;

use super::ParseRun;
use crate::error::{MissingItem, MissingKind, ParseError};

fn slot_label(slot: &PositionalSpec) -> String {
    match &slot.variable_name {
        Some(variable) => format!("{}: {variable}", slot.name),
        None => slot.name.clone(),
    }
}

impl ParseRun<'_> {
    /// Fails with every required item that received no value.
    pub(super) fn enforce_required(&self) -> Result<(), ParseError> {
        let registry = self.parser.registry();
        let missing_slots = |slots: &[PositionalSpec], kind: MissingKind| -> Vec<MissingItem> {
            slots
                .iter()
                .filter(|slot| slot.required && !self.options.contains_key(&slot.name))
                .map(|slot| MissingItem {
                    kind,
                    name: slot.name.clone(),
                    label: slot_label(slot),
                })
                .collect()
        };

        let mut missing = missing_slots(registry.sub_commands(), MissingKind::SubCommand);
        missing.extend(
            registry
                .required()
                .iter()
                .filter(|name| !self.claimed.contains(*name))
                .filter_map(|name| registry.option(name))
                .map(|option| MissingItem {
                    kind: MissingKind::Flag,
                    name: option.name.clone(),
                    label: option.label(),
                }),
        );
        missing.extend(missing_slots(registry.tail(), MissingKind::TailArgument));

        if missing.is_empty() {
            return Ok(());
        }
        debug!(count = missing.len(), "required arguments missing");
        Err(ParseError::MissingRequired {
            program: self.parser.config().name.clone(),
            missing,
        })
    }

    /// Stores declared defaults, untransformed, for unmatched options.
    pub(super) fn apply_defaults(&mut self) {
        let parser = self.parser;
        for option in parser.registry().options() {
            if self.claimed.contains(&option.name) {
                continue;
            }
            if let Some(default) = &option.default_value {
                self.options
                    .entry(option.name.clone())
                    .or_insert_with(|| default.clone());
            }
        }
    }

    /// Returns leftover tokens when tolerated, fails otherwise.
    pub(super) fn take_leftovers(&mut self) -> Result<Vec<String>, ParseError> {
        let leftovers = std::mem::take(&mut self.tokens);
        let config = self.parser.config();
        if leftovers.is_empty() || config.allow_unrecognized {
            return Ok(leftovers);
        }
        Err(ParseError::UnrecognizedArguments {
            program: config.name.clone(),
            tokens: leftovers,
        })
    }
}

#[cfg(test)]
mod tests {
    use argi_core::{ArgValue, OptionSpec, ParserConfig, PositionalSpec, Schema, ValueType};

    use crate::{MissingKind, ParseError, Parser};

    fn schema() -> Schema {
        Schema::new()
            .with_sub_command(
                PositionalSpec::new("operation")
                    .required()
                    .with_variable_name("get|set"),
            )
            .with_option(
                "number",
                OptionSpec::of_type(ValueType::Number)
                    .with_alias("n")
                    .required(),
            )
            .with_option(
                "string",
                OptionSpec::new()
                    .with_default("default")
                    .with_transform(|raw| raw.to_uppercase().into()),
            )
            .with_tail(PositionalSpec::new("source").required())
    }

    #[test]
    fn test_all_missing_items_reported_together() {
        let err = Parser::new(ParserConfig::new("demo"), schema())
            .parse(Vec::<String>::new())
            .unwrap_err();
        let ParseError::MissingRequired { program, missing } = err else {
            panic!("expected MissingRequired, got {err:?}");
        };

        assert_eq!(program, "demo");
        let kinds: Vec<_> = missing.iter().map(|item| item.kind).collect();
        assert_eq!(
            kinds,
            [
                MissingKind::SubCommand,
                MissingKind::Flag,
                MissingKind::TailArgument
            ]
        );
        assert_eq!(missing[0].label, "operation: get|set");
        assert_eq!(missing[1].label, "--number, -n <number>");
        assert_eq!(missing[2].label, "source");
    }

    #[test]
    fn test_default_is_not_transformed() {
        let result = Parser::with_schema(schema())
            .parse(["get", "-n", "1", "src"])
            .unwrap();
        assert_eq!(result.get("string"), Some(&ArgValue::from("default")));

        let result = Parser::with_schema(schema())
            .parse(["get", "-n", "1", "--string", "abc", "src"])
            .unwrap();
        assert_eq!(result.get("string"), Some(&ArgValue::from("ABC")));
    }

    #[test]
    fn test_leftovers_are_fatal_unless_allowed() {
        let schema = Schema::new().with_option("a", OptionSpec::boolean());
        let err = Parser::with_schema(schema.clone())
            .parse(["-a", "--bogus", "x"])
            .unwrap_err();
        assert_eq!(
            err,
            ParseError::UnrecognizedArguments {
                program: "app".into(),
                tokens: vec!["--bogus".into(), "x".into()],
            }
        );

        let mut config = ParserConfig::default();
        config.allow_unrecognized = true;
        let result = Parser::new(config, schema).parse(["-a", "--bogus", "x"]).unwrap();
        assert_eq!(result.unparsed, ["--bogus", "x"]);
        assert_eq!(result.get_bool("a"), Some(true));
    }
}
