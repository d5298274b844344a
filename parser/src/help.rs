//! Usage, help and version text.
//!
//! Plain text only. Configured overrides (`usage_text`, `version_text`)
//! replace the generated text verbatim.

use argi_core::PositionalSpec;

use crate::parser::Parser;
use crate::registry::ResolvedOption;

/// `--number, -n` becomes `--number|-n <number>` in the usage line.
fn flag_usage(option: &ResolvedOption) -> String {
    let flags = option.display.replace(", ", "|");
    if option.is_boolean() {
        flags
    } else {
        format!("{flags} <{}>", option.variable_name)
    }
}

fn flag_help(option: &ResolvedOption) -> String {
    let mut out = format!("  {} [{}", option.display, option.variable_name);
    if let Some(default) = &option.default_value {
        out.push_str(&format!(" :: {default}"));
    }
    out.push_str("]\n");
    if let Some(description) = &option.description {
        out.push_str(&format!("      {description}\n"));
    }
    out
}

fn slot_help(slot: &PositionalSpec) -> String {
    let mut out = format!("  {} [{}]\n", slot.name.to_uppercase(), slot.display_name());
    if let Some(description) = &slot.description {
        out.push_str(&format!("      {description}\n"));
    }
    out
}

impl Parser {
    /// The usage line.
    ///
    /// # Examples
    ///
    /// ```
    /// use argi_core::{OptionSpec, ParserConfig, PositionalSpec, Schema, ValueType};
    /// use argi_parser::Parser;
    ///
    /// let mut config = ParserConfig::new("demo");
    /// config.help_flag = false;
    /// config.version_flag = false;
    /// let schema = Schema::new()
    ///     .with_sub_command(PositionalSpec::new("operation").with_variable_name("get|set"))
    ///     .with_option("number", OptionSpec::of_type(ValueType::Number).with_alias("n").required())
    ///     .with_option("bool", OptionSpec::boolean())
    ///     .with_option("name", OptionSpec::new())
    ///     .with_tail(PositionalSpec::new("files").rest().with_variable_name("...files"));
    ///
    /// assert_eq!(
    ///     Parser::new(config, schema).usage_text(),
    ///     "Usage: demo [get|set] --number|-n <number> [--bool | --name <string>] [...files]"
    /// );
    /// ```
    pub fn usage_text(&self) -> String {
        let config = self.config();
        if let Some(usage) = &config.usage_text {
            return usage.clone();
        }

        let registry = self.registry();
        let mut usage = format!("Usage: {}", config.name);

        for slot in registry.sub_commands() {
            usage.push_str(&format!(" [{}]", slot.display_name()));
        }

        let (required, optional): (Vec<_>, Vec<_>) =
            registry.options().partition(|option| option.required);
        for option in required {
            usage.push_str(&format!(" {}", flag_usage(option)));
        }
        if !optional.is_empty() {
            let group: Vec<String> = optional.into_iter().map(flag_usage).collect();
            usage.push_str(&format!(" [{}]", group.join(" | ")));
        }

        for slot in registry.tail() {
            usage.push_str(&format!(" [{}]", slot.display_name()));
        }
        usage
    }

    /// `<name> <version>`, or just the name when no version is configured.
    pub fn version_text(&self) -> String {
        let config = self.config();
        if let Some(text) = &config.version_text {
            return text.clone();
        }
        match &config.version {
            Some(version) => format!("{} {version}", config.name),
            None => config.name.clone(),
        }
    }

    /// Full help: version, help text, usage, then one section per group.
    pub fn help_text(&self) -> String {
        let config = self.config();
        let registry = self.registry();
        let mut out = format!("{}\n\n", self.version_text());

        if let Some(help) = &config.help_text {
            out.push_str(&format!("{help}\n\n"));
        }
        out.push_str(&format!("{}\n", self.usage_text()));

        for (title, slots) in [
            ("Sub Commands", registry.sub_commands()),
            ("Tailing Arguments", registry.tail()),
        ] {
            if slots.is_empty() {
                continue;
            }
            out.push_str(&format!("\n{title}\n\n"));
            for slot in slots {
                out.push_str(&slot_help(slot));
            }
        }

        let (required, optional): (Vec<_>, Vec<_>) =
            registry.options().partition(|option| option.required);
        if !required.is_empty() {
            out.push_str("\nRequired Flags\n\n");
            for option in &required {
                out.push_str(&flag_help(option));
            }
        }
        if !optional.is_empty() {
            let title = if required.is_empty() { "Flags" } else { "Optional Flags" };
            out.push_str(&format!("\n{title}\n\n"));
            for option in &optional {
                out.push_str(&flag_help(option));
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use argi_core::{OptionSpec, ParserConfig, PositionalSpec, Schema, ValueType};

    use crate::Parser;

    fn parser() -> Parser {
        let config = ParserConfig::new("deploy")
            .with_version("1.4.0")
            .with_help_text("Ship builds.");
        Parser::new(
            config,
            Schema::new()
                .with_sub_command(
                    PositionalSpec::new("operation")
                        .with_variable_name("get|set")
                        .with_description("What to do"),
                )
                .with_option(
                    "number",
                    OptionSpec::of_type(ValueType::Number)
                        .with_alias("n")
                        .required()
                        .with_description("How many"),
                )
                .with_option(
                    "string",
                    OptionSpec::new()
                        .with_alias("S")
                        .with_variable_name("helpfulName")
                        .with_default("default"),
                ),
        )
    }

    #[test]
    fn test_usage_lists_builtins_as_optional() {
        assert_eq!(
            parser().usage_text(),
            "Usage: deploy [get|set] --number|-n <number> \
             [--help|-h|-? | --version | --string|-S <helpfulName>]"
        );
    }

    #[test]
    fn test_help_sections() {
        let help = parser().help_text();
        let expected = "\
deploy 1.4.0

Ship builds.

Usage: deploy [get|set] --number|-n <number> [--help|-h|-? | --version | --string|-S <helpfulName>]

Sub Commands

  OPERATION [get|set]
      What to do

Required Flags

  --number, -n [number]
      How many

Optional Flags

  --help, -h, -? [boolean]
      Print this help text
  --version [boolean]
      Print the version
  --string, -S [helpfulName :: default]
";
        assert_eq!(help, expected);
    }

    #[test]
    fn test_flags_title_without_required_options() {
        let parser = Parser::with_schema(Schema::new());
        let help = parser.help_text();
        assert!(help.contains("\nFlags\n"));
        assert!(!help.contains("Optional Flags"));
    }

    #[test]
    fn test_overrides_replace_generated_text() {
        let mut config = ParserConfig::new("deploy");
        config.usage_text = Some("deploy <op> [flags]".into());
        config.version_text = Some("VERSION: 9001".into());
        let parser = Parser::new(config, Schema::new());

        assert_eq!(parser.usage_text(), "deploy <op> [flags]");
        assert_eq!(parser.version_text(), "VERSION: 9001");
        assert!(parser.help_text().starts_with("VERSION: 9001\n\ndeploy <op> [flags]\n"));
    }
}
