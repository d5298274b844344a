//! Basic parser example.
//!
//! Builds a schema with sub-commands, aliased flags, a custom transform, a
//! validating test and a variadic tail, then parses the process arguments.
//!
//! # Usage
//!
//! ```bash
//! cargo run -p argi-demos --example basic -- get jim@example.com --number 30 ./src ./a ./b
//! cargo run -p argi-demos --example basic -- --help
//! ```

use argi_core::{ArgValue, OptionSpec, ParserConfig, PositionalSpec, Schema, ValueType};
use argi_parser::Parser;

fn main() {
    let config = ParserConfig::new("basic")
        .with_version(env!("CARGO_PKG_VERSION"))
        .with_help_text("A tour of flags, sub-commands and tail arguments.");

    let schema = Schema::new()
        .with_sub_command(
            PositionalSpec::new("operation")
                .required()
                .with_variable_name("get|set")
                .with_test(|value: &ArgValue| match value.as_str() {
                    Some("get" | "set") => Ok(()),
                    other => Err(format!(
                        "\"{}\" is not a supported operation. Use \"get\" or \"set\"",
                        other.unwrap_or_default()
                    )),
                }),
        )
        .with_sub_command(
            PositionalSpec::new("notification")
                .with_variable_name("email")
                .with_description("Email to notify when the operation completes"),
        )
        .with_tail(PositionalSpec::new("source").with_description("The source URI"))
        .with_tail(
            PositionalSpec::new("files")
                .rest()
                .with_variable_name("...files")
                .with_description("Any number of target file paths"),
        )
        .with_option(
            "simpleString",
            OptionSpec::new()
                .with_alias("s")
                .with_description("A simple string flag"),
        )
        .with_option(
            "string",
            OptionSpec::new()
                .with_alias("S")
                .with_default("default")
                .with_variable_name("helpfulName")
                .with_transform(|raw| ArgValue::from(raw.to_uppercase()))
                .with_description("A string flag that is upper-cased"),
        );

    let mut parser = Parser::new(config, schema)
        .with_transform("csv", |raw| {
            ArgValue::from(raw.split(',').map(str::trim).collect::<Vec<_>>())
        });

    // Options can also be registered after construction.
    parser.register_options(
        Schema::new()
            .with_option(
                "number",
                OptionSpec::of_type(ValueType::Number)
                    .required()
                    .with_alias("n")
                    .with_alias("num")
                    .with_test(|value: &ArgValue| {
                        if value.as_f64().is_some_and(|n| n > 10.0) {
                            Ok(())
                        } else {
                            Err("--number requires a value greater than 10".to_string())
                        }
                    })
                    .with_description("A number greater than 10"),
            )
            .with_option(
                "list",
                OptionSpec::of_type(ValueType::Csv).with_description("A comma separated list"),
            )
            .with_option(
                "bool",
                OptionSpec::boolean().with_description("A simple boolean flag"),
            )
            .with_option(
                "complexBoolean",
                OptionSpec::boolean()
                    .with_alias("c")
                    .with_alias("B")
                    .with_alias("cBool")
                    .with_transform(|raw| {
                        let on = argi_core::bool_literal(raw).unwrap_or(false);
                        ArgValue::from(if on { "To be" } else { "Not to be" })
                    })
                    .with_description("A boolean flag with an explicit-value transform"),
            ),
    );

    match parser.parse_env() {
        Ok(result) => {
            println!("Pass-through: {:?}", result.pass_through);
            println!("Unparsed: {:?}", result.unparsed);
            for (name, value) in &result.options {
                println!("  {name} = {value}");
            }
        }
        Err(err) if !err.is_fatal() => println!("{err}"),
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(err.exit_code());
        }
    }
}
