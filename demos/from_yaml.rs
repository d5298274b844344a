//! Schema document example.
//!
//! Loads a schema from YAML, registers the custom type it references, and
//! prints the parse result as JSON.
//!
//! # Usage
//!
//! ```bash
//! cargo run -p argi-demos --example from_yaml -- build --target web -j 4 --tags a,b
//! cargo run -p argi-demos --example from_yaml -- --help
//! ```

use argi_core::{ArgValue, ParserConfig, Schema};
use argi_parser::Parser;

const SCHEMA: &str = r#"
__subCommands:
  - name: task
    required: true
    description: Task to run
__tail:
  - name: paths
    rest: true
    variableName: ...paths
target:
  type: slug
  required: true
  description: Deployment target, lower-cased
jobs:
  type: integer
  alias: j
  defaultValue: 1
tags:
  type: csv
dry-run:
  type: boolean
  alias: [d, n]
"#;

fn main() {
    let schema = match Schema::from_yaml_str(SCHEMA) {
        Ok(schema) => schema,
        Err(err) => {
            eprintln!("invalid schema document: {err}");
            std::process::exit(1);
        }
    };

    let parser = Parser::new(ParserConfig::new("from_yaml"), schema)
        .with_transform("slug", |raw| ArgValue::from(raw.trim().to_lowercase()));

    let problems = parser.validate();
    if !problems.is_empty() {
        for problem in &problems {
            eprintln!("schema problem: {problem}");
        }
        std::process::exit(1);
    }

    match parser.parse_env() {
        Ok(result) => match serde_json::to_string_pretty(&result) {
            Ok(json) => println!("{json}"),
            Err(err) => eprintln!("failed to serialize result: {err}"),
        },
        Err(err) if !err.is_fatal() => println!("{err}"),
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(err.exit_code());
        }
    }
}
