//! Parse failures and early exits.
//!
//! Every variant halts the parse. Callers at the process boundary decide
//! what to do with it; [`ParseError::exit_code`] gives the conventional
//! status.

use std::fmt;

use thiserror::Error;

/// Status used for every fatal parse error.
pub const FAILURE_EXIT_CODE: i32 = 130;

/// Which part of the schema a missing required item belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingKind {
    SubCommand,
    Flag,
    TailArgument,
}

impl fmt::Display for MissingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::SubCommand => "sub-command",
            Self::Flag => "flag",
            Self::TailArgument => "tail argument",
        })
    }
}

/// A required sub-command, flag or tail slot that received no value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingItem {
    pub kind: MissingKind,
    /// Result key of the item.
    pub name: String,
    /// Rendered form, e.g. `--number, -n <number>` or `operation: get|set`.
    pub label: String,
}

impl fmt::Display for MissingItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.kind, self.label)
    }
}

fn join_missing(items: &[MissingItem]) -> String {
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Errors returned by [`Parser::parse`](crate::Parser::parse).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A `test` rejected a coerced value.
    #[error("{message}")]
    ValidationFailed {
        name: String,
        value: String,
        message: String,
    },

    /// Required items were never supplied; lists all of them.
    #[error(
        "missing required argument(s): {}\n\nFor more information: {program} --help",
        join_missing(.missing)
    )]
    MissingRequired {
        program: String,
        missing: Vec<MissingItem>,
    },

    /// A value-taking flag was the last token or was followed by a flag.
    #[error("missing value: {flag} <{variable}>")]
    MissingValue { flag: String, variable: String },

    /// A positional token has no tail slot at its position.
    #[error("{token:?} is not a defined tail argument (defined: {})", .defined.join(", "))]
    UnknownTailArgument { token: String, defined: Vec<String> },

    /// Tokens survived every stage unclaimed.
    #[error(
        "no definition(s) for: [{}]\n\nFor more information: {program} --help",
        .tokens.join(", ")
    )]
    UnrecognizedArguments {
        program: String,
        tokens: Vec<String>,
    },

    /// The built-in help flag was given; carries the rendered help.
    #[error("{0}")]
    HelpRequested(String),

    /// The built-in version flag was given; carries the version text.
    #[error("{0}")]
    VersionRequested(String),
}

impl ParseError {
    /// `false` for help and version requests, which are successful exits.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Self::HelpRequested(_) | Self::VersionRequested(_))
    }

    /// Process status the caller should exit with.
    ///
    /// # Examples
    ///
    /// ```
    /// use argi_parser::ParseError;
    ///
    /// assert_eq!(ParseError::HelpRequested("usage".into()).exit_code(), 0);
    /// let missing = ParseError::MissingValue { flag: "--out".into(), variable: "file".into() };
    /// assert_eq!(missing.exit_code(), 130);
    /// assert_eq!(missing.to_string(), "missing value: --out <file>");
    /// ```
    pub fn exit_code(&self) -> i32 {
        if self.is_fatal() { FAILURE_EXIT_CODE } else { 0 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_required_lists_every_item() {
        let err = ParseError::MissingRequired {
            program: "deploy".into(),
            missing: vec![
                MissingItem {
                    kind: MissingKind::SubCommand,
                    name: "operation".into(),
                    label: "operation: get|set".into(),
                },
                MissingItem {
                    kind: MissingKind::Flag,
                    name: "number".into(),
                    label: "--number, -n <number>".into(),
                },
            ],
        };

        assert_eq!(
            err.to_string(),
            "missing required argument(s): sub-command [operation: get|set], \
             flag [--number, -n <number>]\n\nFor more information: deploy --help"
        );
    }

    #[test]
    fn test_unknown_tail_argument_message() {
        let err = ParseError::UnknownTailArgument {
            token: "extra".into(),
            defined: vec!["source".into(), "dest".into()],
        };
        assert_eq!(
            err.to_string(),
            r#""extra" is not a defined tail argument (defined: source, dest)"#
        );
    }

    #[test]
    fn test_help_and_version_are_not_fatal() {
        assert!(!ParseError::VersionRequested("1.0".into()).is_fatal());
        let unrecognized = ParseError::UnrecognizedArguments {
            program: "app".into(),
            tokens: vec!["--nope".into(), "x".into()],
        };
        assert!(unrecognized.is_fatal());
        assert!(unrecognized.to_string().starts_with("no definition(s) for: [--nope, x]"));
    }
}
