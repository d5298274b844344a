//! One parse of one argument vector.
//!
//! # Architecture
//!
//! The run walks a fixed sequence of stages over a shared "remaining
//! tokens" vector. Each stage consumes what it recognises and leaves the
//! rest for the next:
//!
//! 1. **Pass-through**: everything after the first `--` is set aside.
//! 2. **Sub-commands** (`positional`): leading positionals fill the
//!    sub-command slots.
//! 3. **Flags** (`flags`): every alias, longest first, claims at most one
//!    occurrence.
//! 4. **Built-ins**: help and version requests end the run.
//! 5. **Tail** (`positional`): leading positionals fill the tail slots.
//! 6. **Enforcement** (`enforce`): required items, defaults, leftovers.

mod enforce;
mod flags;
mod positional;

use std::collections::HashSet;

use argi_core::ArgValue;
use indexmap::IndexMap;
use tracing::debug;

use crate::error::ParseError;
use crate::parser::{HELP_OPTION, Parser, VERSION_OPTION};
use crate::result::ParseResult;
use crate::token::split_pass_through;

/// Per-call parse state.
pub(crate) struct ParseRun<'p> {
    parser: &'p Parser,
    tokens: Vec<String>,
    /// Canonical names of options already matched in this run.
    claimed: HashSet<String>,
    options: IndexMap<String, ArgValue>,
}

impl<'p> ParseRun<'p> {
    pub(crate) fn new(parser: &'p Parser, tokens: Vec<String>) -> Self {
        Self {
            parser,
            tokens,
            claimed: HashSet::new(),
            options: IndexMap::new(),
        }
    }

    pub(crate) fn execute(mut self) -> Result<ParseResult, ParseError> {
        let (tokens, pass_through) = split_pass_through(std::mem::take(&mut self.tokens));
        self.tokens = tokens;
        debug!(tokens = ?self.tokens, ?pass_through, "split pass-through");

        self.extract_sub_commands()?;
        self.match_flags()?;
        self.check_builtins()?;
        self.extract_tail()?;
        self.enforce_required()?;
        self.apply_defaults();
        let unparsed = self.take_leftovers()?;

        Ok(ParseResult {
            options: self.options,
            pass_through,
            unparsed,
        })
    }

    fn check_builtins(&self) -> Result<(), ParseError> {
        let config = self.parser.config();
        if config.help_flag && self.is_set(HELP_OPTION) {
            return Err(ParseError::HelpRequested(self.parser.help_text()));
        }
        if config.version_flag && self.is_set(VERSION_OPTION) {
            return Err(ParseError::VersionRequested(self.parser.version_text()));
        }
        Ok(())
    }

    fn is_set(&self, name: &str) -> bool {
        self.options
            .get(name)
            .and_then(ArgValue::as_bool)
            .unwrap_or(false)
    }
}
