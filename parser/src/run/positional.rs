//! Sub-command and tail extraction.

use argi_core::{ArgValue, PositionalSpec};
use tracing::debug;

use super::ParseRun;
use crate::error::ParseError;
use crate::token::is_flag;

impl ParseRun<'_> {
    /// Fills sub-command slots from the leading positionals.
    pub(super) fn extract_sub_commands(&mut self) -> Result<(), ParseError> {
        let parser = self.parser;
        let slots = parser.registry().sub_commands();
        if slots.is_empty() || self.tokens.first().is_none_or(|token| is_flag(token)) {
            return Ok(());
        }

        let mut consumed = 0;
        for (slot, token) in slots.iter().zip(&self.tokens) {
            if is_flag(token) {
                break;
            }
            let value = self.slot_value(slot, token)?;
            self.options.insert(slot.name.clone(), value);
            consumed += 1;
        }
        self.tokens.drain(..consumed);

        debug!(consumed, remaining = ?self.tokens, "sub-commands extracted");
        Ok(())
    }

    /// Fills tail slots from the positionals left after flag matching.
    pub(super) fn extract_tail(&mut self) -> Result<(), ParseError> {
        let parser = self.parser;
        let slots = parser.registry().tail();
        if slots.is_empty() || self.tokens.is_empty() {
            return Ok(());
        }

        let leading = self.tokens.iter().take_while(|token| !is_flag(token)).count();
        let mut consumed = 0;
        while consumed < leading {
            let token = &self.tokens[consumed];
            let Some(slot) = slots.get(consumed) else {
                return Err(ParseError::UnknownTailArgument {
                    token: token.clone(),
                    defined: slots.iter().map(|slot| slot.name.clone()).collect(),
                });
            };

            if slot.rest {
                let value_type = parser.slot_type(slot);
                let items: Vec<ArgValue> = self.tokens[consumed..leading]
                    .iter()
                    .map(|token| parser.coerce_value(token, &value_type, slot.transform.as_ref()))
                    .collect();
                // A slot test sees the whole list; type tests see each element.
                if slot.test.is_none() {
                    for item in &items {
                        parser.check_value(&slot.name, item, &value_type, None)?;
                    }
                }
                let value = ArgValue::List(items);
                if slot.test.is_some() {
                    parser.check_value(&slot.name, &value, &value_type, slot.test.as_ref())?;
                }
                self.options.insert(slot.name.clone(), value);
                consumed = leading;
                break;
            }

            let value = self.slot_value(slot, token)?;
            self.options.insert(slot.name.clone(), value);
            consumed += 1;
        }
        self.tokens.drain(..consumed);

        debug!(consumed, remaining = ?self.tokens, "tail extracted");
        Ok(())
    }

    /// Coerces and tests one token for a positional slot.
    fn slot_value(&self, slot: &PositionalSpec, token: &str) -> Result<ArgValue, ParseError> {
        let parser = self.parser;
        let value_type = parser.slot_type(slot);
        let value = parser.coerce_value(token, &value_type, slot.transform.as_ref());
        parser.check_value(&slot.name, &value, &value_type, slot.test.as_ref())?;
        Ok(value)
    }
}
