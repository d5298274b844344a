//! Flag matching stage.

use argi_core::{ArgValue, bool_literal};
use tracing::debug;

use super::ParseRun;
use crate::error::ParseError;
use crate::registry::{ResolvedOption, flag_prefix};
use crate::token::{ShortMatch, is_flag, match_long, match_short};

/// A matched flag token, normalised across long and short forms.
#[derive(Debug)]
struct Hit {
    /// Synthetic token re-queued in place of the matched one.
    push_back: Option<String>,
    /// Value written in the token itself.
    inline: Option<String>,
    negated: bool,
    /// Whether the following token may supply the value.
    look_ahead: bool,
}

impl ParseRun<'_> {
    pub(super) fn match_flags(&mut self) -> Result<(), ParseError> {
        let parser = self.parser;
        let registry = parser.registry();

        for alias in registry.flag_names() {
            if self.tokens.is_empty() {
                break;
            }
            let Some(option) = registry.resolve(alias) else {
                continue;
            };
            if self.claimed.contains(&option.name) {
                continue;
            }
            self.match_alias(alias, option)?;
        }

        debug!(remaining = ?self.tokens, claimed = self.claimed.len(), "flags matched");
        Ok(())
    }

    /// Finds the first occurrence of `alias` and stores its value.
    fn match_alias(&mut self, alias: &str, option: &ResolvedOption) -> Result<(), ParseError> {
        let parser = self.parser;
        let tokens = std::mem::take(&mut self.tokens);
        let mut kept = Vec::with_capacity(tokens.len());
        let mut iter = tokens.into_iter().peekable();

        while let Some(token) = iter.next() {
            if !is_flag(&token) {
                kept.push(token);
                continue;
            }
            let Some(hit) = self.classify(&token, alias, option) else {
                kept.push(token);
                continue;
            };

            if let Some(synthetic) = hit.push_back {
                kept.push(synthetic);
            }

            let explicit = match hit.inline {
                Some(inline) => Some(inline),
                None if !hit.look_ahead => None,
                None if option.is_boolean() => iter.next_if(|next| bool_literal(next).is_some()),
                None => iter.next_if(|next| !is_flag(next)),
            };

            let value = match explicit {
                Some(raw) => parser.coerce_value(&raw, &option.value_type, option.transform.as_ref()),
                None if option.is_boolean() => ArgValue::Bool(!hit.negated),
                None => {
                    return Err(ParseError::MissingValue {
                        flag: format!("{}{alias}", flag_prefix(alias)),
                        variable: option.variable_name.clone(),
                    });
                }
            };

            debug!(%alias, option = %option.name, %value, "flag matched");
            parser.check_value(&option.name, &value, &option.value_type, option.test.as_ref())?;
            self.claimed.insert(option.name.clone());
            self.options.insert(option.name.clone(), value);

            kept.extend(iter.by_ref());
            break;
        }

        self.tokens = kept;
        Ok(())
    }

    fn classify(&self, token: &str, alias: &str, option: &ResolvedOption) -> Option<Hit> {
        let mut chars = alias.chars();
        let (Some(short), None) = (chars.next(), chars.next()) else {
            let long = match_long(token, alias, option.is_boolean())?;
            return Some(Hit {
                push_back: None,
                inline: long.inline.map(str::to_string),
                negated: long.negated,
                look_ahead: true,
            });
        };

        let registry = self.parser.registry();
        let hit = match match_short(token, short, |c| registry.short_takes_value(c))? {
            ShortMatch::Value {
                preceding,
                attached,
            } => Hit {
                push_back: (!preceding.is_empty()).then(|| format!("-{preceding}")),
                inline: attached,
                negated: false,
                look_ahead: true,
            },
            ShortMatch::Switch { rest, inline } => Hit {
                look_ahead: rest.is_empty(),
                push_back: (!rest.is_empty()).then(|| format!("-{rest}")),
                inline,
                negated: false,
            },
        };
        Some(hit)
    }
}
