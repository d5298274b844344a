//! Incremental schema registration.
//!
//! A parser may have options registered in several steps (built-in flags
//! first, then the application's schema, then late additions).
//! [`merge_schemas`] folds an overlay into a base schema so each step adds
//! new options and overrides existing ones without discarding the rest.
//!
//! # Example
//!
//! ```
//! use argi_core::*;
//!
//! let base = Schema::new()
//!     .with_option("help", OptionSpec::boolean().with_alias("h"))
//!     .with_option("name", OptionSpec::new());
//! let overlay = Schema::new()
//!     .with_option("name", OptionSpec::new().required())
//!     .with_option("count", OptionSpec::of_type(ValueType::Integer));
//!
//! let merged = merge_schemas(&base, &overlay);
//! assert_eq!(merged.option_names(), vec!["help", "name", "count"]);
//! assert!(merged.option("name").unwrap().required);
//! ```

use crate::Schema;

/// Merges `overlay` into `base`.
///
/// Options are keyed by name: an overlay option replaces the base option of
/// the same name in place, new names are appended in overlay order.
/// Sub-command and tail lists are positional as a whole, so the overlay's
/// list replaces the base list only when the overlay declares one.
///
/// # Examples
///
/// ```
/// use argi_core::*;
///
/// let base = Schema::new().with_tail(PositionalSpec::new("source"));
/// let overlay = Schema::new().with_option("verbose", OptionSpec::boolean());
///
/// let merged = merge_schemas(&base, &overlay);
/// assert_eq!(merged.tail.len(), 1); // overlay declared no tail, base kept
/// ```
pub fn merge_schemas(base: &Schema, overlay: &Schema) -> Schema {
    let mut merged = base.clone();
    merged.merge(overlay.clone());
    merged
}

impl Schema {
    /// In-place form of [`merge_schemas`].
    pub fn merge(&mut self, overlay: Schema) {
        if !overlay.sub_commands.is_empty() {
            self.sub_commands = overlay.sub_commands;
        }
        if !overlay.tail.is_empty() {
            self.tail = overlay.tail;
        }
        for (name, spec) in overlay.options {
            self.options.insert(name, spec);
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{OptionSpec, PositionalSpec, ValueType};

    use super::*;

    #[test]
    fn test_merge_overrides_in_place() {
        let base = Schema::new()
            .with_option("a", OptionSpec::new())
            .with_option("b", OptionSpec::new());
        let overlay = Schema::new().with_option("a", OptionSpec::of_type(ValueType::Json));

        let merged = merge_schemas(&base, &overlay);
        assert_eq!(merged.option_names(), vec!["a", "b"]);
        assert_eq!(
            merged.option("a").unwrap().value_type,
            Some(ValueType::Json)
        );
    }

    #[test]
    fn test_merge_replaces_positional_lists_wholesale() {
        let base = Schema::new()
            .with_sub_command(PositionalSpec::new("one"))
            .with_sub_command(PositionalSpec::new("two"));
        let overlay = Schema::new().with_sub_command(PositionalSpec::new("only"));

        let merged = merge_schemas(&base, &overlay);
        assert_eq!(merged.sub_commands.len(), 1);
        assert_eq!(merged.sub_commands[0].name, "only");
    }

    #[test]
    fn test_merge_keeps_base_when_overlay_empty() {
        let base = Schema::new()
            .with_option("verbose", OptionSpec::boolean())
            .with_tail(PositionalSpec::new("files").rest());

        let merged = merge_schemas(&base, &Schema::new());
        assert_eq!(merged.option_names(), vec!["verbose"]);
        assert!(merged.tail[0].rest);
    }
}
