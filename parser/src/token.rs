//! Token classification for flags.
//!
//! Matching works on characters directly rather than building a pattern per
//! alias. Long aliases match `--[no-|no]alias[=][inline]`; short aliases
//! match inside a `-cluster[=inline]` following getopt rules.

/// Returns `true` for tokens treated as flags (anything starting with `-`).
pub fn is_flag(token: &str) -> bool {
    token.starts_with('-')
}

/// Splits the argument vector at the first literal `--`.
///
/// Returns the tokens before it and, when present, the tokens after it.
pub fn split_pass_through(mut tokens: Vec<String>) -> (Vec<String>, Option<Vec<String>>) {
    let Some(index) = tokens.iter().position(|token| token == "--") else {
        return (tokens, None);
    };
    let pass_through = tokens.split_off(index + 1);
    tokens.truncate(index);
    (tokens, Some(pass_through))
}

/// A long-form match such as `--no-color` or `--out=file`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LongMatch<'a> {
    /// A `no-`/`no` marker preceded the alias.
    pub negated: bool,
    /// Non-empty text after the alias, one leading `=` stripped.
    pub inline: Option<&'a str>,
}

/// Matches `token` against a long alias.
///
/// Negation markers are only recognised for boolean options and are tried
/// as `no-`, then `no`, then none.
///
/// # Examples
///
/// ```
/// use argi_parser::token::{LongMatch, match_long};
///
/// assert_eq!(
///     match_long("--no-color", "color", true),
///     Some(LongMatch { negated: true, inline: None })
/// );
/// assert_eq!(
///     match_long("--out=a.txt", "out", false),
///     Some(LongMatch { negated: false, inline: Some("a.txt") })
/// );
/// assert_eq!(match_long("-out", "out", false), None);
/// ```
pub fn match_long<'a>(token: &'a str, alias: &str, boolean: bool) -> Option<LongMatch<'a>> {
    let body = token.strip_prefix("--")?;
    let markers: &[&str] = if boolean { &["no-", "no", ""] } else { &[""] };

    markers.iter().find_map(|marker| {
        let after = body.strip_prefix(marker)?.strip_prefix(alias)?;
        let inline = after.strip_prefix('=').unwrap_or(after);
        Some(LongMatch {
            negated: !marker.is_empty(),
            inline: (!inline.is_empty()).then_some(inline),
        })
    })
}

/// A short alias found inside a `-cluster`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShortMatch {
    /// The alias takes a value and ended the flag run.
    Value {
        /// Boolean letters before it, to be pushed back as `-<preceding>`.
        preceding: String,
        /// Rest of the cluster, if any.
        attached: Option<String>,
    },
    /// The alias is a boolean switch within the flag run.
    Switch {
        /// Cluster with the switch removed, to be pushed back as `-<rest>`.
        rest: String,
        /// `=value` given directly after the switch as the last letter.
        inline: Option<String>,
    },
}

/// Matches `token` against a single-character alias.
///
/// `takes_value` reports whether a letter belongs to a value-taking option.
/// Letters are read left to right; the first value-taking letter ends the
/// flag run and absorbs the remainder of the cluster. The alias only
/// matches inside the flag run, and a `-` inside the flag run makes the
/// token unmatchable.
///
/// # Examples
///
/// ```
/// use argi_parser::token::{ShortMatch, match_short};
///
/// let takes_value = |c: char| c == 'n';
/// assert_eq!(
///     match_short("-vn5", 'n', takes_value),
///     Some(ShortMatch::Value { preceding: "v".into(), attached: Some("5".into()) })
/// );
/// assert_eq!(
///     match_short("-vx", 'v', takes_value),
///     Some(ShortMatch::Switch { rest: "x".into(), inline: None })
/// );
/// assert_eq!(match_short("-nv", 'v', takes_value), None);
/// ```
pub fn match_short(
    token: &str,
    alias: char,
    takes_value: impl Fn(char) -> bool,
) -> Option<ShortMatch> {
    let cluster = token.strip_prefix('-')?;
    if cluster.is_empty() || cluster.starts_with('-') {
        return None;
    }
    let (letters, inline) = match cluster.split_once('=') {
        Some((letters, inline)) => (letters, Some(inline)),
        None => (cluster, None),
    };

    let run_end = letters
        .char_indices()
        .find(|&(_, c)| takes_value(c))
        .map_or(letters.len(), |(index, c)| index + c.len_utf8());
    if letters[..run_end].contains('-') {
        return None;
    }
    let position = letters[..run_end].find(alias)?;
    let after = &letters[position + alias.len_utf8()..];

    if takes_value(alias) {
        let attached = match (after.is_empty(), inline) {
            (true, Some(inline)) if !inline.is_empty() => Some(inline.to_string()),
            (true, _) => None,
            (false, Some(inline)) => Some(format!("{after}={inline}")),
            (false, None) => Some(after.to_string()),
        };
        return Some(ShortMatch::Value {
            preceding: letters[..position].to_string(),
            attached,
        });
    }

    let mut rest = format!("{}{after}", &letters[..position]);
    let inline = if after.is_empty() {
        inline.filter(|value| !value.is_empty()).map(str::to_string)
    } else {
        if let Some(inline) = inline {
            rest.push('=');
            rest.push_str(inline);
        }
        None
    };
    Some(ShortMatch::Switch { rest, inline })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_split_pass_through() {
        let (before, after) = split_pass_through(strings(&["--verbose", "--", "--foo", "bar"]));
        assert_eq!(before, ["--verbose"]);
        assert_eq!(after.unwrap(), ["--foo", "bar"]);

        let (before, after) = split_pass_through(strings(&["a", "--"]));
        assert_eq!(before, ["a"]);
        assert_eq!(after, Some(vec![]));

        let (before, after) = split_pass_through(strings(&["a", "b"]));
        assert_eq!(before, ["a", "b"]);
        assert!(after.is_none());
    }

    #[test]
    fn test_split_pass_through_uses_first_separator() {
        let (before, after) = split_pass_through(strings(&["x", "--", "y", "--", "z"]));
        assert_eq!(before, ["x"]);
        assert_eq!(after.unwrap(), ["y", "--", "z"]);
    }

    #[test]
    fn test_long_negation_markers() {
        assert_eq!(
            match_long("--nobool", "bool", true),
            Some(LongMatch { negated: true, inline: None })
        );
        assert_eq!(
            match_long("--bool", "bool", true),
            Some(LongMatch { negated: false, inline: None })
        );
        // Negation is not available to value-taking options.
        assert_eq!(match_long("--no-name", "name", false), None);
    }

    #[test]
    fn test_long_alias_starting_with_no() {
        assert_eq!(
            match_long("--notify", "notify", true),
            Some(LongMatch { negated: false, inline: None })
        );
        assert_eq!(
            match_long("--no-notify", "notify", true),
            Some(LongMatch { negated: true, inline: None })
        );
    }

    #[test]
    fn test_long_inline_values() {
        assert_eq!(match_long("--bool=false", "bool", true).unwrap().inline, Some("false"));
        assert_eq!(match_long("--name=", "name", false).unwrap().inline, None);
        assert_eq!(match_long("--name==x", "name", false).unwrap().inline, Some("=x"));
        assert_eq!(match_long("--namex", "name", false).unwrap().inline, Some("x"));
        assert_eq!(match_long("--nam", "name", false), None);
    }

    #[test]
    fn test_short_value_forms() {
        let takes_value = |c: char| c == 'n';
        assert_eq!(
            match_short("-n", 'n', takes_value),
            Some(ShortMatch::Value { preceding: String::new(), attached: None })
        );
        assert_eq!(
            match_short("-n=5", 'n', takes_value),
            Some(ShortMatch::Value { preceding: String::new(), attached: Some("5".into()) })
        );
        assert_eq!(
            match_short("-n5=6", 'n', takes_value),
            Some(ShortMatch::Value { preceding: String::new(), attached: Some("5=6".into()) })
        );
    }

    #[test]
    fn test_short_switch_forms() {
        let takes_value = |_: char| false;
        assert_eq!(
            match_short("-abc", 'b', takes_value),
            Some(ShortMatch::Switch { rest: "ac".into(), inline: None })
        );
        assert_eq!(
            match_short("-ab=false", 'b', takes_value),
            Some(ShortMatch::Switch { rest: "a".into(), inline: Some("false".into()) })
        );
        assert_eq!(
            match_short("-ba=1", 'b', takes_value),
            Some(ShortMatch::Switch { rest: "a=1".into(), inline: None })
        );
        assert_eq!(
            match_short("-b", 'b', takes_value),
            Some(ShortMatch::Switch { rest: String::new(), inline: None })
        );
    }

    #[test]
    fn test_short_rejects_long_and_bare_dash() {
        let takes_value = |_: char| false;
        assert_eq!(match_short("--b", 'b', takes_value), None);
        assert_eq!(match_short("-", 'b', takes_value), None);
        assert_eq!(match_short("-=b", 'b', takes_value), None);
        assert_eq!(match_short("-a", 'b', takes_value), None);
    }

    #[test]
    fn test_short_dash_inside_flag_run() {
        let takes_value = |c: char| c == 'n';
        assert_eq!(match_short("-b-v", 'b', takes_value), None);
        assert_eq!(match_short("-b-v", 'v', takes_value), None);
        assert_eq!(
            match_short("-n-5", 'n', takes_value),
            Some(ShortMatch::Value { preceding: String::new(), attached: Some("-5".into()) })
        );
    }

    #[test]
    fn test_is_flag() {
        assert!(is_flag("-x"));
        assert!(is_flag("--"));
        assert!(!is_flag("x"));
        assert!(!is_flag(""));
    }
}
