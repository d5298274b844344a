//! User-supplied callbacks attached to options and positional slots.
//!
//! A [`Transform`] replaces the value type's built-in coercer and a
//! [`Validator`] checks the coerced value. Both are cheap to clone and can
//! be shared across threads, so a parser holding them stays `Send + Sync`.

use std::fmt;
use std::sync::Arc;

use crate::ArgValue;

/// Outcome of a [`Validator`] check.
///
/// Closures passed to [`Validator::new`] may return anything convertible
/// into `Validation`:
///
/// - `bool`: `true` passes, `false` fails with a generic message.
/// - `Result<(), String>`: `Err` fails with the given message.
/// - `String` / `&str`: always a failure carrying that message.
///
/// # Examples
///
/// ```
/// use argi_core::Validation;
///
/// assert!(Validation::from(true).is_pass());
/// assert_eq!(Validation::from(false), Validation::Fail(None));
/// assert_eq!(
///     Validation::from(Err::<(), _>("too big".to_string())),
///     Validation::Fail(Some("too big".into())),
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validation {
    /// The value is acceptable.
    Pass,
    /// The value was rejected, optionally with a user-facing message.
    Fail(Option<String>),
}

impl Validation {
    /// Creates a failure carrying `message`.
    pub fn fail(message: impl Into<String>) -> Self {
        Self::Fail(Some(message.into()))
    }

    /// Returns `true` for [`Validation::Pass`].
    pub fn is_pass(&self) -> bool {
        matches!(self, Self::Pass)
    }
}

impl From<bool> for Validation {
    fn from(ok: bool) -> Self {
        if ok { Self::Pass } else { Self::Fail(None) }
    }
}

impl From<Result<(), String>> for Validation {
    fn from(result: Result<(), String>) -> Self {
        match result {
            Ok(()) => Self::Pass,
            Err(message) => Self::Fail(Some(message)),
        }
    }
}

impl From<String> for Validation {
    fn from(message: String) -> Self {
        Self::Fail(Some(message))
    }
}

impl From<&str> for Validation {
    fn from(message: &str) -> Self {
        Self::Fail(Some(message.to_string()))
    }
}

/// Converts a raw token into a typed value.
///
/// # Examples
///
/// ```
/// use argi_core::{ArgValue, Transform};
///
/// let upper = Transform::new(|raw| ArgValue::from(raw.to_uppercase()));
/// assert_eq!(upper.apply("john"), ArgValue::from("JOHN"));
/// ```
#[derive(Clone)]
pub struct Transform(Arc<dyn Fn(&str) -> ArgValue + Send + Sync>);

impl Transform {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&str) -> ArgValue + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    pub fn apply(&self, raw: &str) -> ArgValue {
        (self.0)(raw)
    }
}

impl fmt::Debug for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Transform(..)")
    }
}

/// Checks a coerced value.
///
/// # Examples
///
/// ```
/// use argi_core::{ArgValue, Validator};
///
/// let port = Validator::new(|value: &ArgValue| {
///     match value.as_f64() {
///         Some(n) if n > 0.0 && n < 65536.0 => Ok(()),
///         _ => Err("Port must be between 1 and 65535".to_string()),
///     }
/// });
/// assert!(port.check(&ArgValue::Number(8080.0)).is_pass());
/// assert!(!port.check(&ArgValue::Number(70000.0)).is_pass());
/// ```
#[derive(Clone)]
pub struct Validator(Arc<dyn Fn(&ArgValue) -> Validation + Send + Sync>);

impl Validator {
    pub fn new<F, R>(f: F) -> Self
    where
        F: Fn(&ArgValue) -> R + Send + Sync + 'static,
        R: Into<Validation>,
    {
        Self(Arc::new(move |value| f(value).into()))
    }

    pub fn check(&self, value: &ArgValue) -> Validation {
        (self.0)(value)
    }
}

impl fmt::Debug for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Validator(..)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validator_accepts_bool_closures() {
        let positive = Validator::new(|v: &ArgValue| v.as_f64().is_some_and(|n| n > 0.0));
        assert!(positive.check(&ArgValue::Number(1.0)).is_pass());
        assert_eq!(positive.check(&ArgValue::Number(-1.0)), Validation::Fail(None));
    }

    #[test]
    fn test_validator_string_result_is_failure_message() {
        let always = Validator::new(|_: &ArgValue| "nope");
        assert_eq!(
            always.check(&ArgValue::from("x")),
            Validation::Fail(Some("nope".to_string()))
        );
    }

    #[test]
    fn test_transform_is_shareable() {
        let t = Transform::new(|raw| ArgValue::from(raw.len() as i64));
        let cloned = t.clone();
        assert_eq!(cloned.apply("abc"), ArgValue::Integer(3));
        assert_eq!(format!("{t:?}"), "Transform(..)");
    }
}
