//! Field constraints.
//!
//! Every constraint is a pure function of the field's own value; there is
//! no cross-field validation anywhere in the panel. Length constraints
//! count characters, not bytes.

use std::sync::LazyLock;

use regex::Regex;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9-]+(\.[A-Za-z0-9-]+)*\.[A-Za-z]{2,}$")
        .expect("email regex is valid")
});

static PHONE_INTERNATIONAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[1-9]\d{9,14}$").expect("phone regex is valid"));

static PHONE_LOCAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[1-9]\d{9}$").expect("phone regex is valid"));

/// Recognized constraint kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constraint {
    /// Value must be non-empty after trimming.
    Required,
    /// At least this many characters.
    MinLength(usize),
    /// At most this many characters.
    MaxLength(usize),
    /// RFC-shaped email address.
    Email,
    /// Optional `+`, then 10 to 15 digits not starting with zero.
    PhoneInternational,
    /// Exactly 10 digits not starting with zero.
    PhoneLocal,
    /// Value must be one of the listed options.
    OneOf(&'static [&'static str]),
    /// Numeric and strictly greater than zero.
    PositiveAmount,
}

impl Constraint {
    /// Returns `true` when `value` satisfies the constraint.
    #[must_use]
    pub fn is_satisfied(&self, value: &str) -> bool {
        match self {
            Self::Required => !value.trim().is_empty(),
            Self::MinLength(min) => value.chars().count() >= *min,
            Self::MaxLength(max) => value.chars().count() <= *max,
            Self::Email => EMAIL_RE.is_match(value),
            Self::PhoneInternational => PHONE_INTERNATIONAL_RE.is_match(value),
            Self::PhoneLocal => PHONE_LOCAL_RE.is_match(value),
            Self::OneOf(options) => options.contains(&value),
            Self::PositiveAmount => value.trim().parse::<f64>().is_ok_and(|n| n > 0.0),
        }
    }
}
