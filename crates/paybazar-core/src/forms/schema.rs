//! Declarative form schemas and validation.
//!
//! A schema lists fields; a field lists rules in the order they apply.
//! Validation is pure: the same values always produce the same mapping,
//! and the first violated rule per field wins. An empty mapping means the
//! values are submittable.

use std::collections::BTreeMap;

use super::constraint::Constraint;

/// Field name → error message for every invalid field.
///
/// At most one message per field. Ordering is deterministic (by field
/// name) so error surfacing is stable.
pub type ValidationErrors = BTreeMap<&'static str, &'static str>;

/// Options accepted by the login role field.
const ROLE_OPTIONS: &[&str] = &["master", "distributor"];

/// A rule: one constraint with the message shown when it fails.
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    /// The constraint to apply.
    pub constraint: Constraint,
    /// Message surfaced when the constraint fails.
    pub message: &'static str,
}

/// One field of a form schema.
#[derive(Debug, Clone)]
pub struct FieldSchema {
    name: &'static str,
    rules: Vec<Rule>,
}

impl FieldSchema {
    /// Creates a field with no rules.
    #[must_use]
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            rules: Vec::new(),
        }
    }

    /// Appends a rule. Rules apply in the order they were added.
    #[must_use]
    pub fn rule(mut self, constraint: Constraint, message: &'static str) -> Self {
        self.rules.push(Rule {
            constraint,
            message,
        });
        self
    }

    /// Returns the field name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the message of the first violated rule, if any.
    #[must_use]
    pub fn first_violation(&self, value: &str) -> Option<&'static str> {
        self.rules
            .iter()
            .find(|rule| !rule.constraint.is_satisfied(value))
            .map(|rule| rule.message)
    }
}

/// User-entered values, keyed by field name.
///
/// A missing field validates as an empty string, which is how a field the
/// user never touched fails its first constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormValues {
    values: BTreeMap<&'static str, String>,
}

impl FormValues {
    /// Creates an empty value set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a field value, replacing any previous one.
    pub fn set(&mut self, field: &'static str, value: impl Into<String>) {
        self.values.insert(field, value.into());
    }

    /// Returns a field value, or `""` when unset.
    #[must_use]
    pub fn get(&self, field: &str) -> &str {
        self.values.get(field).map_or("", String::as_str)
    }

    /// Returns `true` when no field has been set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Discards every value.
    pub fn reset(&mut self) {
        self.values.clear();
    }
}

impl FromIterator<(&'static str, String)> for FormValues {
    fn from_iter<I: IntoIterator<Item = (&'static str, String)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

/// A declarative form schema.
#[derive(Debug, Clone)]
pub struct FormSchema {
    name: &'static str,
    fields: Vec<FieldSchema>,
}

impl FormSchema {
    /// Creates a schema from its fields.
    #[must_use]
    pub fn new(name: &'static str, fields: Vec<FieldSchema>) -> Self {
        Self { name, fields }
    }

    /// Returns the schema name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the declared fields.
    #[must_use]
    pub fn fields(&self) -> &[FieldSchema] {
        &self.fields
    }

    /// Validates `values` against the schema.
    ///
    /// Deterministic and pure: rules apply per field in declaration
    /// order, the first failure per field wins, and the result is a
    /// field → message mapping. Empty mapping ⇒ submittable.
    #[must_use]
    pub fn validate(&self, values: &FormValues) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        for field in &self.fields {
            if let Some(message) = field.first_violation(values.get(field.name)) {
                errors.insert(field.name, message);
            }
        }
        errors
    }

    /// Login form: email, password, role.
    #[must_use]
    pub fn login() -> Self {
        Self::new(
            "login",
            vec![
                FieldSchema::new("email").rule(Constraint::Email, "Invalid email address"),
                FieldSchema::new("password").rule(
                    Constraint::MinLength(6),
                    "Password must be at least 6 characters",
                ),
                FieldSchema::new("role")
                    .rule(Constraint::Required, "Please select a role")
                    .rule(Constraint::OneOf(ROLE_OPTIONS), "Please select a role"),
            ],
        )
    }

    /// Create-distributor form: name, email, password, international
    /// phone.
    #[must_use]
    pub fn create_distributor() -> Self {
        Self::new(
            "create-distributor",
            vec![
                Self::name_field(),
                Self::email_field(),
                Self::password_field(),
                FieldSchema::new("phone")
                    .rule(Constraint::PhoneInternational, "Invalid phone number"),
            ],
        )
    }

    /// Create-retailer form: name, email, password, 10-digit local phone,
    /// address.
    #[must_use]
    pub fn create_retailer() -> Self {
        Self::new(
            "create-retailer",
            vec![
                Self::name_field(),
                Self::email_field(),
                Self::password_field(),
                FieldSchema::new("phone").rule(
                    Constraint::PhoneLocal,
                    "Enter a valid 10-digit phone number",
                ),
                FieldSchema::new("address").rule(
                    Constraint::MinLength(5),
                    "Address must be at least 5 characters",
                ),
            ],
        )
    }

    /// Fund-request form: positive amount plus required bank details.
    #[must_use]
    pub fn fund_request() -> Self {
        Self::new(
            "fund-request",
            vec![
                FieldSchema::new("amount")
                    .rule(Constraint::Required, "Amount is required")
                    .rule(
                        Constraint::PositiveAmount,
                        "Amount must be greater than zero",
                    ),
                FieldSchema::new("bank_name").rule(Constraint::Required, "Bank name is required"),
                FieldSchema::new("account_number")
                    .rule(Constraint::Required, "Account number is required"),
                FieldSchema::new("ifsc_code").rule(Constraint::Required, "IFSC code is required"),
                FieldSchema::new("bank_branch")
                    .rule(Constraint::Required, "Bank branch is required"),
                FieldSchema::new("utr_number")
                    .rule(Constraint::Required, "UTR number is required"),
                FieldSchema::new("remarks").rule(Constraint::Required, "Remarks are required"),
            ],
        )
    }

    fn name_field() -> FieldSchema {
        FieldSchema::new("name")
            .rule(
                Constraint::MinLength(2),
                "Name must be at least 2 characters",
            )
            .rule(
                Constraint::MaxLength(100),
                "Name must be at most 100 characters",
            )
    }

    fn email_field() -> FieldSchema {
        FieldSchema::new("email")
            .rule(Constraint::Email, "Invalid email address")
            .rule(
                Constraint::MaxLength(255),
                "Email must be at most 255 characters",
            )
    }

    fn password_field() -> FieldSchema {
        FieldSchema::new("password")
            .rule(
                Constraint::MinLength(6),
                "Password must be at least 6 characters",
            )
            .rule(
                Constraint::MaxLength(100),
                "Password must be at most 100 characters",
            )
    }
}
