//! Command implementations.

pub mod distributor;
pub mod fund;
pub mod retailer;
pub mod session;

use anyhow::bail;
use paybazar_core::forms::ValidationErrors;

/// Prints field errors the way the panel renders them: one message per
/// field, adjacent to the field name.
pub(crate) fn report_validation_errors(errors: &ValidationErrors) -> anyhow::Result<()> {
    eprintln!("Validation failed:");
    for (field, message) in errors {
        eprintln!("  {field}: {message}");
    }
    bail!("{} field(s) invalid", errors.len());
}
