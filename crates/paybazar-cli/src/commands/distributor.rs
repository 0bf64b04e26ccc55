//! Create-distributor command (master role).
//!
//! Distributor onboarding is not wired to a backend endpoint yet; the
//! panel validates and confirms locally. The session gate and the
//! validation path are the real ones, so switching to a live endpoint
//! later only touches the submission closure.

use anyhow::{Result, bail};
use paybazar_core::{
    ApiResponse, FormController, FormSchema, Role, RouteHistory, SessionResolver, SessionStore,
    SubmitResult, TimeSource, TracingNotifier,
};

use super::report_validation_errors;

/// Creates a distributor under the master's network.
pub fn create<S: SessionStore, T: TimeSource>(
    resolver: &SessionResolver<S, T>,
    name: &str,
    email: &str,
    password: &str,
    phone: &str,
) -> Result<()> {
    let mut history = RouteHistory::new();
    let notifier = TracingNotifier::new();

    let _session = match resolver.require_role(Role::Master, &mut history, &notifier) {
        Ok(session) => session,
        Err(reason) => bail!("not authorized: {reason} (back to /login)"),
    };

    let mut form = FormController::new(FormSchema::create_distributor());
    form.set_value("name", name)?;
    form.set_value("email", email)?;
    form.set_value("password", password)?;
    form.set_value("phone", phone)?;

    let result = form.submit(
        "Distributor created successfully",
        "Failed to create distributor",
        &notifier,
        |values| {
            Ok(ApiResponse {
                status: "success".to_string(),
                message: Some(format!(
                    "{} has been added to your network.",
                    values.get("name")
                )),
            })
        },
    )?;

    match result {
        Some(SubmitResult::Succeeded { message }) => {
            println!("{message}");
            Ok(())
        },
        Some(SubmitResult::Failed { message }) => bail!("{message}"),
        None => report_validation_errors(form.field_errors()),
    }
}
