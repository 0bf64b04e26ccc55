//! Session commands: login, logout, show.

use anyhow::{Result, anyhow, bail};
use paybazar_core::{
    FormController, FormSchema, LoginRequest, Navigator, PanelApi, Resolution, Role, RouteHistory,
    SessionResolver, SessionStore, TimeSource,
};

use super::report_validation_errors;

/// Logs in against the role's endpoint and stores the session.
pub fn login<S: SessionStore, T: TimeSource>(
    resolver: &SessionResolver<S, T>,
    api: &dyn PanelApi,
    email: &str,
    password: &str,
    role: &str,
) -> Result<()> {
    let mut form = FormController::new(FormSchema::login());
    form.set_value("email", email)?;
    form.set_value("password", password)?;
    form.set_value("role", role)?;

    let errors = form.validate().clone();
    if !errors.is_empty() {
        return report_validation_errors(&errors);
    }

    let role: Role = role.parse()?;
    let response = api.login(
        role,
        &LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        },
    )?;

    if !response.is_success() {
        bail!(
            "login failed: {}",
            response
                .message
                .unwrap_or_else(|| "Invalid credentials. Please try again.".to_string())
        );
    }

    let token = response
        .token
        .ok_or_else(|| anyhow!("login response carried no token"))?;
    resolver.login(&token, role, email)?;

    let mut history = RouteHistory::new();
    history.navigate(role.dashboard());
    println!("Logged in as {role}. Now at {}", role.dashboard());
    Ok(())
}

/// Clears the stored session.
pub fn logout<S: SessionStore, T: TimeSource>(resolver: &SessionResolver<S, T>) -> Result<()> {
    let mut history = RouteHistory::new();
    resolver.logout(&mut history)?;
    println!("Logged out.");
    Ok(())
}

/// Shows the resolved session.
pub fn show<S: SessionStore, T: TimeSource>(resolver: &SessionResolver<S, T>) -> Result<()> {
    match resolver.resolve() {
        Resolution::Authenticated { role, claims } => {
            println!("role:     {role}");
            println!("admin_id: {}", claims.data.admin_id);
            if let Some(id) = &claims.data.master_distributor_id {
                println!("master_distributor_id: {id}");
            }
            if let Some(id) = &claims.data.distributor_id {
                println!("distributor_id: {id}");
            }
            if let Some(name) = &claims.data.distributor_name {
                println!("distributor_name: {name}");
            }
            println!("expires:  {}", claims.exp);
            Ok(())
        },
        Resolution::Unauthenticated { reason } => {
            bail!("no active session: {reason}");
        },
    }
}
