//! Create-retailer command (distributor role).

use anyhow::{Result, bail};
use paybazar_core::{
    ApiError, CreateUserRequest, FormController, FormSchema, PanelApi, Role, RouteHistory,
    SessionResolver, SessionStore, SubmitOutcome, SubmitResult, TimeSource, TracingNotifier,
};

use super::report_validation_errors;

/// Creates a retailer under the distributor's network.
pub fn create<S: SessionStore, T: TimeSource>(
    resolver: &SessionResolver<S, T>,
    api: &dyn PanelApi,
    name: &str,
    email: &str,
    password: &str,
    phone: &str,
    address: &str,
) -> Result<()> {
    let mut history = RouteHistory::new();
    let notifier = TracingNotifier::new();

    let session = match resolver.require_role(Role::Distributor, &mut history, &notifier) {
        Ok(session) => session,
        Err(reason) => bail!("not authorized: {reason} (back to /login)"),
    };

    let mut form = FormController::new(FormSchema::create_retailer());
    form.set_value("name", name)?;
    form.set_value("email", email)?;
    form.set_value("password", password)?;
    form.set_value("phone", phone)?;
    form.set_value("address", address)?;

    match form.begin_submit() {
        SubmitOutcome::Accepted => {},
        SubmitOutcome::Invalid => return report_validation_errors(form.field_errors()),
        SubmitOutcome::AlreadyInFlight => bail!("a submission is already in flight"),
    }

    // The payload combines the validated fields with the gated identity.
    let response = match CreateUserRequest::assemble(&session.claims, form.values()) {
        Ok(payload) => api.create_user(&session.token, &payload),
        Err(e) => Err(ApiError::InvalidInput {
            field: "claims",
            reason: e.to_string(),
        }),
    };

    let result = form.complete_submit(
        response,
        "Retailer created successfully",
        "Failed to create retailer",
        &notifier,
    )?;

    match result {
        SubmitResult::Succeeded { message } => {
            println!("{message}");
            Ok(())
        },
        SubmitResult::Failed { message } => bail!("{message}"),
    }
}

#[cfg(test)]
mod tests {
    use base64::Engine as _;
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;
    use paybazar_core::{FixedTimeSource, MemoryStore, MockPanelApi};

    use super::*;

    fn distributor_resolver() -> SessionResolver<MemoryStore, FixedTimeSource> {
        let payload = serde_json::json!({
            "data": {
                "admin_id": "admin-1",
                "master_distributor_id": "md-1",
                "distributor_id": "d-9",
            },
            "exp": 2_000_000_000u64,
        });
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"none","typ":"JWT"}"#);
        let body = URL_SAFE_NO_PAD.encode(payload.to_string().as_bytes());
        let token = format!("{header}.{body}.sig");

        let resolver =
            SessionResolver::with_time_source(MemoryStore::new(), FixedTimeSource(1_700_000_000));
        resolver
            .login(&token, Role::Distributor, "shop@example.com")
            .unwrap();
        resolver
    }

    #[test]
    fn test_create_submits_assembled_payload() {
        let resolver = distributor_resolver();
        let api = MockPanelApi::new();

        create(
            &resolver,
            &api,
            "Ramesh Traders",
            "ramesh@traders.com",
            "secret1",
            "9876543210",
            "123 Main Street, Bengaluru",
        )
        .unwrap();

        assert_eq!(api.call_count(), 1);
        let call = &api.calls()[0];
        assert_eq!(call.path, "/distributor/create/user");
        assert_eq!(call.body["distributor_id"], "d-9");
        assert_eq!(call.body["user_name"], "Ramesh Traders");
        assert_eq!(call.body["user_phone"], "9876543210");
    }

    #[test]
    fn test_create_rejects_international_phone() {
        let resolver = distributor_resolver();
        let api = MockPanelApi::new();

        // The retailer form wants the 10-digit local pattern.
        let result = create(
            &resolver,
            &api,
            "Ramesh Traders",
            "ramesh@traders.com",
            "secret1",
            "+919876543210",
            "123 Main Street, Bengaluru",
        );

        assert!(result.is_err());
        assert_eq!(api.call_count(), 0);
    }
}
