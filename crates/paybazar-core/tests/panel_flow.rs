//! End-to-end flows over the in-memory store and the mock API:
//! resolve → gate → validate → assemble → submit.

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use paybazar_core::{
    ApiResponse, FixedTimeSource, FormController, FormSchema, FundRequest, MemoryStore,
    MockPanelApi, Navigator, PanelApi, RecordingNotifier, Resolution, Role, Route, RouteHistory,
    SessionError, SessionResolver, SessionStore, StorageKey, SubmitOutcome, SubmitResult,
};

const NOW: u64 = 1_700_000_000;

fn token_for(role: Role, exp: u64) -> String {
    let data = match role {
        Role::Master => serde_json::json!({
            "admin_id": "admin-1",
            "master_distributor_id": "md-1",
        }),
        Role::Distributor => serde_json::json!({
            "admin_id": "admin-1",
            "master_distributor_id": "md-1",
            "distributor_id": "d-9",
        }),
    };
    let payload = serde_json::json!({ "data": data, "exp": exp });
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"none","typ":"JWT"}"#);
    let body = URL_SAFE_NO_PAD.encode(payload.to_string().as_bytes());
    format!("{header}.{body}.sig")
}

fn logged_in_resolver(
    role: Role,
    exp: u64,
) -> SessionResolver<MemoryStore, FixedTimeSource> {
    let resolver = SessionResolver::with_time_source(MemoryStore::new(), FixedTimeSource(NOW));
    resolver
        .login(&token_for(role, exp), role, "user@example.com")
        .unwrap();
    resolver
}

/// Scenario C: valid distributor-creation fields flow through validation
/// to exactly one outbound call.
#[test]
fn valid_creation_reaches_outbound_call() {
    let resolver = logged_in_resolver(Role::Master, NOW + 3_600);
    let mut history = RouteHistory::new();
    let notifier = RecordingNotifier::new();
    let api = MockPanelApi::new();

    let session = resolver
        .require_role(Role::Master, &mut history, &notifier)
        .unwrap();

    let mut form = FormController::new(FormSchema::create_distributor());
    form.set_value("name", "Jane Smith").unwrap();
    form.set_value("email", "jane@x.com").unwrap();
    form.set_value("password", "secret1").unwrap();
    form.set_value("phone", "9876543210").unwrap();

    assert!(form.validate().is_empty());

    let result = form
        .submit("Distributor created", "Failed", &notifier, |values| {
            let payload = paybazar_core::CreateUserRequest::assemble(&session.claims, values)
                .map_err(|e| paybazar_core::ApiError::InvalidInput {
                    field: "claims",
                    reason: e.to_string(),
                })?;
            api.create_user(&session.token, &payload)
        })
        .unwrap();

    assert!(matches!(result, Some(SubmitResult::Succeeded { .. })));
    assert_eq!(api.call_count(), 1);
    assert!(form.values().is_empty(), "success resets the form");
}

/// Scenario D: an expired token resolves Unauthenticated, the gate lands
/// on /login, and every storage key is gone.
#[test]
fn expired_session_redirects_and_clears() {
    let resolver = logged_in_resolver(Role::Distributor, NOW - 1);
    let mut history = RouteHistory::new();
    let notifier = RecordingNotifier::new();

    assert!(matches!(
        resolver.resolve(),
        Resolution::Unauthenticated {
            reason: SessionError::Expired { .. }
        }
    ));

    let result = resolver.require_role(Role::Distributor, &mut history, &notifier);
    assert!(matches!(result, Err(SessionError::Expired { .. })));

    assert_eq!(history.current(), Some(Route::Login));
    for key in StorageKey::ALL {
        assert_eq!(resolver.store().get(key).unwrap(), None);
    }
    assert_eq!(notifier.notices()[0].title, "Session expired");
}

/// Scenario E: a second submit while the first is pending is ignored;
/// exactly one outbound call is recorded.
#[test]
fn concurrent_fund_submit_is_ignored() {
    let resolver = logged_in_resolver(Role::Distributor, NOW + 3_600);
    let mut history = RouteHistory::new();
    let notifier = RecordingNotifier::new();
    let api = MockPanelApi::new();

    let session = resolver
        .require_authenticated(&mut history, &notifier)
        .unwrap();

    let mut form = FormController::new(FormSchema::fund_request());
    form.set_value("amount", "2500").unwrap();
    form.set_value("bank_name", "State Bank").unwrap();
    form.set_value("account_number", "000111222333").unwrap();
    form.set_value("ifsc_code", "SBIN0000123").unwrap();
    form.set_value("bank_branch", "MG Road").unwrap();
    form.set_value("utr_number", "UTR123456").unwrap();
    form.set_value("remarks", "Weekly settlement float").unwrap();

    // First activation claims the slot.
    assert_eq!(form.begin_submit(), SubmitOutcome::Accepted);

    // The user mashes the button while the call is pending.
    assert_eq!(form.begin_submit(), SubmitOutcome::AlreadyInFlight);
    assert_eq!(form.begin_submit(), SubmitOutcome::AlreadyInFlight);

    // The pending call completes.
    let payload = FundRequest::assemble(&session.claims, session.role, form.values()).unwrap();
    let response = api.submit_fund_request(&session.token, &payload);
    let result = form
        .complete_submit(response, "Fund Request Submitted", "Request Failed", &notifier)
        .unwrap();

    assert!(matches!(result, SubmitResult::Succeeded { .. }));
    assert_eq!(api.call_count(), 1, "exactly one outbound call");
    assert_eq!(api.calls()[0].body["requester_type"], "DISTRIBUTOR");
    assert_eq!(api.calls()[0].body["requester_id"], "d-9");
}

/// Remote failure keeps the values so the user can retry, and the
/// destructive notice carries the remote message.
#[test]
fn remote_failure_preserves_values_for_retry() {
    let resolver = logged_in_resolver(Role::Master, NOW + 3_600);
    let mut history = RouteHistory::new();
    let notifier = RecordingNotifier::new();
    let api = MockPanelApi::new();
    api.set_response(ApiResponse {
        status: "error".to_string(),
        message: Some("Insufficient wallet balance".to_string()),
    });

    let session = resolver
        .require_authenticated(&mut history, &notifier)
        .unwrap();

    let mut form = FormController::new(FormSchema::fund_request());
    form.set_value("amount", "999999").unwrap();
    form.set_value("bank_name", "State Bank").unwrap();
    form.set_value("account_number", "000111222333").unwrap();
    form.set_value("ifsc_code", "SBIN0000123").unwrap();
    form.set_value("bank_branch", "MG Road").unwrap();
    form.set_value("utr_number", "UTR123456").unwrap();
    form.set_value("remarks", "Festival float top-up").unwrap();

    let result = form
        .submit("Submitted", "Request Failed", &notifier, |values| {
            let payload =
                FundRequest::assemble(&session.claims, session.role, values).map_err(|e| {
                    paybazar_core::ApiError::InvalidInput {
                        field: "claims",
                        reason: e.to_string(),
                    }
                })?;
            api.submit_fund_request(&session.token, &payload)
        })
        .unwrap();

    match result {
        Some(SubmitResult::Failed { message }) => {
            assert_eq!(message, "Insufficient wallet balance");
        },
        other => panic!("expected remote failure, got {other:?}"),
    }
    assert_eq!(form.values().get("amount"), "999999");
    assert_eq!(notifier.notices()[0].title, "Request Failed");
}
