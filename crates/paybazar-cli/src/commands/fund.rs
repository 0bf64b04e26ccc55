//! Fund-request command (either role).

use anyhow::{Result, bail};
use paybazar_core::{
    ApiError, FormController, FormSchema, FundRequest, Navigator, PanelApi, RouteHistory,
    SessionResolver, SessionStore, SubmitOutcome, SubmitResult, TimeSource, TracingNotifier,
};

use super::report_validation_errors;

/// Arguments of the fund-request form.
#[derive(Debug)]
pub struct FundArgs {
    /// Amount in rupees.
    pub amount: String,
    /// Bank name.
    pub bank_name: String,
    /// Account number.
    pub account_number: String,
    /// IFSC code.
    pub ifsc_code: String,
    /// Bank branch.
    pub bank_branch: String,
    /// UTR number of the deposit.
    pub utr_number: String,
    /// Free-text remarks.
    pub remarks: String,
}

/// Submits a fund request for the session's role.
pub fn request<S: SessionStore, T: TimeSource>(
    resolver: &SessionResolver<S, T>,
    api: &dyn PanelApi,
    args: FundArgs,
) -> Result<()> {
    let mut history = RouteHistory::new();
    let notifier = TracingNotifier::new();

    let session = match resolver.require_authenticated(&mut history, &notifier) {
        Ok(session) => session,
        Err(reason) => bail!("not authorized: {reason} (back to /login)"),
    };

    let mut form = FormController::new(FormSchema::fund_request());
    form.set_value("amount", args.amount)?;
    form.set_value("bank_name", args.bank_name)?;
    form.set_value("account_number", args.account_number)?;
    form.set_value("ifsc_code", args.ifsc_code)?;
    form.set_value("bank_branch", args.bank_branch)?;
    form.set_value("utr_number", args.utr_number)?;
    form.set_value("remarks", args.remarks)?;

    match form.begin_submit() {
        SubmitOutcome::Accepted => {},
        SubmitOutcome::Invalid => return report_validation_errors(form.field_errors()),
        SubmitOutcome::AlreadyInFlight => bail!("a submission is already in flight"),
    }

    // requester_id / requester_type derive from the session role.
    let response = match FundRequest::assemble(&session.claims, session.role, form.values()) {
        Ok(payload) => api.submit_fund_request(&session.token, &payload),
        Err(e) => Err(ApiError::InvalidInput {
            field: "claims",
            reason: e.to_string(),
        }),
    };

    let result = form.complete_submit(
        response,
        "Fund Request Submitted",
        "Request Failed",
        &notifier,
    )?;

    match result {
        SubmitResult::Succeeded { message } => {
            history.navigate(session.role.dashboard());
            println!("{message} Now at {}", session.role.dashboard());
            Ok(())
        },
        SubmitResult::Failed { message } => bail!("{message}"),
    }
}

#[cfg(test)]
mod tests {
    use base64::Engine as _;
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;
    use paybazar_core::{FixedTimeSource, MemoryStore, MockPanelApi, Role};

    use super::*;

    fn master_resolver() -> SessionResolver<MemoryStore, FixedTimeSource> {
        let payload = serde_json::json!({
            "data": { "admin_id": "admin-1", "master_distributor_id": "md-1" },
            "exp": 2_000_000_000u64,
        });
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"none","typ":"JWT"}"#);
        let body = URL_SAFE_NO_PAD.encode(payload.to_string().as_bytes());
        let token = format!("{header}.{body}.sig");

        let resolver =
            SessionResolver::with_time_source(MemoryStore::new(), FixedTimeSource(1_700_000_000));
        resolver
            .login(&token, Role::Master, "boss@example.com")
            .unwrap();
        resolver
    }

    fn valid_args() -> FundArgs {
        FundArgs {
            amount: "2500".to_string(),
            bank_name: "State Bank".to_string(),
            account_number: "000111222333".to_string(),
            ifsc_code: "SBIN0000123".to_string(),
            bank_branch: "MG Road".to_string(),
            utr_number: "UTR123456".to_string(),
            remarks: "Weekly settlement float".to_string(),
        }
    }

    #[test]
    fn test_request_derives_requester_from_role() {
        let resolver = master_resolver();
        let api = MockPanelApi::new();

        request(&resolver, &api, valid_args()).unwrap();

        assert_eq!(api.call_count(), 1);
        let call = &api.calls()[0];
        assert_eq!(call.path, "/fund/request");
        assert_eq!(call.body["requester_id"], "md-1");
        assert_eq!(call.body["requester_type"], "MASTER_DISTRIBUTOR");
        assert_eq!(call.body["request_status"], "pending");
    }

    #[test]
    fn test_request_rejects_non_positive_amount() {
        let resolver = master_resolver();
        let api = MockPanelApi::new();

        let mut args = valid_args();
        args.amount = "0".to_string();

        let result = request(&resolver, &api, args);
        assert!(result.is_err());
        assert_eq!(api.call_count(), 0);
    }

    #[test]
    fn test_request_without_session_redirects() {
        let resolver =
            SessionResolver::with_time_source(MemoryStore::new(), FixedTimeSource(1_700_000_000));
        let api = MockPanelApi::new();

        let result = request(&resolver, &api, valid_args());
        assert!(result.is_err());
        assert_eq!(api.call_count(), 0);
    }
}
