//! Per-form submission state machine.
//!
//! One [`FormController`] exists per form instance and owns the values,
//! the field errors, and the lifecycle state. Submission is split at the
//! asynchronous boundary: [`FormController::begin_submit`] validates and
//! claims the in-flight slot, the caller performs the outbound call, and
//! [`FormController::complete_submit`] applies the result. While a
//! submission is in flight a second `begin_submit` is a recorded no-op,
//! which is the only mutual exclusion the panel needs: at most one
//! outbound call per form instance.

use tracing::debug;

use super::error::FormError;
use super::schema::{FormSchema, FormValues, ValidationErrors};
use crate::api::error::GENERIC_FAILURE;
use crate::api::{ApiError, ApiResponse};
use crate::notify::{Notice, Notifier};

/// Lifecycle state of one form instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormState {
    /// Interactive; accepting edits.
    Idle,
    /// Validation in progress.
    Validating,
    /// Validation failed; errors recorded.
    Invalid,
    /// Validation passed; submission not yet started.
    Valid,
    /// Outbound call in flight.
    Submitting,
}

impl FormState {
    /// Returns the state name used in transition errors.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::Validating => "Validating",
            Self::Invalid => "Invalid",
            Self::Valid => "Valid",
            Self::Submitting => "Submitting",
        }
    }
}

/// Outcome of attempting to start a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Validation passed; the form is Submitting and the caller must
    /// perform the outbound call, then invoke
    /// [`FormController::complete_submit`].
    Accepted,
    /// Validation failed; field errors are recorded and the form is back
    /// at Idle.
    Invalid,
    /// A submission is already in flight; nothing was done.
    AlreadyInFlight,
}

/// Result of a completed submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitResult {
    /// The collaborator accepted the payload; values were reset.
    Succeeded {
        /// Message surfaced to the user.
        message: String,
    },
    /// The collaborator rejected the payload or the call failed; values
    /// were kept for retry.
    Failed {
        /// Message surfaced to the user.
        message: String,
    },
}

/// Drives one form instance through its lifecycle.
#[derive(Debug)]
pub struct FormController {
    schema: FormSchema,
    values: FormValues,
    field_errors: ValidationErrors,
    state: FormState,
}

impl FormController {
    /// Creates an idle controller for `schema` with empty values.
    #[must_use]
    pub fn new(schema: FormSchema) -> Self {
        Self {
            schema,
            values: FormValues::new(),
            field_errors: ValidationErrors::new(),
            state: FormState::Idle,
        }
    }

    /// Returns the current lifecycle state.
    #[must_use]
    pub const fn state(&self) -> &FormState {
        &self.state
    }

    /// Returns the current values.
    #[must_use]
    pub const fn values(&self) -> &FormValues {
        &self.values
    }

    /// Returns the recorded field errors from the last validation.
    ///
    /// At most one message per field, keyed by field name.
    #[must_use]
    pub const fn field_errors(&self) -> &ValidationErrors {
        &self.field_errors
    }

    /// Sets a field value.
    ///
    /// Editing an `Invalid` or `Valid` form returns it to `Idle`: the
    /// previous validation outcome no longer describes the values.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::InvalidTransition`] while a submission is in
    /// flight; the form is not interactive then.
    pub fn set_value(
        &mut self,
        field: &'static str,
        value: impl Into<String>,
    ) -> Result<(), FormError> {
        if self.state == FormState::Submitting {
            return Err(FormError::InvalidTransition {
                from_state: self.state.name(),
                event: "set_value",
            });
        }
        self.values.set(field, value);
        self.state = FormState::Idle;
        Ok(())
    }

    /// Validates the current values without attempting submission.
    ///
    /// Runs Validating and rests at `Invalid` or `Valid`, recording the
    /// field errors. Useful for surfacing errors as the user types.
    #[must_use]
    pub fn validate(&mut self) -> &ValidationErrors {
        self.state = FormState::Validating;
        self.field_errors = self.schema.validate(&self.values);
        self.state = if self.field_errors.is_empty() {
            FormState::Valid
        } else {
            FormState::Invalid
        };
        &self.field_errors
    }

    /// Validates and, when clean, claims the in-flight submission slot.
    ///
    /// A call while Submitting changes nothing and issues no outbound
    /// call; the caller simply observes `AlreadyInFlight`.
    #[must_use]
    pub fn begin_submit(&mut self) -> SubmitOutcome {
        if self.state == FormState::Submitting {
            debug!(form = self.schema.name(), "submit ignored: already in flight");
            return SubmitOutcome::AlreadyInFlight;
        }

        if self.validate().is_empty() {
            self.state = FormState::Submitting;
            SubmitOutcome::Accepted
        } else {
            SubmitOutcome::Invalid
        }
    }

    /// Applies the result of the outbound call.
    ///
    /// Success resets the values to an empty Idle form and raises an info
    /// notice. Failure returns to Idle with the values intact and raises
    /// a destructive notice carrying the remote message when one exists,
    /// else the generic fallback.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::InvalidTransition`] when no submission is in
    /// flight.
    pub fn complete_submit(
        &mut self,
        result: Result<ApiResponse, ApiError>,
        success_title: &str,
        failure_title: &str,
        notifier: &dyn Notifier,
    ) -> Result<SubmitResult, FormError> {
        if self.state != FormState::Submitting {
            return Err(FormError::InvalidTransition {
                from_state: self.state.name(),
                event: "complete_submit",
            });
        }

        let outcome = match result {
            Ok(response) if response.is_success() => {
                let message = response
                    .message
                    .unwrap_or_else(|| "Submitted successfully.".to_string());
                self.values.reset();
                self.field_errors.clear();
                notifier.notify(Notice::info(success_title, message.clone()));
                SubmitResult::Succeeded { message }
            },
            Ok(response) => {
                let message = response
                    .message
                    .unwrap_or_else(|| GENERIC_FAILURE.to_string());
                notifier.notify(Notice::destructive(failure_title, message.clone()));
                SubmitResult::Failed { message }
            },
            Err(error) => {
                let message = error.user_message();
                notifier.notify(Notice::destructive(failure_title, message.clone()));
                SubmitResult::Failed { message }
            },
        };

        self.state = FormState::Idle;
        Ok(outcome)
    }

    /// Convenience wrapper: begin, call, complete.
    ///
    /// `send` runs only when validation passes and no submission is in
    /// flight.
    ///
    /// # Errors
    ///
    /// Propagates [`FormError`] from the completion step.
    pub fn submit<F>(
        &mut self,
        success_title: &str,
        failure_title: &str,
        notifier: &dyn Notifier,
        send: F,
    ) -> Result<Option<SubmitResult>, FormError>
    where
        F: FnOnce(&FormValues) -> Result<ApiResponse, ApiError>,
    {
        match self.begin_submit() {
            SubmitOutcome::Accepted => {},
            SubmitOutcome::Invalid | SubmitOutcome::AlreadyInFlight => return Ok(None),
        }

        let result = send(&self.values);
        self.complete_submit(result, success_title, failure_title, notifier)
            .map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::RecordingNotifier;

    fn filled_retailer_controller() -> FormController {
        let mut controller = FormController::new(FormSchema::create_retailer());
        controller.set_value("name", "Ramesh Traders").unwrap();
        controller.set_value("email", "ramesh@traders.com").unwrap();
        controller.set_value("password", "secret1").unwrap();
        controller.set_value("phone", "9876543210").unwrap();
        controller
            .set_value("address", "123 Main Street, Bengaluru")
            .unwrap();
        controller
    }

    fn success_response() -> ApiResponse {
        ApiResponse {
            status: "success".to_string(),
            message: Some("Created.".to_string()),
        }
    }

    #[test]
    fn test_begin_submit_with_invalid_values() {
        let mut controller = FormController::new(FormSchema::create_retailer());
        let outcome = controller.begin_submit();

        assert_eq!(outcome, SubmitOutcome::Invalid);
        assert_eq!(*controller.state(), FormState::Invalid);
        assert!(!controller.field_errors().is_empty());

        // Editing returns the form to Idle.
        controller.set_value("name", "Ramesh Traders").unwrap();
        assert_eq!(*controller.state(), FormState::Idle);
    }

    #[test]
    fn test_begin_submit_claims_slot() {
        let mut controller = filled_retailer_controller();
        assert_eq!(controller.begin_submit(), SubmitOutcome::Accepted);
        assert_eq!(*controller.state(), FormState::Submitting);
    }

    #[test]
    fn test_second_submit_is_noop_while_in_flight() {
        let mut controller = filled_retailer_controller();
        assert_eq!(controller.begin_submit(), SubmitOutcome::Accepted);

        // The first call is still pending.
        assert_eq!(controller.begin_submit(), SubmitOutcome::AlreadyInFlight);
        assert_eq!(*controller.state(), FormState::Submitting);
    }

    #[test]
    fn test_edit_while_submitting_rejected() {
        let mut controller = filled_retailer_controller();
        assert_eq!(controller.begin_submit(), SubmitOutcome::Accepted);

        let result = controller.set_value("name", "Other");
        assert!(matches!(
            result,
            Err(FormError::InvalidTransition {
                from_state: "Submitting",
                event: "set_value",
            })
        ));
    }

    #[test]
    fn test_success_resets_values() {
        let mut controller = filled_retailer_controller();
        let notifier = RecordingNotifier::new();
        assert_eq!(controller.begin_submit(), SubmitOutcome::Accepted);

        let result = controller
            .complete_submit(Ok(success_response()), "Created", "Failed", &notifier)
            .unwrap();

        assert!(matches!(result, SubmitResult::Succeeded { .. }));
        assert_eq!(*controller.state(), FormState::Idle);
        assert!(controller.values().is_empty());
        assert_eq!(notifier.notices()[0].title, "Created");
    }

    #[test]
    fn test_remote_failure_keeps_values() {
        let mut controller = filled_retailer_controller();
        let notifier = RecordingNotifier::new();
        assert_eq!(controller.begin_submit(), SubmitOutcome::Accepted);

        let response = ApiResponse {
            status: "error".to_string(),
            message: Some("Phone already registered".to_string()),
        };
        let result = controller
            .complete_submit(Ok(response), "Created", "Failed", &notifier)
            .unwrap();

        match result {
            SubmitResult::Failed { message } => {
                assert_eq!(message, "Phone already registered");
            },
            SubmitResult::Succeeded { .. } => panic!("expected failure"),
        }
        assert_eq!(*controller.state(), FormState::Idle);
        // The user retries without re-typing.
        assert_eq!(controller.values().get("name"), "Ramesh Traders");
    }

    #[test]
    fn test_transport_failure_uses_generic_fallback() {
        let mut controller = filled_retailer_controller();
        let notifier = RecordingNotifier::new();
        assert_eq!(controller.begin_submit(), SubmitOutcome::Accepted);

        let result = controller
            .complete_submit(
                Err(ApiError::Transport {
                    message: "connection refused".to_string(),
                }),
                "Created",
                "Failed",
                &notifier,
            )
            .unwrap();

        match result {
            SubmitResult::Failed { message } => assert_eq!(message, GENERIC_FAILURE),
            SubmitResult::Succeeded { .. } => panic!("expected failure"),
        }
    }

    #[test]
    fn test_complete_without_begin_is_invalid_transition() {
        let mut controller = filled_retailer_controller();
        let notifier = RecordingNotifier::new();

        let result =
            controller.complete_submit(Ok(success_response()), "Created", "Failed", &notifier);
        assert!(matches!(
            result,
            Err(FormError::InvalidTransition {
                from_state: "Idle",
                event: "complete_submit",
            })
        ));
    }

    #[test]
    fn test_submit_convenience_happy_path() {
        let mut controller = filled_retailer_controller();
        let notifier = RecordingNotifier::new();

        let result = controller
            .submit("Created", "Failed", &notifier, |_values| {
                Ok(success_response())
            })
            .unwrap();

        assert!(matches!(result, Some(SubmitResult::Succeeded { .. })));
        assert!(controller.values().is_empty());
    }

    #[test]
    fn test_submit_convenience_skips_send_when_invalid() {
        let mut controller = FormController::new(FormSchema::fund_request());
        let notifier = RecordingNotifier::new();
        let mut called = false;

        let result = controller
            .submit("Submitted", "Failed", &notifier, |_values| {
                called = true;
                Ok(success_response())
            })
            .unwrap();

        assert_eq!(result, None);
        assert!(!called, "send must not run for invalid values");
    }

    #[test]
    fn test_validate_rests_at_invalid_then_valid() {
        let mut controller = FormController::new(FormSchema::login());
        controller.set_value("email", "bad-email").unwrap();
        controller.set_value("password", "secret1").unwrap();
        controller.set_value("role", "master").unwrap();

        let errors = controller.validate().clone();
        assert_eq!(errors.get("email"), Some(&"Invalid email address"));
        assert_eq!(*controller.state(), FormState::Invalid);

        // Fixing the field clears the error on the next validation.
        controller.set_value("email", "jane@x.com").unwrap();
        assert_eq!(*controller.state(), FormState::Idle);
        assert!(controller.validate().is_empty());
        assert_eq!(*controller.state(), FormState::Valid);
    }
}
