//! Form lifecycle error types.

use thiserror::Error;

/// Errors from driving a form's lifecycle.
#[derive(Debug, Error)]
pub enum FormError {
    /// The requested event is not valid in the current state.
    #[error("invalid transition from {from_state} via {event}")]
    InvalidTransition {
        /// Name of the state the form was in.
        from_state: &'static str,
        /// The event that was attempted.
        event: &'static str,
    },
}
