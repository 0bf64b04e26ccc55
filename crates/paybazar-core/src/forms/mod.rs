//! Declarative form validation and the submission state machine.
//!
//! Each form declares a [`FormSchema`]: fields with ordered rules, every
//! rule a pure function of its own field's value. A [`FormController`]
//! owns one form instance and drives it through the lifecycle:
//!
//! ```text
//!                   validate / begin_submit
//!        ┌────────┐      ┌────────────┐
//!        │  Idle  │─────>│ Validating │
//!        └────────┘      └─────┬──────┘
//!             ^                │
//!     (edit)  │        ┌───────┴───────┐
//!        ┌────┴────┐   │               v
//!        │ Invalid │<──┘          ┌─────────┐
//!        └─────────┘              │  Valid  │
//!                                 └────┬────┘
//!                                      │ begin_submit
//!                                      v
//!                                ┌────────────┐
//!             Success / Failed   │ Submitting │──> at most one
//!             both return Idle <─┴────────────┘    in-flight call
//! ```
//!
//! Success resets the values; failure keeps them so the user retries
//! without re-typing. While Submitting, a second submit attempt is a
//! recorded no-op and no second outbound call is issued.

pub mod constraint;
pub mod error;
pub mod lifecycle;
pub mod schema;

pub use constraint::Constraint;
pub use error::FormError;
pub use lifecycle::{FormController, FormState, SubmitOutcome, SubmitResult};
pub use schema::{FieldSchema, FormSchema, FormValues, Rule, ValidationErrors};
