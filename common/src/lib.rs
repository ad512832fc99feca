//! Contact form rules shared by the browser form and the mail relay.
//!
//! Both sides validate with the functions in [`validation`] and talk to each
//! other with the types in [`wire`], so a rule changed here changes everywhere.

pub mod field;
pub mod validation;
pub mod wire;

pub use field::{Field, FormSubmission};
pub use validation::{
    format_error, validate_email, validate_name, validate_phone, validate_submission,
    ValidationResult,
};
pub use wire::ContactResponse;
