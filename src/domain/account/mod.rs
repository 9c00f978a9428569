//! Account module - sign-in, registration and password change forms.

mod record;
mod validation;

pub use record::AccountRecord;
pub use validation::{LoginForm, PasswordChangeForm, RegistrationForm, RegistrationPolicy};
