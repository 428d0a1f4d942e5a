//! WHY Music web client
//!
//! Client-side logic of the WHY Music web pages. The registration page is
//! driven by [`form::RegistrationForm`], which validates the inputs, calls
//! the backend user API and redirects to the login page once the account
//! exists.

pub mod form;
pub mod navigation;
pub mod routes;
pub mod telemetry;

pub use form::RegistrationForm;
pub use navigation::{Navigator, RedirectTimer};
pub use routes::Route;
