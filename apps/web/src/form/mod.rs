//! Registration form controller
//!
//! The controller owns the state behind the registration page: the four
//! inputs, the submission status, the password input modes and the redirect
//! scheduled after a successful registration. Error flags and the strength
//! label are derived from that state on every read.

pub mod fields;
pub mod status;
pub mod strength;
pub mod validation;

use std::sync::Arc;
use std::time::Duration;

use common::user_api::{BackendError, RegisterError, UserApi};
use tokio::sync::Mutex;
use tracing::{error, info, warn};

use crate::navigation::{Navigator, RedirectTimer};
use crate::routes::Route;

pub use fields::{
    Field, FieldErrors, InputMode, PasswordField, PasswordVisibility, RegistrationInput,
};
pub use status::SubmissionStatus;
pub use strength::{PasswordStrength, compute_strength};
pub use validation::{ValidationError, validate};

/// Result of a call to [`RegistrationForm::submit`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Account created, redirect scheduled
    Registered,
    /// Refused locally, nothing was sent
    Invalid(ValidationError),
    /// The backend refused the registration or could not be reached
    Rejected(RegisterError),
    /// Another submission is still outstanding
    InFlight,
    /// The form was torn down
    Closed,
}

/// Severity of the alert region
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
}

/// Message shown in the form's alert region
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub severity: Severity,
    pub message: String,
}

impl Alert {
    /// Accessibility role of the alert region
    pub const ROLE: &'static str = "alert";
}

/// Everything needed to render the form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormView {
    pub input: RegistrationInput,
    pub alert: Option<Alert>,
    pub field_errors: FieldErrors,
    pub strength: Option<PasswordStrength>,
    pub visibility: PasswordVisibility,
    pub submit_enabled: bool,
}

#[derive(Debug, Default)]
struct FormState {
    input: RegistrationInput,
    status: SubmissionStatus,
    visibility: PasswordVisibility,
    redirect: Option<RedirectTimer>,
    closed: bool,
}

struct Inner<A, N> {
    api: A,
    navigator: Arc<N>,
    redirect_delay: Duration,
    state: Mutex<FormState>,
}

/// Registration form controller
///
/// Cloning yields another handle to the same form. Dropping the last handle
/// cancels a pending redirect.
pub struct RegistrationForm<A, N> {
    inner: Arc<Inner<A, N>>,
}

impl<A, N> Clone for RegistrationForm<A, N> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<A, N> RegistrationForm<A, N>
where
    A: UserApi,
    N: Navigator,
{
    /// Create a new, empty registration form
    pub fn new(api: A, navigator: Arc<N>, redirect_delay: Duration) -> Self {
        Self {
            inner: Arc::new(Inner {
                api,
                navigator,
                redirect_delay,
                state: Mutex::new(FormState::default()),
            }),
        }
    }

    /// Update one input
    ///
    /// A settled outcome is cleared so no stale error survives the edit.
    /// While submitting, the edit is compared with the sent values once the
    /// response arrives.
    pub async fn set_field(&self, field: Field, value: impl Into<String>) {
        let mut state = self.inner.state.lock().await;
        state.input.set(field, value.into());

        if state.status.is_settled() {
            state.status = SubmissionStatus::Idle;
        }
    }

    pub async fn toggle_password_visibility(&self, field: PasswordField) {
        let mut state = self.inner.state.lock().await;
        state.visibility.toggle(field);
    }

    pub async fn input_mode(&self, field: PasswordField) -> InputMode {
        self.inner.state.lock().await.visibility.mode(field)
    }

    /// Strength of the current password, none while it is empty
    pub async fn strength(&self) -> Option<PasswordStrength> {
        let state = self.inner.state.lock().await;
        strength_of(&state.input)
    }

    pub async fn status(&self) -> SubmissionStatus {
        self.inner.state.lock().await.status.clone()
    }

    pub async fn field_errors(&self) -> FieldErrors {
        self.inner.state.lock().await.status.field_errors()
    }

    /// Whether a redirect is scheduled and has not run yet
    pub async fn redirect_pending(&self) -> bool {
        let state = self.inner.state.lock().await;
        state
            .redirect
            .as_ref()
            .is_some_and(|timer| !timer.is_finished())
    }

    pub async fn snapshot(&self) -> FormView {
        let state = self.inner.state.lock().await;

        let alert = match &state.status {
            SubmissionStatus::Success { message } => Some(Alert {
                severity: Severity::Success,
                message: message.clone(),
            }),
            SubmissionStatus::Failed { message, .. } => Some(Alert {
                severity: Severity::Error,
                message: message.clone(),
            }),
            _ => None,
        };

        FormView {
            input: state.input.clone(),
            alert,
            field_errors: state.status.field_errors(),
            strength: strength_of(&state.input),
            visibility: state.visibility,
            submit_enabled: !state.status.is_submitting() && !state.closed,
        }
    }

    /// Validate the form and, if it passes, send the registration
    ///
    /// The lock is released while the request is outstanding so the view
    /// can keep rendering; a second submit during that time is refused.
    pub async fn submit(&self) -> SubmitOutcome {
        let payload = {
            let mut state = self.inner.state.lock().await;

            if state.closed {
                return SubmitOutcome::Closed;
            }

            if state.status.is_submitting() {
                warn!("Registration already in flight, ignoring submit");
                return SubmitOutcome::InFlight;
            }

            if let Err(err) = validate(&state.input) {
                warn!("Registration form rejected locally: {}", err);
                state.status = SubmissionStatus::failed(&err.to_string(), err.field_errors());
                return SubmitOutcome::Invalid(err);
            }

            state.status = SubmissionStatus::Submitting;
            state.input.to_payload()
        };

        info!("Submitting registration for email: {}", payload.email);
        let result = self.inner.api.register(&payload).await;

        let mut state = self.inner.state.lock().await;

        let result = result.and_then(|response| {
            if response.is_success() {
                Ok(response)
            } else {
                Err(RegisterError::Backend(BackendError {
                    code: response.code,
                    message: response.message,
                    errors: None,
                }))
            }
        });

        match result {
            Ok(_) => {
                info!("Registration succeeded for email: {}", payload.email);
                state.status = SubmissionStatus::success();

                if state.closed {
                    info!("Form closed before registration completed, skipping redirect");
                    return SubmitOutcome::Closed;
                }

                // Replacing a previous timer cancels it
                state.redirect = Some(RedirectTimer::schedule(
                    Arc::clone(&self.inner.navigator),
                    Route::Login,
                    self.inner.redirect_delay,
                ));
                SubmitOutcome::Registered
            }
            Err(err) => {
                match &err {
                    RegisterError::Backend(_) => warn!("Registration rejected: {}", err),
                    RegisterError::Unknown(_) => error!("Registration failed: {}", err),
                }
                let mut status = SubmissionStatus::from_register_error(&err);

                // Inputs edited while the request was outstanding are no longer
                // the values the backend judged
                for field in state.input.changed_since(&payload) {
                    status.clear_field_error(field);
                }

                state.status = status;
                SubmitOutcome::Rejected(err)
            }
        }
    }

    /// Release the form, cancelling any pending redirect
    pub async fn teardown(&self) {
        let mut state = self.inner.state.lock().await;
        state.closed = true;

        if let Some(timer) = state.redirect.take() {
            timer.cancel();
        }
    }
}

fn strength_of(input: &RegistrationInput) -> Option<PasswordStrength> {
    if input.password.is_empty() {
        None
    } else {
        Some(compute_strength(&input.password))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::user_api::{ApiResponse, RegisterPayload};
    use std::collections::VecDeque;
    use std::sync::Mutex as StdMutex;

    #[derive(Default)]
    struct StubApi {
        responses: StdMutex<VecDeque<Result<ApiResponse, RegisterError>>>,
        calls: StdMutex<Vec<RegisterPayload>>,
    }

    impl StubApi {
        fn answering(response: Result<ApiResponse, RegisterError>) -> Self {
            let api = Self::default();
            api.responses.lock().unwrap().push_back(response);
            api
        }
    }

    impl UserApi for StubApi {
        async fn register(&self, payload: &RegisterPayload) -> Result<ApiResponse, RegisterError> {
            self.calls.lock().unwrap().push(payload.clone());
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(RegisterError::Unknown("no response queued".to_string())))
        }
    }

    #[derive(Default)]
    struct StubNavigator {
        visited: StdMutex<Vec<Route>>,
    }

    impl Navigator for StubNavigator {
        fn navigate(&self, route: Route) {
            self.visited.lock().unwrap().push(route);
        }
    }

    fn new_form(api: StubApi) -> (RegistrationForm<StubApi, StubNavigator>, Arc<StubNavigator>) {
        let navigator = Arc::new(StubNavigator::default());
        let form = RegistrationForm::new(api, navigator.clone(), Duration::from_millis(2000));
        (form, navigator)
    }

    async fn fill(form: &RegistrationForm<StubApi, StubNavigator>, password: &str, confirm: &str) {
        form.set_field(Field::Nickname, "测试用户").await;
        form.set_field(Field::Email, "test@example.com").await;
        form.set_field(Field::Password, password).await;
        form.set_field(Field::ConfirmPassword, confirm).await;
    }

    #[tokio::test]
    async fn test_initial_view() {
        let (form, _) = new_form(StubApi::default());
        let view = form.snapshot().await;

        assert_eq!(view.alert, None);
        assert!(!view.field_errors.any());
        assert_eq!(view.strength, None);
        assert_eq!(view.visibility, PasswordVisibility::default());
        assert!(view.submit_enabled);
        assert_eq!(form.status().await, SubmissionStatus::Idle);
    }

    #[tokio::test]
    async fn test_edit_clears_failure() {
        let (form, _) = new_form(StubApi::default());

        let outcome = form.submit().await;
        assert!(matches!(outcome, SubmitOutcome::Invalid(_)));
        assert!(form.field_errors().await.any());

        form.set_field(Field::Nickname, "测试用户").await;
        assert_eq!(form.status().await, SubmissionStatus::Idle);
        assert!(!form.field_errors().await.any());
        assert_eq!(form.snapshot().await.alert, None);
    }

    #[tokio::test]
    async fn test_non_success_code_is_a_failure() {
        let api = StubApi::answering(Ok(ApiResponse {
            code: 50001,
            message: "注册功能暂未开放".to_string(),
        }));
        let (form, navigator) = new_form(api);
        fill(&form, "Password123!", "Password123!").await;

        let outcome = form.submit().await;
        assert!(matches!(outcome, SubmitOutcome::Rejected(RegisterError::Backend(_))));
        assert_eq!(
            form.status().await.message(),
            Some("注册请求失败: 注册功能暂未开放")
        );
        assert!(!form.redirect_pending().await);
        assert!(navigator.visited.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_failure_keeps_form_usable() {
        let api = StubApi::answering(Err(RegisterError::Unknown("connection reset".to_string())));
        let (form, _) = new_form(api);
        fill(&form, "Password123!", "Password123!").await;

        form.submit().await;
        let view = form.snapshot().await;
        assert_eq!(
            view.alert,
            Some(Alert {
                severity: Severity::Error,
                message: "注册请求失败: 网络错误，请稍后重试".to_string(),
            })
        );
        assert!(!view.field_errors.any());
        assert!(view.submit_enabled);
    }

    #[tokio::test]
    async fn test_submit_after_teardown_is_refused() {
        let api = StubApi::default();
        let (form, _) = new_form(api);
        fill(&form, "Password123!", "Password123!").await;

        form.teardown().await;
        assert_eq!(form.submit().await, SubmitOutcome::Closed);
        assert!(form.inner.api.calls.lock().unwrap().is_empty());
        assert!(!form.snapshot().await.submit_enabled);
    }

    #[tokio::test]
    async fn test_strength_follows_password() {
        let (form, _) = new_form(StubApi::default());

        form.set_field(Field::Password, "123").await;
        assert_eq!(form.strength().await, Some(PasswordStrength::Weak));

        form.set_field(Field::Password, "Password123").await;
        assert_eq!(form.strength().await, Some(PasswordStrength::Medium));

        form.set_field(Field::Password, "Password123!@#").await;
        assert_eq!(form.strength().await, Some(PasswordStrength::Strong));

        form.set_field(Field::Password, "").await;
        assert_eq!(form.strength().await, None);
    }
}
