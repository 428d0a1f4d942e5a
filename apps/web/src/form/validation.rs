//! Client-side checks run before a registration request is sent

use thiserror::Error;

use super::fields::{Field, FieldErrors, RegistrationInput};

/// Reasons the form refuses to submit
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// At least one of the four inputs is empty
    #[error("请填写所有必填字段")]
    MissingFields(FieldErrors),

    /// Password and confirmation differ
    #[error("两次输入的密码不一致")]
    PasswordMismatch,
}

impl ValidationError {
    /// Inputs to highlight for this error
    pub fn field_errors(&self) -> FieldErrors {
        match self {
            ValidationError::MissingFields(errors) => *errors,
            ValidationError::PasswordMismatch => FieldErrors::only(Field::ConfirmPassword),
        }
    }
}

/// Check the form before submission
pub fn validate(input: &RegistrationInput) -> Result<(), ValidationError> {
    let empty = input.empty_fields();
    if empty.any() {
        return Err(ValidationError::MissingFields(empty));
    }

    if input.password != input.confirm_password {
        return Err(ValidationError::PasswordMismatch);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(password: &str, confirm_password: &str) -> RegistrationInput {
        RegistrationInput {
            nickname: "测试用户".to_string(),
            email: "test@example.com".to_string(),
            password: password.to_string(),
            confirm_password: confirm_password.to_string(),
        }
    }

    #[test]
    fn test_blank_form_flags_every_field() {
        let err = validate(&RegistrationInput::default()).unwrap_err();

        assert_eq!(err.to_string(), "请填写所有必填字段");
        assert_eq!(err.field_errors().flagged(), Field::ALL.to_vec());
    }

    #[test]
    fn test_missing_takes_precedence_over_mismatch() {
        let mut input = filled("password123", "password456");
        input.email.clear();

        let err = validate(&input).unwrap_err();
        assert_eq!(err, ValidationError::MissingFields(FieldErrors::only(Field::Email)));
    }

    #[test]
    fn test_password_mismatch() {
        let err = validate(&filled("password123", "password456")).unwrap_err();

        assert_eq!(err, ValidationError::PasswordMismatch);
        assert_eq!(err.to_string(), "两次输入的密码不一致");
        assert_eq!(err.field_errors().flagged(), vec![Field::ConfirmPassword]);
    }

    #[test]
    fn test_valid_form() {
        assert!(validate(&filled("Password123!", "Password123!")).is_ok());
    }

    #[test]
    fn test_email_format_is_not_checked() {
        assert!(validate(&filled("pw", "pw")).is_ok());

        let mut input = filled("pw", "pw");
        input.email = "not-an-email".to_string();
        assert!(validate(&input).is_ok());
    }
}
