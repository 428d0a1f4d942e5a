//! Submission state and the messages shown for each outcome

use common::user_api::{BackendError, RegisterError};

use super::fields::{Field, FieldErrors};

/// Prefix of every failure message
pub const FAILURE_PREFIX: &str = "注册请求失败";

/// Message shown once the account is created
pub const SUCCESS_MESSAGE: &str = "注册成功！正在跳转到登录页面...";

/// Detail used when the failure carries nothing readable
pub const UNKNOWN_FAILURE_DETAIL: &str = "网络错误，请稍后重试";

/// Where the form is in its submit cycle
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SubmissionStatus {
    #[default]
    Idle,
    Submitting,
    Success {
        message: String,
    },
    Failed {
        message: String,
        fields: FieldErrors,
    },
}

impl SubmissionStatus {
    pub fn success() -> Self {
        SubmissionStatus::Success {
            message: SUCCESS_MESSAGE.to_string(),
        }
    }

    pub fn failed(detail: &str, fields: FieldErrors) -> Self {
        SubmissionStatus::Failed {
            message: failure_message(detail),
            fields,
        }
    }

    /// Build the failed state for a rejected registration call
    pub fn from_register_error(err: &RegisterError) -> Self {
        match err {
            RegisterError::Backend(backend) => backend_failure(backend),
            RegisterError::Unknown(_) => {
                Self::failed(UNKNOWN_FAILURE_DETAIL, FieldErrors::default())
            }
        }
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self, SubmissionStatus::Submitting)
    }

    /// Whether the status is the outcome of a finished attempt
    pub fn is_settled(&self) -> bool {
        matches!(
            self,
            SubmissionStatus::Success { .. } | SubmissionStatus::Failed { .. }
        )
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            SubmissionStatus::Success { message } | SubmissionStatus::Failed { message, .. } => {
                Some(message.as_str())
            }
            _ => None,
        }
    }

    /// Drop the error flag of `field`, keeping the message
    pub fn clear_field_error(&mut self, field: Field) {
        if let SubmissionStatus::Failed { fields, .. } = self {
            fields.clear(field);
        }
    }

    pub fn field_errors(&self) -> FieldErrors {
        match self {
            SubmissionStatus::Failed { fields, .. } => *fields,
            _ => FieldErrors::default(),
        }
    }
}

/// `注册请求失败: {detail}`
pub fn failure_message(detail: &str) -> String {
    format!("{}: {}", FAILURE_PREFIX, detail)
}

fn backend_failure(backend: &BackendError) -> SubmissionStatus {
    let mut detail = if backend.message.is_empty() {
        UNKNOWN_FAILURE_DETAIL.to_string()
    } else {
        backend.message.clone()
    };

    let mut fields = FieldErrors::default();
    let mut field_detail = None;

    if let Some(errors) = &backend.errors {
        for field in Field::ALL {
            if !errors.contains_key(field.api_name()) {
                continue;
            }
            fields.flag(field);
            if field_detail.is_none() {
                field_detail = backend.first_field_error(field.api_name());
            }
        }
    }

    if let Some(first) = field_detail {
        detail = format!("{}: {}", detail, first);
    }

    SubmissionStatus::failed(&detail, fields)
}
