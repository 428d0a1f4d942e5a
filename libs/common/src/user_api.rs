//! User API client
//!
//! This module defines the contract of the backend user API used by the
//! client apps and an HTTP implementation of it built on reqwest.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use reqwest::{Client, StatusCode, Url};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, info, warn};

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};

/// Path of the account creation endpoint, relative to the API base URL
pub const REGISTER_PATH: &str = "api/user/register";

/// Response code the backend uses for a successful call
pub const SUCCESS_CODE: i64 = 200;

/// Request body for account creation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterPayload {
    pub nickname: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

/// Envelope returned by the backend when a call resolves
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiResponse {
    pub code: i64,
    #[serde(default)]
    pub message: String,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        self.code == SUCCESS_CODE
    }
}

/// Structured error body returned by the backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendError {
    pub code: i64,
    #[serde(default)]
    pub message: String,
    /// Field name to ordered error messages for that field
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<HashMap<String, Vec<String>>>,
}

impl BackendError {
    /// First error message reported for `field`, if any
    pub fn first_field_error(&self, field: &str) -> Option<&str> {
        self.errors
            .as_ref()
            .and_then(|errors| errors.get(field))
            .and_then(|messages| messages.first())
            .map(String::as_str)
    }
}

/// Failure of a registration call
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegisterError {
    /// The backend rejected the request with a structured body
    #[error("backend error {}: {}", .0.code, .0.message)]
    Backend(BackendError),

    /// Transport failure or a response that could not be interpreted
    #[error("unknown failure: {0}")]
    Unknown(String),
}

/// Backend user API
pub trait UserApi: Send + Sync {
    /// Create a new account
    fn register(
        &self,
        payload: &RegisterPayload,
    ) -> impl Future<Output = Result<ApiResponse, RegisterError>> + Send;
}

impl<T: UserApi> UserApi for Arc<T> {
    fn register(
        &self,
        payload: &RegisterPayload,
    ) -> impl Future<Output = Result<ApiResponse, RegisterError>> + Send {
        (**self).register(payload)
    }
}

/// User API over HTTP
#[derive(Debug, Clone)]
pub struct HttpUserApi {
    client: Client,
    register_url: Url,
}

impl HttpUserApi {
    /// Build a new HTTP user API client from the client configuration
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let base_url = config.base_url()?;
        let register_url = join_base(&base_url, REGISTER_PATH)?;

        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()?;

        info!("User API client initialized with URL: {}", register_url);
        Ok(Self {
            client,
            register_url,
        })
    }

    pub fn register_url(&self) -> &Url {
        &self.register_url
    }
}

impl UserApi for HttpUserApi {
    async fn register(&self, payload: &RegisterPayload) -> Result<ApiResponse, RegisterError> {
        info!("Sending registration request for email: {}", payload.email);

        let response = self
            .client
            .post(self.register_url.clone())
            .json(payload)
            .send()
            .await
            .map_err(|e| {
                error!("Registration request failed: {}", e);
                RegisterError::Unknown(e.to_string())
            })?;

        let status = response.status();
        let body = response.bytes().await.map_err(|e| {
            error!("Failed to read registration response body: {}", e);
            RegisterError::Unknown(e.to_string())
        })?;

        interpret_response(status, &body)
    }
}

/// Map a raw HTTP response onto the registration result
pub fn interpret_response(status: StatusCode, body: &[u8]) -> Result<ApiResponse, RegisterError> {
    if status.is_success() {
        return serde_json::from_slice::<ApiResponse>(body).map_err(|e| {
            error!("Unreadable registration response ({}): {}", status, e);
            RegisterError::Unknown(format!("unreadable response body: {}", e))
        });
    }

    match serde_json::from_slice::<BackendError>(body) {
        Ok(backend_error) => {
            warn!(
                "Registration rejected with status {} and code {}",
                status, backend_error.code
            );
            Err(RegisterError::Backend(backend_error))
        }
        Err(_) => {
            error!("Registration failed with unstructured status {}", status);
            Err(RegisterError::Unknown(format!("HTTP status {}", status)))
        }
    }
}

fn join_base(base: &Url, path: &str) -> ClientResult<Url> {
    // Url::join drops the last segment unless the base ends with a slash
    let mut base = base.clone();
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }

    base.join(path)
        .map_err(|e| ClientError::Configuration(format!("Invalid register URL: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_uses_camel_case_fields() {
        let payload = RegisterPayload {
            nickname: "测试用户".to_string(),
            email: "test@example.com".to_string(),
            password: "Password123!".to_string(),
            confirm_password: "Password123!".to_string(),
        };

        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "nickname": "测试用户",
                "email": "test@example.com",
                "password": "Password123!",
                "confirmPassword": "Password123!"
            })
        );
    }

    #[test]
    fn test_success_response() {
        let body = r#"{"code":200,"message":"注册成功"}"#;
        let response = interpret_response(StatusCode::OK, body.as_bytes()).unwrap();
        assert!(response.is_success());
        assert_eq!(response.message, "注册成功");
    }

    #[test]
    fn test_structured_rejection() {
        let body = r#"{"code":40004,"message":"数据验证失败","errors":{"email":["该邮箱已被注册","格式错误"]}}"#;
        let err = interpret_response(StatusCode::BAD_REQUEST, body.as_bytes()).unwrap_err();

        match err {
            RegisterError::Backend(backend) => {
                assert_eq!(backend.code, 40004);
                assert_eq!(backend.message, "数据验证失败");
                assert_eq!(backend.first_field_error("email"), Some("该邮箱已被注册"));
                assert_eq!(backend.first_field_error("nickname"), None);
            }
            other => panic!("expected backend error, got {:?}", other),
        }
    }

    #[test]
    fn test_rejection_without_errors_map() {
        let body = r#"{"code":50000,"message":"服务器内部错误"}"#;
        let err = interpret_response(StatusCode::INTERNAL_SERVER_ERROR, body.as_bytes()).unwrap_err();
        assert_eq!(
            err,
            RegisterError::Backend(BackendError {
                code: 50000,
                message: "服务器内部错误".to_string(),
                errors: None,
            })
        );
    }

    #[test]
    fn test_unstructured_rejection() {
        let err = interpret_response(StatusCode::BAD_GATEWAY, b"<html>bad gateway</html>").unwrap_err();
        assert!(matches!(err, RegisterError::Unknown(_)));
    }

    #[test]
    fn test_unreadable_success_body() {
        let err = interpret_response(StatusCode::OK, b"").unwrap_err();
        assert!(matches!(err, RegisterError::Unknown(_)));
    }

    #[test]
    fn test_register_url_keeps_base_path() {
        let config = ClientConfig {
            api_base_url: "http://localhost:8080/music".to_string(),
            ..ClientConfig::default()
        };

        let api = HttpUserApi::new(&config).unwrap();
        assert_eq!(
            api.register_url().as_str(),
            "http://localhost:8080/music/api/user/register"
        );
    }
}
