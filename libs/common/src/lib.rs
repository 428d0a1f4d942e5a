//! Common library for the WHY Music client apps
//!
//! This crate provides the infrastructure shared by the client apps,
//! including configuration, error handling and the backend user API client.

pub mod config;
pub mod error;
pub mod user_api;

/// Example usage of the user API client
///
/// ```rust,no_run
/// use common::config::ClientConfig;
/// use common::user_api::{HttpUserApi, RegisterPayload, UserApi};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let config = ClientConfig::from_env()?;
///     let api = HttpUserApi::new(&config)?;
///     let payload = RegisterPayload {
///         nickname: "listener".to_string(),
///         email: "listener@example.com".to_string(),
///         password: "Password123!".to_string(),
///         confirm_password: "Password123!".to_string(),
///     };
///     let response = api.register(&payload).await?;
///     println!("Registration response: {}", response.message);
///     Ok(())
/// }
/// ```
pub fn example_usage() {}
