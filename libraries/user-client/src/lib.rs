//! User API Client
//!
//! Async HTTP client for a REST user collection exposing two operations:
//! list users (`GET <base_url>`) and create a user (`POST <base_url>`).
//!
//! # Features
//!
//! - **Scoped connection**: the HTTP connection is held only while an
//!   [`ActiveClient`] guard is alive and released when it drops
//! - **Typed users**: responses decode into immutable [`User`] values
//! - **Diagnostics**: failures are logged through `tracing` before being returned
//!
//! # Example
//!
//! ```ignore
//! use user_client::{ClientConfig, NewUser, UserClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut client = UserClient::new(ClientConfig::default())?;
//!     let active = client.enter()?;
//!
//!     let users = active.list_users().await?;
//!     println!("Found {} users", users.len());
//!
//!     let new_user = NewUser::new("John Doe", "john.doe@example.com")
//!         .with_avatar("https://example.com/avatars/john.jpg");
//!     let created = active.create_user(&new_user).await?;
//!     println!("Created user: {} ({})", created.name(), created.email());
//!
//!     Ok(())
//! }
//! ```

mod client;
mod error;
mod types;
mod users;

// Re-export main types
pub use client::{ActiveClient, UserClient};
pub use error::{RequestFailure, Result, UserClientError};
pub use types::{ClientConfig, ClientState, NewUser, User, DEFAULT_BASE_URL};
