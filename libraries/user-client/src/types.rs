//! Types for the user API requests and responses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Endpoint used when no base URL is configured.
pub const DEFAULT_BASE_URL: &str = "https://api.example.com/users";

// =============================================================================
// Configuration
// =============================================================================

/// Configuration for a [`crate::UserClient`].
///
/// Every field has a default, so a partial config file or an empty table
/// deserializes to a usable config.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ClientConfig {
    /// URL of the user collection (e.g., "https://api.example.com/users")
    pub base_url: String,
    /// Total request timeout in seconds
    pub timeout_secs: u64,
    /// Connect timeout in seconds
    pub connect_timeout_secs: u64,
    /// User-Agent header sent with every request
    pub user_agent: String,
}

impl ClientConfig {
    /// Create a config for the given endpoint with default timeouts.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
            connect_timeout_secs: 10,
            user_agent: format!("user-client/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Lifecycle state of a [`crate::UserClient`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientState {
    /// Constructed, no connection resource held
    Inactive,
    /// Inside a scope, connection resource held
    Active,
}

// =============================================================================
// User Types
// =============================================================================

/// A user as returned by the server.
///
/// Values are only produced by decoding a server response and cannot be
/// modified afterwards. `created_at` is local bookkeeping: it is never sent
/// or read, and records when this value was decoded.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct User {
    id: u64,
    name: String,
    email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    avatar: Option<String>,
    #[serde(skip, default = "Utc::now")]
    created_at: DateTime<Utc>,
}

impl User {
    /// Server-assigned identifier. Ids are non-negative; a negative id in a
    /// response fails to decode.
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    /// Avatar URL, if the server returned one.
    pub fn avatar(&self) -> Option<&str> {
        self.avatar.as_deref()
    }

    /// When this value was constructed locally.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Request body for creating a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

impl NewUser {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            avatar: None,
        }
    }

    /// Attach an avatar URL.
    pub fn with_avatar(mut self, avatar: impl Into<String>) -> Self {
        self.avatar = Some(avatar.into());
        self
    }
}
