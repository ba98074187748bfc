//! Main user API client.

use crate::error::{RequestFailure, Result, UserClientError};
use crate::types::{ClientConfig, ClientState, User};
use crate::users::UsersApi;
use reqwest::Client;
use serde::Serialize;
use std::ops::Deref;
use std::time::{Duration, Instant};
use tracing::{error, info};

/// Client for a REST user collection.
///
/// A freshly built client is inactive and holds no connection. Call
/// [`UserClient::enter`] to open one; it stays open until the returned
/// [`ActiveClient`] guard is dropped.
///
/// # Example
///
/// ```ignore
/// use user_client::{ClientConfig, NewUser, UserClient};
///
/// let mut client = UserClient::new(ClientConfig::new("https://api.example.com/users"))?;
///
/// let active = client.enter()?;
/// let users = active.list_users().await?;
/// println!("Found {} users", users.len());
///
/// let created = active
///     .create_user(&NewUser::new("John Doe", "john.doe@example.com"))
///     .await?;
/// println!("Created user {}", created.id());
/// // connection released here
/// ```
#[derive(Debug)]
pub struct UserClient {
    config: ClientConfig,
    connection: Option<Connection>,
    released: usize,
}

/// The connection resource held while a client is active.
#[derive(Debug)]
struct Connection {
    http: Client,
    opened_at: Instant,
}

impl UserClient {
    /// Create a new client with the given configuration.
    ///
    /// No network resource is opened.
    pub fn new(config: ClientConfig) -> Result<Self> {
        if config.base_url.is_empty() {
            return Err(UserClientError::InvalidUrl("URL cannot be empty".into()));
        }

        let base_url = config.base_url.trim_end_matches('/').to_string();
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(UserClientError::InvalidUrl(
                "URL must start with http:// or https://".into(),
            ));
        }

        url::Url::parse(&base_url)
            .map_err(|e| UserClientError::InvalidUrl(format!("{}: {}", base_url, e)))?;

        Ok(Self {
            config: ClientConfig { base_url, ..config },
            connection: None,
            released: 0,
        })
    }

    /// The user collection URL.
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    pub fn state(&self) -> ClientState {
        if self.connection.is_some() {
            ClientState::Active
        } else {
            ClientState::Inactive
        }
    }

    pub fn is_active(&self) -> bool {
        self.state() == ClientState::Active
    }

    /// Number of connection resources this client has released so far.
    pub fn connections_released(&self) -> usize {
        self.released
    }

    /// Open the connection resource and enter the active scope.
    ///
    /// The connection is released when the returned guard is dropped, on
    /// every exit path.
    pub fn enter(&mut self) -> Result<ActiveClient<'_>> {
        if self.connection.is_some() {
            return Err(UserClientError::IllegalState("client already active"));
        }

        let http = Client::builder()
            .timeout(Duration::from_secs(self.config.timeout_secs))
            .connect_timeout(Duration::from_secs(self.config.connect_timeout_secs))
            .user_agent(self.config.user_agent.as_str())
            .build()
            .map_err(RequestFailure::Transport)?;

        self.connection = Some(Connection {
            http,
            opened_at: Instant::now(),
        });
        info!(url = %self.config.base_url, "User client active");

        Ok(ActiveClient { client: self })
    }

    /// Fetch all users, in server order.
    pub async fn list_users(&self) -> Result<Vec<User>> {
        let api = self.api()?;

        api.list().await.map_err(|e| {
            error!(url = %self.config.base_url, error = %e, "Failed to fetch users");
            UserClientError::RequestFailed(e)
        })
    }

    /// Create a user from `fields`, serialized as the JSON request body.
    ///
    /// Accepts a [`crate::NewUser`] or any other serializable mapping. The
    /// input is not validated locally.
    pub async fn create_user<T>(&self, fields: &T) -> Result<User>
    where
        T: Serialize + ?Sized,
    {
        let api = self.api()?;

        api.create(fields).await.map_err(|e| {
            error!(url = %self.config.base_url, error = %e, "Failed to create user");
            UserClientError::RequestFailed(e)
        })
    }

    fn api(&self) -> Result<UsersApi<'_>> {
        let connection = self
            .connection
            .as_ref()
            .ok_or(UserClientError::IllegalState("client not active"))?;

        Ok(UsersApi::new(&connection.http, &self.config.base_url))
    }

    fn release_connection(&mut self) {
        if let Some(connection) = self.connection.take() {
            self.released += 1;
            info!(
                url = %self.config.base_url,
                held_ms = connection.opened_at.elapsed().as_millis() as u64,
                "User client released"
            );
        }
    }
}

impl Default for UserClient {
    /// Inactive client for [`crate::DEFAULT_BASE_URL`].
    fn default() -> Self {
        Self {
            config: ClientConfig::default(),
            connection: None,
            released: 0,
        }
    }
}

/// Guard for an active [`UserClient`].
///
/// Derefs to the client, so `list_users` and `create_user` are called on the
/// guard directly. Dropping it releases the connection.
#[derive(Debug)]
pub struct ActiveClient<'a> {
    client: &'a mut UserClient,
}

impl ActiveClient<'_> {
    /// Leave the scope now instead of at the end of the enclosing block.
    pub fn release(self) {
        drop(self);
    }
}

impl Deref for ActiveClient<'_> {
    type Target = UserClient;

    fn deref(&self) -> &UserClient {
        self.client
    }
}

impl Drop for ActiveClient<'_> {
    fn drop(&mut self) {
        self.client.release_connection();
    }
}
