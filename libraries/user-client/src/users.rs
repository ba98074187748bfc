//! Requests against the user collection endpoint.

use crate::error::RequestFailure;
use crate::types::User;
use reqwest::header::ACCEPT;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

type Result<T> = std::result::Result<T, RequestFailure>;

/// Borrowed view over an open connection and the collection URL.
pub(crate) struct UsersApi<'a> {
    http: &'a Client,
    base_url: &'a str,
}

impl<'a> UsersApi<'a> {
    pub(crate) fn new(http: &'a Client, base_url: &'a str) -> Self {
        Self { http, base_url }
    }

    /// `GET <base_url>`, expecting a JSON array of users.
    pub(crate) async fn list(&self) -> Result<Vec<User>> {
        debug!(url = %self.base_url, "Fetching users");

        let response = self
            .http
            .get(self.base_url)
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let users: Vec<User> = decode(response).await?;
        debug!(count = users.len(), "Fetched users");

        Ok(users)
    }

    /// `POST <base_url>` with `fields` as the JSON body, expecting the created user.
    pub(crate) async fn create<T>(&self, fields: &T) -> Result<User>
    where
        T: Serialize + ?Sized,
    {
        debug!(url = %self.base_url, "Creating user");

        let response = self
            .http
            .post(self.base_url)
            .header(ACCEPT, "application/json")
            .json(fields)
            .send()
            .await?;

        let user: User = decode(response).await?;
        debug!(user_id = user.id(), "Created user");

        Ok(user)
    }
}

/// Check the status, then decode the whole body as JSON.
///
/// Nothing is decoded from a non-success response, so callers never see a
/// partially built value.
async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();

    if !status.is_success() {
        let message = response.text().await.unwrap_or_default();
        return Err(RequestFailure::Status {
            status: status.as_u16(),
            message,
        });
    }

    let body = response.bytes().await?;
    Ok(serde_json::from_slice(&body)?)
}
