use super::models::ServerUser;
use crate::error::{ChownError, ChownResult};
use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::Url;
use std::time::Duration;
use tracing::debug;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Anything that can list the users of a Jellyfin server.
pub trait UserDirectory {
    fn fetch_users(&self) -> ChownResult<Vec<ServerUser>>;
}

/// Blocking client for the Jellyfin user API.
pub struct JellyfinClient {
    client: Client,
    users_url: Url,
    api_key: String,
}

impl JellyfinClient {
    pub fn new(server_url: &Url, api_key: &str) -> ChownResult<Self> {
        let users_url = users_url_for(server_url)?;

        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|source| ChownError::Transport {
                url: users_url.to_string(),
                source,
            })?;

        Ok(Self {
            client,
            users_url,
            api_key: api_key.to_string(),
        })
    }
}

/// `{server}/Users`, keeping any path prefix (reverse proxies often serve
/// under /jellyfin) and dropping query and fragment.
fn users_url_for(server_url: &Url) -> ChownResult<Url> {
    let mut users_url = server_url.clone();
    users_url.set_query(None);
    users_url.set_fragment(None);
    users_url
        .path_segments_mut()
        .map_err(|_| ChownError::InvalidServerUrl {
            url: server_url.to_string(),
            reason: "cannot be used as a base URL".to_string(),
        })?
        .pop_if_empty()
        .push("Users");
    Ok(users_url)
}

impl UserDirectory for JellyfinClient {
    fn fetch_users(&self) -> ChownResult<Vec<ServerUser>> {
        debug!("GET {}", self.users_url);
        let transport_error = |source| ChownError::Transport {
            url: self.users_url.to_string(),
            source,
        };

        let response = self
            .client
            .get(self.users_url.clone())
            .header(AUTHORIZATION, format!("MediaBrowser Token={}", self.api_key))
            .header(ACCEPT, "application/json")
            .send()
            .map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ChownError::UnexpectedStatus {
                url: self.users_url.to_string(),
                status,
            });
        }

        let body = response.bytes().map_err(transport_error)?;
        let users: Vec<ServerUser> =
            serde_json::from_slice(&body).map_err(|source| ChownError::MalformedResponse {
                url: self.users_url.to_string(),
                source,
            })?;

        debug!("Server returned {} users", users.len());
        Ok(users)
    }
}
