use std::fmt::Display;

use log::{debug, info};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::maimai::schema::PlayerRecord;

pub const DEFAULT_ENDPOINT: &str = "https://www.diving-fish.com/api/maimaidxprober/query/player";
pub const PRIVACY_SETTINGS_URL: &str = "https://www.diving-fish.com/maimaidx/prober";

/// Which account to look up on the prober.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserIdentifier {
    Username(String),
    Qq(String),
}

impl Display for UserIdentifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserIdentifier::Username(name) => write!(f, "{name:?}"),
            UserIdentifier::Qq(qq) => write!(f, "QQ {qq}"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    #[error("Player {0} does not exist.")]
    UserNotFound(UserIdentifier),
    #[error(
        "Player {0} does not allow others to query their scores.  \
        The privacy setting can be changed at {url}",
        url = PRIVACY_SETTINGS_URL
    )]
    PrivacyRestricted(UserIdentifier),
    #[error("Unexpected error code: server returned {0:?}")]
    UnexpectedStatus(StatusCode),
    #[error("Failed to query the player record: {0}")]
    Request(#[from] reqwest::Error),
}

#[derive(Serialize)]
struct QueryPlayerBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    username: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    qq: Option<&'a str>,
    b50: bool,
}

impl<'a> From<&'a UserIdentifier> for QueryPlayerBody<'a> {
    fn from(user: &'a UserIdentifier) -> Self {
        let (username, qq) = match user {
            UserIdentifier::Username(name) => (Some(name.as_str()), None),
            UserIdentifier::Qq(qq) => (None, Some(qq.as_str())),
        };
        Self {
            username,
            qq,
            b50: true,
        }
    }
}

pub struct ProberClient {
    client: reqwest::Client,
    endpoint: Url,
}

impl ProberClient {
    pub fn new(endpoint: Url) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .build()?;
        Ok(Self { client, endpoint })
    }

    pub fn default_endpoint() -> Url {
        Url::parse(DEFAULT_ENDPOINT).unwrap()
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Fetches the best 50 charts of the given player in a single request.
    pub async fn fetch_player(&self, user: &UserIdentifier) -> Result<PlayerRecord, QueryError> {
        info!("Querying player {user} at {}", self.endpoint);
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&QueryPlayerBody::from(user))
            .send()
            .await?;
        debug!("Server returned {:?}", response.status());
        check_status(response.status(), user)?;
        Ok(response.json().await?)
    }
}

fn check_status(status: StatusCode, user: &UserIdentifier) -> Result<(), QueryError> {
    if status == StatusCode::BAD_REQUEST {
        Err(QueryError::UserNotFound(user.clone()))
    } else if status == StatusCode::FORBIDDEN {
        Err(QueryError::PrivacyRestricted(user.clone()))
    } else if status.is_success() {
        Ok(())
    } else {
        Err(QueryError::UnexpectedStatus(status))
    }
}
