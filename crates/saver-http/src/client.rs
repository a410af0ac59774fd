use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response, Url};
use rust_decimal::Decimal;
use saver_core::{LedgerError, RemoteLedger};
use saver_domain::{Badge, Goal, GoalId, NewGoal, SavingPayload};
use serde::{de::DeserializeOwned, Deserialize};
use tracing::debug;

use crate::HttpLedgerError;

/// Connection settings for [`HttpLedger`].
#[derive(Debug, Clone)]
pub struct HttpLedgerConfig {
    pub base_url: String,
    pub auth_token: Option<String>,
    pub timeout: Duration,
}

impl HttpLedgerConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            auth_token: None,
            timeout: Duration::from_secs(15),
        }
    }

    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.auth_token = token;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Error body returned by the API on failure.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

/// Remote ledger reached over HTTP/JSON.
#[derive(Debug, Clone)]
pub struct HttpLedger {
    http: Client,
    base_url: Url,
    auth_token: Option<String>,
}

impl HttpLedger {
    pub fn new(config: HttpLedgerConfig) -> Result<Self, HttpLedgerError> {
        let base_url = parse_base_url(&config.base_url)?;
        let http = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            http,
            base_url,
            auth_token: config.auth_token.filter(|token| !token.is_empty()),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, LedgerError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| LedgerError::Unreachable(format!("cannot extend {}", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let builder = self.http.request(method, url);
        match &self.auth_token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, LedgerError> {
        let response = builder.send().await.map_err(transport_error)?;
        let response = check_status(response).await?;
        response
            .json::<T>()
            .await
            .map_err(|err| LedgerError::Decode(err.to_string()))
    }
}

#[async_trait]
impl RemoteLedger for HttpLedger {
    async fn list_goals(&self) -> Result<Vec<Goal>, LedgerError> {
        let url = self.endpoint(&["goals"])?;
        debug!(%url, "GET goals");
        self.send(self.request(Method::GET, url)).await
    }

    async fn create_goal(&self, goal: &NewGoal) -> Result<Goal, LedgerError> {
        let url = self.endpoint(&["goals"])?;
        debug!(%url, name = %goal.name, "POST goal");
        self.send(self.request(Method::POST, url).json(goal)).await
    }

    async fn add_saving(&self, goal_id: &GoalId, amount: Decimal) -> Result<Goal, LedgerError> {
        let url = self.endpoint(&["goals", goal_id.as_str(), "savings"])?;
        debug!(%url, %amount, "POST saving");
        let payload = SavingPayload { amount };
        self.send(self.request(Method::POST, url).json(&payload)).await
    }

    async fn list_badges(&self) -> Result<Vec<Badge>, LedgerError> {
        let url = self.endpoint(&["badges"])?;
        debug!(%url, "GET badges");
        self.send(self.request(Method::GET, url)).await
    }
}

fn parse_base_url(raw: &str) -> Result<Url, HttpLedgerError> {
    let invalid = |reason: String| HttpLedgerError::InvalidBaseUrl {
        url: raw.to_string(),
        reason,
    };
    let url = Url::parse(raw.trim()).map_err(|err| invalid(err.to_string()))?;
    match url.scheme() {
        "http" | "https" => {}
        other => return Err(invalid(format!("unsupported scheme `{other}`"))),
    }
    if url.cannot_be_a_base() {
        return Err(invalid("not a base URL".into()));
    }
    Ok(url)
}

fn transport_error(err: reqwest::Error) -> LedgerError {
    if err.is_timeout() {
        LedgerError::Unreachable("request timed out".into())
    } else if err.is_decode() {
        LedgerError::Decode(err.to_string())
    } else {
        LedgerError::Unreachable(err.to_string())
    }
}

async fn check_status(response: Response) -> Result<Response, LedgerError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&body)
        .ok()
        .and_then(|parsed| parsed.message)
        .filter(|message| !message.trim().is_empty())
        .unwrap_or_else(|| format!("Request failed with status {}", status.as_u16()));
    debug!(status = status.as_u16(), %message, "ledger rejected request");
    Err(LedgerError::Rejected {
        status: status.as_u16(),
        message,
    })
}
