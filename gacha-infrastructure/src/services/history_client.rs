use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use gacha_domain::ports::{FetchError, HistoryPage, PullHistorySource};
use gacha_domain::{CategoryId, ImportCredentials, PullRecord, RuntimeConfig};

const UNITY_USER_AGENT: &str = "UnityPlayer/2019.4.40f1 (UnityWebRequest/1.0, libcurl/7.80.0-DEV)";
const UNITY_VERSION: &str = "2019.4.40f1";
const GAME_CHANNEL_ID: &str = "5";

/// Talks to the game's record endpoint, one page per call.
pub struct HttpHistorySource {
    client: Client,
    endpoint_override: Option<String>,
}

impl HttpHistorySource {
    pub fn new(timeout: Duration, verify_tls: bool) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .danger_accept_invalid_certs(!verify_tls)
            .default_headers(default_headers())
            .build()?;
        Ok(Self {
            client,
            endpoint_override: None,
        })
    }

    pub fn from_config(config: &RuntimeConfig) -> Result<Self> {
        let source = Self::new(
            Duration::from_secs(config.request_timeout_seconds.max(1)),
            config.verify_tls,
        )?;
        Ok(match &config.endpoint_override {
            Some(endpoint) => source.with_endpoint_override(endpoint.clone()),
            None => source,
        })
    }

    /// Sends every request to `endpoint` regardless of the selected server.
    pub fn with_endpoint_override(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint_override = Some(endpoint.into());
        self
    }

    fn endpoint_for<'a>(&'a self, credentials: &ImportCredentials) -> &'a str {
        self.endpoint_override
            .as_deref()
            .unwrap_or_else(|| credentials.server.endpoint())
    }
}

#[async_trait]
impl PullHistorySource for HttpHistorySource {
    async fn fetch_page(
        &self,
        credentials: &ImportCredentials,
        category: &CategoryId,
        cursor: Option<&str>,
    ) -> Result<HistoryPage, FetchError> {
        let mut query = vec![
            ("game_channel_id", GAME_CHANNEL_ID),
            ("type_id", category.as_str()),
            ("u", credentials.email.as_str()),
        ];
        if let Some(next) = cursor {
            query.push(("next", next));
        }

        let url = self.endpoint_for(credentials);
        debug!("POST {} type_id={} cursor={:?}", url, category, cursor);
        let response = self
            .client
            .post(url)
            .query(&query)
            .header(AUTHORIZATION, credentials.token.as_str())
            .form(&[("server", "1")])
            .send()
            .await
            .map_err(classify)?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(FetchError::Http {
                status: status.as_u16(),
            });
        }
        let body = response.text().await.map_err(classify)?;
        parse_page(&body)
    }
}

fn default_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, HeaderValue::from_static(UNITY_USER_AGENT));
    headers.insert(ACCEPT, HeaderValue::from_static("*/*"));
    headers.insert(
        CONTENT_TYPE,
        HeaderValue::from_static("application/x-www-form-urlencoded"),
    );
    headers.insert("x-unity-version", HeaderValue::from_static(UNITY_VERSION));
    headers
}

fn classify(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        FetchError::Timeout
    } else if err.is_decode() {
        FetchError::Decode(err.to_string())
    } else {
        FetchError::Transport(err.to_string())
    }
}

#[derive(Debug, Deserialize)]
struct Envelope {
    code: i64,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    data: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct PageData {
    #[serde(default)]
    list: Vec<PullRecord>,
    #[serde(default)]
    next: Option<Value>,
}

/// Decodes the `{code, message, data: {list, next}}` envelope.
pub fn parse_page(body: &str) -> Result<HistoryPage, FetchError> {
    let envelope: Envelope =
        serde_json::from_str(body).map_err(|err| FetchError::Decode(err.to_string()))?;

    if envelope.code != 0 {
        let message = envelope
            .data
            .as_ref()
            .and_then(|data| data.get("message"))
            .and_then(Value::as_str)
            .map(str::to_string)
            .or(envelope.message)
            .unwrap_or_else(|| "unknown error".to_string());
        return Err(FetchError::Api {
            code: envelope.code,
            message,
        });
    }

    let data = envelope
        .data
        .ok_or_else(|| FetchError::Decode("response has no data".to_string()))?;
    let page: PageData =
        serde_json::from_value(data).map_err(|err| FetchError::Decode(err.to_string()))?;

    let next = match page.next {
        Some(Value::String(cursor)) => Some(cursor),
        Some(Value::Number(cursor)) => Some(cursor.to_string()),
        _ => None,
    }
    .filter(|cursor| !cursor.is_empty());

    Ok(HistoryPage {
        records: page.list,
        next,
    })
}
