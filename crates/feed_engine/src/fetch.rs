use std::time::Duration;

use feed_logging::feed_debug;
use futures_util::StreamExt;
use reqwest::header::CONTENT_TYPE;
use url::Url;

use crate::decode::decode_feed;
use crate::{EngineError, FailureKind, FeedPhoto, FetchError};

pub const DEFAULT_FEED_URL: &str = "https://api.flickr.com/services/feeds/photos_public.gne";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TagMode {
    /// Photos must carry every tag.
    #[default]
    All,
    /// Photos may carry any of the tags.
    Any,
}

impl TagMode {
    fn as_query_value(self) -> &'static str {
        match self {
            TagMode::All => "all",
            TagMode::Any => "any",
        }
    }
}

#[derive(Debug, Clone)]
pub struct FetchSettings {
    pub feed_url: String,
    pub tags: Vec<String>,
    pub tag_mode: TagMode,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub redirect_limit: usize,
    pub max_bytes: u64,
    pub allowed_content_types: Vec<String>,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            feed_url: DEFAULT_FEED_URL.to_string(),
            tags: Vec::new(),
            tag_mode: TagMode::default(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            redirect_limit: 5,
            max_bytes: 2 * 1024 * 1024,
            allowed_content_types: vec![
                "application/json".to_string(),
                "text/javascript".to_string(),
                "application/javascript".to_string(),
                "application/x-javascript".to_string(),
                "text/plain".to_string(),
            ],
        }
    }
}

impl FetchSettings {
    /// Full request URL: the configured endpoint plus the JSON format and tag filters.
    pub fn request_url(&self) -> Result<Url, EngineError> {
        let mut url = Url::parse(&self.feed_url).map_err(|err| EngineError::FeedUrl {
            url: self.feed_url.clone(),
            message: err.to_string(),
        })?;

        let present: Vec<String> = url.query_pairs().map(|(key, _)| key.into_owned()).collect();
        let has = |key: &str| present.iter().any(|existing| existing == key);
        {
            let mut pairs = url.query_pairs_mut();
            if !has("format") {
                pairs.append_pair("format", "json");
            }
            if !has("nojsoncallback") {
                pairs.append_pair("nojsoncallback", "1");
            }
            let tags: Vec<&str> = self
                .tags
                .iter()
                .map(|tag| tag.trim())
                .filter(|tag| !tag.is_empty())
                .collect();
            if !tags.is_empty() && !has("tags") {
                pairs.append_pair("tags", &tags.join(","));
                pairs.append_pair("tagmode", self.tag_mode.as_query_value());
            }
        }
        Ok(url)
    }
}

/// Source of photo batches.
#[async_trait::async_trait]
pub trait FeedClient: Send + Sync {
    async fn fetch(&self) -> Result<Vec<FeedPhoto>, FetchError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestFeedClient {
    settings: FetchSettings,
    url: Url,
    client: reqwest::Client,
}

impl ReqwestFeedClient {
    pub fn new(settings: FetchSettings) -> Result<Self, EngineError> {
        let url = settings.request_url()?;
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .redirect(reqwest::redirect::Policy::limited(settings.redirect_limit))
            .build()
            .map_err(|err| EngineError::HttpClient(err.to_string()))?;
        Ok(Self {
            settings,
            url,
            client,
        })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    fn is_content_type_allowed(&self, content_type: &str) -> bool {
        let ct = content_type.split(';').next().unwrap_or(content_type).trim();
        self.settings
            .allowed_content_types
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(ct))
    }

    async fn download(&self) -> Result<Vec<u8>, FetchError> {
        let response = self
            .client
            .get(self.url.clone())
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        if let Some(content_len) = response.content_length() {
            if content_len > self.settings.max_bytes {
                return Err(self.too_large(Some(content_len)));
            }
        }

        if let Some(ct) = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
        {
            if !self.is_content_type_allowed(ct) {
                return Err(FetchError::new(
                    FailureKind::UnsupportedContentType {
                        content_type: ct.to_string(),
                    },
                    "unsupported content type",
                ));
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > self.settings.max_bytes {
                return Err(self.too_large(Some(next_len)));
            }
            bytes.extend_from_slice(&chunk);
        }
        Ok(bytes)
    }

    fn too_large(&self, actual: Option<u64>) -> FetchError {
        FetchError::new(
            FailureKind::TooLarge {
                max_bytes: self.settings.max_bytes,
                actual,
            },
            "response too large",
        )
    }
}

#[async_trait::async_trait]
impl FeedClient for ReqwestFeedClient {
    async fn fetch(&self) -> Result<Vec<FeedPhoto>, FetchError> {
        let bytes = self.download().await?;
        feed_debug!("feed body received: {} bytes from {}", bytes.len(), self.url);
        decode_feed(&bytes).map_err(|err| FetchError::new(FailureKind::Decode, err.to_string()))
    }
}

fn map_reqwest_error(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        return FetchError::new(FailureKind::Timeout, err.to_string());
    }
    if err.is_builder() {
        return FetchError::new(FailureKind::InvalidUrl, err.to_string());
    }
    FetchError::new(FailureKind::Network, err.to_string())
}
