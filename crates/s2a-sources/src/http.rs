use crate::SourceError;
use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

/// A `name=value` cookie sent with authenticated requests
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionCookie {
    pub name: String,
    pub value: String,
}

impl SessionCookie {
    pub fn header_value(&self) -> String {
        format!("{}={}", self.name, self.value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn ok(body: impl Into<String>) -> Self {
        Self { status: 200, body: body.into() }
    }

    pub fn with_status(status: u16) -> Self {
        Self { status, body: String::new() }
    }

    pub fn is_ok(&self) -> bool {
        self.status == 200
    }
}

/// Plain GET transport shared by the Steam and AllKeyShop clients.
///
/// Any status is returned as a response; only transport failures are errors.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn get(&self, url: &str, cookie: Option<&SessionCookie>) -> Result<HttpResponse, SourceError>;
}

/// Create a reqwest Client with a browser-like user agent; AllKeyShop serves
/// product pages to browsers only
pub fn create_http_client() -> Client {
    Client::builder()
        .user_agent("Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36")
        .build()
        .unwrap_or_else(|_| Client::new())
}

pub struct ReqwestFetcher {
    client: Client,
}

impl ReqwestFetcher {
    pub fn new() -> Self {
        Self {
            client: create_http_client(),
        }
    }
}

impl Default for ReqwestFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PageFetcher for ReqwestFetcher {
    async fn get(&self, url: &str, cookie: Option<&SessionCookie>) -> Result<HttpResponse, SourceError> {
        let mut request = self.client.get(url);
        if let Some(cookie) = cookie {
            request = request.header(reqwest::header::COOKIE, cookie.header_value());
        }

        let response = request.send().await.map_err(|e| SourceError::Request {
            url: url.to_string(),
            message: e.to_string(),
        })?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| SourceError::Request {
            url: url.to_string(),
            message: format!("error reading response: {}", e),
        })?;

        debug!(url, status, bytes = body.len(), "GET");
        Ok(HttpResponse { status, body })
    }
}
