use std::fmt;
use std::rc::Rc;

use async_trait::async_trait;
use gloo_net::http::Request;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use web_sys::RequestCredentials;

use crate::cancel::Interest;
use crate::config::AppConfig;
use crate::error::{ApiError, Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        };
        f.write_str(name)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    /// Extra headers; `Content-Type: application/json` is always sent.
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub status_text: String,
    pub body: String,
}

impl HttpResponse {
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Moves one request over the wire. Implementations report only transport
/// failures as errors; any HTTP status is a successful `send`.
#[async_trait(?Send)]
pub trait Transport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse>;
}

/// `fetch`-backed transport that always includes the session cookie.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserTransport;

#[async_trait(?Send)]
impl Transport for BrowserTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        let builder = match request.method {
            Method::Get => Request::get(&request.url),
            Method::Post => Request::post(&request.url),
            Method::Put => Request::put(&request.url),
            Method::Delete => Request::delete(&request.url),
        }
        .credentials(RequestCredentials::Include)
        .header("Content-Type", "application/json");
        let builder = request
            .headers
            .iter()
            .fold(builder, |builder, (name, value)| builder.header(name, value));

        let prepared = match request.body {
            Some(body) => builder.body(body),
            None => builder.build(),
        }
        .map_err(|e| ApiError::Network(e.to_string()))?;

        let resp = prepared
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let status = resp.status();
        let status_text = resp.status_text();
        // An unreadable body is treated as empty; the status still decides the outcome.
        let body = resp.text().await.unwrap_or_default();

        Ok(HttpResponse {
            status,
            status_text,
            body,
        })
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// JSON request helper shared by every domain client.
#[derive(Clone)]
pub struct ApiClient {
    config: Rc<AppConfig>,
    transport: Rc<dyn Transport>,
    headers: Rc<Vec<(String, String)>>,
    interest: Option<Interest>,
}

impl ApiClient {
    pub fn new(config: AppConfig, transport: Rc<dyn Transport>) -> Self {
        Self {
            config: Rc::new(config),
            transport,
            headers: Rc::new(Vec::new()),
            interest: None,
        }
    }

    pub fn browser(config: AppConfig) -> Self {
        Self::new(config, Rc::new(BrowserTransport))
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// A client whose responses are dropped once `interest` is withdrawn.
    pub fn with_interest(&self, interest: &Interest) -> Self {
        Self {
            config: Rc::clone(&self.config),
            transport: Rc::clone(&self.transport),
            headers: Rc::clone(&self.headers),
            interest: Some(interest.clone()),
        }
    }

    /// Adds a header sent with every request from this client and its scoped copies.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        Rc::make_mut(&mut self.headers).push((name.into(), value.into()));
        self
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.request(Method::Get, path, None).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.request(Method::Delete, path, None).await
    }

    pub async fn post<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
        let body = encode(path, body)?;
        self.request(Method::Post, path, Some(body)).await
    }

    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.request(Method::Post, path, None).await
    }

    pub async fn put<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
        let body = encode(path, body)?;
        self.request(Method::Put, path, Some(body)).await
    }

    pub async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<String>,
    ) -> Result<T> {
        let result = self.execute(method, path, body).await;
        match &result {
            Err(ApiError::Cancelled) => {
                tracing::debug!(endpoint = path, %method, "response discarded, caller withdrew");
            }
            Err(err) => {
                tracing::error!(endpoint = path, %method, error = %err, "API request failed");
            }
            Ok(_) => {}
        }
        result
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<String>,
    ) -> Result<T> {
        self.ensure_live()?;

        let request = HttpRequest {
            method,
            url: self.config.endpoint(path),
            headers: self.headers.as_ref().clone(),
            body,
        };
        tracing::debug!(url = %request.url, %method, "sending request");

        let response = self.transport.send(request).await?;
        self.ensure_live()?;

        if !response.ok() {
            return Err(server_error(&response));
        }

        serde_json::from_str::<T>(&response.body).map_err(|e| ApiError::Decode {
            endpoint: path.to_string(),
            reason: e.to_string(),
        })
    }

    fn ensure_live(&self) -> Result<()> {
        match &self.interest {
            Some(interest) if !interest.is_live() => Err(ApiError::Cancelled),
            _ => Ok(()),
        }
    }
}

impl PartialEq for ApiClient {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.config, &other.config)
            && Rc::ptr_eq(&self.transport, &other.transport)
            && self.headers == other.headers
            && self.interest == other.interest
    }
}

fn encode<B: Serialize>(path: &str, body: &B) -> Result<String> {
    serde_json::to_string(body).map_err(|e| ApiError::Decode {
        endpoint: path.to_string(),
        reason: e.to_string(),
    })
}

fn server_error(response: &HttpResponse) -> ApiError {
    let message = serde_json::from_str::<ErrorBody>(&response.body)
        .ok()
        .and_then(|b| b.error)
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| {
            format!("API Error: {} {}", response.status, response.status_text)
                .trim_end()
                .to_string()
        });
    ApiError::Server {
        status: response.status,
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(status: u16, status_text: &str, body: &str) -> HttpResponse {
        HttpResponse {
            status,
            status_text: status_text.to_string(),
            body: body.to_string(),
        }
    }

    #[test]
    fn error_field_becomes_message() {
        let err = server_error(&response(400, "Bad Request", r#"{"error":"Message is required"}"#));
        assert_eq!(
            err,
            ApiError::Server {
                status: 400,
                message: "Message is required".to_string()
            }
        );
    }

    #[test]
    fn missing_error_field_falls_back_to_status_line() {
        let err = server_error(&response(404, "Not Found", r#"{"detail":"nope"}"#));
        assert_eq!(err.to_string(), "API Error: 404 Not Found");

        let err = server_error(&response(502, "", "<html>bad gateway</html>"));
        assert_eq!(err.to_string(), "API Error: 502");
    }

    #[test]
    fn only_2xx_is_ok() {
        assert!(response(201, "Created", "{}").ok());
        assert!(!response(304, "Not Modified", "").ok());
    }
}
