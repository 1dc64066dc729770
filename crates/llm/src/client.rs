use async_trait::async_trait;
use docsum_common::{AppConfig, DocsumError, Result};
use reqwest::{Client, StatusCode};
use std::fmt;
use tracing::{debug, info};

use crate::llm_trait::LlmClient;
use crate::types::{ApiErrorResponse, GenerateRequest, MessagesRequest, MessagesResponse};

/// Anthropic API version header value
pub const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Anthropic Messages API client
#[derive(Clone)]
pub struct AnthropicClient {
    base_url: String,
    api_key: String,
    client: Client,
}

impl fmt::Debug for AnthropicClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnthropicClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl AnthropicClient {
    /// Create new Anthropic client
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> Result<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let client = Client::builder()
            .build()
            .map_err(|e| DocsumError::config(format!("Failed to create HTTP client: {}", e)))?;

        info!("Anthropic client initialized: {}", base_url);
        Ok(Self {
            base_url,
            api_key: api_key.into(),
            client,
        })
    }

    /// Create client from application configuration
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        Self::new(config.api_key.clone(), config.base_url.clone())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Send a single Messages API request (no retries)
    pub async fn create_message(&self, request: MessagesRequest) -> Result<MessagesResponse> {
        let url = format!("{}/v1/messages", self.base_url);

        debug!(
            "Sending message request to Anthropic - Model: {}, Temperature: {}",
            request.model, request.temperature
        );

        let response = self
            .client
            .post(&url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&request)
            .send()
            .await
            .map_err(|e| DocsumError::remote_service(format!("Failed to send request: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DocsumError::remote_service(describe_api_error(status, &body)));
        }

        let result: MessagesResponse = response.json().await.map_err(|e| {
            DocsumError::remote_service(format!("Failed to parse response: {}", e))
        })?;

        debug!(
            "Received response from Anthropic - Model: {}, Stop reason: {:?}",
            result.model, result.stop_reason
        );

        Ok(result)
    }
}

fn describe_api_error(status: StatusCode, body: &str) -> String {
    match serde_json::from_str::<ApiErrorResponse>(body) {
        Ok(envelope) => format!(
            "Anthropic API error ({}): {}: {}",
            status, envelope.error.error_type, envelope.error.message
        ),
        Err(_) => format!("Anthropic API error ({}): {}", status, body.trim()),
    }
}

#[async_trait]
impl LlmClient for AnthropicClient {
    fn name(&self) -> &'static str {
        "anthropic"
    }

    async fn generate(&self, request: GenerateRequest) -> Result<String> {
        let prompt_len = request.prompt.len();
        let response = self.create_message(MessagesRequest::from(request)).await?;

        let text = response.text();
        if text.trim().is_empty() {
            return Err(DocsumError::remote_service("Empty response from Anthropic"));
        }

        debug!("Generated {} chars from a {} byte prompt", text.len(), prompt_len);
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::{TcpListener, TcpStream};
    use tokio::task::JoinHandle;

    const OK_BODY: &str = r#"{"id":"msg_01","type":"message","role":"assistant","model":"claude-3-opus-20240229","content":[{"type":"text","text":"Tesla makes electric cars."}],"stop_reason":"end_turn","usage":{"input_tokens":12,"output_tokens":6}}"#;

    /// Serve exactly one canned HTTP response; the handle yields the raw request
    async fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let request = read_request(&mut socket).await;
            let response = format!(
                "HTTP/1.1 {}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
            request
        });

        (format!("http://{}", addr), handle)
    }

    async fn read_request(socket: &mut TcpStream) -> String {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 4096];

        loop {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);

            if let Some(header_end) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
                let headers = String::from_utf8_lossy(&buf[..header_end]).to_lowercase();
                let content_length = headers
                    .lines()
                    .find_map(|line| line.strip_prefix("content-length:"))
                    .and_then(|v| v.trim().parse::<usize>().ok())
                    .unwrap_or(0);
                if buf.len() >= header_end + 4 + content_length {
                    break;
                }
            }
        }

        String::from_utf8_lossy(&buf).to_string()
    }

    fn request(prompt: &str) -> GenerateRequest {
        GenerateRequest {
            model: "claude-3-opus-20240229".to_string(),
            prompt: prompt.to_string(),
            temperature: 0.0,
            max_tokens: 1024,
        }
    }

    #[test]
    fn test_client_creation() {
        let client = AnthropicClient::new("sk-test", "https://api.anthropic.com/").unwrap();
        assert_eq!(client.base_url(), "https://api.anthropic.com");
        assert!(!format!("{:?}", client).contains("sk-test"));
    }

    #[tokio::test]
    async fn test_generate_success() {
        let (base_url, server) = serve_once("200 OK", OK_BODY).await;
        let client = AnthropicClient::new("sk-test", base_url).unwrap();

        let text = client.generate(request("Summarize this")).await.unwrap();
        assert_eq!(text, "Tesla makes electric cars.");

        let raw = server.await.unwrap();
        assert!(raw.starts_with("POST /v1/messages HTTP/1.1"));
        let lowered = raw.to_lowercase();
        assert!(lowered.contains("x-api-key: sk-test"));
        assert!(lowered.contains("anthropic-version: 2023-06-01"));
        assert!(raw.contains("\"content\":\"Summarize this\""));
        assert!(raw.contains("\"temperature\":0.0"));
    }

    #[tokio::test]
    async fn test_server_error_is_reported() {
        let (base_url, server) = serve_once("500 Internal Server Error", "upstream exploded").await;
        let client = AnthropicClient::new("sk-test", base_url).unwrap();

        let err = client.generate(request("Summarize this")).await.unwrap_err();
        assert!(err.is_remote());
        let message = err.to_string();
        assert!(message.contains("500"));
        assert!(message.contains("upstream exploded"));
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_api_error_envelope() {
        let body = r#"{"type":"error","error":{"type":"authentication_error","message":"invalid x-api-key"}}"#;
        let (base_url, server) = serve_once("401 Unauthorized", body).await;
        let client = AnthropicClient::new("sk-wrong", base_url).unwrap();

        let err = client.generate(request("Summarize this")).await.unwrap_err();
        assert!(err.is_remote());
        assert!(err.to_string().contains("authentication_error: invalid x-api-key"));
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_malformed_response() {
        let (base_url, server) = serve_once("200 OK", "not json").await;
        let client = AnthropicClient::new("sk-test", base_url).unwrap();

        let err = client.generate(request("Summarize this")).await.unwrap_err();
        assert!(err.is_remote());
        assert!(err.to_string().contains("Failed to parse response"));
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_empty_response() {
        let body = r#"{"model":"claude-3-opus-20240229","content":[],"stop_reason":"end_turn"}"#;
        let (base_url, server) = serve_once("200 OK", body).await;
        let client = AnthropicClient::new("sk-test", base_url).unwrap();

        let err = client.generate(request("Summarize this")).await.unwrap_err();
        assert!(err.is_remote());
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_connection_refused() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = AnthropicClient::new("sk-test", format!("http://{}", addr)).unwrap();
        let err = client.generate(request("Summarize this")).await.unwrap_err();
        assert!(err.is_remote());
        assert!(err.to_string().contains("Failed to send request"));
    }
}
