//! Query clients.

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use super::answer::{parse_reply, QueryRequest};
use super::DispatchError;
use crate::chat::Content;

/// Something that can answer a question.
#[async_trait]
pub trait QueryClient: Send + Sync {
    async fn query(&self, question: &str) -> Result<Content, DispatchError>;
}

/// HTTP client for the member query endpoint
pub struct HttpQueryClient {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpQueryClient {
    /// Build a client. Without a timeout, requests wait as long as the
    /// transport allows.
    pub fn new(
        endpoint: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, DispatchError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            endpoint: endpoint.into(),
        })
    }
}

#[async_trait]
impl QueryClient for HttpQueryClient {
    async fn query(&self, question: &str) -> Result<Content, DispatchError> {
        debug!(endpoint = %self.endpoint, "posting question");

        let response = self
            .client
            .post(&self.endpoint)
            .json(&QueryRequest { question })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(DispatchError::Status(status.as_u16()));
        }

        let body = response.bytes().await?;
        parse_reply(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use serde_json::json;

    fn client_for(server: &mockito::Server) -> HttpQueryClient {
        HttpQueryClient::new(format!("{}/member/query", server.url()), None).unwrap()
    }

    #[tokio::test]
    async fn test_text_answer() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/member/query")
            .match_header("content-type", "application/json")
            .match_body(Matcher::Json(json!({"question": "hello"})))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"answer": "hi there"}"#)
            .create_async()
            .await;

        let client = client_for(&server);
        let content = client.query("hello").await.unwrap();

        assert_eq!(content, Content::text("hi there"));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_record_answer() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/member/query")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"answer": [{"Name": "Alice", "DOB": "1990-01-01T00:00:00"}, {"Name": "Bob", "DOB": null}]}"#)
            .create_async()
            .await;

        let client = client_for(&server);
        let content = client.query("find members").await.unwrap();

        assert_eq!(content.records().map(|r| r.len()), Some(2));
    }

    #[tokio::test]
    async fn test_server_error_status() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/member/query")
            .with_status(500)
            .with_body("Internal Server Error")
            .create_async()
            .await;

        let client = client_for(&server);
        let err = client.query("hello").await.unwrap_err();

        assert!(matches!(err, DispatchError::Status(500)));
    }

    #[tokio::test]
    async fn test_connection_refused() {
        // Bind then drop to get a port nothing listens on
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };

        let client =
            HttpQueryClient::new(format!("http://127.0.0.1:{}/member/query", port), None).unwrap();
        let err = client.query("hello").await.unwrap_err();

        assert!(matches!(err, DispatchError::Transport(_)));
    }

    #[tokio::test]
    async fn test_timeout_is_transport_error() {
        // Accept connections but never answer
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        let server = tokio::spawn(async move {
            let mut held = Vec::new();
            while let Ok((stream, _)) = listener.accept().await {
                held.push(stream);
            }
        });

        let client = HttpQueryClient::new(
            format!("http://127.0.0.1:{}/member/query", port),
            Some(Duration::from_millis(100)),
        )
        .unwrap();
        let err = client.query("hello").await.unwrap_err();

        match err {
            DispatchError::Transport(e) => assert!(e.is_timeout()),
            other => panic!("expected transport timeout, got {:?}", other),
        }
        server.abort();
    }
}
