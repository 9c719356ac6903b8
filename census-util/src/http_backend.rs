//! HTTP backend for fetching JSON documents
//!
//! Used to pull release manifests and dataset listings while building the
//! census. Only available when the "http" feature is enabled.

#[cfg(feature = "http")]
pub mod http_impl {
    use std::time::Duration;

    use reqwest::Client;
    use serde::de::DeserializeOwned;
    use serde_json::Value;

    use crate::error::FetchError;

    /// HTTP client for JSON endpoints
    ///
    /// Reuses one connection pool across requests. An optional delay is
    /// observed after every successful response to stay polite towards
    /// rate-limited servers.
    #[derive(Debug, Clone, Default)]
    pub struct JsonFetcher {
        client: Client,
        delay: Duration,
    }

    impl JsonFetcher {
        /// Create a fetcher with a default client and no delay
        pub fn new() -> Self {
            Self::default()
        }

        /// Create a fetcher around a preconfigured client
        pub fn with_client(client: Client) -> Self {
            Self {
                client,
                delay: Duration::ZERO,
            }
        }

        /// Set the pause observed after each response
        pub fn with_delay(mut self, delay: Duration) -> Self {
            self.delay = delay;
            self
        }

        /// Get the pause observed after each response
        pub fn delay(&self) -> Duration {
            self.delay
        }

        /// GET `url` and parse the body as untyped JSON
        pub async fn fetch_json(&self, url: &str) -> Result<Value, FetchError> {
            self.fetch_json_as(url).await
        }

        /// GET `url` and decode the body into `T`
        ///
        /// Non-success statuses fail before the body is read. The delay is
        /// applied before parsing, so it is observed even when the body
        /// turns out to be malformed.
        pub async fn fetch_json_as<T: DeserializeOwned>(&self, url: &str) -> Result<T, FetchError> {
            let response = self.client.get(url).send().await?;

            let status = response.status();
            if !status.is_success() {
                log::warn!("GET {url} returned {status}");
                return Err(FetchError::Http {
                    status: status.as_u16(),
                    url: url.to_string(),
                });
            }

            let body = response.bytes().await?;
            log::debug!("GET {url}: {} bytes", body.len());

            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }

            Ok(serde_json::from_slice(&body)?)
        }
    }

    /// Fetch and parse a JSON document, then wait `delay`
    pub async fn fetch_json(url: &str, delay: Duration) -> Result<Value, FetchError> {
        JsonFetcher::new().with_delay(delay).fetch_json(url).await
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use std::time::Instant;
        use tokio::io::{AsyncReadExt, AsyncWriteExt};
        use tokio::net::TcpListener;

        /// Serve one canned HTTP response on a local port and return its URL
        async fn serve_once(status_line: &'static str, body: &'static str) -> String {
            let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
            let addr = listener.local_addr().unwrap();

            tokio::spawn(async move {
                let (mut socket, _) = listener.accept().await.unwrap();

                let mut request = Vec::new();
                let mut buf = [0u8; 1024];
                while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                    let n = socket.read(&mut buf).await.unwrap();
                    if n == 0 {
                        break;
                    }
                    request.extend_from_slice(&buf[..n]);
                }

                let response = format!(
                    "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                    body.len()
                );
                socket.write_all(response.as_bytes()).await.unwrap();
                let _ = socket.shutdown().await;
            });

            format!("http://{addr}/release.json")
        }

        fn local_fetcher() -> JsonFetcher {
            JsonFetcher::with_client(Client::builder().no_proxy().build().unwrap())
        }

        #[tokio::test]
        async fn test_fetch_object() {
            let url = serve_once("200 OK", r#"{"latest": "2023-07-25", "count": 3}"#).await;
            let value = local_fetcher().fetch_json(&url).await.unwrap();
            assert_eq!(value["latest"], "2023-07-25");
            assert_eq!(value["count"], 3);
        }

        #[tokio::test]
        async fn test_fetch_typed() {
            #[derive(serde::Deserialize)]
            struct Release {
                latest: String,
            }

            let url = serve_once("200 OK", r#"{"latest": "stable"}"#).await;
            let release: Release = local_fetcher().fetch_json_as(&url).await.unwrap();
            assert_eq!(release.latest, "stable");
        }

        #[tokio::test]
        async fn test_http_error_status() {
            let url = serve_once("404 Not Found", r#"{"detail": "missing"}"#).await;
            let err = local_fetcher().fetch_json(&url).await.unwrap_err();
            match err {
                FetchError::Http { status, url: failed } => {
                    assert_eq!(status, 404);
                    assert_eq!(failed, url);
                }
                other => panic!("unexpected error: {other}"),
            }
        }

        #[tokio::test]
        async fn test_malformed_body() {
            let url = serve_once("200 OK", "{not json").await;
            let err = local_fetcher().fetch_json(&url).await.unwrap_err();
            assert!(matches!(err, FetchError::Parse(_)));
        }

        #[tokio::test]
        async fn test_delay_is_observed() {
            let url = serve_once("200 OK", "[1, 2, 3]").await;
            let delay = Duration::from_millis(50);
            let start = Instant::now();
            let value = local_fetcher().with_delay(delay).fetch_json(&url).await.unwrap();
            assert!(start.elapsed() >= delay);
            assert_eq!(value, serde_json::json!([1, 2, 3]));
        }

        #[tokio::test]
        async fn test_connection_refused() {
            let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
            let addr = listener.local_addr().unwrap();
            drop(listener);

            let err = local_fetcher()
                .fetch_json(&format!("http://{addr}/"))
                .await
                .unwrap_err();
            assert!(matches!(err, FetchError::Transport(_)));
        }
    }
}

#[cfg(feature = "http")]
pub use http_impl::*;

#[cfg(not(feature = "http"))]
pub mod http_stub {
    use std::time::Duration;

    use crate::error::FetchError;

    #[derive(Debug, Clone, Default)]
    pub struct JsonFetcher;

    impl JsonFetcher {
        pub fn new() -> Self {
            JsonFetcher
        }

        pub fn with_delay(self, _delay: Duration) -> Self {
            self
        }

        #[cfg(feature = "serde")]
        pub async fn fetch_json(&self, _url: &str) -> Result<serde_json::Value, FetchError> {
            Err(FetchError::Disabled)
        }

        pub async fn fetch_json_as<T>(&self, _url: &str) -> Result<T, FetchError> {
            Err(FetchError::Disabled)
        }
    }

    #[cfg(feature = "serde")]
    pub async fn fetch_json(
        _url: &str,
        _delay: Duration,
    ) -> Result<serde_json::Value, FetchError> {
        Err(FetchError::Disabled)
    }
}

#[cfg(not(feature = "http"))]
pub use http_stub::*;
