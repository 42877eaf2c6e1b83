//! Remote song sources fetched over HTTP.

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use tracing::debug;

use super::loader::{parse, LoadError, SongLoader};
use super::source::remote_format;
use crate::config::RemoteSettings;
use crate::domain::Song;

/// Loads songs from a URL serving CSV, a JSON table or plain text
pub struct RemoteLoader {
    url: String,
    settings: RemoteSettings,
    client: reqwest::Client,
}

impl RemoteLoader {
    pub fn new(url: String, settings: RemoteSettings) -> Self {
        Self {
            url,
            settings,
            client: reqwest::Client::new(),
        }
    }

    /// Use a preconfigured HTTP client
    pub fn with_client(url: String, settings: RemoteSettings, client: reqwest::Client) -> Self {
        Self {
            url,
            settings,
            client,
        }
    }

    fn check_size(&self, size: u64) -> Result<(), LoadError> {
        if size > self.settings.max_bytes {
            return Err(LoadError::TooLarge {
                url: self.url.clone(),
                limit: self.settings.max_bytes,
            });
        }
        Ok(())
    }
}

#[async_trait]
impl SongLoader for RemoteLoader {
    fn name(&self) -> &str {
        &self.url
    }

    async fn load(&self) -> Result<Vec<Song>, LoadError> {
        debug!(url = %self.url, timeout = ?self.settings.timeout(), "Fetching remote songs");

        let mut response = self
            .client
            .get(&self.url)
            .timeout(self.settings.timeout())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(LoadError::HttpStatus {
                url: self.url.clone(),
                status: status.as_u16(),
            });
        }

        if let Some(length) = response.content_length() {
            self.check_size(length)?;
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);

        let mut body = Vec::new();
        while let Some(chunk) = response.chunk().await? {
            self.check_size((body.len() + chunk.len()) as u64)?;
            body.extend_from_slice(&chunk);
        }
        let body = String::from_utf8(body).map_err(|_| LoadError::NotUtf8(self.url.clone()))?;

        let format = remote_format(&self.url, content_type.as_deref())?;
        parse(format, &body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::SocketAddr;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    const CSV: &str = "title,artist,album,genre,length\nSong 1,Artist 1,Album 1,Genre 1,3.5\n";

    /// Accept one connection, read the request head and reply with `response`
    async fn serve_once(response: Vec<u8>) -> SocketAddr {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = stream.read(&mut buf).await.unwrap();
                if n == 0 {
                    return;
                }
                request.extend_from_slice(&buf[..n]);
            }
            let _ = stream.write_all(&response).await;
            let _ = stream.shutdown().await;
        });

        addr
    }

    fn loader(url: String, max_bytes: u64) -> RemoteLoader {
        let client = reqwest::Client::builder().no_proxy().build().unwrap();
        RemoteLoader::with_client(
            url,
            RemoteSettings {
                timeout_seconds: 5,
                max_bytes,
            },
            client,
        )
    }

    #[test]
    fn test_size_limit() {
        let loader = loader("https://example.com/songs.csv".to_string(), 10);

        assert!(loader.check_size(10).is_ok());
        assert!(matches!(
            loader.check_size(11),
            Err(LoadError::TooLarge { limit: 10, .. })
        ));
        assert_eq!(loader.name(), "https://example.com/songs.csv");
    }

    #[tokio::test]
    async fn test_error_status() {
        let addr = serve_once(
            b"HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n".to_vec(),
        )
        .await;

        let result = loader(format!("http://{}/songs.csv", addr), 1024).load().await;
        assert!(matches!(result, Err(LoadError::HttpStatus { status: 404, .. })));
    }

    #[tokio::test]
    async fn test_format_from_content_type() {
        let response = format!(
            "HTTP/1.1 200 OK\r\nContent-Type: text/csv; charset=utf-8\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            CSV.len(),
            CSV
        );
        let addr = serve_once(response.into_bytes()).await;

        let songs = loader(format!("http://{}/library", addr), 1024)
            .load()
            .await
            .unwrap();
        assert_eq!(
            songs,
            vec![Song::new("Song 1", "Artist 1", "Album 1", "Genre 1", 3.5)]
        );
    }

    #[tokio::test]
    async fn test_chunked_body_over_limit() {
        let mut response = b"HTTP/1.1 200 OK\r\nContent-Type: text/csv\r\nTransfer-Encoding: chunked\r\nConnection: close\r\n\r\n".to_vec();
        for _ in 0..4 {
            response.extend_from_slice(b"20\r\n");
            response.extend_from_slice(&[b'a'; 32]);
            response.extend_from_slice(b"\r\n");
        }
        response.extend_from_slice(b"0\r\n\r\n");
        let addr = serve_once(response).await;

        let result = loader(format!("http://{}/songs.csv", addr), 64).load().await;
        assert!(matches!(result, Err(LoadError::TooLarge { limit: 64, .. })));
    }
}
