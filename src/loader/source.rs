//! Where a question document comes from

use reqwest::header::CACHE_CONTROL;
use std::path::PathBuf;

use crate::error::LoadError;

/// Location of a question document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizSource {
    File(PathBuf),
    Url(String),
    /// Document text supplied directly
    Inline(String),
}

impl QuizSource {
    /// Interpret a location string: `http(s)://` is a URL, anything else a path
    pub fn parse(location: &str) -> Self {
        let trimmed = location.trim();
        let lower = trimmed.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            QuizSource::Url(trimmed.to_string())
        } else {
            QuizSource::File(PathBuf::from(trimmed))
        }
    }

    /// Fetch the raw document text
    pub async fn fetch(&self) -> Result<String, LoadError> {
        match self {
            QuizSource::File(path) => {
                tokio::fs::read_to_string(path)
                    .await
                    .map_err(|e| LoadError::Io {
                        path: path.display().to_string(),
                        message: e.to_string(),
                    })
            }
            QuizSource::Url(url) => fetch_url(url).await,
            QuizSource::Inline(text) => Ok(text.clone()),
        }
    }
}

async fn fetch_url(url: &str) -> Result<String, LoadError> {
    let response = reqwest::Client::new()
        .get(url)
        .header(CACHE_CONTROL, "no-store")
        .send()
        .await
        .map_err(|e| LoadError::Transport(e.to_string()))?;

    if !response.status().is_success() {
        return Err(LoadError::Status(response.status().as_u16()));
    }

    response
        .text()
        .await
        .map_err(|e| LoadError::Transport(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Answer a single HTTP request on a local port with a canned response
    async fn serve_once(status_line: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = stream.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }
            let response = format!(
                "{}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            stream.write_all(response.as_bytes()).await.unwrap();
            stream.shutdown().await.unwrap();
        });

        format!("http://{}/quiz.json", addr)
    }

    #[test]
    fn test_parse_url() {
        assert_eq!(
            QuizSource::parse("https://example.com/quiz.json"),
            QuizSource::Url("https://example.com/quiz.json".to_string())
        );
        assert_eq!(
            QuizSource::parse("  HTTP://host/q.json "),
            QuizSource::Url("HTTP://host/q.json".to_string())
        );
    }

    #[test]
    fn test_parse_path() {
        assert_eq!(
            QuizSource::parse("data/quiz.json"),
            QuizSource::File(PathBuf::from("data/quiz.json"))
        );
    }

    #[tokio::test]
    async fn test_inline_fetch() {
        let source = QuizSource::Inline("{}".to_string());
        assert_eq!(source.fetch().await.unwrap(), "{}");
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let source = QuizSource::File(PathBuf::from("/definitely/not/here/quiz.json"));
        let err = source.fetch().await.unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }

    #[tokio::test]
    async fn test_non_success_status_is_status_error() {
        let url = serve_once("HTTP/1.1 404 Not Found", "missing").await;
        let err = QuizSource::parse(&url).fetch().await.unwrap_err();
        assert_eq!(err, LoadError::Status(404));
    }

    #[tokio::test]
    async fn test_url_document_loads() {
        let url = serve_once(
            "HTTP/1.1 200 OK",
            r#"{"questions": [{"id": "q1", "question": "A?", "options": ["A", "B"], "correct_answer": "A"}]}"#,
        )
        .await;
        let set = crate::loader::load(&QuizSource::parse(&url)).await.unwrap();
        assert_eq!(set.len(), 1);
        assert_eq!(set.questions[0].correct_answer, "A");
    }

    #[tokio::test]
    async fn test_invalid_url_is_transport_error() {
        let source = QuizSource::Url("http://".to_string());
        let err = source.fetch().await.unwrap_err();
        assert!(matches!(err, LoadError::Transport(_)));
    }
}
