use crate::document::Document;
use crate::error::{Result, ScanError};
use encoding_rs::{Encoding, UTF_8, WINDOWS_1252};
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use std::time::{Duration, Instant};
use tracing::debug;

/// How far into a body to look for a `<meta charset>` declaration.
const META_SNIFF_LIMIT: usize = 1024;

#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    pub fn new() -> Result<Self> {
        Self::with_timeout(30)
    }

    pub fn with_timeout(timeout_secs: u64) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("Syllabus/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(timeout_secs.div_ceil(2)))
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_keepalive(Duration::from_secs(60))
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()?;

        Ok(Self { client })
    }

    /// GET `url` and parse the body, decoding it with the charset the
    /// server declares or, failing that, one sniffed from the bytes.
    pub async fn fetch(&self, url: &str) -> Result<Document> {
        let body = self.fetch_text(url).await?;
        Ok(Document::parse(&body))
    }

    pub async fn fetch_text(&self, url: &str) -> Result<String> {
        debug!("Fetching {}", url);
        let start = Instant::now();

        let response = self.client.get(url).send().await.map_err(|source| ScanError::Fetch {
            url: url.to_string(),
            source,
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScanError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string());

        let bytes = response.bytes().await.map_err(|source| ScanError::Fetch {
            url: url.to_string(),
            source,
        })?;

        debug!("Fetched {} ({} bytes) in {:?}", url, bytes.len(), start.elapsed());
        Ok(decode_body(&bytes, content_type.as_deref()))
    }
}

pub fn decode_body(bytes: &[u8], content_type: Option<&str>) -> String {
    let declared = content_type
        .and_then(charset_from_content_type)
        .and_then(|label| Encoding::for_label(label.as_bytes()));

    if let Some(encoding) = declared {
        return encoding.decode(bytes).0.into_owned();
    }

    if let Some((encoding, _)) = Encoding::for_bom(bytes) {
        return encoding.decode(bytes).0.into_owned();
    }

    if let Some(encoding) = sniff_meta_charset(bytes) {
        return encoding.decode(bytes).0.into_owned();
    }

    let (text, had_errors) = UTF_8.decode_without_bom_handling(bytes);
    if had_errors {
        return WINDOWS_1252.decode(bytes).0.into_owned();
    }
    text.into_owned()
}

fn charset_from_content_type(content_type: &str) -> Option<&str> {
    content_type.split(';').skip(1).find_map(|param| {
        let (key, value) = param.split_once('=')?;
        key.trim()
            .eq_ignore_ascii_case("charset")
            .then(|| value.trim().trim_matches(|c| c == '"' || c == '\''))
            .filter(|value| !value.is_empty())
    })
}

fn sniff_meta_charset(bytes: &[u8]) -> Option<&'static Encoding> {
    let head = &bytes[..bytes.len().min(META_SNIFF_LIMIT)];
    let head = String::from_utf8_lossy(head).to_ascii_lowercase();
    let start = head.find("charset=")? + "charset=".len();
    let label: String = head[start..]
        .trim_start_matches(['"', '\''])
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | ':' | '.'))
        .collect();
    Encoding::for_label(label.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{method, path},
    };

    // "Programação" in ISO-8859-1
    const LATIN1_BODY: &[u8] = b"<html><body><i>Programa\xe7\xe3o</i></body></html>";

    #[test]
    fn test_charset_from_content_type() {
        assert_eq!(charset_from_content_type("text/html; charset=ISO-8859-1"), Some("ISO-8859-1"));
        assert_eq!(charset_from_content_type("text/html;Charset=\"utf-8\""), Some("utf-8"));
        assert_eq!(charset_from_content_type("text/html"), None);
        assert_eq!(charset_from_content_type("text/html; charset="), None);
    }

    #[test]
    fn test_decode_uses_declared_charset() {
        let text = decode_body(LATIN1_BODY, Some("text/html; charset=iso-8859-1"));
        assert!(text.contains("Programação"));
    }

    #[test]
    fn test_decode_sniffs_meta_charset() {
        let mut body = br#"<html><head><meta http-equiv="Content-Type" content="text/html; charset=iso-8859-1"></head>"#.to_vec();
        body.extend_from_slice(LATIN1_BODY);
        let text = decode_body(&body, Some("text/html"));
        assert!(text.contains("Programação"));
    }

    #[test]
    fn test_decode_sniffs_utf16_bom() {
        let mut body = vec![0xFF, 0xFE];
        body.extend("<i>Programação</i>".encode_utf16().flat_map(u16::to_le_bytes));

        let text = decode_body(&body, Some("text/html"));

        assert_eq!(text, "<i>Programação</i>");
    }

    #[test]
    fn test_decode_defaults_to_utf8() {
        let text = decode_body("<i>Programação</i>".as_bytes(), None);
        assert_eq!(text, "<i>Programação</i>");
    }

    #[test]
    fn test_decode_falls_back_when_not_utf8() {
        let text = decode_body(LATIN1_BODY, None);
        assert!(text.contains("Programação"));
    }

    #[tokio::test]
    async fn test_fetch_parses_document() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/page"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("content-type", "text/html; charset=ISO-8859-1")
                    .set_body_bytes(LATIN1_BODY),
            )
            .mount(&mock_server)
            .await;

        let fetcher = Fetcher::new().unwrap();
        let document = fetcher
            .fetch(&format!("{}/page", mock_server.uri()))
            .await
            .unwrap();

        let italic = document.find(|tag| tag.is("i")).unwrap();
        assert_eq!(document.text(italic, crate::TextMode::Joined), "Programação");
    }

    #[tokio::test]
    async fn test_fetch_rejects_error_status() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/missing"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;

        let fetcher = Fetcher::new().unwrap();
        let url = format!("{}/missing", mock_server.uri());
        let err = fetcher.fetch(&url).await.unwrap_err();

        assert!(matches!(err, ScanError::HttpStatus { status: 404, .. }));
        assert_eq!(err.to_string(), format!("{url} returned HTTP 404"));
    }

    #[tokio::test]
    async fn test_fetch_reports_connection_failure() {
        let fetcher = Fetcher::with_timeout(2).unwrap();
        let err = fetcher.fetch("http://127.0.0.1:9/unreachable").await.unwrap_err();
        assert!(matches!(err, ScanError::Fetch { .. }));
    }
}
