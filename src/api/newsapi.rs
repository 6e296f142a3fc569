// ============================================================================
// API Client : NewsAPI
// ============================================================================
// GET /everything filtré sur les cryptomonnaies, en anglais, trié par date
// de publication. Authentifié par la clé passée en configuration.
// ============================================================================

use serde::Deserialize;
use tracing::{info, instrument};

use crate::api::send_json;
use crate::error::FetchError;
use crate::models::news_article::parse_published_at;
use crate::models::NewsArticle;

/// Requête de recherche fixe
pub const NEWS_QUERY: &str = "cryptocurrency OR bitcoin OR ethereum";

const EVERYTHING_ENDPOINT: &str = "everything";

#[derive(Debug, Deserialize)]
struct EverythingResponse {
    articles: Vec<RawArticle>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")] // publishedAt -> published_at
struct RawArticle {
    title: String,
    description: String,
    source: RawSource,
    published_at: String,
}

#[derive(Debug, Deserialize)]
struct RawSource {
    name: String,
}

impl TryFrom<RawArticle> for NewsArticle {
    type Error = FetchError;

    fn try_from(raw: RawArticle) -> Result<Self, Self::Error> {
        Ok(NewsArticle {
            published_at: parse_published_at(&raw.published_at)?,
            title: raw.title,
            description: raw.description,
            source_name: raw.source.name,
        })
    }
}

/// Client NewsAPI
#[derive(Clone)]
pub struct NewsApiClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

// La clé ne doit jamais apparaître dans les logs
impl std::fmt::Debug for NewsApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewsApiClient")
            .field("base_url", &self.base_url)
            .field("api_key", &"***")
            .finish()
    }
}

impl NewsApiClient {
    pub fn new(http: reqwest::Client, base_url: &str, api_key: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }

    /// Récupère les derniers articles crypto
    ///
    /// Un seul article illisible (date au mauvais format) fait échouer
    /// l'ensemble : pas de rendu partiel.
    #[instrument(skip(self), fields(base_url = %self.base_url))]
    pub async fn fetch_articles(&self) -> Result<Vec<NewsArticle>, FetchError> {
        let url = format!("{}/everything", self.base_url);
        let request = self.http.get(&url).query(&[
            ("q", NEWS_QUERY),
            ("language", "en"),
            ("sortBy", "publishedAt"),
            ("apiKey", self.api_key.as_str()),
        ]);

        let response: EverythingResponse = send_json(request, EVERYTHING_ENDPOINT).await?;
        let articles = response
            .articles
            .into_iter()
            .map(NewsArticle::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        info!(articles = articles.len(), "Fetched news articles");
        Ok(articles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::build_http_client;
    use crate::api::test_server::{serve_once, UNREACHABLE};

    fn client(base_url: &str) -> NewsApiClient {
        NewsApiClient::new(build_http_client().unwrap(), base_url, "secret-key")
    }

    #[tokio::test]
    async fn test_fetch_articles() {
        const BODY: &str = r#"{
            "status": "ok",
            "totalResults": 2,
            "articles": [
                {
                    "source": {"id": null, "name": "CoinDesk"},
                    "author": "Jane Doe",
                    "title": "Ether rallies",
                    "description": "ETH climbs 4%.",
                    "url": "https://example.invalid/a",
                    "publishedAt": "2024-01-05T10:00:00Z"
                },
                {
                    "source": {"id": "reuters", "name": "Reuters"},
                    "title": "Bitcoin ETF flows",
                    "description": "Inflows continue.",
                    "publishedAt": "2024-01-04T08:30:00Z"
                }
            ]
        }"#;
        let (base_url, request) = serve_once(200, BODY).await;

        let articles = client(&base_url).fetch_articles().await.unwrap();
        assert_eq!(articles.len(), 2);
        assert_eq!(articles[0].title, "Ether rallies");
        assert_eq!(articles[0].byline(), "CoinDesk - 05/01/2024");
        assert_eq!(articles[1].formatted_date(), "04/01/2024");

        let request = request.await.unwrap();
        let request_line = request.lines().next().unwrap();
        assert!(request_line.starts_with("GET /everything?"));
        assert!(request_line.contains("q=cryptocurrency+OR+bitcoin+OR+ethereum"));
        assert!(request_line.contains("language=en"));
        assert!(request_line.contains("sortBy=publishedAt"));
        assert!(request_line.contains("apiKey=secret-key"));
    }

    #[tokio::test]
    async fn test_fetch_articles_bad_date() {
        const BODY: &str = r#"{"articles":[{"source":{"name":"X"},"title":"t","description":"d","publishedAt":"yesterday"}]}"#;
        let (base_url, _request) = serve_once(200, BODY).await;

        let err = client(&base_url).fetch_articles().await.unwrap_err();
        assert!(matches!(err, FetchError::Timestamp { .. }));
    }

    #[tokio::test]
    async fn test_fetch_articles_unauthorized() {
        const BODY: &str = r#"{"status":"error","code":"apiKeyInvalid","message":"Your API key is invalid."}"#;
        let (base_url, _request) = serve_once(401, BODY).await;

        let err = client(&base_url).fetch_articles().await.unwrap_err();
        assert!(matches!(err, FetchError::Status { .. }));
    }

    #[tokio::test]
    async fn test_fetch_articles_connection_refused() {
        let err = client(UNREACHABLE).fetch_articles().await.unwrap_err();
        assert!(matches!(err, FetchError::Request { .. }));
    }

    #[test]
    fn test_debug_hides_key() {
        let rendered = format!("{:?}", client("http://localhost"));
        assert!(!rendered.contains("secret-key"));
    }
}
