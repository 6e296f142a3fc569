// ============================================================================
// API Client : CoinGecko
// ============================================================================
// Deux endpoints :
// - GET /coins/markets : top N par capitalisation, en USD
// - GET /coins/{id}/market_chart : historique de prix sur N jours
//
// CONCEPTS RUST :
// 1. async/await : le worker exécute ces fonctions sur son runtime tokio
// 2. Result<T, FetchError> : chaque échec est typé, l'écran décide du repli
// 3. Serde : désérialisation directe vers les modèles
// ============================================================================

use chrono::DateTime;
use serde::Deserialize;
use tracing::{info, instrument, warn};

use crate::api::send_json;
use crate::error::FetchError;
use crate::models::{MarketEntry, PriceHistory, PriceHistoryPoint, HISTORY_DAYS};

/// Nombre d'entrées demandées (et affichées) sur l'écran d'accueil
pub const PAGE_SIZE: usize = 10;

const MARKETS_ENDPOINT: &str = "coins/markets";
const MARKET_CHART_ENDPOINT: &str = "coins/market_chart";

/// Réponse de /coins/{id}/market_chart
///
/// Seul `prices` est utilisé ; `market_caps` et `total_volumes` sont ignorés.
#[derive(Debug, Deserialize)]
struct MarketChartResponse {
    /// Paires [timestamp en millisecondes, prix]
    prices: Vec<[f64; 2]>,
}

/// Client CoinGecko
#[derive(Debug, Clone)]
pub struct CoinGeckoClient {
    http: reqwest::Client,
    base_url: String,
}

impl CoinGeckoClient {
    pub fn new(http: reqwest::Client, base_url: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Récupère le top `PAGE_SIZE` des cryptomonnaies par capitalisation
    ///
    /// Le résultat est tronqué à `PAGE_SIZE` même si l'API en renvoie plus.
    #[instrument(skip(self), fields(base_url = %self.base_url))]
    pub async fn fetch_markets(&self) -> Result<Vec<MarketEntry>, FetchError> {
        let url = format!("{}/coins/markets", self.base_url);
        let per_page = PAGE_SIZE.to_string();
        let request = self.http.get(&url).query(&[
            ("vs_currency", "usd"),
            ("order", "market_cap_desc"),
            ("per_page", per_page.as_str()),
            ("page", "1"),
            ("sparkline", "false"),
        ]);

        let mut entries: Vec<MarketEntry> = send_json(request, MARKETS_ENDPOINT).await?;
        if entries.len() > PAGE_SIZE {
            warn!(received = entries.len(), kept = PAGE_SIZE, "Market page larger than requested, truncating");
            entries.truncate(PAGE_SIZE);
        }

        info!(entries = entries.len(), "Fetched market page");
        Ok(entries)
    }

    /// Récupère l'historique de prix sur `HISTORY_DAYS` jours d'une entrée
    #[instrument(skip(self), fields(base_url = %self.base_url))]
    pub async fn fetch_price_history(&self, id: &str) -> Result<PriceHistory, FetchError> {
        let url = format!("{}/coins/{}/market_chart", self.base_url, id);
        let days = HISTORY_DAYS.to_string();
        let request = self
            .http
            .get(&url)
            .query(&[("vs_currency", "usd"), ("days", days.as_str())]);

        let response: MarketChartResponse = send_json(request, MARKET_CHART_ENDPOINT).await?;
        let history = parse_market_chart(id, response)?;

        info!(points = history.len(), "Fetched price history");
        Ok(history)
    }
}

/// Convertit la réponse market_chart en PriceHistory
fn parse_market_chart(id: &str, response: MarketChartResponse) -> Result<PriceHistory, FetchError> {
    let mut history = PriceHistory::new(id.to_string());

    for [millis, price] in response.prices {
        let timestamp = DateTime::from_timestamp_millis(millis as i64).ok_or_else(|| {
            FetchError::Timestamp {
                value: millis.to_string(),
            }
        })?;
        history.add_point(PriceHistoryPoint::new(timestamp, price));
    }

    Ok(history)
}

// ============================================================================
// Tests unitaires
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::build_http_client;
    use crate::api::test_server::{serve_once, UNREACHABLE};

    const MARKETS_BODY: &str = r#"[
        {"id":"bitcoin","symbol":"btc","name":"Bitcoin","current_price":64123.5,"price_change_percentage_24h":1.75},
        {"id":"ethereum","symbol":"eth","name":"Ethereum","current_price":3150.2,"price_change_percentage_24h":-0.42}
    ]"#;

    fn client(base_url: &str) -> CoinGeckoClient {
        CoinGeckoClient::new(build_http_client().unwrap(), base_url)
    }

    #[tokio::test]
    async fn test_fetch_markets() {
        let (base_url, request) = serve_once(200, MARKETS_BODY).await;

        let entries = client(&base_url).fetch_markets().await.unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].id, "bitcoin");
        assert_eq!(entries[1].price_change_percentage_24h, -0.42);

        let request = request.await.unwrap();
        let request_line = request.lines().next().unwrap();
        assert!(request_line.starts_with("GET /coins/markets?"));
        assert!(request_line.contains("vs_currency=usd"));
        assert!(request_line.contains("order=market_cap_desc"));
        assert!(request_line.contains("per_page=10"));
        assert!(request_line.contains("page=1"));
        assert!(request_line.contains("sparkline=false"));
    }

    #[tokio::test]
    async fn test_fetch_markets_truncates_to_page_size() {
        const BODY: &str = r#"[
            {"id":"a","symbol":"a","name":"A","current_price":1.0,"price_change_percentage_24h":0.0},
            {"id":"b","symbol":"b","name":"B","current_price":1.0,"price_change_percentage_24h":0.0},
            {"id":"c","symbol":"c","name":"C","current_price":1.0,"price_change_percentage_24h":0.0},
            {"id":"d","symbol":"d","name":"D","current_price":1.0,"price_change_percentage_24h":0.0},
            {"id":"e","symbol":"e","name":"E","current_price":1.0,"price_change_percentage_24h":0.0},
            {"id":"f","symbol":"f","name":"F","current_price":1.0,"price_change_percentage_24h":0.0},
            {"id":"g","symbol":"g","name":"G","current_price":1.0,"price_change_percentage_24h":0.0},
            {"id":"h","symbol":"h","name":"H","current_price":1.0,"price_change_percentage_24h":0.0},
            {"id":"i","symbol":"i","name":"I","current_price":1.0,"price_change_percentage_24h":0.0},
            {"id":"j","symbol":"j","name":"J","current_price":1.0,"price_change_percentage_24h":0.0},
            {"id":"k","symbol":"k","name":"K","current_price":1.0,"price_change_percentage_24h":0.0},
            {"id":"l","symbol":"l","name":"L","current_price":1.0,"price_change_percentage_24h":0.0}
        ]"#;
        let (base_url, _request) = serve_once(200, BODY).await;

        let entries = client(&base_url).fetch_markets().await.unwrap();
        assert_eq!(entries.len(), PAGE_SIZE);
        assert_eq!(entries.last().unwrap().id, "j");
    }

    #[tokio::test]
    async fn test_fetch_markets_http_error() {
        let (base_url, _request) = serve_once(429, r#"{"status":{"error_code":429}}"#).await;

        let err = client(&base_url).fetch_markets().await.unwrap_err();
        assert!(matches!(err, FetchError::Status { status, .. } if status.as_u16() == 429));
    }

    #[tokio::test]
    async fn test_fetch_markets_malformed_json() {
        let (base_url, _request) = serve_once(200, r#"{"not":"an array"}"#).await;

        let err = client(&base_url).fetch_markets().await.unwrap_err();
        assert!(matches!(err, FetchError::Decode { .. }));
    }

    #[tokio::test]
    async fn test_fetch_markets_connection_refused() {
        let err = client(UNREACHABLE).fetch_markets().await.unwrap_err();
        assert!(matches!(err, FetchError::Request { .. }));
    }

    #[tokio::test]
    async fn test_fetch_price_history() {
        const BODY: &str = r#"{
            "prices": [[1704067200000, 42000.5], [1704153600000, 43100.0], [1704240000000, 42850.25]],
            "market_caps": [],
            "total_volumes": []
        }"#;
        let (base_url, request) = serve_once(200, BODY).await;

        let history = client(&base_url).fetch_price_history("bitcoin").await.unwrap();
        assert_eq!(history.id, "bitcoin");
        assert_eq!(history.len(), 3);
        assert_eq!(history.first().unwrap().timestamp.timestamp(), 1_704_067_200);
        assert_eq!(history.last().unwrap().price, 42850.25);

        let request = request.await.unwrap();
        let request_line = request.lines().next().unwrap();
        assert!(request_line.starts_with("GET /coins/bitcoin/market_chart?"));
        assert!(request_line.contains("vs_currency=usd"));
        assert!(request_line.contains("days=30"));
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let client = CoinGeckoClient::new(reqwest::Client::new(), "http://localhost:1234/api/v3/");
        assert_eq!(client.base_url, "http://localhost:1234/api/v3");
    }
}
