// ============================================================================
// Module : api
// ============================================================================
// Clients des deux APIs externes :
// - CoinGecko : classement du marché et historique de prix
// - NewsAPI : actualités crypto
//
// Les deux clients partagent le même reqwest::Client (clonage peu coûteux,
// le pool de connexions est partagé).
// ============================================================================

use std::time::Duration;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use tracing::debug;

pub mod coingecko; // Client CoinGecko
pub mod newsapi;   // Client NewsAPI

// Re-export des clients
pub use coingecko::CoinGeckoClient;
pub use newsapi::NewsApiClient;

use crate::config::Config;
use crate::error::FetchError;

/// User-Agent envoyé avec chaque requête (NewsAPI refuse les requêtes sans)
const USER_AGENT: &str = concat!("morkan/", env!("CARGO_PKG_VERSION"));

/// Délai maximal d'une requête, au-delà la récupération échoue
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Crée le client HTTP partagé
pub fn build_http_client() -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(REQUEST_TIMEOUT)
        .build()
        .context("Échec de la création du client HTTP")
}

/// Les deux clients configurés, possédés par le worker
#[derive(Debug, Clone)]
pub struct ApiClients {
    pub market: CoinGeckoClient,
    pub news: NewsApiClient,
}

impl ApiClients {
    pub fn from_config(config: &Config) -> Result<Self> {
        let http = build_http_client()?;
        Ok(Self {
            market: CoinGeckoClient::new(http.clone(), &config.coingecko_url),
            news: NewsApiClient::new(http, &config.newsapi_url, &config.news_api_key),
        })
    }
}

/// Envoie une requête GET et désérialise le corps JSON
///
/// CONCEPT RUST : Generics avec DeserializeOwned
/// - T peut être n'importe quel type désérialisable sans emprunt
/// - Utilisé par les endpoints CoinGecko et NewsAPI
pub(crate) async fn send_json<T: DeserializeOwned>(
    request: reqwest::RequestBuilder,
    endpoint: &'static str,
) -> Result<T, FetchError> {
    debug!(endpoint, "Sending HTTP request");
    let response = request
        .send()
        .await
        .map_err(|source| FetchError::Request { endpoint, source })?;

    let status = response.status();
    debug!(endpoint, status = %status, "Received HTTP response");

    if !status.is_success() {
        return Err(FetchError::Status { endpoint, status });
    }

    let body = response
        .bytes()
        .await
        .map_err(|source| FetchError::Request { endpoint, source })?;

    serde_json::from_slice(&body).map_err(|source| FetchError::Decode { endpoint, source })
}

// ============================================================================
// Serveur HTTP de test
// ============================================================================
// CONCEPT : Serveur "one-shot"
// - Écoute sur un port éphémère de 127.0.0.1
// - Répond une seule fois avec le statut et le corps donnés
// - Renvoie la ligne de requête reçue pour vérifier l'URL construite
// ============================================================================

#[cfg(test)]
pub(crate) mod test_server {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    /// Démarre le serveur et retourne (url de base, handle vers la requête reçue)
    pub async fn serve_once(status: u16, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
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
                "HTTP/1.1 {} Test\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();

            String::from_utf8_lossy(&request).into_owned()
        });

        (format!("http://{}", addr), handle)
    }

    /// URL sur laquelle rien n'écoute (connexion refusée)
    pub const UNREACHABLE: &str = "http://127.0.0.1:1";
}
