// ============================================================================
// Worker : exécution des appels API en arrière-plan
// ============================================================================
// CONCEPT RUST : Command pattern avec channels
// - La boucle d'événements envoie des AppCommand au worker
// - Le worker exécute la requête sur son runtime tokio
// - Le résultat revient en AppResult, appliqué par l'écran concerné
// ============================================================================

use std::sync::mpsc;
use std::thread::JoinHandle;

use tokio::runtime::Runtime;
use tracing::{debug, info};

use crate::api::ApiClients;
use crate::error::FetchError;
use crate::models::{MarketEntry, NewsArticle, PriceHistory};

/// Commandes envoyées au worker
#[derive(Debug, Clone, PartialEq)]
pub enum AppCommand {
    /// Top 10 du marché pour l'écran d'accueil
    LoadMarkets,

    /// Historique sur 30 jours pour l'écran de détail
    LoadPriceHistory { id: String },

    /// Articles pour l'écran des actualités
    LoadNews,
}

/// Résultats renvoyés par le worker
#[derive(Debug)]
pub enum AppResult {
    MarketsLoaded(Result<Vec<MarketEntry>, FetchError>),

    PriceHistoryLoaded {
        id: String,
        result: Result<PriceHistory, FetchError>,
    },

    NewsLoaded(Result<Vec<NewsArticle>, FetchError>),
}

/// Exécute une commande et produit son résultat
pub async fn execute(clients: &ApiClients, command: AppCommand) -> AppResult {
    match command {
        AppCommand::LoadMarkets => AppResult::MarketsLoaded(clients.market.fetch_markets().await),
        AppCommand::LoadPriceHistory { id } => {
            let result = clients.market.fetch_price_history(&id).await;
            AppResult::PriceHistoryLoaded { id, result }
        }
        AppCommand::LoadNews => AppResult::NewsLoaded(clients.news.fetch_articles().await),
    }
}

/// Lance le worker thread
///
/// CONCEPT : Runtime per-thread
/// - Le runtime est créé par l'appelant (les erreurs remontent dans main)
/// - block_on() bloque le thread worker, pas l'UI
/// - Le thread s'arrête quand l'UI ferme le channel de commandes
pub fn spawn_worker(
    runtime: Runtime,
    clients: ApiClients,
    command_rx: mpsc::Receiver<AppCommand>,
    result_tx: mpsc::Sender<AppResult>,
) -> JoinHandle<()> {
    std::thread::spawn(move || {
        while let Ok(command) = command_rx.recv() {
            info!(?command, "Worker received command");
            let result = runtime.block_on(execute(&clients, command));

            if result_tx.send(result).is_err() {
                debug!("Result channel closed");
                break;
            }
        }
        info!("Worker thread exiting (channel closed)");
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test_server::{serve_once, UNREACHABLE};
    use crate::config::Config;

    fn clients(coingecko_url: &str, newsapi_url: &str) -> ApiClients {
        let config = Config {
            coingecko_url: coingecko_url.to_string(),
            newsapi_url: newsapi_url.to_string(),
            ..Config::default()
        };
        ApiClients::from_config(&config).unwrap()
    }

    #[tokio::test]
    async fn test_execute_history_keeps_id() {
        let (base_url, _request) = serve_once(200, r#"{"prices":[[1704067200000,1.0]]}"#).await;
        let clients = clients(&base_url, UNREACHABLE);

        let result = execute(&clients, AppCommand::LoadPriceHistory { id: "dogecoin".to_string() }).await;
        match result {
            AppResult::PriceHistoryLoaded { id, result } => {
                assert_eq!(id, "dogecoin");
                assert_eq!(result.unwrap().len(), 1);
            }
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_execute_news_failure() {
        let clients = clients(UNREACHABLE, UNREACHABLE);
        let result = execute(&clients, AppCommand::LoadNews).await;
        assert!(matches!(result, AppResult::NewsLoaded(Err(FetchError::Request { .. }))));
    }

    #[test]
    fn test_worker_round_trip() {
        let runtime = Runtime::new().unwrap();
        let clients = clients(UNREACHABLE, UNREACHABLE);
        let (command_tx, command_rx) = mpsc::channel();
        let (result_tx, result_rx) = mpsc::channel();

        let handle = spawn_worker(runtime, clients, command_rx, result_tx);
        command_tx.send(AppCommand::LoadMarkets).unwrap();

        let result = result_rx.recv().unwrap();
        assert!(matches!(result, AppResult::MarketsLoaded(Err(_))));

        drop(command_tx);
        handle.join().unwrap();
    }
}
