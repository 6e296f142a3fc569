// ============================================================================
// Configuration : options de ligne de commande
// ============================================================================
// Toutes les options sont facultatives. La clé NewsAPI peut aussi venir de
// la variable d'environnement NEWSAPI_KEY.
// ============================================================================

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

/// URL de base de l'API CoinGecko v3
pub const DEFAULT_COINGECKO_URL: &str = "https://api.coingecko.com/api/v3";

/// URL de base de l'API NewsAPI v2
pub const DEFAULT_NEWSAPI_URL: &str = "https://newsapi.org/v2";

/// Clé factice utilisée si aucune clé n'est fournie
pub const PLACEHOLDER_API_KEY: &str = "YOUR_API_KEY";

/// Suivi des cours crypto et des actualités dans le terminal
#[derive(Debug, Clone, Parser)]
#[command(name = "morkan", version, about)]
pub struct Config {
    /// Clé NewsAPI
    #[arg(long, env = "NEWSAPI_KEY", default_value = PLACEHOLDER_API_KEY, hide_env_values = true)]
    pub news_api_key: String,

    /// URL de base de CoinGecko
    #[arg(long, default_value = DEFAULT_COINGECKO_URL)]
    pub coingecko_url: String,

    /// URL de base de NewsAPI
    #[arg(long, default_value = DEFAULT_NEWSAPI_URL)]
    pub newsapi_url: String,

    /// Intervalle de rafraîchissement du classement en secondes (0 = désactivé)
    #[arg(long, default_value_t = 300)]
    pub refresh_secs: u64,

    /// Répertoire des fichiers de logs
    #[arg(long)]
    pub log_dir: Option<PathBuf>,
}

impl Config {
    /// Intervalle de rafraîchissement automatique, None si désactivé
    pub fn refresh_interval(&self) -> Option<Duration> {
        (self.refresh_secs > 0).then(|| Duration::from_secs(self.refresh_secs))
    }

    /// Répertoire des logs
    ///
    /// Par défaut :
    /// - Linux : ~/.local/share/morkan/logs
    /// - macOS : ~/Library/Application Support/morkan/logs
    /// - Windows : C:\Users\<user>\AppData\Local\morkan\logs
    ///
    /// Repli sur ./logs si le répertoire système est introuvable.
    pub fn log_dir(&self) -> PathBuf {
        self.log_dir.clone().unwrap_or_else(|| {
            dirs::data_local_dir()
                .map(|dir| dir.join("morkan").join("logs"))
                .unwrap_or_else(|| PathBuf::from("./logs"))
        })
    }

    /// Vrai si la clé NewsAPI n'a pas été renseignée
    pub fn uses_placeholder_key(&self) -> bool {
        self.news_api_key == PLACEHOLDER_API_KEY
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            news_api_key: PLACEHOLDER_API_KEY.to_string(),
            coingecko_url: DEFAULT_COINGECKO_URL.to_string(),
            newsapi_url: DEFAULT_NEWSAPI_URL.to_string(),
            refresh_secs: 300,
            log_dir: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_overrides() {
        let config = Config::try_parse_from([
            "morkan",
            "--news-api-key",
            "abc123",
            "--coingecko-url",
            "http://127.0.0.1:9000",
            "--refresh-secs",
            "0",
            "--log-dir",
            "/tmp/morkan-logs",
        ])
        .unwrap();

        assert_eq!(config.news_api_key, "abc123");
        assert_eq!(config.coingecko_url, "http://127.0.0.1:9000");
        assert_eq!(config.newsapi_url, DEFAULT_NEWSAPI_URL);
        assert!(config.refresh_interval().is_none());
        assert_eq!(config.log_dir(), PathBuf::from("/tmp/morkan-logs"));
        assert!(!config.uses_placeholder_key());
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.refresh_interval(), Some(Duration::from_secs(300)));
        assert!(config.uses_placeholder_key());
        assert!(config.log_dir().ends_with("logs"));
    }
}
