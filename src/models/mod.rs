// ============================================================================
// Module : models
// ============================================================================
// Structures de données de l'application (entrées de marché, historique,
// articles, indicateurs). Aucune n'est persistée : elles vivent le temps
// d'un rendu d'écran.
// ============================================================================

pub mod indicator;      // Indicateurs de remplacement (RSI, MACD, Bollinger)
pub mod market_entry;   // Résumé d'une cryptomonnaie
pub mod news_article;   // Article NewsAPI
pub mod price_history;  // Historique de prix sur 30 jours

// Re-export des structures principales pour simplifier les imports
// On peut faire : use morkan::models::MarketEntry;
pub use indicator::{placeholder_indicators, Indicator, INDICATOR_NAMES};
pub use market_entry::{format_usd, MarketEntry, Tone};
pub use news_article::NewsArticle;
pub use price_history::{PriceHistory, PriceHistoryPoint, HISTORY_DAYS};
