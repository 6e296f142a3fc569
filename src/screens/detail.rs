// ============================================================================
// Écran de détail
// ============================================================================
// Reçoit une entrée du navigateur, affiche son titre, les trois indicateurs
// de remplacement et l'historique de prix sur 30 jours une fois chargé.
// ============================================================================

use tracing::{debug, error, info};

use crate::error::FetchError;
use crate::models::{placeholder_indicators, Indicator, MarketEntry, PriceHistory};
use crate::worker::AppCommand;

/// État du chargement de l'historique de prix
#[derive(Debug, Clone, PartialEq, Default)]
pub enum HistoryState {
    /// Aucune entrée chargée
    #[default]
    Idle,

    /// Requête en cours
    Loading,

    Loaded(PriceHistory),

    /// La récupération a échoué (déjà loggée)
    Unavailable,
}

#[derive(Debug, Default)]
pub struct DetailScreen {
    pub entry: Option<MarketEntry>,

    /// "Nom (SYMBOLE)"
    pub title: String,

    pub indicators: Vec<Indicator>,

    pub history: HistoryState,
}

impl DetailScreen {
    pub fn new() -> Self {
        Self::default()
    }

    /// Efface tout le contenu affiché
    pub fn clear(&mut self) {
        self.entry = None;
        self.title.clear();
        self.indicators.clear();
        self.history = HistoryState::Idle;
    }

    /// Charge une entrée : efface le contenu précédent, calcule le titre et
    /// les indicateurs, puis retourne la requête d'historique
    pub fn load_entry(&mut self, entry: MarketEntry) -> AppCommand {
        self.clear();

        info!(id = %entry.id, price = entry.current_price, "Loading detail screen");
        self.title = entry.title();
        self.indicators = placeholder_indicators(entry.current_price);
        self.history = HistoryState::Loading;

        let command = AppCommand::LoadPriceHistory {
            id: entry.id.clone(),
        };
        self.entry = Some(entry);
        command
    }

    /// Applique le résultat de la récupération de l'historique
    ///
    /// Un résultat pour une autre entrée que celle affichée est ignoré.
    /// Un échec est loggé ; les indicateurs restent affichés.
    pub fn apply_history(&mut self, id: &str, result: Result<PriceHistory, FetchError>) {
        let current = self.entry.as_ref().map(|e| e.id.as_str());
        if current != Some(id) {
            debug!(id, current = ?current, "Ignoring stale price history");
            return;
        }

        self.history = match result {
            Ok(history) => HistoryState::Loaded(history),
            Err(e) => {
                error!(id, error = %e, "Error loading chart data");
                HistoryState::Unavailable
            }
        };
    }

    pub fn is_loading(&self) -> bool {
        self.history == HistoryState::Loading
    }
}
