// ============================================================================
// Écran d'accueil : classement du marché
// ============================================================================
// Une carte par entrée, dans une grille à deux colonnes. Chaque carte possède
// sa propre copie de l'entrée : sélectionner la carte d'index i produit une
// transition qui transporte exactement cette entrée.
// ============================================================================

use std::time::Instant;

use tracing::{debug, error, info};

use crate::api::coingecko::PAGE_SIZE;
use crate::app::Transition;
use crate::error::FetchError;
use crate::models::{MarketEntry, Tone};
use crate::worker::AppCommand;

/// Nombre de colonnes de la grille
pub const GRID_COLUMNS: usize = 2;

/// Résumé visuel d'une entrée de marché
#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    /// Entrée à l'origine de la carte, transmise telle quelle à l'écran de détail
    pub entry: MarketEntry,
    pub name: String,
    pub symbol: String,
    pub price: String,
    pub change: String,
    pub tone: Tone,
}

impl Card {
    pub fn from_entry(entry: MarketEntry) -> Self {
        Self {
            name: entry.name.clone(),
            symbol: entry.display_symbol(),
            price: entry.formatted_price(),
            change: entry.formatted_change(),
            tone: entry.tone(),
            entry,
        }
    }
}

/// État de l'écran d'accueil
#[derive(Debug, Default)]
pub struct ListingScreen {
    pub cards: Vec<Card>,

    /// Index de la carte sélectionnée au clavier
    pub selected: usize,

    /// Une requête est en cours
    pub loading: bool,

    /// Au moins une réponse (ou un repli) a été appliquée
    pub loaded: bool,

    /// Date de la dernière requête, pour le rafraîchissement périodique
    pub last_request: Option<Instant>,
}

impl ListingScreen {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marque l'écran en chargement et retourne la requête à exécuter
    pub fn begin_loading(&mut self) -> AppCommand {
        self.loading = true;
        self.last_request = Some(Instant::now());
        AppCommand::LoadMarkets
    }

    /// Applique le résultat de la récupération du classement
    ///
    /// En cas d'échec : log, puis une seule carte d'exemple. Aucun rendu
    /// partiel, aucune nouvelle tentative.
    pub fn apply_markets(&mut self, result: Result<Vec<MarketEntry>, FetchError>) {
        self.loading = false;
        self.loaded = true;

        match result {
            Ok(mut entries) => {
                entries.truncate(PAGE_SIZE);
                info!(cards = entries.len(), "Rendering market cards");
                self.populate(entries);
            }
            Err(e) => {
                error!(endpoint = e.endpoint(), error = %e, "Error loading market data, showing sample entry");
                self.populate(vec![MarketEntry::sample()]);
            }
        }
    }

    /// Remplace toutes les cartes
    pub fn populate(&mut self, entries: Vec<MarketEntry>) {
        self.cards = entries.into_iter().map(Card::from_entry).collect();
        self.selected = self.selected.min(self.cards.len().saturating_sub(1));
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn card(&self, index: usize) -> Option<&Card> {
        self.cards.get(index)
    }

    /// Sélectionne une carte et retourne la transition vers le détail
    pub fn select(&mut self, index: usize) -> Option<Transition> {
        let card = self.cards.get(index)?;
        debug!(index, id = %card.entry.id, "Card selected");
        self.selected = index;
        Some(Transition::Detail(card.entry.clone()))
    }

    /// Sélectionne la carte courante (touche Entrée)
    pub fn select_current(&mut self) -> Option<Transition> {
        self.select(self.selected)
    }

    // ========================================================================
    // Navigation dans la grille
    // ========================================================================
    // CONCEPT : Index linéaire dans une grille
    // - ligne = index / GRID_COLUMNS, colonne = index % GRID_COLUMNS
    // - haut/bas : +/- GRID_COLUMNS, gauche/droite : +/- 1
    // ========================================================================

    pub fn move_left(&mut self) {
        if self.selected % GRID_COLUMNS > 0 {
            self.selected -= 1;
        }
    }

    pub fn move_right(&mut self) {
        if self.selected % GRID_COLUMNS < GRID_COLUMNS - 1 && self.selected + 1 < self.cards.len() {
            self.selected += 1;
        }
    }

    pub fn move_up(&mut self) {
        if self.selected >= GRID_COLUMNS {
            self.selected -= GRID_COLUMNS;
        }
    }

    pub fn move_down(&mut self) {
        let target = self.selected + GRID_COLUMNS;
        if target < self.cards.len() {
            self.selected = target;
        }
    }
}

// ============================================================================
// Tests unitaires
// ============================================================================
