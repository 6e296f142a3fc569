// ============================================================================
// Structure : App (navigateur)
// ============================================================================
// Possède les trois écrans et un seul pointeur d'écran courant.
//
// CONCEPTS RUST :
// 1. Enums pour state machines : Screen et Transition
// 2. Ownership : l'entrée sélectionnée est déplacée de la Transition vers
//    l'écran de détail, sans état global partagé
// 3. Option<AppCommand> : une transition peut demander un chargement
//
// Transitions autorisées :
//   Home -> Detail (sélection d'une carte, transporte une MarketEntry)
//   Home -> News   (bouton actualités)
//   Detail/News -> Home (retour)
// ============================================================================

use std::time::{Duration, Instant};

use ratatui::layout::Rect;
use tracing::{debug, info, warn};

use crate::models::MarketEntry;
use crate::screens::{DetailScreen, ListingScreen, NewsScreen};
use crate::ui::dashboard::{hit_test, HomeTarget};
use crate::ui::events::{
    click_position, is_back_event, is_down_event, is_enter_event, is_left_event, is_news_event,
    is_quit_event, is_refresh_event, is_right_event, is_up_event, Event,
};
use crate::worker::{AppCommand, AppResult};

/// Écrans de l'application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Classement du marché (écran initial)
    Home,

    /// Détail d'une entrée
    Detail,

    /// Actualités
    News,
}

impl Screen {
    /// Nom de l'écran, utilisé dans les logs
    pub fn name(&self) -> &'static str {
        match self {
            Screen::Home => "home",
            Screen::Detail => "detail",
            Screen::News => "news",
        }
    }

    /// Titre affiché dans l'en-tête
    pub fn title(&self) -> &'static str {
        match self {
            Screen::Home => "MORKAN",
            Screen::Detail => "Detailed Analysis",
            Screen::News => "Crypto News",
        }
    }
}

/// Demande de navigation
///
/// CONCEPT RUST : Enum avec données
/// - Detail transporte l'entrée de la carte sélectionnée
#[derive(Debug, Clone, PartialEq)]
pub enum Transition {
    Home,
    Detail(MarketEntry),
    News,
}

impl Transition {
    pub fn target(&self) -> Screen {
        match self {
            Transition::Home => Screen::Home,
            Transition::Detail(_) => Screen::Detail,
            Transition::News => Screen::News,
        }
    }
}

/// Vérifie qu'une transition est une arête du graphe de navigation
pub fn is_allowed(from: Screen, to: Screen) -> bool {
    matches!(
        (from, to),
        (Screen::Home, Screen::Detail)
            | (Screen::Home, Screen::News)
            | (Screen::Detail, Screen::Home)
            | (Screen::News, Screen::Home)
    )
}

/// État principal de l'application
pub struct App {
    /// Indique si l'application doit continuer à tourner
    pub running: bool,

    /// Écran actuellement affiché
    pub current_screen: Screen,

    pub listing: ListingScreen,
    pub detail: DetailScreen,
    pub news: NewsScreen,

    /// Two-step quit : première pression de 'q' -> confirmation
    pub confirm_quit: bool,

    /// Rafraîchissement périodique du classement (None = désactivé)
    refresh_interval: Option<Duration>,
}

impl App {
    pub fn new() -> Self {
        Self::with_refresh_interval(None)
    }

    pub fn with_refresh_interval(refresh_interval: Option<Duration>) -> Self {
        Self {
            running: true,
            current_screen: Screen::Home,
            listing: ListingScreen::new(),
            detail: DetailScreen::new(),
            news: NewsScreen::new(),
            confirm_quit: false,
            refresh_interval,
        }
    }

    /// Première activation de l'écran d'accueil
    pub fn start(&mut self) -> AppCommand {
        info!(screen = Screen::Home.name(), "Activating initial screen");
        self.current_screen = Screen::Home;
        self.listing.begin_loading()
    }

    /// Change d'écran
    ///
    /// Retourne la requête à exécuter pour l'écran activé, s'il y en a une.
    /// Une transition hors du graphe est refusée et l'écran reste inchangé.
    pub fn navigate(&mut self, transition: Transition) -> Option<AppCommand> {
        let from = self.current_screen;
        let to = transition.target();

        if !is_allowed(from, to) {
            warn!(from = from.name(), to = to.name(), "Rejected navigation");
            return None;
        }

        info!(from = from.name(), to = to.name(), "Navigating");
        self.current_screen = to;

        match transition {
            Transition::Detail(entry) => Some(self.detail.load_entry(entry)),
            Transition::News => Some(self.news.begin_loading()),
            Transition::Home if !self.listing.loaded && !self.listing.loading => {
                Some(self.listing.begin_loading())
            }
            Transition::Home => None,
        }
    }

    /// Applique un résultat du worker à l'écran concerné
    pub fn apply_result(&mut self, result: AppResult) {
        match result {
            AppResult::MarketsLoaded(result) => self.listing.apply_markets(result),
            AppResult::PriceHistoryLoaded { id, result } => self.detail.apply_history(&id, result),
            AppResult::NewsLoaded(result) => self.news.apply_articles(result),
        }
    }

    /// Tick : rafraîchissement périodique de l'accueil
    pub fn tick(&mut self, now: Instant) -> Option<AppCommand> {
        let interval = self.refresh_interval?;
        if self.current_screen != Screen::Home || self.listing.loading {
            return None;
        }

        let last = self.listing.last_request?;
        if now.saturating_duration_since(last) >= interval {
            debug!(interval_secs = interval.as_secs(), "Periodic market refresh");
            return Some(self.listing.begin_loading());
        }
        None
    }

    /// Quitte l'application
    pub fn quit(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn request_quit(&mut self) {
        self.confirm_quit = true;
    }

    pub fn cancel_quit(&mut self) {
        self.confirm_quit = false;
    }

    pub fn is_awaiting_quit_confirmation(&self) -> bool {
        self.confirm_quit
    }

    /// Message de chargement de l'écran courant
    pub fn loading_message(&self) -> Option<&'static str> {
        match self.current_screen {
            Screen::Home if self.listing.loading => Some("Chargement du marché..."),
            Screen::Detail if self.detail.is_loading() => Some("Chargement de l'historique..."),
            Screen::News if self.news.loading => Some("Chargement des actualités..."),
            _ => None,
        }
    }

    // ========================================================================
    // Gestion des événements
    // ========================================================================

    /// Traite un événement et retourne la requête éventuelle à envoyer au worker
    ///
    /// `viewport` est la zone du dernier rendu, utilisée pour retrouver la
    /// carte sous un clic de souris.
    pub fn handle_event(&mut self, event: &Event, viewport: Rect) -> Option<AppCommand> {
        if matches!(event, Event::Tick) {
            return None;
        }

        if is_quit_event(event) {
            if self.is_awaiting_quit_confirmation() {
                info!("User confirmed quit");
                self.quit();
            } else {
                info!("User requested quit (awaiting confirmation)");
                self.request_quit();
            }
            return None;
        }

        // Toute autre touche annule la confirmation
        self.cancel_quit();

        match self.current_screen {
            Screen::Home => self.handle_home_event(event, viewport),
            Screen::Detail => {
                if is_back_event(event) {
                    return self.navigate(Transition::Home);
                }
                None
            }
            Screen::News => {
                if is_back_event(event) {
                    return self.navigate(Transition::Home);
                }
                if is_up_event(event) {
                    self.news.scroll_up();
                } else if is_down_event(event) {
                    self.news.scroll_down();
                }
                None
            }
        }
    }

    fn handle_home_event(&mut self, event: &Event, viewport: Rect) -> Option<AppCommand> {
        if let Some((column, row)) = click_position(event) {
            return match hit_test(viewport, &self.listing, column, row)? {
                HomeTarget::Card(index) => {
                    let transition = self.listing.select(index)?;
                    self.navigate(transition)
                }
                HomeTarget::NewsButton => self.navigate(Transition::News),
            };
        }

        if is_enter_event(event) {
            let transition = self.listing.select_current()?;
            return self.navigate(transition);
        }

        if is_news_event(event) {
            return self.navigate(Transition::News);
        }

        if is_refresh_event(event) {
            if self.listing.loading {
                return None;
            }
            info!("User requested market refresh");
            return Some(self.listing.begin_loading());
        }

        if is_up_event(event) {
            self.listing.move_up();
        } else if is_down_event(event) {
            self.listing.move_down();
        } else if is_left_event(event) {
            self.listing.move_left();
        } else if is_right_event(event) {
            self.listing.move_right();
        }
        None
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests unitaires
// ============================================================================
