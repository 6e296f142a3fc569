// ============================================================================
// Écran des actualités
// ============================================================================

use tracing::{error, info};

use crate::error::FetchError;
use crate::models::NewsArticle;
use crate::worker::AppCommand;

#[derive(Debug, Default)]
pub struct NewsScreen {
    pub articles: Vec<NewsArticle>,

    pub loading: bool,

    /// Index du premier article visible
    pub scroll: usize,
}

impl NewsScreen {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marque l'écran en chargement et retourne la requête à exécuter
    pub fn begin_loading(&mut self) -> AppCommand {
        self.loading = true;
        AppCommand::LoadNews
    }

    /// Applique le résultat de la récupération des articles
    ///
    /// En cas d'échec : log, puis un seul article d'exemple.
    pub fn apply_articles(&mut self, result: Result<Vec<NewsArticle>, FetchError>) {
        self.loading = false;
        self.scroll = 0;

        self.articles = match result {
            Ok(articles) => {
                info!(rows = articles.len(), "Rendering news rows");
                articles
            }
            Err(e) => {
                error!(endpoint = e.endpoint(), error = %e, "Error loading news, showing sample article");
                vec![NewsArticle::sample()]
            }
        };
    }

    pub fn scroll_up(&mut self) {
        self.scroll = self.scroll.saturating_sub(1);
    }

    pub fn scroll_down(&mut self) {
        if self.scroll + 1 < self.articles.len() {
            self.scroll += 1;
        }
    }
}
