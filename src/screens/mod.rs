// ============================================================================
// Module : screens
// ============================================================================
// État des trois écrans. Chaque écran construit ses requêtes et attrape les
// échecs de récupération à sa frontière. Le rendu est dans `ui`.
// ============================================================================

pub mod detail;  // Détail d'une entrée
pub mod listing; // Accueil : grille de cartes
pub mod news;    // Actualités

pub use detail::{DetailScreen, HistoryState};
pub use listing::{Card, ListingScreen, GRID_COLUMNS};
pub use news::NewsScreen;
