// ============================================================================
// Morkan - Library
// ============================================================================
// Expose les modules publics pour le binaire et les tests
// ============================================================================

pub mod api;       // Clients CoinGecko et NewsAPI
pub mod app;       // Navigateur : écran courant et transitions
pub mod config;    // Options de ligne de commande
pub mod error;     // Erreurs de récupération
pub mod models;    // Structures de données
pub mod screens;   // État des trois écrans
pub mod ui;        // Interface utilisateur
pub mod worker;    // Appels API en arrière-plan
