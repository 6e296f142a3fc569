// ============================================================================
// Indicateurs techniques (valeurs de remplacement)
// ============================================================================
// Aucun calcul d'analyse technique réel : les trois indicateurs affichent
// la même valeur, 100 × (prix ÷ 50000) arrondie à 2 décimales.
// ============================================================================

use crate::models::market_entry::SAMPLE_PRICE;

/// Noms affichés, dans l'ordre
pub const INDICATOR_NAMES: [&str; 3] = ["RSI", "MACD", "Bollinger Bands"];

#[derive(Debug, Clone, PartialEq)]
pub struct Indicator {
    pub name: &'static str,
    pub value: f64,
}

impl Indicator {
    /// Ligne affichée : "RSI: 100.00"
    pub fn display(&self) -> String {
        format!("{}: {:.2}", self.name, self.value)
    }
}

/// Valeur de remplacement : round(100 × price / 50000, 2)
pub fn placeholder_value(price: f64) -> f64 {
    (100.0 * (price / SAMPLE_PRICE) * 100.0).round() / 100.0
}

/// Construit les trois indicateurs pour un prix donné
pub fn placeholder_indicators(price: f64) -> Vec<Indicator> {
    let value = placeholder_value(price);
    INDICATOR_NAMES
        .iter()
        .map(|&name| Indicator { name, value })
        .collect()
}
