// ============================================================================
// Structure : MarketEntry
// ============================================================================
// Résumé d'une cryptomonnaie tel que renvoyé par /coins/markets
//
// CONCEPTS RUST :
// 1. #[derive(Deserialize)] : les champs correspondent exactement au JSON
//    - Un champ absent ou null fait échouer la désérialisation entière
// 2. Clone : l'entrée est copiée dans la carte puis dans la transition
// ============================================================================

use serde::{Deserialize, Serialize};

/// Prix de référence de l'entrée d'exemple (et de la formule des indicateurs)
pub const SAMPLE_PRICE: f64 = 50_000.0;

/// Tendance d'une variation sur 24h
///
/// Une variation de exactement 0.0 est une hausse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Gain,
    Loss,
}

impl Tone {
    pub fn from_change(change: f64) -> Self {
        if change >= 0.0 {
            Tone::Gain
        } else {
            Tone::Loss
        }
    }
}

/// Une cryptomonnaie du classement par capitalisation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketEntry {
    /// Identifiant CoinGecko (ex: "bitcoin"), clé de l'historique de prix
    pub id: String,

    /// Nom affiché (ex: "Bitcoin")
    pub name: String,

    /// Symbole tel que renvoyé par l'API (souvent en minuscules : "btc")
    pub symbol: String,

    /// Prix actuel en USD
    pub current_price: f64,

    /// Variation sur 24h en pourcentage
    pub price_change_percentage_24h: f64,
}

impl MarketEntry {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        symbol: impl Into<String>,
        current_price: f64,
        price_change_percentage_24h: f64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            symbol: symbol.into(),
            current_price,
            price_change_percentage_24h,
        }
    }

    /// Entrée affichée à la place du classement quand la récupération échoue
    pub fn sample() -> Self {
        Self::new("bitcoin", "Bitcoin", "BTC", SAMPLE_PRICE, 2.5)
    }

    /// Symbole en majuscules (ex: "btc" -> "BTC")
    pub fn display_symbol(&self) -> String {
        self.symbol.to_uppercase()
    }

    /// Prix formaté : "$1,234.56"
    pub fn formatted_price(&self) -> String {
        format_usd(self.current_price)
    }

    /// Variation formatée avec signe : "+2.50%" ou "-1.25%"
    pub fn formatted_change(&self) -> String {
        format!("{:+.2}%", self.price_change_percentage_24h)
    }

    pub fn tone(&self) -> Tone {
        Tone::from_change(self.price_change_percentage_24h)
    }

    /// Titre de l'écran de détail : "Bitcoin (BTC)"
    pub fn title(&self) -> String {
        format!("{} ({})", self.name, self.display_symbol())
    }
}

/// Formate un montant en dollars avec séparateurs de milliers et 2 décimales
///
/// CONCEPT RUST : Manipulation de chaînes
/// - format!("{:.2}") arrondit d'abord, on groupe ensuite la partie entière
/// - Les chiffres sont ASCII, donc le découpage par octets est sûr
pub fn format_usd(amount: f64) -> String {
    let fixed = format!("{:.2}", amount.abs());
    let (integer, decimals) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (i, digit) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if amount < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{}${}.{}", sign, grouped, decimals)
}

// ============================================================================
// Tests unitaires
// ============================================================================
